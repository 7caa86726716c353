//! Type checking of a resolved program.
//!
//! Errors found here never stop the pass. Each one becomes a
//! [`diagnostics::TypeDiagnostic`] and the final [`diagnostics::TypeReport`]
//! carries their count. An expression that already produced an error is not
//! reported again by the expressions that contain it.

pub mod diagnostics;
pub mod returns;
pub mod type_checker;

#[cfg(test)]
mod tests;
