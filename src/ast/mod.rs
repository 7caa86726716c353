/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - expressions: Expression nodes and operator enums
/// - statements: Statement nodes, blocks and function declarations
/// - types: The scalar types named in declarations
/// - printer: Indented dump used for inspection
pub mod expressions;
pub mod printer;
pub mod statements;
pub mod types;
