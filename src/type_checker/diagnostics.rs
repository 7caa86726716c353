use std::fmt::Display;

/// Every kind of type error the checker can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeErrorKind {
    ErroneousVarDecl,
    FnCallParamCount,
    FnCallParamType,
    ErroneousReturnType,
    ExpressionTypeMismatch,
    ExpectedBooleanExpression,
    NonBooleanCondStmt,
    EmptyExpression,
    AttemptedBoolOpOnNonBools,
    AttemptedBitOpOnNonNumeric,
    AttemptedShiftOnNonInt,
    AttemptedAddOpOnNonNumeric,
}

impl Display for TypeErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// One recoverable type error. Renders as `[Kind] (line): message`.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDiagnostic {
    pub kind: TypeErrorKind,
    pub line: u32,
    pub message: String,
}

impl TypeDiagnostic {
    pub fn new(kind: TypeErrorKind, line: u32, message: impl Into<String>) -> Self {
        TypeDiagnostic {
            kind,
            line,
            message: message.into(),
        }
    }
}

impl Display for TypeDiagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] ({}): {}", self.kind, self.line, self.message)
    }
}

/// Result of a full type-checking pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypeReport {
    pub error_count: usize,
    pub diagnostics: Vec<TypeDiagnostic>,
}

impl TypeReport {
    pub fn is_ok(&self) -> bool {
        self.error_count == 0
    }

    /// Number of diagnostics of the given kind.
    pub fn count(&self, kind: TypeErrorKind) -> usize {
        self.diagnostics
            .iter()
            .filter(|diagnostic| diagnostic.kind == kind)
            .count()
    }
}
