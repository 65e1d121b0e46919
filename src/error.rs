use thiserror::Error;

/// The main error type for GCF lexing, parsing and document access.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GcfError {
    /// Illegal character or unterminated string literal.
    #[error("[GCF] Lexical Error at {line}:{column}: {message}{}", tail(.hint, .code))]
    LexicalError {
        message: String,
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    #[error("[GCF] Syntax Error at line {line}: expected {expected}, found {found}{}", tail(.hint, .code))]
    SyntaxError {
        expected: String,
        found: String,
        line: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    /// Mismatched or missing close tag, or a global key after the first group.
    #[error("[GCF] Structural Error at line {line}: {message}{}", tail(.hint, .code))]
    StructuralError {
        message: String,
        line: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    #[error("[GCF] Value Format Error at line {line}: '{text}' is not a valid value{}", tail(.hint, .code))]
    ValueFormatError {
        text: String,
        line: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    #[error("[GCF] Reference Error at line {line}: no global key '{name}'{}", tail(.hint, .code))]
    ReferenceError {
        name: String,
        line: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    #[error("[GCF] Path Error '{path}': {message}{}", tail(.hint, .code))]
    PathError {
        path: String,
        message: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    #[error("[GCF] Key Error: no key '{key}' in group '{group}'{}", tail(.hint, .code))]
    KeyNotFound {
        key: String,
        group: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    #[error("[GCF] Conversion Error: value '{value}' cannot be read as {target}{}", tail(.hint, .code))]
    ConversionError {
        value: String,
        target: &'static str,
        hint: Option<String>,
        code: Option<u32>,
    },
    /// Raised when API input could not be written back as valid GCF.
    #[error("[GCF] Validation Error: {message}{}", tail(.hint, .code))]
    ValidationError {
        message: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    #[error("[GCF] File Error '{path}': {message}{}", tail(.hint, .code))]
    FileError {
        message: String,
        path: String,
        hint: Option<String>,
        code: Option<u32>,
    },
}

impl GcfError {
    /// Numeric error code, if one was attached.
    pub fn code(&self) -> Option<u32> {
        match self {
            GcfError::LexicalError { code, .. }
            | GcfError::SyntaxError { code, .. }
            | GcfError::StructuralError { code, .. }
            | GcfError::ValueFormatError { code, .. }
            | GcfError::ReferenceError { code, .. }
            | GcfError::PathError { code, .. }
            | GcfError::KeyNotFound { code, .. }
            | GcfError::ConversionError { code, .. }
            | GcfError::ValidationError { code, .. }
            | GcfError::FileError { code, .. } => *code,
        }
    }

    pub(crate) fn path_not_found(path: &str) -> Self {
        GcfError::PathError {
            path: path.to_string(),
            message: "group does not exist".into(),
            hint: Some("Group paths are absolute and end with '/', e.g. /Net/Sub/".into()),
            code: Some(304),
        }
    }
}

fn tail(hint: &Option<String>, code: &Option<u32>) -> String {
    format!(
        "{}{}",
        hint.as_ref().map_or(String::new(), |h| format!(" Hint: {}", h)),
        code.map_or(String::new(), |c| format!(" Code: {}", c))
    )
}
