use thiserror::Error;

pub type ModtranResult<T> = Result<T, ModtranError>;

/// Coarse failure classes, mapped to stable process exit codes by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    InputValidation,
    Format,
    Report,
}

impl ErrorCategory {
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::InputValidation => 2,
            Self::Format => 4,
            Self::Report => 5,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InputValidation => "InputValidation",
            Self::Format => "Format",
            Self::Report => "Report",
        }
    }
}

/// Fatal failures of an encode or decode call. Every variant carries enough
/// context to fix the offending input without re-running under a debugger.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModtranError {
    #[error("field '{field}' expects a {expected} value, got '{actual}'")]
    TypeMismatch {
        field: &'static str,
        expected: &'static str,
        actual: String,
    },

    #[error("invalid value '{value}' for field '{field}'{}", allowed_suffix(.allowed))]
    InvalidValue {
        field: &'static str,
        value: String,
        allowed: Option<String>,
    },

    #[error("cannot fit '{rendered}' into the {width}-character slot of field '{field}'")]
    FormatOverflow {
        field: &'static str,
        rendered: String,
        width: usize,
    },

    #[error(
        "malformed report: {total_lines} lines, but the fixed layout needs at least {required} \
         (header {header} + footer {footer})"
    )]
    MalformedReport {
        total_lines: usize,
        required: usize,
        header: usize,
        footer: usize,
    },
}

impl ModtranError {
    pub fn invalid_value(
        field: &'static str,
        value: impl Into<String>,
        allowed: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            field,
            value: value.into(),
            allowed: Some(allowed.into()),
        }
    }

    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::TypeMismatch { .. } | Self::InvalidValue { .. } => ErrorCategory::InputValidation,
            Self::FormatOverflow { .. } => ErrorCategory::Format,
            Self::MalformedReport { .. } => ErrorCategory::Report,
        }
    }

    pub const fn exit_code(&self) -> i32 {
        self.category().exit_code()
    }

    pub fn diagnostic_line(&self) -> String {
        format!("ERROR: [{}] {}", self.category().as_str(), self)
    }
}

fn allowed_suffix(allowed: &Option<String>) -> String {
    match allowed {
        Some(allowed) => format!(" (allowed: {allowed})"),
        None => String::new(),
    }
}
