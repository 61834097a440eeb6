use std::fmt;
use thiserror::Error;

/// Which argument an unknown code was supplied as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeRole {
    Country,
    Origin,
    Destination,
}

impl CodeRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            CodeRole::Country => "country",
            CodeRole::Origin => "origin country",
            CodeRole::Destination => "destination country",
        }
    }
}

impl fmt::Display for CodeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Failures surfaced to callers. A disconnected route is not an error; see
/// [`crate::models::RouteOutcome`].
#[derive(Debug, Error)]
pub enum AtlasError {
    #[error("{role} with code '{code}' was not found")]
    UnknownCode { code: String, role: CodeRole },

    #[error("region '{region}' has no countries")]
    EmptyRegion { region: String },

    #[error(transparent)]
    Provider(#[from] anyhow::Error),
}

impl AtlasError {
    pub fn unknown(code: impl Into<String>, role: CodeRole) -> Self {
        AtlasError::UnknownCode {
            code: code.into(),
            role,
        }
    }

    /// True for conditions a front end reports as "not found"
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            AtlasError::UnknownCode { .. } | AtlasError::EmptyRegion { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, AtlasError>;
