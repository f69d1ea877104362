use std::fmt;

pub const INVALID_FORMAT_TITLE: &str = "Invalid Format";
pub const INVALID_FORMAT_HINT: &str = "Please add @ before the username (e.g., @thegreatola)";

/// Rejections a user can fix by changing the query. No search runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    InvalidFormat { raw: String },
}

impl LookupError {
    pub fn title(&self) -> &'static str {
        match self {
            LookupError::InvalidFormat { .. } => INVALID_FORMAT_TITLE,
        }
    }

    pub fn hint(&self) -> &'static str {
        match self {
            LookupError::InvalidFormat { .. } => INVALID_FORMAT_HINT,
        }
    }
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupError::InvalidFormat { raw } => {
                write!(f, "{} (query={raw:?}): {}", self.title(), self.hint())
            }
        }
    }
}

impl std::error::Error for LookupError {}
