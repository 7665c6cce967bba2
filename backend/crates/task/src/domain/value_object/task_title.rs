//! Task Title Value Object

use kernel::validation::{self, ValidationError};

const FIELD: &str = "title";
const TITLE_MIN_LENGTH: usize = 1;
const TITLE_MAX_LENGTH: usize = 10;

/// Validated task title (1 to 10 characters)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskTitle(String);

impl TaskTitle {
    pub fn new(title: impl Into<String>) -> Result<Self, ValidationError> {
        let title = title.into();

        validation::required(FIELD, &title, "title is required")?;
        validation::char_length_between(
            FIELD,
            &title,
            TITLE_MIN_LENGTH,
            TITLE_MAX_LENGTH,
            "title must be 1 to 10 characters",
        )?;

        Ok(Self(title))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(title: impl Into<String>) -> Self {
        Self(title.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_rules() {
        assert_eq!(TaskTitle::new("").unwrap_err().message(), "title is required");
        assert_eq!(
            TaskTitle::new("a".repeat(11)).unwrap_err().message(),
            "title must be 1 to 10 characters"
        );
        assert!(TaskTitle::new("a").is_ok());
        assert!(TaskTitle::new("a".repeat(10)).is_ok());
    }

    #[test]
    fn test_title_counts_characters() {
        // 10 characters, 30 bytes
        assert!(TaskTitle::new("買い物リストを作成す").is_ok());
        assert!(TaskTitle::new("買い物リストを作成する").is_err());
    }
}
