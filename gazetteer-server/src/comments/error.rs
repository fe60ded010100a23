//! Comment store error types.

/// Errors that can occur when reading or writing comments.
#[derive(Debug, thiserror::Error)]
pub enum CommentError {
    /// A submitted field was empty
    #[error("{field} must not be empty")]
    Validation { field: &'static str },

    /// The comment file could not be read or written
    #[error("comment store error: {message}")]
    Persist { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = CommentError::Validation { field: "name" };
        assert_eq!(err.to_string(), "name must not be empty");

        let err = CommentError::Persist {
            message: "disk full".into(),
        };
        assert_eq!(err.to_string(), "comment store error: disk full");
    }
}
