//! Result type alias for MediRecord

use super::errors::MedirecordError;

/// Result type alias for MediRecord operations
///
/// # Examples
///
/// ```
/// use medirecord::domain::result::Result;
/// use medirecord::domain::errors::MedirecordError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(MedirecordError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, MedirecordError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_with_question_mark() -> Result<()> {
        fn inner() -> Result<i32> {
            Ok(42)
        }

        let value = inner()?;
        assert_eq!(value, 42);
        Ok(())
    }

    #[test]
    fn test_result_err() {
        let result: Result<i32> = Err(MedirecordError::Validation("test error".to_string()));
        assert!(result.is_err());
    }
}
