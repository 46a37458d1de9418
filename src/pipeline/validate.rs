//! Request validation

use crate::error::ValidationError;

/// Reject an empty batch. Checked once, before any provider call.
pub fn batch(inputs: &[String]) -> Result<(), ValidationError> {
    if inputs.is_empty() {
        return Err(ValidationError::EmptyBatch);
    }
    Ok(())
}

/// Reject an empty or whitespace-only input string. Called per item,
/// interleaved with the provider loop, so the first blank item encountered
/// aborts the remaining items.
pub fn input(text: &str) -> Result<(), ValidationError> {
    if text.trim().is_empty() {
        return Err(ValidationError::BlankInput);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_batch_rejected() {
        assert_eq!(batch(&[]), Err(ValidationError::EmptyBatch));
    }

    #[test]
    fn test_nonempty_batch_accepted() {
        assert!(batch(&["hello".to_string()]).is_ok());
    }

    #[test]
    fn test_blank_input_rejected() {
        assert_eq!(input(""), Err(ValidationError::BlankInput));
        assert_eq!(input("   "), Err(ValidationError::BlankInput));
        assert_eq!(input("\t\n"), Err(ValidationError::BlankInput));
    }

    #[test]
    fn test_normal_input_accepted() {
        assert!(input("hello world").is_ok());
        assert!(input("  padded but not blank  ").is_ok());
    }
}
