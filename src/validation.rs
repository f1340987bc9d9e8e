use thiserror::Error;

pub const MIN_FIELD_LEN: usize = 3;
pub const MAX_FIELD_LEN: usize = 500;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("This field is required")]
    Required,
    #[error("Use at least {min} characters (currently {actual})")]
    TooShort { min: usize, actual: usize },
    #[error("Use at most {max} characters (currently {actual})")]
    TooLong { max: usize, actual: usize },
}

/// Checks one free-text commit field: required, 3 to 500 characters.
/// Length is counted in chars, not bytes.
pub fn validate_field(value: &str) -> Result<(), FieldError> {
    let actual = value.chars().count();
    if actual == 0 {
        return Err(FieldError::Required);
    }
    if actual < MIN_FIELD_LEN {
        return Err(FieldError::TooShort {
            min: MIN_FIELD_LEN,
            actual,
        });
    }
    if actual > MAX_FIELD_LEN {
        return Err(FieldError::TooLong {
            max: MAX_FIELD_LEN,
            actual,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_field_bounds() {
        assert_eq!(validate_field(""), Err(FieldError::Required));
        assert_eq!(
            validate_field("ab"),
            Err(FieldError::TooShort { min: 3, actual: 2 })
        );
        assert_eq!(validate_field("abc"), Ok(()));
        assert_eq!(validate_field(&"x".repeat(500)), Ok(()));
        assert_eq!(
            validate_field(&"x".repeat(501)),
            Err(FieldError::TooLong {
                max: 500,
                actual: 501
            })
        );
    }

    #[test]
    fn test_validate_field_counts_chars() {
        // three chars, six bytes
        assert_eq!(validate_field("éàü"), Ok(()));
    }

    #[test]
    fn test_field_error_messages() {
        assert_eq!(FieldError::Required.to_string(), "This field is required");
        assert_eq!(
            FieldError::TooShort { min: 3, actual: 1 }.to_string(),
            "Use at least 3 characters (currently 1)"
        );
    }
}
