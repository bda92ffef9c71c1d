use thiserror::Error;

use crate::domain::models::MAX_BASE_PRICE;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("At least one image is mandatory!")]
    MediaRequired,
    #[error("Enter product name first")]
    NameRequired,
    #[error("{0} is required")]
    FieldRequired(&'static str),
    #[error("Price must be a whole number of rupees")]
    InvalidPrice,
    #[error("Price cannot exceed Rs {max} per unit", max = MAX_BASE_PRICE)]
    PriceTooHigh,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages() {
        assert_eq!(
            ValidationError::MediaRequired.to_string(),
            "At least one image is mandatory!"
        );
        assert_eq!(
            ValidationError::NameRequired.to_string(),
            "Enter product name first"
        );
        assert_eq!(
            ValidationError::FieldRequired("Full Name").to_string(),
            "Full Name is required"
        );
        assert_eq!(
            ValidationError::PriceTooHigh.to_string(),
            "Price cannot exceed Rs 1000000 per unit"
        );
    }
}
