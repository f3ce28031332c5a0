use crate::utils::error::{PlannerError, Result};

pub const MIN_YEAR: u32 = 1;
pub const MAX_YEAR: u32 = 6;
pub const MIN_TERM: u32 = 1;
pub const MAX_TERM: u32 = 4;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(PlannerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(PlannerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: u32, min_value: u32) -> Result<()> {
    if value < min_value {
        return Err(PlannerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

/// Years outside 1-6 are only rejected where a report is scoped by year.
pub fn validate_year(year: u32) -> Result<()> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(PlannerError::YearOutOfRange { year });
    }
    Ok(())
}

pub fn validate_term(term: u32) -> Result<()> {
    if !(MIN_TERM..=MAX_TERM).contains(&term) {
        return Err(PlannerError::TermOutOfRange { term });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("data_dir", "./data").is_ok());
        assert!(validate_path("data_dir", "").is_err());
        assert!(validate_path("data_dir", "   ").is_err());
        assert!(validate_path("data_dir", "da\0ta").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("default_credits", 4, 1).is_ok());
        assert!(validate_positive_number("default_credits", 0, 1).is_err());
    }

    #[test]
    fn test_validate_year_and_term_bounds() {
        assert!(validate_year(1).is_ok());
        assert!(validate_year(6).is_ok());
        assert!(matches!(validate_year(0), Err(PlannerError::YearOutOfRange { year: 0 })));
        assert!(matches!(validate_year(7), Err(PlannerError::YearOutOfRange { year: 7 })));

        assert!(validate_term(4).is_ok());
        assert!(matches!(validate_term(5), Err(PlannerError::TermOutOfRange { term: 5 })));
    }
}
