use std::fmt::Display;

use crate::errors::{PlannerError, Result};

/// check `min <= value <= max`, naming the field on failure
pub fn validate_range<T>(value: T, min: T, max: T, field: &str) -> Result<T>
where
    T: PartialOrd + Display + Copy,
{
    if value < min || value > max {
        return Err(PlannerError::invalid_input(
            field,
            format!("must be between {min} and {max}, got {value}"),
        ));
    }
    Ok(value)
}

/// pull a value into `[min, max]`
pub fn clamp<T: PartialOrd>(value: T, min: T, max: T) -> T {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}
