use crate::utils::error::{FarmError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(FarmError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_positive_area(field_name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(FarmError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Area must be a positive number of hectares".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(FarmError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| FarmError::MissingConfig {
        field: field_name.to_string(),
    })
}

/// Parses a user-supplied area string into hectares. All string-to-number
/// conversion stays at this boundary; the allocator only ever sees f64.
pub fn parse_area(field_name: &str, raw: &str) -> Result<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(FarmError::InvalidConfigValue {
            field: field_name.to_string(),
            value: raw.to_string(),
            reason: "Area cannot be empty".to_string(),
        });
    }

    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        Ok(value) => Err(FarmError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Area must be a finite number".to_string(),
        }),
        Err(e) => Err(FarmError::InvalidConfigValue {
            field: field_name.to_string(),
            value: raw.to_string(),
            reason: format!("Invalid number format: {}", e),
        }),
    }
}

/// Parses a comma-separated list of areas, e.g. "3.3,3.3,3.4".
pub fn parse_area_list(field_name: &str, raw: &str) -> Result<Vec<f64>> {
    raw.split(',')
        .enumerate()
        .map(|(i, part)| parse_area(&format!("{}[{}]", field_name, i), part))
        .collect()
}
