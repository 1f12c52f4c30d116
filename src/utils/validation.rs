use crate::utils::error::{FxError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(FxError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(FxError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| FxError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(FxError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_non_empty_list(field_name: &str, values: &[String]) -> Result<()> {
    if values.is_empty() {
        return Err(FxError::MissingConfigError {
            field: field_name.to_string(),
        });
    }

    for value in values {
        validate_non_empty_string(field_name, value)?;
    }
    Ok(())
}

/// 條件中恰好只能設定一種比較方式
pub fn validate_exactly_one(field_name: &str, present: &[(&str, bool)]) -> Result<()> {
    let set: Vec<&str> = present
        .iter()
        .filter(|(_, is_set)| *is_set)
        .map(|(name, _)| *name)
        .collect();

    match set.len() {
        1 => Ok(()),
        0 => Err(FxError::MissingConfigError {
            field: format!(
                "{} (one of: {})",
                field_name,
                present.iter().map(|(name, _)| *name).collect::<Vec<_>>().join(", ")
            ),
        }),
        _ => Err(FxError::ConfigValidationError {
            field: field_name.to_string(),
            message: format!("Only one comparator allowed, found: {}", set.join(", ")),
        }),
    }
}
