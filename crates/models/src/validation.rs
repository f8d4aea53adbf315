//! Field rules shared by customer and address payloads.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::ModelError;

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{10}$").expect("valid phone regex"));
static PIN_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{6}$").expect("valid pin code regex"));

/// Present and non-blank; returns the trimmed value.
pub fn required(field: &'static str, value: Option<&str>) -> Result<String, ModelError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(ModelError::validation(field, format!("{field} is required"))),
    }
}

pub fn phone_number(value: Option<&str>) -> Result<String, ModelError> {
    let v = required("phone_number", value)?;
    if !PHONE_RE.is_match(&v) {
        return Err(ModelError::validation(
            "phone_number",
            "phone_number must be exactly 10 digits",
        ));
    }
    Ok(v)
}

pub fn pin_code(value: Option<&str>) -> Result<String, ModelError> {
    let v = required("pin_code", value)?;
    if !PIN_CODE_RE.is_match(&v) {
        return Err(ModelError::validation("pin_code", "pin_code must be exactly 6 digits"));
    }
    Ok(v)
}
