use validator::ValidationError;

/// Rejects empty and whitespace-only strings.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("must not be blank".into());
        return Err(err);
    }
    Ok(())
}

/// Width of the `VARCHAR(255)` columns.
pub const MAX_TEXT_LEN: u64 = 255;
/// Width of the URL columns.
pub const MAX_URL_LEN: u64 = 1024;

/// Checks every technology name against the `project_technologies` column width.
pub fn technologies_fit(values: &[String]) -> Result<(), ValidationError> {
    if values.iter().any(|v| v.chars().count() as u64 > MAX_TEXT_LEN) {
        let mut err = ValidationError::new("length");
        err.message = Some("each technology must be at most 255 characters".into());
        return Err(err);
    }
    Ok(())
}
