use core_types::NavError;

pub(crate) fn normalize_path(path: &str) -> Result<String, NavError> {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        return Err(NavError::EmptyPath);
    }
    if !trimmed.starts_with('/') {
        return Err(NavError::RelativePath(trimmed.to_string()));
    }
    Ok(trimmed.to_string())
}
