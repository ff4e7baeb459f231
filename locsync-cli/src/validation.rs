use std::path::Path;

/// Validate directory path exists and is a directory
pub fn validate_directory_path(path: &str) -> Result<(), String> {
    if path.trim().is_empty() {
        return Err("Directory path cannot be empty".to_string());
    }

    let path_obj = Path::new(path);

    if !path_obj.exists() {
        return Err(format!("Directory does not exist: {}", path));
    }

    if !path_obj.is_dir() {
        return Err(format!("Path is not a directory: {}", path));
    }

    Ok(())
}
