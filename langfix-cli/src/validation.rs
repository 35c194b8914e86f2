use std::path::Path;

/// Validate the locale directory exists and is a directory
pub fn validate_lang_dir(path: &Path) -> Result<(), String> {
    if !path.exists() {
        return Err(format!("Directory does not exist: {}", path.display()));
    }

    if !path.is_dir() {
        return Err(format!("Path is not a directory: {}", path.display()));
    }

    Ok(())
}

/// Validate output directory exists or can be created
pub fn validate_output_dir(path: &Path) -> Result<(), String> {
    if path.exists() && !path.is_dir() {
        return Err(format!("Output path is not a directory: {}", path.display()));
    }
    std::fs::create_dir_all(path)
        .map_err(|e| format!("Cannot create output directory: {}", e))
}

/// Validate the parent of an output file exists or can be created
pub fn validate_output_path(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("Cannot create output directory: {}", e))?;
    }

    Ok(())
}

/// Validate a locale identifier as used in file names (`en_us`, `zh-Hant`)
pub fn validate_locale_id(locale: &str) -> Result<(), String> {
    if locale.is_empty() {
        return Err("Locale cannot be empty".to_string());
    }

    if !locale
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(format!(
            "Invalid locale: {}. Expected letters, digits, '_' or '-'",
            locale
        ));
    }

    Ok(())
}

/// Validate a file extension (without the dot)
pub fn validate_extension(extension: &str) -> Result<(), String> {
    let trimmed = extension.trim_start_matches('.');
    if trimmed.is_empty() || trimmed.contains(['/', '\\']) {
        return Err(format!("Invalid file extension: {}", extension));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_validate_lang_dir() {
        let temp_dir = TempDir::new().unwrap();
        assert!(validate_lang_dir(temp_dir.path()).is_ok());

        let file = temp_dir.path().join("de_de.json");
        std::fs::write(&file, "{}").unwrap();
        assert!(validate_lang_dir(&file).unwrap_err().contains("not a directory"));
        assert!(
            validate_lang_dir(&temp_dir.path().join("missing"))
                .unwrap_err()
                .contains("does not exist")
        );
    }

    #[test]
    fn test_validate_output_dir_creates() {
        let temp_dir = TempDir::new().unwrap();
        let out = temp_dir.path().join("a").join("b");
        assert!(validate_output_dir(&out).is_ok());
        assert!(out.is_dir());
    }

    #[test]
    fn test_validate_locale_id() {
        assert!(validate_locale_id("en_us").is_ok());
        assert!(validate_locale_id("zh-Hant").is_ok());
        assert!(validate_locale_id("").is_err());
        assert!(validate_locale_id("../en_us").is_err());
        assert!(validate_locale_id("de de").is_err());
    }

    #[test]
    fn test_validate_extension() {
        assert!(validate_extension("json").is_ok());
        assert!(validate_extension(".lang").is_ok());
        assert!(validate_extension(".").is_err());
        assert!(validate_extension("a/b").is_err());
    }
}
