/// Utility functions used throughout the application

use std::path::PathBuf;

/// Get platform-specific debug log path
pub fn get_debug_log_path() -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push("foldertui-debug.log");
    path
}

/// Get platform-specific cache fallback path
pub fn get_cache_fallback_path() -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push("foldertui-cache");
    path
}

/// Last path component, for showing upload paths compactly
pub fn display_file_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_paths_live_in_temp_dir() {
        assert!(get_debug_log_path().starts_with(std::env::temp_dir()));
        assert!(get_debug_log_path().ends_with("foldertui-debug.log"));
        assert!(get_cache_fallback_path().ends_with("foldertui-cache"));
    }

    #[test]
    fn test_display_file_name() {
        assert_eq!(display_file_name(Path::new("/tmp/report.pdf")), "report.pdf");
        assert_eq!(display_file_name(Path::new("/")), "/");
    }
}
