//! Formatting and display logic
//!
//! Pure functions for turning server values into display strings.

use chrono::NaiveDateTime;

/// Timestamp layout the server serializes `created_at` with
const SERVER_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format a size reported in KB (the server's unit) as a compact string
///
/// ```
/// use foldertui::logic::formatting::format_size_kb;
///
/// assert_eq!(format_size_kb(0.0), "0 B");
/// assert_eq!(format_size_kb(0.5), "512 B");
/// assert_eq!(format_size_kb(2.0), "2.0 KB");
/// assert_eq!(format_size_kb(1536.0), "1.5 MB");
/// ```
pub fn format_size_kb(size_kb: f64) -> String {
    const KB: f64 = 1024.0;

    if size_kb <= 0.0 {
        return "0 B".to_string();
    }

    if size_kb < 1.0 {
        format!("{:.0} B", size_kb * KB)
    } else if size_kb < KB {
        format!("{:.1} KB", size_kb)
    } else if size_kb < KB * KB {
        format!("{:.1} MB", size_kb / KB)
    } else {
        format!("{:.2} GB", size_kb / (KB * KB))
    }
}

/// Short date for a server timestamp; unparseable input is shown as-is
pub fn format_created_at(raw: &str) -> String {
    match NaiveDateTime::parse_from_str(raw, SERVER_TIMESTAMP_FORMAT) {
        Ok(timestamp) => timestamp.format("%Y-%m-%d %H:%M").to_string(),
        Err(_) => raw.to_string(),
    }
}

/// Summary line for a folder's stats
pub fn format_folder_summary(file_count: u64, total_size_mb: f64) -> String {
    let files = if file_count == 1 { "file" } else { "files" };
    format!("{} {} │ {:.2} MB", file_count, files, total_size_mb)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size_gb() {
        assert_eq!(format_size_kb(3.0 * 1024.0 * 1024.0), "3.00 GB");
    }

    #[test]
    fn test_format_created_at() {
        assert_eq!(format_created_at("2023-10-05 14:03:59"), "2023-10-05 14:03");
    }

    #[test]
    fn test_format_created_at_passthrough() {
        assert_eq!(format_created_at("yesterday"), "yesterday");
    }

    #[test]
    fn test_folder_summary_pluralization() {
        assert_eq!(format_folder_summary(1, 0.5), "1 file │ 0.50 MB");
        assert_eq!(format_folder_summary(3, 12.0), "3 files │ 12.00 MB");
    }
}
