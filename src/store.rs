//! Report persistence.
//!
//! Plain passthrough storage: the text written is exactly the text read back.

use log::debug;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Extension given to stored reports
pub const REPORT_EXTENSION: &str = "txt";

/// Get the default directory for stored reports
/// Uses platform-specific data directories:
/// - Linux: ~/.local/share/boxtab/reports
/// - macOS: ~/Library/Application Support/boxtab/reports
/// - Windows: %APPDATA%/boxtab/reports
pub fn default_report_dir() -> PathBuf {
    dirs::data_dir().map(|p| p.join("boxtab").join("reports")).unwrap_or_else(|| PathBuf::from(".boxtab"))
}

/// Write `text` to `<directory>/<name>.txt`, creating the directory if needed.
///
/// `name` must be a plain file stem without path separators.
pub fn write_report(text: &str, directory: &Path, name: &str) -> io::Result<PathBuf> {
    validate_name(name)?;
    fs::create_dir_all(directory)?;

    let path = directory.join(format!("{}.{}", name, REPORT_EXTENSION));
    let mut file = File::create(&path)?;
    file.write_all(text.as_bytes())?;
    file.flush()?;

    debug!("Wrote report ({} bytes) to {:?}", text.len(), path);
    Ok(path)
}

/// Read a stored report back verbatim
pub fn read_report(path: &Path) -> io::Result<String> {
    let text = fs::read_to_string(path)?;
    debug!("Read report ({} bytes) from {:?}", text.len(), path);
    Ok(text)
}

fn validate_name(name: &str) -> io::Result<()> {
    let bad = name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']);
    if bad {
        return Err(io::Error::new(io::ErrorKind::InvalidInput, format!("invalid report name {:?}", name)));
    }
    Ok(())
}
