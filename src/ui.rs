// UI layer: input checks and terminal output for the CLI. Requests go
// through `SxcuClient`/`SxcuService`; this module only prepares their
// inputs and renders what they return.

use anyhow::{Context, Result};
use crossterm::style::Stylize;
use crossterm::tty::IsTty;
use dialoguer::Input;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::Value;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::types::SubdomainRecord;

/// Extensions the `upload` command accepts.
pub const ALLOWED_FILE_TYPES: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "ico", "bmp", "tif", "tiff", "webm",
];

/// Why a path given to `upload` was rejected before any request was made.
#[derive(Error, Debug)]
pub enum InputError {
    #[error("File doesn't exist: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Directory upload is not supported: {}", .0.display())]
    Directory(PathBuf),
    #[error("File isn't readable: {}", .0.display())]
    NotReadable(PathBuf),
    #[error("File format is not supported: {}", .0.display())]
    UnsupportedType(PathBuf),
}

/// Check that `path` is a readable file with an allowed extension.
pub fn validate_upload_path(path: &Path) -> std::result::Result<(), InputError> {
    if path.is_dir() {
        return Err(InputError::Directory(path.to_path_buf()));
    }
    if !path.is_file() {
        return Err(InputError::NotFound(path.to_path_buf()));
    }
    if File::open(path).is_err() {
        return Err(InputError::NotReadable(path.to_path_buf()));
    }
    let allowed = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| ALLOWED_FILE_TYPES.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false);
    if !allowed {
        return Err(InputError::UnsupportedType(path.to_path_buf()));
    }
    Ok(())
}

/// Run `f` while showing a spinner with `message`.
pub fn with_spinner<T>(message: &str, f: impl FnOnce() -> T) -> T {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    let result = f();
    spinner.finish_and_clear();
    result
}

/// Text for `paste`: the `--text` value, else stdin when piped, else an
/// interactive prompt.
pub fn read_paste_text(text: Option<String>) -> Result<String> {
    if let Some(text) = text.filter(|t| !t.is_empty()) {
        return Ok(text);
    }
    let stdin = std::io::stdin();
    if stdin.is_tty() {
        let text: String = Input::new().with_prompt("Text to paste").interact_text()?;
        return Ok(text);
    }
    let mut buffer = String::new();
    stdin
        .lock()
        .read_to_string(&mut buffer)
        .context("Failed to read text from stdin")?;
    Ok(buffer)
}

/// Rows of the "Upload Details" table: label and URL for each key present.
pub fn upload_rows(result: &Value) -> Vec<(&'static str, String)> {
    [
        ("Upload URL", "url"),
        ("Delete URL", "del_url"),
        ("Thumb URL", "thumb"),
    ]
    .into_iter()
    .filter_map(|(label, key)| {
        result
            .get(key)
            .and_then(Value::as_str)
            .map(|url| (label, url.to_string()))
    })
    .collect()
}

/// Print the URLs returned by an upload, paste or link creation.
pub fn print_upload_details(result: &Value) {
    let rows = upload_rows(result);
    if rows.is_empty() {
        print_json(result);
        return;
    }
    let width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    println!("{}", "Upload Details".bold());
    for (label, url) in rows {
        println!("  {}  {}", format!("{label:<width$}").green(), url.cyan());
    }
}

/// Pretty-print any JSON value returned by the API.
pub fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(_) => println!("{value}"),
    }
}

pub fn print_subdomains(records: &[SubdomainRecord]) {
    println!("{}", format!("{:<40} {:>12}", "Domain", "Uploads").bold());
    for record in records {
        let domain = record.domain().unwrap_or("?");
        let uploads = record
            .upload_count()
            .map(|c| c.to_string())
            .unwrap_or_default();
        println!("{} {:>12}", format!("{domain:<40}").cyan(), uploads);
    }
}

pub fn print_success(message: &str) {
    println!("{}", message.yellow().underlined());
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn test_validate_upload_path() {
        let dir = tempdir().unwrap();
        let image = dir.path().join("cat.PNG");
        std::fs::write(&image, b"not really a png").unwrap();
        assert!(validate_upload_path(&image).is_ok());

        let text = dir.path().join("notes.txt");
        std::fs::write(&text, b"hello").unwrap();
        assert!(matches!(
            validate_upload_path(&text),
            Err(InputError::UnsupportedType(_))
        ));

        assert!(matches!(
            validate_upload_path(&dir.path().join("missing.png")),
            Err(InputError::NotFound(_))
        ));
        assert!(matches!(
            validate_upload_path(dir.path()),
            Err(InputError::Directory(_))
        ));
    }

    #[test]
    fn test_upload_rows() {
        let result = json!({
            "url": "https://sxcu.net/a",
            "del_url": "https://sxcu.net/api/files/delete/a/b",
        });
        let rows = upload_rows(&result);
        assert_eq!(
            rows,
            vec![
                ("Upload URL", "https://sxcu.net/a".to_string()),
                ("Delete URL", "https://sxcu.net/api/files/delete/a/b".to_string()),
            ]
        );
    }

    #[test]
    fn test_read_paste_text_prefers_argument() {
        assert_eq!(read_paste_text(Some("hi".into())).unwrap(), "hi");
    }
}
