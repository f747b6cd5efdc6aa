use std::{fs, path::PathBuf};

/// # Errors
///
/// Will return `Err` if any of the `;`-separated files is not readable
pub fn check_readable_file(file: &str) -> Result<String, String> {
    for file in file.split(';').map(str::trim).filter(|f| !f.is_empty()) {
        let path = PathBuf::from(file);
        if !path.is_file() || fs::metadata(&path).is_err() {
            return Err(format!("The sql startup script '{file}' is not readable."));
        }
    }
    Ok(file.to_string())
}

/// # Errors
///
/// Will return `Err` unless the value is an http(s) url with a host
pub fn check_url(url: &str) -> Result<String, String> {
    let url = url.trim();
    let parsed = reqwest::Url::parse(url).map_err(|e| format!("The csv url '{url}' is invalid: {e}."))?;
    match parsed.scheme() {
        "http" | "https" if parsed.host_str().is_some_and(|h| !h.is_empty()) => Ok(url.to_string()),
        _ => Err(format!("The csv url '{url}' must be an http:// or https:// url with a host.")),
    }
}
