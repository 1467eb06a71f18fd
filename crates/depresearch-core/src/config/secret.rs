//! API key storage in a `.env`-style file.

use std::io;
use std::path::Path;

use super::{API_KEY_VAR, ConfigError};

const MASK_HEAD: usize = 8;
const MASK_TAIL: usize = 4;

/// Mask a secret for display: first 8 chars, `...`, last 4.
///
/// Values of 12 characters or fewer are masked entirely.
#[must_use]
pub fn mask_secret(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= MASK_HEAD + MASK_TAIL {
        return "*".repeat(chars.len().max(3));
    }

    let head: String = chars[..MASK_HEAD].iter().collect();
    let tail: String = chars[chars.len() - MASK_TAIL..].iter().collect();
    format!("{head}...{tail}")
}

/// Read the API key from `path`.
///
/// Returns `None` when the file is missing, the variable is absent or its value is empty.
/// Unrelated and malformed lines are skipped.
pub(super) fn read_api_key(path: &Path) -> Result<Option<String>, ConfigError> {
    let iter = match dotenvy::from_path_iter(path) {
        Ok(iter) => iter,
        Err(dotenvy::Error::Io(e)) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(dotenvy::Error::Io(e)) => return Err(ConfigError::io(path, e)),
        Err(e) => return Err(ConfigError::io(path, io::Error::other(e.to_string()))),
    };

    let mut found = None;
    for item in iter {
        match item {
            Ok((name, value)) if name == API_KEY_VAR => found = Some(value),
            Ok(_) | Err(dotenvy::Error::LineParse(..)) => {}
            Err(dotenvy::Error::Io(e)) => return Err(ConfigError::io(path, e)),
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "skipping unreadable .env entry");
            }
        }
    }

    Ok(found.filter(|v| !v.trim().is_empty()))
}

/// Content written to the secret file for `value`.
///
/// Plain values are written bare. Values the `.env` reader would otherwise
/// reinterpret (whitespace, quotes, `$`, backslash, `#`) are double-quoted with
/// those characters escaped, so the key reads back byte for byte.
pub(super) fn render_api_key(value: &str) -> Result<String, ConfigError> {
    if value.chars().any(char::is_control) {
        return Err(ConfigError::InvalidApiKey);
    }
    if !value.chars().any(needs_quoting) {
        return Ok(format!("{API_KEY_VAR}={value}\n"));
    }

    let mut quoted = String::with_capacity(value.len() + 2);
    for c in value.chars() {
        if matches!(c, '\\' | '"' | '$') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    Ok(format!("{API_KEY_VAR}=\"{quoted}\"\n"))
}

fn needs_quoting(c: char) -> bool {
    c.is_whitespace() || matches!(c, '\'' | '"' | '$' | '\\' | '#')
}
