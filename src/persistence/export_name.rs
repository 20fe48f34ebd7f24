//! File names for exported configs.

use crate::controller::snapshot::ConnectedDevice;

pub const FALLBACK_EXPORT_NAME: &str = "customInputConfig";
pub const CONFIG_EXTENSION: &str = ".conf";
const MAX_NAME_LEN: usize = 50;

/// Suggested name derived from the first connected device.
pub fn default_export_name(devices: &[ConnectedDevice]) -> String {
    devices
        .first()
        .map(|device| sanitize(&device.id))
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| FALLBACK_EXPORT_NAME.to_string())
}

/// Final file name for what the user typed. Blank input falls back to
/// `default_name`.
pub fn export_file_name(entered: &str, default_name: &str) -> String {
    let trimmed = entered.trim();
    let name = if trimmed.is_empty() {
        default_name
    } else {
        trimmed
    };
    ensure_conf_extension(name)
}

pub fn ensure_conf_extension(name: &str) -> String {
    if name.ends_with(CONFIG_EXTENSION) {
        name.to_string()
    } else {
        format!("{}{}", name, CONFIG_EXTENSION)
    }
}

fn sanitize(id: &str) -> String {
    let mut underscored = String::with_capacity(id.len());
    let mut in_whitespace = false;
    for c in id.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                underscored.push('_');
            }
            in_whitespace = true;
        } else {
            underscored.push(c);
            in_whitespace = false;
        }
    }

    underscored
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .take(MAX_NAME_LEN)
        .collect()
}
