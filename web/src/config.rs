//! Build-time source configuration plus the user's stored path override.

use sparks_shared::source::DEFAULT_FILE_NAME;
use sparks_shared::{SourceConfig, DEFAULT_WEEKS};
use web_sys::Storage;

/// Local-storage key holding a user-supplied workbook path.
pub const CUSTOM_PATH_KEY: &str = "customExcelPath";

pub fn source_config() -> SourceConfig {
    SourceConfig {
        custom_path: stored_custom_path(),
        base_path: option_env!("SPARKS_BASE_PATH").unwrap_or_default().to_string(),
        file_name: option_env!("SPARKS_FILE_NAME")
            .unwrap_or(DEFAULT_FILE_NAME)
            .to_string(),
        google_sheet_id: option_env!("SPARKS_GOOGLE_SHEET_ID").map(str::to_string),
    }
}

/// Path prefix the app is served under, `""` at the domain root.
pub fn router_base() -> String {
    normalize_base(option_env!("SPARKS_BASE_PATH").unwrap_or_default())
}

fn normalize_base(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}

pub fn weeks() -> u32 {
    option_env!("SPARKS_WEEKS")
        .and_then(|w| w.trim().parse().ok())
        .unwrap_or(DEFAULT_WEEKS)
}

fn local_storage() -> Option<Storage> {
    web_sys::window()?.local_storage().ok()?
}

pub fn stored_custom_path() -> Option<String> {
    local_storage()?
        .get_item(CUSTOM_PATH_KEY)
        .ok()?
        .filter(|p| !p.trim().is_empty())
}

/// Save the override; a blank path clears it.
pub fn store_custom_path(path: &str) {
    let Some(storage) = local_storage() else {
        web_sys::console::warn_1(&"local storage unavailable, path not saved".into());
        return;
    };
    let path = path.trim();
    let result = if path.is_empty() {
        storage.remove_item(CUSTOM_PATH_KEY)
    } else {
        storage.set_item(CUSTOM_PATH_KEY, path)
    };
    if result.is_err() {
        web_sys::console::error_1(&"failed to update the stored workbook path".into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_router_base_is_rooted_without_trailing_slash() {
        assert_eq!(normalize_base(""), "");
        assert_eq!(normalize_base("/"), "");
        assert_eq!(normalize_base("Firewall_Sparks_Leaderboard/"), "/Firewall_Sparks_Leaderboard");
        assert_eq!(normalize_base(" /Firewall_Sparks_Leaderboard "), "/Firewall_Sparks_Leaderboard");
    }
}
