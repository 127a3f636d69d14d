//! Theme loader and backup key codec.

use once_cell::sync::Lazy;

use crate::errors::AppError;
use crate::models::ThemeDefinition;

/// Theme numbers shipped with the editor.
pub const SHIPPED_THEMES: &[i64] = &[1, 2];

const BACKUP_KEY_PREFIX: &str = "Theme";
const BACKUP_KEY_SUFFIX: &str = "Backup";

static THEME_1: Lazy<Result<ThemeDefinition, String>> =
    Lazy::new(|| parse_theme(include_str!("../../themes/theme1.json")));
static THEME_2: Lazy<Result<ThemeDefinition, String>> =
    Lazy::new(|| parse_theme(include_str!("../../themes/theme2.json")));

fn parse_theme(source: &str) -> Result<ThemeDefinition, String> {
    serde_json::from_str(source).map_err(|e| e.to_string())
}

/// Resolve a theme number to its shipped definition.
///
/// Unknown numbers are a hard validation failure.
pub fn load_theme(number: i64) -> Result<&'static ThemeDefinition, AppError> {
    let theme = match number {
        1 => &*THEME_1,
        2 => &*THEME_2,
        _ => return Err(AppError::InvalidTheme(number)),
    };
    theme
        .as_ref()
        .map_err(|e| AppError::Internal(format!("Theme {} failed to parse: {}", number, e)))
}

/// Derive the backup slot name for a theme; `None` without a positive theme.
pub fn make_backup_key(theme: Option<i64>) -> Option<String> {
    match theme {
        Some(number) if number > 0 => Some(format!(
            "{}{}{}",
            BACKUP_KEY_PREFIX, number, BACKUP_KEY_SUFFIX
        )),
        _ => None,
    }
}

/// Parse `Theme<digits>Backup` back into its theme number.
pub fn parse_backup_key(key: &str) -> Option<i64> {
    let digits = key
        .strip_prefix(BACKUP_KEY_PREFIX)?
        .strip_suffix(BACKUP_KEY_SUFFIX)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shipped_themes_load() {
        for number in SHIPPED_THEMES {
            let theme = load_theme(*number).unwrap();
            assert!(theme.pages.contains_key("homepage"));
            assert!(theme.global_components_data.is_some());
            assert!(theme.static_pages.contains_key("project"));
        }
    }

    #[test]
    fn unknown_theme_is_rejected() {
        for number in [0, 3, -1, 42] {
            match load_theme(number) {
                Err(AppError::InvalidTheme(n)) => assert_eq!(n, number),
                other => panic!("expected InvalidTheme, got {:?}", other.map(|_| ())),
            }
        }
    }

    #[test]
    fn backup_key_round_trip() {
        for number in [1, 2, 9, 10, 123, 98_765, i64::MAX] {
            let key = make_backup_key(Some(number)).unwrap();
            assert_eq!(parse_backup_key(&key), Some(number));
        }
        assert_eq!(make_backup_key(Some(12)).as_deref(), Some("Theme12Backup"));
    }

    #[test]
    fn no_backup_key_without_positive_theme() {
        assert_eq!(make_backup_key(None), None);
        assert_eq!(make_backup_key(Some(0)), None);
        assert_eq!(make_backup_key(Some(-4)), None);
    }

    #[test]
    fn malformed_keys_do_not_parse() {
        for key in [
            "ThemeBackup",
            "Theme1",
            "theme1Backup",
            "Theme1aBackup",
            "Theme+1Backup",
            "Theme 1Backup",
            "XTheme1Backup",
            "Theme1BackupX",
            "Theme99999999999999999999Backup",
        ] {
            assert_eq!(parse_backup_key(key), None, "{}", key);
        }
    }
}
