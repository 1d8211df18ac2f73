//! Install preferences read from the installer's JSON preferences document.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Result, ShortcutError};
use crate::locator::ShortcutLocation;

/// Shortcut-related switches from the installer preferences document.
///
/// The document shape is `{"distribution": {...}}`; absent keys default to
/// false, so an empty document enables every shortcut.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InstallPreferences {
    pub do_not_create_desktop_shortcut: bool,
    pub do_not_create_quick_launch_shortcut: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PreferencesDoc {
    distribution: DistributionPrefs,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DistributionPrefs {
    do_not_create_desktop_shortcut: bool,
    do_not_create_quick_launch_shortcut: bool,
}

impl InstallPreferences {
    /// Parse from the JSON preferences document.
    pub fn from_json(json: &str) -> Result<Self> {
        let doc: PreferencesDoc =
            serde_json::from_str(json).map_err(|e| ShortcutError::Preferences {
                message: e.to_string(),
                source: Some(e),
            })?;
        Ok(Self {
            do_not_create_desktop_shortcut: doc.distribution.do_not_create_desktop_shortcut,
            do_not_create_quick_launch_shortcut: doc
                .distribution
                .do_not_create_quick_launch_shortcut,
        })
    }

    /// Parse from a preferences file on disk.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|e| ShortcutError::io_with_path(e, path))?;
        Self::from_json(&raw)
    }

    /// Whether creation at `location` is suppressed. Only the desktop and
    /// quick-launch shortcuts can be switched off.
    pub fn suppresses(&self, location: ShortcutLocation) -> bool {
        match location {
            ShortcutLocation::Desktop => self.do_not_create_desktop_shortcut,
            ShortcutLocation::QuickLaunch => self.do_not_create_quick_launch_shortcut,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_enables_everything() {
        let prefs = InstallPreferences::from_json("{}").unwrap();
        assert_eq!(prefs, InstallPreferences::default());
        assert!(!prefs.suppresses(ShortcutLocation::Desktop));
        assert!(!prefs.suppresses(ShortcutLocation::QuickLaunch));
        assert!(!prefs.suppresses(ShortcutLocation::StartMenuRoot));
    }

    #[test]
    fn test_parses_distribution_switches() {
        let prefs = InstallPreferences::from_json(
            r#"{"distribution":{"do_not_create_desktop_shortcut":true,
                "do_not_create_quick_launch_shortcut":false}}"#,
        )
        .unwrap();
        assert!(prefs.do_not_create_desktop_shortcut);
        assert!(!prefs.do_not_create_quick_launch_shortcut);
        assert!(prefs.suppresses(ShortcutLocation::Desktop));
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let prefs = InstallPreferences::from_json(
            r#"{"distribution":{"import_bookmarks":true,"do_not_create_quick_launch_shortcut":true}}"#,
        )
        .unwrap();
        assert!(prefs.do_not_create_quick_launch_shortcut);
        assert!(!prefs.do_not_create_desktop_shortcut);
    }

    #[test]
    fn test_malformed_document_is_an_error() {
        let err = InstallPreferences::from_json("{not json").unwrap_err();
        assert!(matches!(err, ShortcutError::Preferences { .. }));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("initial_preferences.json");
        fs::write(
            &path,
            r#"{"distribution":{"do_not_create_desktop_shortcut":true}}"#,
        )
        .unwrap();

        let prefs = InstallPreferences::from_file(&path).unwrap();
        assert!(prefs.do_not_create_desktop_shortcut);
    }
}
