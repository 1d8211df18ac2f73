//! Known-folder resolution.
//!
//! The shell folders shortcuts live in are looked up through the
//! [`KnownFolders`] trait so the embedding installer (and every test) can
//! substitute its own resolution. [`SystemFolders`] is the default backed by
//! OS conventions; [`FixedFolders`] maps folders explicitly.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Shell folders the shortcut locator can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KnownFolder {
    UserDesktop,
    CommonDesktop,
    /// Quick launch has no all-users variant; it is per-user by nature.
    UserQuickLaunch,
    UserStartMenuPrograms,
    CommonStartMenuPrograms,
}

/// Resolves symbolic shell folders to absolute paths.
///
/// Returning `None` means the folder is redirected or missing; callers
/// treat the corresponding shortcut as unavailable and skip it.
pub trait KnownFolders {
    fn resolve(&self, folder: KnownFolder) -> Option<PathBuf>;
}

/// Default resolver backed by the OS conventions.
///
/// Per-user folders come from the `dirs` crate; all-users folders are
/// derived from the `PUBLIC` and `ProgramData` environment variables and
/// resolve to `None` where those are not set.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemFolders;

impl KnownFolders for SystemFolders {
    fn resolve(&self, folder: KnownFolder) -> Option<PathBuf> {
        match folder {
            KnownFolder::UserDesktop => dirs::desktop_dir(),
            KnownFolder::CommonDesktop => env_dir("PUBLIC").map(|p| p.join("Desktop")),
            KnownFolder::UserQuickLaunch => dirs::data_dir().map(|d| {
                d.join("Microsoft")
                    .join("Internet Explorer")
                    .join("Quick Launch")
            }),
            KnownFolder::UserStartMenuPrograms => {
                dirs::data_dir().map(|d| start_menu_programs(&d))
            }
            KnownFolder::CommonStartMenuPrograms => {
                env_dir("ProgramData").map(|d| start_menu_programs(&d))
            }
        }
    }
}

fn start_menu_programs(base: &Path) -> PathBuf {
    base.join("Microsoft")
        .join("Windows")
        .join("Start Menu")
        .join("Programs")
}

fn env_dir(var: &str) -> Option<PathBuf> {
    std::env::var_os(var).map(PathBuf::from)
}

/// Explicit folder map, for tests and sandboxed embedders.
#[derive(Debug, Default, Clone)]
pub struct FixedFolders {
    map: HashMap<KnownFolder, PathBuf>,
}

impl FixedFolders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `folder` to `path`.
    pub fn with(mut self, folder: KnownFolder, path: impl AsRef<Path>) -> Self {
        self.map.insert(folder, path.as_ref().to_path_buf());
        self
    }
}

impl KnownFolders for FixedFolders {
    fn resolve(&self, folder: KnownFolder) -> Option<PathBuf> {
        self.map.get(&folder).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_folders_round_trip() {
        let folders = FixedFolders::new()
            .with(KnownFolder::UserDesktop, "/fake/desktop")
            .with(KnownFolder::UserQuickLaunch, "/fake/quick-launch");

        assert_eq!(
            folders.resolve(KnownFolder::UserDesktop),
            Some(PathBuf::from("/fake/desktop"))
        );
        assert_eq!(
            folders.resolve(KnownFolder::UserQuickLaunch),
            Some(PathBuf::from("/fake/quick-launch"))
        );
        assert_eq!(folders.resolve(KnownFolder::CommonDesktop), None);
    }

    #[test]
    fn test_system_folders_does_not_panic() {
        // May resolve to None in headless environments; only exercise it.
        let _ = SystemFolders.resolve(KnownFolder::UserDesktop);
        let _ = SystemFolders.resolve(KnownFolder::CommonStartMenuPrograms);
    }
}
