//! Install-layout path classification.
//!
//! Distinguishes paths that live inside one of the product's install
//! layouts from everything else, so shortcut rewrites never touch files
//! belonging to unrelated applications. All functions here are pure and
//! take explicit directory and file-name parameters; nothing reads the
//! file system.

use std::ffi::OsStr;
use std::path::Path;

/// Directory inside an install layout that holds the application binaries.
pub const APPLICATION_DIR: &str = "Application";
/// Transient staging directory used while an update is renamed into place.
pub const STAGING_DIR: &str = "Temp";

/// The product install layouts a path can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutKind {
    /// Canary channel; exists per-user only.
    Canary,
    /// Primary channel installed for the current user.
    UserLevel,
    /// Primary channel installed machine-wide.
    SystemLevel,
}

/// Returns true if `path` falls inside the install layout rooted at
/// `install_dir`.
///
/// A path belongs when it sits under `install_dir/Application` or under the
/// staging tree `install_dir/Temp`. A direct child of `Application` must be
/// the expected executable itself; any other file there is foreign. Deeper
/// paths (profile icons, resource sub-trees) always belong, as does
/// anything in the staging tree regardless of name.
pub fn path_in_install_dir(path: &Path, install_dir: &Path, exe_name: &OsStr) -> bool {
    if let Ok(rest) = path.strip_prefix(install_dir.join(STAGING_DIR)) {
        return rest.components().next().is_some();
    }
    match path.strip_prefix(install_dir.join(APPLICATION_DIR)) {
        Ok(rest) => {
            let mut components = rest.components();
            match (components.next(), components.next()) {
                (Some(only), None) => only.as_os_str() == exe_name,
                (Some(_), Some(_)) => true,
                _ => false,
            }
        }
        Err(_) => false,
    }
}

/// Classify `path` against candidate layouts; the first match wins.
pub fn classify(
    path: &Path,
    candidates: &[(LayoutKind, &Path)],
    exe_name: &OsStr,
) -> Option<LayoutKind> {
    candidates
        .iter()
        .find(|(_, dir)| path_in_install_dir(path, dir, exe_name))
        .map(|(kind, _)| *kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn p(parts: &[&str]) -> PathBuf {
        parts.iter().collect()
    }

    fn install_dir() -> PathBuf {
        p(&["Users", "x", "AppData", "Local", "Acme", "Sparrow"])
    }

    fn exe() -> &'static OsStr {
        OsStr::new("sparrow.exe")
    }

    #[test]
    fn test_application_executable_belongs() {
        let path = install_dir().join(APPLICATION_DIR).join("sparrow.exe");
        assert!(path_in_install_dir(&path, &install_dir(), exe()));
    }

    #[test]
    fn test_foreign_executable_under_application_does_not_belong() {
        let path = install_dir()
            .join(APPLICATION_DIR)
            .join("something_else.exe");
        assert!(!path_in_install_dir(&path, &install_dir(), exe()));
    }

    #[test]
    fn test_nested_resources_under_application_belong() {
        let path = install_dir()
            .join(APPLICATION_DIR)
            .join("User Data")
            .join("Profile 1")
            .join("Profile.ico");
        assert!(path_in_install_dir(&path, &install_dir(), exe()));
    }

    #[test]
    fn test_staging_tree_belongs_regardless_of_name() {
        let dir = install_dir();
        for name in ["sparrow.exe", "new_sparrow.exe"] {
            let path = dir.join(STAGING_DIR).join("scoped_dir").join(name);
            assert!(path_in_install_dir(&path, &dir, exe()), "{name}");
        }
    }

    #[test]
    fn test_bare_directories_do_not_belong() {
        let dir = install_dir();
        assert!(!path_in_install_dir(&dir.join(APPLICATION_DIR), &dir, exe()));
        assert!(!path_in_install_dir(&dir.join(STAGING_DIR), &dir, exe()));
        assert!(!path_in_install_dir(&dir.join("other").join("x.exe"), &dir, exe()));
    }

    #[test]
    fn test_sibling_channel_directory_is_not_a_prefix_match() {
        // "Sparrow Canary" must not be mistaken for a path under "Sparrow".
        let canary = p(&["Users", "x", "AppData", "Local", "Acme", "Sparrow Canary"]);
        let path = canary.join(APPLICATION_DIR).join("sparrow.exe");
        assert!(!path_in_install_dir(&path, &install_dir(), exe()));
    }

    #[test]
    fn test_classify_picks_owning_layout() {
        let user_dir = install_dir();
        let canary_dir = p(&["Users", "x", "AppData", "Local", "Acme", "Sparrow Canary"]);
        let candidates = [
            (LayoutKind::Canary, canary_dir.as_path()),
            (LayoutKind::UserLevel, user_dir.as_path()),
        ];

        let canary_path = canary_dir.join(APPLICATION_DIR).join("sparrow.exe");
        assert_eq!(
            classify(&canary_path, &candidates, exe()),
            Some(LayoutKind::Canary)
        );

        let user_path = user_dir.join(STAGING_DIR).join("scoped_dir").join("sparrow.exe");
        assert_eq!(
            classify(&user_path, &candidates, exe()),
            Some(LayoutKind::UserLevel)
        );

        let foreign = p(&["Users", "x", "dummy.exe"]);
        assert_eq!(classify(&foreign, &candidates, exe()), None);
    }
}
