//! Maps symbolic shortcut locations to concrete shell paths.

use std::path::PathBuf;

use crate::error::{Result, ShortcutError};
use crate::folders::{KnownFolder, KnownFolders};
use crate::product::ProductInfo;

/// Installation scope of a shortcut set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallScope {
    CurrentUser,
    AllUsers,
}

/// Shell folder category a shortcut lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutLocation {
    Desktop,
    QuickLaunch,
    StartMenuRoot,
    /// Start-menu sub-folder used by older releases; every provisioning
    /// call migrates away from it.
    StartMenuDeprecatedSubfolder,
}

/// Resolves `(location, scope)` pairs against a [`KnownFolders`] source.
pub struct ShortcutLocator<'a> {
    folders: &'a dyn KnownFolders,
    product: &'a ProductInfo,
}

impl<'a> ShortcutLocator<'a> {
    pub fn new(folders: &'a dyn KnownFolders, product: &'a ProductInfo) -> Self {
        Self { folders, product }
    }

    /// Folder that holds the shortcut for `(location, scope)`.
    ///
    /// Quick launch is a per-user folder even for all-users installs: an
    /// administrator running a system install still gets a personal entry.
    pub fn shortcut_dir(
        &self,
        location: ShortcutLocation,
        scope: InstallScope,
    ) -> Result<PathBuf> {
        let folder = match (location, scope) {
            (ShortcutLocation::Desktop, InstallScope::CurrentUser) => KnownFolder::UserDesktop,
            (ShortcutLocation::Desktop, InstallScope::AllUsers) => KnownFolder::CommonDesktop,
            (ShortcutLocation::QuickLaunch, _) => KnownFolder::UserQuickLaunch,
            (
                ShortcutLocation::StartMenuRoot | ShortcutLocation::StartMenuDeprecatedSubfolder,
                InstallScope::CurrentUser,
            ) => KnownFolder::UserStartMenuPrograms,
            (
                ShortcutLocation::StartMenuRoot | ShortcutLocation::StartMenuDeprecatedSubfolder,
                InstallScope::AllUsers,
            ) => KnownFolder::CommonStartMenuPrograms,
        };
        let base = self
            .folders
            .resolve(folder)
            .ok_or(ShortcutError::UnresolvableFolder { folder })?;
        Ok(match location {
            ShortcutLocation::StartMenuDeprecatedSubfolder => {
                base.join(&self.product.start_menu_subfolder)
            }
            _ => base,
        })
    }

    /// Full path of the product's shortcut file for `(location, scope)`.
    pub fn shortcut_path(
        &self,
        location: ShortcutLocation,
        scope: InstallScope,
    ) -> Result<PathBuf> {
        Ok(self
            .shortcut_dir(location, scope)?
            .join(self.product.shortcut_file_name()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::folders::FixedFolders;

    fn product() -> ProductInfo {
        ProductInfo {
            display_name: "Sparrow".to_string(),
            exe_name: "sparrow.exe".to_string(),
            icon_index: 0,
            app_id: "Acme.Sparrow".to_string(),
            description: "Fast, lightweight mail for the desktop".to_string(),
            start_menu_subfolder: "Acme Sparrow".to_string(),
            install_dir_name: "Sparrow".to_string(),
            canary_install_dir_name: "Sparrow Canary".to_string(),
            supported_scopes: vec![InstallScope::CurrentUser, InstallScope::AllUsers],
        }
    }

    fn folders() -> FixedFolders {
        FixedFolders::new()
            .with(KnownFolder::UserDesktop, "/u/desktop")
            .with(KnownFolder::CommonDesktop, "/c/desktop")
            .with(KnownFolder::UserQuickLaunch, "/u/quick-launch")
            .with(KnownFolder::UserStartMenuPrograms, "/u/programs")
            .with(KnownFolder::CommonStartMenuPrograms, "/c/programs")
    }

    #[test]
    fn test_scope_selects_folder_set() {
        let folders = folders();
        let product = product();
        let locator = ShortcutLocator::new(&folders, &product);

        assert_eq!(
            locator
                .shortcut_path(ShortcutLocation::Desktop, InstallScope::CurrentUser)
                .unwrap(),
            PathBuf::from("/u/desktop/Sparrow.lnk")
        );
        assert_eq!(
            locator
                .shortcut_path(ShortcutLocation::Desktop, InstallScope::AllUsers)
                .unwrap(),
            PathBuf::from("/c/desktop/Sparrow.lnk")
        );
        assert_eq!(
            locator
                .shortcut_path(ShortcutLocation::StartMenuRoot, InstallScope::AllUsers)
                .unwrap(),
            PathBuf::from("/c/programs/Sparrow.lnk")
        );
    }

    #[test]
    fn test_quick_launch_is_per_user_at_both_scopes() {
        let folders = folders();
        let product = product();
        let locator = ShortcutLocator::new(&folders, &product);

        let current = locator
            .shortcut_path(ShortcutLocation::QuickLaunch, InstallScope::CurrentUser)
            .unwrap();
        let all = locator
            .shortcut_path(ShortcutLocation::QuickLaunch, InstallScope::AllUsers)
            .unwrap();
        assert_eq!(current, all);
        assert_eq!(current, PathBuf::from("/u/quick-launch/Sparrow.lnk"));
    }

    #[test]
    fn test_deprecated_subfolder_nests_under_start_menu() {
        let folders = folders();
        let product = product();
        let locator = ShortcutLocator::new(&folders, &product);

        assert_eq!(
            locator
                .shortcut_path(
                    ShortcutLocation::StartMenuDeprecatedSubfolder,
                    InstallScope::CurrentUser
                )
                .unwrap(),
            PathBuf::from("/u/programs/Acme Sparrow/Sparrow.lnk")
        );
    }

    #[test]
    fn test_unmapped_folder_is_unresolvable() {
        let folders = FixedFolders::new();
        let product = product();
        let locator = ShortcutLocator::new(&folders, &product);

        let err = locator
            .shortcut_path(ShortcutLocation::Desktop, InstallScope::CurrentUser)
            .unwrap_err();
        assert!(matches!(
            err,
            ShortcutError::UnresolvableFolder {
                folder: KnownFolder::UserDesktop
            }
        ));
    }
}
