//! Product descriptor consumed by the provisioning engine.

use std::path::Path;

use crate::link::ShortcutProperties;
use crate::locator::InstallScope;

/// File extension of shell link files.
pub const LINK_EXT: &str = "lnk";

/// Static description of the installed product, as the surrounding
/// installer knows it.
#[derive(Debug, Clone)]
pub struct ProductInfo {
    /// Human-readable name; also the shortcut file stem.
    pub display_name: String,
    /// Executable file name inside the install layout's `Application` directory.
    pub exe_name: String,
    /// Icon index within the executable's resources.
    pub icon_index: i32,
    /// App-user-model id stamped on shortcuts.
    pub app_id: String,
    /// Shortcut description/tooltip.
    pub description: String,
    /// Legacy start-menu sub-folder older releases installed into.
    pub start_menu_subfolder: String,
    /// Directory name of the primary channel install, under the vendor root.
    pub install_dir_name: String,
    /// Directory name of the canary channel install.
    pub canary_install_dir_name: String,
    /// Scopes this product may be installed at.
    pub supported_scopes: Vec<InstallScope>,
}

impl ProductInfo {
    /// File name of the product's shortcut, e.g. `Sparrow.lnk`.
    pub fn shortcut_file_name(&self) -> String {
        format!("{}.{}", self.display_name, LINK_EXT)
    }

    pub fn supports_scope(&self, scope: InstallScope) -> bool {
        self.supported_scopes.contains(&scope)
    }

    /// Default properties stamped on every shortcut this installer creates:
    /// the target executable doubles as the icon source, and dual mode is
    /// explicitly disabled on both the desktop and start-menu variants.
    pub fn default_shortcut_properties(&self, target_exe: &Path) -> ShortcutProperties {
        ShortcutProperties::new()
            .with_target(target_exe)
            .with_icon(target_exe, self.icon_index)
            .with_app_id(&self.app_id)
            .with_description(&self.description)
            .with_dual_mode(false)
    }
}
