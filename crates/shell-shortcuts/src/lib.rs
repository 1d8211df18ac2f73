//! Shell shortcut provisioning for application installers.
//!
//! This crate decides which desktop, quick-launch, and start-menu shortcuts
//! an installer should create, update, or leave alone across per-user and
//! all-users installs; migrates shortcuts out of the deprecated start-menu
//! sub-folder older releases used; retargets shortcuts after an in-place
//! version update renames the install directory; and generates the
//! `VisualElementsManifest.xml` describing the application's start-screen
//! tiles.
//!
//! The OS surface is reached through two narrow seams the embedding
//! installer can substitute: [`KnownFolders`] for shell folder lookup and
//! [`ShellLink`] for the link-file primitive. Everything else is pure
//! policy, synchronous, and best-effort: a failure affects one shortcut and
//! is reported in the aggregate outcome, never raised past it.
//!
//! # Example
//!
//! ```rust,ignore
//! use shell_shortcuts::{
//!     FileBackedLink, InstallPreferences, InstallScope, ShortcutOperation,
//!     ShortcutProvisioner, SystemFolders,
//! };
//!
//! let folders = SystemFolders;
//! let link = FileBackedLink;
//! let provisioner = ShortcutProvisioner::new(&link, &folders, &product);
//! let report = provisioner.create_or_update_shortcuts(
//!     &target_exe,
//!     &InstallPreferences::default(),
//!     InstallScope::CurrentUser,
//!     ShortcutOperation::CreateAll,
//! );
//! assert!(report.success());
//! ```

pub mod error;
pub mod folders;
pub mod layout;
pub mod link;
pub mod locator;
pub mod manifest;
pub mod prefs;
pub mod product;
pub mod provision;
pub mod update;

pub use error::{Result, ShortcutError};
pub use folders::{FixedFolders, KnownFolder, KnownFolders, SystemFolders};
pub use layout::{classify, path_in_install_dir, LayoutKind};
pub use link::{FileBackedLink, IconRef, LinkMode, ShellLink, ShortcutProperties};
pub use locator::{InstallScope, ShortcutLocation, ShortcutLocator};
pub use manifest::{
    create_visual_elements_manifest, escape_xml_attribute_in_single_quotes, ManifestStatus,
};
pub use prefs::InstallPreferences;
pub use product::ProductInfo;
pub use provision::{ProvisionReport, ShortcutOperation, ShortcutOutcome, ShortcutProvisioner};
pub use update::{update_per_user_shortcuts_in_location, UpdateReport};

#[cfg(windows)]
pub use link::NativeLink;
