//! Retargets per-user shortcuts after an install directory change.
//!
//! An in-place version update renames a staged directory over the previous
//! install, so shortcuts pointing at the old `Application` binaries or at
//! the staging tree must follow without the user re-pinning anything.
//! Target and icon are considered independently, and shortcuts owned by
//! other applications are never touched.

use std::ffi::OsStr;
use std::fs;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::{Result, ShortcutError};
use crate::folders::KnownFolders;
use crate::layout::{classify, LayoutKind};
use crate::link::{IconRef, LinkMode, ShellLink, ShortcutProperties};
use crate::locator::{InstallScope, ShortcutLocation, ShortcutLocator};
use crate::product::{ProductInfo, LINK_EXT};

/// Counts from one [`update_per_user_shortcuts_in_location`] pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct UpdateReport {
    /// Shortcut files whose name matched the product's.
    pub examined: usize,
    /// Shortcuts actually rewritten.
    pub updated: usize,
}

/// Rewrite the target/icon of every per-user shortcut in `location` that
/// still points into the superseded install layout under `new_install_dir`.
///
/// Shortcut files are matched by name (the product shortcut name plus an
/// optional disambiguating suffix). A shortcut half (target or icon) is
/// rewritten to `new_target_path` only when it classifies into the layout
/// of `new_install_dir` itself; the canary channel beside it never matches
/// a primary-channel update and vice versa. A rewritten icon keeps its
/// original icon index, and a shortcut needing no change is not rewritten
/// at all.
pub fn update_per_user_shortcuts_in_location(
    link: &dyn ShellLink,
    folders: &dyn KnownFolders,
    location: ShortcutLocation,
    product: &ProductInfo,
    new_install_dir: &Path,
    new_target_name: &OsStr,
    new_target_path: &Path,
) -> Result<UpdateReport> {
    let locator = ShortcutLocator::new(folders, product);
    let dir = locator.shortcut_dir(location, InstallScope::CurrentUser)?;

    // Candidate layouts under the vendor root: the channel being updated
    // plus its sibling channel, recognized by directory name.
    let updating_canary = new_install_dir.file_name()
        == Some(OsStr::new(product.canary_install_dir_name.as_str()));
    let (current_kind, sibling_kind) = if updating_canary {
        (LayoutKind::Canary, LayoutKind::UserLevel)
    } else {
        (LayoutKind::UserLevel, LayoutKind::Canary)
    };
    let sibling_dir = new_install_dir.parent().map(|root| {
        if updating_canary {
            root.join(&product.install_dir_name)
        } else {
            root.join(&product.canary_install_dir_name)
        }
    });
    let mut candidates: Vec<(LayoutKind, &Path)> = vec![(current_kind, new_install_dir)];
    if let Some(sibling) = sibling_dir.as_deref() {
        candidates.push((sibling_kind, sibling));
    }

    let mut report = UpdateReport::default();
    let entries = fs::read_dir(&dir).map_err(|e| ShortcutError::io_with_path(e, &dir))?;
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("unreadable directory entry in {:?}: {e}", dir);
                continue;
            }
        };
        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            continue;
        };
        if !is_product_shortcut_name(name, &product.display_name) {
            continue;
        }
        let path = entry.path();
        report.examined += 1;

        let existing = match link.read(&path) {
            Ok(existing) => existing,
            Err(e) => {
                warn!("unreadable shortcut {:?}: {e}", path);
                continue;
            }
        };

        let mut changes = ShortcutProperties::new();
        if let Some(target) = existing.target.as_deref() {
            if target != new_target_path
                && classify(target, &candidates, new_target_name) == Some(current_kind)
            {
                changes.target = Some(new_target_path.to_path_buf());
            }
        }
        if let Some(icon) = &existing.icon {
            if icon.path != new_target_path
                && classify(&icon.path, &candidates, new_target_name) == Some(current_kind)
            {
                changes.icon = Some(IconRef {
                    path: new_target_path.to_path_buf(),
                    index: icon.index,
                });
            }
        }
        if changes.target.is_none() && changes.icon.is_none() {
            debug!("shortcut {:?} needs no update", path);
            continue;
        }

        match link.create_or_update(&path, &changes, LinkMode::UpdateExisting) {
            Ok(()) => {
                report.updated += 1;
                debug!("retargeted shortcut {:?}", path);
            }
            Err(e) => warn!("failed to update shortcut {:?}: {e}", path),
        }
    }

    info!(
        "updated {}/{} matching shortcuts in {:?}",
        report.updated, report.examined, location
    );
    Ok(report)
}

/// Matches `Sparrow.lnk` but also disambiguated names such as
/// `Sparrow (2).lnk` the shell creates for duplicates.
fn is_product_shortcut_name(name: &str, display_name: &str) -> bool {
    name.strip_prefix(display_name)
        .and_then(|rest| rest.strip_suffix(LINK_EXT))
        .and_then(|rest| rest.strip_suffix('.'))
        .is_some()
}
