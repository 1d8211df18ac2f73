//! Shortcut provisioning and deprecated-location migration.

use std::fs;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::{Result, ShortcutError};
use crate::folders::KnownFolders;
use crate::link::{LinkMode, ShellLink, ShortcutProperties};
use crate::locator::{InstallScope, ShortcutLocation, ShortcutLocator};
use crate::prefs::InstallPreferences;
use crate::product::ProductInfo;

/// Per-location creation policy for a provisioning call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutOperation {
    /// Create or overwrite every shortcut the preferences allow.
    CreateAll,
    /// Create each shortcut only when no system-level twin already exists.
    /// Evaluated per location; quick launch has no system-level twin.
    CreateEachIfNoSystemLevel,
    /// Overwrite shortcuts that already exist; never create new ones,
    /// regardless of preferences.
    ReplaceExisting,
}

/// What happened to one shortcut location during a provisioning call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutOutcome {
    Created,
    Updated,
    Skipped,
    Failed,
}

/// Aggregate result of a provisioning call. No failure aborts the other
/// locations; everything non-fatal lands in `errors` for the installer log.
#[derive(Debug, Clone)]
pub struct ProvisionReport {
    pub desktop: ShortcutOutcome,
    pub quick_launch: ShortcutOutcome,
    pub start_menu: ShortcutOutcome,
    pub errors: Vec<String>,
}

impl ProvisionReport {
    /// True when no mandatory shortcut failed. Quick launch is best-effort:
    /// its folder does not exist on current Windows releases.
    pub fn success(&self) -> bool {
        self.desktop != ShortcutOutcome::Failed && self.start_menu != ShortcutOutcome::Failed
    }
}

/// Desired end state for one shortcut, built fresh per provisioning call.
struct ShortcutSpec {
    location: ShortcutLocation,
    /// Scope the shortcut file lands in; quick launch is always per-user.
    effective_scope: InstallScope,
    properties: ShortcutProperties,
    /// Whether a write failure counts against the aggregate outcome.
    mandatory: bool,
    /// Whether an existing system-level twin gates `CreateEachIfNoSystemLevel`.
    gated_by_system_twin: bool,
    suppressed: bool,
}

/// Drives shortcut creation, update, and migration for one product.
pub struct ShortcutProvisioner<'a> {
    link: &'a dyn ShellLink,
    locator: ShortcutLocator<'a>,
    product: &'a ProductInfo,
}

impl<'a> ShortcutProvisioner<'a> {
    pub fn new(
        link: &'a dyn ShellLink,
        folders: &'a dyn KnownFolders,
        product: &'a ProductInfo,
    ) -> Self {
        Self {
            link,
            locator: ShortcutLocator::new(folders, product),
            product,
        }
    }

    /// Create or update the product's shortcuts at `scope` per `operation`.
    ///
    /// The deprecated start-menu sub-folder is migrated first, for every
    /// operation, so any installer action converges the start-menu layout.
    /// Folder-resolution and link failures affect only their own location.
    pub fn create_or_update_shortcuts(
        &self,
        target_exe: &Path,
        prefs: &InstallPreferences,
        scope: InstallScope,
        operation: ShortcutOperation,
    ) -> ProvisionReport {
        match self.migrate_deprecated_start_menu(scope) {
            Ok(true) => debug!("deprecated start-menu shortcut migrated"),
            Ok(false) => {}
            Err(e) => warn!("start-menu migration skipped: {e}"),
        }

        let specs = self.build_specs(target_exe, prefs, scope);
        let mut errors = Vec::new();
        let outcomes: Vec<ShortcutOutcome> = specs
            .iter()
            .map(|spec| self.provision_one(spec, operation, &mut errors))
            .collect();

        let report = ProvisionReport {
            desktop: outcomes[0],
            quick_launch: outcomes[1],
            start_menu: outcomes[2],
            errors,
        };
        info!(
            "provisioned {} shortcuts at {scope:?} ({operation:?}): \
             desktop={:?} quick_launch={:?} start_menu={:?}",
            self.product.display_name, report.desktop, report.quick_launch, report.start_menu
        );
        report
    }

    /// Move a shortcut left in the deprecated start-menu sub-folder up to
    /// the start-menu root, preserving its properties.
    ///
    /// Returns true when a shortcut was moved. If a shortcut already exists
    /// at the root path the deprecated one is left untouched.
    pub fn migrate_deprecated_start_menu(&self, scope: InstallScope) -> Result<bool> {
        let deprecated = self
            .locator
            .shortcut_path(ShortcutLocation::StartMenuDeprecatedSubfolder, scope)?;
        let root = self
            .locator
            .shortcut_path(ShortcutLocation::StartMenuRoot, scope)?;

        if !deprecated.exists() {
            return Ok(false);
        }
        if root.exists() {
            debug!(
                "start-menu root shortcut present, leaving {:?} alone",
                deprecated
            );
            return Ok(false);
        }

        if let Err(e) = self.link.unpin(&deprecated) {
            debug!("unpin of {:?} failed: {e}", deprecated);
        }
        fs::rename(&deprecated, &root)
            .map_err(|e| ShortcutError::io_with_path(e, &deprecated))?;
        // The emptied sub-folder goes too; foreign shortcuts keep it alive.
        if let Some(subdir) = deprecated.parent() {
            let _ = fs::remove_dir(subdir);
        }
        info!("migrated start-menu shortcut to {:?}", root);
        Ok(true)
    }

    fn build_specs(
        &self,
        target_exe: &Path,
        prefs: &InstallPreferences,
        scope: InstallScope,
    ) -> [ShortcutSpec; 3] {
        let defaults = self.product.default_shortcut_properties(target_exe);
        [
            ShortcutSpec {
                location: ShortcutLocation::Desktop,
                effective_scope: scope,
                properties: defaults.clone(),
                mandatory: true,
                gated_by_system_twin: true,
                suppressed: prefs.suppresses(ShortcutLocation::Desktop),
            },
            ShortcutSpec {
                location: ShortcutLocation::QuickLaunch,
                effective_scope: InstallScope::CurrentUser,
                properties: defaults.clone(),
                mandatory: false,
                gated_by_system_twin: false,
                suppressed: prefs.suppresses(ShortcutLocation::QuickLaunch),
            },
            ShortcutSpec {
                location: ShortcutLocation::StartMenuRoot,
                effective_scope: scope,
                properties: defaults,
                mandatory: true,
                gated_by_system_twin: true,
                suppressed: false,
            },
        ]
    }

    fn provision_one(
        &self,
        spec: &ShortcutSpec,
        operation: ShortcutOperation,
        errors: &mut Vec<String>,
    ) -> ShortcutOutcome {
        let path = match self
            .locator
            .shortcut_path(spec.location, spec.effective_scope)
        {
            Ok(path) => path,
            Err(e) => {
                warn!("skipping {:?} shortcut: {e}", spec.location);
                return ShortcutOutcome::Skipped;
            }
        };

        match operation {
            ShortcutOperation::ReplaceExisting => {
                if !path.exists() {
                    debug!("no {:?} shortcut to replace at {:?}", spec.location, path);
                    return ShortcutOutcome::Skipped;
                }
                match self
                    .link
                    .create_or_update(&path, &spec.properties, LinkMode::UpdateExisting)
                {
                    Ok(()) => ShortcutOutcome::Updated,
                    Err(e) => self.record_failure(spec, &e.to_string(), errors),
                }
            }
            ShortcutOperation::CreateAll | ShortcutOperation::CreateEachIfNoSystemLevel => {
                if spec.suppressed {
                    debug!("{:?} shortcut suppressed by preferences", spec.location);
                    return ShortcutOutcome::Skipped;
                }
                if operation == ShortcutOperation::CreateEachIfNoSystemLevel
                    && spec.gated_by_system_twin
                    && spec.effective_scope == InstallScope::CurrentUser
                    && self.system_twin_exists(spec.location)
                {
                    debug!(
                        "system-level {:?} shortcut present, not creating user-level twin",
                        spec.location
                    );
                    return ShortcutOutcome::Skipped;
                }
                match self
                    .link
                    .create_or_update(&path, &spec.properties, LinkMode::CreateAlways)
                {
                    Ok(()) => ShortcutOutcome::Created,
                    Err(e) => self.record_failure(spec, &e.to_string(), errors),
                }
            }
        }
    }

    fn record_failure(
        &self,
        spec: &ShortcutSpec,
        message: &str,
        errors: &mut Vec<String>,
    ) -> ShortcutOutcome {
        warn!(
            "failed to write {:?} shortcut (mandatory={}): {message}",
            spec.location, spec.mandatory
        );
        errors.push(format!("{:?}: {message}", spec.location));
        ShortcutOutcome::Failed
    }

    fn system_twin_exists(&self, location: ShortcutLocation) -> bool {
        self.locator
            .shortcut_path(location, InstallScope::AllUsers)
            .map(|path| path.exists())
            .unwrap_or(false)
    }
}
