//! Shortcut properties and the shell-link primitive seam.
//!
//! The installer talks to shell link files through the narrow [`ShellLink`]
//! trait. [`FileBackedLink`] keeps the same contract on a plain file system
//! (properties serialized as JSON into the link file) and backs every test
//! as well as non-Windows development builds; on Windows, [`NativeLink`]
//! writes real `.lnk` files.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, ShortcutError};

/// Icon resource reference: a file plus an icon index within it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconRef {
    pub path: PathBuf,
    pub index: i32,
}

/// Properties of a shell shortcut.
///
/// Partially specified: only fields that are `Some` are written or
/// compared. A [`LinkMode::UpdateExisting`] write leaves unset fields as
/// they are on disk, which is what lets a retarget preserve user-customized
/// arguments and working directory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShortcutProperties {
    pub target: Option<PathBuf>,
    pub icon: Option<IconRef>,
    pub working_dir: Option<PathBuf>,
    pub arguments: Option<String>,
    pub app_id: Option<String>,
    pub description: Option<String>,
    pub dual_mode: Option<bool>,
}

impl ShortcutProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_target(mut self, target: impl Into<PathBuf>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn with_icon(mut self, path: impl Into<PathBuf>, index: i32) -> Self {
        self.icon = Some(IconRef {
            path: path.into(),
            index,
        });
        self
    }

    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    pub fn with_arguments(mut self, arguments: impl Into<String>) -> Self {
        self.arguments = Some(arguments.into());
        self
    }

    pub fn with_app_id(mut self, app_id: impl Into<String>) -> Self {
        self.app_id = Some(app_id.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_dual_mode(mut self, dual_mode: bool) -> Self {
        self.dual_mode = Some(dual_mode);
        self
    }

    /// Overlay the set fields of `update` onto `self`.
    pub fn merge_from(&mut self, update: &ShortcutProperties) {
        if let Some(target) = &update.target {
            self.target = Some(target.clone());
        }
        if let Some(icon) = &update.icon {
            self.icon = Some(icon.clone());
        }
        if let Some(dir) = &update.working_dir {
            self.working_dir = Some(dir.clone());
        }
        if let Some(arguments) = &update.arguments {
            self.arguments = Some(arguments.clone());
        }
        if let Some(app_id) = &update.app_id {
            self.app_id = Some(app_id.clone());
        }
        if let Some(description) = &update.description {
            self.description = Some(description.clone());
        }
        if let Some(dual_mode) = update.dual_mode {
            self.dual_mode = Some(dual_mode);
        }
    }
}

/// Write mode for the shell-link primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkMode {
    /// Replace the shortcut wholesale, creating it if absent.
    CreateAlways,
    /// Merge the set properties into an existing shortcut; fails if absent.
    UpdateExisting,
}

/// Narrow seam over the OS shell-link primitive.
pub trait ShellLink {
    /// Create or update the shortcut at `path` per `mode`.
    fn create_or_update(
        &self,
        path: &Path,
        properties: &ShortcutProperties,
        mode: LinkMode,
    ) -> Result<()>;

    /// Read the properties of an existing shortcut.
    fn read(&self, path: &Path) -> Result<ShortcutProperties>;

    /// Remove any taskbar pin referencing the shortcut. Best-effort; the
    /// default implementation has no pin surface and does nothing.
    fn unpin(&self, _path: &Path) -> Result<()> {
        Ok(())
    }
}

/// Shell-link backend that stores the properties as JSON in the link file.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileBackedLink;

impl FileBackedLink {
    fn desired_state(
        &self,
        path: &Path,
        properties: &ShortcutProperties,
        mode: LinkMode,
    ) -> Result<ShortcutProperties> {
        match mode {
            LinkMode::CreateAlways => Ok(properties.clone()),
            LinkMode::UpdateExisting => {
                let mut existing = self.read(path)?;
                existing.merge_from(properties);
                Ok(existing)
            }
        }
    }
}

impl ShellLink for FileBackedLink {
    fn create_or_update(
        &self,
        path: &Path,
        properties: &ShortcutProperties,
        mode: LinkMode,
    ) -> Result<()> {
        let desired = self.desired_state(path, properties, mode)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ShortcutError::io_with_path(e, parent))?;
        }
        let json =
            serde_json::to_vec_pretty(&desired).map_err(|e| ShortcutError::ShortcutWrite {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        fs::write(path, json).map_err(|e| ShortcutError::ShortcutWrite {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        debug!("wrote shortcut {:?}", path);
        Ok(())
    }

    fn read(&self, path: &Path) -> Result<ShortcutProperties> {
        let raw = fs::read(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ShortcutError::FileNotFound(path.to_path_buf())
            } else {
                ShortcutError::ShortcutRead {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                }
            }
        })?;
        serde_json::from_slice(&raw).map_err(|e| ShortcutError::ShortcutRead {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

/// Shell-link backend over real Windows `.lnk` files.
///
/// Writes via `mslnk`, reads via `lnk`. Taskbar pinning goes through a COM
/// surface owned by the surrounding installer, so `unpin` keeps the no-op
/// default here.
#[cfg(windows)]
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeLink;

#[cfg(windows)]
impl ShellLink for NativeLink {
    fn create_or_update(
        &self,
        path: &Path,
        properties: &ShortcutProperties,
        mode: LinkMode,
    ) -> Result<()> {
        let desired = match mode {
            LinkMode::CreateAlways => properties.clone(),
            LinkMode::UpdateExisting => {
                let mut existing = self.read(path)?;
                existing.merge_from(properties);
                existing
            }
        };
        let target = desired
            .target
            .as_ref()
            .ok_or_else(|| ShortcutError::ShortcutWrite {
                path: path.to_path_buf(),
                message: "shortcut has no target".to_string(),
            })?;
        let mut link =
            mslnk::ShellLink::new(target).map_err(|e| ShortcutError::ShortcutWrite {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        link.set_arguments(desired.arguments.clone());
        link.set_name(desired.description.clone());
        if let Some(icon) = &desired.icon {
            link.set_icon_location(Some(icon.path.display().to_string()));
        }
        link.create_lnk(path).map_err(|e| ShortcutError::ShortcutWrite {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        debug!("wrote shortcut {:?}", path);
        Ok(())
    }

    fn read(&self, path: &Path) -> Result<ShortcutProperties> {
        if !path.exists() {
            return Err(ShortcutError::FileNotFound(path.to_path_buf()));
        }
        let link = lnk::ShellLink::open(path).map_err(|e| ShortcutError::ShortcutRead {
            path: path.to_path_buf(),
            message: format!("{e:?}"),
        })?;
        let mut props = ShortcutProperties::new();
        if let Some(info) = link.link_info() {
            if let Some(base) = info.local_base_path() {
                props.target = Some(PathBuf::from(base));
            }
        }
        if let Some(arguments) = link.arguments() {
            props.arguments = Some(arguments.clone());
        }
        if let Some(dir) = link.working_dir() {
            props.working_dir = Some(PathBuf::from(dir));
        }
        if let Some(icon) = link.icon_location() {
            props.icon = Some(IconRef {
                path: PathBuf::from(icon),
                index: *link.header().icon_index(),
            });
        }
        if let Some(description) = link.name() {
            props.description = Some(description.clone());
        }
        Ok(props)
    }
}
