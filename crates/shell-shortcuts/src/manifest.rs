//! Visual-elements manifest generation.
//!
//! The shell reads `VisualElementsManifest.xml` beside the application to
//! style its start-screen tiles. The schema is fixed and consumed by one
//! reader, so the document is emitted as a byte-exact template rather than
//! through an XML library.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{Result, ShortcutError};

/// File name of the generated manifest.
pub const VISUAL_ELEMENTS_MANIFEST: &str = "VisualElementsManifest.xml";
/// Resource sub-directory, inside the version directory, that gates
/// manifest generation.
pub const VISUAL_ELEMENTS_DIR: &str = "VisualElements";

const MANIFEST_TEMPLATE: &str = concat!(
    "<Application xmlns:xsi='http://www.w3.org/2001/XMLSchema-instance'>\r\n",
    "  <VisualElements\r\n",
    "      ShowNameOnSquare150x150Logo='on'\r\n",
    "      Square150x150Logo='{version}\\VisualElements\\Logo.png'\r\n",
    "      Square70x70Logo='{version}\\VisualElements\\SmallLogo.png'\r\n",
    "      Square44x44Logo='{version}\\VisualElements\\SmallLogo.png'\r\n",
    "      ForegroundText='light'\r\n",
    "      BackgroundColor='#212121'/>\r\n",
    "</Application>\r\n",
);

/// Escape `value` for embedding in a single-quoted XML attribute.
///
/// Only `&`, `'`, and `<` are significant there; `"` and `>` pass through
/// untouched. Not idempotent (the `&` of already-escaped text is escaped
/// again), so call it exactly once per value.
pub fn escape_xml_attribute_in_single_quotes(value: &mut String) {
    *value = value
        .replace('&', "&amp;")
        .replace('\'', "&apos;")
        .replace('<', "&lt;");
}

/// Outcome of [`create_visual_elements_manifest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestStatus {
    /// The manifest was written, replacing any previous one.
    Written,
    /// The version ships no visual-elements resources; nothing was written
    /// and a manifest from a previous run is left as-is.
    SkippedNoResources,
}

/// Write `VisualElementsManifest.xml` into `install_dir` for `version`.
///
/// The manifest only makes sense when `install_dir/<version>/VisualElements`
/// exists; without it the shell would point at missing logo files, so
/// nothing is generated.
pub fn create_visual_elements_manifest(
    install_dir: &Path,
    version: &str,
) -> Result<ManifestStatus> {
    let resources = install_dir.join(version).join(VISUAL_ELEMENTS_DIR);
    if !resources.is_dir() {
        debug!("no visual elements at {:?}, manifest not generated", resources);
        return Ok(ManifestStatus::SkippedNoResources);
    }

    let mut escaped_version = version.to_owned();
    escape_xml_attribute_in_single_quotes(&mut escaped_version);
    let content = MANIFEST_TEMPLATE.replace("{version}", &escaped_version);

    let path = install_dir.join(VISUAL_ELEMENTS_MANIFEST);
    fs::write(&path, content.as_bytes()).map_err(|e| ShortcutError::io_with_path(e, &path))?;
    info!("wrote visual-elements manifest at {:?}", path);
    Ok(ManifestStatus::Written)
}
