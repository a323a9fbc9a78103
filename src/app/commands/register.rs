//! Root-manifest registration for generated packages.
//!
//! Adds a `repositories` entry and/or a `require` entry to the
//! project's root composer.json, after a timestamped backup of the
//! pre-mutation file. Runs as the last pipeline stage of `generate`
//! and standalone via `bundlegen register`.

use std::fs;
use std::path::PathBuf;

use chrono::Local;

use crate::app::AppContext;
use crate::domain::{AppError, BundleConfig, RegisterKind, manifest};
use crate::ports::{Archiver, MessageSink, TemplateCatalog};

const ROOT_MANIFEST: &str = "composer.json";

#[derive(Debug, Clone, Default)]
pub struct RegisterOptions {
    /// Project root holding the composer.json to augment.
    pub project_root: PathBuf,
    /// Repository entry to ensure, if any.
    pub kind: Option<RegisterKind>,
    /// Ensure a `require` entry pinned to `dev-main`.
    pub require: bool,
}

/// Execute the register command.
///
/// Returns the path of the backup written before mutation, or `None`
/// when the manifest already carried every requested entry.
pub fn execute<C, A, M>(
    ctx: &AppContext<C, A, M>,
    config: &BundleConfig,
    options: &RegisterOptions,
) -> Result<Option<PathBuf>, AppError>
where
    C: TemplateCatalog,
    A: Archiver,
    M: MessageSink,
{
    let manifest_path = options.project_root.join(ROOT_MANIFEST);
    if !manifest_path.exists() {
        return Err(AppError::invalid_input(format!(
            "No {ROOT_MANIFEST} found at {}",
            options.project_root.display()
        )));
    }

    let content = fs::read_to_string(&manifest_path)?;
    let mut root = manifest::parse(ROOT_MANIFEST, &content)?;

    let mut changed = false;
    if let Some(kind) = options.kind {
        let entry = manifest::repository_entry(kind, &config.vendor, &config.repository);
        changed |= manifest::ensure_repository(ROOT_MANIFEST, &mut root, entry)?;
    }
    if options.require {
        changed |=
            manifest::ensure_require(ROOT_MANIFEST, &mut root, &config.package_name(), "dev-main")?;
    }

    if !changed {
        ctx.messages().info("Root composer.json already up to date");
        return Ok(None);
    }

    let stamp = Local::now().format("%Y%m%d%H%M%S");
    let backup = options.project_root.join(format!("{ROOT_MANIFEST}.{stamp}.bak"));
    fs::copy(&manifest_path, &backup)?;
    fs::write(&manifest_path, manifest::to_pretty(ROOT_MANIFEST, &root)?)?;
    ctx.messages().info(&format!(
        "Registered {} in root composer.json (backup at {})",
        config.package_name(),
        backup.display()
    ));

    Ok(Some(backup))
}
