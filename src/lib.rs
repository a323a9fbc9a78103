//! bundlegen: generate Contao CMS bundle skeletons and register them in
//! a project's root composer manifest.

pub mod app;
pub mod domain;
pub mod ports;
pub mod services;

use std::path::PathBuf;

use app::AppContext;
use app::commands::{generate as generate_command, register as register_command};
use services::{ConsoleMessageSink, EmbeddedTemplateCatalog, ZipArchiver};

pub use app::commands::generate::{GenerateOptions, GenerateOutcome};
pub use app::commands::register::RegisterOptions;
pub use domain::{AppError, BundleConfig, RegisterKind, ToolConfig};

fn console_context() -> AppContext<EmbeddedTemplateCatalog, ZipArchiver, ConsoleMessageSink> {
    AppContext::new(EmbeddedTemplateCatalog::new(), ZipArchiver::new(), ConsoleMessageSink::new())
}

/// Generate a bundle skeleton into the project directory.
///
/// Stages the skeleton in memory, validates it, resolves all template
/// tokens, writes the tree, zips it, and optionally registers the
/// package in the root composer.json.
pub fn generate(
    config: &BundleConfig,
    options: &GenerateOptions,
) -> Result<GenerateOutcome, AppError> {
    let ctx = console_context();
    let outcome = generate_command::execute(&ctx, config, options)?;
    println!("✅ Generated {} at {}", config.package_name(), outcome.package_root.display());
    Ok(outcome)
}

/// Register an already-generated package in the root composer.json.
///
/// Returns the path of the manifest backup, or `None` when every
/// requested entry was already present.
pub fn register(
    config: &BundleConfig,
    options: &RegisterOptions,
) -> Result<Option<PathBuf>, AppError> {
    use ports::MessageSink;

    let ctx = console_context();
    match register_command::execute(&ctx, config, options) {
        Ok(backup) => {
            println!("✅ Registered {}", config.package_name());
            Ok(backup)
        }
        Err(err) => {
            ctx.messages().error(&err.to_string());
            Err(err)
        }
    }
}
