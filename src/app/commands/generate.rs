//! The generate command: the assembly pipeline for one bundle skeleton.
//!
//! Stages run in strict order: preconditions, tag computation, staging,
//! structured-content validation, backup of a pre-existing package,
//! token resolution, materialization, archiving, optional root-manifest
//! registration. Everything up to and including token resolution is
//! in-memory only; an error there leaves the filesystem untouched.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::app::AppContext;
use crate::app::commands::register::{self, RegisterOptions};
use crate::app::staging::FileStagingStore;
use crate::domain::{AppError, BundleConfig, RegisterKind, TagStore, manifest, naming};
use crate::ports::{Archiver, MessageSink, TemplateCatalog};

/// Shared language registry, appended to by backend and frontend staging.
const LANGUAGE_REGISTRY: &str = "contao/languages/en/modules.php";

/// Run options beyond the bundle parameters themselves.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Project root the package tree is written into.
    pub project_root: PathBuf,
    /// Replace an existing package after a timestamped backup.
    pub overwrite: bool,
    /// Register the package in the root composer.json.
    pub register: Option<RegisterKind>,
    /// Also add a `require` entry for the package.
    pub require: bool,
}

/// What a completed run produced.
#[derive(Debug, Clone)]
pub struct GenerateOutcome {
    pub package_root: PathBuf,
    pub archive_path: PathBuf,
    /// Backup zip of the pre-existing package, when one was overwritten.
    pub backup_path: Option<PathBuf>,
    /// Backup of the root composer.json, when registration rewrote it.
    pub manifest_backup: Option<PathBuf>,
    /// Target paths written, in staging order.
    pub files_written: Vec<String>,
}

/// Execute the generate command.
pub fn execute<C, A, M>(
    ctx: &AppContext<C, A, M>,
    config: &BundleConfig,
    options: &GenerateOptions,
) -> Result<GenerateOutcome, AppError>
where
    C: TemplateCatalog,
    A: Archiver,
    M: MessageSink,
{
    match run_pipeline(ctx, config, options) {
        Ok(outcome) => Ok(outcome),
        Err(err) => {
            ctx.messages().error(&err.to_string());
            Err(err)
        }
    }
}

fn run_pipeline<C, A, M>(
    ctx: &AppContext<C, A, M>,
    config: &BundleConfig,
    options: &GenerateOptions,
) -> Result<GenerateOutcome, AppError>
where
    C: TemplateCatalog,
    A: Archiver,
    M: MessageSink,
{
    let package_root = options.project_root.join(&config.vendor).join(&config.repository);

    if package_root.exists() && !options.overwrite {
        return Err(AppError::PackageExists(package_root.display().to_string()));
    }

    let tags = compute_tags(config);
    ctx.messages().info(&format!("Computed {} template tags", tags.all().len()));

    let mut store = FileStagingStore::new();
    stage_base(ctx.catalog(), &mut store, &tags, config)?;
    if config.features.backend_module {
        stage_backend_module(ctx.catalog(), &mut store, &tags)?;
    }
    if config.features.frontend_module {
        stage_frontend_module(ctx.catalog(), &mut store, &tags)?;
    }
    if config.features.content_element {
        stage_content_element(ctx.catalog(), &mut store, &tags)?;
    }
    if config.features.custom_route {
        stage_custom_route(ctx.catalog(), &mut store, &tags)?;
    }
    if config.features.coding_standards {
        stage_coding_standards(ctx.catalog(), &mut store)?;
    }
    ctx.messages().info(&format!("Staged {} files", store.files().len()));

    validate_structured_content(&store)?;

    let backup_path = backup_existing(ctx, &package_root)?;

    store.resolve_all(&tags)?;

    let files_written = materialize(ctx, &store, &package_root)?;

    let archive_path =
        options.project_root.join(format!("{}-{}.zip", config.vendor, config.repository));
    ctx.archiver().zip_dir(&package_root, &archive_path)?;
    ctx.messages().info(&format!("Archived package to {}", archive_path.display()));

    let manifest_backup = if options.register.is_some() || options.require {
        let register_options = RegisterOptions {
            project_root: options.project_root.clone(),
            kind: options.register,
            require: options.require,
        };
        register::execute(ctx, config, &register_options)?
    } else {
        None
    };

    Ok(GenerateOutcome {
        package_root,
        archive_path,
        backup_path,
        manifest_backup,
        files_written,
    })
}

/// Populate the tag store: every input field verbatim, then the derived
/// names. Derivations always sanitize their raw inputs first.
fn compute_tags(config: &BundleConfig) -> TagStore {
    let mut tags = TagStore::new();
    for (key, value) in config.tag_entries() {
        tags.set(key, value);
    }

    let top = naming::identifier_case(&config.vendor);
    let sub = naming::identifier_case(&config.repository);
    tags.set("namespacetoplevel", top.clone());
    tags.set("namespacesecondlevel", sub.clone());
    tags.set("bundleclassname", format!("{top}{sub}"));
    tags.set(
        "packagekey",
        format!("{}_{}", naming::snake_case(&config.vendor), naming::snake_case(&config.repository)),
    );

    // The table falls back to the backend module type when not given explicitly.
    let raw_table = if config.features.backend_table.is_empty() {
        &config.features.backend_module_type
    } else {
        &config.features.backend_table
    };
    let table = naming::table_name(raw_table);
    let model_base = naming::identifier_case(table.trim_start_matches("tl_"));
    tags.set("dbtable", table);
    tags.set("modelclassname", format!("{model_base}Model"));
    tags.set("dcalistenerclass", format!("{model_base}Listener"));
    tags.set("backendmodulekey", naming::snake_case(&config.features.backend_module_type));

    let module_key = naming::module_key(&config.features.frontend_module_type);
    tags.set("femoduleclass", format!("{}Controller", naming::identifier_case(&module_key)));
    tags.set("femodulemodel", format!("{}Model", naming::identifier_case(&module_key)));
    tags.set("femoduletemplate", naming::module_template_name(&module_key));
    tags.set("femodulekey", module_key);

    let element_key = naming::snake_case(&config.features.content_element_type);
    tags.set("elementclass", format!("{}Controller", naming::identifier_case(&element_key)));
    tags.set("elementkey", element_key);

    tags.set("routecontroller", format!("{sub}Controller"));
    tags.set("twignamespace", naming::twig_namespace(&config.vendor, &config.repository));
    tags.set("year", Local::now().format("%Y").to_string());

    tags
}

fn stage_base<C: TemplateCatalog>(
    catalog: &C,
    store: &mut FileStagingStore,
    tags: &TagStore,
    config: &BundleConfig,
) -> Result<(), AppError> {
    // Composer manifest: staged from the template, then parsed, mutated
    // and re-serialized, keeping the remaining placeholders for the
    // token pass.
    store.add_file(catalog, "composer.json", "composer.json")?;
    let staged = store.text("composer.json")?;
    let mut manifest_value = manifest::parse("composer.json", &staged)?;
    manifest::apply_package_fields(
        "composer.json",
        &mut manifest_value,
        config,
        tags.require("namespacetoplevel")?,
        tags.require("namespacesecondlevel")?,
    )?;
    store.replace("composer.json", &manifest::to_pretty("composer.json", &manifest_value)?)?;

    let bundle_class = tags.require("bundleclassname")?;
    store.add_file(catalog, "bundle-class.php", &format!("src/{bundle_class}.php"))?;
    store.add_file(
        catalog,
        "dependency-injection-extension.php",
        &format!("src/DependencyInjection/{bundle_class}Extension.php"),
    )?;
    store.add_file(catalog, "contao-manager-plugin.php", "src/ContaoManager/Plugin.php")?;

    store.add_file(catalog, "ci.yml", ".github/workflows/ci.yml")?;
    store.add_file(catalog, "phpunit.xml.dist", "phpunit.xml.dist")?;
    store.add_file(catalog, "plugin-test.php", "tests/ContaoManager/PluginTest.php")?;

    store.add_file(catalog, "readme.md", "README.md")?;
    store.add_file(catalog, "gitignore", ".gitignore")?;
    store.add_file(catalog, "gitattributes", ".gitattributes")?;
    store.add_file(catalog, "license", "LICENSE")?;

    store.add_file(catalog, "services.yml", "config/services.yml")?;
    store.add_file(catalog, "parameters.yml", "config/parameters.yml")?;

    Ok(())
}

/// Stage the shared language registry unless an earlier block already did.
fn ensure_language_registry<C: TemplateCatalog>(
    catalog: &C,
    store: &mut FileStagingStore,
) -> Result<(), AppError> {
    if !store.has_file(LANGUAGE_REGISTRY) {
        store.add_file(catalog, "registry/lang-modules.php", LANGUAGE_REGISTRY)?;
    }
    Ok(())
}

fn stage_backend_module<C: TemplateCatalog>(
    catalog: &C,
    store: &mut FileStagingStore,
    tags: &TagStore,
) -> Result<(), AppError> {
    store.add_file(
        catalog,
        "backend/dca-table.php",
        &format!("contao/dca/{}.php", tags.require("dbtable")?),
    )?;
    store.add_file(
        catalog,
        "backend/model.php",
        &format!("src/Model/{}.php", tags.require("modelclassname")?),
    )?;
    store.add_file(
        catalog,
        "backend/dca-listener.php",
        &format!("src/EventListener/DataContainer/{}.php", tags.require("dcalistenerclass")?),
    )?;
    store.add_file(catalog, "backend/listener.yml", "config/listener.yml")?;
    store.add_file(catalog, "backend/config.php", "contao/config/config.php")?;
    store.add_file(catalog, "backend/icon.png", "public/icons/backend.png")?;

    ensure_language_registry(catalog, store)?;
    store.append(LANGUAGE_REGISTRY, &catalog.load_text("fragments/lang-backend-module.php")?)?;

    Ok(())
}

fn stage_frontend_module<C: TemplateCatalog>(
    catalog: &C,
    store: &mut FileStagingStore,
    tags: &TagStore,
) -> Result<(), AppError> {
    store.add_file(
        catalog,
        "frontend/controller.php",
        &format!("src/Controller/FrontendModule/{}.php", tags.require("femoduleclass")?),
    )?;
    store.add_file(
        catalog,
        "frontend/template.html.twig",
        &format!("templates/{}.html.twig", tags.require("femoduletemplate")?),
    )?;
    store.append(
        "config/services.yml",
        &catalog.load_text("fragments/services-frontend-module.yml")?,
    )?;

    ensure_language_registry(catalog, store)?;
    store.append(LANGUAGE_REGISTRY, &catalog.load_text("fragments/lang-frontend-module.php")?)?;

    Ok(())
}

fn stage_content_element<C: TemplateCatalog>(
    catalog: &C,
    store: &mut FileStagingStore,
    tags: &TagStore,
) -> Result<(), AppError> {
    store.add_file(
        catalog,
        "element/controller.php",
        &format!("src/Controller/ContentElement/{}.php", tags.require("elementclass")?),
    )?;
    store.add_file(
        catalog,
        "element/template.html.twig",
        &format!("templates/content_element/{}.html.twig", tags.require("elementkey")?),
    )?;
    store.append(
        "config/services.yml",
        &catalog.load_text("fragments/services-content-element.yml")?,
    )?;

    Ok(())
}

fn stage_custom_route<C: TemplateCatalog>(
    catalog: &C,
    store: &mut FileStagingStore,
    tags: &TagStore,
) -> Result<(), AppError> {
    store.add_file(
        catalog,
        "route/controller.php",
        &format!("src/Controller/{}.php", tags.require("routecontroller")?),
    )?;
    store.add_file(catalog, "route/routes.yml", "config/routes.yml")?;
    store.append("config/services.yml", &catalog.load_text("fragments/services-route.yml")?)?;

    Ok(())
}

fn stage_coding_standards<C: TemplateCatalog>(
    catalog: &C,
    store: &mut FileStagingStore,
) -> Result<(), AppError> {
    store.add_file(catalog, "ecs/ecs.php", "ecs.php")
}

/// Parse every staged YAML config file and check its required top-level
/// key. Runs on the raw staged buffers, before token resolution.
fn validate_structured_content(store: &FileStagingStore) -> Result<(), AppError> {
    for file in store.files() {
        if file.is_binary {
            continue;
        }
        let target = file.target.as_str();
        if !(target.starts_with("config/") && target.ends_with(".yml")) {
            continue;
        }

        let text = store.text(target)?;
        let parsed: serde_yaml::Value =
            serde_yaml::from_str(&text).map_err(|e| AppError::StructuredContent {
                file: target.to_string(),
                reason: e.to_string(),
            })?;

        let file_name = target.rsplit('/').next().unwrap_or(target);
        let required = match file_name {
            "services.yml" | "listener.yml" => Some("services"),
            "parameters.yml" => Some("parameters"),
            _ => None,
        };
        if let Some(key) = required {
            if parsed.get(key).is_none() {
                return Err(AppError::StructuredContent {
                    file: target.to_string(),
                    reason: format!("missing required top-level key '{key}'"),
                });
            }
        }
    }
    Ok(())
}

/// Zip a pre-existing package tree before anything under it is replaced.
fn backup_existing<C, A, M>(
    ctx: &AppContext<C, A, M>,
    package_root: &Path,
) -> Result<Option<PathBuf>, AppError>
where
    C: TemplateCatalog,
    A: Archiver,
    M: MessageSink,
{
    if !package_root.exists() {
        return Ok(None);
    }

    let stamp = Local::now().format("%Y%m%d%H%M%S");
    let backup = PathBuf::from(format!("{}.{stamp}.zip", package_root.display()));
    ctx.archiver().zip_dir(package_root, &backup)?;
    ctx.messages().info(&format!("Backed up existing package to {}", backup.display()));

    Ok(Some(backup))
}

fn materialize<C, A, M>(
    ctx: &AppContext<C, A, M>,
    store: &FileStagingStore,
    package_root: &Path,
) -> Result<Vec<String>, AppError>
where
    C: TemplateCatalog,
    A: Archiver,
    M: MessageSink,
{
    let mut written = Vec::with_capacity(store.files().len());
    for file in store.files() {
        let path = package_root.join(&file.target);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, &file.content)?;
        ctx.messages().info(&format!("Wrote {}", file.target));
        written.push(file.target.clone());
    }
    Ok(written)
}
