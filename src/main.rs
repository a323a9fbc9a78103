use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use dialoguer::Input;

use bundlegen::{
    AppError, BundleConfig, GenerateOptions, RegisterKind, RegisterOptions, ToolConfig,
};

#[derive(Parser)]
#[command(name = "bundlegen")]
#[command(version)]
#[command(
    about = "Generate Contao bundle skeletons and register them in a project manifest",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum RegisterArg {
    /// `type: path` repository pointing at the package directory
    Path,
    /// `type: vcs` repository pointing at GitHub
    Vcs,
}

impl From<RegisterArg> for RegisterKind {
    fn from(value: RegisterArg) -> Self {
        match value {
            RegisterArg::Path => RegisterKind::Path,
            RegisterArg::Vcs => RegisterKind::Vcs,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a bundle skeleton into the project directory
    #[clap(visible_alias = "g")]
    Generate {
        /// Composer vendor name, e.g. "acme"
        #[arg(long)]
        vendor: Option<String>,
        /// Composer repository name, e.g. "demo-bundle"
        #[arg(long)]
        repository: Option<String>,
        /// Package description for the composer manifest
        #[arg(long)]
        description: Option<String>,
        /// SPDX license identifier (default from bundlegen.toml, else MIT)
        #[arg(long)]
        license: Option<String>,
        /// Author name credited in the manifest
        #[arg(long)]
        author_name: Option<String>,
        /// Author email
        #[arg(long)]
        author_email: Option<String>,
        /// Author homepage
        #[arg(long)]
        author_homepage: Option<String>,
        /// Author role, e.g. "Developer"
        #[arg(long)]
        author_role: Option<String>,
        /// Explicit composer version field
        #[arg(long)]
        bundle_version: Option<String>,
        /// Add a backend module with the given human-readable type
        #[arg(long, value_name = "TYPE")]
        backend_module: Option<String>,
        /// Database table for the backend module (derived from the type if omitted)
        #[arg(long, value_name = "NAME")]
        table: Option<String>,
        /// Add a frontend module with the given human-readable type
        #[arg(long, value_name = "TYPE")]
        frontend_module: Option<String>,
        /// Add a content element with the given human-readable type
        #[arg(long, value_name = "TYPE")]
        content_element: Option<String>,
        /// Add a custom route controller plus routes.yml
        #[arg(long)]
        custom_route: bool,
        /// Add easy-coding-standard tooling
        #[arg(long)]
        coding_standards: bool,
        /// Replace an existing package after a timestamped backup
        #[arg(long)]
        overwrite: bool,
        /// Register the package in the root composer.json
        #[arg(long, value_enum, value_name = "KIND")]
        register: Option<RegisterArg>,
        /// Also require the package as dev-main
        #[arg(long)]
        require: bool,
        /// Project root (defaults to the current directory)
        #[arg(long, value_name = "DIR")]
        project: Option<PathBuf>,
    },
    /// Register an existing package in the root composer.json
    #[clap(visible_alias = "r")]
    Register {
        /// Composer vendor name
        #[arg(long)]
        vendor: Option<String>,
        /// Composer repository name
        #[arg(long)]
        repository: Option<String>,
        /// Repository entry kind
        #[arg(long, value_enum, value_name = "KIND", default_value = "path")]
        kind: RegisterArg,
        /// Also require the package as dev-main
        #[arg(long)]
        require: bool,
        /// Project root (defaults to the current directory)
        #[arg(long, value_name = "DIR")]
        project: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate {
            vendor,
            repository,
            description,
            license,
            author_name,
            author_email,
            author_homepage,
            author_role,
            bundle_version,
            backend_module,
            table,
            frontend_module,
            content_element,
            custom_route,
            coding_standards,
            overwrite,
            register,
            require,
            project,
        } => run_generate(GenerateArgs {
            vendor,
            repository,
            description,
            license,
            author_name,
            author_email,
            author_homepage,
            author_role,
            bundle_version,
            backend_module,
            table,
            frontend_module,
            content_element,
            custom_route,
            coding_standards,
            overwrite,
            register,
            require,
            project,
        }),
        Commands::Register { vendor, repository, kind, require, project } => {
            run_register(vendor, repository, kind, require, project)
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

struct GenerateArgs {
    vendor: Option<String>,
    repository: Option<String>,
    description: Option<String>,
    license: Option<String>,
    author_name: Option<String>,
    author_email: Option<String>,
    author_homepage: Option<String>,
    author_role: Option<String>,
    bundle_version: Option<String>,
    backend_module: Option<String>,
    table: Option<String>,
    frontend_module: Option<String>,
    content_element: Option<String>,
    custom_route: bool,
    coding_standards: bool,
    overwrite: bool,
    register: Option<RegisterArg>,
    require: bool,
    project: Option<PathBuf>,
}

fn run_generate(args: GenerateArgs) -> Result<(), AppError> {
    let project_root = resolve_project_root(args.project)?;
    let defaults = ToolConfig::load(&project_root)?;

    let vendor = resolve_required("Vendor name", args.vendor)?;
    let repository = resolve_required("Repository name", args.repository)?;

    let mut config = BundleConfig::new(vendor, repository)?;
    config.description = args.description.unwrap_or_default();
    config.license = args.license.unwrap_or(defaults.defaults.license);
    config.author.name = args.author_name.unwrap_or(defaults.author.name);
    config.author.email = args.author_email.unwrap_or(defaults.author.email);
    config.author.homepage = args.author_homepage.unwrap_or(defaults.author.homepage);
    config.author.role = args.author_role.unwrap_or(defaults.author.role);
    config.version = args.bundle_version.unwrap_or_default();

    if let Some(module_type) = args.backend_module {
        config.features.backend_module = true;
        config.features.backend_module_type = module_type;
    }
    config.features.backend_table = args.table.unwrap_or_default();
    if let Some(module_type) = args.frontend_module {
        config.features.frontend_module = true;
        config.features.frontend_module_type = module_type;
    }
    if let Some(element_type) = args.content_element {
        config.features.content_element = true;
        config.features.content_element_type = element_type;
    }
    config.features.custom_route = args.custom_route;
    config.features.coding_standards = args.coding_standards;

    let options = GenerateOptions {
        project_root,
        overwrite: args.overwrite,
        register: args.register.map(Into::into),
        require: args.require,
    };
    bundlegen::generate(&config, &options).map(|_| ())
}

fn run_register(
    vendor: Option<String>,
    repository: Option<String>,
    kind: RegisterArg,
    require: bool,
    project: Option<PathBuf>,
) -> Result<(), AppError> {
    let project_root = resolve_project_root(project)?;
    let vendor = resolve_required("Vendor name", vendor)?;
    let repository = resolve_required("Repository name", repository)?;
    let config = BundleConfig::new(vendor, repository)?;

    let options = RegisterOptions { project_root, kind: Some(kind.into()), require };
    bundlegen::register(&config, &options).map(|_| ())
}

fn resolve_project_root(project: Option<PathBuf>) -> Result<PathBuf, AppError> {
    match project {
        Some(path) => Ok(path),
        None => Ok(std::env::current_dir()?),
    }
}

/// Take a required value from the flag, or prompt for it on a terminal.
fn resolve_required(prompt: &str, value: Option<String>) -> Result<String, AppError> {
    if let Some(value) = value {
        return Ok(value);
    }

    if std::io::stdin().is_terminal() && std::io::stdout().is_terminal() {
        Input::new()
            .with_prompt(prompt)
            .interact_text()
            .map_err(|e| AppError::invalid_input(format!("{prompt} is required: {e}")))
    } else {
        Err(AppError::invalid_input(format!("{prompt} is required")))
    }
}
