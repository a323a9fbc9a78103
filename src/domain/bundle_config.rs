//! Validated user input for one generation run.

use crate::domain::AppError;

/// Author credited in the generated composer manifest.
#[derive(Debug, Clone, Default)]
pub struct Author {
    pub name: String,
    pub email: String,
    pub homepage: String,
    pub role: String,
}

/// Optional feature bundles of the generated skeleton.
#[derive(Debug, Clone, Default)]
pub struct Features {
    /// Backend module with a DCA table and model class.
    pub backend_module: bool,
    /// Human-readable backend module type, e.g. "Demo items".
    pub backend_module_type: String,
    /// Raw table name; sanitized to a `tl_` identifier during tag computation.
    pub backend_table: String,
    /// Frontend module controller plus Twig template.
    pub frontend_module: bool,
    /// Human-readable frontend module type, e.g. "My custom module".
    pub frontend_module_type: String,
    /// Content element controller plus Twig template.
    pub content_element: bool,
    /// Human-readable content element type.
    pub content_element_type: String,
    /// Custom route controller plus routes.yml.
    pub custom_route: bool,
    /// easy-coding-standard tooling.
    pub coding_standards: bool,
}

/// Complete, validated input for one generation run.
#[derive(Debug, Clone)]
pub struct BundleConfig {
    /// Composer vendor name, e.g. "acme".
    pub vendor: String,
    /// Composer repository name, e.g. "demo-bundle".
    pub repository: String,
    pub description: String,
    pub license: String,
    pub author: Author,
    /// Optional explicit composer version; omitted from the manifest when empty.
    pub version: String,
    pub features: Features,
}

impl BundleConfig {
    /// Build a config, rejecting empty or path-unsafe vendor/repository names.
    pub fn new(vendor: impl Into<String>, repository: impl Into<String>) -> Result<Self, AppError> {
        let vendor = vendor.into();
        let repository = repository.into();
        validate_package_segment("vendor", &vendor)?;
        validate_package_segment("repository", &repository)?;

        Ok(Self {
            vendor,
            repository,
            description: String::new(),
            license: String::from("MIT"),
            author: Author::default(),
            version: String::new(),
            features: Features::default(),
        })
    }

    /// Composer package name, `vendor/repository`.
    pub fn package_name(&self) -> String {
        format!("{}/{}", self.vendor, self.repository)
    }

    /// Every input field, verbatim field name to stringified value.
    ///
    /// This is the explicit enumeration copied into the tag store; a new
    /// field is not substitutable until it is added here.
    pub fn tag_entries(&self) -> Vec<(&'static str, String)> {
        let flag = |b: bool| String::from(if b { "1" } else { "0" });

        vec![
            ("vendorname", self.vendor.clone()),
            ("repositoryname", self.repository.clone()),
            ("description", self.description.clone()),
            ("license", self.license.clone()),
            ("authorname", self.author.name.clone()),
            ("authoremail", self.author.email.clone()),
            ("authorhomepage", self.author.homepage.clone()),
            ("authorrole", self.author.role.clone()),
            ("bundleversion", self.version.clone()),
            ("backendmodule", flag(self.features.backend_module)),
            ("backendmoduletype", self.features.backend_module_type.clone()),
            ("backendtable", self.features.backend_table.clone()),
            ("frontendmodule", flag(self.features.frontend_module)),
            ("frontendmoduletype", self.features.frontend_module_type.clone()),
            ("contentelement", flag(self.features.content_element)),
            ("contentelementtype", self.features.content_element_type.clone()),
            ("customroute", flag(self.features.custom_route)),
            ("codingstandards", flag(self.features.coding_standards)),
        ]
    }
}

fn validate_package_segment(what: &str, value: &str) -> Result<(), AppError> {
    let valid = !value.is_empty()
        && value != "."
        && value != ".."
        && value.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(AppError::invalid_input(format!(
            "Invalid {what} name '{value}': must be alphanumeric with hyphens or underscores"
        )))
    }
}
