//! Composer manifest handling.
//!
//! Covers both the generated package's own `composer.json` (parsed,
//! mutated, re-serialized during staging) and augmentation of a project
//! root manifest with `repositories`/`require` entries.

use serde_json::{Map, Value, json};

use crate::domain::{AppError, BundleConfig};

/// How a generated package is registered in the root manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterKind {
    /// `type: path` repository pointing at the package directory.
    Path,
    /// `type: vcs` repository pointing at GitHub.
    Vcs,
}

/// Parse manifest JSON, naming the file on failure.
pub fn parse(file: &str, content: &str) -> Result<Value, AppError> {
    serde_json::from_str(content).map_err(|e| AppError::ManifestParse {
        file: file.to_string(),
        details: e.to_string(),
    })
}

/// Pretty-print a manifest with a trailing newline.
///
/// serde_json leaves slashes and non-ASCII text unescaped, matching
/// composer's own formatting.
pub fn to_pretty(file: &str, value: &Value) -> Result<String, AppError> {
    let mut out = serde_json::to_string_pretty(value).map_err(|e| AppError::ManifestParse {
        file: file.to_string(),
        details: e.to_string(),
    })?;
    out.push('\n');
    Ok(out)
}

fn object_mut<'a>(file: &str, value: &'a mut Value) -> Result<&'a mut Map<String, Value>, AppError> {
    value.as_object_mut().ok_or_else(|| AppError::ManifestParse {
        file: file.to_string(),
        details: String::from("top level is not a JSON object"),
    })
}

/// Fill in the computed fields of the staged package manifest: authors,
/// support links, PSR-4 autoload key, manager plugin class, optional
/// version, and coding-standard dev tooling.
pub fn apply_package_fields(
    file: &str,
    manifest: &mut Value,
    config: &BundleConfig,
    top_namespace: &str,
    sub_namespace: &str,
) -> Result<(), AppError> {
    let repo_url = format!("https://github.com/{}/{}", config.vendor, config.repository);
    let obj = object_mut(file, manifest)?;

    obj.insert(
        String::from("authors"),
        json!([{
            "name": config.author.name,
            "email": config.author.email,
            "homepage": config.author.homepage,
            "role": config.author.role,
        }]),
    );
    obj.insert(
        String::from("support"),
        json!({
            "issues": format!("{repo_url}/issues"),
            "source": repo_url,
        }),
    );

    if !config.version.is_empty() {
        obj.insert(String::from("version"), Value::String(config.version.clone()));
    }

    let psr4_key = format!("{top_namespace}\\{sub_namespace}\\");
    obj.insert(String::from("autoload"), json!({ "psr-4": { psr4_key: "src/" } }));

    let psr4_dev_key = format!("{top_namespace}\\{sub_namespace}\\Tests\\");
    obj.insert(String::from("autoload-dev"), json!({ "psr-4": { psr4_dev_key: "tests/" } }));

    let plugin_class = format!("{top_namespace}\\{sub_namespace}\\ContaoManager\\Plugin");
    obj.insert(String::from("extra"), json!({ "contao-manager-plugin": plugin_class }));

    if config.features.coding_standards {
        let dev = obj
            .entry(String::from("require-dev"))
            .or_insert_with(|| Value::Object(Map::new()));
        if let Some(dev) = dev.as_object_mut() {
            dev.insert(
                String::from("contao/easy-coding-standard"),
                Value::String(String::from("^6.12")),
            );
        }
    }

    Ok(())
}

/// Build the `repositories` entry for a package.
pub fn repository_entry(kind: RegisterKind, vendor: &str, repository: &str) -> Value {
    match kind {
        RegisterKind::Path => json!({
            "type": "path",
            "url": format!("{vendor}/{repository}"),
        }),
        RegisterKind::Vcs => json!({
            "type": "vcs",
            "url": format!("https://github.com/{vendor}/{repository}"),
        }),
    }
}

/// Add `entry` to the manifest's `repositories` array unless an exactly
/// equal entry is already present. Returns whether the entry was added.
///
/// Duplicate detection is exact structural equality; an entry that
/// differs in key order or formatting counts as new.
pub fn ensure_repository(file: &str, root: &mut Value, entry: Value) -> Result<bool, AppError> {
    let obj = object_mut(file, root)?;
    let repositories = obj
        .entry(String::from("repositories"))
        .or_insert_with(|| Value::Array(Vec::new()));
    let list = repositories.as_array_mut().ok_or_else(|| AppError::ManifestParse {
        file: file.to_string(),
        details: String::from("'repositories' is not an array"),
    })?;

    if list.contains(&entry) {
        return Ok(false);
    }
    list.push(entry);
    Ok(true)
}

/// Add `"<package>": "<constraint>"` to `require` unless the package is
/// already required. Returns whether the entry was added.
pub fn ensure_require(
    file: &str,
    root: &mut Value,
    package: &str,
    constraint: &str,
) -> Result<bool, AppError> {
    let obj = object_mut(file, root)?;
    let require = obj
        .entry(String::from("require"))
        .or_insert_with(|| Value::Object(Map::new()));
    let map = require.as_object_mut().ok_or_else(|| AppError::ManifestParse {
        file: file.to_string(),
        details: String::from("'require' is not an object"),
    })?;

    if map.contains_key(package) {
        return Ok(false);
    }
    map.insert(package.to_string(), Value::String(constraint.to_string()));
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo_config() -> BundleConfig {
        let mut config = BundleConfig::new("acme", "demo-bundle").unwrap();
        config.author.name = String::from("Jane Doe");
        config.author.email = String::from("jane@example.org");
        config
    }

    #[test]
    fn apply_package_fields_sets_autoload_and_plugin() {
        let mut manifest = json!({ "name": "##vendorname##/##repositoryname##" });
        apply_package_fields("composer.json", &mut manifest, &demo_config(), "Acme", "DemoBundle")
            .unwrap();

        assert_eq!(manifest["autoload"]["psr-4"]["Acme\\DemoBundle\\"], "src/");
        assert_eq!(
            manifest["extra"]["contao-manager-plugin"],
            "Acme\\DemoBundle\\ContaoManager\\Plugin"
        );
        assert_eq!(manifest["authors"][0]["name"], "Jane Doe");
        assert_eq!(manifest["support"]["issues"], "https://github.com/acme/demo-bundle/issues");
        assert!(manifest.get("version").is_none());
    }

    #[test]
    fn apply_package_fields_adds_ecs_dev_dependency() {
        let mut config = demo_config();
        config.features.coding_standards = true;
        let mut manifest = json!({ "require-dev": { "phpunit/phpunit": "^9.5" } });
        apply_package_fields("composer.json", &mut manifest, &config, "Acme", "DemoBundle")
            .unwrap();

        assert_eq!(manifest["require-dev"]["contao/easy-coding-standard"], "^6.12");
        assert_eq!(manifest["require-dev"]["phpunit/phpunit"], "^9.5");
    }

    #[test]
    fn to_pretty_keeps_slashes_unescaped() {
        let value = json!({ "support": { "source": "https://github.com/acme/demo" } });
        let rendered = to_pretty("composer.json", &value).unwrap();
        assert!(rendered.contains("https://github.com/acme/demo"));
        assert!(rendered.ends_with('\n'));
    }

    #[test]
    fn ensure_repository_deduplicates_equal_entries() {
        let mut root = json!({});
        let entry = repository_entry(RegisterKind::Path, "acme", "demo-bundle");

        assert!(ensure_repository("composer.json", &mut root, entry.clone()).unwrap());
        assert!(!ensure_repository("composer.json", &mut root, entry).unwrap());
        assert_eq!(root["repositories"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn ensure_repository_treats_reordered_entry_as_new() {
        let mut root = json!({ "repositories": [{ "url": "acme/demo-bundle", "type": "path" }] });
        let entry = repository_entry(RegisterKind::Path, "acme", "demo-bundle");

        // Same logical entry, different key order: counted as new.
        assert!(ensure_repository("composer.json", &mut root, entry).unwrap());
        assert_eq!(root["repositories"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn ensure_require_respects_existing_constraint() {
        let mut root = json!({ "require": { "acme/demo-bundle": "^1.0" } });
        assert!(!ensure_require("composer.json", &mut root, "acme/demo-bundle", "dev-main").unwrap());
        assert_eq!(root["require"]["acme/demo-bundle"], "^1.0");

        assert!(ensure_require("composer.json", &mut root, "acme/other", "dev-main").unwrap());
        assert_eq!(root["require"]["acme/other"], "dev-main");
    }

    #[test]
    fn vcs_entry_points_at_github() {
        let entry = repository_entry(RegisterKind::Vcs, "acme", "demo-bundle");
        assert_eq!(entry["url"], "https://github.com/acme/demo-bundle");
    }
}
