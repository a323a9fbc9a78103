//! Derived-name rules for skeleton tags.
//!
//! Pure string functions shared by tag computation. All of them start
//! from the same cleanup: characters outside `[A-Za-z0-9_\- ]` are
//! dropped, `-` and spaces become `_`, repeated `_` collapse, leading
//! and trailing `_` are trimmed.

/// Split raw user input into lower-cased identifier segments.
fn segments(raw: &str) -> Vec<String> {
    raw.chars()
        .map(|c| if c == '-' || c == ' ' { '_' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect::<String>()
        .split('_')
        .filter(|s| !s.is_empty())
        .map(|s| s.to_ascii_lowercase())
        .collect()
}

/// PSR-4-style class name: `"my_custom name-space"` -> `"MyCustomNameSpace"`.
pub fn identifier_case(raw: &str) -> String {
    segments(raw)
        .iter()
        .map(|s| {
            let mut chars = s.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

/// Snake-case identifier: `"My custom module"` -> `"my_custom_module"`.
pub fn snake_case(raw: &str) -> String {
    segments(raw).join("_")
}

/// Database table identifier with the mandatory `tl_` prefix.
pub fn table_name(raw: &str) -> String {
    let cleaned = snake_case(raw);
    if cleaned.is_empty() || cleaned == "tl" {
        return String::from("tl_");
    }
    if cleaned.starts_with("tl_") { cleaned } else { format!("tl_{cleaned}") }
}

/// Frontend-module machine name: snake-cased type with `module`/`mod`
/// boundary tokens stripped and a mandatory `_module` suffix.
pub fn module_key(raw: &str) -> String {
    let mut parts = segments(raw);
    while parts.first().is_some_and(|p| p == "module" || p == "mod") {
        parts.remove(0);
    }
    while parts.last().is_some_and(|p| p == "module" || p == "mod") {
        parts.pop();
    }
    format!("{}_module", parts.join("_"))
}

/// Contao template name for a frontend module: `mod_` + machine name
/// without its `_module` suffix.
pub fn module_template_name(key: &str) -> String {
    format!("mod_{}", key.trim_end_matches("_module"))
}

/// Twig namespace tag: `@` + cased vendor + cased repository with a
/// trailing `Bundle` stripped.
pub fn twig_namespace(vendor: &str, repository: &str) -> String {
    let mut repo = identifier_case(repository);
    if let Some(stripped) = repo.strip_suffix("Bundle") {
        repo = stripped.to_string();
    }
    format!("@{}{}", identifier_case(vendor), repo)
}
