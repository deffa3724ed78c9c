//! Site configuration module.
//!
//! Handles loading, validating, and merging `docsite.toml`. The file lives in
//! the source root and is optional: a missing file means stock defaults.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! title = "Docs"            # Site title, shown in headers and <title>
//! extension = "md"          # Document extension (no dot)
//! output_dir = "dist"       # Output root, relative to the source root
//! assets_dir = "assets"     # Static files copied verbatim into <output>/assets/
//!
//! [[categories]]
//! key = "notes"             # Category key
//! dir = "notes"             # Category root, relative to the source root
//! # label = "Notes"         # Nav label (defaults to the title-cased key)
//!
//! [[categories]]
//! key = "practice"
//! dir = "practice"
//!
//! [colors.light]
//! background = "#ffffff"
//! text = "#1a1a1a"
//! text_muted = "#6b6b6b"    # Breadcrumbs, TOC, nav group labels
//! border = "#e2e2e2"
//! link = "#1f5fbf"
//! link_hover = "#0b3d8c"
//! code_background = "#f4f4f4"
//!
//! [colors.dark]
//! background = "#121212"
//! text = "#e6e6e6"
//! text_muted = "#9a9a9a"
//! border = "#2e2e2e"
//! link = "#8ab4f8"
//! link_hover = "#c6dafc"
//! code_background = "#1e1e1e"
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse, so override just the values you want:
//!
//! ```toml
//! title = "Field Notes"
//! ```
//!
//! Tables merge key by key; arrays (like `categories`) replace the default
//! list wholesale. Unknown keys are rejected to catch typos early.

use crate::naming::title_case;
use crate::paths::normalize;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Component, Path};
use thiserror::Error;

/// Name of the config file looked up in the source root.
pub const CONFIG_FILE: &str = "docsite.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `docsite.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Site title.
    pub title: String,
    /// Extension of source documents, without the leading dot.
    pub extension: String,
    /// Output root, relative to the source root.
    pub output_dir: String,
    /// Directory of opaque static files, relative to the source root.
    pub assets_dir: String,
    /// Category roots to discover documents in.
    pub categories: Vec<CategoryConfig>,
    /// Color schemes for light and dark modes.
    pub colors: ColorConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Docs".to_string(),
            extension: "md".to_string(),
            output_dir: "dist".to_string(),
            assets_dir: "assets".to_string(),
            categories: vec![
                CategoryConfig::new("notes", "notes"),
                CategoryConfig::new("practice", "practice"),
            ],
            colors: ColorConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Reject configs that would make discovery ambiguous or escape the source root.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.extension.is_empty() || self.extension.contains('.') {
            return Err(ConfigError::Validation(
                "extension must be non-empty and must not contain '.'".into(),
            ));
        }
        if self.categories.is_empty() {
            return Err(ConfigError::Validation(
                "at least one category is required".into(),
            ));
        }
        let mut seen = HashSet::new();
        for category in &self.categories {
            if !seen.insert(category.key.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate category key '{}'",
                    category.key
                )));
            }
            if !is_contained(Path::new(&category.dir)) {
                return Err(ConfigError::Validation(format!(
                    "category '{}' dir must be a relative path inside the source root",
                    category.key
                )));
            }
            if normalize(Path::new(&category.dir)).as_os_str().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "category '{}' dir must name a directory below the source root",
                    category.key
                )));
            }
        }
        for (i, a) in self.categories.iter().enumerate() {
            for b in &self.categories[i + 1..] {
                let (a_dir, b_dir) = (normalize(Path::new(&a.dir)), normalize(Path::new(&b.dir)));
                if a_dir.starts_with(&b_dir) || b_dir.starts_with(&a_dir) {
                    return Err(ConfigError::Validation(format!(
                        "category dirs '{}' and '{}' overlap",
                        a.dir, b.dir
                    )));
                }
            }
        }
        Ok(())
    }
}

/// True for relative paths with no `..` or root components.
fn is_contained(path: &Path) -> bool {
    path.components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

/// One source category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CategoryConfig {
    /// Category key, e.g. `"notes"`.
    pub key: String,
    /// Category root relative to the source root.
    pub dir: String,
    /// Nav label. Defaults to the title-cased key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl CategoryConfig {
    pub fn new(key: &str, dir: &str) -> Self {
        Self {
            key: key.to_string(),
            dir: dir.to_string(),
            label: None,
        }
    }

    pub fn display_label(&self) -> String {
        self.label
            .clone()
            .unwrap_or_else(|| title_case(&self.key))
    }
}

/// Theme colors, emitted into `assets/theme.css`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    /// Light mode color scheme.
    pub light: ColorScheme,
    /// Dark mode color scheme.
    pub dark: ColorScheme,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: ColorScheme::default_light(),
            dark: ColorScheme::default_dark(),
        }
    }
}

/// One palette.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    pub background: String,
    pub text: String,
    /// Muted/secondary text (breadcrumbs, TOC, nav group labels).
    pub text_muted: String,
    pub border: String,
    pub link: String,
    pub link_hover: String,
    /// Background behind code spans and fenced blocks.
    pub code_background: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#ffffff".to_string(),
            text: "#1a1a1a".to_string(),
            text_muted: "#6b6b6b".to_string(),
            border: "#e2e2e2".to_string(),
            link: "#1f5fbf".to_string(),
            link_hover: "#0b3d8c".to_string(),
            code_background: "#f4f4f4".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#121212".to_string(),
            text: "#e6e6e6".to_string(),
            text_muted: "#9a9a9a".to_string(),
            border: "#2e2e2e".to_string(),
            link: "#8ab4f8".to_string(),
            link_hover: "#c6dafc".to_string(),
            code_background: "#1e1e1e".to_string(),
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_light()
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// [`SiteConfig::default`] as a TOML table, the bottom layer of every load.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(SiteConfig::default())?)
}

/// Layer `overlay` over `base`.
///
/// Tables merge per key and recurse; anything else in `overlay` (scalars,
/// arrays such as `categories`) replaces the base value outright.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `docsite.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Apply the user layer (if any), deserialize, and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `docsite.toml` in the source root.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `docsite.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# docsite configuration
# =====================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# Site title, shown in page headers and the browser tab.
title = "Docs"

# Extension of source documents (no leading dot).
extension = "md"

# Output root, relative to the source root. Wiped on every build.
output_dir = "dist"

# Static files copied verbatim into <output>/assets/. Optional on disk.
assets_dir = "assets"

# ---------------------------------------------------------------------------
# Categories
# ---------------------------------------------------------------------------
# Each category is a directory tree of documents. Declaring [[categories]]
# replaces the default list entirely.
[[categories]]
key = "notes"
dir = "notes"
# label = "Notes"   # defaults to the title-cased key

[[categories]]
key = "practice"
dir = "practice"

# ---------------------------------------------------------------------------
# Colors - Light mode (prefers-color-scheme: light)
# ---------------------------------------------------------------------------
[colors.light]
background = "#ffffff"
text = "#1a1a1a"
text_muted = "#6b6b6b"    # Breadcrumbs, TOC, nav group labels
border = "#e2e2e2"
link = "#1f5fbf"
link_hover = "#0b3d8c"
code_background = "#f4f4f4"

# ---------------------------------------------------------------------------
# Colors - Dark mode (prefers-color-scheme: dark)
# ---------------------------------------------------------------------------
[colors.dark]
background = "#121212"
text = "#e6e6e6"
text_muted = "#9a9a9a"
border = "#2e2e2e"
link = "#8ab4f8"
link_hover = "#c6dafc"
code_background = "#1e1e1e"
"##
}

/// Generate CSS custom properties from color config.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        r#":root {{
{light}
}}

@media (prefers-color-scheme: dark) {{
    :root {{
{dark}
    }}
}}
"#,
        light = scheme_properties(&colors.light, "    "),
        dark = scheme_properties(&colors.dark, "        "),
    )
}

fn scheme_properties(scheme: &ColorScheme, indent: &str) -> String {
    [
        ("--color-bg", &scheme.background),
        ("--color-text", &scheme.text),
        ("--color-text-muted", &scheme.text_muted),
        ("--color-border", &scheme.border),
        ("--color-link", &scheme.link),
        ("--color-link-hover", &scheme.link_hover),
        ("--color-code-bg", &scheme.code_background),
    ]
    .iter()
    .map(|(name, value)| format!("{indent}{name}: {value};"))
    .collect::<Vec<_>>()
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_values() {
        let config = SiteConfig::default();
        assert_eq!(config.title, "Docs");
        assert_eq!(config.extension, "md");
        assert_eq!(config.output_dir, "dist");
        let keys: Vec<&str> = config.categories.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["notes", "practice"]);
    }

    #[test]
    fn default_config_passes_validation() {
        assert!(SiteConfig::default().validate().is_ok());
    }

    #[test]
    fn category_label_defaults_to_title_cased_key() {
        assert_eq!(
            CategoryConfig::new("code-katas", "katas").display_label(),
            "Code Katas"
        );
        let labelled = CategoryConfig {
            label: Some("Exercises".to_string()),
            ..CategoryConfig::new("practice", "practice")
        };
        assert_eq!(labelled.display_label(), "Exercises");
    }

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.title, "Docs");
        assert_eq!(config.categories.len(), 2);
    }

    #[test]
    fn partial_config_keeps_other_defaults() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE),
            "title = \"Field Notes\"\n[colors.light]\nbackground = \"#fafafa\"\n",
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.title, "Field Notes");
        assert_eq!(config.colors.light.background, "#fafafa");
        assert_eq!(config.colors.light.text, "#1a1a1a");
        assert_eq!(config.colors.dark.background, "#121212");
        assert_eq!(config.categories.len(), 2);
    }

    #[test]
    fn categories_array_replaces_defaults() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE),
            "[[categories]]\nkey = \"guides\"\ndir = \"content/guides\"\nlabel = \"How-To\"\n",
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.categories.len(), 1);
        assert_eq!(config.categories[0].dir, "content/guides");
        assert_eq!(config.categories[0].display_label(), "How-To");
    }

    #[test]
    fn invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "title = [unclosed").unwrap();
        assert!(matches!(
            load_config(tmp.path()),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn unknown_key_rejected() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "titel = \"typo\"\n").unwrap();
        assert!(load_config(tmp.path()).is_err());
    }

    #[test]
    fn unknown_nested_key_rejected() {
        let toml_str = "[colors.light]\nbackgroud = \"#fff\"\n";
        let result: Result<SiteConfig, _> = toml::from_str(toml_str);
        assert!(result.is_err());
    }

    #[test]
    fn validate_extension() {
        let mut config = SiteConfig::default();
        config.extension = ".md".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
        config.extension = String::new();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validate_empty_categories() {
        let config = SiteConfig {
            categories: vec![],
            ..SiteConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validate_duplicate_category_keys() {
        let config = SiteConfig {
            categories: vec![
                CategoryConfig::new("notes", "a"),
                CategoryConfig::new("notes", "b"),
            ],
            ..SiteConfig::default()
        };
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("duplicate category key 'notes'"));
    }

    #[test]
    fn validate_category_dir_escaping_root() {
        for dir in ["../outside", "/abs/notes", "notes/../../x"] {
            let config = SiteConfig {
                categories: vec![CategoryConfig::new("notes", dir)],
                ..SiteConfig::default()
            };
            assert!(config.validate().is_err(), "{dir} should be rejected");
        }
    }

    #[test]
    fn validate_category_dir_must_be_below_root() {
        for dir in ["", ".", "./"] {
            let config = SiteConfig {
                categories: vec![CategoryConfig::new("notes", dir)],
                ..SiteConfig::default()
            };
            assert!(config.validate().is_err(), "{dir:?} should be rejected");
        }
    }

    #[test]
    fn validate_nested_category_dirs() {
        let config = SiteConfig {
            categories: vec![
                CategoryConfig::new("notes", "notes"),
                CategoryConfig::new("rust", "notes/rust"),
            ],
            ..SiteConfig::default()
        };
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("'notes' and 'notes/rust' overlap"), "{err}");
    }

    #[test]
    fn validate_equal_category_dirs_after_normalizing() {
        let config = SiteConfig {
            categories: vec![
                CategoryConfig::new("notes", "notes"),
                CategoryConfig::new("again", "./notes/"),
            ],
            ..SiteConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validate_sibling_dirs_sharing_a_name_prefix() {
        let config = SiteConfig {
            categories: vec![
                CategoryConfig::new("notes", "notes"),
                CategoryConfig::new("notebook", "notes-archive"),
            ],
            ..SiteConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn merge_toml_scalar_override() {
        let base: toml::Value = toml::from_str("a = 1\nb = 2").unwrap();
        let overlay: toml::Value = toml::from_str("b = 3").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["a"].as_integer(), Some(1));
        assert_eq!(merged["b"].as_integer(), Some(3));
    }

    #[test]
    fn merge_toml_deep_nested() {
        let base: toml::Value = toml::from_str("[x.y]\np = 1\nq = 2").unwrap();
        let overlay: toml::Value = toml::from_str("[x.y]\nq = 9").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["x"]["y"]["p"].as_integer(), Some(1));
        assert_eq!(merged["x"]["y"]["q"].as_integer(), Some(9));
    }

    #[test]
    fn stock_config_parses_to_defaults() {
        let parsed: SiteConfig = toml::from_str(stock_config_toml()).unwrap();
        let defaults = SiteConfig::default();
        assert_eq!(parsed.title, defaults.title);
        assert_eq!(parsed.categories, defaults.categories);
        assert_eq!(parsed.colors.dark.link, defaults.colors.dark.link);
    }

    #[test]
    fn color_css_includes_both_schemes() {
        let css = generate_color_css(&ColorConfig::default());
        assert!(css.contains("--color-bg: #ffffff;"));
        assert!(css.contains("--color-code-bg: #f4f4f4;"));
        assert!(css.contains("@media (prefers-color-scheme: dark)"));
        assert!(css.contains("--color-bg: #121212;"));
    }
}
