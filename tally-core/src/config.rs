//! Configuration management
//!
//! Settings live in `settings.json` inside the data directory:
//! ```json
//! {
//!   "app": { "theme": "dark", "currencySymbol": "R$", ... },
//!   "importProfiles": { "profiles": { ... } }
//! }
//! ```
//! Keys this crate does not manage are preserved when saving.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::ThemeMode;

pub const SETTINGS_FILE: &str = "settings.json";

/// Environment variable overriding the configured theme
pub const THEME_ENV: &str = "TALLY_THEME";

const DEFAULT_CURRENCY_SYMBOL: &str = "$";

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default)]
    app: AppSettings,
    #[serde(default)]
    import_profiles: ImportProfilesContainer,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    theme: Option<ThemeMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    currency_symbol: Option<String>,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImportProfilesContainer {
    #[serde(default)]
    profiles: HashMap<String, ImportProfile>,
}

/// Tally configuration (simplified view of settings)
#[derive(Debug, Clone)]
pub struct Config {
    pub theme: ThemeMode,
    pub currency_symbol: String,
    pub import_profiles: HashMap<String, ImportProfile>,
    /// Theme as written in the file, before any environment override
    file_theme: Option<ThemeMode>,
    /// Effective theme at load time
    loaded_theme: ThemeMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: ThemeMode::default(),
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            import_profiles: HashMap::new(),
            file_theme: None,
            loaded_theme: ThemeMode::default(),
        }
    }
}

impl Config {
    /// Load config from the data directory
    ///
    /// A missing file gives defaults. A malformed file is reported and
    /// ignored rather than blocking the caller. `TALLY_THEME` wins over the
    /// file's theme.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let raw = match read_settings(data_dir)? {
            Some(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                warn!(path = ?data_dir.join(SETTINGS_FILE), error = %e, "ignoring malformed settings file");
                SettingsFile::default()
            }),
            None => SettingsFile::default(),
        };

        let file_theme = raw.app.theme;
        let theme = std::env::var(THEME_ENV)
            .ok()
            .as_deref()
            .and_then(ThemeMode::parse)
            .or(file_theme)
            .unwrap_or_default();

        Ok(Self {
            theme,
            currency_symbol: raw
                .app
                .currency_symbol
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_CURRENCY_SYMBOL.to_string()),
            import_profiles: raw.import_profiles.profiles,
            file_theme,
            loaded_theme: theme,
        })
    }

    /// Save config to the data directory, preserving unmanaged settings
    ///
    /// Fails without touching the file when the existing settings do not
    /// parse. An environment theme override is not persisted unless the
    /// theme was changed after loading.
    pub fn save(&self, data_dir: &Path) -> Result<()> {
        let settings_path = data_dir.join(SETTINGS_FILE);
        let mut settings: SettingsFile = match read_settings(data_dir)? {
            Some(content) => serde_json::from_str(&content).with_context(|| {
                format!("Refusing to overwrite malformed {:?}; fix or remove it first", settings_path)
            })?,
            None => SettingsFile::default(),
        };

        settings.app.theme = if self.theme == self.loaded_theme {
            self.file_theme
        } else {
            Some(self.theme)
        };
        if settings.app.currency_symbol.is_some() || self.currency_symbol != DEFAULT_CURRENCY_SYMBOL {
            settings.app.currency_symbol = Some(self.currency_symbol.clone());
        }
        settings.import_profiles.profiles = self.import_profiles.clone();

        std::fs::create_dir_all(data_dir)
            .with_context(|| format!("Failed to create data directory: {:?}", data_dir))?;
        let content = serde_json::to_string_pretty(&settings)?;
        std::fs::write(&settings_path, content)?;
        Ok(())
    }
}

/// Raw settings content, or `None` when there is no settings file
fn read_settings(data_dir: &Path) -> Result<Option<String>> {
    let settings_path = data_dir.join(SETTINGS_FILE);
    if !settings_path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(&settings_path)
        .with_context(|| format!("Failed to read {:?}", settings_path))?;
    Ok(Some(content))
}

/// Import profile for CSV imports
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportProfile {
    #[serde(default)]
    pub column_mappings: ColumnMappings,
    #[serde(default)]
    pub options: ImportOptions,
}

/// Import options for profile storage
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportOptions {
    /// Type label applied to rows whose type cell is missing or blank
    #[serde(default)]
    pub default_type: Option<String>,
    /// Category applied to rows whose category cell is missing or blank
    #[serde(default)]
    pub default_category: Option<String>,
}

/// Column mappings for CSV import
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnMappings {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    pub amount: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl Default for ColumnMappings {
    fn default() -> Self {
        Self {
            kind: Some("Type".to_string()),
            amount: "Amount".to_string(),
            category: Some("Category".to_string()),
            date: Some("Date".to_string()),
            description: Some("Description".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_without_file() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::load(temp_dir.path()).unwrap();
        assert_eq!(config.currency_symbol, "$");
        assert!(config.import_profiles.is_empty());
    }

    #[test]
    fn test_save_preserves_unmanaged_keys() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(
            temp_dir.path().join(SETTINGS_FILE),
            r#"{"app": {"currencySymbol": "R$", "language": "pt-BR"}, "plugins": {"x": 1}}"#,
        )
        .unwrap();

        let mut config = Config::load(temp_dir.path()).unwrap();
        assert_eq!(config.currency_symbol, "R$");

        config.import_profiles.insert("bank".to_string(), ImportProfile::default());
        config.save(temp_dir.path()).unwrap();

        let content = std::fs::read_to_string(temp_dir.path().join(SETTINGS_FILE)).unwrap();
        let saved: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(saved["app"]["language"], "pt-BR");
        assert_eq!(saved["plugins"]["x"], 1);
        assert_eq!(saved["importProfiles"]["profiles"]["bank"]["columnMappings"]["amount"], "Amount");

        let reloaded = Config::load(temp_dir.path()).unwrap();
        assert!(reloaded.import_profiles.contains_key("bank"));
    }

    #[test]
    fn test_malformed_file_falls_back_to_defaults() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join(SETTINGS_FILE), "{oops").unwrap();
        let config = Config::load(temp_dir.path()).unwrap();
        assert_eq!(config.currency_symbol, "$");
    }

    #[test]
    fn test_save_refuses_malformed_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(SETTINGS_FILE);
        let original = r#"{"app":{"currencySymbol":"R$","language":"pt-BR",},"plugins":{"x":1}}"#;
        std::fs::write(&path, original).unwrap();

        let mut config = Config::load(temp_dir.path()).unwrap();
        config.import_profiles.insert("bank".to_string(), ImportProfile::default());

        let err = config.save(temp_dir.path()).unwrap_err();
        assert!(err.to_string().contains("malformed"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), original);
    }

    #[test]
    fn test_theme_env_override_is_not_persisted() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(
            temp_dir.path().join(SETTINGS_FILE),
            r#"{"app": {"theme": "light", "currencySymbol": "R$"}}"#,
        )
        .unwrap();

        std::env::set_var(THEME_ENV, "dark");
        let config = Config::load(temp_dir.path()).unwrap();
        assert_eq!(config.theme, ThemeMode::Dark);
        config.save(temp_dir.path()).unwrap();

        std::env::remove_var(THEME_ENV);

        let saved: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(temp_dir.path().join(SETTINGS_FILE)).unwrap())
                .unwrap();
        assert_eq!(saved["app"]["theme"], "light");
        assert_eq!(saved["app"]["currencySymbol"], "R$");

        // An explicit change after loading is persisted
        let mut config = Config::load(temp_dir.path()).unwrap();
        assert_eq!(config.theme, ThemeMode::Light);
        config.theme = ThemeMode::Dark;
        config.save(temp_dir.path()).unwrap();
        assert_eq!(Config::load(temp_dir.path()).unwrap().theme, ThemeMode::Dark);
    }
}
