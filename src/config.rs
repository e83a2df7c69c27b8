use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use config::{Config, ConfigError, Environment, File, FileFormat, Source};
use serde::Deserialize;

use crate::catalog::{CatalogOptions, UnpricedPolicy, DEFAULT_PAGE_SIZE};
use crate::contact::ContactSettings;

static SETTINGS: OnceLock<Result<Settings, ConfigError>> = OnceLock::new();

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub catalog: CatalogSettings,
    pub contact: ContactSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    pub data_path: PathBuf,
    pub page_size: usize,
    pub page_size_options: Vec<usize>,
    pub unpriced_policy: UnpricedPolicy,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("assets/Json/productos.json"),
            page_size: DEFAULT_PAGE_SIZE,
            page_size_options: vec![12, 24, 48],
            unpriced_policy: UnpricedPolicy::default(),
        }
    }
}

impl CatalogSettings {
    pub fn options(&self) -> CatalogOptions {
        CatalogOptions {
            page_size: self.page_size,
            unpriced: self.unpriced_policy,
        }
    }

    pub fn is_page_size_allowed(&self, page_size: usize) -> bool {
        self.page_size_options.is_empty() || self.page_size_options.contains(&page_size)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Settings {
    /// `appsettings.{toml,json,..}` in the working directory (optional), then
    /// `CATALOGO__SECTION__KEY` environment variables.
    pub fn load() -> Result<Settings, ConfigError> {
        Self::build(File::with_name("appsettings").required(false))
    }

    pub fn load_file(path: &Path) -> Result<Settings, ConfigError> {
        Self::build(File::from(path).required(true))
    }

    pub fn from_toml(raw: &str) -> Result<Settings, ConfigError> {
        Config::builder()
            .add_source(File::from_str(raw, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    fn build<S>(file: S) -> Result<Settings, ConfigError>
    where
        S: Source + Send + Sync + 'static,
    {
        Config::builder()
            .add_source(file)
            .add_source(Environment::with_prefix("CATALOGO").separator("__"))
            .build()?
            .try_deserialize()
    }
}

/// Process-wide settings, loaded once. A load failure is cached as well and
/// left to the caller to report.
pub fn get_settings() -> Result<&'static Settings, &'static ConfigError> {
    SETTINGS.get_or_init(Settings::load).as_ref()
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let settings = Settings::from_toml(
            r#"
            [catalog]
            page_size = 24
            unpriced_policy = "zero"

            [contact]
            sales_email = "alquiler@example.pe"
            "#,
        )
        .unwrap();

        assert_eq!(settings.catalog.page_size, 24);
        assert_eq!(settings.catalog.unpriced_policy, UnpricedPolicy::Zero);
        assert_eq!(settings.catalog.page_size_options, vec![12, 24, 48]);
        assert_eq!(settings.contact.sales_email, "alquiler@example.pe");
        assert_eq!(settings.contact.inquiry_whatsapp, "51905447143");
        assert_eq!(settings.logging.level, "info");
    }

    #[test]
    fn invalid_file_is_reported() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[catalog]\npage_size = \"doce\"").unwrap();

        assert!(Settings::load_file(file.path()).is_err());
    }

    #[test]
    fn settings_are_loaded_once() {
        match (get_settings(), get_settings()) {
            (Ok(first), Ok(second)) => assert!(std::ptr::eq(first, second)),
            (Err(first), Err(second)) => assert!(std::ptr::eq(first, second)),
            _ => panic!("cached settings changed between calls"),
        }
    }

    #[test]
    fn page_size_options_gate_selection() {
        let settings = CatalogSettings::default();
        assert!(settings.is_page_size_allowed(24));
        assert!(!settings.is_page_size_allowed(7));
    }
}
