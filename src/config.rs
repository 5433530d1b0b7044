use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::BlueprintError;

const CONFIG_DIR_NAME: &str = "upedge-blueprint";
const CONFIG_FILE_NAME: &str = "config.json";

pub const DEFAULT_BUSINESS_NAME: &str = "UpEdge Technologies";
pub const DEFAULT_EMAIL: &str = "upedgetech111@gmail.com";
pub const DEFAULT_WHATSAPP_NUMBER: &str = "+923120518266";
pub const DEFAULT_PHONE: &str = "03120518266";
pub const DEFAULT_PHONE_DISPLAY: &str = "0312-0518266";
pub const DEFAULT_ADDRESS: &str = "Abbottabad, Pakistan";

/// Where outbound messages are sent.
///
/// Every field is optional in the file; missing ones keep the defaults.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ContactConfig {
    pub business_name: String,
    pub email: String,
    /// Any formatting is allowed, only the digits end up in the link
    pub whatsapp_number: String,
    pub phone: String,
    pub phone_display: String,
    pub address: String,
    pub service_areas: Vec<String>,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            business_name: DEFAULT_BUSINESS_NAME.to_string(),
            email: DEFAULT_EMAIL.to_string(),
            whatsapp_number: DEFAULT_WHATSAPP_NUMBER.to_string(),
            phone: DEFAULT_PHONE.to_string(),
            phone_display: DEFAULT_PHONE_DISPLAY.to_string(),
            address: DEFAULT_ADDRESS.to_string(),
            service_areas: ["Abbottabad", "Mansehra", "Haripur", "Havelian"]
                .map(String::from)
                .to_vec(),
        }
    }
}

impl ContactConfig {
    pub fn default_path() -> Result<PathBuf, BlueprintError> {
        let config_dir = dirs::config_dir().ok_or(BlueprintError::NoConfigDir)?;
        Ok(config_dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load the config from the user's config directory, if one was saved.
    ///
    /// A missing directory or file yields `None`; a file that exists but
    /// cannot be read is logged and also yields `None`.
    pub fn from_local_file() -> Option<Self> {
        let config_path = Self::default_path().ok()?;
        match Self::load(&config_path) {
            Ok(config) => config,
            Err(e) => {
                warn!("Ignoring config file {:?}: {}", config_path, e);
                None
            }
        }
    }

    /// Load the config from a specific file. `Ok(None)` when it does not exist.
    pub fn load(config_path: &Path) -> Result<Option<Self>, BlueprintError> {
        if !config_path.exists() {
            debug!("Config file does not exist: {:?}", config_path);
            return Ok(None);
        }

        let file = std::fs::File::open(config_path)
            .map_err(|e| BlueprintError::ConfigIOError { source: e })?;
        let config = serde_json::from_reader(file)
            .map_err(|e| BlueprintError::ConfigSerializeError { source: e })?;
        debug!("Loaded config from {:?}", config_path);
        Ok(Some(config))
    }

    pub fn save(&self) -> Result<PathBuf, BlueprintError> {
        let config_path = Self::default_path()?;
        self.save_to(&config_path)?;
        Ok(config_path)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<(), BlueprintError> {
        if let Some(parent) = config_path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| BlueprintError::ConfigIOError { source: e })?;
            }
        }

        let file = std::fs::File::create(config_path)
            .map_err(|e| BlueprintError::ConfigIOError { source: e })?;
        serde_json::to_writer_pretty(file, self)
            .map_err(|e| BlueprintError::ConfigSerializeError { source: e })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_contact_details() {
        let config = ContactConfig::default();
        assert_eq!(config.business_name, "UpEdge Technologies");
        assert_eq!(config.email, "upedgetech111@gmail.com");
        assert_eq!(config.whatsapp_number, "+923120518266");
        assert_eq!(config.service_areas.len(), 4);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join(CONFIG_FILE_NAME);

        let config = ContactConfig {
            email: "sales@example.com".to_string(),
            ..Default::default()
        };
        config.save_to(&path).unwrap();

        let loaded = ContactConfig::load(&path).unwrap().unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, r#"{ "whatsapp_number": "+44 7700 900123" }"#).unwrap();

        let loaded = ContactConfig::load(&path).unwrap().unwrap();
        assert_eq!(loaded.whatsapp_number, "+44 7700 900123");
        assert_eq!(loaded.email, DEFAULT_EMAIL);
        assert_eq!(loaded.business_name, DEFAULT_BUSINESS_NAME);
    }

    #[test]
    fn test_missing_file_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("absent.json");
        assert!(ContactConfig::load(&path).unwrap().is_none());
    }

    #[test]
    fn test_malformed_file_is_serialize_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            ContactConfig::load(&path),
            Err(BlueprintError::ConfigSerializeError { .. })
        ));
    }
}
