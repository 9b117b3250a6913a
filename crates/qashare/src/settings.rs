use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::{DataPath, DataPathType, Directory, Result, ShareOrigin};

const SETTINGS_FILE: &str = "settings.json";

const DEFAULT_ORIGIN: &str = "http://localhost";
const DEFAULT_LOCALE: &str = "en-US";
const DEFAULT_SITE_NAME: &str = "Answer";
const DEFAULT_MESSAGING_APP_URL: &str = "weixin://";

fn default_origin() -> String {
    DEFAULT_ORIGIN.to_owned()
}

fn default_locale() -> String {
    DEFAULT_LOCALE.to_owned()
}

fn default_site_name() -> String {
    DEFAULT_SITE_NAME.to_owned()
}

fn default_messaging_app_url() -> String {
    DEFAULT_MESSAGING_APP_URL.to_owned()
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
pub struct ShareSettings {
    /// Site address share links are built on
    #[serde(default = "default_origin")]
    pub origin: String,
    #[serde(default = "default_locale")]
    pub locale: String,
    /// Used in the text handed to the native share sheet
    #[serde(default = "default_site_name")]
    pub site_name: String,
    /// Opened by the messaging app item after the link is copied
    #[serde(default = "default_messaging_app_url")]
    pub messaging_app_url: String,
}

impl Default for ShareSettings {
    fn default() -> Self {
        Self {
            origin: default_origin(),
            locale: default_locale(),
            site_name: default_site_name(),
            messaging_app_url: default_messaging_app_url(),
        }
    }
}

impl ShareSettings {
    /// The configured origin, or the default one if it does not parse
    pub fn share_origin(&self) -> ShareOrigin {
        match ShareOrigin::parse(&self.origin) {
            Ok(origin) => origin,
            Err(err) => {
                let fallback = ShareOrigin::default();
                error!("{err}. Using {fallback}");
                fallback
            }
        }
    }
}

pub struct SettingsHandler {
    directory: Directory,
    current_settings: ShareSettings,
}

impl SettingsHandler {
    pub fn new(path: &DataPath) -> Self {
        Self {
            directory: Directory::new(path.path(DataPathType::Setting)),
            current_settings: ShareSettings::default(),
        }
    }

    pub fn load(mut self) -> Self {
        match self.directory.get_file(SETTINGS_FILE) {
            Ok(contents_str) => match serde_json::from_str::<ShareSettings>(&contents_str) {
                Ok(settings) => {
                    info!("loaded settings from {}", self.directory.file_path.display());
                    self.current_settings = settings;
                }
                Err(err) => {
                    error!("Invalid settings format ({err}). Using defaults");
                    self.current_settings = ShareSettings::default();
                }
            },
            Err(_) => {
                info!("No settings file yet. Using defaults");
                self.current_settings = ShareSettings::default();
            }
        }

        self
    }

    pub fn save(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.current_settings)?;
        self.directory.write_file(SETTINGS_FILE, &json)
    }

    fn try_save_settings(&self) {
        if let Err(err) = self.save() {
            error!("failed to save settings: {err}");
        }
    }

    pub fn settings(&self) -> &ShareSettings {
        &self.current_settings
    }

    pub fn set_origin(&mut self, origin: &ShareOrigin) {
        self.current_settings.origin = origin.to_string();
        self.try_save_settings();
    }

    pub fn set_locale<S>(&mut self, locale: S)
    where
        S: Into<String>,
    {
        self.current_settings.locale = locale.into();
        self.try_save_settings();
    }
}
