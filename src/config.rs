use crate::id::IconId;
use crate::paths;
use crate::tray::{IconVisibility, Notification, NotificationIcon};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// `WM_USER + 1`, the conventional first private message id.
pub const DEFAULT_CALLBACK_MESSAGE: u32 = 0x0401;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrayConfig {
    /// Drives the icon id; the executable identity is used when unset or blank.
    pub name: Option<String>,
    pub tool_tip: String,
    pub visibility: IconVisibility,
    pub use_standard_tool_tip: bool,
    pub callback_message: u32,
    pub badge: bool,
    pub notification: Option<NotificationConfig>,
}

impl Default for TrayConfig {
    fn default() -> Self {
        Self {
            name: None,
            tool_tip: "Notify Tray".to_string(),
            visibility: IconVisibility::Visible,
            use_standard_tool_tip: false,
            callback_message: DEFAULT_CALLBACK_MESSAGE,
            badge: false,
            notification: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationConfig {
    pub title: String,
    pub message: String,
    #[serde(default)]
    pub icon: NotificationIcon,
    #[serde(default = "default_true")]
    pub sound: bool,
    #[serde(default = "default_true")]
    pub respect_quiet_time: bool,
    #[serde(default)]
    pub realtime: bool,
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

fn default_true() -> bool {
    true
}

impl NotificationConfig {
    pub fn to_notification(&self) -> Notification {
        let mut notification = Notification::new(&self.title, &self.message)
            .with_icon(self.icon)
            .with_sound(self.sound)
            .with_respect_quiet_time(self.respect_quiet_time)
            .with_realtime(self.realtime);
        if let Some(ms) = self.timeout_ms {
            notification = notification.with_timeout(Duration::from_millis(ms));
        }
        notification
    }
}

impl TrayConfig {
    pub fn icon_id(&self) -> Result<IconId> {
        let id = match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => IconId::from_name(name),
            _ => IconId::for_current_exe(None),
        };
        id.context("Could not derive tray icon id")
    }
}

pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        let config_path = paths::config_path()?;
        Ok(Self { config_path })
    }

    pub fn with_path(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.config_path
    }

    pub fn load(&self) -> Result<TrayConfig> {
        if !self.config_path.exists() {
            log::debug!("No config at {:?}, using defaults", self.config_path);
            return Ok(TrayConfig::default());
        }

        let content = std::fs::read_to_string(&self.config_path)
            .with_context(|| format!("Failed to read {:?}", self.config_path))?;
        let config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {:?}", self.config_path))?;
        Ok(config)
    }

    pub fn save(&self, config: &TrayConfig) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(config)?;
        std::fs::write(&self.config_path, content)?;
        Ok(())
    }
}
