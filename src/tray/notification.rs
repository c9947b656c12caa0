use super::state::IconHandle;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const NIIF_NONE: u32 = 0x0000_0000;
pub const NIIF_INFO: u32 = 0x0000_0001;
pub const NIIF_WARNING: u32 = 0x0000_0002;
pub const NIIF_ERROR: u32 = 0x0000_0003;
pub const NIIF_USER: u32 = 0x0000_0004;
pub const NIIF_NOSOUND: u32 = 0x0000_0010;
pub const NIIF_LARGE_ICON: u32 = 0x0000_0020;
pub const NIIF_RESPECT_QUIET_TIME: u32 = 0x0000_0080;

/// Predefined severity glyph shown in a balloon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationIcon {
    #[default]
    None,
    Info,
    Warning,
    Error,
}

impl NotificationIcon {
    fn info_flag(self) -> u32 {
        match self {
            NotificationIcon::None => NIIF_NONE,
            NotificationIcon::Info => NIIF_INFO,
            NotificationIcon::Warning => NIIF_WARNING,
            NotificationIcon::Error => NIIF_ERROR,
        }
    }
}

/// A balloon notification as the caller describes it.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub title: String,
    pub message: String,
    pub icon: NotificationIcon,
    /// Replaces `icon` when set.
    pub custom_icon: Option<IconHandle>,
    pub large_icon: bool,
    pub sound: bool,
    /// Dismiss unshown during the user's quiet time instead of queueing.
    pub respect_quiet_time: bool,
    /// Discard if it cannot be displayed immediately.
    pub realtime: bool,
    /// Ignored by the shell since Vista; clamped by it to 10..30 seconds.
    pub timeout: Option<Duration>,
}

impl Notification {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            icon: NotificationIcon::None,
            custom_icon: None,
            large_icon: false,
            sound: true,
            respect_quiet_time: true,
            realtime: false,
            timeout: None,
        }
    }

    pub fn with_icon(mut self, icon: NotificationIcon) -> Self {
        self.icon = icon;
        self
    }

    pub fn with_custom_icon(mut self, handle: IconHandle) -> Self {
        self.custom_icon = Some(handle);
        self
    }

    pub fn with_large_icon(mut self, large_icon: bool) -> Self {
        self.large_icon = large_icon;
        self
    }

    pub fn with_sound(mut self, sound: bool) -> Self {
        self.sound = sound;
        self
    }

    pub fn with_respect_quiet_time(mut self, respect: bool) -> Self {
        self.respect_quiet_time = respect;
        self
    }

    pub fn with_realtime(mut self, realtime: bool) -> Self {
        self.realtime = realtime;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn info_flags(&self) -> u32 {
        let mut flags = match self.custom_icon {
            Some(_) => NIIF_USER,
            None => self.icon.info_flag(),
        };
        if !self.sound {
            flags |= NIIF_NOSOUND;
        }
        if self.respect_quiet_time {
            flags |= NIIF_RESPECT_QUIET_TIME;
        }
        if self.large_icon {
            flags |= NIIF_LARGE_ICON;
        }
        flags
    }

    pub fn to_request(&self) -> BalloonRequest {
        let timeout_ms = self
            .timeout
            .map(|t| u32::try_from(t.as_millis()).unwrap_or(u32::MAX))
            .unwrap_or(0);

        BalloonRequest {
            title: self.title.clone(),
            message: self.message.clone(),
            info_flags: self.info_flags(),
            realtime: self.realtime,
            balloon_icon: self.custom_icon.unwrap_or(IconHandle::NULL),
            timeout_ms,
        }
    }
}

/// The balloon as handed to a backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalloonRequest {
    pub title: String,
    pub message: String,
    pub info_flags: u32,
    pub realtime: bool,
    pub balloon_icon: IconHandle,
    pub timeout_ms: u32,
}
