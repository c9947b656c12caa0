//! Native notification-area backends.
//!
//! Every operation is a single synchronous shell call reporting success or an
//! OS error. [`TrayIcon`](crate::TrayIcon) turns those into its own errors.

pub mod memory;

#[cfg(windows)]
mod windows;

#[cfg(not(windows))]
mod portable;

pub use memory::{BackendCall, MemoryBackend};

#[cfg(windows)]
pub use self::windows::ShellBackend;

#[cfg(not(windows))]
pub use self::portable::PortableBackend;

use crate::id::IconId;
use crate::tray::{BalloonRequest, IconHandle, IconImage, IconVersion, IconVisibility, WindowHandle};
use std::io;

/// Everything the shell needs to add an icon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRequest {
    pub id: IconId,
    pub window: WindowHandle,
    pub callback_message: u32,
    pub tool_tip: String,
    pub icon: IconHandle,
    /// Keep the standard tooltip under protocol version 4.
    pub show_tip: bool,
}

pub trait NativeTrayBackend {
    fn create(&mut self, request: &CreateRequest) -> io::Result<()>;
    fn delete(&mut self, id: IconId) -> io::Result<()>;
    fn modify_icon(&mut self, id: IconId, icon: IconHandle) -> io::Result<()>;
    fn modify_tool_tip(&mut self, id: IconId, text: &str) -> io::Result<()>;
    fn modify_state(&mut self, id: IconId, visibility: IconVisibility) -> io::Result<()>;
    /// Sets the newest protocol revision the shell accepts and returns it.
    fn negotiate_version(&mut self, id: IconId) -> io::Result<IconVersion>;
    fn show_balloon(&mut self, id: IconId, balloon: &BalloonRequest) -> io::Result<()>;
    /// Returns keyboard focus to the notification area.
    fn set_focus(&mut self, id: IconId) -> io::Result<()>;
    fn load_icon(&mut self, image: &IconImage) -> io::Result<IconHandle>;
}

/// Backend for the current target.
#[cfg(windows)]
pub fn platform_backend() -> ShellBackend {
    ShellBackend::new()
}

/// Backend for the current target.
#[cfg(not(windows))]
pub fn platform_backend() -> PortableBackend {
    PortableBackend::new()
}
