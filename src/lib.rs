//! System tray icon proxy over the OS shell notification API.
//!
//! [`TrayIcon`] mirrors one notification-area icon into the shell through a
//! [`NativeTrayBackend`]; [`binding::TaskbarIcon`] forwards UI property changes
//! onto it.

pub mod backend;
pub mod binding;
pub mod config;
pub mod daemon;
pub mod error;
pub mod id;
pub mod paths;
pub mod tray;

pub use backend::{MemoryBackend, NativeTrayBackend};
pub use error::{Result, ShellOperation, TrayError};
pub use id::IconId;
pub use tray::{
    IconHandle, IconVersion, IconVisibility, Notification, NotificationIcon, TrayEvent, TrayIcon,
    WindowHandle,
};
