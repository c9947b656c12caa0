//! Proxy for one icon in the taskbar notification area ("system tray").

pub mod events;
pub mod icon;
pub mod notification;
pub mod state;

pub use events::{EventBus, TrayEvent};
pub use icon::{default_icon, default_icon_with_badge, IconImage};
pub use notification::{BalloonRequest, Notification, NotificationIcon};
pub use state::{IconHandle, IconVersion, IconVisibility, WindowHandle};

use crate::backend::{CreateRequest, NativeTrayBackend};
use crate::error::{Result, ShellOperation, TrayError};
use crate::id::IconId;
use tokio::sync::broadcast;

/// Mirrors one tray icon into the OS shell.
///
/// Fields change only after the shell accepted the change. Before
/// [`create`](Self::create) the update methods only touch local state, so an
/// icon can be fully configured first. Dropping the proxy removes the icon.
pub struct TrayIcon<B: NativeTrayBackend> {
    id: IconId,
    backend: B,
    events: EventBus,
    is_created: bool,
    is_disposed: bool,
    icon: IconHandle,
    tool_tip: String,
    visibility: IconVisibility,
    version: IconVersion,
    window_handle: WindowHandle,
    callback_message: u32,
    use_standard_tool_tip: bool,
}

impl<B: NativeTrayBackend> TrayIcon<B> {
    pub fn new(id: IconId, backend: B) -> Self {
        Self {
            id,
            backend,
            events: EventBus::new(),
            is_created: false,
            is_disposed: false,
            icon: IconHandle::NULL,
            tool_tip: String::new(),
            visibility: IconVisibility::Visible,
            version: IconVersion::Vista,
            window_handle: WindowHandle::default(),
            callback_message: 0,
            use_standard_tool_tip: false,
        }
    }

    /// Id derived from `name`, see [`IconId::from_name`].
    pub fn with_name(name: &str, backend: B) -> Result<Self> {
        Ok(Self::new(IconId::from_name(name)?, backend))
    }

    /// Id derived from the running executable, see [`IconId::for_current_exe`].
    pub fn for_current_exe(backend: B) -> Result<Self> {
        Ok(Self::new(IconId::for_current_exe(None)?, backend))
    }

    pub fn id(&self) -> IconId {
        self.id
    }

    pub fn is_created(&self) -> bool {
        self.is_created
    }

    pub fn is_disposed(&self) -> bool {
        self.is_disposed
    }

    pub fn icon(&self) -> IconHandle {
        self.icon
    }

    pub fn tool_tip(&self) -> &str {
        &self.tool_tip
    }

    pub fn visibility(&self) -> IconVisibility {
        self.visibility
    }

    pub fn version(&self) -> IconVersion {
        self.version
    }

    /// Custom (application-drawn) tooltips need protocol version 4.
    pub fn supports_custom_tool_tips(&self) -> bool {
        self.version == IconVersion::Vista
    }

    pub fn window_handle(&self) -> WindowHandle {
        self.window_handle
    }

    /// Sink for click and context-menu callbacks. Read on [`create`](Self::create).
    pub fn set_window_handle(&mut self, handle: WindowHandle) {
        self.window_handle = handle;
    }

    pub fn callback_message(&self) -> u32 {
        self.callback_message
    }

    pub fn set_callback_message(&mut self, message: u32) {
        self.callback_message = message;
    }

    pub fn use_standard_tool_tip(&self) -> bool {
        self.use_standard_tool_tip
    }

    /// Keep the shell's tooltip even under protocol version 4 (`NIF_SHOWTIP`).
    pub fn set_use_standard_tool_tip(&mut self, value: bool) {
        self.use_standard_tool_tip = value;
    }

    pub fn subscribe(&self) -> broadcast::Receiver<TrayEvent> {
        self.events.subscribe()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Turns `image` into a handle usable with [`update_icon`](Self::update_icon).
    pub fn load_icon(&mut self, image: &IconImage) -> Result<IconHandle> {
        self.ensure_not_disposed()?;
        self.backend
            .load_icon(image)
            .map_err(TrayError::shell(ShellOperation::LoadIcon))
    }

    /// Adds the icon to the notification area. Does nothing if already created.
    pub fn create(&mut self) -> Result<()> {
        self.ensure_not_disposed()?;
        if self.is_created {
            return Ok(());
        }

        // A previous run may have exited without removing its icon.
        if self.backend.delete(self.id).is_ok() {
            log::debug!("Removed stale tray icon {}", self.id);
        }

        let request = CreateRequest {
            id: self.id,
            window: self.window_handle,
            callback_message: self.callback_message,
            tool_tip: self.tool_tip.clone(),
            icon: self.icon,
            show_tip: self.use_standard_tool_tip,
        };
        self.backend
            .create(&request)
            .map_err(TrayError::shell(ShellOperation::Create))?;

        let version = self
            .backend
            .negotiate_version(self.id)
            .map_err(TrayError::shell(ShellOperation::NegotiateVersion))?;

        if self.visibility == IconVisibility::Visible {
            self.backend
                .modify_state(self.id, self.visibility)
                .map_err(TrayError::shell(ShellOperation::ModifyState))?;
        }

        self.version = version;
        self.events.send(TrayEvent::VersionChanged { version });

        self.is_created = true;
        log::debug!("Created tray icon {} (protocol {:?})", self.id, version);
        self.events.send(TrayEvent::Created);
        Ok(())
    }

    /// Removes the icon, failing if the shell refuses.
    pub fn remove(&mut self) -> Result<()> {
        self.ensure_not_disposed()?;
        self.remove_icon()
    }

    /// Like [`remove`](Self::remove) but reports a shell refusal as `false`.
    pub fn try_remove(&mut self) -> Result<bool> {
        self.ensure_not_disposed()?;
        Ok(self.remove_icon().is_ok())
    }

    fn remove_icon(&mut self) -> Result<()> {
        if !self.is_created {
            return Ok(());
        }

        self.backend
            .delete(self.id)
            .map_err(TrayError::shell(ShellOperation::Delete))?;

        self.is_created = false;
        log::debug!("Removed tray icon {}", self.id);
        self.events.send(TrayEvent::Removed);
        Ok(())
    }

    pub fn update_tool_tip(&mut self, text: &str) -> Result<()> {
        self.ensure_not_disposed()?;
        if self.is_created {
            self.backend
                .modify_tool_tip(self.id, text)
                .map_err(TrayError::shell(ShellOperation::ModifyToolTip))?;
        }
        self.tool_tip = text.to_string();
        Ok(())
    }

    pub fn update_icon(&mut self, handle: IconHandle) -> Result<()> {
        self.ensure_not_disposed()?;
        if self.is_created {
            self.backend
                .modify_icon(self.id, handle)
                .map_err(TrayError::shell(ShellOperation::ModifyIcon))?;
        }
        self.icon = handle;
        Ok(())
    }

    pub fn update_visibility(&mut self, visibility: IconVisibility) -> Result<()> {
        self.ensure_not_disposed()?;
        if self.is_created {
            self.backend
                .modify_state(self.id, visibility)
                .map_err(TrayError::shell(ShellOperation::ModifyState))?;
        }
        self.visibility = visibility;
        Ok(())
    }

    pub fn show(&mut self) -> Result<()> {
        self.update_visibility(IconVisibility::Visible)
    }

    pub fn hide(&mut self) -> Result<()> {
        self.update_visibility(IconVisibility::Hidden)
    }

    /// Displays a balloon next to the icon.
    pub fn show_notification(&mut self, notification: &Notification) -> Result<()> {
        self.ensure_not_disposed()?;
        self.ensure_created()?;

        let request = notification.to_request();
        self.backend
            .show_balloon(self.id, &request)
            .map_err(TrayError::shell(ShellOperation::ShowBalloon))
    }

    /// Drops active and queued balloons by recreating the icon.
    ///
    /// The shell documents no call that flushes pending notifications while
    /// keeping the icon, so observers see `Removed` then `Created`.
    pub fn clear_notifications(&mut self) -> Result<()> {
        self.ensure_not_disposed()?;
        self.ensure_created()?;

        self.remove()?;
        self.create()
    }

    /// Returns keyboard focus to the notification area, e.g. after a
    /// context menu was dismissed with Esc.
    pub fn set_focus(&mut self) -> Result<()> {
        self.ensure_not_disposed()?;
        self.ensure_created()?;

        self.backend
            .set_focus(self.id)
            .map_err(TrayError::shell(ShellOperation::SetFocus))
    }

    /// Removes the icon and retires the proxy. Idempotent; never fails.
    pub fn dispose(&mut self) {
        if self.is_disposed {
            return;
        }
        self.is_disposed = true;

        if let Err(e) = self.remove_icon() {
            log::warn!("Failed to remove tray icon {} on dispose: {}", self.id, e);
        }
    }

    fn ensure_not_disposed(&self) -> Result<()> {
        if self.is_disposed {
            return Err(TrayError::Disposed);
        }
        Ok(())
    }

    fn ensure_created(&self) -> Result<()> {
        if !self.is_created {
            return Err(TrayError::NotCreated);
        }
        Ok(())
    }
}

impl<B: NativeTrayBackend> Drop for TrayIcon<B> {
    fn drop(&mut self) {
        self.dispose();
    }
}
