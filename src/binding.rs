//! Forwards UI property changes onto a [`TrayIcon`].
//!
//! A UI toolkit's property system owns the values; this adapter only turns
//! each change into the matching proxy call.

use crate::backend::NativeTrayBackend;
use crate::error::Result;
use crate::id::IconId;
use crate::tray::{IconHandle, IconVisibility, TrayIcon};

/// Property of the bound tray icon that changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyChange {
    Icon(IconHandle),
    Visibility(IconVisibility),
    ToolTip(String),
    Id(IconId),
    /// Derives the id from a display name; empty falls back to the executable.
    CustomName(Option<String>),
}

pub struct TaskbarIcon<B: NativeTrayBackend> {
    tray: TrayIcon<B>,
    custom_name: Option<String>,
    make_backend: Box<dyn Fn() -> B>,
}

impl<B: NativeTrayBackend> TaskbarIcon<B> {
    pub fn new<F>(id: IconId, make_backend: F) -> Self
    where
        F: Fn() -> B + 'static,
    {
        let tray = TrayIcon::new(id, make_backend());
        Self {
            tray,
            custom_name: None,
            make_backend: Box::new(make_backend),
        }
    }

    pub fn tray(&self) -> &TrayIcon<B> {
        &self.tray
    }

    pub fn tray_mut(&mut self) -> &mut TrayIcon<B> {
        &mut self.tray
    }

    pub fn id(&self) -> IconId {
        self.tray.id()
    }

    pub fn custom_name(&self) -> Option<&str> {
        self.custom_name.as_deref()
    }

    pub fn apply(&mut self, change: PropertyChange) -> Result<()> {
        match change {
            PropertyChange::Icon(handle) => self.tray.update_icon(handle),
            PropertyChange::Visibility(visibility) => self.tray.update_visibility(visibility),
            PropertyChange::ToolTip(text) => self.tray.update_tool_tip(&text),
            PropertyChange::Id(id) => self.rekey(id),
            PropertyChange::CustomName(name) => {
                let id = match name.as_deref() {
                    Some(n) if !n.trim().is_empty() => IconId::from_name(n)?,
                    _ => IconId::for_current_exe(None)?,
                };
                self.rekey(id)?;
                self.custom_name = name;
                Ok(())
            }
        }
    }

    /// Moves the icon to a new id, carrying its configuration along.
    fn rekey(&mut self, id: IconId) -> Result<()> {
        if id == self.tray.id() {
            return Ok(());
        }

        let was_created = self.tray.is_created();
        let mut next = TrayIcon::new(id, (self.make_backend)());
        next.set_window_handle(self.tray.window_handle());
        next.set_callback_message(self.tray.callback_message());
        next.set_use_standard_tool_tip(self.tray.use_standard_tool_tip());
        next.update_icon(self.tray.icon())?;
        next.update_tool_tip(self.tray.tool_tip())?;
        next.update_visibility(self.tray.visibility())?;

        self.tray.remove()?;
        let mut previous = std::mem::replace(&mut self.tray, next);
        previous.dispose();

        log::debug!("Tray icon moved from {} to {}", previous.id(), id);
        if was_created {
            self.tray.create()?;
        }
        Ok(())
    }
}
