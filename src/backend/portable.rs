use super::{CreateRequest, NativeTrayBackend};
use crate::id::IconId;
use crate::tray::{BalloonRequest, IconHandle, IconImage, IconVersion, IconVisibility};
use std::collections::HashMap;
use std::io;
use tray_icon::{Icon, TrayIcon, TrayIconBuilder};

/// `tray-icon` backend for StatusNotifierItem (Linux) and NSStatusItem (macOS).
///
/// Must live on the thread running the platform event loop (GTK on Linux,
/// the main thread on macOS). The window handle and callback message are
/// meaningless here; clicks arrive through `tray_icon::TrayIconEvent`.
pub struct PortableBackend {
    trays: HashMap<IconId, TrayIcon>,
    images: HashMap<IconHandle, Icon>,
    next_handle: isize,
}

impl PortableBackend {
    pub fn new() -> Self {
        Self {
            trays: HashMap::new(),
            images: HashMap::new(),
            next_handle: 1,
        }
    }

    fn tray(&self, id: IconId) -> io::Result<&TrayIcon> {
        self.trays
            .get(&id)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, format!("no tray icon {}", id)))
    }

    fn image(&self, handle: IconHandle) -> io::Result<Option<Icon>> {
        if handle.is_null() {
            return Ok(None);
        }
        self.images
            .get(&handle)
            .cloned()
            .map(Some)
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, format!("unknown icon handle {:?}", handle)))
    }
}

impl Default for PortableBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn unsupported(what: &str) -> io::Error {
    io::Error::new(
        io::ErrorKind::Unsupported,
        format!("{} is not available on this platform", what),
    )
}

impl NativeTrayBackend for PortableBackend {
    fn create(&mut self, request: &CreateRequest) -> io::Result<()> {
        if self.trays.contains_key(&request.id) {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("tray icon {} already exists", request.id),
            ));
        }

        let mut builder = TrayIconBuilder::new()
            .with_id(request.id.to_string())
            .with_tooltip(&request.tool_tip);
        if let Some(icon) = self.image(request.icon)? {
            builder = builder.with_icon(icon);
        }
        let tray = builder.build().map_err(io::Error::other)?;

        self.trays.insert(request.id, tray);
        Ok(())
    }

    fn delete(&mut self, id: IconId) -> io::Result<()> {
        self.trays
            .remove(&id)
            .map(drop)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, format!("no tray icon {}", id)))
    }

    fn modify_icon(&mut self, id: IconId, icon: IconHandle) -> io::Result<()> {
        let image = self.image(icon)?;
        self.tray(id)?.set_icon(image).map_err(io::Error::other)
    }

    fn modify_tool_tip(&mut self, id: IconId, text: &str) -> io::Result<()> {
        self.tray(id)?.set_tooltip(Some(text)).map_err(io::Error::other)
    }

    fn modify_state(&mut self, id: IconId, visibility: IconVisibility) -> io::Result<()> {
        let visible = visibility == IconVisibility::Visible;
        self.tray(id)?.set_visible(visible).map_err(io::Error::other)
    }

    fn negotiate_version(&mut self, id: IconId) -> io::Result<IconVersion> {
        self.tray(id)?;
        Ok(IconVersion::Vista)
    }

    fn show_balloon(&mut self, id: IconId, _balloon: &BalloonRequest) -> io::Result<()> {
        self.tray(id)?;
        Err(unsupported("balloon notification"))
    }

    fn set_focus(&mut self, id: IconId) -> io::Result<()> {
        self.tray(id)?;
        Err(unsupported("notification area focus"))
    }

    fn load_icon(&mut self, image: &IconImage) -> io::Result<IconHandle> {
        let icon = Icon::from_rgba(image.rgba().to_vec(), image.width(), image.height())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        let handle = IconHandle(self.next_handle);
        self.next_handle += 1;
        self.images.insert(handle, icon);
        Ok(handle)
    }
}
