use super::{CreateRequest, NativeTrayBackend};
use crate::id::IconId;
use crate::tray::{BalloonRequest, IconHandle, IconImage, IconVersion, IconVisibility, WindowHandle};
use std::collections::HashMap;
use std::ffi::c_void;
use std::io;
use windows::core::GUID;
use windows::Win32::Foundation::HWND;
use windows::Win32::UI::Shell::{
    Shell_NotifyIconW, NIF_GUID, NIF_ICON, NIF_INFO, NIF_MESSAGE, NIF_REALTIME, NIF_SHOWTIP,
    NIF_STATE, NIF_TIP, NIM_ADD, NIM_DELETE, NIM_MODIFY, NIM_SETFOCUS, NIM_SETVERSION, NIS_HIDDEN,
    NOTIFYICONDATAW, NOTIFY_ICON_DATA_FLAGS, NOTIFY_ICON_INFOTIP_FLAGS, NOTIFY_ICON_MESSAGE,
    NOTIFY_ICON_STATE,
};
use windows::Win32::UI::WindowsAndMessaging::{CreateIcon, DestroyIcon, HICON};

/// `Shell_NotifyIconW` backend.
///
/// Icons are addressed by GUID (`NIF_GUID`); the window handle and numeric
/// sub id are still filled in so callbacks reach the registered sink.
pub struct ShellBackend {
    windows: HashMap<IconId, WindowHandle>,
    loaded_icons: Vec<HICON>,
}

impl ShellBackend {
    pub fn new() -> Self {
        Self {
            windows: HashMap::new(),
            loaded_icons: Vec::new(),
        }
    }

    fn data(&self, id: IconId, flags: NOTIFY_ICON_DATA_FLAGS) -> NOTIFYICONDATAW {
        let window = self.windows.get(&id).copied().unwrap_or_default();
        NOTIFYICONDATAW {
            cbSize: std::mem::size_of::<NOTIFYICONDATAW>() as u32,
            hWnd: hwnd(window),
            uID: id.sub_id(),
            uFlags: flags | NIF_GUID,
            guidItem: GUID::from_u128(id.as_uuid().as_u128()),
            ..Default::default()
        }
    }

    fn notify(message: NOTIFY_ICON_MESSAGE, data: &NOTIFYICONDATAW) -> io::Result<()> {
        if unsafe { Shell_NotifyIconW(message, data) }.as_bool() {
            return Ok(());
        }
        let err = io::Error::last_os_error();
        match err.raw_os_error() {
            Some(0) | None => Err(io::Error::other(format!(
                "Shell_NotifyIconW({}) returned FALSE",
                message.0
            ))),
            Some(_) => Err(err),
        }
    }
}

impl Default for ShellBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ShellBackend {
    fn drop(&mut self) {
        for icon in self.loaded_icons.drain(..) {
            if let Err(e) = unsafe { DestroyIcon(icon) } {
                log::warn!("Failed to destroy icon: {}", e);
            }
        }
    }
}

fn hwnd(window: WindowHandle) -> HWND {
    HWND(window.0 as *mut c_void)
}

fn hicon(icon: IconHandle) -> HICON {
    HICON(icon.0 as *mut c_void)
}

/// Copies `text` into a fixed UTF-16 buffer, truncating to leave a terminator.
fn copy_wide(dst: &mut [u16], text: &str) {
    let max = dst.len().saturating_sub(1);
    let mut written = 0;
    for (slot, unit) in dst.iter_mut().zip(text.encode_utf16().take(max)) {
        *slot = unit;
        written += 1;
    }
    // Never leave half of a surrogate pair behind.
    if written > 0 && (0xD800..=0xDBFF).contains(&dst[written - 1]) {
        written -= 1;
    }
    dst[written..].fill(0);
}

impl NativeTrayBackend for ShellBackend {
    fn create(&mut self, request: &CreateRequest) -> io::Result<()> {
        self.windows.insert(request.id, request.window);

        let mut flags = NIF_MESSAGE | NIF_ICON | NIF_TIP;
        if request.show_tip {
            flags |= NIF_SHOWTIP;
        }
        let mut data = self.data(request.id, flags);
        data.uCallbackMessage = request.callback_message;
        data.hIcon = hicon(request.icon);
        copy_wide(&mut data.szTip, &request.tool_tip);

        Self::notify(NIM_ADD, &data)
    }

    fn delete(&mut self, id: IconId) -> io::Result<()> {
        let data = self.data(id, NOTIFY_ICON_DATA_FLAGS(0));
        Self::notify(NIM_DELETE, &data)?;
        self.windows.remove(&id);
        Ok(())
    }

    fn modify_icon(&mut self, id: IconId, icon: IconHandle) -> io::Result<()> {
        let mut data = self.data(id, NIF_ICON);
        data.hIcon = hicon(icon);
        Self::notify(NIM_MODIFY, &data)
    }

    fn modify_tool_tip(&mut self, id: IconId, text: &str) -> io::Result<()> {
        let mut data = self.data(id, NIF_TIP);
        copy_wide(&mut data.szTip, text);
        Self::notify(NIM_MODIFY, &data)
    }

    fn modify_state(&mut self, id: IconId, visibility: IconVisibility) -> io::Result<()> {
        let mut data = self.data(id, NIF_STATE);
        data.dwStateMask = NIS_HIDDEN;
        data.dwState = match visibility {
            IconVisibility::Visible => NOTIFY_ICON_STATE(0),
            IconVisibility::Hidden => NIS_HIDDEN,
        };
        Self::notify(NIM_MODIFY, &data)
    }

    fn negotiate_version(&mut self, id: IconId) -> io::Result<IconVersion> {
        let mut last_error = None;
        for version in IconVersion::NEGOTIATION_ORDER {
            let mut data = self.data(id, NOTIFY_ICON_DATA_FLAGS(0));
            data.Anonymous.uVersion = version.protocol_number();
            match Self::notify(NIM_SETVERSION, &data) {
                Ok(()) => return Ok(version),
                Err(e) => {
                    log::debug!("Shell rejected protocol version {:?}: {}", version, e);
                    last_error = Some(e);
                }
            }
        }
        Err(last_error.unwrap_or_else(|| io::Error::other("no protocol version accepted")))
    }

    fn show_balloon(&mut self, id: IconId, balloon: &BalloonRequest) -> io::Result<()> {
        let mut flags = NIF_INFO;
        if balloon.realtime {
            flags |= NIF_REALTIME;
        }
        let mut data = self.data(id, flags);
        copy_wide(&mut data.szInfoTitle, &balloon.title);
        copy_wide(&mut data.szInfo, &balloon.message);
        data.dwInfoFlags = NOTIFY_ICON_INFOTIP_FLAGS(balloon.info_flags);
        data.hBalloonIcon = hicon(balloon.balloon_icon);
        data.Anonymous.uTimeout = balloon.timeout_ms;
        Self::notify(NIM_MODIFY, &data)
    }

    fn set_focus(&mut self, id: IconId) -> io::Result<()> {
        let data = self.data(id, NOTIFY_ICON_DATA_FLAGS(0));
        Self::notify(NIM_SETFOCUS, &data)
    }

    fn load_icon(&mut self, image: &IconImage) -> io::Result<IconHandle> {
        let width = i32::try_from(image.width()).map_err(io::Error::other)?;
        let height = i32::try_from(image.height()).map_err(io::Error::other)?;
        // 1bpp AND mask, rows padded to 16 bits; alpha in the colour plane wins.
        let mask_stride = (image.width() as usize).div_ceil(16) * 2;
        let and_mask = vec![0u8; mask_stride * image.height() as usize];
        let xor_bits = image.to_bgra();

        let icon = unsafe {
            CreateIcon(None, width, height, 1, 32, and_mask.as_ptr(), xor_bits.as_ptr())
        }
        .map_err(io::Error::other)?;

        self.loaded_icons.push(icon);
        Ok(IconHandle(icon.0 as isize))
    }
}
