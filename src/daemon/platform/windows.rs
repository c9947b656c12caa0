use crate::backend::ShellBackend;
use crate::config::TrayConfig;
use crate::tray::WindowHandle;
use anyhow::{Context, Result};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::mpsc;
use windows::core::{w, PCWSTR};
use windows::Win32::Foundation::{HINSTANCE, HWND, LPARAM, LRESULT, WPARAM};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::System::Threading::GetCurrentThreadId;
use windows::Win32::UI::Shell::{NIN_BALLOONUSERCLICK, NIN_KEYSELECT, NIN_POPUPOPEN, NIN_SELECT};
use windows::Win32::UI::WindowsAndMessaging::{
    CreateWindowExW, DefWindowProcW, DestroyWindow, DispatchMessageW, GetMessageW,
    PostThreadMessageW, RegisterClassW, TranslateMessage, HWND_MESSAGE, MSG, WINDOW_EX_STYLE,
    WINDOW_STYLE, WM_CONTEXTMENU, WM_LBUTTONDBLCLK, WM_LBUTTONUP, WM_QUIT, WM_RBUTTONUP,
    WNDCLASSW,
};

const CLASS_NAME: PCWSTR = w!("NotifyTrayMessageWindow");

static CALLBACK_MESSAGE: AtomicU32 = AtomicU32::new(0);

/// The shell posts icon callbacks to a message-only window owned by a
/// dedicated thread, which pumps messages until Ctrl-C posts `WM_QUIT`.
pub async fn run(config: TrayConfig) -> Result<()> {
    let (ready_tx, ready_rx) = mpsc::channel::<Result<u32>>();

    let shell_thread = std::thread::spawn(move || {
        let window = match MessageWindow::create(config.callback_message) {
            Ok(window) => window,
            Err(e) => {
                let _ = ready_tx.send(Err(e));
                return;
            }
        };

        let handle = window.handle();
        let mut tray = match crate::daemon::start_tray(&config, ShellBackend::new(), handle) {
            Ok(tray) => tray,
            Err(e) => {
                let _ = ready_tx.send(Err(e));
                return;
            }
        };
        let _ = ready_tx.send(Ok(unsafe { GetCurrentThreadId() }));

        pump_messages();
        tray.dispose();
    });

    let thread_id = ready_rx
        .recv()
        .context("Shell thread exited before the tray was ready")??;

    crate::daemon::wait_for_shutdown().await;
    if let Err(e) = unsafe { PostThreadMessageW(thread_id, WM_QUIT, WPARAM(0), LPARAM(0)) } {
        log::error!("Failed to stop the shell thread: {}", e);
    }
    if shell_thread.join().is_err() {
        log::error!("Shell thread panicked");
    }
    log::info!("Tray icon removed");
    Ok(())
}

/// Runs until `WM_QUIT` (or a `GetMessageW` failure) arrives on this thread.
fn pump_messages() {
    let mut msg = MSG::default();
    loop {
        let status = unsafe { GetMessageW(&mut msg, None, 0, 0) };
        if status.0 <= 0 {
            if status.0 < 0 {
                log::error!("GetMessageW failed: {}", windows::core::Error::from_win32());
            }
            break;
        }
        unsafe {
            let _ = TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }
    }
}

/// `HWND_MESSAGE` child: invisible, never enumerated, only receives messages.
struct MessageWindow(HWND);

impl MessageWindow {
    fn create(callback_message: u32) -> Result<Self> {
        CALLBACK_MESSAGE.store(callback_message, Ordering::Relaxed);

        unsafe {
            let module = GetModuleHandleW(None).context("GetModuleHandleW failed")?;
            let instance = HINSTANCE(module.0);
            let class = WNDCLASSW {
                hInstance: instance,
                lpszClassName: CLASS_NAME,
                lpfnWndProc: Some(wnd_proc),
                ..Default::default()
            };
            // Zero when the class already exists; CreateWindowExW reports anything worse.
            RegisterClassW(&class);

            let hwnd = CreateWindowExW(
                WINDOW_EX_STYLE::default(),
                CLASS_NAME,
                PCWSTR::null(),
                WINDOW_STYLE::default(),
                0,
                0,
                0,
                0,
                Some(HWND_MESSAGE),
                None,
                Some(instance),
                None,
            )
            .context("Failed to create message window")?;

            log::debug!("Message window {:?} created", hwnd);
            Ok(Self(hwnd))
        }
    }

    fn handle(&self) -> WindowHandle {
        WindowHandle(self.0 .0 as isize)
    }
}

impl Drop for MessageWindow {
    fn drop(&mut self) {
        if let Err(e) = unsafe { DestroyWindow(self.0) } {
            log::warn!("Failed to destroy message window: {}", e);
        }
    }
}

unsafe extern "system" fn wnd_proc(hwnd: HWND, msg: u32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    if msg == CALLBACK_MESSAGE.load(Ordering::Relaxed) {
        // Version 4 packs the event into the low word of lParam.
        let event = (lparam.0 as u32) & 0xFFFF;
        log::debug!("Tray callback: {}", callback_name(event));
        return LRESULT(0);
    }
    unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) }
}

fn callback_name(event: u32) -> &'static str {
    match event {
        NIN_SELECT => "select",
        NIN_KEYSELECT => "key select",
        NIN_BALLOONUSERCLICK => "balloon click",
        NIN_POPUPOPEN => "popup open",
        WM_LBUTTONUP => "left click",
        WM_LBUTTONDBLCLK => "double click",
        WM_RBUTTONUP => "right click",
        WM_CONTEXTMENU => "context menu",
        _ => "other",
    }
}
