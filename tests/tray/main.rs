mod clear_notifications;
mod disposal;
mod lifecycle;
mod updates;

use notify_tray::{MemoryBackend, TrayIcon};

pub fn tray(name: &str) -> (TrayIcon<MemoryBackend>, MemoryBackend) {
    let backend = MemoryBackend::new();
    let tray = TrayIcon::with_name(name, backend.clone()).unwrap();
    (tray, backend)
}
