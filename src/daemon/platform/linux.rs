use crate::backend::PortableBackend;
use crate::config::TrayConfig;
use crate::tray::WindowHandle;
use anyhow::{Context, Result};
use gtk::glib;
use std::sync::mpsc;
use std::time::Duration;

/// The tray lives on its own GTK thread; it is told to shut down over a channel.
pub async fn run(config: TrayConfig) -> Result<()> {
    let (ready_tx, ready_rx) = mpsc::channel::<Result<()>>();
    let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>();

    let gtk_thread = std::thread::spawn(move || {
        if gtk::init().is_err() {
            let _ = ready_tx.send(Err(anyhow::anyhow!("Failed to initialize GTK")));
            return;
        }

        let tray = match crate::daemon::start_tray(
            &config,
            PortableBackend::new(),
            WindowHandle::default(),
        ) {
            Ok(tray) => tray,
            Err(e) => {
                let _ = ready_tx.send(Err(e));
                return;
            }
        };
        let _ = ready_tx.send(Ok(()));

        let mut tray = Some(tray);
        glib::timeout_add_local(Duration::from_millis(100), move || {
            if shutdown_rx.try_recv().is_err() {
                return glib::ControlFlow::Continue;
            }
            if let Some(mut tray) = tray.take() {
                tray.dispose();
            }
            gtk::main_quit();
            glib::ControlFlow::Break
        });
        gtk::main();
    });

    ready_rx
        .recv()
        .context("GTK thread exited before the tray was ready")??;

    crate::daemon::wait_for_shutdown().await;
    let _ = shutdown_tx.send(());
    if gtk_thread.join().is_err() {
        log::error!("GTK thread panicked");
    }
    log::info!("Tray icon removed");
    Ok(())
}
