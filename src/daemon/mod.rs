mod platform;

use crate::backend::{MemoryBackend, NativeTrayBackend};
use crate::config::TrayConfig;
use crate::tray::{default_icon, default_icon_with_badge, TrayIcon, WindowHandle};
use anyhow::{Context, Result};

/// Builds and creates the configured icon on `backend`, routing shell
/// callbacks to `window`.
///
/// A refused startup notification is logged, not fatal: some shells have no
/// balloons at all.
pub fn start_tray<B: NativeTrayBackend>(
    config: &TrayConfig,
    backend: B,
    window: WindowHandle,
) -> Result<TrayIcon<B>> {
    let mut tray = TrayIcon::new(config.icon_id()?, backend);
    tray.set_window_handle(window);
    tray.set_callback_message(config.callback_message);
    tray.set_use_standard_tool_tip(config.use_standard_tool_tip);

    let image = if config.badge {
        default_icon_with_badge()
    } else {
        default_icon()
    };
    let icon = tray.load_icon(&image)?;
    tray.update_icon(icon)?;
    tray.update_tool_tip(&config.tool_tip)?;
    tray.update_visibility(config.visibility)?;

    tray.create().context("Failed to create tray icon")?;
    log::info!("Tray icon {} created", tray.id());

    if let Some(notification) = &config.notification {
        if let Err(e) = tray.show_notification(&notification.to_notification()) {
            log::warn!("Startup notification not shown: {}", e);
        }
    }

    Ok(tray)
}

/// Runs until Ctrl-C, then removes the icon.
pub async fn run(config: TrayConfig, dry_run: bool) -> Result<()> {
    if dry_run {
        return run_dry(config).await;
    }
    platform::run(config).await
}

async fn run_dry(config: TrayConfig) -> Result<()> {
    let backend = MemoryBackend::new();
    let tray = start_tray(&config, backend.clone(), WindowHandle::default())?;

    for call in backend.calls() {
        log::info!("[dry-run] {:?}", call);
    }

    wait_for_shutdown().await;
    drop(tray);
    Ok(())
}

pub(crate) async fn wait_for_shutdown() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for Ctrl-C: {}", e);
        return;
    }
    log::info!("Shutdown signal received");
}
