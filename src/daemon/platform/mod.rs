#[cfg(target_os = "linux")]
mod linux;

#[cfg(target_os = "windows")]
mod windows;

#[cfg(target_os = "macos")]
mod macos;

use crate::config::TrayConfig;
use anyhow::Result;

#[cfg(target_os = "linux")]
pub async fn run(config: TrayConfig) -> Result<()> {
    linux::run(config).await
}

#[cfg(target_os = "windows")]
pub async fn run(config: TrayConfig) -> Result<()> {
    windows::run(config).await
}

#[cfg(target_os = "macos")]
pub async fn run(config: TrayConfig) -> Result<()> {
    macos::run(config).await
}

#[cfg(not(any(target_os = "linux", target_os = "windows", target_os = "macos")))]
pub async fn run(_config: TrayConfig) -> Result<()> {
    anyhow::bail!("No tray backend for this platform; use --dry-run")
}
