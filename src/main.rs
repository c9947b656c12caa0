use anyhow::Result;
use notify_tray::config::ConfigManager;
use notify_tray::daemon;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .init();

    let dry_run = std::env::args().skip(1).any(|arg| arg == "--dry-run");

    log::info!("Starting Notify Tray...");

    let manager = ConfigManager::new()?;
    let config = manager.load()?;
    log::debug!("Loaded config from {:?}: {:?}", manager.path(), config);

    daemon::run(config, dry_run).await?;

    log::info!("Notify Tray stopped");
    Ok(())
}
