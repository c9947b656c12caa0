use crate::backend::PortableBackend;
use crate::config::TrayConfig;
use crate::tray::WindowHandle;
use anyhow::Result;

/// NSStatusItem needs the main thread's run loop, so this blocks until
/// Ctrl-C terminates the application.
pub async fn run(config: TrayConfig) -> Result<()> {
    let _tray =
        crate::daemon::start_tray(&config, PortableBackend::new(), WindowHandle::default())?;

    tokio::spawn(async {
        crate::daemon::wait_for_shutdown().await;
        stop_event_loop();
    });

    run_event_loop();
    Ok(())
}

fn run_event_loop() {
    use objc2::rc::Retained;
    use objc2::runtime::AnyObject;
    use objc2::{class, msg_send};

    unsafe {
        let app: Retained<AnyObject> = msg_send![class!(NSApplication), sharedApplication];
        let _: () = msg_send![&app, run];
    }
}

fn stop_event_loop() {
    use objc2::rc::Retained;
    use objc2::runtime::AnyObject;
    use objc2::{class, msg_send};

    unsafe {
        let app: Retained<AnyObject> = msg_send![class!(NSApplication), sharedApplication];
        let _: () = msg_send![&app, terminate: std::ptr::null::<AnyObject>()];
    }
}
