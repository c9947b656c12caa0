use super::tray;
use notify_tray::{IconVisibility, MemoryBackend, ShellOperation, TrayError, TrayEvent, TrayIcon};

#[test]
fn create_marks_icon_created_and_registers_it() {
    // Arrange
    let (mut tray, backend) = tray("lifecycle");

    // Act
    tray.create().unwrap();

    // Assert
    assert!(tray.is_created());
    let registered = backend.registered(tray.id()).unwrap();
    assert_eq!(registered.visibility, IconVisibility::Visible);
}

#[test]
fn remove_clears_created_flag() {
    // Arrange
    let (mut tray, backend) = tray("lifecycle");
    tray.create().unwrap();

    // Act
    tray.remove().unwrap();

    // Assert
    assert!(!tray.is_created());
    assert!(backend.registered(tray.id()).is_none());
}

#[test]
fn remove_when_not_created_is_noop_success() {
    // Arrange
    let (mut tray, backend) = tray("lifecycle");

    // Act
    let removed = tray.remove();
    let tried = tray.try_remove();

    // Assert
    assert!(removed.is_ok());
    assert!(tried.unwrap());
    assert!(backend.calls().is_empty());
}

#[test]
fn failed_remove_leaves_icon_created() {
    // Arrange
    let (mut tray, backend) = tray("lifecycle");
    tray.create().unwrap();
    backend.fail(ShellOperation::Delete);

    // Act
    let result = tray.remove();

    // Assert
    assert!(matches!(
        result,
        Err(TrayError::Shell { op: ShellOperation::Delete, .. })
    ));
    assert!(tray.is_created());
    backend.recover(ShellOperation::Delete);
}

#[test]
fn create_clears_icon_left_behind_by_previous_run() {
    // Arrange
    let backend = MemoryBackend::new();
    let mut stale = TrayIcon::with_name("stale", backend.clone()).unwrap();
    backend.preregister(stale.id());

    // Act
    let result = stale.create();

    // Assert
    assert!(result.is_ok());
    assert!(stale.is_created());
    assert_eq!(backend.count(ShellOperation::Delete), 1);
}

#[test]
fn defensive_delete_failure_is_ignored() {
    // Arrange
    let (mut tray, backend) = tray("fresh");

    // Act
    tray.create().unwrap();

    // Assert: the delete of a never-registered id failed but create went on
    assert_eq!(backend.count(ShellOperation::Delete), 1);
    assert_eq!(backend.count(ShellOperation::Create), 1);
    assert!(tray.is_created());
}

#[test]
fn events_fire_after_transitions() {
    // Arrange
    let (mut tray, _backend) = tray("events");
    let mut rx = tray.subscribe();

    // Act
    tray.create().unwrap();
    tray.remove().unwrap();

    // Assert
    let mut received = Vec::new();
    while let Ok(event) = rx.try_recv() {
        received.push(event);
    }
    assert_eq!(
        received,
        vec![
            TrayEvent::VersionChanged { version: tray.version() },
            TrayEvent::Created,
            TrayEvent::Removed,
        ]
    );
}

#[test]
fn failed_create_fires_no_events() {
    // Arrange
    let (mut tray, backend) = tray("events");
    let mut rx = tray.subscribe();
    backend.fail(ShellOperation::NegotiateVersion);

    // Act
    let result = tray.create();

    // Assert
    assert!(result.is_err());
    assert!(rx.try_recv().is_err());
}

#[test]
fn operations_requiring_creation_fail_before_create() {
    // Arrange
    let (mut tray, backend) = tray("uncreated");
    let notification = notify_tray::Notification::new("t", "m");

    // Act
    let results = [
        tray.show_notification(&notification),
        tray.clear_notifications(),
        tray.set_focus(),
    ];

    // Assert
    for result in results {
        assert!(matches!(result, Err(TrayError::NotCreated)));
    }
    assert!(backend.calls().is_empty());
}
