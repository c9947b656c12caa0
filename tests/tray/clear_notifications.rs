use super::tray;
use notify_tray::backend::BackendCall;
use notify_tray::{IconHandle, Notification, NotificationIcon, ShellOperation, TrayError, TrayEvent};

#[test]
fn show_notification_sends_composed_balloon() {
    // Arrange
    let (mut tray, backend) = tray("balloon");
    tray.create().unwrap();
    let notification = Notification::new("Title", "Message")
        .with_icon(NotificationIcon::Info)
        .with_custom_icon(IconHandle(8))
        .with_realtime(true);

    // Act
    tray.show_notification(&notification).unwrap();

    // Assert
    let balloon = backend
        .calls()
        .into_iter()
        .find_map(|c| match c {
            BackendCall::ShowBalloon(_, b) => Some(b),
            _ => None,
        })
        .unwrap();
    assert_eq!(balloon, notification.to_request());
    assert_eq!(balloon.balloon_icon, IconHandle(8));
    assert!(balloon.realtime);
}

#[test]
fn show_notification_failure_is_reported() {
    let (mut tray, backend) = tray("balloon");
    tray.create().unwrap();
    backend.fail(ShellOperation::ShowBalloon);

    let result = tray.show_notification(&Notification::new("t", "m"));

    assert!(matches!(
        result,
        Err(TrayError::Shell { op: ShellOperation::ShowBalloon, .. })
    ));
}

#[test]
fn clear_notifications_recreates_icon_once() {
    // Arrange
    let (mut tray, backend) = tray("clear");
    tray.create().unwrap();
    backend.clear_calls();
    let mut rx = tray.subscribe();

    // Act
    tray.clear_notifications().unwrap();

    // Assert
    assert!(tray.is_created());
    assert_eq!(backend.count(ShellOperation::Create), 1);

    let mut received = Vec::new();
    while let Ok(event) = rx.try_recv() {
        received.push(event);
    }
    let removed = received.iter().filter(|e| **e == TrayEvent::Removed).count();
    let created = received.iter().filter(|e| **e == TrayEvent::Created).count();
    let version_changed = received
        .iter()
        .filter(|e| matches!(e, TrayEvent::VersionChanged { .. }))
        .count();
    assert_eq!((removed, created, version_changed), (1, 1, 1));
    assert_eq!(received.first(), Some(&TrayEvent::Removed));
}

#[test]
fn clear_notifications_propagates_remove_failure() {
    let (mut tray, backend) = tray("clear");
    tray.create().unwrap();
    backend.fail(ShellOperation::Delete);

    let result = tray.clear_notifications();

    assert!(result.is_err());
    assert!(tray.is_created());
    assert_eq!(backend.count(ShellOperation::Create), 1);
    backend.recover(ShellOperation::Delete);
}

#[test]
fn clear_notifications_propagates_create_failure() {
    let (mut tray, backend) = tray("clear");
    tray.create().unwrap();
    backend.fail(ShellOperation::Create);

    let result = tray.clear_notifications();

    assert!(matches!(
        result,
        Err(TrayError::Shell { op: ShellOperation::Create, .. })
    ));
    assert!(!tray.is_created());
}
