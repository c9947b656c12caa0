use super::tray;
use notify_tray::{IconHandle, IconVisibility, Notification, ShellOperation, TrayError};

#[test]
fn dispose_removes_icon_and_marks_disposed() {
    // Arrange
    let (mut tray, backend) = tray("dispose");
    tray.create().unwrap();

    // Act
    tray.dispose();

    // Assert
    assert!(tray.is_disposed());
    assert!(!tray.is_created());
    assert!(backend.registered(tray.id()).is_none());
}

#[test]
fn dispose_twice_has_no_additional_effect() {
    // Arrange
    let (mut tray, backend) = tray("dispose");
    tray.create().unwrap();
    tray.dispose();
    let calls_after_first = backend.calls().len();

    // Act
    tray.dispose();

    // Assert
    assert!(tray.is_disposed());
    assert_eq!(backend.calls().len(), calls_after_first);
}

#[test]
fn dispose_swallows_removal_failure() {
    // Arrange
    let (mut tray, backend) = tray("dispose");
    tray.create().unwrap();
    backend.fail(ShellOperation::Delete);

    // Act
    tray.dispose();

    // Assert
    assert!(tray.is_disposed());
    assert!(tray.is_created());
}

#[test]
fn operations_after_dispose_fail_with_disposed() {
    // Arrange
    let (mut tray, backend) = tray("dispose");
    tray.create().unwrap();
    tray.dispose();
    backend.clear_calls();
    let notification = Notification::new("t", "m");

    // Act
    let results = vec![
        ("create", tray.create()),
        ("remove", tray.remove()),
        ("try_remove", tray.try_remove().map(|_| ())),
        ("update_tool_tip", tray.update_tool_tip("x")),
        ("update_icon", tray.update_icon(IconHandle(1))),
        ("update_visibility", tray.update_visibility(IconVisibility::Hidden)),
        ("show", tray.show()),
        ("hide", tray.hide()),
        ("show_notification", tray.show_notification(&notification)),
        ("clear_notifications", tray.clear_notifications()),
        ("set_focus", tray.set_focus()),
    ];

    // Assert
    for (name, result) in results {
        assert!(
            matches!(result, Err(TrayError::Disposed)),
            "{} should fail after dispose",
            name
        );
    }
    assert!(backend.calls().is_empty());
}
