use super::tray;
use notify_tray::backend::BackendCall;
use notify_tray::{IconHandle, IconVisibility, ShellOperation, TrayError};

#[test]
fn updates_before_create_only_touch_local_state() {
    // Arrange
    let (mut tray, backend) = tray("updates");

    // Act
    tray.update_tool_tip("tip").unwrap();
    tray.update_icon(IconHandle(11)).unwrap();
    tray.update_visibility(IconVisibility::Hidden).unwrap();

    // Assert
    assert_eq!(tray.tool_tip(), "tip");
    assert_eq!(tray.icon(), IconHandle(11));
    assert_eq!(tray.visibility(), IconVisibility::Hidden);
    assert!(backend.calls().is_empty());
}

#[test]
fn updates_after_create_reach_the_shell() {
    // Arrange
    let (mut tray, backend) = tray("updates");
    tray.create().unwrap();
    backend.clear_calls();
    let id = tray.id();

    // Act
    tray.update_tool_tip("tip").unwrap();
    tray.update_icon(IconHandle(11)).unwrap();
    tray.hide().unwrap();

    // Assert
    assert_eq!(
        backend.calls(),
        vec![
            BackendCall::ModifyToolTip(id, "tip".into()),
            BackendCall::ModifyIcon(id, IconHandle(11)),
            BackendCall::ModifyState(id, IconVisibility::Hidden),
        ]
    );
    assert_eq!(tray.tool_tip(), "tip");
    assert_eq!(tray.icon(), IconHandle(11));
    assert_eq!(tray.visibility(), IconVisibility::Hidden);
}

#[test]
fn failed_tool_tip_update_keeps_old_value() {
    // Arrange
    let (mut tray, backend) = tray("updates");
    tray.update_tool_tip("old").unwrap();
    tray.create().unwrap();
    backend.fail(ShellOperation::ModifyToolTip);

    // Act
    let result = tray.update_tool_tip("new");

    // Assert
    assert!(matches!(
        result,
        Err(TrayError::Shell { op: ShellOperation::ModifyToolTip, .. })
    ));
    assert_eq!(tray.tool_tip(), "old");
}

#[test]
fn failed_icon_update_keeps_old_value() {
    // Arrange
    let (mut tray, backend) = tray("updates");
    tray.update_icon(IconHandle(1)).unwrap();
    tray.create().unwrap();
    backend.fail(ShellOperation::ModifyIcon);

    // Act
    let result = tray.update_icon(IconHandle(2));

    // Assert
    assert!(result.is_err());
    assert_eq!(tray.icon(), IconHandle(1));
}

#[test]
fn failed_visibility_update_keeps_old_value() {
    // Arrange
    let (mut tray, backend) = tray("updates");
    tray.create().unwrap();
    backend.fail(ShellOperation::ModifyState);

    // Act
    let hide = tray.hide();

    // Assert
    assert!(hide.is_err());
    assert_eq!(tray.visibility(), IconVisibility::Visible);
}

#[test]
fn show_and_hide_toggle_visibility() {
    let (mut tray, backend) = tray("updates");
    tray.create().unwrap();
    let id = tray.id();

    let cases = [
        (IconVisibility::Hidden, false),
        (IconVisibility::Visible, true),
        (IconVisibility::Hidden, false),
    ];

    for (expected, show) in cases {
        if show {
            tray.show().unwrap();
        } else {
            tray.hide().unwrap();
        }
        assert_eq!(tray.visibility(), expected);
        assert_eq!(backend.registered(id).unwrap().visibility, expected);
    }
}

#[test]
fn set_focus_reaches_the_shell() {
    let (mut tray, backend) = tray("focus");
    tray.create().unwrap();

    tray.set_focus().unwrap();
    backend.fail(ShellOperation::SetFocus);
    let failed = tray.set_focus();

    assert_eq!(backend.count(ShellOperation::SetFocus), 2);
    assert!(matches!(
        failed,
        Err(TrayError::Shell { op: ShellOperation::SetFocus, .. })
    ));
}
