use std::fmt;
use thiserror::Error;

/// Shell call a failure originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShellOperation {
    Create,
    Delete,
    ModifyIcon,
    ModifyToolTip,
    ModifyState,
    NegotiateVersion,
    ShowBalloon,
    SetFocus,
    LoadIcon,
}

impl fmt::Display for ShellOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShellOperation::Create => "create",
            ShellOperation::Delete => "delete",
            ShellOperation::ModifyIcon => "modify icon",
            ShellOperation::ModifyToolTip => "modify tooltip",
            ShellOperation::ModifyState => "modify state",
            ShellOperation::NegotiateVersion => "negotiate version",
            ShellOperation::ShowBalloon => "show balloon",
            ShellOperation::SetFocus => "set focus",
            ShellOperation::LoadIcon => "load icon",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum TrayError {
    #[error("Tray icon is disposed")]
    Disposed,

    #[error("Tray icon is not created")]
    NotCreated,

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Could not determine executable identity: {0}")]
    EntryIdentity(String),

    #[error("Shell {op} failed: {source}")]
    Shell {
        op: ShellOperation,
        #[source]
        source: std::io::Error,
    },
}

impl TrayError {
    pub(crate) fn shell(op: ShellOperation) -> impl FnOnce(std::io::Error) -> TrayError {
        move |source| TrayError::Shell { op, source }
    }

    /// True for misuse of the proxy (disposed or not yet created).
    pub fn is_invalid_usage(&self) -> bool {
        matches!(self, TrayError::Disposed | TrayError::NotCreated)
    }
}

pub type Result<T> = std::result::Result<T, TrayError>;
