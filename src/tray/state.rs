use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IconVisibility {
    #[default]
    Visible,
    Hidden,
}

/// Notification-area protocol revision negotiated at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IconVersion {
    Win95,
    Win2000,
    #[default]
    Vista,
}

impl IconVersion {
    /// Most recent first.
    pub const NEGOTIATION_ORDER: [IconVersion; 3] =
        [IconVersion::Vista, IconVersion::Win2000, IconVersion::Win95];

    /// Value passed as `uVersion` to the shell.
    pub fn protocol_number(self) -> u32 {
        match self {
            IconVersion::Win95 => 0,
            IconVersion::Win2000 => 3,
            IconVersion::Vista => 4,
        }
    }
}

/// Opaque OS icon handle (an `HICON` on Windows).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct IconHandle(pub isize);

impl IconHandle {
    pub const NULL: IconHandle = IconHandle(0);

    pub fn is_null(self) -> bool {
        self.0 == 0
    }
}

/// Message sink that receives shell callbacks (an `HWND` on Windows).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct WindowHandle(pub isize);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protocol_numbers_match_shell_constants() {
        let cases = [
            (IconVersion::Win95, 0),
            (IconVersion::Win2000, 3),
            (IconVersion::Vista, 4),
        ];

        for (version, expected) in cases {
            assert_eq!(version.protocol_number(), expected, "{:?}", version);
        }
    }

    #[test]
    fn negotiation_starts_with_newest() {
        let order = IconVersion::NEGOTIATION_ORDER;
        assert!(order.windows(2).all(|w| w[0] > w[1]));
        assert_eq!(order[0], IconVersion::default());
    }

    #[test]
    fn defaults() {
        assert_eq!(IconVisibility::default(), IconVisibility::Visible);
        assert!(IconHandle::default().is_null());
        assert!(!IconHandle(42).is_null());
    }
}
