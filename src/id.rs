use crate::error::{Result, TrayError};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Stable identity of a tray icon.
///
/// The shell persists per-icon user settings (placement, "always show") under
/// this value, so it should stay fixed across launches of the same application
/// rather than being random. The shell also ties it to the path of the binary:
/// a moved executable needs a new id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IconId(Uuid);

impl IconId {
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Derives an id from the SHA-256 of `name`, truncated to 128 bits.
    pub fn from_name(name: &str) -> Result<Self> {
        if name.trim().is_empty() {
            return Err(TrayError::InvalidArgument(
                "icon name must be a non-empty string".into(),
            ));
        }

        let hash = Sha256::digest(name.as_bytes());
        let mut bytes = [0u8; 16];
        bytes.copy_from_slice(&hash[..16]);

        // GUID field order, so the id matches what the shell stores.
        Ok(Self(Uuid::from_bytes_le(bytes)))
    }

    pub fn from_optional_name(name: Option<&str>) -> Result<Self> {
        match name {
            Some(name) => Self::from_name(name),
            None => Err(TrayError::InvalidArgument("icon name is missing".into())),
        }
    }

    /// Derives an id from the running executable plus build metadata.
    ///
    /// Use a distinct `postfix` for each additional icon of the same process.
    pub fn for_current_exe(postfix: Option<&str>) -> Result<Self> {
        let exe = std::env::current_exe()
            .map_err(|e| TrayError::EntryIdentity(e.to_string()))?;
        let stem = exe
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| TrayError::EntryIdentity(format!("{:?} has no file name", exe)))?;

        Self::from_name(&exe_identity(stem, postfix))
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Numeric id paired with the window handle in legacy shell calls.
    pub fn sub_id(&self) -> u32 {
        self.0.as_fields().0
    }
}

fn exe_identity(stem: &str, postfix: Option<&str>) -> String {
    let target = format!("{}-{}", std::env::consts::OS, std::env::consts::ARCH);
    let profile = if cfg!(debug_assertions) { "Debug" } else { "Release" };
    format!("{}_{}_{}_{}", stem, target, profile, postfix.unwrap_or_default())
}

impl fmt::Display for IconId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for IconId {
    type Err = TrayError;

    fn from_str(s: &str) -> Result<Self> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| TrayError::InvalidArgument(format!("invalid icon id {:?}: {}", s, e)))
    }
}

impl From<Uuid> for IconId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}
