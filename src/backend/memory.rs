use super::{CreateRequest, NativeTrayBackend};
use crate::error::ShellOperation;
use crate::id::IconId;
use crate::tray::{BalloonRequest, IconHandle, IconImage, IconVersion, IconVisibility};
use std::collections::{HashMap, HashSet};
use std::io;
use std::sync::{Arc, Mutex, MutexGuard};

/// A call as the shell would have seen it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCall {
    Create(CreateRequest),
    Delete(IconId),
    ModifyIcon(IconId, IconHandle),
    ModifyToolTip(IconId, String),
    ModifyState(IconId, IconVisibility),
    NegotiateVersion(IconId),
    ShowBalloon(IconId, BalloonRequest),
    SetFocus(IconId),
    LoadIcon { width: u32, height: u32 },
}

impl BackendCall {
    pub fn operation(&self) -> ShellOperation {
        match self {
            BackendCall::Create(_) => ShellOperation::Create,
            BackendCall::Delete(_) => ShellOperation::Delete,
            BackendCall::ModifyIcon(..) => ShellOperation::ModifyIcon,
            BackendCall::ModifyToolTip(..) => ShellOperation::ModifyToolTip,
            BackendCall::ModifyState(..) => ShellOperation::ModifyState,
            BackendCall::NegotiateVersion(_) => ShellOperation::NegotiateVersion,
            BackendCall::ShowBalloon(..) => ShellOperation::ShowBalloon,
            BackendCall::SetFocus(_) => ShellOperation::SetFocus,
            BackendCall::LoadIcon { .. } => ShellOperation::LoadIcon,
        }
    }
}

/// Icon as registered in the fake notification area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredIcon {
    pub tool_tip: String,
    pub icon: IconHandle,
    pub visibility: IconVisibility,
    pub version: IconVersion,
}

struct Inner {
    calls: Vec<BackendCall>,
    failing: HashSet<ShellOperation>,
    icons: HashMap<IconId, RegisteredIcon>,
    supported_version: IconVersion,
    next_handle: isize,
}

/// In-process notification area.
///
/// Clones share one journal, so a test can keep a handle while the proxy owns
/// another. Like the real shell, adding an id twice or touching an unknown id
/// fails.
#[derive(Clone)]
pub struct MemoryBackend {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                calls: Vec::new(),
                failing: HashSet::new(),
                icons: HashMap::new(),
                supported_version: IconVersion::Vista,
                next_handle: 1,
            })),
        }
    }

    pub fn with_supported_version(self, version: IconVersion) -> Self {
        self.lock().supported_version = version;
        self
    }

    /// Makes every later call of `op` fail until [`Self::recover`].
    pub fn fail(&self, op: ShellOperation) {
        self.lock().failing.insert(op);
    }

    pub fn recover(&self, op: ShellOperation) {
        self.lock().failing.remove(&op);
    }

    pub fn calls(&self) -> Vec<BackendCall> {
        self.lock().calls.clone()
    }

    pub fn count(&self, op: ShellOperation) -> usize {
        self.lock().calls.iter().filter(|c| c.operation() == op).count()
    }

    pub fn clear_calls(&self) {
        self.lock().calls.clear();
    }

    pub fn registered(&self, id: IconId) -> Option<RegisteredIcon> {
        self.lock().icons.get(&id).cloned()
    }

    /// Registers an icon behind the proxy's back, as a crashed previous run would.
    pub fn preregister(&self, id: IconId) {
        self.lock().icons.insert(
            id,
            RegisteredIcon {
                tool_tip: String::new(),
                icon: IconHandle::NULL,
                visibility: IconVisibility::Hidden,
                version: IconVersion::Win95,
            },
        );
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn record(&self, call: BackendCall) -> io::Result<MutexGuard<'_, Inner>> {
        let op = call.operation();
        let mut inner = self.lock();
        inner.calls.push(call);
        if inner.failing.contains(&op) {
            return Err(io::Error::other(format!("simulated {} failure", op)));
        }
        Ok(inner)
    }

    fn with_icon<F>(&self, call: BackendCall, id: IconId, f: F) -> io::Result<()>
    where
        F: FnOnce(&mut RegisteredIcon),
    {
        let mut inner = self.record(call)?;
        let icon = inner.icons.get_mut(&id).ok_or_else(|| unknown_icon(id))?;
        f(icon);
        Ok(())
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn unknown_icon(id: IconId) -> io::Error {
    io::Error::new(io::ErrorKind::NotFound, format!("no icon registered for {}", id))
}

impl NativeTrayBackend for MemoryBackend {
    fn create(&mut self, request: &CreateRequest) -> io::Result<()> {
        let mut inner = self.record(BackendCall::Create(request.clone()))?;
        if inner.icons.contains_key(&request.id) {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("icon {} already registered", request.id),
            ));
        }
        // Added icons start hidden until a state change shows them.
        inner.icons.insert(
            request.id,
            RegisteredIcon {
                tool_tip: request.tool_tip.clone(),
                icon: request.icon,
                visibility: IconVisibility::Hidden,
                version: IconVersion::Win95,
            },
        );
        Ok(())
    }

    fn delete(&mut self, id: IconId) -> io::Result<()> {
        let mut inner = self.record(BackendCall::Delete(id))?;
        inner.icons.remove(&id).map(|_| ()).ok_or_else(|| unknown_icon(id))
    }

    fn modify_icon(&mut self, id: IconId, icon: IconHandle) -> io::Result<()> {
        self.with_icon(BackendCall::ModifyIcon(id, icon), id, |r| r.icon = icon)
    }

    fn modify_tool_tip(&mut self, id: IconId, text: &str) -> io::Result<()> {
        self.with_icon(BackendCall::ModifyToolTip(id, text.to_string()), id, |r| {
            r.tool_tip = text.to_string()
        })
    }

    fn modify_state(&mut self, id: IconId, visibility: IconVisibility) -> io::Result<()> {
        self.with_icon(BackendCall::ModifyState(id, visibility), id, |r| {
            r.visibility = visibility
        })
    }

    fn negotiate_version(&mut self, id: IconId) -> io::Result<IconVersion> {
        let mut inner = self.record(BackendCall::NegotiateVersion(id))?;
        let version = inner.supported_version;
        let icon = inner.icons.get_mut(&id).ok_or_else(|| unknown_icon(id))?;
        icon.version = version;
        Ok(version)
    }

    fn show_balloon(&mut self, id: IconId, balloon: &BalloonRequest) -> io::Result<()> {
        self.with_icon(BackendCall::ShowBalloon(id, balloon.clone()), id, |_| {})
    }

    fn set_focus(&mut self, id: IconId) -> io::Result<()> {
        self.with_icon(BackendCall::SetFocus(id), id, |_| {})
    }

    fn load_icon(&mut self, image: &IconImage) -> io::Result<IconHandle> {
        let mut inner = self.record(BackendCall::LoadIcon {
            width: image.width(),
            height: image.height(),
        })?;
        let handle = IconHandle(inner.next_handle);
        inner.next_handle += 1;
        Ok(handle)
    }
}
