use std::ops::{Deref, DerefMut};

use tracing::error;

use crate::context::SecurityContext;

/// Owns a security context for the length of one handshake and disposes it
/// on drop, so every exit path (including a dropped future) releases it once.
pub struct ContextGuard {
    inner: Box<dyn SecurityContext>,
}

impl ContextGuard {
    pub fn new(inner: Box<dyn SecurityContext>) -> Self {
        Self { inner }
    }
}

impl Deref for ContextGuard {
    type Target = dyn SecurityContext;

    fn deref(&self) -> &Self::Target {
        self.inner.as_ref()
    }
}

impl DerefMut for ContextGuard {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.inner.as_mut()
    }
}

impl Drop for ContextGuard {
    fn drop(&mut self) {
        if let Err(e) = self.inner.dispose() {
            error!(mechanism = self.inner.mechanism(), error = %e, "security context dispose failed");
        }
    }
}
