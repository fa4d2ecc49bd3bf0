use crate::context::ContextError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialUsage {
    InitiateOnly,
    AcceptOnly,
}

/// Handle to a ticket-granting credential held by the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeCredential {
    pub usage: CredentialUsage,
    /// Host-based service name for acceptors (`service@host`), none for initiators.
    pub name: Option<String>,
    pub mechanism_oid: &'static str,
}

// Optional platform hook supplying native ticket-granting credentials.
// Returning Ok(None) means the platform has no such support.
pub trait NativeTicketSource: Send + Sync {
    fn initiator_credential(&self) -> Result<Option<NativeCredential>, ContextError>;

    fn acceptor_credential(
        &self,
        service: &str,
        host: &str,
    ) -> Result<Option<NativeCredential>, ContextError>;
}

/// The default: no platform ticket support.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoNativeTickets;

impl NativeTicketSource for NoNativeTickets {
    fn initiator_credential(&self) -> Result<Option<NativeCredential>, ContextError> {
        Ok(None)
    }

    fn acceptor_credential(
        &self,
        _service: &str,
        _host: &str,
    ) -> Result<Option<NativeCredential>, ContextError> {
        Ok(None)
    }
}
