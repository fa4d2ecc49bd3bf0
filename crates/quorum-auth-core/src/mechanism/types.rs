use crate::{
    credential::Password,
    identity::KerberosName,
    mechanism::{NativeCredential, SHARED_SECRET_MECHANISM, TICKET_MECHANISM},
};

/// Initiator-side mechanism choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mechanism {
    SharedSecret { username: String, password: Password },
    Ticket(KerberosName),
}

impl Mechanism {
    pub fn name(&self) -> &'static str {
        match self {
            Mechanism::SharedSecret { .. } => SHARED_SECRET_MECHANISM,
            Mechanism::Ticket(_) => TICKET_MECHANISM,
        }
    }
}

/// Acceptor-side mechanism choice. Shared-secret acceptors verify against the
/// login's user table, so they carry no identity of their own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AcceptorMechanism {
    SharedSecret,
    Ticket(KerberosName),
}

impl AcceptorMechanism {
    pub fn name(&self) -> &'static str {
        match self {
            AcceptorMechanism::SharedSecret => SHARED_SECRET_MECHANISM,
            AcceptorMechanism::Ticket(_) => TICKET_MECHANISM,
        }
    }
}

// Protocol and server name a context is bound to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextTarget {
    pub protocol: String,
    pub server_name: String,
}

impl ContextTarget {
    pub fn new(protocol: impl Into<String>, server_name: impl Into<String>) -> Self {
        Self {
            protocol: protocol.into(),
            server_name: server_name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitiatorPlan {
    pub mechanism: Mechanism,
    pub target: ContextTarget,
    pub native_credential: Option<NativeCredential>,
}

impl InitiatorPlan {
    pub fn mechanism_name(&self) -> &'static str {
        self.mechanism.name()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptorPlan {
    pub mechanism: AcceptorMechanism,
    pub target: ContextTarget,
    pub native_credential: Option<NativeCredential>,
}

impl AcceptorPlan {
    pub fn mechanism_name(&self) -> &'static str {
        self.mechanism.name()
    }
}
