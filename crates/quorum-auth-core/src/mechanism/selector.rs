use tracing::{info, warn};

use crate::{
    config::QuorumAuthConfig,
    context::ContextError,
    credential::{Credential, CredentialError},
    identity::KerberosName,
    mechanism::{
        AcceptorMechanism, AcceptorPlan, ContextTarget, InitiatorPlan, Mechanism, NativeCredential,
        NativeTicketSource, SelectionError, SHARED_SECRET_PROTOCOL, SHARED_SECRET_REALM,
    },
};

/// Picks the mechanism and identity strings for one side of a handshake from
/// the credential material that side logged in with.
///
/// A login holding principals selects the ticket mechanism, anything else the
/// shared-secret mechanism. Exactly one mechanism is ever offered.
pub struct MechanismSelector<'a> {
    config: &'a QuorumAuthConfig,
    native: &'a dyn NativeTicketSource,
}

impl<'a> MechanismSelector<'a> {
    pub fn new(config: &'a QuorumAuthConfig, native: &'a dyn NativeTicketSource) -> Self {
        Self { config, native }
    }

    pub fn select_initiator(&self, credential: &Credential) -> Result<InitiatorPlan, SelectionError> {
        let Some(principal) = credential.principals().first() else {
            info!("initiator will use shared-secret mechanism");
            let (username, password) = match (
                credential.public_credentials(),
                credential.private_credentials(),
            ) {
                ([username], [password]) => (username.clone(), password.clone()),
                ([_], passwords) => return Err(CredentialError::Password(passwords.len()).into()),
                (usernames, _) => return Err(CredentialError::Username(usernames.len()).into()),
            };

            return Ok(InitiatorPlan {
                mechanism: Mechanism::SharedSecret { username, password },
                target: ContextTarget::new(SHARED_SECRET_PROTOCOL, SHARED_SECRET_REALM),
                native_credential: None,
            });
        };

        let client = KerberosName::parse(principal)?;

        // Peers share a realm unless told otherwise.
        let server_realm = self
            .config
            .server_realm
            .as_deref()
            .unwrap_or(client.realm());
        info!(server_realm, "initiator will use ticket mechanism");

        let service = KerberosName::parse_service(&format!(
            "{}@{}",
            self.config.service_principal, server_realm
        ))?;
        let host = service.host_name().unwrap_or_default();
        info!(
            client = %client,
            service = service.service_name(),
            service_host = host,
            "resolved ticket identities"
        );

        let target = ContextTarget::new(service.service_name(), host);
        let native_credential = self.native_credential(|| self.native.initiator_credential());

        Ok(InitiatorPlan {
            mechanism: Mechanism::Ticket(client),
            target,
            native_credential,
        })
    }

    pub fn select_acceptor(&self, credential: &Credential) -> Result<AcceptorPlan, SelectionError> {
        let Some(principal) = credential.principals().first() else {
            info!("acceptor will use shared-secret mechanism");
            return Ok(AcceptorPlan {
                mechanism: AcceptorMechanism::SharedSecret,
                target: ContextTarget::new(SHARED_SECRET_PROTOCOL, SHARED_SECRET_REALM),
                native_credential: None,
            });
        };

        // e.g. "zookeeper/myhost.foo.com@FOO.COM"
        let service = KerberosName::parse_service(principal)?;
        let host = service.host_name().unwrap_or_default().to_owned();
        info!(
            service = service.service_name(),
            service_host = %host,
            "acceptor will use ticket mechanism"
        );

        let target = ContextTarget::new(service.service_name(), host.clone());
        let native_credential = self.native_credential(|| {
            self.native
                .acceptor_credential(service.service_name(), &host)
        });

        Ok(AcceptorPlan {
            mechanism: AcceptorMechanism::Ticket(service),
            target,
            native_credential,
        })
    }

    // Native credentials are an optional extra; their absence is never fatal.
    fn native_credential(
        &self,
        acquire: impl FnOnce() -> Result<Option<NativeCredential>, ContextError>,
    ) -> Option<NativeCredential> {
        if !self.config.native_tickets {
            return None;
        }
        match acquire() {
            Ok(Some(credential)) => Some(credential),
            Ok(None) => {
                warn!("native ticket-granting credentials requested but not supported here");
                None
            }
            Err(e) => {
                warn!(error = %e, "could not acquire native ticket-granting credential");
                None
            }
        }
    }
}
