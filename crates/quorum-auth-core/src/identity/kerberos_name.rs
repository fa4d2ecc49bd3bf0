use std::fmt;
use std::str::FromStr;

use crate::identity::IdentityError;

/// A principal of the form `primary[/instance]@REALM`.
///
/// Parsing splits on the first `@` and then on the first `/` of what precedes
/// it. A name without a realm is rejected rather than guessed at.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KerberosName {
    service_name: String,
    host_name: Option<String>,
    realm: String,
}

impl KerberosName {
    pub fn parse(name: &str) -> Result<Self, IdentityError> {
        let (primary_and_host, realm) = name
            .split_once('@')
            .ok_or_else(|| IdentityError::MissingRealm(name.to_owned()))?;

        let (primary, host) = match primary_and_host.split_once('/') {
            Some((primary, host)) => (primary, Some(host)),
            None => (primary_and_host, None),
        };

        if primary.is_empty() || realm.is_empty() || host.is_some_and(str::is_empty) {
            return Err(IdentityError::EmptyComponent(name.to_owned()));
        }

        let stray = |s: &str| s.contains('/') || s.contains('@');
        if stray(realm) || host.is_some_and(stray) {
            return Err(IdentityError::StraySeparator(name.to_owned()));
        }

        Ok(Self {
            service_name: primary.to_owned(),
            host_name: host.map(str::to_owned),
            realm: realm.to_owned(),
        })
    }

    /// Parse a service identity, which must name its host:
    /// `service/host@REALM`.
    pub fn parse_service(name: &str) -> Result<Self, IdentityError> {
        let parsed = Self::parse(name)?;
        if parsed.host_name.is_none() {
            return Err(IdentityError::MissingInstance(name.to_owned()));
        }
        Ok(parsed)
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    pub fn host_name(&self) -> Option<&str> {
        self.host_name.as_deref()
    }

    pub fn realm(&self) -> &str {
        &self.realm
    }
}

impl fmt::Display for KerberosName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.service_name)?;
        if let Some(host) = &self.host_name {
            write!(f, "/{host}")?;
        }
        write!(f, "@{}", self.realm)
    }
}

impl FromStr for KerberosName {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
