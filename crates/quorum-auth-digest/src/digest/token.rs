use quorum_auth_core::context::ContextError;

// Digest tokens are `key=value` pairs joined by commas; values may be quoted.
// Quoted values never contain quotes or commas, which keeps parsing trivial.
#[derive(Debug, Default)]
pub(crate) struct Directives {
    pairs: Vec<(String, String)>,
}

impl Directives {
    pub(crate) fn parse(input: &[u8]) -> Result<Self, ContextError> {
        let text = std::str::from_utf8(input)
            .map_err(|_| ContextError::Evaluation("token is not valid UTF-8".into()))?;

        let mut pairs = Vec::new();
        for part in text.split(',').filter(|p| !p.trim().is_empty()) {
            let (key, value) = part
                .split_once('=')
                .ok_or_else(|| ContextError::Evaluation(format!("malformed directive {part:?}")))?;
            let value = value.trim();
            let value = value
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .unwrap_or(value);
            pairs.push((key.trim().to_owned(), value.to_owned()));
        }
        Ok(Self { pairs })
    }

    pub(crate) fn get(&self, key: &str) -> Result<&str, ContextError> {
        let mut found = self.pairs.iter().filter(|(k, _)| k == key);
        match (found.next(), found.next()) {
            (Some((_, v)), None) if !v.is_empty() => Ok(v),
            (Some(_), Some(_)) => Err(ContextError::Evaluation(format!("duplicate directive {key:?}"))),
            _ => Err(ContextError::Evaluation(format!("missing directive {key:?}"))),
        }
    }

    pub(crate) fn get_hex(&self, key: &str) -> Result<Vec<u8>, ContextError> {
        hex::decode(self.get(key)?)
            .map_err(|_| ContextError::Evaluation(format!("directive {key:?} is not hex")))
    }
}

#[derive(Debug, Default)]
pub(crate) struct TokenWriter {
    out: String,
}

impl TokenWriter {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn quoted(self, key: &str, value: &str) -> Self {
        self.push(key, &format!("\"{value}\""))
    }

    pub(crate) fn plain(self, key: &str, value: &str) -> Self {
        self.push(key, value)
    }

    pub(crate) fn finish(self) -> Vec<u8> {
        self.out.into_bytes()
    }

    fn push(mut self, key: &str, value: &str) -> Self {
        if !self.out.is_empty() {
            self.out.push(',');
        }
        self.out.push_str(key);
        self.out.push('=');
        self.out.push_str(value);
        self
    }
}

// Characters that would break the token grammar.
pub(crate) fn is_token_safe(value: &str) -> bool {
    !value.is_empty() && !value.contains(['"', ','])
}
