use std::fmt;

/// API secret and key as issued for an account.
///
/// Both values are opaque and are not validated here; an empty secret signs
/// just as well as any other.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    secret: String,
    api_key: String,
}

impl Credentials {
    pub fn new(secret: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            api_key: api_key.into(),
        }
    }

    #[must_use]
    pub fn secret(&self) -> &str {
        &self.secret
    }

    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("secret", &"<redacted>")
            .field("api_key", &self.api_key)
            .finish()
    }
}
