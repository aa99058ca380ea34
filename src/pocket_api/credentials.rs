use std::fmt;

/// Consumer key and access token pair that authenticates every request.
///
/// Serialized as the two top-level keys `consumer_key` and `access_token`.
#[derive(Clone, PartialEq, Eq, serde::Serialize)]
pub struct Credentials {
    consumer_key: String,
    access_token: String,
}

impl Credentials {
    pub fn new(consumer_key: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            access_token: access_token.into(),
        }
    }

    pub fn consumer_key(&self) -> &str {
        &self.consumer_key
    }
}

// The access token must never end up in log output.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("consumer_key", &self.consumer_key)
            .field("access_token", &"<redacted>")
            .finish()
    }
}
