//! Caller identity value object.

use std::fmt;

/// Stable identifier of the authenticated user making a request.
///
/// Resolved once per request by the identity provider and passed
/// explicitly into every contact operation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CallerId(String);

impl CallerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CallerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CallerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for CallerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<CallerId> for String {
    fn from(caller: CallerId) -> Self {
        caller.0
    }
}
