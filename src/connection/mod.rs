pub mod config;
pub mod hal;
pub mod http;

use crate::core::{BoatId, Result};
use async_trait::async_trait;
use config::Credentials;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Collection resource of the boat store
pub const BOATS_RESOURCE: &str = "/api/boats";

/// Resource probed at login to validate credentials
pub const PROFILE_RESOURCE: &str = "/api/profile";

/// Embedded collection key inside the boat list response
pub const BOATS_COLLECTION: &str = "boats";

/// Resource of a single stored boat
pub fn boat_resource(id: BoatId) -> String {
    format!("/boats/{}", id)
}

/// Methods that carry a JSON body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SendMethod {
    Post,
    Put,
    Patch,
}

impl SendMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            SendMethod::Post => "POST",
            SendMethod::Put => "PUT",
            SendMethod::Patch => "PATCH",
        }
    }
}

impl fmt::Display for SendMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Authenticated access to the boat store.
///
/// Every value handed back by an implementation has already had its
/// hypermedia `_links` entries removed, so callers only ever see plain data.
///
/// A non-success answer fails the call: 401 as
/// [`ClientError::Unauthorized`](crate::core::ClientError::Unauthorized),
/// anything else as [`ClientError::Status`](crate::core::ClientError::Status).
/// Nothing is retried.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Authenticated GET returning the parsed body
    async fn fetch_one(&self, resource: &str) -> Result<Value>;

    /// Authenticated request with a JSON body, returning the parsed response
    async fn send(&self, resource: &str, method: SendMethod, body: &Value) -> Result<Value>;

    /// Authenticated DELETE; the response body is ignored
    async fn remove(&self, resource: &str) -> Result<()>;
}

/// Builds candidate transports from user-entered credentials.
///
/// The login flow only gets to hand out what a factory built after a
/// successful probe read.
pub trait TransportFactory: Send + Sync {
    fn build(&self, credentials: &Credentials) -> Result<Arc<dyn Transport>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resources() {
        assert_eq!(boat_resource(7), "/boats/7");
        assert_eq!(BOATS_RESOURCE, "/api/boats");
        assert_eq!(PROFILE_RESOURCE, "/api/profile");
    }

    #[test]
    fn test_send_method_names() {
        assert_eq!(SendMethod::Post.to_string(), "POST");
        assert_eq!(SendMethod::Put.as_str(), "PUT");
        assert_eq!(SendMethod::Patch.as_str(), "PATCH");
    }
}
