use crate::connection::config::Credentials;
use crate::connection::{PROFILE_RESOURCE, Transport, TransportFactory};
use crate::core::Result;
use std::sync::Arc;
use tracing::{info, warn};

/// Shown after the store rejected the entered credentials
pub const UNAUTHORIZED_MESSAGE: &str =
    "Invalid username or password. Try with admin and hunter2";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginState {
    Ready,
    Busy,
    Unauthorized,
}

/// Login form state machine.
///
/// A transport only leaves this flow after it completed one authenticated
/// read of the profile resource.
pub struct LoginFlow {
    factory: Arc<dyn TransportFactory>,
    username: String,
    password: String,
    state: LoginState,
}

impl LoginFlow {
    pub fn new(factory: Arc<dyn TransportFactory>, prefill: Credentials) -> Self {
        Self {
            factory,
            username: prefill.username,
            password: prefill.password,
            state: LoginState::Ready,
        }
    }

    pub fn state(&self) -> LoginState {
        self.state
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn factory(&self) -> Arc<dyn TransportFactory> {
        self.factory.clone()
    }

    pub fn set_username(&mut self, username: impl Into<String>) {
        if self.state != LoginState::Busy {
            self.username = username.into();
        }
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        if self.state != LoginState::Busy {
            self.password = password.into();
        }
    }

    /// Goes busy and hands out the credentials to probe.
    /// Returns `None` if a probe is already running.
    pub fn begin(&mut self) -> Option<Credentials> {
        if self.state == LoginState::Busy {
            return None;
        }
        self.state = LoginState::Busy;
        Some(Credentials::new(&self.username, &self.password))
    }

    /// Builds a candidate transport and performs the probe read
    pub async fn probe(
        factory: &dyn TransportFactory,
        credentials: &Credentials,
    ) -> Result<Arc<dyn Transport>> {
        let transport = factory.build(credentials)?;
        transport.fetch_one(PROFILE_RESOURCE).await?;
        Ok(transport)
    }

    /// Applies a probe outcome.
    ///
    /// `Ok(Some(_))` carries the validated transport, `Ok(None)` means the
    /// credentials were rejected and the form is usable again. Any other
    /// failure is returned to the caller.
    pub fn finish(
        &mut self,
        outcome: Result<Arc<dyn Transport>>,
    ) -> Result<Option<Arc<dyn Transport>>> {
        match outcome {
            Ok(transport) => {
                info!(username = %self.username, "login accepted");
                self.state = LoginState::Ready;
                Ok(Some(transport))
            }
            Err(err) if err.is_unauthorized() => {
                warn!(username = %self.username, "login rejected");
                self.state = LoginState::Unauthorized;
                Ok(None)
            }
            Err(err) => {
                self.state = LoginState::Ready;
                Err(err)
            }
        }
    }

    /// [`begin`](Self::begin), [`probe`](Self::probe) and
    /// [`finish`](Self::finish) in one go
    pub async fn submit(&mut self) -> Result<Option<Arc<dyn Transport>>> {
        let Some(credentials) = self.begin() else {
            return Ok(None);
        };
        let outcome = Self::probe(self.factory.as_ref(), &credentials).await;
        self.finish(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ClientError;
    use crate::session::testing::{ScriptedFactory, ScriptedTransport};
    use serde_json::json;

    fn flow(transport: &Arc<ScriptedTransport>) -> (LoginFlow, Arc<ScriptedFactory>) {
        let factory = ScriptedFactory::new(transport.clone());
        let flow = LoginFlow::new(factory.clone(), Credentials::new("admin", "hunter2"));
        (flow, factory)
    }

    #[tokio::test]
    async fn test_valid_credentials_emit_transport() {
        let transport = ScriptedTransport::new();
        transport.respond(json!({}));
        let (mut flow, factory) = flow(&transport);

        let emitted = flow.submit().await.unwrap();

        assert!(emitted.is_some());
        assert_eq!(flow.state(), LoginState::Ready);
        assert_eq!(transport.calls()[0].resource, "/api/profile");
        assert_eq!(transport.calls()[0].method, "GET");
        assert_eq!(
            factory.built_with.lock().unwrap()[0],
            Credentials::new("admin", "hunter2")
        );
    }

    #[tokio::test]
    async fn test_unauthorized_keeps_form_interactive() {
        let transport = ScriptedTransport::new();
        transport.fail(ClientError::Unauthorized);
        let (mut flow, _) = flow(&transport);
        flow.set_password("wrong");

        let emitted = flow.submit().await.unwrap();

        assert!(emitted.is_none());
        assert_eq!(flow.state(), LoginState::Unauthorized);

        // The user may edit and resubmit.
        flow.set_password("hunter2");
        assert_eq!(flow.password(), "hunter2");
        transport.respond(json!({}));
        assert!(flow.submit().await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_other_failures_propagate() {
        let transport = ScriptedTransport::new();
        transport.fail(ClientError::Status {
            resource: "/api/profile".into(),
            status: 503,
            body: String::new(),
        });
        let (mut flow, _) = flow(&transport);

        let result = flow.submit().await;

        assert!(matches!(result, Err(ClientError::Status { status: 503, .. })));
        assert_eq!(flow.state(), LoginState::Ready);
    }

    #[tokio::test]
    async fn test_busy_ignores_edits_and_resubmits() {
        let transport = ScriptedTransport::new();
        let (mut flow, _) = flow(&transport);

        let credentials = flow.begin().unwrap();
        assert_eq!(flow.state(), LoginState::Busy);
        assert!(flow.begin().is_none());

        flow.set_username("someone-else");
        assert_eq!(flow.username(), "admin");

        transport.respond(json!({}));
        let outcome = LoginFlow::probe(flow.factory().as_ref(), &credentials).await;
        assert!(flow.finish(outcome).unwrap().is_some());
    }
}
