//! Scripted transport doubles for the session unit tests.

use crate::connection::config::Credentials;
use crate::connection::{SendMethod, Transport, TransportFactory};
use crate::core::{ClientError, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub method: &'static str,
    pub resource: String,
    pub body: Option<Value>,
}

/// Answers calls from a queue of prepared results and records every call
#[derive(Default)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<Value>>>,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, value: Value) {
        self.responses.lock().unwrap().push_back(Ok(value));
    }

    pub fn fail(&self, error: ClientError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn answer(&self, method: &'static str, resource: &str, body: Option<Value>) -> Result<Value> {
        self.calls.lock().unwrap().push(Call {
            method,
            resource: resource.to_string(),
            body,
        });
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(Value::Null))
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn fetch_one(&self, resource: &str) -> Result<Value> {
        self.answer("GET", resource, None)
    }

    async fn send(&self, resource: &str, method: SendMethod, body: &Value) -> Result<Value> {
        self.answer(method.as_str(), resource, Some(body.clone()))
    }

    async fn remove(&self, resource: &str) -> Result<()> {
        self.answer("DELETE", resource, None).map(|_| ())
    }
}

/// Hands out one shared scripted transport and remembers the credentials used
pub struct ScriptedFactory {
    pub transport: Arc<ScriptedTransport>,
    pub built_with: Mutex<Vec<Credentials>>,
}

impl ScriptedFactory {
    pub fn new(transport: Arc<ScriptedTransport>) -> Arc<Self> {
        Arc::new(Self {
            transport,
            built_with: Mutex::new(Vec::new()),
        })
    }
}

impl TransportFactory for ScriptedFactory {
    fn build(&self, credentials: &Credentials) -> Result<Arc<dyn Transport>> {
        self.built_with.lock().unwrap().push(credentials.clone());
        Ok(self.transport.clone())
    }
}
