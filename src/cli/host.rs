//! Hosting execution context
//!
//! The host is what the registry calls its environment: it asserts the
//! acting principal of each request and owns the ordering index. Every
//! request line is one step of the ordering index, whether or not the
//! operation succeeds.

use serde::Deserialize;
use serde_json::{json, Value};

use super::errors::{CliError, CliResult};
use super::io::{error_response, ok_response};
use crate::registry::{CallContext, Principal, RecordFields, Registry, RegistryError, SequenceId};

/// One request line
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Request {
    Register {
        principal: Principal,
        display_name: String,
        byte_size: u64,
        description: String,
        classification_labels: Vec<String>,
    },
    Modify {
        principal: Principal,
        id: SequenceId,
        display_name: String,
        byte_size: u64,
        description: String,
        classification_labels: Vec<String>,
    },
    Transfer {
        principal: Principal,
        id: SequenceId,
        new_owner: Principal,
    },
    Delete {
        principal: Principal,
        id: SequenceId,
    },
    Get {
        id: SequenceId,
    },
}

impl Request {
    pub fn parse(line: &str) -> CliResult<Self> {
        serde_json::from_str(line).map_err(|e| CliError::bad_request(e.to_string()))
    }
}

#[derive(Debug)]
pub struct Host {
    registry: Registry,
    height: u64,
}

impl Host {
    pub fn new(registry: Registry, height: u64) -> Self {
        Self { registry, height }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Current ordering index
    pub fn height(&self) -> u64 {
        self.height
    }

    fn tick(&mut self) -> u64 {
        self.height = self.height.saturating_add(1);
        self.height
    }

    /// Handle one raw request line and return the response envelope.
    pub fn handle_line(&mut self, line: &str) -> Value {
        match Request::parse(line) {
            Ok(request) => {
                let height = self.tick();
                self.dispatch(request, height)
            }
            Err(e) => self.reject_line(&e),
        }
    }

    /// Answer a line that never reached the registry. Still one step of
    /// the ordering index.
    pub fn reject_line(&mut self, err: &CliError) -> Value {
        self.tick();
        error_response(err.code_str(), None, err.message())
    }

    fn dispatch(&self, request: Request, height: u64) -> Value {
        let result = match request {
            Request::Register {
                principal,
                display_name,
                byte_size,
                description,
                classification_labels,
            } => {
                let ctx = CallContext::new(principal, height);
                let fields =
                    RecordFields::new(display_name, byte_size, description, classification_labels);
                self.registry
                    .register(fields, &ctx)
                    .map(|id| json!({ "id": id }))
            }
            Request::Modify {
                principal,
                id,
                display_name,
                byte_size,
                description,
                classification_labels,
            } => {
                let ctx = CallContext::new(principal, height);
                let fields =
                    RecordFields::new(display_name, byte_size, description, classification_labels);
                self.registry.modify(id, fields, &ctx).map(|()| json!(true))
            }
            Request::Transfer {
                principal,
                id,
                new_owner,
            } => {
                let ctx = CallContext::new(principal, height);
                self.registry
                    .transfer(id, new_owner, &ctx)
                    .map(|()| json!(true))
            }
            Request::Delete { principal, id } => {
                let ctx = CallContext::new(principal, height);
                self.registry.delete(id, &ctx).map(|()| json!(true))
            }
            Request::Get { id } => self.registry.get(id).and_then(|record| {
                serde_json::to_value(record).map_err(|e| RegistryError::Internal(e.to_string()))
            }),
        };

        match result {
            Ok(data) => ok_response(data),
            Err(e) => error_response(e.code(), Some(e.numeric_code()), &e.to_string()),
        }
    }
}
