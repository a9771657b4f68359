//! The CRUD operation handed to the builder.
//!
//! # Design
//! An `Operation` is constructed right before dispatch and consumed by a
//! single `Router::build` call. It borrows its resource as `&dyn Resource`
//! so callers can mix resource types freely.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::error::RouterError;
use crate::http::HttpMethod;
use crate::resource::Resource;

/// Request parameters keyed by name. Sorted keys keep encoded bodies stable.
pub type Params = BTreeMap<String, serde_json::Value>;

/// A single CRUD operation against a resource.
pub enum Operation<'a> {
    Create(&'a dyn Resource, Params),
    Read(&'a dyn Resource, String),
    Update(&'a dyn Resource, String, Params),
    Destroy(&'a dyn Resource, String),
}

/// The tag of an `Operation`, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Create,
    Read,
    Update,
    Destroy,
}

impl OperationKind {
    /// Fixed verb for each kind.
    pub fn method(&self) -> HttpMethod {
        match self {
            OperationKind::Create => HttpMethod::Post,
            OperationKind::Read => HttpMethod::Get,
            OperationKind::Update => HttpMethod::Put,
            OperationKind::Destroy => HttpMethod::Delete,
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OperationKind::Create => "create",
            OperationKind::Read => "read",
            OperationKind::Update => "update",
            OperationKind::Destroy => "destroy",
        };
        f.write_str(name)
    }
}

impl<'a> Operation<'a> {
    /// Create from any serializable payload whose JSON form is an object.
    pub fn create_from<T: Serialize>(resource: &'a dyn Resource, payload: &T) -> Result<Self, RouterError> {
        Ok(Operation::Create(resource, to_params(payload)?))
    }

    /// Update from any serializable payload whose JSON form is an object.
    pub fn update_from<T: Serialize>(
        resource: &'a dyn Resource,
        id: &str,
        payload: &T,
    ) -> Result<Self, RouterError> {
        Ok(Operation::Update(resource, id.to_string(), to_params(payload)?))
    }

    pub fn kind(&self) -> OperationKind {
        match self {
            Operation::Create(..) => OperationKind::Create,
            Operation::Read(..) => OperationKind::Read,
            Operation::Update(..) => OperationKind::Update,
            Operation::Destroy(..) => OperationKind::Destroy,
        }
    }

    pub fn resource(&self) -> &'a dyn Resource {
        match *self {
            Operation::Create(resource, _)
            | Operation::Read(resource, _)
            | Operation::Update(resource, _, _)
            | Operation::Destroy(resource, _) => resource,
        }
    }

    /// Identifier carried by read, update and destroy.
    pub fn id(&self) -> Option<&str> {
        match self {
            Operation::Create(..) => None,
            Operation::Read(_, id) | Operation::Update(_, id, _) | Operation::Destroy(_, id) => Some(id.as_str()),
        }
    }

    /// Parameters carried by create and update.
    pub fn params(&self) -> Option<&Params> {
        match self {
            Operation::Create(_, params) | Operation::Update(_, _, params) => Some(params),
            Operation::Read(..) | Operation::Destroy(..) => None,
        }
    }
}

impl fmt::Debug for Operation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operation")
            .field("kind", &self.kind())
            .field("base_path", &self.resource().base_path())
            .field("id", &self.id())
            .field("params", &self.params())
            .finish()
    }
}

fn to_params<T: Serialize>(payload: &T) -> Result<Params, RouterError> {
    match serde_json::to_value(payload) {
        Ok(serde_json::Value::Object(map)) => Ok(map.into_iter().collect()),
        Ok(other) => Err(RouterError::EncodingError(format!(
            "parameters must be an object, got {}",
            json_type(&other)
        ))),
        Err(e) => Err(RouterError::EncodingError(e.to_string())),
    }
}

pub(crate) fn json_type(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
