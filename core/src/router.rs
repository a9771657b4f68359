//! Stateless request builder for CRUD operations.
//!
//! # Design
//! `Router` holds only its configuration and carries no mutable state
//! between calls. `build` is a pure transformation from an `Operation` to
//! an `HttpRequest`; `send` additionally hands the result to a
//! caller-supplied `Transport`, which owns all network I/O.

use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::encoding::encode_form;
use crate::error::RouterError;
use crate::http::{HttpRequest, HttpResponse};
use crate::operation::{Operation, OperationKind};
use crate::resource::Resource;

/// Timeout attached to built requests unless configured otherwise.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const TIMEOUT_ENV: &str = "RESTROUTE_TIMEOUT_SECS";
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Builder settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Advisory timeout, in seconds, stamped on every request.
    pub timeout_secs: u64,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

impl RouterConfig {
    /// Read `RESTROUTE_TIMEOUT_SECS`, keeping the default when it is unset
    /// or not a number.
    pub fn from_env() -> Self {
        match std::env::var(TIMEOUT_ENV) {
            Ok(raw) => match raw.trim().parse() {
                Ok(timeout_secs) => Self { timeout_secs },
                Err(_) => {
                    warn!(value = %raw, "ignoring invalid {TIMEOUT_ENV}");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Executes built requests. Implemented by the host around its HTTP client.
pub trait Transport {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, RouterError>;
}

/// Builds `HttpRequest` values from CRUD operations.
#[derive(Debug, Clone, Default)]
pub struct Router {
    config: RouterConfig,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: RouterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Build the request for `op`.
    ///
    /// With an `auth_token`, the request carries a bearer `Authorization`
    /// header and a form `Content-Type`; without one it carries no headers.
    /// Create and update send their parameters as a form body.
    pub fn build(&self, op: Operation<'_>, auth_token: Option<&str>) -> Result<HttpRequest, RouterError> {
        let kind = op.kind();
        let resource = op.resource();

        let fragment = path_fragment(&op).inspect_err(|e| warn!(operation = %kind, error = %e, "rejected operation"))?;
        let url = format!("{}{fragment}", resource.base_path());

        let headers = match auth_token {
            Some(token) => vec![
                ("Authorization".to_string(), format!("Bearer {token}")),
                ("Content-Type".to_string(), FORM_CONTENT_TYPE.to_string()),
            ],
            None => Vec::new(),
        };

        let body = match op.params() {
            Some(params) => Some(
                encode_form(params).inspect_err(|e| warn!(operation = %kind, error = %e, "rejected operation"))?,
            ),
            None => None,
        };

        let request = HttpRequest {
            method: kind.method(),
            url,
            headers,
            body,
            timeout: self.config.timeout(),
        };
        debug!(
            operation = %kind,
            method = %request.method,
            url = %request.url,
            authenticated = auth_token.is_some(),
            "built request"
        );
        Ok(request)
    }

    /// Build the request for `op` and execute it through `transport`.
    pub fn send<T: Transport + ?Sized>(
        &self,
        transport: &T,
        op: Operation<'_>,
        auth_token: Option<&str>,
    ) -> Result<HttpResponse, RouterError> {
        let request = self.build(op, auth_token)?;
        let method = request.method;
        let url = request.url.clone();
        let response = transport.send(request)?;
        debug!(%method, %url, status = response.status, "received response");
        Ok(response)
    }
}

/// Build `op` with the default configuration.
pub fn build(op: Operation<'_>, auth_token: Option<&str>) -> Result<HttpRequest, RouterError> {
    Router::new().build(op, auth_token)
}

fn path_fragment(op: &Operation<'_>) -> Result<String, RouterError> {
    let kind = op.kind();
    let resource: &dyn Resource = op.resource();

    if let Some(id) = op.id() {
        if id.is_empty() {
            return Err(RouterError::invalid_resource(kind, "missing identifier"));
        }
    }

    let fragment = match op {
        Operation::Create(..) => resource.create_path(),
        Operation::Read(_, id) => resource.read_path(id),
        Operation::Update(_, id, _) => resource.update_path(id),
        Operation::Destroy(_, id) => resource.destroy_path(id),
    };
    fragment.ok_or_else(|| unsupported(kind))
}

fn unsupported(kind: OperationKind) -> RouterError {
    RouterError::invalid_resource(kind, format!("resource cannot build a {kind} path"))
}
