//! Request builder mapping CRUD operations onto HTTP requests.
//!
//! # Overview
//! Turns an [`Operation`] (create, read, update or destroy against a
//! [`Resource`]) into an [`HttpRequest`] without touching the network. The
//! caller, or a [`Transport`] it supplies, executes the actual round-trip.
//!
//! # Design
//! - `Router` is stateless. It holds only its `RouterConfig`, so a single
//!   value can be shared across threads and called concurrently.
//! - The HTTP verb is a pure function of the operation kind. The URL is the
//!   resource's base path followed by the fragment the resource builds for
//!   that kind.
//! - Credentials are passed explicitly on every call; nothing is read from
//!   ambient state.

pub mod encoding;
pub mod error;
pub mod http;
pub mod operation;
pub mod resource;
pub mod router;

pub use error::RouterError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use operation::{Operation, OperationKind, Params};
pub use resource::{Resource, RestResource};
pub use router::{build, Router, RouterConfig, Transport, DEFAULT_TIMEOUT};
