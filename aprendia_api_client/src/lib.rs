//! An async client for the Aprendia content-generation backend.
//!
//! The client is deliberately single-threaded ([`Rc`](std::rc::Rc)-shared server handle, futures
//! that are not `Send`): it is driven from the same event loop as the study session.

pub mod api;
mod clients;
mod errors;
pub(crate) mod macros;
pub(crate) mod request;
mod response;
mod server;

pub use clients::*;
pub use errors::*;
pub use response::ServerResponse;
pub use server::*;
