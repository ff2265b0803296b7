//! Browser glue for the engine.
//!
//! Provides:
//! - [`FetchTransport`] - Engine transport over the Fetch API
//! - [`StorageAuth`] - Bearer token read from localStorage
//! - [`save_bytes`] - Hand downloaded bytes to the browser as a file
//! - [`logging::init`] - Route the `log` facade to the browser console

mod auth;
pub mod dom;
mod download;
mod fetch;
pub mod logging;

pub use auth::StorageAuth;
pub use download::save_bytes;
pub use fetch::FetchTransport;
