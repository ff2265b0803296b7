//! Navigation and listing engine for a remote file store.
//!
//! This crate provides:
//! - [`PathStack`] - Current location as validated path segments
//! - [`build_trail`] - Clickable breadcrumbs derived from a location
//! - [`ListingClient`] - Fetches and parses directory snapshots
//! - [`MutationDispatcher`] - Move, copy, remove, mkdir and upload requests
//! - [`Session`], [`Explorer`] - UI-facing state with stale-result guards
//!
//! Network access goes through the [`Transport`] trait so the engine runs
//! the same against the browser's fetch API and the in-memory mock.

mod backend;
pub mod breadcrumb;
pub mod config;
pub mod error;
mod explorer;
pub mod format;
mod listing;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
mod mutation;
pub mod path;
mod session;
pub mod transport;

pub use breadcrumb::{Breadcrumb, BreadcrumbTrail, HOME_LABEL, build_trail};
pub use config::{ApiConfig, Endpoint};
pub use error::{ClientError, Failure, PathError, TransportError};
pub use explorer::{Explorer, Intent, Outcome};
pub use format::{EntryRow, entry_rows, format_modified, format_size};
pub use listing::{DirectoryEntry, DirectorySnapshot, DownloadedFile, EntryKind, ListingClient};
pub use mutation::{Mutation, MutationDispatcher, MutationKind, require_confirmation, require_name};
pub use path::PathStack;
pub use session::{ListingTicket, Navigation, Notice, RefreshOutcome, Session};
pub use transport::{
    ApiRequest, ApiResponse, AuthProvider, Method, NoAuth, RequestBody, StaticToken, Transport,
    TransportFuture, bearer,
};
