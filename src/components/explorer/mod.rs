//! File explorer UI components.
//!
//! Components:
//! - [`Explorer`] - Main explorer view
//! - [`Header`] - Location title, navigation and folder actions
//! - [`FileList`] - Entries of the current directory with row actions
//! - [`PathBar`] - Breadcrumb trail

#[allow(clippy::module_inception)]
mod explorer;
mod file_list;
mod header;
mod pathbar;

pub use explorer::Explorer;
pub use file_list::FileList;
pub use header::Header;
pub use pathbar::PathBar;
