//! Listing client: location in, directory snapshot out.
//!
//! The backend answers a listing request with
//!
//! ```json
//! { "files": [{ "name": "a.txt", "size": 1500, "last_modified": 0 }],
//!   "directories": [{ "name": "sub" }] }
//! ```
//!
//! `directories` is the canonical field name. Older servers send `dirs`, and
//! older still send bare names instead of objects; both are accepted.

use std::rc::Rc;

use log::{debug, warn};
use serde::Deserialize;

use crate::backend::Backend;
use crate::config::{ApiConfig, Endpoint};
use crate::error::{ClientError, Failure};
use crate::path::{PathStack, validate_segment};
use crate::transport::{ApiRequest, AuthProvider, Transport};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntryKind {
    Directory,
    File,
}

/// A file or subdirectory inside a snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DirectoryEntry {
    /// Single segment, never a full path
    pub name: String,
    pub kind: EntryKind,
    /// Size in bytes; files only
    pub size: Option<u64>,
    /// Seconds since epoch; `None` means never modified / unknown
    pub last_modified: Option<u64>,
}

impl DirectoryEntry {
    pub fn file(name: impl Into<String>, size: u64, last_modified: u64) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::File,
            size: Some(size),
            last_modified: (last_modified > 0).then_some(last_modified),
        }
    }

    pub fn directory(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::Directory,
            size: None,
            last_modified: None,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

/// Result of one listing fetch for one location.
///
/// Immutable; a refresh replaces it wholesale.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DirectorySnapshot {
    location: PathStack,
    files: Vec<DirectoryEntry>,
    directories: Vec<DirectoryEntry>,
}

impl DirectorySnapshot {
    pub fn new(
        location: PathStack,
        files: Vec<DirectoryEntry>,
        directories: Vec<DirectoryEntry>,
    ) -> Self {
        Self {
            location,
            files,
            directories,
        }
    }

    /// Location this snapshot was fetched for.
    pub fn location(&self) -> &PathStack {
        &self.location
    }

    pub fn files(&self) -> &[DirectoryEntry] {
        &self.files
    }

    pub fn directories(&self) -> &[DirectoryEntry] {
        &self.directories
    }

    /// Directories, then files.
    pub fn entries(&self) -> impl Iterator<Item = &DirectoryEntry> {
        self.directories.iter().chain(self.files.iter())
    }

    pub fn find(&self, name: &str) -> Option<&DirectoryEntry> {
        self.entries().find(|e| e.name == name)
    }

    pub fn len(&self) -> usize {
        self.files.len() + self.directories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Parse a listing response body for `location`.
    pub fn from_json(location: PathStack, body: &[u8]) -> Result<Self, String> {
        let listing: ListingBody = serde_json::from_slice(body).map_err(|e| e.to_string())?;

        let files = listing
            .files
            .into_iter()
            .map(WireFile::into_entry)
            .collect::<Vec<_>>();
        let directories = listing
            .directories
            .into_iter()
            .map(WireDirectory::into_entry)
            .collect::<Vec<_>>();

        for entry in files.iter().chain(directories.iter()) {
            validate_segment(&entry.name)
                .map_err(|e| format!("bad entry name from server: {}", e))?;
        }

        Ok(Self::new(location, files, directories))
    }
}

// =============================================================================
// Wire Format
// =============================================================================

#[derive(Deserialize)]
struct ListingBody {
    files: Vec<WireFile>,
    #[serde(alias = "dirs")]
    directories: Vec<WireDirectory>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireFile {
    Detailed {
        name: String,
        #[serde(default)]
        size: u64,
        #[serde(default)]
        last_modified: u64,
    },
    Bare(String),
}

impl WireFile {
    fn into_entry(self) -> DirectoryEntry {
        match self {
            Self::Detailed {
                name,
                size,
                last_modified,
            } => DirectoryEntry::file(name, size, last_modified),
            Self::Bare(name) => DirectoryEntry::file(name, 0, 0),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireDirectory {
    Detailed {
        name: String,
        #[serde(default)]
        last_modified: u64,
    },
    Bare(String),
}

impl WireDirectory {
    fn into_entry(self) -> DirectoryEntry {
        match self {
            Self::Detailed {
                name,
                last_modified,
            } => DirectoryEntry {
                last_modified: (last_modified > 0).then_some(last_modified),
                ..DirectoryEntry::directory(name)
            },
            Self::Bare(name) => DirectoryEntry::directory(name),
        }
    }
}

// =============================================================================
// Client
// =============================================================================

/// Downloaded file contents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DownloadedFile {
    /// File name for the local save action
    pub name: String,
    pub path: PathStack,
    pub bytes: Vec<u8>,
}

/// Read side of the backend: listings and downloads.
pub struct ListingClient<T, A> {
    backend: Rc<Backend<T, A>>,
}

impl<T, A> Clone for ListingClient<T, A> {
    fn clone(&self) -> Self {
        Self {
            backend: Rc::clone(&self.backend),
        }
    }
}

impl<T: Transport, A: AuthProvider> ListingClient<T, A> {
    pub fn new(transport: T, auth: A, config: ApiConfig) -> Self {
        Self::from_backend(Rc::new(Backend::new(transport, auth, config)))
    }

    pub(crate) fn from_backend(backend: Rc<Backend<T, A>>) -> Self {
        Self { backend }
    }

    /// Fetch the listing for `stack`.
    ///
    /// No retry and no cancellation; callers discard results that arrive
    /// after the user has moved on.
    pub async fn fetch_listing(&self, stack: &PathStack) -> Result<DirectorySnapshot, ClientError> {
        let url = self
            .backend
            .config()
            .url_with_path(Endpoint::List, &stack.encoded());

        let response = self
            .backend
            .send(ApiRequest::get(url))
            .await
            .map_err(|e| ClientError::ListingFailed(e.into()))?;

        if !response.is_success() {
            warn!("listing '{}' failed with HTTP {}", stack, response.status);
            return Err(ClientError::ListingFailed(Failure::http(
                response.status,
                response.text(),
            )));
        }

        let snapshot = DirectorySnapshot::from_json(stack.clone(), &response.body).map_err(|e| {
            warn!("listing '{}' unparsable: {}", stack, e);
            ClientError::ListingFailed(Failure::http(response.status, response.text()))
        })?;

        debug!(
            "listing '{}': {} files, {} directories",
            stack,
            snapshot.files().len(),
            snapshot.directories().len()
        );
        Ok(snapshot)
    }

    /// Download `name` from `location`.
    pub async fn download(
        &self,
        location: &PathStack,
        name: &str,
    ) -> Result<DownloadedFile, ClientError> {
        let path = location.child(name)?;
        let url = self
            .backend
            .config()
            .url_with_path(Endpoint::Get, &path.encoded());

        let response = self
            .backend
            .send(ApiRequest::get(url))
            .await
            .map_err(|e| ClientError::DownloadFailed(e.into()))?;

        if !response.is_success() {
            return Err(ClientError::DownloadFailed(Failure::http(
                response.status,
                response.text(),
            )));
        }

        Ok(DownloadedFile {
            name: path.name().unwrap_or(name).to_string(),
            path,
            bytes: response.body,
        })
    }
}
