//! Navigation session state.
//!
//! [`Session`] owns the current [`PathStack`] and everything keyed by it:
//! the last applied snapshot, the loading flag and the error notice. All
//! changes go through its methods on the UI event loop.
//!
//! Listing fetches are not cancelled when the user navigates away. Each fetch
//! carries a [`ListingTicket`] naming the location it was issued for, and a
//! result whose ticket no longer matches the current location is dropped.

use log::{info, warn};

use crate::breadcrumb::{BreadcrumbTrail, build_trail};
use crate::error::{ClientError, PathError};
use crate::listing::DirectorySnapshot;
use crate::path::PathStack;

/// Location changes the user can ask for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Navigation {
    /// Enter a subdirectory of the current location
    EnterDirectory(String),
    /// Leave one level; stays at root when already there
    GoUp,
    /// Breadcrumb jump: keep the first `n` segments
    JumpToDepth(usize),
    /// Go straight to a location
    Load(PathStack),
}

/// Tag of an in-flight listing fetch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListingTicket {
    location: PathStack,
}

impl ListingTicket {
    pub fn location(&self) -> &PathStack {
        &self.location
    }
}

/// What happened to a finished listing fetch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The snapshot replaced the displayed one
    Applied,
    /// The user had moved elsewhere; the result was dropped
    Discarded,
}

/// Error indicator shown to the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    /// Increases with every notice so the UI can dismiss the right one
    pub id: u64,
    pub message: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    location: PathStack,
    snapshot: Option<DirectorySnapshot>,
    loading: bool,
    notice: Option<Notice>,
    notices_raised: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Session starting at `location`.
    pub fn at(location: PathStack) -> Self {
        Self {
            location,
            ..Self::default()
        }
    }

    pub fn location(&self) -> &PathStack {
        &self.location
    }

    /// Breadcrumb trail for the current location, rebuilt on every call.
    pub fn trail(&self) -> BreadcrumbTrail {
        build_trail(&self.location)
    }

    /// Last applied snapshot. It may belong to a previous location while a
    /// fetch for the current one is in flight.
    pub fn snapshot(&self) -> Option<&DirectorySnapshot> {
        self.snapshot.as_ref()
    }

    /// Whether the displayed snapshot was fetched for the current location.
    pub fn is_current(&self) -> bool {
        self.snapshot
            .as_ref()
            .is_some_and(|s| s.location() == &self.location)
    }

    /// Location that row actions resolve against.
    ///
    /// Rows always name entries of the displayed snapshot, so they are only
    /// actionable while that snapshot belongs to the current location.
    pub fn row_location(&self) -> Result<&PathStack, ClientError> {
        if self.is_current() {
            Ok(&self.location)
        } else {
            Err(ClientError::ValidationRejected(format!(
                "listing for '{}' is not loaded",
                self.location
            )))
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Apply a navigation. Returns whether the location changed.
    ///
    /// Invalid directory names are rejected and leave the location as is.
    pub fn navigate(&mut self, navigation: Navigation) -> Result<bool, PathError> {
        let before = self.location.clone();
        match navigation {
            Navigation::EnterDirectory(name) => self.location.push(&name)?,
            Navigation::GoUp => {
                self.location.pop();
            }
            Navigation::JumpToDepth(depth) => self.location.truncate(depth),
            Navigation::Load(location) => self.location = location,
        }
        Ok(self.location != before)
    }

    /// Start a listing fetch for the current location.
    pub fn begin_refresh(&mut self) -> ListingTicket {
        self.loading = true;
        ListingTicket {
            location: self.location.clone(),
        }
    }

    /// Finish the fetch tagged `ticket`.
    ///
    /// A stale ticket is discarded whatever its result. A failure leaves the
    /// previous snapshot in place and raises a notice.
    pub fn finish_refresh(
        &mut self,
        ticket: ListingTicket,
        result: Result<DirectorySnapshot, ClientError>,
    ) -> Result<RefreshOutcome, ClientError> {
        if ticket.location != self.location {
            warn!(
                "discarding listing for '{}', now at '{}'",
                ticket.location, self.location
            );
            return Ok(RefreshOutcome::Discarded);
        }

        self.loading = false;
        match result {
            Ok(snapshot) => {
                info!("showing '{}' ({} entries)", ticket.location, snapshot.len());
                self.snapshot = Some(snapshot);
                Ok(RefreshOutcome::Applied)
            }
            Err(err) => {
                self.record_failure(&err);
                Err(err)
            }
        }
    }

    /// Raise the error indicator for `err`. Declined prompts stay silent.
    pub fn record_failure(&mut self, err: &ClientError) {
        if !err.is_reportable() {
            return;
        }
        warn!("{}", err);
        self.notices_raised += 1;
        self.notice = Some(Notice {
            id: self.notices_raised,
            message: err.to_string(),
        });
    }

    /// Clear notice `id` if it is still the one shown.
    pub fn dismiss_notice(&mut self, id: u64) {
        if self.notice.as_ref().is_some_and(|n| n.id == id) {
            self.notice = None;
        }
    }
}
