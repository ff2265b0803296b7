//! Intent dispatch.
//!
//! [`Explorer`] ties a [`Session`] to the listing client and the mutation
//! dispatcher. The UI hands it [`Intent`]s and re-renders whenever the
//! observer fires; it never touches the session directly.

use std::cell::RefCell;
use std::rc::Rc;

use log::debug;

use crate::backend::Backend;
use crate::config::ApiConfig;
use crate::error::ClientError;
use crate::listing::{DownloadedFile, ListingClient};
use crate::mutation::{Mutation, MutationDispatcher};
use crate::path::PathStack;
use crate::session::{Navigation, RefreshOutcome, Session};
use crate::transport::{AuthProvider, Transport};

/// Everything the user can ask for. `F` is the upload form type.
#[derive(Debug)]
pub enum Intent<F> {
    EnterDirectory(String),
    GoUp,
    JumpToDepth(usize),
    Load(PathStack),
    Refresh,
    Rename { from: String, to: String },
    Move { from: String, to: String },
    Copy { from: String, to: String },
    Delete(String),
    CreateDirectory(String),
    Upload(F),
    Download(String),
    DismissNotice(u64),
}

/// Result of a handled intent.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing to fetch (e.g. "up" at root, clicking the active crumb)
    Unchanged,
    Refreshed(RefreshOutcome),
    Downloaded(DownloadedFile),
}

pub struct Explorer<T, A> {
    session: Rc<RefCell<Session>>,
    listing: ListingClient<T, A>,
    mutations: MutationDispatcher<T, A>,
    observer: Rc<dyn Fn(&Session)>,
}

impl<T, A> Clone for Explorer<T, A> {
    fn clone(&self) -> Self {
        Self {
            session: Rc::clone(&self.session),
            listing: self.listing.clone(),
            mutations: self.mutations.clone(),
            observer: Rc::clone(&self.observer),
        }
    }
}

impl<T: Transport, A: AuthProvider> Explorer<T, A> {
    pub fn new(transport: T, auth: A, config: ApiConfig) -> Self {
        Self::starting_at(transport, auth, config, PathStack::root())
    }

    pub fn starting_at(transport: T, auth: A, config: ApiConfig, location: PathStack) -> Self {
        let backend = Rc::new(Backend::new(transport, auth, config));
        Self {
            session: Rc::new(RefCell::new(Session::at(location))),
            listing: ListingClient::from_backend(Rc::clone(&backend)),
            mutations: MutationDispatcher::from_backend(backend),
            observer: Rc::new(|_| {}),
        }
    }

    /// Call `observer` after every session change.
    pub fn with_observer(mut self, observer: impl Fn(&Session) + 'static) -> Self {
        self.observer = Rc::new(observer);
        self
    }

    /// Copy of the current session state.
    pub fn session(&self) -> Session {
        self.session.borrow().clone()
    }

    pub fn location(&self) -> PathStack {
        self.session.borrow().location().clone()
    }

    fn update<R>(&self, f: impl FnOnce(&mut Session) -> R) -> R {
        let result = f(&mut self.session.borrow_mut());
        (self.observer)(&self.session.borrow());
        result
    }

    /// Fetch the listing for the current location.
    pub async fn refresh(&self) -> Result<RefreshOutcome, ClientError> {
        let ticket = self.update(Session::begin_refresh);
        let result = self.listing.fetch_listing(ticket.location()).await;
        self.update(|session| session.finish_refresh(ticket, result))
    }

    /// Refresh after a mutation at `location`. Skipped when the user has
    /// since moved elsewhere.
    async fn refresh_at(&self, location: PathStack) -> Result<RefreshOutcome, ClientError> {
        if self.session.borrow().location() != &location {
            debug!("skipping refresh of '{}', no longer shown", location);
            return Ok(RefreshOutcome::Discarded);
        }
        self.refresh().await
    }

    /// Handle one user intent.
    pub async fn handle(&self, intent: Intent<T::Form>) -> Result<Outcome, ClientError> {
        match intent {
            Intent::EnterDirectory(name) => {
                self.row_location()?;
                self.navigate(Navigation::EnterDirectory(name)).await
            }
            Intent::GoUp => self.navigate(Navigation::GoUp).await,
            Intent::JumpToDepth(depth) => self.navigate(Navigation::JumpToDepth(depth)).await,
            Intent::Load(location) => self.navigate(Navigation::Load(location)).await,
            Intent::Refresh => self.refresh().await.map(Outcome::Refreshed),
            Intent::Rename { from, to } => {
                let location = self.row_location()?;
                self.mutate(location, Mutation::Rename { from, to }).await
            }
            Intent::Move { from, to } => {
                let location = self.row_location()?;
                self.mutate(location, Mutation::Move { from, to }).await
            }
            Intent::Copy { from, to } => {
                let location = self.row_location()?;
                self.mutate(location, Mutation::Copy { from, to }).await
            }
            Intent::Delete(name) => {
                let location = self.row_location()?;
                self.mutate(location, Mutation::Remove { name }).await
            }
            Intent::CreateDirectory(name) => {
                self.mutate(self.location(), Mutation::CreateDirectory { name })
                    .await
            }
            Intent::Upload(form) => self.mutate(self.location(), Mutation::Upload { form }).await,
            Intent::Download(name) => {
                let location = self.row_location()?;
                self.download(&location, &name).await
            }
            Intent::DismissNotice(id) => {
                self.update(|session| session.dismiss_notice(id));
                Ok(Outcome::Unchanged)
            }
        }
    }

    async fn navigate(&self, navigation: Navigation) -> Result<Outcome, ClientError> {
        let changed = self.update(|session| session.navigate(navigation))?;
        let has_snapshot = self.session.borrow().snapshot().is_some();
        if !changed && has_snapshot {
            return Ok(Outcome::Unchanged);
        }
        self.refresh().await.map(Outcome::Refreshed)
    }

    /// Location of the displayed listing, or `ValidationRejected` while the
    /// rows on screen belong to another folder.
    fn row_location(&self) -> Result<PathStack, ClientError> {
        self.session.borrow().row_location().cloned().inspect_err(|err| {
            debug!("ignoring row action: {}", err);
        })
    }

    async fn mutate(
        &self,
        location: PathStack,
        mutation: Mutation<T::Form>,
    ) -> Result<Outcome, ClientError> {
        let result = self
            .mutations
            .dispatch(&location, mutation, |at| self.refresh_at(at))
            .await;

        match result {
            Ok(refreshed) => refreshed.map(Outcome::Refreshed),
            Err(err) => {
                self.update(|session| session.record_failure(&err));
                Err(err)
            }
        }
    }

    async fn download(&self, location: &PathStack, name: &str) -> Result<Outcome, ClientError> {
        match self.listing.download(location, name).await {
            Ok(file) => Ok(Outcome::Downloaded(file)),
            Err(err) => {
                self.update(|session| session.record_failure(&err));
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Failure;
    use crate::mock::MockTransport;
    use crate::mutation::MutationKind;
    use crate::transport::{Method, NoAuth};
    use serde_json::json;
    use std::cell::Cell;

    type TestExplorer = Explorer<Rc<MockTransport>, NoAuth>;

    fn explorer(mock: &Rc<MockTransport>) -> TestExplorer {
        Explorer::new(Rc::clone(mock), NoAuth, ApiConfig::default())
    }

    fn listing(mock: &MockTransport, encoded: &str, files: &[&str], dirs: &[&str]) {
        let files: Vec<_> = files
            .iter()
            .map(|f| json!({ "name": f, "size": 10, "last_modified": 0 }))
            .collect();
        let dirs: Vec<_> = dirs.iter().map(|d| json!({ "name": d })).collect();
        mock.respond_json(
            Method::Get,
            &format!("/app/files/list?path={}", encoded),
            200,
            json!({ "files": files, "directories": dirs }),
        );
    }

    fn names(explorer: &TestExplorer) -> Vec<String> {
        explorer
            .session()
            .snapshot()
            .map(|s| s.entries().map(|e| e.name.clone()).collect())
            .unwrap_or_default()
    }

    #[tokio::test]
    async fn test_enter_directory_fetches_listing() {
        let mock = Rc::new(MockTransport::new());
        listing(&mock, "", &[], &["docs"]);
        listing(&mock, "docs", &["a.txt"], &["2024"]);
        let explorer = explorer(&mock);
        explorer.refresh().await.unwrap();
        mock.clear_requests();

        let outcome = explorer
            .handle(Intent::EnterDirectory("docs".into()))
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::Refreshed(RefreshOutcome::Applied));
        assert_eq!(names(&explorer), vec!["2024", "a.txt"]);
        assert_eq!(mock.urls(), vec!["/app/files/list?path=docs".to_string()]);
    }

    #[tokio::test]
    async fn test_rename_refreshes_current_location() {
        let mock = Rc::new(MockTransport::new());
        listing(&mock, "", &[], &["docs"]);
        listing(&mock, "docs", &["a.txt"], &[]);
        mock.respond(Method::Post, "/app/files/move", 200, "");
        let explorer = explorer(&mock);
        explorer.refresh().await.unwrap();
        explorer.handle(Intent::EnterDirectory("docs".into())).await.unwrap();
        mock.clear_requests();

        listing(&mock, "docs", &["b.txt"], &[]);
        explorer
            .handle(Intent::Rename {
                from: "a.txt".into(),
                to: "b.txt".into(),
            })
            .await
            .unwrap();

        let requests = mock.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(
            requests[0].json(),
            Some(json!({ "from": "docs/a.txt", "to": "docs/b.txt" }))
        );
        assert_eq!(requests[1].url, "/app/files/list?path=docs");
        assert_eq!(names(&explorer), vec!["b.txt"]);
    }

    #[tokio::test]
    async fn test_copy_keeps_source_in_next_listing() {
        let mock = Rc::new(MockTransport::new());
        listing(&mock, "", &["a.txt"], &[]);
        mock.respond(Method::Post, "/app/files/copy", 200, "");
        let explorer = explorer(&mock);
        explorer.refresh().await.unwrap();

        listing(&mock, "", &["a.txt", "a-copy.txt"], &[]);
        explorer
            .handle(Intent::Copy {
                from: "a.txt".into(),
                to: "a-copy.txt".into(),
            })
            .await
            .unwrap();

        let snapshot = explorer.session().snapshot().cloned().unwrap();
        assert!(snapshot.find("a.txt").is_some());
        assert!(snapshot.find("a-copy.txt").is_some());
    }

    #[tokio::test]
    async fn test_mutation_failure_raises_notice_without_refresh() {
        let mock = Rc::new(MockTransport::new());
        listing(&mock, "", &["a.txt"], &[]);
        mock.respond(Method::Get, "/app/files/remove?path=a.txt", 500, "locked");
        let explorer = explorer(&mock);
        explorer.refresh().await.unwrap();
        mock.clear_requests();

        let err = explorer.handle(Intent::Delete("a.txt".into())).await.unwrap_err();

        assert_eq!(
            err,
            ClientError::MutationFailed {
                operation: MutationKind::Remove,
                failure: Failure::http(500, "locked"),
            }
        );
        assert_eq!(mock.urls(), vec!["/app/files/remove?path=a.txt".to_string()]);
        assert_eq!(names(&explorer), vec!["a.txt"]);
        assert!(explorer.session().notice().is_some());
    }

    #[tokio::test]
    async fn test_late_listing_for_previous_location_is_discarded() {
        let mock = Rc::new(MockTransport::new());
        listing(&mock, "", &[], &["a", "b"]);
        listing(&mock, "a", &["from-a.txt"], &[]);
        listing(&mock, "b", &["from-b.txt"], &[]);
        let explorer = explorer(&mock);
        explorer.refresh().await.unwrap();
        let release_a = mock.hold(Method::Get, "/app/files/list?path=a");

        let slow = explorer.handle(Intent::EnterDirectory("a".into()));
        let user = async {
            explorer.handle(Intent::GoUp).await.unwrap();
            explorer.handle(Intent::EnterDirectory("b".into())).await.unwrap();
            release_a.send(()).unwrap();
        };
        let (slow, ()) = futures::join!(slow, user);

        assert_eq!(slow, Ok(Outcome::Refreshed(RefreshOutcome::Discarded)));
        assert_eq!(explorer.location().serialize(), "b");
        assert_eq!(names(&explorer), vec!["from-b.txt"]);
    }

    #[tokio::test]
    async fn test_listing_failure_keeps_last_snapshot() {
        let mock = Rc::new(MockTransport::new());
        listing(&mock, "", &["a.txt"], &[]);
        let explorer = explorer(&mock);
        explorer.refresh().await.unwrap();

        mock.respond(Method::Get, "/app/files/list?path=", 503, "");
        let err = explorer.handle(Intent::Refresh).await.unwrap_err();

        assert!(matches!(err, ClientError::ListingFailed(_)));
        assert_eq!(names(&explorer), vec!["a.txt"]);
        assert!(explorer.session().notice().is_some());
    }

    #[tokio::test]
    async fn test_up_at_root_does_not_refetch() {
        let mock = Rc::new(MockTransport::new());
        listing(&mock, "", &[], &[]);
        let explorer = explorer(&mock);
        explorer.refresh().await.unwrap();
        mock.clear_requests();

        assert_eq!(explorer.handle(Intent::GoUp).await, Ok(Outcome::Unchanged));
        assert_eq!(explorer.handle(Intent::JumpToDepth(0)).await, Ok(Outcome::Unchanged));
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn test_declined_prompt_is_silent() {
        let mock = Rc::new(MockTransport::new());
        let explorer = explorer(&mock);

        let err = explorer
            .handle(Intent::CreateDirectory(String::new()))
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::ValidationRejected(_)));
        assert!(explorer.session().notice().is_none());
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn test_observer_sees_every_change() {
        let mock = Rc::new(MockTransport::new());
        listing(&mock, "", &[], &["docs"]);
        listing(&mock, "docs", &[], &[]);
        let calls = Rc::new(Cell::new(0));
        let seen = Rc::clone(&calls);
        let explorer = explorer(&mock).with_observer(move |_| seen.set(seen.get() + 1));
        explorer.refresh().await.unwrap();
        calls.set(0);

        explorer.handle(Intent::EnterDirectory("docs".into())).await.unwrap();

        // navigate, begin_refresh, finish_refresh
        assert_eq!(calls.get(), 3);
    }

    #[tokio::test]
    async fn test_download_outcome() {
        let mock = Rc::new(MockTransport::new());
        listing(&mock, "", &["report.pdf"], &[]);
        mock.respond(Method::Get, "/app/files/get?path=report.pdf", 200, vec![1u8, 2, 3]);
        let explorer = explorer(&mock);
        explorer.refresh().await.unwrap();

        match explorer.handle(Intent::Download("report.pdf".into())).await {
            Ok(Outcome::Downloaded(file)) => assert_eq!(file.bytes, vec![1, 2, 3]),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_rows_of_previous_folder_are_inert_while_loading() {
        let mock = Rc::new(MockTransport::new());
        listing(&mock, "", &["x.txt"], &["docs"]);
        listing(&mock, "docs", &["x.txt"], &[]);
        let explorer = explorer(&mock);
        explorer.refresh().await.unwrap();
        let release_docs = mock.hold(Method::Get, "/app/files/list?path=docs");
        mock.clear_requests();

        let slow = explorer.handle(Intent::EnterDirectory("docs".into()));
        let user = async {
            // Root rows are still on screen
            assert_eq!(names(&explorer), vec!["docs", "x.txt"]);
            let err = explorer.handle(Intent::Delete("x.txt".into())).await.unwrap_err();
            assert!(matches!(err, ClientError::ValidationRejected(_)));
            let err = explorer.handle(Intent::Download("x.txt".into())).await.unwrap_err();
            assert!(matches!(err, ClientError::ValidationRejected(_)));
            release_docs.send(()).unwrap();
        };
        let (slow, ()) = futures::join!(slow, user);

        assert_eq!(slow, Ok(Outcome::Refreshed(RefreshOutcome::Applied)));
        assert_eq!(mock.urls(), vec!["/app/files/list?path=docs".to_string()]);
        assert!(explorer.session().notice().is_none());
    }

    #[tokio::test]
    async fn test_rows_of_previous_folder_are_inert_after_failed_listing() {
        let mock = Rc::new(MockTransport::new());
        listing(&mock, "", &["x.txt"], &["docs", "sub"]);
        mock.respond(Method::Get, "/app/files/list?path=docs", 503, "");
        let explorer = explorer(&mock);
        explorer.refresh().await.unwrap();

        explorer
            .handle(Intent::EnterDirectory("docs".into()))
            .await
            .unwrap_err();
        assert_eq!(explorer.location().serialize(), "docs");
        assert_eq!(names(&explorer), vec!["docs", "sub", "x.txt"]);
        mock.clear_requests();

        for intent in [
            Intent::Delete("x.txt".into()),
            Intent::Rename {
                from: "x.txt".into(),
                to: "y.txt".into(),
            },
            Intent::Copy {
                from: "x.txt".into(),
                to: "y.txt".into(),
            },
            Intent::Move {
                from: "x.txt".into(),
                to: "sub/x.txt".into(),
            },
            Intent::EnterDirectory("sub".into()),
        ] {
            let err = explorer.handle(intent).await.unwrap_err();
            assert!(matches!(err, ClientError::ValidationRejected(_)));
        }
        assert!(mock.requests().is_empty());
        assert_eq!(explorer.location().serialize(), "docs");

        // Retrying the listing makes the folder actionable again
        listing(&mock, "docs", &["x.txt"], &[]);
        mock.respond(Method::Get, "/app/files/remove?path=docs/x.txt", 200, "");
        explorer.handle(Intent::Refresh).await.unwrap();
        explorer.handle(Intent::Delete("x.txt".into())).await.unwrap();
        assert!(
            mock.urls()
                .contains(&"/app/files/remove?path=docs/x.txt".to_string())
        );
    }

    #[tokio::test]
    async fn test_refresh_after_mutation_skipped_once_user_moved_on() {
        let mock = Rc::new(MockTransport::new());
        listing(&mock, "", &["a.txt"], &["docs"]);
        listing(&mock, "docs", &[], &[]);
        mock.respond(Method::Get, "/app/files/remove?path=a.txt", 200, "");
        let explorer = explorer(&mock);
        explorer.refresh().await.unwrap();
        let release_remove = mock.hold(Method::Get, "/app/files/remove?path=a.txt");
        mock.clear_requests();

        let delete = explorer.handle(Intent::Delete("a.txt".into()));
        let user = async {
            explorer.handle(Intent::EnterDirectory("docs".into())).await.unwrap();
            release_remove.send(()).unwrap();
        };
        let (delete, ()) = futures::join!(delete, user);

        assert_eq!(delete, Ok(Outcome::Refreshed(RefreshOutcome::Discarded)));
        assert_eq!(
            mock.urls(),
            vec![
                "/app/files/remove?path=a.txt".to_string(),
                "/app/files/list?path=docs".to_string(),
            ]
        );
        assert_eq!(explorer.location().serialize(), "docs");
    }
}
