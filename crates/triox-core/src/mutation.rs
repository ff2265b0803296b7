//! Mutation dispatcher.
//!
//! Every mutation resolves its target names against the current location,
//! performs exactly one backend call, and on success runs the refresh
//! callback for that location. Nothing is applied to the snapshot locally.
//!
//! Rename and move are the same operation: "move full path A to full path B".

use std::fmt;
use std::future::Future;
use std::rc::Rc;

use log::{info, warn};
use serde::Serialize;

use crate::backend::Backend;
use crate::config::{ApiConfig, Endpoint};
use crate::error::{ClientError, Failure};
use crate::path::PathStack;
use crate::transport::{ApiRequest, AuthProvider, Transport};

/// Backend primitive a mutation maps to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MutationKind {
    Move,
    Copy,
    Remove,
    CreateDirectory,
    Upload,
}

impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Move => "move",
            Self::Copy => "copy",
            Self::Remove => "remove",
            Self::CreateDirectory => "create directory",
            Self::Upload => "upload",
        };
        f.write_str(label)
    }
}

/// A user-requested change, with names relative to the current location.
#[derive(Debug)]
pub enum Mutation<F> {
    Rename { from: String, to: String },
    Move { from: String, to: String },
    Copy { from: String, to: String },
    Remove { name: String },
    CreateDirectory { name: String },
    Upload { form: F },
}

impl<F> Mutation<F> {
    pub fn kind(&self) -> MutationKind {
        match self {
            Self::Rename { .. } | Self::Move { .. } => MutationKind::Move,
            Self::Copy { .. } => MutationKind::Copy,
            Self::Remove { .. } => MutationKind::Remove,
            Self::CreateDirectory { .. } => MutationKind::CreateDirectory,
            Self::Upload { .. } => MutationKind::Upload,
        }
    }
}

/// Body of the move and copy endpoints.
#[derive(Serialize)]
struct SourceAndDest<'a> {
    from: &'a str,
    to: &'a str,
}

/// Turn a prompt answer into a name, rejecting a declined or blank prompt.
/// The name is passed on as typed.
pub fn require_name(input: Option<String>) -> Result<String, ClientError> {
    match input {
        Some(name) if !name.trim().is_empty() => Ok(name),
        Some(_) => Err(ClientError::ValidationRejected("name is empty".to_string())),
        None => Err(ClientError::ValidationRejected("cancelled".to_string())),
    }
}

/// Turn a confirmation answer into a go / no-go.
pub fn require_confirmation(confirmed: bool) -> Result<(), ClientError> {
    if confirmed {
        Ok(())
    } else {
        Err(ClientError::ValidationRejected("cancelled".to_string()))
    }
}

pub struct MutationDispatcher<T, A> {
    backend: Rc<Backend<T, A>>,
}

impl<T, A> Clone for MutationDispatcher<T, A> {
    fn clone(&self) -> Self {
        Self {
            backend: Rc::clone(&self.backend),
        }
    }
}

impl<T: Transport, A: AuthProvider> MutationDispatcher<T, A> {
    pub fn new(transport: T, auth: A, config: ApiConfig) -> Self {
        Self::from_backend(Rc::new(Backend::new(transport, auth, config)))
    }

    pub(crate) fn from_backend(backend: Rc<Backend<T, A>>) -> Self {
        Self { backend }
    }

    /// Resolve `mutation` against `location` into the backend request.
    pub fn prepare(
        &self,
        location: &PathStack,
        mutation: Mutation<T::Form>,
    ) -> Result<(MutationKind, ApiRequest<T::Form>), ClientError> {
        let kind = mutation.kind();
        let config = self.backend.config();

        let request = match mutation {
            Mutation::Rename { from, to } | Mutation::Move { from, to } => {
                source_and_dest(config.url(Endpoint::Move), location, &from, &to)?
            }
            Mutation::Copy { from, to } => {
                source_and_dest(config.url(Endpoint::Copy), location, &from, &to)?
            }
            Mutation::Remove { name } => {
                let full = location.child(&name)?;
                ApiRequest::get(config.url_with_path(Endpoint::Remove, &full.encoded()))
            }
            Mutation::CreateDirectory { name } => {
                let full = location.child(&name)?;
                ApiRequest::get(config.url_with_path(Endpoint::CreateDir, &full.encoded()))
            }
            Mutation::Upload { form } => ApiRequest::post_form(
                config.url_with_path(Endpoint::Upload, &location.encoded()),
                form,
            ),
        };

        Ok((kind, request))
    }

    /// Perform `mutation` at `location`, then await `refresh(location)`.
    ///
    /// The refresh only runs when the backend reported success.
    pub async fn dispatch<R, Fut>(
        &self,
        location: &PathStack,
        mutation: Mutation<T::Form>,
        refresh: R,
    ) -> Result<Fut::Output, ClientError>
    where
        R: FnOnce(PathStack) -> Fut,
        Fut: Future,
    {
        let (operation, request) = self.prepare(location, mutation)?;

        let response = self
            .backend
            .send(request)
            .await
            .map_err(|e| ClientError::MutationFailed {
                operation,
                failure: e.into(),
            })?;

        if !response.is_success() {
            warn!("{} in '{}' failed with HTTP {}", operation, location, response.status);
            return Err(ClientError::MutationFailed {
                operation,
                failure: Failure::http(response.status, response.text()),
            });
        }

        info!("{} in '{}' done", operation, location);
        Ok(refresh(location.clone()).await)
    }

    pub async fn rename<R, Fut>(
        &self,
        location: &PathStack,
        old_name: &str,
        new_name: &str,
        refresh: R,
    ) -> Result<Fut::Output, ClientError>
    where
        R: FnOnce(PathStack) -> Fut,
        Fut: Future,
    {
        let mutation = Mutation::Rename {
            from: old_name.to_string(),
            to: new_name.to_string(),
        };
        self.dispatch(location, mutation, refresh).await
    }

    pub async fn r#move<R, Fut>(
        &self,
        location: &PathStack,
        old_name: &str,
        destination: &str,
        refresh: R,
    ) -> Result<Fut::Output, ClientError>
    where
        R: FnOnce(PathStack) -> Fut,
        Fut: Future,
    {
        let mutation = Mutation::Move {
            from: old_name.to_string(),
            to: destination.to_string(),
        };
        self.dispatch(location, mutation, refresh).await
    }

    pub async fn copy<R, Fut>(
        &self,
        location: &PathStack,
        old_name: &str,
        new_name: &str,
        refresh: R,
    ) -> Result<Fut::Output, ClientError>
    where
        R: FnOnce(PathStack) -> Fut,
        Fut: Future,
    {
        let mutation = Mutation::Copy {
            from: old_name.to_string(),
            to: new_name.to_string(),
        };
        self.dispatch(location, mutation, refresh).await
    }

    pub async fn remove<R, Fut>(
        &self,
        location: &PathStack,
        name: &str,
        refresh: R,
    ) -> Result<Fut::Output, ClientError>
    where
        R: FnOnce(PathStack) -> Fut,
        Fut: Future,
    {
        let mutation = Mutation::Remove {
            name: name.to_string(),
        };
        self.dispatch(location, mutation, refresh).await
    }

    pub async fn create_directory<R, Fut>(
        &self,
        location: &PathStack,
        name: &str,
        refresh: R,
    ) -> Result<Fut::Output, ClientError>
    where
        R: FnOnce(PathStack) -> Fut,
        Fut: Future,
    {
        let mutation = Mutation::CreateDirectory {
            name: name.to_string(),
        };
        self.dispatch(location, mutation, refresh).await
    }

    pub async fn upload<R, Fut>(
        &self,
        location: &PathStack,
        form: T::Form,
        refresh: R,
    ) -> Result<Fut::Output, ClientError>
    where
        R: FnOnce(PathStack) -> Fut,
        Fut: Future,
    {
        self.dispatch(location, Mutation::Upload { form }, refresh)
            .await
    }
}

fn source_and_dest<F>(
    url: String,
    location: &PathStack,
    from: &str,
    to: &str,
) -> Result<ApiRequest<F>, ClientError> {
    let from = location.child(from)?.serialize();
    let to = location.child(to)?.serialize();
    ApiRequest::post_json(
        url,
        &SourceAndDest {
            from: &from,
            to: &to,
        },
    )
    .map_err(|e| ClientError::ValidationRejected(e.to_string()))
}
