//! Backend endpoint configuration.

// =============================================================================
// Default Endpoints
// =============================================================================

/// Directory listing.
pub const LIST_ENDPOINT: &str = "/app/files/list";
/// Multipart upload into a directory.
pub const UPLOAD_ENDPOINT: &str = "/app/files/upload";
/// Move or rename.
pub const MOVE_ENDPOINT: &str = "/app/files/move";
/// Copy.
pub const COPY_ENDPOINT: &str = "/app/files/copy";
/// Delete a file or directory.
pub const REMOVE_ENDPOINT: &str = "/app/files/remove";
/// Create a directory.
pub const CREATE_DIR_ENDPOINT: &str = "/app/files/create_dir";
/// Download a file.
pub const GET_ENDPOINT: &str = "/app/files/get";

/// Query parameter carrying a location or full path.
pub const PATH_PARAM: &str = "path";

/// Backend operations the client talks to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint {
    List,
    Upload,
    Move,
    Copy,
    Remove,
    CreateDir,
    Get,
}

/// Where the backend lives and how its endpoints are named.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    /// Prefix for every endpoint; empty means same origin.
    pub base_url: String,
    pub list: String,
    pub upload: String,
    pub mv: String,
    pub copy: String,
    pub remove: String,
    pub create_dir: String,
    pub get: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            list: LIST_ENDPOINT.to_string(),
            upload: UPLOAD_ENDPOINT.to_string(),
            mv: MOVE_ENDPOINT.to_string(),
            copy: COPY_ENDPOINT.to_string(),
            remove: REMOVE_ENDPOINT.to_string(),
            create_dir: CREATE_DIR_ENDPOINT.to_string(),
            get: GET_ENDPOINT.to_string(),
        }
    }
}

impl ApiConfig {
    /// Default endpoints below `base_url`.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    fn endpoint_path(&self, endpoint: Endpoint) -> &str {
        match endpoint {
            Endpoint::List => &self.list,
            Endpoint::Upload => &self.upload,
            Endpoint::Move => &self.mv,
            Endpoint::Copy => &self.copy,
            Endpoint::Remove => &self.remove,
            Endpoint::CreateDir => &self.create_dir,
            Endpoint::Get => &self.get,
        }
    }

    /// Absolute URL of an endpoint.
    pub fn url(&self, endpoint: Endpoint) -> String {
        format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            self.endpoint_path(endpoint)
        )
    }

    /// URL of an endpoint with an already-encoded `path` query parameter.
    pub fn url_with_path(&self, endpoint: Endpoint, encoded_path: &str) -> String {
        format!("{}?{}={}", self.url(endpoint), PATH_PARAM, encoded_path)
    }
}
