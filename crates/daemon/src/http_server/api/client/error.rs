use reqwest::StatusCode;

/// Failures surfaced by `ApiClient::call`
///
/// `Rejected` carries the node's own 4xx complaint (bad key coordinates,
/// empty post title, malformed hash); anything else the node answered with
/// becomes `Node`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("could not reach the node: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("invalid node address: {0}")]
    BadRemote(#[from] url::ParseError),
    #[error("the node rejected the request ({status}): {reason}")]
    Rejected { status: StatusCode, reason: String },
    #[error("the node failed to handle the request ({status}): {reason}")]
    Node { status: StatusCode, reason: String },
}

impl ApiError {
    pub(crate) fn from_status(status: StatusCode, reason: String) -> Self {
        if status.is_client_error() {
            ApiError::Rejected { status, reason }
        } else {
            ApiError::Node { status, reason }
        }
    }
}
