//! Error types for citation harvesting.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced while harvesting the citation graph.
///
/// A failed paginated request aborts the whole run; no partial workbook is
/// ever written. Absent or malformed nested fields in work payloads are not
/// errors and are handled by the optional models instead.
#[derive(Debug, Error)]
pub enum HarvestError {
    /// Transport failure or undecodable body on a request.
    #[error("request to {url} failed")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Non-success status on a paginated citation request.
    #[error("HTTP {status} fetching {url}")]
    Status { status: u16, url: String },

    /// The cited-by endpoint provided by the API could not be parsed.
    #[error("invalid citation endpoint {url}")]
    Endpoint {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// Workbook serialization or filesystem failure during export.
    #[error("failed to write workbook {path}")]
    Workbook {
        path: PathBuf,
        #[source]
        source: rust_xlsxwriter::XlsxError,
    },
}
