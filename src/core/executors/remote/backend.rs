use std::str::FromStr;
use std::sync::Arc;

use tracing::trace;

use crate::core::actions::cancellation::{CancelToken, Cancelled};
use crate::core::actions::compute_iterations::errors::{ComputeError, ComputeFailure};
use crate::core::actions::compute_iterations::ports::compute_backend::ComputeBackend;
use crate::core::data::tile::Tile;
use crate::core::executors::remote::client::HttpClient;

/// Remote function that serves iteration counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RemoteLambda {
    #[default]
    GetIterations,
    GetIterationsPython,
    GetIterationsNumPy,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown remote lambda '{0}'")]
pub struct UnknownRemoteLambda(pub String);

impl RemoteLambda {
    pub const ALL: &'static [Self] = &[
        Self::GetIterations,
        Self::GetIterationsPython,
        Self::GetIterationsNumPy,
    ];

    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::GetIterations => "getIterations",
            Self::GetIterationsPython => "getIterationsPython",
            Self::GetIterationsNumPy => "getIterationsNumPy",
        }
    }
}

impl std::fmt::Display for RemoteLambda {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).path())
    }
}

impl FromStr for RemoteLambda {
    type Err = UnknownRemoteLambda;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|lambda| lambda.path().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownRemoteLambda(s.to_owned()))
    }
}

/// Fetches iteration counts for a tile from an HTTP endpoint.
///
/// The response is a JSON array whose element `i` is the count for pixel
/// `tile.start + i`.
pub struct RemoteBackend {
    client: Arc<dyn HttpClient>,
    endpoint: String,
    lambda: RemoteLambda,
}

impl RemoteBackend {
    #[must_use]
    pub fn new(client: Arc<dyn HttpClient>, endpoint: &str, lambda: RemoteLambda) -> Self {
        Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_owned(),
            lambda,
        }
    }

    #[must_use]
    pub fn request_url(&self, tile: &Tile) -> String {
        format!(
            "{}/{}?start={}&stop={}&width={}&offsetx={}&offsety={}&panx={}&pany={}&zoom={}&maxIterations={}",
            self.endpoint,
            self.lambda.path(),
            tile.start,
            tile.stop,
            tile.width,
            tile.offset_x,
            tile.offset_y,
            tile.pan_x,
            tile.pan_y,
            tile.zoom,
            tile.max_iterations,
        )
    }
}

impl ComputeBackend for RemoteBackend {
    fn name(&self) -> &str {
        "remote"
    }

    fn compute(&self, tile: &Tile, cancel: &dyn CancelToken) -> Result<Vec<u32>, ComputeError> {
        if cancel.is_cancelled() {
            return Err(Cancelled.into());
        }

        let url = self.request_url(tile);
        trace!(%url, "requesting remote batch");

        let body = self.client.get(&url)?;
        let counts: Vec<u32> = serde_json::from_slice(&body)
            .map_err(|e| ComputeFailure::MalformedResponse(e.to_string()))?;

        if counts.len() != tile.len() {
            return Err(ComputeFailure::LengthMismatch {
                expected: tile.len(),
                actual: counts.len(),
            }
            .into());
        }

        Ok(counts)
    }
}
