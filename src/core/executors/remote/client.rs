use crate::core::actions::compute_iterations::errors::ComputeFailure;

/// Minimal blocking HTTP surface the remote backend needs.
pub trait HttpClient: Send + Sync {
    fn get(&self, url: &str) -> Result<Vec<u8>, ComputeFailure>;
}

#[cfg(feature = "remote")]
pub use reqwest_client::ReqwestClient;

#[cfg(feature = "remote")]
mod reqwest_client {
    use std::time::Duration;

    use super::HttpClient;
    use crate::core::actions::compute_iterations::errors::ComputeFailure;

    #[derive(Debug, Clone)]
    pub struct ReqwestClient {
        client: reqwest::blocking::Client,
    }

    impl ReqwestClient {
        pub fn with_timeout(timeout: Duration) -> Result<Self, reqwest::Error> {
            let client = reqwest::blocking::Client::builder()
                .timeout(timeout)
                .build()?;

            Ok(Self { client })
        }
    }

    impl HttpClient for ReqwestClient {
        fn get(&self, url: &str) -> Result<Vec<u8>, ComputeFailure> {
            let response = self
                .client
                .get(url)
                .send()
                .map_err(|e| ComputeFailure::Transport(e.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                return Err(ComputeFailure::Transport(format!("HTTP {status}")));
            }

            response
                .bytes()
                .map(|body| body.to_vec())
                .map_err(|e| ComputeFailure::Transport(e.to_string()))
        }
    }
}
