use std::fs;
use std::path::Path;

use reqwest::blocking::Client;
use sc_core::TransportFault;
use url::Url;

/// Retrieval collaborator used by [`crate::ResourceCache`].
pub trait Transport: Send + Sync {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, TransportFault>;
    fn local_resource_exists(&self, path: &str) -> bool;
    fn read_local_resource(&self, path: &str) -> Result<Vec<u8>, TransportFault>;
    fn is_valid_remote_address(&self, candidate: &str) -> bool;
}

#[derive(Debug, Clone, Default)]
pub struct StdTransportOptions {
    pub user_agent: Option<String>,
}

/// Filesystem reads plus blocking HTTP fetches.
#[derive(Debug, Clone)]
pub struct StdTransport {
    client: Client,
}

impl StdTransport {
    pub fn new(options: StdTransportOptions) -> Result<Self, TransportFault> {
        let mut builder = Client::builder();
        if let Some(user_agent) = options.user_agent {
            builder = builder.user_agent(user_agent);
        }
        let client = builder
            .build()
            .map_err(|error| TransportFault::new(error.to_string()))?;
        Ok(Self { client })
    }
}

impl Default for StdTransport {
    fn default() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

impl Transport for StdTransport {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, TransportFault> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|error| TransportFault::new(error.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(TransportFault::with_status(status.as_u16(), body));
        }

        response
            .bytes()
            .map(|bytes| bytes.to_vec())
            .map_err(|error| TransportFault::new(error.to_string()))
    }

    fn local_resource_exists(&self, path: &str) -> bool {
        Path::new(path).is_file()
    }

    fn read_local_resource(&self, path: &str) -> Result<Vec<u8>, TransportFault> {
        fs::read(path).map_err(|error| TransportFault::new(error.to_string()))
    }

    fn is_valid_remote_address(&self, candidate: &str) -> bool {
        match Url::parse(candidate) {
            Ok(url) => !url.cannot_be_a_base() && url.host_str().is_some_and(|h| !h.is_empty()),
            Err(_) => false,
        }
    }
}
