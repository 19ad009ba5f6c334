use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};

use crate::{FailureKind, FetchError, FetchSettings, ProbeSettings};

/// Headers sent with every manifest fetch and probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestHeaders {
    pub user_agent: String,
    pub accept: String,
}

impl Default for RequestHeaders {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (Android) IPTV-Checker".to_string(),
            accept: "*/*".to_string(),
        }
    }
}

impl RequestHeaders {
    pub(crate) fn to_header_map(&self) -> Result<HeaderMap, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, header_value(&self.user_agent)?);
        headers.insert(ACCEPT, header_value(&self.accept)?);
        Ok(headers)
    }
}

fn header_value(raw: &str) -> Result<HeaderValue, FetchError> {
    HeaderValue::from_str(raw)
        .map_err(|err| FetchError::new(FailureKind::InvalidHeader, err.to_string()))
}

/// Settings that stay fixed across verification runs. The per-run timeout and
/// concurrency are combined with these to build the fetch and probe clients.
#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub headers: RequestHeaders,
    /// Upper bound for connection setup; never longer than the request timeout.
    pub connect_timeout: Duration,
    pub redirect_limit: usize,
    pub max_manifest_bytes: u64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            headers: RequestHeaders::default(),
            connect_timeout: Duration::from_secs(10),
            redirect_limit: 20,
            max_manifest_bytes: 16 * 1024 * 1024,
        }
    }
}

impl EngineSettings {
    pub fn fetch_settings(&self, timeout: Duration) -> FetchSettings {
        FetchSettings {
            connect_timeout: self.connect_timeout.min(timeout),
            request_timeout: timeout,
            redirect_limit: self.redirect_limit,
            max_bytes: self.max_manifest_bytes,
            headers: self.headers.clone(),
        }
    }

    pub fn probe_settings(&self, timeout: Duration, concurrency: usize) -> ProbeSettings {
        ProbeSettings {
            connect_timeout: self.connect_timeout.min(timeout),
            request_timeout: timeout,
            redirect_limit: self.redirect_limit,
            pool_size: concurrency.max(1),
            headers: self.headers.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connect_timeout_never_exceeds_request_timeout() {
        let settings = EngineSettings::default();
        let fetch = settings.fetch_settings(Duration::from_secs(2));
        assert_eq!(fetch.connect_timeout, Duration::from_secs(2));
        let probe = settings.probe_settings(Duration::from_secs(30), 0);
        assert_eq!(probe.connect_timeout, Duration::from_secs(10));
        assert_eq!(probe.pool_size, 1);
    }

    #[test]
    fn default_headers_build() {
        let map = RequestHeaders::default().to_header_map().unwrap();
        assert_eq!(map[USER_AGENT], "Mozilla/5.0 (Android) IPTV-Checker");
        assert_eq!(map[ACCEPT], "*/*");
    }

    #[test]
    fn invalid_header_is_rejected() {
        let headers = RequestHeaders {
            user_agent: "bad\nagent".to_string(),
            ..RequestHeaders::default()
        };
        let err = headers.to_header_map().unwrap_err();
        assert_eq!(err.kind, FailureKind::InvalidHeader);
    }
}
