use std::fmt;
use std::time::Duration;

use engine_logging::{engine_debug, redact_url};
use reqwest::header::{CONTENT_TYPE, RANGE};
use streamcheck_core::ProbeOutcome;

use crate::types::map_reqwest_error;
use crate::{FailureKind, FetchError, ProbeFailure, RequestHeaders};

/// The two requests a probe may issue, in the order it issues them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeStage {
    Head,
    /// GET for the first byte only.
    RangedGet,
}

impl ProbeStage {
    pub const ORDER: [ProbeStage; 2] = [ProbeStage::Head, ProbeStage::RangedGet];
}

impl fmt::Display for ProbeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeStage::Head => write!(f, "HEAD"),
            ProbeStage::RangedGet => write!(f, "ranged GET"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProbeSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub redirect_limit: usize,
    /// Idle connections reqwest keeps per host between probes. Not a ceiling on
    /// open connections; the engine's semaphore bounds those.
    pub pool_size: usize,
    pub headers: RequestHeaders,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(10),
            redirect_limit: 20,
            pool_size: 20,
            headers: RequestHeaders::default(),
        }
    }
}

/// Issues a single probe request. Any HTTP response is `Ok`, whatever its
/// status; `Err` means no response was obtained.
#[async_trait::async_trait]
pub trait ProbeTransport: Send + Sync {
    async fn send(&self, stage: ProbeStage, url: &str) -> Result<ProbeOutcome, ProbeFailure>;
}

#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(settings: &ProbeSettings) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .default_headers(settings.headers.to_header_map()?)
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .redirect(reqwest::redirect::Policy::limited(settings.redirect_limit))
            .pool_max_idle_per_host(settings.pool_size)
            .build()
            .map_err(|err| FetchError::new(FailureKind::ClientSetup, err.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl ProbeTransport for ReqwestTransport {
    async fn send(&self, stage: ProbeStage, url: &str) -> Result<ProbeOutcome, ProbeFailure> {
        let request = match stage {
            ProbeStage::Head => self.client.head(url),
            ProbeStage::RangedGet => self.client.get(url).header(RANGE, "bytes=0-0"),
        };

        // The body is never read; dropping the response releases the connection.
        let response = request
            .send()
            .await
            .map_err(|err| ProbeFailure::from_reqwest(stage, err))?;

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .map(|value| header_text(value.as_bytes()));
        Ok(ProbeOutcome::new(response.status().as_u16(), content_type.as_deref()))
    }
}

/// Header bytes as text, one char per byte (latin-1). Never drops the value.
pub(crate) fn header_text(raw: &[u8]) -> String {
    raw.iter().map(|&byte| char::from(byte)).collect()
}

impl ProbeFailure {
    pub(crate) fn from_reqwest(stage: ProbeStage, err: reqwest::Error) -> Self {
        // Keep the endpoint URL (and any token in it) out of the message.
        let FetchError { kind, message } = map_reqwest_error(err.without_url());
        Self::new(stage, kind, message)
    }
}

/// Probe one endpoint: HEAD first, then a one-byte ranged GET if HEAD got no
/// response. Never fails; a double failure is reported as status 0.
pub async fn probe(transport: &dyn ProbeTransport, url: &str) -> ProbeOutcome {
    for stage in ProbeStage::ORDER {
        match transport.send(stage, url).await {
            Ok(outcome) => return outcome,
            Err(failure) => {
                engine_debug!("{} -> {}", redact_url(url), failure);
            }
        }
    }
    ProbeOutcome::unreachable()
}

#[cfg(test)]
mod tests {
    use super::*;
    use streamcheck_core::{classify, Verdict};

    #[test]
    fn non_ascii_content_type_is_kept_as_latin1() {
        let text = header_text(b"video/MP2T; name=\"caf\xe9\"");
        assert_eq!(text, "video/MP2T; name=\"caf\u{e9}\"");

        let outcome = ProbeOutcome::new(200, Some(&text));
        assert_eq!(outcome.content_type, "video/mp2t; name=\"caf\u{e9}\"");
        assert_eq!(classify(outcome.http_status, &outcome.content_type), Verdict::Online);
    }

    #[test]
    fn ascii_content_type_passes_through() {
        assert_eq!(header_text(b"text/html"), "text/html");
    }
}
