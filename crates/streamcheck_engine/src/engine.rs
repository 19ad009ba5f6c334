use std::sync::Arc;
use std::time::{Duration, Instant};

use engine_logging::{engine_error, engine_info, engine_warn, redact_url};
use streamcheck_core::{
    parse_manifest, EndpointResult, ManifestEntry, ProbeOutcome, Report, Verdict,
};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::probe::probe;
use crate::{
    decode_text, EngineSettings, Fetcher, ProbeTransport, ReqwestFetcher, ReqwestTransport,
    VerifyError,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyRequest {
    pub manifest_url: String,
    /// Maximum probes in flight; 0 is treated as 1.
    pub concurrency: usize,
    /// Applied to the manifest fetch and to every probe request.
    pub timeout: Duration,
}

/// Entry point the HTTP layer calls into.
#[async_trait::async_trait]
pub trait Verify: Send + Sync {
    async fn verify(&self, request: VerifyRequest) -> Result<Report, VerifyError>;
}

/// Production [`Verify`] backed by reqwest. Builds fresh clients per run so
/// the connection pool always matches the requested concurrency.
#[derive(Debug, Clone, Default)]
pub struct Verifier {
    settings: EngineSettings,
}

impl Verifier {
    pub fn new(settings: EngineSettings) -> Self {
        Self { settings }
    }
}

#[async_trait::async_trait]
impl Verify for Verifier {
    async fn verify(&self, request: VerifyRequest) -> Result<Report, VerifyError> {
        let concurrency = request.concurrency.max(1);
        let fetcher = ReqwestFetcher::new(self.settings.fetch_settings(request.timeout));
        let transport = ReqwestTransport::new(
            &self.settings.probe_settings(request.timeout, concurrency),
        )
        .map_err(VerifyError::Transport)?;

        run_verification(
            &fetcher,
            Arc::new(transport),
            &request.manifest_url,
            concurrency,
        )
        .await
    }
}

/// Fetch and parse the manifest, probe every entry with at most `concurrency`
/// probes in flight, and build the report in manifest order.
pub async fn run_verification(
    fetcher: &dyn Fetcher,
    transport: Arc<dyn ProbeTransport>,
    manifest_url: &str,
    concurrency: usize,
) -> Result<Report, VerifyError> {
    let started = Instant::now();

    let entries = load_manifest(fetcher, manifest_url).await?;
    let items = probe_all(transport, entries, concurrency.max(1)).await;
    let report = Report::new(items, started.elapsed().as_secs_f64());

    engine_info!(
        "Verified {} entries from {} in {:.1}s: {} online, {} blocked, {} offline",
        report.entry_count(),
        redact_url(manifest_url),
        report.elapsed_seconds(),
        report.count_of(Verdict::Online),
        report.count_of(Verdict::Blocked),
        report.count_of(Verdict::Offline),
    );
    Ok(report)
}

async fn load_manifest(
    fetcher: &dyn Fetcher,
    manifest_url: &str,
) -> Result<Vec<ManifestEntry>, VerifyError> {
    let output = fetcher.fetch(manifest_url).await.map_err(|err| {
        engine_warn!("Manifest fetch failed for {}: {}", redact_url(manifest_url), err);
        VerifyError::ManifestFetch(err)
    })?;

    let decoded = decode_text(&output.bytes, output.metadata.content_type.as_deref());
    if decoded.had_errors {
        engine_warn!(
            "Manifest {} is not valid {}; malformed bytes were replaced",
            redact_url(manifest_url),
            decoded.encoding_label
        );
    }

    let entries = parse_manifest(&decoded.text);
    engine_info!(
        "Manifest {} fetched: bytes={} redirects={} entries={}",
        redact_url(manifest_url),
        output.metadata.byte_len,
        output.metadata.redirect_count,
        entries.len()
    );
    Ok(entries)
}

async fn probe_all(
    transport: Arc<dyn ProbeTransport>,
    entries: Vec<ManifestEntry>,
    concurrency: usize,
) -> Vec<EndpointResult> {
    // More permits than entries never changes admission; this also keeps the
    // count under the semaphore's ceiling.
    let permits = concurrency.clamp(1, entries.len().clamp(1, Semaphore::MAX_PERMITS));
    let permits = Arc::new(Semaphore::new(permits));
    let mut tasks = JoinSet::new();

    for (index, entry) in entries.iter().cloned().enumerate() {
        let transport = Arc::clone(&transport);
        let permits = Arc::clone(&permits);
        tasks.spawn(async move {
            let Ok(_permit) = permits.acquire_owned().await else {
                return (index, EndpointResult::from_probe(entry, ProbeOutcome::unreachable()));
            };
            let outcome = probe(transport.as_ref(), &entry.url).await;
            (index, EndpointResult::from_probe(entry, outcome))
        });
    }

    // Indexed by manifest position; completion order is irrelevant.
    let mut slots: Vec<Option<EndpointResult>> = vec![None; entries.len()];
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, result)) => slots[index] = Some(result),
            Err(err) => engine_error!("Probe task ended without a result: {}", err),
        }
    }

    entries
        .into_iter()
        .zip(slots)
        .map(|(entry, slot)| {
            slot.unwrap_or_else(|| EndpointResult::from_probe(entry, ProbeOutcome::unreachable()))
        })
        .collect()
}
