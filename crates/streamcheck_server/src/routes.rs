use std::time::Duration;

use axum::extract::{Query, State};
use axum::Json;
use engine_logging::{engine_info, redact_url};
use serde::Deserialize;
use serde_json::{json, Value};
use streamcheck_core::Report;
use streamcheck_engine::{Verify, VerifyRequest};

use crate::{ApiError, AppContext, RequestLimits};

/// Query string of `GET /verify`. Values stay raw strings so malformed
/// numbers get a readable error instead of an extractor rejection.
#[derive(Debug, Default, Deserialize)]
pub struct VerifyParams {
    pub playlist: Option<String>,
    pub conc: Option<String>,
    pub timeout: Option<String>,
}

impl VerifyParams {
    pub fn into_request(self, limits: &RequestLimits) -> Result<VerifyRequest, ApiError> {
        let manifest_url = self
            .playlist
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or(ApiError::MissingPlaylist)?
            .to_string();

        let concurrency = parse_bounded(
            "conc",
            self.conc.as_deref(),
            limits.default_concurrency as u64,
            limits.max_concurrency as u64,
        )?;
        let timeout_secs = parse_bounded(
            "timeout",
            self.timeout.as_deref(),
            limits.default_timeout_secs,
            limits.max_timeout_secs,
        )?;

        Ok(VerifyRequest {
            manifest_url,
            concurrency: concurrency as usize,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

/// Absent or blank uses `default`; anything else must be a non-negative
/// integer and is clamped to `1..=max`.
fn parse_bounded(
    name: &'static str,
    raw: Option<&str>,
    default: u64,
    max: u64,
) -> Result<u64, ApiError> {
    let value = match raw.map(str::trim) {
        None | Some("") => default,
        Some(text) => text.parse::<u64>().map_err(|_| ApiError::InvalidParameter {
            name,
            value: text.to_string(),
        })?,
    };
    Ok(value.clamp(1, max.max(1)))
}

pub async fn root(State(ctx): State<AppContext>) -> Json<Value> {
    Json(json!({
        "ok": true,
        "use": format!(
            "/verify?playlist=URL&conc={}&timeout={}",
            ctx.limits.default_concurrency, ctx.limits.default_timeout_secs
        ),
    }))
}

pub async fn verify(
    State(ctx): State<AppContext>,
    Query(params): Query<VerifyParams>,
) -> Result<Json<Report>, ApiError> {
    let request = params.into_request(&ctx.limits)?;
    engine_info!(
        "Verify {} conc={} timeout={}s",
        redact_url(&request.manifest_url),
        request.concurrency,
        request.timeout.as_secs()
    );
    let report = ctx.verifier.verify(request).await?;
    Ok(Json(report))
}
