use serde::{Serialize, Serializer};

use crate::{classify, ManifestEntry, Verdict};

/// What a single endpoint answered. `http_status == 0` means no response.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProbeOutcome {
    pub http_status: u16,
    pub content_type: String,
}

impl ProbeOutcome {
    pub fn new(http_status: u16, content_type: Option<&str>) -> Self {
        Self {
            http_status,
            content_type: content_type.unwrap_or_default().to_ascii_lowercase(),
        }
    }

    /// Terminal outcome when neither probe stage got a response.
    pub fn unreachable() -> Self {
        Self::default()
    }

    pub fn verdict(&self) -> Verdict {
        classify(self.http_status, &self.content_type)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EndpointResult {
    pub name: String,
    pub url: String,
    #[serde(rename = "http")]
    pub http_status: u16,
    #[serde(rename = "ctype")]
    pub content_type: String,
    #[serde(rename = "status")]
    pub verdict: Verdict,
}

impl EndpointResult {
    pub fn from_probe(entry: ManifestEntry, outcome: ProbeOutcome) -> Self {
        let verdict = outcome.verdict();
        Self {
            name: entry.name,
            url: entry.url,
            http_status: outcome.http_status,
            content_type: outcome.content_type,
            verdict,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    #[serde(rename = "count")]
    entry_count: usize,
    #[serde(rename = "took", serialize_with = "one_decimal")]
    elapsed_seconds: f64,
    items: Vec<EndpointResult>,
}

impl Report {
    /// The entry count is always derived from `items`.
    pub fn new(items: Vec<EndpointResult>, elapsed_seconds: f64) -> Self {
        Self {
            entry_count: items.len(),
            elapsed_seconds,
            items,
        }
    }

    pub fn entry_count(&self) -> usize {
        self.entry_count
    }

    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed_seconds
    }

    pub fn items(&self) -> &[EndpointResult] {
        &self.items
    }

    pub fn count_of(&self, verdict: Verdict) -> usize {
        self.items
            .iter()
            .filter(|item| item.verdict == verdict)
            .count()
    }
}

fn one_decimal<S: Serializer>(seconds: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64((seconds * 10.0).round() / 10.0)
}
