//! Streamcheck core: pure manifest parsing, classification and report types.
mod manifest;
mod report;
mod verdict;

pub use manifest::{parse_manifest, ManifestEntry, DIRECTIVE_MARKER, UNNAMED_PLACEHOLDER};
pub use report::{EndpointResult, ProbeOutcome, Report};
pub use verdict::{classify, Verdict, STREAMING_MEDIA_TYPES};
