//! Streamcheck engine: manifest fetching, endpoint probing and verification fan-out.
mod decode;
mod engine;
mod fetch;
mod probe;
mod settings;
mod types;

pub use decode::{decode_text, DecodedText};
pub use engine::{run_verification, Verifier, Verify, VerifyRequest};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher};
pub use probe::{probe, ProbeSettings, ProbeStage, ProbeTransport, ReqwestTransport};
pub use settings::{EngineSettings, RequestHeaders};
pub use types::{FailureKind, FetchError, FetchMetadata, FetchOutput, ProbeFailure, VerifyError};
