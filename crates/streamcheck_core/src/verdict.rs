use serde::Serialize;

/// Content-type fragments that identify a playable stream.
pub const STREAMING_MEDIA_TYPES: &[&str] = &[
    "application/vnd.apple.mpegurl",
    "application/x-mpegurl",
    "audio/x-mpegurl",
    "video/mp2t",
    "mpegurl",
    "mp2t",
];

const GONE_STATUSES: &[u16] = &[403, 404, 410, 451];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Verdict {
    #[serde(rename = "ONLINE")]
    Online,
    /// An HTML interstitial answered instead of the stream.
    #[serde(rename = "BLOQ")]
    Blocked,
    #[serde(rename = "OFF")]
    Offline,
}

/// Map a probe's status and content type to a verdict. First matching rule wins.
pub fn classify(status: u16, content_type: &str) -> Verdict {
    let content_type = content_type.to_ascii_lowercase();

    if status == 200
        && STREAMING_MEDIA_TYPES
            .iter()
            .any(|media| content_type.contains(media))
    {
        return Verdict::Online;
    }
    if content_type.contains("text/html") {
        return Verdict::Blocked;
    }
    if status == 0 || status >= 500 || GONE_STATUSES.contains(&status) {
        return Verdict::Offline;
    }
    Verdict::Offline
}
