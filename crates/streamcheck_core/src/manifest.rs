/// Line prefix that introduces a named entry.
pub const DIRECTIVE_MARKER: &str = "#EXTINF";

/// Display name used when a directive carries no name.
pub const UNNAMED_PLACEHOLDER: &str = "UNNAMED";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    pub name: String,
    pub url: String,
}

impl ManifestEntry {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// Extract `(name, url)` pairs from playlist text, in source order.
///
/// Each directive line names the entry; the line right after it must be an
/// http(s) URL or the entry is dropped. Never fails.
pub fn parse_manifest(text: &str) -> Vec<ManifestEntry> {
    let lines: Vec<&str> = text.lines().collect();
    let mut entries = Vec::new();

    for (idx, line) in lines.iter().enumerate() {
        if !line.starts_with(DIRECTIVE_MARKER) {
            continue;
        }
        let Some(next) = lines.get(idx + 1) else {
            continue;
        };
        let url = next.trim();
        if !has_http_scheme(url) {
            continue;
        }
        entries.push(ManifestEntry::new(display_name(line), url));
    }

    entries
}

fn display_name(directive: &str) -> String {
    // No comma: the whole directive line stands in as the name.
    let raw = directive
        .split_once(',')
        .map_or(directive, |(_, name)| name)
        .trim();
    if raw.is_empty() {
        UNNAMED_PLACEHOLDER.to_string()
    } else {
        raw.to_string()
    }
}

fn has_http_scheme(candidate: &str) -> bool {
    ["http://", "https://"].iter().any(|scheme| {
        candidate
            .get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}
