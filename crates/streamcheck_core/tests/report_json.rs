use pretty_assertions::assert_eq;
use serde_json::json;
use streamcheck_core::{EndpointResult, ManifestEntry, ProbeOutcome, Report, Verdict};

fn result(name: &str, url: &str, outcome: ProbeOutcome) -> EndpointResult {
    EndpointResult::from_probe(ManifestEntry::new(name, url), outcome)
}

#[test]
fn report_serializes_to_the_wire_shape() {
    let report = Report::new(
        vec![
            result(
                "A",
                "http://a.test/s.m3u8",
                ProbeOutcome::new(200, Some("Application/VND.Apple.MpegURL")),
            ),
            result("B", "http://b.test/x", ProbeOutcome::unreachable()),
            result("C", "http://c.test/x", ProbeOutcome::new(200, Some("text/html"))),
        ],
        1.26,
    );

    let value = serde_json::to_value(&report).unwrap();

    assert_eq!(
        value,
        json!({
            "count": 3,
            "took": 1.3,
            "items": [
                {"name": "A", "url": "http://a.test/s.m3u8", "http": 200,
                 "ctype": "application/vnd.apple.mpegurl", "status": "ONLINE"},
                {"name": "B", "url": "http://b.test/x", "http": 0,
                 "ctype": "", "status": "OFF"},
                {"name": "C", "url": "http://c.test/x", "http": 200,
                 "ctype": "text/html", "status": "BLOQ"},
            ]
        })
    );
}

#[test]
fn count_always_matches_items() {
    let empty = Report::new(Vec::new(), 0.0);
    assert_eq!(empty.entry_count(), 0);
    assert!(empty.items().is_empty());

    let report = Report::new(
        vec![result("A", "http://a.test", ProbeOutcome::unreachable())],
        0.04,
    );
    assert_eq!(report.entry_count(), report.items().len());
    assert_eq!(report.count_of(Verdict::Offline), 1);
    assert_eq!(serde_json::to_value(&report).unwrap()["took"], json!(0.0));
}
