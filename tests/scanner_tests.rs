// Line scanner tests: label/value extraction, malformed lines, line limit

use procsnap::scanner::{Pair, ScanItem, Scanner, ValueFault};

fn pairs(buf: &[u8]) -> Vec<Pair<'_>> {
    Scanner::new(buf)
        .filter_map(|item| match item {
            ScanItem::Pair(p) => Some(p),
            ScanItem::LimitExceeded { .. } => None,
        })
        .collect()
}

#[test]
fn test_scans_label_and_value_ignoring_units() {
    let got = pairs(b"MemTotal:    16384000 kB\nMemFree:     512000 kB\n");
    assert_eq!(got.len(), 2);
    assert_eq!(got[0].label, b"MemTotal");
    assert_eq!(got[0].value, 16_384_000);
    assert_eq!(got[0].fault, None);
    assert_eq!(got[1].label, b"MemFree");
    assert_eq!(got[1].value, 512_000);
}

#[test]
fn test_label_trailing_whitespace_is_trimmed() {
    let got = pairs(b"Cached \t:  42 kB\n");
    assert_eq!(got[0].label, b"Cached");
    assert_eq!(got[0].value, 42);
}

#[test]
fn test_value_without_unit_and_without_trailing_newline() {
    let got = pairs(b"HugePages_Total:       0\nHugepagesize:    2048");
    assert_eq!(got.len(), 2);
    assert_eq!(got[0].value, 0);
    assert_eq!(got[0].fault, None);
    assert_eq!(got[1].label, b"Hugepagesize");
    assert_eq!(got[1].value, 2048);
}

#[test]
fn test_missing_digits_yield_zero_and_fault() {
    let got = pairs(b"MemTotal:   kB\nMemFree: 5 kB\n");
    assert_eq!(got[0].value, 0);
    assert_eq!(got[0].fault, Some(ValueFault::Missing));
    assert_eq!(got[1].label, b"MemFree");
    assert_eq!(got[1].value, 5);
}

#[test]
fn test_overflowing_value_yields_zero_and_scan_continues() {
    let got = pairs(b"MemTotal: 99999999999999999999999 kB\nMemFree: 5 kB\n");
    assert_eq!(got[0].value, 0);
    assert_eq!(got[0].fault, Some(ValueFault::Overflow));
    assert_eq!(got[1].value, 5);
    assert_eq!(got[1].fault, None);
}

#[test]
fn test_u64_max_fits() {
    let got = pairs(b"Big: 18446744073709551615\n");
    assert_eq!(got[0].value, u64::MAX);
    assert_eq!(got[0].fault, None);
}

#[test]
fn test_trailing_garbage_does_not_desync_next_line() {
    let got = pairs(b"MemTotal: 12abc: 77 kB extra\nMemFree: 5 kB\n");
    assert_eq!(got[0].value, 12);
    assert_eq!(got[1].label, b"MemFree");
    assert_eq!(got[1].value, 5);
}

#[test]
fn test_lines_without_delimiter_are_skipped() {
    let got = pairs(b"garbage line\n\nMemFree: 5 kB\ntrailing fragment");
    assert_eq!(got.len(), 1);
    assert_eq!(got[0].label, b"MemFree");
}

#[test]
fn test_empty_buffer_yields_nothing() {
    assert_eq!(Scanner::new(b"").count(), 0);
}

#[test]
fn test_scanning_twice_is_identical() {
    let buf = b"MemTotal: 1 kB\nFoo: bar\nMemFree: 2 kB\n";
    let a: Vec<_> = Scanner::new(buf).collect();
    let b: Vec<_> = Scanner::new(buf).collect();
    assert_eq!(a, b);
}

#[test]
fn test_line_limit_exceeded_is_reported_once() {
    let buf = b"A: 1\nB: 2\nC: 3\nD: 4\n";
    let items: Vec<_> = Scanner::with_line_limit(buf, 2).collect();
    assert_eq!(items.len(), 3);
    assert!(matches!(items[1], ScanItem::Pair(p) if p.label == b"B"));
    assert_eq!(items[2], ScanItem::LimitExceeded { limit: 2 });
}

#[test]
fn test_line_limit_exactly_reached_is_not_reported() {
    let buf = b"A: 1\nB: 2\n";
    let items: Vec<_> = Scanner::with_line_limit(buf, 2).collect();
    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|i| matches!(i, ScanItem::Pair(_))));
}
