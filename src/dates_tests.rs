use super::{progress_between, resolve_date_input_from};
use chrono::NaiveDate;

fn day(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").expect("test date")
}

#[test]
fn exact_kind_returns_trimmed_literal() {
    let today = day("2024-03-01");
    assert_eq!(
        resolve_date_input_from("exact", " 2024-06-15 ", today),
        "2024-06-15"
    );
}

#[test]
fn unit_colon_count_offsets_from_today() {
    let today = day("2024-03-01");
    assert_eq!(resolve_date_input_from("relative", "days:10", today), "2024-03-11");
    assert_eq!(resolve_date_input_from("relative", "weeks:2", today), "2024-03-15");
    // months are 30-day blocks
    assert_eq!(resolve_date_input_from("relative", "months:1", today), "2024-03-31");
}

#[test]
fn bare_count_uses_kind_as_unit() {
    let today = day("2024-03-01");
    assert_eq!(resolve_date_input_from("days", "3", today), "2024-03-04");
    assert_eq!(resolve_date_input_from("weeks", "1", today), "2024-03-08");
}

#[test]
fn unparseable_input_resolves_empty() {
    let today = day("2024-03-01");
    assert_eq!(resolve_date_input_from("", "days:3", today), "");
    assert_eq!(resolve_date_input_from("days", "soon", today), "");
    assert_eq!(resolve_date_input_from("relative", "days:soon", today), "");
    assert_eq!(resolve_date_input_from("relative", "fortnights:2", today), "");
}

#[test]
fn progress_is_clamped_and_truncated() {
    let start = "2024-01-01";
    let end = "2024-01-11";
    assert_eq!(progress_between(start, end, day("2023-12-25")), Some(0));
    assert_eq!(progress_between(start, end, day("2024-01-01")), Some(0));
    assert_eq!(progress_between(start, end, day("2024-01-06")), Some(50));
    assert_eq!(progress_between(start, end, day("2024-01-11")), Some(100));
    assert_eq!(progress_between(start, end, day("2024-02-01")), Some(100));
}

#[test]
fn progress_is_monotone_in_today() {
    let mut last = 0;
    for offset in 0..30 {
        let today = day("2024-01-01") + chrono::Duration::days(offset);
        let pct = progress_between("2024-01-05", "2024-01-20", today).expect("valid range");
        assert!(pct >= last, "progress regressed at offset {offset}");
        assert!(pct <= 100);
        last = pct;
    }
}

#[test]
fn degenerate_ranges_yield_no_progress() {
    let today = day("2024-01-06");
    assert_eq!(progress_between("", "2024-01-11", today), None);
    assert_eq!(progress_between("2024-01-01", "", today), None);
    assert_eq!(progress_between("not-a-date", "2024-01-11", today), None);
    // inverted and empty ranges
    assert_eq!(progress_between("2024-01-11", "2024-01-01", today), None);
    assert_eq!(progress_between("2024-01-11", "2024-01-11", today), None);
}
