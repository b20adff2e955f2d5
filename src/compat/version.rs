//! Version string comparison for browser release numbers
//!
//! Browser versions in the compatibility datasets are irregular: they may have
//! any number of segments ("18", "16.4", "124.0.6367"), wildcard segments
//! ("17.x") and pre-release suffixes ("18.0-beta"). Parsing them as floats
//! breaks on multi-digit minor versions ("18.10" vs "18.9"), so segments are
//! compared numerically one by one.

use std::cmp::Ordering;

/// Compare two version strings.
///
/// - Segments are split on `.` and parsed as integers; `x`, `*` and any other
///   non-numeric segment count as `0`.
/// - The shorter sequence is padded with zeros, so `"18"` equals `"18.0"`.
/// - When the numeric parts are equal, a version without a pre-release suffix
///   is greater than one with a suffix; two suffixes compare lexicographically.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let (a_numeric, a_suffix) = split_suffix(a);
    let (b_numeric, b_suffix) = split_suffix(b);

    let a_segments = parse_segments(a_numeric);
    let b_segments = parse_segments(b_numeric);
    let len = a_segments.len().max(b_segments.len());

    for i in 0..len {
        let left = a_segments.get(i).copied().unwrap_or(0);
        let right = b_segments.get(i).copied().unwrap_or(0);
        match left.cmp(&right) {
            Ordering::Equal => continue,
            other => return other,
        }
    }

    match (a_suffix, b_suffix) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(left), Some(right)) => left.cmp(right),
    }
}

/// Returns true when `version` lies within `[low, high]` (inclusive).
pub fn in_range(version: &str, low: &str, high: &str) -> bool {
    compare_versions(low, version) != Ordering::Greater
        && compare_versions(version, high) != Ordering::Greater
}

fn split_suffix(version: &str) -> (&str, Option<&str>) {
    match version.trim().split_once('-') {
        Some((numeric, suffix)) => (numeric, Some(suffix)),
        None => (version.trim(), None),
    }
}

fn parse_segments(numeric: &str) -> Vec<u64> {
    numeric
        .split('.')
        .map(|segment| segment.trim().parse::<u64>().unwrap_or(0))
        .collect()
}
