//! Time-range normalization for window-bounded data queries.
//!
//! The CWA datastore endpoints accept an optional `(timeFrom, timeTo)` pair
//! and return unbounded payloads when the window is left open. Every tool
//! that queries a time-windowed dataset funnels its raw inputs through
//! [`resolve`], which fills in defaults, validates ordering, and clamps the
//! window length to the dataset's policy. Oversized windows are truncated,
//! never rejected; only malformed input is an error.
//!
//! `now` is injected by the caller so the function stays deterministic.

use chrono::{Duration, NaiveDateTime};
use thiserror::Error;

/// Timestamp pattern used by the CWA open-data endpoints.
pub const CWA_TIME_PATTERN: &str = "%Y-%m-%dT%H:%M:%S";

/// Timestamp pattern used by the date/timezone tools.
pub const LOCAL_TIME_PATTERN: &str = "%Y-%m-%d %H:%M:%S";

/// Invalid raw time input. Window-length violations never land here; they
/// are clamped silently.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimeRangeError {
    /// The timestamp text did not match the policy's pattern.
    #[error("unparseable timestamp '{value}' (expected pattern {pattern})")]
    Unparseable { value: String, pattern: &'static str },

    /// Both bounds were given and the end precedes the start.
    #[error("end time precedes start time")]
    EndBeforeStart,

    /// Only the end bound was given and the policy forbids it.
    #[error("end provided without start is not allowed")]
    EndWithoutStart,
}

/// A fully resolved query window.
///
/// Constructed only by [`resolve`]; `start <= end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl TimeWindow {
    /// Render both bounds with the given strftime pattern, ready to be sent
    /// as `timeFrom`/`timeTo` query parameters.
    pub fn to_query_strings(&self, pattern: &str) -> (String, String) {
        (
            self.start.format(pattern).to_string(),
            self.end.format(pattern).to_string(),
        )
    }

    /// Window length.
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

/// Per-call-site configuration for [`resolve`].
#[derive(Debug, Clone)]
pub struct ResolutionPolicy {
    /// Window start used when neither bound is supplied.
    pub default_start: NaiveDateTime,
    /// Window end used when neither bound is supplied.
    pub default_end: NaiveDateTime,
    /// Hard cap on the resolved window length.
    pub max_duration: Duration,
    /// Whether an end bound without a start bound is acceptable.
    pub allow_end_only: bool,
    /// strftime pattern the raw inputs must match.
    pub pattern: &'static str,
}

impl ResolutionPolicy {
    /// Look-back policy: defaults to `(now - max_duration, now)` and accepts
    /// an end-only input. Used by observation datasets (earthquake feed).
    pub fn trailing(now: NaiveDateTime, max_duration: Duration) -> Self {
        Self {
            default_start: now - max_duration,
            default_end: now,
            max_duration,
            allow_end_only: true,
            pattern: CWA_TIME_PATTERN,
        }
    }

    /// Look-ahead policy: defaults to `(now, now + max_duration)` and rejects
    /// an end-only input. Used by forecast datasets (township forecast).
    pub fn leading(now: NaiveDateTime, max_duration: Duration) -> Self {
        Self {
            default_start: now,
            default_end: now + max_duration,
            max_duration,
            allow_end_only: false,
            pattern: CWA_TIME_PATTERN,
        }
    }
}

/// Resolve a partially specified raw time range into a policy-compliant
/// window.
///
/// Four cases on input presence:
/// 1. neither bound: the policy defaults, verbatim;
/// 2. both bounds: reject `end < start`, otherwise truncate the end to
///    `start + max_duration`;
/// 3. start only: end is `start + max_duration`, pulled back to `now` when
///    it runs past `now` and the policy window exceeds 24 hours (floored at
///    `start` so ordering survives a future start);
/// 4. end only: derive `start = end - max_duration`, or reject if the
///    policy disallows an end-only input.
pub fn resolve(
    raw_start: Option<&str>,
    raw_end: Option<&str>,
    now: NaiveDateTime,
    policy: &ResolutionPolicy,
) -> Result<TimeWindow, TimeRangeError> {
    match (raw_start, raw_end) {
        (None, None) => Ok(TimeWindow {
            start: policy.default_start,
            end: policy.default_end,
        }),

        (Some(raw_start), Some(raw_end)) => {
            let start = parse(raw_start, policy.pattern)?;
            let end = parse(raw_end, policy.pattern)?;

            if end < start {
                return Err(TimeRangeError::EndBeforeStart);
            }

            let cap = start + policy.max_duration;
            Ok(TimeWindow {
                start,
                end: end.min(cap),
            })
        }

        (Some(raw_start), None) => {
            let start = parse(raw_start, policy.pattern)?;
            let candidate = start + policy.max_duration;

            // Observed asymmetry carried over from the evolved call sites:
            // only wide (>24h) look-back windows get pulled back to `now`.
            let end = if candidate > now && policy.max_duration > Duration::hours(24) {
                now.max(start)
            } else {
                candidate
            };

            Ok(TimeWindow { start, end })
        }

        (None, Some(raw_end)) => {
            if !policy.allow_end_only {
                return Err(TimeRangeError::EndWithoutStart);
            }

            let end = parse(raw_end, policy.pattern)?;
            Ok(TimeWindow {
                start: end - policy.max_duration,
                end,
            })
        }
    }
}

fn parse(value: &str, pattern: &'static str) -> Result<NaiveDateTime, TimeRangeError> {
    NaiveDateTime::parse_from_str(value, pattern).map_err(|_| TimeRangeError::Unparseable {
        value: value.to_string(),
        pattern,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(value: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(value, CWA_TIME_PATTERN).unwrap()
    }

    fn trailing_36h(now: &str) -> (NaiveDateTime, ResolutionPolicy) {
        let now = ts(now);
        (now, ResolutionPolicy::trailing(now, Duration::hours(36)))
    }

    fn leading_24h(now: &str) -> (NaiveDateTime, ResolutionPolicy) {
        let now = ts(now);
        (now, ResolutionPolicy::leading(now, Duration::hours(24)))
    }

    #[test]
    fn no_inputs_returns_defaults_verbatim() {
        for now in ["2025-01-01T00:00:00", "2025-06-15T23:59:59"] {
            let (now, policy) = trailing_36h(now);
            let window = resolve(None, None, now, &policy).unwrap();
            assert_eq!(window.start, policy.default_start);
            assert_eq!(window.end, policy.default_end);
        }
    }

    #[test]
    fn trailing_defaults_span_the_lookback() {
        let (now, policy) = trailing_36h("2025-03-10T12:00:00");
        let window = resolve(None, None, now, &policy).unwrap();
        assert_eq!(window.start, ts("2025-03-09T00:00:00"));
        assert_eq!(window.end, now);
    }

    #[test]
    fn both_inputs_within_policy_pass_through() {
        let (now, policy) = trailing_36h("2025-01-10T00:00:00");
        let window = resolve(
            Some("2025-01-01T06:00:00"),
            Some("2025-01-02T06:00:00"),
            now,
            &policy,
        )
        .unwrap();
        assert_eq!(window.start, ts("2025-01-01T06:00:00"));
        assert_eq!(window.end, ts("2025-01-02T06:00:00"));
    }

    #[test]
    fn oversized_window_is_clamped_not_rejected() {
        // 36h cap: four-day request shrinks to start + 36h.
        let (now, policy) = trailing_36h("2025-01-10T00:00:00");
        let window = resolve(
            Some("2025-01-01T00:00:00"),
            Some("2025-01-05T00:00:00"),
            now,
            &policy,
        )
        .unwrap();
        assert_eq!(window.start, ts("2025-01-01T00:00:00"));
        assert_eq!(window.end, ts("2025-01-02T12:00:00"));
        assert!(window.duration() <= policy.max_duration);
    }

    #[test]
    fn end_before_start_is_a_hard_error() {
        let (now, policy) = trailing_36h("2025-05-01T00:00:00");
        let err = resolve(
            Some("2025-04-02T00:00:00"),
            Some("2025-04-01T00:00:00"),
            now,
            &policy,
        )
        .unwrap_err();
        assert_eq!(err, TimeRangeError::EndBeforeStart);
        assert!(err.to_string().contains("precedes"));
    }

    #[test]
    fn start_only_wide_window_clamps_to_now() {
        let (now, policy) = trailing_36h("2025-01-01T12:00:00");
        let window = resolve(Some("2025-01-01T00:00:00"), None, now, &policy).unwrap();
        assert_eq!(window.start, ts("2025-01-01T00:00:00"));
        assert_eq!(window.end, now);
    }

    #[test]
    fn start_only_wide_window_in_the_past_is_not_clamped() {
        let (now, policy) = trailing_36h("2025-06-01T00:00:00");
        let window = resolve(Some("2025-01-01T00:00:00"), None, now, &policy).unwrap();
        assert_eq!(window.end, ts("2025-01-02T12:00:00"));
    }

    #[test]
    fn start_only_narrow_window_is_never_clamped_to_now() {
        // 24h policy: candidate end is in the future but stays untouched.
        let (now, policy) = leading_24h("2025-01-01T06:00:00");
        let window = resolve(Some("2025-01-01T00:00:00"), None, now, &policy).unwrap();
        assert_eq!(window.end, ts("2025-01-02T00:00:00"));
    }

    #[test]
    fn start_only_future_start_keeps_ordering() {
        // Start after `now` with a wide policy: the clamp floors at start
        // instead of producing an inverted window.
        let (now, policy) = trailing_36h("2025-01-01T00:00:00");
        let window = resolve(Some("2025-02-01T00:00:00"), None, now, &policy).unwrap();
        assert_eq!(window.start, ts("2025-02-01T00:00:00"));
        assert_eq!(window.end, ts("2025-02-01T00:00:00"));
        assert!(window.start <= window.end);
    }

    #[test]
    fn end_only_rejected_when_disallowed() {
        let (now, policy) = leading_24h("2025-01-01T00:00:00");
        let err = resolve(None, Some("2025-01-01T12:00:00"), now, &policy).unwrap_err();
        assert_eq!(err, TimeRangeError::EndWithoutStart);
    }

    #[test]
    fn end_only_derives_start_when_allowed() {
        let (now, policy) = trailing_36h("2025-02-02T00:00:00");
        let window = resolve(None, Some("2025-02-01T12:00:00"), now, &policy).unwrap();
        assert_eq!(window.start, ts("2025-01-31T00:00:00"));
        assert_eq!(window.end, ts("2025-02-01T12:00:00"));
    }

    #[test]
    fn unparseable_inputs_are_reported_with_the_offending_text() {
        let (now, policy) = trailing_36h("2025-01-01T00:00:00");
        for bad in ["2025-01-01", "not a time", "2025/01/01T00:00:00", ""] {
            let err = resolve(Some(bad), None, now, &policy).unwrap_err();
            match err {
                TimeRangeError::Unparseable { value, .. } => assert_eq!(value, bad),
                other => panic!("expected Unparseable, got {other:?}"),
            }
        }
    }

    #[test]
    fn resolved_windows_respect_cap_and_ordering() {
        let (now, policy) = trailing_36h("2025-04-15T09:30:00");
        let cases: [(Option<&str>, Option<&str>); 4] = [
            (None, None),
            (Some("2025-04-14T00:00:00"), Some("2025-04-20T00:00:00")),
            (Some("2025-04-14T00:00:00"), None),
            (None, Some("2025-04-15T00:00:00")),
        ];
        for (raw_start, raw_end) in cases {
            let window = resolve(raw_start, raw_end, now, &policy).unwrap();
            assert!(window.start <= window.end, "{raw_start:?}/{raw_end:?}");
            assert!(
                window.duration() <= policy.max_duration,
                "{raw_start:?}/{raw_end:?}"
            );
        }
    }

    #[test]
    fn query_strings_round_trip_the_pattern() {
        let (now, policy) = trailing_36h("2025-12-31T23:00:00");
        let window = resolve(
            Some("2025-12-30T01:02:03"),
            Some("2025-12-30T04:05:06"),
            now,
            &policy,
        )
        .unwrap();
        let (from, to) = window.to_query_strings(CWA_TIME_PATTERN);
        assert_eq!(from, "2025-12-30T01:02:03");
        assert_eq!(to, "2025-12-30T04:05:06");
    }

    #[test]
    fn determinism_for_identical_inputs() {
        let (now, policy) = trailing_36h("2025-07-07T07:07:07");
        let a = resolve(Some("2025-07-06T00:00:00"), None, now, &policy).unwrap();
        let b = resolve(Some("2025-07-06T00:00:00"), None, now, &policy).unwrap();
        assert_eq!(a, b);
    }
}
