//! Specs results - normalized outcome of a specs run
//!
//! Testers report loosely-typed JSON (durations may be numbers or strings,
//! stats may be missing). [`SpecsResults::create_from_raw`] turns that into a
//! stable record with a single `pass` flag.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Duration as reported by testers: a number or a numeric string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawDuration {
    Millis(f64),
    Text(String),
}

impl RawDuration {
    fn to_millis(&self) -> u64 {
        match self {
            RawDuration::Millis(ms) if ms.is_finite() && *ms > 0.0 => ms.round() as u64,
            RawDuration::Millis(_) => 0,
            RawDuration::Text(text) => text
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|ms| ms.is_finite() && *ms > 0.0)
                .map(|ms| ms.round() as u64)
                .unwrap_or(0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestError {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

/// One test as reported by the tester
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTest {
    pub title: String,
    pub pass: bool,
    #[serde(default)]
    pub err: Option<TestError>,
    #[serde(default)]
    pub duration: Option<RawDuration>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawStats {
    #[serde(default)]
    pub start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end: Option<DateTime<Utc>>,
    #[serde(default)]
    pub duration: Option<RawDuration>,
    #[serde(default)]
    pub failures: Option<u64>,
}

/// Raw output of a specs run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawResults {
    #[serde(default)]
    pub tests: Vec<RawTest>,
    #[serde(default)]
    pub stats: RawStats,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestResult {
    pub title: String,
    pub pass: bool,
    pub err: Option<TestError>,
    pub duration: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    /// Milliseconds
    pub duration: u64,
}

/// Normalized specs outcome
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecsResults {
    pub tests: Vec<TestResult>,
    pub stats: Stats,
    pub pass: bool,
}

impl SpecsResults {
    pub fn create_from_raw(raw: RawResults) -> Self {
        let failed_tests = raw.tests.iter().filter(|t| !t.pass).count() as u64;
        let failures = raw.stats.failures.unwrap_or(0).max(failed_tests);

        let tests: Vec<TestResult> = raw
            .tests
            .into_iter()
            .map(|test| TestResult {
                title: test.title,
                pass: test.pass,
                err: test.err,
                duration: test.duration.as_ref().map_or(0, RawDuration::to_millis),
            })
            .collect();

        let duration = match (&raw.stats.duration, raw.stats.start, raw.stats.end) {
            (Some(duration), _, _) => duration.to_millis(),
            (None, Some(start), Some(end)) => {
                u64::try_from((end - start).num_milliseconds()).unwrap_or(0)
            }
            _ => tests.iter().map(|t| t.duration).sum(),
        };

        Self {
            tests,
            stats: Stats {
                start: raw.stats.start,
                end: raw.stats.end,
                duration,
            },
            pass: failures == 0,
        }
    }

    pub fn failed_tests(&self) -> impl Iterator<Item = &TestResult> {
        self.tests.iter().filter(|t| !t.pass)
    }

    pub fn serialize(&self) -> Self {
        self.clone()
    }

    pub fn deserialize(record: Self) -> Self {
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(json: &str) -> RawResults {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn all_passing_tests_pass() {
        let results = SpecsResults::create_from_raw(raw(
            r#"{"tests":[{"title":"works","pass":true,"duration":3}],"stats":{"failures":0}}"#,
        ));
        assert!(results.pass);
        assert_eq!(results.tests[0].duration, 3);
    }

    #[test]
    fn failing_test_fails_even_without_stats() {
        let results = SpecsResults::create_from_raw(raw(
            r#"{"tests":[{"title":"a","pass":true},{"title":"b","pass":false,"err":{"message":"nope"}}]}"#,
        ));
        assert!(!results.pass);
        assert_eq!(results.failed_tests().count(), 1);
    }

    #[test]
    fn reported_failures_fail_the_run() {
        let results = SpecsResults::create_from_raw(raw(r#"{"tests":[],"stats":{"failures":2}}"#));
        assert!(!results.pass);
    }

    #[test]
    fn empty_run_passes() {
        assert!(SpecsResults::create_from_raw(RawResults::default()).pass);
    }

    #[test]
    fn string_durations_are_coerced() {
        let results = SpecsResults::create_from_raw(raw(
            r#"{"tests":[{"title":"t","pass":true,"duration":"12"}],"stats":{"duration":"40"}}"#,
        ));
        assert_eq!(results.tests[0].duration, 12);
        assert_eq!(results.stats.duration, 40);
    }

    #[test]
    fn duration_falls_back_to_timestamps() {
        let results = SpecsResults::create_from_raw(raw(
            r#"{"stats":{"start":"2024-01-01T00:00:00Z","end":"2024-01-01T00:00:01.500Z"}}"#,
        ));
        assert_eq!(results.stats.duration, 1500);
    }

    #[test]
    fn serialized_results_round_trip() {
        let results = SpecsResults::create_from_raw(raw(
            r#"{"tests":[{"title":"t","pass":false,"err":{"message":"m","stack":"s"}}]}"#,
        ));
        let json = serde_json::to_string(&results.serialize()).unwrap();
        let back = SpecsResults::deserialize(serde_json::from_str(&json).unwrap());
        assert_eq!(back, results);
    }
}
