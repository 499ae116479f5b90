//! Integration tests for the core building blocks (quota, file names, duration gate)
//!
//! Run with: cargo test --test core_modules_test

use chrono::{DateTime, TimeDelta, Utc};

fn t0() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2026-03-01T12:00:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

// ============================================================================
// Quota Tests
// ============================================================================

mod quota_tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tubegate::core::QuotaTracker;

    #[test]
    fn test_quota_blocks_until_window_elapses() {
        let quota = QuotaTracker::new(5);
        for _ in 0..5 {
            assert!(quota.can_download_at(1, t0()));
            quota.record_download(1);
        }

        for hours in [0, 1, 12, 23, 24] {
            assert!(!quota.can_download_at(1, t0() + TimeDelta::hours(hours)), "{}h", hours);
        }
        assert!(quota.can_download_at(1, t0() + TimeDelta::hours(24) + TimeDelta::milliseconds(1)));
        assert_eq!(quota.usage_at(1, t0() + TimeDelta::hours(25)), 0);
    }

    #[test]
    fn test_custom_window() {
        let quota = QuotaTracker::with_window(1, TimeDelta::minutes(10));
        quota.can_download_at(3, t0());
        quota.record_download(3);

        assert!(!quota.can_download_at(3, t0() + TimeDelta::minutes(10)));
        assert!(quota.can_download_at(3, t0() + TimeDelta::minutes(11)));
    }

    #[test]
    fn test_record_returns_running_count() {
        let quota = QuotaTracker::new(3);
        quota.can_download(9);
        assert_eq!(quota.record_download(9), 1);
        assert_eq!(quota.record_download(9), 2);
        assert_eq!(quota.usage(9), 2);
    }
}

// ============================================================================
// File Name Tests
// ============================================================================

mod file_name_tests {
    use pretty_assertions::assert_eq;
    use tubegate::core::utils::{sanitize_filename, unique_file_name, MAX_BASE_NAME_LEN};

    #[test]
    fn test_sanitize_is_total_and_bounded() {
        for name in [
            "",
            ".",
            "..",
            ".hidden",
            "../../etc/passwd",
            "Видео про котиков.mp4",
            "a/b\\c:d*e?f\"g<h>i|j.m4a",
            &"x".repeat(500),
        ] {
            let result = sanitize_filename(name);
            let base = result.rfind('.').map_or(result.as_str(), |dot| &result[..dot]);
            assert!(base.chars().count() <= MAX_BASE_NAME_LEN, "{:?}", name);
            assert!(base.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'), "{:?}", name);
        }
    }

    #[test]
    fn test_sanitize_is_idempotent_on_base() {
        for name in ["Rick Astley - Never Gonna.mp4", "plain", "ümlaut title.m4a"] {
            let once = sanitize_filename(name);
            assert_eq!(sanitize_filename(&once), once);
        }
    }

    #[test]
    fn test_unique_names_never_collide() {
        let names: std::collections::HashSet<String> = (0..200)
            .map(|_| unique_file_name(1, "same long title that will be truncated away", "mp4"))
            .collect();
        assert_eq!(names.len(), 200);
        assert!(names.iter().all(|name| name.ends_with(".mp4")));
    }
}

// ============================================================================
// Duration Gate Tests
// ============================================================================

mod gate_tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tubegate::download::{DurationPolicy, OptionSet};

    #[test]
    fn test_gate_is_monotonic() {
        let policy = DurationPolicy::default();
        let rank = |set: OptionSet| match set {
            OptionSet::Full => 0,
            OptionSet::AudioOnly => 1,
            OptionSet::Rejected => 2,
        };

        let mut previous = 0;
        for secs in (0..=7200).step_by(30) {
            let current = rank(policy.gate(secs));
            assert!(current >= previous, "gate regressed at {}s", secs);
            previous = current;
        }
    }

    #[test]
    fn test_documented_boundaries() {
        let policy = DurationPolicy::default();
        assert_eq!(policy.gate(1800), OptionSet::Full);
        assert_eq!(policy.gate(1801), OptionSet::AudioOnly);
        assert_eq!(policy.gate(3600), OptionSet::AudioOnly);
        assert_eq!(policy.gate(3601), OptionSet::Rejected);
    }
}
