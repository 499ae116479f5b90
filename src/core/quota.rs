use chrono::{DateTime, TimeDelta, Utc};
use dashmap::mapref::one::RefMut;
use dashmap::DashMap;

use crate::core::config;

/// Download counter for one user inside the current quota window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserQuota {
    pub count: u32,
    /// Downloads reserved at selection time that have not finished yet.
    pub pending: u32,
    pub window_start: DateTime<Utc>,
}

impl UserQuota {
    fn fresh(now: DateTime<Utc>) -> Self {
        Self {
            count: 0,
            pending: 0,
            window_start: now,
        }
    }

    fn is_expired(&self, now: DateTime<Utc>, window: TimeDelta) -> bool {
        now - self.window_start > window
    }
}

/// Per-user rolling daily download quota.
///
/// Entries are created on first sight of a user and reset lazily: the first
/// check more than one window after `window_start` zeroes the counter.
/// Backed by a sharded concurrent map, so increments for one user are
/// serialized while different users do not wait on each other.
///
/// # Example
///
/// ```
/// use tubegate::core::quota::QuotaTracker;
///
/// let quota = QuotaTracker::new(2);
/// assert!(quota.can_download(1));
/// quota.record_download(1);
/// quota.record_download(1);
/// assert!(!quota.can_download(1));
/// ```
#[derive(Debug)]
pub struct QuotaTracker {
    entries: DashMap<u64, UserQuota>,
    max_daily: u32,
    window: TimeDelta,
}

impl QuotaTracker {
    /// Creates a tracker with a 24h window. `max_daily` is clamped to at least 1.
    pub fn new(max_daily: u32) -> Self {
        Self::with_window(max_daily, TimeDelta::hours(config::quota::WINDOW_HOURS))
    }

    /// Creates a tracker with a custom window length.
    pub fn with_window(max_daily: u32, window: TimeDelta) -> Self {
        Self {
            entries: DashMap::new(),
            max_daily: max_daily.max(1),
            window,
        }
    }

    /// Creates a tracker from `MAX_DAILY_DOWNLOADS`.
    pub fn from_env() -> Self {
        Self::new(*config::quota::MAX_DAILY_DOWNLOADS)
    }

    pub fn max_daily(&self) -> u32 {
        self.max_daily
    }

    /// Returns `true` if the user may start another download right now.
    pub fn can_download(&self, user_id: u64) -> bool {
        self.can_download_at(user_id, Utc::now())
    }

    /// Same as [`can_download`](Self::can_download) with an explicit clock.
    pub fn can_download_at(&self, user_id: u64, now: DateTime<Utc>) -> bool {
        let entry = self.current_entry(user_id, now);
        entry.count + entry.pending < self.max_daily
    }

    /// Reserves one download slot if the user still has headroom.
    ///
    /// Check and reservation happen under the same map shard lock, so two
    /// concurrent selections can never both take the last slot. The slot
    /// counts against the quota only once the reservation is committed;
    /// dropping it uncommitted gives the slot back.
    pub fn try_reserve(&self, user_id: u64) -> Option<QuotaReservation<'_>> {
        self.try_reserve_at(user_id, Utc::now())
    }

    pub fn try_reserve_at(&self, user_id: u64, now: DateTime<Utc>) -> Option<QuotaReservation<'_>> {
        let mut entry = self.current_entry(user_id, now);
        if entry.count + entry.pending >= self.max_daily {
            return None;
        }
        entry.pending += 1;

        Some(QuotaReservation {
            tracker: self,
            user_id,
            committed: false,
        })
    }

    fn current_entry(&self, user_id: u64, now: DateTime<Utc>) -> RefMut<'_, u64, UserQuota> {
        let mut entry = self.entries.entry(user_id).or_insert_with(|| UserQuota::fresh(now));

        if entry.is_expired(now, self.window) {
            log::debug!("Quota window expired for user {}, resetting counter", user_id);
            // in-flight reservations survive the reset
            let pending = entry.pending;
            *entry = UserQuota {
                pending,
                ..UserQuota::fresh(now)
            };
        }

        entry
    }

    fn settle(&self, user_id: u64, completed: bool) -> u32 {
        let mut entry = self
            .entries
            .entry(user_id)
            .or_insert_with(|| UserQuota::fresh(Utc::now()));
        entry.pending = entry.pending.saturating_sub(1);
        if completed {
            entry.count += 1;
        }
        entry.count
    }

    /// Counts one completed download and returns the new count.
    ///
    /// # Panics
    ///
    /// Panics if [`can_download`](Self::can_download) was never called for this
    /// user: recording without a prior check is an ordering bug in the caller.
    #[allow(clippy::panic)]
    pub fn record_download(&self, user_id: u64) -> u32 {
        match self.entries.get_mut(&user_id) {
            Some(mut entry) => {
                entry.count += 1;
                entry.count
            }
            None => panic!(
                "record_download called for user {} without a prior can_download check",
                user_id
            ),
        }
    }

    /// Downloads counted in the user's current window; expired or unknown users read as 0.
    pub fn usage(&self, user_id: u64) -> u32 {
        self.usage_at(user_id, Utc::now())
    }

    pub fn usage_at(&self, user_id: u64, now: DateTime<Utc>) -> u32 {
        self.entries
            .get(&user_id)
            .filter(|entry| !entry.is_expired(now, self.window))
            .map(|entry| entry.count)
            .unwrap_or(0)
    }

    /// Snapshot of the stored entry, if any.
    pub fn snapshot(&self, user_id: u64) -> Option<UserQuota> {
        self.entries.get(&user_id).map(|entry| *entry)
    }
}

/// A download slot held between selection and delivery.
///
/// [`commit`](Self::commit) turns it into a counted download. Dropping it
/// without committing releases the slot, so failed jobs never consume quota.
#[derive(Debug)]
#[must_use = "dropping a reservation releases the slot immediately"]
pub struct QuotaReservation<'a> {
    tracker: &'a QuotaTracker,
    user_id: u64,
    committed: bool,
}

impl QuotaReservation<'_> {
    /// Counts the download and returns the user's new count.
    pub fn commit(mut self) -> u32 {
        self.committed = true;
        self.tracker.settle(self.user_id, true)
    }
}

impl Drop for QuotaReservation<'_> {
    fn drop(&mut self) {
        if !self.committed {
            log::debug!("Releasing unused quota slot for user {}", self.user_id);
            self.tracker.settle(self.user_id, false);
        }
    }
}
