//! Save lifecycle for the journal view: in-flight flag and timed banners.

use std::time::{Duration, Instant};

/// How long a save banner stays visible.
pub const BANNER_TTL: Duration = Duration::from_secs(3);

/// Outcome shown in the banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Saved,
    Failed,
}

/// A transient save-outcome banner.
#[derive(Debug, Clone, Copy)]
pub struct Banner {
    pub kind: BannerKind,
    expires_at: Instant,
}

/// Tracks one in-flight save and the banner that follows it.
///
/// The draft text itself lives in the editor widget; this type only owns
/// the submission state. One save at a time, no retries.
#[derive(Debug, Default)]
pub struct EntrySaver {
    saving: bool,
    banner: Option<Banner>,
}

impl EntrySaver {
    pub fn new() -> Self {
        Self::default()
    }

    /// True between submitting an entry and its completion.
    pub fn is_saving(&self) -> bool {
        self.saving
    }

    /// Start a save. Returns the trimmed entry for the caller to submit,
    /// or `None` when the draft trims to empty or a save is in flight.
    pub fn begin_save(&mut self, draft: &str) -> Option<String> {
        let trimmed = draft.trim();
        if trimmed.is_empty() || self.saving {
            return None;
        }
        self.saving = true;
        Some(trimmed.to_string())
    }

    /// The save completed. Shows a `Saved` banner for [`BANNER_TTL`].
    pub fn save_succeeded(&mut self, now: Instant) {
        self.saving = false;
        self.banner = Some(Banner {
            kind: BannerKind::Saved,
            expires_at: now + BANNER_TTL,
        });
    }

    /// The save failed. Shows a `Failed` banner for [`BANNER_TTL`]; the
    /// caller keeps the draft so nothing is lost.
    pub fn save_failed(&mut self, now: Instant) {
        self.saving = false;
        self.banner = Some(Banner {
            kind: BannerKind::Failed,
            expires_at: now + BANNER_TTL,
        });
    }

    /// The banner to display at `now`, if one is still within its TTL.
    pub fn banner(&self, now: Instant) -> Option<Banner> {
        self.banner.filter(|b| now < b.expires_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_save_trims_and_rejects_blank() {
        let mut saver = EntrySaver::new();
        assert!(saver.begin_save("   \n").is_none());
        assert!(!saver.is_saving());

        let entry = saver.begin_save("  wrote some things today  ");
        assert_eq!(entry.as_deref(), Some("wrote some things today"));
        assert!(saver.is_saving());
    }

    #[test]
    fn test_begin_save_rejects_while_in_flight() {
        let mut saver = EntrySaver::new();
        saver.begin_save("first").unwrap();
        assert!(saver.begin_save("second").is_none());
    }

    #[test]
    fn test_banner_expires_after_ttl() {
        let mut saver = EntrySaver::new();
        let now = Instant::now();

        saver.begin_save("entry").unwrap();
        saver.save_succeeded(now);
        assert!(!saver.is_saving());
        assert_eq!(saver.banner(now).map(|b| b.kind), Some(BannerKind::Saved));
        assert!(
            saver
                .banner(now + BANNER_TTL + Duration::from_millis(1))
                .is_none()
        );
    }

    #[test]
    fn test_failed_save_shows_failure_banner_and_allows_retry() {
        let mut saver = EntrySaver::new();
        let now = Instant::now();

        saver.begin_save("entry").unwrap();
        saver.save_failed(now);
        assert_eq!(saver.banner(now).map(|b| b.kind), Some(BannerKind::Failed));

        // Not locked out after a failure.
        assert!(saver.begin_save("entry").is_some());
    }
}
