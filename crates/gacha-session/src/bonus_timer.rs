//! Recurring daily-bonus check
//!
//! The slot math itself is pure and lives in `gacha_core::bonus`; this
//! module is only the periodic trigger. The first tick fires
//! immediately, matching a check-on-startup followed by a recurring
//! interval. The task stops when its handle is dropped so teardown
//! never leaks the timer.

use crate::session::Session;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

/// Recommended check interval; short enough that a slot boundary is
/// noticed promptly.
pub const BONUS_CHECK_INTERVAL: Duration = Duration::from_secs(60);

/// Handle to the recurring bonus check task.
///
/// Aborts the task on drop.
pub struct BonusChecker {
    handle: JoinHandle<()>,
}

impl BonusChecker {
    /// Stop the recurring check.
    pub fn abort(&self) {
        self.handle.abort();
    }
}

impl Drop for BonusChecker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Spawn the recurring check against a shared session.
///
/// The first check runs immediately; later checks run every
/// `interval`. Each grant is logged and persisted by the session.
pub fn spawn_bonus_checker(session: Arc<Mutex<Session>>, interval: Duration) -> BonusChecker {
    let handle = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;
            let mut session = session.lock().await;
            if let Some(granted) = session.check_daily_bonus() {
                log::info!("Daily bonus granted: {granted} credits");
            }
        }
    });
    BonusChecker { handle }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionConfig;
    use gacha_core::data::DAILY_BONUS_CREDITS;
    use gacha_core::Catalog;

    #[tokio::test]
    async fn test_checker_grants_once_per_slot() {
        let dir = tempfile::tempdir().unwrap();
        let config = SessionConfig::new(dir.path(), "http://127.0.0.1:1");
        let session = Session::start_with_catalog(config, Catalog::empty())
            .await
            .unwrap();
        let session = Arc::new(Mutex::new(session));

        let checker = spawn_bonus_checker(session.clone(), Duration::from_millis(10));
        tokio::time::sleep(Duration::from_millis(100)).await;
        checker.abort();

        // Several ticks fired, but only the first one in the slot grants
        let session = session.lock().await;
        assert_eq!(session.state().credits, DAILY_BONUS_CREDITS);
        assert!(session.state().last_daily_bonus.is_some());
    }
}
