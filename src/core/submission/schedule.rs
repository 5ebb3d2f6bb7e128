//! Delayed navigation after a successful submission
//!
//! The delay is a grace period for reading the confirmation. The task is
//! aborted when cancelled or dropped, so a torn-down controller never
//! navigates late.

use crate::adapters::navigation::{Navigator, Route};
use crate::logging::duration_ms;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// A navigation scheduled to run after a fixed delay
#[derive(Debug)]
pub struct ScheduledNavigation {
    handle: Option<JoinHandle<()>>,
    route: Route,
    /// Flips to `true` once the navigation ran; closed if the task is aborted
    done: watch::Receiver<bool>,
}

impl ScheduledNavigation {
    /// Schedules `navigator.navigate(route)` after `delay`
    ///
    /// The delay runs from this call, not from when the task is first polled.
    /// Must be called from within a tokio runtime.
    pub fn spawn(navigator: Arc<dyn Navigator>, route: Route, delay: Duration) -> Self {
        let deadline = Instant::now() + delay;
        let target = route.clone();
        let (done_tx, done) = watch::channel(false);
        let handle = tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            navigator.navigate(&target);
            done_tx.send_replace(true);
        });

        tracing::debug!(route = %route, delay_ms = duration_ms(delay), "Navigation scheduled");

        Self {
            handle: Some(handle),
            route,
            done,
        }
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    /// True once the navigation ran or was aborted
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Receiver resolving when the navigation runs
    ///
    /// Waiting on it does not keep the navigation alive: if the schedule is
    /// cancelled or dropped the channel closes instead.
    pub fn completion(&self) -> watch::Receiver<bool> {
        self.done.clone()
    }

    /// Suppresses the navigation if it has not run yet
    pub fn cancel(mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            tracing::debug!(route = %self.route, "Scheduled navigation cancelled");
        }
    }

    /// Waits until the navigation has run or was cancelled
    ///
    /// Returns `true` if the navigation ran.
    pub async fn wait(&self) -> bool {
        wait_for_completion(self.completion()).await
    }
}

/// Resolves `true` once the navigation ran, `false` if it was aborted first
pub async fn wait_for_completion(mut done: watch::Receiver<bool>) -> bool {
    done.wait_for(|ran| *ran).await.is_ok()
}

impl Drop for ScheduledNavigation {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder(Mutex<Vec<Route>>);

    impl Navigator for Recorder {
        fn navigate(&self, route: &Route) {
            self.0.lock().unwrap().push(route.clone());
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_navigates_after_delay() {
        let recorder = Arc::new(Recorder::default());
        let scheduled = ScheduledNavigation::spawn(
            recorder.clone(),
            Route::default(),
            Duration::from_millis(2000),
        );

        assert!(!scheduled.is_finished());
        assert!(scheduled.wait().await);

        assert_eq!(recorder.0.lock().unwrap().as_slice(), &[Route::default()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_suppresses_navigation() {
        let recorder = Arc::new(Recorder::default());
        let scheduled = ScheduledNavigation::spawn(
            recorder.clone(),
            Route::default(),
            Duration::from_millis(2000),
        );
        let completion = scheduled.completion();

        scheduled.cancel();

        assert!(!wait_for_completion(completion).await);
        tokio::time::sleep(Duration::from_millis(5000)).await;
        assert!(recorder.0.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_suppresses_navigation() {
        let recorder = Arc::new(Recorder::default());
        drop(ScheduledNavigation::spawn(
            recorder.clone(),
            Route::default(),
            Duration::from_millis(10),
        ));

        tokio::time::sleep(Duration::from_millis(100)).await;

        assert!(recorder.0.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_completion_after_navigation_resolves_immediately() {
        let recorder = Arc::new(Recorder::default());
        let scheduled =
            ScheduledNavigation::spawn(recorder.clone(), Route::default(), Duration::ZERO);

        tokio::time::sleep(Duration::from_millis(10)).await;

        assert!(scheduled.is_finished());
        assert!(wait_for_completion(scheduled.completion()).await);
    }
}
