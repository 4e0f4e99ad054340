//! ═══════════════════════════════════════════════════════════════════════════════
//! SCHEDULER — Cancellable Periodic Ticks
//! ═══════════════════════════════════════════════════════════════════════════════
//!
//! A view owns at most one `SessionDriver`. The driver owns the session behind
//! a mutex and at most one running `ScheduledTask`. Stopping, changing span,
//! or dropping the driver cancels the outstanding task.
//!
//! Every tick re-checks its task's token after taking the session lock, so no
//! sample lands in the window once the task has been cancelled.
//! ═══════════════════════════════════════════════════════════════════════════════

use parking_lot::Mutex;
use std::ops::ControlFlow;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Notify};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::session::{Phase, SessionSnapshot, SimulationSession};
use crate::window::WindowSpan;

// ═══════════════════════════════════════════════════════════════════════════════
// CANCEL TOKEN
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Default)]
struct TokenInner {
    cancelled: AtomicBool,
    notify: Notify,
}

/// Shared one-shot cancellation flag
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    inner: Arc<TokenInner>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Idempotent
    pub fn cancel(&self) {
        if !self.inner.cancelled.swap(true, Ordering::SeqCst) {
            self.inner.notify.notify_waiters();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::SeqCst)
    }

    /// Resolves once `cancel` has been called
    pub async fn cancelled(&self) {
        loop {
            let notified = self.inner.notify.notified();
            if self.is_cancelled() {
                return;
            }
            notified.await;
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// SCHEDULED TASK
// ═══════════════════════════════════════════════════════════════════════════════

/// Handle to a periodic task; cancelled on drop
#[derive(Debug)]
pub struct ScheduledTask {
    token: CancelToken,
    handle: Option<JoinHandle<()>>,
}

impl ScheduledTask {
    /// Run `step` every `period`, first after one full period, until it
    /// breaks or the task is cancelled. `step` gets the task's token so it can
    /// re-check cancellation after blocking. Must be called inside a tokio runtime.
    pub fn every<F>(period: Duration, mut step: F) -> Self
    where
        F: FnMut(&CancelToken) -> ControlFlow<()> + Send + 'static,
    {
        let token = CancelToken::new();
        let child = token.clone();
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    biased;
                    _ = child.cancelled() => break,
                    _ = interval.tick() => {
                        if child.is_cancelled() || step(&child).is_break() {
                            break;
                        }
                    }
                }
            }
        });
        Self {
            token,
            handle: Some(handle),
        }
    }

    pub fn cancel(&mut self) {
        self.token.cancel();
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, |h| h.is_finished())
    }
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        self.cancel();
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// SESSION DRIVER
// ═══════════════════════════════════════════════════════════════════════════════

/// Binds one session to its tick schedule and publishes snapshots
#[derive(Debug)]
pub struct SessionDriver {
    session: Arc<Mutex<SimulationSession>>,
    task: Option<ScheduledTask>,
    snapshots: Arc<watch::Sender<SessionSnapshot>>,
}

impl SessionDriver {
    pub fn new(session: SimulationSession) -> Self {
        let (tx, _rx) = watch::channel(session.snapshot());
        Self {
            session: Arc::new(Mutex::new(session)),
            task: None,
            snapshots: Arc::new(tx),
        }
    }

    fn publish(&self) {
        let snapshot = self.session.lock().snapshot();
        self.snapshots.send_replace(snapshot);
    }

    fn spawn_ticker(&mut self) {
        self.cancel_ticker();
        let period = self.session.lock().profile().tick_period;
        let session = Arc::clone(&self.session);
        let snapshots = Arc::clone(&self.snapshots);
        self.task = Some(ScheduledTask::every(period, move |token| {
            let mut guard = session.lock();
            if token.is_cancelled() {
                return ControlFlow::Break(());
            }
            match guard.tick() {
                Some(_) => {
                    let snapshot = guard.snapshot();
                    drop(guard);
                    snapshots.send_replace(snapshot);
                    ControlFlow::Continue(())
                }
                None => ControlFlow::Break(()),
            }
        }));
        tracing::debug!(?period, "ticker scheduled");
    }

    fn cancel_ticker(&mut self) {
        if let Some(mut task) = self.task.take() {
            task.cancel();
            tracing::debug!("ticker cancelled");
        }
    }

    /// Idle → Running with a fresh window. Returns false when already running.
    pub fn start(&mut self) -> bool {
        let started = self.session.lock().start();
        if started {
            self.spawn_ticker();
            self.publish();
        }
        started
    }

    /// Running → Idle, keeping the window. Returns false when already idle.
    pub fn stop(&mut self) -> bool {
        let stopped = self.session.lock().stop();
        self.cancel_ticker();
        if stopped {
            self.publish();
        }
        stopped
    }

    pub fn toggle(&mut self) -> Phase {
        if self.is_running() {
            self.stop();
        } else {
            self.start();
        }
        self.phase()
    }

    /// Rebuild the window for `span`. A running schedule restarts so the next
    /// tick is one full period away.
    pub fn set_span(&mut self, span: WindowSpan) {
        self.cancel_ticker();
        let running = {
            let mut session = self.session.lock();
            session.set_span(span);
            session.is_running()
        };
        if running {
            self.spawn_ticker();
        }
        self.publish();
    }

    /// Cycle to the next span
    pub fn cycle_span(&mut self) -> WindowSpan {
        let next = self.span().next();
        self.set_span(next);
        next
    }

    pub fn reset(&mut self) {
        self.cancel_ticker();
        self.session.lock().reset();
        self.publish();
    }

    pub fn phase(&self) -> Phase {
        self.session.lock().phase()
    }

    pub fn is_running(&self) -> bool {
        self.phase().is_running()
    }

    pub fn span(&self) -> WindowSpan {
        self.session.lock().span()
    }

    /// Latest published snapshot
    pub fn snapshot(&self) -> SessionSnapshot {
        self.snapshots.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshots.subscribe()
    }

    /// Shared handle to the session, for inspection
    pub fn session(&self) -> Arc<Mutex<SimulationSession>> {
        Arc::clone(&self.session)
    }

    pub fn has_ticker(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_cancelled())
    }
}

impl Drop for SessionDriver {
    fn drop(&mut self) {
        self.cancel_ticker();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MindwaveConfig;
    use std::sync::atomic::AtomicUsize;

    fn driver() -> SessionDriver {
        let config = MindwaveConfig {
            seed: Some(99),
            ..Default::default()
        };
        SessionDriver::new(SimulationSession::primary(&config))
    }

    #[tokio::test]
    async fn test_token_resolves_after_cancel() {
        let token = CancelToken::new();
        let waiter = token.clone();
        let handle = tokio::spawn(async move { waiter.cancelled().await });
        token.cancel();
        token.cancel();
        handle.await.unwrap();
        assert!(token.is_cancelled());

        // Already cancelled: returns immediately
        token.cancelled().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_task_runs_every_period() {
        let count = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&count);
        let mut task = ScheduledTask::every(Duration::from_millis(100), move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
            ControlFlow::Continue(())
        });
        tokio::time::sleep(Duration::from_millis(350)).await;
        assert_eq!(count.load(Ordering::SeqCst), 3);

        task.cancel();
        tokio::time::sleep(Duration::from_millis(1000)).await;
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_driver_ticks_then_stops() {
        let mut driver = driver();
        assert!(driver.start());
        assert!(!driver.start());
        tokio::time::sleep(Duration::from_millis(3500)).await;
        assert_eq!(driver.snapshot().ticks, 3);

        assert!(driver.stop());
        let frozen = driver.session().lock().window().clone();
        tokio::time::sleep(Duration::from_secs(10)).await;
        let session = driver.session();
        let session = session.lock();
        assert_eq!(session.ticks(), 3);
        assert_eq!(session.window(), &frozen);
        assert!(!driver.has_ticker());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_driver_cancels_ticks() {
        let mut driver = driver();
        driver.start();
        let session = driver.session();
        tokio::time::sleep(Duration::from_millis(1500)).await;
        drop(driver);
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(session.lock().ticks(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_span_change_while_running() {
        let mut driver = driver();
        driver.start();
        tokio::time::sleep(Duration::from_millis(2500)).await;
        driver.set_span(WindowSpan::OneSecond);
        let snapshot = driver.snapshot();
        assert_eq!(snapshot.capacity, 1);
        assert_eq!(snapshot.chart.len(), 1);
        assert!(snapshot.is_running());

        tokio::time::sleep(Duration::from_millis(1500)).await;
        let snapshot = driver.snapshot();
        assert_eq!(snapshot.ticks, 3);
        assert_eq!(snapshot.chart.len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_cancelled_tick_waiting_on_lock_is_dropped() {
        let config = MindwaveConfig {
            seed: Some(99),
            tick_ms: 10,
            ..Default::default()
        };
        let mut driver = SessionDriver::new(SimulationSession::primary(&config));
        driver.start();
        let session = driver.session();

        // Hold the lock long enough for the ticker to block on it
        let guard = session.lock();
        let before = guard.ticks();
        std::thread::sleep(Duration::from_millis(60));
        driver.cancel_ticker();
        drop(guard);

        tokio::time::sleep(Duration::from_millis(60)).await;
        assert_eq!(session.lock().ticks(), before);
        assert_eq!(driver.snapshot().ticks, before);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_span_change_drops_blocked_tick() {
        let config = MindwaveConfig {
            seed: Some(99),
            tick_ms: 20,
            ..Default::default()
        };
        let mut driver = SessionDriver::new(SimulationSession::primary(&config));
        driver.start();

        let session = driver.session();
        let (locked_tx, locked_rx) = std::sync::mpsc::channel();
        let holder = std::thread::spawn(move || {
            let _guard = session.lock();
            locked_tx.send(()).unwrap();
            std::thread::sleep(Duration::from_millis(80));
        });
        locked_rx.recv().unwrap();
        std::thread::sleep(Duration::from_millis(40));

        driver.set_span(WindowSpan::OneMinute);
        holder.join().unwrap();

        let session = driver.session();
        let session = session.lock();
        assert_eq!(session.window().capacity(), 60);
        assert_eq!(session.window().len(), config.initial_burst);
        assert_eq!(session.elapsed_steps(), config.initial_burst as u64);
    }

    #[tokio::test(start_paused = true)]
    async fn test_subscribers_see_ticks() {
        let mut driver = driver();
        let mut rx = driver.subscribe();
        driver.start();
        let _ = rx.borrow_and_update();
        tokio::time::sleep(Duration::from_millis(1100)).await;
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().ticks, 1);
    }
}
