use std::{
    io,
    sync::{
        Arc,
        mpsc::{self, RecvTimeoutError, Sender},
    },
    thread::{self, JoinHandle},
    time::Duration,
};

use parking_lot::Mutex;

use super::game_session::GameSession;

/// A session shared between the input loop and its timer thread.
pub type SharedSession = Arc<Mutex<GameSession>>;

/// Background thread calling [`GameSession::tick`] once per period.
///
/// The thread exits on its own when the session finishes. Dropping the
/// timer stops it and waits for the thread.
///
/// # Example
///
/// ```
/// use std::{sync::Arc, time::Duration};
///
/// use lexidice_engine::{
///     Board, Die, GameSession, ScoreTable, SessionState, SessionTimer, TimeBudget, WordList,
/// };
/// use parking_lot::Mutex;
///
/// let dice = (0..16).map(|_| Die::new(vec!["E".into()], 0).unwrap()).collect();
/// let mut session = GameSession::new(
///     TimeBudget::Custom(2),
///     Arc::new(ScoreTable::default()),
///     Arc::new(WordList::default()),
/// );
/// session.assign_board(Arc::new(Board::new(dice).unwrap())).unwrap();
///
/// let shared = Arc::new(Mutex::new(session));
/// let timer = SessionTimer::start(Arc::clone(&shared), Duration::from_millis(1)).unwrap();
/// timer.join();
/// assert_eq!(shared.lock().state(), SessionState::Done);
/// ```
#[derive(Debug)]
pub struct SessionTimer {
    stop: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl SessionTimer {
    /// Spawns the timer thread.
    pub fn start(session: SharedSession, period: Duration) -> io::Result<Self> {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let handle = thread::Builder::new()
            .name("session-timer".to_owned())
            .spawn(move || {
                loop {
                    match stop_rx.recv_timeout(period) {
                        Err(RecvTimeoutError::Timeout) => {}
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                    let mut guard = session.lock();
                    guard.tick();
                    if guard.state().is_finished() {
                        break;
                    }
                }
                tracing::debug!("session timer stopped");
            })?;
        Ok(Self {
            stop: Some(stop_tx),
            handle: Some(handle),
        })
    }

    /// Whether the thread is still ticking.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Stops ticking and waits for the thread to exit.
    pub fn stop(mut self) {
        self.shutdown();
    }

    /// Waits for the session to finish on its own.
    pub fn join(mut self) {
        self.wait();
    }

    fn shutdown(&mut self) {
        if let Some(stop) = self.stop.take() {
            // The thread may already have exited after the session finished.
            let _ = stop.send(());
        }
        self.wait();
    }

    fn wait(&mut self) {
        let Some(handle) = self.handle.take() else {
            return;
        };
        if handle.join().is_err() {
            tracing::error!("session timer thread panicked");
        }
    }
}

impl Drop for SessionTimer {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use crate::{Board, Die, ScoreTable, SessionState, TimeBudget, WordList};

    use super::*;

    fn shared(budget: TimeBudget) -> SharedSession {
        let dice = (0..16)
            .map(|_| Die::new(vec!["A".into()], 0).unwrap())
            .collect();
        let mut session = GameSession::new(
            budget,
            Arc::new(ScoreTable::default()),
            Arc::new(WordList::default()),
        );
        session.assign_board(Arc::new(Board::new(dice).unwrap())).unwrap();
        Arc::new(Mutex::new(session))
    }

    #[test]
    fn test_runs_until_expired() {
        let session = shared(TimeBudget::Custom(3));
        let timer = SessionTimer::start(Arc::clone(&session), Duration::from_millis(1)).unwrap();
        timer.join();
        let session = session.lock();
        assert_eq!(session.state(), SessionState::Done);
        assert_eq!(session.elapsed_seconds(), 3);
        assert_eq!(session.remaining_seconds(), Some(0));
    }

    #[test]
    fn test_paused_session_is_not_ticked() {
        let session = shared(TimeBudget::Custom(3));
        session.lock().pause().unwrap();
        let timer = SessionTimer::start(Arc::clone(&session), Duration::from_millis(1)).unwrap();
        thread::sleep(Duration::from_millis(30));
        assert!(timer.is_running());
        timer.stop();
        assert_eq!(session.lock().elapsed_seconds(), 0);
        assert_eq!(session.lock().state(), SessionState::Paused);
    }

    #[test]
    fn test_no_ticks_after_stop() {
        let session = shared(TimeBudget::Infinite);
        let timer = SessionTimer::start(Arc::clone(&session), Duration::from_millis(1)).unwrap();
        thread::sleep(Duration::from_millis(10));
        timer.stop();
        let elapsed = session.lock().elapsed_seconds();
        thread::sleep(Duration::from_millis(20));
        assert_eq!(session.lock().elapsed_seconds(), elapsed);
    }

    #[test]
    fn test_exits_when_terminated() {
        let session = shared(TimeBudget::Infinite);
        let timer = SessionTimer::start(Arc::clone(&session), Duration::from_millis(1)).unwrap();
        session.lock().terminate().unwrap();
        timer.join();
        assert_eq!(session.lock().state(), SessionState::Terminated);
    }
}
