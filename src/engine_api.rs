#![cfg(feature = "std")]

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::board::BoardSnapshot;
use crate::common::ShotError;
use crate::config::ResolverMode;
use crate::resolver::Shot;
use crate::session::{GameSession, ShotReport};

/// Operations exposed to a transport.
#[async_trait::async_trait]
pub trait GameApi: Send + Sync {
    async fn get_state(&self) -> BoardSnapshot;
    async fn reset_board(&self) -> BoardSnapshot;
    async fn apply_shot(&self, shot: Shot) -> Result<ShotReport, ShotError>;
    fn mode(&self) -> ResolverMode;
}

/// Cloneable handle to the process-wide session. Each operation holds the
/// lock for its whole read-modify-write.
#[derive(Clone)]
pub struct SharedSession {
    inner: Arc<Mutex<GameSession>>,
    mode: ResolverMode,
}

impl SharedSession {
    pub fn new(session: GameSession) -> Self {
        let mode = session.mode();
        Self {
            inner: Arc::new(Mutex::new(session)),
            mode,
        }
    }

    /// Run `f` with exclusive access to the session.
    pub async fn with_session<R>(&self, f: impl FnOnce(&mut GameSession) -> R) -> R {
        let mut session = self.inner.lock().await;
        f(&mut *session)
    }
}

#[async_trait::async_trait]
impl GameApi for SharedSession {
    async fn get_state(&self) -> BoardSnapshot {
        self.inner.lock().await.snapshot()
    }

    async fn reset_board(&self) -> BoardSnapshot {
        self.inner.lock().await.reset()
    }

    async fn apply_shot(&self, shot: Shot) -> Result<ShotReport, ShotError> {
        let mut session = self.inner.lock().await;
        let report = session.apply_shot(&shot)?;
        log::debug!("board after shot:\n{}", session.current());
        Ok(report)
    }

    fn mode(&self) -> ResolverMode {
        self.mode
    }
}
