//! Unified error types surfaced by the runtime API.

use thiserror::Error;
use tokio::sync::oneshot;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("simulation worker command channel closed")]
    CommandChannelClosed,

    #[error("simulation worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("simulation worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    /// A command referenced state that does not exist. These indicate a
    /// client bug (stale id), not a game-rule rejection.
    #[error(transparent)]
    Engine(#[from] game_core::EngineError),

    #[error("failed to load game content: {0}")]
    Content(String),
}
