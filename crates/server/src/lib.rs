//! HTTP boundary for the engine-assistance audit service.

use std::sync::Arc;

use engine_audit::UciOracle;
use tokio::sync::Mutex;

pub mod config;
pub mod error;
pub mod routes;

/// The single engine process, shared across requests. The mutex queues
/// concurrent analyses: the engine speaks one request/response session
/// at a time and interleaving would corrupt it.
pub type SharedOracle = Arc<Mutex<UciOracle>>;
