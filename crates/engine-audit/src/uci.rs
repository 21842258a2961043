//! UCI engine wrapper (async I/O)

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};

use tracing::debug;

use crate::error::AuditError;
use crate::MATE_SCORE_CP;

/// A running UCI engine process.
pub struct UciEngine {
    process: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
}

impl UciEngine {
    /// Spawn a new engine process and initialize UCI
    pub async fn new(path: &str) -> Result<Self, AuditError> {
        let mut process = Command::new(path)
            .stdin(std::process::Stdio::piped())
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::null())
            .spawn()
            .map_err(|e| AuditError::EngineUnavailable(format!("Failed to spawn engine: {e}")))?;

        let stdin = process.stdin.take().ok_or_else(|| {
            AuditError::EngineUnavailable("Engine stdin not captured".to_string())
        })?;
        let stdout = process.stdout.take().ok_or_else(|| {
            AuditError::EngineUnavailable("Engine stdout not captured".to_string())
        })?;

        let mut engine = Self {
            process,
            stdin,
            stdout: BufReader::new(stdout),
        };

        // Initialize UCI
        engine.send("uci").await?;
        engine.wait_for("uciok").await?;

        // Configure for analysis
        engine.send("setoption name Threads value 1").await?;
        engine.send("setoption name UCI_AnalyseMode value true").await?;
        engine.send("isready").await?;
        engine.wait_for("readyok").await?;

        Ok(engine)
    }

    /// Send a command to the engine
    async fn send(&mut self, cmd: &str) -> Result<(), AuditError> {
        debug!(cmd, "UCI <");
        self.stdin
            .write_all(format!("{cmd}\n").as_bytes())
            .await
            .map_err(|e| AuditError::EngineUnavailable(format!("Failed to write to engine: {e}")))?;
        self.stdin
            .flush()
            .await
            .map_err(|e| AuditError::EngineUnavailable(format!("Failed to flush stdin: {e}")))?;
        Ok(())
    }

    /// Wait for a specific response line
    async fn wait_for(&mut self, expected: &str) -> Result<(), AuditError> {
        let mut line = String::new();
        loop {
            line.clear();
            let n = self
                .stdout
                .read_line(&mut line)
                .await
                .map_err(|e| AuditError::EngineUnavailable(format!("Failed to read from engine: {e}")))?;
            if n == 0 {
                return Err(AuditError::EngineUnavailable(
                    "Engine closed its output stream".to_string(),
                ));
            }
            let trimmed = line.trim();
            debug!(line = trimmed, "UCI >");
            if trimmed == expected {
                return Ok(());
            }
        }
    }

    /// Evaluate a position at a fixed depth, optionally restricting the
    /// search to a single candidate move.
    ///
    /// Returns the score in centipawns from the side to move, with forced
    /// mate collapsed to `±MATE_SCORE_CP`, or `None` when the engine
    /// produced no score for the position (e.g. it is already terminal).
    pub async fn evaluate(
        &mut self,
        fen: &str,
        depth: u32,
        root_move: Option<&str>,
    ) -> Result<Option<i32>, AuditError> {
        self.send(&format!("position fen {fen}")).await?;
        match root_move {
            Some(uci) => self.send(&format!("go depth {depth} searchmoves {uci}")).await?,
            None => self.send(&format!("go depth {depth}")).await?,
        }

        let mut score: Option<i32> = None;
        let mut line = String::new();
        loop {
            line.clear();
            let n = self
                .stdout
                .read_line(&mut line)
                .await
                .map_err(|e| AuditError::EngineUnavailable(format!("Failed to read from engine: {e}")))?;
            if n == 0 {
                return Err(AuditError::EngineUnavailable(
                    "Engine closed its output stream".to_string(),
                ));
            }
            let trimmed = line.trim();

            if trimmed.starts_with("info") {
                apply_info_line(trimmed, &mut score)?;
            } else if trimmed.starts_with("bestmove") {
                break;
            }
        }

        Ok(score)
    }

    /// Send quit command and wait for process to exit
    pub async fn quit(&mut self) {
        let _ = self.send("quit").await;
        let _ = self.process.wait().await;
    }
}

impl Drop for UciEngine {
    fn drop(&mut self) {
        // Best-effort synchronous kill in drop
        let _ = self.process.start_kill();
    }
}

/// Collapse a mate-in-N score to the fixed sentinel magnitude.
fn collapse_mate(mate: i32) -> i32 {
    if mate >= 0 {
        MATE_SCORE_CP
    } else {
        -MATE_SCORE_CP
    }
}

/// Fold one `info` line into the running score.
///
/// A line carrying no score at all is fine (the score stays absent and
/// propagates as "no deviation computed"); a score token that is present
/// but unparseable means the engine is speaking garbage and is an
/// evaluation fault, not a missing value.
fn apply_info_line(line: &str, score: &mut Option<i32>) -> Result<(), AuditError> {
    if let Some(tok) = score_token(line, "cp") {
        let cp = tok.parse().map_err(|_| {
            AuditError::Evaluation(format!("Unparseable centipawn score in '{line}'"))
        })?;
        *score = Some(cp);
    }
    if let Some(tok) = score_token(line, "mate") {
        let mate: i32 = tok.parse().map_err(|_| {
            AuditError::Evaluation(format!("Unparseable mate score in '{line}'"))
        })?;
        *score = Some(collapse_mate(mate));
    }
    Ok(())
}

/// The token following `key` in an info line, if any
fn score_token<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    for (i, part) in parts.iter().enumerate() {
        if *part == key && i + 1 < parts.len() {
            return Some(parts[i + 1]);
        }
    }
    None
}
