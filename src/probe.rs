//! Startup database reachability probe.
//!
//! Dials the configured MySQL server, reads its initial handshake packet and
//! hangs up. No authentication is attempted; the probe only shows that a
//! MySQL server is listening and willing to talk. The result is logged and
//! never affects request serving.

use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::config::DatabaseConfig;
use crate::error::ProbeError;
use crate::metrics;

/// Handshake protocol version 10.
const PROTOCOL_V10: u8 = 0x0a;
/// First payload byte of an error packet.
const ERR_PACKET: u8 = 0xff;
/// Largest greeting we are willing to buffer.
const MAX_GREETING_LEN: usize = 64 * 1024;

/// Result of a probe attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// No database configured.
    Skipped,
    /// Server greeted us.
    Connected {
        /// Version string from the greeting.
        server_version: String,
    },
    /// Unreachable, refused, timed out or unintelligible.
    Failed {
        /// Failure description.
        reason: String,
    },
}

impl ProbeOutcome {
    /// Short label used for metrics.
    pub fn label(&self) -> &'static str {
        match self {
            ProbeOutcome::Skipped => "skipped",
            ProbeOutcome::Connected { .. } => "connected",
            ProbeOutcome::Failed { .. } => "failed",
        }
    }
}

/// Probe the database once, bounded by `limit`.
pub async fn probe_database(db: Option<&DatabaseConfig>, limit: Duration) -> ProbeOutcome {
    let Some(db) = db else {
        debug!("MYSQL_HOST not set, skipping database probe");
        metrics::inc_db_probe(ProbeOutcome::Skipped.label());
        return ProbeOutcome::Skipped;
    };

    let address = db.address();
    debug!(
        address = %address,
        user = db.user.as_deref().unwrap_or(""),
        database = db.database.as_deref().unwrap_or(""),
        "Probing database"
    );

    let timer = metrics::timer_db_probe();
    let outcome = match timeout(limit, read_greeting(&address)).await {
        Ok(Ok(server_version)) => ProbeOutcome::Connected { server_version },
        Ok(Err(e)) => ProbeOutcome::Failed {
            reason: e.to_string(),
        },
        Err(_) => ProbeOutcome::Failed {
            reason: format!("timed out after {}ms", limit.as_millis()),
        },
    };
    let elapsed_ms = timer.elapsed_ms();
    drop(timer);

    match &outcome {
        ProbeOutcome::Connected { server_version } => {
            info!(
                address = %address,
                server_version = %server_version,
                elapsed_ms,
                "Connected to MySQL"
            );
        }
        ProbeOutcome::Failed { reason } => {
            warn!(address = %address, elapsed_ms, "Could not connect to MySQL: {}", reason);
        }
        ProbeOutcome::Skipped => {}
    }
    metrics::inc_db_probe(outcome.label());

    outcome
}

/// Connect, read one packet, close.
async fn read_greeting(address: &str) -> Result<String, ProbeError> {
    let mut stream = TcpStream::connect(address).await?;

    let mut header = [0u8; 4];
    stream.read_exact(&mut header).await?;
    let len = u32::from_le_bytes([header[0], header[1], header[2], 0]) as usize;
    if len == 0 || len > MAX_GREETING_LEN {
        return Err(ProbeError::Malformed(format!("packet length {len}")));
    }

    let mut payload = vec![0u8; len];
    stream.read_exact(&mut payload).await?;

    // Close regardless of what the server said.
    if let Err(e) = stream.shutdown().await {
        debug!("Probe shutdown failed: {}", e);
    }

    parse_greeting(&payload)
}

/// Extract the server version from a handshake payload.
pub fn parse_greeting(payload: &[u8]) -> Result<String, ProbeError> {
    match payload.split_first() {
        Some((&PROTOCOL_V10, rest)) => {
            let end = rest
                .iter()
                .position(|b| *b == 0)
                .ok_or_else(|| ProbeError::Malformed("unterminated server version".into()))?;
            Ok(String::from_utf8_lossy(&rest[..end]).into_owned())
        }
        Some((&ERR_PACKET, rest)) => {
            if rest.len() < 2 {
                return Err(ProbeError::Malformed("truncated error packet".into()));
            }
            let code = u16::from_le_bytes([rest[0], rest[1]]);
            let mut message = &rest[2..];
            // Optional `#` + five-byte SQL state.
            if message.first() == Some(&b'#') && message.len() >= 6 {
                message = &message[6..];
            }
            Err(ProbeError::Server {
                code,
                message: String::from_utf8_lossy(message).into_owned(),
            })
        }
        Some((version, _)) => Err(ProbeError::Malformed(format!(
            "unsupported protocol version {version}"
        ))),
        None => Err(ProbeError::Malformed("empty packet".into())),
    }
}
