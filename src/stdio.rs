//! Standard-stream transport for JSON-RPC over NDJSON
//!
//! One request envelope per input line, one response envelope per output
//! line, flushed immediately; notifications produce no output line.
//! End-of-input terminates the loop cleanly.

use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::warn;

use crate::mcp::server::handle_raw_payload;
use crate::AppState;

pub async fn serve_stdio(state: AppState) -> io::Result<()> {
    let mut reader = BufReader::new(io::stdin());
    let mut writer = io::stdout();
    let mut line = String::new();

    loop {
        line.clear();
        if reader.read_line(&mut line).await? == 0 {
            return Ok(());
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let Some(response) = handle_raw_payload(&state, trimmed.as_bytes()).await else {
            continue;
        };

        let serialized =
            serde_json::to_string(&response).expect("response envelope serialization");
        if let Err(err) = write_line(&mut writer, &serialized).await {
            warn!(error = %err, "stdout write failed, shutting down stdio transport");
            return Ok(());
        }
    }
}

async fn write_line(writer: &mut io::Stdout, line: &str) -> io::Result<()> {
    writer.write_all(line.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await
}
