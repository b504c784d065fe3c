//! Native-messaging host: one length-prefixed JSON request per invocation.
//!
//! Frame layout: a 4-byte length in native byte order, then that many bytes
//! of UTF-8 JSON. Replies use the same framing on stdout, so all logging goes
//! to stderr.

use anyhow::{bail, Context, Result};
use focus_guard::config::SharedConfig;
use focus_guard::journal::service::JournalService;
use serde_json::Value;
use std::io::{ErrorKind, Read, Write};

use crate::api::{error_body, ok_body, ok_empty, today_note_body};

/// Browsers cap host-bound messages well below this.
pub const MAX_MESSAGE_BYTES: usize = 1024 * 1024;

/// Whether the process was started directly by a browser rather than by a user.
///
/// Chrome passes the caller origin (`chrome-extension://<id>/`) as the first
/// argument; Firefox passes the path of the host manifest followed by the
/// extension id. Neither names a subcommand.
pub fn is_browser_launch<S: AsRef<str>>(args: &[S]) -> bool {
    let Some(first) = args.get(1) else {
        return false;
    };
    let first: &str = first.as_ref();
    first.starts_with("chrome-extension://") || first.ends_with(".json")
}

/// Read one framed message. `Ok(None)` when the stream ends before a full length prefix.
pub fn read_message<R: Read>(reader: &mut R) -> Result<Option<Value>> {
    let mut len_buf = [0u8; 4];
    let mut filled = 0;
    while filled < len_buf.len() {
        match reader.read(&mut len_buf[filled..]) {
            Ok(0) => {
                tracing::debug!(bytes = filled, "input closed before length prefix");
                return Ok(None);
            }
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e).context("failed to read message length"),
        }
    }

    let len = u32::from_ne_bytes(len_buf) as usize;
    if len > MAX_MESSAGE_BYTES {
        bail!("message of {len} bytes exceeds limit of {MAX_MESSAGE_BYTES}");
    }

    let mut payload = vec![0u8; len];
    reader
        .read_exact(&mut payload)
        .with_context(|| format!("expected {len} message bytes"))?;
    let value = serde_json::from_slice(&payload).context("message is not valid JSON")?;
    Ok(Some(value))
}

/// Write one framed message and flush.
pub fn write_message<W: Write>(writer: &mut W, message: &Value) -> Result<()> {
    let encoded = serde_json::to_vec(message)?;
    let len = u32::try_from(encoded.len()).context("reply too large to frame")?;
    writer.write_all(&len.to_ne_bytes())?;
    writer.write_all(&encoded)?;
    writer.flush()?;
    Ok(())
}

/// Dispatch a request by its `action` field.
pub fn handle_message(service: &JournalService, message: &Value) -> Value {
    let action = message.get("action").and_then(Value::as_str).unwrap_or("");
    tracing::info!(action, "native message");

    let today = service.today();
    let outcome = match action {
        "ping" => Ok(ok_empty()),
        "read" => service
            .read_note(today)
            .map(|content| serde_json::json!({ "ok": true, "content": content })),
        "save" => {
            let content = message.get("content").and_then(Value::as_str).unwrap_or("");
            service.save_note(today, content).map(|()| ok_empty())
        }
        "create" => service
            .get_or_create_today_note(today)
            .map(|note| today_note_body(&note)),
        "streak" => service.streak_report(today).map(|report| ok_body(&report)),
        other => return error_body(&format!("unknown action: {other}")),
    };

    outcome.unwrap_or_else(|e| {
        tracing::warn!(action, error = %e, "native message failed");
        error_body(&e.to_string())
    })
}

/// Serve a single request from `input`, replying on `output`.
pub fn serve_once<R: Read, W: Write>(
    service: &JournalService,
    input: &mut R,
    output: &mut W,
) -> Result<()> {
    let reply = match read_message(input) {
        Ok(Some(message)) => handle_message(service, &message),
        Ok(None) => return Ok(()),
        Err(e) => {
            tracing::error!(error = %e, "bad native message");
            error_body(&format!("{e:#}"))
        }
    };
    write_message(output, &reply)
}

/// Run the host over stdin/stdout.
pub fn run(config: SharedConfig) -> Result<()> {
    tracing::info!("native host started");
    let service = JournalService::with_system_clock(config);
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    serve_once(&service, &mut stdin.lock(), &mut stdout.lock())
}
