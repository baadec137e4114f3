//! JSON line I/O
//!
//! - Input: one JSON object per line
//! - Output: one JSON object per line
//! - UTF-8 only

use std::io::Write;

use serde_json::{json, Value};

use super::errors::CliResult;

/// Success envelope
pub fn ok_response(data: Value) -> Value {
    json!({
        "status": "ok",
        "data": data
    })
}

/// Error envelope. `numeric_code` is present for registry errors only.
pub fn error_response(code: &str, numeric_code: Option<u32>, message: &str) -> Value {
    let mut response = json!({
        "status": "error",
        "code": code,
        "message": message
    });
    if let Some(n) = numeric_code {
        response["numeric_code"] = json!(n);
    }
    response
}

/// Write one response line and flush
pub fn write_line<W: Write>(writer: &mut W, response: &Value) -> CliResult<()> {
    serde_json::to_writer(&mut *writer, response)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
