//! `divvy batch` — apply a JSON batch of updates.

use std::io::Read;
use std::path::Path;

use crate::batch::BatchRequest;
use crate::store::TaskStore;

/// Reads a JSON array of batch requests from a file (or stdin), runs the
/// coordinator, and prints the JSON response.
///
/// # Errors
///
/// Returns an error string when the input cannot be read or parsed, or
/// when the batch is structurally invalid.
pub fn run(store: &TaskStore<'_>, file: Option<&Path>) -> Result<(), String> {
    let input = match file {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read {}: {e}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| format!("failed to read stdin: {e}"))?;
            buf
        }
    };
    let requests: Vec<BatchRequest> =
        serde_json::from_str(&input).map_err(|e| format!("failed to parse batch request: {e}"))?;
    let response = crate::batch::run(store, &requests).map_err(|e| e.to_string())?;
    let json = serde_json::to_string_pretty(&response).map_err(|e| e.to_string())?;
    println!("{json}");
    Ok(())
}
