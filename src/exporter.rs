//! The export collaborator boundary.
//!
//! msgtidy never reads the message database itself; `imessage-exporter`
//! does the export, and this module invokes it as a single synchronous
//! subprocess. Combined stdout and stderr are fully buffered, then echoed
//! so the exporter's own progress output stays visible. A non-zero exit
//! status is fatal to the whole run.
//!
//! The binary name can be overridden with the `MSGTIDY_EXPORTER`
//! environment variable, which test suites use to substitute a stub.

use std::process::Command;

use crate::cli::Args;
use crate::error::{Result, TidyError};

/// Default export binary, expected on `PATH`.
pub const EXPORTER_BIN: &str = "imessage-exporter";

/// Environment variable overriding the export binary.
pub const EXPORTER_ENV: &str = "MSGTIDY_EXPORTER";

/// Builds the exporter argument vector from the CLI options.
///
/// Equivalent flags pass straight through; flags the exporter does not
/// know (`--no-rename`, `--dry-run`, `--verbose`) never appear here.
pub fn exporter_args(args: &Args) -> Vec<String> {
    let mut argv = vec![
        "-f".to_string(),
        args.format.as_flag().to_string(),
        "-c".to_string(),
        args.copy_method.as_flag().to_string(),
        "-o".to_string(),
        args.output.clone(),
    ];

    for (flag, value) in [
        ("-p", &args.db_path),
        ("-r", &args.attachment_root),
        ("-s", &args.start_date),
        ("-e", &args.end_date),
    ] {
        if let Some(value) = value {
            argv.push(flag.to_string());
            argv.push(value.clone());
        }
    }

    argv
}

/// Runs the export subprocess to completion.
///
/// Blocks until the exporter exits; there is no timeout or cancellation.
/// Both output streams are captured in full, echoed, and returned.
///
/// # Errors
///
/// Returns [`TidyError::Exporter`] if the binary cannot be spawned or
/// exits non-zero.
pub fn run_export(args: &Args) -> Result<String> {
    let bin = std::env::var(EXPORTER_ENV).unwrap_or_else(|_| EXPORTER_BIN.to_string());

    let output = Command::new(&bin)
        .args(exporter_args(args))
        .output()
        .map_err(|e| TidyError::exporter(format!("could not run '{bin}': {e}")))?;

    let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
    combined.push_str(&String::from_utf8_lossy(&output.stderr));
    if !combined.is_empty() {
        print!("{combined}");
    }

    if !output.status.success() {
        return Err(TidyError::exporter(format!(
            "'{bin}' exited with {}",
            output.status
        )));
    }

    Ok(combined)
}
