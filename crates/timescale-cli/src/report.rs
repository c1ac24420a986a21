use timescale_runtime::{Error, ErrorKind};
use tracing::error;

use crate::types::OutputFormat;

pub const EXIT_FAILURE: i32 = 1;
pub const EXIT_VALIDATION: i32 = 2;
pub const EXIT_NOT_FOUND: i32 = 3;

/// Print a failed command and return the process exit code.
///
/// Operation errors are rendered as a problem envelope: JSON on stdout when
/// `--format json`, otherwise `Error: <detail>` on stderr. Anything else is a
/// setup failure and is printed with its cause chain.
pub fn report_error(err: &anyhow::Error, format: OutputFormat) -> i32 {
    let Some(op_err) = err.downcast_ref::<Error>() else {
        eprintln!("Error: {:#}", err);
        return EXIT_FAILURE;
    };

    if op_err.kind() == ErrorKind::Internal {
        error!(error = %op_err, "operation failed");
    }

    let problem = op_err.to_problem();
    match format {
        OutputFormat::Json => match serde_json::to_string_pretty(&problem) {
            Ok(json) => println!("{}", json),
            Err(_) => eprintln!("Error: {}", problem.detail),
        },
        OutputFormat::Plain | OutputFormat::Csv => eprintln!("Error: {}", problem.detail),
    }

    exit_code(op_err.kind())
}

fn exit_code(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::Validation => EXIT_VALIDATION,
        ErrorKind::NotFound => EXIT_NOT_FOUND,
        ErrorKind::Internal => EXIT_FAILURE,
    }
}
