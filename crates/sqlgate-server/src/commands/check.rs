//! `sqlgate check` - run the allow-list offline.

use std::process::ExitCode;

/// Print the verdict; exit 1 on rejection.
pub fn run(query: &str) -> ExitCode {
    let verdict = sqlgate_policy::validate(query);
    match verdict.reason {
        None => {
            println!("accepted");
            ExitCode::SUCCESS
        }
        Some(reason) => {
            println!("rejected: {}", reason);
            ExitCode::FAILURE
        }
    }
}
