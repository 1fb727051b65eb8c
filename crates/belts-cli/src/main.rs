//! Belts CLI: reads a Belts JSON document from stdin, writes the solve
//! result to stdout.
//!
//! No CLI flags, no environment variables, no persisted state (spec §6).
//! Run with: `belts-cli < problem.json`

use belts_core::model::BeltsInput;

fn main() -> std::process::ExitCode {
    planner_support::init_tracing();

    let raw = match planner_support::read_stdin_to_string() {
        Ok(s) => s,
        Err(err) => {
            eprintln!("failed to read stdin: {err}");
            return std::process::ExitCode::FAILURE;
        }
    };

    let input: BeltsInput = match serde_json::from_str(&raw) {
        Ok(v) => v,
        Err(err) => {
            eprintln!("invalid belts input: {err}");
            return std::process::ExitCode::FAILURE;
        }
    };

    let output = match belts_core::solve(&input) {
        Ok(out) => out,
        Err(err) => {
            eprintln!("{err}");
            return std::process::ExitCode::FAILURE;
        }
    };

    let body = planner_support::io_json::to_compact_json(&output);
    if let Err(err) = planner_support::write_stdout(&body) {
        eprintln!("failed to write stdout: {err}");
        return std::process::ExitCode::FAILURE;
    }

    std::process::ExitCode::SUCCESS
}
