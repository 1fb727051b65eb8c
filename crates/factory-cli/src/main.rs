//! Factory CLI: reads a Factory JSON document from stdin, writes the solve
//! result to stdout.
//!
//! No CLI flags, no environment variables, no persisted state (spec §6).
//! Run with: `factory-cli < problem.json`

use factory_core::model::FactoryInput;

fn main() -> std::process::ExitCode {
    planner_support::init_tracing();

    let raw = match planner_support::read_stdin_to_string() {
        Ok(s) => s,
        Err(err) => {
            eprintln!("failed to read stdin: {err}");
            return std::process::ExitCode::FAILURE;
        }
    };

    let input: FactoryInput = match serde_json::from_str(&raw) {
        Ok(v) => v,
        Err(err) => {
            eprintln!("invalid factory input: {err}");
            return std::process::ExitCode::FAILURE;
        }
    };

    let output = factory_core::solve(&input);

    let body = planner_support::io_json::to_compact_json(&output);
    if let Err(err) = planner_support::write_stdout(&body) {
        eprintln!("failed to write stdout: {err}");
        return std::process::ExitCode::FAILURE;
    }

    std::process::ExitCode::SUCCESS
}
