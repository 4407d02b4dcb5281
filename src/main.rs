use std::path::PathBuf;

use clap::Parser;

use minic_sema::{AnalysisOutcome, Analyzer, PestAstParser};

/// Command line interface struct describing possible arguments using the
/// `clap` library. Grounded on the reference crate's `CompilerCLIOptions`
/// (`compiler/src/main.rs`), trimmed to the single positional argument
/// this spec's invocation contract names (§6) — no output-path, stdout, or
/// debug-decoration flags, since this analyzer always writes the same two
/// named report files next to the source.
#[derive(Parser)]
struct AnalyzerCLIOptions {
    /// Path of the source file to analyze.
    #[clap(parse(from_os_str))]
    path: PathBuf,
}

fn main() {
    // `parse()` would print clap's usage error to stderr and exit non-zero
    // on a missing argument, bypassing the invocation contract (§6: print to
    // stdout, exit 0 regardless). `try_parse()` lets this function handle
    // that case the same way it handles an unopenable file.
    let cli_args = match AnalyzerCLIOptions::try_parse() {
        Ok(cli_args) => cli_args,
        Err(error) => {
            println!("{}", error);
            std::process::exit(exitcode::OK);
        }
    };

    match run(&cli_args.path) {
        Ok(outcome) => {
            println!("Analysis complete: {} diagnostic(s)", outcome.diagnostics.error_count());
        }
        Err(error) => {
            println!("{:?}", error);
        }
    }

    // Per the invocation contract (§6), callers read the diagnostic file
    // rather than the process exit code, so this always exits cleanly.
    std::process::exit(exitcode::OK);
}

fn run(source_path: &std::path::Path) -> anyhow::Result<AnalysisOutcome> {
    let analyzer: Analyzer<PestAstParser> = Analyzer::default();
    analyzer.analyse_file(source_path)
}
