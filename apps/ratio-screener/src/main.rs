//! Ratio Screener binary.
//!
//! Reads daily price files from the data directory and prints a ranked
//! ratio report to stdout. Logs go to stderr.

use std::io::{self, IsTerminal};
use std::process::ExitCode;

use anyhow::Context;
use clap::{CommandFactory, Parser};
use ratio_screener::{
    Args, Mode, PIPED_LABEL, RankedReport, Screener, init_tracing, read_symbol_list,
};

fn main() -> ExitCode {
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let config = args.settings().context("Invalid configuration")?;
    init_tracing(&config.observability.logging);

    let column = config.sort_column()?;
    let screener = Screener::new(&config);

    tracing::debug!(
        reference = screener.reference(),
        num_days = config.num_days,
        data_dir = %config.data_dir.display(),
        "Screener configured"
    );

    let results = match Mode::detect(args, io::stdin().is_terminal()) {
        Mode::List(path) => {
            let symbols = read_symbol_list(&path)?;
            screener.run_list(&symbols)?
        }
        Mode::Symbol(symbol) => vec![screener.run_symbol(&symbol)?],
        Mode::Piped => vec![screener.run_reader(PIPED_LABEL, io::stdin().lock())?],
        Mode::Usage => {
            Args::command().print_help()?;
            return Ok(());
        }
    };

    let mut out = io::stdout().lock();
    RankedReport::new(results, column)
        .render(&mut out)
        .context("Failed to write report")?;
    Ok(())
}
