//!
//! The scaling analyzer binary.
//!

pub(crate) mod arguments;

use clap::Parser;
use colored::Colorize;

use self::arguments::Arguments;

///
/// The application entry point.
///
fn main() {
    let exit_code = match Arguments::try_parse()
        .map_err(|error| anyhow::anyhow!(error))
        .and_then(main_inner)
    {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("{error}");
            1
        }
    };
    std::process::exit(exit_code);
}

///
/// The entry point wrapper used for proper error handling.
///
fn main_inner(arguments: Arguments) -> anyhow::Result<()> {
    println!(
        "    {} {} v{}",
        "Starting".bright_green().bold(),
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
    );

    let log = scaling_analyzer::Log::try_from_path(arguments.input.as_path())?;
    let metrics = scaling_analyzer::compute(log.records.as_slice(), arguments.aggregation)?;

    let output: scaling_analyzer::Output =
        (metrics.as_slice(), arguments.benchmark_format).try_into()?;
    let path = output.write_to_directory(arguments.outdir.as_path())?;
    println!("       {} {}", "Wrote".bright_green().bold(), path.display());

    let renderer = scaling_analyzer::renderer::select(!arguments.no_plots);
    renderer.render(metrics.as_slice(), arguments.outdir.as_path())?;

    Ok(())
}
