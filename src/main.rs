use clap::Parser;

use api_report::cli::commands::{cmd_cleanup, cmd_combine, cmd_suite_report};
use api_report::cli::config::{Cli, Commands};
use api_report::paths::ReportPaths;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Resolve the output root once: CLI flag > env var > default.
    let paths = ReportPaths::resolve(cli.root.as_deref());

    match cli.command {
        Commands::SuiteReport {
            input,
            output,
            title,
            sla_ms,
        } => {
            cmd_suite_report(&input, &output, &title, sla_ms, &paths, cli.verbose)?;
        }
        Commands::Combine => {
            cmd_combine(&paths, cli.verbose)?;
        }
        Commands::Cleanup => {
            cmd_cleanup(&paths, cli.verbose)?;
        }
    }

    Ok(())
}
