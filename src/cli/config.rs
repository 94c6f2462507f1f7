use clap::{Parser, Subcommand};

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

/// Report title used when the caller does not pass one.
pub const DEFAULT_TITLE: &str = "Digital API Automation";

/// Response-time SLA threshold in milliseconds.
pub const DEFAULT_SLA_MS: u64 = 1000;

#[derive(Parser, Debug)]
#[command(
    name = "api-report",
    version,
    about = "API test report aggregation and HTML rendering"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Reports root directory (overrides API_REPORT_ROOT)
    #[arg(long, global = true)]
    pub root: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build one suite report from a raw run-result JSON file
    SuiteReport {
        /// Path to the raw run-result JSON
        input: String,

        /// Path the suite HTML document is written to
        output: String,

        /// Report title
        #[arg(default_value = DEFAULT_TITLE)]
        title: String,

        /// Response-time SLA in milliseconds
        #[arg(default_value_t = DEFAULT_SLA_MS)]
        sla_ms: u64,
    },

    /// Combine every staged suite into the dashboard and email bodies
    Combine,

    /// Empty the staging directory
    Cleanup,
}
