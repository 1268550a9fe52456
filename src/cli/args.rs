use crate::pipeline::LedgerSource;
use crate::report::months::parse_month;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Build supporter reports from contact and payment feeds
#[derive(Parser, Debug)]
#[command(name = "supporter-report")]
#[command(about = "Build supporter reports from contact and payment feeds", long_about = None)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,
}

/// Available reports
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Aggregate contacts and payments into one CSV row per supporter
    Report(ReportArgs),

    /// Count new and returning supporters month by month
    Returning(ReturningArgs),
}

/// Arguments for the supporter report
#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Contact-detail feed of "Key: value" blocks
    #[arg(
        long = "contacts",
        value_name = "FILE",
        help = "Contact-detail feed; omit to report on ledger data alone"
    )]
    pub contacts: Option<PathBuf>,

    #[command(flatten)]
    pub ledger: LedgerArgs,

    /// Filter criteria combined with AND
    #[arg(
        value_name = "KEY=VALUE",
        help = "Filter criteria, e.g. state=KY country=US since=2024-01-01"
    )]
    pub criteria: Vec<String>,
}

/// Arguments for the returning-supporters report
#[derive(Args, Debug)]
pub struct ReturningArgs {
    #[command(flatten)]
    pub ledger: LedgerArgs,

    /// First month in the report
    #[arg(
        long = "start-month",
        value_name = "YYYY-MM",
        value_parser = parse_month,
        help = "First month in the report (default: month of the earliest payment)"
    )]
    pub start_month: Option<NaiveDate>,

    /// Last month in the report
    #[arg(
        long = "end-month",
        value_name = "YYYY-MM",
        value_parser = parse_month,
        help = "Last month in the report (default: the current month)"
    )]
    pub end_month: Option<NaiveDate>,
}

/// Where ledger rows come from; exactly one source must be given
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct LedgerArgs {
    /// Ledger CSV file
    #[arg(
        long = "ledger",
        value_name = "FILE",
        help = "Ledger CSV file (entity, date, amount, program; no header)"
    )]
    pub ledger: Option<PathBuf>,

    /// Command producing ledger CSV on stdout
    #[arg(
        long = "ledger-cmd",
        value_name = "COMMAND",
        help = "Command whose stdout is the ledger CSV stream"
    )]
    pub ledger_cmd: Option<String>,
}

impl LedgerArgs {
    /// The ledger source selected on the command line
    pub fn to_source(&self) -> LedgerSource {
        match (&self.ledger, &self.ledger_cmd) {
            (Some(path), _) => LedgerSource::File(path.clone()),
            (None, Some(command)) => LedgerSource::Command(command.clone()),
            // The clap group requires one of the two flags.
            (None, None) => unreachable!("a ledger source is required"),
        }
    }
}
