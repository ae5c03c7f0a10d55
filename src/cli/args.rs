use crate::core::UnknownParticipantPolicy;
use crate::strategy::ReportRequest;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Settle shared expenses with as few transfers as possible
#[derive(Parser, Debug)]
#[command(name = "split-ledger")]
#[command(about = "Compute balances and settling transfers for shared expenses", long_about = None)]
pub struct CliArgs {
    /// Participants CSV file (id,name)
    #[arg(value_name = "PARTICIPANTS", help = "Path to the participants CSV file")]
    pub participants_file: PathBuf,

    /// Expenses CSV file (id,description,amount,payer,involved,timestamp[,repaid])
    #[arg(value_name = "EXPENSES", help = "Path to the expenses CSV file")]
    pub expenses_file: PathBuf,

    /// Parsing strategy to use for loading the input files
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "sync",
        help = "Loading strategy: 'sync' reads files one by one, 'async' reads them concurrently"
    )]
    pub strategy: StrategyType,

    /// Report written to stdout
    #[arg(
        long = "report",
        value_name = "REPORT",
        default_value = "transfers",
        help = "Report to write: 'balances' or 'transfers'"
    )]
    pub report: ReportKind,

    /// Settled-flags CSV file (split,from,to,amount)
    #[arg(
        long = "settled",
        value_name = "FILE",
        help = "CSV of transfers already marked as settled"
    )]
    pub settled_file: Option<PathBuf>,

    /// Split name used to look up settled flags
    #[arg(long = "split", value_name = "NAME", default_value = "default")]
    pub split: String,

    /// Treatment of expenses naming participants missing from the roster
    #[arg(
        long = "unknown-participants",
        value_name = "POLICY",
        default_value = "tolerate",
        help = "'tolerate' keeps them as regular balance entries, 'reject' fails the run"
    )]
    pub unknown_participants: UnknownParticipants,
}

/// Available strategies for loading the input files
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyType {
    Sync,
    Async,
}

/// Reports the CLI can write
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportKind {
    /// Net balance per participant
    Balances,
    /// Suggested settling transfers with their settled flags
    Transfers,
}

/// Command-line spelling of [`UnknownParticipantPolicy`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum UnknownParticipants {
    Tolerate,
    Reject,
}

impl From<UnknownParticipants> for UnknownParticipantPolicy {
    fn from(value: UnknownParticipants) -> Self {
        match value {
            UnknownParticipants::Tolerate => UnknownParticipantPolicy::Tolerate,
            UnknownParticipants::Reject => UnknownParticipantPolicy::Reject,
        }
    }
}

impl CliArgs {
    /// Build the ReportRequest described by the CLI arguments
    ///
    /// The split name is trimmed; a blank name falls back to `default`.
    pub fn to_request(&self) -> ReportRequest {
        let split = match self.split.trim() {
            "" => "default".to_string(),
            name => name.to_string(),
        };

        ReportRequest {
            participants: self.participants_file.clone(),
            expenses: self.expenses_file.clone(),
            settled: self.settled_file.clone(),
            split,
            report: self.report,
            policy: self.unknown_participants.into(),
        }
    }
}
