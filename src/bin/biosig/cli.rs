use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "biosig",
    version,
    about = "ECG/EEG signal conditioning command-line tool",
    long_about = "Condition single-channel ECG/EEG recordings: estimate the sampling\n\
                  rate from embedded timestamps and apply a zero-phase Butterworth\n\
                  bandpass tuned to the signal type."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Command {
    /// Condition a single recording
    Condition(ConditionArgs),
    /// Condition every recording matching a glob pattern
    Batch(BatchArgs),
    /// List the bandpass presets
    Presets(PresetsArgs),
    /// Validate a recording file without filtering it
    Validate(ValidateArgs),
    /// Show version and platform information
    Info(InfoArgs),
}

#[derive(Args)]
pub struct ConditionArgs {
    /// Input CSV file path
    #[arg(long)]
    pub file: String,

    /// Signal type (ecg or eeg)
    #[arg(long)]
    pub signal_type: String,

    /// Banner lines to skip before the header row
    #[arg(long, default_value_t = 2)]
    pub skip_rows: usize,

    /// Treat the first unskipped row as data, not a header
    #[arg(long, default_value_t = false)]
    pub no_header: bool,

    /// Output file for the JSON result (default: stdout)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Also write elapsed_secs,original,filtered rows to this CSV file
    #[arg(long)]
    pub csv: Option<String>,

    /// Compact JSON output (no indentation)
    #[arg(long, default_value_t = false)]
    pub compact: bool,

    /// Suppress progress messages on stderr
    #[arg(long, default_value_t = false)]
    pub quiet: bool,
}

#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern for input CSV files (e.g. "recordings/*.csv")
    #[arg(long)]
    pub pattern: String,

    /// Signal type (ecg or eeg)
    #[arg(long)]
    pub signal_type: String,

    /// Directory for the per-file <stem>_filtered.csv outputs
    #[arg(long, default_value = ".")]
    pub output_dir: String,

    /// Banner lines to skip before the header row
    #[arg(long, default_value_t = 2)]
    pub skip_rows: usize,

    /// Treat the first unskipped row as data, not a header
    #[arg(long, default_value_t = false)]
    pub no_header: bool,

    /// Print the matched file list and exit
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,

    /// Suppress per-file progress messages on stderr
    #[arg(long, default_value_t = false)]
    pub quiet: bool,
}

#[derive(Args)]
pub struct PresetsArgs {
    /// Output as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Args)]
pub struct ValidateArgs {
    /// Input CSV file path
    #[arg(long)]
    pub file: String,

    /// Banner lines to skip before the header row
    #[arg(long, default_value_t = 2)]
    pub skip_rows: usize,

    /// Treat the first unskipped row as data, not a header
    #[arg(long, default_value_t = false)]
    pub no_header: bool,

    /// Output as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Args)]
pub struct InfoArgs {
    /// Output as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,
}
