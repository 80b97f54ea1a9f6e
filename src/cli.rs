use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "commitscore",
    version,
    about = "Commit scoring and developer performance analytics CLI"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Directory holding commitscore.toml and relative data paths
    #[arg(long, global = true, default_value = ".")]
    pub dir: PathBuf,

    /// Store snapshot path, overriding [store].path
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score a single commit from its stats and message
    Score(ScoreCommand),
    /// Import and score commits for a registered repository
    Import(ImportCommand),
    /// Manage registered repositories
    #[command(subcommand)]
    Repo(RepoCommand),
    /// Manage teams and their members
    #[command(subcommand)]
    Team(TeamCommand),
    /// List developers or show one developer's metrics
    #[command(subcommand)]
    Developer(DeveloperCommand),
    /// List scored commits, newest first
    Commits(CommitsCommand),
    /// Summary statistics and score distribution
    Analysis(AnalysisCommand),
    /// Monthly score trend
    Trend(TrendCommand),
    /// Top performers over the trailing window
    Top(TopCommand),
    /// Dashboard totals
    Stats(FormatArgs),
    /// Most recent scored commits
    Recent(RecentCommand),
}

#[derive(Subcommand)]
pub enum RepoCommand {
    /// Register or update a repository
    Add(RepoAddCommand),
    /// List registered repositories
    List(FormatArgs),
    /// Show repository metrics
    Show(ShowCommand),
}

#[derive(Subcommand)]
pub enum DeveloperCommand {
    /// List developers with their scores
    List(DeveloperListCommand),
    /// Show a developer's metrics and trend
    Show(ShowCommand),
}

#[derive(Subcommand)]
pub enum TeamCommand {
    /// Create a team
    Add(TeamAddCommand),
    /// Add a developer to a team
    Member(TeamMemberCommand),
    /// Attach a repository to a team
    Repo(TeamRepoCommand),
    /// List teams
    List(FormatArgs),
    /// Show team metrics
    Show(ShowCommand),
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ReportFormat {
    Json,
    Md,
}

#[derive(Args)]
pub struct FormatArgs {
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
}

#[derive(Args)]
pub struct ScoreCommand {
    #[arg(long, default_value_t = 0)]
    pub additions: u64,
    #[arg(long, default_value_t = 0)]
    pub deletions: u64,
    #[arg(long, default_value_t = 0)]
    pub files: u64,
    #[arg(short, long, default_value = "")]
    pub message: String,
    #[command(flatten)]
    pub output: FormatArgs,
}

#[derive(Args)]
pub struct ImportCommand {
    /// External id of the registered repository
    #[arg(long)]
    pub repository_id: String,
    #[arg(long)]
    pub owner: String,
    #[arg(long)]
    pub repo: String,
    #[arg(long)]
    pub branch: Option<String>,
    /// Root of the commit export, overriding [source].path
    #[arg(long)]
    pub source: Option<PathBuf>,
    #[command(flatten)]
    pub output: FormatArgs,
}

#[derive(Args)]
pub struct RepoAddCommand {
    /// External id assigned by the hosting platform
    #[arg(long)]
    pub id: String,
    #[arg(long)]
    pub owner: String,
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub url: Option<String>,
    #[arg(long)]
    pub language: Option<String>,
    #[command(flatten)]
    pub output: FormatArgs,
}

#[derive(Args)]
pub struct TeamAddCommand {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub description: Option<String>,
    #[command(flatten)]
    pub output: FormatArgs,
}

#[derive(Args)]
pub struct TeamMemberCommand {
    #[arg(long)]
    pub team: String,
    #[arg(long)]
    pub developer: String,
    #[arg(long, default_value = "member")]
    pub role: String,
}

#[derive(Args)]
pub struct TeamRepoCommand {
    #[arg(long)]
    pub team: String,
    #[arg(long)]
    pub repository: String,
}

#[derive(Args)]
pub struct ShowCommand {
    pub id: String,
    #[command(flatten)]
    pub output: FormatArgs,
}

#[derive(Args)]
pub struct AnalysisCommand {
    #[arg(long)]
    pub repository: Option<String>,
    #[arg(long)]
    pub developer: Option<String>,
    /// Inclusive lower bound (YYYY-MM-DD or RFC 3339)
    #[arg(long, value_parser = parse_timestamp)]
    pub since: Option<DateTime<Utc>>,
    /// Inclusive upper bound (YYYY-MM-DD or RFC 3339)
    #[arg(long, value_parser = parse_timestamp)]
    pub until: Option<DateTime<Utc>>,
    #[command(flatten)]
    pub output: FormatArgs,
}

#[derive(Args)]
pub struct DeveloperListCommand {
    /// Case-insensitive match on username, name or email
    #[arg(long)]
    pub search: Option<String>,
    #[command(flatten)]
    pub output: FormatArgs,
}

#[derive(Args)]
pub struct CommitsCommand {
    #[arg(long)]
    pub repository: Option<String>,
    #[arg(long)]
    pub developer: Option<String>,
    #[arg(long, value_parser = parse_timestamp)]
    pub since: Option<DateTime<Utc>>,
    #[arg(long, value_parser = parse_timestamp)]
    pub until: Option<DateTime<Utc>>,
    #[arg(long, default_value_t = 20)]
    pub limit: u32,
    #[command(flatten)]
    pub output: FormatArgs,
}

#[derive(Args)]
pub struct TrendCommand {
    #[arg(long)]
    pub months: Option<u32>,
    #[command(flatten)]
    pub output: FormatArgs,
}

#[derive(Args)]
pub struct TopCommand {
    #[arg(long)]
    pub limit: Option<u32>,
    #[arg(long)]
    pub window_days: Option<u32>,
    #[command(flatten)]
    pub output: FormatArgs,
}

#[derive(Args)]
pub struct RecentCommand {
    #[arg(long)]
    pub limit: Option<u32>,
    #[command(flatten)]
    pub output: FormatArgs,
}

// bare dates are midnight UTC
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
        .ok_or_else(|| format!("expected YYYY-MM-DD or RFC 3339 timestamp, got {value}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_timestamp_accepts_dates_and_rfc3339() {
        let midnight = Utc
            .with_ymd_and_hms(2024, 2, 1, 0, 0, 0)
            .single()
            .expect("valid timestamp");
        assert_eq!(parse_timestamp("2024-02-01"), Ok(midnight));
        assert_eq!(parse_timestamp("2024-02-01T02:00:00+02:00"), Ok(midnight));
        assert!(parse_timestamp("yesterday").is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
