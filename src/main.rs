mod aggregate;
mod cli;
mod config;
mod error;
mod import;
mod report;
mod scoring;
mod store;
mod types;

use crate::error::CommitScoreError;
use crate::import::source::JsonFileSource;
use crate::import::ImportRequest;
use crate::store::memory::MemoryStore;
use crate::store::CommitFilter;
use crate::types::entity::{MemberRole, NewRepository};
use chrono::Utc;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const RUNTIME_FAILURE: i32 = 3;
}

fn init_tracing(verbose: u8, quiet: bool) {
    let default_level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("commitscore={default_level}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn output_format(format: cli::ReportFormat) -> report::OutputFormat {
    match format {
        cli::ReportFormat::Json => report::OutputFormat::Json,
        cli::ReportFormat::Md => report::OutputFormat::Md,
    }
}

fn resolve(dir: &Path, path: PathBuf) -> PathBuf {
    if path.is_relative() {
        dir.join(path)
    } else {
        path
    }
}

fn run() -> Result<i32, CommitScoreError> {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    if !cli.dir.exists() {
        return Err(CommitScoreError::PathNotFound(cli.dir.display().to_string()));
    }
    let cfg = config::load_config(&cli.dir)?;
    let settings = cfg.aggregation_settings();
    let store_path = resolve(&cli.dir, cli.store.clone().unwrap_or_else(|| cfg.store_path()));

    let mut store = MemoryStore::load(&store_path)?;
    let now = Utc::now();

    let (rendered, dirty) = match cli.command {
        cli::Commands::Score(cmd) => {
            let score =
                scoring::score_commit(cmd.additions, cmd.deletions, cmd.files, &cmd.message);
            (report::render(&score, output_format(cmd.output.format))?, false)
        }
        cli::Commands::Import(cmd) => {
            let source_root = resolve(&cli.dir, cmd.source.unwrap_or_else(|| cfg.source_path()));
            let source = JsonFileSource::new(source_root);
            let request = ImportRequest {
                repository_external_id: &cmd.repository_id,
                owner: &cmd.owner,
                repo: &cmd.repo,
                branch: cmd.branch.as_deref(),
            };
            // Commits stored before a failure are kept, so persist on error too.
            let result = import::import_commits(&mut store, &source, &request);
            store.save(&store_path)?;
            let outcome = result?;
            (report::render(&outcome, output_format(cmd.output.format))?, false)
        }
        cli::Commands::Repo(cli::RepoCommand::Add(cmd)) => {
            let repository = store.upsert_repository(NewRepository {
                external_id: cmd.id,
                name: cmd.name,
                owner: cmd.owner,
                url: cmd.url,
                language: cmd.language,
            });
            (report::render(&repository, output_format(cmd.output.format))?, true)
        }
        cli::Commands::Repo(cli::RepoCommand::List(cmd)) => {
            let repositories = store.repositories().cloned().collect::<Vec<_>>();
            (report::render(&repositories, output_format(cmd.format))?, false)
        }
        cli::Commands::Repo(cli::RepoCommand::Show(cmd)) => {
            let repository = aggregate::entity::repository_report(&store, &cmd.id)?;
            (report::render(&repository, output_format(cmd.output.format))?, false)
        }
        cli::Commands::Team(cli::TeamCommand::Add(cmd)) => {
            let team = store.create_team(&cmd.name, cmd.description)?;
            (report::render(&team, output_format(cmd.output.format))?, true)
        }
        cli::Commands::Team(cli::TeamCommand::Member(cmd)) => {
            let role = cmd
                .role
                .parse::<MemberRole>()
                .map_err(CommitScoreError::InvalidArgument)?;
            store.add_team_member(&cmd.team, &cmd.developer, role)?;
            (format!("added {} to team {}", cmd.developer, cmd.team), true)
        }
        cli::Commands::Team(cli::TeamCommand::Repo(cmd)) => {
            store.add_team_repository(&cmd.team, &cmd.repository)?;
            (format!("attached {} to team {}", cmd.repository, cmd.team), true)
        }
        cli::Commands::Team(cli::TeamCommand::List(cmd)) => {
            let teams = aggregate::entity::team_summaries(&store);
            (report::render(&teams, output_format(cmd.format))?, false)
        }
        cli::Commands::Team(cli::TeamCommand::Show(cmd)) => {
            let team = aggregate::entity::team_report(&store, &cmd.id)?;
            (report::render(&team, output_format(cmd.output.format))?, false)
        }
        cli::Commands::Developer(cli::DeveloperCommand::List(cmd)) => {
            let developers = aggregate::entity::developer_summaries(
                &store,
                cmd.search.as_deref(),
                now,
                settings.window_days,
            );
            (report::render(&developers, output_format(cmd.output.format))?, false)
        }
        cli::Commands::Developer(cli::DeveloperCommand::Show(cmd)) => {
            let developer =
                aggregate::entity::developer_report(&store, &cmd.id, now, settings.window_days)?;
            (report::render(&developer, output_format(cmd.output.format))?, false)
        }
        cli::Commands::Commits(cmd) => {
            let filter = CommitFilter {
                repository_id: cmd.repository,
                developer_id: cmd.developer,
                since: cmd.since,
                until: cmd.until,
            };
            let commits = aggregate::entity::commit_entries(&store, &filter, cmd.limit as usize);
            (report::render(&commits, output_format(cmd.output.format))?, false)
        }
        cli::Commands::Analysis(cmd) => {
            let filter = CommitFilter {
                repository_id: cmd.repository,
                developer_id: cmd.developer,
                since: cmd.since,
                until: cmd.until,
            };
            let analysis = aggregate::analysis(store.commits(&filter));
            (report::render(&analysis, output_format(cmd.output.format))?, false)
        }
        cli::Commands::Trend(cmd) => {
            let months = cmd.months.unwrap_or(settings.trend_months);
            let trend = aggregate::entity::performance_trend(&store, now, months);
            (report::render(&trend, output_format(cmd.output.format))?, false)
        }
        cli::Commands::Top(cmd) => {
            let window_days = cmd.window_days.unwrap_or(settings.window_days);
            let limit = cmd.limit.unwrap_or(settings.top_limit) as usize;
            let top = aggregate::entity::store_top_performers(&store, now, window_days, limit);
            (report::render(&top, output_format(cmd.output.format))?, false)
        }
        cli::Commands::Stats(cmd) => {
            let stats = aggregate::entity::dashboard_stats(&store);
            (report::render(&stats, output_format(cmd.format))?, false)
        }
        cli::Commands::Recent(cmd) => {
            let limit = cmd.limit.unwrap_or(settings.recent_limit) as usize;
            let recent = aggregate::entity::recent_activity(&store, limit);
            (report::render(&recent, output_format(cmd.output.format))?, false)
        }
    };

    if dirty {
        store.save(&store_path)?;
    }
    println!("{rendered}");
    Ok(exit_code::SUCCESS)
}

fn main() {
    match run() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(exit_code::RUNTIME_FAILURE);
        }
    }
}
