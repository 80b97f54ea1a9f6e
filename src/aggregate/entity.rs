use super::{in_window, monthly_trend, rounded_mean, top_performers, CommitRecord};
use crate::error::{CommitScoreError, Result};
use crate::store::memory::MemoryStore;
use crate::store::CommitFilter;
use crate::types::commit::ScoredCommit;
use crate::types::entity::Developer;
use crate::types::report::{
    CommitEntry, CommitLine, DashboardStats, DeveloperMetrics, DeveloperReport, DeveloperSummary,
    MemberScore, RepositoryMetrics, RepositoryReport, TeamMetrics, TeamRef, TeamReport,
    TeamSummary, TopPerformer, TrendPoint,
};
use chrono::{DateTime, Months, Utc};
use std::collections::BTreeSet;

const RECENT_COMMITS: usize = 10;
// newest commits per member feeding the team score
const MEMBER_SAMPLE: usize = 30;

pub fn developer_metrics(
    commits: &[&ScoredCommit],
    now: DateTime<Utc>,
    window_days: u32,
) -> DeveloperMetrics {
    let recent = commits
        .iter()
        .filter(|commit| in_window(*commit, now, window_days))
        .collect::<Vec<_>>();
    let total_additions = commits.iter().map(|c| c.additions).sum::<u64>();
    let total_deletions = commits.iter().map(|c| c.deletions).sum::<u64>();

    DeveloperMetrics {
        total_commits: commits.len() as u64,
        recent_commits: recent.len() as u64,
        avg_score: mean_score(commits.iter()),
        recent_score: mean_score(recent.into_iter()),
        total_additions,
        total_deletions,
        total_files_changed: commits.iter().map(|c| c.files_changed).sum(),
        code_churn: total_additions + total_deletions,
        last_active: commits.iter().map(|c| c.committed_at).max(),
    }
}

pub fn repository_metrics(commits: &[&ScoredCommit]) -> RepositoryMetrics {
    let contributors = commits
        .iter()
        .map(|commit| commit.developer_id.as_str())
        .collect::<BTreeSet<_>>();
    RepositoryMetrics {
        total_commits: commits.len() as u64,
        avg_score: mean_score(commits.iter()),
        contributor_count: contributors.len() as u64,
    }
}

pub fn developer_report(
    store: &MemoryStore,
    developer_id: &str,
    now: DateTime<Utc>,
    window_days: u32,
) -> Result<DeveloperReport> {
    let developer = store
        .developer(developer_id)
        .ok_or_else(|| not_found("developer", developer_id))?;
    let commits = store.commits(&CommitFilter::for_developer(developer_id));

    Ok(DeveloperReport {
        developer: developer.clone(),
        team_ids: store.teams_for_developer(developer_id),
        metrics: developer_metrics(&commits, now, window_days),
        performance_trend: monthly_trend(&commits),
        recent_commits: commit_lines(&commits),
    })
}

pub fn repository_report(store: &MemoryStore, repository_id: &str) -> Result<RepositoryReport> {
    let repository = store
        .repository(repository_id)
        .ok_or_else(|| not_found("repository", repository_id))?;
    let commits = store.commits(&CommitFilter::for_repository(repository_id));

    Ok(RepositoryReport {
        repository: repository.clone(),
        team_ids: store.teams_for_repository(repository_id),
        metrics: repository_metrics(&commits),
        recent_commits: commit_lines(&commits),
    })
}

pub fn team_report(store: &MemoryStore, team_id: &str) -> Result<TeamReport> {
    let team = store.team(team_id).ok_or_else(|| not_found("team", team_id))?;

    let mut members = Vec::with_capacity(team.members.len());
    for member in &team.members {
        let Some(developer) = store.developer(&member.developer_id) else {
            continue;
        };
        let mut commits = store.commits(&CommitFilter::for_developer(&developer.id));
        commits.truncate(MEMBER_SAMPLE);
        members.push(MemberScore {
            id: developer.id.clone(),
            username: developer.username.clone(),
            avatar_url: developer.avatar_url.clone(),
            name: developer.name.clone(),
            role: member.role.clone(),
            joined_at: member.joined_at,
            avg_score: mean_score(commits.iter()),
            commit_count: commits.len() as u64,
        });
    }

    let weighted_total = members
        .iter()
        .map(|member| member.avg_score * member.commit_count)
        .sum::<u64>();
    let sampled = members.iter().map(|member| member.commit_count).sum::<u64>();

    Ok(TeamReport {
        id: team.id.clone(),
        name: team.name.clone(),
        description: team.description.clone(),
        metrics: TeamMetrics {
            member_count: team.members.len() as u64,
            repository_count: team.repository_ids.len() as u64,
            avg_score: rounded_mean(weighted_total, sampled),
        },
        members,
        repository_ids: team.repository_ids.clone(),
    })
}

pub fn dashboard_stats(store: &MemoryStore) -> DashboardStats {
    let commits = store.commits(&CommitFilter::default());
    let avg_score = if commits.is_empty() {
        0.0
    } else {
        commits.iter().map(|c| f64::from(c.score)).sum::<f64>() / commits.len() as f64
    };

    DashboardStats {
        total_developers: store.developer_count() as u64,
        total_teams: store.team_count() as u64,
        total_repositories: store.repository_count() as u64,
        total_commits: store.commit_count() as u64,
        avg_score,
    }
}

pub fn developer_summary(
    store: &MemoryStore,
    developer: &Developer,
    now: DateTime<Utc>,
    window_days: u32,
) -> DeveloperSummary {
    let commits = store.commits(&CommitFilter::for_developer(&developer.id));
    let metrics = developer_metrics(&commits, now, window_days);
    let teams = store
        .teams()
        .filter(|team| {
            team.members
                .iter()
                .any(|member| member.developer_id == developer.id)
        })
        .map(|team| TeamRef {
            id: team.id.clone(),
            name: team.name.clone(),
        })
        .collect();

    DeveloperSummary {
        id: developer.id.clone(),
        external_id: developer.external_id.clone(),
        username: developer.username.clone(),
        avatar_url: developer.avatar_url.clone(),
        email: developer.email.clone(),
        name: developer.name.clone(),
        teams,
        commit_count: metrics.total_commits,
        avg_score: metrics.avg_score,
        recent_score: metrics.recent_score,
        last_active: metrics.last_active,
    }
}

pub fn developer_summaries(
    store: &MemoryStore,
    search: Option<&str>,
    now: DateTime<Utc>,
    window_days: u32,
) -> Vec<DeveloperSummary> {
    let needle = search.map(str::to_lowercase);
    let mut developers = store
        .developers()
        .filter(|developer| match &needle {
            Some(needle) => matches_search(developer, needle),
            None => true,
        })
        .collect::<Vec<_>>();
    developers.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    developers
        .into_iter()
        .map(|developer| developer_summary(store, developer, now, window_days))
        .collect()
}

fn matches_search(developer: &Developer, needle: &str) -> bool {
    [
        Some(developer.username.as_str()),
        developer.name.as_deref(),
        developer.email.as_deref(),
    ]
    .into_iter()
    .flatten()
    .any(|field| field.to_lowercase().contains(needle))
}

pub fn team_summaries(store: &MemoryStore) -> Vec<TeamSummary> {
    let mut teams = store.teams().collect::<Vec<_>>();
    teams.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    teams
        .into_iter()
        .map(|team| {
            let members = team
                .members
                .iter()
                .map(|member| member.developer_id.as_str())
                .collect::<BTreeSet<_>>();
            let commits = store
                .commits(&CommitFilter::default())
                .into_iter()
                .filter(|commit| members.contains(commit.developer_id.as_str()));
            TeamSummary {
                id: team.id.clone(),
                name: team.name.clone(),
                description: team.description.clone(),
                member_count: team.members.len() as u64,
                repository_count: team.repository_ids.len() as u64,
                avg_score: mean_score(commits),
            }
        })
        .collect()
}

pub fn commit_entries(
    store: &MemoryStore,
    filter: &CommitFilter,
    limit: usize,
) -> Vec<CommitEntry> {
    store
        .commits(filter)
        .into_iter()
        .take(limit)
        .map(|commit| CommitEntry {
            id: commit.id.clone(),
            hash: commit.hash.clone(),
            message: commit.message.clone(),
            score: commit.score,
            additions: commit.additions,
            deletions: commit.deletions,
            files_changed: commit.files_changed,
            committed_at: commit.committed_at,
            developer_id: commit.developer_id.clone(),
            developer: store
                .developer(&commit.developer_id)
                .map(|developer| developer.username.clone())
                .unwrap_or_else(|| commit.author.clone()),
            repository_id: commit.repository_id.clone(),
            repository: store
                .repository(&commit.repository_id)
                .map(|repository| repository.name.clone())
                .unwrap_or_default(),
        })
        .collect()
}

pub fn recent_activity(store: &MemoryStore, limit: usize) -> Vec<CommitEntry> {
    commit_entries(store, &CommitFilter::default(), limit)
}

pub fn performance_trend(
    store: &MemoryStore,
    now: DateTime<Utc>,
    months: u32,
) -> Vec<TrendPoint> {
    let since = now
        .checked_sub_months(Months::new(months))
        .unwrap_or(DateTime::<Utc>::MIN_UTC);
    monthly_trend(store.commits(&CommitFilter::since(since)))
}

pub fn store_top_performers(
    store: &MemoryStore,
    now: DateTime<Utc>,
    window_days: u32,
    limit: usize,
) -> Vec<TopPerformer> {
    let entries = store
        .developers()
        .map(|developer| {
            (
                developer,
                store.commits(&CommitFilter::for_developer(&developer.id)),
            )
        })
        .collect::<Vec<_>>();
    top_performers(entries, now, window_days, limit)
}

fn mean_score<I>(records: I) -> u64
where
    I: Iterator,
    I::Item: CommitRecord,
{
    let (total, count) = records.fold((0u64, 0u64), |(total, count), record| {
        (total + u64::from(record.score()), count + 1)
    });
    rounded_mean(total, count)
}

fn commit_lines(commits: &[&ScoredCommit]) -> Vec<CommitLine> {
    commits
        .iter()
        .take(RECENT_COMMITS)
        .map(|commit| CommitLine {
            id: commit.id.clone(),
            hash: commit.hash.clone(),
            message: commit.message.clone(),
            score: commit.score,
            additions: commit.additions,
            deletions: commit.deletions,
            files_changed: commit.files_changed,
            committed_at: commit.committed_at,
        })
        .collect()
}

fn not_found(kind: &'static str, id: &str) -> CommitScoreError {
    CommitScoreError::NotFound {
        kind,
        id: id.to_string(),
    }
}
