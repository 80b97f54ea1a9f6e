use crate::types::entity::{Developer, MemberRole, Repository};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_commits: u64,
    pub avg_score: u64,
    pub avg_additions: u64,
    pub avg_deletions: u64,
    pub avg_files_changed: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreBand {
    pub range: &'static str,
    pub label: &'static str,
    pub count: u64,
    pub percentage: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Analysis {
    pub summary: Summary,
    pub distribution: Vec<ScoreBand>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub month: String,
    pub avg_score: u64,
    pub commits: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopPerformer {
    pub id: String,
    pub username: String,
    pub avatar_url: Option<String>,
    pub name: Option<String>,
    pub avg_score: u64,
    pub commit_count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeveloperMetrics {
    pub total_commits: u64,
    pub recent_commits: u64,
    pub avg_score: u64,
    pub recent_score: u64,
    pub total_additions: u64,
    pub total_deletions: u64,
    pub total_files_changed: u64,
    pub code_churn: u64,
    pub last_active: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitLine {
    pub id: String,
    pub hash: String,
    pub message: String,
    pub score: u8,
    pub additions: u64,
    pub deletions: u64,
    pub files_changed: u64,
    pub committed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeveloperReport {
    pub developer: Developer,
    pub team_ids: Vec<String>,
    pub metrics: DeveloperMetrics,
    pub performance_trend: Vec<TrendPoint>,
    pub recent_commits: Vec<CommitLine>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryMetrics {
    pub total_commits: u64,
    pub avg_score: u64,
    pub contributor_count: u64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryReport {
    pub repository: Repository,
    pub team_ids: Vec<String>,
    pub metrics: RepositoryMetrics,
    pub recent_commits: Vec<CommitLine>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberScore {
    pub id: String,
    pub username: String,
    pub avatar_url: Option<String>,
    pub name: Option<String>,
    pub role: MemberRole,
    pub joined_at: DateTime<Utc>,
    pub avg_score: u64,
    pub commit_count: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMetrics {
    pub member_count: u64,
    pub repository_count: u64,
    pub avg_score: u64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamReport {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub members: Vec<MemberScore>,
    pub repository_ids: Vec<String>,
    pub metrics: TeamMetrics,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_developers: u64,
    pub total_teams: u64,
    pub total_repositories: u64,
    pub total_commits: u64,
    pub avg_score: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamSummary {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub member_count: u64,
    pub repository_count: u64,
    pub avg_score: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamRef {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeveloperSummary {
    pub id: String,
    pub external_id: String,
    pub username: String,
    pub avatar_url: Option<String>,
    pub email: Option<String>,
    pub name: Option<String>,
    pub teams: Vec<TeamRef>,
    pub commit_count: u64,
    pub avg_score: u64,
    pub recent_score: u64,
    pub last_active: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitEntry {
    pub id: String,
    pub hash: String,
    pub message: String,
    pub score: u8,
    pub additions: u64,
    pub deletions: u64,
    pub files_changed: u64,
    pub committed_at: DateTime<Utc>,
    pub developer_id: String,
    pub developer: String,
    pub repository_id: String,
    pub repository: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    AlreadyImported,
    MissingAuthor,
    UnknownRepository,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedCommit {
    pub hash: String,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportOutcome {
    pub imported: u64,
    pub skipped: u64,
    pub skips: Vec<SkippedCommit>,
}

impl ImportOutcome {
    pub fn record_import(&mut self) {
        self.imported += 1;
    }

    pub fn record_skip(&mut self, hash: &str, reason: SkipReason) {
        self.skipped += 1;
        self.skips.push(SkippedCommit {
            hash: hash.to_string(),
            reason,
        });
    }
}
