use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawCommit {
    pub sha: String,
    #[serde(default)]
    pub commit: RawCommitDetail,
    #[serde(default)]
    pub author: Option<RawAccount>,
    #[serde(default)]
    pub stats: Option<RawStats>,
    #[serde(default)]
    pub files: Option<Vec<RawFile>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawCommitDetail {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub author: Option<RawSignature>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawSignature {
    pub name: Option<String>,
    pub email: Option<String>,
    pub date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawAccount {
    pub login: Option<String>,
    pub id: Option<u64>,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawStats {
    #[serde(default)]
    pub additions: u64,
    #[serde(default)]
    pub deletions: u64,
    #[serde(default)]
    pub total: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawFile {
    pub filename: String,
    #[serde(default)]
    pub additions: u64,
    #[serde(default)]
    pub deletions: u64,
    #[serde(default)]
    pub changes: u64,
}

impl RawCommit {
    pub fn additions(&self) -> u64 {
        self.stats.as_ref().map(|stats| stats.additions).unwrap_or(0)
    }

    pub fn deletions(&self) -> u64 {
        self.stats.as_ref().map(|stats| stats.deletions).unwrap_or(0)
    }

    pub fn files_changed(&self) -> u64 {
        self.files.as_ref().map(|files| files.len() as u64).unwrap_or(0)
    }

    pub fn external_author_id(&self) -> Option<String> {
        let account = self.author.as_ref()?;
        account
            .id
            .filter(|id| *id != 0)
            .map(|id| id.to_string())
            .or_else(|| account.login.clone().filter(|login| !login.is_empty()))
    }

    pub fn author_name(&self) -> String {
        self.commit
            .author
            .as_ref()
            .and_then(|signature| signature.name.clone())
            .filter(|name| !name.is_empty())
            .or_else(|| self.author.as_ref().and_then(|account| account.login.clone()))
            .unwrap_or_else(|| "Unknown".to_string())
    }

    pub fn author_email(&self) -> Option<String> {
        self.commit
            .author
            .as_ref()
            .and_then(|signature| signature.email.clone())
    }

    pub fn authored_at(&self) -> Option<DateTime<Utc>> {
        self.commit
            .author
            .as_ref()
            .and_then(|signature| signature.date)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub lines_score: u8,
    pub files_score: u8,
    pub message_score: u8,
    /// Reserved; nothing computes a cross-commit signal yet.
    pub consistency_bonus: u8,
    pub quality_indicators: u8,
}

impl ScoreBreakdown {
    pub fn total(&self) -> u32 {
        u32::from(self.lines_score)
            + u32::from(self.files_score)
            + u32::from(self.message_score)
            + u32::from(self.consistency_bonus)
            + u32::from(self.quality_indicators)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CommitScore {
    pub score: u8,
    pub breakdown: ScoreBreakdown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredCommit {
    pub id: String,
    pub hash: String,
    pub message: String,
    pub author: String,
    pub author_email: Option<String>,
    pub additions: u64,
    pub deletions: u64,
    pub files_changed: u64,
    pub score: u8,
    pub score_breakdown: ScoreBreakdown,
    pub committed_at: DateTime<Utc>,
    pub developer_id: String,
    pub repository_id: String,
}

#[derive(Debug, Clone)]
pub struct NewScoredCommit {
    pub hash: String,
    pub message: String,
    pub author: String,
    pub author_email: Option<String>,
    pub additions: u64,
    pub deletions: u64,
    pub files_changed: u64,
    pub score: CommitScore,
    pub committed_at: DateTime<Utc>,
    pub developer_id: String,
    pub repository_id: String,
}
