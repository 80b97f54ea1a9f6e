pub mod memory;

use crate::error::Result;
use crate::types::commit::{NewScoredCommit, ScoredCommit};
use crate::types::entity::{Developer, NewDeveloper, Repository};
use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

// Implementations must reject duplicate external ids and hashes on create.
pub trait Store {
    fn find_commit_by_hash(&self, hash: &str) -> Result<Option<ScoredCommit>>;
    fn find_developer_by_external_id(&self, external_id: &str) -> Result<Option<Developer>>;
    fn create_developer(&mut self, developer: NewDeveloper) -> Result<Developer>;
    fn find_repository_by_external_id(&self, external_id: &str) -> Result<Option<Repository>>;
    fn create_scored_commit(&mut self, commit: NewScoredCommit) -> Result<ScoredCommit>;
}

#[derive(Debug, Clone, Default)]
pub struct CommitFilter {
    pub repository_id: Option<String>,
    pub developer_id: Option<String>,
    pub since: Option<DateTime<Utc>>,
    pub until: Option<DateTime<Utc>>,
}

impl CommitFilter {
    pub fn for_developer(developer_id: &str) -> Self {
        Self {
            developer_id: Some(developer_id.to_string()),
            ..Self::default()
        }
    }

    pub fn for_repository(repository_id: &str) -> Self {
        Self {
            repository_id: Some(repository_id.to_string()),
            ..Self::default()
        }
    }

    pub fn since(since: DateTime<Utc>) -> Self {
        Self {
            since: Some(since),
            ..Self::default()
        }
    }

    pub fn matches(&self, commit: &ScoredCommit) -> bool {
        self.repository_id
            .as_deref()
            .map_or(true, |id| commit.repository_id == id)
            && self
                .developer_id
                .as_deref()
                .map_or(true, |id| commit.developer_id == id)
            && self.since.map_or(true, |since| commit.committed_at >= since)
            && self.until.map_or(true, |until| commit.committed_at <= until)
    }
}

pub fn record_id(kind: &str, natural_key: &str) -> String {
    let digest = Sha256::digest(format!("{kind}:{natural_key}").as_bytes());
    let mut id = format!("{digest:x}");
    id.truncate(12);
    id
}
