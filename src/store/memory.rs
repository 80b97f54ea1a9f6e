use super::{record_id, CommitFilter, Store};
use crate::error::{CommitScoreError, Result};
use crate::types::commit::{NewScoredCommit, ScoredCommit};
use crate::types::entity::{
    Developer, MemberRole, NewDeveloper, NewRepository, Repository, Team, TeamMember,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

// developers and repositories keyed by external id, commits by hash
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct MemoryStore {
    #[serde(default)]
    developers: BTreeMap<String, Developer>,
    #[serde(default)]
    repositories: BTreeMap<String, Repository>,
    #[serde(default)]
    teams: BTreeMap<String, Team>,
    #[serde(default)]
    commits: BTreeMap<String, ScoredCommit>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no store snapshot, starting empty");
            return Ok(Self::new());
        }
        let content = fs::read_to_string(path)?;
        let store: Self = serde_json::from_str(&content).map_err(|e| {
            CommitScoreError::Store(format!("{}: {}", path.display(), e))
        })?;
        debug!(
            path = %path.display(),
            commits = store.commits.len(),
            developers = store.developers.len(),
            "loaded store snapshot"
        );
        Ok(store)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        info!(path = %path.display(), commits = self.commits.len(), "saved store snapshot");
        Ok(())
    }

    pub fn upsert_repository(&mut self, fields: NewRepository) -> Repository {
        let now = Utc::now();
        let full_name = fields.full_name();
        let url = fields.resolved_url();
        let repository = self
            .repositories
            .entry(fields.external_id.clone())
            .and_modify(|existing| {
                existing.name = fields.name.clone();
                existing.full_name = full_name.clone();
                existing.owner = fields.owner.clone();
                existing.url = url.clone();
                existing.language = fields.language.clone();
                existing.updated_at = now;
            })
            .or_insert_with(|| Repository {
                id: record_id("repository", &fields.external_id),
                external_id: fields.external_id.clone(),
                name: fields.name.clone(),
                full_name: full_name.clone(),
                owner: fields.owner.clone(),
                url: url.clone(),
                language: fields.language.clone(),
                created_at: now,
                updated_at: now,
            });
        repository.clone()
    }

    pub fn create_team(&mut self, name: &str, description: Option<String>) -> Result<Team> {
        let id = record_id("team", name);
        if self.teams.contains_key(&id) {
            return Err(CommitScoreError::Store(format!("team already exists: {name}")));
        }
        let team = Team {
            id: id.clone(),
            name: name.to_string(),
            description,
            members: Vec::new(),
            repository_ids: Vec::new(),
            created_at: Utc::now(),
        };
        self.teams.insert(id, team.clone());
        Ok(team)
    }

    // re-adding a member keeps the original role and join time
    pub fn add_team_member(
        &mut self,
        team_id: &str,
        developer_id: &str,
        role: MemberRole,
    ) -> Result<()> {
        if self.developer(developer_id).is_none() {
            return Err(not_found("developer", developer_id));
        }
        let team = self
            .teams
            .get_mut(team_id)
            .ok_or_else(|| not_found("team", team_id))?;
        if team
            .members
            .iter()
            .any(|member| member.developer_id == developer_id)
        {
            return Ok(());
        }
        team.members.push(TeamMember {
            developer_id: developer_id.to_string(),
            role,
            joined_at: Utc::now(),
        });
        Ok(())
    }

    pub fn add_team_repository(&mut self, team_id: &str, repository_id: &str) -> Result<()> {
        if self.repository(repository_id).is_none() {
            return Err(not_found("repository", repository_id));
        }
        let team = self
            .teams
            .get_mut(team_id)
            .ok_or_else(|| not_found("team", team_id))?;
        if !team.repository_ids.iter().any(|id| id == repository_id) {
            team.repository_ids.push(repository_id.to_string());
        }
        Ok(())
    }

    pub fn developer(&self, id: &str) -> Option<&Developer> {
        self.developers.values().find(|developer| developer.id == id)
    }

    pub fn repository(&self, id: &str) -> Option<&Repository> {
        self.repositories
            .values()
            .find(|repository| repository.id == id)
    }

    pub fn team(&self, id: &str) -> Option<&Team> {
        self.teams.get(id)
    }

    pub fn developers(&self) -> impl Iterator<Item = &Developer> {
        self.developers.values()
    }

    pub fn repositories(&self) -> impl Iterator<Item = &Repository> {
        self.repositories.values()
    }

    pub fn teams(&self) -> impl Iterator<Item = &Team> {
        self.teams.values()
    }

    pub fn teams_for_developer(&self, developer_id: &str) -> Vec<String> {
        self.teams
            .values()
            .filter(|team| {
                team.members
                    .iter()
                    .any(|member| member.developer_id == developer_id)
            })
            .map(|team| team.id.clone())
            .collect()
    }

    pub fn teams_for_repository(&self, repository_id: &str) -> Vec<String> {
        self.teams
            .values()
            .filter(|team| team.repository_ids.iter().any(|id| id == repository_id))
            .map(|team| team.id.clone())
            .collect()
    }

    pub fn commits(&self, filter: &CommitFilter) -> Vec<&ScoredCommit> {
        let mut commits = self
            .commits
            .values()
            .filter(|commit| filter.matches(commit))
            .collect::<Vec<_>>();
        commits.sort_by(|a, b| b.committed_at.cmp(&a.committed_at));
        commits
    }

    pub fn developer_count(&self) -> usize {
        self.developers.len()
    }

    pub fn repository_count(&self) -> usize {
        self.repositories.len()
    }

    pub fn team_count(&self) -> usize {
        self.teams.len()
    }

    pub fn commit_count(&self) -> usize {
        self.commits.len()
    }
}

impl Store for MemoryStore {
    fn find_commit_by_hash(&self, hash: &str) -> Result<Option<ScoredCommit>> {
        Ok(self.commits.get(hash).cloned())
    }

    fn find_developer_by_external_id(&self, external_id: &str) -> Result<Option<Developer>> {
        Ok(self.developers.get(external_id).cloned())
    }

    fn create_developer(&mut self, fields: NewDeveloper) -> Result<Developer> {
        if self.developers.contains_key(&fields.external_id) {
            return Err(CommitScoreError::Store(format!(
                "developer already exists: {}",
                fields.external_id
            )));
        }
        let developer = new_developer_record(&fields);
        self.developers
            .insert(fields.external_id, developer.clone());
        Ok(developer)
    }

    fn find_repository_by_external_id(&self, external_id: &str) -> Result<Option<Repository>> {
        Ok(self.repositories.get(external_id).cloned())
    }

    fn create_scored_commit(&mut self, fields: NewScoredCommit) -> Result<ScoredCommit> {
        if self.commits.contains_key(&fields.hash) {
            return Err(CommitScoreError::Store(format!(
                "commit already exists: {}",
                fields.hash
            )));
        }
        let commit = ScoredCommit {
            id: record_id("commit", &fields.hash),
            hash: fields.hash,
            message: fields.message,
            author: fields.author,
            author_email: fields.author_email,
            additions: fields.additions,
            deletions: fields.deletions,
            files_changed: fields.files_changed,
            score: fields.score.score,
            score_breakdown: fields.score.breakdown,
            committed_at: fields.committed_at,
            developer_id: fields.developer_id,
            repository_id: fields.repository_id,
        };
        self.commits.insert(commit.hash.clone(), commit.clone());
        Ok(commit)
    }
}

fn new_developer_record(fields: &NewDeveloper) -> Developer {
    Developer {
        id: record_id("developer", &fields.external_id),
        external_id: fields.external_id.clone(),
        username: fields.username.clone(),
        name: fields.name.clone(),
        avatar_url: fields.avatar_url.clone(),
        email: fields.email.clone(),
        created_at: Utc::now(),
    }
}

fn not_found(kind: &'static str, id: &str) -> CommitScoreError {
    CommitScoreError::NotFound {
        kind,
        id: id.to_string(),
    }
}
