use crate::error::{CommitScoreError, Result};
use crate::types::commit::RawCommit;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub trait CommitSource {
    fn fetch_commits(&self, owner: &str, repo: &str, branch: Option<&str>)
        -> Result<Vec<RawCommit>>;
}

/// Reads `<root>/<owner>/<repo>[/<branch>]/*.json`, one commit or an array per file.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    root: PathBuf,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CommitFile {
    Many(Vec<RawCommit>),
    One(Box<RawCommit>),
}

impl JsonFileSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn commit_dir(&self, owner: &str, repo: &str, branch: Option<&str>) -> PathBuf {
        let dir = self.root.join(owner).join(repo);
        match branch {
            Some(branch) => dir.join(branch),
            None => dir,
        }
    }
}

impl CommitSource for JsonFileSource {
    fn fetch_commits(
        &self,
        owner: &str,
        repo: &str,
        branch: Option<&str>,
    ) -> Result<Vec<RawCommit>> {
        let dir = self.commit_dir(owner, repo, branch);
        if !dir.is_dir() {
            return Err(CommitScoreError::Source(format!(
                "no commit export for {owner}/{repo} at {}",
                dir.display()
            )));
        }

        let mut commits = Vec::new();
        for entry in WalkDir::new(&dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry?;
            if !entry.file_type().is_file() || !is_json(entry.path()) {
                continue;
            }
            match read_commit_file(entry.path())? {
                CommitFile::Many(batch) => commits.extend(batch),
                CommitFile::One(commit) => commits.push(*commit),
            }
        }
        Ok(commits)
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().and_then(|ext| ext.to_str()) == Some("json")
}

fn read_commit_file(path: &Path) -> Result<CommitFile> {
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content)
        .map_err(|e| CommitScoreError::Source(format!("{}: {}", path.display(), e)))
}
