pub mod source;

use crate::error::Result;
use crate::scoring::score_raw_commit;
use crate::store::Store;
use crate::types::commit::{NewScoredCommit, RawCommit};
use crate::types::entity::{Developer, NewDeveloper};
use crate::types::report::{ImportOutcome, SkipReason};
use chrono::{DateTime, Utc};
use source::CommitSource;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy)]
pub struct ImportRequest<'a> {
    pub repository_external_id: &'a str,
    pub owner: &'a str,
    pub repo: &'a str,
    pub branch: Option<&'a str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Decision {
    Imported,
    Skipped(SkipReason),
}

pub fn import_commits<S, C>(
    store: &mut S,
    source: &C,
    request: &ImportRequest<'_>,
) -> Result<ImportOutcome>
where
    S: Store + ?Sized,
    C: CommitSource + ?Sized,
{
    let raw_commits = source.fetch_commits(request.owner, request.repo, request.branch)?;
    let imported_at = Utc::now();
    debug!(
        owner = request.owner,
        repo = request.repo,
        fetched = raw_commits.len(),
        "fetched commits"
    );

    let mut outcome = ImportOutcome::default();
    for raw in &raw_commits {
        match reconcile_commit(store, raw, request.repository_external_id, imported_at)? {
            Decision::Imported => outcome.record_import(),
            Decision::Skipped(reason) => {
                debug!(hash = raw.sha.as_str(), ?reason, "skipped commit");
                outcome.record_skip(&raw.sha, reason);
            }
        }
    }

    info!(
        owner = request.owner,
        repo = request.repo,
        imported = outcome.imported,
        skipped = outcome.skipped,
        "import finished"
    );
    Ok(outcome)
}

fn reconcile_commit<S: Store + ?Sized>(
    store: &mut S,
    raw: &RawCommit,
    repository_external_id: &str,
    imported_at: DateTime<Utc>,
) -> Result<Decision> {
    if store.find_commit_by_hash(&raw.sha)?.is_some() {
        return Ok(Decision::Skipped(SkipReason::AlreadyImported));
    }

    let Some(developer) = resolve_developer(store, raw)? else {
        return Ok(Decision::Skipped(SkipReason::MissingAuthor));
    };

    // Repositories are registered up front; only developers are auto-created.
    let Some(repository) = store.find_repository_by_external_id(repository_external_id)? else {
        return Ok(Decision::Skipped(SkipReason::UnknownRepository));
    };

    let score = score_raw_commit(raw);
    let commit = store.create_scored_commit(NewScoredCommit {
        hash: raw.sha.clone(),
        message: raw.commit.message.clone(),
        author: raw.author_name(),
        author_email: raw.author_email(),
        additions: raw.additions(),
        deletions: raw.deletions(),
        files_changed: raw.files_changed(),
        score,
        committed_at: raw.authored_at().unwrap_or(imported_at),
        developer_id: developer.id,
        repository_id: repository.id,
    })?;
    debug!(hash = commit.hash.as_str(), score = commit.score, "imported commit");
    Ok(Decision::Imported)
}

fn resolve_developer<S: Store + ?Sized>(
    store: &mut S,
    raw: &RawCommit,
) -> Result<Option<Developer>> {
    let Some(external_id) = raw.external_author_id() else {
        return Ok(None);
    };
    if let Some(existing) = store.find_developer_by_external_id(&external_id)? {
        return Ok(Some(existing));
    }

    let account = raw.author.as_ref();
    let username = account
        .and_then(|account| account.login.clone())
        .unwrap_or_else(|| external_id.clone());
    let developer = store.create_developer(NewDeveloper {
        external_id,
        username,
        avatar_url: account.and_then(|account| account.avatar_url.clone()),
        ..NewDeveloper::default()
    })?;
    debug!(developer = developer.username.as_str(), "created developer");
    Ok(Some(developer))
}
