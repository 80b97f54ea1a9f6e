pub mod message;

use crate::types::commit::{CommitScore, RawCommit, ScoreBreakdown};
use message::{MessageSignals, WorkKind};

pub const BASE_SCORE: u32 = 50;
pub const MAX_SCORE: u32 = 100;

const MAX_LINES_SCORE: u8 = 15;
const MAX_FILES_SCORE: u8 = 10;
const MAX_MESSAGE_SCORE: u8 = 10;
const MAX_QUALITY_INDICATORS: u8 = 5;

pub fn score_commit(
    additions: u64,
    deletions: u64,
    files_changed: u64,
    message: &str,
) -> CommitScore {
    let breakdown = ScoreBreakdown {
        lines_score: lines_score(additions.saturating_add(deletions)).min(MAX_LINES_SCORE),
        files_score: files_score(files_changed).min(MAX_FILES_SCORE),
        message_score: message_score(&MessageSignals::detect(message)).min(MAX_MESSAGE_SCORE),
        consistency_bonus: 0,
        quality_indicators: WorkKind::detect(message)
            .map(WorkKind::points)
            .unwrap_or(0)
            .min(MAX_QUALITY_INDICATORS),
    };

    let score = (BASE_SCORE + breakdown.total()).min(MAX_SCORE) as u8;
    CommitScore { score, breakdown }
}

pub fn score_raw_commit(raw: &RawCommit) -> CommitScore {
    score_commit(
        raw.additions(),
        raw.deletions(),
        raw.files_changed(),
        &raw.commit.message,
    )
}

fn lines_score(total_changes: u64) -> u8 {
    match total_changes {
        0 => 0,
        1..=50 => 10,
        51..=200 => 15,
        201..=500 => 12,
        501..=1000 => 8,
        _ => 5,
    }
}

fn files_score(files_changed: u64) -> u8 {
    match files_changed {
        0 => 0,
        1..=3 => 10,
        4..=7 => 8,
        8..=15 => 5,
        _ => 2,
    }
}

fn message_score(signals: &MessageSignals) -> u8 {
    if signals.has_prefix && signals.has_description() {
        10
    } else if signals.has_prefix || signals.has_ticket {
        7
    } else if signals.length > 50 {
        5
    } else if signals.has_description() {
        3
    } else {
        0
    }
}
