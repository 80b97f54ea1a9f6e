pub mod entity;

use crate::types::commit::ScoredCommit;
use crate::types::entity::Developer;
use crate::types::report::{Analysis, ScoreBand, Summary, TopPerformer, TrendPoint};
use chrono::{DateTime, Datelike, Duration, Utc};
use std::collections::BTreeMap;

pub trait CommitRecord {
    fn score(&self) -> u8;
    fn additions(&self) -> u64;
    fn deletions(&self) -> u64;
    fn files_changed(&self) -> u64;
    fn committed_at(&self) -> DateTime<Utc>;
}

impl CommitRecord for ScoredCommit {
    fn score(&self) -> u8 {
        self.score
    }

    fn additions(&self) -> u64 {
        self.additions
    }

    fn deletions(&self) -> u64 {
        self.deletions
    }

    fn files_changed(&self) -> u64 {
        self.files_changed
    }

    fn committed_at(&self) -> DateTime<Utc> {
        self.committed_at
    }
}

impl<T: CommitRecord + ?Sized> CommitRecord for &T {
    fn score(&self) -> u8 {
        (**self).score()
    }

    fn additions(&self) -> u64 {
        (**self).additions()
    }

    fn deletions(&self) -> u64 {
        (**self).deletions()
    }

    fn files_changed(&self) -> u64 {
        (**self).files_changed()
    }

    fn committed_at(&self) -> DateTime<Utc> {
        (**self).committed_at()
    }
}

struct BandSpec {
    range: &'static str,
    label: &'static str,
    lower: u8,
}

// ascending lower bounds
const BANDS: [BandSpec; 4] = [
    BandSpec {
        range: "0-49",
        label: "Needs Improvement",
        lower: 0,
    },
    BandSpec {
        range: "50-69",
        label: "Average",
        lower: 50,
    },
    BandSpec {
        range: "70-89",
        label: "Good",
        lower: 70,
    },
    BandSpec {
        range: "90-100",
        label: "Excellent",
        lower: 90,
    },
];

// half up
pub fn rounded_mean(sum: u64, count: u64) -> u64 {
    if count == 0 {
        return 0;
    }
    let (sum, count) = (u128::from(sum), u128::from(count));
    ((2 * sum + count) / (2 * count)) as u64
}

pub fn percentage(part: u64, total: u64) -> u64 {
    if total == 0 {
        return 0;
    }
    rounded_mean(part.saturating_mul(100), total)
}

pub fn band_index(score: u8) -> usize {
    BANDS
        .iter()
        .rposition(|band| score >= band.lower)
        .unwrap_or(0)
}

pub fn summary<I>(records: I) -> Summary
where
    I: IntoIterator,
    I::Item: CommitRecord,
{
    let mut count = 0u64;
    let (mut score, mut additions, mut deletions, mut files) = (0u64, 0u64, 0u64, 0u64);
    for record in records {
        count += 1;
        score += u64::from(record.score());
        additions = additions.saturating_add(record.additions());
        deletions = deletions.saturating_add(record.deletions());
        files = files.saturating_add(record.files_changed());
    }

    Summary {
        total_commits: count,
        avg_score: rounded_mean(score, count),
        avg_additions: rounded_mean(additions, count),
        avg_deletions: rounded_mean(deletions, count),
        avg_files_changed: rounded_mean(files, count),
    }
}

pub fn distribution<I>(records: I) -> Vec<ScoreBand>
where
    I: IntoIterator,
    I::Item: CommitRecord,
{
    let mut counts = [0u64; BANDS.len()];
    for record in records {
        counts[band_index(record.score())] += 1;
    }
    let total: u64 = counts.iter().sum();

    BANDS
        .iter()
        .zip(counts)
        .map(|(band, count)| ScoreBand {
            range: band.range,
            label: band.label,
            count,
            percentage: percentage(count, total),
        })
        .collect()
}

pub fn analysis<'a, I>(records: I) -> Analysis
where
    I: IntoIterator<Item = &'a ScoredCommit>,
    I::IntoIter: Clone,
{
    let records = records.into_iter();
    Analysis {
        summary: summary(records.clone()),
        distribution: distribution(records),
    }
}

pub fn monthly_trend<I>(records: I) -> Vec<TrendPoint>
where
    I: IntoIterator,
    I::Item: CommitRecord,
{
    let mut months: BTreeMap<(i32, u32), (u64, u64)> = BTreeMap::new();
    for record in records {
        let at = record.committed_at();
        let entry = months.entry((at.year(), at.month())).or_default();
        entry.0 += u64::from(record.score());
        entry.1 += 1;
    }

    months
        .into_iter()
        .map(|((year, month), (total, commits))| TrendPoint {
            month: format!("{year:04}-{month:02}"),
            avg_score: rounded_mean(total, commits),
            commits,
        })
        .collect()
}

pub fn window_start(now: DateTime<Utc>, window_days: u32) -> DateTime<Utc> {
    Duration::try_days(i64::from(window_days))
        .and_then(|window| now.checked_sub_signed(window))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

pub fn in_window<R: CommitRecord>(record: &R, now: DateTime<Utc>, window_days: u32) -> bool {
    record.committed_at() >= window_start(now, window_days)
}

pub fn top_performers<'a, I, C>(
    developers: I,
    now: DateTime<Utc>,
    window_days: u32,
    limit: usize,
) -> Vec<TopPerformer>
where
    I: IntoIterator<Item = (&'a Developer, C)>,
    C: IntoIterator,
    C::Item: CommitRecord,
{
    let mut ranked = developers
        .into_iter()
        .map(|(developer, commits)| {
            let (total, count) = commits
                .into_iter()
                .filter(|commit| in_window(commit, now, window_days))
                .fold((0u64, 0u64), |(total, count), commit| {
                    (total + u64::from(commit.score()), count + 1)
                });
            TopPerformer {
                id: developer.id.clone(),
                username: developer.username.clone(),
                avatar_url: developer.avatar_url.clone(),
                name: developer.name.clone(),
                avg_score: rounded_mean(total, count),
                commit_count: count,
            }
        })
        .collect::<Vec<_>>();

    ranked.sort_by(|a, b| b.avg_score.cmp(&a.avg_score));
    ranked.truncate(limit);
    ranked
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::types::commit::{ScoreBreakdown, ScoredCommit};
    use crate::types::entity::Developer;
    use chrono::{DateTime, TimeZone, Utc};

    pub fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 12, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    pub fn commit(score: u8, committed_at: DateTime<Utc>) -> ScoredCommit {
        ScoredCommit {
            id: format!("c-{score}-{}", committed_at.timestamp()),
            hash: format!("h-{score}-{}", committed_at.timestamp()),
            message: "chore: update".to_string(),
            author: "dev".to_string(),
            author_email: None,
            additions: 10,
            deletions: 4,
            files_changed: 2,
            score,
            score_breakdown: ScoreBreakdown::default(),
            committed_at,
            developer_id: "dev-1".to_string(),
            repository_id: "repo-1".to_string(),
        }
    }

    pub fn developer(id: &str) -> Developer {
        Developer {
            id: id.to_string(),
            external_id: format!("ext-{id}"),
            username: id.to_string(),
            name: None,
            avatar_url: None,
            email: None,
            created_at: at(2024, 1, 1),
        }
    }
}
