use crate::types::commit::CommitScore;
use crate::types::entity::{Repository, Team};
use crate::types::report::{
    Analysis, CommitEntry, CommitLine, DashboardStats, DeveloperReport, DeveloperSummary,
    ImportOutcome, RepositoryReport, TeamReport, TeamSummary, TopPerformer, TrendPoint,
};

pub trait ToMarkdown {
    fn to_markdown(&self) -> String;
}

fn subject(message: &str) -> &str {
    message.lines().next().unwrap_or_default()
}

fn push_commit_table(output: &mut String, commits: &[CommitLine]) {
    if commits.is_empty() {
        output.push_str("- none\n");
        return;
    }
    output.push_str("| commit | score | +/- | files | date | message |\n");
    output.push_str("|---|---|---|---|---|---|\n");
    for commit in commits {
        output.push_str(&format!(
            "| {} | {} | +{}/-{} | {} | {} | {} |\n",
            short_hash(&commit.hash),
            commit.score,
            commit.additions,
            commit.deletions,
            commit.files_changed,
            commit.committed_at.format("%Y-%m-%d"),
            subject(&commit.message)
        ));
    }
}

fn short_hash(hash: &str) -> &str {
    hash.get(..7).unwrap_or(hash)
}

impl ToMarkdown for CommitScore {
    fn to_markdown(&self) -> String {
        let b = &self.breakdown;
        format!(
            "# Commit Score\n\nScore: {}\n\n## Breakdown\n\n- base: 50\n- lines: {}\n- files: {}\n- message: {}\n- consistency: {}\n- quality: {}\n",
            self.score,
            b.lines_score,
            b.files_score,
            b.message_score,
            b.consistency_bonus,
            b.quality_indicators
        )
    }
}

impl ToMarkdown for ImportOutcome {
    fn to_markdown(&self) -> String {
        let mut output = format!(
            "# Import\n\n- imported: {}\n- skipped: {}\n",
            self.imported, self.skipped
        );
        if !self.skips.is_empty() {
            output.push_str("\n## Skipped\n\n");
            for skip in &self.skips {
                output.push_str(&format!("- {}: {:?}\n", short_hash(&skip.hash), skip.reason));
            }
        }
        output
    }
}

impl ToMarkdown for Analysis {
    fn to_markdown(&self) -> String {
        let s = &self.summary;
        let mut output = String::from("# Commit Analysis\n\n## Summary\n\n");
        output.push_str(&format!(
            "- total commits: {}\n- avg score: {}\n- avg additions: {}\n- avg deletions: {}\n- avg files changed: {}\n\n",
            s.total_commits, s.avg_score, s.avg_additions, s.avg_deletions, s.avg_files_changed
        ));
        output.push_str("## Distribution\n\n| range | label | count | % |\n|---|---|---|---|\n");
        for band in &self.distribution {
            output.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                band.range, band.label, band.count, band.percentage
            ));
        }
        output
    }
}

impl ToMarkdown for Vec<TrendPoint> {
    fn to_markdown(&self) -> String {
        let mut output = String::from("# Performance Trend\n\n");
        if self.is_empty() {
            output.push_str("- no data yet\n");
            return output;
        }
        output.push_str("| month | avg score | commits |\n|---|---|---|\n");
        for point in self {
            output.push_str(&format!(
                "| {} | {} | {} |\n",
                point.month, point.avg_score, point.commits
            ));
        }
        output
    }
}

impl ToMarkdown for Vec<TopPerformer> {
    fn to_markdown(&self) -> String {
        let mut output = String::from("# Top Performers\n\n");
        if self.is_empty() {
            output.push_str("- no data yet\n");
            return output;
        }
        output.push_str("| rank | developer | avg score | commits |\n|---|---|---|---|\n");
        for (rank, performer) in self.iter().enumerate() {
            output.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                rank + 1,
                performer.username,
                performer.avg_score,
                performer.commit_count
            ));
        }
        output
    }
}

impl ToMarkdown for DashboardStats {
    fn to_markdown(&self) -> String {
        format!(
            "# Dashboard\n\n- developers: {}\n- teams: {}\n- repositories: {}\n- commits: {}\n- avg score: {:.1}\n",
            self.total_developers,
            self.total_teams,
            self.total_repositories,
            self.total_commits,
            self.avg_score
        )
    }
}

impl ToMarkdown for Vec<CommitEntry> {
    fn to_markdown(&self) -> String {
        let mut output = String::from("# Commits\n\n");
        if self.is_empty() {
            output.push_str("- no data yet\n");
            return output;
        }
        for entry in self {
            output.push_str(&format!(
                "- {} [{}] {} by {} in {} ({}, +{}/-{})\n",
                short_hash(&entry.hash),
                entry.score,
                subject(&entry.message),
                entry.developer,
                entry.repository,
                entry.committed_at.format("%Y-%m-%d"),
                entry.additions,
                entry.deletions
            ));
        }
        output
    }
}

impl ToMarkdown for Vec<DeveloperSummary> {
    fn to_markdown(&self) -> String {
        let mut output = String::from("# Developers\n\n");
        if self.is_empty() {
            output.push_str("- none\n");
            return output;
        }
        output.push_str("| id | developer | commits | avg score | recent score | last active ");
        output.push_str("| teams |\n");
        output.push_str("|---|---|---|---|---|---|---|\n");
        for developer in self {
            let teams = developer
                .teams
                .iter()
                .map(|team| team.name.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            output.push_str(&format!(
                "| {} | {} | {} | {} | {} | {} | {} |\n",
                developer.id,
                developer.username,
                developer.commit_count,
                developer.avg_score,
                developer.recent_score,
                developer
                    .last_active
                    .map(|at| at.format("%Y-%m-%d").to_string())
                    .unwrap_or_else(|| "-".to_string()),
                teams
            ));
        }
        output
    }
}

impl ToMarkdown for DeveloperReport {
    fn to_markdown(&self) -> String {
        let m = &self.metrics;
        let mut output = format!("# Developer {}\n\n", self.developer.username);
        output.push_str(&format!(
            "- id: {}\n- commits: {} ({} recent)\n- avg score: {}\n- recent score: {}\n- code churn: +{}/-{}\n- files changed: {}\n",
            self.developer.id,
            m.total_commits,
            m.recent_commits,
            m.avg_score,
            m.recent_score,
            m.total_additions,
            m.total_deletions,
            m.total_files_changed
        ));
        if let Some(last_active) = m.last_active {
            output.push_str(&format!("- last active: {}\n", last_active.format("%Y-%m-%d")));
        }
        output.push_str("\n## Trend\n\n");
        for point in &self.performance_trend {
            output.push_str(&format!(
                "- {}: {} ({} commits)\n",
                point.month, point.avg_score, point.commits
            ));
        }
        output.push_str("\n## Recent Commits\n\n");
        push_commit_table(&mut output, &self.recent_commits);
        output
    }
}

impl ToMarkdown for RepositoryReport {
    fn to_markdown(&self) -> String {
        let mut output = format!("# Repository {}\n\n", self.repository.full_name);
        output.push_str(&format!(
            "- id: {}\n- language: {}\n- commits: {}\n- avg score: {}\n- contributors: {}\n\n## Recent Commits\n\n",
            self.repository.id,
            self.repository.language.as_deref().unwrap_or("Unknown"),
            self.metrics.total_commits,
            self.metrics.avg_score,
            self.metrics.contributor_count
        ));
        push_commit_table(&mut output, &self.recent_commits);
        output
    }
}

impl ToMarkdown for TeamReport {
    fn to_markdown(&self) -> String {
        let mut output = format!("# Team {}\n\n", self.name);
        if let Some(description) = &self.description {
            output.push_str(&format!("{description}\n\n"));
        }
        output.push_str(&format!(
            "- id: {}\n- members: {}\n- repositories: {}\n- avg score: {}\n\n## Members\n\n",
            self.id,
            self.metrics.member_count,
            self.metrics.repository_count,
            self.metrics.avg_score
        ));
        if self.members.is_empty() {
            output.push_str("- none\n");
        }
        for member in &self.members {
            output.push_str(&format!(
                "- {} ({:?}): {} over {} commits\n",
                member.username, member.role, member.avg_score, member.commit_count
            ));
        }
        output
    }
}

impl ToMarkdown for Repository {
    fn to_markdown(&self) -> String {
        format!("repository {} registered as {}\n", self.full_name, self.id)
    }
}

impl ToMarkdown for Team {
    fn to_markdown(&self) -> String {
        format!("team {} created as {}\n", self.name, self.id)
    }
}

impl ToMarkdown for Vec<Repository> {
    fn to_markdown(&self) -> String {
        let mut output = String::from("# Repositories\n\n");
        if self.is_empty() {
            output.push_str("- none registered\n");
            return output;
        }
        output.push_str("| id | external id | repository | language |\n|---|---|---|---|\n");
        for repository in self {
            output.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                repository.id,
                repository.external_id,
                repository.full_name,
                repository.language.as_deref().unwrap_or("-")
            ));
        }
        output
    }
}

impl ToMarkdown for Vec<TeamSummary> {
    fn to_markdown(&self) -> String {
        let mut output = String::from("# Teams\n\n");
        if self.is_empty() {
            output.push_str("- none\n");
            return output;
        }
        output.push_str("| id | team | members | repositories | avg score |\n");
        output.push_str("|---|---|---|---|---|\n");
        for team in self {
            output.push_str(&format!(
                "| {} | {} | {} | {} | {} |\n",
                team.id, team.name, team.member_count, team.repository_count, team.avg_score
            ));
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{analysis, fixtures};
    use crate::scoring::score_commit;
    use crate::types::report::SkipReason;

    #[test]
    fn analysis_markdown_contains_sections() {
        let commits = vec![
            fixtures::commit(95, fixtures::at(2024, 1, 1)),
            fixtures::commit(40, fixtures::at(2024, 1, 2)),
        ];
        let rendered = analysis(&commits).to_markdown();
        assert!(rendered.contains("# Commit Analysis"));
        assert!(rendered.contains("## Distribution"));
        assert!(rendered.contains("| 90-100 | Excellent | 1 | 50 |"));
    }

    #[test]
    fn score_markdown_lists_breakdown() {
        let rendered = score_commit(0, 0, 0, "").to_markdown();
        assert!(rendered.contains("Score: 50"));
        assert!(rendered.contains("- consistency: 0"));
    }

    #[test]
    fn empty_trend_reports_no_data() {
        assert!(Vec::<TrendPoint>::new().to_markdown().contains("no data yet"));
    }

    #[test]
    fn team_list_markdown_shows_avg_score() {
        let teams = vec![TeamSummary {
            id: "t1".to_string(),
            name: "core".to_string(),
            description: None,
            member_count: 2,
            repository_count: 1,
            avg_score: 73,
        }];
        assert!(teams.to_markdown().contains("| t1 | core | 2 | 1 | 73 |"));
    }

    #[test]
    fn import_markdown_lists_skips() {
        let mut outcome = ImportOutcome::default();
        outcome.record_import();
        outcome.record_skip("0123456789abcdef", SkipReason::AlreadyImported);
        let rendered = outcome.to_markdown();
        assert!(rendered.contains("- imported: 1"));
        assert!(rendered.contains("- 0123456: AlreadyImported"));
    }
}
