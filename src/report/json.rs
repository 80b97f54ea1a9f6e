use serde::Serialize;

pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::score_commit;
    use crate::types::report::Summary;

    #[test]
    fn json_uses_camel_case_field_names() {
        let summary = Summary {
            total_commits: 4,
            avg_score: 71,
            avg_additions: 12,
            avg_deletions: 3,
            avg_files_changed: 2,
        };

        let rendered = to_json(&summary).expect("json should serialize");
        assert!(rendered.contains("\"totalCommits\": 4"));
        assert!(rendered.contains("\"avgFilesChanged\": 2"));
    }

    #[test]
    fn json_score_includes_breakdown() {
        let rendered = to_json(&score_commit(30, 10, 2, "feat(api): add pagination support"))
            .expect("json should serialize");
        assert!(rendered.contains("\"score\": 80"));
        assert!(rendered.contains("\"consistencyBonus\": 0"));
    }
}
