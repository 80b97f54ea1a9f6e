use regex::Regex;
use std::sync::LazyLock;

// Word boundaries and case folding are ASCII only.
static CONVENTIONAL_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i-u)^(feat|fix|docs|style|refactor|test|chore|perf|ci|build)\(")
        .expect("valid regex")
});

static TICKET_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^0-9A-Za-z_])#[0-9]+(?-u:\b)|(?-u:\b)[A-Z]+-[0-9]+(?-u:\b)")
        .expect("valid regex")
});

static REFACTOR_WORDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i-u)\b(refactor|cleanup|reformat)\b").expect("valid regex"));

static FIX_WORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i-u)\b(fix|bug|hotfix|hack|workaround)\b").expect("valid regex")
});

static TEST_WORDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i-u)\b(test|spec)\b").expect("valid regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageSignals {
    pub has_prefix: bool,
    pub has_ticket: bool,
    pub length: usize,
}

impl MessageSignals {
    pub fn detect(message: &str) -> Self {
        Self {
            has_prefix: CONVENTIONAL_PREFIX.is_match(message),
            has_ticket: TICKET_REFERENCE.is_match(message),
            length: message.chars().count(),
        }
    }

    pub fn has_description(&self) -> bool {
        self.length > 20
    }
}

/// Kind of work a message advertises, highest priority first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkKind {
    Refactor,
    Fix,
    Test,
}

impl WorkKind {
    pub fn detect(message: &str) -> Option<Self> {
        if REFACTOR_WORDS.is_match(message) {
            Some(Self::Refactor)
        } else if FIX_WORDS.is_match(message) {
            Some(Self::Fix)
        } else if TEST_WORDS.is_match(message) {
            Some(Self::Test)
        } else {
            None
        }
    }

    pub fn points(self) -> u8 {
        match self {
            Self::Refactor => 5,
            Self::Fix => 4,
            Self::Test => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_requires_scope_parenthesis_at_start() {
        assert!(MessageSignals::detect("feat(api): add endpoint").has_prefix);
        assert!(MessageSignals::detect("FIX(core): crash").has_prefix);
        assert!(!MessageSignals::detect("feat: add endpoint").has_prefix);
        assert!(!MessageSignals::detect("wip feat(api): add endpoint").has_prefix);
    }

    #[test]
    fn ticket_reference_matches_hash_and_project_keys() {
        assert!(MessageSignals::detect("closes #42").has_ticket);
        assert!(MessageSignals::detect("#7 first").has_ticket);
        assert!(MessageSignals::detect("PROJ-123 wire up login").has_ticket);
        assert!(!MessageSignals::detect("proj-123 lowercase key").has_ticket);
        assert!(!MessageSignals::detect("issue#42 glued").has_ticket);
        assert!(!MessageSignals::detect("no reference here").has_ticket);
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        assert_eq!(MessageSignals::detect("héllo").length, 5);
    }

    #[test]
    fn work_kind_prefers_refactor_over_fix_and_test() {
        assert_eq!(
            WorkKind::detect("fix flaky test and refactor helper"),
            Some(WorkKind::Refactor)
        );
        assert_eq!(WorkKind::detect("Hotfix for test runner"), Some(WorkKind::Fix));
        assert_eq!(WorkKind::detect("add spec for parser"), Some(WorkKind::Test));
        assert_eq!(WorkKind::detect("fixes typo"), None);
        assert_eq!(WorkKind::detect("testing things"), None);
    }

    #[test]
    fn word_boundaries_are_ascii_only() {
        assert_eq!(WorkKind::detect("éfix"), Some(WorkKind::Fix));
        assert_eq!(WorkKind::detect("añadir test"), Some(WorkKind::Test));
        assert!(MessageSignals::detect("réf #12").has_ticket);
        assert!(MessageSignals::detect("éPROJ-9 moved").has_ticket);
        assert!(!MessageSignals::detect("ſtyle(ui): long s is not ascii").has_prefix);
    }
}
