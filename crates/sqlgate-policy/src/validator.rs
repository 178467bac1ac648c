//! Read-query allow-list.
//!
//! Rules, applied in order, rejecting on the first hit:
//!
//! 1. After trimming surrounding whitespace the text must start with `select`
//!    (ASCII case-insensitive). This is a literal prefix test.
//! 2. None of [`FORBIDDEN_KEYWORDS`] may appear anywhere in the text as a whole
//!    word, in any case. `updated_at` does not match `update`.
//! 3. Anything else is accepted.
//!
//! # Known limitations
//!
//! This is a heuristic gate, not a sandbox. It does not look inside the SQL:
//!
//! - keywords inside string literals or comments still cause a rejection,
//!   while keywords split by comments (`up/**/date`) slip through;
//! - stacked statements after a `;` are only scanned for the fixed keywords;
//! - data-modifying CTEs are rejected only because `WITH` fails rule 1;
//! - statements outside the list (`GRANT`, `COPY`, `CREATE`, `CALL`, ...) that
//!   can be smuggled behind a leading `SELECT` are not recognized.
//!
//! The executor runs accepted text inside a read-only transaction, which is the
//! backstop for these gaps. Tightening the gate (real parsing, single-statement
//! enforcement) changes what callers can run and is a separate decision.

use regex::Regex;
use sqlgate_core::{RejectReason, Verdict};
use std::sync::LazyLock;

/// Keywords that must not appear as whole words in an accepted query.
pub const FORBIDDEN_KEYWORDS: [&str; 6] = [
    "drop", "delete", "insert", "update", "alter", "truncate",
];

const READ_PREFIX: &str = "select";

static DEFAULT_VALIDATOR: LazyLock<QueryValidator> = LazyLock::new(QueryValidator::new);

/// Validate `query` with the default keyword set.
pub fn validate(query: &str) -> Verdict {
    DEFAULT_VALIDATOR.validate(query)
}

/// Compiled allow-list. Cheap to share; validation is pure and synchronous.
#[derive(Debug, Clone)]
pub struct QueryValidator {
    keywords: Vec<(&'static str, Regex)>,
}

impl QueryValidator {
    pub fn new() -> Self {
        let keywords = FORBIDDEN_KEYWORDS
            .iter()
            .map(|kw| (*kw, keyword_pattern(kw)))
            .collect();
        Self { keywords }
    }

    pub fn validate(&self, query: &str) -> Verdict {
        if !starts_with_select(query) {
            tracing::debug!("query rejected: not a read query");
            return Verdict::reject(RejectReason::NotAReadQuery);
        }

        for (keyword, pattern) in &self.keywords {
            if pattern.is_match(query) {
                tracing::debug!(keyword = %keyword, "query rejected: forbidden keyword");
                return Verdict::reject(RejectReason::ForbiddenKeyword((*keyword).to_string()));
            }
        }

        Verdict::accept()
    }
}

impl Default for QueryValidator {
    fn default() -> Self {
        Self::new()
    }
}

fn starts_with_select(query: &str) -> bool {
    query
        .trim()
        .get(..READ_PREFIX.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(READ_PREFIX))
}

fn keyword_pattern(keyword: &str) -> Regex {
    // Keywords are fixed ASCII words, so the pattern always compiles.
    Regex::new(&format!(r"(?i)\b{}\b", regex::escape(keyword)))
        .unwrap_or_else(|e| unreachable!("invalid keyword pattern for {keyword}: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reason(query: &str) -> Option<RejectReason> {
        validate(query).reason
    }

    fn forbidden(kw: &str) -> Option<RejectReason> {
        Some(RejectReason::ForbiddenKeyword(kw.to_string()))
    }

    #[test]
    fn test_plain_select_accepted() {
        let verdict = validate("SELECT * FROM customers");
        assert!(verdict.accepted);
        assert_eq!(verdict.reason, None);
    }

    #[test]
    fn test_select_prefix_is_case_insensitive_and_trimmed() {
        for q in [
            "select 1",
            "SeLeCt 1",
            "   \n\tSELECT company_name FROM suppliers  ",
        ] {
            assert!(validate(q).accepted, "expected accept: {q:?}");
        }
    }

    #[test]
    fn test_non_select_rejected() {
        for q in [
            "",
            "   ",
            "WITH x AS (SELECT 1) SELECT * FROM x",
            "EXPLAIN SELECT 1",
            "DELETE FROM customers",
            "(SELECT 1)",
            "sel",
            "-- comment\nSELECT 1",
        ] {
            assert_eq!(reason(q), Some(RejectReason::NotAReadQuery), "query: {q:?}");
        }
    }

    #[test]
    fn test_bare_select_accepted() {
        assert!(validate("select").accepted);
    }

    #[test]
    fn test_forbidden_keywords_any_case() {
        assert_eq!(reason("SELECT 1; DROP TABLE orders"), forbidden("drop"));
        assert_eq!(reason("select * from t where x in (Delete)"), forbidden("delete"));
        assert_eq!(reason("SELECT 1; INSERT INTO t VALUES (1)"), forbidden("insert"));
        assert_eq!(reason("select 1; UPDATE t SET a = 1"), forbidden("update"));
        assert_eq!(reason("SELECT 1; alter table t add c int"), forbidden("alter"));
        assert_eq!(reason("SELECT 1; TRUNCATE t"), forbidden("truncate"));
    }

    #[test]
    fn test_every_keyword_is_rejected() {
        for kw in FORBIDDEN_KEYWORDS {
            let upper = kw.to_uppercase();
            assert_eq!(reason(&format!("SELECT {upper}")), forbidden(kw));
            assert_eq!(reason(&format!("select x from {kw}")), forbidden(kw));
        }
    }

    #[test]
    fn test_first_keyword_in_list_order_is_reported() {
        assert_eq!(reason("SELECT update, drop FROM t"), forbidden("drop"));
    }

    #[test]
    fn test_word_boundary_keeps_identifiers() {
        for q in [
            "SELECT updated_at FROM orders",
            "SELECT dropped, deleted_flag, inserted FROM audit",
            "SELECT altered_by, truncated_name FROM t",
            "SELECT last_update FROM t",
            "SELECT * FROM updates",
        ] {
            assert!(validate(q).accepted, "expected accept: {q:?}");
        }
    }

    #[test]
    fn test_keyword_next_to_punctuation_matches() {
        assert_eq!(reason("SELECT 1;DELETE FROM t"), forbidden("delete"));
        assert_eq!(reason("SELECT \"drop\" FROM t"), forbidden("drop"));
        assert_eq!(reason("SELECT 'please update me'"), forbidden("update"));
    }

    #[test]
    fn test_known_gap_comment_splitting_is_not_detected() {
        assert!(validate("SELECT 1; up/**/date t SET a = 1").accepted);
    }

    #[test]
    fn test_validator_is_reusable() {
        let validator = QueryValidator::new();
        assert!(validator.validate("select 1").accepted);
        assert!(!validator.validate("drop table t").accepted);
        assert!(validator.validate("select 2").accepted);
    }
}
