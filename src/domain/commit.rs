use regex::Regex;
use std::sync::OnceLock;

use super::commit_type::CommitType;

/// Length of the abbreviated hash shown in release notes
pub const SHORT_HASH_LEN: usize = 7;

fn header_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\S+)\s(.*)$").ok()).as_ref()
}

/// A commit as seen by the classifier and the notes transformer.
///
/// Built once from history and never mutated afterwards. The gitmoji header
/// carries no scope, so parsing leaves `scope` empty and keeps the whole
/// remainder of the header as `subject`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub header: String,
    pub r#type: String,
    pub subject: String,
    /// Only set by callers that know the scope from elsewhere
    pub scope: Option<String>,
    pub hash: String,
}

/// Outcome of looking a commit up in the rule table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classified {
    Kept(CommitType),
    Dropped,
}

impl Commit {
    /// Parse a full commit message; only its first line is the header.
    pub fn parse(message: &str, hash: impl Into<String>) -> Self {
        let header = message.lines().next().unwrap_or_default().trim_end();
        let (r#type, subject) = split_header(header);

        Commit {
            header: header.to_string(),
            r#type: r#type.to_string(),
            subject: subject.to_string(),
            scope: None,
            hash: hash.into(),
        }
    }

    /// Parse a header with no known hash
    pub fn from_header(header: &str) -> Self {
        Commit::parse(header, String::new())
    }

    pub fn classify(&self) -> Classified {
        match CommitType::from_token(&self.r#type) {
            Some(kind) => Classified::Kept(kind),
            None => Classified::Dropped,
        }
    }

    /// First seven characters of the hash, or empty when the hash is unknown
    pub fn short_hash(&self) -> String {
        self.hash.chars().take(SHORT_HASH_LEN).collect()
    }
}

/// `<type> <subject>`; a header with no whitespace is all type.
fn split_header(header: &str) -> (&str, &str) {
    if let Some(captures) = header_regex().and_then(|re| re.captures(header)) {
        let r#type = captures.get(1).map(|m| m.as_str()).unwrap_or_default();
        let subject = captures.get(2).map(|m| m.as_str()).unwrap_or_default();
        return (r#type, subject);
    }
    (header, "")
}
