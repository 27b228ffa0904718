//! Line parser for `gitolite.conf`
//!
//! Each source line is whitespace-normalized and then classified as a
//! comment, a group definition, a `repo` header or a body line of the
//! currently open repo block. Parsing is all-or-nothing: the first
//! malformed line aborts with a [`SyntaxError`].

use crate::conf::document::{Access, Document, Entry, Group, Repo, RepoEntry, Setting};
use crate::error::{ParseResult, SyntaxError, SyntaxErrorKind};
use tracing::{debug, trace};

const REPO_PREFIX: &str = "repo ";
const OPTION_PREFIX: &str = "option ";
const CONFIG_PREFIX: &str = "config ";

/// Parse configuration text into a [`Document`]
pub fn parse(text: &str) -> ParseResult<Document> {
    let mut state = ParseState::default();

    for (index, raw) in text.lines().enumerate() {
        let line = normalize(raw);
        if line.is_empty() {
            continue;
        }
        trace!(line = index + 1, text = %line, "Parsing line");
        state.line(&line).map_err(|kind| SyntaxError::new(index + 1, raw, kind))?;
    }

    let document = state.finish();
    debug!(entries = document.entries.len(), "Parsed configuration");
    Ok(document)
}

/// Parser state threaded through the line loop
#[derive(Default)]
struct ParseState {
    entries: Vec<Entry>,
    /// Index into `entries` of the open repo block
    current_repo: Option<usize>,
    /// Comments seen inside a repo block, waiting for the next structural line
    pending: Vec<String>,
}

impl ParseState {
    fn line(&mut self, line: &str) -> Result<(), SyntaxErrorKind> {
        if let Some(text) = line.strip_prefix('#') {
            self.comment(text.trim());
            return Ok(());
        }

        if line.starts_with('@') {
            return self.group(line);
        }

        if let Some(rest) = line.strip_prefix(REPO_PREFIX) {
            return self.repo(rest);
        }

        self.body(line)
    }

    fn comment(&mut self, text: &str) {
        if self.current_repo.is_some() {
            self.pending.push(text.to_string());
        } else {
            self.entries.push(Entry::Comment {
                text: text.to_string(),
            });
        }
    }

    fn group(&mut self, line: &str) -> Result<(), SyntaxErrorKind> {
        let (text, comment) = split_comment(line);
        let (name, members) = split_key_value(text)?;

        self.flush_to_root();
        self.entries.push(Entry::Group(Group {
            name: name.to_string(),
            members: members.split_whitespace().map(str::to_string).collect(),
            comment,
        }));
        Ok(())
    }

    fn repo(&mut self, rest: &str) -> Result<(), SyntaxErrorKind> {
        let (text, comment) = split_comment(rest);
        let aliases: Vec<String> = text.split_whitespace().map(str::to_string).collect();
        if aliases.is_empty() {
            return Err(SyntaxErrorKind::MissingRepoName);
        }

        self.flush_to_root();
        self.current_repo = Some(self.entries.len());
        self.entries.push(Entry::Repo(Repo {
            aliases,
            comment,
            body: Vec::new(),
        }));
        Ok(())
    }

    fn body(&mut self, line: &str) -> Result<(), SyntaxErrorKind> {
        let Some(index) = self.current_repo else {
            return Err(SyntaxErrorKind::OutsideRepo);
        };

        let (text, comment) = split_comment(line);
        let (key, value) = split_key_value(text)?;

        let entry = if let Some(name) = key.strip_prefix(OPTION_PREFIX) {
            RepoEntry::Option(setting(name, value, comment))
        } else if let Some(name) = key.strip_prefix(CONFIG_PREFIX) {
            RepoEntry::Config(setting(name, value, comment))
        } else {
            RepoEntry::Access(access(key, value, comment)?)
        };

        let Some(Entry::Repo(repo)) = self.entries.get_mut(index) else {
            return Err(SyntaxErrorKind::OutsideRepo);
        };
        let pending = std::mem::take(&mut self.pending);
        repo.body
            .extend(pending.into_iter().map(|text| RepoEntry::Comment { text }));
        repo.body.push(entry);
        Ok(())
    }

    /// Floating comments precede the next top-level entry
    fn flush_to_root(&mut self) {
        let pending = std::mem::take(&mut self.pending);
        self.entries
            .extend(pending.into_iter().map(|text| Entry::Comment { text }));
    }

    fn finish(mut self) -> Document {
        self.flush_to_root();
        Document {
            entries: self.entries,
        }
    }
}

fn setting(name: &str, value: &str, comment: Option<String>) -> Setting {
    Setting {
        name: name.trim().to_string(),
        value: value.to_string(),
        comment,
    }
}

fn access(key: &str, name: &str, comment: Option<String>) -> Result<Access, SyntaxErrorKind> {
    let mut tokens = key.split_whitespace();
    let perm = tokens.next().ok_or(SyntaxErrorKind::InvalidAccessRule)?;
    let refex = tokens.next();
    if tokens.next().is_some() || name.is_empty() {
        return Err(SyntaxErrorKind::InvalidAccessRule);
    }

    Ok(Access {
        perm: perm.to_string(),
        refex: refex.map(str::to_string),
        name: name.to_string(),
        comment,
    })
}

/// Collapse whitespace runs into single spaces and trim the ends
pub(crate) fn normalize(line: &str) -> String {
    line.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split off a trailing `# comment`; `\#` does not start a comment
pub(crate) fn split_comment(text: &str) -> (&str, Option<String>) {
    let bytes = text.as_bytes();
    let hash = bytes
        .iter()
        .enumerate()
        .find(|&(i, &b)| b == b'#' && (i == 0 || bytes[i - 1] != b'\\'))
        .map(|(i, _)| i);

    match hash {
        Some(i) => (text[..i].trim(), Some(text[i + 1..].trim().to_string())),
        None => (text.trim(), None),
    }
}

/// Split `key = value`, requiring exactly one `=`
fn split_key_value(text: &str) -> Result<(&str, &str), SyntaxErrorKind> {
    let mut parts = text.split('=');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(key), Some(value), None) => Ok((key.trim(), value.trim())),
        _ => Err(SyntaxErrorKind::ExpectedKeyValue),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  RW+\t\t=   alice  "), "RW+ = alice");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn test_split_comment() {
        assert_eq!(split_comment("alice bob"), ("alice bob", None));
        assert_eq!(
            split_comment("alice # the boss"),
            ("alice", Some("the boss".to_string()))
        );
        assert_eq!(
            split_comment("a # b # c"),
            ("a", Some("b # c".to_string()))
        );
        assert_eq!(split_comment(r"a\#b"), (r"a\#b", None));
    }

    #[test]
    fn test_split_key_value() {
        assert_eq!(split_key_value("RW+ = alice"), Ok(("RW+", "alice")));
        assert_eq!(
            split_key_value("RW+ alice"),
            Err(SyntaxErrorKind::ExpectedKeyValue)
        );
        assert_eq!(
            split_key_value("a = b = c"),
            Err(SyntaxErrorKind::ExpectedKeyValue)
        );
    }

    #[test]
    fn test_access_with_ref() {
        let access = access("RW+ master", "alice", None).unwrap();
        assert_eq!(access.perm, "RW+");
        assert_eq!(access.refex.as_deref(), Some("master"));
        assert_eq!(access.name, "alice");
    }

    #[test]
    fn test_access_with_too_many_tokens() {
        assert_eq!(
            access("RW master dev", "alice", None),
            Err(SyntaxErrorKind::InvalidAccessRule)
        );
    }

    #[test]
    fn test_comment_before_first_repo_goes_to_root() {
        let doc = parse("# header\nrepo demo\n\tR = alice\n").unwrap();
        assert_eq!(
            doc.entries[0],
            Entry::Comment {
                text: "header".into()
            }
        );
    }
}
