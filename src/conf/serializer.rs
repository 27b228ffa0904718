//! Canonical writer for `gitolite.conf`
//!
//! Every top-level entry is followed by a blank line and repo bodies are
//! indented with a single tab. Access rules without a ref pad the permission
//! to a four character column so the `=` signs line up.

use crate::conf::document::{Access, Document, Entry, Group, Repo, RepoEntry, Setting};
use std::fmt::{self, Write};

/// Minimum width of the permission column for rules without a ref
const PERM_COLUMN: usize = 4;

/// Render a [`Document`] as configuration text
pub fn serialize(document: &Document) -> String {
    document.to_string()
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            match entry {
                Entry::Comment { text } => write_comment(f, text)?,
                Entry::Group(group) => write_group(f, group)?,
                Entry::Repo(repo) => write_repo(f, repo)?,
            }
            f.write_char('\n')?;
        }
        Ok(())
    }
}

fn write_comment(f: &mut impl Write, text: &str) -> fmt::Result {
    if text.is_empty() {
        writeln!(f, "#")
    } else {
        writeln!(f, "# {text}")
    }
}

fn write_trailing(f: &mut impl Write, comment: Option<&str>) -> fmt::Result {
    if let Some(comment) = comment {
        write!(f, " # {comment}")?;
    }
    f.write_char('\n')
}

fn write_group(f: &mut impl Write, group: &Group) -> fmt::Result {
    write!(f, "{} =", group.name)?;
    for member in &group.members {
        write!(f, " {member}")?;
    }
    write_trailing(f, group.comment.as_deref())
}

fn write_repo(f: &mut impl Write, repo: &Repo) -> fmt::Result {
    f.write_str("repo")?;
    for alias in &repo.aliases {
        write!(f, " {alias}")?;
    }
    write_trailing(f, repo.comment.as_deref())?;

    for entry in &repo.body {
        f.write_char('\t')?;
        match entry {
            RepoEntry::Comment { text } => write_comment(f, text)?,
            RepoEntry::Option(setting) => write_setting(f, "option", setting)?,
            RepoEntry::Config(setting) => write_setting(f, "config", setting)?,
            RepoEntry::Access(access) => write_access(f, access)?,
        }
    }
    Ok(())
}

fn write_setting(f: &mut impl Write, keyword: &str, setting: &Setting) -> fmt::Result {
    write!(f, "{keyword} {} = {}", setting.name, setting.value)?;
    write_trailing(f, setting.comment.as_deref())
}

fn write_access(f: &mut impl Write, access: &Access) -> fmt::Result {
    match &access.refex {
        Some(refex) => write!(f, "{} {refex}", access.perm)?,
        None => write!(f, "{:<width$}", access.perm, width = PERM_COLUMN)?,
    }
    write!(f, " = {}", access.name)?;
    write_trailing(f, access.comment.as_deref())
}
