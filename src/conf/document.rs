//! Document model for `gitolite.conf`
//!
//! A parsed configuration is an ordered list of top-level entries. Order only
//! matters for writing the file back out; resolution never depends on it.

use crate::error::NotFoundError;
use serde::Serialize;

/// Name of the implicit group every user and repository belongs to
pub const ALL_GROUP: &str = "@all";

/// A parsed configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Document {
    pub entries: Vec<Entry>,
}

/// Top-level entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Entry {
    Comment { text: String },
    Group(Group),
    Repo(Repo),
}

/// `@name = member member ...`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Group {
    pub name: String,
    pub members: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// `repo alias alias ...` followed by its indented body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Repo {
    pub aliases: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub body: Vec<RepoEntry>,
}

/// Entry inside a repo block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RepoEntry {
    Comment { text: String },
    Option(Setting),
    Config(Setting),
    Access(Access),
}

/// Value of an `option` or `config` line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Setting {
    pub name: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// `perm [ref] = name`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Access {
    pub perm: String,
    #[serde(rename = "ref", skip_serializing_if = "Option::is_none")]
    pub refex: Option<String>,
    /// Right-hand side as written; may hold several space separated names
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl Access {
    pub fn new(perm: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            perm: perm.into(),
            refex: None,
            name: name.into(),
            comment: None,
        }
    }

    pub fn with_ref(mut self, refex: impl Into<String>) -> Self {
        self.refex = Some(refex.into());
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// The individual user or group names this rule grants to
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.name.split_whitespace()
    }

    /// Literal comparison against each name on the line
    pub fn grants_to(&self, name: &str) -> bool {
        self.names().any(|n| n == name)
    }
}

impl Setting {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            comment: None,
        }
    }
}

impl Group {
    pub fn new<I, S>(name: impl Into<String>, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            members: members.into_iter().map(Into::into).collect(),
            comment: None,
        }
    }
}

impl Repo {
    pub fn new<I, S>(aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            aliases: aliases.into_iter().map(Into::into).collect(),
            comment: None,
            body: Vec::new(),
        }
    }

    pub fn push_access(&mut self, access: Access) -> &mut Self {
        self.body.push(RepoEntry::Access(access));
        self
    }

    pub fn push_option(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.body.push(RepoEntry::Option(Setting::new(name, value)));
        self
    }

    pub fn push_config(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.body.push(RepoEntry::Config(Setting::new(name, value)));
        self
    }

    pub fn push_comment(&mut self, text: impl Into<String>) -> &mut Self {
        self.body.push(RepoEntry::Comment { text: text.into() });
        self
    }

    /// Access rules in declaration order
    pub fn access_rules(&self) -> impl Iterator<Item = &Access> {
        self.body.iter().filter_map(|entry| match entry {
            RepoEntry::Access(access) => Some(access),
            _ => None,
        })
    }

    pub fn options(&self) -> impl Iterator<Item = &Setting> {
        self.body.iter().filter_map(|entry| match entry {
            RepoEntry::Option(setting) => Some(setting),
            _ => None,
        })
    }

    pub fn configs(&self) -> impl Iterator<Item = &Setting> {
        self.body.iter().filter_map(|entry| match entry {
            RepoEntry::Config(setting) => Some(setting),
            _ => None,
        })
    }
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: impl Into<Entry>) -> &mut Self {
        self.entries.push(entry.into());
        self
    }

    pub fn groups(&self) -> impl Iterator<Item = &Group> {
        self.entries.iter().filter_map(|entry| match entry {
            Entry::Group(group) => Some(group),
            _ => None,
        })
    }

    pub fn repos(&self) -> impl Iterator<Item = &Repo> {
        self.entries.iter().filter_map(|entry| match entry {
            Entry::Repo(repo) => Some(repo),
            _ => None,
        })
    }

    /// First declaration of a group
    pub fn group(&self, name: &str) -> Result<&Group, NotFoundError> {
        self.groups()
            .find(|g| g.name == name)
            .ok_or_else(|| NotFoundError::group(name))
    }

    /// First repo block listing `alias` verbatim (no pattern matching)
    pub fn repo(&self, alias: &str) -> Result<&Repo, NotFoundError> {
        self.repos()
            .find(|r| r.aliases.iter().any(|a| a == alias))
            .ok_or_else(|| NotFoundError::repo(alias))
    }

    /// Members of a group across every line that declares it.
    ///
    /// Returns an empty list for undeclared groups.
    pub fn group_members(&self, name: &str) -> Vec<&str> {
        self.groups()
            .filter(|g| g.name == name)
            .flat_map(|g| g.members.iter().map(String::as_str))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Group> for Entry {
    fn from(group: Group) -> Self {
        Entry::Group(group)
    }
}

impl From<Repo> for Entry {
    fn from(repo: Repo) -> Self {
        Entry::Repo(repo)
    }
}
