//! Parser tests
//!
//! Line classification, comment placement and syntax errors.

use gitolite_admin::conf::{Access, Document, Entry, Group, RepoEntry, Setting, parse};
use gitolite_admin::error::SyntaxErrorKind;

const SAMPLE: &str = "\
# gitolite configuration
@admins = alice # the admins
@devs   =   bob  carol

repo gitolite-admin
\tRW+     =   @admins

repo demo demo2 # shared block
\t# maintainers
\tRW+ master = alice
\tRW         = @devs
\tR          = @all
\toption deny-rules = 1
\tconfig hooks.mailinglist = dev@example.com # notify
";

fn repo_at(doc: &Document, index: usize) -> &gitolite_admin::conf::Repo {
    match &doc.entries[index] {
        Entry::Repo(repo) => repo,
        other => panic!("expected repo at {index}, got {other:?}"),
    }
}

#[test]
fn test_sample_top_level_shape() {
    let doc = parse(SAMPLE).unwrap();
    assert_eq!(doc.entries.len(), 5);
    assert_eq!(
        doc.entries[0],
        Entry::Comment {
            text: "gitolite configuration".into()
        }
    );
    assert_eq!(
        doc.entries[1],
        Entry::Group(Group {
            name: "@admins".into(),
            members: vec!["alice".into()],
            comment: Some("the admins".into()),
        })
    );
    assert_eq!(
        doc.entries[2],
        Entry::Group(Group::new("@devs", ["bob", "carol"]))
    );
}

#[test]
fn test_repo_header_and_body() {
    let doc = parse(SAMPLE).unwrap();
    let repo = repo_at(&doc, 4);
    assert_eq!(repo.aliases, vec!["demo", "demo2"]);
    assert_eq!(repo.comment.as_deref(), Some("shared block"));
    assert_eq!(
        repo.body,
        vec![
            RepoEntry::Comment {
                text: "maintainers".into()
            },
            RepoEntry::Access(Access::new("RW+", "alice").with_ref("master")),
            RepoEntry::Access(Access::new("RW", "@devs")),
            RepoEntry::Access(Access::new("R", "@all")),
            RepoEntry::Option(Setting::new("deny-rules", "1")),
            RepoEntry::Config(Setting {
                name: "hooks.mailinglist".into(),
                value: "dev@example.com".into(),
                comment: Some("notify".into()),
            }),
        ]
    );
}

#[test]
fn test_whitespace_is_normalized() {
    let doc = parse("repo   demo\n   RW+\t \t=    alice   \n").unwrap();
    let repo = repo_at(&doc, 0);
    assert_eq!(repo.aliases, vec!["demo"]);
    assert_eq!(repo.body, vec![RepoEntry::Access(Access::new("RW+", "alice"))]);
}

#[test]
fn test_comment_inside_repo_attaches_to_following_rule() {
    let doc = parse("repo a\n\tR = x\n# about y\n\tRW = y\n").unwrap();
    let repo = repo_at(&doc, 0);
    assert_eq!(
        repo.body,
        vec![
            RepoEntry::Access(Access::new("R", "x")),
            RepoEntry::Comment {
                text: "about y".into()
            },
            RepoEntry::Access(Access::new("RW", "y")),
        ]
    );
}

#[test]
fn test_floating_comment_before_repo_goes_to_root() {
    let doc = parse("repo a\n\tR = x\n\n# section b\nrepo b\n\tR = y\n").unwrap();
    assert_eq!(doc.entries.len(), 3);
    assert_eq!(
        doc.entries[1],
        Entry::Comment {
            text: "section b".into()
        }
    );
    assert!(repo_at(&doc, 0).body.iter().all(|e| matches!(e, RepoEntry::Access(_))));
    assert_eq!(repo_at(&doc, 2).aliases, vec!["b"]);
}

#[test]
fn test_floating_comment_before_group_goes_to_root() {
    let doc = parse("repo a\n\tR = x\n# late group\n@g = y\n").unwrap();
    assert_eq!(
        doc.entries[1],
        Entry::Comment {
            text: "late group".into()
        }
    );
    assert!(matches!(doc.entries[2], Entry::Group(_)));
}

#[test]
fn test_trailing_comments_are_kept() {
    let doc = parse("repo a\n\tR = x\n# the end\n").unwrap();
    assert_eq!(
        doc.entries.last(),
        Some(&Entry::Comment {
            text: "the end".into()
        })
    );
}

#[test]
fn test_rules_after_group_still_belong_to_open_repo() {
    let doc = parse("repo a\n\tR = x\n@g = y\n\tRW = z\n").unwrap();
    let repo = repo_at(&doc, 0);
    assert_eq!(repo.access_rules().count(), 2);
}

#[test]
fn test_repo_with_regex_alias() {
    let doc = parse("repo foo/.* @team\n\tRW = alice\n").unwrap();
    assert_eq!(repo_at(&doc, 0).aliases, vec!["foo/.*", "@team"]);
}

#[test]
fn test_empty_input() {
    assert!(parse("").unwrap().is_empty());
    assert!(parse("\n   \n\t\n").unwrap().is_empty());
}

#[test]
fn test_equals_inside_comment_is_allowed() {
    let doc = parse("@g = a # a = b\n").unwrap();
    assert_eq!(
        doc.entries[0],
        Entry::Group(Group {
            name: "@g".into(),
            members: vec!["a".into()],
            comment: Some("a = b".into()),
        })
    );
}

#[test]
fn test_rule_outside_repo_fails() {
    let err = parse("# header\nRW+ = alice\n").unwrap_err();
    assert_eq!(err.kind, SyntaxErrorKind::OutsideRepo);
    assert_eq!(err.line, 2);
    assert_eq!(err.text, "RW+ = alice");
}

#[test]
fn test_missing_equals_fails() {
    let err = parse("repo demo\n\tRW+ alice\n").unwrap_err();
    assert_eq!(err.kind, SyntaxErrorKind::ExpectedKeyValue);
    assert_eq!(err.line, 2);
    assert_eq!(err.text, "\tRW+ alice");
}

#[test]
fn test_double_equals_fails() {
    let err = parse("@g = a = b\n").unwrap_err();
    assert_eq!(err.kind, SyntaxErrorKind::ExpectedKeyValue);
    assert_eq!(err.line, 1);
}

#[test]
fn test_group_without_equals_fails() {
    let err = parse("@g a b\n").unwrap_err();
    assert_eq!(err.kind, SyntaxErrorKind::ExpectedKeyValue);
}

#[test]
fn test_repo_without_name_fails() {
    let err = parse("repo # nothing\n").unwrap_err();
    assert_eq!(err.kind, SyntaxErrorKind::MissingRepoName);
}

#[test]
fn test_access_with_multiple_refs_fails() {
    let err = parse("repo demo\n\tRW master dev = alice\n").unwrap_err();
    assert_eq!(err.kind, SyntaxErrorKind::InvalidAccessRule);
}

#[test]
fn test_blank_lines_do_not_shift_line_numbers() {
    let err = parse("\n\n\nbogus\n").unwrap_err();
    assert_eq!(err.line, 4);
}

#[test]
fn test_from_str() {
    let doc: Document = "repo demo\n\tR = alice\n".parse().unwrap();
    assert_eq!(doc.repos().count(), 1);
}
