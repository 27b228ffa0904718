//! Serializer tests
//!
//! Canonical output layout and parse/serialize round trips.

use gitolite_admin::conf::{Access, Document, Entry, Group, Repo, parse, serialize};

const MESSY: &str = "\
#   gitolite configuration
@admins=alice   # the admins
@devs = bob carol
repo gitolite-admin
    RW+ = @admins
# floating
repo demo   demo2 # shared
  # maintainers
  RW+   master   = alice
  R = @all
  option deny-rules = 1
  config hooks.mailinglist = dev@example.com # notify
# trailing
";

#[test]
fn test_canonical_layout() {
    let doc = parse(MESSY).unwrap();
    let expected = "\
# gitolite configuration

@admins = alice # the admins

@devs = bob carol

repo gitolite-admin
\tRW+  = @admins

# floating

repo demo demo2 # shared
\t# maintainers
\tRW+ master = alice
\tR    = @all
\toption deny-rules = 1
\tconfig hooks.mailinglist = dev@example.com # notify

# trailing

";
    assert_eq!(serialize(&doc), expected);
}

#[test]
fn test_round_trip_is_structural() {
    let doc = parse(MESSY).unwrap();
    let reparsed = parse(&serialize(&doc)).unwrap();
    assert_eq!(reparsed, doc);
}

#[test]
fn test_canonical_form_is_a_fixed_point() {
    let once = serialize(&parse(MESSY).unwrap());
    let twice = serialize(&parse(&once).unwrap());
    assert_eq!(once, twice);
}

#[test]
fn test_round_trip_of_built_document() {
    let mut doc = Document::new();
    doc.push(Entry::Comment {
        text: "built".into(),
    });
    doc.push(Group::new("@ops", ["dave", "@devs"]));
    let mut repo = Repo::new(["infra/.*"]);
    repo.push_comment("ops only")
        .push_access(Access::new("RW+", "@ops").with_ref("refs/tags/.*"))
        .push_access(Access::new("-", "@interns").with_comment("never"))
        .push_option("mirror.master", "example.com");
    doc.push(repo);

    assert_eq!(parse(&serialize(&doc)).unwrap(), doc);
}

#[test]
fn test_padding_rules() {
    let mut repo = Repo::new(["demo"]);
    repo.push_access(Access::new("R", "alice"))
        .push_access(Access::new("RW+", "bob").with_ref("dev"))
        .push_access(Access::new("RW+CD", "carol"));
    let mut doc = Document::new();
    doc.push(repo);

    assert_eq!(
        serialize(&doc),
        "repo demo\n\tR    = alice\n\tRW+ dev = bob\n\tRW+CD = carol\n\n"
    );
}

#[test]
fn test_empty_group_round_trips() {
    let doc = parse("@empty =\n").unwrap();
    assert_eq!(serialize(&doc), "@empty =\n\n");
    assert_eq!(parse(&serialize(&doc)).unwrap(), doc);
}

#[test]
fn test_display_matches_serialize() {
    let doc = parse(MESSY).unwrap();
    assert_eq!(doc.to_string(), serialize(&doc));
}

#[test]
fn test_empty_document() {
    assert_eq!(serialize(&Document::new()), "");
}
