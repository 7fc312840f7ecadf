//! Capture → recipe → apply across separate trees
//!
//! Each test captures a commit from a real repository, serializes it, and
//! applies the recipe text to a different directory seeded with the files
//! the recipe needs.

use pretty_assertions::assert_eq;
use repeat_core::{
    CaptureRequest, PathFilter, ReplacementMap, ReplayOptions, apply, parse_replacements, recipe,
};
use repeat_fs::TextEncoding;
use repeat_recipe::decode;
use repeat_test_utils::{GitFixture, TestTree};

fn capture_recipe(fixture: &GitFixture, filter: &PathFilter, encoding: TextEncoding) -> String {
    let request = CaptureRequest {
        repository: fixture.root(),
        from: "HEAD~1",
        to: "HEAD",
        filter,
        encoding,
    };
    recipe(&request, &["Foo".to_string()]).unwrap()
}

fn everything() -> PathFilter {
    PathFilter::default()
}

#[test]
fn test_multiline_payloads_with_pipes_and_crlf() {
    let before = "SELECT a\r\nFROM t\r\n";
    let after = "SELECT a | b\r\nFROM t\r\nWHERE x = '|'\r\n";

    let mut fixture = GitFixture::new();
    fixture.write("query.sql", before);
    fixture.commit("Query");
    fixture.write("query.sql", after);
    fixture.commit("Extend query");

    let text = capture_recipe(&fixture, &everything(), TextEncoding::default());

    let tree = TestTree::new();
    tree.write("query.sql", before);
    apply(tree.root(), &text, &[ReplacementMap::default()], ReplayOptions::default()).unwrap();

    tree.assert_file("query.sql", after);
}

#[test]
fn test_latin1_round_trip() {
    let mut fixture = GitFixture::new();
    fixture.write("menu.txt", b"Caf\xe9 Foo\n".as_slice());
    fixture.commit("Menu");
    fixture.write("menu.txt", b"Caf\xe9 Foo cr\xe8me\n".as_slice());
    fixture.commit("Add dessert");

    let latin1 = TextEncoding::from_label("latin1").unwrap();
    let text = capture_recipe(&fixture, &everything(), latin1);
    assert!(text.contains("crème"));

    let tree = TestTree::new();
    tree.write("menu.txt", b"Caf\xe9 Foo\n".as_slice());
    let options = ReplayOptions {
        dry_run: false,
        encoding: latin1,
    };
    apply(tree.root(), &text, &[ReplacementMap::default()], options).unwrap();

    let bytes = std::fs::read(tree.root().join("menu.txt")).unwrap();
    assert_eq!(bytes, b"Caf\xe9 Foo cr\xe8me\n".to_vec());
}

#[test]
fn test_deleted_and_renamed_files_are_listed_not_replayed() {
    let mut fixture = GitFixture::new();
    fixture.write("old.txt", "to be removed\n");
    fixture.write(
        "moved.txt",
        "long enough text for git to recognise the move as a rename\n",
    );
    fixture.commit("Initial");
    fixture.remove("old.txt");
    fixture.rename("moved.txt", "archive/moved.txt");
    fixture.commit("Tidy up");

    let text = capture_recipe(&fixture, &everything(), TextEncoding::default());
    assert!(text.contains("#\tD\told.txt\n"));
    assert!(text.contains("#\tR\tmoved.txt\n"));

    let changes = decode(&text).unwrap();
    assert!(changes.copies.is_empty());
    assert!(changes.updates.is_empty());
}

#[test]
fn test_include_filter_limits_capture() {
    let mut fixture = GitFixture::new();
    fixture.write("src/Foo.cs", "class Foo {}\n");
    fixture.write("tests/FooTests.cs", "class FooTests {}\n");
    fixture.commit("Initial");
    fixture.write("src/Foo.cs", "class Foo { int x; }\n");
    fixture.write("tests/FooTests.cs", "class FooTests { int y; }\n");
    fixture.commit("Fields");

    let filter = PathFilter::new(&["^src/"], &[]).unwrap();
    let text = capture_recipe(&fixture, &filter, TextEncoding::default());

    assert!(text.contains("UPDATE\tsrc/Foo.cs\n"));
    assert!(!text.contains("UPDATE\ttests/FooTests.cs"));
    assert!(text.contains("#\tM XI\ttests/FooTests.cs\n"));
}

#[test]
fn test_replacements_from_file_apply_in_order() {
    let mut fixture = GitFixture::new();
    fixture.write("src/Foo.cs", "class Foo {}\n");
    fixture.commit("Initial");
    fixture.write("src/Foo.cs", "class Foo {}\nclass FooFactory {}\n");
    fixture.commit("Factory");

    let text = capture_recipe(&fixture, &everything(), TextEncoding::default());

    let tree = TestTree::new();
    tree.write("src/Foo.cs", "class Foo {}\n");
    tree.write("replacements.json", r#"{"FooFactory": "Builder", "Foo": "Bar"}"#);

    let path = tree.root().join("replacements.json");
    let maps = parse_replacements(path.to_str().unwrap()).unwrap();
    apply(tree.root(), &text, &maps, ReplayOptions::default()).unwrap();

    tree.assert_file("src/Foo.cs", "class Foo {}\nclass Builder {}\n");
}

#[test]
fn test_recipe_is_stable_through_decode_and_encode() {
    let mut fixture = GitFixture::new();
    fixture.write("a.txt", "one two three\n");
    fixture.commit("Initial");
    fixture.write("a.txt", "one 2 three four\n");
    fixture.write("b.txt", "new file\n");
    fixture.commit("Change");

    let text = capture_recipe(&fixture, &everything(), TextEncoding::default());
    let decoded = decode(&text).unwrap();
    let reencoded = repeat_recipe::encode(&decoded, None);

    assert_eq!(decode(&reencoded).unwrap(), decoded);
}
