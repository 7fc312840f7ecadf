//! Replaying recipes onto files that changed after capture

use repeat_core::{CaptureRequest, PathFilter, ReplacementMap, ReplayOptions, apply, recipe};
use repeat_fs::TextEncoding;
use repeat_test_utils::{GitFixture, TestTree};

const BEFORE: &str = "alpha = 1\nbeta = 2\n";
const AFTER: &str = "alpha = 1\nbeta = 2\ngamma = 3\n";

fn config_recipe() -> String {
    let mut fixture = GitFixture::new();
    fixture.write("config.txt", BEFORE);
    fixture.commit("Config");
    fixture.write("config.txt", AFTER);
    fixture.commit("Add gamma");

    let filter = PathFilter::default();
    let request = CaptureRequest {
        repository: fixture.root(),
        from: "HEAD~1",
        to: "HEAD",
        filter: &filter,
        encoding: TextEncoding::default(),
    };
    recipe(&request, &["gamma".to_string()]).unwrap()
}

fn replay(tree: &TestTree, text: &str, map: ReplacementMap) {
    apply(tree.root(), text, &[map], ReplayOptions::default()).unwrap();
}

#[test]
fn test_unchanged_target_gets_exact_edit() {
    let tree = TestTree::new();
    tree.write("config.txt", BEFORE);

    replay(&tree, &config_recipe(), ReplacementMap::default());

    tree.assert_file("config.txt", AFTER);
}

#[test]
fn test_lines_prepended_after_capture() {
    let tree = TestTree::new();
    tree.write("config.txt", "# header\nalpha = 1\nbeta = 2\n");

    replay(&tree, &config_recipe(), ReplacementMap::new([("gamma", "delta")]));

    tree.assert_file("config.txt", "# header\nalpha = 1\nbeta = 2\ndelta = 3\n");
}

#[test]
fn test_tokens_removed_before_edit() {
    let tree = TestTree::new();
    tree.write("config.txt", "beta = 2\n");

    replay(&tree, &config_recipe(), ReplacementMap::default());

    tree.assert_file("config.txt", "beta = 2\ngamma = 3\n");
}

#[test]
fn test_edit_already_present_is_applied_again() {
    // No conflict detection: replaying onto the captured result repeats the edit
    let tree = TestTree::new();
    tree.write("config.txt", AFTER);

    replay(&tree, &config_recipe(), ReplacementMap::new([("gamma", "delta")]));

    tree.assert_file("config.txt", "alpha = 1\nbeta = 2\ngamma = 3\ndelta = 3\n");
}
