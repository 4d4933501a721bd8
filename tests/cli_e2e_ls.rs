//! End-to-end tests for the `ssg-collections ls` command.
//!
//! These tests verify the CLI behavior of the `ls` command by invoking
//! the binary directly and checking its output.

mod common;
use common::prelude::*;

#[test]
fn test_ls_help() {
    TestFixture::new()
        .command()
        .arg("ls")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Resolve collections and list their members"));
}

#[test]
fn test_ls_missing_config() {
    TestFixture::new()
        .command()
        .arg("ls")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration file not found"));
}

#[test]
fn test_ls_missing_source_dir() {
    TestFixture::new()
        .with_config(configs::POSTS)
        .command()
        .arg("ls")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Source directory not found"));
}

#[test]
fn test_ls_lists_collections_in_order() {
    let fixture = TestFixture::new()
        .with_config(configs::BLOG)
        .with_document("posts/first.md", "title: First\ndate: 2024-01-01", "One")
        .with_document("posts/second.md", "title: Second\ndate: 2024-02-01", "Two")
        .with_document("posts/third.md", "title: Third\ndate: 2024-03-01", "Three")
        .with_document("about.md", "title: About\ncollection: info", "About");

    fixture
        .command()
        .args(["--color", "never", "ls"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "[COLLECTION] posts (2)\n  posts/third.md\n  posts/second.md\n",
        ))
        .stdout(predicate::str::contains("[COLLECTION] pages (1)\n  about.md\n"))
        .stdout(predicate::str::contains("[COLLECTION] info (1)"))
        .stdout(predicate::str::contains("3 collection(s), 4 item(s)"));
}

#[test]
fn test_ls_long_shows_links() {
    let fixture = TestFixture::new()
        .with_config(configs::POSTS)
        .with_document("posts/a.md", "title: A", "A")
        .with_document("posts/b.md", "title: B", "B");

    fixture
        .command()
        .args(["--color", "never", "ls", "--long"])
        .assert()
        .success()
        .stdout(predicate::str::contains("prev: -  next: posts/b.md"))
        .stdout(predicate::str::contains("prev: posts/a.md  next: -"));
}

#[test]
fn test_ls_json_output() {
    let fixture = TestFixture::new()
        .with_config(configs::POSTS)
        .with_document("posts/a.md", "title: A", "A");

    let output = fixture
        .command()
        .args(["ls", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let rendered: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(rendered["collections"]["posts"]["items"][0]["path"], "posts/a.md");
    assert_eq!(rendered["posts"]["items"][0]["metadata"]["title"], "A");
}

#[test]
fn test_ls_single_collection() {
    let fixture = TestFixture::new()
        .with_config(configs::BLOG)
        .with_document("posts/a.md", "date: 2024-01-01", "A")
        .with_document("index.md", "title: Home", "Home");

    fixture
        .command()
        .args(["--color", "never", "ls", "--collection", "pages"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pages (1)"))
        .stdout(predicate::str::contains("posts").not());
}

#[test]
fn test_ls_unknown_collection_suggests() {
    let fixture = TestFixture::new()
        .with_config(configs::POSTS)
        .with_document("posts/a.md", "title: A", "A");

    fixture
        .command()
        .args(["ls", "--collection", "post"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Did you mean 'posts'?"));
}

#[test]
fn test_ls_custom_config_and_source() {
    let fixture = TestFixture::new()
        .with_file("site/collections.yaml", "notes: \"*.md\"\n")
        .with_file("site/content/a.md", "plain note");

    fixture
        .command()
        .args(["--color", "never", "ls", "-c", "site/collections.yaml", "-s", "site/content"])
        .assert()
        .success()
        .stdout(predicate::str::contains("notes (1)"));
}

#[test]
fn test_ls_malformed_front_matter() {
    let fixture = TestFixture::new()
        .with_config(configs::POSTS)
        .with_file("src/posts/bad.md", "---\n- not\n- a mapping\n---\nBody");

    fixture
        .command()
        .arg("ls")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Front matter must be a key/value mapping"));
}
