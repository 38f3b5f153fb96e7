use std::fs;

use blogmark_core::CollisionPolicy;
use blogmark_engine::{ensure_output_dir, write_to_path, AtomicFileWriter};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn document(url: &str, body: &str) -> String {
    format!(
        "---\n\"title\": \"Hello\"\n\"date\": \"2025-01-01\"\n\"author\": \"\"\n\"blurb\": \"\"\n\"tags\": []\n\"url\": \"{url}\"\n---\n\n{body}"
    )
}

#[test]
fn creates_missing_output_dir() {
    let temp = TempDir::new().unwrap();
    let new_dir = temp.path().join("out").join("nested");
    assert!(!new_dir.exists());
    ensure_output_dir(&new_dir).unwrap();
    assert!(new_dir.is_dir());
    ensure_output_dir(&new_dir).unwrap();
}

#[test]
fn atomic_write_replaces_existing() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());

    let first = writer.write("doc.md", "hello").unwrap();
    assert_eq!(first.file_name().unwrap(), "doc.md");
    assert_eq!(fs::read_to_string(&first).unwrap(), "hello");

    let second = writer.write("doc.md", "world").unwrap();
    assert_eq!(first, second);
    assert_eq!(fs::read_to_string(&second).unwrap(), "world");
}

#[test]
fn no_partial_file_on_error() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    let writer = AtomicFileWriter::new(file_path.clone());
    let result = writer.write("doc.md", "data");
    assert!(result.is_err());
    assert!(!file_path.with_file_name("doc.md").exists());
}

#[test]
fn titled_write_uses_the_slug() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().join("posts"));

    let path = writer
        .write_titled(
            "Hello, World!",
            "https://a.example/hello",
            &document("https://a.example/hello", "one"),
            CollisionPolicy::Suffix,
        )
        .unwrap();
    assert_eq!(path, temp.path().join("posts").join("hello-world.md"));
}

#[test]
fn same_title_from_another_url_gets_a_suffix() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());
    let first_url = "https://a.example/hello";
    let second_url = "https://b.example/hello";

    let first = writer
        .write_titled("Hello", first_url, &document(first_url, "one"), CollisionPolicy::Suffix)
        .unwrap();
    let second = writer
        .write_titled("Hello", second_url, &document(second_url, "two"), CollisionPolicy::Suffix)
        .unwrap();

    assert_ne!(first, second);
    let second_name = second.file_name().unwrap().to_string_lossy().to_string();
    assert!(second_name.starts_with("hello-"));
    assert!(second_name.ends_with(".md"));
    assert_eq!(second_name.len(), "hello-".len() + 8 + ".md".len());
    assert!(fs::read_to_string(&first).unwrap().ends_with("one"));
    assert!(fs::read_to_string(&second).unwrap().ends_with("two"));
}

#[test]
fn reconverting_the_same_url_replaces_its_file() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());
    let url = "https://a.example/hello";

    let first = writer
        .write_titled("Hello", url, &document(url, "old"), CollisionPolicy::Suffix)
        .unwrap();
    let second = writer
        .write_titled("Hello", url, &document(url, "new"), CollisionPolicy::Suffix)
        .unwrap();

    assert_eq!(first, second);
    assert!(fs::read_to_string(&second).unwrap().ends_with("new"));
    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 1);
}

#[test]
fn overwrite_policy_always_replaces() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());

    let first = writer
        .write_titled(
            "Hello",
            "https://a.example/hello",
            &document("https://a.example/hello", "one"),
            CollisionPolicy::Overwrite,
        )
        .unwrap();
    let second = writer
        .write_titled(
            "Hello",
            "https://b.example/hello",
            &document("https://b.example/hello", "two"),
            CollisionPolicy::Overwrite,
        )
        .unwrap();

    assert_eq!(first, second);
    assert!(fs::read_to_string(&second).unwrap().ends_with("two"));
}

#[test]
fn explicit_path_creates_parents() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("a").join("b").join("post.md");

    let written = write_to_path(&target, "content").unwrap();
    assert_eq!(written, target);
    assert_eq!(fs::read_to_string(&target).unwrap(), "content");
}
