use std::fs;
use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::str::contains;
use serde_json::json;
use tempfile::TempDir;

fn kiln_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("kiln"));
    cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

fn write(root: &Path, rel: &str, body: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
    fs::write(path, body).expect("write");
}

/// A site with all five templates and a manifest of three records.
fn make_site() -> TempDir {
    let site = TempDir::new().expect("site");
    let root = site.path();
    write(root, "templates/post.ftl", "<h1>{{ content.title }}</h1>{{ version }}");
    write(root, "templates/page.ftl", "<h2>{{ content.title }}</h2>");
    write(root, "templates/index.ftl", "{% for p in posts %}{{ p.title }};{% endfor %}");
    write(root, "templates/archive.ftl", "{{ posts | length }}");
    write(root, "templates/feed.ftl", "{{ pubdate }}");
    write(root, "templates/tags.ftl", "{{ tag }}={{ posts | length }}");

    let content = root.join("content");
    let manifest = json!([
        {
            "file": content.join("blog/first.md").to_string_lossy(),
            "type": "post", "status": "published", "title": "First",
            "tags": ["rust", "static sites"]
        },
        {
            "file": content.join("blog/second.md").to_string_lossy(),
            "type": "post", "status": "draft", "title": "Second",
            "tags": ["rust"]
        },
        {
            "file": content.join("about.md").to_string_lossy(),
            "type": "page", "status": "published", "title": "About"
        }
    ]);
    write(root, "content.json", &manifest.to_string());
    site
}

#[test]
fn bake_renders_whole_site() {
    let site = make_site();
    let root = site.path();

    kiln_cmd()
        .arg("bake")
        .arg(root)
        .args(["--manifest", root.join("content.json").to_str().unwrap()])
        .args(["--build-version", "7.7.7"])
        .assert()
        .success()
        .stdout(contains("8 rendered, 0 failed"));

    let out = root.join("output");
    assert_eq!(
        fs::read_to_string(out.join("blog/first.html")).unwrap(),
        "<h1>First</h1>7.7.7"
    );
    assert!(out.join("blog/second-draft.html").exists());
    assert!(!out.join("blog/second.html").exists());
    assert_eq!(fs::read_to_string(out.join("about.html")).unwrap(), "<h2>About</h2>");
    assert_eq!(fs::read_to_string(out.join("index.html")).unwrap(), "First;");
    assert_eq!(fs::read_to_string(out.join("archive.html")).unwrap(), "1");
    assert!(out.join("feed.xml").exists());
    assert_eq!(fs::read_to_string(out.join("tags/rust.html")).unwrap(), "rust=1");
    assert_eq!(
        fs::read_to_string(out.join("tags/static-sites.html")).unwrap(),
        "static sites=1"
    );
}

#[test]
fn bake_accepts_relative_source() {
    let site = make_site();
    let root = site.path();
    let parent = root.parent().expect("parent");
    let name = root.file_name().expect("name");

    kiln_cmd()
        .current_dir(parent)
        .arg("bake")
        .arg(name)
        .args(["--manifest", root.join("content.json").to_str().unwrap()])
        .assert()
        .success()
        .stdout(contains("8 rendered, 0 failed"));

    assert!(root.join("output/blog/first.html").exists());
}

#[test]
fn bake_honours_config_file_and_destination_flag() {
    let site = make_site();
    let root = site.path();
    write(root, "kiln.yaml", "tag_path: topics\nindex_file: home.html\n");
    let out = TempDir::new().expect("out");

    kiln_cmd()
        .arg("bake")
        .arg(root)
        .args(["--manifest", root.join("content.json").to_str().unwrap()])
        .args(["--destination", out.path().to_str().unwrap()])
        .assert()
        .success();

    assert!(out.path().join("home.html").exists());
    assert!(out.path().join("topics/rust.html").exists());
    assert!(!root.join("output").exists());
}

#[test]
fn bake_reports_failures_and_exits_non_zero() {
    let site = make_site();
    let root = site.path();
    fs::remove_file(root.join("templates/page.ftl")).unwrap();

    kiln_cmd()
        .arg("bake")
        .arg(root)
        .args(["--manifest", root.join("content.json").to_str().unwrap()])
        .assert()
        .failure()
        .stdout(contains("7 rendered, 1 failed"))
        .stdout(contains("page.ftl"))
        .stderr(contains("1 of 8 outputs failed"));

    // Everything else still rendered.
    assert!(root.join("output/blog/first.html").exists());
    assert!(root.join("output/tags/rust.html").exists());
}

#[test]
fn bake_with_missing_manifest_fails() {
    let site = make_site();
    kiln_cmd()
        .arg("bake")
        .arg(site.path())
        .args(["--manifest", "does-not-exist.json"])
        .assert()
        .failure()
        .stderr(contains("failed to read manifest"));
}

#[test]
fn templates_lists_loaded_names() {
    let site = make_site();
    kiln_cmd()
        .arg("templates")
        .arg(site.path())
        .assert()
        .success()
        .stdout(contains("archive.ftl\nfeed.ftl\nindex.ftl\npage.ftl\npost.ftl\ntags.ftl\n"));
}
