//! End-to-end template service tests against a real template directory.

use std::fs;

use chrono::{TimeZone, Utc};
use kiln_core::ContentRecord;
use kiln_templates::{RenderContext, TemplateError, TemplateService, TeraTemplates};
use serde_json::json;
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, body: &str) {
    let path = dir.path().join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("mkdir");
    }
    fs::write(path, body).expect("write template");
}

fn site_templates() -> TempDir {
    let dir = TempDir::new().expect("tempdir");
    write(
        &dir,
        "base.ftl",
        "<html><body>{% block body %}{% endblock body %}<footer>kiln {{ version }}</footer></body></html>",
    );
    write(
        &dir,
        "post.ftl",
        "{% extends \"base.ftl\" %}{% block body %}<h1>{{ content.title }}</h1>{{ content.body | safe }}{% endblock body %}",
    );
    write(
        &dir,
        "index.ftl",
        "{% for post in posts %}<a href=\"{{ post.uri }}\">{{ post.title }}</a>{% endfor %}",
    );
    write(
        &dir,
        "feed.ftl",
        "<updated>{{ pubdate | date(format=\"%Y-%m-%d\") }}</updated>{% for post in posts %}<entry>{{ post.title }}</entry>{% endfor %}",
    );
    write(
        &dir,
        "tags.ftl",
        "<h1>{{ tag }}</h1><p>{{ posts | length }} posts</p>",
    );
    dir
}

fn post(title: &str, uri: &str) -> ContentRecord {
    ContentRecord::new()
        .with("file", format!("/site/content/{uri}.md"))
        .with("type", "post")
        .with("status", "published")
        .with("title", title)
        .with("uri", uri)
        .with("body", "<p>body</p>")
        .with("tags", json!(["rust"]))
}

fn render(templates: &TeraTemplates, name: &str, ctx: &RenderContext<'_>) -> String {
    let compiled = templates.compile(name).expect("compile");
    String::from_utf8(templates.render(&compiled, ctx).expect("render")).expect("utf8")
}

#[test]
fn content_page_uses_inheritance_and_version() {
    let dir = site_templates();
    let templates = TeraTemplates::from_dir(dir.path()).expect("load");
    let rec = post("Hello", "blog/hello");

    let html = render(&templates, "post.ftl", &RenderContext::for_content("2.6.4", &rec));
    assert!(html.contains("<h1>Hello</h1>"), "{html}");
    assert!(html.contains("<p>body</p>"), "body must not be escaped: {html}");
    assert!(html.contains("kiln 2.6.4"), "{html}");
}

#[test]
fn index_lists_posts_in_order() {
    let dir = site_templates();
    let templates = TeraTemplates::from_dir(dir.path()).expect("load");
    let posts = vec![post("First", "a"), post("Second", "b")];

    let html = render(&templates, "index.ftl", &RenderContext::for_posts("1", &posts));
    assert_eq!(html, "<a href=\"a\">First</a><a href=\"b\">Second</a>");
}

#[test]
fn feed_formats_pubdate() {
    let dir = site_templates();
    let templates = TeraTemplates::from_dir(dir.path()).expect("load");
    let posts = vec![post("First", "a")];
    let when = Utc.with_ymd_and_hms(2013, 6, 9, 8, 30, 0).unwrap();

    let xml = render(
        &templates,
        "feed.ftl",
        &RenderContext::for_posts("1", &posts).with_pubdate(when),
    );
    assert_eq!(xml, "<updated>2013-06-09</updated><entry>First</entry>");
}

#[test]
fn tag_page_sees_raw_tag_name() {
    let dir = site_templates();
    let templates = TeraTemplates::from_dir(dir.path()).expect("load");
    let posts = vec![post("First", "a"), post("Second", "b")];

    let html = render(
        &templates,
        "tags.ftl",
        &RenderContext::for_posts("1", &posts).with_tag(" C++ Tips "),
    );
    assert_eq!(html, "<h1> C++ Tips </h1><p>2 posts</p>");
}

#[test]
fn feed_without_pubdate_is_render_error() {
    let dir = site_templates();
    let templates = TeraTemplates::from_dir(dir.path()).expect("load");
    let posts = vec![post("First", "a")];
    let compiled = templates.compile("feed.ftl").expect("compile");

    let err = templates
        .render(&compiled, &RenderContext::for_posts("1", &posts))
        .unwrap_err();
    assert!(matches!(err, TemplateError::Render { .. }), "got: {err}");
    assert!(err.to_string().contains("feed.ftl"), "got: {err}");
}

#[test]
fn archive_template_absent_is_not_found() {
    let dir = site_templates();
    let templates = TeraTemplates::from_dir(dir.path()).expect("load");
    let err = templates.compile("archive.ftl").unwrap_err();
    assert!(matches!(err, TemplateError::NotFound { ref name } if name == "archive.ftl"));
}
