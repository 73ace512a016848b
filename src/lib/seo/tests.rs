use proptest::{
    prelude::*,
    test_runner::{Config, TestRunner},
};

use super::{PageMetadataInput, resolve_absolute_url, truncate_description};
use crate::config::{ConfigError, PageKind, SiteConfig};

fn runner() -> TestRunner {
    TestRunner::new(Config {
        failure_persistence: None,
        ..Config::default()
    })
}

#[test]
fn absolute_urls_pass_through() {
    assert_eq!(
        resolve_absolute_url("https://cdn.example.com/a.png", "https://themattchung.com").unwrap(),
        "https://cdn.example.com/a.png"
    );
    assert_eq!(
        resolve_absolute_url("http://example.com", "not a url").unwrap(),
        "http://example.com"
    );
}

#[test]
fn relative_paths_resolve_against_base() {
    let base = "https://themattchung.com";
    assert_eq!(
        resolve_absolute_url("/images/og-home.jpg", base).unwrap(),
        "https://themattchung.com/images/og-home.jpg"
    );
    assert_eq!(
        resolve_absolute_url("images/a.png", "https://example.com/blog/").unwrap(),
        "https://example.com/blog/images/a.png"
    );
    assert_eq!(
        resolve_absolute_url("../a.png", "https://example.com/blog/post/").unwrap(),
        "https://example.com/blog/a.png"
    );
    assert_eq!(
        resolve_absolute_url("/a.png", "https://example.com/blog/post/").unwrap(),
        "https://example.com/a.png"
    );
}

#[test]
fn malformed_base_is_a_config_error() {
    let err = resolve_absolute_url("/a.png", "://nope").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidUrl { .. }));
}

#[test]
fn resolving_is_idempotent() {
    runner()
        .run(&"[a-z0-9/._-]{0,30}", |path| {
            let base = "https://themattchung.com";
            let once = resolve_absolute_url(&path, base).unwrap();
            let twice = resolve_absolute_url(&once, base).unwrap();
            prop_assert_eq!(&once, &twice);
            prop_assert!(once.starts_with("https://"));
            Ok(())
        })
        .unwrap();
}

#[test]
fn image_url_falls_back_to_default() {
    let config = SiteConfig::from_defaults().unwrap();
    assert_eq!(
        config.image_url(None),
        "https://themattchung.com/images/og-default.jpg"
    );
    assert_eq!(
        config.image_url(Some("")),
        "https://themattchung.com/images/og-default.jpg"
    );
    assert_eq!(
        config.image_url(Some("/images/post.png")),
        "https://themattchung.com/images/post.png"
    );
}

#[test]
fn short_text_is_untouched() {
    runner()
        .run(&(".{0,40}", 40usize..200), |(text, max_len)| {
            prop_assert_eq!(truncate_description(&text, max_len), text);
            Ok(())
        })
        .unwrap();
}

#[test]
fn long_text_is_bounded_and_marked() {
    runner()
        .run(&(".{1,300}", 0usize..120), |(text, max_len)| {
            prop_assume!(text.chars().count() > max_len);
            let out = truncate_description(&text, max_len);
            prop_assert!(out.chars().count() <= max_len + 3);
            prop_assert!(out.ends_with("..."));
            Ok(())
        })
        .unwrap();
}

#[test]
fn truncation_backs_off_to_word_boundary() {
    assert_eq!(truncate_description("Hello wonderful world", 8), "Hello...");
    assert_eq!(truncate_description("Hello   world again", 10), "Hello...");
    assert_eq!(truncate_description("Hello world again", 12), "Hello world...");
}

#[test]
fn truncation_without_whitespace_is_hard() {
    assert_eq!(truncate_description("abcdefghij", 4), "abcd...");
    assert_eq!(truncate_description("ééééé", 2), "éé...");
}

#[test]
fn home_page_uses_site_defaults() {
    let config = SiteConfig::from_defaults().unwrap();
    let meta = config.derive(&PageMetadataInput {
        kind: Some(PageKind::Home),
        ..PageMetadataInput::default()
    });

    assert_eq!(meta.title, "Matt Chung - Personal Blog");
    assert_eq!(meta.description, config.default_description);
    assert_eq!(meta.image_url, "https://themattchung.com/images/og-home.jpg");
    assert_eq!(meta.canonical_url, "https://themattchung.com/");
    assert_eq!(meta.kind, PageKind::Home);
}

#[test]
fn post_overrides_take_priority() {
    let config = SiteConfig::from_defaults().unwrap();
    let long = "word ".repeat(60);
    let meta = config.derive(&PageMetadataInput {
        title: Some("Purpose of community".to_string()),
        description: Some(long.clone()),
        image: Some("https://cdn.example.com/cover.jpg".to_string()),
        kind: Some(PageKind::Post),
        canonical_path: Some("/purpose-of-community/".to_string()),
    });

    assert_eq!(meta.title, "Purpose of community");
    assert!(meta.description.ends_with("..."));
    assert!(meta.description.chars().count() <= 163);
    assert_eq!(meta.image_url, "https://cdn.example.com/cover.jpg");
    assert_eq!(
        meta.canonical_url,
        "https://themattchung.com/purpose-of-community/"
    );
}

#[test]
fn blank_overrides_fall_back() {
    let config = SiteConfig::from_defaults().unwrap();
    let meta = config.derive(&PageMetadataInput {
        title: Some("   ".to_string()),
        description: Some(String::new()),
        image: Some(String::new()),
        kind: Some(PageKind::Post),
        canonical_path: None,
    });

    assert_eq!(meta.title, config.default_title);
    assert_eq!(meta.description, config.default_description);
    assert_eq!(meta.image_url, "https://themattchung.com/images/og-blog.jpg");
}

#[test]
fn missing_kind_uses_default_image() {
    let config = SiteConfig::from_defaults().unwrap();
    let meta = config.derive(&PageMetadataInput::default());
    assert_eq!(meta.image_url, "https://themattchung.com/images/og-default.jpg");
    assert_eq!(meta.kind, PageKind::Page);
}
