use std::{
    fs,
    path::{Path, PathBuf},
};

use proptest::{
    prelude::*,
    test_runner::{Config, TestRunner},
};
use tempfile::TempDir;
use walkdir::WalkDir;

use super::{BuildOptions, BuildReport, build_at};
use crate::config::{HEAD_FILE, INPUT_DIR, OUTPUT_DIR, READING_TIMES_FILE, SiteConfig};

fn write_md(root: &Path, rel_path: &str, body: &str) -> std::io::Result<()> {
    let full = root.join(INPUT_DIR).join(rel_path);
    if let Some(parent) = full.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(full, body)
}

fn read_public(tmp: &TempDir, rel: impl AsRef<Path>) -> String {
    fs::read_to_string(tmp.path().join(OUTPUT_DIR).join(rel.as_ref())).expect("public file")
}

fn snapshot_public(root: &Path) -> std::io::Result<Vec<(PathBuf, Vec<u8>)>> {
    let mut out = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = entry?;
        if entry.file_type().is_file() {
            let rel = entry.path().strip_prefix(root).unwrap().to_path_buf();
            out.push((rel, fs::read(entry.path())?));
        }
    }
    out.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(out)
}

fn build(tmp: &TempDir) -> BuildReport {
    let site = SiteConfig::from_defaults().unwrap();
    build_at(&site, &BuildOptions::at(tmp.path())).unwrap()
}

#[test]
fn posts_get_head_fragments() {
    let tmp = TempDir::new().expect("tempdir");
    let md = "---\ntitle: Purpose of community\ndate: 2023-05-17\n---\nWhy we gather.\n";
    write_md(tmp.path(), "2023-05-17-purpose-of-community.md", md).unwrap();

    let report = build(&tmp);
    assert_eq!(report.written, 1);

    let head = read_public(&tmp, Path::new("purpose-of-community").join(HEAD_FILE));
    assert!(head.contains(r#"<meta property="og:type" content="article">"#));
    assert!(head.contains(
        r#"<meta property="og:url" content="https://themattchung.com/purpose-of-community/">"#
    ));
    assert!(head.contains(r#"<meta property="article:author" content="Matt Chung">"#));
    assert!(head.contains(
        r#"<meta property="article:published_time" content="2023-05-17T00:00:00Z">"#
    ));

    let home = read_public(&tmp, HEAD_FILE);
    assert!(home.contains(r#"<meta property="og:type" content="website">"#));
    assert!(home.contains("og-home.jpg"));
}

#[test]
fn drafts_and_invalid_posts_are_skipped() {
    let tmp = TempDir::new().expect("tempdir");
    write_md(tmp.path(), "ok.md", "---\ntitle: Ok\ndate: 2024-01-01\n---\nFine.\n").unwrap();
    write_md(
        tmp.path(),
        "draft.md",
        "---\ntitle: Draft\ndate: 2024-01-02\ndraft: true\n---\nWIP.\n",
    )
    .unwrap();
    write_md(tmp.path(), "nodate.md", "---\ntitle: No date\n---\nHm.\n").unwrap();
    write_md(
        tmp.path(),
        "zz/dupe.md",
        "---\ntitle: Dupe\ndate: 2024-01-03\nslug: ok\n---\nSame slug.\n",
    )
    .unwrap();
    fs::write(tmp.path().join(INPUT_DIR).join("notes.txt"), "ignored").unwrap();

    let report = build(&tmp);
    assert_eq!(
        report,
        BuildReport {
            written: 1,
            drafts_skipped: 1,
            invalid_skipped: 2,
        }
    );
    assert!(tmp.path().join(OUTPUT_DIR).join("ok").join(HEAD_FILE).exists());
    assert!(!tmp.path().join(OUTPUT_DIR).join("draft").exists());
}

#[test]
fn drafts_can_be_included() {
    let tmp = TempDir::new().expect("tempdir");
    write_md(
        tmp.path(),
        "draft.md",
        "---\ntitle: Draft\ndate: 2024-01-02\ndraft: true\n---\nWIP.\n",
    )
    .unwrap();

    let site = SiteConfig::from_defaults().unwrap();
    let mut options = BuildOptions::at(tmp.path());
    options.include_drafts = true;
    let report = build_at(&site, &options).unwrap();

    assert_eq!(report.written, 1);
    let head = read_public(&tmp, Path::new("draft").join(HEAD_FILE));
    assert!(head.contains(r#"<meta name="robots" content="noindex">"#));
}

#[test]
fn reading_times_are_listed_newest_first() {
    let tmp = TempDir::new().expect("tempdir");
    let long = vec!["word"; 450].join(" ");
    write_md(
        tmp.path(),
        "older.md",
        &format!("---\ntitle: Older\ndate: 2022-01-01\n---\n{long}\n"),
    )
    .unwrap();
    write_md(
        tmp.path(),
        "newer.md",
        "---\ntitle: Newer\ndate: 2024-01-01\n---\nShort.\n",
    )
    .unwrap();

    build(&tmp);

    let listing = read_public(&tmp, READING_TIMES_FILE);
    assert_eq!(listing, "newer\t1 min read\nolder\t3 min read\n");
}

#[test]
fn build_is_deterministic_across_runs() {
    let mut runner = TestRunner::new(Config {
        cases: 8,
        failure_persistence: None,
        ..Config::default()
    });

    runner
        .run(
            &proptest::collection::vec(("[a-z]{1,8}", 1990i32..=2025), 1..6),
            |items| {
                let tmp = TempDir::new().expect("tempdir");
                for (slug, year) in &items {
                    let md = format!("---\ntitle: {slug}\ndate: {year:04}-02-02\n---\nHello {slug}.\n");
                    write_md(tmp.path(), &format!("{slug}.md"), &md).unwrap();
                }

                build(&tmp);
                let first = snapshot_public(&tmp.path().join(OUTPUT_DIR)).unwrap();
                build(&tmp);
                let second = snapshot_public(&tmp.path().join(OUTPUT_DIR)).unwrap();

                prop_assert_eq!(first, second);
                Ok(())
            },
        )
        .unwrap();
}

#[test]
fn missing_input_dir_is_an_error() {
    let tmp = TempDir::new().expect("tempdir");
    let site = SiteConfig::from_defaults().unwrap();
    assert!(build_at(&site, &BuildOptions::at(tmp.path())).is_err());
}
