use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use color_eyre::{Section, eyre::eyre};
use itertools::{Either, Itertools};
use rayon::prelude::*;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::{
    config::{HEAD_FILE, INPUT_DIR, OUTPUT_DIR, PageKind, READING_TIMES_FILE, SiteConfig},
    header::{Document, Post},
    meta_tags::render_head,
    reading_time::reading_stats,
    seo::PageMetadataInput,
    types::{Slug, Timestamp},
    utils::format_reading_time,
};

/// Where to read posts from and write head fragments to.
#[derive(Clone, Debug)]
pub struct BuildOptions {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub include_drafts: bool,
}

impl BuildOptions {
    /// Default `contents`/`public` layout under `root`.
    pub fn at(root: &Path) -> Self {
        Self {
            input_dir: root.join(INPUT_DIR),
            output_dir: root.join(OUTPUT_DIR),
            include_drafts: false,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub written: usize,
    pub drafts_skipped: usize,
    pub invalid_skipped: usize,
}

/// Derive and write metadata for every post under `options.input_dir`.
pub fn build_at(site: &SiteConfig, options: &BuildOptions) -> color_eyre::Result<BuildReport> {
    fs::create_dir_all(&options.output_dir)
        .with_note(|| format!("While creating {}", options.output_dir.display()))?;

    let report = Pipeline::new(BuildCtx {
        site,
        options,
        report: BuildReport::default(),
    })
    .discover()?
    .parse()
    .derive()
    .emit()?;

    info!(
        written = report.written,
        drafts_skipped = report.drafts_skipped,
        invalid_skipped = report.invalid_skipped,
        "build complete"
    );
    Ok(report)
}

struct BuildCtx<'a> {
    site: &'a SiteConfig,
    options: &'a BuildOptions,
    report: BuildReport,
}

struct DerivedPost {
    slug: Slug,
    published: Timestamp,
    head_html: String,
    minutes: u32,
}

fn discover_sources(ctx: &BuildCtx<'_>) -> color_eyre::Result<Vec<(PathBuf, String)>> {
    let (entries, walk_errors): (Vec<PathBuf>, Vec<walkdir::Error>) =
        WalkDir::new(&ctx.options.input_dir)
            .into_iter()
            .partition_map(|r| match r {
                Ok(entry) => Either::Left(entry.into_path()),
                Err(e) => Either::Right(e),
            });

    if !walk_errors.is_empty() {
        return Err(eyre!(
            "Failed to open some directory entries: {walk_errors:?}"
        ));
    }

    let mut md_paths: Vec<PathBuf> = entries
        .into_iter()
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "md"))
        .collect();
    md_paths.sort();

    let (docs, file_errors): (Vec<(PathBuf, String)>, Vec<(PathBuf, std::io::Error)>) = md_paths
        .into_iter()
        .partition_map(|path| match fs::read_to_string(&path) {
            Ok(content) => Either::Left((path, content)),
            Err(e) => Either::Right((path, e)),
        });

    if !file_errors.is_empty() {
        return Err(eyre!("Failed to open some files: {file_errors:?}"));
    }

    debug!(count = docs.len(), "discovered markdown sources");
    Ok(docs)
}

fn parse_sources(ctx: &mut BuildCtx<'_>, sources: Vec<(PathBuf, String)>) -> Vec<Post> {
    let mut posts = Vec::with_capacity(sources.len());
    let mut seen: HashSet<Slug> = HashSet::new();

    for (path, content) in sources {
        let doc = match Document::try_from(content.as_str()) {
            Ok(doc) => doc,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "skipping post with unreadable front matter");
                ctx.report.invalid_skipped += 1;
                continue;
            }
        };

        if doc.header.is_draft() && !ctx.options.include_drafts {
            debug!(path = %path.display(), "skipping draft");
            ctx.report.drafts_skipped += 1;
            continue;
        }

        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        let post = match doc.header.into_post(doc.body, &stem) {
            Ok(post) => post,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "skipping invalid post");
                ctx.report.invalid_skipped += 1;
                continue;
            }
        };

        if !seen.insert(post.slug.clone()) {
            warn!(path = %path.display(), slug = %post.slug, "skipping post with duplicate slug");
            ctx.report.invalid_skipped += 1;
            continue;
        }

        posts.push(post);
    }

    posts
}

fn derive_posts(site: &SiteConfig, posts: &[Post]) -> Vec<DerivedPost> {
    let mut derived: Vec<DerivedPost> = posts
        .par_iter()
        .map(|post| {
            let meta = site.derive(&post.metadata_input());
            let stats = reading_stats(&post.body);
            debug!(
                slug = %post.slug,
                words = stats.words,
                images = stats.images,
                code_words = stats.code_words,
                minutes = stats.minutes,
                "derived post metadata"
            );
            DerivedPost {
                slug: post.slug.clone(),
                published: post.published,
                head_html: render_head(&meta, site, Some(post)),
                minutes: stats.minutes,
            }
        })
        .collect();

    // Newest first, then by slug.
    derived.sort_by(|a, b| {
        b.published
            .cmp(&a.published)
            .then_with(|| a.slug.cmp(&b.slug))
    });
    derived
}

fn emit_outputs(
    ctx: &mut BuildCtx<'_>,
    home_head: &str,
    posts: &[DerivedPost],
) -> color_eyre::Result<()> {
    let options = ctx.options;
    let out = &options.output_dir;

    fs::write(out.join(HEAD_FILE), home_head)?;

    for post in posts {
        let dir = out.join(post.slug.as_str());
        fs::create_dir_all(&dir).with_note(|| format!("While creating {}", dir.display()))?;
        fs::write(dir.join(HEAD_FILE), &post.head_html)?;
        ctx.report.written += 1;
    }

    let listing = posts
        .iter()
        .map(|p| format!("{}\t{}\n", p.slug, format_reading_time(p.minutes)))
        .collect::<String>();
    fs::write(out.join(READING_TIMES_FILE), listing)?;

    Ok(())
}

trait PipelineStage {}
/// Pipeline typestate driver
struct Pipeline<'a, S: PipelineStage> {
    ctx: BuildCtx<'a>,
    state: S,
}

struct Discovered(Vec<(PathBuf, String)>);
impl PipelineStage for Discovered {}
struct Parsed(Vec<Post>);
impl PipelineStage for Parsed {}
struct Derived {
    home_head: String,
    posts: Vec<DerivedPost>,
}
impl PipelineStage for Derived {}
impl PipelineStage for () {}

// initial state
impl<'a> Pipeline<'a, ()> {
    fn new(ctx: BuildCtx<'a>) -> Self {
        Self { ctx, state: () }
    }

    fn discover(self) -> color_eyre::Result<Pipeline<'a, Discovered>> {
        let docs = discover_sources(&self.ctx)?;
        Ok(Pipeline {
            ctx: self.ctx,
            state: Discovered(docs),
        })
    }
}

impl<'a> Pipeline<'a, Discovered> {
    fn parse(mut self) -> Pipeline<'a, Parsed> {
        let posts = parse_sources(&mut self.ctx, self.state.0);
        Pipeline {
            ctx: self.ctx,
            state: Parsed(posts),
        }
    }
}

impl<'a> Pipeline<'a, Parsed> {
    fn derive(self) -> Pipeline<'a, Derived> {
        let site = self.ctx.site;
        let home = site.derive(&PageMetadataInput {
            kind: Some(PageKind::Home),
            ..PageMetadataInput::default()
        });
        let home_head = render_head(&home, site, None);
        let posts = derive_posts(site, &self.state.0);
        Pipeline {
            ctx: self.ctx,
            state: Derived { home_head, posts },
        }
    }
}

impl Pipeline<'_, Derived> {
    fn emit(mut self) -> color_eyre::Result<BuildReport> {
        emit_outputs(&mut self.ctx, &self.state.home_head, &self.state.posts)?;
        Ok(self.ctx.report)
    }
}

#[cfg(test)]
mod tests;
