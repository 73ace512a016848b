use std::{
    env::{self, current_dir},
    fs::read_to_string,
    path::PathBuf,
};

use color_eyre::{Section, eyre::eyre};
use libblogmeta::{
    config::{SITE_URL_ENV, SiteConfig},
    header::Document,
    pipeline::{BuildOptions, build_at},
    reading_time::estimate_reading_time,
    utils::format_reading_time,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: blogmeta [build] [--site-url URL] [--input DIR] [--output DIR] [--include-drafts]
       blogmeta reading-time FILE";

const DEFAULT_LOG_FILTER: &str = "blogmeta=info,libblogmeta=info";

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_target(false)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("reading-time") => {
            let file = args.get(1).ok_or_else(|| eyre!(USAGE))?;
            reading_time(file)
        }
        Some("build") => build(&args[1..]),
        Some("-h" | "--help") => {
            println!("{USAGE}");
            Ok(())
        }
        _ => build(&args),
    }
}

fn build(args: &[String]) -> color_eyre::Result<()> {
    let root = current_dir().with_note(|| "While getting the current working directory")?;
    let mut options = BuildOptions::at(&root);
    let mut site_url = env::var(SITE_URL_ENV).ok();

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--site-url" => site_url = Some(next_value(&mut iter, arg)?),
            "--input" => options.input_dir = root.join(next_value(&mut iter, arg)?),
            "--output" => options.output_dir = root.join(next_value(&mut iter, arg)?),
            "--include-drafts" => options.include_drafts = true,
            other => return Err(eyre!("unknown argument `{other}`\n{USAGE}")),
        }
    }

    let mut site = SiteConfig::from_defaults()?;
    if let Some(url) = site_url {
        site = site
            .with_base_url(&url)
            .with_note(|| format!("While reading the site url from --site-url or {SITE_URL_ENV}"))?;
    }

    info!(base_url = %site.base_url(), input = %options.input_dir.display(), "building metadata");
    build_at(&site, &options)?;
    Ok(())
}

fn reading_time(file: &str) -> color_eyre::Result<()> {
    let path = PathBuf::from(file);
    let source = read_to_string(&path).with_note(|| format!("While reading {}", path.display()))?;
    let doc = Document::try_from(source.as_str())?;
    println!("{}", format_reading_time(estimate_reading_time(&doc.body)));
    Ok(())
}

fn next_value<'a>(
    iter: &mut impl Iterator<Item = &'a String>,
    flag: &str,
) -> color_eyre::Result<String> {
    iter.next()
        .cloned()
        .ok_or_else(|| eyre!("`{flag}` needs a value\n{USAGE}"))
}
