//! Renders derived metadata into the `<head>` fragment a page emits.

use std::fmt::Write;

use crate::{
    config::SiteConfig,
    header::Post,
    seo::DerivedMetadata,
    utils::{escape_attr, escape_text},
};

const TWITTER_CARD: &str = "summary_large_image";

/// Full head fragment: charset, viewport, title, description, social tags,
/// article tags for posts and the canonical link.
pub fn render_head(meta: &DerivedMetadata, site: &SiteConfig, post: Option<&Post>) -> String {
    let mut out = String::new();
    out.push_str(r#"<meta charset="UTF-8">"#);
    out.push_str(
        r#"
<meta name="viewport" content="width=device-width">"#,
    );
    _ = write!(out, "\n<title>{}</title>", escape_text(&meta.title));
    push_name(&mut out, "description", &meta.description);

    if post.is_some_and(|p| p.draft) {
        push_name(&mut out, "robots", "noindex");
    }

    out.push_str(&render_social_meta(
        meta,
        site,
        post.and_then(|p| p.image_alt.as_deref()),
    ));

    if let Some(post) = post {
        out.push_str(&render_article_meta(post, site));
    }

    _ = write!(
        out,
        "\n<link rel=\"canonical\" href=\"{}\">",
        escape_attr(&meta.canonical_url)
    );
    out
}

/// OpenGraph and Twitter card tags.
pub fn render_social_meta(
    meta: &DerivedMetadata,
    site: &SiteConfig,
    image_alt: Option<&str>,
) -> String {
    let mut out = String::new();
    push_property(&mut out, "og:title", &meta.title);
    push_property(&mut out, "og:description", &meta.description);
    push_property(&mut out, "og:type", meta.kind.og_type());
    push_property(&mut out, "og:url", &meta.canonical_url);
    push_property(&mut out, "og:image", &meta.image_url);
    push_property(&mut out, "og:image:width", &site.og_image.width.to_string());
    push_property(&mut out, "og:image:height", &site.og_image.height.to_string());
    if let Some(alt) = image_alt {
        push_property(&mut out, "og:image:alt", alt);
    }
    push_property(&mut out, "og:site_name", &site.site_name);
    push_property(&mut out, "og:locale", &site.locale);

    push_name(&mut out, "twitter:card", TWITTER_CARD);
    push_name(&mut out, "twitter:title", &meta.title);
    push_name(&mut out, "twitter:description", &meta.description);
    push_name(&mut out, "twitter:image", &meta.image_url);
    if let Some(alt) = image_alt {
        push_name(&mut out, "twitter:image:alt", alt);
    }
    push_name(&mut out, "twitter:site", &site.twitter_handle);
    push_name(&mut out, "twitter:creator", &site.twitter_handle);
    out
}

/// `article:*` tags. The section is the post's first category, else the
/// site's configured section.
pub fn render_article_meta(post: &Post, site: &SiteConfig) -> String {
    let mut out = String::new();
    push_property(&mut out, "article:published_time", &post.published.to_rfc3339());
    if let Some(modified) = &post.modified {
        push_property(&mut out, "article:modified_time", &modified.to_rfc3339());
    }
    push_property(&mut out, "article:author", &site.author);

    let section = post
        .categories
        .first()
        .map(|c| c.as_str())
        .unwrap_or(site.article_section.as_str());
    push_property(&mut out, "article:section", section);

    for tag in &post.tags {
        push_property(&mut out, "article:tag", tag.as_str());
    }
    out
}

fn push_property(out: &mut String, property: &str, content: &str) {
    _ = write!(
        out,
        "\n<meta property=\"{property}\" content=\"{}\">",
        escape_attr(content)
    );
}

fn push_name(out: &mut String, name: &str, content: &str) {
    _ = write!(
        out,
        "\n<meta name=\"{name}\" content=\"{}\">",
        escape_attr(content)
    );
}
