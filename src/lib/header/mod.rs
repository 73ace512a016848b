use color_eyre::Section;
use gray_matter::{Matter, engine::YAML};
use serde::Deserialize;
use thiserror::Error;

use crate::{
    config::PageKind,
    excerpt::first_paragraph,
    seo::PageMetadataInput,
    types::{Slug, Tag, Timestamp},
    utils::{slugify, strip_date_prefix},
};

/// Post front matter as the CMS writes it.
#[derive(Deserialize, Default, Debug)]
pub struct Header {
    title: Option<String>,
    date: Option<String>,
    modified: Option<String>,
    slug: Option<String>,
    categories: Option<Vec<String>>,
    tags: Option<Vec<String>>,
    draft: Option<bool>,
    excerpt: Option<String>,
    #[serde(alias = "featuredImage")]
    image: Option<String>,
    #[serde(alias = "featuredImageAlt")]
    image_alt: Option<String>,
}

/// A markdown source split into front matter and body.
#[derive(Debug)]
pub struct Document {
    pub header: Header,
    pub body: String,
}

impl TryFrom<&str> for Document {
    type Error = color_eyre::Report;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let matter = Matter::<YAML>::new();
        let parsed = matter
            .parse::<Header>(value)
            .with_note(|| "While parsing frontmatter.")?;
        Ok(Self {
            header: parsed.data.unwrap_or_default(),
            body: parsed.content,
        })
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidPost {
    #[error("post has no title")]
    MissingTitle,
    #[error("post has no date")]
    MissingDate,
    #[error("post date `{0}` is not ISO 8601")]
    BadDate(String),
    #[error("post modified date `{0}` is not ISO 8601")]
    BadModified(String),
    #[error("no usable slug (got `{0}`)")]
    BadSlug(String),
}

impl Header {
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn is_draft(&self) -> bool {
        self.draft.unwrap_or(false)
    }

    /// Validate into a [`Post`]. `file_stem` names the source file and
    /// supplies the slug when the front matter has none.
    pub fn into_post(self, body: String, file_stem: &str) -> Result<Post, InvalidPost> {
        let title = self
            .title
            .filter(|t| !t.trim().is_empty())
            .ok_or(InvalidPost::MissingTitle)?;

        let raw_date = self.date.ok_or(InvalidPost::MissingDate)?;
        let published = Timestamp::parse(&raw_date).ok_or(InvalidPost::BadDate(raw_date))?;

        let modified = match self.modified {
            Some(raw) => Some(Timestamp::parse(&raw).ok_or(InvalidPost::BadModified(raw))?),
            None => None,
        };

        let slug = match self.slug.as_deref().filter(|s| !s.trim().is_empty()) {
            Some(raw) => Slug::parse(raw)
                .or_else(|| Slug::parse(&slugify(raw.trim())))
                .ok_or_else(|| InvalidPost::BadSlug(raw.to_string()))?,
            None => {
                let stem = strip_date_prefix(file_stem);
                Slug::parse(stem)
                    .or_else(|| Slug::parse(&slugify(stem)))
                    .ok_or_else(|| InvalidPost::BadSlug(file_stem.to_string()))?
            }
        };

        Ok(Post {
            title,
            published,
            modified,
            slug,
            categories: parse_tags(self.categories),
            tags: parse_tags(self.tags),
            draft: self.draft.unwrap_or(false),
            excerpt: self.excerpt.filter(|e| !e.trim().is_empty()),
            image: self.image.filter(|i| !i.trim().is_empty()),
            image_alt: self.image_alt,
            body,
        })
    }
}

fn parse_tags(raw: Option<Vec<String>>) -> Vec<Tag> {
    raw.unwrap_or_default()
        .iter()
        .filter_map(|t| Tag::parse(t))
        .collect()
}

/// A validated blog post.
#[derive(Clone, Debug)]
pub struct Post {
    pub title: String,
    pub published: Timestamp,
    pub modified: Option<Timestamp>,
    pub slug: Slug,
    pub categories: Vec<Tag>,
    pub tags: Vec<Tag>,
    pub draft: bool,
    pub excerpt: Option<String>,
    pub image: Option<String>,
    pub image_alt: Option<String>,
    pub body: String,
}

impl Post {
    /// The excerpt, else the first paragraph of the body.
    pub fn summary(&self) -> Option<String> {
        self.excerpt
            .clone()
            .or_else(|| first_paragraph(&self.body))
    }

    pub fn metadata_input(&self) -> PageMetadataInput {
        PageMetadataInput {
            title: Some(self.title.clone()),
            description: self.summary(),
            image: self.image.clone(),
            kind: Some(PageKind::Post),
            canonical_path: Some(self.slug.canonical_path()),
        }
    }
}
