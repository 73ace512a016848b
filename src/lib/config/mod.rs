use thiserror::Error;
use url::Url;

pub const INPUT_DIR: &str = "contents";
pub const OUTPUT_DIR: &str = "public";
pub const HEAD_FILE: &str = "head.html";
pub const READING_TIMES_FILE: &str = "reading-times.txt";

// Site-wide metadata used for head tags and absolute links.
pub const SITE_NAME: &str = "Matt Chung";
pub const SITE_URL: &str = "https://themattchung.com";
pub const SITE_AUTHOR: &str = "Matt Chung";
pub const SITE_LOCALE: &str = "en_US";
pub const DEFAULT_TITLE: &str = "Matt Chung - Personal Blog";
pub const DEFAULT_DESCRIPTION: &str = "Personal blog about technology, community, and life. \
Writing about WordPress, web development, and entrepreneurship.";
pub const DEFAULT_IMAGE: &str = "/images/og-default.jpg";
pub const TWITTER_HANDLE: &str = "@themattchung";
pub const ARTICLE_SECTION: &str = "Blog";

// Fallback images for OpenGraph/Twitter cards, by page kind.
pub const FALLBACK_IMAGE_DEFAULT: &str = "/images/og-default.jpg";
pub const FALLBACK_IMAGE_HOME: &str = "/images/og-home.jpg";
pub const FALLBACK_IMAGE_BLOG: &str = "/images/og-blog.jpg";

pub const OG_IMAGE_WIDTH: u32 = 1200;
pub const OG_IMAGE_HEIGHT: u32 = 630;

/// Search snippets get cut around this many characters.
pub const DEFAULT_DESCRIPTION_LEN: usize = 160;

pub const WORDS_PER_MINUTE: f64 = 200.0;
pub const SECONDS_PER_IMAGE: f64 = 10.0;

/// Environment variable overriding the site base URL.
pub const SITE_URL_ENV: &str = "BLOGMETA_SITE_URL";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid base url `{url}`: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("base url `{0}` must use http or https")]
    UnsupportedScheme(String),
    #[error("base url `{0}` must point at the site root")]
    NotRoot(String),
    #[error("site config field `{0}` must not be blank")]
    Blank(&'static str),
}

/// Which sort of page is being rendered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PageKind {
    Home,
    /// Blog listing pages.
    Blog,
    Post,
    #[default]
    Page,
}

impl PageKind {
    pub fn og_type(self) -> &'static str {
        match self {
            PageKind::Post => "article",
            PageKind::Home | PageKind::Blog | PageKind::Page => "website",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FallbackImages {
    pub default: String,
    pub home: String,
    pub blog: String,
}

impl FallbackImages {
    pub fn for_kind(&self, kind: PageKind) -> &str {
        match kind {
            PageKind::Home => &self.home,
            PageKind::Blog | PageKind::Post => &self.blog,
            PageKind::Page => &self.default,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

/// Immutable site configuration, built once and shared by reference.
#[derive(Clone, Debug)]
pub struct SiteConfig {
    pub site_name: String,
    base_url: Url,
    pub author: String,
    pub locale: String,
    pub default_title: String,
    pub default_description: String,
    pub default_image: String,
    pub twitter_handle: String,
    pub og_image: ImageSize,
    pub fallback_images: FallbackImages,
    pub article_section: String,
}

impl SiteConfig {
    pub fn from_defaults() -> Result<Self, ConfigError> {
        let config = Self {
            site_name: SITE_NAME.to_string(),
            base_url: parse_base_url(SITE_URL)?,
            author: SITE_AUTHOR.to_string(),
            locale: SITE_LOCALE.to_string(),
            default_title: DEFAULT_TITLE.to_string(),
            default_description: DEFAULT_DESCRIPTION.to_string(),
            default_image: DEFAULT_IMAGE.to_string(),
            twitter_handle: TWITTER_HANDLE.to_string(),
            og_image: ImageSize {
                width: OG_IMAGE_WIDTH,
                height: OG_IMAGE_HEIGHT,
            },
            fallback_images: FallbackImages {
                default: FALLBACK_IMAGE_DEFAULT.to_string(),
                home: FALLBACK_IMAGE_HOME.to_string(),
                blog: FALLBACK_IMAGE_BLOG.to_string(),
            },
            article_section: ARTICLE_SECTION.to_string(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_base_url(mut self, raw: &str) -> Result<Self, ConfigError> {
        self.base_url = parse_base_url(raw)?;
        Ok(self)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Checks the fields every derivation relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("site_name", &self.site_name),
            ("author", &self.author),
            ("default_title", &self.default_title),
            ("default_description", &self.default_description),
            ("default_image", &self.default_image),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::Blank(field));
            }
        }
        Ok(())
    }
}

/// Parse a site base URL, rejecting anything but an http(s) root.
pub fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim()).map_err(|source| ConfigError::InvalidUrl {
        url: raw.to_string(),
        source,
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::UnsupportedScheme(raw.to_string()));
    }
    if url.path() != "/" || url.query().is_some() || url.fragment().is_some() {
        return Err(ConfigError::NotRoot(raw.to_string()));
    }

    Ok(url)
}
