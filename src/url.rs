//! Builds every URL the generator emits: story pages, the canonical story
//! index, and category index pages. All URLs hang off a per-channel base of
//! the form `{scheme}{domain}/{channel_id}/`.

use serde::Deserialize;
use url::{ParseError, Url};

/// The scheme prefix for generated URLs.
#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scheme {
    #[serde(rename = "http", alias = "http://")]
    Http,

    #[serde(rename = "https", alias = "https://")]
    Https,
}

impl Default for Scheme {
    fn default() -> Self {
        Scheme::Http
    }
}

impl Scheme {
    pub fn prefix(self) -> &'static str {
        match self {
            Scheme::Http => "http://",
            Scheme::Https => "https://",
        }
    }
}

/// The URL root for a channel.
#[derive(Clone, Debug)]
pub struct SiteUrls {
    base: Url,
}

impl SiteUrls {
    pub fn new(scheme: Scheme, domain: &str, channel_id: &str) -> Result<SiteUrls> {
        Ok(SiteUrls {
            // The trailing slash matters: without it [`Url::join`] would
            // replace the channel segment instead of appending to it.
            base: Url::parse(&format!("{}{}/{}/", scheme.prefix(), domain, channel_id))?,
        })
    }

    /// The landing page for a category, e.g.
    /// `http://example.org/3/category.html?c=BUZZ`.
    pub fn category_index(&self, category: &str) -> Result<Url> {
        let mut url = self.base.join("category.html")?;
        url.query_pairs_mut().append_pair("c", category);
        Ok(url)
    }

    pub fn story(&self, story_id: &str) -> Result<StoryUrls> {
        Ok(StoryUrls {
            base: self.base.join(&format!("{}/", story_id))?,
        })
    }
}

/// The URL root for a single story's pages.
#[derive(Clone, Debug)]
pub struct StoryUrls {
    base: Url,
}

impl StoryUrls {
    /// The URL of page `number` (1-based), e.g.
    /// `http://example.org/3/1234/2.html`.
    pub fn page(&self, number: usize) -> Result<Url> {
        self.base.join(&format!("{}.html", number))
    }

    /// The canonical URL for the story, which is its first page.
    pub fn index(&self) -> Result<Url> {
        self.page(1)
    }
}

type Result<T> = std::result::Result<T, ParseError>;
