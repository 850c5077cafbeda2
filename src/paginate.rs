//! Splits a story's content stream into detail [`Page`]s.
//!
//! Two sub-stories (headings) share a page. The content is walked once while
//! a running heading count `h` is kept for the page currently being
//! accumulated (`page`):
//!
//! * when `h == page * 2`, the center ad and the page's navigation block are
//!   appended to the buffer;
//! * when `h == page * 2 + 1`, the buffer is flushed as page `page` and a new
//!   page starts with the current heading;
//! * every line, headings included, is appended to the buffer.
//!
//! Whatever remains once the stream is exhausted is flushed as the final page.
//! Only heading lines can trigger either transition, so trailing body lines
//! always land on the final page.
//!
//! The navigation variant is chosen by comparing `page` with the story length
//! computed up front (see [`crate::story::story_length`]). Note the quirks
//! that fall out of this table: when the heading count is even, the final
//! page still receives the center ad (its second heading is reached), and the
//! final page of a multi-page story links back to itself as `prev`.

use crate::ads::AdBlocks;
use crate::page::{Navigation, Page};
use crate::story::{is_heading, story_length};
use crate::url::StoryUrls;
use url::{ParseError, Url};

/// Paginates `content` into pages numbered `1..=N`. This function is pure;
/// writing the pages is left to [`crate::write::Writer`].
pub fn paginate<S: AsRef<str>>(
    content: &[S],
    urls: &StoryUrls,
    ads: &AdBlocks,
) -> Result<Vec<Page>, ParseError> {
    let mut acc = Accumulator {
        urls,
        ads,
        story_length: story_length(content),
        page: 1,
        headings: 0,
        buffer: Vec::new(),
        pages: Vec::new(),
    };
    for line in content {
        acc.push(line.as_ref())?;
    }
    acc.finish()
}

/// The state of an in-progress pagination: the page being accumulated and
/// the lines gathered for it so far.
struct Accumulator<'a> {
    urls: &'a StoryUrls,
    ads: &'a AdBlocks,

    /// The expected final page number. Selects navigation variants only; it
    /// never bounds the walk.
    story_length: usize,

    page: usize,
    headings: usize,
    buffer: Vec<String>,
    pages: Vec<Page>,
}

/// The URLs around the page being accumulated.
struct Neighbors {
    prev: Url,
    current: Url,
    next: Url,
}

impl Accumulator<'_> {
    fn push(&mut self, line: &str) -> Result<(), ParseError> {
        if is_heading(line) {
            self.headings += 1;
            if self.headings == self.page * 2 {
                let neighbors = self.neighbors()?;
                let nav = self.navigation(&neighbors);
                self.buffer.push(self.ads.center.clone());
                self.buffer.push(nav.to_string());
            } else if self.headings == self.page * 2 + 1 {
                let neighbors = self.neighbors()?;
                let nav = self.navigation(&neighbors);
                self.flush(neighbors.current.clone(), nav);
                self.page += 1;
            }
        }
        self.buffer.push(line.to_owned());
        Ok(())
    }

    fn finish(mut self) -> Result<Vec<Page>, ParseError> {
        let current = self.urls.page(self.page)?;
        let nav = match self.page {
            1 => Navigation::None,
            _ => Navigation::Prev(&current),
        };
        self.flush(current.clone(), nav);
        Ok(self.pages)
    }

    fn flush(&mut self, url: Url, nav: Navigation) {
        let body_html = self.buffer.join("\n");
        self.buffer.clear();
        self.pages.push(Page {
            number: self.page,
            url,
            body_html,
            nav_html: nav.to_string(),
            prev_link: nav.prev_link(),
            next_link: nav.next_link(),
            bottom_html: self.ads.bottom.clone(),
        });
    }

    fn neighbors(&self) -> Result<Neighbors, ParseError> {
        Ok(Neighbors {
            prev: self.urls.page(self.page - 1)?,
            current: self.urls.page(self.page)?,
            next: self.urls.page(self.page + 1)?,
        })
    }

    fn navigation<'u>(&self, neighbors: &'u Neighbors) -> Navigation<'u> {
        let (page, last) = (self.page, self.story_length);
        if page == 1 && page < last {
            Navigation::Next(&neighbors.next)
        } else if page > 1 && page == last {
            Navigation::Prev(&neighbors.prev)
        } else if page > 1 && page < last {
            Navigation::PrevNext(&neighbors.prev, &neighbors.next)
        } else {
            Navigation::None
        }
    }
}
