use std::fmt;
use url::Url;

/// One output detail page of a story.
#[derive(Clone, Debug, PartialEq)]
pub struct Page {
    /// 1-based; also the file stem (`{number}.html`).
    pub number: usize,

    pub url: Url,

    /// The accumulated content lines, ad blocks and navigation blocks joined
    /// with newlines.
    pub body_html: String,

    /// The navigation block handed to the template (`pnHtml`).
    pub nav_html: String,

    /// `<link rel="prev">` tag, or empty.
    pub prev_link: String,

    /// `<link rel="next">` tag, or empty.
    pub next_link: String,

    /// The wrapped bottom ad. Every page carries it.
    pub bottom_html: String,
}

impl Page {
    pub fn file_name(&self) -> String {
        format!("{}.html", self.number)
    }
}

/// The prev/next navigation for a page. `Display` renders the block that
/// sits in the page body and template.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Navigation<'a> {
    None,
    Next(&'a Url),
    Prev(&'a Url),
    PrevNext(&'a Url, &'a Url),
}

impl<'a> Navigation<'a> {
    pub fn prev(&self) -> Option<&'a Url> {
        match *self {
            Navigation::Prev(prev) | Navigation::PrevNext(prev, _) => Some(prev),
            _ => None,
        }
    }

    pub fn next(&self) -> Option<&'a Url> {
        match *self {
            Navigation::Next(next) | Navigation::PrevNext(_, next) => Some(next),
            _ => None,
        }
    }

    pub fn prev_link(&self) -> String {
        link_tag("prev", self.prev())
    }

    pub fn next_link(&self) -> String {
        link_tag("next", self.next())
    }
}

fn link_tag(rel: &str, href: Option<&Url>) -> String {
    match href {
        Some(href) => format!(r#"<link rel="{}" href="{}" />"#, rel, href),
        None => String::new(),
    }
}

impl fmt::Display for Navigation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Navigation::None => Ok(()),
            Navigation::Next(next) => write!(
                f,
                r#"
<div class="mpp-page-link page-link">
    <a href="{}" id="next-page-link" style="width: 100%">
        NEXT PAGE
    </a>
</div>
"#,
                next
            ),
            Navigation::Prev(prev) => write!(
                f,
                r#"
<div class="mpp-page-link page-link">
    <a href="{}" id="previous-page-link" style="width: 100%">
        PREV
    </a>
</div>
"#,
                prev
            ),
            Navigation::PrevNext(prev, next) => write!(
                f,
                r#"
<div class="mpp-page-link page-link">
    <a href="{}" id="previous-page-link">
        PREV
    </a>
    <a href="{}" id="next-page-link">
        NEXT PAGE
    </a>
</div>
"#,
                prev, next
            ),
        }
    }
}
