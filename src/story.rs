//! Defines the [`Story`] type and the heading arithmetic that drives
//! pagination.

use crate::util::string_or_number;
use serde::Deserialize;

/// The prefix that marks a content line as the start of a sub-story.
pub const HEADING_PREFIX: &str = "<h3";

/// A story as stored in the content store. Each `content` entry is an opaque
/// HTML fragment; only its leading `<h3` is ever inspected.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct Story {
    /// Unique within a channel. Some records carry a numeric id, so both
    /// forms are accepted and normalized to a string.
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,

    pub title: String,

    /// The thumbnail shown in the indexes.
    #[serde(rename = "pre_img", alias = "previewIcon")]
    pub preview_icon: String,

    #[serde(default)]
    pub content: Vec<String>,
}

impl Story {
    /// The number of heading markers in the story.
    pub fn heading_count(&self) -> usize {
        heading_count(&self.content)
    }

    /// The number of pages the story is expected to span. See
    /// [`story_length`].
    pub fn length(&self) -> usize {
        story_length(&self.content)
    }
}

/// Returns `true` if `line` opens a new sub-story.
pub fn is_heading(line: &str) -> bool {
    line.starts_with(HEADING_PREFIX)
}

pub fn heading_count<S: AsRef<str>>(content: &[S]) -> usize {
    content.iter().filter(|line| is_heading(line.as_ref())).count()
}

/// Two sub-stories share a page, so the expected number of pages is
/// `ceil(headings / 2)`. A story without headings yields 0 here even though
/// it still produces one page.
pub fn story_length<S: AsRef<str>>(content: &[S]) -> usize {
    let headings = heading_count(content);
    match headings % 2 {
        0 => headings / 2,
        _ => headings / 2 + 1,
    }
}
