//! The library code for the `storypager` static page generator. A run takes
//! every story of every configured category and does two things with it:
//!
//! 1. Splits the story's content into linked, ad-bearing detail pages
//!    ([`crate::paginate`]) and writes them to disk ([`crate::write`])
//! 2. Records the story in the two JSON indexes ([`crate::catalog`])
//!
//! The first step is the more involved. A story's content is an ordered list
//! of HTML fragments, some of which open a sub-story with an `<h3` heading.
//! Two sub-stories share a page, a center ad and a prev/next navigation block
//! are woven into the body, and each page advertises its neighbors with
//! `<link rel>` tags.
//!
//! Stories and ads are loaded through the [`crate::store`] traits, and
//! [`crate::build::build_site`] ties everything together.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]

pub mod ads;
pub mod build;
pub mod catalog;
pub mod config;
pub mod page;
pub mod paginate;
pub mod store;
pub mod story;
pub mod url;
mod util;
pub mod write;
