//! Defines the [`ContentStore`] and [`AdsStore`] seams through which stories
//! and ads are loaded, plus [`JsonDirStore`], a directory of JSON records laid
//! out like the key-value store the records are exported from:
//!
//! ```text
//! {root}/NewsList/{category_key}.json       ["101", 102, ...]
//! {root}/NewsDetail/{story_id}.json         {"id": 101, "title": ..., "pre_img": ..., "content": [...]}
//! {root}/ads/news.{domain}.{template}.json  {"003": {"gaCode": ..., ...}}
//! ```

use crate::ads::Ads;
use crate::story::Story;
use crate::util::string_or_number;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Supplies story ids per category and the story records themselves.
pub trait ContentStore {
    /// Returns the ids of the stories filed under `category_key`, in order.
    fn story_ids(&self, category_key: &str) -> Result<Vec<String>>;

    fn story(&self, story_id: &str) -> Result<Story>;
}

/// Supplies the ad bundle for a domain, template and channel.
pub trait AdsStore {
    fn ads(&self, domain: &str, template_id: &str, channel_id: &str) -> Result<Ads>;
}

/// The field under which a channel's ads are filed: the channel id
/// zero-padded to three digits (`3` -> `003`).
pub fn ads_field(channel_id: &str) -> Result<String> {
    match channel_id.trim().parse::<u32>() {
        Ok(n) => Ok(format!("{:0>3}", n)),
        Err(_) => Err(Error::MalformedRecord {
            key: format!("channel `{}`", channel_id),
            err: "channel id must be numeric".to_owned(),
        }),
    }
}

/// Checks that `story_id` can name a story directory and URL segment: it must
/// be non-empty, not `.` or `..`, and free of `/`, `\`, `?` and `#`.
pub fn check_story_id(story_id: &str) -> Result<()> {
    let plain = !story_id.is_empty()
        && story_id != "."
        && story_id != ".."
        && !story_id.contains(&['/', '\\', '?', '#'][..]);
    if plain {
        return Ok(());
    }
    Err(Error::MalformedRecord {
        key: format!("story `{}`", story_id),
        err: "story id must be a single path segment".to_owned(),
    })
}

/// A [`ContentStore`] and [`AdsStore`] backed by a directory of JSON files.
pub struct JsonDirStore {
    root: PathBuf,
}

impl JsonDirStore {
    /// Opens the store rooted at `root`, which must be an existing directory.
    pub fn open(root: &Path) -> Result<JsonDirStore> {
        match std::fs::metadata(root) {
            Ok(meta) if meta.is_dir() => Ok(JsonDirStore {
                root: root.to_owned(),
            }),
            Ok(_) => Err(Error::Unavailable {
                path: root.to_owned(),
                err: io::Error::new(io::ErrorKind::Other, "not a directory"),
            }),
            Err(err) => Err(Error::Unavailable {
                path: root.to_owned(),
                err,
            }),
        }
    }

    fn read<T: DeserializeOwned>(&self, key: &str, relative_path: &Path) -> Result<T> {
        let path = self.root.join(relative_path);
        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(Error::MissingRecord(key.to_owned()))
            }
            Err(err) => return Err(Error::Io(err)),
        };
        serde_json::from_str(&contents).map_err(|err| Error::MalformedRecord {
            key: key.to_owned(),
            err: err.to_string(),
        })
    }
}

impl ContentStore for JsonDirStore {
    fn story_ids(&self, category_key: &str) -> Result<Vec<String>> {
        #[derive(Deserialize)]
        struct Id(#[serde(deserialize_with = "string_or_number")] String);

        let ids: Vec<Id> = self.read(
            &format!("NewsList:{}", category_key),
            &Path::new("NewsList").join(format!("{}.json", category_key)),
        )?;
        Ok(ids.into_iter().map(|Id(id)| id).collect())
    }

    fn story(&self, story_id: &str) -> Result<Story> {
        self.read(
            &format!("NewsDetail:{}", story_id),
            &Path::new("NewsDetail").join(format!("{}.json", story_id)),
        )
    }
}

impl AdsStore for JsonDirStore {
    fn ads(&self, domain: &str, template_id: &str, channel_id: &str) -> Result<Ads> {
        let key = format!("ads:news.{}:{}", domain, template_id);
        let field = ads_field(channel_id)?;
        let mut channels: HashMap<String, Ads> = self.read(
            &key,
            &Path::new("ads").join(format!("news.{}.{}.json", domain, template_id)),
        )?;
        channels
            .remove(&field)
            .ok_or_else(|| Error::MissingRecord(format!("{} {}", key, field)))
    }
}

/// The result of a fallible store operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error loading records from a store.
#[derive(Debug)]
pub enum Error {
    /// The store itself cannot be reached.
    Unavailable { path: PathBuf, err: io::Error },

    /// No record exists under the key.
    MissingRecord(String),

    /// The record exists but does not parse.
    MalformedRecord { key: String, err: String },

    /// Returned for other I/O errors.
    Io(io::Error),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Unavailable { path, err } => {
                write!(f, "store '{}' is unavailable: {}", path.display(), err)
            }
            Error::MissingRecord(key) => write!(f, "missing record `{}`", key),
            Error::MalformedRecord { key, err } => {
                write!(f, "malformed record `{}`: {}", key, err)
            }
            Error::Io(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Unavailable { path: _, err } => Some(err),
            Error::MissingRecord(_) => None,
            Error::MalformedRecord { key: _, err: _ } => None,
            Error::Io(err) => Some(err),
        }
    }
}

impl From<io::Error> for Error {
    /// Converts a [`std::io::Error`] into an [`Error`]. It allows us to
    /// use the `?` operator for fallible I/O functions.
    fn from(err: io::Error) -> Error {
        Error::Io(err)
    }
}
