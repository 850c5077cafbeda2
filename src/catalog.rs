//! Accumulates the two JSON indexes describing every story: the grouped
//! [`CatalogIndex`] (`data.json`) and the shuffled [`FlatIndex`]
//! (`list.json`).

use crate::story::Story;
use crate::url::SiteUrls;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use url::Url;

/// A category and the URL of its landing page.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct CategoryEntry {
    pub category: String,

    #[serde(rename = "index")]
    pub index_url: Url,
}

/// One story as it appears in both indexes.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct ListItem {
    pub id: String,
    pub title: String,
    pub category: String,

    #[serde(rename = "icon")]
    pub preview_icon: String,

    /// The story's first page.
    #[serde(rename = "index")]
    pub index_url: Url,

    /// The story length for the multi-chapter category, else 1.
    pub count: usize,
}

/// The stories filed under one category. `count` always equals
/// `items.len()`.
#[derive(Serialize, Clone, Debug, Default, PartialEq)]
pub struct Bucket {
    pub count: usize,
    pub items: Vec<ListItem>,
}

/// The grouped index, persisted as `data.json`.
#[derive(Serialize, Debug)]
pub struct CatalogIndex {
    #[serde(rename = "category")]
    pub categories: Vec<CategoryEntry>,
    pub data: BTreeMap<String, Bucket>,
}

/// The flat index, persisted as `list.json`.
#[derive(Serialize, Debug)]
pub struct FlatIndex {
    #[serde(rename = "category")]
    pub categories: Vec<CategoryEntry>,
    pub all_list: Vec<ListItem>,
}

/// Builds both indexes as stories are processed. Items are only ever
/// appended.
pub struct Catalog<'a> {
    urls: &'a SiteUrls,

    /// The category whose items report their page count.
    multi_chapter_category: &'a str,

    categories: Vec<CategoryEntry>,
    data: BTreeMap<String, Bucket>,
    all_list: Vec<ListItem>,
}

impl<'a> Catalog<'a> {
    pub fn new(urls: &'a SiteUrls, multi_chapter_category: &'a str) -> Catalog<'a> {
        Catalog {
            urls,
            multi_chapter_category,
            categories: Vec::new(),
            data: BTreeMap::new(),
            all_list: Vec::new(),
        }
    }

    /// Registers `category` the first time it is seen. Repeat calls are
    /// no-ops.
    pub fn ensure_category(&mut self, category: &str) -> Result<()> {
        if self.data.contains_key(category) {
            return Ok(());
        }
        self.categories.push(CategoryEntry {
            category: category.to_owned(),
            index_url: self.urls.category_index(category)?,
        });
        self.data.insert(category.to_owned(), Bucket::default());
        Ok(())
    }

    /// Appends `story` to the category's bucket and to the flat list.
    pub fn record_item(&mut self, category: &str, story: &Story) -> Result<&ListItem> {
        self.ensure_category(category)?;
        let item = ListItem {
            id: story.id.clone(),
            title: story.title.clone(),
            category: category.to_owned(),
            preview_icon: story.preview_icon.clone(),
            index_url: self.urls.story(&story.id)?.index()?,
            count: match category == self.multi_chapter_category {
                true => story.length(),
                false => 1,
            },
        };

        self.all_list.push(item.clone());
        let bucket = self
            .data
            .entry(category.to_owned())
            .or_insert_with(Bucket::default);
        bucket.items.push(item);
        bucket.count += 1;
        Ok(&bucket.items[bucket.items.len() - 1])
    }

    /// Finishes the catalog, shuffling the flat list with `rng`.
    pub fn into_indexes<R: Rng + ?Sized>(self, rng: &mut R) -> (FlatIndex, CatalogIndex) {
        let mut all_list = self.all_list;
        all_list.shuffle(rng);
        (
            FlatIndex {
                categories: self.categories.clone(),
                all_list,
            },
            CatalogIndex {
                categories: self.categories,
                data: self.data,
            },
        )
    }
}

/// Persists both indexes into `directory` as `list.json` and `data.json`.
pub fn write_indexes(directory: &Path, flat: &FlatIndex, catalog: &CatalogIndex) -> Result<()> {
    write_json(&directory.join("list.json"), flat)?;
    write_json(&directory.join("data.json"), catalog)
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    serde_json::to_writer(&mut w, value)?;
    w.flush()?;
    Ok(())
}

/// The result of a fallible catalog operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error building or persisting the indexes.
#[derive(Debug)]
pub enum Error {
    /// Returned when an index URL cannot be built.
    UrlParse(url::ParseError),

    /// Returned when an index cannot be serialized.
    Json(serde_json::Error),

    /// Returned when an index file cannot be written.
    Io(io::Error),
}

impl fmt::Display for Error {
    /// Implements [`fmt::Display`] for [`Error`].
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::UrlParse(err) => err.fmt(f),
            Error::Json(err) => err.fmt(f),
            Error::Io(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements [`std::error::Error`] for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::UrlParse(err) => Some(err),
            Error::Json(err) => Some(err),
            Error::Io(err) => Some(err),
        }
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Error {
        Error::UrlParse(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Error {
        Error::Json(err)
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Error {
        Error::Io(err)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::url::Scheme;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn urls() -> SiteUrls {
        SiteUrls::new(Scheme::Http, "example.org", "3").unwrap()
    }

    fn story(id: &str, headings: usize) -> Story {
        Story {
            id: id.to_owned(),
            title: format!("Story {}", id),
            preview_icon: format!("{}.png", id),
            content: (0..headings).map(|i| format!("<h3>{}</h3>", i)).collect(),
        }
    }

    fn catalog(urls: &SiteUrls) -> Result<Catalog> {
        let mut catalog = Catalog::new(urls, "BUZZ");
        catalog.ensure_category("BUZZ")?;
        catalog.record_item("BUZZ", &story("1", 5))?;
        catalog.record_item("BUZZ", &story("2", 0))?;
        catalog.ensure_category("IT")?;
        catalog.record_item("IT", &story("3", 6))?;
        catalog.ensure_category("SKIN-CARE")?;
        Ok(catalog)
    }

    #[test]
    fn test_ensure_category_is_idempotent() -> Result<()> {
        let urls = urls();
        let mut catalog = catalog(&urls)?;
        catalog.ensure_category("BUZZ")?;
        catalog.ensure_category("IT")?;
        let (flat, grouped) = catalog.into_indexes(&mut StdRng::seed_from_u64(1));
        let names: Vec<&str> = grouped.categories.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(vec!["BUZZ", "IT", "SKIN-CARE"], names);
        assert_eq!(
            "http://example.org/3/category.html?c=IT",
            grouped.categories[1].index_url.as_str()
        );
        assert_eq!(2, grouped.data["BUZZ"].count);
        assert_eq!(flat.categories, grouped.categories);
        Ok(())
    }

    #[test]
    fn test_item_counts() -> Result<()> {
        let urls = urls();
        let (_, grouped) = catalog(&urls)?.into_indexes(&mut StdRng::seed_from_u64(1));
        let buzz = &grouped.data["BUZZ"].items;
        assert_eq!(3, buzz[0].count);
        assert_eq!(0, buzz[1].count);
        // only the multi-chapter category reports lengths
        assert_eq!(1, grouped.data["IT"].items[0].count);
        assert_eq!(
            "http://example.org/3/1/1.html",
            buzz[0].index_url.as_str()
        );
        Ok(())
    }

    #[test]
    fn test_bucket_count_matches_items() -> Result<()> {
        let urls = urls();
        let (_, grouped) = catalog(&urls)?.into_indexes(&mut StdRng::seed_from_u64(1));
        for (category, bucket) in grouped.data.iter() {
            assert_eq!(bucket.items.len(), bucket.count, "category {}", category);
        }
        assert_eq!(0, grouped.data["SKIN-CARE"].count);
        Ok(())
    }

    #[test]
    fn test_record_registers_category() -> Result<()> {
        let urls = urls();
        let mut catalog = Catalog::new(&urls, "BUZZ");
        let item = catalog.record_item("IT", &story("9", 2))?;
        assert_eq!("IT", item.category);
        let (_, grouped) = catalog.into_indexes(&mut rand::thread_rng());
        assert_eq!(1, grouped.categories.len());
        assert_eq!(1, grouped.data["IT"].count);
        Ok(())
    }

    #[test]
    fn test_flat_list_is_union_of_buckets() -> Result<()> {
        let urls = urls();
        let (flat, grouped) = catalog(&urls)?.into_indexes(&mut rand::thread_rng());
        let flat_ids: HashSet<(String, String)> = flat
            .all_list
            .iter()
            .map(|i| (i.category.clone(), i.id.clone()))
            .collect();
        let grouped_ids: HashSet<(String, String)> = grouped
            .data
            .values()
            .flat_map(|b| b.items.iter())
            .map(|i| (i.category.clone(), i.id.clone()))
            .collect();
        assert_eq!(3, flat.all_list.len());
        assert_eq!(grouped_ids, flat_ids);
        for item in flat.all_list.iter() {
            let bucket = &grouped.data[&item.category];
            assert!(bucket.items.contains(item));
        }
        Ok(())
    }

    #[test]
    fn test_write_indexes() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let urls = urls();
        let (flat, grouped) = catalog(&urls)?.into_indexes(&mut rand::thread_rng());
        write_indexes(dir.path(), &flat, &grouped)?;

        let list: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(dir.path().join("list.json"))?)?;
        let data: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(dir.path().join("data.json"))?)?;

        assert_eq!(list["category"], data["category"]);
        assert_eq!(3, list["all_list"].as_array().map(Vec::len).unwrap_or(0));
        assert_eq!(
            "http://example.org/3/category.html?c=BUZZ",
            data["category"][0]["index"]
        );
        assert_eq!(Some(2), data["data"]["BUZZ"]["count"].as_u64());
        assert_eq!("1.png", data["data"]["BUZZ"]["items"][0]["icon"]);
        assert_eq!(Some(3), data["data"]["BUZZ"]["items"][0]["count"].as_u64());
        Ok(())
    }
}
