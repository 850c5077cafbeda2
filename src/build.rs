//! Exports the [`build_site`] function which stitches together the high-level
//! steps of a run: loading the ads, paginating and writing every story of
//! every category ([`crate::paginate`], [`crate::write`]), and persisting the
//! two indexes ([`crate::catalog`]).

use crate::ads::AdBlocks;
use crate::catalog::{write_indexes, Catalog, Error as CatalogError};
use crate::config::{Category, Config};
use crate::paginate::paginate;
use crate::store::{check_story_id, AdsStore, ContentStore, Error as StoreError, JsonDirStore};
use crate::url::SiteUrls;
use crate::write::{Error as WriteError, Writer};
use gtmpl::Template;
use rand::Rng;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Builds the site described by `config` from the JSON store in
/// `config.store_directory`.
pub fn build_site(config: &Config) -> Result<()> {
    let store = JsonDirStore::open(&config.store_directory)?;
    build(config, &store, &store, &mut rand::thread_rng())
}

/// Builds the site from arbitrary stores. Any error aborts the run; pages
/// already written are left in place.
pub fn build<C, A, R>(config: &Config, content: &C, ads: &A, rng: &mut R) -> Result<()>
where
    C: ContentStore + ?Sized,
    A: AdsStore + ?Sized,
    R: Rng + ?Sized,
{
    let site = &config.site;
    let ads = ads.ads(&site.domain, &site.template_id, &site.channel_id)?;
    let template = parse_template(&config.detail_template)?;
    let urls = SiteUrls::new(site.scheme, &site.domain, &site.channel_id)?;
    let blocks = AdBlocks::from(&ads);

    std::fs::create_dir_all(&config.output_directory)?;
    let writer = Writer {
        template: &template,
        ads: &ads,
        output_directory: &config.output_directory,
    };

    let mut catalog = Catalog::new(&urls, &config.multi_chapter_category);
    for category in config.categories.iter() {
        catalog.ensure_category(&category.name)?;
        let ids = content.story_ids(&category.key)?;
        info!(category = %category.name, stories = ids.len(), "processing category");
        for id in ids {
            build_story(content, &writer, &urls, &blocks, &mut catalog, category, &id)
                .map_err(|e| Error::Annotated(format!("story `{}`", id), Box::new(e)))?;
        }
    }

    let (flat, grouped) = catalog.into_indexes(rng);
    write_indexes(&config.output_directory, &flat, &grouped)?;
    info!(
        stories = flat.all_list.len(),
        categories = grouped.categories.len(),
        "wrote indexes to {}",
        config.output_directory.display()
    );
    Ok(())
}

fn build_story<C: ContentStore + ?Sized>(
    content: &C,
    writer: &Writer,
    urls: &SiteUrls,
    blocks: &AdBlocks,
    catalog: &mut Catalog,
    category: &Category,
    id: &str,
) -> Result<()> {
    check_story_id(id)?;
    let story = content.story(id)?;
    check_story_id(&story.id)?;
    catalog.record_item(&category.name, &story)?;
    let pages = paginate(&story.content, &urls.story(&story.id)?, blocks)?;
    writer.write_story(&story.id, &story.title, &pages)?;
    debug!(story = %story.id, pages = pages.len(), "wrote story");
    Ok(())
}

/// Loads and parses the detail page template.
fn parse_template(path: &Path) -> Result<Template> {
    let contents = std::fs::read_to_string(path).map_err(|e| Error::OpenTemplateFile {
        path: path.to_owned(),
        err: e,
    })?;

    let mut template = Template::default();
    template
        .parse(contents)
        .map_err(|e| Error::ParseTemplate(e.to_string()))?;
    Ok(template)
}

pub type Result<T> = std::result::Result<T, Error>;

/// The error type for a run. Errors can come from the stores, templating,
/// writing pages, or persisting the indexes.
#[derive(Debug)]
pub enum Error {
    /// Returned when a store is unreachable or a record is missing or
    /// malformed.
    Store(StoreError),

    /// Returned for errors writing pages to disk.
    Write(WriteError),

    /// Returned for errors building or persisting the indexes.
    Catalog(CatalogError),

    /// Returned when a generated URL is invalid.
    UrlParse(url::ParseError),

    /// Returned for I/O problems while opening the template file.
    OpenTemplateFile { path: PathBuf, err: std::io::Error },

    /// Returned for errors parsing the template file.
    ParseTemplate(String),

    /// Returned for other I/O errors.
    Io(std::io::Error),

    /// An error with an annotation.
    Annotated(String, Box<Error>),
}

impl fmt::Display for Error {
    /// Implements [`fmt::Display`] for [`Error`].
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Store(err) => err.fmt(f),
            Error::Write(err) => err.fmt(f),
            Error::Catalog(err) => err.fmt(f),
            Error::UrlParse(err) => err.fmt(f),
            Error::OpenTemplateFile { path, err } => {
                write!(f, "Opening template file '{}': {}", path.display(), err)
            }
            Error::ParseTemplate(err) => write!(f, "Parsing template: {}", err),
            Error::Io(err) => err.fmt(f),
            Error::Annotated(annotation, err) => write!(f, "{}: {}", annotation, err),
        }
    }
}

impl std::error::Error for Error {
    /// Implements [`std::error::Error`] for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Store(err) => Some(err),
            Error::Write(err) => Some(err),
            Error::Catalog(err) => Some(err),
            Error::UrlParse(err) => Some(err),
            Error::OpenTemplateFile { path: _, err } => Some(err),
            Error::ParseTemplate(_) => None,
            Error::Io(err) => Some(err),
            Error::Annotated(_, err) => Some(err),
        }
    }
}

impl From<StoreError> for Error {
    /// Converts [`StoreError`]s into [`Error`]. This allows us to use the `?`
    /// operator.
    fn from(err: StoreError) -> Error {
        Error::Store(err)
    }
}

impl From<WriteError> for Error {
    /// Converts [`WriteError`]s into [`Error`]. This allows us to use the `?`
    /// operator.
    fn from(err: WriteError) -> Error {
        Error::Write(err)
    }
}

impl From<CatalogError> for Error {
    /// Converts [`CatalogError`]s into [`Error`]. This allows us to use the
    /// `?` operator.
    fn from(err: CatalogError) -> Error {
        Error::Catalog(err)
    }
}

impl From<url::ParseError> for Error {
    /// Converts [`url::ParseError`]s into [`Error`]. This allows us to use the
    /// `?` operator.
    fn from(err: url::ParseError) -> Error {
        Error::UrlParse(err)
    }
}

impl From<std::io::Error> for Error {
    /// Converts [`std::io::Error`]s into [`Error`]. This allows us to use the
    /// `?` operator.
    fn from(err: std::io::Error) -> Error {
        Error::Io(err)
    }
}
