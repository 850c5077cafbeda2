use crate::ads::Ads;
use crate::page::Page;
use gtmpl::{Template, Value};
use std::collections::HashMap;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Responsible for templating and writing a story's detail [`Page`]s to disk.
pub struct Writer<'a> {
    /// The template for detail pages.
    pub template: &'a Template,

    /// The ad bundle. Its header, top and analytics snippets are passed to
    /// the template verbatim; the bottom and center slots arrive already
    /// wrapped on each [`Page`].
    pub ads: &'a Ads,

    /// The directory in which story directories are created. The pages for a
    /// story are located at `{output_directory}/{story_id}/{n}.html`.
    pub output_directory: &'a Path,
}

impl Writer<'_> {
    /// Creates the story's directory and writes one file per page. The
    /// directory must not already exist.
    pub fn write_story(&self, story_id: &str, title: &str, pages: &[Page]) -> Result<()> {
        let dir = self.output_directory.join(story_id);
        if let Err(err) = std::fs::create_dir(&dir) {
            return Err(match err.kind() {
                io::ErrorKind::AlreadyExists => Error::DirectoryConflict(dir),
                _ => Error::Io(err),
            });
        }

        for page in pages {
            let html = self.render(title, page)?;
            std::fs::write(dir.join(page.file_name()), html)?;
        }
        Ok(())
    }

    /// Renders a single [`Page`] with the detail template.
    pub fn render(&self, title: &str, page: &Page) -> Result<String> {
        let context = gtmpl::Context::from(self.to_value(title, page))
            .map_err(|e| Error::Render(e.to_string()))?;
        let mut out: Vec<u8> = Vec::new();
        self.template
            .execute(&mut out, &context)
            .map_err(|e| Error::Render(e.to_string()))?;
        Ok(String::from_utf8_lossy(&out).into_owned())
    }

    /// Converts a [`Page`] into the [`Value::Object`] the detail template is
    /// executed against.
    fn to_value(&self, title: &str, page: &Page) -> Value {
        let fields: [(&str, &str); 13] = [
            ("title", title),
            ("url", page.url.as_str()),
            ("description", ""),
            ("content", page.body_html.as_str()),
            ("prevLink", page.prev_link.as_str()),
            ("nextLink", page.next_link.as_str()),
            ("gaCode", self.ads.ga_code.as_str()),
            ("detailHeader", self.ads.detail_header.as_str()),
            ("detailTop", self.ads.detail_top.as_str()),
            ("detailBottom", page.bottom_html.as_str()),
            ("pnHtml", page.nav_html.as_str()),
            ("sidebar1", ""),
            ("sidebar2", ""),
        ];

        let mut m: HashMap<String, Value> = HashMap::new();
        for (key, value) in fields.iter() {
            m.insert(key.to_string(), Value::String(value.to_string()));
        }
        Value::Object(m)
    }
}

/// The result of a fallible page-writing operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error in a page-writing operation.
#[derive(Debug)]
pub enum Error {
    /// The story's output directory already exists. Story directories are
    /// never reused.
    DirectoryConflict(PathBuf),

    /// An error during templating.
    Render(String),

    /// An error writing the output files.
    Io(io::Error),
}

impl From<io::Error> for Error {
    /// Converts an [`io::Error`] into an [`Error`]. This allows us to use the
    /// `?` operator for fallible I/O operations.
    fn from(err: io::Error) -> Error {
        Error::Io(err)
    }
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as presentable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::DirectoryConflict(path) => {
                write!(f, "story directory '{}' already exists", path.display())
            }
            Error::Render(err) => write!(f, "rendering page: {}", err),
            Error::Io(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::DirectoryConflict(_) => None,
            Error::Render(_) => None,
            Error::Io(err) => Some(err),
        }
    }
}
