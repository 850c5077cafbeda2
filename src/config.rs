use crate::store::ads_field;
use crate::url::Scheme;
use crate::util::string_or_number;
use anyhow::{anyhow, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// The name of the project file searched for by [`Config::from_directory`].
pub const PROJECT_FILE: &str = "storypager.yaml";

#[derive(Deserialize)]
struct Project {
    pub domain: String,
    pub template_id: String,

    #[serde(deserialize_with = "string_or_number")]
    pub channel_id: String,

    #[serde(default)]
    pub scheme: Scheme,

    /// Store keys, in processing order.
    pub categories: Vec<String>,

    #[serde(default = "default_multi_chapter_category")]
    pub multi_chapter_category: String,

    #[serde(default = "default_store_directory")]
    pub store_directory: PathBuf,

    #[serde(default = "default_detail_template")]
    pub detail_template: PathBuf,

    #[serde(default = "default_output_directory")]
    pub output_directory: PathBuf,
}

fn default_multi_chapter_category() -> String {
    String::from("BUZZ")
}

fn default_store_directory() -> PathBuf {
    PathBuf::from("store")
}

fn default_detail_template() -> PathBuf {
    PathBuf::from("template/detail.html")
}

fn default_output_directory() -> PathBuf {
    PathBuf::from("ret")
}

/// The values that parameterize every generated URL and the ads lookup.
#[derive(Clone, Debug, PartialEq)]
pub struct Site {
    pub domain: String,
    pub template_id: String,
    pub channel_id: String,
    pub scheme: Scheme,
}

/// A content category: the key it is filed under in the store and the name
/// it is published as.
#[derive(Clone, Debug, PartialEq)]
pub struct Category {
    pub key: String,
    pub name: String,
}

impl From<&str> for Category {
    fn from(key: &str) -> Category {
        Category {
            key: key.to_owned(),
            name: key.to_uppercase(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub site: Site,
    pub categories: Vec<Category>,
    pub multi_chapter_category: String,
    pub store_directory: PathBuf,
    pub detail_template: PathBuf,
    pub output_directory: PathBuf,
}

impl Config {
    /// Looks for [`PROJECT_FILE`] in `dir` and then in each of its parents.
    pub fn from_directory(dir: &Path, output_directory: Option<&Path>) -> Result<Config> {
        let path = dir.join(PROJECT_FILE);
        if path.exists() {
            match Config::from_project_file(&path, output_directory) {
                Ok(config) => Ok(config),
                Err(e) => Err(anyhow!("Loading configuration: {:?}", e)),
            }
        } else {
            match dir.parent() {
                Some(dir) => Config::from_directory(dir, output_directory),
                None => Err(anyhow!(
                    "Could not find `{}` in any parent directory",
                    PROJECT_FILE
                )),
            }
        }
    }

    /// Loads the project file at `path`. Relative paths in the file are
    /// resolved against its directory; `output_directory` overrides the
    /// configured one.
    pub fn from_project_file(path: &Path, output_directory: Option<&Path>) -> Result<Config> {
        use crate::util::open;
        let project: Project = serde_yaml::from_reader(open(path, "project")?)?;
        ads_field(&project.channel_id)?;
        if project.categories.is_empty() {
            return Err(anyhow!("`categories` must name at least one category"));
        }

        match path.parent() {
            None => Err(anyhow!(
                "Can't get parent directory for provided project file path '{:?}'",
                path
            )),
            Some(project_root) => Ok(Config {
                site: Site {
                    domain: project.domain,
                    template_id: project.template_id,
                    channel_id: project.channel_id,
                    scheme: project.scheme,
                },
                categories: project
                    .categories
                    .iter()
                    .map(|key| Category::from(key.as_str()))
                    .collect(),
                multi_chapter_category: project.multi_chapter_category,
                store_directory: project_root.join(project.store_directory),
                detail_template: project_root.join(project.detail_template),
                output_directory: match output_directory {
                    Some(dir) => dir.to_owned(),
                    None => project_root.join(project.output_directory),
                },
            }),
        }
    }
}
