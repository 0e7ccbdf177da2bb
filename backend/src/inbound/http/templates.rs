//! Startup-built cache of composed page templates.
//!
//! Every page under `html/pages/` is compiled once, together with the shared
//! `html/base.html` layout and every `html/partials/*.html` fragment, into its
//! own [`Tera`] instance. The cache is immutable afterwards and shared by
//! reference across workers.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tera::{Tera, Value};

/// Template name of the shared layout.
pub const BASE_TEMPLATE: &str = "base.html";
/// Rendering format for the `human_date` filter, e.g. `02 Jan 2026 at 15:04`.
pub const HUMAN_DATE_FORMAT: &str = "%d %b %Y at %H:%M";

const PARTIALS_PREFIX: &str = "partials/";
const PAGES_PREFIX: &str = "pages/";

/// Failures while building the cache. All of them abort startup.
#[derive(Debug, thiserror::Error)]
pub enum TemplateCacheError {
    #[error("failed to read templates at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse template set for page {page}: {source}")]
    Parse {
        page: String,
        #[source]
        source: tera::Error,
    },
    #[error("no pages found under {path}")]
    NoPages { path: PathBuf },
}

/// A page template composed with the layout and partials.
struct TemplateSet {
    tera: Tera,
    entry: String,
}

/// Immutable mapping from page name (e.g. `home.html`) to its template set.
pub struct TemplateCache {
    sets: HashMap<String, TemplateSet>,
}

impl std::fmt::Debug for TemplateCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut pages: Vec<&str> = self.sets.keys().map(String::as_str).collect();
        pages.sort_unstable();
        f.debug_struct("TemplateCache").field("pages", &pages).finish()
    }
}

impl TemplateCache {
    /// Build the cache from an `html` directory laid out as `base.html`,
    /// `partials/*.html` and `pages/*.html`.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateCacheError`] naming the failing page when any set
    /// does not parse, or when the layout or pages cannot be read.
    pub fn from_dir(html_dir: &Path) -> Result<Self, TemplateCacheError> {
        let base = read_file(&html_dir.join(BASE_TEMPLATE))?;
        let partials = read_html_files(&html_dir.join("partials"))?;
        let pages = read_html_files(&html_dir.join("pages"))?;
        if pages.is_empty() {
            return Err(TemplateCacheError::NoPages {
                path: html_dir.join("pages"),
            });
        }
        Self::from_sources(&base, &partials, &pages)
    }

    /// Build the cache from in-memory sources keyed by file name.
    pub fn from_sources(
        base: &str,
        partials: &[(String, String)],
        pages: &[(String, String)],
    ) -> Result<Self, TemplateCacheError> {
        let mut sets = HashMap::with_capacity(pages.len());
        for (page, source) in pages {
            let entry = format!("{PAGES_PREFIX}{page}");
            let mut templates = Vec::with_capacity(partials.len() + 2);
            templates.push((BASE_TEMPLATE.to_owned(), base.to_owned()));
            templates.extend(
                partials
                    .iter()
                    .map(|(name, body)| (format!("{PARTIALS_PREFIX}{name}"), body.clone())),
            );
            templates.push((entry.clone(), source.clone()));

            let mut tera = Tera::default();
            tera.register_filter("human_date", human_date);
            tera.add_raw_templates(templates)
                .map_err(|source| TemplateCacheError::Parse {
                    page: page.clone(),
                    source,
                })?;
            sets.insert(page.clone(), TemplateSet { tera, entry });
        }
        Ok(Self { sets })
    }

    /// Render `page` with `context` into a fully buffered string.
    ///
    /// Returns `None` when the page is not cached.
    pub fn render(
        &self,
        page: &str,
        context: &tera::Context,
    ) -> Option<Result<String, tera::Error>> {
        self.sets
            .get(page)
            .map(|set| set.tera.render(&set.entry, context))
    }

    /// Whether `page` has a cached set.
    pub fn contains(&self, page: &str) -> bool {
        self.sets.contains_key(page)
    }
}

fn read_file(path: &Path) -> Result<String, TemplateCacheError> {
    fs::read_to_string(path).map_err(|source| TemplateCacheError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Read every `*.html` file directly inside `dir`, sorted by name. A missing
/// directory yields no files.
fn read_html_files(dir: &Path) -> Result<Vec<(String, String)>, TemplateCacheError> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => {
            return Err(TemplateCacheError::Read {
                path: dir.to_path_buf(),
                source,
            });
        }
    };

    let mut files = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|source| TemplateCacheError::Read {
                path: dir.to_path_buf(),
                source,
            })?
            .path();
        if path.extension().and_then(|ext| ext.to_str()) != Some("html") {
            continue;
        }
        let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
            continue;
        };
        files.push((name.to_owned(), read_file(&path)?));
    }
    files.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(files)
}

/// Tera filter formatting an RFC 3339 timestamp in UTC. Null renders empty.
fn human_date(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    match value {
        Value::Null => Ok(Value::String(String::new())),
        Value::String(raw) => {
            let instant = DateTime::parse_from_rfc3339(raw)
                .map_err(|err| tera::Error::msg(format!("human_date: {err}")))?;
            Ok(Value::String(
                instant
                    .with_timezone(&Utc)
                    .format(HUMAN_DATE_FORMAT)
                    .to_string(),
            ))
        }
        other => Err(tera::Error::msg(format!(
            "human_date expects a timestamp string, got {other}"
        ))),
    }
}
