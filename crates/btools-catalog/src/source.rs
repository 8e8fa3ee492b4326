//! Catalog locations and loading.

use std::path::{Path, PathBuf};

use btools_core::Blogger;
use serde::Deserialize;
use serde_json::Value;

use crate::client::CatalogClient;
use crate::error::CatalogError;
use crate::fallback::fallback_bloggers;
use crate::normalize::normalize_catalog;

/// Where the catalog lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    Http(String),
    File(PathBuf),
}

impl CatalogSource {
    /// `http://` and `https://` locations are fetched over HTTP; anything
    /// else is a filesystem path.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            CatalogSource::Http(trimmed.to_string())
        } else {
            CatalogSource::File(PathBuf::from(trimmed))
        }
    }
}

impl std::fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogSource::Http(url) => f.write_str(url),
            CatalogSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Json,
    Yaml,
}

impl CatalogFormat {
    /// Picks YAML for `.yaml`/`.yml` locations (query strings ignored) and
    /// JSON otherwise.
    #[must_use]
    pub fn from_location(location: &str) -> Self {
        let path = location.split(['?', '#']).next().unwrap_or(location);
        let ext = Path::new(path)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("yaml" | "yml") => CatalogFormat::Yaml,
            _ => CatalogFormat::Json,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CatalogDocument {
    List(Vec<Value>),
    Wrapped { bloggers: Vec<Value> },
}

impl CatalogDocument {
    fn into_records(self) -> Vec<Value> {
        match self {
            CatalogDocument::List(records) | CatalogDocument::Wrapped { bloggers: records } => {
                records
            }
        }
    }
}

/// Parses a catalog body into raw records.
///
/// Accepts a bare array or `{ "bloggers": [...] }`.
///
/// # Errors
///
/// Returns [`CatalogError::Deserialize`] or [`CatalogError::Yaml`] when the
/// body does not have either shape.
pub fn parse_catalog_document(
    body: &str,
    format: CatalogFormat,
    context: &str,
) -> Result<Vec<Value>, CatalogError> {
    let document = match format {
        CatalogFormat::Json => serde_json::from_str::<CatalogDocument>(body).map_err(|e| {
            CatalogError::Deserialize {
                context: context.to_owned(),
                source: e,
            }
        })?,
        CatalogFormat::Yaml => {
            serde_yaml::from_str::<CatalogDocument>(body).map_err(|e| CatalogError::Yaml {
                context: context.to_owned(),
                source: e,
            })?
        }
    };
    Ok(document.into_records())
}

/// Whether a loaded catalog came from its configured source or from the
/// built-in placeholder dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogOrigin {
    Source,
    Fallback,
}

#[derive(Debug, Clone)]
pub struct LoadedCatalog {
    pub bloggers: Vec<Blogger>,
    pub origin: CatalogOrigin,
}

/// Loads and normalizes the catalog from `source`.
///
/// # Errors
///
/// Propagates read, HTTP and parse errors.
pub async fn load_catalog(
    source: &CatalogSource,
    client: &CatalogClient,
) -> Result<Vec<Blogger>, CatalogError> {
    let records = match source {
        CatalogSource::Http(url) => client.fetch_catalog(url).await?,
        CatalogSource::File(path) => {
            let display = path.display().to_string();
            let body = tokio::fs::read_to_string(path)
                .await
                .map_err(|e| CatalogError::Io {
                    path: display.clone(),
                    source: e,
                })?;
            parse_catalog_document(&body, CatalogFormat::from_location(&display), &display)?
        }
    };

    let total = records.len();
    let bloggers = normalize_catalog(records);
    tracing::info!(
        source = %source,
        records = total,
        bloggers = bloggers.len(),
        "catalog loaded"
    );
    Ok(bloggers)
}

/// Loads the catalog, substituting the placeholder dataset on any failure.
///
/// Never fails: catalog outages degrade to a small demo catalog instead of
/// propagating into the query engine.
pub async fn load_catalog_or_fallback(
    source: &CatalogSource,
    client: &CatalogClient,
) -> LoadedCatalog {
    match load_catalog(source, client).await {
        Ok(bloggers) => LoadedCatalog {
            bloggers,
            origin: CatalogOrigin::Source,
        },
        Err(e) => {
            tracing::warn!(
                source = %source,
                error = %e,
                "catalog unavailable, using fallback dataset"
            );
            LoadedCatalog {
                bloggers: fallback_bloggers(),
                origin: CatalogOrigin::Fallback,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_source_detects_urls() {
        assert_eq!(
            CatalogSource::parse("HTTPS://cdn.example.com/bloggers.json"),
            CatalogSource::Http("HTTPS://cdn.example.com/bloggers.json".to_string())
        );
        assert_eq!(
            CatalogSource::parse(" ./json/bloggers.json "),
            CatalogSource::File(PathBuf::from("./json/bloggers.json"))
        );
    }

    #[test]
    fn format_from_location_ignores_query() {
        assert_eq!(
            CatalogFormat::from_location("https://x.test/catalog.yml?v=3"),
            CatalogFormat::Yaml
        );
        assert_eq!(CatalogFormat::from_location("catalog.YAML"), CatalogFormat::Yaml);
        assert_eq!(CatalogFormat::from_location("bloggers"), CatalogFormat::Json);
    }

    #[test]
    fn parse_document_accepts_bare_array() {
        let records =
            parse_catalog_document(r#"[{"id":"a"},{"id":"b"}]"#, CatalogFormat::Json, "t")
                .unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn parse_document_accepts_wrapped_object() {
        let records =
            parse_catalog_document(r#"{"bloggers":[{"id":"a"}]}"#, CatalogFormat::Json, "t")
                .unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn parse_document_reads_yaml() {
        let body = "- id: a\n  subscribers: 1000\n- id: b\n";
        let records = parse_catalog_document(body, CatalogFormat::Yaml, "t").unwrap();
        let bloggers = normalize_catalog(records);
        assert_eq!(bloggers.len(), 2);
        assert_eq!(bloggers[0].followers, 1000);
    }

    #[test]
    fn parse_document_rejects_scalar() {
        let err = parse_catalog_document("42", CatalogFormat::Json, "t").unwrap_err();
        assert!(matches!(err, CatalogError::Deserialize { .. }));
    }
}
