pub mod client;
pub mod error;
pub mod fallback;
pub mod normalize;
pub(crate) mod retry;
pub mod source;
pub mod types;

pub use client::CatalogClient;
pub use error::CatalogError;
pub use fallback::fallback_bloggers;
pub use normalize::{normalize_blogger, normalize_catalog};
pub use source::{
    load_catalog, load_catalog_or_fallback, parse_catalog_document, CatalogFormat,
    CatalogOrigin, CatalogSource, LoadedCatalog,
};
pub use types::RawBlogger;
