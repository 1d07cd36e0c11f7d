//! Sample entities and trace drivers for repokit.
//!
//! Two small domains exercise the repository end to end:
//!
//! - [`company`]: countries, provinces, localities, addresses, branches and
//!   companies, all with `Int` identities.
//! - [`catalog`]: categories, measurement units, supplies and manufactured
//!   articles, all with `Long` identities.
//!
//! The `company_trace` and `catalog_trace` binaries walk through a typical
//! session against each domain and print the repository state as they go.

#![warn(clippy::all)]

pub mod catalog;
pub mod company;
pub mod logging;

pub use catalog::{
    Article, ArticleImage, Catalog, Category, HasArticle, ManufacturedArticle, ManufacturedArticleDetail,
    MeasurementUnit, SupplyArticle,
};
pub use company::{Address, Branch, Company, Country, Locality, Province, sample_companies};
