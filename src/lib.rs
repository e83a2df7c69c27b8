pub mod catalog;
pub mod config;
pub mod contact;
pub mod data;
pub mod error;
pub mod mock_data;
pub mod models;
pub mod view;
pub mod viewer;

pub use catalog::{Catalog, CatalogOptions, FilterDimension, SortKey, UnpricedPolicy};
pub use error::{ContactError, LoadError};
pub use models::{Brand, CatalogData, CatalogDocument, CatalogQuery, Category, Product};
pub use view::CatalogView;
