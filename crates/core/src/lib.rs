pub mod catalog;
pub mod config;
pub mod metrics;
pub mod query;
pub mod tools;

pub use catalog::{load_catalog, Catalog, CatalogStats, CategoryCount, LoadError, Product};
pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, SanitizedConfig,
};
pub use query::{
    ProductSummary, QueryEngine, QueryError, QueryResult, SearchCriteria, SortKey, SortOrder,
    StockStatus,
};
pub use tools::{descriptors, dispatch, ToolDescriptor, ToolRequest, ToolResponse};
