pub mod config;
pub mod index;

pub use config::ElasticsearchConfig;
pub use index::ElasticsearchSearchIndex;
