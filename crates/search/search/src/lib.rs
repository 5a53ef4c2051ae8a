//! Search index contract: asset documents mirrored into a secondary
//! index for serial-number prefix lookup.

pub mod document;
pub mod error;
pub mod index;

pub use document::AssetDocument;
pub use error::SearchError;
pub use index::SearchIndex;
