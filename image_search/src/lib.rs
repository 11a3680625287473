pub mod backfill;
pub mod config;
pub mod error;
pub mod filter;
pub mod models;
pub mod proxy;
pub mod upstream;

pub use backfill::{run_backfill, BackfillReport};
pub use config::ProxyConfig;
pub use error::SearchError;
pub use filter::select_image;
pub use models::{ErrorBody, ImageResult, SearchRequest, SearchResponse};
pub use proxy::{router, serve};
pub use upstream::{ImageSource, WikimediaSource};
