pub mod feed_api;
pub mod fetch_utils;
pub mod http_client;
pub mod season_store;
pub mod urls;

pub use feed_api::{HttpResultsFeed, ResultsFeed};
pub use http_client::create_http_client_with_timeout;
pub use season_store::{HttpSeasonStore, SeasonStore};
pub use urls::*;
