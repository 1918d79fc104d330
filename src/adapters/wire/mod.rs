//! Wire client adapters - talk to a running engine over HTTP.

mod http_client;

pub use http_client::{HttpCycleApi, HttpCycleApiConfig};
