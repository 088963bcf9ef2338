//! HTTP request domain types

mod api_request;
mod method;

pub use api_request::{ApiRequest, MAX_RETRIES};
pub use method::HttpMethod;
