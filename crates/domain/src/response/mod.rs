//! HTTP response domain types

mod api_response;
mod envelope;
mod status;

pub use api_response::ApiResponse;
pub use envelope::Envelope;
pub use status::StatusCode;
