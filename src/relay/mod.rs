mod handler;
mod types;

pub use handler::{RelayHandler, RelaySettings};
pub use types::{ErrorResponse, InboundRequest, RelayError, UpstreamBody, cors_headers};
