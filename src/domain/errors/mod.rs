//! Domain error types.

mod forward_error;

pub use forward_error::ForwardError;
