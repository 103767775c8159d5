//! Key listing and validation over the key directory

mod service;

pub use service::{KeyGatewayService, REQUIRED_FIELDS_MESSAGE};
