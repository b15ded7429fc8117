pub mod errors;
pub mod id;

pub use errors::{ConfigError, EncoderError, SessionError};
pub use id::{new_id, EncoderId, SessionId};
