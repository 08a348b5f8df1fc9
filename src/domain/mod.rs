//! Domain layer: strong types with validation and invariants (no I/O).

mod request;
mod response;
mod validation;
mod value;

pub use request::{BODY_FIELD, SendMessage, TO_FIELD};
pub use response::MessageResource;
pub use validation::ValidationError;
pub use value::{AccountSid, AuthToken, SenderNumber};
