//! Transport layer: HTTP and wire-format details (serialization/deserialization).

mod money;
mod send_message;

pub use send_message::{
    decode_api_error, decode_message_json_response, encode_send_message_form,
};
