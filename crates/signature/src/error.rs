use derive_more::{Display, Error};

/// Errors raised while signing or verifying a request.
///
/// Returned wrapped in an [`error_stack::Report`] so the underlying cause
/// (for example the [`std::io::Error`] of a failed body read) stays attached.
#[derive(Debug, Display, Error)]
pub enum SignatureError {
    /// The request body could not be read.
    #[display("Body read error: {message}")]
    BodyRead { message: String },

    /// A keyed hash could not be initialised.
    #[display("HMAC error: {message}")]
    Hmac { message: String },

    /// A produced header value is not a legal HTTP header value.
    #[display("Invalid header value: {message}")]
    InvalidHeader { message: String },

    /// A signature presented for verification is not valid base64.
    #[display("Malformed signature: {message}")]
    MalformedSignature { message: String },
}
