/// Content type sent with, and folded into the signature of, every request.
pub const REQUEST_TYPE_JSON: &str = "application/json";

/// Scheme of the `Authorization` header.
pub const AUTHORIZATION_SCHEME: &str = "MYRA";

/// Prepended to the secret when keying the date HMAC.
pub const SECRET_KEY_PREFIX: &str = "MYRA";

/// Message signed with the date key to obtain the signing key.
pub const SIGNING_KEY_LABEL: &str = "myra-api-request";

/// Separator between the segments of the signing string.
pub const SIGNING_STRING_SEPARATOR: char = '#';
