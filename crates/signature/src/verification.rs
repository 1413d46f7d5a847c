//! Verification of signed requests.
//!
//! Recomputes the signature of a request from the shared secret and compares
//! it in constant time with the one the request carries.

use base64::{engine::general_purpose, Engine};
use error_stack::Report;
use hmac::Mac;
use http::header::{AUTHORIZATION, DATE};

use crate::constants::{AUTHORIZATION_SCHEME, REQUEST_TYPE_JSON};
use crate::credentials::Credentials;
use crate::error::SignatureError;
use crate::http_wrapper::SignableRequest;
use crate::signing::{canonical_parts, derive_signing_key, signing_mac, signing_string};

/// Splits `MYRA <api key>:<signature>` into the API key and the signature.
///
/// The scheme is matched case-insensitively. Returns `None` for any other
/// scheme or a malformed value.
#[must_use]
pub fn parse_authorization(header: &str) -> Option<(&str, &str)> {
    let mut parts = header.trim().splitn(2, ' ');
    let scheme = parts.next()?.trim();
    if !scheme.eq_ignore_ascii_case(AUTHORIZATION_SCHEME) {
        return None;
    }

    let (api_key, signature) = parts.next()?.trim().rsplit_once(':')?;
    if signature.is_empty() {
        return None;
    }

    Some((api_key, signature))
}

/// Checks `signature_b64` against the signature of `request` for `date`.
///
/// # Errors
///
/// Returns [`SignatureError::MalformedSignature`] if the signature is not
/// base64, [`SignatureError::BodyRead`] if the body cannot be read, and
/// [`SignatureError::Hmac`] if a keyed hash cannot be initialised.
pub fn verify_signature<R: SignableRequest + ?Sized>(
    secret: &str,
    request: &mut R,
    date: &str,
    signature_b64: &str,
) -> Result<bool, Report<SignatureError>> {
    let signature = general_purpose::STANDARD.decode(signature_b64).map_err(|e| {
        Report::new(SignatureError::MalformedSignature {
            message: format!("Failed to decode signature: {e}"),
        })
    })?;

    let (body, path) = canonical_parts(request)?;
    let signing_key = derive_signing_key(secret, date)?;
    let signing_string = signing_string(
        &body,
        request.method().as_str(),
        &path,
        REQUEST_TYPE_JSON,
        date,
    );

    let mut mac = signing_mac(&signing_key)?;
    mac.update(signing_string.as_bytes());

    Ok(mac.verify_slice(&signature).is_ok())
}

/// Verifies the `Authorization` and `Date` headers of a signed request.
///
/// Returns `Ok(false)` when either header is missing, the API key does not
/// match `credentials`, or the signature does not match.
///
/// # Errors
///
/// Same as [`verify_signature`].
pub fn verify_request<R: SignableRequest + ?Sized>(
    credentials: &Credentials,
    request: &mut R,
) -> Result<bool, Report<SignatureError>> {
    let Some(authorization) = request
        .header(&AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .map(str::to_string)
    else {
        return Ok(false);
    };
    let Some(date) = request
        .header(&DATE)
        .and_then(|h| h.to_str().ok())
        .map(str::to_string)
    else {
        return Ok(false);
    };

    let Some((api_key, signature)) = parse_authorization(&authorization) else {
        return Ok(false);
    };
    if api_key != credentials.api_key() {
        return Ok(false);
    }

    verify_signature(credentials.secret(), request, &date, signature)
}
