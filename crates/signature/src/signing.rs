//! Signing of MYRA API requests.
//!
//! A request is signed in three steps:
//!
//! 1. The secret is turned into a signing key scoped to the request date:
//!    `hex(HMAC-SHA256("MYRA" + secret, date))` keys
//!    `hex(HMAC-SHA256(date_key, "myra-api-request"))`.
//! 2. The request is rendered into the signing string
//!    `md5(body)#METHOD#path?query#application/json#date`.
//! 3. The signing string is signed with `HMAC-SHA512(signing_key, ..)` and
//!    sent base64 encoded as `Authorization: MYRA <api key>:<signature>`.

use base64::{engine::general_purpose, Engine};
use bytes::Bytes;
use chrono::{SecondsFormat, Utc};
use error_stack::{Report, ResultExt};
use hmac::{Hmac, Mac};
use http::header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE, DATE};
use md5::{Digest, Md5};
use sha2::{Sha256, Sha512};

use crate::constants::{
    AUTHORIZATION_SCHEME, REQUEST_TYPE_JSON, SECRET_KEY_PREFIX, SIGNING_KEY_LABEL,
    SIGNING_STRING_SEPARATOR,
};
use crate::credentials::Credentials;
use crate::error::SignatureError;
use crate::http_wrapper::{path_and_query, SignableRequest};

type HmacSha256 = Hmac<Sha256>;
pub(crate) type HmacSha512 = Hmac<Sha512>;

/// Builds the canonical string that gets signed.
///
/// The method is upper-cased; every other segment is used verbatim.
#[must_use]
pub fn signing_string(
    body: &[u8],
    method: &str,
    path: &str,
    content_type: &str,
    date: &str,
) -> String {
    let sep = SIGNING_STRING_SEPARATOR;
    format!(
        "{}{sep}{}{sep}{}{sep}{}{sep}{}",
        hex::encode(Md5::digest(body)),
        method.to_uppercase(),
        path,
        content_type,
        date,
    )
}

fn hmac_sha256_hex(key: &[u8], message: &[u8]) -> Result<String, Report<SignatureError>> {
    let mut mac = HmacSha256::new_from_slice(key).map_err(|e| {
        Report::new(SignatureError::Hmac {
            message: format!("Failed to key HMAC-SHA256: {e}"),
        })
    })?;
    mac.update(message);
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Derives the hex encoded key that signs requests dated `date`.
///
/// # Errors
///
/// Returns [`SignatureError::Hmac`] if a keyed hash cannot be initialised.
pub fn derive_signing_key(secret: &str, date: &str) -> Result<String, Report<SignatureError>> {
    let date_key = hmac_sha256_hex(
        format!("{SECRET_KEY_PREFIX}{secret}").as_bytes(),
        date.as_bytes(),
    )
    .attach("Failed to derive date key")?;

    hmac_sha256_hex(date_key.as_bytes(), SIGNING_KEY_LABEL.as_bytes())
        .attach("Failed to derive signing key")
}

pub(crate) fn signing_mac(signing_key: &str) -> Result<HmacSha512, Report<SignatureError>> {
    HmacSha512::new_from_slice(signing_key.as_bytes()).map_err(|e| {
        Report::new(SignatureError::Hmac {
            message: format!("Failed to key HMAC-SHA512: {e}"),
        })
    })
}

/// Computes the base64 signature for an already extracted request.
///
/// # Errors
///
/// Returns [`SignatureError::Hmac`] if a keyed hash cannot be initialised.
pub fn compute_signature(
    secret: &str,
    method: &str,
    path: &str,
    body: &[u8],
    date: &str,
) -> Result<String, Report<SignatureError>> {
    let signing_key = derive_signing_key(secret, date)?;
    let signing_string = signing_string(body, method, path, REQUEST_TYPE_JSON, date);
    log::debug!("Signing string: {}", signing_string);

    let mut mac = signing_mac(&signing_key)?;
    mac.update(signing_string.as_bytes());

    Ok(general_purpose::STANDARD.encode(mac.finalize().into_bytes()))
}

/// Reads the body and path of a request the way they are signed.
pub(crate) fn canonical_parts<R: SignableRequest + ?Sized>(
    request: &mut R,
) -> Result<(Bytes, String), Report<SignatureError>> {
    let body = request
        .buffer_body()
        .change_context(SignatureError::BodyRead {
            message: "Failed to buffer request body".into(),
        })?;

    Ok((body, path_and_query(request)))
}

/// Current time as sent in the `Date` header, e.g. `2024-01-15T10:30:00Z`.
#[must_use]
pub fn current_date() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn header_value(name: &str, value: String) -> Result<HeaderValue, Report<SignatureError>> {
    HeaderValue::try_from(value).map_err(|e| {
        Report::new(SignatureError::InvalidHeader {
            message: format!("{name}: {e}"),
        })
    })
}

/// Signs a single request.
///
/// The signer borrows the request exclusively until [`RequestSigner::append`]
/// hands it back with the authentication headers set.
pub struct RequestSigner<'a, R: SignableRequest + ?Sized> {
    credentials: Credentials,
    request: &'a mut R,
}

impl<'a, R: SignableRequest + ?Sized> RequestSigner<'a, R> {
    pub fn new(secret: impl Into<String>, api_key: impl Into<String>, request: &'a mut R) -> Self {
        Self::with_credentials(Credentials::new(secret, api_key), request)
    }

    pub fn with_credentials(credentials: Credentials, request: &'a mut R) -> Self {
        Self {
            credentials,
            request,
        }
    }

    #[must_use]
    pub fn secret(&self) -> &str {
        self.credentials.secret()
    }

    #[must_use]
    pub fn api_key(&self) -> &str {
        self.credentials.api_key()
    }

    #[must_use]
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Returns the signature of the request for `date`, an RFC 3339 string.
    ///
    /// A streamed body is buffered and put back, so the request can still be
    /// sent afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`SignatureError::BodyRead`] if the body cannot be read and
    /// [`SignatureError::Hmac`] if a keyed hash cannot be initialised.
    pub fn signature(&mut self, date: &str) -> Result<String, Report<SignatureError>> {
        let (body, path) = canonical_parts(&mut *self.request)?;

        compute_signature(
            self.credentials.secret(),
            self.request.method().as_str(),
            &path,
            &body,
            date,
        )
    }

    /// Signs the request with the current time and sets the `Authorization`,
    /// `Date` and `Content-Type` headers.
    ///
    /// # Errors
    ///
    /// See [`RequestSigner::append_at`].
    pub fn append(self) -> Result<&'a mut R, Report<SignatureError>> {
        let date = current_date();
        self.append_at(&date)
    }

    /// Signs the request as of `date` and sets the authentication headers.
    ///
    /// Headers are only touched once every value has been computed, so on
    /// error the request headers are unchanged.
    ///
    /// # Errors
    ///
    /// Fails as [`RequestSigner::signature`] does, or with
    /// [`SignatureError::InvalidHeader`] if the API key or date cannot be sent
    /// as a header value.
    pub fn append_at(mut self, date: &str) -> Result<&'a mut R, Report<SignatureError>> {
        let signature = self.signature(date)?;

        let authorization = header_value(
            "Authorization",
            format!(
                "{AUTHORIZATION_SCHEME} {}:{}",
                self.credentials.api_key(),
                signature
            ),
        )?;
        let date = header_value("Date", date.to_string())?;

        self.request.set_header(AUTHORIZATION, authorization);
        self.request.set_header(DATE, date);
        self.request
            .set_header(CONTENT_TYPE, HeaderValue::from_static(REQUEST_TYPE_JSON));

        Ok(self.request)
    }
}
