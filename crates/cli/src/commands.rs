//! Sign, signing-string and verify commands.

use std::path::Path;

use chrono::DateTime;
use http::header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE, DATE};
use http::Request;
use myra_signature::constants::REQUEST_TYPE_JSON;
use myra_signature::{signing_string, verify_request, Credentials, RequestBody, RequestSigner};
use serde::Serialize;
use validator::Validate;

use crate::error::CliError;
use crate::settings::Settings;
use crate::OutputFormat;

/// Load settings and validate them.
pub(crate) fn load_settings(path: &Path) -> Result<Settings, CliError> {
    let settings = Settings::load(path)
        .map_err(|e| CliError::Config(format!("Failed to load config: {e}")))?;

    settings
        .validate()
        .map_err(|e| CliError::Config(format!("Settings validation failed: {e}")))?;

    log::debug!("Loaded settings from {}: {:?}", path.display(), settings);
    Ok(settings)
}

/// Headers produced by signing a request.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct SignedHeaders {
    #[serde(rename = "Authorization")]
    pub authorization: String,
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Content-Type")]
    pub content_type: String,
}

fn header_string(request: &Request<RequestBody>, name: &http::HeaderName) -> String {
    request
        .headers()
        .get(name)
        .and_then(|h| h.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

/// Signs `request`, at `date` if given or at the current time otherwise.
///
/// A given date must be RFC 3339, as it is sent in the `Date` header.
pub fn sign(
    credentials: Credentials,
    request: &mut Request<RequestBody>,
    date: Option<&str>,
) -> Result<SignedHeaders, CliError> {
    if let Some(date) = date {
        DateTime::parse_from_rfc3339(date)
            .map_err(|e| CliError::Request(format!("Invalid date '{date}': {e}")))?;
    }

    let signer = RequestSigner::with_credentials(credentials, request);
    let request = match date {
        Some(date) => signer.append_at(date)?,
        None => signer.append()?,
    };

    Ok(SignedHeaders {
        authorization: header_string(request, &AUTHORIZATION),
        date: header_string(request, &DATE),
        content_type: header_string(request, &CONTENT_TYPE),
    })
}

pub fn render(headers: &SignedHeaders, format: &OutputFormat) -> Result<String, CliError> {
    match format {
        OutputFormat::Text => Ok(format!(
            "Authorization: {}\nDate: {}\nContent-Type: {}",
            headers.authorization, headers.date, headers.content_type
        )),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(headers)?),
    }
}

/// Canonical string of `body` for the given method, path and date.
pub fn canonical_string(
    method: &str,
    path: &str,
    body: &mut RequestBody,
    date: &str,
) -> Result<String, CliError> {
    let body = body.buffer()?;
    Ok(signing_string(&body, method, path, REQUEST_TYPE_JSON, date))
}

/// Checks an `Authorization` header presented for `request` at `date`.
pub fn verify(
    credentials: &Credentials,
    request: &mut Request<RequestBody>,
    date: &str,
    authorization: &str,
) -> Result<(), CliError> {
    let authorization = HeaderValue::from_str(authorization)
        .map_err(|e| CliError::Request(format!("Invalid Authorization header: {e}")))?;
    let date = HeaderValue::from_str(date)
        .map_err(|e| CliError::Request(format!("Invalid Date header: {e}")))?;

    let headers = request.headers_mut();
    headers.insert(AUTHORIZATION, authorization);
    headers.insert(DATE, date);

    if verify_request(credentials, request)? {
        log::info!("Signature verified for key {}", credentials.api_key());
        Ok(())
    } else {
        Err(CliError::Verification(
            "signature does not match request".into(),
        ))
    }
}
