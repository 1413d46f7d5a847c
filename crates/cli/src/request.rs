//! Building requests from command line arguments.

use std::fs::File;
use std::io;
use std::path::Path;

use http::{Method, Request, Uri};
use myra_signature::RequestBody;

use crate::error::CliError;

/// Reads the body from `--data` or `--data-file` (`-` for stdin).
///
/// Files and stdin are handed to the signer as streams and buffered there.
pub fn read_body(data: Option<String>, data_file: Option<&Path>) -> Result<RequestBody, CliError> {
    match (data, data_file) {
        (Some(_), Some(_)) => Err(CliError::Request(
            "--data and --data-file are mutually exclusive".into(),
        )),
        (Some(data), None) => Ok(RequestBody::from(data)),
        (None, Some(path)) if path == Path::new("-") => Ok(RequestBody::stream(io::stdin())),
        (None, Some(path)) => {
            let file = File::open(path)?;
            Ok(RequestBody::stream(file))
        }
        (None, None) => Ok(RequestBody::Empty),
    }
}

/// Resolves an API path such as `/en/rapi/dnsRecords` against the base URL.
/// Absolute URLs are returned unchanged.
pub fn resolve_url(url: &str, base_url: &str) -> String {
    if url.starts_with('/') {
        format!("{}{}", base_url.trim_end_matches('/'), url)
    } else {
        url.to_string()
    }
}

pub fn build_request(
    method: &str,
    url: &str,
    base_url: &str,
    body: RequestBody,
) -> Result<Request<RequestBody>, CliError> {
    let method = Method::from_bytes(method.to_ascii_uppercase().as_bytes())
        .map_err(|e| CliError::Request(format!("Invalid method '{}': {}", method, e)))?;

    let resolved = resolve_url(url, base_url);
    let uri: Uri = resolved
        .parse()
        .map_err(|e| CliError::Request(format!("Invalid URL '{}': {}", resolved, e)))?;

    Request::builder()
        .method(method)
        .uri(uri)
        .body(body)
        .map_err(|e| CliError::Request(format!("Failed to build request: {}", e)))
}
