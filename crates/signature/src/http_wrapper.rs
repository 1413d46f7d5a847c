use std::borrow::Cow;
use std::io;

use bytes::Bytes;
use http::header::{HeaderName, HeaderValue};
use http::{Method, Request, Uri};

use crate::body::RequestBody;

/// The parts of an outbound request the signer reads and writes.
pub trait SignableRequest {
    fn method(&self) -> &Method;

    /// Percent-decoded path.
    fn path(&self) -> Cow<'_, str>;

    /// Raw query string without the leading `?`.
    fn query(&self) -> Option<&str>;

    fn header(&self, name: &HeaderName) -> Option<&HeaderValue>;

    /// Returns the whole body while leaving it readable for the transport.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the body cannot be read to the end.
    fn buffer_body(&mut self) -> io::Result<Bytes>;

    /// Sets a header, replacing any previous values.
    fn set_header(&mut self, name: HeaderName, value: HeaderValue);
}

impl SignableRequest for Request<RequestBody> {
    #[inline(always)]
    fn method(&self) -> &Method {
        Request::method(self)
    }

    #[inline(always)]
    fn path(&self) -> Cow<'_, str> {
        decoded_path(self.uri())
    }

    #[inline(always)]
    fn query(&self) -> Option<&str> {
        self.uri().query()
    }

    #[inline(always)]
    fn header(&self, name: &HeaderName) -> Option<&HeaderValue> {
        self.headers().get(name)
    }

    fn buffer_body(&mut self) -> io::Result<Bytes> {
        self.body_mut().buffer()
    }

    #[inline(always)]
    fn set_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.headers_mut().insert(name, value);
    }
}

impl SignableRequest for Request<Bytes> {
    #[inline(always)]
    fn method(&self) -> &Method {
        Request::method(self)
    }

    #[inline(always)]
    fn path(&self) -> Cow<'_, str> {
        decoded_path(self.uri())
    }

    #[inline(always)]
    fn query(&self) -> Option<&str> {
        self.uri().query()
    }

    #[inline(always)]
    fn header(&self, name: &HeaderName) -> Option<&HeaderValue> {
        self.headers().get(name)
    }

    fn buffer_body(&mut self) -> io::Result<Bytes> {
        Ok(self.body().clone())
    }

    #[inline(always)]
    fn set_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.headers_mut().insert(name, value);
    }
}

/// Decodes the path of `uri`. The query is left alone.
///
/// `http` reports a missing path as `/`, so the raw path is read from the
/// path-and-query text, where `https://host?page=1` starts with the `?`.
/// A path that does not decode to UTF-8 is used as sent.
fn decoded_path(uri: &Uri) -> Cow<'_, str> {
    let raw = uri.path_and_query().map_or("", |pq| pq.as_str());
    let raw = raw.split_once('?').map_or(raw, |(path, _)| path);
    urlencoding::decode(raw).unwrap_or(Cow::Borrowed(raw))
}

/// Path as it enters the signing string: `path` or `path?query`.
pub fn path_and_query<R: SignableRequest + ?Sized>(request: &R) -> String {
    match request.query() {
        Some(query) if !query.is_empty() => format!("{}?{}", request.path(), query),
        _ => request.path().into_owned(),
    }
}
