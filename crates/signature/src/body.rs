//! Request bodies that can be read for signing and read again afterwards.
//!
//! A body backed by a one-shot reader is drained on the first
//! [`RequestBody::buffer`] call and replaced by the bytes it produced, so the
//! transport that eventually sends the request sees the same payload the
//! signer hashed.

use std::fmt;
use std::io::{self, Cursor, Read};

use bytes::Bytes;

#[derive(Default)]
pub enum RequestBody {
    #[default]
    Empty,
    Bytes(Bytes),
    Stream(Box<dyn Read + Send>),
}

impl RequestBody {
    /// Wraps a reader that can only be consumed once.
    pub fn stream(reader: impl Read + Send + 'static) -> Self {
        RequestBody::Stream(Box::new(reader))
    }

    /// Returns the full body, draining a stream into memory on first use.
    ///
    /// After a successful call the body is always [`RequestBody::Empty`] or
    /// [`RequestBody::Bytes`].
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if a stream cannot be read to the end.
    /// The stream is left in place, partially consumed.
    pub fn buffer(&mut self) -> io::Result<Bytes> {
        match self {
            RequestBody::Empty => Ok(Bytes::new()),
            RequestBody::Bytes(bytes) => Ok(bytes.clone()),
            RequestBody::Stream(reader) => {
                let mut buf = Vec::new();
                reader.read_to_end(&mut buf)?;
                let bytes = Bytes::from(buf);
                *self = RequestBody::Bytes(bytes.clone());
                Ok(bytes)
            }
        }
    }

    /// Returns a fresh reader over the whole body.
    ///
    /// # Errors
    ///
    /// Same as [`RequestBody::buffer`].
    pub fn reader(&mut self) -> io::Result<Cursor<Bytes>> {
        self.buffer().map(Cursor::new)
    }

    /// Buffered bytes, or `None` for an unread stream.
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            RequestBody::Empty => Some(&[][..]),
            RequestBody::Bytes(bytes) => Some(&bytes[..]),
            RequestBody::Stream(_) => None,
        }
    }

    /// `true` when the body is known to be empty. An unread stream is never
    /// reported as empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_some_and(<[u8]>::is_empty)
    }
}

impl fmt::Debug for RequestBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestBody::Empty => f.write_str("Empty"),
            RequestBody::Bytes(bytes) => f.debug_tuple("Bytes").field(&bytes.len()).finish(),
            RequestBody::Stream(_) => f.write_str("Stream(..)"),
        }
    }
}

impl From<()> for RequestBody {
    fn from((): ()) -> Self {
        RequestBody::Empty
    }
}

impl From<Bytes> for RequestBody {
    fn from(bytes: Bytes) -> Self {
        RequestBody::Bytes(bytes)
    }
}

impl From<Vec<u8>> for RequestBody {
    fn from(bytes: Vec<u8>) -> Self {
        RequestBody::Bytes(Bytes::from(bytes))
    }
}

impl From<String> for RequestBody {
    fn from(body: String) -> Self {
        RequestBody::Bytes(Bytes::from(body))
    }
}

impl From<&'static str> for RequestBody {
    fn from(body: &'static str) -> Self {
        RequestBody::Bytes(Bytes::from_static(body.as_bytes()))
    }
}
