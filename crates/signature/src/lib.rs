//! Request signing for the MYRA API.
//!
//! Every call against the API carries an `Authorization` header built from a
//! shared secret, an API key and a canonical rendering of the request. This
//! crate builds that header and the `Date`/`Content-Type` headers that go with
//! it.
//!
//! # Modules
//!
//! - [`body`]: Request bodies that survive being read for signing
//! - [`constants`]: Header values and labels of the signing scheme
//! - [`credentials`]: Secret/API key pair
//! - [`error`]: Error types
//! - [`http_wrapper`]: Request abstraction consumed by the signer
//! - [`signing`]: Canonical string, key derivation and the [`RequestSigner`]
//! - [`verification`]: Checking a signed request against a secret
//! - [`test_support`]: Testing fixtures

pub mod body;
pub mod constants;
pub mod credentials;
pub mod error;
pub mod http_wrapper;
pub mod signing;
pub mod verification;

pub use body::RequestBody;
pub use credentials::Credentials;
pub use error::SignatureError;
pub use http_wrapper::SignableRequest;
pub use signing::{signing_string, RequestSigner};
pub use verification::{parse_authorization, verify_request, verify_signature};
