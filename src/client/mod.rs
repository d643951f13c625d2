//! Client for the external movie database.
//!
//! - [`search`]: [`SearchClient`] with paginated search and detail lookup
//! - [`transport`]: the async HTTP seam and its `reqwest` implementation
//! - [`omdb`]: wire types and response interpretation

pub mod omdb;
pub mod search;
pub mod transport;

pub use search::{SearchClient, DEFAULT_BASE_URL};
pub use transport::{HttpResponse, ReqwestTransport, Transport};
