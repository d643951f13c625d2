//! Domain layer for cinesearch.
//!
//! Core types shared by the client, the session state machine and the
//! presenter, independent of HTTP, storage or terminal concerns.
//!
//! - [`error`]: error taxonomy and result alias
//! - [`query`]: validated search keyword
//! - [`movie`]: search results and title details
//!
//! # Examples
//!
//! ```
//! use cinesearch::domain::{Query, ValidationError};
//!
//! assert_eq!(Query::parse(""), Err(ValidationError::Empty));
//! ```

pub mod error;
pub mod movie;
pub mod query;

pub use error::{CinesearchError, ErrorKind, Result, SearchError, ValidationError};
pub use movie::{DetailRecord, MediaType, PageResult, Rating, ResultItem, PAGE_SIZE};
pub use query::{Query, MIN_QUERY_LEN};
