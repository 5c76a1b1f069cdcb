//! # Matcher Module
//!
//! Two-level matching model for the generated router:
//!
//! 1. **Coarse match** - every distinct `(authority, normalized path)` pair gets
//!    a [`MatcherId`]. Templates that differ only in their query string share
//!    one id, so the runtime URI matcher only has to recognise the path shape.
//! 2. **Fine match** - within a [`MatcherBucket`] the templates are ordered by
//!    descending query parameter count. The generated dispatch code walks the
//!    bucket in that order, so `/notes?archived=true` is tried before `/notes`
//!    and a request carrying the query parameter is not swallowed by the less
//!    specific registration.
//!
//! Registering a template that is fully equal (path and query) to one already
//! claimed for the same operation fails with
//! [`ProcessingError::DuplicatePath`](crate::error::ProcessingError::DuplicatePath);
//! the first registration is kept.

mod registry;

pub use registry::{HandlerRef, MatcherBucket, MatcherId, MatcherRegistry, RegisteredTemplate};
