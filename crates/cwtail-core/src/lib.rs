//! Core data structures for cwtail: target configuration, record types,
//! the deduplication cache, the shared stream-name set, and the cyclic
//! trigger ring used by the tail scheduler.
//!
//! This crate owns no I/O and no runtime: everything here is plain data
//! behind short exclusive-lock critical sections, so the async crates can
//! share it freely between tasks.

pub mod cache;
pub mod error;
pub mod ring;
pub mod stream_set;
pub mod types;

pub use cache::EventCache;
pub use error::TailError;
pub use ring::Ring;
pub use stream_set::StreamSet;
pub use types::{LogRecord, StreamDescriptor, TailEvent, TailTarget};
