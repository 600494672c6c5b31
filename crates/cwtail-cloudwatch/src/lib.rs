//! CloudWatch Logs access for cwtail: the paginated-query backend trait,
//! its real AWS implementation, stream directory resolution, and the
//! per-target poll loop.

pub mod backend;
pub mod client;
pub mod directory;
pub mod init;
pub mod tail;

pub use backend::{EventPage, FilterRequest, GroupPage, LogsBackend, StreamPage};
pub use client::CloudWatchBackend;

#[cfg(test)]
pub(crate) mod test_backend;
