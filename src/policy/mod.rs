//! Cache replacement policies.

pub mod slru;

pub use slru::SlruCache;
