//! Business logic shared by the HTTP handlers and the CLI tools.

pub mod accounts;
pub mod otp;
pub mod storage;

pub use storage::{MemoryStore, ObjectStore, S3Store, Storage};
