//! API integration tests.
//!
//! Every test drives the real actix app against a fresh in-memory SQLite
//! database and in-memory file storage.
//!
//! Run with: cargo test --test api

mod test_helpers;

mod test_accounts;
mod test_admin;
mod test_collections;
mod test_singletons;
mod test_storage;
mod test_teacher;
