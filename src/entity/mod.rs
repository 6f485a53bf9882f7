//! SeaORM entity definitions.

pub mod certificate;
pub mod email_verification;
pub mod note;
pub mod portfolio;
pub mod profile;
pub mod project;
pub mod resume;
pub mod user;
