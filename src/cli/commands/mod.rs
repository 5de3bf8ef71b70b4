//! CLI command implementations

pub mod coordinator;
pub mod lecturer;
pub mod login;
pub mod logout;
pub mod requirements;
pub mod student;
pub mod whoami;
