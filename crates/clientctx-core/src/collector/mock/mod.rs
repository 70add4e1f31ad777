//! Test doubles for collectors: an in-memory filesystem and canned platforms.

mod filesystem;
mod scenarios;

pub use filesystem::MockFs;
