//! HTTP inbound adapter exposing REST endpoints.

pub mod breeds;
pub mod error;
pub mod health;
pub mod pets;
pub mod profile;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

pub use error::{ApiResult, json_config};
