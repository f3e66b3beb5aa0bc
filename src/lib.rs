//! Cookie-borne JWT group access filter for axum.
//!
//! Reads a token from a cookie, decodes its claims without verifying the
//! signature, and lets the request through only when one of the caller's
//! groups is on the configured allow-list.
//!
//! ```ignore
//! use jwt_group_access::{GroupAccess, GroupAccessConfig, middleware};
//!
//! let access = GroupAccess::new("admins-only", GroupAccessConfig {
//!     allow_groups: vec!["admin".into()],
//!     group_property: "groups".into(),
//!     ..GroupAccessConfig::default()
//! });
//! let router = middleware::group_access::apply(router, access);
//! ```
pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;

pub use config::GroupAccessConfig;
pub use error::Rejection;
pub use services::access::{Grant, GroupAccess, Verdict};
