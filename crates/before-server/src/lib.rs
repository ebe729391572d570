//! HTTP host for Before pages.
//!
//! Looks pages up by route, wraps their markup in the site shell and applies
//! each page's delivery configuration: pages that disable client script are
//! served with no script elements and a policy forbidding scripts.

pub mod server;

pub use server::{Host, PageResponse, ServerConfig, ServerError};
