//! Static site generator for Before pages.
//!
//! Renders every known route to a full document and a bare fragment, plus a
//! manifest that records each route's delivery configuration.

pub mod builder;
pub mod templates;

pub use builder::{BuildConfig, BuildError, BuildResult, StaticBuilder};
pub use templates::{scripts_for, Context, NavItem, TemplateEngine};
