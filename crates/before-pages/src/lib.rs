//! Static content pages for Before.
//!
//! Each page pairs a [`PageConfig`] the host reads before serving it with a
//! pure render function producing a [`markup::Node`] tree. Hosts discover
//! pages through [`routes`].

pub mod config;
pub mod info;
pub mod markup;
pub mod route;

pub use config::PageConfig;
pub use markup::{HeadingLevel, Link, ListItem, Node};
pub use route::{find_route, routes, Page, Route};
