//! Page discovery.
//!
//! Every page implements [`Page`]; hosts never call page modules directly but
//! go through the [`Route`] values returned by [`routes`].

use crate::config::PageConfig;
use crate::info::Info;
use crate::markup::Node;

/// A statically known page.
pub trait Page {
    /// Route path relative to the host's base path, without slashes.
    const PATH: &'static str;

    /// Document title.
    const TITLE: &'static str;

    /// Delivery configuration read by the host.
    const CONFIG: PageConfig;

    /// Build the page content. Must be pure: every call returns an equal tree.
    fn render() -> Node;
}

/// A page as seen by a host.
#[derive(Debug, Clone, Copy)]
pub struct Route {
    pub path: &'static str,
    pub title: &'static str,
    pub config: PageConfig,
    render: fn() -> Node,
}

impl Route {
    /// Describe a page type as a route.
    pub fn of<P: Page>() -> Self {
        Self {
            path: P::PATH,
            title: P::TITLE,
            config: P::CONFIG,
            render: P::render,
        }
    }

    /// Render the page content.
    pub fn render(&self) -> Node {
        (self.render)()
    }
}

/// All pages, in navigation order.
pub fn routes() -> Vec<Route> {
    vec![Route::of::<Info>()]
}

/// Look up a route by path. Leading and trailing slashes are ignored.
pub fn find_route(path: &str) -> Option<Route> {
    let path = path.trim_matches('/');
    routes().into_iter().find(|route| route.path == path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_info_route() {
        let route = find_route("/info/").unwrap();
        assert_eq!(route.path, "info");
        assert_eq!(route.config, Info::CONFIG);
    }

    #[test]
    fn unknown_route_is_none() {
        assert!(find_route("credits").is_none());
        assert!(find_route("").is_none());
    }

    #[test]
    fn route_renders_its_page() {
        let route = Route::of::<Info>();
        assert_eq!(route.render(), Info::render());
    }

    #[test]
    fn route_paths_are_unique() {
        let routes = routes();
        for (i, route) in routes.iter().enumerate() {
            assert!(routes[i + 1..].iter().all(|r| r.path != route.path));
        }
    }
}
