//! Render and route listing commands.

use std::io::{self, Write};

use anyhow::{Context, Result};
use before_pages::{find_route, routes, Node, PageConfig};
use serde::Serialize;

/// Print a route's fragment, or its extracted text.
pub fn run(route: &str, text: bool) -> Result<()> {
    let route = find_route(route).with_context(|| format!("No page at route '{}'", route))?;
    let output = render(&route.render(), text);

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", output)?;
    Ok(())
}

fn render(node: &Node, text: bool) -> String {
    if text {
        node.text_content()
    } else {
        node.to_html()
    }
}

#[derive(Serialize)]
struct RouteInfo {
    path: &'static str,
    title: &'static str,
    config: PageConfig,
}

/// Print every route with its delivery configuration.
pub fn list_routes() -> Result<()> {
    let routes: Vec<RouteInfo> = routes()
        .into_iter()
        .map(|route| RouteInfo {
            path: route.path,
            title: route.title,
            config: route.config,
        })
        .collect();

    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &routes)?;
    writeln!(stdout)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_html_or_text() {
        let node = before_pages::info::render();

        let html = render(&node, false);
        assert!(html.starts_with("<div"));

        let text = render(&node, true);
        assert!(!text.contains('<'));
        assert!(text.starts_with("Before is a tool"));
    }

    #[test]
    fn unknown_route_errors() {
        let err = run("missing", false).unwrap_err();
        assert!(err.to_string().contains("missing"));
    }
}
