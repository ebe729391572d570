//! Template engine for wrapping page fragments in a document shell.

use minijinja::{context, Environment};

use before_pages::PageConfig;

/// A navigation item.
#[derive(Debug, Clone, serde::Serialize)]
pub struct NavItem {
    /// Display title
    pub title: String,
    /// URL path
    pub path: String,
    /// Whether this is the active page
    pub active: bool,
}

/// Context for rendering a page template.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Context {
    /// Page title
    pub title: String,
    /// Site title
    pub site_title: String,
    /// Rendered fragment HTML
    pub content: String,
    /// Navigation items
    pub nav: Vec<NavItem>,
    /// Base URL
    pub base_url: String,
    /// Client script URLs. Empty for pages that opt out of client script.
    pub scripts: Vec<String>,
    /// Stylesheet URLs
    pub styles: Vec<String>,
}

/// Template engine using minijinja.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Create a new template engine with the built-in templates.
    pub fn new() -> Self {
        let mut env = Environment::new();

        env.add_template("base.html", BASE_TEMPLATE)
            .expect("Failed to add base template");
        env.add_template("page.html", PAGE_TEMPLATE)
            .expect("Failed to add page template");
        env.add_template("nav.html", NAV_TEMPLATE)
            .expect("Failed to add nav template");

        Self { env }
    }

    /// Render a page using the specified template.
    pub fn render_page(
        &self,
        template: &str,
        context: &Context,
    ) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template(template)?;

        tmpl.render(context! {
            title => &context.title,
            site_title => &context.site_title,
            content => &context.content,
            nav => &context.nav,
            base_url => &context.base_url,
            scripts => &context.scripts,
            styles => &context.styles,
        })
    }
}

/// Client script URLs a page carries. A page that disables client script
/// gets none, whatever the host has configured.
pub fn scripts_for(config: &PageConfig, client_script: Option<&str>) -> Vec<String> {
    match client_script {
        Some(src) if config.hydrate() => vec![src.to_string()],
        _ => vec![],
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

const BASE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{{ title }} - {{ site_title }}</title>
  {% for style in styles %}<link rel="stylesheet" href="{{ style }}">
  {% endfor %}
</head>
<body>
  <nav class="nav">
    {% include "nav.html" %}
  </nav>
  <main class="main">
    {% block content %}{% endblock %}
  </main>
  {% for script in scripts %}<script src="{{ script }}"></script>
  {% endfor %}
</body>
</html>"##;

const PAGE_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
{{ content | safe }}
{% endblock %}"##;

const NAV_TEMPLATE: &str = r##"<a href="{{ base_url }}" class="nav-logo">{{ site_title }}</a>
<ul class="nav-list">
{% for item in nav %}
  <li class="nav-item{% if item.active %} active{% endif %}">
    <a href="{{ item.path }}">{{ item.title }}</a>
  </li>
{% endfor %}
</ul>"##;

#[cfg(test)]
mod tests {
    use super::*;

    fn context(scripts: Vec<String>) -> Context {
        Context {
            title: "Info".to_string(),
            site_title: "Before".to_string(),
            content: "<p>Hello world</p>".to_string(),
            nav: vec![NavItem {
                title: "Info".to_string(),
                path: "/info/".to_string(),
                active: true,
            }],
            base_url: "/".to_string(),
            scripts,
            styles: vec!["/assets/site.css".to_string()],
        }
    }

    #[test]
    fn renders_basic_page() {
        let engine = TemplateEngine::new();

        let html = engine.render_page("page.html", &context(vec![])).unwrap();

        assert!(html.contains("<title>Info - Before</title>"));
        assert!(html.contains("<p>Hello world</p>"));
        assert!(html.contains(r#"<link rel="stylesheet" href="#));
        assert!(html.contains("site.css"));
        assert!(html.contains(r#"<li class="nav-item active">"#));
        assert!(!html.contains("<script"));
    }

    #[test]
    fn includes_scripts_when_given() {
        let engine = TemplateEngine::new();

        let html = engine
            .render_page("page.html", &context(vec!["/assets/main.js".to_string()]))
            .unwrap();

        assert!(html.contains("<script src="));
        assert!(html.contains("main.js\"></script>"));
    }

    #[test]
    fn static_config_drops_scripts() {
        assert!(scripts_for(&PageConfig::STATIC, Some("/main.js")).is_empty());
        assert_eq!(
            scripts_for(&PageConfig::default(), Some("/main.js")),
            vec!["/main.js".to_string()]
        );
        assert!(scripts_for(&PageConfig::default(), None).is_empty());
    }

    #[test]
    fn unknown_template_errors() {
        let engine = TemplateEngine::new();
        assert!(engine.render_page("missing.html", &context(vec![])).is_err());
    }
}
