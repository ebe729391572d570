//! Static site builder.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use rayon::prelude::*;
use serde::Serialize;

use before_pages::{routes, PageConfig, Route};

use crate::templates::{scripts_for, Context, NavItem, TemplateEngine};

/// Configuration for building a static site.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Output directory
    pub output_dir: PathBuf,

    /// Base URL for the site
    pub base_url: String,

    /// Site title
    pub title: String,

    /// Client script URL attached to pages that allow it
    pub client_script: Option<String>,

    /// Paths to CSS stylesheets to copy and include
    pub styles: Vec<String>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("dist"),
            base_url: "/".to_string(),
            title: "Before".to_string(),
            client_script: None,
            styles: vec![],
        }
    }
}

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Number of pages generated
    pub pages: usize,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,
}

/// Errors that can occur during build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Failed to read stylesheet {path}: {message}")]
    ReadError { path: String, message: String },

    #[error("Failed to render template: {0}")]
    TemplateError(String),

    #[error("Failed to serialize {0}")]
    SerializeError(String),

    #[error("Failed to write output: {0}")]
    WriteError(String),
}

/// Discovery record for one route, written to `manifest.json`.
#[derive(Debug, Serialize)]
struct ManifestEntry {
    path: &'static str,
    title: &'static str,
    url: String,
    fragment: String,
    config: PageConfig,
}

/// Search index record for one route.
#[derive(Debug, Serialize)]
struct SearchEntry {
    title: &'static str,
    url: String,
    headings: Vec<String>,
    content: String,
}

/// Static site builder.
pub struct StaticBuilder {
    config: BuildConfig,
    routes: Vec<Route>,
    templates: TemplateEngine,
}

impl StaticBuilder {
    /// Create a builder for every known page.
    pub fn new(config: BuildConfig) -> Self {
        Self::with_routes(config, routes())
    }

    /// Create a builder for a specific set of routes.
    pub fn with_routes(config: BuildConfig, routes: Vec<Route>) -> Self {
        Self {
            config,
            routes,
            templates: TemplateEngine::new(),
        }
    }

    /// Build the static site.
    pub async fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();

        fs::create_dir_all(self.config.output_dir.join("fragments"))
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        let styles = self.copy_styles()?;

        let entries: Vec<SearchEntry> = self
            .routes
            .par_iter()
            .map(|route| self.build_page(route, &styles))
            .collect::<Result<_, _>>()?;

        self.generate_manifest()?;
        self.generate_search_index(&entries)?;
        self.generate_sitemap()?;

        let duration = start.elapsed();

        Ok(BuildResult {
            pages: entries.len(),
            duration_ms: duration.as_millis() as u64,
            output_dir: self.config.output_dir.clone(),
        })
    }

    /// Build a single page: its bare fragment and its full document.
    fn build_page(&self, route: &Route, styles: &[String]) -> Result<SearchEntry, BuildError> {
        let node = route.render();
        let fragment = node.to_html();

        let scripts = scripts_for(&route.config, self.config.client_script.as_deref());
        if !route.config.hydrate() {
            tracing::debug!("{}: client script disabled", route.path);
        }

        let context = Context {
            title: route.title.to_string(),
            site_title: self.config.title.clone(),
            content: fragment.clone(),
            nav: self.navigation(route.path),
            base_url: self.config.base_url.clone(),
            scripts,
            styles: styles.to_vec(),
        };

        let html = self
            .templates
            .render_page("page.html", &context)
            .map_err(|e: minijinja::Error| BuildError::TemplateError(e.to_string()))?;

        write(&self.fragment_path(route), &fragment)?;
        write(&self.page_path(route), &html)?;

        Ok(SearchEntry {
            title: route.title,
            url: self.route_url(route),
            headings: node.headings().into_iter().map(|(_, text)| text).collect(),
            content: node.text_content(),
        })
    }

    /// Navigation with `active` marking the current route.
    fn navigation(&self, active: &str) -> Vec<NavItem> {
        self.routes
            .iter()
            .map(|route| NavItem {
                title: route.title.to_string(),
                path: self.route_url(route),
                active: route.path == active,
            })
            .collect()
    }

    fn route_url(&self, route: &Route) -> String {
        format!("{}{}/", self.config.base_url, route.path)
    }

    fn page_path(&self, route: &Route) -> PathBuf {
        self.config.output_dir.join(route.path).join("index.html")
    }

    fn fragment_path(&self, route: &Route) -> PathBuf {
        self.config
            .output_dir
            .join("fragments")
            .join(format!("{}.html", route.path))
    }

    /// Copy configured stylesheets into `assets/` and return their URLs.
    fn copy_styles(&self) -> Result<Vec<String>, BuildError> {
        let mut urls = Vec::new();
        if self.config.styles.is_empty() {
            return Ok(urls);
        }

        let assets_dir = self.config.output_dir.join("assets");
        fs::create_dir_all(&assets_dir).map_err(|e| BuildError::WriteError(e.to_string()))?;

        for style_path in &self.config.styles {
            let source_path = Path::new(style_path);
            if !source_path.exists() {
                tracing::warn!("Stylesheet not found: {}", style_path);
                continue;
            }

            let filename = source_path
                .file_name()
                .and_then(|f| f.to_str())
                .unwrap_or("style.css");
            let content = fs::read_to_string(source_path).map_err(|e| BuildError::ReadError {
                path: style_path.clone(),
                message: e.to_string(),
            })?;
            write(&assets_dir.join(filename), &content)?;
            tracing::info!("Copied stylesheet from {}", style_path);

            urls.push(format!("{}assets/{}", self.config.base_url, filename));
        }

        Ok(urls)
    }

    /// Generate the route manifest hosts use to find pages and their config.
    fn generate_manifest(&self) -> Result<(), BuildError> {
        let manifest: Vec<ManifestEntry> = self
            .routes
            .iter()
            .map(|route| ManifestEntry {
                path: route.path,
                title: route.title,
                url: self.route_url(route),
                fragment: format!("fragments/{}.html", route.path),
                config: route.config,
            })
            .collect();

        let json = serde_json::to_string_pretty(&manifest)
            .map_err(|e| BuildError::SerializeError(format!("manifest: {}", e)))?;

        write(&self.config.output_dir.join("manifest.json"), &json)
    }

    /// Generate search index.
    fn generate_search_index(&self, entries: &[SearchEntry]) -> Result<(), BuildError> {
        let json = serde_json::to_string_pretty(entries)
            .map_err(|e| BuildError::SerializeError(format!("search index: {}", e)))?;

        write(&self.config.output_dir.join("search-index.json"), &json)
    }

    /// Generate sitemap.
    fn generate_sitemap(&self) -> Result<(), BuildError> {
        let urls: Vec<String> = self
            .routes
            .iter()
            .map(|route| format!("  <url>\n    <loc>{}</loc>\n  </url>", self.route_url(route)))
            .collect();

        let sitemap = format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
{}
</urlset>"#,
            urls.join("\n")
        );

        write(&self.config.output_dir.join("sitemap.xml"), &sitemap)?;

        let robots = format!(
            "User-agent: *\nAllow: /\nSitemap: {}sitemap.xml",
            self.config.base_url
        );
        write(&self.config.output_dir.join("robots.txt"), &robots)
    }
}

fn write(path: &Path, contents: &str) -> Result<(), BuildError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| BuildError::WriteError(e.to_string()))?;
    }
    fs::write(path, contents)
        .map_err(|e| BuildError::WriteError(format!("{}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use before_pages::markup::{p, text};
    use before_pages::{Node, Page};
    use tempfile::tempdir;

    struct Interactive;

    impl Page for Interactive {
        const PATH: &'static str = "interactive";
        const TITLE: &'static str = "Interactive";
        const CONFIG: PageConfig = PageConfig {
            disable_client_script: false,
        };

        fn render() -> Node {
            p(vec![text("needs script")])
        }
    }

    fn builder(out: &Path, routes: Vec<Route>) -> StaticBuilder {
        StaticBuilder::with_routes(
            BuildConfig {
                output_dir: out.to_path_buf(),
                client_script: Some("/assets/main.js".to_string()),
                ..Default::default()
            },
            routes,
        )
    }

    #[tokio::test]
    async fn builds_info_page() {
        let temp = tempdir().unwrap();
        let out = temp.path().join("dist");

        let result = builder(&out, routes()).build().await.unwrap();

        assert_eq!(result.pages, 1);
        assert!(out.join("info/index.html").exists());

        let fragment = fs::read_to_string(out.join("fragments/info.html")).unwrap();
        assert_eq!(fragment, before_pages::info::render().to_html());
    }

    #[tokio::test]
    async fn static_pages_get_no_script() {
        let temp = tempdir().unwrap();
        let out = temp.path().join("dist");

        builder(&out, vec![Route::of::<before_pages::info::Info>(), Route::of::<Interactive>()])
            .build()
            .await
            .unwrap();

        let info = fs::read_to_string(out.join("info/index.html")).unwrap();
        assert!(!info.contains("<script"));
        assert!(info.contains("Society for Internet Blaseball Research"));

        let interactive = fs::read_to_string(out.join("interactive/index.html")).unwrap();
        assert!(interactive.contains("<script"));
    }

    #[tokio::test]
    async fn writes_manifest_with_config() {
        let temp = tempdir().unwrap();
        let out = temp.path().join("dist");

        builder(&out, routes()).build().await.unwrap();

        let manifest: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(out.join("manifest.json")).unwrap()).unwrap();
        assert_eq!(manifest[0]["path"], "info");
        assert_eq!(manifest[0]["fragment"], "fragments/info.html");
        assert_eq!(manifest[0]["config"]["disableClientScript"], true);
    }

    #[tokio::test]
    async fn search_index_holds_extracted_text() {
        let temp = tempdir().unwrap();
        let out = temp.path().join("dist");

        builder(&out, routes()).build().await.unwrap();

        let index = fs::read_to_string(out.join("search-index.json")).unwrap();
        assert!(index.contains("before.sibr.dev"));
        assert!(index.contains("Favorite Team"));
        assert!(index.contains("Various tips"));
        assert!(out.join("sitemap.xml").exists());
    }

    #[tokio::test]
    async fn copies_styles() {
        let temp = tempdir().unwrap();
        let out = temp.path().join("dist");
        let css = temp.path().join("site.css");
        fs::write(&css, "body { color: white; }").unwrap();

        let builder = StaticBuilder::with_routes(
            BuildConfig {
                output_dir: out.clone(),
                styles: vec![css.display().to_string(), "missing.css".to_string()],
                ..Default::default()
            },
            routes(),
        );
        builder.build().await.unwrap();

        assert!(out.join("assets/site.css").exists());
        let info = fs::read_to_string(out.join("info/index.html")).unwrap();
        assert!(info.contains("site.css"));
        assert!(!info.contains("missing.css"));
    }
}
