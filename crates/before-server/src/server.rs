//! HTTP host for Before pages.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use tower_http::services::ServeDir;

use before_pages::{routes, PageConfig, Route};
use before_static::{scripts_for, Context, NavItem, TemplateEngine};

/// Configuration for the host server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Path prefix pages are served under
    pub base_path: String,

    /// Site title
    pub title: String,

    /// Directory served under `<base_path>/assets`
    pub static_dir: Option<PathBuf>,

    /// Client script URL attached to pages that allow it
    pub client_script: Option<String>,

    /// Content-Security-Policy sent with every page
    pub content_security_policy: String,

    /// Open browser on start
    pub open: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            base_path: "/_before".to_string(),
            title: "Before".to_string(),
            static_dir: None,
            client_script: None,
            content_security_policy: DEFAULT_CSP.to_string(),
            open: false,
        }
    }
}

const DEFAULT_CSP: &str = "upgrade-insecure-requests; default-src 'self'; script-src 'self'; \
                           style-src 'self' 'unsafe-inline'; img-src 'self' data:; \
                           object-src 'none'; base-uri 'none';";

/// Errors that can occur with the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Invalid address {0}")]
    AddressError(String),

    #[error("Failed to bind to {0}: {1}")]
    BindError(SocketAddr, String),

    #[error("Failed to render {path}: {message}")]
    RenderError { path: String, message: String },
}

/// A rendered page and how it must be delivered.
#[derive(Debug, Clone)]
pub struct PageResponse {
    /// Complete document
    pub html: String,

    /// Content-Security-Policy header value
    pub content_security_policy: String,

    /// Client script URLs included in the document
    pub scripts: Vec<String>,
}

/// Serves pages, honoring each page's delivery configuration.
pub struct Host {
    config: ServerConfig,
    routes: Vec<Route>,
    templates: TemplateEngine,
}

impl Host {
    /// Create a host for every known page.
    pub fn new(config: ServerConfig) -> Self {
        Self::with_routes(config, routes())
    }

    /// Create a host for a specific set of routes.
    pub fn with_routes(mut config: ServerConfig, routes: Vec<Route>) -> Self {
        config.base_path = normalize_base_path(&config.base_path);
        Self {
            config,
            routes,
            templates: TemplateEngine::new(),
        }
    }

    /// Render the page at `path` (relative to the base path).
    ///
    /// Returns `Ok(None)` when no page is registered there.
    pub fn respond(&self, path: &str) -> Result<Option<PageResponse>, ServerError> {
        let path = path.trim_matches('/');
        let Some(route) = self.routes.iter().find(|r| r.path == path) else {
            return Ok(None);
        };

        let scripts = scripts_for(&route.config, self.config.client_script.as_deref());

        let context = Context {
            title: route.title.to_string(),
            site_title: self.config.title.clone(),
            content: route.render().to_html(),
            nav: self.navigation(route.path),
            base_url: format!("{}/", self.config.base_path),
            scripts: scripts.clone(),
            styles: vec![],
        };

        let html = self
            .templates
            .render_page("page.html", &context)
            .map_err(|e| ServerError::RenderError {
                path: path.to_string(),
                message: e.to_string(),
            })?;

        Ok(Some(PageResponse {
            html,
            content_security_policy: content_security_policy(
                &self.config.content_security_policy,
                &route.config,
            ),
            scripts,
        }))
    }

    fn navigation(&self, active: &str) -> Vec<NavItem> {
        self.routes
            .iter()
            .map(|route| NavItem {
                title: route.title.to_string(),
                path: format!("{}/{}", self.config.base_path, route.path),
                active: route.path == active,
            })
            .collect()
    }

    /// Build the axum router.
    pub fn router(self) -> Router {
        let base = self.config.base_path.clone();
        let static_dir = self.config.static_dir.clone();

        let mut app = Router::new().route(&format!("{}/{{page}}", base), get(page_handler));

        if let Some(dir) = static_dir {
            app = app.nest_service(&format!("{}/assets", base), ServeDir::new(dir));
        }

        app.fallback(not_found).with_state(Arc::new(self))
    }

    /// Start serving.
    pub async fn start(self) -> Result<(), ServerError> {
        let addr: SocketAddr = format!("{}:{}", self.config.host, self.config.port)
            .parse()
            .map_err(|_| {
                ServerError::AddressError(format!("{}:{}", self.config.host, self.config.port))
            })?;
        let open_browser = self.config.open;
        let first_page = self
            .routes
            .first()
            .map(|route| format!("http://{}{}/{}", addr, self.config.base_path, route.path));

        let app = self.router();

        tracing::info!("Serving pages at http://{}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::BindError(addr, e.to_string()))?;

        if let (true, Some(url)) = (open_browser, first_page) {
            let _ = open::that(&url);
        }

        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::BindError(addr, e.to_string()))?;

        Ok(())
    }
}

/// Handler for page routes.
async fn page_handler(State(host): State<Arc<Host>>, Path(page): Path<String>) -> Response {
    match host.respond(&page) {
        Ok(Some(page)) => (
            [(header::CONTENT_SECURITY_POLICY, page.content_security_policy)],
            Html(page.html),
        )
            .into_response(),
        Ok(None) => not_found().await.into_response(),
        Err(e) => {
            tracing::error!("{}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Not found")
}

/// Policy for one page. Pages without client script forbid all scripts.
fn content_security_policy(base: &str, config: &PageConfig) -> String {
    if config.hydrate() {
        return base.to_string();
    }

    let mut directives: Vec<&str> = base
        .split(';')
        .map(str::trim)
        .filter(|d| !d.is_empty() && !d.starts_with("script-src"))
        .collect();
    directives.push("script-src 'none'");

    let mut policy = directives.join("; ");
    policy.push(';');
    policy
}

fn normalize_base_path(path: &str) -> String {
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}
