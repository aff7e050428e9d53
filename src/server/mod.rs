//! HTTP server rendering pages from the content store

mod handlers;

use anyhow::Result;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::config::SiteConfig;
use crate::helpers::DateFormatter;
use crate::image::{CdnImages, ImageResolver};
use crate::store::{ContentStore, Fetcher, StoreError};
use crate::templates::{HeadData, SiteData, TemplateRenderer};
use crate::Kultur;

/// Shared, read-only state for all requests
pub struct AppState {
    pub config: SiteConfig,
    pub fetcher: Fetcher,
    pub images: Arc<dyn ImageResolver>,
    pub templates: TemplateRenderer,
    pub dates: DateFormatter,
    pub site: SiteData,
    pub static_dir: PathBuf,
}

impl AppState {
    pub fn new(
        config: SiteConfig,
        store: Arc<dyn ContentStore>,
        static_dir: PathBuf,
    ) -> Result<Self> {
        let images: Arc<dyn ImageResolver> = Arc::new(CdnImages::from_config(&config.store));
        Ok(Self {
            fetcher: Fetcher::new(store),
            images,
            templates: TemplateRenderer::new()?,
            dates: DateFormatter::new(&config.timezone, &config.locale),
            site: SiteData::from_config(&config),
            static_dir,
            config,
        })
    }

    /// Head data for a page of this site
    pub fn head(
        &self,
        title: &str,
        description: Option<&str>,
        path: &str,
        image: Option<&str>,
        kind: &str,
    ) -> HeadData {
        HeadData::new(&self.config, title, description, path, image, kind)
    }

    /// Turn a handler outcome into a response, rendering error pages
    fn respond(&self, result: Result<Html<String>, AppError>) -> Response {
        match result {
            Ok(page) => page.into_response(),
            Err(err) => self.error_page(err),
        }
    }

    fn error_page(&self, err: AppError) -> Response {
        let status = err.status();
        let (template, title) = match &err {
            AppError::NotFound(_) => ("not_found.html", "Page non trouvée"),
            AppError::Store(e) => {
                tracing::error!("Content store failure: {}", e);
                ("error.html", "Erreur")
            }
            AppError::Template(e) => {
                tracing::error!("Template failure: {:?}", e);
                ("error.html", "Erreur")
            }
        };

        let head = self.head(title, None, "/", None, "website");
        match self
            .templates
            .render_page(template, &self.site, &head, "message", &err.to_string())
        {
            Ok(html) => (status, Html(html)).into_response(),
            Err(e) => {
                tracing::error!("Failed to render {}: {:?}", template, e);
                err.into_response()
            }
        }
    }
}

/// Why a page could not be served
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("Content store error: {0}")]
    Store(#[from] StoreError),

    #[error("Template error: {0}")]
    Template(#[from] tera::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Store(_) | AppError::Template(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Plain-text response, used when the error page itself cannot be rendered
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}

/// Build the application router
pub fn router(state: Arc<AppState>) -> Router {
    let static_files = ServeDir::new(&state.static_dir);
    let root = state.config.root.trim_end_matches('/').to_string();

    let app = Router::new()
        .route("/", get(handlers::index))
        .route("/blog", get(handlers::index))
        .route("/blog/:slug", get(handlers::show_post))
        .route("/about", get(handlers::about))
        .route("/contact", get(handlers::contact))
        .route("/categories", get(handlers::categories))
        .nest_service("/static", static_files)
        .fallback(handlers::not_found)
        .with_state(state);

    let app = if root.is_empty() {
        app
    } else {
        Router::new().nest(&root, app)
    };

    app.layer(TraceLayer::new_for_http())
}

/// Start the server
pub async fn start(kultur: &Kultur, ip: &str, port: u16) -> Result<()> {
    let store = kultur.store()?;
    let state = Arc::new(AppState::new(
        kultur.config.clone(),
        store,
        kultur.static_dir(),
    )?);
    let app = router(state);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
