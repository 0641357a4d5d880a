//! Report dashboard server
//!
//! Static file server over the cucumber report directory.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │              Dashboard (port 5500)            │
//! │                                              │
//! │   /            → advanced-dashboard-v2.html  │
//! │   /<path>      → <report_dir>/<path>         │
//! │   missing      → 404 File not found          │
//! │   unreadable   → 500 Server Error: <CODE>    │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! When the port is taken the next one is tried, up to [`MAX_PORT_ATTEMPTS`].

use crate::error::{CliError, CliResult};
use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::io;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

/// First port tried
pub const DEFAULT_PORT: u16 = 5500;

/// Page served at `/`
pub const DASHBOARD_PAGE: &str = "advanced-dashboard-v2.html";

/// Ports tried before giving up
pub const MAX_PORT_ATTEMPTS: u16 = 20;

/// Dashboard server configuration
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Directory to serve
    pub directory: PathBuf,
    /// Interface to listen on
    pub host: IpAddr,
    /// First port tried
    pub port: u16,
    /// Open the default browser once bound
    pub open_browser: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(crmwright::DEFAULT_REPORT_DIR),
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            open_browser: true,
        }
    }
}

impl DashboardConfig {
    /// Set directory to serve
    #[must_use]
    pub fn with_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.directory = dir.into();
        self
    }

    /// Set listen interface
    #[must_use]
    pub const fn with_host(mut self, host: IpAddr) -> Self {
        self.host = host;
        self
    }

    /// Set first port
    #[must_use]
    pub const fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Enable or disable opening the browser
    #[must_use]
    pub const fn with_open_browser(mut self, open: bool) -> Self {
        self.open_browser = open;
        self
    }
}

/// Report dashboard server
#[derive(Debug)]
pub struct Dashboard {
    config: DashboardConfig,
}

impl Dashboard {
    /// Create a new dashboard server
    #[must_use]
    pub const fn new(config: DashboardConfig) -> Self {
        Self { config }
    }

    /// Configuration in use
    #[must_use]
    pub const fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Router serving the report directory
    pub fn router(&self) -> Router {
        let directory = Arc::new(self.config.directory.clone());

        Router::new()
            .route(
                "/",
                get({
                    let dir = directory.clone();
                    move || serve_index(dir.clone())
                }),
            )
            .fallback({
                let dir = directory.clone();
                move |uri: axum::http::Uri| serve_static(dir.clone(), uri)
            })
            .layer(SetResponseHeaderLayer::overriding(
                header::CACHE_CONTROL,
                header::HeaderValue::from_static("no-cache"),
            ))
            .layer(TraceLayer::new_for_http())
    }

    /// Bind, optionally open the browser, then serve until the process exits
    pub async fn run(&self) -> CliResult<()> {
        if !self.config.directory.is_dir() {
            tracing::warn!(
                dir = %self.config.directory.display(),
                "report directory does not exist yet"
            );
        }

        let listener = bind_with_retry(self.config.host, self.config.port, MAX_PORT_ATTEMPTS).await?;
        let port = listener.local_addr()?.port();
        let url = dashboard_url(port);

        println!("╔══════════════════════════════════════════════════════════════╗");
        println!("║                   crmwright Report Dashboard                 ║");
        println!("╠══════════════════════════════════════════════════════════════╣");
        println!("║  URL:       {url:<48.48}║");
        println!(
            "║  Directory: {:<48.48}║",
            self.config.directory.display().to_string()
        );
        println!("╠══════════════════════════════════════════════════════════════╣");
        println!("║  Press Ctrl+C to stop                                        ║");
        println!("╚══════════════════════════════════════════════════════════════╝");

        if self.config.open_browser {
            open_browser(&url);
        }

        axum::serve(listener, self.router())
            .await
            .map_err(|e| CliError::server(e.to_string()))
    }
}

/// URL of the dashboard page on a local port
#[must_use]
pub fn dashboard_url(port: u16) -> String {
    format!("http://localhost:{port}/{DASHBOARD_PAGE}")
}

/// Bind `host:start`, moving to the next port while the address is in use.
///
/// Any bind error other than "address in use" is returned immediately.
pub async fn bind_with_retry(host: IpAddr, start: u16, attempts: u16) -> CliResult<TcpListener> {
    let mut port = start;
    for attempt in 1..=attempts.max(1) {
        match TcpListener::bind(SocketAddr::new(host, port)).await {
            Ok(listener) => {
                tracing::info!(%host, port, "dashboard listening");
                return Ok(listener);
            }
            Err(e) if e.kind() == io::ErrorKind::AddrInUse && attempt < attempts => {
                let Some(next) = port.checked_add(1) else {
                    break;
                };
                tracing::warn!(port, next, "port in use, trying next");
                port = next;
            }
            Err(e) if e.kind() == io::ErrorKind::AddrInUse => break,
            Err(e) => return Err(e.into()),
        }
    }
    Err(CliError::server(format!(
        "no free port in {start}..={port} on {host}"
    )))
}

/// Open the default browser at `url`
pub fn open_browser(url: &str) {
    println!("Opening browser at {url}...");
    #[cfg(target_os = "macos")]
    let _ = std::process::Command::new("open").arg(url).spawn();
    #[cfg(target_os = "linux")]
    let _ = std::process::Command::new("xdg-open").arg(url).spawn();
    #[cfg(target_os = "windows")]
    let _ = std::process::Command::new("cmd")
        .args(["/C", "start", url])
        .spawn();
}

async fn serve_index(directory: Arc<PathBuf>) -> Response {
    serve_file(&directory.join(DASHBOARD_PAGE), Some("text/html")).await
}

async fn serve_static(directory: Arc<PathBuf>, uri: axum::http::Uri) -> Response {
    let path = uri.path().trim_start_matches('/');
    if path.split('/').any(|segment| segment == "..") {
        return not_found();
    }
    serve_file(&directory.join(path), None).await
}

async fn serve_file(path: &Path, content_type: Option<&str>) -> Response {
    let read = match tokio::fs::metadata(path).await {
        Ok(meta) if meta.is_dir() => Err(ReadFailure::Directory),
        Ok(_) => tokio::fs::read(path).await.map_err(ReadFailure::from),
        Err(e) => Err(e.into()),
    };

    match read {
        Ok(contents) => {
            let mime_type = content_type.map_or_else(|| get_mime_type(path), str::to_string);
            Response::builder()
                .status(StatusCode::OK)
                .header(header::CONTENT_TYPE, mime_type)
                .body(axum::body::Body::from(contents))
                .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
        }
        Err(ReadFailure::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "not found");
            not_found()
        }
        Err(failure) => {
            let code = failure.code();
            tracing::warn!(path = %path.display(), code, "cannot read file");
            (StatusCode::INTERNAL_SERVER_ERROR, format!("Server Error: {code}")).into_response()
        }
    }
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "File not found").into_response()
}

#[derive(Debug)]
enum ReadFailure {
    Directory,
    Io(io::Error),
}

impl From<io::Error> for ReadFailure {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl ReadFailure {
    /// POSIX-style error code for the response body
    fn code(&self) -> &'static str {
        match self {
            Self::Directory => "EISDIR",
            Self::Io(e) => match e.kind() {
                io::ErrorKind::NotFound => "ENOENT",
                io::ErrorKind::PermissionDenied => "EACCES",
                io::ErrorKind::InvalidInput => "EINVAL",
                io::ErrorKind::OutOfMemory => "ENOMEM",
                _ => "EIO",
            },
        }
    }
}

/// Get MIME type for a file path
#[must_use]
pub fn get_mime_type(path: &Path) -> String {
    match path.extension().and_then(|e| e.to_str()) {
        Some("html" | "htm") => "text/html".to_string(),
        Some("js" | "mjs") => "text/javascript".to_string(),
        Some("css") => "text/css".to_string(),
        Some("json") => "application/json".to_string(),
        Some("png") => "image/png".to_string(),
        _ => mime_guess::from_path(path)
            .first_or_octet_stream()
            .to_string(),
    }
}
