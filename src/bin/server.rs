//! Bunny Dash static file server
//!
//! Serves the page and everything it loads:
//! - `/` the entry document
//! - `/modules/*` the wasm-bindgen output
//! - `/system/*` page scripts
//! - `/disk/*` media assets
//!
//! Anything else is a 404.

#[cfg(not(target_arch = "wasm32"))]
mod server {
    use axum::Router;
    use tower_http::services::{ServeDir, ServeFile};

    use bunny_dash::ServerConfig;

    pub fn router(config: &ServerConfig) -> Router {
        Router::new()
            .route_service("/", ServeFile::new(config.index_file()))
            .nest_service("/modules", ServeDir::new(config.modules_dir()))
            .nest_service("/system", ServeDir::new(config.system_dir()))
            .nest_service("/disk", ServeDir::new(config.disk_dir()))
    }

    pub async fn run() -> anyhow::Result<()> {
        let config = ServerConfig::from_env();
        log::info!("Serving files from {}", config.root.display());

        let app = router(&config);
        let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;
        log::info!("Server running at http://localhost:{}", config.port);
        axum::serve(listener, app).await?;
        Ok(())
    }

}

#[cfg(not(target_arch = "wasm32"))]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    server::run().await
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The server is native only
}
