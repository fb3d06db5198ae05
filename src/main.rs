//! # shorturl - نقطه ورود برنامه
//!
//! ترتیب استارت: `.env` → لاگینگ → تنظیمات → دیتابیس و migration → سرور.
//! خطای اتصال به دیتابیس در استارت کشنده‌ست و برنامه با کد غیر صفر خارج میشه.

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use shorturl::{
    api::create_router,
    config::{Config, Environment},
    database::Database,
    error::{AppError, Result},
    services::AppState,
};

#[tokio::main]
async fn main() -> Result<()> {
    // نبودن فایل .env اوکیه
    dotenvy::dotenv().ok();

    // محیط رو قبل از Config میخونیم تا فرمت لاگ از همون اول درست باشه
    let environment = std::env::var("ENVIRONMENT")
        .map(Environment::from)
        .unwrap_or_default();
    init_tracing(environment);

    info!("Starting shorturl service...");

    let config = Config::from_env()?;
    info!(
        port = config.port,
        views_dir = %config.views_dir.display(),
        check_reachability = config.check_reachability,
        "Configuration loaded"
    );

    let database = Database::connect(&config.database_url).await?;
    database.migrate().await?;
    info!("Database connected and migrated");

    let addr = config.server_addr();
    let state = AppState::new(database, config)?;
    let app = create_router(state);

    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Server(e.to_string()))?;

    info!("Server stopped");
    Ok(())
}

/// راه‌اندازی سیستم tracing
///
/// `RUST_LOG` اولویت داره. در production خروجی JSON، در بقیه محیط‌ها pretty.
fn init_tracing(environment: Environment) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("shorturl=debug,tower_http=debug"));

    let registry = tracing_subscriber::registry().with(env_filter);

    if environment.is_production() {
        registry
            .with(fmt::layer().json().with_current_span(true))
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .pretty(),
            )
            .init();
    }
}

/// با اولین SIGINT (Ctrl-C) یا SIGTERM برمیگرده
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let sigterm = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let sigterm = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = sigterm => {}
    }

    info!("Shutdown signal received, draining connections");
}
