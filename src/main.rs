use axum::{
    routing::{get, post},
    Router,
};
use dotenvy::dotenv;
use std::env;
use std::net::SocketAddr;
use tokio::signal;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use hopon::database::schema;
use hopon::web::routes::{events, health, me, users};

#[tokio::main]
async fn main() {
    dotenv().ok();

    tracing_subscriber::fmt::init();

    let db_url =
        env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://hopon.db?mode=rwc".to_string());
    info!("Connecting to database: {}", db_url);

    let pool = schema::connect_pool(&db_url)
        .await
        .expect("Could not connect to the database");

    let app = Router::new()
        .route("/health", get(health::health_handler))
        .route("/hello", get(health::hello_handler))
        .route(
            "/events",
            post(events::create_event_handler).get(events::list_events_handler),
        )
        .route("/events/nearby", get(events::nearby_events_handler))
        .route("/events/:event_id", get(events::get_event_handler))
        .route("/events/:event_id/join", post(events::join_event_handler))
        .route("/events/:event_id/leave", post(events::leave_event_handler))
        .route(
            "/events/:event_id/participants",
            get(events::list_participants_handler),
        )
        .route("/users", post(users::create_user_handler))
        .route("/users/nearby", get(users::nearby_users_handler))
        .route("/users/:user_id", get(users::get_user_handler))
        .route(
            "/users/:user_id/follow",
            post(users::follow_user_handler).delete(users::unfollow_user_handler),
        )
        .route("/me/events", get(me::my_events_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::new())
        .with_state(pool);

    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(8000);
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .expect("Invalid host/port");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Could not bind");
    println!("🚀 Server running on http://{}", listener.local_addr().unwrap());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
