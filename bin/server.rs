// Travel Planner - Web Server
// Thin transport over the itinerary store and the report generator.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Json},
    routing::get,
    Router,
};
use rusqlite::Connection;
use serde::Serialize;
use std::sync::{Arc, Mutex};
use tower_http::cors::CorsLayer;
use travel_planner::{
    generate_report, list_itinerary_summaries, ItinerarySummary, ReportError,
};

/// Shared application state
#[derive(Clone)]
struct AppState {
    db: Arc<Mutex<Connection>>,
}

/// API Response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            error: None,
        }
    }
}

impl ApiResponse<()> {
    fn err(message: String) -> Self {
        Self {
            success: false,
            data: (),
            error: Some(message),
        }
    }
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// GET /api/itineraries - List itinerary summaries
async fn get_itineraries(State(state): State<AppState>) -> impl IntoResponse {
    let conn = state.db.lock().unwrap();

    match list_itinerary_summaries(&conn) {
        Ok(summaries) => (StatusCode::OK, Json(ApiResponse::ok(summaries))).into_response(),
        Err(e) => {
            eprintln!("Error listing itineraries: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::ok(Vec::<ItinerarySummary>::new())),
            )
                .into_response()
        }
    }
}

/// GET /api/itineraries/:id/report - Download the itinerary PDF report
async fn get_itinerary_report(
    State(state): State<AppState>,
    Path(itinerary_id): Path<i64>,
) -> impl IntoResponse {
    let conn = state.db.lock().unwrap();

    match generate_report(&conn, itinerary_id) {
        Ok(doc) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, doc.content_type.to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", doc.filename),
                ),
            ],
            doc.bytes,
        )
            .into_response(),
        Err(ReportError::NotFound(id)) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::err(format!("Itinerary {} not found", id))),
        )
            .into_response(),
        Err(ReportError::Render(e)) => {
            eprintln!("Error rendering report for itinerary {}: {:#}", itinerary_id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::err("Report rendering failed".to_string())),
            )
                .into_response()
        }
    }
}

/// GET / - Serve index page
async fn serve_index() -> impl IntoResponse {
    Html("<h1>Travel Planner server</h1>")
}

// ============================================================================
// Main Server
// ============================================================================

#[tokio::main]
async fn main() {
    println!("🌐 Travel Planner - Web Server");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let db_path = std::env::args().nth(1).unwrap_or_else(|| "travel.db".to_string());

    if !std::path::Path::new(&db_path).exists() {
        eprintln!("❌ Database not found: {}", db_path);
        eprintln!("   Run: cargo run seed");
        eprintln!("   to create and seed it first.");
        std::process::exit(1);
    }

    let conn = Connection::open(&db_path).expect("Failed to open database");
    println!("✓ Database opened: {}", db_path);

    let state = AppState {
        db: Arc::new(Mutex::new(conn)),
    };

    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/itineraries", get(get_itineraries))
        .route("/itineraries/:id/report", get(get_itinerary_report))
        .with_state(state);

    let app = Router::new()
        .route("/", get(serve_index))
        .nest("/api", api_routes)
        .layer(CorsLayer::permissive());

    let addr = "0.0.0.0:3000";
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    println!("\n🚀 Server running on http://localhost:3000");
    println!("   Reports: http://localhost:3000/api/itineraries/1/report");
    println!("\n   Press Ctrl+C to stop\n");

    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}
