pub mod error;
pub mod handlers;
pub mod ical;
pub mod ids;
pub mod models;
pub mod openapi;
pub mod settings;
pub mod store;
pub mod validation;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use handlers::{
    create_booking, create_class, get_class, get_ical, healthz_live, healthz_ready,
    list_class_bookings, list_classes, root,
};
use tower_http::LatencyUnit;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::ical::ICalExporter;
use crate::ids::UuidGenerator;
use crate::openapi::ApiDoc;
use crate::settings::Settings;
use crate::store::BookingStore;

#[derive(Clone)]
pub struct AppState {
    pub settings: Settings,
    pub store: Arc<BookingStore>,
    pub exporter: Arc<ICalExporter>,
}

impl AppState {
    pub fn new(settings: Settings, store: Arc<BookingStore>) -> Self {
        let exporter = Arc::new(ICalExporter::new(settings.calendar_name.clone()));
        Self {
            settings,
            store,
            exporter,
        }
    }
}

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::from_env()?;

    let env_filter = if settings.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .without_time()
        .init();

    let store = Arc::new(BookingStore::new(Arc::new(UuidGenerator)));
    let state = AppState::new(settings, store);
    let port = state.settings.port;

    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Starting Class Booking API on {addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        );

    let enable_swagger = state.settings.enable_swagger;
    let mut router = Router::new()
        .route("/", get(root))
        .route("/healthz/live", get(healthz_live))
        .route("/healthz/ready", get(healthz_ready))
        .route("/classes", post(create_class).get(list_classes))
        .route("/classes.ical", get(get_ical))
        .route("/classes/{id}", get(get_class))
        .route("/classes/{id}/bookings", get(list_class_bookings))
        .route("/bookings", post(create_booking))
        .with_state(state);

    if enable_swagger {
        let openapi = ApiDoc::openapi();
        let swagger = SwaggerUi::new("/docs").url("/openapi.json", openapi);
        router = router.merge(swagger);
    }

    router.layer(trace_layer)
}
