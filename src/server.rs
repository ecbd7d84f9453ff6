use crate::app::ports::HttpClientPort;
use crate::config::Config;
use crate::constants::{restaurant, INTERIOR_PAGE_ID};
use crate::content::benefit::static_benefits;
use crate::content::menu::{group_by_category, MenuSection};
use crate::content::{Benefit, Event, InteriorGallery, TeamMember, Vacancy};
use crate::error::{Result, SiteError};
use crate::forms::{BookingForm, CareerForm};
use crate::gateway::ContentGateway;
use crate::infra::http_client::ReqwestHttp;
use crate::loaders::{self, partition_by_type, ProductCarousels};
use crate::submit::{outcome, SubmissionClient, BOOKING_PATH, CAREER_PATH};
use crate::types::SubmitOutcome;
use crate::utils::{format_phone_number, strip_html, truncate_text};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header::CONTENT_TYPE, HeaderValue, Method, Response, StatusCode},
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use chrono::Local;
use hyper::Server;
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info, warn};
use uuid::Uuid;

const PRODUCTS_PER_PAGE: u32 = 100;
const VACANCY_SUMMARY_CHARS: usize = 200;
const INTERNAL_ERROR_MESSAGE: &str = "Что-то пошло не так. Попробуйте обновить страницу.";
const NOT_FOUND_MESSAGE: &str = "Страница не найдена";
const BAD_PAYLOAD_MESSAGE: &str = "Некорректные данные формы";

#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<ContentGateway>,
    pub submissions: Arc<SubmissionClient>,
}

impl AppState {
    pub fn from_config(config: &Config) -> Result<Self> {
        let http: Arc<dyn HttpClientPort> = Arc::new(ReqwestHttp::new(config.cms.timeout())?);
        Ok(Self::with_client(http, config))
    }

    /// Shares one HTTP client between CMS reads and form forwarding.
    pub fn with_client(http: Arc<dyn HttpClientPort>, config: &Config) -> Self {
        Self {
            gateway: Arc::new(ContentGateway::with_client(http.clone(), &config.cms)),
            submissions: Arc::new(SubmissionClient::new(
                http,
                config.server.submission_forward_url.clone(),
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantInfo {
    pub name: &'static str,
    pub tagline: &'static str,
    pub address: &'static str,
    pub phone: String,
    pub email: &'static str,
    pub latitude: f64,
    pub longitude: f64,
    pub working_hours: [&'static str; 3],
    pub instagram: &'static str,
    pub delivery_url: &'static str,
}

impl RestaurantInfo {
    pub fn current() -> Self {
        Self {
            name: restaurant::NAME,
            tagline: restaurant::TAGLINE,
            address: restaurant::ADDRESS,
            phone: format_phone_number(restaurant::PHONE),
            email: restaurant::EMAIL,
            latitude: restaurant::LATITUDE,
            longitude: restaurant::LONGITUDE,
            working_hours: [
                restaurant::HOURS_WEEKDAYS,
                restaurant::HOURS_WEEKEND,
                restaurant::HOURS_SUNDAY,
            ],
            instagram: restaurant::INSTAGRAM,
            delivery_url: restaurant::YANDEX_EDA,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MenuPage {
    pub sections: Vec<MenuSection>,
}

#[derive(Debug, Serialize)]
pub struct EventsPage {
    pub events: Vec<Event>,
}

#[derive(Debug, Serialize)]
pub struct TeamPage {
    pub members: Vec<TeamMember>,
}

#[derive(Debug, Serialize)]
pub struct VacancyCard {
    #[serde(flatten)]
    pub vacancy: Vacancy,
    /// Plain-text teaser of the description
    pub summary: String,
}

#[derive(Debug, Serialize)]
pub struct CareerPage {
    pub vacancies: Vec<VacancyCard>,
    pub benefits: Vec<Benefit>,
}

#[derive(Debug, Serialize)]
pub struct ContactsPage {
    pub restaurant: RestaurantInfo,
    pub interior: InteriorGallery,
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "meatra-site",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn home_page() -> Json<RestaurantInfo> {
    Json(RestaurantInfo::current())
}

async fn booking_page() -> Json<RestaurantInfo> {
    Json(RestaurantInfo::current())
}

async fn menu_page(State(state): State<AppState>) -> Json<ProductCarousels> {
    let products = loaders::products(&state.gateway, None, Some(PRODUCTS_PER_PAGE)).await;
    Json(partition_by_type(products))
}

async fn main_menu_page(State(state): State<AppState>) -> Json<MenuPage> {
    let items = loaders::main_menu(&state.gateway).await;
    Json(MenuPage {
        sections: group_by_category(items),
    })
}

async fn bar_menu_page(State(state): State<AppState>) -> Json<MenuPage> {
    let items = loaders::game_menu(&state.gateway).await;
    Json(MenuPage {
        sections: group_by_category(items),
    })
}

async fn events_page(State(state): State<AppState>) -> Json<EventsPage> {
    Json(EventsPage {
        events: loaders::events(&state.gateway).await,
    })
}

async fn event_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> std::result::Result<Json<Event>, (StatusCode, Json<SubmitOutcome>)> {
    loaders::event_by_slug(&state.gateway, &slug)
        .await
        .map(Json)
        .ok_or_else(|| {
            (
                StatusCode::NOT_FOUND,
                Json(SubmitOutcome::failed(NOT_FOUND_MESSAGE)),
            )
        })
}

async fn team_page(State(state): State<AppState>) -> Json<TeamPage> {
    Json(TeamPage {
        members: loaders::team_members(&state.gateway).await,
    })
}

async fn career_page(State(state): State<AppState>) -> Json<CareerPage> {
    let (vacancies, benefits) = tokio::join!(
        loaders::vacancies(&state.gateway),
        loaders::benefits(&state.gateway)
    );
    let vacancies = vacancies
        .into_iter()
        .map(|vacancy| VacancyCard {
            summary: truncate_text(&strip_html(&vacancy.description), VACANCY_SUMMARY_CHARS),
            vacancy,
        })
        .collect();
    let benefits = if benefits.is_empty() {
        static_benefits()
    } else {
        benefits
    };
    Json(CareerPage {
        vacancies,
        benefits,
    })
}

async fn contacts_page(State(state): State<AppState>) -> Json<ContactsPage> {
    Json(ContactsPage {
        restaurant: RestaurantInfo::current(),
        interior: loaders::interior_images(&state.gateway, INTERIOR_PAGE_ID).await,
    })
}

async fn submit_booking(
    State(state): State<AppState>,
    payload: std::result::Result<Json<BookingForm>, JsonRejection>,
) -> (StatusCode, Json<SubmitOutcome>) {
    let Json(form) = match payload {
        Ok(form) => form,
        Err(rejection) => return bad_payload(rejection),
    };
    let result = state
        .submissions
        .try_submit_booking(&form, Local::now().date_naive())
        .await;
    submission_response(result)
}

async fn submit_career(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CareerForm>, JsonRejection>,
) -> (StatusCode, Json<SubmitOutcome>) {
    let Json(form) = match payload {
        Ok(form) => form,
        Err(rejection) => return bad_payload(rejection),
    };
    submission_response(state.submissions.try_submit_application(&form).await)
}

fn bad_payload(rejection: JsonRejection) -> (StatusCode, Json<SubmitOutcome>) {
    warn!(error = %rejection, "Rejected malformed form payload");
    (
        StatusCode::BAD_REQUEST,
        Json(SubmitOutcome::failed(BAD_PAYLOAD_MESSAGE)),
    )
}

fn submission_response(result: Result<Uuid>) -> (StatusCode, Json<SubmitOutcome>) {
    let status = match &result {
        Ok(_) => StatusCode::OK,
        Err(SiteError::Validation(_)) => StatusCode::BAD_REQUEST,
        Err(_) => StatusCode::BAD_GATEWAY,
    };
    (status, Json(outcome(result)))
}

async fn not_found() -> (StatusCode, Json<SubmitOutcome>) {
    (
        StatusCode::NOT_FOUND,
        Json(SubmitOutcome::failed(NOT_FOUND_MESSAGE)),
    )
}

/// Last-resort answer when a handler panics.
pub fn handle_panic(err: Box<dyn std::any::Any + Send + 'static>) -> Response<String> {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    error!(panic = %detail, "Handler panicked");

    let body = serde_json::to_string(&SubmitOutcome::failed(INTERNAL_ERROR_MESSAGE))
        .unwrap_or_else(|_| String::from("{\"success\":false}"));
    let mut response = Response::new(body);
    *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    response
}

/// Create the HTTP router with page data and form routes
pub fn create_server(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/", get(home_page))
        .route("/menu", get(menu_page))
        .route("/menu/main", get(main_menu_page))
        .route("/menu/bar", get(bar_menu_page))
        .route("/events", get(events_page))
        .route("/events/:slug", get(event_page))
        .route("/team", get(team_page))
        .route("/career", get(career_page))
        .route("/contacts", get(contacts_page))
        .route("/booking", get(booking_page))
        .route(BOOKING_PATH, post(submit_booking))
        .route(CAREER_PATH, post(submit_career))
        .fallback(not_found)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(ServiceBuilder::new().layer(cors))
        .with_state(state)
}

/// Start the HTTP server on the specified port
pub async fn start_server(
    state: AppState,
    port: u16,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let app = create_server(state);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    info!("Site server running on http://localhost:{port}");
    info!("Health check: http://localhost:{port}/health");

    Server::bind(&addr)
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
