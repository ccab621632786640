//! API Router with Swagger UI

use std::sync::Arc;

use axum::{
    extract::FromRef,
    http::Uri,
    middleware,
    response::IntoResponse,
    routing::{delete, get, patch, post, put, MethodRouter},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{AuthService, GadgetService};
use crate::config::AppConfig;
use crate::domain::{GadgetStatus, RepositoryProvider, UserRole};
use crate::infrastructure::crypto::jwt::{JwtConfig, TokenClaims};
use crate::interfaces::http::common::{ApiError, ErrorBody};
use crate::interfaces::http::middleware::{auth_middleware, require_admin, require_agent};
use crate::interfaces::http::modules::metrics::{
    http_metrics_middleware, prometheus_metrics, MetricsState,
};
use crate::interfaces::http::modules::request_id::request_id_middleware;
use crate::interfaces::http::modules::{auth, gadgets, health};

/// State shared by every API route.
///
/// Handlers extract only the service they need via `FromRef`.
#[derive(Clone)]
pub struct AppState {
    pub gadgets: Arc<GadgetService>,
    pub auth: Arc<AuthService>,
}

impl FromRef<AppState> for Arc<GadgetService> {
    fn from_ref(s: &AppState) -> Self {
        Arc::clone(&s.gadgets)
    }
}

impl FromRef<AppState> for Arc<AuthService> {
    fn from_ref(s: &AppState) -> Self {
        Arc::clone(&s.auth)
    }
}

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT Bearer token from /api/auth/login"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::root,
        health::health_check,
        // Gadgets
        gadgets::list_gadgets,
        gadgets::gadget_stats,
        gadgets::gadget_stats_summary,
        gadgets::get_gadget,
        gadgets::create_gadget,
        gadgets::update_gadget,
        gadgets::delete_gadget,
        gadgets::decommission_gadget,
        // Auth
        auth::login,
        auth::register,
        auth::verify,
        auth::auth_test,
        auth::login_usage,
        auth::register_usage,
    ),
    components(
        schemas(
            ErrorBody,
            GadgetStatus,
            UserRole,
            TokenClaims,
            // Health
            health::HealthResponse,
            health::WelcomeResponse,
            health::EndpointIndex,
            // Gadgets
            gadgets::GadgetDto,
            gadgets::PaginationDto,
            gadgets::GadgetListResponse,
            gadgets::GadgetResponse,
            gadgets::GadgetMessageResponse,
            gadgets::DeletedGadgetDto,
            gadgets::DeleteGadgetResponse,
            gadgets::GadgetStatsResponse,
            gadgets::GadgetStatsSummaryResponse,
            gadgets::CreateGadgetRequest,
            gadgets::UpdateGadgetRequest,
            // Auth
            auth::LoginRequest,
            auth::RegisterRequest,
            auth::UserInfo,
            auth::AuthResponse,
            auth::VerifyResponse,
            auth::AuthTestResponse,
            auth::EndpointUsage,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service root and liveness"),
        (name = "Gadgets", description = "Gadget inventory: CRUD, filtering, statistics, decommission"),
        (name = "Authentication", description = "Login, registration and token verification"),
    ),
    info(
        title = "IMF Gadget API",
        version = "1.0.0",
        description = "REST API for the IMF gadget inventory",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

#[derive(Clone, Copy)]
enum Guard {
    Agent,
    Admin,
}

/// Wrap a method route in token verification followed by a role check.
fn guarded(
    route: MethodRouter<AppState>,
    auth: &Arc<AuthService>,
    guard: Guard,
) -> MethodRouter<AppState> {
    let route = match guard {
        Guard::Agent => route.route_layer(middleware::from_fn(require_agent)),
        Guard::Admin => route.route_layer(middleware::from_fn(require_admin)),
    };
    route.route_layer(middleware::from_fn_with_state(
        Arc::clone(auth),
        auth_middleware,
    ))
}

async fn route_not_found(uri: Uri) -> impl IntoResponse {
    ApiError::route_not_found(uri.path())
}

/// Create the API router with all routes
pub fn create_api_router(
    repos: Arc<dyn RepositoryProvider>,
    jwt_config: JwtConfig,
    app_cfg: &AppConfig,
    prometheus_handle: PrometheusHandle,
) -> Router {
    let state = AppState {
        gadgets: Arc::new(GadgetService::new(repos.gadgets())),
        auth: Arc::new(AuthService::new(
            repos.users(),
            jwt_config,
            app_cfg.security.bcrypt_cost,
        )),
    };

    // ── Gadgets ─────────────────────────────────────────────────
    // Reads are public; writes need an agent, deletes an admin.
    let protect = app_cfg.security.protect_gadget_mutations;
    let write = |route: MethodRouter<AppState>, guard: Guard| {
        if protect {
            guarded(route, &state.auth, guard)
        } else {
            route
        }
    };

    let gadget_routes = Router::new()
        .route(
            "/",
            get(gadgets::list_gadgets).merge(write(post(gadgets::create_gadget), Guard::Agent)),
        )
        .route("/stats", get(gadgets::gadget_stats))
        .route("/stats/summary", get(gadgets::gadget_stats_summary))
        .route(
            "/{id}",
            get(gadgets::get_gadget)
                .merge(write(put(gadgets::update_gadget), Guard::Agent))
                .merge(write(delete(gadgets::delete_gadget), Guard::Admin)),
        )
        .route(
            "/{id}/decommission",
            write(patch(gadgets::decommission_gadget), Guard::Agent),
        );

    // ── Auth ────────────────────────────────────────────────────
    let auth_routes = Router::new()
        .route("/test", get(auth::auth_test))
        .route("/login", get(auth::login_usage).post(auth::login))
        .route("/register", get(auth::register_usage).post(auth::register))
        .route(
            "/verify",
            get(auth::verify).route_layer(middleware::from_fn_with_state(
                Arc::clone(&state.auth),
                auth_middleware,
            )),
        );

    // ── Metrics ─────────────────────────────────────────────────
    let metrics_routes = Router::new()
        .route("/metrics", get(prometheus_metrics))
        .with_state(MetricsState {
            handle: prometheus_handle,
        });

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router
    Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health_check))
        .nest("/api/gadgets", gadget_routes)
        .nest("/api/auth", auth_routes)
        .with_state(state)
        .merge(metrics_routes)
        .merge(swagger_routes)
        .fallback(route_not_found)
        // Middleware
        .route_layer(middleware::from_fn(http_metrics_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_middleware))
}
