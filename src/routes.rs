// src/routes.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::trace::{DefaultMakeSpan, TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{config::AppState, docs::ApiDoc, handlers, middleware::auth::auth_guard};

pub fn router(app_state: AppState) -> Router {
    // Rotas públicas
    let public_routes = Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/auth", post(handlers::auth::register))
        .route("/token-auth", post(handlers::auth::token_auth));

    // Rotas protegidas: o papel de cada uma é conferido pelo RequirePermission
    let protected_routes = Router::new()
        .route(
            "/company",
            get(handlers::company::get_company).put(handlers::company::update_company),
        )
        .route(
            "/profile",
            get(handlers::profile::get_profile).put(handlers::profile::update_profile),
        )
        .route(
            "/employee",
            get(handlers::employees::list_employees).post(handlers::employees::create_employee),
        )
        .route(
            "/employee_detail/{id}",
            get(handlers::employees::get_employee)
                .put(handlers::employees::update_employee)
                .delete(handlers::employees::delete_employee),
        )
        .route(
            "/office",
            get(handlers::offices::list_offices).post(handlers::offices::create_office),
        )
        .route(
            "/office_detail/{id}",
            get(handlers::offices::get_office)
                .put(handlers::offices::update_office)
                .delete(handlers::offices::delete_office),
        )
        .route("/employee_office/{id}", put(handlers::offices::assign_employee))
        .route("/employee_office_detail", get(handlers::offices::get_own_office))
        .route(
            "/vehicle",
            get(handlers::vehicles::list_vehicles).post(handlers::vehicles::create_vehicle),
        )
        .route(
            "/vehicle_detail/{id}",
            get(handlers::vehicles::get_vehicle)
                .put(handlers::vehicles::update_vehicle)
                .delete(handlers::vehicles::delete_vehicle),
        )
        .route("/vehicle_profile", get(handlers::vehicles::list_own_vehicles))
        .route_layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    Router::new()
        .nest("/api", public_routes.merge(protected_routes))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
        .with_state(app_state)
}
