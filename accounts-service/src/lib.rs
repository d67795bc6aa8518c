use std::sync::Arc;

use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    Router,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse},
    routing::get,
};
use secrecy::ExposeSecret;
use sqlx::{PgPool, postgres::PgPoolOptions};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use accounts_adapters::config::Settings;
use accounts_core::{Principal, TokenService, UserStore};
use accounts_graphql::{AccountsSchema, build_schema};

#[derive(Clone)]
struct AppState {
    schema: AccountsSchema,
    token_service: Arc<dyn TokenService>,
    graphiql: bool,
}

/// Build the service router: the GraphQL endpoint on POST, the
/// interactive explorer on GET when enabled.
pub fn build_router(
    user_store: Arc<dyn UserStore>,
    token_service: Arc<dyn TokenService>,
    graphiql: bool,
) -> Router {
    let schema = build_schema(user_store, token_service.clone());
    let state = AppState {
        schema,
        token_service,
        graphiql,
    };

    Router::new()
        .route("/graphql", get(graphiql_handler).post(graphql_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[tracing::instrument(name = "GraphQL request", skip_all)]
async fn graphql_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    req: GraphQLRequest,
) -> GraphQLResponse {
    let mut request = req.into_inner();

    if let Some(principal) = principal_from_headers(&headers, state.token_service.as_ref()) {
        request = request.data(principal);
    }

    state.schema.execute(request).await.into()
}

async fn graphiql_handler(State(state): State<AppState>) -> impl IntoResponse {
    if !state.graphiql {
        return StatusCode::NOT_FOUND.into_response();
    }
    Html(GraphiQLSource::build().endpoint("/graphql").finish()).into_response()
}

/// Extract and verify the bearer access token, if any. Absent, malformed,
/// or unverifiable headers yield no principal; operations that need one
/// report the authentication failure themselves.
pub fn principal_from_headers(
    headers: &HeaderMap,
    token_service: &dyn TokenService,
) -> Option<Principal> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    let user_id = token_service.verify_access(token).ok()?;
    Some(Principal { user_id })
}

/// Create a PostgreSQL connection pool
pub async fn get_postgres_pool(url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(url)
        .await
}

/// Configure and return a PostgreSQL connection pool
///
/// Creates the pool from the configured database URL and runs all pending
/// migrations.
///
/// # Panics
/// Panics if unable to create the pool or run migrations
pub async fn configure_postgresql(settings: &Settings) -> PgPool {
    let pg_pool = get_postgres_pool(
        settings.database.url.expose_secret(),
        settings.database.max_connections,
    )
    .await
    .expect("Failed to create Postgres connection pool");

    sqlx::migrate!("./migrations")
        .run(&pg_pool)
        .await
        .expect("Failed to run migrations");

    pg_pool
}
