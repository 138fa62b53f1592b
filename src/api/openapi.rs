//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{health, movies};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Movies API",
        version = "0.1.0",
        description = "Films, directors and cast REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Movies
        movies::create_movie,
        movies::get_movie,
        movies::delete_movie,
        movies::update_movie,
        movies::get_movie_person,
        movies::update_movie_person,
    ),
    components(
        schemas(
            crate::models::film::Film,
            crate::models::film::FilmDetails,
            crate::models::film::FilmView,
            crate::models::person::Person,
            crate::models::role::Role,
            health::HealthResponse,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "movies", description = "Films with their director and cast")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
