//! Movie API endpoints

use axum::{extract::State, http::StatusCode, Json};

use crate::{
    error::AppResult,
    models::{FilmDetails, FilmView, Person},
    AppState,
};

use super::{ApiJson, ApiPath};

/// Create a movie with its director and cast
#[utoipa::path(
    post,
    path = "/movie/",
    tag = "movies",
    request_body = FilmView,
    responses(
        (status = 200, description = "Movie created, returns its ID", body = i32),
        (status = 400, description = "Malformed or invalid movie", body = crate::error::ErrorResponse),
        (status = 500, description = "Storage failure, nothing was written", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_movie(
    State(state): State<AppState>,
    ApiJson(film): ApiJson<FilmView>,
) -> AppResult<Json<i32>> {
    let film_id = state.services.films.create_film(film).await?;
    Ok(Json(film_id))
}

/// Get a movie with its director and cast
#[utoipa::path(
    get,
    path = "/movie/{film_id}",
    tag = "movies",
    params(("film_id" = i32, Path, description = "Film ID")),
    responses(
        (status = 200, description = "Movie details", body = FilmView),
        (status = 404, description = "Movie or its director not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_movie(
    State(state): State<AppState>,
    ApiPath(film_id): ApiPath<i32>,
) -> AppResult<Json<FilmView>> {
    let film = state.services.films.get_film(film_id).await?;
    Ok(Json(film))
}

/// Delete a movie, its cast links and the people only it references
#[utoipa::path(
    delete,
    path = "/movie/{film_id}",
    tag = "movies",
    params(("film_id" = i32, Path, description = "Film ID")),
    responses(
        (status = 200, description = "Movie deleted, returns its ID", body = i32),
        (status = 404, description = "Movie not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_movie(
    State(state): State<AppState>,
    ApiPath(film_id): ApiPath<i32>,
) -> AppResult<Json<i32>> {
    let film_id = state.services.films.delete_film(film_id).await?;
    Ok(Json(film_id))
}

/// Update a movie's name, year and genre
#[utoipa::path(
    put,
    path = "/movie/{film_id}",
    tag = "movies",
    params(("film_id" = i32, Path, description = "Film ID")),
    request_body = FilmDetails,
    responses(
        (status = 200, description = "Movie updated"),
        (status = 404, description = "Movie not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_movie(
    State(state): State<AppState>,
    ApiPath(film_id): ApiPath<i32>,
    ApiJson(details): ApiJson<FilmDetails>,
) -> AppResult<StatusCode> {
    state.services.films.update_film(film_id, details).await?;
    Ok(StatusCode::OK)
}

/// Get a person with the role they hold in a movie
#[utoipa::path(
    get,
    path = "/movie/{film_id}/{user_id}",
    tag = "movies",
    params(
        ("film_id" = i32, Path, description = "Film ID"),
        ("user_id" = i32, Path, description = "Person ID")
    ),
    responses(
        (status = 200, description = "Person details", body = Person),
        (status = 404, description = "Person is not part of the movie", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_movie_person(
    State(state): State<AppState>,
    ApiPath((film_id, user_id)): ApiPath<(i32, i32)>,
) -> AppResult<Json<Person>> {
    let person = state.services.films.get_person_in_film(film_id, user_id).await?;
    Ok(Json(person))
}

/// Update a person's data and role in a movie
#[utoipa::path(
    put,
    path = "/movie/{film_id}/{user_id}",
    tag = "movies",
    params(
        ("film_id" = i32, Path, description = "Film ID"),
        ("user_id" = i32, Path, description = "Person ID")
    ),
    request_body = Person,
    responses(
        (status = 200, description = "Person updated"),
        (status = 400, description = "Invalid person or role change", body = crate::error::ErrorResponse),
        (status = 404, description = "Person is not part of the movie", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_movie_person(
    State(state): State<AppState>,
    ApiPath((film_id, user_id)): ApiPath<(i32, i32)>,
    ApiJson(person): ApiJson<Person>,
) -> AppResult<StatusCode> {
    state
        .services
        .films
        .update_person_in_film(film_id, user_id, person)
        .await?;
    Ok(StatusCode::OK)
}
