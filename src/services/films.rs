//! Film catalog service
//!
//! Composes the person, film and role stores into the film-level operations.
//! Multi-step writes run in a single transaction: any failing step drops the
//! transaction and nothing is persisted.

use async_trait::async_trait;
use sqlx::PgConnection;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{FilmDetails, FilmView, Person, Role},
    repository::Repository,
};

/// Film-level operations used by the HTTP layer
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FilmCatalog: Send + Sync {
    /// Create a film with its director and cast, returning the film ID
    async fn create_film(&self, film: FilmView) -> AppResult<i32>;

    /// Film with its director and cast
    async fn get_film(&self, film_id: i32) -> AppResult<FilmView>;

    /// Delete a film, its role links and the people only it references
    async fn delete_film(&self, film_id: i32) -> AppResult<i32>;

    /// Overwrite name, year and genre (director and cast are untouched)
    async fn update_film(&self, film_id: i32, details: FilmDetails) -> AppResult<()>;

    async fn get_person_in_film(&self, film_id: i32, person_id: i32) -> AppResult<Person>;

    /// Update a person's data and, optionally, their role in the film
    async fn update_person_in_film(
        &self,
        film_id: i32,
        person_id: i32,
        person: Person,
    ) -> AppResult<()>;
}

/// Reject payloads before any write happens
fn validate_new_film(film: &FilmView) -> AppResult<()> {
    film.validate()?;

    if matches!(film.director.role, Some(role) if role != Role::Director) {
        return Err(AppError::Validation(
            "director must have the Director role".to_string(),
        ));
    }

    for (index, member) in film.cast.iter().enumerate() {
        member
            .validate()
            .map_err(|e| AppError::Validation(format!("cast[{}]: {}", index, e)))?;
        if matches!(member.role, Some(role) if role != Role::Actor) {
            return Err(AppError::Validation(format!(
                "cast[{}]: cast members must have the Actor role",
                index
            )));
        }
    }
    Ok(())
}

/// Role to write for a person currently holding `current`, if any.
///
/// A film keeps exactly one director: promoting an actor hands the part over,
/// and the director can only leave it that way.
fn role_change(current: Role, requested: Option<Role>) -> AppResult<Option<Role>> {
    match requested {
        None => Ok(None),
        Some(role) if role == current => Ok(None),
        Some(Role::Director) => Ok(Some(Role::Director)),
        Some(Role::Actor) => Err(AppError::BadRequest(
            "The director cannot be demoted; promote another cast member instead".to_string(),
        )),
    }
}

fn no_matching_rows(film_id: i32, person_id: i32) -> AppError {
    AppError::NotFound(format!(
        "No matching rows found for person {} in film {}",
        person_id, film_id
    ))
}

#[derive(Clone)]
pub struct FilmService {
    repository: Repository,
}

impl FilmService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Resolve the full film view on one connection. A film without a
    /// director is reported as not found.
    async fn load(&self, conn: &mut PgConnection, film_id: i32) -> AppResult<FilmView> {
        let film = self.repository.films.get(&mut *conn, film_id).await?;
        let director = self
            .repository
            .film_roles
            .find_by_film_and_role(&mut *conn, film_id, Role::Director)
            .await?;
        let cast = self
            .repository
            .film_roles
            .find_all_by_film_and_role(&mut *conn, film_id, Role::Actor)
            .await?;
        Ok(FilmView::assemble(film, director, cast))
    }
}

#[async_trait]
impl FilmCatalog for FilmService {
    async fn create_film(&self, film: FilmView) -> AppResult<i32> {
        validate_new_film(&film)?;

        let mut tx = self.repository.begin().await?;

        let film_id = self.repository.films.create(&mut *tx, &film.details()).await?;

        let director_id = self
            .repository
            .persons
            .create(&mut *tx, &film.director.name, &film.director.date_of_birth)
            .await?;

        let mut cast_ids = Vec::with_capacity(film.cast.len());
        for member in &film.cast {
            let id = self
                .repository
                .persons
                .create(&mut *tx, &member.name, &member.date_of_birth)
                .await?;
            cast_ids.push(id);
        }

        self.repository
            .film_roles
            .create(&mut *tx, film_id, director_id, Role::Director, 0)
            .await?;

        for (position, cast_id) in (1..).zip(cast_ids) {
            self.repository
                .film_roles
                .create(&mut *tx, film_id, cast_id, Role::Actor, position)
                .await?;
        }

        tx.commit().await?;

        tracing::info!(film_id, cast = film.cast.len(), "Film created");
        Ok(film_id)
    }

    async fn get_film(&self, film_id: i32) -> AppResult<FilmView> {
        let mut conn = self.repository.pool.acquire().await?;
        self.load(&mut conn, film_id).await
    }

    async fn delete_film(&self, film_id: i32) -> AppResult<i32> {
        let mut tx = self.repository.begin().await?;

        self.load(&mut tx, film_id).await?;

        let directors = self
            .repository
            .film_roles
            .delete_by_film_and_role(&mut *tx, film_id, Role::Director)
            .await?;
        let actors = self
            .repository
            .film_roles
            .delete_by_film_and_role(&mut *tx, film_id, Role::Actor)
            .await?;
        let links = self
            .repository
            .film_roles
            .delete_all_for_film(&mut *tx, film_id)
            .await?;
        self.repository.films.delete(&mut *tx, film_id).await?;

        tx.commit().await?;

        tracing::info!(
            film_id,
            persons_deleted = directors + actors,
            shared_links_deleted = links,
            "Film deleted"
        );
        Ok(film_id)
    }

    async fn update_film(&self, film_id: i32, details: FilmDetails) -> AppResult<()> {
        details.validate()?;
        self.repository
            .films
            .update(&self.repository.pool, film_id, &details)
            .await?;
        tracing::info!(film_id, "Film updated");
        Ok(())
    }

    async fn get_person_in_film(&self, film_id: i32, person_id: i32) -> AppResult<Person> {
        let mut conn = self.repository.pool.acquire().await?;
        let association = self
            .repository
            .film_roles
            .find(&mut *conn, film_id, person_id)
            .await?
            .ok_or_else(|| no_matching_rows(film_id, person_id))?;
        let person = self.repository.persons.get(&mut *conn, person_id).await?;
        Ok(person.with_role(association.role))
    }

    async fn update_person_in_film(
        &self,
        film_id: i32,
        person_id: i32,
        person: Person,
    ) -> AppResult<()> {
        person.validate()?;

        let mut tx = self.repository.begin().await?;

        let association = self
            .repository
            .film_roles
            .find(&mut *tx, film_id, person_id)
            .await?
            .ok_or_else(|| no_matching_rows(film_id, person_id))?;

        let new_role = role_change(association.role, person.role)?;

        self.repository
            .persons
            .update(&mut *tx, person_id, &person.name, &person.date_of_birth)
            .await?;

        if let Some(role) = new_role {
            if role == Role::Director {
                let directors = self
                    .repository
                    .film_roles
                    .find_all_by_film_and_role(&mut *tx, film_id, Role::Director)
                    .await?;
                for director_id in directors.into_iter().filter_map(|d| d.id) {
                    self.repository
                        .film_roles
                        .update_role(&mut *tx, film_id, director_id, Role::Actor)
                        .await?;
                }
            }
            self.repository
                .film_roles
                .update_role(&mut *tx, film_id, person_id, role)
                .await?;
        }

        tx.commit().await?;

        tracing::info!(film_id, person_id, role = ?new_role, "Person updated in film");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inception() -> FilmView {
        FilmView {
            id: None,
            name: "Inception".into(),
            year: 2010,
            genre: "Sci-Fi".into(),
            director: Person::new("Christopher Nolan", "1970-07-30"),
            cast: vec![
                Person::new("Leonardo DiCaprio", "1974-11-11"),
                Person::new("Elliot Page", "1987-02-21"),
            ],
        }
    }

    #[test]
    fn test_valid_film() {
        assert!(validate_new_film(&inception()).is_ok());

        let mut film = inception();
        film.director.role = Some(Role::Director);
        film.cast[0].role = Some(Role::Actor);
        assert!(validate_new_film(&film).is_ok());
    }

    #[test]
    fn test_empty_film_name() {
        let mut film = inception();
        film.name = String::new();
        assert!(matches!(validate_new_film(&film), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_director_with_actor_role() {
        let mut film = inception();
        film.director.role = Some(Role::Actor);
        assert!(matches!(validate_new_film(&film), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_cast_member_errors_name_their_index() {
        let mut film = inception();
        film.cast[1].name = String::new();
        match validate_new_film(&film) {
            Err(AppError::Validation(msg)) => assert!(msg.starts_with("cast[1]")),
            other => panic!("unexpected result: {:?}", other),
        }

        let mut film = inception();
        film.cast[0].role = Some(Role::Director);
        match validate_new_film(&film) {
            Err(AppError::Validation(msg)) => assert!(msg.starts_with("cast[0]")),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_role_change() {
        assert_eq!(role_change(Role::Actor, None).unwrap(), None);
        assert_eq!(role_change(Role::Actor, Some(Role::Actor)).unwrap(), None);
        assert_eq!(role_change(Role::Director, Some(Role::Director)).unwrap(), None);
        assert_eq!(
            role_change(Role::Actor, Some(Role::Director)).unwrap(),
            Some(Role::Director)
        );
        assert!(matches!(
            role_change(Role::Director, Some(Role::Actor)),
            Err(AppError::BadRequest(_))
        ));
    }
}
