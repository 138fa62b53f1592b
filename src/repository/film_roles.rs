//! Film roles repository (`film_user` join table)

use sqlx::{Executor, FromRow, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{Person, Role, RoleAssociation},
};

/// The CHECK constraint on `film_user.role` keeps unknown labels out
fn stored_role(label: &str) -> AppResult<Role> {
    label
        .parse::<Role>()
        .map_err(|_| AppError::Internal(format!("Unexpected role '{}' in film_user", label)))
}

#[derive(FromRow)]
struct AssociationRow {
    id: i32,
    film_id: i32,
    user_id: i32,
    role: String,
    position: i32,
}

impl TryFrom<AssociationRow> for RoleAssociation {
    type Error = AppError;

    fn try_from(row: AssociationRow) -> Result<Self, Self::Error> {
        Ok(RoleAssociation {
            id: row.id,
            film_id: row.film_id,
            person_id: row.user_id,
            role: stored_role(&row.role)?,
            position: row.position,
        })
    }
}

#[derive(FromRow)]
struct MemberRow {
    user_id: i32,
    full_name: String,
    dob: String,
    role: String,
}

impl TryFrom<MemberRow> for Person {
    type Error = AppError;

    fn try_from(row: MemberRow) -> Result<Self, Self::Error> {
        Ok(Person {
            id: Some(row.user_id),
            name: row.full_name,
            date_of_birth: row.dob,
            role: Some(stored_role(&row.role)?),
        })
    }
}

const MEMBERS_BY_ROLE: &str = r#"
    SELECT u.user_id, u.full_name, u.dob, fu.role
    FROM users u
    JOIN film_user fu ON u.user_id = fu.user_id
    WHERE fu.film_id = $1 AND fu.role = $2
    ORDER BY fu.position, fu.id
"#;

#[derive(Clone, Copy, Debug, Default)]
pub struct FilmRolesRepository;

impl FilmRolesRepository {
    /// Link a person to a film and return the association ID
    pub async fn create<'e, E>(
        &self,
        executor: E,
        film_id: i32,
        person_id: i32,
        role: Role,
        position: i32,
    ) -> AppResult<i32>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO film_user (film_id, user_id, role, position)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(film_id)
        .bind(person_id)
        .bind(role.as_str())
        .bind(position)
        .fetch_one(executor)
        .await?;
        Ok(id)
    }

    /// Find the association between a film and a person, if any
    pub async fn find<'e, E>(
        &self,
        executor: E,
        film_id: i32,
        person_id: i32,
    ) -> AppResult<Option<RoleAssociation>>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, AssociationRow>(
            r#"
            SELECT id, film_id, user_id, role, position
            FROM film_user
            WHERE film_id = $1 AND user_id = $2
            "#,
        )
        .bind(film_id)
        .bind(person_id)
        .fetch_optional(executor)
        .await?
        .map(RoleAssociation::try_from)
        .transpose()
    }

    /// The single person holding `role` in the film (used for the director)
    pub async fn find_by_film_and_role<'e, E>(
        &self,
        executor: E,
        film_id: i32,
        role: Role,
    ) -> AppResult<Person>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let row = sqlx::query_as::<_, MemberRow>(MEMBERS_BY_ROLE)
            .bind(film_id)
            .bind(role.as_str())
            .fetch_optional(executor)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("No {} found for film {}", role, film_id))
            })?;
        Person::try_from(row)
    }

    /// Everyone holding `role` in the film, in billing order
    pub async fn find_all_by_film_and_role<'e, E>(
        &self,
        executor: E,
        film_id: i32,
        role: Role,
    ) -> AppResult<Vec<Person>>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, MemberRow>(MEMBERS_BY_ROLE)
            .bind(film_id)
            .bind(role.as_str())
            .fetch_all(executor)
            .await?
            .into_iter()
            .map(Person::try_from)
            .collect()
    }

    /// Change the role a person holds in a film
    pub async fn update_role<'e, E>(
        &self,
        executor: E,
        film_id: i32,
        person_id: i32,
        role: Role,
    ) -> AppResult<()>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("UPDATE film_user SET role = $1 WHERE film_id = $2 AND user_id = $3")
            .bind(role.as_str())
            .bind(film_id)
            .bind(person_id)
            .execute(executor)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Person {} is not part of film {}",
                person_id, film_id
            )));
        }
        Ok(())
    }

    /// Delete the persons holding `role` in the film.
    ///
    /// Persons who also appear in another film are kept. Association rows of
    /// deleted persons go with them (`ON DELETE CASCADE`).
    pub async fn delete_by_film_and_role<'e, E>(
        &self,
        executor: E,
        film_id: i32,
        role: Role,
    ) -> AppResult<u64>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            r#"
            DELETE FROM users u
            USING film_user fu
            WHERE fu.user_id = u.user_id
              AND fu.film_id = $1
              AND fu.role = $2
              AND NOT EXISTS (
                  SELECT 1 FROM film_user other
                  WHERE other.user_id = u.user_id AND other.film_id <> $1
              )
            "#,
        )
        .bind(film_id)
        .bind(role.as_str())
        .execute(executor)
        .await?;
        Ok(result.rows_affected())
    }

    /// Delete every association row of the film
    pub async fn delete_all_for_film<'e, E>(&self, executor: E, film_id: i32) -> AppResult<u64>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM film_user WHERE film_id = $1")
            .bind(film_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}
