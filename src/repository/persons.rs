//! Persons repository (`users` table)

use sqlx::{Executor, FromRow, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::Person,
};

#[derive(FromRow)]
struct PersonRow {
    user_id: i32,
    full_name: String,
    dob: String,
}

impl From<PersonRow> for Person {
    fn from(row: PersonRow) -> Self {
        Person {
            id: Some(row.user_id),
            name: row.full_name,
            date_of_birth: row.dob,
            role: None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct PersonsRepository;

impl PersonsRepository {
    /// Insert a person and return its ID
    pub async fn create<'e, E>(&self, executor: E, name: &str, date_of_birth: &str) -> AppResult<i32>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let id: i32 = sqlx::query_scalar(
            "INSERT INTO users (full_name, dob) VALUES ($1, $2) RETURNING user_id",
        )
        .bind(name)
        .bind(date_of_birth)
        .fetch_one(executor)
        .await?;
        Ok(id)
    }

    /// Get person by ID
    pub async fn get<'e, E>(&self, executor: E, id: i32) -> AppResult<Person>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, PersonRow>("SELECT user_id, full_name, dob FROM users WHERE user_id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?
            .map(Person::from)
            .ok_or_else(|| AppError::NotFound(format!("Person {} not found", id)))
    }

    /// Update name and date of birth
    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: i32,
        name: &str,
        date_of_birth: &str,
    ) -> AppResult<()>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("UPDATE users SET full_name = $1, dob = $2 WHERE user_id = $3")
            .bind(name)
            .bind(date_of_birth)
            .bind(id)
            .execute(executor)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Person {} not found", id)));
        }
        Ok(())
    }
}
