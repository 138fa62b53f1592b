//! Films repository (`film` table)

use sqlx::{Executor, FromRow, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{Film, FilmDetails},
};

#[derive(FromRow)]
struct FilmRow {
    film_id: i32,
    film_name: String,
    release_year: i32,
    genre: String,
}

impl TryFrom<FilmRow> for Film {
    type Error = AppError;

    fn try_from(row: FilmRow) -> Result<Self, Self::Error> {
        let year = u16::try_from(row.release_year).map_err(|_| {
            AppError::Internal(format!(
                "Film {} has an out-of-range release year {}",
                row.film_id, row.release_year
            ))
        })?;
        Ok(Film {
            id: row.film_id,
            name: row.film_name,
            year,
            genre: row.genre,
        })
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct FilmsRepository;

impl FilmsRepository {
    /// Insert a film and return its ID
    pub async fn create<'e, E>(&self, executor: E, data: &FilmDetails) -> AppResult<i32>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO film (film_name, release_year, genre)
            VALUES ($1, $2, $3)
            RETURNING film_id
            "#,
        )
        .bind(&data.name)
        .bind(i32::from(data.year))
        .bind(&data.genre)
        .fetch_one(executor)
        .await?;
        Ok(id)
    }

    /// Get film by ID
    pub async fn get<'e, E>(&self, executor: E, id: i32) -> AppResult<Film>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let row = sqlx::query_as::<_, FilmRow>(
            "SELECT film_id, film_name, release_year, genre FROM film WHERE film_id = $1",
        )
        .bind(id)
        .fetch_optional(executor)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Film {} not found", id)))?;
        Film::try_from(row)
    }

    /// Overwrite name, release year and genre
    pub async fn update<'e, E>(&self, executor: E, id: i32, data: &FilmDetails) -> AppResult<()>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            "UPDATE film SET film_name = $1, release_year = $2, genre = $3 WHERE film_id = $4",
        )
        .bind(&data.name)
        .bind(i32::from(data.year))
        .bind(&data.genre)
        .bind(id)
        .execute(executor)
        .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Film {} not found", id)));
        }
        Ok(())
    }

    /// Delete film
    pub async fn delete<'e, E>(&self, executor: E, id: i32) -> AppResult<()>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM film WHERE film_id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Film {} not found", id)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_conversion_rejects_negative_year() {
        let row = FilmRow {
            film_id: 3,
            film_name: "Following".into(),
            release_year: -1998,
            genre: "Noir".into(),
        };
        assert!(matches!(Film::try_from(row), Err(AppError::Internal(_))));
    }

    #[test]
    fn test_row_conversion() {
        let row = FilmRow {
            film_id: 3,
            film_name: "Following".into(),
            release_year: 1998,
            genre: "Noir".into(),
        };
        let film = Film::try_from(row).unwrap();
        assert_eq!(film.year, 1998);
        assert_eq!(film.name, "Following");
    }
}
