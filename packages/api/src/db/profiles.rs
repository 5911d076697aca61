use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{FromRow, PgConnection, PgPool};

use store::{
    DetailsUpdate, EmployerFields, EmployerProfile, FreelancerFields, FreelancerProfile, Profile,
    ProfileStore, ProfileUpdate, StoreError, UserFields, UserId, UserType,
};

// LIMIT 2 is enough to tell "exactly one" from "more than one".
const SELECT_EMPLOYER: &str = "SELECT a.name, a.location, e.budget::numeric AS budget, e.id
    FROM app_user a
    JOIN employer e ON a.id = e.user_id
    WHERE a.id = $1
    LIMIT 2";

const SELECT_FREELANCER: &str = "SELECT a.name, a.location, f.bio, f.profile_picture
    FROM app_user a
    INNER JOIN freelancer f ON a.id = f.user_id
    WHERE a.id = $1
    LIMIT 2";

const UPDATE_EMPLOYER: &str = "UPDATE employer
    SET budget = $1
    WHERE user_id = $2";

const UPDATE_FREELANCER: &str = "UPDATE freelancer
    SET bio = COALESCE($1, bio), profile_picture = COALESCE($2, profile_picture)
    WHERE user_id = $3";

const UPDATE_USER: &str = "UPDATE app_user
    SET name = COALESCE($1, name), location = COALESCE($2, location)
    WHERE id = $3";

#[derive(FromRow)]
struct EmployerRow {
    name: Option<String>,
    location: Option<String>,
    budget: Option<Decimal>,
    id: i32,
}

#[derive(FromRow)]
struct FreelancerRow {
    name: Option<String>,
    location: Option<String>,
    bio: Option<String>,
    profile_picture: Option<String>,
}

/// Postgres-backed [`ProfileStore`].
#[derive(Debug, Clone)]
pub struct PgProfileStore {
    pool: PgPool,
}

impl PgProfileStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Keep exactly one row, or report why not.
fn single<T>(mut rows: Vec<T>, user_id: UserId, user_type: UserType) -> Result<T, StoreError> {
    match rows.len() {
        0 => Err(StoreError::NotFound { user_id, user_type }),
        1 => Ok(rows.remove(0)),
        n => Err(StoreError::Ambiguous {
            user_id,
            user_type,
            rows: n,
        }),
    }
}

async fn update_employer(
    conn: &mut PgConnection,
    user_id: UserId,
    fields: &EmployerFields,
) -> Result<(), sqlx::Error> {
    let Some(budget) = fields.budget else {
        return Ok(());
    };
    sqlx::query(UPDATE_EMPLOYER)
        .bind(budget.amount())
        .bind(user_id)
        .execute(conn)
        .await?;
    Ok(())
}

async fn update_freelancer(
    conn: &mut PgConnection,
    user_id: UserId,
    fields: &FreelancerFields,
) -> Result<(), sqlx::Error> {
    if fields.is_empty() {
        return Ok(());
    }
    sqlx::query(UPDATE_FREELANCER)
        .bind(fields.bio.as_deref())
        .bind(fields.profile_picture.as_deref())
        .bind(user_id)
        .execute(conn)
        .await?;
    Ok(())
}

async fn update_user(
    conn: &mut PgConnection,
    user_id: UserId,
    fields: &UserFields,
) -> Result<(), sqlx::Error> {
    if fields.is_empty() {
        return Ok(());
    }
    sqlx::query(UPDATE_USER)
        .bind(fields.name.as_deref())
        .bind(fields.location.as_deref())
        .bind(user_id)
        .execute(conn)
        .await?;
    Ok(())
}

#[async_trait]
impl ProfileStore for PgProfileStore {
    async fn read_profile(
        &self,
        user_id: UserId,
        user_type: UserType,
    ) -> Result<Profile, StoreError> {
        match user_type {
            UserType::Employer => {
                let rows: Vec<EmployerRow> = sqlx::query_as(SELECT_EMPLOYER)
                    .bind(user_id)
                    .fetch_all(&self.pool)
                    .await
                    .map_err(StoreError::backend)?;
                let row = single(rows, user_id, user_type)?;
                Ok(Profile::Employer(EmployerProfile {
                    name: row.name,
                    location: row.location,
                    budget: row.budget,
                    employer_id: row.id,
                }))
            }
            UserType::Freelancer => {
                let rows: Vec<FreelancerRow> = sqlx::query_as(SELECT_FREELANCER)
                    .bind(user_id)
                    .fetch_all(&self.pool)
                    .await
                    .map_err(StoreError::backend)?;
                let row = single(rows, user_id, user_type)?;
                Ok(Profile::Freelancer(FreelancerProfile {
                    name: row.name,
                    location: row.location,
                    bio: row.bio,
                    profile_picture: row.profile_picture,
                }))
            }
        }
    }

    async fn write_employer(
        &self,
        user_id: UserId,
        fields: &EmployerFields,
    ) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await.map_err(StoreError::backend)?;
        update_employer(&mut tx, user_id, fields)
            .await
            .map_err(StoreError::backend)?;
        tx.commit().await.map_err(StoreError::backend)
    }

    async fn write_freelancer(
        &self,
        user_id: UserId,
        fields: &FreelancerFields,
    ) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await.map_err(StoreError::backend)?;
        update_freelancer(&mut tx, user_id, fields)
            .await
            .map_err(StoreError::backend)?;
        tx.commit().await.map_err(StoreError::backend)
    }

    async fn write_user(&self, user_id: UserId, fields: &UserFields) -> Result<(), StoreError> {
        let mut conn = self.pool.acquire().await.map_err(StoreError::backend)?;
        update_user(&mut conn, user_id, fields)
            .await
            .map_err(StoreError::backend)
    }

    async fn apply_update(&self, user_id: UserId, update: &ProfileUpdate) -> Result<(), StoreError> {
        // Dropping the transaction on an error path rolls it back
        let mut tx = self.pool.begin().await.map_err(StoreError::backend)?;
        let details = match &update.details {
            DetailsUpdate::Employer(fields) => update_employer(&mut tx, user_id, fields).await,
            DetailsUpdate::Freelancer(fields) => update_freelancer(&mut tx, user_id, fields).await,
        };
        details.map_err(StoreError::backend)?;
        update_user(&mut tx, user_id, &update.user)
            .await
            .map_err(StoreError::backend)?;
        tx.commit().await.map_err(StoreError::backend)?;

        tracing::debug!(user_id, user_type = %update.user_type(), "profile update committed");
        Ok(())
    }
}
