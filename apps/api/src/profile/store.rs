//! Profile persistence — one JSONB document per user, replaced wholesale.
//!
//! Every write stores a complete document computed from the previous value,
//! so readers never observe a partially-updated profile. No row means the
//! user simply has not saved anything yet: loads return the empty default.

use anyhow::{Context, Result};
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use super::models::Profile;

pub async fn load_profile(pool: &PgPool, user_id: Uuid) -> Result<Profile> {
    let row: Option<serde_json::Value> =
        sqlx::query_scalar("SELECT data FROM profiles WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(pool)
            .await?;

    match row {
        Some(data) => serde_json::from_value(data)
            .with_context(|| format!("stored profile for user {user_id} is unreadable")),
        None => Ok(Profile::default()),
    }
}

pub async fn save_profile(pool: &PgPool, user_id: Uuid, profile: &Profile) -> Result<()> {
    let data = serde_json::to_value(profile).context("profile failed to serialize")?;

    sqlx::query(
        r#"
        INSERT INTO profiles (user_id, data, updated_at)
        VALUES ($1, $2, now())
        ON CONFLICT (user_id)
        DO UPDATE SET data = EXCLUDED.data, updated_at = now()
        "#,
    )
    .bind(user_id)
    .bind(data)
    .execute(pool)
    .await?;

    debug!("saved profile for user {user_id}");
    Ok(())
}
