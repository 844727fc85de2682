use chrono::Utc;
use sqlx::SqlitePool;

const ENROLLMENT_PREFIX: &str = "enrolled_";
const TRUE: &str = "true";

pub fn enrollment_key(course_id: &str) -> String {
    format!("{}{}", ENROLLMENT_PREFIX, course_id)
}

pub async fn get_value(db: &SqlitePool, key: &str) -> Result<Option<String>, sqlx::Error> {
    sqlx::query_scalar::<_, String>("SELECT value FROM client_storage WHERE key = ?1")
        .bind(key)
        .fetch_optional(db)
        .await
}

pub async fn set_value(db: &SqlitePool, key: &str, value: &str) -> Result<(), sqlx::Error> {
    let now = Utc::now().to_rfc3339();

    sqlx::query(
        r#"
        INSERT INTO client_storage (key, value, updated_at)
        VALUES (?1, ?2, ?3)
        ON CONFLICT(key) DO UPDATE SET
            value = excluded.value,
            updated_at = excluded.updated_at
        "#,
    )
    .bind(key)
    .bind(value)
    .bind(now)
    .execute(db)
    .await?;

    Ok(())
}

pub async fn remove_value(db: &SqlitePool, key: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM client_storage WHERE key = ?1")
        .bind(key)
        .execute(db)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn is_enrolled(db: &SqlitePool, course_id: &str) -> Result<bool, sqlx::Error> {
    let value = get_value(db, &enrollment_key(course_id)).await?;
    Ok(value.as_deref() == Some(TRUE))
}

pub async fn set_enrolled(db: &SqlitePool, course_id: &str) -> Result<(), sqlx::Error> {
    set_value(db, &enrollment_key(course_id), TRUE).await
}

pub async fn clear_enrollment(db: &SqlitePool, course_id: &str) -> Result<bool, sqlx::Error> {
    remove_value(db, &enrollment_key(course_id)).await
}

/// Course ids with a stored enrollment flag, oldest first.
pub async fn enrolled_course_ids(db: &SqlitePool) -> Result<Vec<String>, sqlx::Error> {
    let keys = sqlx::query_scalar::<_, String>(
        r#"
        SELECT key FROM client_storage
        WHERE key LIKE 'enrolled\_%' ESCAPE '\' AND value = ?1
        ORDER BY updated_at ASC, key ASC
        "#,
    )
    .bind(TRUE)
    .fetch_all(db)
    .await?;

    Ok(keys
        .into_iter()
        .filter_map(|k| k.strip_prefix(ENROLLMENT_PREFIX).map(str::to_string))
        .collect())
}
