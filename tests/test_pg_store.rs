//! Runs against a real Postgres, set DATABASE_URL and use `cargo test -- --ignored`.

use sqlx::{Pool, Postgres};

use bop_server::{
    auth::user::NewUser,
    db::{PgStore, Store, StoreError},
};

fn new_user(email: &str) -> NewUser {
    NewUser {
        name: "Ana".into(),
        email: email.into(),
        password: "hash".into(),
    }
}

#[sqlx::test]
#[ignore = "needs a Postgres database in DATABASE_URL"]
async fn test_unique_email_is_a_conflict(pool: Pool<Postgres>) {
    let store = PgStore::with_pool(pool.clone());

    let created = store.create_user(&new_user("ana@x.com")).await.unwrap();
    assert_eq!(created.email, "ana@x.com");

    let again = store.create_user(&new_user("ana@x.com")).await;
    assert!(matches!(again, Err(StoreError::Conflict)));

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[sqlx::test]
#[ignore = "needs a Postgres database in DATABASE_URL"]
async fn test_valve_queries(pool: Pool<Postgres>) {
    let bop_id: i32 = sqlx::query_scalar("INSERT INTO bops (name) VALUES ('NS-38') RETURNING id")
        .fetch_one(&pool)
        .await
        .unwrap();
    for acronym in ["VS2", "VS1", "VS1"] {
        sqlx::query("INSERT INTO valves (acronym, bop_id) VALUES ($1, $2)")
            .bind(acronym)
            .bind(bop_id)
            .execute(&pool)
            .await
            .unwrap();
    }

    let store = PgStore::with_pool(pool);

    assert!(store.find_bop(bop_id).await.unwrap().is_some());
    assert!(store.find_bop(bop_id + 1).await.unwrap().is_none());
    assert_eq!(store.list_valves_of_bop(bop_id).await.unwrap().len(), 3);
    assert_eq!(store.list_valve_acronyms().await.unwrap(), vec!["VS1", "VS2"]);
}
