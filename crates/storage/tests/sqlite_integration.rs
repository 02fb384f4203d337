use storage::repository::{AVATAR_KEY, KeyValueStore, PROGRESS_KEY};
use storage::sqlite::SqliteRepository;

async fn connect(name: &str) -> SqliteRepository {
    let repo = SqliteRepository::connect(&format!("sqlite:file:{name}?mode=memory&cache=shared"))
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");
    repo
}

#[tokio::test]
async fn sqlite_missing_key_is_none() {
    let repo = connect("memdb_missing").await;
    assert!(repo.get(PROGRESS_KEY).await.unwrap().is_none());
}

#[tokio::test]
async fn sqlite_set_overwrites_and_keeps_keys_apart() {
    let repo = connect("memdb_overwrite").await;

    repo.set(PROGRESS_KEY, r#"{"easy-1":{"score":40,"attempted":true}}"#)
        .await
        .unwrap();
    repo.set(PROGRESS_KEY, r#"{"easy-1":{"score":90,"attempted":true}}"#)
        .await
        .unwrap();
    repo.set(AVATAR_KEY, "\"owl\"").await.unwrap();

    let progress = repo.get(PROGRESS_KEY).await.unwrap().unwrap();
    assert!(progress.contains("90"));
    assert_eq!(repo.get(AVATAR_KEY).await.unwrap().as_deref(), Some("\"owl\""));
}

#[tokio::test]
async fn sqlite_migrations_are_idempotent() {
    let repo = connect("memdb_idempotent").await;
    repo.set(AVATAR_KEY, "\"fox\"").await.unwrap();
    repo.migrate().await.expect("second migrate");
    assert_eq!(repo.get(AVATAR_KEY).await.unwrap().as_deref(), Some("\"fox\""));
}
