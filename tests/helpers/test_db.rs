use boardnotify::{Board, Database, Notification};
use std::path::PathBuf;
use uuid::Uuid;

pub struct TestDatabase {
    db: Database,
    path: PathBuf,
}

impl TestDatabase {
    pub fn db(&self) -> &Database {
        &self.db
    }
}

pub async fn setup_test_db() -> TestDatabase {
    // Unique file per test so tests can run in parallel
    let path = std::env::temp_dir().join(format!("boardnotify_test_{}.db", Uuid::new_v4()));
    let db_url = format!("sqlite://{}?mode=rwc", path.display());

    let db = Database::connect(&db_url)
        .await
        .expect("Failed to connect to test database");

    db.run_migrations()
        .await
        .expect("Failed to run migrations");

    seed_test_data(&db).await;

    TestDatabase { db, path }
}

async fn seed_test_data(db: &Database) {
    db.create_board(&Board::new("B1", "Roadmap"))
        .await
        .expect("Failed to seed board B1");
    db.create_board(&Board::new("B2", "Backlog"))
        .await
        .expect("Failed to seed board B2");
}

pub async fn teardown_test_db(test_db: TestDatabase) {
    let TestDatabase { db, path } = test_db;
    db.pool().close().await;

    for suffix in ["", "-wal", "-shm"] {
        let mut file = path.clone().into_os_string();
        file.push(suffix);
        std::fs::remove_file(file).ok();
    }
}

/// Unread notification with a fixed timestamp, ready to hand to the repository.
pub fn notification_at(user_id: &str, message: &str, create_at: i64) -> Notification {
    let mut notification = Notification::new(user_id, message, "tester");
    notification.create_at = create_at;
    notification
}
