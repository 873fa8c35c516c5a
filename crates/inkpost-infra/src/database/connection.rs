use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DbConn, DbErr};

/// Connect to the database behind `url` (SQLite; `?mode=rwc` creates the
/// file on first boot).
pub async fn connect(url: &str) -> Result<DbConn, DbErr> {
    let opts = ConnectOptions::new(url)
        .max_connections(16)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(300))
        .sqlx_logging(true)
        .to_owned();

    let conn = Database::connect(opts).await?;
    tracing::info!("database connected");
    Ok(conn)
}
