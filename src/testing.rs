//! 测试辅助: 内存 / 临时文件 SQLite + 迁移

use chrono::NaiveDate;
use sea_orm::DatabaseConnection;
use tempfile::TempDir;

use crate::config::DatabaseConfig;
use crate::database::{create_pool, run_migrations};
use crate::models::{CreateDrawRequest, CustomerRequest};

/// 每个测试独立的内存数据库 (单连接，保证所有查询看到同一个库)
pub async fn setup_db() -> DatabaseConnection {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
    };
    let pool = create_pool(&config)
        .await
        .expect("Failed to connect to in-memory SQLite");
    run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    pool
}

/// 多连接的临时文件数据库，事务之间可以真正并发
///
/// 返回的 TempDir 需与连接池同生命周期
pub async fn setup_file_db(max_connections: u32) -> (DatabaseConnection, TempDir) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = DatabaseConfig {
        url: format!(
            "sqlite://{}?mode=rwc",
            dir.path().join("loteria.db").display()
        ),
        max_connections,
    };
    let pool = create_pool(&config)
        .await
        .expect("Failed to open file-backed SQLite");
    run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    (pool, dir)
}

pub fn draw_request(name: &str) -> CreateDrawRequest {
    CreateDrawRequest {
        name: name.to_string(),
        draw_date: NaiveDate::from_ymd_opt(2025, 12, 24).expect("valid date"),
    }
}

pub fn customer_request(name: &str, email: &str) -> CustomerRequest {
    CustomerRequest {
        name: name.to_string(),
        email: email.to_string(),
    }
}
