use actix_web::{HttpResponse, ResponseError};
use sea_orm::{DbErr, RuntimeErr, SqlErr};
use thiserror::Error;

use crate::models::ApiResponse;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] DbErr),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    /// 约束冲突映射为 Conflict:
    /// - 唯一约束 (期次内号码重复 / 彩票已有销售记录 / 邮箱重复)
    /// - 外键约束 (仍被销售记录引用的彩票 / 客户)
    ///
    /// 其它数据库错误原样返回
    pub fn on_constraint_violation(err: DbErr, message: impl Into<String>) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail))
            | Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
                log::debug!("Constraint violated: {detail}");
                AppError::Conflict(message.into())
            }
            _ => AppError::DatabaseError(err),
        }
    }

    /// 锁竞争导致的失败，整笔事务可重试:
    /// - SQLite: SQLITE_BUSY / SQLITE_LOCKED 及其扩展码
    /// - PostgreSQL: serialization_failure (40001) / deadlock_detected (40P01)
    pub fn is_lock_contention(&self) -> bool {
        let AppError::DatabaseError(
            DbErr::Exec(RuntimeErr::SqlxError(sea_orm::SqlxError::Database(e)))
            | DbErr::Query(RuntimeErr::SqlxError(sea_orm::SqlxError::Database(e))),
        ) = self
        else {
            return false;
        };
        matches!(
            e.code().as_deref(),
            Some("5" | "6" | "261" | "262" | "517" | "518" | "773" | "40001" | "40P01")
        )
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Conflict(_) => "CONFLICT",
            AppError::DatabaseError(_) => "DATABASE_ERROR",
            _ => "INTERNAL_ERROR",
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        match self {
            AppError::ValidationError(_) => actix_web::http::StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => actix_web::http::StatusCode::NOT_FOUND,
            AppError::Conflict(_) => actix_web::http::StatusCode::CONFLICT,
            _ => actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            AppError::ValidationError(msg) => {
                log::warn!("Validation error: {msg}");
                msg.clone()
            }
            AppError::NotFound(msg) => msg.clone(),
            AppError::Conflict(msg) => {
                log::warn!("Conflict: {msg}");
                msg.clone()
            }
            AppError::DatabaseError(err) => {
                log::error!("Database error: {err}");
                "Database error".to_string()
            }
            _ => {
                log::error!("Internal error: {self}");
                "Internal server error".to_string()
            }
        };

        HttpResponse::build(self.status_code()).json(ApiResponse::<()>::error(
            self.error_code().to_string(),
            message,
        ))
    }
}
