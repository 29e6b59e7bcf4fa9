use crate::domain::errors::DomainError;

const CNT_USER_EMAIL: &str = "users_email_key";
const CNT_ARTICLE_QUANTITY: &str = "articles_quantity_non_negative_chk";
const CNT_REQUEST_DECISION: &str = "stock_requests_decision_chk";

pub fn map_sqlx(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) => {
            if let Some(code) = db_err.code() {
                match code.as_ref() {
                    // lock_not_available, serialization_failure, deadlock_detected
                    "55P03" | "40001" | "40P01" => {
                        return DomainError::StorageConflict(db_err.message().to_string());
                    }
                    _ => {}
                }
            }

            if let Some(constraint) = db_err.constraint() {
                return match constraint {
                    CNT_USER_EMAIL => DomainError::Conflict("email already registered".into()),
                    CNT_ARTICLE_QUANTITY => {
                        DomainError::Validation("quantity cannot be negative".into())
                    }
                    CNT_REQUEST_DECISION => {
                        DomainError::Validation("decided requests require decided_at".into())
                    }
                    other => {
                        DomainError::Persistence(format!("database constraint violation: {other}"))
                    }
                };
            }

            if let Some(code) = db_err.code() {
                match code.as_ref() {
                    "23505" => {
                        return DomainError::Conflict("unique constraint violated".into());
                    }
                    "23503" => {
                        return DomainError::NotFound("referenced record not found".into());
                    }
                    "23514" => {
                        return DomainError::Validation("check constraint violated".into());
                    }
                    _ => {}
                }
            }

            DomainError::Persistence(db_err.message().to_string())
        }
        sqlx::Error::PoolTimedOut => {
            DomainError::StorageConflict("timed out acquiring a connection".into())
        }
        _ => DomainError::Persistence(err.to_string()),
    }
}
