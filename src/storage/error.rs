//! Store error type, classified from Postgres SQLSTATE codes.

/// What a failed statement means for the caller.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("unique constraint violated{}: {message}", fmt_constraint(.constraint))]
    UniqueViolation {
        constraint: Option<String>,
        message: String,
    },

    #[error("foreign key constraint violated{}: {message}", fmt_constraint(.constraint))]
    ForeignKeyViolation {
        constraint: Option<String>,
        message: String,
    },

    #[error("invalid value: {0}")]
    InvalidValue(String),

    #[error("database error: {0}")]
    Database(sqlx::Error),
}

fn fmt_constraint(constraint: &Option<String>) -> String {
    match constraint {
        Some(c) => format!(" ({})", c),
        None => String::new(),
    }
}

/// Coarse SQLSTATE categories the request layer cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlStateKind {
    UniqueViolation,
    ForeignKeyViolation,
    DataException,
}

impl SqlStateKind {
    /// Maps a five-character SQLSTATE to a category, if it is one we translate.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "23505" => Some(Self::UniqueViolation),
            "23503" => Some(Self::ForeignKeyViolation),
            c if c.starts_with("22") => Some(Self::DataException),
            _ => None,
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error() {
            let kind = db.code().as_deref().and_then(SqlStateKind::from_code);
            let constraint = db.constraint().map(str::to_string);
            let message = db.message().to_string();
            match kind {
                Some(SqlStateKind::UniqueViolation) => {
                    return StoreError::UniqueViolation {
                        constraint,
                        message,
                    }
                }
                Some(SqlStateKind::ForeignKeyViolation) => {
                    return StoreError::ForeignKeyViolation {
                        constraint,
                        message,
                    }
                }
                Some(SqlStateKind::DataException) => return StoreError::InvalidValue(message),
                None => {}
            }
        }
        StoreError::Database(e)
    }
}
