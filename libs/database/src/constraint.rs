//! Integrity-constraint violations surfaced by SeaORM.
//!
//! Repositories match on [`ConstraintViolation`] to turn the storage layer's
//! uniqueness and referential checks into domain errors; anything else stays a
//! plain [`DbErr`].

use sea_orm::{DbErr, SqlErr};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstraintViolation {
    /// SQLSTATE 23505
    Unique(String),
    /// SQLSTATE 23503
    ForeignKey(String),
}

impl ConstraintViolation {
    /// Driver message, which names the violated constraint.
    pub fn detail(&self) -> &str {
        match self {
            Self::Unique(detail) | Self::ForeignKey(detail) => detail,
        }
    }

    pub fn is_unique(&self) -> bool {
        matches!(self, Self::Unique(_))
    }

    pub fn is_foreign_key(&self) -> bool {
        matches!(self, Self::ForeignKey(_))
    }
}

/// Classify `err` when it was raised by a unique or foreign-key constraint.
pub fn constraint_violation(err: &DbErr) -> Option<ConstraintViolation> {
    err.sql_err().and_then(classify)
}

fn classify(err: SqlErr) -> Option<ConstraintViolation> {
    match err {
        SqlErr::UniqueConstraintViolation(detail) => Some(ConstraintViolation::Unique(detail)),
        SqlErr::ForeignKeyConstraintViolation(detail) => {
            Some(ConstraintViolation::ForeignKey(detail))
        }
        #[allow(unreachable_patterns)]
        _ => None,
    }
}
