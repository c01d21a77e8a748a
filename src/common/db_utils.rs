// src/common/db_utils.rs

use crate::common::error::AppError;

// Nomes dos índices únicos criados na migration
const MEMBERS_EMAIL_KEY: &str = "members_email_key";
const OFFICES_OCCUPANT_KEY: &str = "offices_occupant_key";

/// Converte violações de chave única conhecidas em erros de negócio.
/// Qualquer outro erro segue como `DatabaseError`.
pub(crate) fn map_unique_violation(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            match db_err.constraint() {
                Some(MEMBERS_EMAIL_KEY) => return AppError::EmailAlreadyExists,
                Some(OFFICES_OCCUPANT_KEY) => return AppError::OccupantAlreadyAssigned,
                _ => {}
            }
        }
    }
    e.into()
}
