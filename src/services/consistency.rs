// src/services/consistency.rs

//! Regras de consistência das alocações (ocupante de escritório, motorista de
//! veículo, ano de fabricação). Funções puras: recebem os registros já lidos
//! e decidem, sem tocar no banco.

use chrono::{Datelike, Utc};
use uuid::Uuid;

use crate::{common::error::AppError, models::office::Office};

pub const MIN_YEAR_OF_MANUFACTURE: i32 = 1984;

pub fn current_year() -> i32 {
    Utc::now().year()
}

/// `1984 <= year <= current_year`
pub fn check_year_of_manufacture(year: i32, current_year: i32) -> Result<(), AppError> {
    if (MIN_YEAR_OF_MANUFACTURE..=current_year).contains(&year) {
        Ok(())
    } else {
        Err(AppError::InvalidYear(year))
    }
}

/// Com motorista e escritório definidos, o motorista precisa ser o ocupante
/// daquele escritório. Se faltar um dos dois, não há o que conferir.
pub fn check_driver_in_office(driver_id: Option<Uuid>, office: Option<&Office>) -> Result<(), AppError> {
    match (driver_id, office) {
        (Some(driver), Some(office)) if office.occupant_id != Some(driver) => {
            Err(AppError::DriverNotInOffice)
        }
        _ => Ok(()),
    }
}

/// O que fazer com um pedido de alocação de ocupante.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OccupancyPlan {
    /// O membro já ocupa este escritório.
    Unchanged,
    /// Gravar o novo ocupante (ou `None` para desocupar), liberando antes o
    /// escritório de origem, se houver.
    Assign {
        occupant_id: Option<Uuid>,
        release_from: Option<Uuid>,
    },
}

/// Decide a alocação de `candidate` em `target`.
///
/// `current_office` é o escritório que o candidato ocupa hoje (na mesma
/// empresa). Sem `reassign`, um candidato já alocado em outro escritório é
/// recusado; com `reassign`, ele é movido.
pub fn plan_occupant_assignment(
    target: &Office,
    candidate: Option<Uuid>,
    current_office: Option<&Office>,
    reassign: bool,
) -> Result<OccupancyPlan, AppError> {
    let Some(member) = candidate else {
        return Ok(OccupancyPlan::Assign {
            occupant_id: None,
            release_from: None,
        });
    };

    match current_office {
        Some(office) if office.id == target.id => Ok(OccupancyPlan::Unchanged),
        Some(office) if reassign => Ok(OccupancyPlan::Assign {
            occupant_id: Some(member),
            release_from: Some(office.id),
        }),
        Some(_) => Err(AppError::OccupantAlreadyAssigned),
        None => Ok(OccupancyPlan::Assign {
            occupant_id: Some(member),
            release_from: None,
        }),
    }
}
