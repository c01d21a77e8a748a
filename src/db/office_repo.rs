// src/db/office_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::{db_utils::map_unique_violation, error::AppError},
    db::repository::OfficeStore,
    models::office::{CreateOfficePayload, Office, OfficeFilter},
};

#[derive(Clone)]
pub struct OfficeRepository {
    pool: PgPool,
}

impl OfficeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OfficeStore for OfficeRepository {
    async fn list_by_company(
        &self,
        company_id: Uuid,
        filter: &OfficeFilter,
    ) -> Result<Vec<Office>, AppError> {
        let offices = sqlx::query_as::<_, Office>(
            r#"
            SELECT * FROM offices
            WHERE company_id = $1
              AND ($2::text IS NULL OR country = $2)
              AND ($3::text IS NULL OR city = $3)
            ORDER BY created_at DESC
            "#,
        )
        .bind(company_id)
        .bind(filter.country.as_deref())
        .bind(filter.city.as_deref())
        .fetch_all(&self.pool)
        .await?;
        Ok(offices)
    }

    async fn find_in_company(
        &self,
        company_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Office>, AppError> {
        let office = sqlx::query_as::<_, Office>(
            "SELECT * FROM offices WHERE id = $1 AND company_id = $2",
        )
        .bind(id)
        .bind(company_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(office)
    }

    async fn find_by_occupant(
        &self,
        company_id: Uuid,
        member_id: Uuid,
    ) -> Result<Option<Office>, AppError> {
        let office = sqlx::query_as::<_, Office>(
            "SELECT * FROM offices WHERE occupant_id = $1 AND company_id = $2",
        )
        .bind(member_id)
        .bind(company_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(office)
    }

    async fn create(
        &self,
        company_id: Uuid,
        office: &CreateOfficePayload,
    ) -> Result<Office, AppError> {
        let office = sqlx::query_as::<_, Office>(
            r#"
            INSERT INTO offices (id, company_id, name, address, country, city, region)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(company_id)
        .bind(&office.name)
        .bind(&office.address)
        .bind(&office.country)
        .bind(&office.city)
        .bind(&office.region)
        .fetch_one(&self.pool)
        .await?;
        Ok(office)
    }

    async fn update(&self, office: &Office) -> Result<Office, AppError> {
        sqlx::query_as::<_, Office>(
            r#"
            UPDATE offices
            SET name = $3, address = $4, country = $5, city = $6, region = $7,
                updated_at = NOW()
            WHERE id = $1 AND company_id = $2
            RETURNING *
            "#,
        )
        .bind(office.id)
        .bind(office.company_id)
        .bind(&office.name)
        .bind(&office.address)
        .bind(&office.country)
        .bind(&office.city)
        .bind(&office.region)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::ResourceNotFound(format!("Office {}", office.id)))
    }

    async fn delete(&self, company_id: Uuid, id: Uuid) -> Result<bool, AppError> {
        // Veículos do escritório ficam sem escritório (ON DELETE SET NULL)
        let result = sqlx::query("DELETE FROM offices WHERE id = $1 AND company_id = $2")
            .bind(id)
            .bind(company_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn assign_occupant(
        &self,
        company_id: Uuid,
        office_id: Uuid,
        occupant_id: Option<Uuid>,
        release_from: Option<Uuid>,
    ) -> Result<Office, AppError> {
        // 1. Inicia a transação
        let mut tx = self.pool.begin().await?;

        // 2. Trava a linha do escritório de destino.
        // Duas alocações simultâneas no mesmo escritório ficam serializadas.
        let current = sqlx::query_as::<_, Office>(
            "SELECT * FROM offices WHERE id = $1 AND company_id = $2 FOR UPDATE",
        )
        .bind(office_id)
        .bind(company_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::ResourceNotFound(format!("Office {}", office_id)))?;

        // 3. O ocupante anterior (se for outro) deixa de dirigir os veículos daqui
        if let Some(previous) = current.occupant_id.filter(|p| Some(*p) != occupant_id) {
            sqlx::query(
                r#"
                UPDATE vehicles SET driver_id = NULL, updated_at = NOW()
                WHERE company_id = $1 AND office_id = $2 AND driver_id = $3
                "#,
            )
            .bind(company_id)
            .bind(office_id)
            .bind(previous)
            .execute(&mut *tx)
            .await?;
        }

        // 4. Libera o escritório de origem (realocação)
        if let (Some(source), Some(member)) = (release_from, occupant_id) {
            sqlx::query(
                r#"
                UPDATE offices SET occupant_id = NULL, updated_at = NOW()
                WHERE id = $1 AND company_id = $2 AND occupant_id = $3
                "#,
            )
            .bind(source)
            .bind(company_id)
            .bind(member)
            .execute(&mut *tx)
            .await?;

            sqlx::query(
                r#"
                UPDATE vehicles SET driver_id = NULL, updated_at = NOW()
                WHERE company_id = $1 AND office_id = $2 AND driver_id = $3
                "#,
            )
            .bind(company_id)
            .bind(source)
            .bind(member)
            .execute(&mut *tx)
            .await?;
        }

        // 5. Define o novo ocupante.
        // O índice único parcial garante a exclusividade mesmo sob corrida.
        let office = sqlx::query_as::<_, Office>(
            r#"
            UPDATE offices SET occupant_id = $3, updated_at = NOW()
            WHERE id = $1 AND company_id = $2
            RETURNING *
            "#,
        )
        .bind(office_id)
        .bind(company_id)
        .bind(occupant_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_unique_violation)?;

        // 6. Commit
        tx.commit().await?;

        Ok(office)
    }
}
