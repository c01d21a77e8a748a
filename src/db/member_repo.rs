// src/db/member_repo.rs

use async_trait::async_trait;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::{db_utils::map_unique_violation, error::AppError},
    db::repository::MemberStore,
    models::{
        auth::{Member, NewMember},
        employee::EmployeeFilter,
    },
};

// O repositório de membros, responsável por todas as interações com a tabela 'members'
#[derive(Clone)]
pub struct MemberRepository {
    pool: PgPool,
}

impl MemberRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Insere um membro. Aceita um executor (pool ou transação) para poder
/// participar do cadastro atômico empresa + admin.
pub(crate) async fn insert_member<'e, E>(
    executor: E,
    company_id: Uuid,
    member: &NewMember,
) -> Result<Member, AppError>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as::<_, Member>(
        r#"
        INSERT INTO members (id, company_id, first_name, last_name, email, password_hash, is_admin)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(company_id)
    .bind(&member.first_name)
    .bind(&member.last_name)
    .bind(&member.email)
    .bind(&member.password_hash)
    .bind(member.is_admin)
    .fetch_one(executor)
    .await
    // E-mail duplicado vira um erro amigável
    .map_err(map_unique_violation)
}

#[async_trait]
impl MemberStore for MemberRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Member>, AppError> {
        let member = sqlx::query_as::<_, Member>("SELECT * FROM members WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(member)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Member>, AppError> {
        let member = sqlx::query_as::<_, Member>("SELECT * FROM members WHERE LOWER(email) = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(member)
    }

    async fn find_in_company(
        &self,
        company_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Member>, AppError> {
        let member = sqlx::query_as::<_, Member>(
            "SELECT * FROM members WHERE id = $1 AND company_id = $2",
        )
        .bind(id)
        .bind(company_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(member)
    }

    async fn list_employees(
        &self,
        company_id: Uuid,
        filter: &EmployeeFilter,
    ) -> Result<Vec<Member>, AppError> {
        // Filtros opcionais: NULL desliga a condição
        let members = sqlx::query_as::<_, Member>(
            r#"
            SELECT * FROM members
            WHERE company_id = $1
              AND is_admin = FALSE
              AND ($2::text IS NULL OR first_name = $2)
              AND ($3::text IS NULL OR last_name = $3)
              AND ($4::text IS NULL OR LOWER(email) = LOWER($4))
            ORDER BY created_at DESC
            "#,
        )
        .bind(company_id)
        .bind(filter.first_name.as_deref())
        .bind(filter.last_name.as_deref())
        .bind(filter.email.as_deref())
        .fetch_all(&self.pool)
        .await?;
        Ok(members)
    }

    async fn create(&self, company_id: Uuid, member: NewMember) -> Result<Member, AppError> {
        insert_member(&self.pool, company_id, &member).await
    }

    async fn update(&self, member: &Member) -> Result<Member, AppError> {
        sqlx::query_as::<_, Member>(
            r#"
            UPDATE members
            SET first_name = $3, last_name = $4, password_hash = $5, updated_at = NOW()
            WHERE id = $1 AND company_id = $2
            RETURNING *
            "#,
        )
        .bind(member.id)
        .bind(member.company_id)
        .bind(&member.first_name)
        .bind(&member.last_name)
        .bind(&member.password_hash)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::ResourceNotFound(format!("Member {}", member.id)))
    }

    async fn delete(&self, company_id: Uuid, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM members WHERE id = $1 AND company_id = $2")
            .bind(id)
            .bind(company_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
