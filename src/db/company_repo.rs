// src/db/company_repo.rs

use async_trait::async_trait;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{member_repo::insert_member, repository::CompanyStore},
    models::{
        auth::{Member, NewMember},
        company::{Company, NewCompany},
    },
};

#[derive(Clone)]
pub struct CompanyRepository {
    pool: PgPool,
}

impl CompanyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert_company<'e, E>(
        &self,
        executor: E, // Aceita um executor (pool ou transação)
        company: &NewCompany,
    ) -> Result<Company, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let company = sqlx::query_as::<_, Company>(
            r#"
            INSERT INTO companies (id, name, address)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&company.name)
        .bind(company.address.as_deref())
        .fetch_one(executor)
        .await?;
        Ok(company)
    }
}

#[async_trait]
impl CompanyStore for CompanyRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Company>, AppError> {
        let company = sqlx::query_as::<_, Company>("SELECT * FROM companies WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(company)
    }

    async fn update(&self, company: &Company) -> Result<Company, AppError> {
        sqlx::query_as::<_, Company>(
            r#"
            UPDATE companies
            SET name = $2, address = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(company.id)
        .bind(&company.name)
        .bind(company.address.as_deref())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::ResourceNotFound(format!("Company {}", company.id)))
    }

    async fn create_with_admin(
        &self,
        company: NewCompany,
        admin: NewMember,
    ) -> Result<(Company, Member), AppError> {
        // 1. Inicia a transação
        let mut tx = self.pool.begin().await?;

        // 2. Cria a empresa
        let new_company = self.insert_company(&mut *tx, &company).await?;

        // 3. Cria o admin já vinculado a ela.
        // Se o e-mail já existir, o `?` devolve o erro e o drop do `tx`
        // faz o rollback da empresa criada acima.
        let new_admin = insert_member(&mut *tx, new_company.id, &admin).await?;

        // 4. Commit
        tx.commit().await?;

        Ok((new_company, new_admin))
    }
}
