// src/config.rs

use std::{env, sync::Arc, time::Duration};

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    common::i18n::I18nStore,
    db::{CompanyRepository, MemberRepository, OfficeRepository, Stores, VehicleRepository},
    services::{
        auth::AuthService, company_service::CompanyService, employee_service::EmployeeService,
        office_service::OfficeService, vehicle_service::VehicleService,
    },
};

/// Configuração lida do ambiente (e do `.env`, se existir).
#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub jwt_secret: String,
    pub bind_addr: String,
    pub database_max_connections: u32,
    pub token_ttl_hours: i64,
    pub bcrypt_cost: u32,
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL deve ser definida")?;
        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET deve ser definido")?;

        Ok(Self {
            database_url,
            jwt_secret,
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            database_max_connections: parse_var("DATABASE_MAX_CONNECTIONS", 5)?,
            token_ttl_hours: parse_var("TOKEN_TTL_HOURS", 168)?,
            bcrypt_cost: parse_var("BCRYPT_COST", bcrypt::DEFAULT_COST)?,
        })
    }
}

// Variável opcional: ausente usa o padrão, presente precisa ser válida.
fn parse_var<T>(name: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .with_context(|| format!("{} inválida: '{}'", name, raw)),
        Err(_) => Ok(default),
    }
}

pub async fn connect(settings: &Settings) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(settings.database_max_connections)
        .acquire_timeout(Duration::from_secs(3))
        .connect(&settings.database_url)
        .await
        .context("Falha ao conectar no banco de dados")?;

    tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");
    Ok(pool)
}

/// Repositórios Postgres sobre o mesmo pool.
pub fn postgres_stores(pool: PgPool) -> Stores {
    Stores {
        companies: Arc::new(CompanyRepository::new(pool.clone())),
        members: Arc::new(MemberRepository::new(pool.clone())),
        offices: Arc::new(OfficeRepository::new(pool.clone())),
        vehicles: Arc::new(VehicleRepository::new(pool)),
    }
}

#[derive(Clone)]
pub struct AppState {
    pub i18n_store: I18nStore,
    pub auth_service: AuthService,
    pub company_service: CompanyService,
    pub employee_service: EmployeeService,
    pub office_service: OfficeService,
    pub vehicle_service: VehicleService,
}

impl AppState {
    // --- Monta o gráfico de dependências ---
    pub fn new(stores: Stores, settings: &Settings) -> anyhow::Result<Self> {
        let i18n_store = I18nStore::load()?;

        Ok(Self {
            i18n_store,
            auth_service: AuthService::new(
                stores.clone(),
                settings.jwt_secret.clone(),
                settings.token_ttl_hours,
                settings.bcrypt_cost,
            ),
            company_service: CompanyService::new(stores.clone()),
            employee_service: EmployeeService::new(stores.clone(), settings.bcrypt_cost),
            office_service: OfficeService::new(stores.clone()),
            vehicle_service: VehicleService::new(stores),
        })
    }
}
