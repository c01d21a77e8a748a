// src/services/auth.rs

use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::repository::Stores,
    models::{
        auth::{normalize_email, Caller, Claims, Member, NewMember, RegisterCompanyPayload},
        company::{Company, NewCompany},
    },
};

/// Gera o hash bcrypt numa thread separada (é CPU-bound e bloquearia o runtime).
pub async fn hash_password(password: &str, cost: u32) -> Result<String, AppError> {
    let password_clone = password.to_owned();
    let hashed = tokio::task::spawn_blocking(move || hash(&password_clone, cost))
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;
    Ok(hashed)
}

#[derive(Clone)]
pub struct AuthService {
    stores: Stores,
    jwt_secret: String,
    token_ttl: chrono::Duration,
    bcrypt_cost: u32,
}

impl AuthService {
    pub fn new(stores: Stores, jwt_secret: String, token_ttl_hours: i64, bcrypt_cost: u32) -> Self {
        Self {
            stores,
            jwt_secret,
            token_ttl: chrono::Duration::hours(token_ttl_hours),
            bcrypt_cost,
        }
    }

    /// Cadastro público: cria a empresa e o seu primeiro admin, atomicamente.
    pub async fn register_company(
        &self,
        payload: RegisterCompanyPayload,
    ) -> Result<(Company, Member), AppError> {
        // 1. Regras que não tocam no banco
        if payload.password != payload.confirm_password {
            return Err(AppError::PasswordMismatch);
        }

        // 2. E-mail já usado? (o índice único no banco cobre a corrida)
        let email = normalize_email(&payload.email);
        if self.stores.members.find_by_email(&email).await?.is_some() {
            return Err(AppError::EmailAlreadyExists);
        }

        // 3. Hashing (fora da transação, pois não toca no banco)
        let password_hash = hash_password(&payload.password, self.bcrypt_cost).await?;

        // 4. Empresa + admin na mesma transação
        let (company, admin) = self
            .stores
            .companies
            .create_with_admin(
                NewCompany {
                    name: payload.company_name,
                    address: None,
                },
                NewMember {
                    first_name: payload.first_name,
                    last_name: payload.last_name,
                    email,
                    password_hash,
                    is_admin: true,
                },
            )
            .await?;

        tracing::info!(company = %company.id, admin = %admin.id, "Empresa cadastrada");

        Ok((company, admin))
    }

    /// Troca e-mail + senha por um token.
    pub async fn login(&self, email: &str, password: &str) -> Result<(String, Member), AppError> {
        let member = self
            .stores
            .members
            .find_by_email(&normalize_email(email))
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let password_clone = password.to_owned();
        let password_hash_clone = member.password_hash.clone();

        // Executa a verificação em um thread separado
        let is_password_valid =
            tokio::task::spawn_blocking(move || verify(&password_clone, &password_hash_clone))
                .await
                .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !is_password_valid {
            return Err(AppError::InvalidCredentials);
        }

        let token = self.create_token(member.id)?;
        Ok((token, member))
    }

    /// Resolve o token na identidade do chamador. O membro é sempre relido
    /// do banco, então papel e empresa estão sempre atualizados.
    pub async fn resolve_caller(&self, token: &str) -> Result<Caller, AppError> {
        let validation = Validation::default();
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &validation,
        )
        .map_err(|_| AppError::InvalidToken)?;

        // Membro apagado depois de emitir o token: o token deixa de valer
        let member = self
            .stores
            .members
            .find_by_id(token_data.claims.sub)
            .await?
            .ok_or(AppError::InvalidToken)?;

        Ok(Caller::from(&member))
    }

    fn create_token(&self, member_id: Uuid) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + self.token_ttl;

        let claims = Claims {
            sub: member_id,
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}
