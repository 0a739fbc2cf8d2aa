use anyhow::{Context, Result};
use std::env;

use super::auth::AuthManager;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub admin_username: String,
    pub admin_password: String,
    pub bcrypt_cost: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            admin_username: AuthManager::DEFAULT_ADMIN_USERNAME.to_string(),
            admin_password: AuthManager::DEFAULT_ADMIN_PASSWORD.to_string(),
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        let host = env::var("APP_HOST").unwrap_or(defaults.host);

        let port = match env::var("APP_PORT") {
            Ok(raw) => raw.parse::<u16>().context("APP_PORT must be a valid u16")?,
            Err(_) => defaults.port,
        };

        let admin_username = env::var("ADMIN_USERNAME").unwrap_or(defaults.admin_username);
        let admin_password = env::var("ADMIN_PASSWORD").unwrap_or(defaults.admin_password);

        let bcrypt_cost = match env::var("BCRYPT_COST") {
            Ok(raw) => raw
                .parse::<u32>()
                .context("BCRYPT_COST must be a valid u32")?,
            Err(_) => defaults.bcrypt_cost,
        };

        Ok(Self {
            host,
            port,
            admin_username,
            admin_password,
            bcrypt_cost,
        })
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
