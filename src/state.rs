use std::sync::Arc;

use crate::auth::{jwt::JwtKeys, services::AuthService};
use crate::config::AppConfig;
use crate::users::repo::UserStore;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub auth: AuthService,
}

impl AppState {
    pub fn new(config: Arc<AppConfig>, users: Arc<dyn UserStore>) -> Self {
        let keys = JwtKeys::from_config(&config.jwt);
        Self {
            auth: AuthService::new(users, keys),
            config,
        }
    }

    #[cfg(test)]
    pub fn fake() -> Self {
        use crate::config::{DatabaseConfig, JwtConfig, RedisConfig, ServerConfig};
        use crate::users::memory::MemoryUserStore;

        let config = Arc::new(AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".into(),
                port: 0,
                read_timeout_secs: 5,
                write_timeout_secs: 5,
            },
            database: DatabaseConfig {
                url: None,
                host: "localhost".into(),
                port: 5432,
                user: "postgres".into(),
                password: "postgres".into(),
                name: "unidate".into(),
                sslmode: "disable".into(),
                max_connections: 1,
            },
            jwt: JwtConfig {
                secret: "test-secret".into(),
                ttl_minutes: 60,
            },
            redis: RedisConfig {
                host: "localhost".into(),
                port: 6379,
                password: String::new(),
                db: 0,
            },
        });

        let users = Arc::new(MemoryUserStore::default()) as Arc<dyn UserStore>;
        Self::new(config, users)
    }
}
