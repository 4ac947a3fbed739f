use crate::{
    config::AppConfig,
    db::{DbPool, OrmConn, create_orm_conn},
};

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub orm: OrmConn,
    pub auth: AuthSettings,
}

#[derive(Clone)]
pub struct AuthSettings {
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
}

impl AppState {
    pub fn new(pool: DbPool, config: &AppConfig) -> Self {
        let orm = create_orm_conn(&pool);
        Self {
            pool,
            orm,
            auth: AuthSettings {
                jwt_secret: config.jwt_secret.clone(),
                token_ttl_hours: config.jwt_ttl_hours,
            },
        }
    }
}
