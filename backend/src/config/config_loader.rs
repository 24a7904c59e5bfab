use anyhow::{Ok, Result};

use super::config_model::{BackendServer, Database, DotEnvyConfig, PlanUrls, Session};

pub fn load() -> Result<DotEnvyConfig> {
    dotenvy::dotenv().ok();

    let backend_server = BackendServer {
        port: std::env::var("SERVER_PORT")
            .expect("SERVER_PORT is invalid")
            .parse()?,
        body_limit: std::env::var("SERVER_BODY_LIMIT")
            .expect("SERVER_BODY_LIMIT is invalid")
            .parse()?,
        timeout: std::env::var("SERVER_TIMEOUT")
            .expect("SERVER_TIMEOUT is invalid")
            .parse()?,
    };

    let database = Database {
        url: std::env::var("DATABASE_URL").expect("DATABASE_URL is invalid"),
    };

    let session = get_session_secret()?;

    let plan_urls = PlanUrls {
        base_url: std::env::var("PLAN_BASE_URL").expect("PLAN_BASE_URL is invalid"),
    };

    Ok(DotEnvyConfig {
        backend_server,
        database,
        session,
        plan_urls,
    })
}

pub fn get_session_secret() -> Result<Session> {
    dotenvy::dotenv().ok();

    Ok(Session {
        jwt_secret: std::env::var("JWT_SESSION_SECRET").expect("JWT_SESSION_SECRET is invalid"),
        ttl_seconds: std::env::var("SESSION_TTL_SECONDS")
            .unwrap_or_else(|_| "86400".to_string())
            .parse()?,
    })
}
