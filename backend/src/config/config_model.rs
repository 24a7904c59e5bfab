#[derive(Debug, Clone)]
pub struct DotEnvyConfig {
    pub backend_server: BackendServer,
    pub database: Database,
    pub session: Session,
    pub plan_urls: PlanUrls,
}

#[derive(Debug, Clone)]
pub struct BackendServer {
    pub port: u16,
    pub body_limit: u64,
    pub timeout: u64,
}

#[derive(Debug, Clone)]
pub struct Database {
    pub url: String,
}

#[derive(Debug, Clone)]
pub struct Session {
    pub jwt_secret: String,
    pub ttl_seconds: u64,
}

/// Base URL embedded in every plan view's `view_url`.
#[derive(Debug, Clone)]
pub struct PlanUrls {
    pub base_url: String,
}
