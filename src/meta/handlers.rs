use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct ServiceIdentity {
    pub service: &'static str,
    pub version: &'static str,
    pub status: &'static str,
}

#[derive(Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub service: &'static str,
}

#[derive(Serialize)]
pub struct SystemInfo {
    pub hostname: String,
    pub os: &'static str,
    pub os_family: &'static str,
    pub arch: &'static str,
    pub version: &'static str,
}

pub async fn get_root() -> Json<ServiceIdentity> {
    Json(ServiceIdentity {
        service: "Store Gateway API",
        version: env!("CARGO_PKG_VERSION"),
        status: "running",
    })
}

pub async fn get_health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "healthy",
        service: "gateway",
    })
}

pub async fn get_info() -> Json<SystemInfo> {
    // Container runtimes surface the hostname through the environment
    let hostname = std::env::var("HOSTNAME").unwrap_or_else(|_| "unknown".to_string());

    Json(SystemInfo {
        hostname,
        os: std::env::consts::OS,
        os_family: std::env::consts::FAMILY,
        arch: std::env::consts::ARCH,
        version: env!("CARGO_PKG_VERSION"),
    })
}
