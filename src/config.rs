//! Configuration from environment variables

use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: PathBuf,
    pub port: u16,
    pub upload_dir: PathBuf,
    pub gateway_url: String,
    pub session_ttl: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        let db_path = std::env::var("LOKERBOT_DB_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("lokerbot.db"));
        let port = std::env::var("LOKERBOT_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8000);
        let upload_dir = std::env::var("LOKERBOT_UPLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("uploads/cv"));
        let gateway_url = std::env::var("LOKERBOT_GATEWAY_URL")
            .unwrap_or_else(|_| "http://localhost:3000".to_string());
        let session_ttl = std::env::var("LOKERBOT_SESSION_TTL_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(600));

        Self {
            db_path,
            port,
            upload_dir,
            gateway_url,
            session_ttl,
        }
    }
}
