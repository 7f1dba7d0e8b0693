use crate::session::DEFAULT_API_URL;
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_TOKEN_FILE: &str = ".legisight_token";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// 运行配置，来自 .env 和进程环境变量
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_url: String,
    pub token_file: PathBuf,
    pub timeout: Duration,
    /// 同时设置邮箱和密码时启动即登录
    pub credentials: Option<(String, String)>,
    pub env_file: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let env_file = dotenv::dotenv().ok();
        let mut cfg = Self::from_lookup(|key| std::env::var(key).ok())?;
        cfg.env_file = env_file;
        Ok(cfg)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let timeout_secs = match get("LEGISIGHT_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .with_context(|| format!("LEGISIGHT_TIMEOUT_SECS is not a number: {}", raw))?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let credentials = match (get("LEGISIGHT_EMAIL"), get("LEGISIGHT_PASSWORD")) {
            (Some(email), Some(password)) => Some((email, password)),
            _ => None,
        };

        Ok(Self {
            api_url: get("LEGISIGHT_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            token_file: get("LEGISIGHT_TOKEN_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_TOKEN_FILE)),
            timeout: Duration::from_secs(timeout_secs),
            credentials,
            env_file: None,
        })
    }

    /// 启动时显示在日志面板里的摘要
    pub fn describe(&self) -> Vec<String> {
        let mut lines = Vec::new();
        match &self.env_file {
            Some(p) => lines.push(format!("✓ .env 로드: {}", p.display())),
            None => lines.push("⚠ .env 파일 없음, 환경 변수 사용".to_string()),
        }
        lines.push(format!("API 서버: {}", self.api_url));
        lines.push(format!("토큰 파일: {}", self.token_file.display()));
        if let Some((email, _)) = &self.credentials {
            lines.push(format!("자동 로그인 계정: {}", email));
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let cfg = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg.api_url, "http://localhost:8000");
        assert_eq!(cfg.token_file, PathBuf::from(".legisight_token"));
        assert_eq!(cfg.timeout, Duration::from_secs(30));
        assert!(cfg.credentials.is_none());
    }

    #[test]
    fn reads_overrides() {
        let cfg = AppConfig::from_lookup(lookup(&[
            ("LEGISIGHT_API_URL", "http://api.example:9000"),
            ("LEGISIGHT_TIMEOUT_SECS", "5"),
            ("LEGISIGHT_EMAIL", "kim@example.com"),
            ("LEGISIGHT_PASSWORD", "pw"),
        ]))
        .unwrap();
        assert_eq!(cfg.api_url, "http://api.example:9000");
        assert_eq!(cfg.timeout, Duration::from_secs(5));
        assert_eq!(
            cfg.credentials,
            Some(("kim@example.com".to_string(), "pw".to_string()))
        );
    }

    #[test]
    fn half_credentials_are_ignored() {
        let cfg =
            AppConfig::from_lookup(lookup(&[("LEGISIGHT_EMAIL", "kim@example.com")])).unwrap();
        assert!(cfg.credentials.is_none());
    }

    #[test]
    fn bad_timeout_is_an_error() {
        assert!(AppConfig::from_lookup(lookup(&[("LEGISIGHT_TIMEOUT_SECS", "soon")])).is_err());
    }
}
