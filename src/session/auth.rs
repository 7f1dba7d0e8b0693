use super::dto::TokenResponse;
use crate::model::UserInfo;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum AuthError {
    #[error("token file io: {0}")]
    Io(#[from] std::io::Error),
    #[error("token file is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// 登录后的会话
///
/// 显式传给需要认证的调用，客户端本身不保存任何 token。
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthSession {
    access_token: String,
    #[serde(default = "default_token_type")]
    token_type: String,
    #[serde(default)]
    pub user: UserInfo,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

impl AuthSession {
    pub fn new(access_token: impl Into<String>, user: UserInfo) -> Self {
        Self {
            access_token: access_token.into(),
            token_type: default_token_type(),
            user,
        }
    }

    pub fn from_token_response(resp: TokenResponse) -> Self {
        Self {
            access_token: resp.access_token,
            token_type: resp.token_type,
            user: resp.user,
        }
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    pub fn token_type(&self) -> &str {
        &self.token_type
    }

    pub fn display_name(&self) -> String {
        self.user.display_name()
    }
}

impl std::fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<AuthSession [{}]>", self.user.display_name())
    }
}

/// 本地 token 文件
///
/// 进程重启后恢复登录状态；登出时删除。
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// 文件不存在时返回 Ok(None)
    pub fn load(&self) -> Result<Option<AuthSession>, AuthError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        if raw.trim().is_empty() {
            return Ok(None);
        }
        let session: AuthSession = serde_json::from_str(&raw)?;
        if session.access_token.trim().is_empty() {
            warn!("token file {} has an empty token", self.path.display());
            return Ok(None);
        }
        Ok(Some(session))
    }

    pub fn save(&self, session: &AuthSession) -> Result<(), AuthError> {
        let raw = serde_json::to_string_pretty(session)?;
        std::fs::write(&self.path, raw)?;
        info!("token saved to {}", self.path.display());
        Ok(())
    }

    pub fn clear(&self) -> Result<(), AuthError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AuthSession {
        AuthSession::new(
            "abc.def",
            UserInfo {
                email: Some("kim@example.com".into()),
                username: Some("kim".into()),
                full_name: None,
            },
        )
    }

    #[test]
    fn save_load_clear() {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::new(dir.path().join("token.json"));
        assert!(store.load().unwrap().is_none());

        store.save(&sample()).unwrap();
        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded, sample());
        assert_eq!(loaded.access_token(), "abc.def");

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
        store.clear().unwrap();
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token.json");
        std::fs::write(&path, "{oops").unwrap();
        let store = TokenStore::new(path);
        assert!(matches!(store.load(), Err(AuthError::Malformed(_))));
    }

    #[test]
    fn from_token_response_keeps_user() {
        let resp: TokenResponse = serde_json::from_str(
            r#"{"access_token": "t", "user": {"email": "lee@example.com"}}"#,
        )
        .unwrap();
        let s = AuthSession::from_token_response(resp);
        assert_eq!(s.token_type(), "bearer");
        assert_eq!(s.display_name(), "lee");
        assert_eq!(format!("{:?}", s), "<AuthSession [lee]>");
    }
}
