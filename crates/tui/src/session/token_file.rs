use std::{
    fs,
    path::PathBuf,
    sync::{Arc, Mutex},
};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// On-disk layout of the session file: a single slot for the bearer token.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct StoredSession {
    token: String,
}

#[derive(Debug)]
struct Inner {
    path: PathBuf,
    token: String,
}

/// Durable bearer-token slot, shared between the session store (reads and
/// writes) and the API client (reads). Access is uncontended: everything
/// runs on one logical thread, the mutex only makes the handle cloneable.
#[derive(Debug, Clone)]
pub struct TokenFile {
    inner: Arc<Mutex<Inner>>,
}

impl TokenFile {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let token = match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str::<StoredSession>(&content)?.token,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => String::new(),
            Err(err) => return Err(err.into()),
        };
        Ok(Self {
            inner: Arc::new(Mutex::new(Inner { path, token })),
        })
    }

    /// Current token, stripped of any `Bearer ` prefix and surrounding
    /// whitespace. Empty when unauthenticated.
    pub fn token(&self) -> String {
        let inner = self.lock();
        strip_bearer(&inner.token)
    }

    pub fn save(&self, token: &str) -> Result<()> {
        let mut inner = self.lock();
        if let Some(parent) = inner.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let payload = serde_json::to_string_pretty(&StoredSession {
            token: token.to_string(),
        })?;
        fs::write(&inner.path, payload)?;
        inner.token = token.to_string();
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        let mut inner = self.lock();
        match fs::remove_file(&inner.path) {
            Ok(()) => {}
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => return Err(err.into()),
        }
        inner.token.clear();
        Ok(())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

fn strip_bearer(raw: &str) -> String {
    let trimmed = raw.trim();
    let lower = trimmed.to_ascii_lowercase();
    if let Some(rest) = lower.strip_prefix("bearer ") {
        trimmed[trimmed.len() - rest.len()..].trim().to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        let root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../target/test_tokens");
        fs::create_dir_all(&root).unwrap();
        root.join(format!("{name}_{}.json", std::process::id()))
    }

    #[test]
    fn strip_bearer_removes_prefix_and_whitespace() {
        assert_eq!(strip_bearer("abc"), "abc");
        assert_eq!(strip_bearer("  abc  "), "abc");
        assert_eq!(strip_bearer("Bearer abc"), "abc");
        assert_eq!(strip_bearer("bearer   abc"), "abc");
        assert_eq!(strip_bearer(""), "");
    }

    #[test]
    fn missing_file_loads_empty() {
        let tokens = TokenFile::load(temp_path("missing_file_loads_empty")).unwrap();
        assert_eq!(tokens.token(), "");
    }

    #[test]
    fn save_then_reload_roundtrips() {
        let path = temp_path("save_then_reload");
        let tokens = TokenFile::load(&path).unwrap();
        tokens.save("tok-123").unwrap();
        assert_eq!(tokens.token(), "tok-123");

        let reloaded = TokenFile::load(&path).unwrap();
        assert_eq!(reloaded.token(), "tok-123");
        tokens.clear().unwrap();
    }

    #[test]
    fn clear_removes_the_file() {
        let path = temp_path("clear_removes");
        let tokens = TokenFile::load(&path).unwrap();
        tokens.save("tok").unwrap();
        tokens.clear().unwrap();
        assert_eq!(tokens.token(), "");
        assert!(!path.exists());
        // Clearing an already-empty slot is fine.
        tokens.clear().unwrap();
    }
}
