use std::path::{Path, PathBuf};

use crate::error::{Result, YnabError};

/// The two values the tool persists between runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateKey {
    Token,
    BudgetId,
}

impl StateKey {
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Token => ".YNAB_PERSONAL_ACCESS_TOKEN",
            Self::BudgetId => ".YNAB_BUDGET_ID",
        }
    }
}

/// Single-value credential/state storage. Call sites only see this trait,
/// so the backing store can change without touching commands.
pub trait StateStore {
    fn get(&self, key: StateKey) -> Result<Option<String>>;
    fn set(&self, key: StateKey, value: &str) -> Result<()>;
    /// Returns whether a value was present.
    fn delete(&self, key: StateKey) -> Result<bool>;
    /// Where values live, for display.
    fn location(&self) -> String;
}

/// One file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self, key: StateKey) -> PathBuf {
        self.dir.join(key.file_name())
    }
}

impl StateStore for FileStore {
    fn get(&self, key: StateKey) -> Result<Option<String>> {
        let path = self.path(key);
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&path)?;
        let value = content.trim();
        Ok((!value.is_empty()).then(|| value.to_string()))
    }

    fn set(&self, key: StateKey, value: &str) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path(key);
        std::fs::write(&path, value.trim())?;
        restrict_permissions(&path)?;
        tracing::debug!("wrote {}", path.display());
        Ok(())
    }

    fn delete(&self, key: StateKey) -> Result<bool> {
        let path = self.path(key);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn location(&self) -> String {
        self.dir.display().to_string()
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
    Ok(())
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<()> {
    Ok(())
}

pub fn require_token(store: &dyn StateStore) -> Result<String> {
    store.get(StateKey::Token)?.ok_or(YnabError::TokenNotSet)
}

pub fn require_budget_id(store: &dyn StateStore) -> Result<String> {
    store.get(StateKey::BudgetId)?.ok_or(YnabError::BudgetNotSet)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_delete_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert_eq!(store.get(StateKey::Token).unwrap(), None);

        store.set(StateKey::Token, "secret-token\n").unwrap();
        assert_eq!(store.get(StateKey::Token).unwrap().as_deref(), Some("secret-token"));
        assert!(dir.path().join(".YNAB_PERSONAL_ACCESS_TOKEN").exists());

        assert!(store.delete(StateKey::Token).unwrap());
        assert!(!store.delete(StateKey::Token).unwrap());
        assert_eq!(store.get(StateKey::Token).unwrap(), None);
    }

    #[test]
    fn test_keys_use_separate_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        store.set(StateKey::Token, "tok").unwrap();
        store.set(StateKey::BudgetId, "budget-123").unwrap();
        let budget = std::fs::read_to_string(dir.path().join(".YNAB_BUDGET_ID")).unwrap();
        assert_eq!(budget, "budget-123");
        assert_eq!(store.get(StateKey::Token).unwrap().as_deref(), Some("tok"));
    }

    #[test]
    fn test_empty_file_counts_as_unset() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".YNAB_BUDGET_ID"), "  \n").unwrap();
        let store = FileStore::new(dir.path());
        assert!(matches!(require_budget_id(&store), Err(YnabError::BudgetNotSet)));
    }

    #[test]
    fn test_require_token_missing() {
        let store = memory::MemoryStore::default();
        let err = require_token(&store).unwrap_err();
        assert!(err.is_setup());
        assert!(err.to_string().contains("Set it with `token <token>`"));
    }

    #[test]
    fn test_set_creates_state_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("deep").join("state");
        let store = FileStore::new(&nested);
        store.set(StateKey::BudgetId, "b1").unwrap();
        assert!(nested.join(".YNAB_BUDGET_ID").exists());
    }
}
