use std::cell::RefCell;
use std::collections::BTreeMap;
use std::collections::HashMap;
use std::fs;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::rc::Rc;

use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;
use tracing::info;

use super::error::StorageError;

pub const FLAG_FILE_VERSION: u32 = 1;
pub const PRIVACY_POLICY_ACCEPTED_KEY: &str = "memos.privacy_policy_accepted";

/// Persisted boolean flags. Unset keys read as `false`; `set_flag` is durable
/// once it returns `Ok`.
pub trait FlagStorage {
    fn get_flag(&self, key: &str) -> bool;
    fn set_flag(&self, key: &str, value: bool) -> Result<(), StorageError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedFlag {
    pub value: bool,
    pub updated_at_ms: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagFile {
    pub version: u32,
    #[serde(default)]
    pub flags: BTreeMap<String, PersistedFlag>,
}

impl Default for FlagFile {
    fn default() -> Self {
        Self {
            version: FLAG_FILE_VERSION,
            flags: BTreeMap::new(),
        }
    }
}

#[derive(Debug)]
pub struct FileFlagStore {
    path: PathBuf,
    contents: RefCell<FlagFile>,
}

impl FileFlagStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let contents = load_flag_file(&path)?;
        debug!(path = %path.display(), flags = contents.flags.len(), "flag file loaded");
        Ok(Self {
            path,
            contents: RefCell::new(contents),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FlagStorage for FileFlagStore {
    fn get_flag(&self, key: &str) -> bool {
        self.contents
            .borrow()
            .flags
            .get(key)
            .map(|flag| flag.value)
            .unwrap_or(false)
    }

    fn set_flag(&self, key: &str, value: bool) -> Result<(), StorageError> {
        let mut next = self.contents.borrow().clone();
        next.flags.insert(
            key.to_string(),
            PersistedFlag {
                value,
                updated_at_ms: now_ms(),
            },
        );
        write_flag_file(&self.path, &next)?;
        *self.contents.borrow_mut() = next;
        info!(key, value, path = %self.path.display(), "flag stored");
        Ok(())
    }
}

fn load_flag_file(path: &Path) -> Result<FlagFile, StorageError> {
    if !path.exists() {
        return Ok(FlagFile::default());
    }
    let raw = fs::read_to_string(path)?;
    if raw.trim().is_empty() {
        return Ok(FlagFile::default());
    }
    Ok(serde_json::from_str(&raw)?)
}

fn write_flag_file(path: &Path, contents: &FlagFile) -> Result<(), StorageError> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    let mut file = File::create(&tmp)?;
    serde_json::to_writer_pretty(&mut file, contents)?;
    file.write_all(b"\n")?;
    file.sync_all()?;
    drop(file);
    fs::rename(&tmp, path)?;
    Ok(())
}

fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

#[derive(Debug, Default)]
pub struct MemoryFlagStore {
    flags: RefCell<HashMap<String, bool>>,
}

impl MemoryFlagStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FlagStorage for MemoryFlagStore {
    fn get_flag(&self, key: &str) -> bool {
        self.flags.borrow().get(key).copied().unwrap_or(false)
    }

    fn set_flag(&self, key: &str, value: bool) -> Result<(), StorageError> {
        self.flags.borrow_mut().insert(key.to_string(), value);
        Ok(())
    }
}

#[derive(Clone)]
pub struct PrivacyPolicyStorage {
    flags: Rc<dyn FlagStorage>,
}

impl PrivacyPolicyStorage {
    pub fn new(flags: Rc<dyn FlagStorage>) -> Self {
        Self { flags }
    }

    pub fn is_accepted(&self) -> bool {
        self.flags.get_flag(PRIVACY_POLICY_ACCEPTED_KEY)
    }

    pub fn set_accepted(&self, accepted: bool) -> Result<(), StorageError> {
        self.flags.set_flag(PRIVACY_POLICY_ACCEPTED_KEY, accepted)
    }
}

impl std::fmt::Debug for PrivacyPolicyStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrivacyPolicyStorage")
            .field("accepted", &self.is_accepted())
            .finish()
    }
}
