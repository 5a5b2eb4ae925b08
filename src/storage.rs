// Manages the durable local slot holding the serialized task list.
//
// The slot is a plain JSON array of tasks; any content that does not parse
// as one is treated as empty (logged, never propagated). Writes go through
// an exclusive sidecar lock and a tmp-file rename so a crash mid-write
// cannot leave a half-serialized list behind.
use crate::context::AppContext;
use crate::model::Task;
use anyhow::Result;
use fs2::FileExt;
use std::fs;
use std::path::{Path, PathBuf};

pub struct LocalStorage;

impl LocalStorage {
    /// Helper to get a sidecar lock file path.
    fn get_lock_path(file_path: &Path) -> PathBuf {
        let mut lock_path = file_path.to_path_buf();
        if let Some(ext) = lock_path.extension() {
            let mut new_ext = ext.to_os_string();
            new_ext.push(".lock");
            lock_path.set_extension(new_ext);
        } else {
            lock_path.set_extension("lock");
        }
        lock_path
    }

    /// Runs `f` while holding an exclusive lock on the sidecar of `file_path`.
    /// Guards the slot against a second running process instance.
    pub fn with_lock<F, T>(file_path: &Path, f: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        let lock_path = Self::get_lock_path(file_path);
        let file = fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        file.lock_exclusive()?;
        let result = f();
        file.unlock()?;
        result
    }

    /// Atomic write: Write to .tmp file then rename
    pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, contents: C) -> Result<()> {
        let path = path.as_ref();
        let tmp_path = path.with_extension("tmp");
        fs::write(&tmp_path, contents)?;
        fs::rename(tmp_path, path)?;
        Ok(())
    }

    /// Serializes the task list into the durable slot.
    /// Write failures (quota, permissions) propagate to the caller.
    pub fn save(ctx: &dyn AppContext, tasks: &[Task]) -> Result<()> {
        let path = ctx.get_tasks_path()?;
        Self::with_lock(&path, || {
            let json = serde_json::to_string_pretty(tasks)?;
            Self::atomic_write(&path, json)?;
            Ok(())
        })
    }

    /// Reads the task list from the durable slot.
    ///
    /// A missing slot yields an empty list. Content that does not parse as a
    /// task array also yields an empty list; the parse failure is logged but
    /// never propagated. IO and lock errors do propagate.
    pub fn load(ctx: &dyn AppContext) -> Result<Vec<Task>> {
        let path = ctx.get_tasks_path()?;
        if !path.exists() {
            return Ok(vec![]);
        }
        Self::with_lock(&path, || {
            let json = fs::read_to_string(&path)?;
            match serde_json::from_str::<Vec<Task>>(&json) {
                Ok(tasks) => Ok(tasks),
                Err(e) => {
                    log::warn!(
                        "Discarding unreadable task list at {}: {}",
                        path.display(),
                        e
                    );
                    Ok(vec![])
                }
            }
        })
    }
}

#[cfg(test)]
mod storage_tests {
    use super::*;
    use crate::context::TestContext;

    #[test]
    fn test_atomic_write_replaces_contents() {
        let ctx = TestContext::new();
        let path = ctx.get_data_dir().unwrap().join("slot.json");

        LocalStorage::atomic_write(&path, "first").unwrap();
        LocalStorage::atomic_write(&path, "second").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
        // No stale tmp file left behind
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn test_lock_path_appends_to_extension() {
        let lock = LocalStorage::get_lock_path(Path::new("/tmp/tasks.json"));
        assert_eq!(lock, PathBuf::from("/tmp/tasks.json.lock"));

        let bare = LocalStorage::get_lock_path(Path::new("/tmp/tasks"));
        assert_eq!(bare, PathBuf::from("/tmp/tasks.lock"));
    }

    #[test]
    fn test_save_then_load_preserves_tasks() {
        let ctx = TestContext::new();
        let tasks = vec![Task::new("Water plants"), Task::new("Call bank")];

        LocalStorage::save(&ctx, &tasks).unwrap();
        let loaded = LocalStorage::load(&ctx).unwrap();

        assert_eq!(loaded, tasks);
    }

    #[test]
    fn test_load_missing_slot_is_empty() {
        let ctx = TestContext::new();
        assert!(LocalStorage::load(&ctx).unwrap().is_empty());
    }
}
