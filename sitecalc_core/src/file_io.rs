//! # File I/O Module
//!
//! Handles project file operations with safety features:
//! - **Atomic saves**: Write to .tmp, sync, rename so a crash never leaves half a file
//! - **File locking**: Stop two estimators editing the same job on a shared drive
//! - **Version validation**: Refuse files written by a newer schema
//!
//! ## File Format
//!
//! Projects are saved as `.scp` (SiteCalc Project) files containing JSON.
//! Lock files use the `.scp.lock` extension and record who holds the lock.
//!
//! ## Example
//!
//! ```rust,no_run
//! use sitecalc_core::file_io::{save_project, load_project, FileLock};
//! use sitecalc_core::project::Project;
//! use std::path::Path;
//!
//! let project = Project::new("Villa", "Estimator");
//! let path = Path::new("villa.scp");
//!
//! let lock = FileLock::acquire(path, "estimator@site.com").unwrap();
//! save_project(&project, path).unwrap();
//! drop(lock);
//!
//! let reloaded = load_project(path).unwrap();
//! assert_eq!(reloaded.meta.name, "Villa");
//! ```

use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::errors::{CalcError, CalcResult};
use crate::project::{Project, SCHEMA_VERSION};

/// Extension of project files
pub const PROJECT_EXTENSION: &str = "scp";

/// Locks older than this are treated as abandoned
const STALE_LOCK_HOURS: i64 = 24;

/// Lock file metadata stored in .scp.lock files
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockInfo {
    /// User identifier (email or username)
    pub user_id: String,
    /// Machine name where lock was acquired
    pub machine: String,
    /// Process ID that holds the lock
    pub pid: u32,
    /// When the lock was acquired
    pub locked_at: DateTime<Utc>,
}

impl LockInfo {
    /// Create new lock info for the current process
    pub fn new(user_id: impl Into<String>) -> Self {
        LockInfo {
            user_id: user_id.into(),
            machine: hostname().unwrap_or_else(|| "unknown".to_string()),
            pid: std::process::id(),
            locked_at: Utc::now(),
        }
    }

    /// "user (machine)" for messages
    pub fn holder(&self) -> String {
        format!("{} ({})", self.user_id, self.machine)
    }
}

fn hostname() -> Option<String> {
    whoami::fallible::hostname().ok().filter(|name| !name.is_empty())
}

/// File lock guard that releases the lock when dropped.
///
/// Combines an OS-level advisory lock (fs2) with a `.lock` sidecar that
/// tells other users who is holding the file.
#[derive(Debug)]
pub struct FileLock {
    project_path: PathBuf,
    lock_path: PathBuf,
    /// Keeps the OS lock alive
    _lock_file: File,
    pub info: LockInfo,
}

impl FileLock {
    /// Acquire an exclusive lock on a project file.
    ///
    /// # Returns
    ///
    /// * `Ok(FileLock)` - Lock acquired
    /// * `Err(CalcError::FileLocked)` - Someone else holds a live lock
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use sitecalc_core::file_io::FileLock;
    /// use std::path::Path;
    ///
    /// let lock = FileLock::acquire(Path::new("villa.scp"), "user@email.com")?;
    /// drop(lock);
    /// # Ok::<(), sitecalc_core::errors::CalcError>(())
    /// ```
    pub fn acquire(path: &Path, user_id: impl Into<String>) -> CalcResult<Self> {
        let lock_path = lock_path_for(path);
        let info = LockInfo::new(user_id);

        if lock_path.exists() {
            if let Ok(existing) = read_lock_info(&lock_path) {
                if !is_lock_stale(&existing) {
                    return Err(CalcError::file_locked(
                        path.display().to_string(),
                        existing.holder(),
                        existing.locked_at.to_rfc3339(),
                    ));
                }
                warn!(path = %path.display(), holder = %existing.holder(), "taking over stale lock");
            }
        }

        let mut lock_file = OpenOptions::new()
            .write(true)
            .read(true)
            .create(true)
            .truncate(true)
            .open(&lock_path)
            .map_err(|e| {
                CalcError::file_error("create lock", lock_path.display().to_string(), e.to_string())
            })?;

        lock_file.try_lock_exclusive().map_err(|_| {
            CalcError::file_locked(path.display().to_string(), "another process", "unknown")
        })?;

        let lock_json = serde_json::to_string_pretty(&info)?;

        lock_file.write_all(lock_json.as_bytes()).map_err(|e| {
            CalcError::file_error("write lock", lock_path.display().to_string(), e.to_string())
        })?;

        lock_file.sync_all().map_err(|e| {
            CalcError::file_error("sync lock", lock_path.display().to_string(), e.to_string())
        })?;

        debug!(path = %path.display(), user = %info.user_id, "lock acquired");

        Ok(FileLock {
            project_path: path.to_path_buf(),
            lock_path,
            _lock_file: lock_file,
            info,
        })
    }

    /// Check if a file is locked without acquiring the lock.
    ///
    /// Returns `Some(LockInfo)` if locked, `None` if available.
    pub fn check(path: &Path) -> Option<LockInfo> {
        let lock_path = lock_path_for(path);
        if !lock_path.exists() {
            return None;
        }
        read_lock_info(&lock_path)
            .ok()
            .filter(|info| !is_lock_stale(info))
    }

    /// Get the path to the project file
    pub fn project_path(&self) -> &Path {
        &self.project_path
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        // OS lock goes with _lock_file
        let _ = fs::remove_file(&self.lock_path);
    }
}

/// Get the lock file path for a project file
fn lock_path_for(project_path: &Path) -> PathBuf {
    let mut lock_path = project_path.to_path_buf();
    let extension = lock_path
        .extension()
        .map(|e| format!("{}.lock", e.to_string_lossy()))
        .unwrap_or_else(|| "lock".to_string());
    lock_path.set_extension(extension);
    lock_path
}

fn read_lock_info(lock_path: &Path) -> CalcResult<LockInfo> {
    let contents = read_to_string(lock_path, "read lock")?;
    Ok(serde_json::from_str(&contents)?)
}

/// A lock is stale when its process is gone (same machine) or it is older
/// than a day.
fn is_lock_stale(info: &LockInfo) -> bool {
    if let Some(our_machine) = hostname() {
        if info.machine == our_machine {
            #[cfg(windows)]
            {
                use std::process::Command;
                let output = Command::new("tasklist")
                    .args(["/FI", &format!("PID eq {}", info.pid), "/NH"])
                    .output();
                if let Ok(output) = output {
                    let stdout = String::from_utf8_lossy(&output.stdout);
                    if stdout.contains("No tasks") || !stdout.contains(&info.pid.to_string()) {
                        return true;
                    }
                }
            }
            #[cfg(unix)]
            {
                if fs::metadata(format!("/proc/{}", info.pid)).is_err() {
                    return true;
                }
            }
        }
    }

    let age = Utc::now() - info.locked_at;
    age.num_hours() > STALE_LOCK_HOURS
}

fn read_to_string(path: &Path, operation: &str) -> CalcResult<String> {
    let mut file = File::open(path)
        .map_err(|e| CalcError::file_error(operation, path.display().to_string(), e.to_string()))?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|e| CalcError::file_error(operation, path.display().to_string(), e.to_string()))?;
    Ok(contents)
}

/// Save a project to a file with atomic write semantics.
///
/// 1. Check the project has a name
/// 2. Serialize to JSON
/// 3. Write to `<path>.scp.tmp` and fsync
/// 4. Rename over the target (atomic on most filesystems)
///
/// # Errors
///
/// * `CalcError::MissingField` - The project has no name
/// * `CalcError::FileError` - Any I/O step failed
pub fn save_project(project: &Project, path: &Path) -> CalcResult<()> {
    project.validate_for_save()?;

    let json = serde_json::to_string_pretty(project)?;

    let tmp_path = path.with_extension(format!("{}.tmp", PROJECT_EXTENSION));

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(json.as_bytes()).map_err(|e| {
        CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    info!(
        path = %path.display(),
        name = %project.meta.name,
        members = project.member_count(),
        elements = project.element_count(),
        "project saved"
    );
    Ok(())
}

/// Load a project from a file.
///
/// # Errors
///
/// * `CalcError::VersionMismatch` - File written by an incompatible schema
/// * `CalcError::SerializationError` - Invalid JSON
/// * `CalcError::FileError` - I/O error
pub fn load_project(path: &Path) -> CalcResult<Project> {
    let contents = read_to_string(path, "read")?;

    let project: Project =
        serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
            reason: format!("Invalid JSON in {}: {}", path.display(), e),
        })?;

    validate_version(&project.meta.version)?;

    info!(path = %path.display(), name = %project.meta.name, "project loaded");
    Ok(project)
}

/// Load a project, also reporting whether someone else holds its lock.
pub fn load_project_with_lock_check(path: &Path) -> CalcResult<(Project, Option<LockInfo>)> {
    let project = load_project(path)?;
    let lock_info = FileLock::check(path);
    Ok((project, lock_info))
}

/// Major versions must match; within 0.x the file's minor version may not
/// be newer than ours.
fn validate_version(file_version: &str) -> CalcResult<()> {
    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let parse = |v: &str| -> Vec<u32> { v.split('.').filter_map(|p| p.parse().ok()).collect() };
    let file_parts = parse(file_version);
    let current_parts = parse(SCHEMA_VERSION);

    if file_parts.is_empty() || current_parts.is_empty() {
        return Err(mismatch());
    }

    if file_parts[0] != current_parts[0] {
        return Err(mismatch());
    }

    if current_parts[0] == 0
        && file_parts.len() > 1
        && current_parts.len() > 1
        && file_parts[1] > current_parts[1]
    {
        return Err(mismatch());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimate::Member;
    use std::env::temp_dir;

    fn temp_project_path(name: &str) -> PathBuf {
        temp_dir().join(format!("sitecalc_test_{}_{}.scp", name, std::process::id()))
    }

    #[test]
    fn test_lock_path_generation() {
        let project_path = Path::new("/path/to/villa.scp");
        let lock_path = lock_path_for(project_path);
        assert_eq!(lock_path, Path::new("/path/to/villa.scp.lock"));
    }

    #[test]
    fn test_lock_info_creation() {
        let info = LockInfo::new("test@example.com");
        assert_eq!(info.user_id, "test@example.com");
        assert!(info.pid > 0);
        assert!(info.holder().starts_with("test@example.com ("));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let path = temp_project_path("roundtrip");

        let mut project = Project::new("Test Villa", "Test Estimator");
        project.add_member(Member::sample_column());
        save_project(&project, &path).unwrap();

        let loaded = load_project(&path).unwrap();
        assert_eq!(loaded.meta.name, "Test Villa");
        assert_eq!(loaded.meta.estimator, "Test Estimator");
        assert_eq!(loaded.members, project.members);
        assert_eq!(loaded.totals(), project.totals());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_save_rejects_unnamed_project() {
        let path = temp_project_path("unnamed");
        let project = Project::new("", "Someone");
        let err = save_project(&project, &path).unwrap_err();
        assert_eq!(err.error_code(), "MISSING_FIELD");
        assert!(!path.exists());
    }

    #[test]
    fn test_atomic_save_creates_no_tmp_file() {
        let path = temp_project_path("atomic");
        let tmp_path = path.with_extension("scp.tmp");

        let project = Project::new("Atomic", "E");
        save_project(&project, &path).unwrap();

        assert!(!tmp_path.exists());
        assert!(path.exists());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_file_lock_acquire_and_release() {
        let path = temp_project_path("lock_test");
        File::create(&path).unwrap();

        let lock = FileLock::acquire(&path, "test@example.com").unwrap();
        assert_eq!(lock.info.user_id, "test@example.com");
        assert_eq!(lock.project_path(), path.as_path());

        let lock_path = lock_path_for(&path);
        assert!(lock_path.exists());

        drop(lock);
        assert!(!lock_path.exists());

        let _ = fs::remove_file(&path);
    }

    fn write_lock(path: &Path, info: &LockInfo) {
        fs::write(lock_path_for(path), serde_json::to_string_pretty(info).unwrap()).unwrap();
    }

    #[test]
    fn test_machine_name_resolved_without_env() {
        let info = LockInfo::new("someone");
        assert_ne!(info.machine, "unknown");
        assert_eq!(Some(info.machine), hostname());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_dead_process_lock_is_taken_over() {
        let path = temp_project_path("crashed_lock");
        File::create(&path).unwrap();

        let mut crashed = LockInfo::new("crashed@site");
        crashed.pid = u32::MAX;
        write_lock(&path, &crashed);
        assert!(FileLock::check(&path).is_none());

        let lock = FileLock::acquire(&path, "next@site").unwrap();
        assert_eq!(lock.info.user_id, "next@site");
        drop(lock);

        let _ = fs::remove_file(&path);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_live_process_lock_blocks() {
        let path = temp_project_path("live_lock");
        File::create(&path).unwrap();

        let holder = LockInfo::new("busy@site");
        write_lock(&path, &holder);

        let err = FileLock::acquire(&path, "next@site").unwrap_err();
        assert_eq!(err.error_code(), "FILE_LOCKED");
        assert!(FileLock::check(&path).is_some());

        let _ = fs::remove_file(lock_path_for(&path));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_rejects_garbage() {
        let path = temp_project_path("garbage");
        fs::write(&path, "not json").unwrap();
        let err = load_project(&path).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_project(&temp_project_path("does_not_exist")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }

    #[test]
    fn test_version_validation() {
        assert!(validate_version(SCHEMA_VERSION).is_ok());
        assert!(validate_version("0.1.0").is_ok());
        assert!(validate_version("0.1.5").is_ok());
        assert!(validate_version("1.0.0").is_err());
        assert!(validate_version("0.2.0").is_err());
        assert!(validate_version("garbage").is_err());
    }

    #[test]
    fn test_load_with_lock_check() {
        let path = temp_project_path("lock_check");

        let project = Project::new("Lock Check", "E");
        save_project(&project, &path).unwrap();

        let (loaded, lock_info) = load_project_with_lock_check(&path).unwrap();
        assert_eq!(loaded.meta.name, "Lock Check");
        assert!(lock_info.is_none());

        let _ = fs::remove_file(&path);
    }
}
