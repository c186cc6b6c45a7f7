//! # File I/O Module
//!
//! Project file operations for the excluded UI layer. The engine never
//! touches this module; it exists so settings and draft estimates survive
//! between sessions.
//!
//! - **Atomic saves**: write to .tmp, fsync, rename - no torn files
//! - **File locking**: prevent concurrent edits on shared drives
//! - **Version validation**: ensure schema compatibility
//!
//! ## File Format
//!
//! Projects are saved as `.dig` files containing JSON. Lock files use the
//! `.dig.lock` extension with metadata about who holds the lock.
//!
//! ## Example
//!
//! ```rust,no_run
//! use dig_core::file_io::{save_project, load_project, FileLock};
//! use dig_core::project::Project;
//! use std::path::Path;
//!
//! let project = Project::new("Estimator", "25-001", "Client");
//! let path = Path::new("mainline.dig");
//!
//! // Acquire lock before saving
//! let lock = FileLock::acquire(path, "estimator@company.com").unwrap();
//!
//! save_project(&project, path).unwrap();
//!
//! // Lock is released when dropped
//! drop(lock);
//! ```

use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::project::{Project, SCHEMA_VERSION};

/// Lock file metadata stored in .dig.lock files
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
}

/// Get the hostname of the current machine
fn hostname() -> Option<String> {
    #[cfg(windows)]
    {
        std::env::var("COMPUTERNAME").ok()
    }
    #[cfg(not(windows))]
    {
        std::env::var("HOSTNAME")
            .ok()
            .or_else(|| std::env::var("HOST").ok())
    }
}

/// File lock guard that releases the lock when dropped.
///
/// Uses both:
/// 1. OS-level file locking (via fs2) for process safety
/// 2. .lock file with metadata for user visibility
pub struct FileLock {
    /// Path to the main project file
    project_path: PathBuf,
    /// Path to the lock file
    lock_path: PathBuf,
    /// The underlying file handle (keeps OS lock)
    _lock_file: File,
    /// Lock metadata
    pub info: LockInfo,
}

impl FileLock {
    /// Acquire an exclusive lock on a project file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the .dig project file
    /// * `user_id` - Identifier for the user acquiring the lock
    ///
    /// # Returns
    ///
    /// * `Ok(FileLock)` - Lock acquired successfully
    /// * `Err(CalcError::FileLocked)` - Another process holds the lock
    pub fn acquire(path: &Path, user_id: impl Into<String>) -> CalcResult<Self> {
        let lock_path = lock_path_for(path);
        let info = LockInfo::new(user_id);

        // A live lock file from someone else blocks us; a stale one does not
        if lock_path.exists() {
            if let Ok(existing) = read_lock_info(&lock_path) {
                if !is_lock_stale(&existing) {
                    return Err(CalcError::file_locked(
                        path.display().to_string(),
                        format!("{} ({})", existing.user_id, existing.machine),
                        existing.locked_at.to_rfc3339(),
                    ));
                }
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

        // Non-blocking exclusive OS-level lock
        lock_file.try_lock_exclusive().map_err(|_| {
            CalcError::file_locked(
                path.display().to_string(),
                "another process".to_string(),
                "unknown".to_string(),
            )
        })?;

        let lock_json = serde_json::to_string_pretty(&info).map_err(|e| {
            CalcError::SerializationError {
                reason: e.to_string(),
            }
        })?;

        lock_file.write_all(lock_json.as_bytes()).map_err(|e| {
            CalcError::file_error("write lock", lock_path.display().to_string(), e.to_string())
        })?;

        lock_file.sync_all().map_err(|e| {
            CalcError::file_error("sync lock", lock_path.display().to_string(), e.to_string())
        })?;

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
        if lock_path.exists() {
            if let Ok(info) = read_lock_info(&lock_path) {
                if !is_lock_stale(&info) {
                    return Some(info);
                }
            }
        }
        None
    }

    /// Get the path to the project file
    pub fn project_path(&self) -> &Path {
        &self.project_path
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        // OS lock is released when _lock_file is dropped
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

/// Read lock info from a lock file
fn read_lock_info(lock_path: &Path) -> CalcResult<LockInfo> {
    let mut file = File::open(lock_path).map_err(|e| {
        CalcError::file_error("read lock", lock_path.display().to_string(), e.to_string())
    })?;

    let mut contents = String::new();
    file.read_to_string(&mut contents).map_err(|e| {
        CalcError::file_error("read lock", lock_path.display().to_string(), e.to_string())
    })?;

    serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
        reason: e.to_string(),
    })
}

/// Check if a lock is stale (the owning process is gone or the lock is old)
fn is_lock_stale(info: &LockInfo) -> bool {
    if let Some(our_machine) = hostname() {
        if info.machine == our_machine {
            // Same machine - check whether the process still exists
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

    // Locks older than a day are stale regardless of origin
    let age = Utc::now() - info.locked_at;
    age.num_hours() > 24
}

/// Save a project to a file with atomic write semantics.
///
/// The save process:
/// 1. Serialize project to JSON
/// 2. Write to a temporary file (.tmp)
/// 3. Sync to disk (fsync)
/// 4. Rename .tmp to .dig (atomic on most filesystems)
///
/// This prevents corruption if the process is interrupted mid-write.
pub fn save_project(project: &Project, path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(project).map_err(|e| CalcError::SerializationError {
        reason: e.to_string(),
    })?;

    let tmp_path = path.with_extension("dig.tmp");

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
        // Clean up temp file if rename fails
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    Ok(())
}

/// Load a project from a file.
///
/// # Returns
///
/// * `Ok(Project)` - Successfully loaded project
/// * `Err(CalcError::VersionMismatch)` - File version is incompatible
/// * `Err(CalcError::SerializationError)` - Invalid JSON
/// * `Err(CalcError::FileError)` - I/O error
pub fn load_project(path: &Path) -> CalcResult<Project> {
    let mut file = File::open(path)
        .map_err(|e| CalcError::file_error("open", path.display().to_string(), e.to_string()))?;

    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;

    let project: Project =
        serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
            reason: format!("Invalid JSON in {}: {}", path.display(), e),
        })?;

    validate_version(&project.meta.version)?;

    Ok(project)
}

/// Load a project, returning whether it's read-only due to a lock.
///
/// # Returns
///
/// * `Ok((Project, None))` - Loaded successfully, no lock
/// * `Ok((Project, Some(LockInfo)))` - Loaded, but another user has the lock
pub fn load_project_with_lock_check(path: &Path) -> CalcResult<(Project, Option<LockInfo>)> {
    let project = load_project(path)?;
    let lock_info = FileLock::check(path);
    Ok((project, lock_info))
}

/// Validate that a file version is compatible with the current schema.
fn validate_version(file_version: &str) -> CalcResult<()> {
    let file_parts: Vec<u32> = file_version
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();
    let current_parts: Vec<u32> = SCHEMA_VERSION
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();

    if file_parts.is_empty() || current_parts.is_empty() {
        return Err(CalcError::VersionMismatch {
            file_version: file_version.to_string(),
            expected_version: SCHEMA_VERSION.to_string(),
        });
    }

    // Major version must match
    if file_parts[0] != current_parts[0] {
        return Err(CalcError::VersionMismatch {
            file_version: file_version.to_string(),
            expected_version: SCHEMA_VERSION.to_string(),
        });
    }

    // For 0.x versions, a newer minor than ours is also incompatible
    if current_parts[0] == 0
        && file_parts.len() > 1
        && current_parts.len() > 1
        && file_parts[1] > current_parts[1]
    {
        return Err(CalcError::VersionMismatch {
            file_version: file_version.to_string(),
            expected_version: SCHEMA_VERSION.to_string(),
        });
    }

    Ok(())
}
