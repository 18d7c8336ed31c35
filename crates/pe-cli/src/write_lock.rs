//! Advisory lock that keeps two pereview processes from rewriting the same
//! dataset at once.
//!
//! The lock is a `<dataset>.lock` file next to the dataset holding the owner's
//! PID. A lock whose PID is no longer running is treated as stale and removed.

use std::ffi::OsString;
use std::fs::OpenOptions;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

const LOCK_RETRY_DELAY: Duration = Duration::from_millis(250);

pub struct WriteLockGuard {
    path: PathBuf,
}

impl Drop for WriteLockGuard {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

/// Lock file path for a dataset: the dataset path with `.lock` appended.
#[must_use]
pub fn lock_path_for(dataset: &Path) -> PathBuf {
    let mut name = dataset
        .file_name()
        .map_or_else(|| OsString::from("dataset"), OsString::from);
    name.push(".lock");
    dataset.with_file_name(name)
}

/// Take the dataset's write lock, waiting up to `timeout` for another holder.
///
/// # Errors
///
/// Fails when another live process still holds the lock after `timeout`, or
/// when the lock file cannot be read.
pub fn acquire_for_dataset(dataset: &Path, timeout: Duration) -> anyhow::Result<WriteLockGuard> {
    let lock_path = lock_path_for(dataset);
    let started = Instant::now();

    loop {
        match try_acquire(&lock_path) {
            Ok(guard) => {
                tracing::debug!(lock = %lock_path.display(), "write lock acquired");
                return Ok(guard);
            }
            Err(LockState::HeldBy(pid)) => {
                if started.elapsed() >= timeout {
                    anyhow::bail!(
                        "another pereview process (pid {pid}) is writing {}; try again after it finishes",
                        dataset.display()
                    );
                }
                std::thread::sleep(LOCK_RETRY_DELAY);
            }
            Err(LockState::Stale) => {
                tracing::warn!(lock = %lock_path.display(), "removing stale write lock");
                let _ = std::fs::remove_file(&lock_path);
            }
            Err(LockState::Unknown) => {
                if started.elapsed() >= timeout {
                    anyhow::bail!(
                        "could not acquire write lock at {}; remove the lock file if no pereview process is running",
                        lock_path.display()
                    );
                }
                std::thread::sleep(LOCK_RETRY_DELAY);
            }
        }
    }
}

#[derive(Debug)]
enum LockState {
    HeldBy(u32),
    Stale,
    Unknown,
}

fn try_acquire(lock_path: &Path) -> Result<WriteLockGuard, LockState> {
    match OpenOptions::new()
        .create_new(true)
        .write(true)
        .open(lock_path)
    {
        Ok(mut file) => {
            let pid = std::process::id();
            let _ = writeln!(file, "{pid}");
            Ok(WriteLockGuard {
                path: lock_path.to_path_buf(),
            })
        }
        Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists => {
            let mut pid_buf = String::new();
            if OpenOptions::new()
                .read(true)
                .open(lock_path)
                .and_then(|mut file| file.read_to_string(&mut pid_buf))
                .is_err()
            {
                return Err(LockState::Unknown);
            }

            match pid_buf.trim().parse::<u32>().ok() {
                Some(pid) if is_process_running(pid) => Err(LockState::HeldBy(pid)),
                Some(_) => Err(LockState::Stale),
                None => Err(LockState::Unknown),
            }
        }
        Err(_) => Err(LockState::Unknown),
    }
}

fn is_process_running(pid: u32) -> bool {
    std::process::Command::new("kill")
        .arg("-0")
        .arg(pid.to_string())
        .stderr(std::process::Stdio::null())
        .status()
        .is_ok_and(|status| status.success())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{acquire_for_dataset, lock_path_for, try_acquire};

    #[test]
    fn lock_sits_next_to_dataset() {
        let path = lock_path_for(std::path::Path::new("/data/reports.csv"));
        assert_eq!(path, std::path::PathBuf::from("/data/reports.csv.lock"));
    }

    #[test]
    fn acquires_and_releases_lock_file() {
        let temp = tempfile::tempdir().expect("tempdir should create");
        let lock_path = temp.path().join("reports.csv.lock");

        let guard = try_acquire(&lock_path).expect("lock should acquire");
        assert!(lock_path.is_file());
        drop(guard);
        assert!(!lock_path.exists());
    }

    #[test]
    fn live_holder_blocks_until_timeout() {
        let temp = tempfile::tempdir().expect("tempdir should create");
        let dataset = temp.path().join("reports.csv");

        let _held = acquire_for_dataset(&dataset, Duration::ZERO).expect("first lock");
        let err = acquire_for_dataset(&dataset, Duration::ZERO)
            .err()
            .expect("second lock should fail");
        assert!(err.to_string().contains("another pereview process"), "{err}");
    }

    #[test]
    fn unparsable_lock_file_times_out() {
        let temp = tempfile::tempdir().expect("tempdir should create");
        let dataset = temp.path().join("reports.csv");
        std::fs::write(lock_path_for(&dataset), "garbage").expect("write lock");

        let err = acquire_for_dataset(&dataset, Duration::ZERO)
            .err()
            .expect("lock should fail");
        assert!(err.to_string().contains("could not acquire write lock"), "{err}");
    }
}
