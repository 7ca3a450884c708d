//! Shared environment guards and worker discovery for integration tests.

use camino::Utf8PathBuf;
use std::env;
use std::ffi::{OsStr, OsString};
use std::sync::{Mutex, MutexGuard, OnceLock};

static ENV_MUTEX: OnceLock<Mutex<()>> = OnceLock::new();

/// Guard that applies a scoped environment variable update.
pub struct EnvVarGuard {
    previous: Vec<(OsString, Option<OsString>)>,
    _lock: MutexGuard<'static, ()>,
}

impl EnvVarGuard {
    /// Sets multiple environment variables for the guard lifetime.
    pub fn set_many(changes: &[(OsString, Option<OsString>)]) -> Self {
        let lock = env_lock();
        let mut previous = Vec::with_capacity(changes.len());

        for (key, value) in changes {
            previous.push((key.clone(), env::var_os(key)));
            unsafe {
                // SAFETY: the global mutex serializes environment mutations in tests.
                match value {
                    Some(new_value) => env::set_var(key, new_value),
                    None => env::remove_var(key),
                }
            }
        }

        Self {
            previous,
            _lock: lock,
        }
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        for (key, value) in self.previous.drain(..) {
            unsafe {
                // SAFETY: the global mutex serializes environment mutations in tests.
                match value {
                    Some(previous) => env::set_var(&key, &previous),
                    None => env::remove_var(&key),
                }
            }
        }
    }
}

fn env_lock() -> MutexGuard<'static, ()> {
    ENV_MUTEX
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
}

/// Executable name of the `PostgreSQL` worker helper.
pub const PG_WORKER_BINARY: &str = "pg_worker";

/// Locates the `pg_worker` binary used when tests run as root.
///
/// Looks at `PG_EMBEDDED_WORKER`, then `~/.cargo/bin`, then the cargo
/// target directory, then every `PATH` entry.
pub fn locate_pg_worker_path() -> Option<Utf8PathBuf> {
    locate_pg_worker_from_env().or_else(|| locate_pg_worker_in(candidate_dirs()))
}

/// Returns the first directory in `dirs` holding a `pg_worker` file.
pub fn locate_pg_worker_in(dirs: impl IntoIterator<Item = Utf8PathBuf>) -> Option<Utf8PathBuf> {
    dirs.into_iter()
        .map(|dir| dir.join(PG_WORKER_BINARY))
        .find(|candidate| candidate.is_file())
}

fn candidate_dirs() -> Vec<Utf8PathBuf> {
    let mut dirs = Vec::new();
    if let Some(home) = env::var_os("HOME").and_then(|home| utf8_path_from_os(&home)) {
        dirs.push(home.join(".cargo").join("bin"));
    }
    if let Some(target) = target_dir() {
        dirs.push(target);
    }
    if let Some(path) = env::var_os("PATH") {
        dirs.extend(
            env::split_paths(&path).filter_map(|entry| utf8_path_from_os(entry.as_os_str())),
        );
    }
    dirs
}

fn target_dir() -> Option<Utf8PathBuf> {
    let exe_path = env::current_exe().ok()?;
    let exe_path_utf8 = utf8_path_from_os(exe_path.as_os_str())?;
    let deps_dir = exe_path_utf8.parent()?;
    deps_dir.parent().map(camino::Utf8Path::to_path_buf)
}

fn locate_pg_worker_from_env() -> Option<Utf8PathBuf> {
    let worker_path = env::var_os("PG_EMBEDDED_WORKER")?;
    let worker_path_utf8 = utf8_path_from_os(&worker_path)?;
    let file_stem = worker_path_utf8.file_stem()?;
    (file_stem == PG_WORKER_BINARY && worker_path_utf8.is_file()).then_some(worker_path_utf8)
}

fn utf8_path_from_os(value: &OsStr) -> Option<Utf8PathBuf> {
    Some(Utf8PathBuf::from(value.to_os_string().into_string().ok()?))
}
