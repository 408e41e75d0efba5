use std::{
    path::PathBuf,
    sync::{Mutex, OnceLock},
};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

/// Holds the process-wide env lock while `FEEDBOX_*` variables are changed.
pub struct FeedboxEnvGuard {
    previous: Vec<(&'static str, Option<String>)>,
    _lock: std::sync::MutexGuard<'static, ()>,
}

impl FeedboxEnvGuard {
    pub fn lock() -> Self {
        let lock = ENV_LOCK
            .get_or_init(|| Mutex::new(()))
            .lock()
            .unwrap_or_else(|err| err.into_inner());
        Self {
            previous: Vec::new(),
            _lock: lock,
        }
    }

    pub fn set_config_home(self, path: PathBuf) -> Self {
        self.set("FEEDBOX_CONFIG_HOME", path.to_string_lossy().into_owned())
    }

    pub fn set(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.previous.push((key, std::env::var(key).ok()));
        // SAFETY: tests run under a global lock to prevent concurrent env mutations.
        unsafe {
            std::env::set_var(key, value.into());
        }
        self
    }
}

impl Drop for FeedboxEnvGuard {
    fn drop(&mut self) {
        for (key, value) in self.previous.drain(..).rev() {
            match value {
                // SAFETY: tests run under a global lock to prevent concurrent env mutations.
                Some(value) => unsafe { std::env::set_var(key, value) },
                // SAFETY: tests run under a global lock to prevent concurrent env mutations.
                None => unsafe { std::env::remove_var(key) },
            }
        }
    }
}
