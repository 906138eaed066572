use super::FsError;
use std::env;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Restores the working directory it recorded when dropped, unless [`CurrentDirGuard::restore`]
/// already did so.
struct CurrentDirGuard {
    original: Option<PathBuf>,
}

impl CurrentDirGuard {
    fn enter(path: &Path) -> Result<Self, FsError> {
        let original = env::current_dir().map_err(FsError::CurrentDir)?;
        env::set_current_dir(path).map_err(|e| FsError::ChangeDir {
            path: path.to_path_buf(),
            source: e,
        })?;
        debug!("Entered working directory {:?} (was {:?})", path, &original);
        Ok(Self {
            original: Some(original),
        })
    }

    fn restore(mut self) -> Result<(), FsError> {
        match self.original.take() {
            Some(original) => env::set_current_dir(&original).map_err(|e| FsError::ChangeDir {
                path: original,
                source: e,
            }),
            None => Ok(()),
        }
    }
}

impl Drop for CurrentDirGuard {
    fn drop(&mut self) {
        if let Some(original) = self.original.take() {
            if let Err(e) = env::set_current_dir(&original) {
                warn!("Could not restore working directory {:?}: {}", original, e);
            }
        }
    }
}

/// Runs `body` with the process working directory set to `path`.
///
/// The previous working directory is restored on every exit path, including when `body`
/// returns an error or panics. When `body` fails, its error is returned after restoration and
/// takes precedence over a failure to restore.
///
/// The working directory is process-wide state: this function is not reentrant and two threads
/// calling it concurrently will race. Prefer passing directories explicitly.
///
/// # Errors
///
/// Returns [`FsError::CurrentDir`] or [`FsError::ChangeDir`] if the directory cannot be
/// recorded, entered, or restored, and otherwise whatever `body` returns.
pub fn with_current_dir<T, E, F>(path: &Path, body: F) -> Result<T, E>
where
    F: FnOnce() -> Result<T, E>,
    E: From<FsError>,
{
    let guard = CurrentDirGuard::enter(path)?;
    let result = body();
    let restored = guard.restore();
    let value = result?;
    restored?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;
    use tempfile::tempdir;

    #[derive(Debug)]
    enum TestError {
        Fs(FsError),
        Body,
    }

    impl From<FsError> for TestError {
        fn from(e: FsError) -> Self {
            TestError::Fs(e)
        }
    }

    #[test]
    #[serial]
    fn body_runs_inside_target_and_directory_is_restored() {
        let start = env::current_dir().unwrap();
        let target = tempdir().unwrap();
        let expected = target.path().canonicalize().unwrap();

        let seen: Result<PathBuf, TestError> = with_current_dir(target.path(), || {
            Ok(env::current_dir().unwrap().canonicalize().unwrap())
        });

        assert_eq!(seen.unwrap(), expected);
        assert_eq!(env::current_dir().unwrap(), start);
    }

    #[test]
    #[serial]
    fn directory_is_restored_when_body_fails() {
        let start = env::current_dir().unwrap();
        let target = tempdir().unwrap();

        let result: Result<(), TestError> = with_current_dir(target.path(), || {
            fs::write("written-inside.txt", "x").unwrap();
            Err(TestError::Body)
        });

        assert!(matches!(result, Err(TestError::Body)));
        assert_eq!(env::current_dir().unwrap(), start);
        assert!(target.path().join("written-inside.txt").is_file());
    }

    #[test]
    #[serial]
    fn directory_is_restored_when_body_panics() {
        let start = env::current_dir().unwrap();
        let target = tempdir().unwrap();

        let outcome = std::panic::catch_unwind(|| {
            let _: Result<(), TestError> =
                with_current_dir(target.path(), || panic!("generator blew up"));
        });

        assert!(outcome.is_err());
        assert_eq!(env::current_dir().unwrap(), start);
    }

    #[test]
    #[serial]
    fn missing_target_fails_without_running_body() {
        let start = env::current_dir().unwrap();
        let target = tempdir().unwrap();
        let missing = target.path().join("does-not-exist");
        let mut ran = false;

        let result: Result<(), TestError> = with_current_dir(&missing, || {
            ran = true;
            Ok(())
        });

        assert!(matches!(
            result,
            Err(TestError::Fs(FsError::ChangeDir { .. }))
        ));
        assert!(!ran);
        assert_eq!(env::current_dir().unwrap(), start);
    }
}
