use super::FsError;
use std::collections::HashSet;
use std::fs::{self, File, Metadata};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{debug, trace};

/// The metadata that identifies one version of a directory entry.
///
/// Two stamps compare equal only when nothing observable about the entry changed, so a file
/// that was rewritten in place (same path, new contents or timestamps) yields a new stamp.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileStamp {
    is_file: bool,
    len: u64,
    modified: Option<SystemTime>,
    #[cfg(unix)]
    unix: UnixStamp,
}

#[cfg(unix)]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct UnixStamp {
    dev: u64,
    ino: u64,
    mode: u32,
    ctime: i64,
    ctime_nsec: i64,
}

impl FileStamp {
    fn from_metadata(metadata: &Metadata) -> Self {
        Self {
            is_file: metadata.file_type().is_file(),
            len: metadata.len(),
            modified: metadata.modified().ok(),
            #[cfg(unix)]
            unix: {
                use std::os::unix::fs::MetadataExt;
                UnixStamp {
                    dev: metadata.dev(),
                    ino: metadata.ino(),
                    mode: metadata.mode(),
                    ctime: metadata.ctime(),
                    ctime_nsec: metadata.ctime_nsec(),
                }
            },
        }
    }

    pub fn is_file(&self) -> bool {
        self.is_file
    }
}

/// The direct entries of a directory and their stamps at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    entries: HashSet<(PathBuf, FileStamp)>,
}

impl Snapshot {
    /// Records every direct entry of `directory`. Symlinks are stamped without being followed.
    pub fn capture(directory: &Path) -> Result<Self, FsError> {
        let mut entries = HashSet::new();
        for entry in read_dir(directory)? {
            let entry = entry.map_err(|e| FsError::ReadDir {
                path: directory.to_path_buf(),
                source: e,
            })?;
            let path = entry.path();
            let metadata = fs::symlink_metadata(&path).map_err(|e| FsError::Metadata {
                path: path.clone(),
                source: e,
            })?;
            entries.insert((path, FileStamp::from_metadata(&metadata)));
        }
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries of `self` that are absent from `earlier`, compared by path and stamp.
    pub fn changed_since<'a>(
        &'a self,
        earlier: &'a Snapshot,
    ) -> impl Iterator<Item = (&'a Path, &'a FileStamp)> + 'a {
        self.entries
            .difference(&earlier.entries)
            .map(|(path, stamp)| (path.as_path(), stamp))
    }
}

/// Copies every regular file that is a direct child of `source` into `dest`.
///
/// Same-named files in `dest` are overwritten and modification times are carried over.
/// Directories, symlinks and other special entries are skipped.
///
/// # Errors
///
/// Returns an [`FsError`] if `source` cannot be listed or a file cannot be copied.
pub fn copy_files(source: &Path, dest: &Path) -> Result<usize, FsError> {
    if is_same_directory(source, dest) {
        debug!("Source and destination are both {:?}; nothing to copy.", source);
        return Ok(0);
    }

    let mut copied = 0;
    for entry in read_dir(source)? {
        let entry = entry.map_err(|e| FsError::ReadDir {
            path: source.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        let file_type = entry.file_type().map_err(|e| FsError::Metadata {
            path: path.clone(),
            source: e,
        })?;
        if !file_type.is_file() {
            trace!("Skipping non-regular entry {:?}", &path);
            continue;
        }
        copy_preserving_mtime(&path, dest)?;
        copied += 1;
    }
    debug!("Copied {} file(s) from {:?} to {:?}", copied, source, dest);
    Ok(copied)
}

/// Runs `body`, then copies into `dest` the regular files of `source` it created or modified.
///
/// A file counts as modified when any part of its stamp changed, so a pre-existing file the
/// body rewrote is copied while untouched pre-existing files are not. When `body` fails
/// nothing is copied and its error is returned.
///
/// # Errors
///
/// Returns an [`FsError`] if either snapshot or a copy fails, and otherwise whatever `body`
/// returns.
pub fn copy_new_files<T, E, F>(source: &Path, dest: &Path, body: F) -> Result<T, E>
where
    F: FnOnce() -> Result<T, E>,
    E: From<FsError>,
{
    let before = Snapshot::capture(source)?;
    let value = body()?;
    let after = Snapshot::capture(source)?;

    if is_same_directory(source, dest) {
        debug!("Source and destination are both {:?}; nothing to copy back.", source);
        return Ok(value);
    }

    let mut copied = 0;
    for (path, stamp) in after.changed_since(&before) {
        if !stamp.is_file() {
            trace!("Skipping non-regular changed entry {:?}", path);
            continue;
        }
        copy_preserving_mtime(path, dest)?;
        copied += 1;
    }
    debug!(
        "Copied {} new or modified file(s) from {:?} to {:?}",
        copied, source, dest
    );
    Ok(value)
}

fn read_dir(directory: &Path) -> Result<fs::ReadDir, FsError> {
    fs::read_dir(directory).map_err(|e| FsError::ReadDir {
        path: directory.to_path_buf(),
        source: e,
    })
}

fn copy_preserving_mtime(path: &Path, dest_dir: &Path) -> Result<(), FsError> {
    let Some(name) = path.file_name() else {
        return Ok(());
    };
    let target = dest_dir.join(name);
    let copy_err = |e: std::io::Error| FsError::Copy {
        from: path.to_path_buf(),
        to: target.clone(),
        source: e,
    };

    fs::copy(path, &target).map_err(copy_err)?;

    // Setting times needs ownership, not write access; `fs::copy` carries read-only modes over.
    let modified = fs::metadata(path).and_then(|m| m.modified());
    if let Ok(modified) = modified {
        File::open(&target)
            .and_then(|f| f.set_modified(modified))
            .map_err(copy_err)?;
    }
    Ok(())
}

fn is_same_directory(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
