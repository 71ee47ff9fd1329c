use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;

use crate::error::{CleanupError, HostError};
use crate::host::NameHost;

/// Files in a directory, named by their file stem.
///
/// Renaming keeps the extension. A rename onto an existing file is rejected.
/// Hidden files (leading `.`) are never selected nor eligible.
pub struct FsHost {
    dir: PathBuf,
}

impl FsHost {
    pub fn new<P: AsRef<Path>>(dir: P) -> Result<Self, CleanupError> {
        let dir = dir.as_ref().to_path_buf();

        if !dir.is_dir() {
            return Err(CleanupError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{:?} is not a directory", dir),
            )));
        }

        Ok(FsHost { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Visible regular files of the directory whose file name matches
    /// `pattern`, sorted by file name.
    pub fn select(&self, pattern: Option<&str>) -> Result<Vec<PathBuf>, CleanupError> {
        let match_rex = match pattern {
            Some(pattern) => Some(Regex::new(pattern)?),
            None => None,
        };

        let mut selection = Vec::new();

        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();

            if !path.is_file() || is_hidden(&path) {
                continue;
            }

            let file_name = path.file_name().map(|name| name.to_string_lossy().to_string());

            let matched = match (&match_rex, file_name) {
                (Some(rex), Some(file_name)) => rex.is_match(&file_name),
                (None, Some(_)) => true,
                (_, None) => false,
            };

            if matched {
                selection.push(path);
            }
        }

        selection.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        debug!("selected {} files in {:?}", selection.len(), self.dir);

        Ok(selection)
    }

    fn target_path(handle: &Path, name: &str) -> PathBuf {
        let file_name = match handle.extension() {
            Some(extension) => format!("{}.{}", name, extension.to_string_lossy()),
            None => name.to_string(),
        };
        handle.with_file_name(file_name)
    }
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().starts_with('.'))
        .unwrap_or(false)
}

impl NameHost for FsHost {
    type Handle = PathBuf;

    fn name(&self, handle: &PathBuf) -> Result<String, HostError> {
        if !handle.is_file() {
            return Err(HostError::Read(format!("{:?} is not a file", handle)));
        }

        match handle.file_stem().and_then(|stem| stem.to_str()) {
            Some(stem) => Ok(stem.to_string()),
            None => Err(HostError::Read(format!("{:?} has no valid UTF-8 name", handle))),
        }
    }

    fn set_name(&mut self, handle: &PathBuf, name: &str) -> Result<(), HostError> {
        if name.is_empty() {
            return Err(HostError::EmptyName);
        }

        let target = FsHost::target_path(handle, name);

        if target.exists() && &target != handle {
            return Err(HostError::Rejected {
                name: name.to_string(),
                reason: format!("{:?} already exists", target),
            });
        }

        fs::rename(handle, &target)?;
        Ok(())
    }

    fn refresh_display(&mut self) -> Result<(), HostError> {
        debug!("nothing to refresh for {:?}", self.dir);
        Ok(())
    }

    fn is_eligible(&self, handle: &PathBuf) -> bool {
        handle.is_file() && !is_hidden(handle)
    }
}

#[test]
fn target_path_keeps_extension() {
    let path = Path::new("/media/A002 C014.mov");
    assert_eq!(FsHost::target_path(path, "A002_C014"), Path::new("/media/A002_C014.mov"));

    let path = Path::new("/media/README");
    assert_eq!(FsHost::target_path(path, "read_me"), Path::new("/media/read_me"));

    let path = Path::new("/media/archive.tar.gz");
    assert_eq!(FsHost::target_path(path, "archive_tar"), Path::new("/media/archive_tar.gz"));
}

#[test]
fn hidden_files() {
    assert!(is_hidden(Path::new("/media/.DS_Store")));
    assert!(is_hidden(Path::new(".hidden clip")));
    assert!(!is_hidden(Path::new("/media/clip.mov")));
    assert!(!is_hidden(Path::new("/media/.cache/clip.mov")));
}
