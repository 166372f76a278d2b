//! Template repository cloning

use crate::error::{Error, Result};
use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;
use tokio::process::Command;
use tracing::{debug, info};

/// Name prefix of every scratch directory created by [`WorkDir`]
pub const WORK_DIR_PREFIX: &str = "create-lcs-";

/// Subdirectory of a [`WorkDir`] that receives the clone
const CLONE_DIR_NAME: &str = "template";

/// Options for cloning a template repository
#[derive(Debug, Clone, Default)]
pub struct CloneOptions {
    /// Shallow clone with specified depth
    pub depth: Option<u32>,
}

/// Scratch directory owned by a single run.
///
/// Always a fresh, uniquely named child of the parent it is created in, so
/// removing it never touches anything the run did not create. Removed on
/// drop; call [`WorkDir::close`] to observe removal errors.
#[derive(Debug)]
pub struct WorkDir {
    dir: TempDir,
    path: Utf8PathBuf,
}

impl WorkDir {
    /// Create a new work directory under `parent`, which must already exist
    pub fn create_in(parent: &Utf8Path) -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix(WORK_DIR_PREFIX)
            .tempdir_in(parent)?;
        let path = Utf8PathBuf::from_path_buf(dir.path().to_path_buf())
            .map_err(|p| Error::invalid_path(p.display().to_string()))?;
        debug!("Created work directory {}", path);
        Ok(Self { dir, path })
    }

    /// Root of the work directory
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Clone destination inside the work directory; git creates it
    pub fn clone_dir(&self) -> Utf8PathBuf {
        self.path.join(CLONE_DIR_NAME)
    }

    /// Remove the work directory and everything cloned into it
    pub fn close(self) -> Result<()> {
        debug!("Removing work directory {}", self.path);
        self.dir.close()?;
        Ok(())
    }
}

/// Clone a repository into `destination`.
///
/// `destination` must not exist yet; git creates it.
///
/// # Errors
/// Returns error if:
/// - Invalid repository URL
/// - git is not installed
/// - Destination already exists
/// - git exits unsuccessfully
pub async fn clone_repository(
    url: &str,
    destination: &Utf8Path,
    options: &CloneOptions,
) -> Result<Utf8PathBuf> {
    info!("Cloning repository: {} -> {}", url, destination);

    if !is_valid_repo_url(url) {
        return Err(Error::invalid_repo_url(url));
    }

    which::which("git").map_err(|_| Error::GitNotFound)?;

    if destination.exists() {
        return Err(Error::clone_failed(format!(
            "destination already exists: {}",
            destination
        )));
    }

    let mut cmd = Command::new("git");
    cmd.arg("clone");

    if let Some(depth) = options.depth {
        cmd.arg("--depth").arg(depth.to_string());
    }

    cmd.arg(url).arg(destination.as_str());

    debug!("Running: git clone");
    let output = cmd.output().await?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let code = output.status.code().unwrap_or(-1);
        return Err(Error::clone_failed(format!(
            "git clone exited with code {}: {}",
            code,
            stderr.trim()
        )));
    }

    info!("Repository cloned successfully");
    Ok(destination.to_path_buf())
}

/// Validate if a string is a valid repository URL
pub fn is_valid_repo_url(url: &str) -> bool {
    url.starts_with("https://") || url.starts_with("git@") || url.starts_with("http://")
}
