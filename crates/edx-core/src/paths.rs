use edx_schema::RESOURCE_HEADER;
use std::path::{Path, PathBuf};

/// Resource header path under a repository root: `<root>/edX/config/resource.h`.
pub fn resource_path(root: &Path) -> PathBuf {
    root.join(RESOURCE_HEADER)
}

/// Walk up from `start` to the first directory that contains the resource
/// header.
pub fn find_repo_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| resource_path(dir).is_file())
        .map(Path::to_path_buf)
}

/// Pick the header to operate on.
///
/// An explicit `file` wins, then an explicit `root`. Otherwise the repository
/// root is discovered upward from `cwd`, then upward from the directory
/// holding `exe` (the running binary). When nothing is found the path
/// relative to `cwd` is returned so the caller reports it as missing.
pub fn resolve_target(
    file: Option<&Path>,
    root: Option<&Path>,
    cwd: &Path,
    exe: Option<&Path>,
) -> PathBuf {
    if let Some(file) = file {
        return file.to_path_buf();
    }
    if let Some(root) = root {
        return resource_path(root);
    }
    let root = find_repo_root(cwd)
        .or_else(|| exe.and_then(Path::parent).and_then(find_repo_root))
        .unwrap_or_else(|| cwd.to_path_buf());
    resource_path(&root)
}
