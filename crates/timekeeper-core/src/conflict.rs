use std::path::{Path, PathBuf};

/// Return `candidate` if nothing is there, otherwise the first free
/// `<stem>_<N><.ext>` with N counting up from 1.
///
/// There is no upper bound on N. A directory holding an enormous run of
/// same-named files makes this scan linearly through all of them.
pub fn unique_path(candidate: &Path) -> PathBuf {
    unique_path_with(candidate, |p| p.exists())
}

/// Same as [`unique_path`] with a caller-supplied notion of "taken".
pub fn unique_path_with(candidate: &Path, mut taken: impl FnMut(&Path) -> bool) -> PathBuf {
    if !taken(candidate) {
        return candidate.to_path_buf();
    }

    let dir = candidate.parent().unwrap_or_else(|| Path::new(""));
    let stem = candidate
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "file".to_string());
    let ext = candidate
        .extension()
        .map(|s| s.to_string_lossy().into_owned());

    let mut counter = 1u64;
    loop {
        let new_name = match &ext {
            Some(ext) => format!("{}_{}.{}", stem, counter, ext),
            None => format!("{}_{}", stem, counter),
        };
        let path = dir.join(new_name);
        if !taken(&path) {
            return path;
        }
        counter += 1;
    }
}
