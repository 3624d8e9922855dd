use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use url::Url;

/// Longest base name kept before collision suffixes are added
pub const MAX_BASE_LEN: usize = 150;

/// Base name used for URLs whose path is empty
pub const INDEX_NAME: &str = "index";

const EXTENSION: &str = "txt";

/// Derive the sanitized base name for a URL
///
/// The path component is stripped of leading and trailing slashes, every
/// character outside `[A-Za-z0-9._-]` becomes `_`, and the result is
/// truncated to [`MAX_BASE_LEN`] characters.
pub fn base_name(url: &Url) -> String {
    let path = url.path().trim_matches('/');
    let path = if path.is_empty() { INDEX_NAME } else { path };

    path.chars()
        .map(|c| if is_safe_char(c) { c } else { '_' })
        .take(MAX_BASE_LEN)
        .collect()
}

fn is_safe_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')
}

/// File name for the n-th candidate of a base name (`0` means no suffix)
pub fn candidate_name(base: &str, attempt: usize) -> String {
    if attempt == 0 {
        format!("{}.{}", base, EXTENSION)
    } else {
        format!("{}_{}.{}", base, attempt, EXTENSION)
    }
}

/// Pick a file path for `url` that does not exist yet in `output_dir`
///
/// This only probes the filesystem; nothing is created. Callers that write
/// concurrently should use [`create_unique`] instead.
pub fn allocate(url: &Url, output_dir: &Path) -> PathBuf {
    let base = base_name(url);
    let mut attempt = 0;
    loop {
        let path = output_dir.join(candidate_name(&base, attempt));
        if !path.exists() {
            return path;
        }
        attempt += 1;
    }
}

/// Atomically create a fresh file for `url` in `output_dir`
///
/// Each candidate name is opened with `create_new`, so an existing file is
/// never truncated; on `AlreadyExists` the next suffix is tried.
pub fn create_unique(url: &Url, output_dir: &Path) -> io::Result<(PathBuf, File)> {
    let base = base_name(url);
    let mut attempt = 0;
    loop {
        let path = output_dir.join(candidate_name(&base, attempt));
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => return Ok((path, file)),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                ::log::trace!("{} already exists, trying next suffix", path.display());
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use tempfile::tempdir;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_base_name_from_path() {
        assert_eq!(base_name(&url("https://example.com/blog/post")), "blog_post");
        assert_eq!(base_name(&url("https://example.com/blog/post/")), "blog_post");
        assert_eq!(base_name(&url("https://example.com/a/b.html")), "a_b.html");
        assert_eq!(base_name(&url("https://example.com/x-y_z")), "x-y_z");
    }

    #[test]
    fn test_base_name_empty_path_is_index() {
        assert_eq!(base_name(&url("https://example.com")), "index");
        assert_eq!(base_name(&url("https://example.com/")), "index");
        assert_eq!(base_name(&url("https://example.com/?page=2")), "index");
    }

    #[test]
    fn test_base_name_ignores_query_and_fragment() {
        assert_eq!(
            base_name(&url("https://example.com/blog/post?id=7#top")),
            "blog_post"
        );
    }

    #[test]
    fn test_base_name_sanitizes() {
        assert_eq!(
            base_name(&url("https://example.com/caf%C3%A9/a+b")),
            "caf_C3_A9_a_b"
        );
        assert_eq!(base_name(&url("https://example.com/a:b@c")), "a_b_c");
    }

    #[test]
    fn test_base_name_truncated() {
        let long = "a".repeat(400);
        let name = base_name(&url(&format!("https://example.com/{}", long)));
        assert_eq!(name.len(), MAX_BASE_LEN);
    }

    #[test]
    fn test_allocate_probes_suffixes() {
        let dir = tempdir().unwrap();
        let page = url("https://example.com/blog/post");

        let first = allocate(&page, dir.path());
        assert_eq!(first, dir.path().join("blog_post.txt"));
        // Unchanged directory gives the same answer
        assert_eq!(allocate(&page, dir.path()), first);

        std::fs::write(&first, "x").unwrap();
        let second = allocate(&page, dir.path());
        assert_eq!(second, dir.path().join("blog_post_1.txt"));

        std::fs::write(&second, "x").unwrap();
        assert_eq!(
            allocate(&page, dir.path()),
            dir.path().join("blog_post_2.txt")
        );
    }

    #[test]
    fn test_truncation_before_suffix() {
        let dir = tempdir().unwrap();
        let page = url(&format!("https://example.com/{}", "b".repeat(200)));
        let (first, _) = create_unique(&page, dir.path()).unwrap();
        let (second, _) = create_unique(&page, dir.path()).unwrap();

        let base = "b".repeat(MAX_BASE_LEN);
        assert_eq!(first, dir.path().join(format!("{}.txt", base)));
        assert_eq!(second, dir.path().join(format!("{}_1.txt", base)));
    }

    #[test]
    fn test_create_unique_never_reuses_a_path() {
        let dir = tempdir().unwrap();
        let mut seen = HashSet::new();
        for query in 0..5 {
            let page = url(&format!("https://example.com/blog/post?v={}", query));
            let (path, _) = create_unique(&page, dir.path()).unwrap();
            assert!(seen.insert(path));
        }
        assert!(dir.path().join("blog_post.txt").exists());
        assert!(dir.path().join("blog_post_4.txt").exists());
    }

    #[test]
    fn test_create_unique_leaves_existing_content() {
        let dir = tempdir().unwrap();
        let existing = dir.path().join("index.txt");
        std::fs::write(&existing, "keep me").unwrap();

        let (path, _) = create_unique(&url("https://example.com/"), dir.path()).unwrap();
        assert_eq!(path, dir.path().join("index_1.txt"));
        assert_eq!(std::fs::read_to_string(existing).unwrap(), "keep me");
    }
}
