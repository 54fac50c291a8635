use std::path::{Path, PathBuf};

/// Lexically clean a `/`-separated path: collapse repeated separators, drop `.`
/// segments and fold `name/..` pairs. Leading `..` of a relative path are kept,
/// those of an absolute path are dropped. An empty result becomes `"."`.
pub fn clean_path(path: &str) -> String {
    let rooted = path.starts_with('/');
    let mut parts: Vec<&str> = Vec::new();

    for seg in path.split('/') {
        match seg {
            "" | "." => {}
            ".." => match parts.last() {
                Some(&last) if last != ".." => {
                    parts.pop();
                }
                _ if rooted => {}
                _ => parts.push(".."),
            },
            other => parts.push(other),
        }
    }

    let body = parts.join("/");
    match (rooted, body.is_empty()) {
        (true, _) => format!("/{body}"),
        (false, true) => ".".to_owned(),
        (false, false) => body,
    }
}

/// Join `rel` onto `dir` and clean the result.
pub fn join_clean(dir: &Path, rel: &str) -> PathBuf {
    let dir = dir.to_string_lossy().replace('\\', "/");
    if dir.is_empty() {
        return PathBuf::from(clean_path(rel));
    }
    PathBuf::from(clean_path(&format!("{dir}/{rel}")))
}

/// Resolve an image path written inside a tileset descriptor against the assets root.
///
/// The descriptor paths are authored relative to the descriptor file, which sits two
/// directories below the root (`assets/tilesets/<name>/`), so at most two leading
/// `../` are stripped before joining. The path is cleaned first; backslashes become
/// separators only afterwards, so `..` written with backslashes is folded on join.
pub fn normalize_asset_path(root: &Path, raw: &str) -> PathBuf {
    let mut rel = clean_path(raw).replace('\\', "/");
    for _ in 0..2 {
        match rel.strip_prefix("../") {
            Some(rest) => rel = rest.to_owned(),
            None => break,
        }
    }
    join_clean(root, &rel)
}
