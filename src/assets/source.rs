use crate::{
    foundation::error::{ReelError, ReelResult},
    foundation::math::Fnv1a64,
};

/// Classified asset reference. Callers never say which kind they pass.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(tag = "kind", content = "location", rename_all = "camelCase")]
pub enum AssetRef {
    /// Absolute `http(s)` URL, fetched over the network.
    Remote(String),
    /// Bundled asset, relative to the loader root.
    Local(String),
}

/// Stable hashed identity of an [`AssetRef`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
pub struct AssetKey(pub u64);

impl AssetRef {
    /// Classify `src` as a URL or a bundled path.
    ///
    /// URLs must parse; paths are normalized with [`normalize_rel_path`].
    pub fn parse(src: &str) -> ReelResult<Self> {
        let s = src.trim();
        if s.is_empty() {
            return Err(ReelError::validation("asset reference must be non-empty"));
        }
        let lower = s.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            let url = reqwest::Url::parse(s)
                .map_err(|e| ReelError::validation(format!("invalid asset url '{s}': {e}")))?;
            return Ok(Self::Remote(url.to_string()));
        }
        if let Some((scheme, _)) = s.split_once("://") {
            return Err(ReelError::validation(format!(
                "unsupported asset scheme '{scheme}'"
            )));
        }
        Ok(Self::Local(normalize_rel_path(s)?))
    }

    /// Hashed identity; references that normalize identically share a key.
    pub fn key(&self) -> AssetKey {
        let mut h = Fnv1a64::new_default();
        match self {
            Self::Remote(url) => {
                h.write_u8(b'R');
                h.write_bytes(url.as_bytes());
            }
            Self::Local(path) => {
                h.write_u8(b'L');
                h.write_bytes(path.as_bytes());
            }
        }
        AssetKey(h.finish())
    }

    /// URL or normalized path.
    pub fn location(&self) -> &str {
        match self {
            Self::Remote(s) | Self::Local(s) => s,
        }
    }
}

impl std::fmt::Display for AssetRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.location())
    }
}

/// Normalize and validate bundle-relative asset paths.
///
/// The result uses `/` separators and drops `.` segments; absolute paths and parent
/// traversals (`..`) are rejected.
pub fn normalize_rel_path(source: &str) -> ReelResult<String> {
    let s = source.trim().replace('\\', "/");
    if s.is_empty() {
        return Err(ReelError::validation("asset path must be non-empty"));
    }
    if s.starts_with('/') || s.get(1..2) == Some(":") {
        return Err(ReelError::validation("asset paths must be relative"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(ReelError::validation("asset paths must not contain '..'"));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(ReelError::validation(
            "asset path must contain a file name",
        ));
    }
    Ok(out.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/source.rs"]
mod tests;
