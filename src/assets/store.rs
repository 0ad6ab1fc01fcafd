use std::{collections::HashMap, io::Cursor, path::PathBuf, time::Duration};

use anyhow::Context;
use futures_util::StreamExt;

use crate::{
    assets::source::{AssetKey, AssetRef},
    composition::model::{Composition, SceneDescriptor, VisualContent},
    foundation::core::FrameIndex,
    foundation::error::{ReelError, ReelResult},
    schedule::scheduler::active_scene,
};

/// Asset loading configuration.
#[derive(Clone, Debug)]
pub struct AssetLoaderOpts {
    /// Directory bundled (local) asset paths resolve against.
    pub root: PathBuf,
    /// Per-asset deadline; expiry marks the asset missing.
    pub timeout: Duration,
    /// Loads in flight at once.
    pub max_concurrency: usize,
    /// `User-Agent` header for remote fetches.
    pub user_agent: String,
}

impl Default for AssetLoaderOpts {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            timeout: Duration::from_secs(10),
            max_concurrency: 8,
            user_agent: format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
        }
    }
}

/// How an asset is used by the composition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AssetKind {
    /// Still image; dimensions are probed.
    Image,
    /// Video clip.
    Video,
    /// Narration or music track.
    Audio,
}

/// Metadata of a successfully loaded asset.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadedAsset {
    /// Usage kind.
    pub kind: AssetKind,
    /// Payload size in bytes.
    pub byte_len: u64,
    /// Pixel size, for images.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<(u32, u32)>,
}

/// Load outcome recorded per asset key.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum AssetStatus {
    /// Loaded and usable.
    Ready(LoadedAsset),
    /// Failed or timed out; renders blank and silent.
    Missing {
        /// Failure description.
        reason: String,
    },
}

/// Fetches single assets from the network or the bundle root.
#[derive(Clone, Debug)]
pub struct AssetLoader {
    client: reqwest::Client,
    opts: AssetLoaderOpts,
}

impl AssetLoader {
    /// Build a loader with its HTTP client.
    pub fn new(opts: AssetLoaderOpts) -> ReelResult<Self> {
        if opts.timeout.is_zero() {
            return Err(ReelError::validation("asset timeout must be > 0"));
        }
        let client = reqwest::Client::builder()
            .user_agent(opts.user_agent.clone())
            .timeout(opts.timeout)
            .build()
            .map_err(|e| ReelError::asset(format!("build http client: {e}")))?;
        Ok(Self { client, opts })
    }

    /// Loader configuration.
    pub fn opts(&self) -> &AssetLoaderOpts {
        &self.opts
    }

    /// Raw bytes of `asset`.
    pub async fn fetch(&self, asset: &AssetRef) -> ReelResult<Vec<u8>> {
        match asset {
            AssetRef::Remote(url) => {
                let response = self
                    .client
                    .get(url)
                    .send()
                    .await
                    .map_err(|e| ReelError::asset(format!("GET {url}: {e}")))?;
                let status = response.status();
                if !status.is_success() {
                    return Err(ReelError::asset(format!("GET {url}: status {status}")));
                }
                let bytes = response
                    .bytes()
                    .await
                    .map_err(|e| ReelError::asset(format!("GET {url}: {e}")))?;
                Ok(bytes.to_vec())
            }
            AssetRef::Local(path) => {
                let full = self.opts.root.join(path);
                let bytes = tokio::fs::read(&full)
                    .await
                    .with_context(|| format!("read asset '{}'", full.display()))?;
                Ok(bytes)
            }
        }
    }

    /// Fetch and inspect `asset`.
    pub async fn load(&self, asset: &AssetRef, kind: AssetKind) -> ReelResult<LoadedAsset> {
        let bytes = self.fetch(asset).await?;
        if bytes.is_empty() {
            return Err(ReelError::asset(format!("asset '{asset}' is empty")));
        }
        let dimensions = match kind {
            AssetKind::Image => {
                let dims = image::ImageReader::new(Cursor::new(&bytes))
                    .with_guessed_format()
                    .map_err(|e| ReelError::asset(format!("probe image '{asset}': {e}")))?
                    .into_dimensions()
                    .map_err(|e| ReelError::asset(format!("probe image '{asset}': {e}")))?;
                Some(dims)
            }
            AssetKind::Video | AssetKind::Audio => None,
        };
        Ok(LoadedAsset {
            kind,
            byte_len: bytes.len() as u64,
            dimensions,
        })
    }

    /// [`Self::load`] under the configured deadline; every failure becomes `Missing`.
    pub async fn load_status(&self, asset: &AssetRef, kind: AssetKind) -> AssetStatus {
        match tokio::time::timeout(self.opts.timeout, self.load(asset, kind)).await {
            Ok(Ok(loaded)) => AssetStatus::Ready(loaded),
            Ok(Err(e)) => {
                tracing::warn!(asset = %asset, error = %e, "asset failed to load");
                AssetStatus::Missing {
                    reason: e.to_string(),
                }
            }
            Err(_) => {
                tracing::warn!(
                    asset = %asset,
                    timeout = ?self.opts.timeout,
                    "asset load timed out"
                );
                AssetStatus::Missing {
                    reason: format!("timed out after {:?}", self.opts.timeout),
                }
            }
        }
    }
}

/// Load results keyed by [`AssetKey`]. Loading the same composition twice is a no-op.
#[derive(Clone, Debug, Default)]
pub struct AssetStore {
    entries: HashMap<AssetKey, AssetStatus>,
}

/// Per-frame view of one asset reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolved<'a> {
    /// The reference is well-formed and no store was consulted.
    Unchecked,
    /// Loaded by the store.
    Ready(&'a LoadedAsset),
}

impl AssetStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every asset `comp` references.
    pub async fn prepare(comp: &Composition, opts: &AssetLoaderOpts) -> ReelResult<Self> {
        let loader = AssetLoader::new(opts.clone())?;
        let mut store = Self::new();
        store.load(comp, &loader).await;
        Ok(store)
    }

    /// Load only what the scene covering `frame` needs. Frames outside every scene are
    /// silent and blank, so they load nothing.
    pub async fn prepare_frame(
        comp: &Composition,
        frame: FrameIndex,
        opts: &AssetLoaderOpts,
    ) -> ReelResult<Self> {
        let loader = AssetLoader::new(opts.clone())?;
        let mut store = Self::new();
        if let Some(active) = active_scene(&comp.scenes, frame) {
            store.load_scene(comp, active.index, &loader).await;
        }
        Ok(store)
    }

    /// Load the references of `comp` not already in the store; returns how many were
    /// attempted.
    #[tracing::instrument(skip(self, comp, loader), fields(scenes = comp.scenes.len()))]
    pub async fn load(&mut self, comp: &Composition, loader: &AssetLoader) -> usize {
        self.load_refs(referenced(comp), loader).await
    }

    /// Load one scene's visual and narration plus the background track. Other scenes'
    /// assets are never touched.
    #[tracing::instrument(skip(self, comp, loader))]
    pub async fn load_scene(
        &mut self,
        comp: &Composition,
        scene_index: usize,
        loader: &AssetLoader,
    ) -> usize {
        self.load_refs(referenced_by_scene(comp, scene_index), loader).await
    }

    async fn load_refs(&mut self, refs: Vec<(&str, AssetKind)>, loader: &AssetLoader) -> usize {
        let mut jobs = Vec::<(AssetKey, AssetRef, AssetKind)>::new();
        for (src, kind) in refs {
            let asset = match AssetRef::parse(src) {
                Ok(a) => a,
                Err(e) => {
                    tracing::warn!(src, error = %e, "skipping malformed asset reference");
                    continue;
                }
            };
            let key = asset.key();
            if self.entries.contains_key(&key) || jobs.iter().any(|(k, ..)| *k == key) {
                tracing::debug!(asset = %asset, "asset already known");
                continue;
            }
            jobs.push((key, asset, kind));
        }

        let attempted = jobs.len();
        let results: Vec<(AssetKey, AssetStatus)> = futures_util::stream::iter(jobs)
            .map(|(key, asset, kind)| async move { (key, loader.load_status(&asset, kind).await) })
            .buffer_unordered(loader.opts.max_concurrency.max(1))
            .collect()
            .await;
        self.entries.extend(results);
        attempted
    }

    /// Record a status directly.
    pub fn insert(&mut self, asset: &AssetRef, status: AssetStatus) {
        self.entries.insert(asset.key(), status);
    }

    /// Status recorded for `src`, if it was loaded.
    pub fn status(&self, src: &str) -> Option<&AssetStatus> {
        let asset = AssetRef::parse(src).ok()?;
        self.entries.get(&asset.key())
    }

    /// Number of distinct assets recorded.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of assets recorded as missing.
    pub fn missing_count(&self) -> usize {
        self.entries
            .values()
            .filter(|s| matches!(s, AssetStatus::Missing { .. }))
            .count()
    }
}

/// Check `src` for per-frame use, consulting `store` when given.
pub fn resolve<'a>(src: &str, store: Option<&'a AssetStore>) -> Result<Resolved<'a>, String> {
    let asset = AssetRef::parse(src).map_err(|e| e.to_string())?;
    let Some(store) = store else {
        return Ok(Resolved::Unchecked);
    };
    match store.entries.get(&asset.key()) {
        Some(AssetStatus::Ready(loaded)) => Ok(Resolved::Ready(loaded)),
        Some(AssetStatus::Missing { reason }) => Err(format!("'{asset}': {reason}")),
        None => Err(format!("'{asset}' was not prepared")),
    }
}

fn scene_refs<'a>(scene: &'a SceneDescriptor, out: &mut Vec<(&'a str, AssetKind)>) {
    match &scene.visual {
        VisualContent::Image(i) => out.push((i.src.as_str(), AssetKind::Image)),
        VisualContent::Video(v) => out.push((v.src.as_str(), AssetKind::Video)),
        VisualContent::None | VisualContent::Diagram { .. } => {}
    }
    if let Some(a) = scene.audio.as_deref() {
        out.push((a, AssetKind::Audio));
    }
}

fn with_background<'a>(
    comp: &'a Composition,
    mut out: Vec<(&'a str, AssetKind)>,
) -> Vec<(&'a str, AssetKind)> {
    if let Some(bg) = comp.background_audio.as_deref() {
        out.push((bg, AssetKind::Audio));
    }
    out.retain(|(s, _)| !s.trim().is_empty());
    out
}

fn referenced(comp: &Composition) -> Vec<(&str, AssetKind)> {
    let mut out = Vec::new();
    for scene in &comp.scenes {
        scene_refs(scene, &mut out);
    }
    with_background(comp, out)
}

fn referenced_by_scene(comp: &Composition, scene_index: usize) -> Vec<(&str, AssetKind)> {
    let mut out = Vec::new();
    if let Some(scene) = comp.scenes.get(scene_index) {
        scene_refs(scene, &mut out);
    }
    with_background(comp, out)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
