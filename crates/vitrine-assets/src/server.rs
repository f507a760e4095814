use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use crate::error::AssetError;
use crate::parser::{GlbParser, ParseOptions};
use crate::scene::SceneDescription;

/// Loads GLB files from disk and caches the parsed scenes by path.
pub struct AssetServer {
    base_path: PathBuf,
    parser: GlbParser,
    scenes: HashMap<PathBuf, Arc<SceneDescription>>,
}

impl AssetServer {
    /// Create a new AssetServer rooted at the given base path.
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self::with_options(base_path, ParseOptions::default())
    }

    pub fn with_options(base_path: impl Into<PathBuf>, options: ParseOptions) -> Self {
        let base_path = base_path.into();
        info!("AssetServer created with base path: {}", base_path.display());
        Self {
            base_path,
            parser: GlbParser::new(options),
            scenes: HashMap::new(),
        }
    }

    /// Resolve a relative asset path against the base path.
    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_path.join(path)
        }
    }

    /// Load and parse a `.glb` file.
    /// Subsequent loads of the same path return the cached scene.
    pub fn load_scene(&mut self, path: &Path) -> Result<Arc<SceneDescription>, AssetError> {
        let full_path = self.resolve(path);

        if let Some(scene) = self.scenes.get(&full_path) {
            debug!("cache hit for {}", full_path.display());
            return Ok(Arc::clone(scene));
        }

        if !full_path.exists() {
            return Err(AssetError::NotFound(full_path));
        }

        let bytes = fs::read(&full_path).map_err(|e| AssetError::Io(full_path.clone(), e))?;
        let scene = Arc::new(self.parse_bytes(&full_path, &bytes)?);
        info!(
            "Loaded '{}': {} meshes, {} vertices",
            full_path.display(),
            scene.root.len(),
            scene.root.vertex_count()
        );

        self.scenes.insert(full_path, Arc::clone(&scene));
        Ok(scene)
    }

    /// Parse an in-memory asset. `origin` is only used for error reporting;
    /// the result is not cached.
    pub fn parse_bytes(&self, origin: &Path, bytes: &[u8]) -> Result<SceneDescription, AssetError> {
        self.parser.parse(bytes).map_err(|source| AssetError::Parse {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Get a previously loaded scene.
    pub fn get_scene(&self, path: &Path) -> Option<Arc<SceneDescription>> {
        self.scenes.get(&self.resolve(path)).cloned()
    }

    pub fn is_loaded(&self, path: &Path) -> bool {
        self.scenes.contains_key(&self.resolve(path))
    }

    /// The base path this server resolves relative paths against.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}
