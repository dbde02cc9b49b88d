//! Sprite-sheet loading and caching.
//!
//! [`AssetLoader`] decodes sheets fetched from an [`AssetSource`] and keeps
//! them for the rest of the session. Concurrent requests for the same id
//! share one in-flight cell, so every id is fetched at most once and all
//! waiters receive the same [`Arc`].

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

use image::RgbaImage;
use rayon::prelude::*;

use crate::error::AssetLoadError;
use crate::sheet::{AssetRequest, SheetLayout};

/// A decoded sheet ready for blitting.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteSheet {
    pub image: RgbaImage,
    pub layout: SheetLayout,
}

impl SpriteSheet {
    pub fn new(image: RgbaImage) -> Self {
        Self {
            image,
            layout: SheetLayout::LPC,
        }
    }
}

// ============================================================================
// Sources
// ============================================================================

/// Where sheet bytes come from.
pub trait AssetSource: Send + Sync {
    /// Returns the raw file contents for `path`.
    fn fetch(&self, path: &str) -> Result<Vec<u8>, AssetLoadError>;
}

/// Reads sheets from files below a root directory.
#[derive(Debug, Clone)]
pub struct FsAssetSource {
    root: PathBuf,
}

impl FsAssetSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl AssetSource for FsAssetSource {
    fn fetch(&self, path: &str) -> Result<Vec<u8>, AssetLoadError> {
        std::fs::read(self.root.join(path)).map_err(|e| AssetLoadError::fetch(path, e))
    }
}

// ============================================================================
// Loader
// ============================================================================

type LoadResult = Result<Arc<SpriteSheet>, AssetLoadError>;

#[derive(Default)]
struct LoaderState {
    assets: HashMap<String, Arc<SpriteSheet>>,
    in_flight: HashMap<String, Arc<OnceLock<LoadResult>>>,
    /// Bumped by `clear_cache` so loads started before it are not stored.
    generation: u64,
}

/// Cache of decoded sheets keyed by asset id.
pub struct AssetLoader<S> {
    source: S,
    state: Mutex<LoaderState>,
}

impl<S: AssetSource> AssetLoader<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            state: Mutex::new(LoaderState::default()),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    fn state(&self) -> MutexGuard<'_, LoaderState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Loads `path` under `id`, or returns the cached sheet.
    ///
    /// Failures are returned to every waiter and are not cached; a later
    /// call fetches again.
    #[tracing::instrument(skip(self))]
    pub fn load_asset(&self, path: &str, id: &str) -> LoadResult {
        let (cell, generation) = {
            let mut state = self.state();
            if let Some(sheet) = state.assets.get(id) {
                tracing::debug!("cache hit");
                return Ok(Arc::clone(sheet));
            }
            let generation = state.generation;
            let cell = Arc::clone(state.in_flight.entry(id.to_string()).or_default());
            (cell, generation)
        };

        let result = cell.get_or_init(|| self.fetch_and_decode(path)).clone();

        let mut state = self.state();
        if state
            .in_flight
            .get(id)
            .is_some_and(|current| Arc::ptr_eq(current, &cell))
        {
            state.in_flight.remove(id);
        }
        if let Ok(sheet) = &result {
            if state.generation == generation {
                state
                    .assets
                    .entry(id.to_string())
                    .or_insert_with(|| Arc::clone(sheet));
            }
        }
        result
    }

    fn fetch_and_decode(&self, path: &str) -> LoadResult {
        let bytes = self.source.fetch(path)?;
        let image = image::load_from_memory(&bytes)
            .map_err(|e| AssetLoadError::decode(path, e))?
            .to_rgba8();
        tracing::debug!(path, width = image.width(), height = image.height(), "decoded sheet");
        Ok(Arc::new(SpriteSheet::new(image)))
    }

    /// Loads a batch in parallel and returns how many succeeded.
    ///
    /// Individual failures are logged and skipped.
    #[tracing::instrument(skip_all, fields(count = requests.len()))]
    pub fn preload_assets(&self, requests: &[AssetRequest]) -> usize {
        requests
            .par_iter()
            .filter(|request| match self.load_asset(request.path, &request.id) {
                Ok(_) => true,
                Err(err) => {
                    tracing::warn!(id = %request.id, error = %err, "asset failed to preload");
                    false
                }
            })
            .count()
    }

    /// Cached sheet for `id`. Never waits on an in-flight load.
    pub fn get_asset(&self, id: &str) -> Option<Arc<SpriteSheet>> {
        self.state().assets.get(id).cloned()
    }

    pub fn is_loaded(&self, id: &str) -> bool {
        self.state().assets.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.state().assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every cached sheet and forgets in-flight loads.
    pub fn clear_cache(&self) {
        let mut state = self.state();
        state.assets.clear();
        state.in_flight.clear();
        state.generation += 1;
    }
}

impl AssetLoader<FsAssetSource> {
    /// Loader over a directory of sheets.
    pub fn from_dir(root: impl Into<PathBuf>) -> Self {
        Self::new(FsAssetSource::new(root))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba};
    use std::io::Cursor;
    use std::sync::Barrier;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;
    use std::time::Duration;

    fn png_bytes(color: [u8; 4]) -> Vec<u8> {
        let image = RgbaImage::from_pixel(4, 4, Rgba(color));
        let mut bytes = Cursor::new(Vec::new());
        image.write_to(&mut bytes, ImageFormat::Png).unwrap();
        bytes.into_inner()
    }

    /// In-memory source that counts fetches and fails on unknown paths.
    struct CountingSource {
        files: HashMap<&'static str, Vec<u8>>,
        fetches: AtomicUsize,
        delay: Duration,
    }

    impl CountingSource {
        fn new(files: &[(&'static str, Vec<u8>)]) -> Self {
            Self {
                files: files.iter().cloned().collect(),
                fetches: AtomicUsize::new(0),
                delay: Duration::ZERO,
            }
        }

        fn fetches(&self) -> usize {
            self.fetches.load(Ordering::SeqCst)
        }
    }

    impl AssetSource for CountingSource {
        fn fetch(&self, path: &str) -> Result<Vec<u8>, AssetLoadError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            thread::sleep(self.delay);
            self.files
                .get(path)
                .cloned()
                .ok_or_else(|| AssetLoadError::fetch(path, "not found"))
        }
    }

    #[test]
    fn concurrent_loads_share_one_fetch() {
        let mut source = CountingSource::new(&[("body/a.png", png_bytes([1, 2, 3, 255]))]);
        source.delay = Duration::from_millis(50);
        let loader = AssetLoader::new(source);
        let barrier = Barrier::new(4);

        let sheets: Vec<_> = thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    scope.spawn(|| {
                        barrier.wait();
                        loader.load_asset("body/a.png", "body/a").unwrap()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(loader.source().fetches(), 1);
        assert!(sheets.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
        assert!(Arc::ptr_eq(&sheets[0], &loader.get_asset("body/a").unwrap()));
    }

    #[test]
    fn cache_hit_skips_fetch() {
        let loader = AssetLoader::new(CountingSource::new(&[("a.png", png_bytes([9; 4]))]));
        let first = loader.load_asset("a.png", "a").unwrap();
        let second = loader.load_asset("a.png", "a").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(loader.source().fetches(), 1);
        assert_eq!(first.image.dimensions(), (4, 4));
    }

    #[test]
    fn failures_are_not_cached() {
        let loader = AssetLoader::new(CountingSource::new(&[]));
        let err = loader.load_asset("missing.png", "missing").unwrap_err();
        assert!(matches!(err, AssetLoadError::Fetch { .. }));
        assert_eq!(err.path(), "missing.png");
        assert!(loader.get_asset("missing").is_none());

        loader.load_asset("missing.png", "missing").unwrap_err();
        assert_eq!(loader.source().fetches(), 2, "second call retries");
    }

    #[test]
    fn undecodable_bytes_are_a_decode_error() {
        let loader = AssetLoader::new(CountingSource::new(&[("bad.png", b"nope".to_vec())]));
        let err = loader.load_asset("bad.png", "bad").unwrap_err();
        assert!(matches!(err, AssetLoadError::Decode { .. }));
    }

    #[test]
    fn preload_skips_bad_entries() {
        let loader = AssetLoader::new(CountingSource::new(&[
            ("a.png", png_bytes([1; 4])),
            ("b.png", png_bytes([2; 4])),
            ("c.png", png_bytes([3; 4])),
        ]));
        let requests: Vec<_> = ["a.png", "b.png", "missing.png", "c.png"]
            .iter()
            .map(|path| AssetRequest {
                id: path.trim_end_matches(".png").to_string(),
                path: *path,
            })
            .collect();

        assert_eq!(loader.preload_assets(&requests), 3);
        assert_eq!(loader.len(), 3);
        assert!(loader.is_loaded("b"));
        assert!(!loader.is_loaded("missing"));
    }

    #[test]
    fn clear_cache_drops_sheets() {
        let loader = AssetLoader::new(CountingSource::new(&[("a.png", png_bytes([1; 4]))]));
        loader.load_asset("a.png", "a").unwrap();
        loader.clear_cache();
        assert!(loader.is_empty());
        loader.load_asset("a.png", "a").unwrap();
        assert_eq!(loader.source().fetches(), 2);
    }

    /// Source that parks every fetch until the test releases it.
    struct GatedSource {
        bytes: Vec<u8>,
        started: Barrier,
        release: Barrier,
    }

    impl AssetSource for GatedSource {
        fn fetch(&self, _path: &str) -> Result<Vec<u8>, AssetLoadError> {
            self.started.wait();
            self.release.wait();
            Ok(self.bytes.clone())
        }
    }

    #[test]
    fn load_finishing_after_clear_is_not_cached() {
        let loader = AssetLoader::new(GatedSource {
            bytes: png_bytes([4; 4]),
            started: Barrier::new(2),
            release: Barrier::new(2),
        });

        let sheet = thread::scope(|scope| {
            let load = scope.spawn(|| loader.load_asset("a.png", "a"));
            loader.source().started.wait();
            loader.clear_cache();
            loader.source().release.wait();
            load.join().unwrap()
        })
        .unwrap();

        assert_eq!(sheet.image.dimensions(), (4, 4), "caller still gets its sheet");
        assert!(loader.get_asset("a").is_none());
        assert!(loader.is_empty());
    }

    #[test]
    fn reads_sheets_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("hair")).unwrap();
        std::fs::write(dir.path().join("hair/plain.png"), png_bytes([5, 6, 7, 255])).unwrap();

        let loader = AssetLoader::from_dir(dir.path());
        let sheet = loader.load_asset("hair/plain.png", "hair/plain").unwrap();
        assert_eq!(sheet.image.get_pixel(0, 0).0, [5, 6, 7, 255]);
        assert_eq!(sheet.layout, SheetLayout::LPC);

        let err = loader.load_asset("hair/none.png", "hair/none").unwrap_err();
        assert!(err.to_string().contains("hair/none.png"));
    }
}
