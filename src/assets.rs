//! Sprite assets
//!
//! The game draws five fixed images. Each is fetched as raw bytes, decoded to
//! RGBA8 once, and kept read-only in a [`SpriteSet`] for the rest of the
//! session. Anything that fails to load is replaced by a flat placeholder of
//! the stock size so the game stays playable.

use glam::Vec2;

use crate::sim::Layout;

/// The five sprites
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Bird,
    Background,
    Foreground,
    PipeUp,
    PipeBottom,
}

impl AssetKind {
    pub const ALL: [AssetKind; 5] = [
        AssetKind::Bird,
        AssetKind::Background,
        AssetKind::Foreground,
        AssetKind::PipeUp,
        AssetKind::PipeBottom,
    ];

    /// Slot in per-sprite arrays
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Path relative to the asset base
    pub fn path(self) -> &'static str {
        match self {
            AssetKind::Bird => "images/flappy_bird_bird.png",
            AssetKind::Background => "images/bg.png",
            AssetKind::Foreground => "images/fg.png",
            AssetKind::PipeUp => "images/pipeUp.png",
            AssetKind::PipeBottom => "images/pipeBottom.png",
        }
    }

    /// Full URL or file path under `base`
    pub fn url(self, base: &str) -> String {
        let base = base.trim_end_matches('/');
        if base.is_empty() {
            self.path().to_string()
        } else {
            format!("{}/{}", base, self.path())
        }
    }

    /// Dimensions of the stock artwork
    pub fn stock_size(self) -> (u32, u32) {
        match self {
            AssetKind::Bird => (38, 26),
            AssetKind::Background => (288, 512),
            AssetKind::Foreground => (306, 118),
            AssetKind::PipeUp => (52, 242),
            AssetKind::PipeBottom => (52, 378),
        }
    }

    fn placeholder_color(self) -> [u8; 4] {
        match self {
            AssetKind::Bird => [245, 200, 66, 255],
            AssetKind::Background => [112, 197, 206, 255],
            AssetKind::Foreground => [222, 216, 149, 255],
            AssetKind::PipeUp | AssetKind::PipeBottom => [115, 191, 46, 255],
        }
    }
}

/// Decoded RGBA8 pixels
#[derive(Debug, Clone)]
pub struct ImageData {
    pub rgba: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl ImageData {
    /// Decode PNG bytes
    pub fn decode(bytes: &[u8]) -> Result<Self, image::ImageError> {
        let rgba = image::load_from_memory(bytes)?.to_rgba8();
        let (width, height) = rgba.dimensions();
        Ok(Self {
            rgba: rgba.into_raw(),
            width,
            height,
        })
    }

    /// Flat-colored image
    pub fn solid(width: u32, height: u32, color: [u8; 4]) -> Self {
        Self {
            rgba: color.repeat((width * height) as usize),
            width,
            height,
        }
    }

    /// Stand-in for a sprite that failed to load
    pub fn placeholder(kind: AssetKind) -> Self {
        let (w, h) = kind.stock_size();
        Self::solid(w, h, kind.placeholder_color())
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }
}

/// Natural sprite sizes, all the scene builder needs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteMetrics {
    sizes: [Vec2; 5],
}

impl SpriteMetrics {
    /// Sizes of the stock artwork
    pub fn stock() -> Self {
        let mut sizes = [Vec2::ZERO; 5];
        for kind in AssetKind::ALL {
            let (w, h) = kind.stock_size();
            sizes[kind.index()] = Vec2::new(w as f32, h as f32);
        }
        Self { sizes }
    }

    #[inline]
    pub fn size(&self, kind: AssetKind) -> Vec2 {
        self.sizes[kind.index()]
    }

    /// Simulation dimensions implied by these sprites
    pub fn layout(&self) -> Layout {
        Layout {
            pipe_height: self.size(AssetKind::PipeUp).y,
            ground_height: self.size(AssetKind::Foreground).y,
        }
    }
}

impl Default for SpriteMetrics {
    fn default() -> Self {
        Self::stock()
    }
}

/// All five decoded sprites, built once and read-only afterwards
#[derive(Debug, Clone)]
pub struct SpriteSet {
    images: [ImageData; 5],
}

impl SpriteSet {
    /// Every sprite as a placeholder
    pub fn placeholders() -> Self {
        Self {
            images: AssetKind::ALL.map(ImageData::placeholder),
        }
    }

    /// Build from raw bytes per sprite. Missing or undecodable sprites fall
    /// back to placeholders with a warning.
    pub fn from_sources<I>(sources: I) -> Self
    where
        I: IntoIterator<Item = (AssetKind, Option<Vec<u8>>)>,
    {
        let mut set = Self::placeholders();
        for (kind, bytes) in sources {
            let Some(bytes) = bytes else {
                log::warn!("Sprite '{}' unavailable, using placeholder", kind.path());
                continue;
            };
            match ImageData::decode(&bytes) {
                Ok(image) => {
                    log::info!("Loaded sprite '{}' ({}x{})", kind.path(), image.width, image.height);
                    set.images[kind.index()] = image;
                }
                Err(e) => {
                    log::warn!("Failed to decode sprite '{}': {}, using placeholder", kind.path(), e);
                }
            }
        }
        set
    }

    /// Read every sprite from disk under `base`
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_dir(base: &str) -> Self {
        Self::from_sources(AssetKind::ALL.map(|kind| {
            let path = kind.url(base);
            let bytes = std::fs::read(&path)
                .inspect_err(|e| log::debug!("Reading '{}' failed: {}", path, e))
                .ok();
            (kind, bytes)
        }))
    }

    /// Fetch every sprite over HTTP relative to `base`
    #[cfg(target_arch = "wasm32")]
    pub async fn fetch(base: &str) -> Self {
        let mut sources = Vec::with_capacity(AssetKind::ALL.len());
        for kind in AssetKind::ALL {
            let url = kind.url(base);
            let bytes = match crate::net::web::fetch_bytes(&url).await {
                Ok(bytes) => Some(bytes),
                Err(e) => {
                    log::warn!("Fetching '{}' failed: {}", url, e);
                    None
                }
            };
            sources.push((kind, bytes));
        }
        Self::from_sources(sources)
    }

    #[inline]
    pub fn get(&self, kind: AssetKind) -> &ImageData {
        &self.images[kind.index()]
    }

    pub fn metrics(&self) -> SpriteMetrics {
        SpriteMetrics {
            sizes: AssetKind::ALL.map(|kind| self.get(kind).size()),
        }
    }

    pub fn layout(&self) -> Layout {
        self.metrics().layout()
    }
}
