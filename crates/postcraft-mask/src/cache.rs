//! Per-overlay mask cache.
//!
//! The mask is regenerated whenever the box size or the stroke list
//! changes. Appends on an unchanged box only composite the new strokes,
//! which gives the same result as a full render since strokes are
//! applied in order.

use std::collections::HashMap;

use postcraft_core::{SoftEdgeConfig, Stroke};
use tracing::{debug, trace};

use crate::raster::AlphaMask;

#[derive(Debug, Default)]
pub struct MaskCache {
    strokes: Vec<Stroke>,
    mask: Option<AlphaMask>,
    renders: u64,
}

impl MaskCache {
    /// An empty cache; the first `get` renders.
    pub fn new() -> Self {
        Self::default()
    }

    /// The mask for this config at the given box size, or `None` when the
    /// soft edge is disabled and the content should show unmasked.
    pub fn get(&mut self, config: &SoftEdgeConfig, width: u32, height: u32) -> Option<&AlphaMask> {
        if !config.enabled {
            self.clear();
            return None;
        }
        let strokes = config.strokes.as_slice();

        let cached = match self.mask.take() {
            Some(mask) if (mask.width(), mask.height()) == (width, height) => {
                if self.strokes.as_slice() == strokes {
                    trace!("Mask cache hit");
                    Some(mask)
                } else if strokes.starts_with(&self.strokes) {
                    let mut mask = mask;
                    let added = &strokes[self.strokes.len()..];
                    for stroke in added {
                        mask.erase(stroke);
                    }
                    debug!(added = added.len(), total = strokes.len(), "Extended mask");
                    Some(mask)
                } else {
                    None
                }
            }
            _ => None,
        };

        let mask = match cached {
            Some(mask) => mask,
            None => {
                self.renders += 1;
                debug!(width, height, strokes = strokes.len(), "Regenerating mask");
                AlphaMask::from_strokes(strokes, width, height)
            }
        };

        self.strokes.clear();
        self.strokes.extend_from_slice(strokes);
        self.mask = Some(mask);
        self.mask.as_ref()
    }

    /// Drop the cached raster; the next `get` renders from scratch.
    pub fn clear(&mut self) {
        self.strokes.clear();
        self.mask = None;
    }

    /// Number of full renders so far.
    pub fn renders(&self) -> u64 {
        self.renders
    }
}

/// Mask caches keyed by overlay id.
#[derive(Debug, Default)]
pub struct MaskStore {
    caches: HashMap<String, MaskCache>,
}

impl MaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached mask of one overlay, see [`MaskCache::get`].
    pub fn get(
        &mut self,
        overlay_id: &str,
        config: &SoftEdgeConfig,
        width: u32,
        height: u32,
    ) -> Option<&AlphaMask> {
        self.caches
            .entry(overlay_id.to_string())
            .or_default()
            .get(config, width, height)
    }

    /// Drop caches for overlays that no longer exist.
    pub fn retain<'a>(&mut self, live_ids: impl IntoIterator<Item = &'a str>) {
        let live: std::collections::HashSet<&str> = live_ids.into_iter().collect();
        self.caches.retain(|id, _| live.contains(id.as_str()));
    }

    pub fn len(&self) -> usize {
        self.caches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.caches.is_empty()
    }
}
