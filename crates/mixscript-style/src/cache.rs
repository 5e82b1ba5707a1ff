//! Memoized style resolution.
//!
//! Rendering a paragraph resolves the same `(tag, base, layer)` triple for
//! every segment of a script. [`ResolutionCache`] keeps the last results in
//! an LRU keyed by tag and the fingerprints of both layers.
//!
//! # Invalidation policy
//!
//! Entries are stamped with a generation. [`ResolutionCache::invalidate`]
//! bumps the generation in O(1); older entries are treated as misses on
//! access and replaced lazily. Call it after swapping fonts on the host
//! surface. Changing the base or a layer needs no invalidation, since the
//! fingerprints change with them.
//!
//! A hit is only returned when the stored inputs compare equal to the
//! requested ones, so a fingerprint collision costs a recompute, never a
//! wrong style.

use std::num::NonZeroUsize;

use lru::LruCache;
use mixscript_text::ScriptTag;

use crate::overrides::{ScriptOverrides, ScriptStyle};
use crate::properties::StyleProperties;
use crate::registry::ScriptRegistry;
use crate::resolve::{ResolvedStyle, StyleResolver, styling_tag};

/// Default number of cached resolutions.
pub const DEFAULT_CAPACITY: usize = 64;

/// Statistics for the resolution cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResolutionCacheStats {
    pub hits: u64,
    pub misses: u64,
    /// Entries found from an older generation.
    pub stale_evictions: u64,
    /// Fingerprint matches whose stored inputs differed.
    pub collisions: u64,
    pub size: usize,
    pub capacity: usize,
    pub generation: u64,
}

impl ResolutionCacheStats {
    /// Hit rate as a fraction (0.0 to 1.0).
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct CacheKey {
    tag: ScriptTag,
    base: u64,
    layer: Option<u64>,
}

#[derive(Debug, Clone)]
struct CachedEntry {
    base: StyleProperties,
    layer: Option<ScriptStyle>,
    resolved: ResolvedStyle,
    generation: u64,
}

/// LRU cache in front of a [`StyleResolver`].
///
/// Not `Sync`; keep one per rendering thread or wrap it in a `Mutex`.
pub struct ResolutionCache<'r> {
    resolver: StyleResolver<'r>,
    cache: LruCache<CacheKey, CachedEntry>,
    generation: u64,
    stats: ResolutionCacheStats,
}

impl std::fmt::Debug for ResolutionCache<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolutionCache")
            .field("generation", &self.generation)
            .field("stats", &self.stats())
            .finish_non_exhaustive()
    }
}

impl Default for ResolutionCache<'static> {
    fn default() -> Self {
        Self::new(ScriptRegistry::builtin(), DEFAULT_CAPACITY)
    }
}

fn capacity_of(capacity: usize) -> NonZeroUsize {
    NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN)
}

impl<'r> ResolutionCache<'r> {
    /// A cache over `registry` holding at most `capacity` resolutions
    /// (a capacity of zero is treated as one).
    pub fn new(registry: &'r ScriptRegistry, capacity: usize) -> Self {
        let cap = capacity_of(capacity);
        Self {
            resolver: StyleResolver::new(registry),
            cache: LruCache::new(cap),
            generation: 0,
            stats: ResolutionCacheStats {
                capacity: cap.get(),
                ..Default::default()
            },
        }
    }

    /// Resolve `tag`, returning a cached result when the inputs match.
    pub fn resolve(
        &mut self,
        tag: ScriptTag,
        base: &StyleProperties,
        overrides: &ScriptOverrides,
    ) -> ResolvedStyle {
        let tag = styling_tag(tag);
        let layer = overrides.get(tag);
        let key = CacheKey {
            tag,
            base: base.fingerprint(),
            layer: layer.map(ScriptStyle::fingerprint),
        };

        if let Some(entry) = self.cache.get(&key) {
            if entry.generation != self.generation {
                self.stats.stale_evictions += 1;
            } else if entry.base == *base && entry.layer.as_ref() == layer {
                self.stats.hits += 1;
                return entry.resolved.clone();
            } else {
                self.stats.collisions += 1;
                tracing::debug!(
                    message = "resolution_cache.collision",
                    script = %tag,
                    base = key.base,
                );
            }
        }

        self.stats.misses += 1;
        let resolved = self.resolver.resolve_layer(tag, base, layer);
        self.cache.put(
            key,
            CachedEntry {
                base: base.clone(),
                layer: layer.cloned(),
                resolved: resolved.clone(),
                generation: self.generation,
            },
        );
        resolved
    }

    /// Bump the generation, invalidating every cached entry lazily.
    pub fn invalidate(&mut self) {
        self.generation += 1;
        self.stats.generation = self.generation;
        tracing::debug!(
            message = "resolution_cache.invalidate",
            generation = self.generation,
            size = self.cache.len(),
        );
    }

    /// Drop all entries and reset stats.
    pub fn clear(&mut self) {
        self.cache.clear();
        self.generation += 1;
        self.stats = ResolutionCacheStats {
            capacity: self.stats.capacity,
            generation: self.generation,
            ..Default::default()
        };
    }

    /// Change the capacity, evicting least-recently-used entries if needed.
    pub fn resize(&mut self, capacity: usize) {
        let cap = capacity_of(capacity);
        self.cache.resize(cap);
        self.stats.capacity = cap.get();
    }

    #[inline]
    pub fn stats(&self) -> ResolutionCacheStats {
        ResolutionCacheStats {
            size: self.cache.len(),
            ..self.stats
        }
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[inline]
    pub fn registry(&self) -> &'r ScriptRegistry {
        self.resolver.registry()
    }
}
