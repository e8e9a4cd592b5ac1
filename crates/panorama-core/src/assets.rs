use std::time::Instant;

use tracing::{debug, info, warn};

use crate::catalog::{ResolutionCatalog, Tier};

/// Request to fetch the asset behind `locator`. Fire-and-forget: the host
/// answers later with a [`LoadCompletion`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadRequest {
    pub tier: Tier,
    pub locator: String,
}

/// Result of a [`LoadRequest`], delivered back to the viewer by the host.
#[derive(Clone, Debug)]
pub struct LoadCompletion<A> {
    pub tier: Tier,
    pub locator: String,
    pub outcome: std::result::Result<A, String>,
}

impl<A> LoadCompletion<A> {
    pub fn success(request: LoadRequest, asset: A) -> Self {
        Self {
            tier: request.tier,
            locator: request.locator,
            outcome: Ok(asset),
        }
    }

    pub fn failure(request: LoadRequest, message: impl Into<String>) -> Self {
        Self {
            tier: request.tier,
            locator: request.locator,
            outcome: Err(message.into()),
        }
    }
}

/// Starts asynchronous asset loads.
///
/// `load` must return immediately; the outcome is reported through
/// `ImageViewer::on_asset_loaded` on the UI thread.
pub trait AssetLoader {
    type Asset;

    fn load(&mut self, request: LoadRequest);
}

#[derive(Clone, Debug)]
enum AssetSlot<A> {
    Loading,
    Ready(A),
    Failed,
}

/// Loaded assets keyed by tier. Entries are created lazily and never
/// evicted; a tier has at most one load in flight.
#[derive(Debug)]
pub struct AssetCache<A> {
    slots: Vec<Option<AssetSlot<A>>>,
}

impl<A> Default for AssetCache<A> {
    fn default() -> Self {
        Self {
            slots: Tier::ALL.iter().map(|_| None).collect(),
        }
    }
}

impl<A> AssetCache<A> {
    pub fn has_entry(&self, tier: Tier) -> bool {
        self.slots[tier.index()].is_some()
    }

    pub fn is_loading(&self, tier: Tier) -> bool {
        matches!(self.slots[tier.index()], Some(AssetSlot::Loading))
    }

    pub fn is_ready(&self, tier: Tier) -> bool {
        matches!(self.slots[tier.index()], Some(AssetSlot::Ready(_)))
    }

    pub fn is_failed(&self, tier: Tier) -> bool {
        matches!(self.slots[tier.index()], Some(AssetSlot::Failed))
    }

    pub fn get(&self, tier: Tier) -> Option<&A> {
        match &self.slots[tier.index()] {
            Some(AssetSlot::Ready(asset)) => Some(asset),
            _ => None,
        }
    }

    fn mark_loading(&mut self, tier: Tier) {
        self.slots[tier.index()] = Some(AssetSlot::Loading);
    }

    fn store(&mut self, tier: Tier, outcome: std::result::Result<A, String>) -> bool {
        let slot = match outcome {
            Ok(asset) => AssetSlot::Ready(asset),
            Err(_) => AssetSlot::Failed,
        };
        let ready = matches!(slot, AssetSlot::Ready(_));
        self.slots[tier.index()] = Some(slot);
        ready
    }
}

/// Warms tiers ahead of need: the priority tiers right away, the rest once
/// the deferred delay has passed.
#[derive(Debug)]
pub struct AssetPreloader<A> {
    cache: AssetCache<A>,
    priority: Vec<Tier>,
    deferred_at: Option<Instant>,
}

impl<A> AssetPreloader<A> {
    pub fn new(priority: Vec<Tier>) -> Self {
        Self {
            cache: AssetCache::default(),
            priority,
            deferred_at: None,
        }
    }

    /// Warm the priority tiers and schedule the deferred warm.
    pub fn start<L>(
        &mut self,
        now: Instant,
        deferred_delay: std::time::Duration,
        loader: &mut L,
        catalog: &ResolutionCatalog,
    ) where
        L: AssetLoader<Asset = A>,
    {
        let priority = self.priority.clone();
        let started = self.warm(&priority, loader, catalog);
        info!("Warming {started} priority tier(s)");
        self.deferred_at = Some(now + deferred_delay);
    }

    /// Run the deferred warm once its time has come. Returns true when it ran.
    pub fn poll<L>(&mut self, now: Instant, loader: &mut L, catalog: &ResolutionCatalog) -> bool
    where
        L: AssetLoader<Asset = A>,
    {
        match self.deferred_at {
            Some(at) if now >= at => {
                self.deferred_at = None;
                let rest: Vec<Tier> = Tier::ALL
                    .into_iter()
                    .filter(|t| !self.priority.contains(t))
                    .collect();
                let started = self.warm(&rest, loader, catalog);
                info!("Deferred warm started {started} load(s)");
                true
            }
            _ => false,
        }
    }

    pub fn deferred_deadline(&self) -> Option<Instant> {
        self.deferred_at
    }

    /// Begin a load for every tier without a cache entry. Tiers that are
    /// loading, ready or have failed before are skipped.
    pub fn warm<L>(&mut self, tiers: &[Tier], loader: &mut L, catalog: &ResolutionCatalog) -> usize
    where
        L: AssetLoader<Asset = A>,
    {
        let mut started = 0;
        for &tier in tiers {
            if self.cache.has_entry(tier) {
                continue;
            }
            self.begin_load(tier, loader, catalog);
            started += 1;
        }
        started
    }

    /// Make sure a load for `tier` is in flight, retrying a failed one.
    /// Returns true when a new load was started.
    pub fn ensure_loading<L>(&mut self, tier: Tier, loader: &mut L, catalog: &ResolutionCatalog) -> bool
    where
        L: AssetLoader<Asset = A>,
    {
        if self.cache.is_loading(tier) || self.cache.is_ready(tier) {
            debug!("Tier {tier} already loading or loaded");
            return false;
        }
        self.begin_load(tier, loader, catalog);
        true
    }

    fn begin_load<L>(&mut self, tier: Tier, loader: &mut L, catalog: &ResolutionCatalog)
    where
        L: AssetLoader<Asset = A>,
    {
        let locator = catalog.locator(tier).to_string();
        debug!("Loading tier {tier} from {locator}");
        self.cache.mark_loading(tier);
        loader.load(LoadRequest { tier, locator });
    }

    /// Store a finished load. Returns true when the asset is now ready.
    pub fn record(&mut self, completion: LoadCompletion<A>) -> bool {
        let LoadCompletion {
            tier,
            locator,
            outcome,
        } = completion;
        if let Err(ref message) = outcome {
            warn!("Failed to load tier {tier} from {locator}: {message}");
        } else {
            debug!("Tier {tier} ready");
        }
        self.cache.store(tier, outcome)
    }

    pub fn is_ready(&self, tier: Tier) -> bool {
        self.cache.is_ready(tier)
    }

    pub fn asset(&self, tier: Tier) -> Option<&A> {
        self.cache.get(tier)
    }

    pub fn cache(&self) -> &AssetCache<A> {
        &self.cache
    }
}
