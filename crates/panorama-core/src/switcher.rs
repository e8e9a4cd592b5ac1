use std::time::Instant;

use tracing::{debug, info};

use crate::assets::{AssetLoader, AssetPreloader, LoadCompletion};
use crate::catalog::{ResolutionCatalog, Tier};
use crate::config::TimingConfig;
use crate::progress::ProgressAnimation;
use crate::sink::{DisplaySink, LoadingIndicator};
use crate::viewport::ViewportState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwitchState {
    Idle,
    Loading(Tier),
}

/// What a `request_tier` call did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwitchOutcome {
    /// Already displayed or already being fetched.
    Unchanged,
    /// Cached asset swapped in synchronously.
    Swapped,
    /// Asset not ready; the loading indicator is up.
    Loading,
}

/// Everything the switcher reads or writes besides its own state.
pub struct SwitchEnv<'a, L: AssetLoader, D, I> {
    pub catalog: &'a ResolutionCatalog,
    pub preloader: &'a mut AssetPreloader<L::Asset>,
    pub loader: &'a mut L,
    pub display: &'a mut D,
    pub indicator: &'a mut I,
    /// Transform to reapply around a swap.
    pub transform: ViewportState,
}

#[derive(Debug)]
struct PendingSwitch {
    tier: Tier,
    animation: ProgressAnimation,
    swap_at: Option<Instant>,
}

/// Swaps the displayed asset to a requested tier, loading it first when
/// it is not cached.
///
/// Overlapping requests for different tiers each keep their own load and
/// each swaps when done, so the last one to finish wins.
#[derive(Debug)]
pub struct ResolutionSwitcher {
    current: Tier,
    displayed_locator: Option<String>,
    pending: Vec<PendingSwitch>,
    timing: TimingConfig,
}

impl ResolutionSwitcher {
    pub fn new(initial: Tier, timing: TimingConfig) -> Self {
        Self {
            current: initial,
            displayed_locator: None,
            pending: Vec::new(),
            timing,
        }
    }

    pub fn current_tier(&self) -> Tier {
        self.current
    }

    pub fn displayed_locator(&self) -> Option<&str> {
        self.displayed_locator.as_deref()
    }

    pub fn state(&self) -> SwitchState {
        match self.pending.last() {
            Some(p) => SwitchState::Loading(p.tier),
            None => SwitchState::Idle,
        }
    }

    pub fn is_pending(&self, tier: Tier) -> bool {
        self.pending.iter().any(|p| p.tier == tier)
    }

    pub fn request_tier<L, D, I>(
        &mut self,
        tier: Tier,
        now: Instant,
        env: &mut SwitchEnv<'_, L, D, I>,
    ) -> SwitchOutcome
    where
        L: AssetLoader,
        D: DisplaySink<L::Asset>,
        I: LoadingIndicator,
    {
        // Until something is on screen the starting tier is only nominal,
        // so a request for it must still be able to (re)load it.
        let locator = env.catalog.locator(tier);
        let showing_current = tier == self.current && self.displayed_locator.is_some();
        if showing_current || self.displayed_locator.as_deref() == Some(locator) {
            return SwitchOutcome::Unchanged;
        }
        if self.is_pending(tier) {
            debug!("Switch to {tier} already pending");
            return SwitchOutcome::Unchanged;
        }

        if env.preloader.is_ready(tier) {
            self.swap(tier, env);
            return SwitchOutcome::Swapped;
        }

        info!("Tier {tier} not cached, loading");
        env.indicator.show();
        env.indicator.set_progress_percent(0);
        env.preloader.ensure_loading(tier, env.loader, env.catalog);
        self.pending.push(PendingSwitch {
            tier,
            animation: ProgressAnimation::start(now, &self.timing),
            swap_at: None,
        });
        SwitchOutcome::Loading
    }

    /// Feed a finished load. Successful loads swap after the swap delay;
    /// failed ones drop their pending switch and leave the display alone.
    pub fn on_load_complete<L, D, I>(
        &mut self,
        completion: LoadCompletion<L::Asset>,
        now: Instant,
        env: &mut SwitchEnv<'_, L, D, I>,
    ) where
        L: AssetLoader,
        D: DisplaySink<L::Asset>,
        I: LoadingIndicator,
    {
        let tier = completion.tier;
        let ready = env.preloader.record(completion);
        // First asset of the starting tier: nothing is displayed yet, so it
        // goes up at once instead of waiting out the swap delay.
        let initial = ready && tier == self.current && self.displayed_locator.is_none();
        let delayed = ready && !initial;

        let swap_at = now + self.timing.swap_delay();
        let mut resolved = 0;
        self.pending.retain_mut(|p| {
            if p.tier != tier || p.swap_at.is_some() {
                return true;
            }
            resolved += 1;
            p.animation.cancel();
            if delayed {
                p.swap_at = Some(swap_at);
            }
            delayed
        });

        if resolved > 0 {
            if delayed {
                env.indicator.set_progress_percent(100);
            } else if self.pending.is_empty() {
                finish_indicator(env.indicator);
            }
        }

        if initial {
            self.swap(tier, env);
        }
    }

    /// Advance progress animations and perform swaps that are due.
    pub fn tick<L, D, I>(&mut self, now: Instant, env: &mut SwitchEnv<'_, L, D, I>)
    where
        L: AssetLoader,
        D: DisplaySink<L::Asset>,
        I: LoadingIndicator,
    {
        // A finished load holds the bar at 100 until its swap.
        let holding_full = self.pending.iter().any(|p| p.swap_at.is_some());
        for p in &mut self.pending {
            if let Some(percent) = p.animation.advance(now) {
                if !holding_full {
                    env.indicator.set_progress_percent(percent);
                }
            }
        }

        let mut due: Vec<(Instant, Tier)> = self
            .pending
            .iter()
            .filter_map(|p| p.swap_at.filter(|at| *at <= now).map(|at| (at, p.tier)))
            .collect();
        if due.is_empty() {
            return;
        }
        due.sort_by_key(|(at, _)| *at);

        self.pending.retain(|p| !p.swap_at.is_some_and(|at| at <= now));
        for (_, tier) in due {
            self.swap(tier, env);
        }
        if self.pending.is_empty() {
            finish_indicator(env.indicator);
        }
    }

    /// Earliest instant `tick` has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending
            .iter()
            .filter_map(|p| p.swap_at.or_else(|| p.animation.next_deadline()))
            .min()
    }

    fn swap<L, D, I>(&mut self, tier: Tier, env: &mut SwitchEnv<'_, L, D, I>)
    where
        L: AssetLoader,
        D: DisplaySink<L::Asset>,
    {
        let Some(asset) = env.preloader.asset(tier) else {
            debug!("Swap to {tier} skipped, asset missing");
            return;
        };
        let locator = env.catalog.locator(tier);
        env.display.set_background_asset(locator, asset);
        env.display.set_transform(env.transform);
        self.current = tier;
        self.displayed_locator = Some(locator.to_string());
        info!("Displaying tier {tier}");
    }
}

fn finish_indicator<I: LoadingIndicator>(indicator: &mut I) {
    indicator.hide();
    indicator.set_progress_percent(0);
}
