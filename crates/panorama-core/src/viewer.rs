use std::time::Instant;

use tracing::debug;

use crate::assets::{AssetLoader, AssetPreloader, LoadCompletion};
use crate::catalog::{ResolutionCatalog, Tier};
use crate::config::ViewerConfig;
use crate::error::Result;
use crate::gesture::{GestureAction, GestureTracker, InputEvent};
use crate::sink::{CursorMode, DisplaySink, LoadingIndicator};
use crate::switcher::{ResolutionSwitcher, SwitchEnv, SwitchOutcome, SwitchState};
use crate::viewport::{Viewport, ViewportState};

/// Pan/zoom viewer that promotes the displayed asset to higher resolution
/// tiers as the scale grows.
///
/// All state lives here and is only mutated from the UI thread through
/// `handle_input`, `on_asset_loaded`, `tick` and `reset`. Loads run
/// elsewhere and come back as [`LoadCompletion`]s.
pub struct ImageViewer<L, D, I>
where
    L: AssetLoader,
{
    config: ViewerConfig,
    catalog: ResolutionCatalog,
    viewport: Viewport,
    preloader: AssetPreloader<L::Asset>,
    switcher: ResolutionSwitcher,
    gestures: GestureTracker,
    loader: L,
    display: D,
    indicator: I,
}

impl<L, D, I> ImageViewer<L, D, I>
where
    L: AssetLoader,
    D: DisplaySink<L::Asset>,
    I: LoadingIndicator,
{
    /// Fails when the config or its tier catalog is incomplete or inconsistent.
    pub fn new(
        config: ViewerConfig,
        container_size: [f32; 2],
        loader: L,
        display: D,
        indicator: I,
    ) -> Result<Self> {
        config.validate()?;
        let catalog = ResolutionCatalog::from_config(&config)?;
        let initial = catalog.tier_for_scale(config.zoom.min_scale);

        Ok(Self {
            viewport: Viewport::new(&config.zoom, container_size),
            preloader: AssetPreloader::new(config.preload.priority.clone()),
            switcher: ResolutionSwitcher::new(initial, config.timing.clone()),
            gestures: GestureTracker::new(config.zoom.wheel_zoom_in, config.zoom.wheel_zoom_out),
            catalog,
            config,
            loader,
            display,
            indicator,
        })
    }

    /// Paint the initial transform and warm the priority tiers.
    pub fn start(&mut self, now: Instant) {
        self.display.set_cursor(CursorMode::Grab);
        self.display.set_transform(self.viewport.state());
        self.preloader.start(
            now,
            self.config.timing.deferred_warm_delay(),
            &mut self.loader,
            &self.catalog,
        );
    }

    pub fn handle_input(&mut self, event: &InputEvent, now: Instant) {
        let state = self.viewport.state();
        match self.gestures.handle(event, &state) {
            GestureAction::None => {}
            GestureAction::Zoom { scale } => {
                self.viewport.set_scale(scale);
                self.after_transform_change(now);
            }
            GestureAction::Pan {
                translate_x,
                translate_y,
            } => {
                self.viewport.set_translation(translate_x, translate_y);
                self.after_transform_change(now);
            }
            GestureAction::Cursor(mode) => self.display.set_cursor(mode),
            GestureAction::Reset => self.reset(now),
            GestureAction::Resize { width, height } => {
                self.viewport.resize([width, height], [width, height]);
                self.after_transform_change(now);
            }
        }
    }

    /// Back to the minimum scale, centered, on the `hd` tier. Cancels any
    /// drag or pinch so a late move cannot resume from a stale anchor.
    pub fn reset(&mut self, now: Instant) {
        self.gestures.cancel();
        self.viewport.reset_transform();
        self.request_tier(Tier::Hd, now);
        self.display.set_transform(self.viewport.state());
    }

    pub fn request_tier(&mut self, tier: Tier, now: Instant) -> SwitchOutcome {
        let mut env = SwitchEnv {
            catalog: &self.catalog,
            preloader: &mut self.preloader,
            loader: &mut self.loader,
            display: &mut self.display,
            indicator: &mut self.indicator,
            transform: self.viewport.state(),
        };
        self.switcher.request_tier(tier, now, &mut env)
    }

    pub fn on_asset_loaded(&mut self, completion: LoadCompletion<L::Asset>, now: Instant) {
        let mut env = SwitchEnv {
            catalog: &self.catalog,
            preloader: &mut self.preloader,
            loader: &mut self.loader,
            display: &mut self.display,
            indicator: &mut self.indicator,
            transform: self.viewport.state(),
        };
        self.switcher.on_load_complete(completion, now, &mut env);
    }

    /// Drive timers: deferred warm, progress animation, delayed swaps.
    pub fn tick(&mut self, now: Instant) {
        self.preloader.poll(now, &mut self.loader, &self.catalog);
        let mut env = SwitchEnv {
            catalog: &self.catalog,
            preloader: &mut self.preloader,
            loader: &mut self.loader,
            display: &mut self.display,
            indicator: &mut self.indicator,
            transform: self.viewport.state(),
        };
        self.switcher.tick(now, &mut env);
    }

    /// Earliest instant `tick` has pending work.
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.preloader.deferred_deadline(), self.switcher.next_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    fn after_transform_change(&mut self, now: Instant) {
        let state = self.viewport.state();
        let tier = self.catalog.tier_for_scale(state.scale);
        let outcome = self.request_tier(tier, now);
        if outcome != SwitchOutcome::Unchanged {
            debug!("Scale {:.2} -> tier {tier}: {outcome:?}", state.scale);
        }
        self.display.set_transform(state);
    }

    pub fn viewport_state(&self) -> ViewportState {
        self.viewport.state()
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn current_tier(&self) -> Tier {
        self.switcher.current_tier()
    }

    pub fn displayed_locator(&self) -> Option<&str> {
        self.switcher.displayed_locator()
    }

    pub fn switch_state(&self) -> SwitchState {
        self.switcher.state()
    }

    pub fn is_ready(&self, tier: Tier) -> bool {
        self.preloader.is_ready(tier)
    }

    pub fn is_dragging(&self) -> bool {
        self.gestures.is_dragging()
    }

    pub fn is_pinching(&self) -> bool {
        self.gestures.is_pinching()
    }

    pub fn catalog(&self) -> &ResolutionCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    pub fn loader_mut(&mut self) -> &mut L {
        &mut self.loader
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    pub fn indicator(&self) -> &I {
        &self.indicator
    }
}
