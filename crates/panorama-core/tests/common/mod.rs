#![allow(dead_code)]

use std::time::{Duration, Instant};

use panorama_core::assets::{AssetLoader, LoadCompletion, LoadRequest};
use panorama_core::catalog::Tier;
use panorama_core::config::ViewerConfig;
use panorama_core::sink::{CursorMode, DisplaySink, LoadingIndicator};
use panorama_core::viewer::ImageViewer;
use panorama_core::viewport::ViewportState;

pub const CONTAINER: [f32; 2] = [800.0, 600.0];

/// Loader that only records requests; tests deliver completions by hand.
#[derive(Default)]
pub struct RecordingLoader {
    pub requests: Vec<LoadRequest>,
}

impl RecordingLoader {
    pub fn count(&self, tier: Tier) -> usize {
        self.requests.iter().filter(|r| r.tier == tier).count()
    }
}

impl AssetLoader for RecordingLoader {
    type Asset = String;

    fn load(&mut self, request: LoadRequest) {
        self.requests.push(request);
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum DisplayCall {
    Background(String),
    Transform(ViewportState),
    Cursor(CursorMode),
}

#[derive(Default)]
pub struct RecordingDisplay {
    pub calls: Vec<DisplayCall>,
}

impl RecordingDisplay {
    pub fn backgrounds(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DisplayCall::Background(b) => Some(b.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn last_transform(&self) -> Option<ViewportState> {
        self.calls.iter().rev().find_map(|c| match c {
            DisplayCall::Transform(t) => Some(*t),
            _ => None,
        })
    }

    pub fn last_cursor(&self) -> Option<CursorMode> {
        self.calls.iter().rev().find_map(|c| match c {
            DisplayCall::Cursor(m) => Some(*m),
            _ => None,
        })
    }
}

impl DisplaySink<String> for RecordingDisplay {
    fn set_background_asset(&mut self, locator: &str, asset: &String) {
        assert_eq!(asset, &asset_for(locator), "asset handed to the sink must match its locator");
        self.calls.push(DisplayCall::Background(locator.to_string()));
    }

    fn set_transform(&mut self, state: ViewportState) {
        self.calls.push(DisplayCall::Transform(state));
    }

    fn set_cursor(&mut self, mode: CursorMode) {
        self.calls.push(DisplayCall::Cursor(mode));
    }
}

#[derive(Default)]
pub struct RecordingIndicator {
    pub visible: bool,
    pub percent: u8,
    pub shows: usize,
    pub progress_history: Vec<u8>,
}

impl LoadingIndicator for RecordingIndicator {
    fn show(&mut self) {
        self.visible = true;
        self.shows += 1;
    }

    fn hide(&mut self) {
        self.visible = false;
    }

    fn set_progress_percent(&mut self, percent: u8) {
        self.percent = percent;
        self.progress_history.push(percent);
    }
}

pub type TestViewer = ImageViewer<RecordingLoader, RecordingDisplay, RecordingIndicator>;

pub fn asset_for(locator: &str) -> String {
    format!("pixels of {locator}")
}

pub fn ms(base: Instant, millis: u64) -> Instant {
    base + Duration::from_millis(millis)
}

pub fn new_viewer() -> TestViewer {
    ImageViewer::new(
        ViewerConfig::default(),
        CONTAINER,
        RecordingLoader::default(),
        RecordingDisplay::default(),
        RecordingIndicator::default(),
    )
    .expect("default config is valid")
}

/// Deliver a completion for `tier` as the host would.
pub fn complete(viewer: &mut TestViewer, tier: Tier, ok: bool, now: Instant) {
    let request = LoadRequest {
        tier,
        locator: viewer.catalog().locator(tier).to_string(),
    };
    let completion = if ok {
        let asset = asset_for(&request.locator);
        LoadCompletion::success(request, asset)
    } else {
        LoadCompletion::failure(request, "404 Not Found")
    };
    viewer.on_asset_loaded(completion, now);
}

/// Viewer started at `t0` with the priority tiers (hd, 4k) loaded.
pub fn warmed_viewer(t0: Instant) -> TestViewer {
    let mut viewer = new_viewer();
    viewer.start(t0);
    complete(&mut viewer, Tier::Hd, true, t0);
    complete(&mut viewer, Tier::FourK, true, t0);
    viewer
}
