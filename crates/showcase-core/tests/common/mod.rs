// Recording doubles for the viewer engine and the host page.

#![allow(dead_code)]
use glam::Vec3;
use showcase_core::*;
use std::collections::HashMap;
use std::time::Duration;

pub const FRAME: Duration = Duration::from_micros(16_667);
pub const VIEWPORT: f64 = 800.0;

// sound window: 200..1000, display window: 1600..2400
pub const SOUND_TOP: f64 = 1000.0;
pub const DISPLAY_TOP: f64 = 2400.0;

pub fn default_pose() -> CameraPose {
    CameraPose::new(Vec3::new(1.0, 2.0, 3.0), Vec3::ZERO)
}

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    AddPlugin(RenderPlugin),
    RefreshPipeline,
    LoadAsset(String),
    ClipBackground(bool),
    SyncCamera(CameraPose),
    Redraw,
    Controls(bool),
}

#[derive(Debug, Default)]
pub struct MockEngine {
    pub calls: Vec<Call>,
    pub pose: CameraPose,
    pub fail_asset: bool,
    /// Camera the scene asset brings along, applied when it loads.
    pub asset_pose: Option<CameraPose>,
}

impl MockEngine {
    pub fn new() -> Self {
        Self {
            pose: default_pose(),
            ..Default::default()
        }
    }

    pub fn failing_asset() -> Self {
        Self {
            fail_asset: true,
            ..Self::new()
        }
    }

    pub fn with_asset_pose(pose: CameraPose) -> Self {
        Self {
            asset_pose: Some(pose),
            ..Self::new()
        }
    }

    /// Move the camera the way orbit controls do, without going through a resync.
    pub fn orbit_to(&mut self, pose: CameraPose) {
        self.pose = pose;
    }

    pub fn last_synced(&self) -> Option<CameraPose> {
        self.calls.iter().rev().find_map(|c| match c {
            Call::SyncCamera(pose) => Some(*pose),
            _ => None,
        })
    }

    pub fn syncs(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, Call::SyncCamera(_)))
            .count()
    }

    pub fn count(&self, call: &Call) -> usize {
        self.calls.iter().filter(|c| *c == call).count()
    }

    pub fn last_controls(&self) -> Option<bool> {
        self.calls.iter().rev().find_map(|c| match c {
            Call::Controls(on) => Some(*on),
            _ => None,
        })
    }
}

impl ViewerEngine for MockEngine {
    async fn add_plugin(&mut self, plugin: RenderPlugin) -> anyhow::Result<()> {
        self.calls.push(Call::AddPlugin(plugin));
        Ok(())
    }

    fn refresh_pipeline(&mut self) -> anyhow::Result<()> {
        self.calls.push(Call::RefreshPipeline);
        Ok(())
    }

    async fn load_asset(&mut self, path: &str) -> anyhow::Result<()> {
        self.calls.push(Call::LoadAsset(path.to_string()));
        if self.fail_asset {
            anyhow::bail!("failed to fetch {path}");
        }
        if let Some(pose) = self.asset_pose {
            self.pose = pose;
        }
        Ok(())
    }

    fn set_tonemap_clip_background(&mut self, clip: bool) -> anyhow::Result<()> {
        self.calls.push(Call::ClipBackground(clip));
        Ok(())
    }

    fn camera_pose(&self) -> CameraPose {
        self.pose
    }

    fn sync_camera(&mut self, pose: CameraPose) {
        self.pose = pose;
        self.calls.push(Call::SyncCamera(pose));
    }

    fn request_redraw(&mut self) {
        self.calls.push(Call::Redraw);
    }

    fn set_controls_enabled(&mut self, enabled: bool) {
        self.calls.push(Call::Controls(enabled));
    }
}

#[derive(Debug)]
pub struct MockHost {
    pub overlay_pointer_events: bool,
    pub content_opacity: f32,
    pub content_class: Option<String>,
    pub scrolled_to_top: usize,
    pub opacity: HashMap<Section, f32>,
    pub opacity_writes: usize,
    pub missing: Vec<Section>,
}

impl MockHost {
    pub fn new() -> Self {
        let opacity = HashMap::from([
            (Section::Jumbotron, 1.0),
            (Section::Sound, 1.0),
            (Section::SoundContent, 0.0),
            (Section::Display, 0.0),
        ]);
        Self {
            overlay_pointer_events: false,
            content_opacity: 1.0,
            content_class: None,
            scrolled_to_top: 0,
            opacity,
            opacity_writes: 0,
            missing: Vec::new(),
        }
    }

    pub fn opacity_of(&self, section: Section) -> f32 {
        self.opacity[&section]
    }
}

impl ContentHost for MockHost {
    fn set_overlay_pointer_events(&mut self, enabled: bool) -> anyhow::Result<()> {
        self.overlay_pointer_events = enabled;
        Ok(())
    }

    fn set_content_opacity(&mut self, opacity: f32) -> anyhow::Result<()> {
        self.content_opacity = opacity;
        Ok(())
    }

    fn set_content_class(&mut self, class: &str) -> anyhow::Result<()> {
        self.content_class = Some(class.to_string());
        Ok(())
    }

    fn section_opacity(&self, section: Section) -> anyhow::Result<f32> {
        if self.missing.contains(&section) {
            anyhow::bail!("missing element {}", section.selector());
        }
        Ok(self.opacity_of(section))
    }

    fn set_section_opacity(&mut self, section: Section, opacity: f32) -> anyhow::Result<()> {
        if self.missing.contains(&section) {
            anyhow::bail!("missing element {}", section.selector());
        }
        self.opacity.insert(section, opacity);
        self.opacity_writes += 1;
        Ok(())
    }

    fn scroll_to_top(&mut self) {
        self.scrolled_to_top += 1;
    }
}

pub type Controller = ViewerController<MockEngine, MockHost>;

pub fn controller(device: DeviceClass) -> Controller {
    ViewerController::new(MockEngine::new(), MockHost::new(), device)
}

pub fn ready(device: DeviceClass) -> Controller {
    let mut c = controller(device);
    pollster::block_on(c.setup()).expect("setup");
    c
}

pub fn snapshot(scroll_y: f64) -> ScrollSnapshot {
    let section = |top: f64, height: f64| SectionBounds { top, height };
    ScrollSnapshot::new(scroll_y, VIEWPORT)
        .with_section(Section::Jumbotron, section(0.0, SOUND_TOP))
        .with_section(Section::Sound, section(SOUND_TOP, 1000.0))
        .with_section(Section::SoundContent, section(SOUND_TOP + 100.0, 600.0))
        .with_section(Section::Display, section(DISPLAY_TOP, 900.0))
}

/// Drive frames at `scroll_y` for `secs`, running the per-frame hook after each.
pub fn run(c: &mut Controller, scroll_y: f64, secs: f32) {
    let snap = snapshot(scroll_y);
    let frames = (secs / FRAME.as_secs_f32()).ceil() as usize;
    for _ in 0..frames {
        c.advance(FRAME, &snap).expect("advance");
        c.pre_frame();
    }
}

pub fn assert_close(actual: Vec3, expected: Vec3) {
    assert!(
        actual.abs_diff_eq(expected, 1e-4),
        "expected {expected:?}, got {actual:?}"
    );
}
