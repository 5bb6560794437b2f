//! Lifecycle of the single scene viewer: setup sequencing, the per-frame
//! camera resync hook, and the Scroll/Preview mode machine.

use crate::camera::{CameraPose, CameraRig, DirtyMark, PoseField};
use crate::constants::{
    vec3, MOBILE_POSITION, MOBILE_TARGET, PREVIEW_DURATION_SEC, PREVIEW_POSITION, PREVIEW_TARGET,
    SCENE_ASSET_PATH,
};
use crate::device::DeviceClass;
use crate::engine::{ContentHost, ViewerEngine};
use crate::scroll::ScrollSnapshot;
use crate::setup::{SetupError, SetupPhase, SetupSequence, PIPELINE};
use crate::timeline::{bind_scroll_animation, resume_transitions, ScrollTimeline};
use crate::tween::{Ease, Tween};
use anyhow::Context;
use glam::Vec3;
use std::time::Duration;
use thiserror::Error;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Scroll,
    Preview,
}

#[derive(Debug, Error)]
pub enum ViewerError {
    #[error(transparent)]
    Setup(#[from] SetupError),
    #[error("viewer is not ready (phase {0:?})")]
    NotReady(SetupPhase),
}

/// Time-based fly-to used when entering preview.
#[derive(Clone, Debug)]
struct PreviewFlight {
    position: Tween<Vec3>,
    target: Tween<Vec3>,
}

impl PreviewFlight {
    fn new(from: CameraPose) -> Self {
        let duration = Duration::from_secs_f32(PREVIEW_DURATION_SEC);
        Self {
            position: Tween::new(from.position, vec3(PREVIEW_POSITION), duration, Ease::default()),
            target: Tween::new(from.target, vec3(PREVIEW_TARGET), duration, Ease::default()),
        }
    }

    fn is_finished(&self) -> bool {
        self.position.is_finished() && self.target.is_finished()
    }
}

pub struct ViewerController<E, H> {
    engine: E,
    host: H,
    device: DeviceClass,
    rig: CameraRig,
    mode: Mode,
    setup: SetupSequence,
    timeline: ScrollTimeline,
    resume: ScrollTimeline,
    flight: Option<PreviewFlight>,
    controls_enabled: bool,
}

impl<E: ViewerEngine, H: ContentHost> ViewerController<E, H> {
    /// Nothing is registered yet. The rig holds the engine's current pose
    /// until setup re-reads it from the loaded scene.
    pub fn new(engine: E, host: H, device: DeviceClass) -> Self {
        let rig = CameraRig::new(engine.camera_pose());
        Self {
            engine,
            host,
            device,
            rig,
            mode: Mode::Scroll,
            setup: SetupSequence::new(),
            timeline: ScrollTimeline::new(),
            resume: ScrollTimeline::new(),
            flight: None,
            controls_enabled: true,
        }
    }

    /// One-time async setup. Engine failures propagate unchanged; the viewer
    /// is left in whatever phase it reached.
    pub async fn setup(&mut self) -> anyhow::Result<()> {
        log::info!("[setup] starting (device={:?})", self.device);
        for plugin in PIPELINE {
            self.setup.register(plugin)?;
            self.engine
                .add_plugin(plugin)
                .await
                .with_context(|| format!("adding {plugin}"))?;
        }

        self.setup.finalize_pipeline()?;
        self.engine.refresh_pipeline()?;

        self.engine
            .load_asset(SCENE_ASSET_PATH)
            .await
            .with_context(|| format!("loading {SCENE_ASSET_PATH}"))?;
        self.setup.asset_loaded()?;
        self.engine.set_tonemap_clip_background(true)?;
        // the scene may carry its own camera
        self.rig.adopt(self.engine.camera_pose());

        if self.device.is_mobile() {
            self.rig.set_pose(
                CameraPose::new(vec3(MOBILE_POSITION), vec3(MOBILE_TARGET)),
                DirtyMark::Mark,
            );
        }
        if let Some(class) = self.device.content_class() {
            self.host.set_content_class(class)?;
        }

        self.set_controls(false);
        self.host.scroll_to_top();

        self.setup.ready()?;
        self.timeline = bind_scroll_animation(self.device);
        log::info!("[setup] ready; pose={:?}", self.rig.pose());
        Ok(())
    }

    /// One animation tick: scroll timeline, post-preview resume pair, then the
    /// preview flight.
    pub fn advance(&mut self, dt: Duration, snapshot: &ScrollSnapshot) -> anyhow::Result<()> {
        self.ensure_ready()?;
        let camera_writes = self.mode == Mode::Scroll;
        let mut marked = self
            .timeline
            .sample(snapshot, dt, camera_writes, &mut self.rig, &mut self.host)?;
        marked |= self
            .resume
            .sample(snapshot, dt, camera_writes, &mut self.rig, &mut self.host)?;
        if marked {
            self.engine.request_redraw();
        }

        if let Some(flight) = &mut self.flight {
            let position = flight.position.advance(dt);
            let target = flight.target.advance(dt);
            self.rig.apply(PoseField::Position, position, DirtyMark::Skip);
            self.rig.apply(PoseField::Target, target, DirtyMark::Skip);
            // inline resync; the fly-in must not lag a frame behind
            self.engine.request_redraw();
            self.engine.sync_camera(self.rig.pose());
            if flight.is_finished() {
                log::info!("[preview] flight finished");
                self.flight = None;
            }
        }
        Ok(())
    }

    /// Per-frame hook. Resyncs the camera at most once and clears the flag.
    pub fn pre_frame(&mut self) -> bool {
        if !self.rig.take_dirty() {
            return false;
        }
        self.engine.sync_camera(self.rig.pose());
        true
    }

    /// Enter preview: hide content, hand pointer control to the canvas and fly
    /// to the showcase pose. Retriggering restarts the flight from the
    /// current pose.
    pub fn trigger_preview(&mut self) -> anyhow::Result<()> {
        self.ensure_ready()?;
        if self.mode == Mode::Preview {
            log::info!("[preview] retriggered; restarting flight");
        }
        if self.mode == Mode::Preview {
            // the user may have orbited since the last flight
            self.rig.adopt(self.engine.camera_pose());
        }
        self.mode = Mode::Preview;
        self.host.set_overlay_pointer_events(true)?;
        self.host.set_content_opacity(0.0)?;
        self.flight = Some(PreviewFlight::new(self.rig.pose()));
        self.set_controls(true);
        log::info!("[preview] entered");
        Ok(())
    }

    /// Leave preview and hand the camera back to the display-section window.
    pub fn exit_preview(&mut self) -> anyhow::Result<()> {
        self.ensure_ready()?;
        self.host.set_overlay_pointer_events(false)?;
        self.host.set_content_opacity(1.0)?;
        self.set_controls(false);
        if self.flight.take().is_some() {
            log::info!("[preview] cancelled in-flight preview animation");
        }
        if self.mode == Mode::Preview {
            // orbit controls move the engine camera behind the rig's back
            self.rig.adopt(self.engine.camera_pose());
        }
        self.mode = Mode::Scroll;
        self.resume = resume_transitions(self.device);
        log::info!("[preview] exited");
        Ok(())
    }

    fn set_controls(&mut self, enabled: bool) {
        self.controls_enabled = enabled;
        self.engine.set_controls_enabled(enabled);
    }

    fn ensure_ready(&self) -> Result<(), ViewerError> {
        match self.setup.phase() {
            SetupPhase::Ready => Ok(()),
            phase => Err(ViewerError::NotReady(phase)),
        }
    }

    #[inline]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[inline]
    pub fn phase(&self) -> SetupPhase {
        self.setup.phase()
    }

    #[inline]
    pub fn pose(&self) -> CameraPose {
        self.rig.pose()
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.rig.is_dirty()
    }

    #[inline]
    pub fn controls_enabled(&self) -> bool {
        self.controls_enabled
    }

    #[inline]
    pub fn is_flying(&self) -> bool {
        self.flight.is_some()
    }

    /// Mark the camera for resync, as the timeline's dirty callback does.
    pub fn mark_dirty(&mut self) {
        self.rig.mark_dirty();
        self.engine.request_redraw();
    }

    pub fn timeline(&self) -> &ScrollTimeline {
        &self.timeline
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn host(&self) -> &H {
        &self.host
    }
}
