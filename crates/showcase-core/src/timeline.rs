//! Scroll-bound camera and section transitions.
//!
//! Each [`ScrollTransition`] scrubs one property (a camera pose field or a
//! section's opacity) toward a literal value across a section's trigger
//! window. Transitions do not render when bound: the start value is captured
//! the first time the scrubbed progress moves, and writes happen only on
//! frames where the progress changed.

use crate::camera::{CameraRig, DirtyMark, PoseField};
use crate::constants::{
    vec3, DISPLAY_POSITION, DISPLAY_TARGET, PROGRESS_EPSILON, SCRUB_SEC, SOUND_POSITION,
    SOUND_TARGET, TRIGGER_END, TRIGGER_START,
};
use crate::device::DeviceClass;
use crate::engine::ContentHost;
use crate::scroll::{ScrollSnapshot, ScrollWindow, Scrub, Section};
use crate::tween::Interpolate;
use glam::Vec3;
use smallvec::SmallVec;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TransitionTarget {
    Camera {
        field: PoseField,
        to: Vec3,
        mark: DirtyMark,
    },
    Opacity {
        section: Section,
        to: f32,
    },
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum StartValue {
    Pose(Vec3),
    Opacity(f32),
}

#[derive(Clone, Debug)]
pub struct ScrollTransition {
    pub window: ScrollWindow,
    pub target: TransitionTarget,
    scrub: Scrub,
    from: Option<StartValue>,
    last_progress: Option<f32>,
}

/// Scroll window shared by every transition: section top entering at the
/// viewport bottom through section top reaching the viewport top.
pub fn section_window(trigger: Section) -> ScrollWindow {
    ScrollWindow {
        trigger,
        start: TRIGGER_START,
        end: TRIGGER_END,
        scrub_sec: SCRUB_SEC,
    }
}

impl ScrollTransition {
    pub fn new(window: ScrollWindow, target: TransitionTarget) -> Self {
        Self {
            window,
            target,
            scrub: Scrub::new(window.scrub_sec),
            from: None,
            last_progress: None,
        }
    }

    pub fn camera(trigger: Section, field: PoseField, to: Vec3, mark: DirtyMark) -> Self {
        Self::new(
            section_window(trigger),
            TransitionTarget::Camera { field, to, mark },
        )
    }

    pub fn opacity(trigger: Section, section: Section, to: f32) -> Self {
        Self::new(
            section_window(trigger),
            TransitionTarget::Opacity { section, to },
        )
    }

    /// Scrubbed progress as of the last sample.
    #[inline]
    pub fn progress(&self) -> f32 {
        self.scrub.rendered()
    }

    #[inline]
    pub fn has_rendered(&self) -> bool {
        self.from.is_some()
    }

    /// Advance this transition by one frame. Returns whether the camera
    /// resync flag was raised by this write.
    pub fn sample(
        &mut self,
        snapshot: &ScrollSnapshot,
        dt: Duration,
        camera_writes: bool,
        rig: &mut CameraRig,
        host: &mut impl ContentHost,
    ) -> anyhow::Result<bool> {
        let raw = self.window.progress(snapshot)?;
        let p = self.scrub.step(raw, dt);
        let moved = match self.last_progress {
            None => p > PROGRESS_EPSILON,
            Some(prev) => (p - prev).abs() > PROGRESS_EPSILON,
        };
        if !moved {
            return Ok(false);
        }
        self.last_progress = Some(p);
        match self.target {
            TransitionTarget::Camera { field, to, mark } => {
                if !camera_writes {
                    return Ok(false);
                }
                let from = match self.from {
                    Some(StartValue::Pose(v)) => v,
                    _ => {
                        let v = rig.pose().get(field);
                        self.from = Some(StartValue::Pose(v));
                        v
                    }
                };
                rig.apply(field, Vec3::interpolate(from, to, p), mark);
                Ok(mark == DirtyMark::Mark)
            }
            TransitionTarget::Opacity { section, to } => {
                let from = match self.from {
                    Some(StartValue::Opacity(o)) => o,
                    _ => {
                        let o = host.section_opacity(section)?;
                        self.from = Some(StartValue::Opacity(o));
                        o
                    }
                };
                host.set_section_opacity(section, f32::interpolate(from, to, p))?;
                Ok(false)
            }
        }
    }
}

/// Ordered set of scroll-bound transitions; later entries win on shared fields.
#[derive(Clone, Debug, Default)]
pub struct ScrollTimeline {
    transitions: SmallVec<[ScrollTransition; 8]>,
}

impl ScrollTimeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then(mut self, transition: ScrollTransition) -> Self {
        self.transitions.push(transition);
        self
    }

    pub fn transitions(&self) -> &[ScrollTransition] {
        &self.transitions
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    /// Sample every transition in order. Camera transitions keep tracking
    /// progress while `camera_writes` is false but leave the rig untouched.
    /// Returns whether any write raised the resync flag.
    pub fn sample(
        &mut self,
        snapshot: &ScrollSnapshot,
        dt: Duration,
        camera_writes: bool,
        rig: &mut CameraRig,
        host: &mut impl ContentHost,
    ) -> anyhow::Result<bool> {
        let mut marked = false;
        for transition in self.transitions.iter_mut() {
            marked |= transition.sample(snapshot, dt, camera_writes, rig, host)?;
        }
        Ok(marked)
    }
}

/// Declare the page's scroll timeline for `device`.
///
/// Target transitions do not raise the resync flag; they ride on the position
/// transition of the same section, which does.
pub fn bind_scroll_animation(device: DeviceClass) -> ScrollTimeline {
    log::info!("[timeline] binding scroll animation for {:?}", device);
    ScrollTimeline::new()
        .then(ScrollTransition::camera(
            Section::Sound,
            PoseField::Position,
            vec3(device.pick(SOUND_POSITION)),
            DirtyMark::Mark,
        ))
        .then(ScrollTransition::camera(
            Section::Sound,
            PoseField::Target,
            vec3(device.pick(SOUND_TARGET)),
            DirtyMark::Skip,
        ))
        .then(ScrollTransition::opacity(Section::Sound, Section::Jumbotron, 0.0))
        .then(ScrollTransition::opacity(Section::Sound, Section::SoundContent, 1.0))
        .then(display_position(device))
        .then(display_target(device))
        .then(ScrollTransition::opacity(Section::Display, Section::Display, 1.0))
}

/// Camera pair that ties the pose back to the display-section window after
/// leaving preview.
pub fn resume_transitions(device: DeviceClass) -> ScrollTimeline {
    ScrollTimeline::new()
        .then(display_position(device))
        .then(display_target(device))
}

fn display_position(device: DeviceClass) -> ScrollTransition {
    ScrollTransition::camera(
        Section::Display,
        PoseField::Position,
        vec3(device.pick(DISPLAY_POSITION)),
        DirtyMark::Mark,
    )
}

fn display_target(device: DeviceClass) -> ScrollTransition {
    ScrollTransition::camera(
        Section::Display,
        PoseField::Target,
        vec3(device.pick(DISPLAY_TARGET)),
        DirtyMark::Skip,
    )
}
