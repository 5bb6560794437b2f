//! Scroll-trigger windows and scrub smoothing.
//!
//! A [`ScrollWindow`] maps the page scroll offset onto a 0..1 progress between
//! two trigger points of a section. [`Scrub`] lags the rendered progress behind
//! that raw value so camera moves follow the scrollbar smoothly.

use crate::constants::PROGRESS_EPSILON;
use crate::tween::{Ease, Tween};
use fnv::FnvHashMap;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Section {
    Jumbotron,
    Sound,
    SoundContent,
    Display,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Jumbotron,
        Section::Sound,
        Section::SoundContent,
        Section::Display,
    ];

    pub fn selector(self) -> &'static str {
        match self {
            Section::Jumbotron => ".jumbotron-section",
            Section::Sound => ".sound-section",
            Section::SoundContent => ".sound-section-content",
            Section::Display => ".display-section",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScrollError {
    #[error("invalid trigger point {0:?}, expected \"<element edge> <viewport edge>\"")]
    InvalidTrigger(String),
    #[error("no layout sampled for section {0}")]
    MissingSection(&'static str),
}

/// Document-space vertical extent of a section.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SectionBounds {
    pub top: f64,
    pub height: f64,
}

/// Scroll state sampled by the host once per animation frame.
#[derive(Clone, Debug, Default)]
pub struct ScrollSnapshot {
    pub scroll_y: f64,
    pub viewport_height: f64,
    sections: FnvHashMap<Section, SectionBounds>,
}

impl ScrollSnapshot {
    pub fn new(scroll_y: f64, viewport_height: f64) -> Self {
        Self {
            scroll_y,
            viewport_height,
            sections: FnvHashMap::default(),
        }
    }

    pub fn with_section(mut self, section: Section, bounds: SectionBounds) -> Self {
        self.sections.insert(section, bounds);
        self
    }

    pub fn insert(&mut self, section: Section, bounds: SectionBounds) {
        self.sections.insert(section, bounds);
    }

    pub fn bounds(&self, section: Section) -> Result<SectionBounds, ScrollError> {
        self.sections
            .get(&section)
            .copied()
            .ok_or(ScrollError::MissingSection(section.selector()))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edge {
    Top,
    Center,
    Bottom,
}

impl Edge {
    #[inline]
    fn fraction(self) -> f64 {
        match self {
            Edge::Top => 0.0,
            Edge::Center => 0.5,
            Edge::Bottom => 1.0,
        }
    }
}

impl FromStr for Edge {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top" => Ok(Edge::Top),
            "center" => Ok(Edge::Center),
            "bottom" => Ok(Edge::Bottom),
            _ => Err(()),
        }
    }
}

/// "When `element` edge of the trigger meets `viewport` edge of the screen."
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TriggerPoint {
    pub element: Edge,
    pub viewport: Edge,
}

impl TriggerPoint {
    pub const fn new(element: Edge, viewport: Edge) -> Self {
        Self { element, viewport }
    }

    /// Scroll offset at which this point is reached.
    #[inline]
    pub fn scroll_offset(&self, bounds: SectionBounds, viewport_height: f64) -> f64 {
        bounds.top + self.element.fraction() * bounds.height
            - self.viewport.fraction() * viewport_height
    }
}

impl FromStr for TriggerPoint {
    type Err = ScrollError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ScrollError::InvalidTrigger(s.to_string());
        let mut parts = s.split_whitespace();
        let element: Edge = parts.next().ok_or_else(invalid)?.parse().map_err(|_| invalid())?;
        let viewport: Edge = parts.next().ok_or_else(invalid)?.parse().map_err(|_| invalid())?;
        if parts.next().is_some() {
            return Err(invalid());
        }
        Ok(Self { element, viewport })
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollWindow {
    pub trigger: Section,
    pub start: TriggerPoint,
    pub end: TriggerPoint,
    pub scrub_sec: f32,
}

impl ScrollWindow {
    /// Raw progress through the window; a pure function of the scroll offset.
    pub fn progress(&self, snapshot: &ScrollSnapshot) -> Result<f32, ScrollError> {
        let bounds = snapshot.bounds(self.trigger)?;
        let start = self.start.scroll_offset(bounds, snapshot.viewport_height);
        let end = self.end.scroll_offset(bounds, snapshot.viewport_height);
        let span = end - start;
        if span.abs() < f64::EPSILON {
            return Ok(if snapshot.scroll_y >= start { 1.0 } else { 0.0 });
        }
        Ok(((snapshot.scroll_y - start) / span).clamp(0.0, 1.0) as f32)
    }
}

/// Rendered progress that catches up with the raw progress over `scrub_sec`.
#[derive(Clone, Debug)]
pub struct Scrub {
    duration: Duration,
    rendered: f32,
    target: f32,
    catch_up: Option<Tween<f32>>,
}

impl Scrub {
    pub fn new(scrub_sec: f32) -> Self {
        Self {
            duration: Duration::from_secs_f32(scrub_sec.max(0.0)),
            rendered: 0.0,
            target: 0.0,
            catch_up: None,
        }
    }

    #[inline]
    pub fn rendered(&self) -> f32 {
        self.rendered
    }

    #[inline]
    pub fn is_settled(&self) -> bool {
        self.catch_up.is_none()
    }

    pub fn step(&mut self, raw: f32, dt: Duration) -> f32 {
        if (raw - self.target).abs() > PROGRESS_EPSILON {
            self.target = raw;
            self.catch_up = Some(Tween::new(self.rendered, raw, self.duration, Ease::Power3Out));
        }
        if let Some(tw) = &mut self.catch_up {
            self.rendered = tw.advance(dt);
            if tw.is_finished() {
                self.catch_up = None;
            }
        }
        self.rendered
    }
}
