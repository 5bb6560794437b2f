use crate::scroll::{Edge, TriggerPoint};
use glam::Vec3;

// Literal camera poses and timeline tuning shared by the web front-end and tests.

// Scene
pub const SCENE_ASSET_PATH: &str = "scene-black.glb";
pub const PROGRESSIVE_SAMPLES: u32 = 32;
pub const TONEMAP_CONTRAST: bool = true;

// Mobile/tablet initial pose (desktop keeps the engine default)
pub const MOBILE_POSITION: [f32; 3] = [-16.7, 1.17, 11.7];
pub const MOBILE_TARGET: [f32; 3] = [0.0, 1.37, 0.0];
pub const MOBILE_CONTENT_CLASS: &str = "mobile-or-tablet";

// Preview fly-to
pub const PREVIEW_POSITION: [f32; 3] = [13.04, -2.01, 2.29];
pub const PREVIEW_TARGET: [f32; 3] = [0.11, 0.0, 0.0];
pub const PREVIEW_DURATION_SEC: f32 = 2.0;

// Sound section stop: [desktop, mobile]
pub const SOUND_POSITION: [[f32; 3]; 2] = [[-3.38, -10.74, -5.93], [-6.0, -12.2, -5.0]];
pub const SOUND_TARGET: [[f32; 3]; 2] = [[1.52, 0.77, -1.08], [0.7, 1.9, 0.7]];

// Display section stop: [desktop, mobile]
pub const DISPLAY_POSITION: [[f32; 3]; 2] = [[1.56, 5.0, 0.011], [9.36, 10.95, 0.09]];
pub const DISPLAY_TARGET: [[f32; 3]; 2] = [[-0.55, 0.32, 0.0], [-1.62, 0.02, -0.06]];

// Scroll trigger windows
// "top bottom" -> "top top"
pub const TRIGGER_START: TriggerPoint = TriggerPoint::new(Edge::Top, Edge::Bottom);
pub const TRIGGER_END: TriggerPoint = TriggerPoint::new(Edge::Top, Edge::Top);
pub const SCRUB_SEC: f32 = 2.0;

// Progress changes smaller than this are treated as "no movement"
pub const PROGRESS_EPSILON: f32 = 1e-6;

#[inline]
pub fn vec3(v: [f32; 3]) -> Vec3 {
    Vec3::from_array(v)
}
