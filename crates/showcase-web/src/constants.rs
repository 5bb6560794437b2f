use std::time::Duration;

// Element ids on the host page
pub const CANVAS_ID: &str = "webgi-canvas";
pub const CANVAS_CONTAINER_ID: &str = "webgi-canvas-container";
pub const CONTENT_ID: &str = "content";
pub const EXIT_BUTTON_ID: &str = "exit-preview";
pub const PREVIEW_BUTTON_ID: &str = "preview-button";

// webgi per-frame event, fired before each render
pub const PRE_FRAME_EVENT: &str = "preFrame";

// Cap on a single animation step; a backgrounded tab resumes with a huge delta
pub const MAX_FRAME_DT_SEC: f32 = 0.1;

#[inline]
pub fn clamp_frame_dt(dt: Duration) -> Duration {
    dt.min(Duration::from_secs_f32(MAX_FRAME_DT_SEC))
}
