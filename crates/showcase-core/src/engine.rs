//! Seams to the external collaborators: the 3D viewer engine and the host page.

use crate::camera::CameraPose;
use crate::scroll::Section;
use crate::setup::RenderPlugin;

/// Contract the controller needs from the 3D viewer engine.
///
/// Futures returned here are polled on a single thread; implementations are
/// not required to be `Send`.
#[allow(async_fn_in_trait)]
pub trait ViewerEngine {
    async fn add_plugin(&mut self, plugin: RenderPlugin) -> anyhow::Result<()>;

    /// Compile the pass list. Called once, after the last plugin.
    fn refresh_pipeline(&mut self) -> anyhow::Result<()>;

    async fn load_asset(&mut self, path: &str) -> anyhow::Result<()>;

    fn set_tonemap_clip_background(&mut self, clip: bool) -> anyhow::Result<()>;

    /// Current position/target of the active camera.
    fn camera_pose(&self) -> CameraPose;

    /// Write the pose into the camera and re-derive its transform.
    fn sync_camera(&mut self, pose: CameraPose);

    /// Mark the scene as needing a redraw.
    fn request_redraw(&mut self);

    fn set_controls_enabled(&mut self, enabled: bool);
}

/// Page elements the viewer mutates outside its own canvas.
pub trait ContentHost {
    fn set_overlay_pointer_events(&mut self, enabled: bool) -> anyhow::Result<()>;
    fn set_content_opacity(&mut self, opacity: f32) -> anyhow::Result<()>;
    fn set_content_class(&mut self, class: &str) -> anyhow::Result<()>;
    fn section_opacity(&self, section: Section) -> anyhow::Result<f32>;
    fn set_section_opacity(&mut self, section: Section, opacity: f32) -> anyhow::Result<()>;
    fn scroll_to_top(&mut self);
}
