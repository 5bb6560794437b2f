//! Bindings to the `webgi` viewer module and the [`ViewerEngine`] built on them.

use crate::dom::js_err;
use anyhow::anyhow;
use glam::Vec3;
use showcase_core::{CameraPose, RenderPlugin, ViewerEngine};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

#[wasm_bindgen(module = "webgi")]
extern "C" {
    #[derive(Clone)]
    pub type ViewerApp;

    #[wasm_bindgen(constructor, catch)]
    fn new(options: &JsValue) -> Result<ViewerApp, JsValue>;

    #[wasm_bindgen(method, js_name = addPlugin)]
    fn add_plugin(this: &ViewerApp, plugin: &JsValue) -> js_sys::Promise;

    #[wasm_bindgen(method, js_name = setDirty)]
    fn set_dirty(this: &ViewerApp);

    #[wasm_bindgen(method, getter)]
    fn scene(this: &ViewerApp) -> Scene;

    #[wasm_bindgen(method, getter)]
    fn renderer(this: &ViewerApp) -> Renderer;

    #[wasm_bindgen(method, js_name = addEventListener)]
    pub fn add_event_listener(this: &ViewerApp, kind: &str, listener: &js_sys::Function);

    type Renderer;

    #[wasm_bindgen(method, js_name = refreshPipeline)]
    fn refresh_pipeline(this: &Renderer);

    type Scene;

    #[wasm_bindgen(method, getter, js_name = activeCamera)]
    fn active_camera(this: &Scene) -> Camera;

    type Camera;

    #[wasm_bindgen(method, getter)]
    fn position(this: &Camera) -> Vector3;

    #[wasm_bindgen(method, getter)]
    fn target(this: &Camera) -> Vector3;

    #[wasm_bindgen(method, js_name = positionTargetUpdated)]
    fn position_target_updated(this: &Camera, update_controls: bool);

    #[wasm_bindgen(method, js_name = setCameraOptions)]
    fn set_camera_options(this: &Camera, options: &JsValue);

    type Vector3;

    #[wasm_bindgen(method, getter)]
    fn x(this: &Vector3) -> f64;

    #[wasm_bindgen(method, getter)]
    fn y(this: &Vector3) -> f64;

    #[wasm_bindgen(method, getter)]
    fn z(this: &Vector3) -> f64;

    #[wasm_bindgen(method)]
    fn set(this: &Vector3, x: f64, y: f64, z: f64);

    #[derive(Clone)]
    type AssetManagerPlugin;

    #[wasm_bindgen(constructor)]
    fn new() -> AssetManagerPlugin;

    #[wasm_bindgen(method, js_name = addFromPath)]
    fn add_from_path(this: &AssetManagerPlugin, path: &str) -> js_sys::Promise;

    type GBufferPlugin;

    #[wasm_bindgen(constructor)]
    fn new() -> GBufferPlugin;

    type ProgressivePlugin;

    #[wasm_bindgen(constructor)]
    fn new(max_frame_count: u32) -> ProgressivePlugin;

    #[derive(Clone)]
    type TonemapPlugin;

    #[wasm_bindgen(constructor)]
    fn new(enabled: bool) -> TonemapPlugin;

    #[wasm_bindgen(method, getter)]
    fn config(this: &TonemapPlugin) -> JsValue;

    type GammaCorrectionPlugin;

    #[wasm_bindgen(constructor)]
    fn new() -> GammaCorrectionPlugin;

    #[wasm_bindgen(js_name = SSRPlugin)]
    type SsrPlugin;

    #[wasm_bindgen(constructor, js_class = "SSRPlugin")]
    fn new() -> SsrPlugin;

    #[wasm_bindgen(js_name = SSAOPlugin)]
    type SsaoPlugin;

    #[wasm_bindgen(constructor, js_class = "SSAOPlugin")]
    fn new() -> SsaoPlugin;

    type BloomPlugin;

    #[wasm_bindgen(constructor)]
    fn new() -> BloomPlugin;

    #[wasm_bindgen(js_name = mobileAndTabletCheck)]
    pub fn mobile_and_tablet_check() -> bool;
}

#[inline]
fn to_vec3(v: &Vector3) -> Vec3 {
    Vec3::new(v.x() as f32, v.y() as f32, v.z() as f32)
}

fn options(entries: &[(&str, JsValue)]) -> Result<JsValue, JsValue> {
    let obj = js_sys::Object::new();
    for (key, value) in entries {
        js_sys::Reflect::set(&obj, &JsValue::from_str(key), value)?;
    }
    Ok(obj.into())
}

/// webgi `ViewerApp` bound to one canvas.
pub struct WebgiEngine {
    viewer: ViewerApp,
    camera: Camera,
    asset_manager: Option<AssetManagerPlugin>,
    tonemap: Option<TonemapPlugin>,
}

impl WebgiEngine {
    pub fn new(canvas: &web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let opts = options(&[("canvas", canvas.clone().into())]).map_err(js_err)?;
        let viewer = ViewerApp::new(&opts).map_err(js_err)?;
        let camera = viewer.scene().active_camera();
        Ok(Self {
            viewer,
            camera,
            asset_manager: None,
            tonemap: None,
        })
    }

    pub fn viewer(&self) -> &ViewerApp {
        &self.viewer
    }
}

impl ViewerEngine for WebgiEngine {
    async fn add_plugin(&mut self, plugin: RenderPlugin) -> anyhow::Result<()> {
        let instance: JsValue = match plugin {
            RenderPlugin::AssetManager => {
                let p = AssetManagerPlugin::new();
                self.asset_manager = Some(p.clone());
                p.into()
            }
            RenderPlugin::GBuffer => GBufferPlugin::new().into(),
            RenderPlugin::Progressive { samples } => ProgressivePlugin::new(samples).into(),
            RenderPlugin::Tonemap { contrast } => {
                let p = TonemapPlugin::new(contrast);
                self.tonemap = Some(p.clone());
                p.into()
            }
            RenderPlugin::GammaCorrection => GammaCorrectionPlugin::new().into(),
            RenderPlugin::Ssr => SsrPlugin::new().into(),
            RenderPlugin::Ssao => SsaoPlugin::new().into(),
            RenderPlugin::Bloom => BloomPlugin::new().into(),
        };
        JsFuture::from(self.viewer.add_plugin(&instance))
            .await
            .map_err(js_err)?;
        log::debug!("[webgi] added {}", plugin);
        Ok(())
    }

    fn refresh_pipeline(&mut self) -> anyhow::Result<()> {
        self.viewer.renderer().refresh_pipeline();
        Ok(())
    }

    async fn load_asset(&mut self, path: &str) -> anyhow::Result<()> {
        let manager = self
            .asset_manager
            .as_ref()
            .ok_or_else(|| anyhow!("asset manager plugin not registered"))?;
        JsFuture::from(manager.add_from_path(path))
            .await
            .map_err(js_err)?;
        log::info!("[webgi] loaded {}", path);
        Ok(())
    }

    fn set_tonemap_clip_background(&mut self, clip: bool) -> anyhow::Result<()> {
        let tonemap = self
            .tonemap
            .as_ref()
            .ok_or_else(|| anyhow!("tonemap plugin not registered"))?;
        js_sys::Reflect::set(
            &tonemap.config(),
            &JsValue::from_str("clipBackground"),
            &JsValue::from_bool(clip),
        )
        .map_err(js_err)?;
        Ok(())
    }

    fn camera_pose(&self) -> CameraPose {
        CameraPose::new(
            to_vec3(&self.camera.position()),
            to_vec3(&self.camera.target()),
        )
    }

    fn sync_camera(&mut self, pose: CameraPose) {
        let p = pose.position;
        let t = pose.target;
        self.camera.position().set(p.x as f64, p.y as f64, p.z as f64);
        self.camera.target().set(t.x as f64, t.y as f64, t.z as f64);
        self.camera.position_target_updated(true);
    }

    fn request_redraw(&mut self) {
        self.viewer.set_dirty();
    }

    fn set_controls_enabled(&mut self, enabled: bool) {
        match options(&[("controlsEnabled", JsValue::from_bool(enabled))]) {
            Ok(opts) => self.camera.set_camera_options(&opts),
            Err(e) => log::error!("[webgi] camera options: {:?}", e),
        }
    }
}
