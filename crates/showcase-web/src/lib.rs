#![cfg(target_arch = "wasm32")]
use crate::frame::{Controller, FrameContext, SharedController};
use crate::overlay::DomHost;
use crate::webgi::WebgiEngine;
use showcase_core::{DeviceClass, ViewerController};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod dom;
mod frame;
mod overlay;
mod style;
mod webgi;

thread_local! {
    static VIEWER: RefCell<Option<SharedController>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("showcase-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(constants::CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", constants::CANVAS_ID))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    let engine = WebgiEngine::new(&canvas)?;
    let viewer = engine.viewer().clone();
    let device = DeviceClass::from_mobile_flag(webgi::mobile_and_tablet_check());
    let host = DomHost::new(document.clone())?;

    // setup owns the controller until it is ready; nothing else can reach it yet
    let mut controller = ViewerController::new(engine, host, device);
    controller.setup().await?;
    let controller: SharedController = Rc::new(RefCell::new(controller));

    frame::install_pre_frame_hook(&viewer, controller.clone());
    wire_preview_buttons(&document);
    VIEWER.with(|v| *v.borrow_mut() = Some(controller.clone()));
    frame::start_loop(Rc::new(RefCell::new(FrameContext::new(controller, document))));
    log::info!("[init] viewer ready");
    Ok(())
}

fn wire_preview_buttons(document: &web::Document) {
    dom::add_click_listener(document, constants::PREVIEW_BUTTON_ID, || {
        if let Err(e) = trigger_preview() {
            log::error!("[preview] {:?}", e);
        }
    });
    dom::add_click_listener(document, constants::EXIT_BUTTON_ID, || {
        if let Err(e) = exit_preview() {
            log::error!("[preview] {:?}", e);
        }
    });
}

fn with_viewer(f: impl FnOnce(&mut Controller) -> anyhow::Result<()>) -> Result<(), JsValue> {
    let shared = VIEWER
        .with(|v| v.borrow().clone())
        .ok_or_else(|| JsValue::from_str("viewer is not ready"))?;
    let mut controller = shared
        .try_borrow_mut()
        .map_err(|_| JsValue::from_str("viewer is busy"))?;
    f(&mut controller).map_err(|e| JsValue::from_str(&format!("{e:#}")))
}

/// Enter preview mode; callable from the host page.
#[wasm_bindgen(js_name = triggerPreview)]
pub fn trigger_preview() -> Result<(), JsValue> {
    with_viewer(|c| c.trigger_preview())
}

/// Leave preview mode and hand the camera back to the scroll timeline.
#[wasm_bindgen(js_name = exitPreview)]
pub fn exit_preview() -> Result<(), JsValue> {
    with_viewer(|c| c.exit_preview())
}
