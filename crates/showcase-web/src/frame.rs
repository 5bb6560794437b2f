use crate::constants::{clamp_frame_dt, PRE_FRAME_EVENT};
use crate::dom;
use crate::overlay::DomHost;
use crate::webgi::{ViewerApp, WebgiEngine};
use instant::Instant;
use showcase_core::ViewerController;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub type Controller = ViewerController<WebgiEngine, DomHost>;
pub type SharedController = Rc<RefCell<Controller>>;

/// Animation side of the frame: samples scroll and advances the timelines.
pub struct FrameContext {
    pub controller: SharedController,
    pub document: web::Document,
    pub last_instant: Instant,
}

impl FrameContext {
    pub fn new(controller: SharedController, document: web::Document) -> Self {
        Self {
            controller,
            document,
            last_instant: Instant::now(),
        }
    }

    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = clamp_frame_dt(now - self.last_instant);
        self.last_instant = now;

        let snapshot = match dom::scroll_snapshot(&self.document) {
            Ok(s) => s,
            Err(e) => {
                log::error!("[frame] scroll sample error: {:?}", e);
                return;
            }
        };
        // a preview/exit call from JS may hold the controller; retry next frame
        let Ok(mut controller) = self.controller.try_borrow_mut() else {
            return;
        };
        if let Err(e) = controller.advance(dt, &snapshot) {
            log::error!("[frame] advance error: {:?}", e);
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

/// Camera resync hook run by the viewer before each render. A frame skipped
/// because the controller is borrowed leaves the flag set for the next one.
pub fn install_pre_frame_hook(viewer: &ViewerApp, controller: SharedController) {
    let closure = Closure::wrap(Box::new(move || {
        if let Ok(mut c) = controller.try_borrow_mut() {
            c.pre_frame();
        }
    }) as Box<dyn FnMut()>);
    viewer.add_event_listener(PRE_FRAME_EVENT, closure.as_ref().unchecked_ref());
    closure.forget();
}
