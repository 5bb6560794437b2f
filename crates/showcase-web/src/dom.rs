use crate::style;
use anyhow::anyhow;
use showcase_core::{ScrollSnapshot, Section, SectionBounds};
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn js_err(e: wasm_bindgen::JsValue) -> anyhow::Error {
    anyhow!("{:?}", e)
}

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

pub fn html_element_by_id(document: &web::Document, id: &str) -> anyhow::Result<web::HtmlElement> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| anyhow!("missing #{id}"))?
        .dyn_into::<web::HtmlElement>()
        .map_err(|e| anyhow!("#{id} is not an HtmlElement: {:?}", e))
}

pub fn query_html(document: &web::Document, selector: &str) -> anyhow::Result<web::HtmlElement> {
    document
        .query_selector(selector)
        .map_err(js_err)?
        .ok_or_else(|| anyhow!("missing element {selector}"))?
        .dyn_into::<web::HtmlElement>()
        .map_err(|e| anyhow!("{selector} is not an HtmlElement: {:?}", e))
}

#[inline]
pub fn set_style(el: &web::HtmlElement, property: &str, value: &str) -> anyhow::Result<()> {
    el.style().set_property(property, value).map_err(js_err)
}

pub fn computed_opacity(el: &web::Element) -> anyhow::Result<f32> {
    let window = web::window().ok_or_else(|| anyhow!("no window"))?;
    let value = window
        .get_computed_style(el)
        .map_err(js_err)?
        .map(|s| s.get_property_value("opacity").unwrap_or_default())
        .unwrap_or_default();
    Ok(style::parse_opacity(&value))
}

/// Sample scroll offset, viewport height and document-space bounds of every
/// section present on the page. Absent sections are left out; the timeline
/// reports them when a window needs them.
pub fn scroll_snapshot(document: &web::Document) -> anyhow::Result<ScrollSnapshot> {
    let window = web::window().ok_or_else(|| anyhow!("no window"))?;
    let scroll_y = window.scroll_y().map_err(js_err)?;
    let viewport_height = window
        .inner_height()
        .map_err(js_err)?
        .as_f64()
        .ok_or_else(|| anyhow!("innerHeight is not a number"))?;
    let mut snapshot = ScrollSnapshot::new(scroll_y, viewport_height);
    for section in Section::ALL {
        if let Ok(Some(el)) = document.query_selector(section.selector()) {
            let rect = el.get_bounding_client_rect();
            snapshot.insert(
                section,
                SectionBounds {
                    top: rect.top() + scroll_y,
                    height: rect.height(),
                },
            );
        }
    }
    Ok(snapshot)
}
