use crate::constants::{CANVAS_CONTAINER_ID, CONTENT_ID, EXIT_BUTTON_ID};
use crate::dom;
use crate::style;
use showcase_core::{ContentHost, Section};
use web_sys as web;

/// Page elements around the canvas: the overlay container, the marketing
/// content it covers, and the exit button shown only while previewing.
pub struct DomHost {
    document: web::Document,
    container: web::HtmlElement,
    content: web::HtmlElement,
    exit_button: Option<web::HtmlElement>,
}

impl DomHost {
    pub fn new(document: web::Document) -> anyhow::Result<Self> {
        let container = dom::html_element_by_id(&document, CANVAS_CONTAINER_ID)?;
        let content = dom::html_element_by_id(&document, CONTENT_ID)?;
        let exit_button = dom::html_element_by_id(&document, EXIT_BUTTON_ID).ok();
        if exit_button.is_none() {
            log::warn!("[overlay] no #{} on page; preview can only be left via exitPreview()", EXIT_BUTTON_ID);
        }
        let host = Self {
            document,
            container,
            content,
            exit_button,
        };
        host.show_exit_button(false)?;
        Ok(host)
    }

    fn show_exit_button(&self, visible: bool) -> anyhow::Result<()> {
        if let Some(button) = &self.exit_button {
            dom::set_style(button, "display", style::display(visible))?;
        }
        Ok(())
    }
}

impl ContentHost for DomHost {
    fn set_overlay_pointer_events(&mut self, enabled: bool) -> anyhow::Result<()> {
        dom::set_style(&self.container, "pointer-events", style::pointer_events(enabled))?;
        // the exit control exists exactly while the overlay owns the pointer
        self.show_exit_button(enabled)
    }

    fn set_content_opacity(&mut self, opacity: f32) -> anyhow::Result<()> {
        dom::set_style(&self.content, "opacity", &style::opacity_css(opacity))
    }

    fn set_content_class(&mut self, class: &str) -> anyhow::Result<()> {
        self.content.set_class_name(class);
        Ok(())
    }

    fn section_opacity(&self, section: Section) -> anyhow::Result<f32> {
        let el = dom::query_html(&self.document, section.selector())?;
        dom::computed_opacity(&el)
    }

    fn set_section_opacity(&mut self, section: Section, opacity: f32) -> anyhow::Result<()> {
        let el = dom::query_html(&self.document, section.selector())?;
        dom::set_style(&el, "opacity", &style::opacity_css(opacity))
    }

    fn scroll_to_top(&mut self) {
        if let Some(w) = web::window() {
            w.scroll_to_with_x_and_y(0.0, 0.0);
        }
    }
}
