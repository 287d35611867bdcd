use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, Node, ScrollBehavior, ScrollToOptions, Window};

use crate::app::infrastructure::dom::Dom;

/// The live browser document.
pub struct WebDocument {
    window: Window,
    document: Document,
}

impl WebDocument {
    pub fn new(window: Window) -> Option<Self> {
        let document = window.document()?;
        Some(Self { window, document })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    fn html(element: &Element) -> Option<&HtmlElement> {
        element.dyn_ref::<HtmlElement>()
    }
}

impl Dom for WebDocument {
    type Element = Element;

    fn query(&self, selector: &str) -> Option<Element> {
        self.document.query_selector(selector).ok().flatten()
    }

    fn query_all(&self, selector: &str) -> Vec<Element> {
        let Ok(list) = self.document.query_selector_all(selector) else {
            log::warn!("Invalid selector: {}", selector);
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn body(&self) -> Option<Element> {
        self.document.body().map(Element::from)
    }

    fn add_class(&self, element: &Element, class: &str) {
        if let Err(err) = element.class_list().add_1(class) {
            log::warn!("Failed to add class {:?}: {:?}", class, err);
        }
    }

    fn remove_class(&self, element: &Element, class: &str) {
        if let Err(err) = element.class_list().remove_1(class) {
            log::warn!("Failed to remove class {:?}: {:?}", class, err);
        }
    }

    fn has_class(&self, element: &Element, class: &str) -> bool {
        element.class_list().contains(class)
    }

    fn set_class_name(&self, element: &Element, value: &str) {
        element.set_class_name(value);
    }

    fn attribute(&self, element: &Element, name: &str) -> Option<String> {
        element.get_attribute(name)
    }

    fn set_attribute(&self, element: &Element, name: &str, value: &str) {
        if let Err(err) = element.set_attribute(name, value) {
            log::warn!("Failed to set {}: {:?}", name, err);
        }
    }

    fn remove_attribute(&self, element: &Element, name: &str) {
        if let Err(err) = element.remove_attribute(name) {
            log::warn!("Failed to remove {}: {:?}", name, err);
        }
    }

    fn set_style(&self, element: &Element, property: &str, value: &str) {
        if let Some(html) = Self::html(element)
            && let Err(err) = html.style().set_property(property, value)
        {
            log::warn!("Failed to set style {}: {:?}", property, err);
        }
    }

    fn set_text(&self, element: &Element, text: &str) {
        element.set_text_content(Some(text));
    }

    fn contains(&self, ancestor: &Element, target: &Element) -> bool {
        let target: &Node = target;
        ancestor.contains(Some(target))
    }

    fn offset_top(&self, element: &Element) -> f64 {
        Self::html(element).map_or(0.0, |html| f64::from(html.offset_top()))
    }

    fn offset_height(&self, element: &Element) -> f64 {
        Self::html(element).map_or(0.0, |html| f64::from(html.offset_height()))
    }

    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn viewport_width(&self) -> f64 {
        self.window
            .inner_width()
            .ok()
            .and_then(|w| w.as_f64())
            .unwrap_or(0.0)
    }

    fn viewport_height(&self) -> f64 {
        self.window
            .inner_height()
            .ok()
            .and_then(|h| h.as_f64())
            .unwrap_or(0.0)
    }

    fn scroll_to(&self, top: f64) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(ScrollBehavior::Smooth);
        self.window.scroll_to_with_scroll_to_options(&options);
    }

    fn create_element(&self, tag: &str) -> Option<Element> {
        self.document.create_element(tag).ok()
    }

    fn append_to_body(&self, element: &Element) {
        if let Some(body) = self.document.body() {
            if let Err(err) = body.append_child(element) {
                log::warn!("Failed to append to body: {:?}", err);
            }
        }
    }

    fn remove(&self, element: &Element) {
        element.remove();
    }
}
