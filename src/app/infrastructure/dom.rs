//! The page as seen by the behavior layer.
//!
//! Every controller receives the document as an `Rc<D: Dom>` instead of
//! reaching for browser globals, so the same code runs against the real DOM
//! (`web` feature) and against [`MemoryDocument`](super::memory::MemoryDocument)
//! in tests.

use std::fmt;

pub trait Dom: 'static {
    type Element: Clone + PartialEq + fmt::Debug + 'static;

    /// First element matching `selector`, in document order.
    fn query(&self, selector: &str) -> Option<Self::Element>;
    fn query_all(&self, selector: &str) -> Vec<Self::Element>;
    fn element_by_id(&self, id: &str) -> Option<Self::Element>;
    fn body(&self) -> Option<Self::Element>;

    fn add_class(&self, element: &Self::Element, class: &str);
    fn remove_class(&self, element: &Self::Element, class: &str);
    fn has_class(&self, element: &Self::Element, class: &str) -> bool;
    /// Replaces the whole class list, used for icon glyph swaps.
    fn set_class_name(&self, element: &Self::Element, value: &str);

    fn attribute(&self, element: &Self::Element, name: &str) -> Option<String>;
    fn set_attribute(&self, element: &Self::Element, name: &str, value: &str);
    fn remove_attribute(&self, element: &Self::Element, name: &str);
    fn set_style(&self, element: &Self::Element, property: &str, value: &str);
    fn set_text(&self, element: &Self::Element, text: &str);

    /// True when `target` is `ancestor` or one of its descendants.
    fn contains(&self, ancestor: &Self::Element, target: &Self::Element) -> bool;

    fn offset_top(&self, element: &Self::Element) -> f64;
    fn offset_height(&self, element: &Self::Element) -> f64;
    fn scroll_y(&self) -> f64;
    fn viewport_width(&self) -> f64;
    fn viewport_height(&self) -> f64;
    /// Smooth-scrolls the window so that `top` is at the top edge.
    fn scroll_to(&self, top: f64);

    fn create_element(&self, tag: &str) -> Option<Self::Element>;
    fn append_to_body(&self, element: &Self::Element);
    fn remove(&self, element: &Self::Element);
}
