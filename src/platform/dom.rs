//! DOM lookup helpers

use glam::Vec2;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlCanvasElement, Window};

pub fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no window"))
}

pub fn document() -> Result<Document, JsValue> {
    window()?
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))
}

/// Element by id, cast to `T`
pub fn by_id<T: JsCast>(id: &str) -> Result<T, JsValue> {
    document()?
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing #{id}")))?
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("#{id} has the wrong element type")))
}

/// High-resolution timestamp (ms), same clock as animation frames
pub fn now() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_default()
}

pub fn set_text(id: &str, text: &str) {
    if let Some(el) = document().ok().and_then(|d| d.get_element_by_id(id)) {
        if el.text_content().as_deref() != Some(text) {
            el.set_text_content(Some(text));
        }
    }
}

/// Add or remove a class
pub fn set_class(el: &Element, class: &str, on: bool) {
    let list = el.class_list();
    let _ = if on { list.add_1(class) } else { list.remove_1(class) };
}

pub fn set_class_by_id(id: &str, class: &str, on: bool) {
    if let Some(el) = document().ok().and_then(|d| d.get_element_by_id(id)) {
        set_class(&el, class, on);
    }
}

/// Show or hide an element via the `hidden` class
pub fn set_visible(id: &str, visible: bool) {
    set_class_by_id(id, "hidden", !visible);
}

/// Viewport CSS size and device pixel ratio
pub fn viewport_metrics() -> (Vec2, f32) {
    let Some(window) = web_sys::window() else {
        return (Vec2::ONE, 1.0);
    };
    let width = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(1.0);
    let height = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(1.0);
    let dpr = window.device_pixel_ratio().max(1.0);
    (Vec2::new(width as f32, height as f32), dpr as f32)
}

/// Size a fullscreen canvas backing store to the viewport times the pixel
/// ratio. Returns the backing size.
pub fn fit_canvas(canvas: &HtmlCanvasElement) -> (u32, u32) {
    let (css, dpr) = viewport_metrics();
    let width = (css.x * dpr).max(1.0) as u32;
    let height = (css.y * dpr).max(1.0) as u32;
    if canvas.width() != width {
        canvas.set_width(width);
    }
    if canvas.height() != height {
        canvas.set_height(height);
    }
    (width, height)
}

/// Pointer position relative to an element (CSS px)
pub fn local_point(el: &Element, client_x: i32, client_y: i32) -> Vec2 {
    let rect = el.get_bounding_client_rect();
    Vec2::new(
        client_x as f32 - rect.left() as f32,
        client_y as f32 - rect.top() as f32,
    )
}
