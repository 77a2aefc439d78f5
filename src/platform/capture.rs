//! Surface snapshot for the glitch effect

use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, HtmlElement};

use super::dom;

/// CSS custom property the glitch layer reads its backdrop from
pub const SCREEN_IMAGE_VAR: &str = "--screen-image";

/// Capture the canvas into a data URL and publish it as a CSS variable.
/// Best effort: returns false and logs at debug level on failure.
pub fn snapshot_to_css(canvas: &HtmlCanvasElement) -> bool {
    let url = match canvas.to_data_url() {
        Ok(url) => url,
        Err(e) => {
            log::debug!("Snapshot failed: {:?}", e);
            return false;
        }
    };

    let root = dom::document()
        .ok()
        .and_then(|d| d.document_element())
        .and_then(|el| el.dyn_into::<HtmlElement>().ok());
    let Some(root) = root else {
        log::debug!("Snapshot skipped: no document element");
        return false;
    };

    match root
        .style()
        .set_property(SCREEN_IMAGE_VAR, &format!("url({url})"))
    {
        Ok(()) => true,
        Err(e) => {
            log::debug!("Snapshot not applied: {:?}", e);
            false
        }
    }
}
