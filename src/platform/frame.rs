//! requestAnimationFrame loop guard

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

type FrameClosure = Closure<dyn FnMut(f64)>;

/// A running animation-frame loop. The callback receives the frame
/// timestamp (ms). Dropping the guard cancels the pending frame and
/// releases the callback.
///
/// The callback must not drop its own guard.
pub struct AnimationLoop {
    handle: Rc<Cell<Option<i32>>>,
    closure: Rc<RefCell<Option<FrameClosure>>>,
}

impl AnimationLoop {
    pub fn start(mut on_frame: impl FnMut(f64) + 'static) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;

        let handle = Rc::new(Cell::new(None));
        let closure: Rc<RefCell<Option<FrameClosure>>> = Rc::new(RefCell::new(None));

        let weak = Rc::downgrade(&closure);
        let next_handle = handle.clone();
        *closure.borrow_mut() = Some(Closure::wrap(Box::new(move |time: f64| {
            on_frame(time);

            // Reschedule only while the guard is alive
            let Some(slot) = weak.upgrade() else {
                return;
            };
            let Some(window) = web_sys::window() else {
                return;
            };
            if let Some(cb) = slot.borrow().as_ref() {
                next_handle.set(
                    window
                        .request_animation_frame(cb.as_ref().unchecked_ref())
                        .ok(),
                );
            }
        }) as Box<dyn FnMut(f64)>));

        if let Some(cb) = closure.borrow().as_ref() {
            handle.set(Some(
                window.request_animation_frame(cb.as_ref().unchecked_ref())?,
            ));
        }

        Ok(Self { handle, closure })
    }
}

impl Drop for AnimationLoop {
    fn drop(&mut self) {
        if let (Some(id), Some(window)) = (self.handle.take(), web_sys::window()) {
            let _ = window.cancel_animation_frame(id);
        }
        self.closure.borrow_mut().take();
    }
}
