//! DOM event listener guard

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Event, EventTarget};

/// A registered DOM listener, removed when dropped
pub struct EventListener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl EventListener {
    pub fn new(
        target: &EventTarget,
        event: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, JsValue> {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event,
            callback,
        })
    }

    /// Listener whose handler gets the event cast to `T`. Events of any
    /// other type are ignored.
    pub fn typed<T: JsCast + 'static>(
        target: &EventTarget,
        event: &'static str,
        mut handler: impl FnMut(T) + 'static,
    ) -> Result<Self, JsValue> {
        Self::new(target, event, move |e: Event| {
            if let Ok(typed) = e.dyn_into::<T>() {
                handler(typed);
            }
        })
    }
}

impl Drop for EventListener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}
