//! Cross-tab listener: forwards `storage` events into the settings store.

use std::cell::RefCell;
use std::rc::Rc;

use dashboard_settings::{StorageChange, SyncOutcome, route_storage_change};
use gloo::console;
use gloo::events::EventListener;
use gloo::utils::window;
use wasm_bindgen::JsCast;
use web_sys::StorageEvent;

use super::BrowserStore;

/// Listen for localStorage writes made by other tabs of the same origin.
///
/// The returned listener detaches when dropped.
#[must_use]
pub fn listen(store: Rc<RefCell<BrowserStore>>) -> EventListener {
    EventListener::new(&window(), "storage", move |event| {
        let Some(event) = event.dyn_ref::<StorageEvent>() else {
            return;
        };
        let change = StorageChange {
            key: event.key(),
            new_value: event.new_value(),
        };
        let Ok(mut store) = store.try_borrow_mut() else {
            console::warn!("settings store busy; dropping storage event");
            return;
        };
        if let SyncOutcome::Applied(key) = route_storage_change(&mut store, &change) {
            console::debug!("setting changed in another tab", key.as_str());
        }
    })
}
