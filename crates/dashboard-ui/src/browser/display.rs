//! Display environment writing to the live document.

use dashboard_settings::{DisplayEnvironment, Surface};
use gloo::console;
use gloo::utils::document;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, HtmlStyleElement};

use crate::surfaces::selector;

/// Applies setting effects to `document.documentElement` and mounted nodes.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentEnvironment;

impl DocumentEnvironment {
    fn root() -> Option<HtmlElement> {
        document()
            .document_element()
            .and_then(|element| element.dyn_into::<HtmlElement>().ok())
    }

    fn set_root_style(property: &str, value: &str) {
        let Some(root) = Self::root() else {
            return;
        };
        if let Err(err) = root.style().set_property(property, value) {
            console::error!("failed to set root style", property, err);
        }
    }
}

impl DisplayEnvironment for DocumentEnvironment {
    fn toggle_root_class(&mut self, class: &str, enabled: bool) {
        let Some(root) = Self::root() else {
            return;
        };
        let classes = root.class_list();
        let result = if enabled {
            classes.add_1(class)
        } else {
            classes.remove_1(class)
        };
        if let Err(err) = result {
            console::error!("failed to toggle root class", class, err);
        }
    }

    fn set_root_font_size(&mut self, size: &str) {
        Self::set_root_style("font-size", size);
    }

    fn set_css_variable(&mut self, name: &str, value: &str) {
        Self::set_root_style(name, value);
    }

    fn set_surface_filter(&mut self, surface: Surface, filter: &str) {
        let nodes = match document().query_selector_all(selector(surface)) {
            Ok(nodes) => nodes,
            Err(err) => {
                console::error!("surface query failed", err);
                return;
            }
        };
        for index in 0..nodes.length() {
            let Some(element) = nodes
                .item(index)
                .and_then(|node| node.dyn_into::<HtmlElement>().ok())
            else {
                continue;
            };
            if let Err(err) = element.style().set_property("backdrop-filter", filter) {
                console::error!("failed to restyle surface", err);
            }
        }
    }

    fn replace_stylesheet(&mut self, element_id: &str, css: &str) {
        let document = document();
        let existing = document
            .get_element_by_id(element_id)
            .and_then(|element| element.dyn_into::<HtmlStyleElement>().ok());
        let style = match existing {
            Some(style) => style,
            None => {
                let created = document
                    .create_element("style")
                    .ok()
                    .and_then(|element| element.dyn_into::<HtmlStyleElement>().ok());
                let (Some(style), Some(head)) = (created, document.head()) else {
                    console::error!("cannot create stylesheet", element_id);
                    return;
                };
                style.set_id(element_id);
                if let Err(err) = head.append_child(&style) {
                    console::error!("failed to mount stylesheet", err);
                    return;
                }
                style
            }
        };
        style.set_text_content(Some(css));
    }
}
