//! Browser entry point.
//!
//! SYSTEM CONTEXT
//! ==============
//! Runs once when the WASM module loads. Waits for the document to be parsed,
//! resolves the page markup, builds one [`PageController`] and wires browser
//! events, intersection observers and real timers to it.
//!
//! Every callback goes through [`with_page`], which borrows the controller
//! for the duration of the handler and then arms timers for any work the
//! handler queued.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, DocumentReadyState, Element, ErrorEvent, Event, EventTarget, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, Window,
};

use crate::bindings::PageBindings;
use crate::config::{CONFIG_ELEMENT_ID, ObserverOptions, PageConfig};
use crate::controller::PageController;
use crate::dom::NodeRef;
use crate::dom::web::WebDom;
use crate::storage::LocalStorageStore;

type Page = PageController<WebDom, LocalStorageStore>;
type SharedPage = Rc<RefCell<Page>>;

/// Name of the window global that re-runs the skill-bar animation.
const ANIMATE_SKILLS_GLOBAL: &str = "animateSkills";

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) { log::Level::Debug } else { log::Level::Info };
    if let Err(err) = console_log::init_with_level(level) {
        log::warn!("console logger already installed: {err}");
    }

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        log::warn!("no document; page behavior disabled");
        return;
    };
    if document.ready_state() == DocumentReadyState::Loading {
        listen(&document, "DOMContentLoaded", |_| mount());
    } else {
        mount();
    }
}

fn mount() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };

    let config = read_config(&document);
    let dom = WebDom::new(document.clone());
    let bindings = dom.resolve_bindings(&config.selectors);
    let skills_observer = config.skills_observer.clone();
    let reveal_observer = config.reveal_observer.clone();

    let page: SharedPage = Rc::new(RefCell::new(PageController::new(
        dom,
        LocalStorageStore,
        bindings.clone(),
        config,
    )));
    with_page(&page, Page::init);

    attach_listeners(&page, &bindings);
    if let Some(skills) = &bindings.skills {
        observe_skills(&page, skills.section, &skills_observer);
    }
    observe_reveal(&page, &bindings.reveal, &reveal_observer);
    watch_window(&page, &window, &document);
    log::debug!("page behavior mounted");
}

/// Embedded JSON config, or defaults when absent or invalid.
fn read_config(document: &Document) -> PageConfig {
    let Some(raw) = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|element| element.text_content())
    else {
        return PageConfig::default();
    };
    match PageConfig::from_json(&raw) {
        Ok(config) => config,
        Err(err) => {
            log::warn!("ignoring page config: {err}");
            PageConfig::default()
        }
    }
}

// =============================================================
// Controller access and timers
// =============================================================

/// Run `f` against the controller, then arm timers for whatever it queued.
/// Returns `None` if the controller is already borrowed.
fn with_page<R>(page: &SharedPage, f: impl FnOnce(&mut Page) -> R) -> Option<R> {
    let result = match page.try_borrow_mut() {
        Ok(mut page) => f(&mut page),
        Err(err) => {
            log::warn!("page controller busy, event dropped: {err}");
            return None;
        }
    };
    arm_timers(page);
    Some(result)
}

fn arm_timers(page: &SharedPage) {
    let pending = match page.try_borrow_mut() {
        Ok(mut page) => page.take_unarmed(),
        Err(err) => {
            log::warn!("page controller busy, timers not armed: {err}");
            return;
        }
    };
    for (id, delay) in pending {
        let page = Rc::clone(page);
        Timeout::new(delay, move || {
            with_page(&page, |page| page.fire(id));
        })
        .forget();
    }
}

fn element_of(page: &SharedPage, node: NodeRef) -> Option<Element> {
    page.borrow().dom().element(node)
}

// =============================================================
// Event listeners
// =============================================================

fn listen(target: &EventTarget, event: &str, handler: impl FnMut(Event) + 'static) {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    if let Err(err) = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref()) {
        log::warn!("could not listen for {event}: {err:?}");
    }
    closure.forget();
}

/// Listen for `event` on the element behind `node`.
fn listen_node(page: &SharedPage, node: NodeRef, event: &str, handler: impl FnMut(Event) + 'static) {
    match element_of(page, node) {
        Some(element) => listen(&element, event, handler),
        None => log::debug!("no element for {node:?}; {event} not bound"),
    }
}

fn attach_listeners(page: &SharedPage, bindings: &PageBindings) {
    if let Some(theme) = &bindings.theme {
        let page_cb = Rc::clone(page);
        listen_node(page, theme.toggle, "click", move |_| {
            with_page(&page_cb, Page::on_theme_toggle);
        });
    }

    if let Some(nav) = &bindings.nav {
        let page_cb = Rc::clone(page);
        listen_node(page, nav.toggle, "click", move |_| {
            with_page(&page_cb, Page::on_menu_toggle);
        });
        for &item in &nav.items {
            let page_cb = Rc::clone(page);
            listen_node(page, item, "click", move |_| {
                with_page(&page_cb, Page::on_nav_link_click);
            });
        }
        if let Some(document) = web_sys::window().and_then(|w| w.document()) {
            let page_cb = Rc::clone(page);
            listen(&document, "click", move |event| {
                with_page(&page_cb, |page| {
                    let target = event
                        .target()
                        .and_then(|target| target.dyn_ref::<Element>().and_then(|el| page.dom().nearest_known(el)));
                    page.on_document_click(target)
                });
            });
        }
    }

    if let Some(form) = &bindings.form {
        let page_cb = Rc::clone(page);
        listen_node(page, form.form, "submit", move |event| {
            event.prevent_default();
            with_page(&page_cb, Page::on_form_submit);
        });
        for &field in &form.fields {
            let page_cb = Rc::clone(page);
            listen_node(page, field, "blur", move |_| {
                with_page(&page_cb, |page| page.on_field_blur(field));
            });
            let page_cb = Rc::clone(page);
            listen_node(page, field, "input", move |_| {
                with_page(&page_cb, |page| page.on_field_input(field));
            });
        }
    }

    for &card in &bindings.project_cards {
        let page_cb = Rc::clone(page);
        listen_node(page, card, "mouseenter", move |_| {
            with_page(&page_cb, |page| page.on_card_enter(card));
        });
        let page_cb = Rc::clone(page);
        listen_node(page, card, "mouseleave", move |_| {
            with_page(&page_cb, |page| page.on_card_leave(card));
        });
    }

    for anchor in &bindings.anchors {
        let link = anchor.link;
        let page_cb = Rc::clone(page);
        listen_node(page, link, "click", move |event| {
            event.prevent_default();
            with_page(&page_cb, |page| page.on_anchor_click(link));
        });
    }
}

// =============================================================
// Intersection observers
// =============================================================

fn observer_init(options: &ObserverOptions) -> IntersectionObserverInit {
    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(options.threshold));
    init.set_root_margin(&options.root_margin);
    init
}

fn entries(records: &js_sys::Array) -> impl Iterator<Item = IntersectionObserverEntry> + '_ {
    records
        .iter()
        .filter_map(|record| record.dyn_ref::<IntersectionObserverEntry>().cloned())
}

/// Watch the skills section until its animation has fired once.
fn observe_skills(page: &SharedPage, section: NodeRef, options: &ObserverOptions) {
    let Some(element) = element_of(page, section) else {
        return;
    };
    let page_cb = Rc::clone(page);
    let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
        move |records: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries(&records) {
                let intersecting = entry.is_intersecting();
                if with_page(&page_cb, |page| page.on_skills_intersection(intersecting)) == Some(true) {
                    observer.unobserve(&entry.target());
                }
            }
        },
    );
    match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &observer_init(options)) {
        Ok(observer) => observer.observe(&element),
        Err(err) => log::warn!("skills observer unavailable: {err:?}"),
    }
    callback.forget();
}

fn observe_reveal(page: &SharedPage, targets: &[NodeRef], options: &ObserverOptions) {
    if targets.is_empty() {
        return;
    }
    let page_cb = Rc::clone(page);
    let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
        move |records: js_sys::Array, _observer: IntersectionObserver| {
            for entry in entries(&records) {
                let intersecting = entry.is_intersecting();
                with_page(&page_cb, |page| {
                    let node = page.dom().lookup(&entry.target())?;
                    Some(page.on_reveal_intersection(node, intersecting))
                });
            }
        },
    );
    match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &observer_init(options)) {
        Ok(observer) => {
            for &node in targets {
                if let Some(element) = element_of(page, node) {
                    observer.observe(&element);
                }
            }
        }
        Err(err) => log::warn!("reveal observer unavailable: {err:?}"),
    }
    callback.forget();
}

// =============================================================
// Window hooks
// =============================================================

fn watch_window(page: &SharedPage, window: &Window, document: &Document) {
    let page_cb = Rc::clone(page);
    listen(window, "load", move |_| {
        with_page(&page_cb, Page::on_page_load);
    });
    if document.ready_state() == DocumentReadyState::Complete {
        with_page(page, Page::on_page_load);
    }

    let page_cb = Rc::clone(page);
    listen(window, "error", move |event| {
        let message = event.dyn_ref::<ErrorEvent>().map(ErrorEvent::message).unwrap_or_default();
        with_page(&page_cb, |page| page.on_script_error(&message));
    });

    let page_cb = Rc::clone(page);
    let animate = Closure::<dyn FnMut()>::new(move || {
        with_page(&page_cb, Page::animate_skills);
    });
    if let Err(err) = js_sys::Reflect::set(window, &JsValue::from_str(ANIMATE_SKILLS_GLOBAL), animate.as_ref()) {
        log::warn!("could not expose {ANIMATE_SKILLS_GLOBAL}: {err:?}");
    }
    animate.forget();
}
