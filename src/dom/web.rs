//! Browser DOM backed by web-sys.
//!
//! Elements are registered on first sight and addressed by their slot in a
//! [`Registry`] afterwards. Identity is JS identity, so the same element seen
//! through two queries maps to one [`NodeRef`]. Removing an element frees its
//! slot; event targets are mapped to their nearest registered ancestor rather
//! than registered themselves.

use std::cell::RefCell;

use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlButtonElement, HtmlElement, HtmlFormElement, HtmlInputElement,
    HtmlTextAreaElement,
    ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition,
};

use super::registry::Registry;
use super::{Dom, NodeRef};
use crate::bindings::{
    AnchorBinding, FormBindings, NavBindings, PageBindings, SkillBindings, ThemeBindings,
};
use crate::config::Selectors;

pub struct WebDom {
    document: Document,
    nodes: RefCell<Registry<Element>>,
}

impl WebDom {
    #[must_use]
    pub fn new(document: Document) -> Self {
        Self { document, nodes: RefCell::new(Registry::new()) }
    }

    /// Handle for `element`, registering it if it has not been seen yet.
    pub fn adopt(&self, element: &Element) -> Option<NodeRef> {
        self.nodes.borrow_mut().insert(element.clone())
    }

    /// Handle for an already-registered element.
    #[must_use]
    pub fn lookup(&self, element: &Element) -> Option<NodeRef> {
        self.nodes.borrow().lookup(element)
    }

    /// Handle for `element` or its closest registered ancestor. Nothing is
    /// registered along the way.
    #[must_use]
    pub fn nearest_known(&self, element: &Element) -> Option<NodeRef> {
        let mut current = Some(element.clone());
        while let Some(candidate) = current {
            if let Some(node) = self.lookup(&candidate) {
                return Some(node);
            }
            current = candidate.parent_element();
        }
        None
    }

    #[must_use]
    pub fn element(&self, node: NodeRef) -> Option<Element> {
        self.nodes.borrow().get(node)
    }

    fn html(&self, node: NodeRef) -> Option<HtmlElement> {
        self.element(node)?.dyn_ref::<HtmlElement>().cloned()
    }

    // =========================================================
    // Queries
    // =========================================================

    /// First document match for `selector`. Invalid selectors log and match
    /// nothing.
    pub fn query(&self, selector: &str) -> Option<NodeRef> {
        match self.document.query_selector(selector) {
            Ok(found) => self.adopt(&found?),
            Err(err) => {
                log::warn!("invalid selector {selector:?}: {err:?}");
                None
            }
        }
    }

    pub fn query_all(&self, selector: &str) -> Vec<NodeRef> {
        match self.document.query_selector_all(selector) {
            Ok(list) => self.adopt_list(&list),
            Err(err) => {
                log::warn!("invalid selector {selector:?}: {err:?}");
                Vec::new()
            }
        }
    }

    /// Matches for `selector` among the descendants of `scope`.
    pub fn query_within(&self, scope: NodeRef, selector: &str) -> Vec<NodeRef> {
        let Some(scope) = self.element(scope) else {
            return Vec::new();
        };
        match scope.query_selector_all(selector) {
            Ok(list) => self.adopt_list(&list),
            Err(err) => {
                log::warn!("invalid selector {selector:?}: {err:?}");
                Vec::new()
            }
        }
    }

    fn adopt_list(&self, list: &web_sys::NodeList) -> Vec<NodeRef> {
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_ref::<Element>().and_then(|element| self.adopt(element)))
            .collect()
    }

    // =========================================================
    // Bindings
    // =========================================================

    /// Resolve every feature's markup. Features with missing parts come back
    /// as `None`.
    pub fn resolve_bindings(&self, selectors: &Selectors) -> PageBindings {
        PageBindings {
            theme: self.resolve_theme(selectors),
            nav: self.resolve_nav(selectors),
            skills: self.resolve_skills(selectors),
            form: self.resolve_form(selectors),
            project_cards: self.query_all(&selectors.project_cards),
            reveal: self.query_all(&selectors.reveal),
            anchors: self.resolve_anchors(selectors),
        }
    }

    fn resolve_theme(&self, selectors: &Selectors) -> Option<ThemeBindings> {
        let toggle = self.query(&selectors.theme_toggle)?;
        let icon = self.query_within(toggle, &selectors.theme_icon).into_iter().next()?;
        Some(ThemeBindings { toggle, icon })
    }

    fn resolve_nav(&self, selectors: &Selectors) -> Option<NavBindings> {
        let toggle = self.query(&selectors.menu_toggle)?;
        let links = self.query(&selectors.nav_links)?;
        Some(NavBindings {
            toggle,
            links,
            container: self.query(&selectors.navbar),
            items: self.query_within(links, &selectors.nav_items),
        })
    }

    fn resolve_skills(&self, selectors: &Selectors) -> Option<SkillBindings> {
        let section = self.query(&selectors.skills_section)?;
        Some(SkillBindings { section, bars: self.query_all(&selectors.skill_bars) })
    }

    fn resolve_form(&self, selectors: &Selectors) -> Option<FormBindings> {
        let form = self.query(&selectors.contact_form)?;
        let text_inputs = self.query_within(form, "input[type=\"text\"]");
        let first = |selector: &str| self.query_within(form, selector).into_iter().next();
        Some(FormBindings {
            form,
            name: *text_inputs.first()?,
            email: first("input[type=\"email\"]")?,
            subject: *text_inputs.get(1)?,
            message: first("textarea")?,
            submit: first("button[type=\"submit\"]")?,
            fields: self.query_within(form, "input, textarea"),
        })
    }

    fn resolve_anchors(&self, selectors: &Selectors) -> Vec<AnchorBinding> {
        self.query_all(&selectors.anchors)
            .into_iter()
            .map(|link| {
                let target = self
                    .attribute(link, "href")
                    .and_then(|href| {
                        let id = href.strip_prefix('#')?.to_owned();
                        (!id.is_empty()).then_some(id)
                    })
                    .and_then(|id| self.document.get_element_by_id(&id))
                    .and_then(|element| self.adopt(&element));
                AnchorBinding { link, target }
            })
            .collect()
    }
}

impl Dom for WebDom {
    fn document_element(&self) -> Option<NodeRef> {
        self.adopt(&self.document.document_element()?)
    }

    fn body(&self) -> Option<NodeRef> {
        let body: Element = self.document.body()?.into();
        self.adopt(&body)
    }

    fn attribute(&self, node: NodeRef, name: &str) -> Option<String> {
        self.element(node)?.get_attribute(name)
    }

    fn set_attribute(&mut self, node: NodeRef, name: &str, value: &str) {
        let Some(element) = self.element(node) else { return };
        if let Err(err) = element.set_attribute(name, value) {
            log::warn!("set_attribute {name} failed: {err:?}");
        }
    }

    fn style(&self, node: NodeRef, property: &str) -> Option<String> {
        match self.html(node)?.style().get_property_value(property) {
            Ok(value) if !value.is_empty() => Some(value),
            Ok(_) => None,
            Err(err) => {
                log::debug!("style read of {property} failed: {err:?}");
                None
            }
        }
    }

    fn set_style(&mut self, node: NodeRef, property: &str, value: &str) {
        let Some(element) = self.html(node) else { return };
        if let Err(err) = element.style().set_property(property, value) {
            log::warn!("style write {property}: {value} failed: {err:?}");
        }
    }

    fn set_class_name(&mut self, node: NodeRef, class_name: &str) {
        if let Some(element) = self.element(node) {
            element.set_class_name(class_name);
        }
    }

    fn has_class(&self, node: NodeRef, class: &str) -> bool {
        self.element(node).is_some_and(|element| element.class_list().contains(class))
    }

    fn add_class(&mut self, node: NodeRef, class: &str) {
        let Some(element) = self.element(node) else { return };
        if let Err(err) = element.class_list().add_1(class) {
            log::warn!("add class {class} failed: {err:?}");
        }
    }

    fn remove_class(&mut self, node: NodeRef, class: &str) {
        let Some(element) = self.element(node) else { return };
        if let Err(err) = element.class_list().remove_1(class) {
            log::warn!("remove class {class} failed: {err:?}");
        }
    }

    fn value(&self, node: NodeRef) -> String {
        let Some(element) = self.element(node) else {
            return String::new();
        };
        if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            input.value()
        } else if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
            area.value()
        } else {
            String::new()
        }
    }

    fn set_value(&mut self, node: NodeRef, value: &str) {
        let Some(element) = self.element(node) else { return };
        if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            input.set_value(value);
        } else if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
            area.set_value(value);
        }
    }

    fn text(&self, node: NodeRef) -> String {
        self.element(node)
            .and_then(|element| element.text_content())
            .unwrap_or_default()
    }

    fn set_text(&mut self, node: NodeRef, text: &str) {
        if let Some(element) = self.element(node) {
            element.set_text_content(Some(text));
        }
    }

    fn set_disabled(&mut self, node: NodeRef, disabled: bool) {
        let Some(element) = self.element(node) else { return };
        if let Some(button) = element.dyn_ref::<HtmlButtonElement>() {
            button.set_disabled(disabled);
        } else if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            input.set_disabled(disabled);
        }
    }

    fn contains(&self, ancestor: NodeRef, node: NodeRef) -> bool {
        match (self.element(ancestor), self.element(node)) {
            (Some(ancestor), Some(node)) => ancestor.contains(Some(&node)),
            _ => false,
        }
    }

    fn parent(&self, node: NodeRef) -> Option<NodeRef> {
        self.adopt(&self.element(node)?.parent_element()?)
    }

    fn create_element(&mut self, tag: &str) -> Option<NodeRef> {
        match self.document.create_element(tag) {
            Ok(element) => self.adopt(&element),
            Err(err) => {
                log::warn!("create_element {tag} failed: {err:?}");
                None
            }
        }
    }

    fn append_child(&mut self, parent: NodeRef, child: NodeRef) {
        let (Some(parent), Some(child)) = (self.element(parent), self.element(child)) else {
            return;
        };
        if let Err(err) = parent.append_child(&child) {
            log::warn!("append_child failed: {err:?}");
        }
    }

    fn remove(&mut self, node: NodeRef) {
        if let Some(element) = self.nodes.get_mut().release(node) {
            element.remove();
        }
    }

    fn reset_form(&mut self, form: NodeRef) {
        match self.element(form).and_then(|element| element.dyn_ref::<HtmlFormElement>().cloned()) {
            Some(form) => form.reset(),
            None => log::warn!("reset_form on {form:?}, which is not a form"),
        }
    }

    fn scroll_into_view(&mut self, node: NodeRef) {
        let Some(element) = self.element(node) else { return };
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        options.set_block(ScrollLogicalPosition::Start);
        element.scroll_into_view_with_scroll_into_view_options(&options);
    }
}
