//! Page-behavior controller.
//!
//! SYSTEM CONTEXT
//! ==============
//! One `PageController` is built per page load, after the markup is available.
//! It owns the DOM surface, the preference store, the components and the
//! timer queue. Hosts translate raw events into the `on_*` handlers below and
//! drive deferred work either with real timers (`take_unarmed` + `fire`) or
//! with virtual time (`advance`).
//!
//! DESIGN
//! ======
//! Components are optional and independent. A feature whose markup is missing
//! is simply absent; its handlers become no-ops. Deferred work is data
//! (`Task`), so every delayed step runs through `run` and nothing captures
//! component state in a closure.

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

use crate::bindings::PageBindings;
use crate::components::card_hover::ProjectCardHover;
use crate::components::contact_form::{ContactForm, ContactValues, SubmitOutcome, success_message};
use crate::components::nav_menu::NavigationMenu;
use crate::components::notification::{NotificationPresenter, Severity};
use crate::components::scroll_reveal::ScrollRevealAnimator;
use crate::components::skill_bars::SkillBarAnimator;
use crate::components::theme::{Theme, ThemeManager};
use crate::config::PageConfig;
use crate::dom::{Dom, NodeRef};
use crate::scheduler::{TimerId, TimerQueue};
use crate::storage::PreferenceStore;

pub const LOADED_MESSAGE: &str = "Portfolio website loaded successfully!";

/// Deferred unit of page work.
#[derive(Clone, Debug, PartialEq)]
pub enum Task {
    /// Start a skill-bar animation pass.
    AnimateSkills,
    /// Transition one bar to its target width (percent).
    FillSkillBar { bar: NodeRef, width: f64 },
    /// End the simulated submission: toast, reset, restore the control label.
    CompleteSubmission { name: String, label: String },
    SlideInToast(NodeRef),
    SlideOutToast(NodeRef),
    RemoveToast(NodeRef),
}

pub struct PageController<D: Dom, S: PreferenceStore> {
    dom: D,
    store: S,
    config: PageConfig,
    timers: TimerQueue<Task>,
    theme: Option<ThemeManager>,
    nav: Option<NavigationMenu>,
    skills: Option<SkillBarAnimator>,
    form: Option<ContactForm>,
    cards: ProjectCardHover,
    reveal: ScrollRevealAnimator,
    notifier: NotificationPresenter,
    initialized: bool,
}

impl<D: Dom, S: PreferenceStore> PageController<D, S> {
    /// Assemble components from resolved bindings. Touches nothing until
    /// [`Self::init`].
    pub fn new(dom: D, store: S, bindings: PageBindings, config: PageConfig) -> Self {
        let PageBindings { theme, nav, skills, form, project_cards, reveal, anchors } = bindings;
        let timings = &config.timings;
        Self {
            theme: theme.map(|b| ThemeManager::new(b, config.default_theme)),
            nav: nav.map(NavigationMenu::new),
            skills: skills.map(|b| SkillBarAnimator::new(b, timings)),
            form: form.map(|b| ContactForm::new(b, timings.submission_delay_ms)),
            cards: ProjectCardHover::new(project_cards),
            reveal: ScrollRevealAnimator::new(reveal, anchors),
            notifier: NotificationPresenter::new(timings),
            timers: TimerQueue::new(),
            initialized: false,
            dom,
            store,
            config,
        }
    }

    /// Run every component's setup step once.
    pub fn init(&mut self) {
        if self.initialized {
            log::warn!("page controller already initialized");
            return;
        }
        self.initialized = true;

        match &self.theme {
            Some(theme) => {
                let applied = theme.setup(&mut self.dom, &self.store);
                log::debug!("theme initialized as {}", applied.as_str());
            }
            None => log::debug!("theme toggle markup missing; theme switching disabled"),
        }

        if self.nav.is_none() {
            log::debug!("menu markup missing; mobile navigation disabled");
        }

        match &self.skills {
            Some(skills) => {
                log::debug!("watching {} skill bars", skills.bindings().bars.len());
                self.timers.schedule(self.config.timings.skills_initial_delay_ms, Task::AnimateSkills);
            }
            None => log::debug!("skills section missing; skill bars disabled"),
        }

        if self.form.is_none() {
            log::debug!("contact form markup incomplete; form handling disabled");
        }

        log::debug!("{} project cards bound", self.cards.cards().len());

        self.reveal.setup(&mut self.dom);
        log::debug!(
            "{} scroll-reveal targets, {} anchor links bound",
            self.reveal.elements().len(),
            self.reveal.anchors().len()
        );
    }

    // =========================================================
    // Accessors
    // =========================================================

    pub fn dom(&self) -> &D {
        &self.dom
    }

    pub fn dom_mut(&mut self) -> &mut D {
        &mut self.dom
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    pub fn theme(&self) -> Option<&ThemeManager> {
        self.theme.as_ref()
    }

    pub fn nav(&self) -> Option<&NavigationMenu> {
        self.nav.as_ref()
    }

    pub fn skills(&self) -> Option<&SkillBarAnimator> {
        self.skills.as_ref()
    }

    pub fn form(&self) -> Option<&ContactForm> {
        self.form.as_ref()
    }

    pub fn cards(&self) -> &ProjectCardHover {
        &self.cards
    }

    pub fn reveal(&self) -> &ScrollRevealAnimator {
        &self.reveal
    }

    // =========================================================
    // Theme
    // =========================================================

    pub fn on_theme_toggle(&mut self) -> Option<Theme> {
        let theme = self.theme.as_ref()?;
        Some(theme.toggle(&mut self.dom, &mut self.store))
    }

    // =========================================================
    // Navigation
    // =========================================================

    /// Returns whether the menu is now open.
    pub fn on_menu_toggle(&mut self) -> bool {
        self.nav.as_ref().is_some_and(|nav| nav.toggle(&mut self.dom))
    }

    /// Any click anywhere in the document. Returns whether the menu closed.
    pub fn on_document_click(&mut self, target: Option<NodeRef>) -> bool {
        self.nav
            .as_ref()
            .is_some_and(|nav| nav.on_document_click(&mut self.dom, target))
    }

    pub fn close_menu(&mut self) {
        if let Some(nav) = &self.nav {
            nav.close(&mut self.dom);
        }
    }

    pub fn on_nav_link_click(&mut self) {
        self.close_menu();
    }

    // =========================================================
    // Skill bars
    // =========================================================

    /// Visibility change of the skills section. Returns whether the host
    /// should stop observing it.
    pub fn on_skills_intersection(&mut self, is_intersecting: bool) -> bool {
        match &mut self.skills {
            Some(skills) => skills.on_section_visible(&mut self.dom, &mut self.timers, is_intersecting),
            None => false,
        }
    }

    /// Start a skill-bar animation pass now. Returns the number of bars
    /// animated.
    pub fn animate_skills(&mut self) -> usize {
        match &self.skills {
            Some(skills) => skills.animate_all(&mut self.dom, &mut self.timers),
            None => 0,
        }
    }

    /// The window finished loading.
    pub fn on_page_load(&mut self) {
        log::info!("{LOADED_MESSAGE}");
        if self.skills.is_some() {
            self.timers.schedule(self.config.timings.skills_after_load_delay_ms, Task::AnimateSkills);
        }
    }

    // =========================================================
    // Contact form
    // =========================================================

    /// `None` when the page has no contact form.
    pub fn on_form_submit(&mut self) -> Option<SubmitOutcome> {
        let form = self.form.as_mut()?;
        Some(form.on_submit(&mut self.dom, &mut self.timers))
    }

    /// Validate `values`, showing inline errors. `false` without a form.
    pub fn validate_form(&mut self, values: &ContactValues) -> bool {
        self.form
            .as_mut()
            .is_some_and(|form| form.validate_form(&mut self.dom, values))
    }

    pub fn on_field_blur(&mut self, field: NodeRef) -> bool {
        self.form.as_mut().is_some_and(|form| form.on_blur(&mut self.dom, field))
    }

    pub fn on_field_input(&mut self, field: NodeRef) {
        if let Some(form) = &mut self.form {
            form.on_input(&mut self.dom, field);
        }
    }

    // =========================================================
    // Cards, reveal, anchors
    // =========================================================

    pub fn on_card_enter(&mut self, card: NodeRef) {
        self.cards.on_enter(&mut self.dom, card);
    }

    pub fn on_card_leave(&mut self, card: NodeRef) {
        self.cards.on_leave(&mut self.dom, card);
    }

    pub fn on_reveal_intersection(&mut self, node: NodeRef, is_intersecting: bool) -> bool {
        self.reveal.on_intersection(&mut self.dom, node, is_intersecting)
    }

    pub fn on_anchor_click(&mut self, link: NodeRef) -> bool {
        self.reveal.on_anchor_click(&mut self.dom, link)
    }

    // =========================================================
    // Notifications and errors
    // =========================================================

    pub fn notify(&mut self, message: &str, severity: Severity) -> Option<NodeRef> {
        self.notifier.show(&mut self.dom, &mut self.timers, message, severity)
    }

    /// An uncaught script error reached the window.
    pub fn on_script_error(&self, message: &str) {
        log::error!("JavaScript Error: {message}");
    }

    // =========================================================
    // Deferred work
    // =========================================================

    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.timers.now_ms()
    }

    #[must_use]
    pub fn pending_tasks(&self) -> usize {
        self.timers.len()
    }

    /// Fast-forward virtual time by `ms`, running everything that falls due,
    /// including work scheduled along the way.
    pub fn advance(&mut self, ms: u64) {
        let until = self.timers.now_ms() + ms;
        while let Some(task) = self.timers.pop_due(until) {
            self.run(task);
        }
        self.timers.advance_to(until);
    }

    /// Newly scheduled tasks for a host to arm real timers for.
    pub fn take_unarmed(&mut self) -> Vec<(TimerId, u32)> {
        self.timers.take_unarmed()
    }

    /// A host timer for `id` elapsed. Returns whether a task ran.
    pub fn fire(&mut self, id: TimerId) -> bool {
        match self.timers.fire(id) {
            Some(task) => {
                self.run(task);
                true
            }
            None => false,
        }
    }

    fn run(&mut self, task: Task) {
        match task {
            Task::AnimateSkills => {
                self.animate_skills();
            }
            Task::FillSkillBar { bar, width } => {
                if let Some(skills) = &self.skills {
                    skills.fill(&mut self.dom, bar, width);
                }
            }
            Task::CompleteSubmission { name, label } => {
                self.notifier
                    .show(&mut self.dom, &mut self.timers, &success_message(&name), Severity::Success);
                if let Some(form) = &mut self.form {
                    form.finish_submission(&mut self.dom, &label);
                }
                log::debug!("simulated submission from {name} completed");
            }
            Task::SlideInToast(toast) => self.notifier.slide_in(&mut self.dom, toast),
            Task::SlideOutToast(toast) => self.notifier.slide_out(&mut self.dom, &mut self.timers, toast),
            Task::RemoveToast(toast) => self.notifier.remove(&mut self.dom, toast),
        }
    }
}
