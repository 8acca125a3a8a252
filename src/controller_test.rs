use super::*;
use crate::components::contact_form::{ERROR_CLASS, SENDING_LABEL};
use crate::components::nav_menu::ACTIVE_CLASS;
use crate::components::scroll_reveal::HIDDEN_TRANSFORM;
use crate::components::theme::{STORAGE_KEY, THEME_ATTRIBUTE};
use crate::dom::memory::MemoryDom;
use crate::page_fixture::{PageFixture, full_page};
use crate::storage::MemoryStore;

type TestController = PageController<MemoryDom, MemoryStore>;

fn controller_with(store: MemoryStore, bar_widths: &[&str]) -> (TestController, PageFixture) {
    let fixture = full_page(bar_widths);
    let mut controller =
        PageController::new(fixture.dom.clone(), store, fixture.bindings.clone(), PageConfig::default());
    controller.init();
    (controller, fixture)
}

fn controller(bar_widths: &[&str]) -> (TestController, PageFixture) {
    controller_with(MemoryStore::new(), bar_widths)
}

fn applied_theme(c: &TestController) -> Option<String> {
    let root = c.dom().document_element().unwrap();
    c.dom().attribute(root, THEME_ATTRIBUTE)
}

fn fill_form(c: &mut TestController, name: &str, email: &str, subject: &str, message: &str) {
    let bindings = c.form().unwrap().bindings().clone();
    let dom = c.dom_mut();
    dom.set_value(bindings.name, name);
    dom.set_value(bindings.email, email);
    dom.set_value(bindings.subject, subject);
    dom.set_value(bindings.message, message);
}

// =============================================================
// Theme
// =============================================================

#[test]
fn init_applies_dark_theme_by_default() {
    let (c, fixture) = controller(&[]);
    assert_eq!(applied_theme(&c).as_deref(), Some("dark"));
    assert!(c.dom().has_class(fixture.theme_icon, "fa-moon"));
    assert_eq!(c.store().get(STORAGE_KEY), None);
}

#[test]
fn init_applies_stored_light_theme() {
    let (c, fixture) = controller_with(MemoryStore::with(STORAGE_KEY, "light"), &[]);
    assert_eq!(applied_theme(&c).as_deref(), Some("light"));
    assert!(c.dom().has_class(fixture.theme_icon, "fa-sun"));
}

#[test]
fn theme_toggle_twice_round_trips() {
    let (mut c, _) = controller_with(MemoryStore::with(STORAGE_KEY, "dark"), &[]);

    assert_eq!(c.on_theme_toggle(), Some(Theme::Light));
    assert_eq!(c.store().get(STORAGE_KEY).as_deref(), Some("light"));
    assert_eq!(c.on_theme_toggle(), Some(Theme::Dark));

    assert_eq!(applied_theme(&c).as_deref(), Some("dark"));
    assert_eq!(c.store().get(STORAGE_KEY).as_deref(), Some("dark"));
}

// =============================================================
// Navigation
// =============================================================

#[test]
fn outside_click_closes_open_menu() {
    let (mut c, fixture) = controller(&[]);
    assert!(c.on_menu_toggle());

    assert!(c.on_document_click(Some(fixture.outside)));
    assert!(!c.nav().unwrap().is_open(c.dom()));
}

#[test]
fn outside_click_on_closed_menu_changes_nothing() {
    let (mut c, fixture) = controller(&[]);
    let before = c.dom().class_changes();
    assert!(!c.on_document_click(Some(fixture.outside)));
    assert_eq!(c.dom().class_changes(), before);
}

#[test]
fn nav_link_click_closes_menu_idempotently() {
    let (mut c, _) = controller(&[]);
    c.on_menu_toggle();
    c.on_nav_link_click();
    let links = c.nav().unwrap().bindings().links;
    assert!(!c.dom().has_class(links, ACTIVE_CLASS));

    let before = c.dom().class_changes();
    c.close_menu();
    assert_eq!(c.dom().class_changes(), before);
}

// =============================================================
// Skill bars
// =============================================================

#[test]
fn skill_bars_animate_after_initial_delay() {
    let (mut c, fixture) = controller(&["75", "50"]);
    let bars = fixture.bindings.skills.unwrap().bars;

    c.advance(499);
    assert_eq!(c.dom().style(bars[0], "width"), None);

    c.advance(1);
    assert_eq!(c.dom().style(bars[0], "width").as_deref(), Some("75%"));
    assert_eq!(c.dom().style(bars[1], "width").as_deref(), Some("0%"));

    c.advance(200);
    assert_eq!(c.dom().style(bars[1], "width").as_deref(), Some("50%"));
}

#[test]
fn skills_visibility_triggers_once() {
    let (mut c, _) = controller(&["75"]);
    let scheduled = c.pending_tasks();

    assert!(c.on_skills_intersection(true));
    assert_eq!(c.pending_tasks(), scheduled + 1);
    assert!(!c.on_skills_intersection(true));
    assert_eq!(c.pending_tasks(), scheduled + 1);
}

#[test]
fn page_load_reanimates_after_delay() {
    let (mut c, fixture) = controller(&["75"]);
    let bar = fixture.bindings.skills.unwrap().bars[0];
    c.advance(600);
    assert_eq!(c.dom().style(bar, "width").as_deref(), Some("75%"));

    c.on_page_load();
    assert_eq!(c.pending_tasks(), 1);
    c.advance(999);
    assert_eq!(c.pending_tasks(), 1);
    c.advance(1);
    assert_eq!(c.dom().style(bar, "width").as_deref(), Some("75%"));
    assert_eq!(c.pending_tasks(), 0);
}

#[test]
fn overlapping_triggers_are_not_deduplicated() {
    let (mut c, fixture) = controller(&["30", "60"]);
    let bars = fixture.bindings.skills.unwrap().bars;
    c.advance(500);
    c.advance(100);
    assert_eq!(c.animate_skills(), 2);
    // Second pass resets bar 0 even though the first pass already filled it.
    assert_eq!(c.dom().style(bars[0], "width").as_deref(), Some("0%"));
    c.advance(200);
    assert_eq!(c.dom().style(bars[0], "width").as_deref(), Some("30%"));
    assert_eq!(c.dom().style(bars[1], "width").as_deref(), Some("60%"));
}

// =============================================================
// Contact form
// =============================================================

#[test]
fn bad_email_shows_single_error_and_does_not_submit() {
    let (mut c, _) = controller(&[]);
    let scheduled = c.pending_tasks();
    fill_form(&mut c, "Ann", "bad-email", "Hi", "Hello");

    assert_eq!(c.on_form_submit(), Some(SubmitOutcome::Rejected));
    let captions = c.dom().find_by_class(ERROR_CLASS);
    assert_eq!(captions.len(), 1);
    let email = c.form().unwrap().bindings().email;
    assert_eq!(c.dom().parent(captions[0]), c.dom().parent(email));
    assert_eq!(c.pending_tasks(), scheduled);
    assert!(!c.form().unwrap().is_in_flight());
}

#[test]
fn valid_submission_completes_after_delay() {
    let (mut c, _) = controller(&[]);
    fill_form(&mut c, "Ann", "ann@example.com", "Hi", "Hello");
    let bindings = c.form().unwrap().bindings().clone();

    assert_eq!(c.on_form_submit(), Some(SubmitOutcome::Sending));
    assert!(c.dom().is_disabled(bindings.submit));
    assert_eq!(c.dom().text(bindings.submit), SENDING_LABEL);

    c.advance(1_999);
    assert!(c.dom().is_disabled(bindings.submit));
    assert!(c.dom().find_by_class("notification").is_empty());

    c.advance(1);
    let toasts = c.dom().find_by_class("notification");
    assert_eq!(toasts.len(), 1);
    assert!(c.dom().has_class(toasts[0], "success"));
    assert!(c.dom().text(toasts[0]).contains("Ann"));
    for field in [bindings.name, bindings.email, bindings.subject, bindings.message] {
        assert_eq!(c.dom().value(field), "");
    }
    assert!(!c.dom().is_disabled(bindings.submit));
    assert_eq!(c.dom().text(bindings.submit), "Send Message");

    c.advance(4_300);
    assert!(c.dom().find_by_class("notification").is_empty());
}

#[test]
fn validate_form_passes_for_complete_values() {
    let (mut c, _) = controller(&[]);
    let values = ContactValues {
        name: "Ann".into(),
        email: "ann@example.com".into(),
        subject: "Hi".into(),
        message: "Hello".into(),
    };
    assert!(c.validate_form(&values));
    assert!(c.dom().find_by_class(ERROR_CLASS).is_empty());
}

#[test]
fn blur_then_input_shows_and_clears_error() {
    let (mut c, _) = controller(&[]);
    let name = c.form().unwrap().bindings().name;

    assert!(!c.on_field_blur(name));
    assert_eq!(c.dom().find_by_class(ERROR_CLASS).len(), 1);

    c.on_field_input(name);
    assert!(c.dom().find_by_class(ERROR_CLASS).is_empty());
}

// =============================================================
// Cards, reveal, anchors, notifications
// =============================================================

#[test]
fn card_hover_applies_transforms() {
    let (mut c, fixture) = controller(&[]);
    let card = fixture.bindings.project_cards[0];
    c.on_card_enter(card);
    assert_eq!(c.dom().style(card, "transform").as_deref(), Some("translateY(-10px) scale(1.02)"));
    c.on_card_leave(card);
    assert_eq!(c.dom().style(card, "transform").as_deref(), Some("translateY(0) scale(1)"));
}

#[test]
fn reveal_targets_start_hidden_and_reveal_on_intersection() {
    let (mut c, fixture) = controller(&[]);
    for &node in &fixture.bindings.reveal {
        assert_eq!(c.dom().style(node, "transform").as_deref(), Some(HIDDEN_TRANSFORM));
    }
    let target = fixture.bindings.reveal[0];
    assert!(c.on_reveal_intersection(target, true));
    assert!(ScrollRevealAnimator::is_revealed(c.dom(), target));
}

#[test]
fn anchor_click_smooth_scrolls_to_section() {
    let (mut c, fixture) = controller(&[]);
    let anchor = fixture.bindings.anchors[0];
    assert!(c.on_anchor_click(anchor.link));
    assert_eq!(c.dom().scrolled(), &[anchor.target.unwrap()]);
}

#[test]
fn notify_defaults_to_info_styling() {
    let (mut c, _) = controller(&[]);
    let toast = c.notify("Heads up", Severity::default()).unwrap();
    assert!(c.dom().has_class(toast, "info"));
    assert_eq!(c.dom().style(toast, "background").as_deref(), Some("#3498db"));
}

// =============================================================
// Missing markup and host timers
// =============================================================

#[test]
fn missing_markup_disables_features_quietly() {
    let mut c = PageController::new(MemoryDom::new(), MemoryStore::new(), PageBindings::default(), PageConfig::default());
    c.init();

    assert_eq!(c.on_theme_toggle(), None);
    assert!(!c.on_menu_toggle());
    assert!(!c.on_document_click(None));
    assert!(!c.on_skills_intersection(true));
    assert_eq!(c.animate_skills(), 0);
    assert_eq!(c.on_form_submit(), None);
    c.on_page_load();
    assert_eq!(c.pending_tasks(), 0);
    assert_eq!(c.store().get(STORAGE_KEY), None);
}

#[test]
fn init_runs_once() {
    let (mut c, _) = controller(&["75"]);
    let scheduled = c.pending_tasks();
    c.init();
    assert_eq!(c.pending_tasks(), scheduled);
}

#[test]
fn host_timers_fire_scheduled_tasks_by_id() {
    let (mut c, fixture) = controller(&["75"]);
    let bar = fixture.bindings.skills.unwrap().bars[0];

    let armed = c.take_unarmed();
    assert_eq!(armed.len(), 1);
    let (id, delay) = armed[0];
    assert_eq!(delay, 500);

    assert!(c.fire(id));
    assert!(!c.fire(id));
    assert_eq!(c.dom().style(bar, "width").as_deref(), Some("0%"));

    let follow_up = c.take_unarmed();
    assert_eq!(follow_up.len(), 1);
    assert!(c.fire(follow_up[0].0));
    assert_eq!(c.dom().style(bar, "width").as_deref(), Some("75%"));
}

#[test]
fn custom_timings_flow_through() {
    let fixture = full_page(&[]);
    let mut config = PageConfig::default();
    config.timings.submission_delay_ms = 10;
    let mut c = PageController::new(fixture.dom, MemoryStore::new(), fixture.bindings, config);
    c.init();
    fill_form(&mut c, "Ann", "ann@example.com", "Hi", "Hello");
    c.on_form_submit();

    c.advance(10);
    assert_eq!(c.dom().find_by_class("notification").len(), 1);
}
