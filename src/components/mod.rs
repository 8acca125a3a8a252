//! Page behavior components.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each component owns the bindings for one slice of the page and exposes the
//! handlers the controller routes events to. Components never talk to each
//! other directly; the controller sequences anything that spans two of them
//! (a finished form submission raising a toast).

pub mod card_hover;
pub mod contact_form;
pub mod nav_menu;
pub mod notification;
pub mod scroll_reveal;
pub mod skill_bars;
pub mod theme;
