//! # portfolio
//!
//! Client-side behavior layer for a single-page portfolio site, compiled to
//! WASM. The page markup is static; this crate binds to it once the document
//! is ready and drives theme switching, the mobile menu, skill-bar and
//! scroll-reveal animations, the contact form, project-card hover effects and
//! toast notifications.
//!
//! SYSTEM CONTEXT
//! ==============
//! All behavior lives in [`controller::PageController`], which talks to the
//! page only through the [`dom::Dom`] trait and to storage only through
//! [`storage::PreferenceStore`]. Deferred work is queued on a virtual-time
//! [`scheduler::TimerQueue`]. Browser glue (web-sys DOM, localStorage, real
//! timers, event listeners) is compiled only with the `hydrate` feature, so the
//! rest of the crate builds and tests natively.

pub mod bindings;
pub mod components;
pub mod config;
pub mod controller;
pub mod dom;
pub mod scheduler;
pub mod storage;

#[cfg(feature = "hydrate")]
pub mod hydrate;

#[cfg(test)]
#[path = "page_fixture_test.rs"]
pub(crate) mod page_fixture;
