//! Transient toast notifications.
//!
//! A toast is appended to `<body>` off-screen, slides in shortly after,
//! stays for a fixed time, slides out and is removed. Toasts are independent:
//! overlapping calls stack separate nodes with separate timers.

#[cfg(test)]
#[path = "notification_test.rs"]
mod notification_test;

use crate::config::{Timings, css_seconds};
use crate::controller::Task;
use crate::dom::{Dom, NodeRef};
use crate::scheduler::TimerQueue;

pub const OFFSCREEN_TRANSFORM: &str = "translateX(100%)";
pub const ONSCREEN_TRANSFORM: &str = "translateX(0)";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Severity {
    #[default]
    Info,
    Success,
}

impl Severity {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
        }
    }

    #[must_use]
    pub fn background(self) -> &'static str {
        match self {
            Self::Info => "#3498db",
            Self::Success => "#27ae60",
        }
    }
}

#[derive(Clone, Debug)]
pub struct NotificationPresenter {
    enter_delay_ms: u32,
    visible_ms: u32,
    exit_ms: u32,
}

impl NotificationPresenter {
    #[must_use]
    pub fn new(timings: &Timings) -> Self {
        Self {
            enter_delay_ms: timings.toast_enter_delay_ms,
            visible_ms: timings.toast_visible_ms,
            exit_ms: timings.toast_exit_ms,
        }
    }

    /// Create a toast and queue its lifecycle. `None` when the document has
    /// no body or the element could not be created.
    pub fn show(
        &self,
        dom: &mut impl Dom,
        timers: &mut TimerQueue<Task>,
        message: &str,
        severity: Severity,
    ) -> Option<NodeRef> {
        let Some(body) = dom.body() else {
            log::warn!("no document body; dropping notification {message:?}");
            return None;
        };
        let Some(toast) = dom.create_element("div") else {
            log::warn!("could not create notification element");
            return None;
        };

        dom.set_class_name(toast, &format!("notification {}", severity.as_str()));
        let transition = format!("transform {} ease", css_seconds(self.exit_ms));
        let styles = [
            ("position", "fixed"),
            ("top", "100px"),
            ("right", "20px"),
            ("padding", "15px 20px"),
            ("background", severity.background()),
            ("color", "white"),
            ("border-radius", "5px"),
            ("box-shadow", "0 5px 15px rgba(0,0,0,0.2)"),
            ("z-index", "10000"),
            ("transform", OFFSCREEN_TRANSFORM),
            ("transition", transition.as_str()),
            ("max-width", "300px"),
        ];
        for (property, value) in styles {
            dom.set_style(toast, property, value);
        }
        dom.set_text(toast, message);
        dom.append_child(body, toast);

        timers.schedule(self.enter_delay_ms, Task::SlideInToast(toast));
        timers.schedule(self.visible_ms, Task::SlideOutToast(toast));
        log::debug!("notification ({}) shown: {message}", severity.as_str());
        Some(toast)
    }

    pub fn slide_in(&self, dom: &mut impl Dom, toast: NodeRef) {
        dom.set_style(toast, "transform", ONSCREEN_TRANSFORM);
    }

    /// Start the exit transition and queue removal once it has run.
    pub fn slide_out(&self, dom: &mut impl Dom, timers: &mut TimerQueue<Task>, toast: NodeRef) {
        dom.set_style(toast, "transform", OFFSCREEN_TRANSFORM);
        timers.schedule(self.exit_ms, Task::RemoveToast(toast));
    }

    /// Remove the toast if something else has not already detached it.
    pub fn remove(&self, dom: &mut impl Dom, toast: NodeRef) {
        if dom.parent(toast).is_some() {
            dom.remove(toast);
        }
    }
}
