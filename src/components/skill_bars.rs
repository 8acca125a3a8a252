//! Skill progress-bar animation.
//!
//! Each bar carries its target fill in a `data-width` attribute (percent).
//! An animation pass snaps every bar to `0%`, then fills bar `i` after
//! `i × stagger` with a CSS width transition.
//!
//! Passes are started by a timer after setup, by the skills section first
//! scrolling into view and by a timer after the window finishes loading.
//! Nothing prevents two passes from overlapping; the later pass simply
//! restarts the stagger and last write wins.

#[cfg(test)]
#[path = "skill_bars_test.rs"]
mod skill_bars_test;

use crate::bindings::SkillBindings;
use crate::config::{Timings, css_seconds};
use crate::controller::Task;
use crate::dom::{Dom, NodeRef};
use crate::scheduler::TimerQueue;

pub const WIDTH_ATTRIBUTE: &str = "data-width";

#[derive(Clone, Debug)]
pub struct SkillBarAnimator {
    bindings: SkillBindings,
    stagger_ms: u32,
    transition: String,
    watching: bool,
}

impl SkillBarAnimator {
    #[must_use]
    pub fn new(bindings: SkillBindings, timings: &Timings) -> Self {
        Self {
            bindings,
            stagger_ms: timings.skill_stagger_ms,
            transition: format!("width {} ease-in-out", css_seconds(timings.skill_fill_ms)),
            watching: true,
        }
    }

    #[must_use]
    pub fn bindings(&self) -> &SkillBindings {
        &self.bindings
    }

    /// Whether the section is still awaiting its first visibility trigger.
    #[must_use]
    pub fn is_watching(&self) -> bool {
        self.watching
    }

    /// Target percentage for `bar`, clamped to `0..=100`. `None` when the
    /// attribute is absent, blank or not a number.
    pub fn target_width(dom: &impl Dom, bar: NodeRef) -> Option<f64> {
        let raw = dom.attribute(bar, WIDTH_ATTRIBUTE)?;
        match raw.trim().parse::<f64>() {
            Ok(width) if width.is_finite() => Some(width.clamp(0.0, 100.0)),
            _ => None,
        }
    }

    /// Reset every bar and queue its staggered fill. Returns how many bars
    /// were animated.
    pub fn animate_all(&self, dom: &mut impl Dom, timers: &mut TimerQueue<Task>) -> usize {
        let mut animated = 0;
        for (index, &bar) in self.bindings.bars.iter().enumerate() {
            let Some(width) = Self::target_width(dom, bar) else {
                continue;
            };
            dom.set_style(bar, "width", "0%");
            let delay = u32::try_from(index)
                .unwrap_or(u32::MAX)
                .saturating_mul(self.stagger_ms);
            timers.schedule(delay, Task::FillSkillBar { bar, width });
            animated += 1;
        }
        log::debug!("animating {animated} skill bars");
        animated
    }

    /// Transition `bar` to its target width.
    pub fn fill(&self, dom: &mut impl Dom, bar: NodeRef, width: f64) {
        dom.set_style(bar, "transition", &self.transition);
        dom.set_style(bar, "width", &format!("{width}%"));
    }

    /// Visibility callback for the skills section. Animates on the first
    /// intersecting notification and stops watching. Returns whether the
    /// host observer should stop observing.
    pub fn on_section_visible(
        &mut self,
        dom: &mut impl Dom,
        timers: &mut TimerQueue<Task>,
        is_intersecting: bool,
    ) -> bool {
        if !self.watching || !is_intersecting {
            return false;
        }
        self.watching = false;
        self.animate_all(dom, timers);
        true
    }
}
