//! Resolved handles to the page markup each component binds to.
//!
//! Every feature's bindings are optional. A missing part means that feature is
//! not set up at all; the rest of the page is unaffected.

use crate::dom::NodeRef;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageBindings {
    pub theme: Option<ThemeBindings>,
    pub nav: Option<NavBindings>,
    pub skills: Option<SkillBindings>,
    pub form: Option<FormBindings>,
    pub project_cards: Vec<NodeRef>,
    pub reveal: Vec<NodeRef>,
    pub anchors: Vec<AnchorBinding>,
}

/// Theme toggle control and the icon inside it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThemeBindings {
    pub toggle: NodeRef,
    pub icon: NodeRef,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavBindings {
    pub toggle: NodeRef,
    pub links: NodeRef,
    /// Navigation container; clicks outside it close the menu. When absent,
    /// every document click counts as outside.
    pub container: Option<NodeRef>,
    pub items: Vec<NodeRef>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkillBindings {
    pub section: NodeRef,
    pub bars: Vec<NodeRef>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormBindings {
    pub form: NodeRef,
    pub name: NodeRef,
    pub email: NodeRef,
    pub subject: NodeRef,
    pub message: NodeRef,
    pub submit: NodeRef,
    /// Every input and textarea in the form, for live validation.
    pub fields: Vec<NodeRef>,
}

/// Same-page anchor link and the element its fragment names, if any.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnchorBinding {
    pub link: NodeRef,
    pub target: Option<NodeRef>,
}
