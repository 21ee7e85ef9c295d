// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Ribbon tab layouts
//!
//! A [`TabSpec`] describes panels and buttons as plain data. [`build_tab`]
//! walks it and drives a [`RibbonHost`], the binding to an actual UI toolkit.
//! Child push buttons only exist inside a pull-down, so a stray child at panel
//! level cannot be expressed.

use crate::{Result, UiError};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::fmt;

fn default_active() -> bool {
    true
}

/// Fields shared by every button kind
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonCommon {
    /// Toolkit-internal name, unique within a tab
    pub internal_name: String,
    /// Visible label
    pub label: String,
    /// Hover text
    #[serde(default)]
    pub tooltip: String,
    /// Embedded image address; hosts show no icon if it cannot be resolved
    #[serde(default)]
    pub image: String,
    /// Inactive buttons are skipped when building
    #[serde(default = "default_active")]
    pub active: bool,
}

impl ButtonCommon {
    /// Create an active button description
    pub fn new(internal_name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            internal_name: internal_name.into(),
            label: label.into(),
            tooltip: String::new(),
            image: String::new(),
            active: true,
        }
    }
}

/// Push button invoking a command
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushSpec {
    #[serde(flatten)]
    pub common: ButtonCommon,
    /// Command handler name
    pub command: String,
}

impl PushSpec {
    /// Create a push button
    pub fn new(
        internal_name: impl Into<String>,
        label: impl Into<String>,
        command: impl Into<String>,
    ) -> Self {
        Self {
            common: ButtonCommon::new(internal_name, label),
            command: command.into(),
        }
    }

    /// Set the tooltip
    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.common.tooltip = tooltip.into();
        self
    }

    /// Set the image address
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.common.image = image.into();
        self
    }

    /// Set whether the button is built
    pub fn with_active(mut self, active: bool) -> Self {
        self.common.active = active;
        self
    }
}

/// Pull-down button holding child push buttons
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullDownSpec {
    #[serde(flatten)]
    pub common: ButtonCommon,
    /// Child push buttons, in display order
    #[serde(default)]
    pub children: Vec<PushSpec>,
}

impl PullDownSpec {
    /// Create an empty pull-down
    pub fn new(internal_name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            common: ButtonCommon::new(internal_name, label),
            children: Vec::new(),
        }
    }

    /// Append a child push button
    pub fn child(mut self, child: PushSpec) -> Self {
        self.children.push(child);
        self
    }

    /// Set the tooltip
    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.common.tooltip = tooltip.into();
        self
    }

    /// Set whether the pull-down and its children are built
    pub fn with_active(mut self, active: bool) -> Self {
        self.common.active = active;
        self
    }
}

/// Button placed directly on a panel
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ButtonSpec {
    Push(PushSpec),
    PullDown(PullDownSpec),
}

impl ButtonSpec {
    /// Shared fields
    pub fn common(&self) -> &ButtonCommon {
        match self {
            ButtonSpec::Push(b) => &b.common,
            ButtonSpec::PullDown(b) => &b.common,
        }
    }

    /// Kind of this button
    pub fn kind(&self) -> ButtonKind {
        match self {
            ButtonSpec::Push(_) => ButtonKind::Push,
            ButtonSpec::PullDown(_) => ButtonKind::PullDown,
        }
    }
}

impl From<PushSpec> for ButtonSpec {
    fn from(button: PushSpec) -> Self {
        ButtonSpec::Push(button)
    }
}

impl From<PullDownSpec> for ButtonSpec {
    fn from(button: PullDownSpec) -> Self {
        ButtonSpec::PullDown(button)
    }
}

/// Button kinds, including children of pull-downs
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ButtonKind {
    Push,
    PullDown,
    ChildPush,
}

impl ButtonKind {
    /// Get display name for logging
    pub fn name(&self) -> &'static str {
        match self {
            ButtonKind::Push => "push button",
            ButtonKind::PullDown => "pull-down button",
            ButtonKind::ChildPush => "child push button",
        }
    }
}

impl fmt::Display for ButtonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Ribbon panel
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelSpec {
    /// Visible panel name
    pub name: String,
    #[serde(default)]
    pub buttons: Vec<ButtonSpec>,
}

impl PanelSpec {
    /// Create an empty panel
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            buttons: Vec::new(),
        }
    }

    /// Append a button
    pub fn button(mut self, button: impl Into<ButtonSpec>) -> Self {
        self.buttons.push(button.into());
        self
    }
}

/// Ribbon tab
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabSpec {
    /// Visible tab name
    pub name: String,
    #[serde(default)]
    pub panels: Vec<PanelSpec>,
}

impl TabSpec {
    /// Create an empty tab
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            panels: Vec::new(),
        }
    }

    /// Append a panel
    pub fn panel(mut self, panel: PanelSpec) -> Self {
        self.panels.push(panel);
        self
    }

    /// Load a layout from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| UiError::layout(e.to_string()))
    }

    /// Every button of the tab with its kind, pull-down children after their parent
    pub fn buttons(&self) -> Vec<(ButtonKind, &ButtonCommon)> {
        let mut out = Vec::new();
        for button in self.panels.iter().flat_map(|p| &p.buttons) {
            out.push((button.kind(), button.common()));
            if let ButtonSpec::PullDown(pull_down) = button {
                out.extend(
                    pull_down
                        .children
                        .iter()
                        .map(|child| (ButtonKind::ChildPush, &child.common)),
                );
            }
        }
        out
    }

    /// Check that every internal name is present and unique within the tab
    pub fn validate(&self) -> Result<()> {
        let mut seen = FxHashSet::default();
        for (_, common) in self.buttons() {
            if common.internal_name.is_empty() {
                return Err(UiError::EmptyName {
                    label: common.label.clone(),
                });
            }
            if !seen.insert(common.internal_name.as_str()) {
                return Err(UiError::DuplicateName {
                    tab: self.name.clone(),
                    name: common.internal_name.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Binding to a ribbon toolkit
///
/// Handles returned by the host are passed back when adding buttons to them.
pub trait RibbonHost {
    /// Handle to a created panel
    type Panel;
    /// Handle to a created pull-down button
    type PullDown;

    /// Create a tab
    fn create_tab(&mut self, name: &str) -> Result<()>;

    /// Create a panel on a tab
    fn create_panel(&mut self, tab: &str, name: &str) -> Result<Self::Panel>;

    /// Add a push button to a panel
    fn add_push(&mut self, panel: &mut Self::Panel, button: &PushSpec) -> Result<()>;

    /// Add a pull-down button to a panel
    fn add_pull_down(
        &mut self,
        panel: &mut Self::Panel,
        button: &PullDownSpec,
    ) -> Result<Self::PullDown>;

    /// Add a push button to a pull-down
    fn add_child_push(&mut self, parent: &mut Self::PullDown, button: &PushSpec) -> Result<()>;
}

/// Build a tab on a host
///
/// The layout is validated before the host is touched. Inactive buttons are
/// skipped, and an inactive pull-down skips its children too.
///
/// Returns the number of buttons created.
pub fn build_tab<H: RibbonHost>(host: &mut H, tab: &TabSpec) -> Result<usize> {
    tab.validate()?;
    host.create_tab(&tab.name)?;

    let mut created = 0;
    for panel_spec in &tab.panels {
        let mut panel = host.create_panel(&tab.name, &panel_spec.name)?;
        for button in &panel_spec.buttons {
            if !button.common().active {
                log::debug!(
                    "Skipping inactive {} '{}'",
                    button.kind(),
                    button.common().internal_name
                );
                continue;
            }
            match button {
                ButtonSpec::Push(push) => {
                    host.add_push(&mut panel, push)?;
                    created += 1;
                }
                ButtonSpec::PullDown(pull_down) => {
                    let mut parent = host.add_pull_down(&mut panel, pull_down)?;
                    created += 1;
                    for child in pull_down.children.iter().filter(|c| c.common.active) {
                        host.add_child_push(&mut parent, child)?;
                        created += 1;
                    }
                }
            }
        }
    }

    log::debug!("Built ribbon tab '{}' with {} buttons", tab.name, created);
    Ok(created)
}
