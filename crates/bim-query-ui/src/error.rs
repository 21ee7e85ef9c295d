// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for ribbon layouts and checklists

use thiserror::Error;

/// Result type alias for UI operations
pub type Result<T> = std::result::Result<T, UiError>;

/// Errors that can occur while building a ribbon or editing a checklist
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UiError {
    /// A button has no internal name
    #[error("Button with label '{label}' has an empty internal name")]
    EmptyName { label: String },

    /// Two buttons of one tab share an internal name
    #[error("Duplicate button name '{name}' in tab '{tab}'")]
    DuplicateName { tab: String, name: String },

    /// Checklist node id out of range
    #[error("Unknown checklist node {0}")]
    UnknownNode(usize),

    /// Failure reported by the ribbon toolkit
    #[error("Ribbon host error: {0}")]
    Host(String),

    /// Layout could not be parsed
    #[error("Layout error: {0}")]
    Layout(String),
}

impl UiError {
    /// Create a host error
    pub fn host(msg: impl Into<String>) -> Self {
        Self::Host(msg.into())
    }

    /// Create a layout error
    pub fn layout(msg: impl Into<String>) -> Self {
        Self::Layout(msg.into())
    }
}
