// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! BIM-Query UI - Plug-in surface helpers
//!
//! Toolkit-independent pieces of a model-query plug-in:
//!
//! - [`ribbon`]: tab/panel/button layouts built through a [`RibbonHost`]
//! - [`checklist`]: section trees of selectable items with cascading checks
//!
//! Nothing here renders; a toolkit binding implements [`RibbonHost`] and
//! displays a [`Checklist`].

pub mod checklist;
pub mod error;
pub mod ribbon;

pub use checklist::{Checklist, ChecklistItem, NodeId};
pub use error::{Result, UiError};
pub use ribbon::{
    build_tab, ButtonCommon, ButtonKind, ButtonSpec, PanelSpec, PullDownSpec, PushSpec,
    RibbonHost, TabSpec,
};
