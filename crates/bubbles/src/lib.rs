//! Source-text bubble pipeline for the Lectern editing surface.
//!
//! For each translation group on a page the pipeline produces the tabbed
//! popup of source-language texts the author translates from: the builder
//! clones and filters the group's blocks, the orderer promotes the author's
//! preferred languages to the front of the tab list, the tab strip folds
//! overflow tabs into a dropdown, and the popup policy decides how the
//! bubble is shown next to its group. The whole pipeline is a pure function
//! of (group, settings, optional override tag); triggering it on edits or
//! clicks is the caller's concern.

pub mod builder;
pub mod order;
pub mod popup;
pub mod tabs;

pub use builder::{BubbleBuilder, SourceBubble};
pub use order::smart_order_tabs;
pub use popup::{PopupPresenter, ShowTrigger, MIN_POPUP_HEIGHT};
pub use tabs::{OverflowMenu, SourceTab, TabStrip, DEFAULT_TAB_THRESHOLD};
