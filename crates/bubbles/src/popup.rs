use std::time::Duration;

/// Height floor for a capped popup; below this the source text would be
/// unreadable, so capping never shrinks past it.
pub const MIN_POPUP_HEIGHT: f32 = 70.0;

/// Delay before the overlap check runs; group geometry is unreliable until
/// layout settles after an edit.
pub const OVERLAP_CHECK_DELAY: Duration = Duration::from_millis(100);

/// How a bubble is shown next to its translation group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowTrigger {
    /// Keep the bubble visible whenever the page is in edit mode.
    Always,
    /// Show on focus-in and hide on focus-out, for layouts where adjacent
    /// groups would otherwise produce overlapping bubbles.
    OnFocus,
}

/// Presentation policy for source bubbles. The decisions live here; the
/// event wiring (hover, focus, click) is the view layer's job.
#[derive(Debug, Clone, Copy)]
pub struct PopupPresenter {
    pub min_height: f32,
    pub overlap_delay: Duration,
}

impl Default for PopupPresenter {
    fn default() -> Self {
        Self {
            min_height: MIN_POPUP_HEIGHT,
            overlap_delay: OVERLAP_CHECK_DELAY,
        }
    }
}

impl PopupPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bubbles next to horizontally adjacent groups would cover each other,
    /// so those groups only show their bubble while focused.
    pub fn show_trigger(&self, overlap_risk: bool) -> ShowTrigger {
        if overlap_risk {
            ShowTrigger::OnFocus
        } else {
            ShowTrigger::Always
        }
    }

    /// Height capping only matters when several editable groups share the
    /// page; a lone group's bubble can take whatever room it needs.
    pub fn needs_height_cap(&self, editable_group_count: usize) -> bool {
        editable_group_count >= 2
    }

    /// Caps a popup that is taller than its anchor to the anchor's height,
    /// never going below the floor. `None` means the popup already fits.
    pub fn capped_height(&self, popup_height: f32, anchor_height: f32) -> Option<f32> {
        if popup_height > anchor_height {
            Some(anchor_height.max(self.min_height))
        } else {
            None
        }
    }

    /// A capped bubble whose anchor is not focused is passive: dimmed and
    /// clipped until the author focuses the text it belongs to.
    pub fn is_passive(&self, capped: bool, anchor_focused: bool) -> bool {
        capped && !anchor_focused
    }

    /// Clicking inside a bubble focuses the editable text it is attached
    /// to, except while the author is drag-selecting bubble text to copy.
    pub fn click_refocuses_anchor(&self, selecting_text: bool) -> bool {
        !selecting_text
    }
}
