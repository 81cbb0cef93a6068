//! Full-screen layers of the application.
//!
//! A layer is either a page (the showcase) or a popup drawn above it (help).
//! The [`crate::app::layer_manager::LayerManager`] keeps them in a stack,
//! renders every visible one and routes events and actions to the top one.

use crate::actions::Action;
use crate::app::layer_manager::EventHandlingStatus;
use crate::tui::Event;
use downcast_rs::{DowncastSync, impl_downcast};
use ratatui::Frame;
use ratatui::layout::Rect;

pub(crate) mod help_popup;
pub(crate) mod showcase;

/// A UI layer in the application.
///
/// # Type Requirements
/// - Must implement [`WidgetExt`]
/// - Must implement [`EventLoopParticipant`]
/// - Must implement [`DowncastSync`]
pub trait Layer: WidgetExt + EventLoopParticipant + DowncastSync {
    /// Initialize the page
    fn init(&mut self) {}
}
impl_downcast!(sync Layer);

/// Something that can draw itself into an area of the frame.
pub(crate) trait WidgetExt {
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// Participates in the event loop: reacts to terminal events and to actions.
///
/// # Test Features
/// With the test configuration, `event_loop_once` runs one event through
/// `handle_events` and then drains every action it produced through `update`.
pub(crate) trait EventLoopParticipant {
    /// Handle events
    #[must_use]
    fn handle_events(&mut self, event: &Event) -> EventHandlingStatus;

    fn update(&mut self, action: Action);

    #[cfg(test)]
    fn event_loop_once(
        &mut self,
        rx: &mut tokio::sync::mpsc::UnboundedReceiver<Action>,
        event: Event,
    ) {
        let _ = self.handle_events(&event);
        while let Ok(action) = rx.try_recv() {
            self.update(action);
        }
    }

    #[cfg(test)]
    /// Handle the event and check the returned status as [`EventHandlingStatus::Consumed`].
    fn handle_event_with_status_check(&mut self, event: &Event) {
        let status = self.handle_events(event);
        assert!(matches!(status, EventHandlingStatus::Consumed));
    }
}
