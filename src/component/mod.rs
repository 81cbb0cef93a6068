pub(crate) mod field_style;
pub(crate) mod icon;
pub(crate) mod text_field;
pub(crate) mod validation;

use crate::page::{EventLoopParticipant, WidgetExt};

/// A widget embedded in a page, sharing the page's event loop
pub(crate) trait Component: WidgetExt + EventLoopParticipant {
    fn get_id(&self) -> u64;

    /// Rows the component needs at its current state
    fn height(&self) -> u16;
}
