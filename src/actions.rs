use color_eyre::eyre::Context;
use strum::Display;
use tracing::error;

use crate::{page::showcase::ShowcaseAction, utils::help_msg::HelpMsg};

#[derive(Clone, Debug)]
pub enum Action {
    Tick,
    Render,
    Quit,

    Layer(LayerManageAction),

    Showcase(ShowcaseAction),
    HelpPopup(crate::page::help_popup::HelpPopupAction),
}

/// Layers that can be put on the layer stack
#[derive(Clone, Debug, Display)]
pub enum Layers {
    Showcase,
    #[strum(to_string = "Help")]
    Help(HelpMsg),
}

#[derive(Clone, Debug)]
pub struct LayerPushTarget {
    pub layer: Layers,
    /// Whether the layer below keeps rendering
    pub render_self: bool,
}

#[derive(Clone, Debug)]
pub enum LayerManageAction {
    Push(LayerPushTarget),
    Pop,
}

impl From<LayerManageAction> for Action {
    fn from(value: LayerManageAction) -> Self {
        Action::Layer(value)
    }
}

#[derive(Clone, Debug)]
pub struct ActionSender(pub tokio::sync::mpsc::UnboundedSender<Action>);

impl ActionSender {
    pub fn send<T: Into<Action>>(&self, action: T) {
        if let Err(err) = self.0.send(action.into()).context(
            "Action Receiver is dropped or closed, which should not happen if app is still running.",
        ) {
            error!("{err:?}");
        }
    }
}
impl From<tokio::sync::mpsc::UnboundedSender<Action>> for ActionSender {
    fn from(value: tokio::sync::mpsc::UnboundedSender<Action>) -> Self {
        ActionSender(value)
    }
}
