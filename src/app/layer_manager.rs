use std::ops::{Deref, DerefMut};

use crate::{
    actions::{Action, LayerManageAction, Layers},
    page::{EventLoopParticipant, Layer, WidgetExt, help_popup::HelpPopup, showcase::Showcase},
    tui::Event,
};
use ratatui::Frame;
use tracing::{info, warn};

use super::RootState;

/// Result of offering an event to a layer or component
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventHandlingStatus {
    Consumed,
    ShouldPropagate,
}

pub(super) struct BoxedLayer(Box<dyn Layer>);
impl Deref for BoxedLayer {
    type Target = dyn Layer;

    fn deref(&self) -> &Self::Target {
        &*self.0
    }
}
impl DerefMut for BoxedLayer {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.0
    }
}
impl From<Box<dyn Layer>> for BoxedLayer {
    fn from(layer: Box<dyn Layer>) -> Self {
        Self(layer)
    }
}
impl BoxedLayer {
    fn into_layer_config(self, render: bool) -> LayerConfig {
        LayerConfig {
            layer: self,
            render,
        }
    }
}

pub(super) struct LayerConfig {
    layer: BoxedLayer,
    render: bool,
}

impl Deref for LayerConfig {
    type Target = BoxedLayer;

    fn deref(&self) -> &Self::Target {
        &self.layer
    }
}
impl DerefMut for LayerConfig {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.layer
    }
}

/// Stack of layers. Never empty: popping the last one brings back the showcase.
pub(super) struct LayerManager {
    layers: Vec<LayerConfig>,
}

impl Deref for LayerManager {
    type Target = Vec<LayerConfig>;

    fn deref(&self) -> &Self::Target {
        &self.layers
    }
}

impl LayerManager {
    pub(super) fn new(state: &RootState) -> Self {
        let layer = LayerManager::showcase(state);
        Self {
            layers: vec![layer.into_layer_config(true)],
        }
    }

    pub(super) fn render(&mut self, f: &mut Frame) {
        let area = f.area();
        self.layers
            .iter_mut()
            .filter(|layer| layer.render)
            .for_each(|layer| layer.render(f, area));
    }

    /// Only the top layer sees events
    pub(super) fn handle_event(&mut self, event: &Event) -> EventHandlingStatus {
        match self.layers.last_mut() {
            Some(layer) => layer.handle_events(event),
            None => EventHandlingStatus::ShouldPropagate,
        }
    }

    pub(super) fn handle_layer_action(&mut self, action: &LayerManageAction, state: &RootState) {
        match action {
            LayerManageAction::Push(target) => {
                let Some(layer) = LayerManager::get_layer(&target.layer, state) else {
                    return;
                };
                if let Some(top) = self.layers.last_mut() {
                    top.render = target.render_self;
                }
                self.layers.push(layer.into_layer_config(true));
                info!(
                    "Pushing a {} layer, current layer will {} render, new layer stack length {}",
                    target.layer,
                    if target.render_self { "still" } else { "not" },
                    self.layers.len()
                );
            }
            LayerManageAction::Pop => {
                self.layers.pop();
                match self.layers.last_mut() {
                    Some(top) => top.render = true,
                    None => self.layers.extend(
                        LayerManager::get_layer(&Layers::Showcase, state)
                            .map(|layer| layer.into_layer_config(true)),
                    ),
                }
                info!(
                    "Popping layer, current layer stack length {}",
                    self.layers.len()
                );
            }
        }
    }

    /// Tick reaches every layer so animations keep running below popups,
    /// other actions only the top one.
    pub(super) fn handle_action(&mut self, action: Action) {
        match action {
            Action::Tick => self
                .layers
                .iter_mut()
                .for_each(|layer| layer.update(Action::Tick)),
            action => {
                if let Some(layer) = self.layers.last_mut() {
                    layer.update(action);
                }
            }
        }
    }

    fn showcase(state: &RootState) -> BoxedLayer {
        let mut layer = Box::new(Showcase::new(
            state.action_tx.clone().into(),
            state.config.config.color_scheme,
        )) as Box<dyn Layer>;
        layer.init();
        layer.into()
    }

    /// Build a new layer of the given type
    fn get_layer(layer: &Layers, state: &RootState) -> Option<BoxedLayer> {
        match layer {
            Layers::Showcase => Some(LayerManager::showcase(state)),
            Layers::Help(help_msg) => {
                match HelpPopup::new(state.action_tx.clone().into(), help_msg.clone()) {
                    Some(help) => {
                        let mut page = Box::new(help) as Box<dyn Layer>;
                        page.init();
                        Some(page.into())
                    }
                    None => {
                        warn!("Help message is empty");
                        None
                    }
                }
            }
        }
    }
}
