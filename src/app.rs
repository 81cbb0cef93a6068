pub(crate) mod layer_manager;

use crate::config::Config;
use crate::{
    actions::{Action, ActionSender},
    tui::{Event, TuiEnum},
};
use color_eyre::eyre::Result;
use crossterm::event::KeyCode;
use layer_manager::{EventHandlingStatus, LayerManager};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tracing::{debug, error, info};

pub struct RootState {
    pub should_quit: bool,
    pub action_tx: UnboundedSender<Action>,
    pub action_rx: UnboundedReceiver<Action>,

    pub config: Config,
}

impl RootState {
    pub fn new(config: Config) -> Self {
        let (action_tx, action_rx) = unbounded_channel();
        Self {
            should_quit: false,
            action_tx,
            action_rx,
            config,
        }
    }

    fn sender(&self) -> ActionSender {
        self.action_tx.clone().into()
    }
}

pub struct App {
    layers: LayerManager,
    pub state: RootState,
    pub tui: TuiEnum,
}

impl App {
    pub fn new(state: RootState, tui: TuiEnum) -> Self {
        Self {
            layers: LayerManager::new(&state),
            state,
            tui,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        self.tui.enter()?;
        info!("Started with {} color scheme", self.state.config.config.color_scheme);

        loop {
            let event = self.tui.next().await?;
            self.step(event)?;

            if self.state.should_quit {
                break;
            }
        }

        self.tui.exit()?;
        Ok(())
    }

    /// Feed one event through the layers, then perform every action it caused
    fn step(&mut self, event: Event) -> Result<()> {
        self.handle_event(event);
        while let Ok(action) = self.state.action_rx.try_recv() {
            self.perform_action(action)?;
        }
        Ok(())
    }

    /// Timer and terminal events become actions; input goes to the top
    /// layer first, and `q` quits only when no layer wanted it.
    fn handle_event(&mut self, event: Event) {
        let tx = self.state.sender();
        match event {
            Event::Tick => tx.send(Action::Tick),
            Event::Render | Event::Resize(_, _) => tx.send(Action::Render),
            Event::Error => {
                error!("Error reading terminal events");
                tx.send(Action::Quit)
            }
            Event::Init | Event::FocusGained | Event::FocusLost => {}
            Event::Key(key) => {
                if self.layers.handle_event(&event) == EventHandlingStatus::ShouldPropagate
                    && key.code == KeyCode::Char('q')
                {
                    tx.send(Action::Quit)
                }
            }
            Event::Paste(_) => {
                if self.layers.handle_event(&event) == EventHandlingStatus::ShouldPropagate {
                    debug!("Paste ignored, no field is being edited");
                }
            }
        }
    }

    /// The only place where the layer stack and the quit flag change
    fn perform_action(&mut self, action: Action) -> Result<()> {
        match action {
            Action::Quit => {
                self.state.should_quit = true;
            }
            Action::Render => {
                let layers = &mut self.layers;
                self.tui.draw(|f| layers.render(f))?;
            }
            Action::Layer(action) => {
                self.layers.handle_layer_action(&action, &self.state);
            }
            action => self.layers.handle_action(action),
        }
        Ok(())
    }
}
