//! Wires the store and the view together and runs the terminal loop.

use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Frame, Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc;
use tokio::time::sleep;
use tracing::{debug, info, instrument, warn};

use crate::games::tictactoe::Position;
use crate::store::{Storage, Store, StoreError, SubscriptionId};
use crate::view::{Flow, View};

/// Terminal type used by the binary.
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

const FRAME: Duration = Duration::from_millis(30);

/// A user request raised by the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Claim a square for the current player.
    Move(Position),
    /// Clear the current game.
    Reset,
    /// Start a new round.
    NewRound,
}

/// Controller between a [`Store`] and a [`View`].
///
/// The view's handlers and the store's subscriber only push onto channels;
/// [`App::pump`] drains them, so neither side calls into the other while it
/// is borrowed.
#[derive(Debug)]
pub struct App<S: Storage> {
    store: Store<S>,
    view: View,
    intents: mpsc::UnboundedReceiver<Intent>,
    changes: mpsc::UnboundedReceiver<()>,
    subscription: SubscriptionId,
}

impl<S: Storage> App<S> {
    /// Binds the view's intents to the store and renders the initial state.
    #[instrument(skip_all, fields(storage_key = %store.storage_key()))]
    pub fn new(mut store: Store<S>, mut view: View) -> Self {
        let (intent_tx, intents) = mpsc::unbounded_channel();
        let (change_tx, changes) = mpsc::unbounded_channel();

        let tx = intent_tx.clone();
        view.bind_player_move_event(move |pos| {
            let _ = tx.send(Intent::Move(pos));
        });
        let tx = intent_tx.clone();
        view.bind_game_reset_event(move || {
            let _ = tx.send(Intent::Reset);
        });
        view.bind_new_round_event(move || {
            let _ = intent_tx.send(Intent::NewRound);
        });

        let subscription = store.subscribe(move || {
            let _ = change_tx.send(());
        });

        let mut app = Self {
            store,
            view,
            intents,
            changes,
            subscription,
        };
        app.render();
        info!("App ready");
        app
    }

    /// The store.
    pub fn store(&self) -> &Store<S> {
        &self.store
    }

    /// The view.
    pub fn view(&self) -> &View {
        &self.view
    }

    /// Subscription that keeps the view in step with the store.
    pub fn subscription(&self) -> SubscriptionId {
        self.subscription
    }

    /// Feeds a terminal event to the view, then applies any resulting intents.
    pub fn handle_event(&mut self, event: &Event) -> Flow {
        let flow = self.view.handle_event(event);
        self.pump();
        flow
    }

    /// Applies queued intents to the store and re-renders if it changed.
    ///
    /// Returns `true` when a re-render happened.
    pub fn pump(&mut self) -> bool {
        while let Ok(intent) = self.intents.try_recv() {
            self.dispatch(intent);
        }

        let mut changed = false;
        while self.changes.try_recv().is_ok() {
            changed = true;
        }
        if changed {
            self.render();
        }
        changed
    }

    /// Picks up a session written by another process.
    ///
    /// Returns `true` when the stored session changed and the view was
    /// re-rendered.
    pub fn sync_external(&mut self) -> bool {
        if !self.store.sync_from_storage() {
            return false;
        }
        info!("State change from another process");
        self.render();
        true
    }

    /// Paints the view into `frame`.
    pub fn draw(&mut self, frame: &mut Frame) {
        self.view.draw(frame);
    }

    /// Runs until the user quits, polling storage every `poll_interval`.
    #[instrument(skip_all, fields(poll_ms = poll_interval.as_millis() as u64))]
    pub async fn run(
        &mut self,
        terminal: &mut Tui,
        poll_interval: Duration,
    ) -> anyhow::Result<()> {
        info!("Starting game loop");
        let mut last_sync = Instant::now();

        loop {
            terminal.draw(|f| self.draw(f))?;

            while event::poll(Duration::ZERO)? {
                let event = event::read()?;
                if self.handle_event(&event) == Flow::Quit {
                    info!("User quit");
                    return Ok(());
                }
            }

            if last_sync.elapsed() >= poll_interval {
                self.sync_external();
                last_sync = Instant::now();
            }

            sleep(FRAME).await;
        }
    }

    fn dispatch(&mut self, intent: Intent) {
        let result = match intent {
            Intent::Move(pos) => self.store.player_move(pos),
            Intent::Reset => self.store.reset(),
            Intent::NewRound => self.store.new_round(),
        };
        match result {
            Ok(()) => debug!(?intent, "Intent applied"),
            Err(StoreError::InvalidMove(e)) => debug!(?intent, reason = %e, "Move ignored"),
            Err(StoreError::Storage(e)) => warn!(?intent, error = %e, "Failed to save session"),
        }
    }

    fn render(&mut self) {
        let stats = self.store.stats();
        self.view.render(self.store.game(), &stats);
    }
}

/// Switches the terminal to raw mode on the alternate screen with mouse
/// capture.
pub fn init_terminal() -> io::Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

/// Undoes [`init_terminal`].
pub fn restore_terminal(terminal: &mut Tui) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()
}
