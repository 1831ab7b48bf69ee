//! The game view: paints state snapshots and turns input into intents.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
};
use derive_getters::Getters;
use ratatui::Frame;
use ratatui::layout::Rect;
use tracing::{debug, instrument, trace};

use super::document::{Document, Element, ElementId, Icon, ViewError};
use super::input::{is_cursor_key, move_cursor};
use super::ui;
use crate::games::tictactoe::{Game, Move, Player, Position, Stats};

/// What the event loop should do after an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep running.
    Continue,
    /// The user asked to quit.
    Quit,
}

/// Actions listed in the drop-down menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    /// Clear the current game.
    Reset,
    /// Start a new round.
    NewRound,
}

impl MenuItem {
    /// Menu order.
    pub const ALL: [MenuItem; 2] = [MenuItem::Reset, MenuItem::NewRound];

    fn next(self) -> Self {
        match self {
            MenuItem::Reset => MenuItem::NewRound,
            MenuItem::NewRound => MenuItem::NewRound,
        }
    }

    fn previous(self) -> Self {
        match self {
            MenuItem::Reset => MenuItem::Reset,
            MenuItem::NewRound => MenuItem::Reset,
        }
    }
}

/// A board cell element and the square it shows.
#[derive(Debug, Clone, Getters)]
pub struct SquareElement {
    /// Square shown by this cell.
    position: Position,
    /// The cell element.
    element: Element,
}

/// Elements resolved from the document at construction.
#[derive(Debug, Clone, Getters)]
pub struct Elements {
    /// Menu container.
    menu: Element,
    /// Drop-down list; hidden while the menu is closed.
    menu_items: Element,
    /// Menu toggle button with its chevron.
    menu_btn: Element,
    /// Reset action.
    reset_btn: Element,
    /// New round action.
    new_round_btn: Element,
    /// The nine board cells in square order.
    squares: Vec<SquareElement>,
    /// Game-over dialog.
    modal: Element,
    /// Dialog message.
    modal_text: Element,
    /// Dialog button.
    modal_btn: Element,
    /// Turn indicator.
    turn: Element,
    /// Player 1 win counter.
    p1_wins: Element,
    /// Player 2 win counter.
    p2_wins: Element,
    /// Tie counter.
    ties: Element,
}

/// Screen regions from the last draw, used to resolve mouse clicks.
#[derive(Debug, Clone, Default)]
pub struct HitMap {
    /// Board cells.
    pub cells: Vec<(Position, Rect)>,
    /// Menu toggle button.
    pub menu_btn: Option<Rect>,
    /// Menu entries, when the menu is open.
    pub menu_items: Vec<(MenuItem, Rect)>,
    /// Dialog button, when the dialog is open.
    pub modal_btn: Option<Rect>,
}

fn hit(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x
        && column < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}

type Handler = Box<dyn FnMut()>;
type MoveHandler = Box<dyn FnMut(Position)>;

/// Terminal view of the game.
///
/// `render` rebuilds the element state from a game and its stats; `draw`
/// paints the elements. Input is translated into three intents (move,
/// reset, new round) delivered to the bound handlers. The menu, cursor and
/// menu selection are view-local and never reach the store.
pub struct View {
    elements: Elements,
    cursor: Position,
    menu_selection: MenuItem,
    hit_map: HitMap,
    reset_handlers: Vec<Handler>,
    new_round_handlers: Vec<Handler>,
    move_handlers: Vec<MoveHandler>,
}

impl View {
    /// Binds the view to `document`.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::MissingElement`] for the first required element
    /// the document lacks. The view cannot run without it.
    #[instrument(skip(document))]
    pub fn new(mut document: Document) -> Result<Self, ViewError> {
        let menu = document.take(ElementId::Menu)?;
        let menu_items = document.take(ElementId::MenuItems)?;
        let menu_btn = document.take(ElementId::MenuBtn)?;
        let reset_btn = document.take(ElementId::ResetBtn)?;
        let new_round_btn = document.take(ElementId::NewRoundBtn)?;

        let mut squares = Vec::with_capacity(Position::ALL.len());
        for position in Position::ALL {
            let element = document.take(ElementId::Square(position))?;
            squares.push(SquareElement { position, element });
        }

        let elements = Elements {
            menu,
            menu_items,
            menu_btn,
            reset_btn,
            new_round_btn,
            squares,
            modal: document.take(ElementId::Modal)?,
            modal_text: document.take(ElementId::ModalText)?,
            modal_btn: document.take(ElementId::ModalBtn)?,
            turn: document.take(ElementId::Turn)?,
            p1_wins: document.take(ElementId::P1Wins)?,
            p2_wins: document.take(ElementId::P2Wins)?,
            ties: document.take(ElementId::Ties)?,
        };
        debug!("View bound to document");

        Ok(Self {
            elements,
            cursor: Position::Center,
            menu_selection: MenuItem::Reset,
            hit_map: HitMap::default(),
            reset_handlers: Vec::new(),
            new_round_handlers: Vec::new(),
            move_handlers: Vec::new(),
        })
    }

    /// Rebuilds every element from `game` and `stats`.
    ///
    /// Closes the dialog and menu, clears the board, repaints the scoreboard
    /// and the claimed cells, then opens the dialog if the game is over or
    /// shows whose turn it is.
    #[instrument(skip_all, fields(moves = game.moves().len()))]
    pub fn render(&mut self, game: &Game, stats: &Stats) {
        let status = game.status();

        self.close_all();
        self.clear_moves();
        self.update_scoreboard(stats);
        self.initialize_moves(game.moves());

        if status.is_complete() {
            let message = match status.winner() {
                Some(winner) => format!("{} wins!", winner.name()),
                None => "Tie".to_string(),
            };
            self.open_modal(message);
            return;
        }

        self.set_turn_indicator(game.current_player());
    }

    /// Registers a reset handler.
    pub fn bind_game_reset_event(&mut self, handler: impl FnMut() + 'static) {
        self.reset_handlers.push(Box::new(handler));
    }

    /// Registers a new round handler. The dialog's button also fires it, so
    /// a finished game is kept for the scoreboard.
    pub fn bind_new_round_event(&mut self, handler: impl FnMut() + 'static) {
        self.new_round_handlers.push(Box::new(handler));
    }

    /// Registers a move handler; it receives the chosen cell.
    pub fn bind_player_move_event(&mut self, handler: impl FnMut(Position) + 'static) {
        self.move_handlers.push(Box::new(handler));
    }

    /// Paints the elements and records their regions for mouse input.
    pub fn draw(&mut self, frame: &mut Frame) {
        self.hit_map = ui::draw(frame, self);
    }

    /// Translates a terminal event into view changes or intents.
    #[instrument(skip(self))]
    pub fn handle_event(&mut self, event: &Event) -> Flow {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => self.handle_key(*key),
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                self.handle_click(mouse.column, mouse.row);
                Flow::Continue
            }
            _ => Flow::Continue,
        }
    }

    /// Bound elements.
    pub fn elements(&self) -> &Elements {
        &self.elements
    }

    /// Cell under the keyboard cursor.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Highlighted menu entry.
    pub fn menu_selection(&self) -> MenuItem {
        self.menu_selection
    }

    /// True while the drop-down menu is shown.
    pub fn is_menu_open(&self) -> bool {
        !*self.elements.menu_items.hidden()
    }

    /// True while the game-over dialog is shown.
    pub fn is_modal_open(&self) -> bool {
        !*self.elements.modal.hidden()
    }

    /// Regions from the last draw.
    pub fn hit_map(&self) -> &HitMap {
        &self.hit_map
    }

    fn handle_key(&mut self, key: KeyEvent) -> Flow {
        trace!(code = ?key.code, "Key pressed");
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Flow::Quit;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => return Flow::Quit,
            KeyCode::Char('r') | KeyCode::Char('R') => self.emit_reset(),
            KeyCode::Char('n') | KeyCode::Char('N') => self.emit_new_round(),
            KeyCode::Char('m') | KeyCode::Char('M') => self.toggle_menu(),
            KeyCode::Esc if self.is_menu_open() => self.close_menu(),
            _ if self.is_menu_open() => self.handle_menu_key(key.code),
            KeyCode::Enter | KeyCode::Char(' ') if self.is_modal_open() => self.emit_new_round(),
            _ if self.is_modal_open() => {}
            KeyCode::Enter | KeyCode::Char(' ') => self.emit_move(self.cursor),
            KeyCode::Char(c) if c.is_ascii_digit() => {
                if let Some(pos) = Position::from_digit(c) {
                    self.cursor = pos;
                    self.emit_move(pos);
                }
            }
            code if is_cursor_key(code) => self.cursor = move_cursor(self.cursor, code),
            _ => {}
        }
        Flow::Continue
    }

    fn handle_menu_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Up | KeyCode::Char('k') => self.menu_selection = self.menu_selection.previous(),
            KeyCode::Down | KeyCode::Char('j') => self.menu_selection = self.menu_selection.next(),
            KeyCode::Enter | KeyCode::Char(' ') => self.activate(self.menu_selection),
            _ => {}
        }
    }

    fn handle_click(&mut self, column: u16, row: u16) {
        let map = self.hit_map.clone();

        if self.is_modal_open() {
            if map.modal_btn.is_some_and(|area| hit(area, column, row)) {
                self.emit_new_round();
            }
            return;
        }

        if self.is_menu_open() {
            if let Some((item, _)) = map.menu_items.iter().find(|(_, area)| hit(*area, column, row)) {
                self.activate(*item);
                return;
            }
        }

        if map.menu_btn.is_some_and(|area| hit(area, column, row)) {
            self.toggle_menu();
            return;
        }

        if self.is_menu_open() {
            self.close_menu();
            return;
        }

        if let Some((pos, _)) = map.cells.iter().find(|(_, area)| hit(*area, column, row)) {
            self.cursor = *pos;
            self.emit_move(*pos);
        }
    }

    fn activate(&mut self, item: MenuItem) {
        self.menu_selection = item;
        match item {
            MenuItem::Reset => self.emit_reset(),
            MenuItem::NewRound => self.emit_new_round(),
        }
    }

    fn emit_reset(&mut self) {
        debug!("Reset requested");
        for handler in &mut self.reset_handlers {
            handler();
        }
    }

    fn emit_new_round(&mut self) {
        debug!("New round requested");
        for handler in &mut self.new_round_handlers {
            handler();
        }
    }

    fn emit_move(&mut self, pos: Position) {
        debug!(square = pos.square_id(), "Move requested");
        for handler in &mut self.move_handlers {
            handler(pos);
        }
    }

    // ─────────────────────────────────────────────────────────────
    //  Element helpers
    // ─────────────────────────────────────────────────────────────

    fn update_scoreboard(&mut self, stats: &Stats) {
        let [p1, p2] = stats.player_with_stats();
        for (element, entry) in [
            (&mut self.elements.p1_wins, p1),
            (&mut self.elements.p2_wins, p2),
        ] {
            element.set_label(entry.player().name().as_str());
            element.set_text(format!("{} wins", entry.wins()));
            element.set_color_class(Some(entry.player().color_class().clone()));
        }
        self.elements.ties.set_text(format!("{} ties", stats.ties()));
    }

    fn open_modal(&mut self, message: String) {
        self.elements.modal.set_hidden(false);
        self.elements.modal_text.set_text(message);
    }

    fn close_modal(&mut self) {
        self.elements.modal.set_hidden(true);
    }

    fn close_all(&mut self) {
        self.close_modal();
        self.close_menu();
    }

    fn clear_moves(&mut self) {
        for square in &mut self.elements.squares {
            square.element.replace_icon(None);
        }
    }

    fn toggle_menu(&mut self) {
        if self.is_menu_open() {
            self.close_menu();
        } else {
            self.elements.menu_items.set_hidden(false);
            self.elements
                .menu_btn
                .replace_icon(Some(Icon::new("fa-chevron-up", "")));
        }
    }

    fn close_menu(&mut self) {
        self.elements.menu_items.set_hidden(true);
        self.elements
            .menu_btn
            .replace_icon(Some(Icon::new("fa-chevron-down", "")));
    }

    fn initialize_moves(&mut self, moves: &[Move]) {
        for square in &mut self.elements.squares {
            if let Some(existing) = moves.iter().find(|m| *m.square_id() == square.position) {
                square.element.replace_icon(Some(player_icon(existing.player())));
            }
        }
    }

    fn set_turn_indicator(&mut self, player: &Player) {
        let turn = &mut self.elements.turn;
        turn.replace_icon(Some(player_icon(player)));
        turn.set_color_class(Some(player.color_class().clone()));
        turn.set_text(format!("{}, you're up!", player.name()));
    }
}

fn player_icon(player: &Player) -> Icon {
    Icon::new(player.icon_class().as_str(), player.color_class().as_str())
}

impl std::fmt::Debug for View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("View")
            .field("cursor", &self.cursor)
            .field("menu_open", &self.is_menu_open())
            .field("modal_open", &self.is_modal_open())
            .field("reset_handlers", &self.reset_handlers.len())
            .field("new_round_handlers", &self.new_round_handlers.len())
            .field("move_handlers", &self.move_handlers.len())
            .finish()
    }
}
