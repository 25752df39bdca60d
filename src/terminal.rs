// src/terminal.rs
// This module handles terminal input/output for the bingo card: drawing the
// grid, the seed and color fields, and turning key and mouse events into
// session calls.

use std::error::Error;
use std::io::{self, Write};

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute, queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};

use crate::board::Board;
use crate::error::BingoError;
use crate::logging;
use crate::session::BingoSession;
use crate::text_field::TextField;
use crate::theme::Rgb;

// Grid geometry, in terminal columns/rows
pub const CELL_WIDTH: usize = 14;
pub const CELL_HEIGHT: usize = 3;
pub const CELL_GAP: usize = 1;
pub const GRID_LEFT: usize = 2;
pub const GRID_TOP: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Board,
    Seed,
    Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Continue,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiState {
    pub focus: Focus,
    pub hover: Option<(usize, usize)>,
    pub status: String,
}

impl Default for UiState {
    fn default() -> Self {
        UiState {
            focus: Focus::Board,
            hover: None,
            status: String::new(),
        }
    }
}

/// Split a label into at most `max_lines` lines of at most `width` characters,
/// breaking on whitespace and cutting words that are wider than a cell.
pub fn wrap_label(label: &str, width: usize, max_lines: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in label.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            lines.push(word[..width].iter().collect());
            word.drain(..width);
        }
        if word.is_empty() {
            continue;
        }

        let current_len = current.chars().count();
        if current_len > 0 && current_len + 1 + word.len() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.extend(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }

    lines.truncate(max_lines);
    lines
}

pub fn center_text(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.chars().take(width).collect();
    }
    let left = (width - len) / 2;
    let right = width - len - left;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(right))
}

// Exactly `height` lines of exactly `width` characters, label centered both ways
pub fn cell_lines(label: &str, width: usize, height: usize) -> Vec<String> {
    let wrapped = wrap_label(label, width, height);
    let top = (height - wrapped.len()) / 2;

    (0..height)
        .map(|i| {
            let text = i
                .checked_sub(top)
                .and_then(|j| wrapped.get(j))
                .map_or("", String::as_str);
            center_text(text, width)
        })
        .collect()
}

/// Top-left terminal position of cell `(x, y)`.
pub fn cell_origin(x: usize, y: usize) -> (usize, usize) {
    (
        GRID_LEFT + x * (CELL_WIDTH + CELL_GAP),
        GRID_TOP + y * (CELL_HEIGHT + CELL_GAP),
    )
}

/// Cell under a terminal position, if any. Gaps between cells hit nothing.
pub fn hit_test(column: u16, row: u16, size: usize) -> Option<(usize, usize)> {
    let dx = usize::from(column).checked_sub(GRID_LEFT)?;
    let dy = usize::from(row).checked_sub(GRID_TOP)?;
    let (x, y) = (dx / (CELL_WIDTH + CELL_GAP), dy / (CELL_HEIGHT + CELL_GAP));

    if x >= size || y >= size {
        return None;
    }
    if dx % (CELL_WIDTH + CELL_GAP) >= CELL_WIDTH || dy % (CELL_HEIGHT + CELL_GAP) >= CELL_HEIGHT {
        return None;
    }
    Some((x, y))
}

/// Plain text rendering of a board, used by `--print`.
pub fn render_plain(board: &Board) -> String {
    let size = board.size();
    let border = format!("+{}\n", format!("{}+", "-".repeat(CELL_WIDTH)).repeat(size));

    let mut out = border.clone();
    for row in board.rows() {
        let cells: Vec<Vec<String>> = row
            .iter()
            .map(|label| cell_lines(label, CELL_WIDTH, CELL_HEIGHT))
            .collect();
        for line in 0..CELL_HEIGHT {
            out.push('|');
            for cell in &cells {
                out.push_str(&cell[line]);
                out.push('|');
            }
            out.push('\n');
        }
        out.push_str(&border);
    }
    out
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb { r: rgb.r, g: rgb.g, b: rgb.b }
}

// Move the hover highlight from wherever it is to `target`
fn move_hover(
    session: &mut BingoSession,
    state: &mut UiState,
    target: Option<(usize, usize)>,
) -> Result<(), BingoError> {
    if state.hover == target {
        return Ok(());
    }
    if let Some((x, y)) = state.hover {
        session.set_hover(x, y, false)?;
    }
    if let Some((x, y)) = target {
        session.set_hover(x, y, true)?;
    }
    state.hover = target;
    Ok(())
}

fn win_status(session: &BingoSession) -> String {
    match session.winning_line() {
        Some(line) => format!("Bingo on {line}!"),
        None => String::new(),
    }
}

fn edit_field(field: &mut TextField, code: KeyCode) {
    match code {
        KeyCode::Char(c) => field.insert(c),
        KeyCode::Backspace => field.backspace(),
        KeyCode::Delete => field.delete(),
        KeyCode::Left => field.move_left(),
        KeyCode::Right => field.move_right(),
        KeyCode::Home => field.home(),
        KeyCode::End => field.end(),
        _ => {}
    }
}

fn step(value: usize, delta: isize, size: usize) -> usize {
    value.saturating_add_signed(delta).min(size.saturating_sub(1))
}

pub fn handle_key(
    session: &mut BingoSession,
    state: &mut UiState,
    key: KeyEvent,
) -> Result<KeyAction, BingoError> {
    // Only process key press events, not key release events
    if key.kind != KeyEventKind::Press {
        return Ok(KeyAction::Continue);
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Ok(KeyAction::Quit);
    }

    match state.focus {
        Focus::Board => match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Ok(KeyAction::Quit),
            KeyCode::Char('s') => {
                state.focus = Focus::Seed;
                state.status = "Type a seed and press Enter".to_string();
            }
            KeyCode::Char('c') => {
                state.focus = Focus::Color;
                state.status = "Type a color as #RRGGBB and press Enter".to_string();
            }
            KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
                let size = session.board().size();
                let (x, y) = state.hover.unwrap_or_else(|| session.board().center());
                let target = match key.code {
                    KeyCode::Up => (x, step(y, -1, size)),
                    KeyCode::Down => (x, step(y, 1, size)),
                    KeyCode::Left => (step(x, -1, size), y),
                    _ => (step(x, 1, size), y),
                };
                move_hover(session, state, Some(target))?;
            }
            KeyCode::Char(' ') | KeyCode::Enter => {
                if let Some((x, y)) = state.hover {
                    session.toggle(x, y)?;
                    state.status = win_status(session);
                }
            }
            _ => {}
        },
        Focus::Seed => match key.code {
            KeyCode::Esc => {
                state.focus = Focus::Board;
                state.status.clear();
            }
            KeyCode::Enter => {
                state.focus = Focus::Board;
                match session.submit_seed_field() {
                    Ok(true) => {
                        // The new board starts without hover flags
                        if let Some((x, y)) = state.hover {
                            session.set_hover(x, y, true)?;
                        }
                        state.status = format!("New board from seed {}", session.seed());
                    }
                    Ok(false) => state.status = "Seed must be a whole number".to_string(),
                    // The current board stays when a seed runs a list dry
                    Err(err @ BingoError::ExhaustedPool { .. }) => {
                        state.status = format!("{err}, board kept");
                    }
                    Err(err) => return Err(err),
                }
            }
            code => edit_field(&mut session.seed_field, code),
        },
        Focus::Color => match key.code {
            KeyCode::Esc => {
                state.focus = Focus::Board;
                state.status.clear();
            }
            KeyCode::Enter => {
                state.focus = Focus::Board;
                state.status = if session.submit_color_field() {
                    format!("Color set to {}", session.theme().color)
                } else {
                    "Color must look like #RRGGBB".to_string()
                };
            }
            code => edit_field(&mut session.color_field, code),
        },
    }

    Ok(KeyAction::Continue)
}

pub fn handle_mouse(
    session: &mut BingoSession,
    state: &mut UiState,
    mouse: MouseEvent,
) -> Result<(), BingoError> {
    let target = hit_test(mouse.column, mouse.row, session.board().size());

    match mouse.kind {
        MouseEventKind::Moved | MouseEventKind::Drag(_) => move_hover(session, state, target)?,
        MouseEventKind::Down(MouseButton::Left) => {
            move_hover(session, state, target)?;
            if let Some((x, y)) = target {
                state.focus = Focus::Board;
                session.toggle(x, y)?;
                state.status = win_status(session);
            }
        }
        _ => {}
    }
    Ok(())
}

fn draw_field<W: Write>(out: &mut W, label: &str, field: &TextField, focused: bool) -> io::Result<()> {
    queue!(out, Print(format!("{label} ")))?;
    if focused {
        queue!(out, SetAttribute(Attribute::Underlined))?;
    }
    queue!(out, Print(format!("{:<width$}", field.text(), width = field.len().max(1))))?;
    queue!(out, SetAttribute(Attribute::Reset), Print("   "))?;
    Ok(())
}

pub fn draw<W: Write>(out: &mut W, session: &BingoSession, state: &UiState) -> io::Result<()> {
    let board = session.board();
    let theme = session.theme();
    let size = board.size();

    queue!(
        out,
        Clear(ClearType::All),
        MoveTo(GRID_LEFT as u16, 0),
        SetAttribute(Attribute::Bold),
        Print(format!("BINGO   seed {}", session.seed())),
        SetAttribute(Attribute::Reset)
    )?;

    let labels: Vec<String> = board.rows().into_iter().flatten().collect();
    for (cell, label) in board.cells().zip(labels.iter()) {
        let (left, top) = cell_origin(cell.x, cell.y);
        let color = to_color(theme.cell_color(cell));
        for (i, line) in cell_lines(label, CELL_WIDTH, CELL_HEIGHT).iter().enumerate() {
            queue!(
                out,
                MoveTo(left as u16, (top + i) as u16),
                SetBackgroundColor(color),
                SetForegroundColor(Color::Black),
                Print(line),
                ResetColor
            )?;
        }
    }

    let below = GRID_TOP + size * (CELL_HEIGHT + CELL_GAP);
    queue!(out, MoveTo(GRID_LEFT as u16, below as u16))?;
    if session.has_won() {
        queue!(
            out,
            SetForegroundColor(Color::Green),
            SetAttribute(Attribute::Bold),
            Print("BINGO!  "),
            SetAttribute(Attribute::Reset),
            ResetColor
        )?;
    }
    queue!(out, Print(&state.status))?;

    queue!(out, MoveTo(GRID_LEFT as u16, (below + 1) as u16))?;
    draw_field(out, "Seed:", &session.seed_field, state.focus == Focus::Seed)?;
    draw_field(out, "Color:", &session.color_field, state.focus == Focus::Color)?;

    queue!(
        out,
        MoveTo(GRID_LEFT as u16, (below + 2) as u16),
        Print("click/space: mark   arrows: move   s: seed   c: color   q: quit")
    )?;

    // Terminal cursor sits on the caret of the field being edited
    let caret = match state.focus {
        Focus::Seed => Some(GRID_LEFT + "Seed: ".len() + session.seed_field.caret()),
        Focus::Color => Some(
            GRID_LEFT
                + "Seed: ".len()
                + session.seed_field.len().max(1)
                + "   Color: ".len()
                + session.color_field.caret(),
        ),
        Focus::Board => None,
    };
    match caret {
        Some(column) => queue!(out, MoveTo(column as u16, (below + 1) as u16), Show)?,
        None => queue!(out, Hide)?,
    }

    out.flush()
}

fn event_loop<W: Write>(out: &mut W, session: &mut BingoSession) -> Result<(), Box<dyn Error>> {
    let mut state = UiState::default();

    loop {
        draw(out, session, &state)?;

        match event::read()? {
            Event::Key(key) => {
                if handle_key(session, &mut state, key)? == KeyAction::Quit {
                    break;
                }
            }
            Event::Mouse(mouse) => handle_mouse(session, &mut state, mouse)?,
            _ => {}
        }
    }

    Ok(())
}

/// Run the interactive card until the user quits. The terminal is restored
/// even when the loop fails.
// Puts the terminal back when dropped, including on early returns from `run`
struct TerminalGuard<W: Write> {
    out: W,
}

impl<W: Write> Drop for TerminalGuard<W> {
    fn drop(&mut self) {
        logging::set_quiet(false);
        let _ = execute!(self.out, LeaveAlternateScreen, DisableMouseCapture, Show);
        let _ = disable_raw_mode();
    }
}

pub fn run(session: &mut BingoSession) -> Result<(), Box<dyn Error>> {
    let mut stdout = io::stdout();

    enable_raw_mode()?;
    let _guard = TerminalGuard { out: io::stdout() };
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, Hide)?;
    logging::set_quiet(true);

    event_loop(&mut stdout, session)
}
