//! Terminal UI rendering with ratatui

use crate::app::App;
use crate::input::key_to_string;
use crate::settings::Settings;
use crossterm::event::KeyCode;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use snapstack::{Cell, Piece, ProfileStore, Tint, POOL_SIZE};

const EMPTY: &str = "  ";

/// Width of the stats/tray column
const SIDE_WIDTH: u16 = 26;

/// Tray rows per piece: up to 4 cells tall plus a label line
const TRAY_SLOT_HEIGHT: u16 = 5;

const PRIMARY: Color = Color::Rgb(0x6e, 0xe7, 0xff);
const SECONDARY: Color = Color::Rgb(0xa7, 0xff, 0x83);
const ACCENT: Color = Color::Rgb(0xff, 0xd1, 0x66);
const BLOCKED: Color = Color::Rgb(0xff, 0x4d, 0x6d);

fn tint_color(tint: Tint) -> Color {
    match tint {
        Tint::Primary => PRIMARY,
        Tint::Secondary => SECONDARY,
    }
}

/// Render the entire game UI
pub fn render_game<S: ProfileStore>(frame: &mut Frame, app: &App<S>, settings: &Settings) {
    let area = frame.area();
    let size = app.game.board().size() as u16;

    let board_width = size * 2 + 2;
    let board_height = size + 2;
    let game_height = board_height.max(TRAY_SLOT_HEIGHT * POOL_SIZE as u16 + 10);
    let game_area = center_rect(area, board_width + SIDE_WIDTH, game_height);

    let main_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(board_width), Constraint::Length(SIDE_WIDTH)])
        .split(game_area);

    let board_area = Rect {
        height: board_height.min(main_layout[0].height),
        ..main_layout[0]
    };
    render_board(frame, board_area, app, settings);

    let right_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(10), // Stats
            Constraint::Min(TRAY_SLOT_HEIGHT), // Tray
        ])
        .split(main_layout[1]);

    render_stats(frame, right_layout[0], app);
    render_tray(frame, right_layout[1], app, settings);

    if app.game.is_game_over() {
        render_game_over(frame, area, app);
    }
}

/// Center a rect within another rect
fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

/// Render the game board with the placement preview
fn render_board<S: ProfileStore>(frame: &mut Frame, area: Rect, app: &App<S>, settings: &Settings) {
    let (block_char, empty_char) = settings.visual.block_chars();
    let board = app.game.board();

    let title = format!(" {} ", app.game.mode().name());
    let block = Block::default()
        .title(title)
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let (cursor_row, cursor_col) = app.cursor;
    let mut preview: Vec<(usize, usize)> = Vec::new();
    let mut fits = false;
    if let Some(piece) = app.selected_piece().filter(|_| app.show_preview && !app.game.is_game_over()) {
        preview = board.footprint(cursor_row, cursor_col, piece).collect();
        fits = board.can_place(cursor_row, cursor_col, piece);
    }
    let preview_color = if fits { ACCENT } else { BLOCKED };

    let lines: Vec<Line> = board
        .rows()
        .enumerate()
        .map(|(row, cells)| {
            let spans: Vec<Span> = cells
                .iter()
                .enumerate()
                .map(|(col, cell)| {
                    let is_cursor = (row as i32, col as i32) == app.cursor;
                    if preview.contains(&(row, col)) {
                        let style = Style::default().fg(preview_color);
                        let style = if fits { style } else { style.dim() };
                        return Span::styled(block_char, style);
                    }
                    match cell {
                        Cell::Filled(tint) => Span::styled(block_char, Style::default().fg(tint_color(*tint))),
                        Cell::Empty if is_cursor => Span::styled("[]", Style::default().fg(ACCENT)),
                        Cell::Empty => Span::styled(empty_char, Style::default().fg(Color::DarkGray)),
                    }
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Render score, best, coins and run counters
fn render_stats<S: ProfileStore>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let block = Block::default()
        .title(" SNAP & STACK ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let score = app.game.score();
    let profile = app.game.profile();
    let label = |text: &'static str| Span::styled(text, Style::default().fg(Color::Gray));

    let mut lines = vec![
        Line::from(vec![
            label("SCORE "),
            Span::styled(score.points.to_string(), Style::default().fg(Color::White).bold()),
        ]),
        Line::from(vec![
            label("BEST  "),
            Span::styled(profile.best.to_string(), Style::default().fg(Color::Cyan)),
        ]),
        Line::from(vec![
            label("COINS "),
            Span::styled(profile.coins.to_string(), Style::default().fg(ACCENT)),
        ]),
        Line::from(vec![
            label("LINES "),
            Span::styled(score.lines.to_string(), Style::default().fg(Color::Green)),
        ]),
        Line::from(vec![
            label("PIECES "),
            Span::styled(score.placements.to_string(), Style::default().fg(Color::White)),
        ]),
    ];

    if app.is_daily() {
        lines.push(Line::from(vec![
            label("STREAK "),
            Span::styled(profile.daily_streak.to_string(), Style::default().fg(Color::Magenta)),
        ]));
    }

    if let Some(status) = &app.status {
        lines.push(Line::raw(""));
        lines.push(Line::styled(status.clone(), Style::default().fg(Color::Magenta).bold()));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Render the three offered pieces
fn render_tray<S: ProfileStore>(frame: &mut Frame, area: Rect, app: &App<S>, settings: &Settings) {
    let (block_char, _) = settings.visual.block_chars();
    let block = Block::default()
        .title(" PLACE ALL 3 ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut constraints = vec![Constraint::Length(TRAY_SLOT_HEIGHT); POOL_SIZE];
    constraints.push(Constraint::Min(1));
    let slot_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (i, slot) in app.game.pool().slots().iter().enumerate() {
        if slot.consumed {
            continue;
        }
        let selected = i == app.selected;
        render_mini_piece(frame, slot_areas[i], i, slot.piece, selected, block_char);
    }

    let keys = &app.bindings;
    let hint = format!(
        "1-3/{} pick  {} place",
        first_key(&keys.next_piece),
        first_key(&keys.place)
    );
    frame.render_widget(
        Paragraph::new(Line::styled(hint, Style::default().fg(Color::DarkGray)))
            .alignment(Alignment::Center),
        slot_areas[POOL_SIZE],
    );
}

/// Display name of the first key bound to an action
fn first_key(codes: &[KeyCode]) -> String {
    codes
        .first()
        .map(|&code| key_to_string(code))
        .unwrap_or_else(|| "-".to_string())
}

/// Render a small piece preview for the tray
fn render_mini_piece(
    frame: &mut Frame,
    area: Rect,
    index: usize,
    piece: &Piece,
    selected: bool,
    block_char: &str,
) {
    if area.height < 2 || area.width < 4 {
        return;
    }

    let color = if selected { ACCENT } else { PRIMARY };
    let marker = if selected { "▶" } else { " " };
    let mut lines = vec![Line::styled(
        format!("{} {}", marker, index + 1),
        Style::default().fg(color).bold(),
    )];

    for dy in 0..piece.height() {
        let spans: Vec<Span> = (0..piece.width())
            .map(|dx| {
                if piece.contains(dx, dy) {
                    Span::styled(block_char.to_string(), Style::default().fg(color))
                } else {
                    Span::raw(EMPTY)
                }
            })
            .collect();
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

/// Render the game over panel
fn render_game_over<S: ProfileStore>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let popup_area = center_rect(area, 30, 9);

    // Clear the background
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT))
        .style(Style::default().bg(Color::Black));

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let keys = &app.bindings;
    let text = vec![
        Line::styled("NO MOVES!", Style::default().fg(ACCENT).bold()),
        Line::raw(""),
        Line::styled(
            format!("SCORE: {}", app.game.score().points),
            Style::default().fg(Color::White),
        ),
        Line::styled(
            format!("BEST: {}", app.game.profile().best),
            Style::default().fg(Color::Gray),
        ),
        Line::raw(""),
        Line::styled(
            format!(
                "{} continue  {} new run  {} quit",
                first_key(&keys.continue_game),
                first_key(&keys.new_run),
                first_key(&keys.quit)
            ),
            Style::default().fg(Color::Gray),
        ),
    ];

    frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), inner);
}
