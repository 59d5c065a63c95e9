//! TUI module for backbeat
//!
//! Draws the drum grid, transport, result panel and level ladder.

mod grid;
pub mod state;
mod transport;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub use state::{LadderEntry, ViewModel};

use grid::render_grid;
use transport::render_transport;

fn stars(count: u8) -> String {
    (0..3)
        .map(|i| if i < count { '★' } else { '☆' })
        .collect()
}

pub fn render(frame: &mut Frame, view: &ViewModel) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Transport bar
            Constraint::Length(7), // Drum grid
            Constraint::Min(4),    // Result and ladder
            Constraint::Length(1), // Status
            Constraint::Length(1), // Help bar
        ])
        .split(area);

    render_transport(frame, chunks[0], view);

    let grid_block = Block::default().title(" Pattern ").borders(Borders::ALL);
    let grid_inner = grid_block.inner(chunks[1]);
    frame.render_widget(grid_block, chunks[1]);
    render_grid(frame, grid_inner, view);

    let lower = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[2]);
    render_result(frame, lower[0], view);
    render_ladder(frame, lower[1], view);

    if let Some(status) = &view.status {
        let status = Paragraph::new(format!(" {status}")).style(Style::default().fg(Color::Yellow));
        frame.render_widget(status, chunks[3]);
    }

    let help = Paragraph::new(
        " [P] Play/Pause  [S] Stop  [+/-] Tempo  [M] Metronome  [T] Listen/Tap  [R] Retry  [1-3] Pads  [←/→] Exercise  [Q] Quit",
    )
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, chunks[4]);
}

fn render_result(frame: &mut Frame, area: Rect, view: &ViewModel) {
    let block = Block::default().title(" Score ").borders(Borders::ALL);

    let lines = match &view.result {
        Some(result) => vec![
            Line::from(Span::styled(
                format!(" {}  {}%", stars(result.stars), result.accuracy),
                Style::default().fg(Color::Yellow),
            )),
            Line::from(format!(
                " {} of {} hits",
                result.correct_hits, result.total_expected_hits
            )),
            Line::from(Span::styled(
                format!(" {}", result.feedback),
                Style::default().fg(Color::Cyan),
            )),
        ],
        None => vec![Line::from(Span::styled(
            format!(
                " Play along for {} loops to get a score",
                view.loops_required
            ),
            Style::default().fg(Color::DarkGray),
        ))],
    };

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_ladder(frame: &mut Frame, area: Rect, view: &ViewModel) {
    let block = Block::default().title(" Exercises ").borders(Borders::ALL);

    let lines: Vec<Line> = view
        .ladder
        .iter()
        .map(|entry| {
            let marker = if entry.active { "▸" } else { " " };
            let lock = if entry.unlocked { " " } else { "🔒" };
            let style = match (entry.active, entry.unlocked) {
                (true, _) => Style::default().fg(Color::White),
                (false, true) => Style::default().fg(Color::Gray),
                (false, false) => Style::default().fg(Color::DarkGray),
            };
            Line::from(Span::styled(
                format!("{marker}{lock} {} {}", stars(entry.stars), entry.title),
                style,
            ))
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
