//! Transport bar widget - tempo, play state, practice mode and loop count

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use backbeat::{scoring::ScoringMode, session::PracticeMode};

use super::ViewModel;

pub fn render_transport(frame: &mut Frame, area: Rect, view: &ViewModel) {
    let block = Block::default()
        .title(format!(" {} ", view.title))
        .borders(Borders::ALL);

    let play_symbol = if view.playing { "▶" } else { "⏸" };
    let play_state_str = if view.playing { "Playing" } else { "Paused" };
    let mode = match view.mode {
        PracticeMode::Listen => "Listen",
        PracticeMode::Tap => "Tap along",
    };
    let scoring = match view.scoring_mode {
        ScoringMode::Groove => "groove",
        ScoringMode::Timing => "timing",
    };

    let line = Line::from(vec![
        Span::styled(
            format!(" BPM: {:.0}  ", view.bpm),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!("{play_symbol} {play_state_str}  "),
            Style::default().fg(if view.playing { Color::Green } else { Color::Yellow }),
        ),
        Span::styled(format!("{mode}  "), Style::default().fg(Color::White)),
        Span::styled(
            format!("Metronome {}  ", if view.metronome { "on" } else { "off" }),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("Loop {}/{} ({scoring})", view.loops_completed, view.loops_required),
            Style::default().fg(Color::Magenta),
        ),
        Span::styled(
            if view.audio { "" } else { "  no audio" },
            Style::default().fg(Color::Red),
        ),
    ]);

    let paragraph = Paragraph::new(vec![
        line,
        Line::from(Span::styled(
            format!(" {}", view.subtitle),
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .block(block);
    frame.render_widget(paragraph, area);
}
