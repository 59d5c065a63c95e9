//! Drum grid widget - one row per drum, one column per step

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use backbeat::{scoring::StepFeedback, sequencing::Drum};

use super::ViewModel;

const LABEL_WIDTH: usize = 8;
const CELL_WIDTH: usize = 4;

fn drum_label(drum: Drum) -> &'static str {
    match drum {
        Drum::HiHat => "Hi hat",
        Drum::Snare => "Snare",
        Drum::Kick => "Kick",
    }
}

fn key_label(key: Option<char>) -> String {
    match key {
        Some(' ') => "spc".to_string(),
        Some(key) => key.to_uppercase().to_string(),
        None => "-".to_string(),
    }
}

pub fn render_grid(frame: &mut Frame, area: Rect, view: &ViewModel) {
    if area.height < 5 || area.width < (LABEL_WIDTH + CELL_WIDTH * view.grid.len()) as u16 {
        return;
    }

    let mut lines = Vec::new();

    // Counting row
    let mut counts = vec![Span::raw(" ".repeat(LABEL_WIDTH))];
    for step in &view.grid {
        let style = if step.lit {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        counts.push(Span::styled(format!("{:^CELL_WIDTH$}", step.count_label), style));
    }
    lines.push(Line::from(counts));

    for (drum, key) in view.keys {
        let flashing = view.current_hit == Some(drum);
        let label_style = if flashing {
            Style::default().fg(Color::Black).bg(Color::Cyan)
        } else {
            Style::default().fg(Color::White)
        };

        let mut spans = vec![Span::styled(
            format!("{:<LABEL_WIDTH$}", drum_label(drum)),
            label_style,
        )];

        for step in &view.grid {
            let expected = step.expected.contains(drum);
            let color = match (expected, step.feedback) {
                (true, Some(StepFeedback::Correct)) => Color::Green,
                (true, Some(StepFeedback::Incorrect)) => Color::Red,
                (true, None) if step.lit => Color::Yellow,
                (true, None) => Color::Cyan,
                (false, _) if step.lit => Color::Gray,
                (false, _) => Color::DarkGray,
            };
            let cell = if expected { " ██ " } else { " ·· " };
            spans.push(Span::styled(cell, Style::default().fg(color)));
        }

        spans.push(Span::styled(
            format!("  [{}]", key_label(key)),
            Style::default().fg(Color::DarkGray),
        ));
        lines.push(Line::from(spans));
    }

    // Playhead row
    let mut playhead = " ".repeat(LABEL_WIDTH);
    for step in &view.grid {
        playhead.push_str(if step.lit { " ▲  " } else { "    " });
    }
    lines.push(Line::from(Span::styled(
        playhead,
        Style::default().fg(Color::Yellow),
    )));

    frame.render_widget(Paragraph::new(lines), area);
}
