//! Transport bar widget - tempo, play state and the step row

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::state::TransportInfo;

pub fn render_transport(frame: &mut Frame, area: Rect, transport: &TransportInfo, peak: f32) {
    let block = Block::default().title(" acid ").borders(Borders::ALL);

    let current = transport.current_step();
    let play_symbol = if transport.is_playing() { "▶" } else { "⏸" };

    let mut spans = vec![
        Span::styled(
            format!(" {} {:.0} BPM  {:.1}kHz  ", play_symbol, transport.bpm, transport.sample_rate / 1000.0),
            Style::default().fg(Color::Cyan),
        ),
    ];

    for (i, step) in transport.steps.iter().enumerate() {
        let cell = match (step.semitone, step.slide) {
            (None, _) => "· ",
            (Some(_), false) => "● ",
            (Some(_), true) => "◆ ",
        };
        let style = if i == current {
            Style::default().fg(Color::Black).bg(Color::Yellow)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(cell, style));
    }

    spans.push(Span::styled(
        format!("  peak {:>5.1} dB", 20.0 * peak.max(1e-6).log10()),
        Style::default().fg(Color::DarkGray),
    ));

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}
