//! Parameter list widget

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use saavy_acid::{ParamId, VoiceParams};

const BAR_CELLS: usize = 20;

pub fn render_params(frame: &mut Frame, area: Rect, params: &VoiceParams, selected: usize) {
    let block = Block::default().title(" Params ").borders(Borders::ALL);

    let lines: Vec<Line> = ParamId::ALL
        .iter()
        .enumerate()
        .map(|(i, &id)| {
            let info = id.info();
            let value = params.get(id);
            let filled = (info.normalize(value) * BAR_CELLS as f32).round() as usize;
            let bar = format!("{}{}", "■".repeat(filled), "·".repeat(BAR_CELLS - filled));

            let style = if i == selected {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Line::from(vec![
                Span::styled(format!(" {:<7}", info.name), style),
                Span::styled(bar, style.fg(Color::Cyan)),
                Span::styled(format!(" {:>6}", info.format(value)), style),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
