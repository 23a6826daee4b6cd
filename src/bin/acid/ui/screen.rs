//! Frame buffer widget - the voice's 128×64 display in half-block characters

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use saavy_acid::display::{FrameBuffer, HEIGHT, WIDTH};

/// Two pixel rows per terminal row.
fn glyph(top: bool, bottom: bool) -> char {
    match (top, bottom) {
        (true, true) => '█',
        (true, false) => '▀',
        (false, true) => '▄',
        (false, false) => ' ',
    }
}

pub fn render_screen(frame: &mut Frame, area: Rect, fb: &FrameBuffer, title: &str) {
    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL);

    let lines: Vec<Line> = (0..HEIGHT)
        .step_by(2)
        .map(|y| {
            (0..WIDTH)
                .map(|x| glyph(fb.pixel(x, y), fb.pixel(x, y + 1)))
                .collect::<String>()
                .into()
        })
        .collect();

    let screen = Paragraph::new(lines)
        .block(block)
        .style(Style::default().fg(Color::LightCyan));
    frame.render_widget(screen, area);
}
