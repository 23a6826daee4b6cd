//! TUI module for acid
//!
//! Shows the voice display, the parameters, the pattern and a scope, and
//! turns key presses into parameter nudges and transport commands.

mod params;
mod screen;
pub mod state;
mod transport;
mod waveform;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    DefaultTerminal, Frame,
};
use rtrb::{Consumer, Producer};
use std::{sync::Arc, time::Duration};

use saavy_acid::{
    display::{FrameBuffer, VoiceDisplay},
    ParamId, VoiceParams,
};

use params::render_params;
use screen::render_screen;
use state::{ControlMessage, TransportInfo};
use transport::render_transport;
use waveform::render_waveform;

/// Audio visualization buffer size
const VIS_BUFFER_SIZE: usize = 1024;

/// Which page the voice display shows
#[derive(Clone, Copy, PartialEq, Eq)]
enum Page {
    Params,
    Screensaver,
}

/// UI application state
pub struct UiApp {
    audio_rx: Consumer<f32>,
    control_tx: Producer<ControlMessage>,
    display: VoiceDisplay,
    params: Arc<VoiceParams>,
    transport: TransportInfo,
    framebuffer: FrameBuffer,
    audio_buffer: Vec<f32>,
    selected: usize,
    page: Page,
    should_quit: bool,
}

impl UiApp {
    pub fn new(
        audio_rx: Consumer<f32>,
        control_tx: Producer<ControlMessage>,
        display: VoiceDisplay,
        params: Arc<VoiceParams>,
        transport: TransportInfo,
    ) -> Self {
        Self {
            audio_rx,
            control_tx,
            display,
            params,
            transport,
            framebuffer: FrameBuffer::new(),
            audio_buffer: vec![0.0; VIS_BUFFER_SIZE],
            selected: 0,
            page: Page::Screensaver,
            should_quit: false,
        }
    }

    /// Run the UI event loop
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.poll_audio();
            self.refresh_display();

            terminal.draw(|frame| self.render(frame))?;

            // ~30fps: one screensaver frame per redraw
            if event::poll(Duration::from_millis(33))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }

        Ok(())
    }

    fn poll_audio(&mut self) {
        let mut received = false;
        while let Ok(sample) = self.audio_rx.pop() {
            self.audio_buffer.push(sample);
            received = true;
        }

        if received && self.audio_buffer.len() > VIS_BUFFER_SIZE {
            let excess = self.audio_buffer.len() - VIS_BUFFER_SIZE;
            self.audio_buffer.drain(0..excess);
        }
    }

    fn refresh_display(&mut self) {
        match self.page {
            Page::Params => self.display.display(&mut self.framebuffer),
            Page::Screensaver => self.display.display_screensaver(&mut self.framebuffer),
        }
    }

    fn send(&mut self, message: ControlMessage) {
        if self.control_tx.push(message).is_err() {
            log::warn!("control queue full, dropped {:?}", message);
        }
    }

    fn handle_key(&mut self, key: KeyCode) {
        let id = ParamId::ALL[self.selected];
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char(' ') => self.send(ControlMessage::TogglePlayback),
            KeyCode::Char('r') => self.send(ControlMessage::Reset),
            KeyCode::Char('0') => self.params.reset(),
            KeyCode::Tab => {
                self.page = match self.page {
                    Page::Params => Page::Screensaver,
                    Page::Screensaver => Page::Params,
                }
            }
            KeyCode::Up => self.selected = (self.selected + ParamId::ALL.len() - 1) % ParamId::ALL.len(),
            KeyCode::Down => self.selected = (self.selected + 1) % ParamId::ALL.len(),
            KeyCode::Left => {
                self.params.nudge(id, -1.0);
            }
            KeyCode::Right => {
                self.params.nudge(id, 1.0);
            }
            KeyCode::PageDown => {
                self.params.nudge(id, -10.0);
            }
            KeyCode::PageUp => {
                self.params.nudge(id, 10.0);
            }
            _ => {}
        }
    }

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),  // Transport bar
                Constraint::Length(34), // Voice display + params
                Constraint::Min(6),     // Scope
                Constraint::Length(1),  // Help bar
            ])
            .split(area);

        let middle = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(130), Constraint::Min(40)])
            .split(rows[1]);

        let peak = self
            .audio_buffer
            .iter()
            .fold(0.0f32, |acc, &x| acc.max(x.abs()));
        render_transport(frame, rows[0], &self.transport, peak);

        let title = match self.page {
            Page::Params => "Acid303",
            Page::Screensaver => "Acid303 · screensaver",
        };
        render_screen(frame, middle[0], &self.framebuffer, title);
        render_params(frame, middle[1], &self.params, self.selected);

        render_waveform(frame, rows[2], &self.audio_buffer);

        let help = Paragraph::new(
            " [Q] Quit  [Space] Play/Pause  [R] Restart  [Tab] Page  [↑↓] Select  [←→ PgUp PgDn] Adjust  [0] Defaults",
        )
        .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, rows[3]);
    }
}
