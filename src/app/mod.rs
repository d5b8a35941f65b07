//! Terminal host for the carousel and ticker views.

use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::{
    event::{Event, EventStream, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::action::Action;
use crate::components::Component;
use crate::error::{CarouselError, Result};

/// Redraw and animation period
const TICK_INTERVAL_MS: u64 = 50;

pub struct App {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    view: Box<dyn Component>,
    should_quit: bool,
    needs_redraw: bool,
}

impl App {
    pub fn new(view: Box<dyn Component>) -> Result<Self> {
        enable_raw_mode().map_err(|e| CarouselError::Terminal(e.to_string()))?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)
            .map_err(|e| CarouselError::Terminal(e.to_string()))?;

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend).map_err(|e| CarouselError::Terminal(e.to_string()))?;

        Ok(Self {
            terminal,
            view,
            should_quit: false,
            needs_redraw: true,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut events = EventStream::new();
        let mut ticker = tokio::time::interval(Duration::from_millis(TICK_INTERVAL_MS));

        while !self.should_quit {
            if self.needs_redraw {
                self.draw()?;
                self.needs_redraw = false;
            }

            tokio::select! {
                _ = ticker.tick() => {
                    self.dispatch(Action::Tick);
                }
                maybe_event = events.next() => match maybe_event {
                    Some(Ok(event)) => self.handle_event(event),
                    Some(Err(e)) => return Err(CarouselError::Terminal(e.to_string())),
                    None => self.should_quit = true,
                },
            }
        }

        self.view.update(&Action::Quit);
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Some(action) = global_action(&event) {
            self.dispatch(action);
            return;
        }
        if matches!(event, Event::Resize(..)) {
            self.needs_redraw = true;
            return;
        }
        if let Some(action) = self.view.handle_event(&event) {
            self.dispatch(action);
        }
    }

    fn dispatch(&mut self, action: Action) {
        if action == Action::Quit {
            self.should_quit = true;
            return;
        }
        self.view.update(&action);
        self.needs_redraw = true;
    }

    fn draw(&mut self) -> Result<()> {
        let view = &self.view;
        self.terminal
            .draw(|frame| {
                let area = frame.area();
                view.render(frame, area);
            })
            .map_err(|e| CarouselError::Terminal(e.to_string()))?;
        Ok(())
    }
}

impl Drop for App {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

/// Keys handled regardless of the active view.
fn global_action(event: &Event) -> Option<Action> {
    let Event::Key(key) = event else {
        return None;
    };
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Action::Quit),
        _ => None,
    }
}
