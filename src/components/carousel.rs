//! Terminal carousel widget.
//!
//! Shows one slide at a time with an indicator row, navigates with the
//! arrow keys or digits and auto-advances with wraparound.

use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::action::Action;
use crate::carousel::{CarouselIds, CarouselState, Navigator, Notice, Slide};
use crate::components::Component;
use crate::error::RenderError;
use crate::page::Document;

const STAR_COLOR: Color = Color::Rgb(249, 226, 175);
const MUTED: Color = Color::Rgb(147, 153, 178);
const ERROR: Color = Color::Rgb(243, 139, 168);

/// Navigation capability backed by the terminal widget: activation collects
/// the rendered slides into a [`CarouselState`].
pub struct CarouselNavigator {
    ids: CarouselIds,
    state: Option<CarouselState>,
}

impl CarouselNavigator {
    pub fn new(ids: CarouselIds) -> Self {
        Self { ids, state: None }
    }

    pub fn state(&self) -> Option<&CarouselState> {
        self.state.as_ref()
    }

    pub fn into_state(self) -> Option<CarouselState> {
        self.state
    }
}

impl Navigator for CarouselNavigator {
    fn activate(&mut self, doc: &mut Document, root_id: &str) -> Result<(), RenderError> {
        if doc.element(root_id).is_none() {
            return Err(RenderError::MissingSurface(root_id.to_string()));
        }
        self.state = Some(CarouselState::collect(doc, &self.ids)?);
        Ok(())
    }
}

enum Content {
    Ready(CarouselState),
    Failed(Notice),
}

pub struct CarouselView {
    content: Content,
    interval: Duration,
    last_advance: Instant,
    paused: bool,
}

impl CarouselView {
    pub fn new(state: CarouselState, interval: Duration) -> Self {
        Self {
            content: Content::Ready(state),
            interval,
            last_advance: Instant::now(),
            paused: false,
        }
    }

    pub fn failed(notice: Notice) -> Self {
        Self {
            content: Content::Failed(notice),
            interval: Duration::MAX,
            last_advance: Instant::now(),
            paused: true,
        }
    }

    /// Build the view from a document after a mount attempt: the failure
    /// notice if one is showing, otherwise the navigator's collected state.
    pub fn from_mount(doc: &Document, ids: &CarouselIds, navigator: CarouselNavigator, interval: Duration) -> Self {
        let notice = doc
            .mount(&ids.inner)
            .and_then(|m| m.notices().next().cloned());
        match (notice, navigator.into_state()) {
            (None, Some(state)) => Self::new(state, interval),
            (Some(notice), _) => Self::failed(notice),
            (None, None) => Self::failed(Notice::load_failure(None)),
        }
    }

    pub fn state(&self) -> Option<&CarouselState> {
        match &self.content {
            Content::Ready(state) => Some(state),
            Content::Failed(_) => None,
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Advance to the next slide if the interval has elapsed since the last move.
    pub fn advance_if_due(&mut self, now: Instant) -> bool {
        if self.paused {
            return false;
        }
        let Content::Ready(state) = &mut self.content else {
            return false;
        };
        if state.len() < 2 || now.duration_since(self.last_advance) < self.interval {
            return false;
        }
        state.next();
        self.last_advance = now;
        true
    }

    fn navigate(&mut self, f: impl FnOnce(&mut CarouselState)) {
        if let Content::Ready(state) = &mut self.content {
            f(state);
            self.last_advance = Instant::now();
        }
    }

    fn slide_lines(slide: &Slide) -> Vec<Line<'static>> {
        let mut lines = vec![
            Line::from(vec![
                Span::styled("★★★★★ ", Style::default().fg(STAR_COLOR)),
                Span::styled(slide.rating_text(), Style::default().add_modifier(Modifier::BOLD)),
            ]),
            Line::default(),
            Line::from(Span::styled(
                format!("“{}”", slide.quote),
                Style::default().add_modifier(Modifier::ITALIC),
            )),
            Line::default(),
            Line::from(vec![
                Span::styled(slide.author.clone(), Style::default().add_modifier(Modifier::BOLD)),
                Span::raw("  "),
                Span::styled(slide.date.clone(), Style::default().fg(MUTED)),
            ]),
        ];
        if let Some(reply) = &slide.reply {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(
                "Response from the owner",
                Style::default().fg(MUTED).add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(Span::styled(reply.clone(), Style::default().fg(MUTED))));
        }
        lines
    }

    fn indicator_line(state: &CarouselState) -> Line<'static> {
        let spans: Vec<Span> = state
            .indicators()
            .iter()
            .map(|ind| {
                if ind.active {
                    Span::styled("● ", Style::default().fg(STAR_COLOR))
                } else {
                    Span::styled("○ ", Style::default().fg(MUTED))
                }
            })
            .collect();
        Line::from(spans)
    }
}

impl Component for CarouselView {
    fn handle_event(&mut self, event: &Event) -> Option<Action> {
        let Event::Key(key) = event else {
            return None;
        };
        if key.kind != KeyEventKind::Press {
            return None;
        }
        match key.code {
            KeyCode::Right | KeyCode::Char('l') => Some(Action::NextSlide),
            KeyCode::Left | KeyCode::Char('h') => Some(Action::PrevSlide),
            KeyCode::Char(' ') => Some(Action::TogglePause),
            KeyCode::Char(c @ '1'..='9') => Some(Action::SelectSlide(c as usize - '1' as usize)),
            _ => None,
        }
    }

    fn update(&mut self, action: &Action) {
        match action {
            Action::Tick => {
                self.advance_if_due(Instant::now());
            }
            Action::NextSlide => self.navigate(CarouselState::next),
            Action::PrevSlide => self.navigate(CarouselState::prev),
            Action::SelectSlide(index) => {
                let index = *index;
                self.navigate(|state| {
                    state.select(index);
                });
            }
            Action::TogglePause => {
                if matches!(self.content, Content::Ready(_)) {
                    self.paused = !self.paused;
                    self.last_advance = Instant::now();
                }
            }
            Action::Quit => {}
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let title = match &self.content {
            Content::Ready(state) => match state.active() {
                Some(slide) => format!(
                    " Testimonials {}/{}{} ",
                    slide.index + 1,
                    state.len(),
                    if self.is_paused() { " (paused)" } else { "" }
                ),
                None => " Testimonials ".to_string(),
            },
            Content::Failed(_) => " Testimonials ".to_string(),
        };
        let block = Block::default().title(title).borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::vertical([
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

        match &self.content {
            Content::Failed(notice) => {
                let paragraph = Paragraph::new(notice.text())
                    .style(Style::default().fg(ERROR).add_modifier(Modifier::BOLD))
                    .alignment(Alignment::Center)
                    .wrap(Wrap { trim: true });
                frame.render_widget(paragraph, chunks[0]);
            }
            Content::Ready(state) => match state.active() {
                Some(slide) => {
                    let paragraph = Paragraph::new(Self::slide_lines(slide))
                        .alignment(Alignment::Center)
                        .wrap(Wrap { trim: true });
                    frame.render_widget(paragraph, chunks[0]);
                    frame.render_widget(
                        Paragraph::new(Self::indicator_line(state)).alignment(Alignment::Center),
                        chunks[1],
                    );
                }
                None => {
                    let paragraph = Paragraph::new("No testimonials yet.")
                        .style(Style::default().fg(MUTED))
                        .alignment(Alignment::Center);
                    frame.render_widget(paragraph, chunks[0]);
                }
            },
        }

        let help = Paragraph::new("←/→ navigate  1-9 jump  space pause  q quit")
            .style(Style::default().fg(MUTED))
            .alignment(Alignment::Center);
        frame.render_widget(help, chunks[2]);
    }
}
