//! Continuously scrolling strip of review cards.
//!
//! The strip is a [`ScrollContainer`] measured in scroll units
//! ([`UNITS_PER_COLUMN`] per terminal column) and is paged by an
//! [`AutoScroller`] running on its own task.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyCode, KeyEventKind};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
    Frame,
};

use crate::action::Action;
use crate::carousel::Slide;
use crate::components::Component;
use crate::scroll::{AutoScrollHandle, AutoScroller, ScrollBehavior, ScrollContainer};

pub const UNITS_PER_COLUMN: u32 = 10;
pub const CARD_COLUMNS: u16 = 35;

/// Time constant of the smooth-scroll easing
const SMOOTH_TIME: Duration = Duration::from_millis(120);

pub struct TickerStrip {
    cards: Vec<Slide>,
    position: f64,
    target: u32,
    client_width: u32,
}

impl TickerStrip {
    pub fn new(cards: Vec<Slide>) -> Self {
        Self {
            cards,
            position: 0.0,
            target: 0,
            client_width: 0,
        }
    }

    pub fn cards(&self) -> &[Slide] {
        &self.cards
    }

    pub fn set_client_columns(&mut self, columns: u16) {
        self.client_width = u32::from(columns) * UNITS_PER_COLUMN;
        self.target = self.target.min(self.max_offset());
        self.position = self.position.min(f64::from(self.max_offset()));
    }

    fn max_offset(&self) -> u32 {
        self.scroll_width().saturating_sub(self.client_width)
    }

    /// Ease the visible position toward the scroll target.
    pub fn animate(&mut self, elapsed: Duration) {
        let target = f64::from(self.target);
        let factor = 1.0 - (-elapsed.as_secs_f64() / SMOOTH_TIME.as_secs_f64()).exp();
        self.position += (target - self.position) * factor;
        if (target - self.position).abs() < 0.5 {
            self.position = target;
        }
    }

    pub fn is_settled(&self) -> bool {
        self.position == f64::from(self.target)
    }

    /// First visible column of the strip
    pub fn first_column(&self) -> u32 {
        self.scroll_left() / UNITS_PER_COLUMN
    }

    fn move_to(&mut self, offset: u32, behavior: ScrollBehavior) {
        self.target = offset.min(self.max_offset());
        if behavior == ScrollBehavior::Instant {
            self.position = f64::from(self.target);
        }
    }
}

impl ScrollContainer for TickerStrip {
    fn scroll_left(&self) -> u32 {
        self.position.round() as u32
    }

    fn client_width(&self) -> u32 {
        self.client_width
    }

    fn scroll_width(&self) -> u32 {
        self.cards.len() as u32 * u32::from(CARD_COLUMNS) * UNITS_PER_COLUMN
    }

    fn scroll_by(&mut self, delta: u32, behavior: ScrollBehavior) {
        let offset = self.scroll_left().saturating_add(delta);
        self.move_to(offset, behavior);
    }

    fn scroll_to(&mut self, offset: u32, behavior: ScrollBehavior) {
        self.move_to(offset, behavior);
    }
}

fn card_widget(slide: &Slide) -> Paragraph<'static> {
    let mut lines = vec![
        Line::from(Span::styled(
            format!("★ {}", slide.rating_text()),
            Style::default().fg(Color::Rgb(249, 226, 175)),
        )),
        Line::from(Span::styled(
            slide.quote.clone(),
            Style::default().add_modifier(Modifier::ITALIC),
        )),
        Line::from(Span::styled(
            format!("- {}, {}", slide.author, slide.date),
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ];
    if let Some(reply) = &slide.reply {
        lines.push(Line::from(Span::styled(
            format!("↳ {}", reply),
            Style::default().fg(Color::Rgb(147, 153, 178)),
        )));
    }
    Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: true })
}

pub struct TickerView {
    strip: Arc<Mutex<TickerStrip>>,
    scroll: Option<AutoScrollHandle>,
    last_frame: Instant,
}

impl TickerView {
    /// Build the strip and start auto-scrolling it. Must run inside a tokio runtime.
    pub fn start(cards: Vec<Slide>, scroller: &AutoScroller) -> Self {
        let strip = Arc::new(Mutex::new(TickerStrip::new(cards)));
        let scroll = scroller.start(Some(strip.clone()));
        Self {
            strip,
            scroll,
            last_frame: Instant::now(),
        }
    }

    pub fn strip(&self) -> &Arc<Mutex<TickerStrip>> {
        &self.strip
    }

    pub fn stop(&mut self) {
        if let Some(handle) = self.scroll.take() {
            handle.cancel();
        }
    }
}

impl Component for TickerView {
    fn handle_event(&mut self, event: &Event) -> Option<Action> {
        let Event::Key(key) = event else {
            return None;
        };
        if key.kind == KeyEventKind::Press && matches!(key.code, KeyCode::Home | KeyCode::Char('g')) {
            if let Ok(mut strip) = self.strip.lock() {
                strip.scroll_to(0, ScrollBehavior::Instant);
            }
        }
        None
    }

    fn update(&mut self, action: &Action) {
        match action {
            Action::Tick => {
                let now = Instant::now();
                if let Ok(mut strip) = self.strip.lock() {
                    if !strip.is_settled() {
                        strip.animate(now.duration_since(self.last_frame));
                    }
                }
                self.last_frame = now;
            }
            Action::Quit => self.stop(),
            _ => {}
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().title(" Reviews ").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Ok(mut strip) = self.strip.lock() else {
            return;
        };
        strip.set_client_columns(inner.width);
        if strip.cards().is_empty() || inner.width == 0 || inner.height == 0 {
            return;
        }

        // Render the cards overlapping the viewport into a scratch buffer,
        // then copy the visible window.
        let first_column = strip.first_column();
        let card_width = u32::from(CARD_COLUMNS);
        let first_card = (first_column / card_width) as usize;
        let shift = (first_column % card_width) as u16;
        let scratch_width = inner.width.saturating_add(CARD_COLUMNS);
        let mut scratch = Buffer::empty(Rect::new(0, 0, scratch_width, inner.height));

        let mut x: u16 = 0;
        for slide in strip.cards().iter().skip(first_card) {
            if x >= scratch_width {
                break;
            }
            let width = CARD_COLUMNS.min(scratch_width - x);
            card_widget(slide).render(Rect::new(x, 0, width, inner.height), &mut scratch);
            x = x.saturating_add(CARD_COLUMNS);
        }

        let buf = frame.buffer_mut();
        for row in 0..inner.height {
            for col in 0..inner.width {
                let source = col + shift;
                if source >= x.min(scratch_width) {
                    break;
                }
                buf[(inner.x + col, inner.y + row)] = scratch[(source, row)].clone();
            }
        }
    }
}

impl Drop for TickerView {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn slides(n: usize) -> Vec<Slide> {
        (0..n)
            .map(|i| Slide {
                index: i,
                active: i == 0,
                rating: "5.0".to_string(),
                quote: format!("Card {}", i),
                author: "Pat".to_string(),
                date: "2024".to_string(),
                reply: None,
            })
            .collect()
    }

    #[test]
    fn test_strip_dimensions() {
        let mut strip = TickerStrip::new(slides(4));
        strip.set_client_columns(80);
        assert_eq!(strip.scroll_width(), 1400);
        assert_eq!(strip.client_width(), 800);
    }

    #[test]
    fn test_strip_wraps_with_auto_scroller() {
        let scroller = AutoScroller::new(Duration::from_millis(3500), 350);
        let mut strip = TickerStrip::new(slides(4));
        strip.set_client_columns(80);

        scroller.tick(&mut strip);
        strip.animate(Duration::from_secs(5));
        assert_eq!(strip.scroll_left(), 350);

        scroller.tick(&mut strip);
        strip.animate(Duration::from_secs(5));
        assert_eq!(strip.scroll_left(), 600);

        scroller.tick(&mut strip);
        strip.animate(Duration::from_secs(5));
        assert_eq!(strip.scroll_left(), 0);
    }

    #[test]
    fn test_smooth_scroll_animates() {
        let mut strip = TickerStrip::new(slides(10));
        strip.set_client_columns(80);
        strip.scroll_by(350, ScrollBehavior::Smooth);
        assert_eq!(strip.scroll_left(), 0);

        strip.animate(Duration::from_millis(60));
        let mid = strip.scroll_left();
        assert!(mid > 0 && mid < 350);
        assert!(!strip.is_settled());

        strip.animate(Duration::from_secs(10));
        assert!(strip.is_settled());
        assert_eq!(strip.scroll_left(), 350);
    }

    #[test]
    fn test_instant_scroll() {
        let mut strip = TickerStrip::new(slides(10));
        strip.set_client_columns(80);
        strip.scroll_to(700, ScrollBehavior::Instant);
        assert_eq!(strip.scroll_left(), 700);
        assert_eq!(strip.first_column(), 70);
    }

    #[tokio::test]
    async fn test_home_key_rewinds_instantly() {
        use crossterm::event::{KeyEvent, KeyModifiers};

        let mut view = TickerView::start(slides(10), &AutoScroller::new(Duration::from_secs(60), 350));
        {
            let mut strip = view.strip().lock().unwrap();
            strip.set_client_columns(80);
            strip.scroll_to(700, ScrollBehavior::Instant);
        }

        let home = Event::Key(KeyEvent::new(KeyCode::Home, KeyModifiers::NONE));
        assert_eq!(view.handle_event(&home), None);

        let strip = view.strip().lock().unwrap();
        assert_eq!(strip.scroll_left(), 0);
        assert!(strip.is_settled());
    }

    #[tokio::test]
    async fn test_render_visible_cards() {
        let view = TickerView::start(slides(5), &AutoScroller::new(Duration::from_secs(60), 350));
        {
            let mut strip = view.strip().lock().unwrap();
            strip.set_client_columns(78);
            strip.scroll_to(350, ScrollBehavior::Instant);
        }

        let mut terminal = Terminal::new(TestBackend::new(80, 10)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                view.render(f, area);
            })
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();

        assert!(!text.contains("Card 0"));
        assert!(text.contains("Card 1"));
        assert!(text.contains("Card 2"));
    }
}
