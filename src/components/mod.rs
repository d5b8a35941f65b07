pub mod carousel;
pub mod ticker;

use crossterm::event::Event;
use ratatui::{layout::Rect, Frame};

use crate::action::Action;

pub use carousel::{CarouselNavigator, CarouselView};
pub use ticker::{TickerStrip, TickerView};

pub trait Component {
    fn handle_event(&mut self, event: &Event) -> Option<Action>;

    fn update(&mut self, action: &Action);

    fn render(&self, frame: &mut Frame, area: Rect);
}
