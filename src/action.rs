#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Tick,

    // Carousel navigation
    NextSlide,
    PrevSlide,
    SelectSlide(usize),
    TogglePause,
}
