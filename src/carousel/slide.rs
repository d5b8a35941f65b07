use crate::review::ReviewRecord;

/// Navigation control selecting one slide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Indicator {
    /// Selector of the carousel this indicator drives, e.g. `#reviewCarousel`
    pub target: String,
    pub slide_to: usize,
    pub active: bool,
}

impl Indicator {
    pub fn new(root_id: &str, slide_to: usize) -> Self {
        Self {
            target: format!("#{}", root_id),
            slide_to,
            active: slide_to == 0,
        }
    }
}

/// One rendered review card.
#[derive(Debug, Clone, PartialEq)]
pub struct Slide {
    pub index: usize,
    pub active: bool,
    /// Rating with one decimal place, e.g. "4.0"
    pub rating: String,
    pub quote: String,
    pub author: String,
    pub date: String,
    pub reply: Option<String>,
}

impl Slide {
    pub fn from_record(index: usize, record: &ReviewRecord) -> Self {
        if record.stars.is_none() {
            tracing::warn!("Review {} has no usable star rating, showing 0.0", index);
        }
        Self {
            index,
            active: index == 0,
            rating: record.rating_label(),
            quote: record.text.clone(),
            author: record.author.clone(),
            date: record.date.clone(),
            reply: record.reply().map(str::to_string),
        }
    }

    pub fn rating_text(&self) -> String {
        format!("{} stars", self.rating)
    }
}

/// User-visible failure message shown in place of the slides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    /// Resource that could not be loaded, when known
    pub path: Option<String>,
}

impl Notice {
    pub fn load_failure(path: Option<String>) -> Self {
        Self {
            message: "Could not load testimonials.".to_string(),
            path,
        }
    }

    pub fn text(&self) -> String {
        match &self.path {
            Some(path) => format!("{} Please check the {} path.", self.message, path),
            None => self.message.clone(),
        }
    }
}

/// Build index-aligned indicators and slides in feed order.
pub fn build_nodes(records: &[ReviewRecord], root_id: &str) -> (Vec<Indicator>, Vec<Slide>) {
    records
        .iter()
        .enumerate()
        .map(|(i, record)| (Indicator::new(root_id, i), Slide::from_record(i, record)))
        .unzip()
}
