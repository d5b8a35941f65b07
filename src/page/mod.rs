//! In-memory page model: a carousel root element and the mount points the
//! renderer fills. Serializes to HTML via [`markup`].

pub mod markup;

use std::collections::BTreeMap;

use crate::carousel::{CarouselIds, Indicator, Notice, Slide};

/// Content placed inside a mount point
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Static text present before rendering, e.g. a loading message
    Placeholder(String),
    Indicator(Indicator),
    Slide(Slide),
    Notice(Notice),
}

impl Node {
    pub fn as_indicator(&self) -> Option<&Indicator> {
        match self {
            Node::Indicator(i) => Some(i),
            _ => None,
        }
    }

    pub fn as_slide(&self) -> Option<&Slide> {
        match self {
            Node::Slide(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_notice(&self) -> Option<&Notice> {
        match self {
            Node::Notice(n) => Some(n),
            _ => None,
        }
    }
}

/// The element wrapping all mount points, addressed by id. Carries attributes only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub id: String,
    pub class: String,
    pub attrs: BTreeMap<String, String>,
}

impl Element {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            class: String::new(),
            attrs: BTreeMap::new(),
        }
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = class.into();
        self
    }

    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attrs.insert(name.into(), value.into());
    }

    #[cfg(test)]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MountKind {
    /// `<ol>`, children become list items
    List,
    #[default]
    Block,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MountPoint {
    pub id: String,
    pub kind: MountKind,
    pub class: String,
    pub nodes: Vec<Node>,
}

impl MountPoint {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: MountKind::Block,
            class: String::new(),
            nodes: Vec::new(),
        }
    }

    pub fn list(id: impl Into<String>) -> Self {
        Self {
            kind: MountKind::List,
            ..Self::new(id)
        }
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = class.into();
        self
    }

    pub fn indicators(&self) -> impl Iterator<Item = &Indicator> {
        self.nodes.iter().filter_map(Node::as_indicator)
    }

    pub fn slides(&self) -> impl Iterator<Item = &Slide> {
        self.nodes.iter().filter_map(Node::as_slide)
    }

    pub fn notices(&self) -> impl Iterator<Item = &Notice> {
        self.nodes.iter().filter_map(Node::as_notice)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    title: String,
    root: Option<Element>,
    mounts: Vec<MountPoint>,
}

impl Document {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// The standard testimonial page: a carousel root, an empty indicator
    /// list and a content area showing a loading message.
    pub fn carousel_page(title: impl Into<String>, ids: &CarouselIds) -> Self {
        let mut inner = MountPoint::new(&ids.inner).with_class("carousel-inner");
        inner
            .nodes
            .push(Node::Placeholder("Loading testimonials...".to_string()));

        Self::new(title)
            .with_root(Element::new(&ids.root).with_class("carousel slide"))
            .with_mount(MountPoint::list(&ids.indicators).with_class("carousel-indicators"))
            .with_mount(inner)
    }

    pub fn with_root(mut self, root: Element) -> Self {
        self.root = Some(root);
        self
    }

    pub fn with_mount(mut self, mount: MountPoint) -> Self {
        self.mounts.push(mount);
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn root(&self) -> Option<&Element> {
        self.root.as_ref()
    }

    pub fn element(&self, id: &str) -> Option<&Element> {
        self.root.as_ref().filter(|e| e.id == id)
    }

    pub fn element_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.root.as_mut().filter(|e| e.id == id)
    }

    pub fn mounts(&self) -> &[MountPoint] {
        &self.mounts
    }

    pub fn mount(&self, id: &str) -> Option<&MountPoint> {
        self.mounts.iter().find(|m| m.id == id)
    }

    pub fn mount_mut(&mut self, id: &str) -> Option<&mut MountPoint> {
        self.mounts.iter_mut().find(|m| m.id == id)
    }

    pub fn has_mount(&self, id: &str) -> bool {
        self.mount(id).is_some()
    }

    /// Swap the contents of a mount point. Returns false if it does not exist.
    pub fn replace_nodes(&mut self, id: &str, nodes: Vec<Node>) -> bool {
        match self.mount_mut(id) {
            Some(mount) => {
                mount.nodes = nodes;
                true
            }
            None => false,
        }
    }
}
