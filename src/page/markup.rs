//! HTML serialization of the page model.
//!
//! Review text, author, date and reply are trusted feed content and are
//! written verbatim. Attribute values and notice text are escaped.

use std::fmt::Write;

use super::{Document, Element, MountKind, MountPoint, Node};
use crate::carousel::{Indicator, Notice, Slide};

const STAR_GLYPHS: usize = 5;

/// Escape `&`, `<`, `>` and `"`.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn indicator_html(indicator: &Indicator) -> String {
    let class = if indicator.active { r#" class="active""# } else { "" };
    format!(
        r#"<li data-target="{}" data-slide-to="{}"{}></li>"#,
        escape(&indicator.target),
        indicator.slide_to,
        class
    )
}

pub fn slide_html(slide: &Slide) -> String {
    let mut html = String::new();
    let class = if slide.active { "carousel-item active" } else { "carousel-item" };
    let _ = writeln!(html, r#"<div class="{}">"#, class);
    html.push_str("  <div class=\"testimonial-card\">\n");
    html.push_str("    <div class=\"mb-2\">\n");
    for _ in 0..STAR_GLYPHS {
        html.push_str("      <span class=\"fa fa-star text-warning\"></span>\n");
    }
    let _ = writeln!(html, r#"      <strong class="ml-2">{}</strong>"#, slide.rating_text());
    html.push_str("    </div>\n");
    let _ = writeln!(html, r#"    <p class="testimonial-quote mt-3">{}</p>"#, slide.quote);
    let _ = writeln!(html, r#"    <strong class="testimonial-author">{}</strong>"#, slide.author);
    let _ = writeln!(html, r#"    <span class="testimonial-date">{}</span>"#, slide.date);
    if let Some(reply) = &slide.reply {
        html.push_str("    <div class=\"testimonial-reply\">\n");
        html.push_str("      <strong>Response from the owner</strong>\n");
        let _ = writeln!(html, "      <p>{}</p>", reply);
        html.push_str("    </div>\n");
    }
    html.push_str("  </div>\n");
    html.push_str("</div>");
    html
}

pub fn notice_html(notice: &Notice) -> String {
    format!(
        r#"<div class="text-danger text-center p-5">{}</div>"#,
        escape(&notice.text())
    )
}

pub fn node_html(node: &Node) -> String {
    match node {
        Node::Placeholder(text) => format!(r#"<p class="text-center p-5">{}</p>"#, escape(text)),
        Node::Indicator(indicator) => indicator_html(indicator),
        Node::Slide(slide) => slide_html(slide),
        Node::Notice(notice) => notice_html(notice),
    }
}

fn open_tag(tag: &str, id: &str, class: &str, extra: &[(&String, &String)]) -> String {
    let mut out = format!(r#"<{} id="{}""#, tag, escape(id));
    if !class.is_empty() {
        let _ = write!(out, r#" class="{}""#, escape(class));
    }
    for (name, value) in extra {
        let _ = write!(out, r#" {}="{}""#, name, escape(value));
    }
    out.push('>');
    out
}

fn indent(block: &str, depth: usize) -> String {
    let pad = "  ".repeat(depth);
    block
        .lines()
        .map(|line| format!("{}{}\n", pad, line))
        .collect()
}

pub fn mount_html(mount: &MountPoint) -> String {
    let tag = match mount.kind {
        MountKind::List => "ol",
        MountKind::Block => "div",
    };
    let mut html = open_tag(tag, &mount.id, &mount.class, &[]);
    html.push('\n');
    for node in &mount.nodes {
        html.push_str(&indent(&node_html(node), 1));
    }
    let _ = write!(html, "</{}>", tag);
    html
}

fn controls_html(root: &Element) -> String {
    let target = escape(&root.id);
    format!(
        concat!(
            "<a class=\"carousel-control-prev\" href=\"#{0}\" role=\"button\" data-slide=\"prev\">\n",
            "  <span class=\"carousel-control-prev-icon\" aria-hidden=\"true\"></span>\n",
            "  <span class=\"sr-only\">Previous</span>\n",
            "</a>\n",
            "<a class=\"carousel-control-next\" href=\"#{0}\" role=\"button\" data-slide=\"next\">\n",
            "  <span class=\"carousel-control-next-icon\" aria-hidden=\"true\"></span>\n",
            "  <span class=\"sr-only\">Next</span>\n",
            "</a>"
        ),
        target
    )
}

impl Document {
    /// The carousel markup without the surrounding page.
    pub fn body_html(&self) -> String {
        let mounts: String = self
            .mounts()
            .iter()
            .map(|m| format!("{}\n", mount_html(m)))
            .collect();

        match self.root() {
            Some(root) => {
                let attrs: Vec<_> = root.attrs.iter().collect();
                let mut html = open_tag("div", &root.id, &root.class, &attrs);
                html.push('\n');
                html.push_str(&indent(&mounts, 1));
                html.push_str(&indent(&controls_html(root), 1));
                html.push_str("</div>\n");
                html
            }
            None => mounts,
        }
    }

    pub fn to_html(&self) -> String {
        let mut html = String::from("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        html.push_str("  <meta charset=\"utf-8\">\n");
        let _ = writeln!(html, "  <title>{}</title>", escape(self.title()));
        html.push_str("</head>\n<body>\n");
        html.push_str(&indent(&self.body_html(), 1));
        html.push_str("</body>\n</html>\n");
        html
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carousel::render::render;
    use crate::carousel::{CarouselIds, MarkupNavigator};
    use crate::review::ReviewRecord;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    fn slide(reply: Option<&str>) -> Slide {
        Slide {
            index: 0,
            active: true,
            rating: "4.0".to_string(),
            quote: "Great <em>service</em>".to_string(),
            author: "Dana".to_string(),
            date: "June 2024".to_string(),
            reply: reply.map(str::to_string),
        }
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape(r#"a<b>&"c""#), "a&lt;b&gt;&amp;&quot;c&quot;");
    }

    #[test]
    fn test_indicator_html() {
        let mut indicator = Indicator::new("reviewCarousel", 0);
        assert_eq!(
            indicator_html(&indicator),
            r##"<li data-target="#reviewCarousel" data-slide-to="0" class="active"></li>"##
        );
        indicator.active = false;
        assert_eq!(
            indicator_html(&indicator),
            r##"<li data-target="#reviewCarousel" data-slide-to="0"></li>"##
        );
    }

    #[test]
    fn test_slide_html_without_reply() {
        let expected = "\
<div class=\"carousel-item active\">
  <div class=\"testimonial-card\">
    <div class=\"mb-2\">
      <span class=\"fa fa-star text-warning\"></span>
      <span class=\"fa fa-star text-warning\"></span>
      <span class=\"fa fa-star text-warning\"></span>
      <span class=\"fa fa-star text-warning\"></span>
      <span class=\"fa fa-star text-warning\"></span>
      <strong class=\"ml-2\">4.0 stars</strong>
    </div>
    <p class=\"testimonial-quote mt-3\">Great <em>service</em></p>
    <strong class=\"testimonial-author\">Dana</strong>
    <span class=\"testimonial-date\">June 2024</span>
  </div>
</div>";
        assert_eq!(slide_html(&slide(None)), expected);
    }

    #[test]
    fn test_slide_html_with_reply() {
        let html = slide_html(&slide(Some("Thanks Dana!")));
        assert_eq!(html.matches("testimonial-reply").count(), 1);
        assert!(html.contains("<p>Thanks Dana!</p>"));
    }

    #[test]
    fn test_notice_html_escapes_path() {
        let notice = Notice::load_failure(Some("a<b>.json".to_string()));
        assert_eq!(
            notice_html(&notice),
            r#"<div class="text-danger text-center p-5">Could not load testimonials. Please check the a&lt;b&gt;.json path.</div>"#
        );
    }

    #[test]
    fn test_rendered_page() {
        let ids = CarouselIds::default();
        let mut doc = Document::carousel_page("Reviews", &ids);
        let records = vec![
            ReviewRecord {
                text: "One".into(),
                stars: Some(5.0),
                ..Default::default()
            },
            ReviewRecord {
                text: "Two".into(),
                stars: Some(4.0),
                ..Default::default()
            },
        ];
        let mut nav = MarkupNavigator::new(Duration::from_millis(5000));
        render(&records, &mut doc, &ids, &mut nav).unwrap();

        let html = doc.to_html();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(
            r#"<div id="reviewCarousel" class="carousel slide" data-interval="5000" data-ride="carousel">"#
        ));
        assert!(html.contains(r#"<ol id="carouselIndicators" class="carousel-indicators">"#));
        assert_eq!(html.matches("data-slide-to=").count(), 2);
        assert_eq!(html.matches(r#"class="carousel-item"#).count(), 2);
        assert_eq!(html.matches("carousel-item active").count(), 1);
        assert!(html.find("One").unwrap() < html.find("Two").unwrap());
        assert!(!html.contains("Loading testimonials"));
    }
}
