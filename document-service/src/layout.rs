// Page content as positioned primitives, independent of the PDF backend

/// A4 portrait, in millimetres
pub const PAGE_WIDTH_MM: f32 = 210.0;
pub const PAGE_HEIGHT_MM: f32 = 297.0;

/// RGB colour, 0-255 per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const GREEN: Rgb = Rgb(34, 197, 94);
    pub const GREY: Rgb = Rgb(120, 120, 120);
    pub const LIGHT_GREY: Rgb = Rgb(200, 200, 200);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Weight {
    Regular,
    Bold,
}

/// One drawing instruction; coordinates are millimetres from the top-left corner
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Text {
        text: String,
        size: f32,
        x: f32,
        y: f32,
        weight: Weight,
        color: Rgb,
    },
    Rule {
        x1: f32,
        x2: f32,
        y: f32,
        thickness: f32,
    },
    Frame {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Rgb,
    },
}

/// A single-page document
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub title: String,
    pub elements: Vec<Element>,
}

impl Layout {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            elements: Vec::new(),
        }
    }

    pub fn text(&mut self, text: impl Into<String>, size: f32, x: f32, y: f32) -> &mut Self {
        self.styled_text(text, size, x, y, Weight::Regular, Rgb::BLACK)
    }

    pub fn bold(&mut self, text: impl Into<String>, size: f32, x: f32, y: f32) -> &mut Self {
        self.styled_text(text, size, x, y, Weight::Bold, Rgb::BLACK)
    }

    pub fn styled_text(
        &mut self,
        text: impl Into<String>,
        size: f32,
        x: f32,
        y: f32,
        weight: Weight,
        color: Rgb,
    ) -> &mut Self {
        self.elements.push(Element::Text {
            text: text.into(),
            size,
            x,
            y,
            weight,
            color,
        });
        self
    }

    pub fn rule(&mut self, x1: f32, x2: f32, y: f32, thickness: f32) -> &mut Self {
        self.elements.push(Element::Rule { x1, x2, y, thickness });
        self
    }

    pub fn frame(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgb) -> &mut Self {
        self.elements.push(Element::Frame {
            x,
            y,
            width,
            height,
            color,
        });
        self
    }

    /// Every text run, top to bottom in insertion order
    pub fn lines(&self) -> Vec<&str> {
        self.elements
            .iter()
            .filter_map(|e| match e {
                Element::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines().iter().any(|line| line.contains(needle))
    }
}

/// Break `text` into lines of at most `width` characters on word boundaries
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_text() {
        assert_eq!(
            wrap_text("Take one tablet after meals twice daily", 16),
            vec!["Take one tablet", "after meals", "twice daily"]
        );
        assert!(wrap_text("   ", 10).is_empty());
        assert_eq!(wrap_text("supercalifragilistic", 5), vec!["supercalifragilistic"]);
    }
}
