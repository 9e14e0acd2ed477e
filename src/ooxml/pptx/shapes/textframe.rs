/// Text frames, paragraphs, runs and character formatting.
use crate::common::style::{Color, Length};

/// Horizontal paragraph alignment (`a:pPr/@algn`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Alignment {
    Left,
    Center,
    Right,
    Justify,
    Distributed,
}

impl Alignment {
    pub fn as_xml_val(self) -> &'static str {
        match self {
            Alignment::Left => "l",
            Alignment::Center => "ctr",
            Alignment::Right => "r",
            Alignment::Justify => "just",
            Alignment::Distributed => "dist",
        }
    }

    pub fn from_xml_val(val: &str) -> Option<Self> {
        match val {
            "l" => Some(Alignment::Left),
            "ctr" => Some(Alignment::Center),
            "r" => Some(Alignment::Right),
            "just" => Some(Alignment::Justify),
            "dist" => Some(Alignment::Distributed),
            _ => None,
        }
    }
}

/// Character formatting of a run (`a:rPr`). `None` inherits from the
/// table or theme style.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Font {
    pub size: Option<Length>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub color: Option<Color>,
    pub name: Option<String>,
}

impl Font {
    /// Whether every property is inherited.
    pub fn is_inherited(&self) -> bool {
        *self == Font::default()
    }
}

/// A run of text sharing one character format (`a:r`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Run {
    pub text: String,
    pub font: Font,
}

impl Run {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            font: Font::default(),
        }
    }
}

/// A paragraph (`a:p`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Paragraph {
    pub runs: Vec<Run>,
    pub alignment: Option<Alignment>,
}

impl Paragraph {
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    pub fn add_run(&mut self, text: impl Into<String>) -> &mut Run {
        self.runs.push(Run::new(text));
        let last = self.runs.len() - 1;
        &mut self.runs[last]
    }
}

/// The text body of a shape or table cell (`a:txBody`).
///
/// A text frame always holds at least one paragraph.
///
/// ```rust
/// use deckframe::ooxml::pptx::TextFrame;
///
/// let mut tf = TextFrame::new();
/// tf.set_text("North\nSouth");
/// assert_eq!(tf.paragraphs().len(), 2);
/// assert_eq!(tf.text(), "North\nSouth");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TextFrame {
    paragraphs: Vec<Paragraph>,
}

impl Default for TextFrame {
    fn default() -> Self {
        Self::new()
    }
}

impl TextFrame {
    pub fn new() -> Self {
        Self {
            paragraphs: vec![Paragraph::default()],
        }
    }

    pub(crate) fn from_paragraphs(paragraphs: Vec<Paragraph>) -> Self {
        if paragraphs.is_empty() {
            return Self::new();
        }
        Self { paragraphs }
    }

    #[inline]
    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    #[inline]
    pub fn paragraphs_mut(&mut self) -> &mut [Paragraph] {
        &mut self.paragraphs
    }

    /// Paragraph texts joined with line feeds.
    pub fn text(&self) -> String {
        self.paragraphs
            .iter()
            .map(Paragraph::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Replace all content with `text`, one paragraph per line and one
    /// unformatted run per paragraph.
    pub fn set_text(&mut self, text: &str) {
        self.paragraphs = text
            .split('\n')
            .map(|line| Paragraph {
                runs: vec![Run::new(line)],
                alignment: None,
            })
            .collect();
    }

    /// The first paragraph.
    pub fn first_paragraph_mut(&mut self) -> &mut Paragraph {
        if self.paragraphs.is_empty() {
            self.paragraphs.push(Paragraph::default());
        }
        &mut self.paragraphs[0]
    }

    /// The first run of the first paragraph, added when missing.
    pub fn first_run_mut(&mut self) -> &mut Run {
        let paragraph = self.first_paragraph_mut();
        if paragraph.runs.is_empty() {
            paragraph.runs.push(Run::default());
        }
        &mut paragraph.runs[0]
    }
}
