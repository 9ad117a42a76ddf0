//! Highlight targets handed back to the shell after a mutation

/// Line(s) the presentation layer should mark, 1-based
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Highlight {
    #[default]
    None,
    Line(usize),
    Lines(Vec<usize>),
}

impl Highlight {
    /// The single highlighted line, if exactly one is marked
    pub fn line(&self) -> Option<usize> {
        match self {
            Highlight::Line(n) => Some(*n),
            _ => None,
        }
    }

    /// First marked line; a delete acts on this one
    pub fn first(&self) -> Option<usize> {
        match self {
            Highlight::None => None,
            Highlight::Line(n) => Some(*n),
            Highlight::Lines(lines) => lines.first().copied(),
        }
    }

    pub fn contains(&self, line_number: usize) -> bool {
        match self {
            Highlight::None => false,
            Highlight::Line(n) => *n == line_number,
            Highlight::Lines(lines) => lines.contains(&line_number),
        }
    }

    pub fn is_none(&self) -> bool {
        match self {
            Highlight::None => true,
            Highlight::Line(_) => false,
            Highlight::Lines(lines) => lines.is_empty(),
        }
    }
}

impl From<Option<usize>> for Highlight {
    fn from(line: Option<usize>) -> Self {
        line.map_or(Highlight::None, Highlight::Line)
    }
}
