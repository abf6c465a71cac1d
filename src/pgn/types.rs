use smallvec::SmallVec;

/// Tag lines of one game. Most archives carry 7-20 tags per game.
pub type TagLines = SmallVec<[String; 16]>;

/// One game as read from the input: its tag lines, trimmed and in input
/// order, followed by the movetext flattened onto a single line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameRecord {
    pub tags: TagLines,
    pub movetext: String,
}

impl GameRecord {
    pub fn new(tags: TagLines, movetext: String) -> Self {
        Self { tags, movetext }
    }

    /// Lines of the record as written out: every tag line, then the movetext
    /// line (present even when empty).
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.tags
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(self.movetext.as_str()))
    }

    pub fn to_text(&self) -> String {
        self.lines().collect::<Vec<_>>().join("\n")
    }
}

/// Which output file a game goes to.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Category {
    Internet,
    Otb,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Internet, Category::Otb];

    pub fn file_name(self) -> &'static str {
        match self {
            Category::Internet => "internet.pgn",
            Category::Otb => "otb.pgn",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Internet => "internet",
            Category::Otb => "otb",
        }
    }
}
