use super::sites::SiteAllowlist;
use super::types::{Category, GameRecord};
use super::visitor::site_values;

/// How a game is tested against the site allowlist.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum MatchMode {
    /// Case-insensitive search for an allowlisted `[Site "..."]` tag anywhere
    /// in the game's text, movetext included.
    #[default]
    Text,
    /// Case-insensitive comparison of each parsed `Site` tag value.
    SiteTag,
}

pub fn classify(record: &GameRecord, mode: MatchMode) -> Category {
    classify_with(SiteAllowlist::global(), record, mode)
}

pub fn classify_with(allowlist: &SiteAllowlist, record: &GameRecord, mode: MatchMode) -> Category {
    let internet = match mode {
        MatchMode::Text => allowlist.matches_text(&record.to_text()),
        MatchMode::SiteTag => site_values(record)
            .iter()
            .any(|site| allowlist.contains_site(site)),
    };

    if internet {
        Category::Internet
    } else {
        Category::Otb
    }
}

/// Serialized games per category, in input order.
#[derive(Debug, Default)]
pub struct Buckets {
    internet: Vec<String>,
    otb: Vec<String>,
}

impl Buckets {
    pub fn push(&mut self, category: Category, record: &GameRecord) {
        self.bucket_mut(category).push(record.to_text());
    }

    pub fn games(&self, category: Category) -> &[String] {
        match category {
            Category::Internet => &self.internet,
            Category::Otb => &self.otb,
        }
    }

    fn bucket_mut(&mut self, category: Category) -> &mut Vec<String> {
        match category {
            Category::Internet => &mut self.internet,
            Category::Otb => &mut self.otb,
        }
    }

    pub fn len(&self, category: Category) -> usize {
        self.games(category).len()
    }

    pub fn total(&self) -> usize {
        self.internet.len() + self.otb.len()
    }

    /// Games of one category joined by a blank line, without a trailing
    /// newline.
    pub fn render(&self, category: Category) -> String {
        self.games(category).join("\n\n")
    }
}
