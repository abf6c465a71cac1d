use super::types::GameRecord;
use pgn_reader::{RawTag, Reader, SanPlus, Skip, Visitor};
use std::io;
use std::ops::ControlFlow;

/// Collects every `Site` tag value of a game and ignores the movetext.
#[derive(Default)]
pub struct SiteVisitor;

pub type SiteValues = Vec<String>;

impl Visitor for SiteVisitor {
    type Tags = SiteValues;
    type Movetext = SiteValues;
    type Output = SiteValues;

    fn begin_tags(&mut self) -> ControlFlow<Self::Output, Self::Tags> {
        ControlFlow::Continue(SiteValues::new())
    }

    fn tag(
        &mut self,
        sites: &mut Self::Tags,
        key: &[u8],
        value: RawTag<'_>,
    ) -> ControlFlow<Self::Output> {
        if key == b"Site" {
            sites.push(String::from_utf8_lossy(value.as_bytes()).trim().to_string());
        }
        ControlFlow::Continue(())
    }

    fn begin_movetext(&mut self, sites: Self::Tags) -> ControlFlow<Self::Output, Self::Movetext> {
        ControlFlow::Continue(sites)
    }

    fn begin_variation(&mut self, _: &mut Self::Movetext) -> ControlFlow<Self::Output, Skip> {
        ControlFlow::Continue(Skip(true))
    }

    fn san(&mut self, _: &mut Self::Movetext, _: SanPlus) -> ControlFlow<Self::Output> {
        ControlFlow::Continue(())
    }

    fn end_game(&mut self, sites: Self::Movetext) -> Self::Output {
        sites
    }
}

/// `Site` values declared in the record's tag section.
///
/// Only the tag lines are handed to the parser, so odd movetext cannot
/// disturb tag extraction.
pub fn site_values(record: &GameRecord) -> SiteValues {
    if record.tags.is_empty() {
        return SiteValues::new();
    }

    let header = record.tags.join("\n");
    let mut reader = Reader::new(io::Cursor::new(header.as_bytes()));
    let mut visitor = SiteVisitor;

    match reader.read_game(&mut visitor) {
        Ok(Some(sites)) => sites,
        Ok(None) | Err(_) => SiteValues::new(),
    }
}
