use super::error::{Result, SplitError};
use super::input::decode_latin1;
use super::types::{GameRecord, TagLines};
use log::warn;
use std::io::{BufRead, ErrorKind};

/// What to do with a game cut off by the end of the input (no blank line
/// after its movetext).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum UnterminatedRecord {
    /// Discard it; this is what existing split archives were produced with.
    #[default]
    Drop,
    /// Return it with whatever tags and movetext were read.
    Keep,
}

/// Splits a PGN stream into [`GameRecord`]s, one game per call.
///
/// A game is a run of lines starting with `[`, one separator line (normally
/// blank, always discarded), then movetext lines up to the next blank line.
/// Movetext lines are trimmed and joined with single spaces.
pub struct RecordReader<R> {
    input: R,
    line_buffer: Vec<u8>,
    line_number: usize,
    unterminated: UnterminatedRecord,
    exhausted: bool,
    skip_lf: bool,
}

impl<R: BufRead> RecordReader<R> {
    pub fn new(input: R) -> Self {
        Self::with_policy(input, UnterminatedRecord::default())
    }

    pub fn with_policy(input: R, unterminated: UnterminatedRecord) -> Self {
        Self {
            input,
            line_buffer: Vec::with_capacity(256),
            line_number: 0,
            unterminated,
            exhausted: false,
            skip_lf: false,
        }
    }

    /// Reads the next game, or `None` once the input is exhausted.
    pub fn next_record(&mut self) -> Result<Option<GameRecord>> {
        if self.exhausted {
            return Ok(None);
        }

        let mut tags = TagLines::new();
        let mut started = false;

        loop {
            let Some(line) = self.read_line()? else {
                return Ok(self.finish(started, tags, String::new()));
            };

            if line.starts_with('[') {
                tags.push(line.trim().to_string());
                started = true;
                continue;
            }

            let separator = line.trim();
            if !started && separator.is_empty() {
                // Extra blank lines between games.
                continue;
            }
            if !separator.is_empty() {
                warn!(
                    "line {}: discarding non-blank line after tag section: '{}'",
                    self.line_number, separator
                );
            }
            started = true;
            break;
        }

        let mut movetext = String::new();
        loop {
            let Some(line) = self.read_line()? else {
                return Ok(self.finish(started, tags, movetext));
            };

            let line = line.trim();
            if line.is_empty() {
                break;
            }
            if !movetext.is_empty() {
                movetext.push(' ');
            }
            movetext.push_str(line);
        }

        Ok(Some(GameRecord::new(tags, movetext)))
    }

    /// Handles end of input; `started` is whether any part of a game was read.
    fn finish(&mut self, started: bool, tags: TagLines, movetext: String) -> Option<GameRecord> {
        self.exhausted = true;
        if !started {
            return None;
        }

        match self.unterminated {
            UnterminatedRecord::Drop => {
                warn!(
                    "input ended inside a game at line {}; dropping it ({} tag lines)",
                    self.line_number,
                    tags.len()
                );
                None
            }
            UnterminatedRecord::Keep => Some(GameRecord::new(tags, movetext)),
        }
    }

    /// Next line without its terminator, or `None` at end of input. `\n`,
    /// `\r\n` and a lone `\r` all end a line.
    fn read_line(&mut self) -> Result<Option<String>> {
        self.line_buffer.clear();

        if self.skip_lf {
            self.skip_lf = false;
            if fill_buf(&mut self.input)?.first() == Some(&b'\n') {
                self.input.consume(1);
            }
        }

        let mut read_any = false;
        loop {
            let available = fill_buf(&mut self.input)?;
            if available.is_empty() {
                break;
            }

            let (used, done) = match available.iter().position(|&b| b == b'\n' || b == b'\r') {
                Some(end) => {
                    self.line_buffer.extend_from_slice(&available[..end]);
                    // "\r\n" may straddle two buffer fills.
                    self.skip_lf = available[end] == b'\r';
                    (end + 1, true)
                }
                None => {
                    self.line_buffer.extend_from_slice(available);
                    (available.len(), false)
                }
            };
            self.input.consume(used);
            read_any = true;
            if done {
                break;
            }
        }

        if !read_any {
            return Ok(None);
        }
        self.line_number += 1;
        Ok(Some(decode_latin1(&self.line_buffer)))
    }
}

fn fill_buf<R: BufRead>(input: &mut R) -> Result<&[u8]> {
    loop {
        match input.fill_buf() {
            Ok(_) => break,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(SplitError::Read(e)),
        }
    }
    input.fill_buf().map_err(SplitError::Read)
}

impl<R: BufRead> Iterator for RecordReader<R> {
    type Item = Result<GameRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => None,
            Err(e) => {
                self.exhausted = true;
                Some(Err(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, BufReader, Cursor, Read};

    fn read_all(pgn: &str, policy: UnterminatedRecord) -> Vec<GameRecord> {
        RecordReader::with_policy(Cursor::new(pgn.as_bytes()), policy)
            .collect::<Result<Vec<_>>>()
            .unwrap()
    }

    #[test]
    fn test_reads_single_line_movetext() {
        let pgn = "[Event \"A\"]\n[Site \"chess.com INT\"]\n\n1. e4 e5 1-0\n\n";
        let games = read_all(pgn, UnterminatedRecord::Drop);

        assert_eq!(games.len(), 1);
        assert_eq!(games[0].tags.len(), 2);
        assert_eq!(games[0].tags[1], "[Site \"chess.com INT\"]");
        assert_eq!(games[0].movetext, "1. e4 e5 1-0");
    }

    #[test]
    fn test_flattens_multi_line_movetext() {
        let pgn = "[Site \"Budapest\"]\n\n1. d4\n d5  \n2. c4 *\n\n";
        let games = read_all(pgn, UnterminatedRecord::Drop);

        assert_eq!(games.len(), 1);
        assert_eq!(games[0].movetext, "1. d4 d5 2. c4 *");
    }

    #[test]
    fn test_reads_consecutive_games_in_order() {
        let pgn = "[Event \"A\"]\n\n1. e4 e5\n\n[Event \"B\"]\n\n1. d4 d5\n\n[Event \"C\"]\n\n1. c4\n\n";
        let games = read_all(pgn, UnterminatedRecord::Drop);

        let events: Vec<&str> = games.iter().map(|g| g.tags[0].as_str()).collect();
        assert_eq!(events, ["[Event \"A\"]", "[Event \"B\"]", "[Event \"C\"]"]);
    }

    #[test]
    fn test_tag_lines_are_trimmed_and_keep_duplicates() {
        let pgn = "[Event \"A\"]   \r\n[Event \"A\"]\r\n\r\n1. e4\r\n\r\n";
        let games = read_all(pgn, UnterminatedRecord::Drop);

        assert_eq!(games[0].tags.as_slice(), ["[Event \"A\"]", "[Event \"A\"]"]);
        assert_eq!(games[0].movetext, "1. e4");
    }

    #[test]
    fn test_carriage_return_only_line_endings() {
        let pgn = "[Event \"A\"]\r[Site \"chess.com INT\"]\r\r1. e4 e5\r\r[Event \"B\"]\r\r1. d4\r\r";
        let games = read_all(pgn, UnterminatedRecord::Drop);

        assert_eq!(games.len(), 2);
        assert_eq!(
            games[0].to_text(),
            "[Event \"A\"]\n[Site \"chess.com INT\"]\n1. e4 e5"
        );
        assert_eq!(games[1].to_text(), "[Event \"B\"]\n1. d4");
    }

    #[test]
    fn test_crlf_split_across_buffer_fills() {
        let pgn: &[u8] = b"[Event \"A\"]\r\n\r\n1. e4\r\ne5\r\n\r\n[Event \"B\"]\r\n\r\n1. d4\r\n\r\n";
        let games: Vec<GameRecord> = RecordReader::new(BufReader::with_capacity(1, pgn))
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(games.len(), 2);
        assert_eq!(games[0].movetext, "1. e4 e5");
        assert_eq!(games[1].movetext, "1. d4");
    }

    #[test]
    fn test_mixed_line_endings() {
        let pgn = "[Event \"A\"]\r\n[Site \"x\"]\n\r1. e4\re5\n\r\n";
        let games = read_all(pgn, UnterminatedRecord::Drop);

        assert_eq!(games.len(), 1);
        assert_eq!(games[0].tags.len(), 2);
        assert_eq!(games[0].movetext, "1. e4 e5");
    }

    #[test]
    fn test_empty_input_has_no_games() {
        assert!(read_all("", UnterminatedRecord::Drop).is_empty());
        assert!(read_all("\n\n", UnterminatedRecord::Keep).is_empty());
    }

    #[test]
    fn test_blank_lines_between_games_are_skipped() {
        let pgn = "[Event \"A\"]\n\n1. e4\n\n\n\n[Event \"B\"]\n\n1. d4\n\n";
        let games = read_all(pgn, UnterminatedRecord::Drop);

        assert_eq!(games.len(), 2);
        assert_eq!(games[1].tags[0], "[Event \"B\"]");
        assert_eq!(games[1].movetext, "1. d4");
    }

    #[test]
    fn test_unterminated_final_game_is_dropped_by_default() {
        let pgn = "[Event \"A\"]\n\n1. e4 e5\n\n[Event \"B\"]\n\n1. d4 d5";
        let games = read_all(pgn, UnterminatedRecord::Drop);

        assert_eq!(games.len(), 1);
        assert_eq!(games[0].tags[0], "[Event \"A\"]");
    }

    #[test]
    fn test_unterminated_final_game_is_kept_on_request() {
        let pgn = "[Event \"A\"]\n\n1. e4 e5\n\n[Event \"B\"]\n\n1. d4\nd5\n";
        let games = read_all(pgn, UnterminatedRecord::Keep);

        assert_eq!(games.len(), 2);
        assert_eq!(games[1].tags[0], "[Event \"B\"]");
        assert_eq!(games[1].movetext, "1. d4 d5");
    }

    #[test]
    fn test_game_cut_off_inside_tags() {
        let pgn = "[Event \"A\"]\n[Site \"x\"]\n";

        assert!(read_all(pgn, UnterminatedRecord::Drop).is_empty());

        let kept = read_all(pgn, UnterminatedRecord::Keep);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].tags.len(), 2);
        assert_eq!(kept[0].movetext, "");
    }

    #[test]
    fn test_empty_movetext_section() {
        let pgn = "[Event \"A\"]\n\n\n[Event \"B\"]\n\n1. e4\n\n";
        let games = read_all(pgn, UnterminatedRecord::Drop);

        assert_eq!(games.len(), 2);
        assert_eq!(games[0].movetext, "");
        assert_eq!(games[1].movetext, "1. e4");
    }

    #[test]
    fn test_non_blank_separator_line_is_discarded() {
        let pgn = "[Event \"A\"]\n1. e4 e5\n2. Nf3\n\n";
        let games = read_all(pgn, UnterminatedRecord::Drop);

        assert_eq!(games.len(), 1);
        assert_eq!(games[0].movetext, "2. Nf3");
    }

    #[test]
    fn test_indented_tag_line_is_not_a_tag() {
        let pgn = "[Event \"A\"]\n  [Site \"x\"]\n1. e4\n\n";
        let games = read_all(pgn, UnterminatedRecord::Drop);

        assert_eq!(games[0].tags.as_slice(), ["[Event \"A\"]"]);
        assert_eq!(games[0].movetext, "1. e4");
    }

    #[test]
    fn test_latin1_bytes_are_decoded() {
        let bytes: &[u8] = b"[White \"R\xe9ti, Richard\"]\n\n1. Nf3\n\n";
        let games: Vec<GameRecord> = RecordReader::new(BufReader::new(bytes))
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(games[0].tags[0], "[White \"Réti, Richard\"]");
    }

    #[test]
    fn test_next_record_after_end_stays_none() {
        let mut reader = RecordReader::new(Cursor::new(b"[Event \"A\"]\n\n1. e4\n\n".to_vec()));

        assert!(reader.next_record().unwrap().is_some());
        assert!(reader.next_record().unwrap().is_none());
        assert!(reader.next_record().unwrap().is_none());
    }

    struct FailingRead;

    impl Read for FailingRead {
        fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("device error"))
        }
    }

    #[test]
    fn test_read_error_is_reported_once() {
        let mut reader = RecordReader::new(BufReader::new(FailingRead));

        let first = reader.next().expect("error item");
        assert!(matches!(first, Err(SplitError::Read(_))));
        assert!(reader.next().is_none());
    }
}
