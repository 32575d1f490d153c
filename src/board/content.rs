//! Song list parsing and content rendering 🎤

use serde::Serialize;

use crate::surface::{Content, Element, StyleProp, Surface};

/// Lines starting with this are shown without a number.
pub const SPECIAL_MARKER: &str = "//";

/// Break opportunity inserted between characters.
pub const ZERO_WIDTH_SPACE: char = '\u{200B}';

/// One rendered row of the sung list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SongEntry {
    /// `None` for special-format lines
    pub number: Option<usize>,
    /// Normalized text (break opportunities inserted)
    pub text: String,
    pub special: bool,
}

impl SongEntry {
    /// Text with the break opportunities removed again.
    pub fn plain_text(&self) -> String {
        self.text.chars().filter(|c| *c != ZERO_WIDTH_SPACE).collect()
    }
}

/// Insert a zero-width break opportunity between every character so that
/// long CJK / run-on titles can wrap anywhere.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len() * 4);
    for (i, c) in text.chars().enumerate() {
        if i > 0 {
            out.push(ZERO_WIDTH_SPACE);
        }
        out.push(c);
    }
    out
}

/// Split the shared sung-songs blob into entries.
///
/// Blank lines are dropped. Numbering counts ordinary lines only, starting at 1.
pub fn parse_sung_songs(text: &str) -> Vec<SongEntry> {
    let mut counter = 1;
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            if let Some(rest) = line.strip_prefix(SPECIAL_MARKER) {
                SongEntry {
                    number: None,
                    text: normalize(rest.trim()),
                    special: true,
                }
            } else {
                let entry = SongEntry {
                    number: Some(counter),
                    text: normalize(line.trim()),
                    special: false,
                };
                counter += 1;
                entry
            }
        })
        .collect()
}

/// The current song, or `None` when nothing is playing.
pub fn parse_current_song(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(normalize(trimmed))
    }
}

/// Rebuild the sung list on the surface. Returns the entry count.
pub fn render_song_list<S: Surface>(surface: &mut S, text: &str) -> usize {
    let entries = parse_sung_songs(text);
    let count = entries.len();
    surface.set_content(Element::SungList, Content::Entries(entries));
    count
}

/// Show/hide the current song slot and the now-playing indicator.
pub fn render_current_song<S: Surface>(surface: &mut S, text: &str) -> bool {
    let current = parse_current_song(text);
    let playing = current.is_some();

    surface.set_content(Element::CurrentSong, Content::CurrentSong(current));
    surface.set_style(Element::CurrentSong, &[StyleProp::Display(playing)]);
    // Indicator is optional, surfaces without one ignore this
    surface.set_style(Element::NowPlayingIndicator, &[StyleProp::Visible(playing)]);

    tracing::debug!(playing, "current song rendered");
    playing
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(entries: &[SongEntry]) -> Vec<Option<usize>> {
        entries.iter().map(|e| e.number).collect()
    }

    #[test]
    fn test_normalize_inserts_breaks_between_chars() {
        assert_eq!(normalize("abc"), "a\u{200B}b\u{200B}c");
        assert_eq!(normalize("歌"), "歌");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_special_lines_skip_numbering() {
        let entries = parse_sung_songs("Song A\nSong B\n//Intermission\nSong C");
        assert_eq!(numbers(&entries), vec![Some(1), Some(2), None, Some(3)]);
        assert!(entries[2].special);
        assert_eq!(entries[2].plain_text(), "Intermission");
        assert_eq!(entries[3].plain_text(), "Song C");
    }

    #[test]
    fn test_blank_lines_are_filtered() {
        let entries = parse_sung_songs("\n  \nOne\r\n\n//  Break  \n\t\nTwo\n");
        assert_eq!(entries.len(), 3);
        assert_eq!(numbers(&entries), vec![Some(1), None, Some(2)]);
        assert_eq!(entries[1].plain_text(), "Break");
    }

    #[test]
    fn test_numbering_property() {
        // k non-blank lines, m special => 1..(k-m) in order
        let text = "//a\nb\n\nc\n//d\n//e\nf\ng";
        let entries = parse_sung_songs(text);
        let assigned: Vec<usize> = entries.iter().filter_map(|e| e.number).collect();
        let specials = entries.iter().filter(|e| e.special).count();
        assert_eq!(entries.len(), 7);
        assert_eq!(specials, 3);
        assert_eq!(assigned, (1..=4).collect::<Vec<_>>());
    }

    #[test]
    fn test_marker_must_be_a_prefix() {
        let entries = parse_sung_songs(" //indented");
        // Leading whitespace means it's not the marker
        assert_eq!(entries[0].number, Some(1));
    }

    #[test]
    fn test_current_song_whitespace_is_empty() {
        assert_eq!(parse_current_song("   "), None);
        assert_eq!(parse_current_song(" X "), Some("X".to_string()));
    }
}
