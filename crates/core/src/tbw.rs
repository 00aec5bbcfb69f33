//! Metadata embedded in TBW save files.
//!
//! The game writes display metadata into the save payload as
//! `key;value` lines. Only `author`, `version` and `image` are recognised;
//! everything else in the payload is opaque save data.

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Separator between a metadata key and its value.
pub const KEY_VALUE_SEPARATOR: char = ';';

/// Characters that end a line. Besides `\n` and `\r` this covers the
/// vertical tab, form feed, the file/group/record separators, NEL and the
/// Unicode line and paragraph separators.
pub fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c'..='\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

pub const KEY_AUTHOR: &str = "author";
pub const KEY_VERSION: &str = "version";
pub const KEY_IMAGE: &str = "image";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Metadata discovered in a TBW payload. `None` means the key was not found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TbwMetadata {
    pub author: Option<String>,
    pub version: Option<String>,
    pub image: Option<String>,
}

impl TbwMetadata {
    /// True once every recognised key has a value.
    pub fn is_complete(&self) -> bool {
        self.author.is_some() && self.version.is_some() && self.image.is_some()
    }

    /// Number of keys found.
    pub fn len(&self) -> usize {
        [&self.author, &self.version, &self.image]
            .iter()
            .filter(|v| v.is_some())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn slot_for(&mut self, key: &str) -> Option<&mut Option<String>> {
        if key.eq_ignore_ascii_case(KEY_AUTHOR) {
            Some(&mut self.author)
        } else if key.eq_ignore_ascii_case(KEY_VERSION) {
            Some(&mut self.version)
        } else if key.eq_ignore_ascii_case(KEY_IMAGE) {
            Some(&mut self.image)
        } else {
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------

/// Scan a TBW payload for `author`, `version` and `image` lines.
///
/// Lines may end in `\n`, `\r\n`, a bare `\r` or any other
/// [`is_line_break`] character. A line is split on its
/// first `;`; key and value are trimmed and the key is matched
/// case-insensitively. Empty values are skipped and the first non-empty
/// value per key wins. Scanning stops as soon as all three keys are found.
///
/// Never fails: lines that do not look like metadata are ignored.
pub fn extract_metadata(tbw: &str) -> TbwMetadata {
    let mut meta = TbwMetadata::default();

    for line in tbw.split(is_line_break) {
        let Some((key, value)) = line.split_once(KEY_VALUE_SEPARATOR) else {
            continue;
        };
        let value = value.trim();
        if value.is_empty() {
            continue;
        }

        if let Some(slot) = meta.slot_for(key.trim()) {
            if slot.is_none() {
                *slot = Some(value.to_string());
            }
        }

        if meta.is_complete() {
            break;
        }
    }

    meta
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
