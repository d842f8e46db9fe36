//! Song name extraction from raw filenames
//!
//! Band members name their takes inconsistently: `Anthem_demo.mp3`,
//! `Nice Tune wip.mp3`, `10010 Jam.wav`. This module derives a canonical
//! song title from such a filename by stripping version-indicating tokens.
//! It is a best-effort heuristic over observed naming conventions, not a
//! guaranteed-correct parse; two files that belong to the same song can
//! still extract to different titles.
//!
//! The function is pure and total: it never fails and never returns an
//! empty string.

/// Version-indicating words that mark the end of the song name.
///
/// Matched case-insensitively at word boundaries.
const STOP_WORDS: &[&str] = &[
    "wip",
    "demo",
    "final",
    "mix",
    "master",
    "rough",
    "draft",
    "backing",
    "vocal",
    "instrumental",
    "remix",
    "upskruvad",
    "steady",
    "alternate",
    "alt",
];

/// Derive the canonical song title from a raw filename.
///
/// Cascade, first match wins:
/// 1. Strip the extension.
/// 2. `Name_VersionTag` convention: everything before the first underscore.
/// 3. Leading digit run (numeric song codes): just the digits.
/// 4. Cut at the earliest of: a stop word, a `20xx` year, or any standalone
///    run of four or more digits.
/// 5. Fall back to the filename minus extension if the cut leaves nothing.
pub fn extract_base_name(filename: &str) -> String {
    let stem = strip_extension(filename);

    if let Some(prefix) = stem.split('_').next() {
        if prefix.len() < stem.len() {
            let trimmed = prefix.trim();
            if !trimmed.is_empty() {
                return trimmed.to_string();
            }
        }
    }

    let name = collapse_whitespace(stem);

    let leading_digits: String = name.chars().take_while(|c| c.is_ascii_digit()).collect();
    if !leading_digits.is_empty() {
        return leading_digits;
    }

    if let Some(cut) = earliest_cut_point(&name) {
        let truncated = name[..cut].trim();
        if !truncated.is_empty() {
            return truncated.to_string();
        }
    }

    if name.is_empty() {
        stem.trim().to_string()
    } else {
        name
    }
}

fn strip_extension(filename: &str) -> &str {
    match filename.rfind('.') {
        Some(idx) if idx > 0 => &filename[..idx],
        _ => filename,
    }
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Byte offset of the earliest version-indicating token, if any.
///
/// Scans every word for stop words, `20xx` years, and standalone digit runs
/// of length four or more; the smallest offset among all matches wins.
fn earliest_cut_point(name: &str) -> Option<usize> {
    let mut earliest: Option<usize> = None;

    let mut offset = 0;
    for word in name.split(' ') {
        if is_cut_token(word) {
            earliest = Some(earliest.map_or(offset, |e| e.min(offset)));
            // Words after the first cut can only be later in the string.
            break;
        }
        offset += word.len() + 1;
    }

    earliest
}

fn is_cut_token(word: &str) -> bool {
    let lower = word.to_lowercase();
    let trimmed = lower.trim_matches(|c: char| !c.is_alphanumeric());

    if STOP_WORDS.contains(&trimmed) {
        return true;
    }

    // 20xx year token
    if trimmed.len() == 4 && trimmed.starts_with("20") && trimmed.chars().all(|c| c.is_ascii_digit())
    {
        return true;
    }

    // Standalone run of four or more digits
    trimmed.len() >= 4 && trimmed.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_underscore_convention_wins() {
        assert_eq!(extract_base_name("SongName_demo.mp3"), "SongName");
        assert_eq!(extract_base_name("Anthem_rough mix v2.wav"), "Anthem");
    }

    #[test]
    fn test_leading_digit_run() {
        assert_eq!(extract_base_name("10010 Jam.wav"), "10010");
        assert_eq!(extract_base_name("42 tune rough.mp3"), "42");
    }

    #[test]
    fn test_stop_word_cut() {
        assert_eq!(extract_base_name("Nice Tune wip.mp3"), "Nice Tune");
        assert_eq!(extract_base_name("Big Song DEMO take.flac"), "Big Song");
        assert_eq!(extract_base_name("Quiet One instrumental.ogg"), "Quiet One");
    }

    #[test]
    fn test_year_cut() {
        assert_eq!(extract_base_name("Track 2024.flac"), "Track");
        assert_eq!(extract_base_name("Song 2019 rehearsal.mp3"), "Song");
    }

    #[test]
    fn test_long_digit_run_cut() {
        assert_eq!(extract_base_name("Tune 192837.mp3"), "Tune");
    }

    #[test]
    fn test_no_markers_returns_whole_name() {
        assert_eq!(extract_base_name("plainname.mp3"), "plainname");
        assert_eq!(extract_base_name("Two Words.wav"), "Two Words");
    }

    #[test]
    fn test_whitespace_collapsed() {
        assert_eq!(extract_base_name("Spaced   Out   demo.mp3"), "Spaced Out");
    }

    #[test]
    fn test_stop_word_requires_word_boundary() {
        // "mixture" contains "mix" but is not a standalone stop word
        assert_eq!(extract_base_name("mixture.mp3"), "mixture");
        assert_eq!(extract_base_name("Alternative Song.mp3"), "Alternative Song");
    }

    #[test]
    fn test_hyphenated_compound_kept_whole() {
        // Word boundaries are whitespace only: a stop word joined by a
        // hyphen is part of the word, not a cut point. Pinned so the
        // behavior stays deliberate.
        assert_eq!(extract_base_name("Tune-demo.mp3"), "Tune-demo");
        assert_eq!(extract_base_name("Tune - demo.mp3"), "Tune -");
    }

    #[test]
    fn test_stop_word_at_start_falls_back() {
        // Cutting at position zero would leave nothing
        assert_eq!(extract_base_name("demo.mp3"), "demo");
        assert_eq!(extract_base_name("Demo take.mp3"), "Demo take");
    }

    #[test]
    fn test_never_empty() {
        assert!(!extract_base_name(".mp3").is_empty());
        assert!(!extract_base_name("x").is_empty());
    }

    #[test]
    fn test_no_extension() {
        assert_eq!(extract_base_name("Raw Take wip"), "Raw Take");
    }
}
