// File: src/core/syllable.rs
//! Tone-mark decoding for table entries and tone rendering for output.

use crate::core::types::{Reading, Tone, ToneStyle};

/// Precomposed letters per base, indexed like [`Tone::MARKED`].
/// `None` means the letter has no precomposed form for that tone.
const MARK_TABLE: [(char, [Option<char>; 4]); 9] = [
    ('a', [Some('ā'), Some('á'), Some('ǎ'), Some('à')]),
    ('e', [Some('ē'), Some('é'), Some('ě'), Some('è')]),
    ('ê', [None, Some('ế'), None, Some('ề')]),
    ('i', [Some('ī'), Some('í'), Some('ǐ'), Some('ì')]),
    ('o', [Some('ō'), Some('ó'), Some('ǒ'), Some('ò')]),
    ('u', [Some('ū'), Some('ú'), Some('ǔ'), Some('ù')]),
    ('ü', [Some('ǖ'), Some('ǘ'), Some('ǚ'), Some('ǜ')]),
    ('n', [None, Some('ń'), Some('ň'), Some('ǹ')]),
    ('m', [None, Some('ḿ'), None, None]),
];

/// Combining diacritics, indexed like [`Tone::MARKED`].
const COMBINING_MARKS: [char; 4] = ['\u{0304}', '\u{0301}', '\u{030C}', '\u{0300}'];

const COMBINING_CIRCUMFLEX: char = '\u{0302}';

fn decompose(c: char) -> Option<(char, Tone)> {
    MARK_TABLE.iter().find_map(|(base, marks)| {
        marks
            .iter()
            .position(|m| *m == Some(c))
            .map(|i| (*base, Tone::MARKED[i]))
    })
}

fn combining_tone(c: char) -> Option<Tone> {
    COMBINING_MARKS.iter().position(|&m| m == c).map(|i| Tone::MARKED[i])
}

fn marked_index(tone: Tone) -> Option<usize> {
    Tone::MARKED.iter().position(|&t| t == tone)
}

/// Parses a tone-marked syllable such as `zhōng`, `lüè`, `ńg` or `ế`.
/// A syllable without any mark is read in the neutral tone. `e` followed
/// by a combining circumflex is folded into `ê`.
pub(crate) fn parse_marked(text: &str) -> Result<Reading, &'static str> {
    let mut syllable = String::with_capacity(text.len());
    let mut tone: Option<Tone> = None;

    for c in text.chars() {
        let found = if let Some((base, t)) = decompose(c) {
            syllable.push(base);
            Some(t)
        } else if let Some(t) = combining_tone(c) {
            if syllable.is_empty() {
                return Err("combining mark without a base letter");
            }
            Some(t)
        } else if c == COMBINING_CIRCUMFLEX {
            if !syllable.ends_with('e') {
                return Err("circumflex without a base e");
            }
            syllable.pop();
            syllable.push('ê');
            None
        } else if c.is_ascii_lowercase() || c == 'ü' || c == 'ê' {
            syllable.push(c);
            None
        } else {
            return Err("unexpected character");
        };

        if let Some(t) = found {
            if tone.replace(t).is_some() {
                return Err("more than one tone mark");
            }
        }
    }

    if syllable.is_empty() {
        return Err("empty syllable");
    }
    Ok(Reading::new(syllable, tone.unwrap_or(Tone::Neutral)))
}

/// Index (in chars) of the letter that carries the tone mark.
///
/// `a` or `e`/`ê` win when present, `ou` marks the `o`, otherwise the last
/// of `i o u ü`. Vowelless syllables (`n`, `ng`, `m`, `hm`) mark the nasal.
fn mark_position(chars: &[char]) -> Option<usize> {
    if let Some(i) = chars.iter().position(|&c| c == 'a') {
        return Some(i);
    }
    if let Some(i) = chars.iter().position(|&c| matches!(c, 'e' | 'ê')) {
        return Some(i);
    }
    if let Some(i) = chars.windows(2).position(|w| w == ['o', 'u']) {
        return Some(i);
    }
    if let Some(i) = chars.iter().rposition(|c| matches!(c, 'i' | 'o' | 'u' | 'ü')) {
        return Some(i);
    }
    chars.iter().position(|c| matches!(c, 'n' | 'm'))
}

fn tone_digit(tone: Tone, neutral_tone_with_five: bool) -> Option<char> {
    if tone == Tone::Neutral && !neutral_tone_with_five {
        return None;
    }
    char::from_digit(u32::from(tone.number()), 10)
}

fn apply_mark(syllable: &str, tone: Tone) -> String {
    let Some(index) = marked_index(tone) else {
        return syllable.to_string();
    };
    let mut chars: Vec<char> = syllable.chars().collect();
    let Some(pos) = mark_position(&chars) else {
        return syllable.to_string();
    };

    let precomposed = MARK_TABLE
        .iter()
        .find(|(base, _)| *base == chars[pos])
        .and_then(|(_, marks)| marks[index]);
    match precomposed {
        Some(marked) => chars[pos] = marked,
        None => chars.insert(pos + 1, COMBINING_MARKS[index]),
    }
    chars.into_iter().collect()
}

fn insert_digit(syllable: &str, digit: char) -> String {
    let mut chars: Vec<char> = syllable.chars().collect();
    match mark_position(&chars) {
        Some(pos) => chars.insert(pos + 1, digit),
        None => chars.push(digit),
    }
    chars.into_iter().collect()
}

pub(crate) fn render(reading: &Reading, style: ToneStyle, neutral_tone_with_five: bool) -> String {
    let syllable = reading.syllable();
    let Some(tone) = reading.tone() else {
        return syllable.to_string();
    };

    match style {
        ToneStyle::None => syllable.to_string(),
        ToneStyle::Mark => apply_mark(syllable, tone),
        ToneStyle::Numeric => match tone_digit(tone, neutral_tone_with_five) {
            Some(digit) => format!("{syllable}{digit}"),
            None => syllable.to_string(),
        },
        ToneStyle::NumericInline => match tone_digit(tone, neutral_tone_with_five) {
            Some(digit) => insert_digit(syllable, digit),
            None => syllable.to_string(),
        },
    }
}
