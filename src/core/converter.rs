use tracing::trace;

use crate::core::dictionary::Dictionary;
use crate::core::types::{AnnotationGroup, Reading, TransliterationConfig};
use crate::error::DictionaryError;

/// Separator used by [`flatten`] between the readings of one group.
pub const READING_SEPARATOR: &str = "/";

/// A stateless Hanzi to pinyin converter over a read-only dictionary.
#[derive(Debug, Clone, Copy)]
pub struct Transliterator<'d> {
    dictionary: &'d Dictionary,
}

impl Transliterator<'static> {
    /// Converter over the bundled table.
    pub fn builtin() -> Result<Self, DictionaryError> {
        Dictionary::builtin().map(Self::new)
    }
}

impl<'d> Transliterator<'d> {
    pub fn new(dictionary: &'d Dictionary) -> Self {
        Self { dictionary }
    }

    pub fn dictionary(&self) -> &'d Dictionary {
        self.dictionary
    }

    /// Transliterates a full string, one group per code point.
    pub fn transliterate(&self, text: &str, config: &TransliterationConfig) -> Vec<AnnotationGroup> {
        self.transliterate_chars(text.chars(), config)
    }

    /// Same as [`Self::transliterate`] for input that is already split into characters.
    pub fn transliterate_chars<I>(&self, chars: I, config: &TransliterationConfig) -> Vec<AnnotationGroup>
    where
        I: IntoIterator<Item = char>,
    {
        chars.into_iter().map(|c| self.annotate(c, config)).collect()
    }

    /// Annotates a single character. Unknown characters pass through unchanged.
    pub fn annotate(&self, character: char, config: &TransliterationConfig) -> AnnotationGroup {
        let readings = match self.dictionary.lookup(character) {
            Some(known) if !known.is_empty() => {
                if config.heteronyms {
                    known.to_vec()
                } else {
                    known[..1].to_vec()
                }
            }
            _ => {
                trace!(character = %character.escape_debug(), "no reading, passing through");
                vec![Reading::pass_through(character)]
            }
        };

        let rendered = readings
            .iter()
            .map(|r| r.render(config.style, config.neutral_tone_with_five))
            .collect();
        AnnotationGroup::new(character, readings, rendered)
    }

    /// Primary reading per character as a flat token stream.
    /// `config.heteronyms` is ignored.
    pub fn lazy(&self, text: &str, config: &TransliterationConfig) -> Vec<String> {
        let primary_only = TransliterationConfig { heteronyms: false, ..*config };
        flatten(&self.transliterate(text, &primary_only))
    }
}

/// Joins each group's rendered readings with [`READING_SEPARATOR`].
pub fn flatten(groups: &[AnnotationGroup]) -> Vec<String> {
    flatten_with(groups, READING_SEPARATOR)
}

pub fn flatten_with(groups: &[AnnotationGroup], separator: &str) -> Vec<String> {
    groups.iter().map(|g| g.rendered().join(separator)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Tone, ToneStyle};
    use proptest::prelude::*;

    fn rendered(text: &str, style: ToneStyle, heteronyms: bool) -> Vec<Vec<String>> {
        Transliterator::builtin()
            .unwrap()
            .transliterate(text, &TransliterationConfig::new(style, heteronyms))
            .into_iter()
            .map(|g| g.rendered().to_vec())
            .collect()
    }

    #[test]
    fn empty_input_gives_no_groups() {
        let transliterator = Transliterator::builtin().unwrap();
        assert!(transliterator.transliterate("", &TransliterationConfig::default()).is_empty());
    }

    #[test]
    fn primary_reading_only_by_default() {
        assert_eq!(rendered("中国人", ToneStyle::None, false), [["zhong"], ["guo"], ["ren"]]);
        assert_eq!(rendered("中国人", ToneStyle::Mark, false), [["zhōng"], ["guó"], ["rén"]]);
    }

    #[test]
    fn heteronyms_keep_dictionary_order() {
        let groups = rendered("中国人", ToneStyle::Numeric, true);
        assert_eq!(groups[0], ["zhong1", "zhong4"]);
        assert_eq!(groups[1], ["guo2"]);
        assert_eq!(groups[2], ["ren2"]);
        assert_eq!(rendered("和", ToneStyle::Mark, true)[0], ["hé", "hè", "huó", "huò", "hú"]);
    }

    #[test]
    fn whitespace_and_latin_pass_through() {
        let transliterator = Transliterator::builtin().unwrap();
        let groups = transliterator.transliterate("A1 你", &TransliterationConfig::new(ToneStyle::Mark, true));
        assert_eq!(groups.len(), 4);
        for (group, expected) in groups.iter().zip(['A', '1', ' ']) {
            assert!(group.is_pass_through());
            assert_eq!(group.readings(), &[Reading::pass_through(expected)]);
            assert_eq!(group.rendered(), &[expected.to_string()]);
        }
        assert_eq!(groups[3].readings(), &[Reading::new("ni", Tone::Third)]);
    }

    #[test]
    fn transliterate_chars_matches_transliterate() {
        let transliterator = Transliterator::builtin().unwrap();
        let config = TransliterationConfig::new(ToneStyle::NumericInline, true);
        assert_eq!(
            transliterator.transliterate_chars(['明', '月'], &config),
            transliterator.transliterate("明月", &config)
        );
    }

    #[test]
    fn flatten_joins_readings() {
        let transliterator = Transliterator::builtin().unwrap();
        let groups = transliterator.transliterate("中国", &TransliterationConfig::new(ToneStyle::Numeric, true));
        assert_eq!(flatten(&groups), ["zhong1/zhong4", "guo2"]);
        assert_eq!(flatten_with(&groups, " "), ["zhong1 zhong4", "guo2"]);
    }

    #[test]
    fn lazy_ignores_heteronyms() {
        let transliterator = Transliterator::builtin().unwrap();
        let config = TransliterationConfig::new(ToneStyle::None, true);
        assert_eq!(transliterator.lazy("中国人", &config), ["zhong", "guo", "ren"]);
    }

    #[test]
    fn custom_dictionary_is_used() {
        let dictionary = Dictionary::parse("U+4E2D: zhòng").unwrap();
        let transliterator = Transliterator::new(&dictionary);
        let groups = transliterator.transliterate("中国", &TransliterationConfig::new(ToneStyle::Mark, false));
        assert_eq!(flatten(&groups), ["zhòng", "国"]);
    }

    fn text_strategy() -> impl Strategy<Value = String> {
        let pool = vec!['中', '国', '人', '的', '和', '嗯', '绿', 'A', '1', ' ', '\n', '，', 'é'];
        prop_oneof![
            proptest::collection::vec(proptest::sample::select(pool), 0..32)
                .prop_map(|chars: Vec<char>| chars.into_iter().collect::<String>()),
            any::<String>(),
        ]
    }

    fn config_strategy() -> impl Strategy<Value = TransliterationConfig> {
        (proptest::sample::select(ToneStyle::ALL.to_vec()), any::<bool>(), any::<bool>()).prop_map(
            |(style, heteronyms, five)| {
                TransliterationConfig::new(style, heteronyms).with_neutral_tone_with_five(five)
            },
        )
    }

    proptest! {
        #[test]
        fn preserves_length(text in text_strategy(), config in config_strategy()) {
            let groups = Transliterator::builtin().unwrap().transliterate(&text, &config);
            prop_assert_eq!(groups.len(), text.chars().count());
            for (group, c) in groups.iter().zip(text.chars()) {
                prop_assert_eq!(group.character(), c);
                prop_assert!(!group.is_empty());
            }
        }

        #[test]
        fn is_deterministic(text in text_strategy(), config in config_strategy()) {
            let transliterator = Transliterator::builtin().unwrap();
            prop_assert_eq!(transliterator.transliterate(&text, &config), transliterator.transliterate(&text, &config));
        }

        #[test]
        fn unknown_characters_pass_through(text in text_strategy(), config in config_strategy()) {
            let transliterator = Transliterator::builtin().unwrap();
            for group in transliterator.transliterate(&text, &config) {
                if !transliterator.dictionary().contains(group.character()) {
                    prop_assert_eq!(group.readings(), &[Reading::pass_through(group.character())]);
                    prop_assert_eq!(group.primary(), group.character().to_string());
                }
            }
        }

        #[test]
        fn heteronyms_never_shrink_groups(text in text_strategy(), style in proptest::sample::select(ToneStyle::ALL.to_vec())) {
            let transliterator = Transliterator::builtin().unwrap();
            let single = transliterator.transliterate(&text, &TransliterationConfig::new(style, false));
            let multi = transliterator.transliterate(&text, &TransliterationConfig::new(style, true));
            for (s, m) in single.iter().zip(&multi) {
                prop_assert_eq!(s.len(), 1);
                prop_assert!(m.len() >= s.len());
                prop_assert_eq!(&m.rendered()[0], &s.rendered()[0]);
            }
        }
    }

    #[test]
    fn numeric_minus_digit_equals_plain() {
        for (_, readings) in Dictionary::builtin().unwrap().iter() {
            for reading in readings {
                for five in [true, false] {
                    let numeric = reading.render(ToneStyle::Numeric, five);
                    let stripped = numeric.strip_suffix(|c: char| c.is_ascii_digit()).unwrap_or(&numeric);
                    assert_eq!(stripped, reading.render(ToneStyle::None, five));
                }
            }
        }
    }
}
