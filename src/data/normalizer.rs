// ============================================================
// Layer 4 — Text Normalizer
// ============================================================
// Collapses visually equivalent CJK / full-width characters to
// one representative before the vocabulary is built, so that
// '（', '「' and '(' do not each burn a vocabulary slot.
//
// Two steps, applied in order:
//   1. normalize_punctuation — many-to-one punctuation table
//   2. q2b                   — full-width → half-width folding
//
// Some table entries map to a full-width form on purpose
// ('﹗' → '！'); step 2 then folds that to ASCII '!'.
//
// The table is compiled once into a regex alternation and a
// char → char map, both shared process-wide.
//
// Reference: Unicode Halfwidth and Fullwidth Forms (U+FF00–U+FFEF)
//            regex crate documentation

use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::{Captures, Regex};

/// Equivalence classes: every source character on the left is
/// replaced by the single representative on the right.
const PUNCTUATION_CLASSES: &[(&[char], char)] = &[
    (&['\t'], ' '),
    (&['﹗'], '！'),
    (&['“', '゛', '〃', '′'], '"'),
    (&['”'], '"'),
    (&['´', '‘', '’'], '\''),
    (&['；', '﹔'], ';'),
    (&['《', '〈', '＜'], '<'),
    (&['》', '〉', '＞'], '>'),
    (&['﹑'], '、'),
    (&['【', '『', '〔', '﹝', '｢', '﹁'], '['),
    (&['】', '』', '〕', '﹞', '｣', '﹂'], ']'),
    (&['（', '「'], '('),
    (&['）', '」'], ')'),
    (&['﹖'], '？'),
    (&['︰', '﹕'], '：'),
    (&['・', '．', '·', '‧', '°'], '･'),
    (&['●', '○', '▲', '◎', '◇', '■', '□', '※', '◆'], '•'),
    (&['〜', '～', '∼'], '~'),
    (&['︱', '│', '┼'], '|'),
    (&['╱'], '/'),
    (&['╲'], '\\'),
    (&['—', 'ー', '―', '‐', '−', '─', '﹣', '–', 'ㄧ'], '-'),
];

/// Ideographic space, the one full-width form outside U+FF00.
const IDEOGRAPHIC_SPACE: u32 = 0x3000;

/// Distance between a full-width form and its ASCII counterpart.
const FULLWIDTH_OFFSET: u32 = 0xFEE0;

lazy_static! {
    static ref PUNCTUATION_MAP: HashMap<char, char> = PUNCTUATION_CLASSES
        .iter()
        .flat_map(|(sources, target)| sources.iter().map(move |s| (*s, *target)))
        .collect();

    static ref PUNCTUATION_RE: Regex = {
        let alternation = PUNCTUATION_CLASSES
            .iter()
            .flat_map(|(sources, _)| sources.iter())
            .map(|c| regex::escape(c.encode_utf8(&mut [0u8; 4])))
            .collect::<Vec<_>>()
            .join("|");
        Regex::new(&alternation).expect("punctuation table compiles to a valid regex")
    };
}

/// Replace every punctuation variant with its class representative.
///
/// Text without any table character is returned unchanged.
pub fn normalize_punctuation(text: &str) -> String {
    PUNCTUATION_RE
        .replace_all(text, |caps: &Captures| {
            caps[0]
                .chars()
                .next()
                .and_then(|c| PUNCTUATION_MAP.get(&c))
                .map(|c| c.to_string())
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Convert one full-width character to half-width ("Q2B").
///
/// U+3000 becomes an ASCII space; anything else is shifted down
/// by 0xFEE0 and kept only if it lands on printable ASCII
/// (0x20..=0x7E). Everything else comes back untouched.
pub fn q2b(c: char) -> char {
    let code = c as u32;
    let folded = if code == IDEOGRAPHIC_SPACE {
        Some(0x20)
    } else {
        code.checked_sub(FULLWIDTH_OFFSET)
    };

    match folded {
        Some(f @ 0x20..=0x7E) => char::from_u32(f).unwrap_or(c),
        _ => c,
    }
}

/// Full normalisation: punctuation table, then per-character
/// full-width folding. Deterministic and idempotent.
pub fn normalize_unicodes(text: &str) -> String {
    normalize_punctuation(text).chars().map(q2b).collect()
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_q2b_fullwidth_forms() {
        assert_eq!(q2b('\u{3000}'), ' ');
        assert_eq!(q2b('！'), '!');
        assert_eq!(q2b('Ａ'), 'A');
        assert_eq!(q2b('～'), '~');
        assert_eq!(q2b('０'), '0');
    }

    #[test]
    fn test_q2b_leaves_other_characters() {
        for c in ['a', 'Z', ' ', '中', '、', '･', '\u{FF5F}', '\u{FEDF}', '\0'] {
            assert_eq!(q2b(c), c, "{c:?} should be unchanged");
        }
    }

    #[test]
    fn test_punctuation_classes() {
        assert_eq!(normalize_punctuation("“你好”"), "\"你好\"");
        assert_eq!(normalize_punctuation("【标题】"), "[标题]");
        assert_eq!(normalize_punctuation("a\tb"), "a b");
        assert_eq!(normalize_punctuation("一—二―三"), "一-二-三");
        assert_eq!(normalize_punctuation("╱╲"), "/\\");
        assert_eq!(normalize_punctuation("﹗"), "！");
    }

    #[test]
    fn test_punctuation_passthrough() {
        let text = "plain ASCII, nothing to do.";
        assert_eq!(normalize_punctuation(text), text);
        assert_eq!(normalize_punctuation(""), "");
    }

    #[test]
    fn test_table_has_no_overlapping_sources() {
        let total: usize = PUNCTUATION_CLASSES.iter().map(|(s, _)| s.len()).sum();
        assert_eq!(PUNCTUATION_CLASSES.len(), 22);
        assert_eq!(PUNCTUATION_MAP.len(), total);
    }

    #[test]
    fn test_normalize_unicodes_composes_both_steps() {
        assert_eq!(normalize_unicodes("（ＡＢＣ）﹗"), "(ABC)!");
        assert_eq!(normalize_unicodes("你好\u{3000}世界﹖"), "你好 世界?");
        assert_eq!(normalize_unicodes("《书》"), "<书>");
    }

    #[test]
    fn test_idempotent_over_every_table_character() {
        let all: String = PUNCTUATION_CLASSES
            .iter()
            .flat_map(|(s, t)| s.iter().copied().chain(std::iter::once(*t)))
            .collect();
        let once = normalize_unicodes(&all);
        assert_eq!(normalize_unicodes(&once), once);
    }

    proptest! {
        #[test]
        fn prop_normalize_is_idempotent(text in "\\PC*") {
            let once = normalize_unicodes(&text);
            prop_assert_eq!(normalize_unicodes(&once), once);
        }

        #[test]
        fn prop_fullwidth_range_folds(c in proptest::char::range('\u{FF01}', '\u{FF5E}')) {
            let folded = q2b(c);
            prop_assert!(folded.is_ascii_graphic());
            prop_assert_eq!(folded as u32 + 0xFEE0, c as u32);
        }
    }
}
