// ============================================================
// Layer 3 — Vocabulary
// ============================================================
// Maps tokens (single characters plus the reserved tokens) to
// integer IDs and back.
//
// Layout of a built vocabulary:
//
//   [_PAD, _GO, _EOS, _UNK, " ", "\n", c1, c2, c3, ...]
//     0     1     2     3    4    5    6   7   8
//
// where c1, c2, ... are corpus characters ordered by
// descending frequency. Characters seen `min_count` times or
// fewer are pruned and later encode as _UNK.
//
// Ties keep the order in which the characters were first seen
// in the corpus (stable sort), so rebuilding the vocabulary
// from the same text always yields the same IDs.
//
// Reference: Rust Book §8 (HashMap), §13 (Iterators)

use std::collections::HashMap;

use crate::domain::error::CorpusError;
use crate::domain::special::{SpecialToken, UNK_ID};

// ─── FrequencyCounter ─────────────────────────────────────────────────────────
/// Counts tokens while remembering first-occurrence order.
#[derive(Debug, Clone, Default)]
pub struct FrequencyCounter {
    order:  Vec<String>,
    counts: HashMap<String, usize>,
}

impl FrequencyCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one occurrence of every token in `tokens`.
    pub fn update<I, S>(&mut self, tokens: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for token in tokens {
            let token = token.as_ref();
            match self.counts.get_mut(token) {
                Some(count) => *count += 1,
                None => {
                    self.order.push(token.to_string());
                    self.counts.insert(token.to_string(), 1);
                }
            }
        }
    }

    /// Number of distinct tokens seen.
    pub fn distinct(&self) -> usize {
        self.order.len()
    }

    /// (token, count) pairs sorted by descending count,
    /// ties in first-seen order.
    pub fn most_common(&self) -> Vec<(&str, usize)> {
        let mut pairs: Vec<(&str, usize)> = self
            .order
            .iter()
            .map(|t| (t.as_str(), self.counts[t]))
            .collect();
        // sort_by is stable
        pairs.sort_by(|a, b| b.1.cmp(&a.1));
        pairs
    }
}

// ─── Vocabulary ───────────────────────────────────────────────────────────────
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    tokens: Vec<String>,
    index:  HashMap<String, i64>,
}

impl Vocabulary {
    /// Build a vocabulary from corpus frequencies.
    ///
    /// Keeps every non-reserved token whose count is strictly
    /// greater than `min_count`.
    pub fn from_counts(counter: &FrequencyCounter, min_count: usize) -> Self {
        let mut tokens: Vec<String> = SpecialToken::ALL
            .iter()
            .map(|s| s.as_str().to_string())
            .collect();

        tokens.extend(
            counter
                .most_common()
                .into_iter()
                .filter(|(token, count)| {
                    *count > min_count && SpecialToken::from_str_token(token).is_none()
                })
                .map(|(token, _)| token.to_string()),
        );

        Self::index_tokens(tokens)
    }

    /// Rebuild a vocabulary from a persisted token list.
    ///
    /// The list must start with the reserved tokens in order and
    /// contain no duplicates.
    pub fn from_tokens(tokens: Vec<String>) -> Result<Self, CorpusError> {
        for (i, special) in SpecialToken::ALL.iter().enumerate() {
            match tokens.get(i) {
                Some(t) if t == special.as_str() => {}
                Some(t) => {
                    return Err(CorpusError::InvalidVocabulary(format!(
                        "entry {i} is {t:?}, expected reserved token {:?}",
                        special.as_str()
                    )))
                }
                None => {
                    return Err(CorpusError::InvalidVocabulary(format!(
                        "only {} entries, the {} reserved tokens are missing",
                        tokens.len(),
                        SpecialToken::ALL.len()
                    )))
                }
            }
        }

        let vocab = Self::index_tokens(tokens);
        if vocab.index.len() != vocab.tokens.len() {
            return Err(CorpusError::InvalidVocabulary(
                "duplicate tokens".to_string(),
            ));
        }
        Ok(vocab)
    }

    fn index_tokens(tokens: Vec<String>) -> Self {
        let index = tokens
            .iter()
            .enumerate()
            .map(|(id, t)| (t.clone(), id as i64))
            .collect();
        Self { tokens, index }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The ordered token list (what gets persisted).
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// ID of `token`, if it is in the vocabulary.
    pub fn get(&self, token: &str) -> Option<i64> {
        self.index.get(token).copied()
    }

    /// ID of `token`, falling back to UNK.
    pub fn id_of(&self, token: &str) -> i64 {
        self.get(token).unwrap_or(UNK_ID)
    }

    pub fn token(&self, id: i64) -> Option<&str> {
        usize::try_from(id)
            .ok()
            .and_then(|i| self.tokens.get(i))
            .map(String::as_str)
    }

    pub fn contains_id(&self, id: i64) -> bool {
        id >= 0 && (id as usize) < self.tokens.len()
    }

    /// Encode a token stream.
    pub fn encode<I, S>(&self, tokens: I) -> Vec<i64>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        tokens.into_iter().map(|t| self.id_of(t.as_ref())).collect()
    }

    /// Render IDs back to text.
    ///
    /// PAD and GO render as nothing, EOS as a line break, and
    /// out-of-range IDs as the UNK token.
    pub fn decode(&self, ids: &[i64]) -> String {
        let mut out = String::new();
        for &id in ids {
            match SpecialToken::from_id(id) {
                Some(SpecialToken::Pad) | Some(SpecialToken::Go) => {}
                Some(SpecialToken::Eos) => out.push('\n'),
                _ => out.push_str(self.token(id).unwrap_or(SpecialToken::Unk.as_str())),
            }
        }
        out
    }
}
