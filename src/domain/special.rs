// ============================================================
// Layer 3 — Special Tokens
// ============================================================
// Every vocabulary starts with the same six reserved entries.
// Downstream ID assignment depends on this order, so the
// discriminants below ARE the token IDs:
//
//   0  _PAD      padding
//   1  _GO       start of a wrapped line
//   2  _EOS      end of a wrapped line
//   3  _UNK      pruned or unseen character
//   4  " "       space
//   5  "\n"      newline
//
// SPACE and NEWLINE are reserved so that the most common
// whitespace always gets a stable low ID, even though they
// are ordinary characters in the corpus.

use std::fmt;

/// The reserved tokens, in ID order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum SpecialToken {
    Pad = 0,
    Go = 1,
    Eos = 2,
    Unk = 3,
    Space = 4,
    NewLine = 5,
}

/// ID every unknown character is encoded as.
pub const UNK_ID: i64 = SpecialToken::Unk as i64;

impl SpecialToken {
    /// All reserved tokens in vocabulary order.
    pub const ALL: [SpecialToken; 6] = [
        SpecialToken::Pad,
        SpecialToken::Go,
        SpecialToken::Eos,
        SpecialToken::Unk,
        SpecialToken::Space,
        SpecialToken::NewLine,
    ];

    /// The token's textual form as stored in the vocabulary.
    pub fn as_str(self) -> &'static str {
        match self {
            SpecialToken::Pad => "_PAD",
            SpecialToken::Go => "_GO",
            SpecialToken::Eos => "_EOS",
            SpecialToken::Unk => "_UNK",
            SpecialToken::Space => " ",
            SpecialToken::NewLine => "\n",
        }
    }

    pub fn id(self) -> i64 {
        self as i64
    }

    /// Look up a reserved token by its textual form.
    pub fn from_str_token(token: &str) -> Option<SpecialToken> {
        Self::ALL.iter().copied().find(|s| s.as_str() == token)
    }

    /// Look up a reserved token by ID.
    pub fn from_id(id: i64) -> Option<SpecialToken> {
        usize::try_from(id).ok().and_then(|i| Self::ALL.get(i).copied())
    }
}

impl fmt::Display for SpecialToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
