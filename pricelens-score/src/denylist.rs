//! Noise-tag denylist.
//!
//! The upstream market data is full of tags that describe the listing
//! rather than the product: sizes, colors, condition words, packaging
//! counts. Those carry no pricing signal and would drown the ranked list.
//!
//! The denylist is an injected, immutable configuration value: an ordered
//! set of literal tokens plus an ordered list of regex rules. Callers that
//! target another market can build their own with [`Denylist::new`]; the
//! [`Default`] carries lists curated for the Swedish resale market.

use regex::Regex;

/// Exact-match noise tokens. Matched against the lower-cased trimmed name.
const DEFAULT_TOKENS: &[&str] = &[
    // size tokens
    "xs", "s", "m", "l", "xl", "xxl", "xxxl", "onesize", "one size",
    // generic stopwords
    "och", "med", "utan", "för", "till", "från", "som", "den", "det",
    "bra", "fin", "fint", "fina", "snygg", "snygga", "stor", "liten",
    // color names
    "svart", "svarta", "vit", "vita", "blå", "röd", "röda", "grön",
    "gröna", "gul", "gula", "rosa", "grå", "beige", "brun", "bruna",
    "marinblå", "orange", "lila", "turkos",
    // quantity / packaging tokens
    "par", "pack", "st", "styck", "set", "kartong", "påse",
    // condition adjectives
    "ny", "nytt", "nya", "helt ny", "oanvänd", "oanvända", "använd",
    "använda", "nyskick", "sliten", "slitna", "defekt", "trasig", "felfri",
];

/// Regex rules for size-like and otherwise noisy name shapes. Applied to
/// the lower-cased trimmed name; first match wins.
const DEFAULT_RULES: &[&str] = &[
    // size prefix + number, with or without a space: "str 42", "stl38"
    r"^(str|strl|stl|storlek|size)\s?\d+",
    // size prefix + word: "storlek medium"
    r"^(str|strl|stl|storlek|size)\s?[a-zåäö]+$",
    // number + size suffix: "42mm", "750 ml"
    r"^\d+\s?(mm|cm|dm|m|ml|cl|dl|l|g|kg|tum)$",
    // any name containing parentheses
    r"[()]",
    // letters + "str": "herrstr", "damstr"
    r"^[a-zåäö]+str$",
    // region size markers: "us 9", "eu42", "eur 38"
    r"^(us|eu|eur)\s?\d+",
    // bare numbers
    r"^\d+$",
    // size/cheapness signal anywhere in the name
    r"strl|storlek|billig",
];

/// Ordered noise-filter configuration: literal tokens plus regex rules.
#[derive(Clone, Debug)]
pub struct Denylist {
    tokens: Vec<String>,
    rules: Vec<Regex>,
}

impl Denylist {
    /// Build a denylist from custom token and pattern lists.
    ///
    /// Tokens are stored lower-cased; patterns must be valid regexes and
    /// are matched against lower-cased trimmed names.
    pub fn new<T: AsRef<str>, P: AsRef<str>>(
        tokens: &[T],
        patterns: &[P],
    ) -> Result<Self, regex::Error> {
        let rules = patterns
            .iter()
            .map(|p| Regex::new(p.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            tokens: tokens
                .iter()
                .map(|t| t.as_ref().to_lowercase())
                .collect(),
            rules,
        })
    }

    /// An empty denylist that never matches anything.
    pub fn empty() -> Self {
        Self {
            tokens: Vec::new(),
            rules: Vec::new(),
        }
    }

    /// Whether the given tag name is denylisted noise. Comparison is
    /// case-insensitive on the trimmed name.
    pub fn matches(&self, name: &str) -> bool {
        let name = name.trim().to_lowercase();
        if name.is_empty() {
            return false;
        }
        if self.tokens.iter().any(|t| *t == name) {
            return true;
        }
        self.rules.iter().any(|r| r.is_match(&name))
    }
}

impl Default for Denylist {
    fn default() -> Self {
        Self::new(DEFAULT_TOKENS, DEFAULT_RULES).expect("default denylist rules compile")
    }
}
