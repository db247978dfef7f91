//! Per-language abbreviation tables.

use std::collections::HashMap;

/// Language codes with rule tables.
pub const SUPPORTED_LANGUAGES: &[&str] = &["en", "de", "es", "fr", "it", "pt", "nl"];

/// How an abbreviation interacts with the word after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbbreviationKind {
    /// Titles written before a name (`Mr.`, `Dr.`). Never end a sentence.
    Prepositive,
    /// Abbreviations that precede a number (`No. 5`, `p. 12`).
    Number,
    /// Everything else. A following capitalised word starts a new sentence.
    Plain,
}

/// Abbreviation classes for one language.
struct Table {
    prepositive: &'static [&'static str],
    number: &'static [&'static str],
    plain: &'static [&'static str],
}

/// Shared by every language (Latin, units and references).
const COMMON: Table = Table {
    prepositive: &[],
    number: &["no", "nos", "nr", "p", "pp", "fig", "figs", "vol", "art", "ext"],
    plain: &[
        "e.g", "i.e", "etc", "cf", "viz", "ca", "approx", "op", "cit", "ibid", "ed", "eds", "km",
        "cm", "mm", "kg", "min", "max", "tel",
    ],
};

const EN: Table = Table {
    prepositive: &[
        "mr", "mrs", "ms", "messrs", "dr", "prof", "st", "mt", "rev", "gen", "col", "capt", "lt",
        "sgt", "gov", "sen", "rep", "reps", "adm", "brig", "cmdr", "cpl", "det", "maj", "supt",
        "hon", "pres", "vs",
    ],
    number: &[],
    plain: &[
        "sr", "jr", "ft", "inc", "ltd", "co", "corp", "dept", "univ", "assn", "bros", "jan", "feb",
        "mar", "apr", "jun", "jul", "aug", "sep", "sept", "oct", "nov", "dec", "mon", "tue", "wed",
        "thu", "fri", "sat", "sun", "a.m", "p.m", "u.s", "u.k", "e.u", "ph.d", "b.a", "m.a", "b.sc",
        "m.sc", "est", "ave", "blvd", "rd", "al", "dist",
    ],
};

const DE: Table = Table {
    prepositive: &["dr", "prof", "hr", "fr", "dipl", "ing"],
    number: &["nr", "abs", "art", "s"],
    plain: &[
        "z.b", "bzw", "usw", "ggf", "bspw", "evtl", "vgl", "d.h", "u.a", "s.o", "s.u", "z.t", "ca",
        "str", "jh", "jhd", "mio", "mrd", "inkl", "zzgl", "ggü", "sog", "u.u", "o.ä", "u.ä", "i.d.r",
        "z.hd", "bzgl", "gem",
    ],
};

const ES: Table = Table {
    prepositive: &["sr", "sra", "srta", "dr", "dra", "lic", "ing", "arq", "ud", "uds", "vd", "vds"],
    number: &["pág", "págs", "cap", "art", "núm"],
    plain: &["av", "avda", "admón", "dpto", "etc", "ee.uu", "aprox", "tel"],
};

const FR: Table = Table {
    prepositive: &["m", "mm", "mme", "mmes", "mlle", "mlles", "dr", "pr", "me", "st", "ste"],
    number: &["chap", "art", "p"],
    plain: &[
        "av", "bd", "env", "cf", "etc", "p.ex", "c.-à-d", "éd", "hab", "tél", "janv", "févr", "avr",
        "juil", "sept", "oct", "nov", "déc",
    ],
};

const IT: Table = Table {
    prepositive: &[
        "sig", "sigg", "sig.ra", "dott", "dott.ssa", "prof", "prof.ssa", "ing", "avv", "arch", "geom",
        "rag", "on", "sen",
    ],
    number: &["pag", "pagg", "cap", "art"],
    plain: &["ecc", "es", "ca", "tel", "v", "vd"],
};

const PT: Table = Table {
    prepositive: &[
        "sr", "sra", "srta", "dr", "dra", "prof", "profa", "eng", "arq", "exmo", "exma", "v.exa",
    ],
    number: &["pág", "págs", "cap", "art", "núm"],
    plain: &["av", "tel", "aprox", "etc", "ltda", "cia"],
};

const NL: Table = Table {
    prepositive: &["dhr", "mevr", "mw", "dr", "prof", "drs", "ir", "ing", "mr"],
    number: &["nr", "blz", "art"],
    plain: &[
        "bijv", "bv", "b.v", "n.v", "d.w.z", "m.a.w", "o.a", "t.a.v", "i.p.v", "z.g.a.n", "enz",
        "evt", "resp", "ca", "jl", "vnl",
    ],
};

/// Abbreviation table and flags for one language.
#[derive(Debug, Clone)]
pub struct LanguageRules {
    lang: String,
    abbreviations: HashMap<&'static str, AbbreviationKind>,
    ordinal_dot: bool,
}

impl LanguageRules {
    /// Build the rules for a language code, or `None` if unsupported.
    ///
    /// Region suffixes are ignored (`en-US` selects `en`).
    pub fn for_language(lang: &str) -> Option<Self> {
        let base = lang
            .split(['-', '_'])
            .next()
            .unwrap_or(lang)
            .to_lowercase();

        let table = match base.as_str() {
            "en" => &EN,
            "de" => &DE,
            "es" => &ES,
            "fr" => &FR,
            "it" => &IT,
            "pt" => &PT,
            "nl" => &NL,
            _ => return None,
        };

        // Later inserts win: a language's prepositive entry overrides a
        // shared plain or number one
        let mut abbreviations = HashMap::new();
        for t in [&COMMON, table] {
            abbreviations.extend(t.plain.iter().map(|w| (*w, AbbreviationKind::Plain)));
        }
        for t in [&COMMON, table] {
            abbreviations.extend(t.number.iter().map(|w| (*w, AbbreviationKind::Number)));
        }
        for t in [&COMMON, table] {
            abbreviations.extend(t.prepositive.iter().map(|w| (*w, AbbreviationKind::Prepositive)));
        }

        Some(Self {
            abbreviations,
            // German writes ordinals as "3. Oktober"
            ordinal_dot: base == "de",
            lang: base,
        })
    }

    /// Language code these rules were built for.
    pub fn lang(&self) -> &str {
        &self.lang
    }

    /// Class of a lowercase word (without its final dot), if it is an
    /// abbreviation.
    pub fn abbreviation(&self, word: &str) -> Option<AbbreviationKind> {
        self.abbreviations.get(word).copied()
    }

    /// Check if a lowercase word (without its final dot) is an abbreviation.
    pub fn is_abbreviation(&self, word: &str) -> bool {
        self.abbreviations.contains_key(word)
    }

    /// Whether a number followed by a dot is an ordinal rather than an end.
    pub fn ordinal_dot(&self) -> bool {
        self.ordinal_dot
    }
}
