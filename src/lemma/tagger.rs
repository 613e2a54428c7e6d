//! Part-of-speech tagging.

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;

/// Assigns a Penn Treebank tag to every token of a sequence.
///
/// Tags are produced over the whole sequence so implementations may use
/// neighbouring tokens as context. The output has the same length as the
/// input.
pub trait PosTagger: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Tag `tokens` in order.
    fn tag(&self, tokens: &[String]) -> Vec<String>;
}

/// Closed-class words and common irregular verb forms.
static CLOSED_CLASS: Lazy<FxHashMap<&'static str, &'static str>> = Lazy::new(|| {
    let groups: &[(&str, &[&str])] = &[
        (
            "DT",
            &[
                "the", "a", "an", "this", "that", "these", "those", "each", "every", "some",
                "any", "no", "all", "both", "either", "neither", "another",
            ],
        ),
        (
            "PRP",
            &[
                "i", "you", "he", "she", "it", "we", "they", "me", "him", "us", "them",
                "myself", "yourself", "himself", "herself", "itself", "ourselves",
                "yourselves", "themselves",
            ],
        ),
        ("PRP$", &["my", "your", "his", "her", "its", "our", "their"]),
        (
            "IN",
            &[
                "of", "in", "on", "at", "by", "for", "with", "about", "against", "between",
                "into", "through", "during", "before", "after", "above", "below", "from",
                "up", "down", "over", "under", "off", "out", "since", "until", "while",
                "because", "if", "though", "although", "than", "as", "per", "via", "upon",
                "within", "without", "among",
            ],
        ),
        ("TO", &["to"]),
        ("CC", &["and", "or", "but", "nor", "yet", "so"]),
        (
            "MD",
            &["can", "could", "will", "would", "shall", "should", "may", "might", "must"],
        ),
        ("EX", &["there"]),
        ("WP", &["what", "who", "whom"]),
        ("WP$", &["whose"]),
        ("WDT", &["which"]),
        ("WRB", &["when", "where", "why", "how"]),
        (
            "RB",
            &[
                "not", "very", "too", "also", "just", "only", "then", "here", "now", "again",
                "never", "always", "often", "once", "soon", "still", "already", "even",
                "ever", "quite", "rather", "almost",
            ],
        ),
        ("VB", &["be"]),
        ("VBP", &["are", "am", "have", "do"]),
        ("VBZ", &["is", "has", "does"]),
        ("VBG", &["being", "having", "doing"]),
        ("VBN", &["been", "done"]),
        (
            "VBD",
            &[
                "was", "were", "had", "did", "ran", "went", "saw", "came", "took", "made",
                "got", "gave", "knew", "thought", "told", "found", "left", "felt", "kept",
                "began", "brought", "bought", "wrote", "spoke", "stood", "sat", "ate",
                "drank", "drove", "flew", "fell", "grew", "held", "heard", "met", "paid",
                "said", "sent", "sang", "swam", "taught", "threw", "understood", "won",
                "wore", "broke", "chose", "forgot", "hid", "rode", "rose", "shook", "stole",
            ],
        ),
        (
            "VBN",
            &[
                "gone", "seen", "taken", "given", "known", "written", "spoken", "eaten",
                "driven", "flown", "fallen", "grown", "broken", "chosen", "forgotten",
                "hidden", "ridden", "risen", "shaken", "stolen", "begun", "drunk", "sung",
                "swum", "thrown", "worn",
            ],
        ),
    ];

    let mut map = FxHashMap::default();
    for (tag, words) in groups {
        for word in *words {
            map.insert(*word, *tag);
        }
    }
    map
});

const ADJECTIVE_SUFFIXES: &[&str] = &[
    "able", "ible", "ful", "ous", "ive", "less", "ish", "ical", "ic", "al",
];

/// Dictionary-and-suffix tagger that needs no model file.
///
/// Closed-class words and common irregular verbs come from a fixed table.
/// Open-class words are tagged by suffix, with a bare verb assumed after a
/// modal or `to`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleTagger;

impl RuleTagger {
    pub fn new() -> Self {
        Self
    }

    fn tag_word(word: &str, prev: &str) -> &'static str {
        if let Some(tag) = CLOSED_CLASS.get(word) {
            // "the saw", "my left": a verb form right after a determiner is a noun.
            if tag.starts_with('V') && matches!(prev, "DT" | "PRP$") {
                return "NN";
            }
            return tag;
        }

        let len = word.chars().count();
        if len >= 5 && word.ends_with("ing") {
            return "VBG";
        }
        if len >= 4 && word.ends_with("ed") {
            return if matches!(prev, "VBZ" | "VBP" | "VBD") {
                "VBN"
            } else {
                "VBD"
            };
        }
        if len >= 4 && word.ends_with("ly") {
            return "RB";
        }
        if len >= 5 && word.ends_with("est") {
            return "JJS";
        }
        if len >= 5 && (word.ends_with("ier") || ends_with_doubled_er(word)) {
            return "JJR";
        }
        if len >= 5 && ADJECTIVE_SUFFIXES.iter().any(|s| word.ends_with(s)) {
            return "JJ";
        }
        if matches!(prev, "MD" | "TO") {
            return "VB";
        }
        if len >= 3
            && word.ends_with('s')
            && !(word.ends_with("ss") || word.ends_with("us") || word.ends_with("is"))
        {
            return "NNS";
        }
        "NN"
    }
}

/// `bigger`, `hotter`: comparative with a doubled consonant before `er`.
fn ends_with_doubled_er(word: &str) -> bool {
    let Some(stem) = word.strip_suffix("er") else {
        return false;
    };
    let mut rev = stem.chars().rev();
    match (rev.next(), rev.next()) {
        (Some(a), Some(b)) => a == b && !"aeiou".contains(a),
        _ => false,
    }
}

impl PosTagger for RuleTagger {
    fn name(&self) -> &str {
        "rule"
    }

    fn tag(&self, tokens: &[String]) -> Vec<String> {
        let mut prev = "";
        tokens
            .iter()
            .map(|token| {
                let tag = Self::tag_word(token, prev);
                prev = tag;
                tag.to_string()
            })
            .collect()
    }
}
