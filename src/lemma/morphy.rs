//! Rule-based reduction of inflected forms, guided by part of speech.
//!
//! An inflected form is first looked up in the exception lists. Otherwise
//! suffix detachment rules for the part of speech are applied repeatedly
//! until a candidate the lexicon lists under that part of speech appears.
//! Among valid candidates the shortest wins.

use crate::lexicon::Lexicon;
use crate::model::PosCategory;

const NOUN_RULES: &[(&str, &str)] = &[
    ("s", ""),
    ("ses", "s"),
    ("ves", "f"),
    ("xes", "x"),
    ("zes", "z"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("men", "man"),
    ("ies", "y"),
];

const VERB_RULES: &[(&str, &str)] = &[
    ("s", ""),
    ("ies", "y"),
    ("es", "e"),
    ("es", ""),
    ("ed", "e"),
    ("ed", ""),
    ("ing", "e"),
    ("ing", ""),
];

const ADJECTIVE_RULES: &[(&str, &str)] = &[("er", ""), ("est", ""), ("er", "e"), ("est", "e")];

fn rules(pos: PosCategory) -> &'static [(&'static str, &'static str)] {
    match pos.rule_category() {
        PosCategory::Noun | PosCategory::Unknown => NOUN_RULES,
        PosCategory::Verb => VERB_RULES,
        PosCategory::Adjective => ADJECTIVE_RULES,
        PosCategory::Adverb => &[],
    }
}

/// Morphological reducer over a [`Lexicon`].
#[derive(Debug, Clone, Copy)]
pub struct Morphy<'a> {
    lexicon: &'a Lexicon,
}

impl<'a> Morphy<'a> {
    pub fn new(lexicon: &'a Lexicon) -> Self {
        Self { lexicon }
    }

    /// Reduce `form` to its base form for `pos`.
    ///
    /// Returns `form` unchanged when no candidate is listed.
    ///
    /// # Example
    /// ```
    /// use wordsift::{Lexicon, Morphy, PosCategory};
    ///
    /// let lexicon = Lexicon::builder()
    ///     .words(PosCategory::Noun, ["cat", "box"])
    ///     .words(PosCategory::Verb, ["run", "jump"])
    ///     .build();
    /// let morphy = Morphy::new(&lexicon);
    ///
    /// assert_eq!(morphy.lemmatize("boxes", PosCategory::Noun), "box");
    /// assert_eq!(morphy.lemmatize("jumped", PosCategory::Verb), "jump");
    /// assert_eq!(morphy.lemmatize("running", PosCategory::Verb), "run");
    /// assert_eq!(morphy.lemmatize("quickly", PosCategory::Adverb), "quickly");
    /// ```
    pub fn lemmatize(&self, form: &str, pos: PosCategory) -> String {
        self.candidates(form, pos)
            .into_iter()
            .min_by_key(|c| c.chars().count())
            .unwrap_or_else(|| form.to_string())
    }

    /// All base forms of `form` listed under `pos`, in discovery order.
    ///
    /// Ties on length in [`lemmatize`](Self::lemmatize) go to the earliest.
    pub fn candidates(&self, form: &str, pos: PosCategory) -> Vec<String> {
        let pos = pos.rule_category();

        let exceptions = self.lexicon.exceptions(pos, form);
        if !exceptions.is_empty() {
            let forms = std::iter::once(form.to_string()).chain(exceptions.iter().cloned());
            return self.listed(forms, pos);
        }

        let mut forms = self.detach(&[form.to_string()], pos);
        let first = self.listed(
            std::iter::once(form.to_string()).chain(forms.iter().cloned()),
            pos,
        );
        if !first.is_empty() {
            return first;
        }
        let undoubled = self.listed(forms.iter().filter_map(|f| undouble(f)), pos);
        if !undoubled.is_empty() {
            return undoubled;
        }

        while !forms.is_empty() {
            forms = self.detach(&forms, pos);
            let found = self.listed(forms.iter().cloned(), pos);
            if !found.is_empty() {
                return found;
            }
        }
        Vec::new()
    }

    /// Apply every matching rule to every form, without duplicates.
    fn detach(&self, forms: &[String], pos: PosCategory) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for form in forms {
            for (old, new) in rules(pos) {
                if let Some(stem) = form.strip_suffix(old) {
                    let candidate = format!("{}{}", stem, new);
                    if !out.contains(&candidate) {
                        out.push(candidate);
                    }
                }
            }
        }
        out
    }

    fn listed(&self, forms: impl Iterator<Item = String>, pos: PosCategory) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for form in forms {
            if self.lexicon.contains(pos, &form) && !out.contains(&form) {
                out.push(form);
            }
        }
        out
    }
}

/// `runn` -> `run`: drop a doubled final consonant left by suffix removal.
fn undouble(form: &str) -> Option<String> {
    let mut rev = form.chars().rev();
    let (last, before) = (rev.next()?, rev.next()?);
    if last == before && last.is_alphabetic() && !"aeiou".contains(last) && rev.next().is_some() {
        let mut stem = form.to_string();
        stem.pop();
        Some(stem)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lexicon() -> Lexicon {
        Lexicon::builder()
            .words(
                PosCategory::Noun,
                ["cat", "box", "church", "wolf", "man", "city", "glass", "run", "saw"],
            )
            .words(
                PosCategory::Verb,
                ["run", "jump", "make", "carry", "see", "saw", "hop"],
            )
            .words(PosCategory::Adjective, ["big", "happy", "large", "quick"])
            .words(PosCategory::Adverb, ["quickly"])
            .exception(PosCategory::Verb, "ran", "run")
            .exception(PosCategory::Verb, "saw", "see")
            .exception(PosCategory::Adjective, "happier", "happy")
            .exception(PosCategory::Noun, "men", "man")
            .build()
    }

    #[test]
    fn test_noun_rules() {
        let lexicon = lexicon();
        let morphy = Morphy::new(&lexicon);
        assert_eq!(morphy.lemmatize("cats", PosCategory::Noun), "cat");
        assert_eq!(morphy.lemmatize("boxes", PosCategory::Noun), "box");
        assert_eq!(morphy.lemmatize("churches", PosCategory::Noun), "church");
        assert_eq!(morphy.lemmatize("wolves", PosCategory::Noun), "wolf");
        assert_eq!(morphy.lemmatize("cities", PosCategory::Noun), "city");
        assert_eq!(morphy.lemmatize("glasses", PosCategory::Noun), "glass");
    }

    #[test]
    fn test_verb_rules() {
        let lexicon = lexicon();
        let morphy = Morphy::new(&lexicon);
        assert_eq!(morphy.lemmatize("jumped", PosCategory::Verb), "jump");
        assert_eq!(morphy.lemmatize("making", PosCategory::Verb), "make");
        assert_eq!(morphy.lemmatize("carries", PosCategory::Verb), "carry");
        assert_eq!(morphy.lemmatize("runs", PosCategory::Verb), "run");
    }

    #[test]
    fn test_doubled_consonant() {
        let lexicon = lexicon();
        let morphy = Morphy::new(&lexicon);
        assert_eq!(morphy.lemmatize("running", PosCategory::Verb), "run");
        assert_eq!(morphy.lemmatize("hopped", PosCategory::Verb), "hop");
        assert_eq!(morphy.lemmatize("bigger", PosCategory::Adjective), "big");
    }

    #[test]
    fn test_exceptions() {
        let lexicon = lexicon();
        let morphy = Morphy::new(&lexicon);
        assert_eq!(morphy.lemmatize("ran", PosCategory::Verb), "run");
        assert_eq!(morphy.lemmatize("happier", PosCategory::Adjective), "happy");
        assert_eq!(morphy.lemmatize("men", PosCategory::Noun), "man");
    }

    #[test]
    fn test_exception_keeps_listed_surface_form() {
        let lexicon = lexicon();
        let morphy = Morphy::new(&lexicon);
        assert_eq!(morphy.candidates("saw", PosCategory::Verb), vec!["saw", "see"]);
        assert_eq!(morphy.lemmatize("saw", PosCategory::Verb), "saw");
    }

    #[test]
    fn test_pos_guides_reduction() {
        let lexicon = lexicon();
        let morphy = Morphy::new(&lexicon);
        assert_eq!(morphy.lemmatize("saw", PosCategory::Noun), "saw");
        assert_eq!(morphy.lemmatize("quickly", PosCategory::Adverb), "quickly");
    }

    #[test]
    fn test_unknown_uses_noun_rules() {
        let lexicon = lexicon();
        let morphy = Morphy::new(&lexicon);
        assert_eq!(morphy.lemmatize("cats", PosCategory::Unknown), "cat");
    }

    #[test]
    fn test_unlisted_form_returned_unchanged() {
        let lexicon = lexicon();
        let morphy = Morphy::new(&lexicon);
        assert_eq!(morphy.lemmatize("xqzts", PosCategory::Noun), "xqzts");
        assert!(morphy.candidates("xqzts", PosCategory::Noun).is_empty());
    }

    #[test]
    fn test_undouble() {
        assert_eq!(undouble("runn"), Some("run".to_string()));
        assert_eq!(undouble("bigg"), Some("big".to_string()));
        assert_eq!(undouble("see"), None);
        assert_eq!(undouble("ll"), None);
        assert_eq!(undouble("run"), None);
    }
}
