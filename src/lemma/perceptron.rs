//! Averaged-perceptron tagger.
//!
//! Loads the JSON model layout `{"weights": {feature: {tag: weight}},
//! "tagdict": {word: tag}, "classes": [tag, ...]}` and reproduces the
//! standard feature template: suffix, first letter, the two previous tags,
//! and a window of two words on each side.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::tagger::PosTagger;
use crate::error::{Error, Result};

const START: [&str; 2] = ["-START-", "-START2-"];
const END: [&str; 2] = ["-END-", "-END2-"];

/// Serialized perceptron weights.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PerceptronModel {
    pub weights: HashMap<String, HashMap<String, f64>>,
    #[serde(default)]
    pub tagdict: HashMap<String, String>,
    pub classes: Vec<String>,
}

/// Perceptron tagger over a loaded [`PerceptronModel`].
#[derive(Debug, Clone)]
pub struct PerceptronTagger {
    weights: FxHashMap<String, FxHashMap<String, f64>>,
    tagdict: FxHashMap<String, String>,
    classes: Vec<String>,
}

impl PerceptronTagger {
    /// Load a JSON model file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| Error::Model(format!("cannot open {}: {}", path.display(), e)))?;
        let model: PerceptronModel = serde_json::from_reader(BufReader::new(file))?;
        let tagger = Self::from_model(model)?;
        log::info!(
            "loaded perceptron tagger from {}: {} features, {} classes",
            path.display(),
            tagger.weights.len(),
            tagger.classes.len()
        );
        Ok(tagger)
    }

    /// Build from an in-memory model.
    pub fn from_model(model: PerceptronModel) -> Result<Self> {
        if model.classes.is_empty() {
            return Err(Error::Model("perceptron model has no classes".into()));
        }
        Ok(Self {
            weights: model
                .weights
                .into_iter()
                .map(|(feature, w)| (feature, w.into_iter().collect()))
                .collect(),
            tagdict: model.tagdict.into_iter().collect(),
            classes: model.classes,
        })
    }

    fn predict(&self, features: &FxHashMap<String, u32>) -> &str {
        let mut scores: FxHashMap<&str, f64> = FxHashMap::default();
        for (feature, &count) in features {
            let Some(weights) = self.weights.get(feature) else {
                continue;
            };
            for (label, weight) in weights {
                *scores.entry(label.as_str()).or_default() += f64::from(count) * weight;
            }
        }

        // Highest score wins; ties go to the lexically greatest label.
        let mut best = self.classes[0].as_str();
        let mut best_score = scores.get(best).copied().unwrap_or(0.0);
        for class in &self.classes[1..] {
            let score = scores.get(class.as_str()).copied().unwrap_or(0.0);
            if score > best_score || (score == best_score && class.as_str() > best) {
                best = class.as_str();
                best_score = score;
            }
        }
        best
    }
}

fn normalize(word: &str) -> String {
    if word.contains('-') && !word.starts_with('-') {
        "!HYPHEN".to_string()
    } else if word.chars().count() == 4 && word.chars().all(|c| c.is_ascii_digit()) {
        "!YEAR".to_string()
    } else if word.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        "!DIGITS".to_string()
    } else {
        word.to_lowercase()
    }
}

fn suffix(word: &str, n: usize) -> &str {
    match word.char_indices().rev().nth(n.saturating_sub(1)) {
        Some((idx, _)) => &word[idx..],
        None => word,
    }
}

fn prefix(word: &str) -> &str {
    match word.char_indices().nth(1) {
        Some((idx, _)) => &word[..idx],
        None => word,
    }
}

fn features(
    i: usize,
    word: &str,
    context: &[String],
    prev: &str,
    prev2: &str,
) -> FxHashMap<String, u32> {
    let i = i + START.len();
    let mut features = FxHashMap::default();
    let mut add = |name: &str, args: &[&str]| {
        let key = std::iter::once(name)
            .chain(args.iter().copied())
            .collect::<Vec<_>>()
            .join(" ");
        *features.entry(key).or_insert(0) += 1;
    };

    add("bias", &[]);
    add("i suffix", &[suffix(word, 3)]);
    add("i pref1", &[prefix(word)]);
    add("i-1 tag", &[prev]);
    add("i-2 tag", &[prev2]);
    add("i tag+i-2 tag", &[prev, prev2]);
    add("i word", &[context[i].as_str()]);
    add("i-1 tag+i word", &[prev, context[i].as_str()]);
    add("i-1 word", &[context[i - 1].as_str()]);
    add("i-1 suffix", &[suffix(&context[i - 1], 3)]);
    add("i-2 word", &[context[i - 2].as_str()]);
    add("i+1 word", &[context[i + 1].as_str()]);
    add("i+1 suffix", &[suffix(&context[i + 1], 3)]);
    add("i+2 word", &[context[i + 2].as_str()]);
    features
}

impl PosTagger for PerceptronTagger {
    fn name(&self) -> &str {
        "perceptron"
    }

    fn tag(&self, tokens: &[String]) -> Vec<String> {
        let context: Vec<String> = START
            .iter()
            .map(|s| s.to_string())
            .chain(tokens.iter().map(|t| normalize(t)))
            .chain(END.iter().map(|s| s.to_string()))
            .collect();

        let mut prev = START[0].to_string();
        let mut prev2 = START[1].to_string();
        let mut tags = Vec::with_capacity(tokens.len());
        for (i, word) in tokens.iter().enumerate() {
            let tag = match self.tagdict.get(word) {
                Some(tag) => tag.clone(),
                None => {
                    let feats = features(i, word, &context, &prev, &prev2);
                    self.predict(&feats).to_string()
                }
            };
            prev2 = std::mem::replace(&mut prev, tag.clone());
            tags.push(tag);
        }
        tags
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> PerceptronModel {
        let mut weights = HashMap::new();
        weights.insert(
            "i suffix ing".to_string(),
            HashMap::from([("VBG".to_string(), 1.0)]),
        );
        weights.insert(
            "bias".to_string(),
            HashMap::from([("NN".to_string(), 0.5)]),
        );
        weights.insert(
            "i-1 tag VBG".to_string(),
            HashMap::from([("NNS".to_string(), 2.0)]),
        );
        PerceptronModel {
            weights,
            tagdict: HashMap::from([("the".to_string(), "DT".to_string())]),
            classes: vec!["DT".into(), "NN".into(), "NNS".into(), "VBG".into()],
        }
    }

    fn tokens(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_tagdict_and_prediction() {
        let tagger = PerceptronTagger::from_model(model()).unwrap();
        assert_eq!(
            tagger.tag(&tokens(&["the", "dog"])),
            vec!["DT", "NN"]
        );
        assert_eq!(tagger.tag(&tokens(&["running"])), vec!["VBG"]);
    }

    #[test]
    fn test_previous_tag_feature() {
        let tagger = PerceptronTagger::from_model(model()).unwrap();
        assert_eq!(
            tagger.tag(&tokens(&["running", "dogs"])),
            vec!["VBG", "NNS"]
        );
    }

    #[test]
    fn test_tie_prefers_greatest_label() {
        let tagger = PerceptronTagger::from_model(PerceptronModel {
            weights: HashMap::new(),
            tagdict: HashMap::new(),
            classes: vec!["NN".into(), "VB".into(), "JJ".into()],
        })
        .unwrap();
        assert_eq!(tagger.tag(&tokens(&["x"])), vec!["VB"]);
    }

    #[test]
    fn test_empty_classes_rejected() {
        assert!(PerceptronTagger::from_model(PerceptronModel::default()).is_err());
    }

    #[test]
    fn test_load_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tagger.json");
        std::fs::write(&path, serde_json::to_string(&model()).unwrap()).unwrap();
        let tagger = PerceptronTagger::load(&path).unwrap();
        assert_eq!(tagger.tag(&tokens(&["the"])), vec!["DT"]);
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("well-known"), "!HYPHEN");
        assert_eq!(normalize("-x"), "-x");
        assert_eq!(normalize("1999"), "!YEAR");
        assert_eq!(normalize("42nd"), "!DIGITS");
        assert_eq!(normalize("Cat"), "cat");
    }

    #[test]
    fn test_suffix_and_prefix() {
        assert_eq!(suffix("running", 3), "ing");
        assert_eq!(suffix("at", 3), "at");
        assert_eq!(suffix("café", 3), "afé");
        assert_eq!(prefix("über"), "ü");
        assert_eq!(prefix(""), "");
    }
}
