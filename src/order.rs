//! Output ordering of the result list.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::model::Vocabulary;

/// How the final vocabulary is ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderMode {
    /// First-occurrence order from extraction
    #[default]
    Original,
    /// Ascending string order
    Alphabetical,
    /// Uniform random permutation; differs between runs
    Shuffled,
}

impl std::str::FromStr for OrderMode {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "original" => Ok(OrderMode::Original),
            "alphabetical" | "lexicographic" => Ok(OrderMode::Alphabetical),
            "shuffled" | "random" => Ok(OrderMode::Shuffled),
            other => Err(crate::Error::InvalidOption(format!(
                "unknown order: {}",
                other
            ))),
        }
    }
}

/// Reorder `vocabulary`; shuffling uses the thread-local RNG.
pub fn apply_order(vocabulary: Vocabulary, mode: OrderMode) -> Vocabulary {
    apply_order_with_rng(vocabulary, mode, &mut rand::rng())
}

/// Reorder `vocabulary`, shuffling with `rng`.
///
/// # Example
/// ```
/// use rand::SeedableRng;
/// use wordsift::order::{apply_order_with_rng, OrderMode};
/// use wordsift::Vocabulary;
///
/// let words: Vocabulary = ["pear", "apple", "fig"].into_iter().collect();
/// let mut rng = rand::rngs::StdRng::seed_from_u64(7);
/// let sorted = apply_order_with_rng(words, OrderMode::Alphabetical, &mut rng);
/// assert_eq!(sorted.words(), ["apple", "fig", "pear"]);
/// ```
pub fn apply_order_with_rng<R>(vocabulary: Vocabulary, mode: OrderMode, rng: &mut R) -> Vocabulary
where
    R: Rng + ?Sized,
{
    let mut words = vocabulary.into_words();
    match mode {
        OrderMode::Original => {}
        OrderMode::Alphabetical => words.sort_unstable(),
        OrderMode::Shuffled => words.shuffle(rng),
    }
    Vocabulary::from_unique(words)
}
