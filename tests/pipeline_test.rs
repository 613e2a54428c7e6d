//! End-to-end tests for the extraction pipeline.

use std::sync::Arc;

use wordsift::{
    Engine, Error, Lexicon, LookupModel, OrderMode, Pipeline, PipelineOptions, PosCategory,
    PresetLibrary, Resources, SourceDocument, Wordsift,
};

fn lexicon() -> Lexicon {
    Lexicon::builder()
        .words(PosCategory::Noun, ["cat", "dog", "run", "jump", "garden"])
        .words(PosCategory::Verb, ["run", "jump", "be", "chase"])
        .words(PosCategory::Adverb, ["quickly"])
        .exception(PosCategory::Verb, "ran", "run")
        .exception(PosCategory::Verb, "are", "be")
        .build()
}

fn resources() -> Resources {
    Resources::new(lexicon())
}

fn text(name: &str, body: &str) -> SourceDocument {
    SourceDocument::from_text(name, body)
}

const SENTENCE: &str = "The cats are running and jumped quickly.";

// ==================== Core behaviour ====================

#[test]
fn test_sentence_lemmas_in_first_occurrence_order() {
    let result = Wordsift::new().run(&resources(), &[text("a.txt", SENTENCE)]);
    assert_eq!(result.words.words(), ["cat", "run", "jump", "quickly"]);
    for excluded in ["the", "are", "and", "be"] {
        assert!(!result.words.contains(excluded), "{} should be excluded", excluded);
    }
    assert_eq!(result.engine, Engine::Fast);
    assert!(result.notices.is_empty());
}

#[test]
fn test_shuffled_keeps_membership() {
    let result = Wordsift::new()
        .shuffled()
        .run(&resources(), &[text("a.txt", SENTENCE)]);
    let mut words = result.words.words().to_vec();
    words.sort();
    assert_eq!(words, ["cat", "jump", "quickly", "run"]);
}

#[test]
fn test_alphabetical_order() {
    let result = Wordsift::new()
        .alphabetical()
        .run(&resources(), &[text("a.txt", SENTENCE)]);
    assert_eq!(result.words.words(), ["cat", "jump", "quickly", "run"]);
}

#[test]
fn test_inflections_collapse_to_one_lemma() {
    let result = Wordsift::new().run(&resources(), &[text("a.txt", "Run run RUNNING Ran")]);
    assert_eq!(result.words.words(), ["run"]);
    assert_eq!(result.stats.token_count, 4);
}

#[test]
fn test_min_length_filter() {
    let result = Wordsift::new()
        .with_min_length(5)
        .run(&resources(), &[text("a.txt", "cat jump quickly")]);
    assert_eq!(result.words.words(), ["quickly"]);
}

#[test]
fn test_custom_filter_removes_words() {
    let result = Wordsift::new()
        .with_custom_filter(["Cat"])
        .run(&resources(), &[text("a.txt", SENTENCE)]);
    assert_eq!(result.words.words(), ["run", "jump", "quickly"]);
}

#[test]
fn test_preset_filter() {
    let resources =
        resources().with_presets(PresetLibrary::new().with_preset("basic", ["cat", "run"]));
    let result = Wordsift::new()
        .with_preset("basic")
        .run(&resources, &[text("a.txt", SENTENCE)]);
    assert_eq!(result.words.words(), ["jump", "quickly"]);
    assert!(result.notices.is_empty());
}

// ==================== Empty input ====================

#[test]
fn test_no_sources() {
    let result = Wordsift::new().run(&resources(), &[]);
    assert!(result.words.is_empty());
    assert_eq!(result.stats.files_processed, 0);
    assert_eq!(result.notices, vec![Error::EmptyInput.to_string()]);
}

#[test]
fn test_sources_without_text() {
    let sources = [
        text("blank.srt", "1\n00:00:01,000 --> 00:00:02,000\n\n"),
        text("empty.txt", ""),
    ];
    let result = Wordsift::new().run(&resources(), &sources);
    assert!(result.words.is_empty());
    assert_eq!(result.stats.files_processed, 2);
    assert_eq!(result.stats.files_with_text, 0);
    assert!(result.notices.contains(&Error::EmptyInput.to_string()));
}

#[test]
fn test_utf16_without_bom_is_decoded() {
    let bytes: Vec<u8> = "The cats and dogs walked in the garden."
        .encode_utf16()
        .flat_map(u16::to_le_bytes)
        .collect();
    let result = Wordsift::new().run(&resources(), &[SourceDocument::new("a.txt", bytes)]);
    assert_eq!(result.words.words(), ["cat", "dog", "garden"]);
    assert_eq!(result.sources[0].encoding.as_deref(), Some("UTF-16LE"));
    assert!(result.sources[0].issue.is_none());
}

#[test]
fn test_non_english_letters_need_a_lexicon_entry() {
    let result = Wordsift::new().run(&resources(), &[text("a.txt", "Café über cats")]);
    assert_eq!(result.words.words(), ["cat"]);
    assert_eq!(result.stats.token_count, 3);
}

// ==================== Properties ====================

#[test]
fn test_deterministic_without_shuffle() {
    let sources = [text("a.txt", SENTENCE), text("b.txt", "Dogs chase cats.")];
    let first = Wordsift::new().run(&resources(), &sources);
    let second = Wordsift::new().run(&resources(), &sources);
    assert_eq!(first.words, second.words);
    assert_eq!(first.stats, second.stats);
}

#[test]
fn test_filtering_by_own_output_is_empty() {
    let sources = [text("a.txt", SENTENCE)];
    let first = Wordsift::new().run(&resources(), &sources);
    let second = Wordsift::new()
        .with_custom_filter(first.words.words().to_vec())
        .run(&resources(), &sources);
    assert!(second.words.is_empty());
}

#[test]
fn test_multiple_files_keep_first_occurrence() {
    let sources = [
        text("a.srt", "1\n00:00:01,000 --> 00:00:02,000\n<i>Dogs</i> jumped\n"),
        text("b.txt", "cats and dogs"),
    ];
    let result = Wordsift::new().run(&resources(), &sources);
    assert_eq!(result.words.words(), ["dog", "jump", "cat"]);
    assert_eq!(result.stats.files_with_text, 2);
}

#[test]
fn test_output_has_no_duplicates_and_respects_min_length() {
    let sources = [text("a.txt", "cats cats dogs ran run running chase chased ox")];
    let result = Wordsift::new().with_min_length(4).run(&resources(), &sources);
    let words = result.words.words();
    let mut unique = words.to_vec();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), words.len());
    assert!(words.iter().all(|w| w.chars().count() >= 4));
}

// ==================== Reporting ====================

#[test]
fn test_legacy_doc_reported_not_fatal() {
    let sources = [
        SourceDocument::new("old.doc", b"\xD0\xCF\x11\xE0\xA1\xB1\x1A\xE1".to_vec()),
        text("b.txt", "cats"),
    ];
    let result = Wordsift::new().run(&resources(), &sources);
    assert_eq!(result.words.words(), ["cat"]);
    assert!(result.has_warnings());
    assert_eq!(result.issues().count(), 1);
    assert_eq!(result.sources[0].format, "doc");
    assert!(result.sources[0]
        .issue
        .as_deref()
        .is_some_and(|issue| issue.contains("Unsupported")));
}

#[test]
fn test_accurate_engine_with_lookup_model() {
    let resources = resources();
    let model = LookupModel::new(resources.tagger().clone())
        .with_entry("cats", "*", "cat")
        .with_entry("jumped", "V", "jump");
    let resources = resources.with_contextual_model(Arc::new(model));
    let options = PipelineOptions::new().accurate().with_batch_size(2);
    let result = Pipeline::new(&resources, options).run(&[text("a.txt", "cats jumped dogs")]);
    assert_eq!(result.engine, Engine::Accurate);
    // "dogs" has no entry and is not itself a dictionary word
    assert_eq!(result.words.words(), ["cat", "jump"]);
}

#[test]
fn test_options_from_json() {
    let options = PipelineOptions::from_json_str(
        r#"{"min_length": 4, "order": "alphabetical", "custom_filter": ["jump"]}"#,
    )
    .unwrap();
    assert_eq!(options.order, OrderMode::Alphabetical);
    let result = wordsift::extract(&resources(), &[text("a.txt", SENTENCE)], options);
    assert_eq!(result.words.words(), ["quickly"]);
}

#[test]
fn test_result_serializes_to_json() {
    let result = Wordsift::new().run(&resources(), &[text("a.txt", SENTENCE)]);
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["engine"], "fast");
    assert_eq!(json["words"][0], "cat");
    assert_eq!(json["stats"]["word_count"], 4);
}
