//! Single-image prompt compilation
use serde_json::json;
use std::sync::Arc;
use vibe_caption::prompts::{BUILTIN_PERSONAS, FORMAT_CONSTRAINTS};
use vibe_caption::{
    compile_prompt, CaptionConfig, CaptionType, PersonaEntry, PromptCompiler, SpliceOutcome,
    SplicePoint, VibeDimension, VibeVector,
};

fn compiler() -> PromptCompiler {
    PromptCompiler::new(Arc::new(CaptionConfig::builtin()))
}

fn builtin_entry(key: &str) -> (&'static str, &'static str) {
    let &(_, persona, example) = BUILTIN_PERSONAS
        .iter()
        .find(|(k, _, _)| *k == key)
        .expect("builtin persona");
    (persona, example)
}

// ============================================================================
// Caption type path
// ============================================================================

#[test]
fn test_caption_type_prompt_layout() {
    let (persona, example) = builtin_entry("funny");
    let prompt = compiler().compile(Some("funny"), None);

    assert_eq!(
        prompt.as_str(),
        format!("{} Example tone: \"{}\"{}", persona, example, FORMAT_CONSTRAINTS)
    );
    assert_eq!(prompt.caption_type, CaptionType::Funny);
    assert!(prompt.dominant.is_none());
    assert!(prompt.modifiers.is_empty());
}

#[test]
fn test_unknown_or_missing_type_uses_default() {
    let compiler = compiler();
    let default = compiler.compile_type(CaptionType::Default);

    assert_eq!(compiler.compile(Some("🦄 sparkle mode"), None), default);
    assert_eq!(compiler.compile(None, None), default);
    assert!(default.as_str().starts_with(builtin_entry("default").0));
}

#[test]
fn test_non_object_vibes_are_ignored() {
    let compiler = compiler();
    let witty = compiler.compile_type(CaptionType::Witty);

    for vibes in [json!(null), json!({}), json!([90, 10]), json!("humor")] {
        assert_eq!(
            compiler.compile(Some("witty"), Some(&vibes)),
            witty,
            "vibes {} should fall back to the caption type",
            vibes
        );
    }
}

#[test]
fn test_every_prompt_ends_with_format_constraints() {
    let compiler = compiler();
    let mut names: Vec<String> = CaptionType::ALL.iter().map(|t| t.key().to_string()).collect();
    names.extend(["", "FUNNY", "unknown", "<script>"].iter().map(|s| s.to_string()));

    for name in &names {
        let prompt = compiler.compile(Some(name), None);
        assert!(!prompt.as_str().is_empty());
        assert!(
            prompt.as_str().ends_with(FORMAT_CONSTRAINTS),
            "prompt for '{}' lost the format constraints",
            name
        );
    }

    for caption_type in CaptionType::ALL {
        let vibes = VibeVector::preset(caption_type);
        let prompt = compiler.compile_vibes(&vibes);
        assert!(prompt.as_str().contains(FORMAT_CONSTRAINTS));
    }
}

// ============================================================================
// Vibe path
// ============================================================================

#[test]
fn test_vibes_take_precedence_over_caption_type() {
    let prompt = compiler().compile(Some("business"), Some(&json!({"romance": 95})));
    assert_eq!(prompt.caption_type, CaptionType::Romantic);
    assert_eq!(prompt.dominant, Some(VibeDimension::Romance));
}

#[test]
fn test_no_secondary_above_threshold_matches_caption_type_prompt() {
    let compiler = compiler();
    let cases = [
        (json!({"humor": 30}), CaptionType::Motivational),
        (json!({"humor": 90, "energy": 39}), CaptionType::Funny),
        (json!({"sarcasm": 70, "energy": 10}), CaptionType::Witty),
        (json!({"poeticism": 100, "energy": 0}), CaptionType::Artistic),
    ];

    for (vibes, expected) in cases {
        let with_vibes = compiler.compile(None, Some(&vibes));
        let plain = compiler.compile_type(expected);
        assert_eq!(with_vibes.as_str(), plain.as_str(), "vibes {}", vibes);
        assert!(with_vibes.modifiers.is_empty());
    }
}

#[test]
fn test_modifier_anchored_after_splice_point() {
    let prompt = compiler().compile(None, Some(&json!({"energy": 90, "humor": 60})));

    assert_eq!(prompt.caption_type, CaptionType::Motivational);
    assert_eq!(prompt.modifiers.len(), 1);
    assert_eq!(prompt.modifiers[0].dimension, VibeDimension::Humor);
    assert_eq!(prompt.modifiers[0].threshold, 60);
    assert_eq!(prompt.modifiers[0].phrase, "with playful wit");
    assert_eq!(prompt.modifiers[0].outcome, SpliceOutcome::Anchored);
    assert!(prompt
        .as_str()
        .contains("close friend. Given an image with playful wit (gym selfie"));
}

#[test]
fn test_modifiers_fall_back_to_image_clause_in_order() {
    let prompt = compiler().compile(
        None,
        Some(&json!({"humor": 85, "romance": 45, "energy": 65})),
    );

    assert_eq!(prompt.caption_type, CaptionType::Funny);
    let outcomes: Vec<SpliceOutcome> = prompt.modifiers.iter().map(|m| m.outcome).collect();
    assert_eq!(outcomes, vec![SpliceOutcome::Fallback, SpliceOutcome::Fallback]);
    assert!(prompt.as_str().starts_with(
        "You are a Gen-Z/30s \"mood\" curator with subtle warmth with vibrant energy. Given an image"
    ));
}

#[test]
fn test_strongest_bucket_wins() {
    let prompt = compiler().compile(None, Some(&json!({"romance": 90, "energy": 0, "poeticism": 80})));
    assert_eq!(prompt.modifiers.len(), 1);
    assert_eq!(prompt.modifiers[0].phrase, "with poetic elegance");
    assert!(prompt
        .as_str()
        .contains("who keeps it genuine with poetic elegance. Given an image"));
}

#[test]
fn test_modifier_dropped_without_any_anchor() {
    let config = CaptionConfig::builtin()
        .with_persona(CaptionType::Motivational, PersonaEntry::new("Cheer them on!", "Go!"));
    let prompt = PromptCompiler::new(Arc::new(config))
        .compile(None, Some(&json!({"energy": 90, "sarcasm": 50})));

    assert_eq!(prompt.modifiers.len(), 1);
    assert_eq!(prompt.modifiers[0].outcome, SpliceOutcome::Dropped);
    assert!(prompt.as_str().starts_with("Cheer them on! Example tone: \"Go!\""));
}

#[test]
fn test_custom_splice_point_and_constraints() {
    let config = CaptionConfig::builtin()
        .with_persona(CaptionType::Motivational, PersonaEntry::new("Cheer them on!", "Go!"))
        .with_splice_point(VibeDimension::Sarcasm, SplicePoint::AtEnd)
        .with_format_constraints("\nPlain text only.");
    let prompt = PromptCompiler::new(Arc::new(config))
        .compile(None, Some(&json!({"energy": 90, "sarcasm": 50})));

    assert_eq!(
        prompt.as_str(),
        "Cheer them on! with dry wit Example tone: \"Go!\"\nPlain text only."
    );
    assert_eq!(prompt.modifiers[0].outcome, SpliceOutcome::Anchored);
}

#[test]
fn test_missing_splice_point_uses_image_clause() {
    let config = CaptionConfig::builtin().without_splice_point(VibeDimension::Humor);
    let prompt = PromptCompiler::new(Arc::new(config))
        .compile(None, Some(&json!({"energy": 90, "humor": 60})));

    assert_eq!(prompt.modifiers[0].outcome, SpliceOutcome::Fallback);
    assert!(prompt
        .as_str()
        .contains("close friend with playful wit. Given an image"));
}

#[test]
fn test_compile_is_deterministic() {
    let vibes = json!({"humor": 61, "romance": 44, "energy": 80, "formality": 79, "sarcasm": 40, "poeticism": 99});
    let first = compiler().compile(Some("funny"), Some(&vibes));
    let second = compiler().compile(Some("funny"), Some(&vibes));
    assert_eq!(first, second);
    assert_eq!(first.dominant, Some(VibeDimension::Poeticism));
    assert_eq!(first.modifiers.len(), 5);
}

#[test]
fn test_compile_prompt_helper() {
    let text = compile_prompt(Some("explain"), None);
    assert!(text.starts_with("You are an ultra-visual explainer"));
    assert_eq!(text, compiler().compile_type(CaptionType::Explain).into_string());
}
