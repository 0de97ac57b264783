//! Vibe validation, dominant-vibe resolution and caption type mapping
use serde_json::json;
use vibe_caption::{CaptionType, Threshold, VibeDimension, VibeVector};

fn values(vector: &VibeVector) -> Vec<u8> {
    vector.iter().map(|(_, v)| v).collect()
}

// ============================================================================
// Validation
// ============================================================================

#[test]
fn test_validate_non_object_gives_defaults() {
    for raw in [json!(null), json!("humor"), json!([80, 10]), json!(42), json!(true)] {
        let vector = VibeVector::validate(&raw);
        assert_eq!(vector, VibeVector::default(), "input {} should normalize to defaults", raw);
    }
    assert_eq!(values(&VibeVector::default()), vec![30, 20, 50, 20, 10, 20]);
}

#[test]
fn test_validate_partial_object_fills_missing() {
    let vector = VibeVector::validate(&json!({"humor": 75, "poeticism": 5}));
    assert_eq!(values(&vector), vec![75, 20, 50, 20, 10, 5]);
}

#[test]
fn test_validate_rejects_out_of_range_and_non_numbers() {
    let vector = VibeVector::validate(&json!({
        "humor": 150,
        "romance": -5,
        "energy": "80",
        "formality": null,
        "sarcasm": {"level": 90},
        "poeticism": 100
    }));
    assert_eq!(values(&vector), vec![30, 20, 50, 20, 10, 100]);
}

#[test]
fn test_validate_rounds_fractions() {
    let vector = VibeVector::validate(&json!({"humor": 44.6, "romance": 0.4, "energy": 99.5}));
    assert_eq!(vector.get(VibeDimension::Humor), 45);
    assert_eq!(vector.get(VibeDimension::Romance), 0);
    assert_eq!(vector.get(VibeDimension::Energy), 100);
}

#[test]
fn test_validate_ignores_unknown_keys() {
    let vector = VibeVector::validate(&json!({"chaos": 99, "Humor": 90}));
    assert_eq!(vector, VibeVector::default());
}

#[test]
fn test_with_applies_same_rule() {
    let vector = VibeVector::default()
        .with(VibeDimension::Humor, 101)
        .with(VibeDimension::Sarcasm, 70);
    assert_eq!(vector.get(VibeDimension::Humor), 30);
    assert_eq!(vector.get(VibeDimension::Sarcasm), 70);
}

// ============================================================================
// Dominant vibe
// ============================================================================

#[test]
fn test_default_vector_is_energy_dominant() {
    assert_eq!(VibeVector::default().dominant(), VibeDimension::Energy);
}

#[test]
fn test_dominant_tie_goes_to_canonical_order() {
    let vector = VibeVector::validate(&json!({"humor": 70, "romance": 70}));
    assert_eq!(vector.dominant(), VibeDimension::Humor);

    let vector = VibeVector::validate(&json!({"sarcasm": 90, "poeticism": 90, "energy": 10}));
    assert_eq!(vector.dominant(), VibeDimension::Sarcasm);
}

#[test]
fn test_dominant_is_deterministic() {
    let vector = VibeVector::validate(&json!({"formality": 88, "humor": 12}));
    let first = vector.dominant();
    for _ in 0..10 {
        assert_eq!(vector.dominant(), first);
    }
    assert_eq!(first, VibeDimension::Formality);
}

#[test]
fn test_iter_is_canonical() {
    let keys: Vec<&str> = VibeVector::default().iter().map(|(d, _)| d.key()).collect();
    assert_eq!(
        keys,
        vec!["humor", "romance", "energy", "formality", "sarcasm", "poeticism"]
    );
}

// ============================================================================
// Thresholds
// ============================================================================

#[test]
fn test_threshold_buckets() {
    assert_eq!(Threshold::bucket(0), None);
    assert_eq!(Threshold::bucket(39), None);
    assert_eq!(Threshold::bucket(40), Some(Threshold::Light));
    assert_eq!(Threshold::bucket(59), Some(Threshold::Light));
    assert_eq!(Threshold::bucket(60), Some(Threshold::Medium));
    assert_eq!(Threshold::bucket(79), Some(Threshold::Medium));
    assert_eq!(Threshold::bucket(80), Some(Threshold::Strong));
    assert_eq!(Threshold::bucket(100), Some(Threshold::Strong));
}

#[test]
fn test_threshold_keys() {
    assert_eq!(Threshold::from_key("60"), Some(Threshold::Medium));
    assert_eq!(Threshold::from_key("50"), None);
    assert_eq!(Threshold::Strong.value(), 80);
}

// ============================================================================
// Presets and serde
// ============================================================================

#[test]
fn test_presets() {
    assert_eq!(values(&VibeVector::preset(CaptionType::Funny)), vec![80, 10, 60, 10, 30, 20]);
    assert_eq!(VibeVector::preset(CaptionType::Romantic).dominant(), VibeDimension::Romance);
    assert_eq!(VibeVector::preset(CaptionType::Motivational).dominant(), VibeDimension::Energy);
    assert_eq!(
        VibeVector::preset(CaptionType::Witty),
        VibeVector::preset(CaptionType::Default),
        "types without a dedicated preset share the neutral one"
    );
}

#[test]
fn test_vector_serializes_as_object() {
    let value = serde_json::to_value(VibeVector::default()).unwrap();
    assert_eq!(
        value,
        json!({"humor": 30, "romance": 20, "energy": 50, "formality": 20, "sarcasm": 10, "poeticism": 20})
    );
}

#[test]
fn test_vector_deserialize_validates() {
    let vector: VibeVector = serde_json::from_value(json!({"humor": 500, "energy": 70})).unwrap();
    assert_eq!(vector.get(VibeDimension::Humor), 30);
    assert_eq!(vector.get(VibeDimension::Energy), 70);
}

#[test]
fn test_dimension_keys() {
    assert_eq!(VibeDimension::from_key(" Poeticism "), Some(VibeDimension::Poeticism));
    assert_eq!(VibeDimension::from_key("vibes"), None);
    assert_eq!(VibeDimension::Sarcasm.to_string(), "sarcasm");
}

// ============================================================================
// Caption types
// ============================================================================

#[test]
fn test_caption_type_parse() {
    assert_eq!(CaptionType::parse("FUNNY"), CaptionType::Funny);
    assert_eq!(CaptionType::parse("  business "), CaptionType::Business);
    assert_eq!(CaptionType::parse("nope"), CaptionType::Default);
    assert_eq!(CaptionType::parse(""), CaptionType::Default);
    assert_eq!(CaptionType::from_key("nope"), None);
}

#[test]
fn test_caption_type_for_dimension() {
    let mapped: Vec<CaptionType> = VibeDimension::ALL
        .into_iter()
        .map(CaptionType::for_dimension)
        .collect();
    assert_eq!(
        mapped,
        vec![
            CaptionType::Funny,
            CaptionType::Romantic,
            CaptionType::Motivational,
            CaptionType::Business,
            CaptionType::Witty,
            CaptionType::Artistic,
        ]
    );
}

#[test]
fn test_caption_type_serde() {
    assert_eq!(serde_json::to_string(&CaptionType::Witty).unwrap(), "\"witty\"");
    let parsed: CaptionType = serde_json::from_str("\"Artistic\"").unwrap();
    assert_eq!(parsed, CaptionType::Artistic);
    let unknown: CaptionType = serde_json::from_str("\"sparkly\"").unwrap();
    assert_eq!(unknown, CaptionType::Default);
}
