use rig::client::CompletionClient;
use rig::providers::openai;
use std::env;
use vibe_caption::{
    create_llm_client_with_config, CompletionParams, Detail, ImageInput, LlmClient, LlmConfig,
    MockLlmClient,
};

// Minimal 1x1 pixel transparent PNG
const PNG_1X1: [u8; 67] = [
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
    0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0A, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00,
    0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49,
    0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];

#[test]
fn test_default_params() {
    let config = LlmConfig::default();

    assert_eq!(config.model, "gpt-4o");
    assert_eq!(config.single.max_tokens, 100);
    assert_eq!(config.single.temperature, 0.8);
    assert_eq!(config.single.detail, Detail::Low);
    assert!(config.single.top_p.is_none());

    assert_eq!(config.carousel.max_tokens, 400);
    assert_eq!(config.carousel.temperature, 0.75);
    assert_eq!(config.carousel.top_p, Some(0.9));
    assert_eq!(config.carousel.presence_penalty, Some(0.1));
    assert_eq!(config.carousel.frequency_penalty, Some(0.1));
    assert_eq!(config.carousel.detail, Detail::High);
}

#[test]
fn test_params_builder() {
    let params = CompletionParams::single_caption()
        .with_max_tokens(60)
        .with_temperature(5.0)
        .with_detail(Detail::Auto);

    assert_eq!(params.max_tokens, 60);
    assert_eq!(params.temperature, 2.0, "temperature is clamped");
    assert_eq!(params.detail, Detail::Auto);

    let config = LlmConfig::new()
        .with_model("gpt-4.1")
        .with_single_params(params.clone());
    assert_eq!(config.model, "gpt-4.1");
    assert_eq!(config.single, params);
}

#[test]
fn test_params_serde_shape() {
    let value = serde_json::to_value(CompletionParams::carousel()).unwrap();
    assert_eq!(value["maxTokens"], 400);
    assert_eq!(value["detail"], "high");
    assert_eq!(value["topP"], 0.9);

    let single = serde_json::to_value(CompletionParams::single_caption()).unwrap();
    assert!(single.get("topP").is_none());
}

#[tokio::test]
async fn test_mock_records_calls() {
    let mock = MockLlmClient::new().with_response("Nice shot ✨");
    let image = ImageInput::from_bytes(PNG_1X1.to_vec()).unwrap();
    let params = CompletionParams::single_caption();

    let reply = mock
        .complete("Write a caption.", &[image.clone(), image], &params)
        .await
        .unwrap();

    assert_eq!(reply, "Nice shot ✨");
    let calls = mock.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].instructions, "Write a caption.");
    assert_eq!(calls[0].image_count, 2);
    assert_eq!(calls[0].params, params);
}

#[tokio::test]
async fn test_llm_integration() {
    let (Ok(_), Ok(model)) = (env::var("OPENAI_API_KEY"), env::var("OPENAI_MODEL")) else {
        println!("Skipping LLM test: Missing OPENAI_API_KEY or OPENAI_MODEL");
        return;
    };

    println!("Running LLM test with model: {}", model);

    let client = openai::Client::from_env();
    let llm = create_llm_client_with_config(
        client.completion_model(&model),
        LlmConfig::default().with_model(&model),
    );

    let image = ImageInput::from_bytes(PNG_1X1.to_vec()).unwrap();
    let result = llm
        .complete(
            "Write a one-line Instagram caption for this image.",
            &[image],
            &llm.config().single,
        )
        .await;

    match result {
        Ok(caption) => {
            println!("✓ LLM caption: {}", caption);
            assert!(!caption.trim().is_empty(), "Caption should not be empty");
        }
        Err(e) => panic!("LLM test failed: {}", e),
    }
}
