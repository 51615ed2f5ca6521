use std::sync::Arc;
use std::time::Duration;

use crate::services::llm::ResponseStyle;
use crate::services::translation::failure_marker;
use crate::services::{ChunkedTranslator, Language, LLMError, TranslationError};
use crate::tests::common::{
    MockLLM, MockTranslator, TranslationCall, create_test_pipeline, test_config,
};

const TAMIL_QUESTION: &str = "நீரிழிவு என்றால் என்ன?";
const TAMIL_ANSWER: &str = "நீரிழிவு என்பது இரத்த சர்க்கரை அதிகமாக இருக்கும் நிலை.";

// ============================================================================
// End-to-end scenarios
// ============================================================================

#[tokio::test]
async fn test_english_question_brief_answer() {
    let translator = MockTranslator::tagging();
    let llm = MockLLM::answering("Diabetes is a condition of high blood sugar.");
    let pipeline = create_test_pipeline(translator.clone(), llm.clone(), &test_config());

    let output = pipeline.answer("What is diabetes?").await;

    assert_eq!(output, "**Answer:** Diabetes is a condition of high blood sugar.");
    assert!(translator.calls().is_empty(), "English input must not be translated");

    let prompts = llm.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("Question: What is diabetes?"));
    assert!(prompts[0].contains("1-2 short sentences"));
}

#[tokio::test]
async fn test_tamil_question_round_trip() {
    let translator = MockTranslator::with(|_, source, _| {
        Ok(match source {
            "ta" => "What is diabetes?".to_string(),
            _ => TAMIL_ANSWER.to_string(),
        })
    });
    let llm = MockLLM::answering("Diabetes is a condition of high blood sugar.");
    let pipeline = create_test_pipeline(translator.clone(), llm.clone(), &test_config());

    let answer = pipeline.run(TAMIL_QUESTION).await.unwrap();
    assert_eq!(answer.language, Language::Tamil);
    assert_eq!(answer.text, TAMIL_ANSWER);
    assert_eq!(answer.formatted(), format!("**தமிழ் பதில்:** {}", TAMIL_ANSWER));

    assert_eq!(
        translator.calls(),
        vec![
            TranslationCall {
                text: TAMIL_QUESTION.to_string(),
                source: "ta".to_string(),
                target: "en".to_string(),
            },
            TranslationCall {
                text: "Diabetes is a condition of high blood sugar.".to_string(),
                source: "en".to_string(),
                target: "ta".to_string(),
            },
        ]
    );
    assert!(llm.prompts()[0].contains("Question: What is diabetes?"));
}

#[tokio::test]
async fn test_detail_cue_selects_detailed_prompt() {
    let llm = MockLLM::answering("Causes: ... Symptoms: ... Prevention: ...");
    let pipeline = create_test_pipeline(MockTranslator::tagging(), llm.clone(), &test_config());

    let answer = pipeline.run("explain diabetes in detail").await.unwrap();

    assert_eq!(answer.language, Language::English);
    assert_eq!(answer.style, ResponseStyle::Detailed);
    let prompt = &llm.prompts()[0];
    assert!(prompt.contains("causes, symptoms, prevention"));
    assert!(prompt.contains("explain diabetes in detail"));
}

#[tokio::test]
async fn test_tamil_cues_are_matched_after_translation() {
    let translator = MockTranslator::with(|text, source, _| {
        Ok(if source == "ta" { "Explain fever".to_string() } else { text.to_string() })
    });
    let llm = MockLLM::answering("Fever is ...");
    let pipeline = create_test_pipeline(translator, llm.clone(), &test_config());

    let answer = pipeline.run("காய்ச்சல் பற்றி விளக்குங்கள்").await.unwrap();
    assert_eq!(answer.style, ResponseStyle::Detailed);
}

#[tokio::test]
async fn test_generation_failure_then_recovery() {
    let llm = MockLLM::scripted(
        vec![Err(LLMError::ApiError("quota exceeded".to_string()))],
        Ok("Drink plenty of water.".to_string()),
    );
    let pipeline = create_test_pipeline(MockTranslator::tagging(), llm, &test_config());

    let failed = pipeline.answer("How do I treat dehydration?").await;
    assert!(failed.starts_with("⚠️"));
    assert!(failed.contains("quota exceeded"));

    let recovered = pipeline.answer("How do I treat dehydration?").await;
    assert_eq!(recovered, "**Answer:** Drink plenty of water.");
}

#[tokio::test]
async fn test_generation_failure_keeps_language() {
    let pipeline = create_test_pipeline(
        MockTranslator::tagging(),
        MockLLM::failing(LLMError::NoProviderConfigured),
        &test_config(),
    );

    let failure = pipeline.run(TAMIL_QUESTION).await.unwrap_err();
    assert_eq!(failure.language, Language::Tamil);
    assert_eq!(failure.error, LLMError::NoProviderConfigured);
    assert!(failure.formatted().starts_with("⚠️"));
}

#[tokio::test]
async fn test_generation_timeout_becomes_error_string() {
    let mut config = test_config();
    config.llm.timeout_secs = 1;
    let llm = MockLLM::slow("too late", Duration::from_secs(5));
    let pipeline = create_test_pipeline(MockTranslator::tagging(), llm, &config);

    let failure = pipeline.run("What is asthma?").await.unwrap_err();
    assert_eq!(failure.error, LLMError::Timeout(1));
}

#[tokio::test]
async fn test_answer_is_trimmed() {
    let llm = MockLLM::answering("\n   Rest and fluids help.  \n");
    let pipeline = create_test_pipeline(MockTranslator::tagging(), llm, &test_config());

    assert_eq!(pipeline.answer("flu?").await, "**Answer:** Rest and fluids help.");
}

#[tokio::test]
async fn test_translation_failure_is_absorbed_by_pipeline() {
    let llm = MockLLM::answering("Please consult a doctor.");
    let pipeline =
        create_test_pipeline(MockTranslator::failing("service down"), llm.clone(), &test_config());

    let answer = pipeline.run(TAMIL_QUESTION).await.unwrap();

    let marker = failure_marker(&TranslationError::Request("service down".to_string()));
    assert!(llm.prompts()[0].contains(&marker));
    assert_eq!(answer.text, marker);
    assert!(answer.formatted().starts_with("**தமிழ் பதில்:**"));
}

// ============================================================================
// Chunked translator properties
// ============================================================================

#[tokio::test]
async fn test_long_text_translated_in_three_ordered_segments() {
    let config = test_config();
    let backend = MockTranslator::tagging();
    let translator = ChunkedTranslator::new(backend.clone(), &config.translation);

    let text: String = ('a'..='z').cycle().take(12_000).collect();
    let output = translator.translate(&text, Language::English, Language::Tamil).await;

    let calls = backend.calls();
    let sizes: Vec<usize> = calls.iter().map(|c| c.text.chars().count()).collect();
    assert_eq!(sizes, vec![4900, 4900, 2200]);
    assert_eq!(calls.iter().map(|c| c.text.as_str()).collect::<String>(), text);

    let expected = calls
        .iter()
        .map(|c| format!("<en:ta>{}", c.text))
        .collect::<Vec<_>>()
        .join(" ");
    assert_eq!(output, expected);
}

#[tokio::test]
async fn test_every_segment_failing_still_returns_markers() {
    let config = test_config();
    let translator =
        ChunkedTranslator::new(MockTranslator::failing("unavailable"), &config.translation);

    let text = "x".repeat(10_000);
    let output = translator.translate(&text, Language::English, Language::Tamil).await;

    let marker = failure_marker(&TranslationError::Request("unavailable".to_string()));
    assert_eq!(output, vec![marker.as_str(); 3].join(" "));
}

#[tokio::test]
async fn test_partial_failure_keeps_other_segments() {
    let mut config = test_config();
    config.translation.chunk_size = 3;
    let backend = MockTranslator::with(|text, _, _| {
        if text == "def" {
            Err(TranslationError::Status { status: 503, body: "busy".to_string() })
        } else {
            Ok(text.to_uppercase())
        }
    });
    let translator = ChunkedTranslator::new(backend, &config.translation);

    let segments = translator.translate_segments("abcdefgh", Language::English, Language::Tamil).await;
    assert_eq!(segments.len(), 3);
    assert_eq!(segments[0], Ok("ABC".to_string()));
    assert!(segments[1].is_err());
    assert_eq!(segments[2], Ok("GH".to_string()));

    let joined = translator.translate("abcdefgh", Language::English, Language::Tamil).await;
    assert_eq!(joined, "ABC [Translation error: HTTP 503: busy] GH");
}

#[tokio::test]
async fn test_segment_timeout_becomes_marker() {
    let mut config = test_config();
    config.translation.chunk_size = 3;
    config.translation.timeout_secs = 1;
    let backend = MockTranslator::stalling_on("def", Duration::from_secs(3));
    let translator = ChunkedTranslator::new(backend.clone(), &config.translation);

    let segments = translator.translate_segments("abcdefgh", Language::English, Language::Tamil).await;
    assert_eq!(segments[1], Err(TranslationError::Timeout(1)));

    let joined = translator.translate("abcdefgh", Language::English, Language::Tamil).await;
    assert_eq!(joined, "ABC [Translation error: timed out after 1s] GH");
    assert_eq!(backend.calls().len(), 6);
}

#[tokio::test]
async fn test_translate_is_deterministic() {
    let config = test_config();
    let translator = ChunkedTranslator::new(MockTranslator::tagging(), &config.translation);
    let text = "வணக்கம் ".repeat(1500);

    let first = translator.translate(&text, Language::Tamil, Language::English).await;
    let second = translator.translate(&text, Language::Tamil, Language::English).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_empty_text_makes_no_calls() {
    let config = test_config();
    let backend = MockTranslator::tagging();
    let translator = ChunkedTranslator::new(backend.clone(), &config.translation);

    assert_eq!(translator.translate("", Language::Tamil, Language::English).await, "");
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn test_same_language_skips_backend() {
    let config = test_config();
    let backend = MockTranslator::tagging();
    let translator = ChunkedTranslator::new(backend.clone(), &config.translation);

    let output = translator.translate("hello", Language::English, Language::English).await;
    assert_eq!(output, "hello");
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn test_shared_pipeline_serves_concurrent_requests() {
    let llm = MockLLM::answering("ok");
    let pipeline =
        Arc::new(create_test_pipeline(MockTranslator::tagging(), llm.clone(), &test_config()));

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let pipeline = pipeline.clone();
            tokio::spawn(async move { pipeline.answer(&format!("question {}", i)).await })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await.unwrap(), "**Answer:** ok");
    }
    assert_eq!(llm.prompts().len(), 4);
}
