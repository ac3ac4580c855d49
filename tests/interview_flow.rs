use std::sync::Arc;

use mock_interview::error::{AppError, CapabilityError, SessionError, TranscriptionFailure};
use mock_interview::models::{AnswerSubmission, AudioPayload, SessionPhase, SpeechOptions};
use mock_interview::services::ANALYSIS_FAILURE_TEXT;
use mock_interview::{
    Config, InterviewOrchestrator, InterviewTriple, JobDescription, MockProvider, Question,
    SessionRecord,
};

fn setup(config: Config) -> (MockProvider, InterviewOrchestrator) {
    let mock = MockProvider::new();
    let orchestrator = InterviewOrchestrator::new(Arc::new(mock.clone()), &config);
    (mock, orchestrator)
}

fn jd() -> JobDescription {
    JobDescription::new("后端工程师：Python、REST API、数据库设计").unwrap()
}

fn submission(number: usize, text: &str, bytes: usize) -> AnswerSubmission {
    AnswerSubmission::new(
        Question::new(number, text),
        AudioPayload::new("answer.webm", vec![7u8; bytes]),
        Some("zh".to_string()),
    )
}

#[tokio::test]
async fn test_start_session_returns_questions_in_order() {
    let (mock, orchestrator) = setup(Config::default());
    mock.push_text(Ok("介绍一下你自己\n\n描述一次数据库优化\n  如何设计 REST API  ".to_string()));

    let questions = orchestrator.start_session(&jd()).await.unwrap();

    let texts: Vec<&str> = questions.iter().map(|q| q.text.as_str()).collect();
    assert_eq!(
        texts,
        vec!["介绍一下你自己", "描述一次数据库优化", "如何设计 REST API"]
    );
    let numbers: Vec<usize> = questions.iter().map(|q| q.number).collect();
    assert_eq!(numbers, vec![1, 2, 3]);

    let prompts = mock.text_prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].1.contains("数据库设计"));
    assert!(prompts[0].1.contains('5'));
}

#[tokio::test]
async fn test_start_session_honors_configured_count() {
    let config = Config {
        question_count: 3,
        ..Config::default()
    };
    let (mock, orchestrator) = setup(config);
    mock.push_text(Ok("问题一\n问题二\n问题三".to_string()));

    let questions = orchestrator.start_session(&jd()).await.unwrap();

    assert_eq!(
        questions,
        vec![
            Question::new(1, "问题一"),
            Question::new(2, "问题二"),
            Question::new(3, "问题三"),
        ]
    );
    let prompts = mock.text_prompts();
    assert!(prompts[0].1.contains("生成 3 个"));
}

#[tokio::test]
async fn test_transcribe_then_analyze_in_two_steps() {
    let (mock, orchestrator) = setup(Config::default());
    mock.push_transcription(Ok("我熟悉 PostgreSQL".to_string()));
    mock.push_text(Ok("回答具体".to_string()));

    let transcribed = orchestrator
        .transcribe_answer(submission(1, "描述一次数据库优化", 32).with_duration(Some(4.0)))
        .await
        .unwrap();
    assert_eq!(transcribed.transcript.text, "我熟悉 PostgreSQL");
    assert_eq!(mock.text_calls(), 0);

    let outcome = orchestrator.analyze_answer(transcribed, &jd()).await;
    assert_eq!(outcome.analysis.text, "回答具体");
    assert_eq!(outcome.question.number, 1);
    assert_eq!(outcome.speaking_rate, Some(210.0));
}

#[tokio::test]
async fn test_start_session_fails_without_questions() {
    let (mock, orchestrator) = setup(Config::default());
    mock.push_text(Err(CapabilityError::Api {
        message: "connection refused".to_string(),
    }));

    let result = orchestrator.start_session(&jd()).await;
    assert!(matches!(
        result,
        Err(AppError::Session(SessionError::QuestionGenerationFailed))
    ));
}

#[tokio::test]
async fn test_oversized_audio_is_rejected_before_any_call() {
    let config = Config {
        max_transcription_bytes: 8,
        ..Config::default()
    };
    let (mock, orchestrator) = setup(config);

    let result = orchestrator
        .submit_answer(submission(1, "介绍一下你自己", 16), &jd())
        .await;

    match result {
        Err(AppError::Transcription(failure)) => {
            assert_eq!(failure, TranscriptionFailure::PayloadTooLarge);
            assert_eq!(failure.to_string(), "payload too large");
        }
        other => panic!("unexpected result: {:?}", other.map(|o| o.transcript)),
    }
    assert_eq!(mock.transcription_calls(), 0);
    assert_eq!(mock.text_calls(), 0);
}

#[tokio::test]
async fn test_transcription_failure_skips_analysis() {
    let (mock, orchestrator) = setup(Config::default());
    mock.push_transcription(Err(CapabilityError::UnsupportedFormat {
        message: "Invalid file format".to_string(),
    }));

    let result = orchestrator
        .submit_answer(submission(2, "描述一次数据库优化", 32), &jd())
        .await;

    assert!(matches!(
        result,
        Err(AppError::Transcription(TranscriptionFailure::UnsupportedFormat))
    ));
    assert_eq!(mock.transcription_calls(), 1);
    assert_eq!(mock.text_calls(), 0);
}

#[tokio::test]
async fn test_full_session_with_silent_answer() {
    let (mock, orchestrator) = setup(Config::default());
    mock.push_text(Ok("Q1\nQ2".to_string()));

    let mut record = orchestrator.open_session(jd()).await.unwrap();
    assert_eq!(record.phase(), SessionPhase::QuestionsReady);
    let questions = record.questions().to_vec();

    // 第一题：正常回答
    mock.push_transcription(Ok("我负责过订单系统的重构".to_string()));
    mock.push_text(Ok("回答具体，条理清晰".to_string()));
    record.begin_answer().unwrap();
    let first = orchestrator
        .submit_answer(
            AnswerSubmission::new(
                questions[0].clone(),
                AudioPayload::new("q1.webm", vec![1u8; 64]),
                Some("zh".to_string()),
            )
            .with_duration(Some(6.0)),
            record.job_description(),
        )
        .await
        .unwrap();
    assert_eq!(first.transcript.text, "我负责过订单系统的重构");
    assert_eq!(first.speaking_rate, Some(110.0));
    record.record_answer(first.to_triple()).unwrap();

    // 第二题：静音，识别结果为空但仍然成功
    mock.push_transcription(Ok(String::new()));
    mock.push_text(Err(CapabilityError::EmptyResponse));
    record.begin_answer().unwrap();
    let second = orchestrator
        .submit_answer(
            AnswerSubmission::new(
                questions[1].clone(),
                AudioPayload::new("q2.webm", vec![0u8; 64]),
                None,
            ),
            record.job_description(),
        )
        .await
        .unwrap();
    assert_eq!(second.transcript.text, "");
    assert_eq!(second.analysis.text, ANALYSIS_FAILURE_TEXT);
    assert_eq!(second.speaking_rate, None);
    record.record_answer(second.to_triple()).unwrap();

    mock.push_text(Ok("  整体表现良好  ".to_string()));
    let summary = orchestrator.finalize_record(record).await.unwrap();
    assert_eq!(summary.text, "整体表现良好");

    let prompts = mock.text_prompts();
    let (role, final_prompt) = prompts.last().unwrap();
    assert_eq!(role, "你是一位资深的招聘经理。");
    let q1 = final_prompt.find("问题: Q1").unwrap();
    let q2 = final_prompt.find("问题: Q2").unwrap();
    assert!(q1 < q2);
    assert!(final_prompt.contains("语速: 110.00 字/分钟"));
    assert!(final_prompt.contains(ANALYSIS_FAILURE_TEXT));
}

#[tokio::test]
async fn test_finalize_requires_at_least_one_answer() {
    let (mock, orchestrator) = setup(Config::default());

    let result = orchestrator.finalize_session(&jd(), &[]).await;
    assert!(matches!(result, Err(ref e) if e.is_client_error()));

    let record = SessionRecord::replay(jd(), Vec::new());
    assert!(orchestrator.finalize_record(record).await.is_err());
    assert_eq!(mock.text_calls(), 0);
}

#[tokio::test]
async fn test_finalize_failure_is_reported() {
    let (mock, orchestrator) = setup(Config::default());
    mock.push_text(Err(CapabilityError::Api {
        message: "rate limited".to_string(),
    }));
    let triples = vec![InterviewTriple {
        question: "Q1".to_string(),
        answer_text: "A1".to_string(),
        analysis: "R1".to_string(),
        speaking_rate: None,
    }];

    let result = orchestrator.finalize_session(&jd(), &triples).await;
    assert!(matches!(
        result,
        Err(AppError::Session(SessionError::AssessmentFailed(_)))
    ));
}

#[tokio::test]
async fn test_synthesize_uses_requested_voice() {
    let (mock, orchestrator) = setup(Config::default());
    mock.push_speech(Ok(b"ID3audio".to_vec()));

    let options = SpeechOptions::resolve(Some("onyx"), None, orchestrator.speech_defaults()).unwrap();
    let audio = orchestrator.synthesize("请介绍一下你自己", options).await.unwrap();
    assert_eq!(audio, b"ID3audio".to_vec());

    assert!(orchestrator.synthesize("   ", options).await.is_err());
    assert_eq!(mock.speech_calls(), 1);
}
