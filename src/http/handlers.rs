use super::state::AppState;
use crate::error::{AppError, InputError};
use crate::models::{
    AnswerSubmission, InterviewTriple, JobDescription, Question, SessionRecord, SpeechOptions,
};
use crate::services::upload_store::{TempAudioFile, DEFAULT_AUDIO_NAME};
use crate::utils::truncate_text;
use axum::{
    extract::{multipart::MultipartError, rejection::JsonRejection, Multipart, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct StartInterviewRequest {
    pub job_description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct StartInterviewResponse {
    pub questions: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SubmitAnswerResponse {
    pub transcribed_text: String,
    pub analysis: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speaking_rate: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct SynthesizeSpeechRequest {
    pub text: Option<String>,
    pub voice: Option<String>,
    pub model: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct OverallAnalysisRequest {
    pub job_description: Option<String>,
    pub interview_data: Option<Vec<InterviewTriple>>,
}

#[derive(Debug, Serialize)]
pub struct OverallAnalysisResponse {
    pub overall_summary: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("❌ 请求失败: {}", self);
        } else {
            warn!("⚠️ 请求被拒绝: {}", self);
        }
        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

/// JSON 解析失败同样以 `{error}` 返回
fn json_payload<T>(payload: Result<Json<T>, JsonRejection>, limit: usize) -> Result<T, AppError> {
    match payload {
        Ok(Json(value)) => Ok(value),
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            Err(InputError::UploadTooLarge { limit }.into())
        }
        Err(rejection) => Err(InputError::InvalidJson(rejection.body_text()).into()),
    }
}

fn required_job_description(value: Option<String>) -> Result<JobDescription, AppError> {
    let text = value.ok_or_else(|| AppError::missing("job_description"))?;
    Ok(JobDescription::new(text)?)
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /start_interview
pub async fn start_interview(
    State(state): State<AppState>,
    payload: Result<Json<StartInterviewRequest>, JsonRejection>,
) -> Result<Json<StartInterviewResponse>, AppError> {
    let req = json_payload(payload, state.max_upload_bytes)?;
    let job_description = required_job_description(req.job_description)?;

    let questions = state.orchestrator.start_session(&job_description).await?;

    Ok(Json(StartInterviewResponse {
        questions: questions.into_iter().map(|q| q.text).collect(),
    }))
}

/// submit_answer 表单中收集到的字段
#[derive(Default)]
struct AnswerForm {
    audio: Option<(String, Vec<u8>)>,
    question: Option<String>,
    job_description: Option<String>,
    language: Option<String>,
    question_index: Option<String>,
    duration_seconds: Option<String>,
}

impl AnswerForm {
    async fn read(multipart: &mut Multipart, limit: usize) -> Result<Self, AppError> {
        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| multipart_error(e, limit))?
        {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "audio_data" => {
                    let file_name = field.file_name().unwrap_or(DEFAULT_AUDIO_NAME).to_string();
                    let bytes = field.bytes().await.map_err(|e| multipart_error(e, limit))?;
                    form.audio = Some((file_name, bytes.to_vec()));
                }
                "question" | "job_description" | "language" | "question_index"
                | "duration_seconds" => {
                    let value = field.text().await.map_err(|e| multipart_error(e, limit))?;
                    let slot = match name.as_str() {
                        "question" => &mut form.question,
                        "job_description" => &mut form.job_description,
                        "language" => &mut form.language,
                        "question_index" => &mut form.question_index,
                        _ => &mut form.duration_seconds,
                    };
                    *slot = Some(value);
                }
                other => {
                    info!("忽略未知表单字段: {}", other);
                }
            }
        }

        Ok(form)
    }
}

fn multipart_error(err: MultipartError, limit: usize) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        InputError::UploadTooLarge { limit }.into()
    } else {
        InputError::Multipart(err.body_text()).into()
    }
}

fn parse_optional<T: std::str::FromStr>(
    field: &'static str,
    value: Option<String>,
) -> Result<Option<T>, AppError> {
    match value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
        Some(raw) => raw.parse::<T>().map(Some).map_err(|_| {
            InputError::InvalidField {
                field,
                value: raw.to_string(),
            }
            .into()
        }),
        None => Ok(None),
    }
}

/// POST /submit_answer
///
/// 录音先落盘再读取，识别结束后无论成败都删除临时文件
pub async fn submit_answer(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<SubmitAnswerResponse>, AppError> {
    let form = AnswerForm::read(&mut multipart, state.max_upload_bytes).await?;

    let (file_name, bytes) = form.audio.ok_or_else(|| AppError::missing("audio_data"))?;
    let question_text = form
        .question
        .filter(|q| !q.trim().is_empty())
        .ok_or_else(|| AppError::missing("question"))?;
    let job_description = required_job_description(form.job_description)?;
    if file_name.is_empty() {
        return Err(InputError::EmptyFileName.into());
    }

    let number = match parse_optional::<usize>("question_index", form.question_index)? {
        Some(0) => {
            return Err(InputError::InvalidField {
                field: "question_index",
                value: "0".to_string(),
            }
            .into())
        }
        Some(n) => n,
        None => 1,
    };
    let duration = parse_optional::<f64>("duration_seconds", form.duration_seconds)?;
    let language = form
        .language
        .filter(|l| !l.trim().is_empty())
        .unwrap_or_else(|| state.default_language.clone());

    info!(
        "[问题 {}] 📥 收到回答: {} ({} bytes)，问题: {}",
        number,
        file_name,
        bytes.len(),
        truncate_text(&question_text, 50)
    );

    let temp = state.uploads.save(&file_name, &bytes).await?;
    drop(bytes);

    let audio = match temp.read().await {
        Ok(audio) => audio,
        Err(e) => {
            remove_upload(temp).await;
            return Err(e.into());
        }
    };

    let submission =
        AnswerSubmission::new(Question::new(number, question_text), audio, Some(language))
            .with_duration(duration);
    let transcribed = state.orchestrator.transcribe_answer(submission).await;

    // 识别结束即删除，分析阶段不再保留录音
    remove_upload(temp).await;

    let outcome = state
        .orchestrator
        .analyze_answer(transcribed?, &job_description)
        .await;
    Ok(Json(SubmitAnswerResponse {
        transcribed_text: outcome.transcript.text,
        analysis: outcome.analysis.text,
        speaking_rate: outcome.speaking_rate,
    }))
}

async fn remove_upload(temp: TempAudioFile) {
    if let Err(e) = temp.remove().await {
        warn!("删除临时音频文件失败: {}", e);
    }
}

/// POST /synthesize_speech
pub async fn synthesize_speech(
    State(state): State<AppState>,
    payload: Result<Json<SynthesizeSpeechRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let req = json_payload(payload, state.max_upload_bytes)?;
    let text = req.text.unwrap_or_default();
    let options = SpeechOptions::resolve(
        req.voice.as_deref(),
        req.model.as_deref(),
        state.orchestrator.speech_defaults(),
    )?;

    info!(
        "🔊 语音合成: '{}' ({} / {})",
        truncate_text(&text, 50),
        options.voice,
        options.model
    );

    let audio = state.orchestrator.synthesize(&text, options).await?;

    Ok((
        [(header::CONTENT_TYPE, SpeechOptions::MIME_TYPE)],
        audio,
    )
        .into_response())
}

/// POST /overall_analysis
pub async fn overall_analysis(
    State(state): State<AppState>,
    payload: Result<Json<OverallAnalysisRequest>, JsonRejection>,
) -> Result<Json<OverallAnalysisResponse>, AppError> {
    let req = json_payload(payload, state.max_upload_bytes)?;
    let job_description = required_job_description(req.job_description)?;
    let triples = req
        .interview_data
        .filter(|data| !data.is_empty())
        .ok_or_else(|| AppError::missing("interview_data"))?;

    let record = SessionRecord::replay(job_description, triples);
    let summary = state.orchestrator.finalize_record(record).await?;

    Ok(Json(OverallAnalysisResponse {
        overall_summary: summary.text,
    }))
}

/// GET /health
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
