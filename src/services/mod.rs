pub mod analysis_service;
pub mod assessment_service;
pub mod question_service;
pub mod speech_service;
pub mod transcription_service;
pub mod upload_store;

pub use analysis_service::{AnalysisService, ANALYSIS_FAILURE_TEXT};
pub use assessment_service::AssessmentService;
pub use question_service::QuestionService;
pub use speech_service::SpeechService;
pub use transcription_service::TranscriptionService;
pub use upload_store::{TempAudioFile, UploadStore};
