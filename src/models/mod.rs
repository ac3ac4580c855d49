pub mod interview;
pub mod session;
pub mod speech;

pub use interview::{
    AnswerAnalysis, AnswerSubmission, AudioFormat, AudioPayload, InterviewTriple, JobDescription,
    OverallSummary, Question, TranscriptionResult,
};
pub use session::{SessionPhase, SessionRecord};
pub use speech::{SpeechModel, SpeechOptions, SpeechVoice};
