//! 错误类型
//!
//! 所有阶段的失败都在这里有一个明确的名字，调用方必须对结果分支处理，
//! 而不是依赖隐式的异常控制流。

use axum::http::StatusCode;
use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 缺少或非法的输入，在调用任何能力之前拒绝
    #[error("输入错误: {0}")]
    Input(#[from] InputError),
    /// 外部能力调用错误
    #[error("能力调用错误: {0}")]
    Capability(#[from] CapabilityError),
    /// 语音识别失败
    #[error("语音识别失败: {0}")]
    Transcription(#[from] TranscriptionFailure),
    /// 语音合成失败
    #[error("语音合成失败: {0}")]
    Synthesis(#[from] SynthesisFailure),
    /// 面试会话错误
    #[error("会话错误: {0}")]
    Session(#[from] SessionError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 输入错误
#[derive(Debug, Error)]
pub enum InputError {
    /// 必填字段缺失
    #[error("缺少必填字段: {field}")]
    MissingField { field: &'static str },
    /// 岗位描述为空
    #[error("岗位描述不能为空")]
    EmptyJobDescription,
    /// 未选择音频文件
    #[error("没有选择音频文件")]
    EmptyFileName,
    /// 不支持的语音
    #[error("不支持的语音: {0}")]
    UnknownVoice(String),
    /// 不支持的语音模型
    #[error("不支持的语音模型: {0}")]
    UnknownSpeechModel(String),
    /// 字段格式错误
    #[error("字段 {field} 格式错误: {value}")]
    InvalidField { field: &'static str, value: String },
    /// 上传内容超过大小上限
    #[error("上传内容过大 (上限 {limit} 字节)")]
    UploadTooLarge { limit: usize },
    /// 请求体不是合法的 JSON
    #[error("无法解析请求体: {0}")]
    InvalidJson(String),
    /// 表单解析失败
    #[error("无法解析表单: {0}")]
    Multipart(String),
}

/// 外部能力提供方返回的错误
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CapabilityError {
    /// 音频文件过大
    #[error("音频文件过大: {message}")]
    PayloadTooLarge { message: String },
    /// 音频格式不受支持
    #[error("无效的音频文件格式: {message}")]
    UnsupportedFormat { message: String },
    /// 输入文本过长
    #[error("输入文本过长: {message}")]
    InputTooLong { message: String },
    /// API 返回错误或不可达
    #[error("API 调用失败: {message}")]
    Api { message: String },
    /// 返回内容为空
    #[error("返回内容为空")]
    EmptyResponse,
    /// 请求构建失败
    #[error("请求构建失败: {message}")]
    InvalidRequest { message: String },
}

/// 语音识别失败原因
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TranscriptionFailure {
    #[error("payload too large")]
    PayloadTooLarge,
    #[error("unsupported format")]
    UnsupportedFormat,
    #[error("unknown error: {0}")]
    Unknown(String),
}

/// 语音合成失败原因
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SynthesisFailure {
    #[error("input too long")]
    InputTooLong,
    #[error("synthesis failed: {0}")]
    Failed(String),
}

/// 面试会话错误
#[derive(Debug, Error)]
pub enum SessionError {
    /// 无法生成面试问题
    #[error("无法生成面试问题")]
    QuestionGenerationFailed,
    /// 总体评估失败
    #[error("生成总体分析失败: {0}")]
    AssessmentFailed(CapabilityError),
    /// 非法的状态转换
    #[error("非法的会话状态转换: {from} -> {to}")]
    InvalidTransition {
        from: &'static str,
        to: &'static str,
    },
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("删除文件失败 ({path}): {source}")]
    DeleteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("创建目录失败 ({path}): {source}")]
    CreateDirFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
    /// 必要的配置缺失
    #[error("配置项 {0} 未设置")]
    Missing(&'static str),
    /// 配置值非法
    #[error("配置项 {key} 非法: {reason}")]
    Invalid { key: &'static str, reason: String },
    /// 读取配置文件失败
    #[error("读取配置文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

impl AppError {
    /// 对应的 HTTP 状态码
    ///
    /// 缺少输入为客户端错误，其余均视为下游失败
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Input(InputError::UploadTooLarge { .. }) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Input(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 创建缺少字段错误
    pub fn missing(field: &'static str) -> Self {
        AppError::Input(InputError::MissingField { field })
    }

    /// 是否为客户端错误
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }
}

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_mapping() {
        assert_eq!(AppError::missing("question").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::from(InputError::InvalidJson("expected value".to_string())).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::from(InputError::UploadTooLarge { limit: 5 }).status_code(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            AppError::from(TranscriptionFailure::PayloadTooLarge).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::from(SessionError::QuestionGenerationFailed).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_failure_reasons_are_distinct() {
        assert_eq!(TranscriptionFailure::PayloadTooLarge.to_string(), "payload too large");
        assert_eq!(TranscriptionFailure::UnsupportedFormat.to_string(), "unsupported format");
        assert_eq!(SynthesisFailure::InputTooLong.to_string(), "input too long");
        assert!(AppError::missing("job_description").is_client_error());
    }
}
