use thiserror::Error;

/// 调度器相关错误
///
/// 错误类型需要实现`Clone`：提供者会缓存首次构建失败的错误，
/// 并将其返回给之后的每一个调用方。
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("运行时构建失败 [{dispatcher}]: {message}")]
    RuntimeBuild { dispatcher: String, message: String },
    #[error("调度线程启动失败 [{dispatcher}]: {message}")]
    ThreadSpawn { dispatcher: String, message: String },
    #[error("配置错误: {0}")]
    Configuration(String),
    #[error("数据验证失败: {0}")]
    ValidationError(String),
    #[error("调度器集合已初始化")]
    AlreadyInitialized,
    #[error("内部错误: {0}")]
    Internal(String),
}

pub type DispatchResult<T> = Result<T, DispatchError>;

impl DispatchError {
    pub fn runtime_build_error<S: Into<String>, M: Into<String>>(dispatcher: S, message: M) -> Self {
        Self::RuntimeBuild {
            dispatcher: dispatcher.into(),
            message: message.into(),
        }
    }
    pub fn thread_spawn_error<S: Into<String>, M: Into<String>>(dispatcher: S, message: M) -> Self {
        Self::ThreadSpawn {
            dispatcher: dispatcher.into(),
            message: message.into(),
        }
    }
    pub fn config_error<S: Into<String>>(msg: S) -> Self {
        Self::Configuration(msg.into())
    }
    pub fn validation_error<S: Into<String>>(msg: S) -> Self {
        Self::ValidationError(msg.into())
    }
    /// 是否为执行上下文构建阶段的失败
    pub fn is_initialization(&self) -> bool {
        matches!(
            self,
            DispatchError::RuntimeBuild { .. } | DispatchError::ThreadSpawn { .. }
        )
    }
}

impl From<config::ConfigError> for DispatchError {
    fn from(err: config::ConfigError) -> Self {
        DispatchError::Configuration(err.to_string())
    }
}

impl From<toml::de::Error> for DispatchError {
    fn from(err: toml::de::Error) -> Self {
        DispatchError::Configuration(err.to_string())
    }
}

impl From<toml::ser::Error> for DispatchError {
    fn from(err: toml::ser::Error) -> Self {
        DispatchError::Configuration(err.to_string())
    }
}
