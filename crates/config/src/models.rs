//! 调度器集合配置模型

use std::path::Path;

use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::validation::{ConfigValidator, ValidationUtils};
use dispatch_errors::{DispatchError, DispatchResult};

/// 单线程调度器配置（main / unconfined）
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ThreadDispatcherConfig {
    /// 线程名，空字符串表示使用调度器名称
    pub thread_name: String,
    /// 驱动线程栈大小（字节），0 表示系统默认
    pub thread_stack_size_bytes: usize,
}

/// 线程池调度器配置（io / compute）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PoolDispatcherConfig {
    /// 工作线程数，0 表示自动：
    /// io 池取 max(64, 可用核数)，compute 池取可用核数
    pub worker_threads: usize,
    /// 工作线程名前缀，空字符串表示使用调度器名称
    pub thread_name_prefix: String,
    /// 阻塞线程池中空闲线程的存活时间（秒）；
    /// 运行时工作线程常驻，不受此项影响
    pub thread_keep_alive_seconds: u64,
    /// 工作线程栈大小（字节），0 表示系统默认
    pub thread_stack_size_bytes: usize,
}

impl Default for PoolDispatcherConfig {
    fn default() -> Self {
        Self {
            worker_threads: 0,
            thread_name_prefix: String::new(),
            thread_keep_alive_seconds: 10,
            thread_stack_size_bytes: 0,
        }
    }
}

/// 四个执行上下文的配置
///
/// 所有字段都有默认值，零配置即可使用。
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DispatcherConfig {
    pub main: ThreadDispatcherConfig,
    pub io: PoolDispatcherConfig,
    pub compute: PoolDispatcherConfig,
    pub unconfined: ThreadDispatcherConfig,
}

impl DispatcherConfig {
    /// 加载配置
    ///
    /// 优先级（从低到高）：内置默认值 < 配置文件 < `DISPATCH_*` 环境变量。
    /// 指定了路径时文件必须存在；未指定时依次探测默认路径，全部缺失则
    /// 仅使用默认值和环境变量。
    pub fn load(config_path: Option<&str>) -> DispatchResult<Self> {
        let mut builder = ConfigBuilder::builder();

        if let Some(path) = config_path {
            if Path::new(path).exists() {
                builder = builder.add_source(File::new(path, FileFormat::Toml));
            } else {
                return Err(DispatchError::config_error(format!("配置文件不存在: {path}")));
            }
        } else {
            let default_paths = [
                "config/dispatch.toml",
                "dispatch.toml",
                "/etc/dispatch/config.toml",
            ];

            for path in &default_paths {
                if Path::new(path).exists() {
                    builder = builder.add_source(File::new(path, FileFormat::Toml));
                    break;
                }
            }
        }

        // 环境变量形如 DISPATCH_IO__WORKER_THREADS=32
        builder = builder.add_source(
            Environment::with_prefix("DISPATCH")
                .separator("__")
                .try_parsing(true),
        );

        let config: DispatcherConfig = builder.build()?.try_deserialize()?;

        config.validate()?;

        Ok(config)
    }

    pub fn from_toml(toml_str: &str) -> DispatchResult<Self> {
        let config: DispatcherConfig = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> DispatchResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

impl ConfigValidator for DispatcherConfig {
    fn validate(&self) -> DispatchResult<()> {
        ValidationUtils::validate_thread_name(&self.main.thread_name, "main.thread_name", 15)?;
        ValidationUtils::validate_stack_size(
            self.main.thread_stack_size_bytes,
            "main.thread_stack_size_bytes",
        )?;
        ValidationUtils::validate_thread_name(
            &self.unconfined.thread_name,
            "unconfined.thread_name",
            15,
        )?;
        ValidationUtils::validate_stack_size(
            self.unconfined.thread_stack_size_bytes,
            "unconfined.thread_stack_size_bytes",
        )?;
        validate_pool_section(&self.io, "io")?;
        validate_pool_section(&self.compute, "compute")?;
        Ok(())
    }
}

fn validate_pool_section(config: &PoolDispatcherConfig, section: &str) -> DispatchResult<()> {
    ValidationUtils::validate_pool_size(
        config.worker_threads,
        &format!("{section}.worker_threads"),
        1024,
    )?;
    // 前缀上限更紧，预留 "-NN" 序号空间
    ValidationUtils::validate_thread_name(
        &config.thread_name_prefix,
        &format!("{section}.thread_name_prefix"),
        12,
    )?;
    ValidationUtils::validate_keep_alive_seconds(
        config.thread_keep_alive_seconds,
        &format!("{section}.thread_keep_alive_seconds"),
    )?;
    ValidationUtils::validate_stack_size(
        config.thread_stack_size_bytes,
        &format!("{section}.thread_stack_size_bytes"),
    )?;
    // 池工作线程由运行时内部创建，无法满足的栈大小会在创建线程时
    // 中止进程而不是返回错误，因此这里必须设上限
    const MAX_POOL_STACK_SIZE: usize = 1 << 30;
    if config.thread_stack_size_bytes > MAX_POOL_STACK_SIZE {
        return Err(DispatchError::validation_error(format!(
            "{section}.thread_stack_size_bytes 超出上限: {} > {MAX_POOL_STACK_SIZE}",
            config.thread_stack_size_bytes
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_dispatcher_config_default() {
        let config = DispatcherConfig::default();
        assert_eq!(config.main.thread_name, "");
        assert_eq!(config.io.worker_threads, 0);
        assert_eq!(config.io.thread_keep_alive_seconds, 10);
        assert_eq!(config.compute.worker_threads, 0);
        assert_eq!(config.unconfined.thread_name, "");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_dispatcher_config_validation() {
        let mut invalid_config = DispatcherConfig::default();
        invalid_config.io.worker_threads = 100_000;
        assert!(invalid_config.validate().is_err());

        let mut invalid_config = DispatcherConfig::default();
        invalid_config.main.thread_name = "a-very-long-thread-name".to_string();
        assert!(invalid_config.validate().is_err());

        let mut invalid_config = DispatcherConfig::default();
        invalid_config.compute.thread_keep_alive_seconds = 0;
        assert!(invalid_config.validate().is_err());

        let mut invalid_config = DispatcherConfig::default();
        invalid_config.io.thread_name_prefix = "prefix-too-long".to_string();
        assert!(invalid_config.validate().is_err());

        let mut invalid_config = DispatcherConfig::default();
        invalid_config.main.thread_stack_size_bytes = 1024;
        assert!(invalid_config.validate().is_err());

        let mut invalid_config = DispatcherConfig::default();
        invalid_config.io.thread_stack_size_bytes = 1_usize << 40;
        assert!(invalid_config.validate().is_err());
    }

    #[test]
    fn test_dispatcher_config_serialization() {
        let config = DispatcherConfig::default();
        let serialized = serde_json::to_string(&config).expect("Failed to serialize");
        let deserialized: DispatcherConfig =
            serde_json::from_str(&serialized).expect("Failed to deserialize");
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_dispatcher_config_from_toml() {
        let toml_str = r#"
            [main]
            thread_name = "ui"

            [io]
            worker_threads = 32
            thread_name_prefix = "blocking"
        "#;

        let config = DispatcherConfig::from_toml(toml_str).expect("Failed to parse config");
        assert_eq!(config.main.thread_name, "ui");
        assert_eq!(config.io.worker_threads, 32);
        assert_eq!(config.io.thread_name_prefix, "blocking");
        // Untouched sections keep their defaults
        assert_eq!(config.compute.worker_threads, 0);
        assert_eq!(config.unconfined.thread_name, "");
    }

    #[test]
    fn test_dispatcher_config_from_toml_rejects_invalid() {
        let toml_str = r#"
            [io]
            worker_threads = 9999
        "#;
        assert!(DispatcherConfig::from_toml(toml_str).is_err());
    }

    #[test]
    fn test_dispatcher_config_toml_round_trip() {
        let mut config = DispatcherConfig::default();
        config.compute.worker_threads = 4;
        config.unconfined.thread_name = "test-ctx".to_string();

        let serialized = config.to_toml().expect("Failed to serialize");
        let deserialized = DispatcherConfig::from_toml(&serialized).expect("Failed to deserialize");
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_dispatcher_config_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
        writeln!(file, "[compute]\nworker_threads = 2\nthread_name_prefix = \"calc\"")
            .expect("Failed to write temp file");

        let config = DispatcherConfig::load(Some(file.path().to_str().unwrap()))
            .expect("Failed to load config");
        assert_eq!(config.compute.worker_threads, 2);
        assert_eq!(config.compute.thread_name_prefix, "calc");
    }

    #[test]
    fn test_dispatcher_config_load_missing_file() {
        let result = DispatcherConfig::load(Some("/nonexistent/dispatch.toml"));
        assert!(matches!(result, Err(DispatchError::Configuration(_))));
    }
}
