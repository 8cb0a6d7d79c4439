//! 配置验证框架

use dispatch_errors::{DispatchError, DispatchResult};

/// 配置验证trait
pub trait ConfigValidator {
    fn validate(&self) -> DispatchResult<()>;
}

/// 验证工具函数
pub struct ValidationUtils;

impl ValidationUtils {
    pub fn validate_pool_size(value: usize, field: &str, max: usize) -> DispatchResult<()> {
        if value > max {
            return Err(DispatchError::validation_error(format!(
                "{field} 超出上限: {value} > {max}"
            )));
        }
        Ok(())
    }

    /// 校验线程名，空字符串表示自动命名
    pub fn validate_thread_name(value: &str, field: &str, max_bytes: usize) -> DispatchResult<()> {
        if value.is_empty() {
            return Ok(());
        }
        if value.len() > max_bytes {
            return Err(DispatchError::validation_error(format!(
                "{field} 过长: {} 字节，上限 {max_bytes} 字节",
                value.len()
            )));
        }
        // 含NUL的线程名无法传递给操作系统
        if value.contains('\0') {
            return Err(DispatchError::validation_error(format!(
                "{field} 不能包含NUL字符"
            )));
        }
        Ok(())
    }

    /// 校验线程栈大小，0 表示使用系统默认值
    ///
    /// 只检查下限；上限由操作系统在线程创建时决定。
    pub fn validate_stack_size(value: usize, field: &str) -> DispatchResult<()> {
        const MIN_STACK_SIZE: usize = 64 * 1024;
        if value != 0 && value < MIN_STACK_SIZE {
            return Err(DispatchError::validation_error(format!(
                "{field} 过小: {value} 字节，下限 {MIN_STACK_SIZE} 字节"
            )));
        }
        Ok(())
    }

    pub fn validate_keep_alive_seconds(value: u64, field: &str) -> DispatchResult<()> {
        if value == 0 || value > 3600 {
            return Err(DispatchError::validation_error(format!(
                "{field} 必须在 1-3600 秒之间: {value}"
            )));
        }
        Ok(())
    }
}
