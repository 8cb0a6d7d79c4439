//! # dispatch-config
//!
//! 调度器集合的配置模块
//!
//! 本模块提供：
//! - 四个执行上下文（main / io / compute / unconfined）的配置模型
//! - 基于文件和环境变量的配置加载
//! - 配置验证框架

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::*;

// Re-export error types
pub use dispatch_errors::{DispatchError, DispatchResult};
