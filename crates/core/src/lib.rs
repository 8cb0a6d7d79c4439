//! # dispatch-core
//!
//! 异步执行上下文（调度器）核心模块
//!
//! 本模块提供：
//! - 四个具名执行上下文：main / io / default / unconfined
//! - 不可变的调度器集合 [`Dispatchers`]
//! - 进程级单例提供者 [`DispatcherProvider`]
//!
//! 调用方通过 [`DispatcherProvider::get`] 获取集合，再按工作负载
//! 的阻塞/CPU特征选择合适的上下文提交任务，而不是自行硬编码
//! 线程策略。

pub mod dispatcher;
pub mod dispatchers;
pub mod provider;

pub use dispatcher::{Dispatcher, DispatcherKind};
pub use dispatchers::Dispatchers;
pub use provider::{dispatchers, DispatcherProvider};

// Re-export config and error types
pub use dispatch_config::{ConfigValidator, DispatcherConfig, PoolDispatcherConfig, ThreadDispatcherConfig};
pub use dispatch_errors::{DispatchError, DispatchResult};
