//! # dispatch
//!
//! 异步执行上下文（调度器）单例提供者
//!
//! 本库提供：
//! - 四个具名执行上下文：main（串行）、io（阻塞友好）、
//!   default（CPU密集）、unconfined（测试用）
//! - 进程级惰性单例 [`DispatcherProvider`]
//!
//! # 使用示例
//!
//! ```rust,no_run
//! use dispatch::DispatcherProvider;
//!
//! fn main() -> dispatch::DispatchResult<()> {
//!     let dispatchers = DispatcherProvider::get()?;
//!     dispatchers.io().spawn(async {
//!         // 阻塞友好的工作
//!     });
//!     Ok(())
//! }
//! ```

pub use dispatch_config::{
    ConfigValidator, DispatcherConfig, PoolDispatcherConfig, ThreadDispatcherConfig,
};
pub use dispatch_core::{dispatchers, Dispatcher, DispatcherKind, DispatcherProvider, Dispatchers};
pub use dispatch_errors::{DispatchError, DispatchResult};
