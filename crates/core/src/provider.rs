//! 进程级单例提供者
//!
//! 调度器集合是显式的进程级只读状态：通过 `OnceLock` 保证
//! 首次构建互斥且只发生一次，之后的访问是纯读取。调用方只
//! 依赖 [`DispatcherProvider::get`] 的契约，而不是全局变量本身。

use std::sync::{Arc, OnceLock};

use tracing::error;

use crate::dispatchers::Dispatchers;
use dispatch_config::DispatcherConfig;
use dispatch_errors::{DispatchError, DispatchResult};

/// Global dispatcher set instance
static DISPATCHERS: OnceLock<DispatchResult<Arc<Dispatchers>>> = OnceLock::new();

/// 调度器集合的单例提供者
///
/// 失败策略为缓存重抛（fail-fast）：首次构建失败的错误会被
/// 缓存，之后的每次调用都返回该错误的克隆；不重试，也不提供
/// 降级的执行上下文。
pub struct DispatcherProvider;

impl DispatcherProvider {
    /// 获取进程唯一的调度器集合
    ///
    /// 首次调用时用默认配置惰性构建集合；无论多少线程并发
    /// 竞争首次调用，构建都只发生一次，所有调用方拿到同一个
    /// `Arc` 实例。首次调用之后本方法不再阻塞、不再分配任何
    /// 底层资源。
    pub fn get() -> DispatchResult<Arc<Dispatchers>> {
        DISPATCHERS
            .get_or_init(|| Self::build(&DispatcherConfig::default()))
            .clone()
    }

    /// 在首次 [`get`](Self::get) 之前用指定配置初始化集合
    ///
    /// 集合（或首次构建失败的错误）一旦就位即返回
    /// [`DispatchError::AlreadyInitialized`]；与并发的 `get` 竞争时
    /// 构建同样至多发生一次。
    pub fn init_with_config(config: &DispatcherConfig) -> DispatchResult<Arc<Dispatchers>> {
        let mut initialized_here = false;
        let result = DISPATCHERS.get_or_init(|| {
            initialized_here = true;
            Self::build(config)
        });
        if !initialized_here {
            return Err(DispatchError::AlreadyInitialized);
        }
        result.clone()
    }

    fn build(config: &DispatcherConfig) -> DispatchResult<Arc<Dispatchers>> {
        match Dispatchers::from_config(config) {
            Ok(dispatchers) => Ok(Arc::new(dispatchers)),
            Err(e) => {
                error!("调度器集合构建失败: {e}");
                Err(e)
            }
        }
    }
}

/// Get global dispatcher set
pub fn dispatchers() -> DispatchResult<Arc<Dispatchers>> {
    DispatcherProvider::get()
}
