//! 执行上下文集合

use std::num::NonZeroUsize;
use std::thread;
use std::time::Duration;

use tracing::info;

use crate::dispatcher::{Dispatcher, DispatcherKind};
use dispatch_config::{ConfigValidator, DispatcherConfig, PoolDispatcherConfig, ThreadDispatcherConfig};
use dispatch_errors::DispatchResult;

/// 四个具名执行上下文的不可变集合
///
/// 集合在构造完成后只读，可在任意线程间共享并发访问。
/// 任何一个上下文构建失败都会使整体构建失败，不会返回部分
/// 构建的集合。
#[derive(Debug)]
pub struct Dispatchers {
    main: Dispatcher,
    io: Dispatcher,
    default: Dispatcher,
    unconfined: Dispatcher,
}

impl Dispatchers {
    /// 按配置构建四个执行上下文
    ///
    /// 构建本身除分配底层线程/线程池外没有其他副作用，不做IO。
    pub fn from_config(config: &DispatcherConfig) -> DispatchResult<Self> {
        config.validate()?;

        let main_name = thread_name(&config.main, DispatcherKind::Main);
        let main = Dispatcher::single_thread(
            DispatcherKind::Main,
            &main_name,
            config.main.thread_stack_size_bytes,
        )?;
        info!("已创建 main 调度器: thread_name={main_name}");

        let io_workers = io_worker_threads(&config.io);
        let io = Dispatcher::pool(
            DispatcherKind::Io,
            io_workers,
            &pool_prefix(&config.io, DispatcherKind::Io),
            Duration::from_secs(config.io.thread_keep_alive_seconds),
            config.io.thread_stack_size_bytes,
        )?;
        info!("已创建 io 调度器: worker_threads={io_workers}");

        let compute_workers = compute_worker_threads(&config.compute);
        let default = Dispatcher::pool(
            DispatcherKind::Default,
            compute_workers,
            &pool_prefix(&config.compute, DispatcherKind::Default),
            Duration::from_secs(config.compute.thread_keep_alive_seconds),
            config.compute.thread_stack_size_bytes,
        )?;
        info!("已创建 default 调度器: worker_threads={compute_workers}");

        let unconfined_name = thread_name(&config.unconfined, DispatcherKind::Unconfined);
        let unconfined = Dispatcher::single_thread(
            DispatcherKind::Unconfined,
            &unconfined_name,
            config.unconfined.thread_stack_size_bytes,
        )?;
        info!("已创建 unconfined 调度器: thread_name={unconfined_name}");

        info!("调度器集合初始化完成: io_workers={io_workers}, compute_workers={compute_workers}");

        Ok(Self {
            main,
            io,
            default,
            unconfined,
        })
    }

    pub fn with_defaults() -> DispatchResult<Self> {
        Self::from_config(&DispatcherConfig::default())
    }

    /// 单线程串行上下文
    pub fn main(&self) -> &Dispatcher {
        &self.main
    }

    /// 阻塞友好的IO线程池
    pub fn io(&self) -> &Dispatcher {
        &self.io
    }

    /// CPU密集型线程池
    pub fn default(&self) -> &Dispatcher {
        &self.default
    }

    /// 无亲和性的测试上下文
    pub fn unconfined(&self) -> &Dispatcher {
        &self.unconfined
    }

    pub fn get(&self, kind: DispatcherKind) -> &Dispatcher {
        match kind {
            DispatcherKind::Main => &self.main,
            DispatcherKind::Io => &self.io,
            DispatcherKind::Default => &self.default,
            DispatcherKind::Unconfined => &self.unconfined,
        }
    }
}

fn available_cores() -> usize {
    thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

fn thread_name(config: &ThreadDispatcherConfig, kind: DispatcherKind) -> String {
    if config.thread_name.is_empty() {
        kind.as_str().to_string()
    } else {
        config.thread_name.clone()
    }
}

fn pool_prefix(config: &PoolDispatcherConfig, kind: DispatcherKind) -> String {
    if config.thread_name_prefix.is_empty() {
        kind.as_str().to_string()
    } else {
        config.thread_name_prefix.clone()
    }
}

fn io_worker_threads(config: &PoolDispatcherConfig) -> usize {
    if config.worker_threads == 0 {
        available_cores().max(64)
    } else {
        config.worker_threads
    }
}

fn compute_worker_threads(config: &PoolDispatcherConfig) -> usize {
    if config.worker_threads == 0 {
        available_cores()
    } else {
        config.worker_threads
    }
}
