//! 单个执行上下文
//!
//! 每个 [`Dispatcher`] 封装一个 Tokio 运行时句柄及其底层资源：
//! - main / unconfined：单线程运行时，由一个专用驱动线程驱动
//! - io / default：独立的多线程运行时

use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

use tokio::runtime::{Builder, Handle, Runtime};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use dispatch_errors::{DispatchError, DispatchResult};

/// 执行上下文类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DispatcherKind {
    /// 单线程串行上下文，用于必须与协调线程串行的工作
    Main,
    /// 阻塞友好的线程池，提交到这里的任务可以阻塞
    Io,
    /// CPU密集型线程池，线程数与可用核数一致
    Default,
    /// 无线程亲和性的单线程FIFO上下文，用于确定性测试
    Unconfined,
}

impl DispatcherKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DispatcherKind::Main => "main",
            DispatcherKind::Io => "io",
            DispatcherKind::Default => "default",
            DispatcherKind::Unconfined => "unconfined",
        }
    }
}

impl fmt::Display for DispatcherKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 一个可提交异步任务的具名执行上下文
///
/// 构造成功后不可变；跨线程并发使用无需额外同步。
#[derive(Debug)]
pub struct Dispatcher {
    kind: DispatcherKind,
    handle: Handle,
    backing: Backing,
}

/// 保持句柄存活的底层资源
#[derive(Debug)]
enum Backing {
    Pool {
        _runtime: Runtime,
    },
    Thread {
        shutdown: Option<oneshot::Sender<()>>,
        driver: Option<thread::JoinHandle<()>>,
    },
}

impl Dispatcher {
    /// 创建由单个专用线程驱动的上下文
    ///
    /// 驱动线程持有运行时并阻塞等待关闭信号，期间所有提交到该
    /// 上下文的任务都在这一个线程上串行执行。
    ///
    /// `stack_size` 为驱动线程栈大小（字节），0 表示系统默认。
    pub(crate) fn single_thread(
        kind: DispatcherKind,
        thread_name: &str,
        stack_size: usize,
    ) -> DispatchResult<Self> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| DispatchError::runtime_build_error(kind.as_str(), e.to_string()))?;
        let handle = runtime.handle().clone();

        let mut thread_builder = thread::Builder::new().name(thread_name.to_string());
        if stack_size > 0 {
            thread_builder = thread_builder.stack_size(stack_size);
        }

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let driver = thread_builder
            .spawn(move || {
                runtime.block_on(async move {
                    let _ = shutdown_rx.await;
                });
            })
            .map_err(|e| DispatchError::thread_spawn_error(kind.as_str(), e.to_string()))?;

        Ok(Self {
            kind,
            handle,
            backing: Backing::Thread {
                shutdown: Some(shutdown_tx),
                driver: Some(driver),
            },
        })
    }

    /// 创建线程池上下文
    ///
    /// `stack_size` 为工作线程栈大小（字节），0 表示系统默认。
    pub(crate) fn pool(
        kind: DispatcherKind,
        worker_threads: usize,
        thread_name_prefix: &str,
        keep_alive: Duration,
        stack_size: usize,
    ) -> DispatchResult<Self> {
        let prefix = thread_name_prefix.to_string();
        let counter = AtomicUsize::new(0);
        let mut builder = Builder::new_multi_thread();
        builder
            .worker_threads(worker_threads)
            .enable_all()
            .thread_name_fn(move || {
                let id = counter.fetch_add(1, Ordering::Relaxed);
                format!("{prefix}-{id}")
            })
            .thread_keep_alive(keep_alive);
        if stack_size > 0 {
            builder.thread_stack_size(stack_size);
        }
        let runtime = builder
            .build()
            .map_err(|e| DispatchError::runtime_build_error(kind.as_str(), e.to_string()))?;
        let handle = runtime.handle().clone();

        Ok(Self {
            kind,
            handle,
            backing: Backing::Pool { _runtime: runtime },
        })
    }

    pub fn kind(&self) -> DispatcherKind {
        self.kind
    }

    pub fn name(&self) -> &'static str {
        self.kind.as_str()
    }

    /// 底层Tokio运行时句柄
    pub fn handle(&self) -> &Handle {
        &self.handle
    }

    /// 向该上下文提交异步任务
    pub fn spawn<F>(&self, future: F) -> JoinHandle<F::Output>
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        self.handle.spawn(future)
    }

    /// 向该上下文的阻塞线程池提交同步任务
    pub fn spawn_blocking<F, R>(&self, f: F) -> JoinHandle<R>
    where
        F: FnOnce() -> R + Send + 'static,
        R: Send + 'static,
    {
        self.handle.spawn_blocking(f)
    }
}

impl Drop for Dispatcher {
    fn drop(&mut self) {
        // 进程级单例永远不会走到这里；只有直接构造的集合
        // （通常在测试中）需要收回驱动线程。
        if let Backing::Thread { shutdown, driver } = &mut self.backing {
            if let Some(tx) = shutdown.take() {
                let _ = tx.send(());
            }
            if let Some(handle) = driver.take() {
                let _ = handle.join();
            }
        }
    }
}
