//! 调度器集合使用示例
//!
//! 组件通过构造函数显式接收 `Arc<Dispatchers>`，而不是自行
//! 查找全局状态。

use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use dispatch_core::{DispatcherProvider, Dispatchers};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 一个按工作特征选择上下文的组件
struct ChecksumService {
    dispatchers: Arc<Dispatchers>,
}

impl ChecksumService {
    fn new(dispatchers: Arc<Dispatchers>) -> Self {
        Self { dispatchers }
    }

    /// 阻塞读取走 io 上下文，计算走 default 上下文
    fn checksum(&self, payload: Vec<u8>) -> Result<u64> {
        let (tx, rx) = mpsc::channel();

        let compute = self.dispatchers.default().handle().clone();
        self.dispatchers.io().spawn(async move {
            // 模拟阻塞读取，io 上下文容忍阻塞
            std::thread::sleep(Duration::from_millis(20));
            compute.spawn(async move {
                let sum = payload.iter().map(|b| *b as u64).sum::<u64>();
                let _ = tx.send(sum);
            });
        });

        Ok(rx.recv_timeout(Duration::from_secs(5))?)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let dispatchers = DispatcherProvider::get()?;

    let service = ChecksumService::new(dispatchers.clone());
    let sum = service.checksum(vec![1, 2, 3, 4])?;
    info!("checksum = {sum}");

    // 同一进程内再次获取返回同一个实例
    let again = DispatcherProvider::get()?;
    assert!(Arc::ptr_eq(&dispatchers, &again));

    Ok(())
}
