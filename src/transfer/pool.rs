//! 同時実行数を制限したワーカープール

use std::future::Future;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tracing::warn;

/// 各要素に `task` を適用し、`Some` を返したものだけを入力順で集める
///
/// 同時に走るタスクは最大 `limit` 個。`None` やパニックしたタスクは結果から除外され、
/// 他のタスクには影響しない。
pub async fn run_bounded<T, R, F, Fut>(items: Vec<T>, limit: usize, task: F) -> Vec<R>
where
    T: Send + 'static,
    R: Send + 'static,
    F: Fn(T) -> Fut,
    Fut: Future<Output = Option<R>> + Send + 'static,
{
    let semaphore = Arc::new(Semaphore::new(limit.max(1)));
    let mut handles = Vec::with_capacity(items.len());

    for item in items {
        let permit = match semaphore.clone().acquire_owned().await {
            Ok(permit) => permit,
            Err(e) => {
                warn!("Worker pool closed unexpectedly: {}", e);
                break;
            }
        };
        let fut = task(item);
        handles.push(tokio::spawn(async move {
            let _permit = permit;
            fut.await
        }));
    }

    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        match handle.await {
            Ok(Some(result)) => results.push(result),
            Ok(None) => {}
            Err(e) => warn!("Worker task failed: {}", e),
        }
    }
    results
}
