use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use kanal::{AsyncReceiver, AsyncSender};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

type HandlerFuture = Pin<Box<dyn Future<Output = ()> + Send>>;
type Handler = Arc<dyn Fn(CancellationToken) -> HandlerFuture + Send + Sync>;

enum Command {
    Notify,
    Cancel,
    Flush,
}

/// Coalesces bursts of update notifications into at most one handler
/// invocation per quiet period.
///
/// Each invocation gets a fresh cancellation scope. A notification arriving
/// while an invocation is still running does not pre-empt it, but cancels
/// its scope so the handler can abandon stale work.
pub struct Debouncer {
    tx: AsyncSender<Command>,
}

impl Debouncer {
    /// Spawns the scheduler task. It runs until the `Debouncer` is dropped.
    pub fn spawn<F, Fut>(quiet: Duration, handler: F) -> Self
    where
        F: Fn(CancellationToken) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (tx, rx) = kanal::bounded_async(64);
        let handler: Handler = Arc::new(move |scope| Box::pin(handler(scope)));
        tokio::spawn(scheduler_loop(rx, quiet, handler));
        Self { tx }
    }

    /// (Re)arms the quiet-period timer, discarding any armed deadline.
    pub async fn notify_update(&self) {
        let _ = self.tx.send(Command::Notify).await;
    }

    /// Disarms the timer and cancels the in-flight invocation's scope.
    /// Safe to call when idle.
    pub async fn cancel(&self) {
        let _ = self.tx.send(Command::Cancel).await;
    }

    /// Immediate timer elapse: fires the handler now.
    pub async fn force_now(&self) {
        let _ = self.tx.send(Command::Flush).await;
    }
}

async fn scheduler_loop(rx: AsyncReceiver<Command>, quiet: Duration, handler: Handler) {
    let mut deadline: Option<Instant> = None;
    // Scope of the newest handler invocation; superseding input cancels it.
    let mut current: Option<CancellationToken> = None;

    loop {
        let command = if let Some(at) = deadline {
            tokio::select! {
                command = rx.recv() => match command {
                    Ok(command) => Some(command),
                    Err(_) => break,
                },
                _ = tokio::time::sleep_until(at) => None,
            }
        } else {
            match rx.recv().await {
                Ok(command) => Some(command),
                Err(_) => break,
            }
        };

        match command {
            Some(Command::Notify) => {
                deadline = Some(Instant::now() + quiet);
                if let Some(scope) = &current {
                    scope.cancel();
                }
            }
            Some(Command::Cancel) => {
                deadline = None;
                if let Some(scope) = current.take() {
                    scope.cancel();
                }
            }
            // Timer elapse and force_now share the firing path.
            Some(Command::Flush) | None => {
                deadline = None;
                if let Some(scope) = current.take() {
                    scope.cancel();
                }
                let scope = CancellationToken::new();
                current = Some(scope.clone());
                tokio::spawn((handler)(scope));
            }
        }
    }

    if let Some(scope) = current.take() {
        scope.cancel();
    }
}
