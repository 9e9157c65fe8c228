use kanal::AsyncSender;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;
use yaku_core::types::AppEvent;

/// Reads query lines from stdin. A line starting with `!` accepts the
/// numbered row of the latest result; everything else is a query update.
pub async fn stdin_watcher(
    event_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    if atty::is(atty::Stream::Stdin) {
        eprintln!("type a query ([provider] [lang] text), or !<n> to accept a result row");
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            line = lines.next_line() => match line? {
                Some(line) => {
                    let event = match line.strip_prefix('!').map(|n| n.trim().parse::<usize>()) {
                        Some(Ok(index)) => AppEvent::Accept(index),
                        _ => AppEvent::QueryChanged(line),
                    };
                    event_tx.send(event).await?;
                }
                None => break,
            },
        }
    }

    tracing::info!("stdin watcher stopping");
    Ok(())
}
