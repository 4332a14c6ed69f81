pub mod get;
pub mod tags;

use tokio_util::sync::CancellationToken;

/// A token cancelled when the user presses Ctrl+C.
pub fn cancel_on_ctrl_c() -> CancellationToken {
    let token = CancellationToken::new();
    let trigger = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::debug!("Received Ctrl+C");
            trigger.cancel();
        }
    });
    token
}
