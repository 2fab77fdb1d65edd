//! Terminal implementation of the confirmation port.

use std::io::Write;

use async_trait::async_trait;
use domains::ports::ConfirmPrompt;

/// Blocking yes/no prompt on the controlling terminal, the `confirm()` of
/// this driver. Anything but an explicit yes declines.
pub struct StdinConfirm;

#[async_trait]
impl ConfirmPrompt for StdinConfirm {
    async fn confirm(&self, message: &str) -> bool {
        let message = message.to_string();
        let answer = tokio::task::spawn_blocking(move || {
            print!("{message} [y/N] ");
            let _ = std::io::stdout().flush();
            let mut line = String::new();
            if std::io::stdin().read_line(&mut line).is_err() {
                return false;
            }
            matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes")
        })
        .await;
        answer.unwrap_or(false)
    }
}
