//! CLI transport: stdin/stdout conversation for local testing.

use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::error::Result;
use crate::intake::SessionRegistry;

/// A REPL command or a plain utterance.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Input<'a> {
    Quit,
    Reset,
    Status,
    Utterance(&'a str),
}

fn parse_input(line: &str) -> Input<'_> {
    match line.trim() {
        "/quit" | "/exit" => Input::Quit,
        "/reset" => Input::Reset,
        "/status" => Input::Status,
        _ => Input::Utterance(line),
    }
}

/// Run one session against stdin/stdout until EOF or `/quit`.
pub async fn run_stdio(registry: Arc<SessionRegistry>) -> Result<()> {
    let reader = BufReader::new(tokio::io::stdin());
    run(registry, reader, tokio::io::stdout()).await
}

/// Drive one session from `reader`, writing replies to `writer`.
pub async fn run<R, W>(registry: Arc<SessionRegistry>, reader: R, mut writer: W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let (id, reply) = registry.create().await;
    write_block(&mut writer, reply.message()).await?;

    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        let text = match parse_input(&line) {
            Input::Quit => break,
            Input::Reset => registry.reset(id).await?.message().to_string(),
            Input::Status => {
                let status = registry.status(id).await?;
                match status.awaiting {
                    Some(field) => format!(
                        "{}/{} answered, waiting for {field}",
                        status.filled, status.total
                    ),
                    None => format!("{}/{} answered, complete", status.filled, status.total),
                }
            }
            Input::Utterance(utterance) => {
                registry.advance(id, utterance).await?.message().to_string()
            }
        };
        write_block(&mut writer, &text).await?;
    }

    tracing::debug!(session_id = %id, "CLI session ended");
    Ok(())
}

async fn write_block<W: AsyncWrite + Unpin>(writer: &mut W, text: &str) -> std::io::Result<()> {
    writer.write_all(format!("\n{text}\n\n> ").as_bytes()).await?;
    writer.flush().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intake::IntakeSettings;

    #[test]
    fn commands_are_recognized() {
        assert_eq!(parse_input("/quit"), Input::Quit);
        assert_eq!(parse_input(" /reset "), Input::Reset);
        assert_eq!(parse_input("/status"), Input::Status);
        assert_eq!(parse_input("Ana"), Input::Utterance("Ana"));
    }

    #[tokio::test]
    async fn conversation_over_buffers() {
        let registry = SessionRegistry::new(IntakeSettings::default());
        let input = "Ana\nlower bills\n/status\n/quit\nnever read\n";
        let mut output = Vec::new();

        run(Arc::clone(&registry), input.as_bytes(), &mut output)
            .await
            .unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("What is your name?"));
        assert!(text.contains("Hi Ana!"));
        assert!(text.contains("2/8 answered, waiting for department"));
        assert_eq!(registry.len().await, 1);
    }
}
