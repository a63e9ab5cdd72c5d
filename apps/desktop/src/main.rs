use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{ClickHandler, HttpTransport, WatchOutput, DEFAULT_SERVER_URL};
use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader},
    task::JoinSet,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Sends values to the processing service. Each line read from stdin is one
/// click unless `--value` is given.
#[derive(Parser, Debug)]
struct Args {
    #[arg(long, default_value = DEFAULT_SERVER_URL)]
    server_url: String,
    /// Send this input once, print the outcome and exit.
    #[arg(long, allow_hyphen_values = true)]
    value: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let transport = HttpTransport::new(&args.server_url)
        .with_context(|| format!("invalid server url '{}'", args.server_url))?;
    info!(endpoint = %transport.endpoint(), "using processing endpoint");

    let output = WatchOutput::new();
    let handler = ClickHandler::new(Arc::new(transport), Arc::new(output.clone()));

    if let Some(value) = args.value {
        println!("{}", handler.click(&value).await);
        return Ok(());
    }

    run_interactive(
        handler,
        output,
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
    )
    .await
}

/// One click per input line. Every change of the output cell is written to
/// `writer`; returns at end of input once all clicks have settled and the
/// last text is written.
async fn run_interactive<R, W>(
    handler: ClickHandler,
    output: WatchOutput,
    input: R,
    mut writer: W,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let mut updates = output.subscribe();
    let printer = tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let text = updates.borrow_and_update().clone();
            writer.write_all(format!("{text}\n").as_bytes()).await?;
            writer.flush().await?;
        }
        Ok::<_, std::io::Error>(())
    });

    let mut lines = input.lines();
    let mut clicks = JoinSet::new();
    while let Some(line) = lines.next_line().await.context("failed to read input")? {
        let handler = handler.clone();
        clicks.spawn(async move { handler.click(&line).await });
    }
    while clicks.join_next().await.is_some() {}

    // The printer stops once every sender of the output cell is gone.
    drop(handler);
    drop(output);
    printer
        .await
        .context("output printer panicked")?
        .context("failed to write output")?;
    Ok(())
}
