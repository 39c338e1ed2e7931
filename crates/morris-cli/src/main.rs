//! Terminal front end for Three, Nine and Twelve Men's Morris.

use anyhow::{bail, Context};
use morris_core::{Controller, Variant};
use std::io;
use std::path::Path;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod terminal;

use terminal::TerminalConsole;

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they never interleave with the board
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let mut args = std::env::args();
    let program = args.next().unwrap_or_default();
    if args.next().is_some() {
        bail!("{program} doesn't take any arguments; set MORRIS_VARIANT to pick a variant");
    }

    let variant = select_variant(&program)?;
    info!(%variant, "starting");

    let stdin = io::stdin();
    let console = TerminalConsole::new(stdin.lock(), io::stdout());
    let mut controller = Controller::new(console, variant);
    let results = controller.play();

    info!(matches = results.len(), "exiting");
    Ok(())
}

/// Variant from `MORRIS_VARIANT`, else from the name the binary was invoked by
fn select_variant(program: &str) -> anyhow::Result<Variant> {
    if let Ok(name) = std::env::var("MORRIS_VARIANT") {
        return name
            .parse()
            .with_context(|| format!("invalid MORRIS_VARIANT `{name}`"));
    }

    let name = Path::new(program)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default();
    Ok(Variant::from_program_name(name))
}
