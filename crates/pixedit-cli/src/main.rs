//! pixedit - interactive photo editor.
//!
//! Purely interactive: prompts on stdout, answers on stdin. Settings come from
//! `PIXEDIT_*` environment variables, log level from `RUST_LOG`.

use std::io;

use anyhow::Context;
use pixedit_cli::{init_tracing, Controller};
use pixedit_core::{EditorConfig, Session};
use tracing::debug;

fn main() -> anyhow::Result<()> {
    init_tracing("warn");

    let config = EditorConfig::from_env();
    debug!(?config, "Editor configuration");

    let session = Session::new().with_jpeg_quality(config.jpeg_quality);
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut controller = Controller::new(stdin.lock(), stdout.lock(), session, config.preview());

    controller.run().context("Terminal I/O failed")?;
    Ok(())
}
