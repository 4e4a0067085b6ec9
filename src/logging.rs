use anyhow::Result;
use tracing::Level;
use tracing_subscriber::fmt;

// Warnings always surface (dropped word markers are reported there); verbose
// opens up debug-level parse summaries. Events go to stderr so piped output
// stays clean.
pub fn init(verbose: bool) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let _ = fmt()
        .with_max_level(level)
        .with_target(false)
        .with_level(true)
        .with_writer(std::io::stderr)
        .try_init();
    Ok(())
}
