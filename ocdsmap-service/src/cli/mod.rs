//! Command-line interface for the mapping sheet generator.

mod app;
mod types;

pub use app::OcdsMapApp;
pub use types::{OcdsMapCli, OcdsMapCommand};

/// Main entry point for the CLI
///
/// # Errors
/// Returns error if CLI execution fails or encounters invalid arguments.
pub async fn run() -> crate::generator::GeneratorResult<()> {
    let app = OcdsMapApp::from_args();
    app.run().await
}
