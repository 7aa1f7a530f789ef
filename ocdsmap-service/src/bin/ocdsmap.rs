//! `ocdsmap` command-line interface
//!
//! This binary provides the `ocdsmap` command-line tool for generating OCDS
//! field-level mapping sheets.

use ocdsmap_service::cli;
use ocdsmap_service::generator::GeneratorResult;

#[tokio::main]
async fn main() -> GeneratorResult<()> {
    cli::run().await
}
