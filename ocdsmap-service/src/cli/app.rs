//! CLI application: argument handling, logging setup and command dispatch.

use super::types::{OcdsMapCli, OcdsMapCommand};
use crate::fetch::load_schema;
use crate::generator::{write_workbook, GeneratorResult, SheetBuilder};
use crate::mapping_sheet::MappingSheet;
use crate::schema::{resolve_refs, schema_fields};
use clap::Parser;
use indexmap::IndexMap;
use ocdsmap_core::prelude::*;
use std::path::Path;
use tracing::{error, info};

/// Main CLI application
pub struct OcdsMapApp {
    cli: OcdsMapCli,
}

impl OcdsMapApp {
    /// Create the application from command line arguments
    #[must_use]
    pub fn from_args() -> Self {
        Self {
            cli: OcdsMapCli::parse(),
        }
    }

    /// Create the application with an explicit CLI configuration
    #[must_use]
    pub fn new(cli: OcdsMapCli) -> Self {
        Self { cli }
    }

    /// Run the application
    ///
    /// # Errors
    /// Returns error if command execution fails.
    pub async fn run(self) -> GeneratorResult<()> {
        self.init_logging();

        match self.execute_command().await {
            Ok(()) => Ok(()),
            Err(err) => {
                error!("Command failed: {}", err);
                if !self.cli.quiet {
                    eprintln!("Error: {err}");
                }
                Err(err)
            }
        }
    }

    /// Configure tracing subscriber based on CLI flags
    fn init_logging(&self) {
        let level = if self.cli.quiet {
            tracing::Level::ERROR
        } else if self.cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        };
        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_target(false)
            .init();
    }

    async fn execute_command(&self) -> GeneratorResult<()> {
        match &self.cli.command {
            OcdsMapCommand::Generate {
                schema,
                mapping_sheet,
                output,
                lang,
                extension_descriptions,
                strings,
                config,
            } => {
                self.generate_command(
                    schema,
                    mapping_sheet,
                    output,
                    lang.as_deref(),
                    extension_descriptions.as_deref(),
                    strings.as_deref(),
                    config.as_deref(),
                )
                .await
            }
            OcdsMapCommand::Fields { schema, deprecated } => {
                self.fields_command(schema, *deprecated).await
            }
            OcdsMapCommand::Strings { lang } => Self::strings_command(lang),
        }
    }

    #[allow(clippy::too_many_arguments)]
    async fn generate_command(
        &self,
        schema_source: &str,
        mapping_sheet: &Path,
        output: &Path,
        lang: Option<&str>,
        extension_descriptions: Option<&Path>,
        strings_file: Option<&Path>,
        config_file: Option<&Path>,
    ) -> GeneratorResult<()> {
        let mut config = match config_file {
            Some(path) => {
                let text = std::fs::read_to_string(path)?;
                serde_json::from_str::<MappingConfig>(&text).map_err(MappingError::from)?
            }
            None => MappingConfig::default(),
        };
        if let Some(lang) = lang {
            config.lang = lang.to_string();
        }

        let strings = match strings_file {
            Some(path) => {
                let text = std::fs::read_to_string(path)?;
                Strings::from_json(&config.lang, &text)?
            }
            None => Strings::builtin(&config.lang),
        };

        let descriptions = match extension_descriptions {
            Some(path) => {
                let text = std::fs::read_to_string(path)?;
                serde_json::from_str::<IndexMap<String, String>>(&text)
                    .map_err(MappingError::from)?
            }
            None => IndexMap::new(),
        };

        let sheet = MappingSheet::from_path(mapping_sheet)?;
        let extensions = sheet.extension_map()?;
        let (schema_tab, schema_extensions_tab) =
            sheet.schema_tabs(config.link_rewrite.as_ref())?;
        info!(
            extensions = extensions.len(),
            "loaded mapping sheet {}",
            mapping_sheet.display()
        );

        let schema = load_schema(schema_source).await?;
        let schema = resolve_refs(&schema)?;
        let fields = schema_fields(&schema)?;
        info!(fields = fields.len(), "flattened schema");

        let builder = SheetBuilder::new(&strings, &config, &extensions, &descriptions);
        let workbook = builder.build(&fields, schema_tab, schema_extensions_tab)?;
        let written = write_workbook(&workbook, output)?;
        info!(sheets = written.len(), "workbook written to {}", output.display());
        Ok(())
    }

    async fn fields_command(&self, schema_source: &str, deprecated: bool) -> GeneratorResult<()> {
        let schema = load_schema(schema_source).await?;
        let schema = resolve_refs(&schema)?;
        for field in schema_fields(&schema)? {
            if field.deprecated && !deprecated {
                continue;
            }
            let mut flags = Vec::new();
            if field.required {
                flags.push("required");
            }
            if field.deprecated {
                flags.push("deprecated");
            }
            if field.is_container() {
                flags.push("container");
            }
            println!("{}\t{}", field.path, flags.join(","));
        }
        Ok(())
    }

    fn strings_command(lang: &str) -> GeneratorResult<()> {
        let strings = Strings::builtin(lang);
        let keys: Vec<String> = strings.keys().map(String::from).collect();
        for key in keys {
            // A missing translation surfaces here rather than mid-generation
            println!("{key}\t{}", strings.get(&key)?);
        }
        Ok(())
    }
}
