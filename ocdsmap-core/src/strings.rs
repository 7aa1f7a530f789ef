//! Localized string tables for sheet headers, titles and section text.
//!
//! Every user-facing literal is looked up by key in a language-keyed table
//! passed explicitly into the generator. A missing key or language is a hard
//! error: mismatched localization keys must surface at generation time, not
//! be papered over with a fallback language.

use crate::error::{MappingError, Result};
use indexmap::IndexMap;
use serde::Deserialize;

/// Built-in table: `(key, en, es)`. Keys mirror the published field-level
/// mapping template workbook.
const BUILTIN: &[(&str, &str, &str)] = &[
    ("path_header", "Path", "Rutas"),
    ("type_header", "Type", "Tipo"),
    ("title_header", "Title", "Título"),
    ("description_header", "Description", "Descripción"),
    ("mapping_header", "Mapping", "Mapear"),
    ("example_header", "Example", "Ejemplo"),
    ("notes_header", "Notes", "Notas"),
    (
        "general_help_text",
        "Fields in this section apply at release level. Each release provides data about a single contracting process at a particular point in time. Releases can be used to notify users of new tenders, awards, contracts, and other updates",
        "Los campos de esta sección aplican a nivel de entrega. Cada entrega provee datos sobre un proceso de contratación único en un momento particular en el tiempo. Las entregas pueden ser usadas para notificar a los usuarios de nuevas licitaciones, adjudicaciones y otras actualizaciones.",
    ),
    (
        "additional_fields_note",
        "If you have additional information applicable at this level and not covered by the core OCDS schema or extensions, list the data items below, along with a proposed description. This information can be used to develop new OCDS extensions.",
        "Si tiene información adicional que aplique a este nivel y que no está cubierto por el esquema OCDS principal o extensiones, agregue los elementos de datos a continuación, junto con una descripción propuesta. Esta información podrá ser utilizada para crear nuevas extensiones OCDS.",
    ),
    (
        "extension_section",
        "Extensions are additions to the core OCDS schema which allow publishers to include extra information in their OCDS data. The following extensions are available for the present section:",
        "Las extensiones son adiciones al esquema OCDS principal que permiten que los publicadores incluyan información extra en sus datos OCDS. Las siguientes extensiones están disponibles para la presente sección:",
    ),
    (
        "parties_description",
        "Parties: Information on the parties (organizations, economic operators and other participants) who are involved in the contracting process and their roles, e.g. buyer, procuring entity, supplier etc. Organization references elsewhere in the schema are used to refer back to this entries in this list.",
        "Partes: Información sobre las partes (organizaciones, operadores económicos y otros participantes) que están involucrados en el proceso de contratación y sus roles, ej. comprador, entidad contratante, proveedor, etc. Las referencias a organizaciones en otros lugares del esquema son usados para referirse de vuelta a estas entradas en la lista.",
    ),
    (
        "standard_name",
        "Open Contracting Data Standard",
        "Estándar de Datos de Contrataciones Abiertas",
    ),
    (
        "organization_reference_id_title",
        "Organization ID",
        "ID de Organización",
    ),
    (
        "overview",
        "Field Level Mapping Overview",
        "Descripción Mapeo a Nivel de Campos",
    ),
    ("source_systems", "(Source) 1. Systems", "(Fuentes) 1. Sistemas"),
    ("source_fields", "(Source) 2. Fields", "(Fuentes) 1. Campos"),
    (
        "general_sheetname",
        "(OCDS) 1. General (all stages)",
        "(OCDS) 1. General (todas las etapas)",
    ),
    (
        "general_title",
        "General (all stages)",
        "General (todas las etapas)",
    ),
    ("planning_sheetname", "(OCDS) 2. Planning", "(OCDS) 2. Planificación"),
    ("tender_sheetname", "(OCDS) 3. Tender", "(OCDS) 3. Licitación"),
    ("awards_sheetname", "(OCDS) 4. Award", "(OCDS) 4. Adjudicación"),
    ("contracts_sheetname", "(OCDS) 5. Contract", "(OCDS) 5. Contrato"),
    (
        "implementation_sheetname",
        "(OCDS) 6. Implementation",
        "(OCDS) 6. Implementación",
    ),
    ("schema_sheetname", "OCDS Schema 1.1.5", "Esquema OCDS 1.1.5"),
    (
        "schema_extensions_sheetname",
        "OCDS Extension Schemas 1.1.5",
        "Esquemas de Extensiones OCDS 1.1.5",
    ),
];

/// A language-keyed string table bound to one output language.
///
/// The table maps `key -> lang -> text`; lookups resolve against the bound
/// language and fail hard on any miss.
#[derive(Debug, Clone)]
pub struct Strings {
    lang: String,
    table: IndexMap<String, IndexMap<String, String>>,
}

impl Strings {
    /// The built-in bilingual (en/es) table, bound to `lang`
    #[must_use]
    pub fn builtin(lang: &str) -> Self {
        let mut table = IndexMap::new();
        for (key, en, es) in BUILTIN {
            let mut entry = IndexMap::new();
            entry.insert("en".to_string(), (*en).to_string());
            entry.insert("es".to_string(), (*es).to_string());
            table.insert((*key).to_string(), entry);
        }
        Self {
            lang: lang.to_string(),
            table,
        }
    }

    /// Build from an explicit table
    #[must_use]
    pub fn from_table(lang: &str, table: IndexMap<String, IndexMap<String, String>>) -> Self {
        Self {
            lang: lang.to_string(),
            table,
        }
    }

    /// Parse a table from JSON of the shape `{"key": {"en": "...", ...}}`
    ///
    /// # Errors
    /// Returns a serialization error if the JSON does not match the shape.
    pub fn from_json(lang: &str, json: &str) -> Result<Self> {
        #[derive(Deserialize)]
        struct Table(IndexMap<String, IndexMap<String, String>>);
        let Table(table) = serde_json::from_str(json)?;
        Ok(Self::from_table(lang, table))
    }

    /// The bound output language
    #[must_use]
    pub fn lang(&self) -> &str {
        &self.lang
    }

    /// Look up a string for the bound language.
    ///
    /// # Errors
    /// Returns [`MappingError::StringLookup`] if the key is absent or has no
    /// translation for the bound language.
    pub fn get(&self, key: &str) -> Result<&str> {
        self.table
            .get(key)
            .and_then(|entry| entry.get(&self.lang))
            .map(String::as_str)
            .ok_or_else(|| MappingError::string_lookup(key, &self.lang))
    }

    /// All keys in table order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.table.keys().map(String::as_str)
    }

    /// Keys missing a translation for `lang`, for parity checks
    #[must_use]
    pub fn missing_for(&self, lang: &str) -> Vec<&str> {
        self.table
            .iter()
            .filter(|(_, entry)| !entry.contains_key(lang))
            .map(|(key, _)| key.as_str())
            .collect()
    }
}
