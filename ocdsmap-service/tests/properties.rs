//! Accounting property: every non-deprecated field appears on exactly one
//! sheet, exactly once; deprecated fields never appear.

use indexmap::IndexMap;
use ocdsmap_core::prelude::*;
use ocdsmap_service::generator::SheetBuilder;
use proptest::prelude::*;
use serde_json::json;

const SECTIONS: [&str; 5] = ["", "planning", "tender", "awards", "contracts"];
const STAGE_SHEETS: [&str; 6] = [
    "general",
    "planning",
    "tender",
    "awards",
    "contracts",
    "implementation",
];

fn path_for(index: usize, section: usize) -> String {
    if SECTIONS[section].is_empty() {
        format!("f{index}")
    } else {
        format!("{}/f{index}", SECTIONS[section])
    }
}

proptest! {
    #[test]
    fn every_field_lands_exactly_once(
        specs in prop::collection::vec(
            (0usize..SECTIONS.len(), any::<bool>(), any::<bool>(), proptest::option::of(0usize..3)),
            1..40,
        )
    ) {
        let mut fields = Vec::new();
        let mut extensions: IndexMap<String, String> = IndexMap::new();
        for (i, (section, required, deprecated, extension)) in specs.iter().enumerate() {
            let path = path_for(i, *section);
            fields.push(SchemaField::new(
                path.clone(),
                json!({"type": "string"}),
                *required,
                *deprecated,
            ));
            if let Some(ext) = extension {
                extensions.insert(path, format!("Ext{ext}"));
            }
        }
        let descriptions: IndexMap<String, String> = (0..3)
            .map(|i| (format!("Ext{i}"), format!("Extension number {i}.")))
            .collect();

        let strings = Strings::builtin("en");
        let config = MappingConfig::default();
        let workbook = SheetBuilder::new(&strings, &config, &extensions, &descriptions)
            .build(&fields, Vec::new(), Vec::new())
            .expect("build should succeed");

        for (i, (section, _, deprecated, _)) in specs.iter().enumerate() {
            let path = path_for(i, *section);
            let count: usize = STAGE_SHEETS
                .iter()
                .copied()
                .map(|key| {
                    workbook
                        .get(key)
                        .expect("stage sheet exists")
                        .records
                        .iter()
                        .filter(|record| record[2] == path)
                        .count()
                })
                .sum();
            prop_assert_eq!(count, usize::from(!deprecated), "path {}", path);
        }
    }
}
