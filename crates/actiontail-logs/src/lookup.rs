use std::collections::HashMap;
use std::fs;
use std::path::Path;

use actiontail_types::VarType;

use crate::error::{Error, Result};

/// Name shown for ids missing from a lookup table
pub const UNNAMED: &str = "_unnamed_";

/// Generated varbit id -> name table
pub const VARBIT_LOOKUP_FILE: &str = "gameval_varbits.json";

/// Generated varp id -> name table
pub const VARP_LOOKUP_FILE: &str = "gameval_varps.json";

/// Read-only id -> display name tables for both variable namespaces
#[derive(Clone, Debug, Default)]
pub struct Lookups {
    varbits: HashMap<String, String>,
    varps: HashMap<String, String>,
}

impl Lookups {
    pub fn new(varbits: HashMap<String, String>, varps: HashMap<String, String>) -> Self {
        Self { varbits, varps }
    }

    /// Load both tables from the generated files in `data_dir`
    pub fn load(data_dir: &Path) -> Result<Self> {
        let varbits = Self::load_table(&data_dir.join(VARBIT_LOOKUP_FILE))?;
        let varps = Self::load_table(&data_dir.join(VARP_LOOKUP_FILE))?;

        tracing::info!(
            varbits = varbits.len(),
            varps = varps.len(),
            "loaded gameval lookup tables"
        );

        Ok(Self { varbits, varps })
    }

    fn load_table(path: &Path) -> Result<HashMap<String, String>> {
        let content = fs::read_to_string(path).map_err(|source| Error::LookupTableMissing {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| Error::LookupTableInvalid {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Resolve an id within its own namespace, falling back to [`UNNAMED`]
    pub fn name(&self, var_type: VarType, id: i64) -> &str {
        let table = match var_type {
            VarType::Varbit => &self.varbits,
            VarType::Varp => &self.varps,
        };
        table
            .get(&id.to_string())
            .map(String::as_str)
            .unwrap_or(UNNAMED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_tables(dir: &Path) {
        fs::write(
            dir.join(VARBIT_LOOKUP_FILE),
            r#"{"42": "QUEST_POINTS_HIDDEN", "7": "VARBIT_SEVEN"}"#,
        )
        .unwrap();
        fs::write(dir.join(VARP_LOOKUP_FILE), r#"{"42": "VARP_FORTY_TWO"}"#).unwrap();
    }

    #[test]
    fn test_load_and_resolve() {
        let dir = tempfile::tempdir().unwrap();
        write_tables(dir.path());

        let lookups = Lookups::load(dir.path()).unwrap();
        assert_eq!(lookups.name(VarType::Varbit, 7), "VARBIT_SEVEN");
        assert_eq!(lookups.name(VarType::Varp, 42), "VARP_FORTY_TWO");
    }

    #[test]
    fn test_namespaces_are_not_cross_resolved() {
        let dir = tempfile::tempdir().unwrap();
        write_tables(dir.path());

        let lookups = Lookups::load(dir.path()).unwrap();
        assert_eq!(lookups.name(VarType::Varbit, 42), "QUEST_POINTS_HIDDEN");
        assert_eq!(lookups.name(VarType::Varp, 42), "VARP_FORTY_TWO");
        assert_eq!(lookups.name(VarType::Varp, 7), UNNAMED);
    }

    #[test]
    fn test_miss_resolves_to_placeholder() {
        let lookups = Lookups::default();
        assert_eq!(lookups.name(VarType::Varbit, 12345), UNNAMED);
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(VARBIT_LOOKUP_FILE), "{}").unwrap();

        let err = Lookups::load(dir.path()).unwrap_err();
        match err {
            Error::LookupTableMissing { path, .. } => {
                assert!(path.ends_with(VARP_LOOKUP_FILE));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_invalid_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(VARBIT_LOOKUP_FILE), "[1, 2]").unwrap();
        fs::write(dir.path().join(VARP_LOOKUP_FILE), "{}").unwrap();

        assert!(matches!(
            Lookups::load(dir.path()),
            Err(Error::LookupTableInvalid { .. })
        ));
    }
}
