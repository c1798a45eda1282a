#![deny(unsafe_code)]

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Component, Path, PathBuf};

use pbp_model::{BpType, Sex};
use tracing::{debug, info, warn};

use crate::csv::reference::parse_reference_csv;
use crate::error::StandardsError;
use crate::hash::sha256_hex;
use crate::manifest::{
    MANIFEST_FILE, MANIFEST_SCHEMA, MANIFEST_SCHEMA_VERSION, Manifest, ManifestFile, TableRole,
};
use crate::paths::tables_root;
use crate::table::ReferenceTable;

#[derive(Debug, Clone, serde::Serialize)]
pub struct VerifySummary {
    pub tables_dir: PathBuf,
    /// True when a manifest pinned every table's checksum.
    pub verified: bool,
    pub guideline: Option<String>,
    pub table_count: usize,
    pub age_group_count: usize,
    pub band_count: usize,
}

/// The four reference tables, loaded once and shared read-only.
#[derive(Debug, Clone)]
pub struct ReferenceTableStore {
    tables: BTreeMap<TableRole, ReferenceTable>,
}

impl ReferenceTableStore {
    /// Build a store from already-constructed tables. Missing combinations
    /// are allowed and surface as [`StandardsError::MissingTable`] on lookup.
    pub fn from_tables(
        tables: impl IntoIterator<Item = ReferenceTable>,
    ) -> Result<Self, StandardsError> {
        let mut by_role = BTreeMap::new();
        for table in tables {
            let role = table.role();
            if by_role.contains_key(&role) {
                return Err(StandardsError::DuplicateTable {
                    sex: table.sex(),
                    bp_type: table.bp_type(),
                });
            }
            by_role.insert(role, table);
        }
        Ok(Self { tables: by_role })
    }

    /// Load all four tables from `dir`.
    ///
    /// With a `manifest.toml` present every table is checksum-verified
    /// before parsing; otherwise the conventional file names are read as-is.
    pub fn load_dir(dir: &Path) -> Result<(Self, VerifySummary), StandardsError> {
        let manifest_path = dir.join(MANIFEST_FILE);
        let (files, guideline, verified) = if manifest_path.is_file() {
            let manifest = load_manifest(&manifest_path)?;
            let files = validate_manifest(&manifest)?;
            for (_, file) in &files {
                verify_file(dir, file)?;
            }
            let guideline = manifest.pins.and_then(|pins| pins.guideline);
            let paths: Vec<(TableRole, PathBuf)> = files
                .into_iter()
                .map(|(role, file)| (role, dir.join(&file.path)))
                .collect();
            (paths, guideline, true)
        } else {
            warn!(
                tables_dir = %dir.display(),
                "no manifest.toml found; loading reference tables without checksum verification"
            );
            let paths = TableRole::ALL
                .iter()
                .map(|role| (*role, dir.join(role.default_file_name())))
                .collect();
            (paths, None, false)
        };

        let mut tables = Vec::with_capacity(files.len());
        for (role, path) in files {
            if !path.is_file() {
                return Err(StandardsError::MissingFile { path });
            }
            let table = parse_reference_csv(&path, role.sex(), role.bp_type())?;
            debug!(
                role = %role,
                path = %path.display(),
                age_groups = table.age_groups().count(),
                bands = table.band_count(),
                "loaded reference table"
            );
            tables.push(table);
        }
        let store = Self::from_tables(tables)?;

        let summary = VerifySummary {
            tables_dir: dir.to_path_buf(),
            verified,
            guideline,
            table_count: store.tables.len(),
            age_group_count: store.tables().map(|t| t.age_groups().count()).sum(),
            band_count: store.tables().map(ReferenceTable::band_count).sum(),
        };
        info!(
            tables_dir = %dir.display(),
            tables = summary.table_count,
            verified = summary.verified,
            "reference tables ready"
        );
        Ok((store, summary))
    }

    /// Load from the directory resolved by [`tables_root`].
    pub fn load_default() -> Result<(Self, VerifySummary), StandardsError> {
        Self::load_dir(&tables_root())
    }

    pub fn get_table(&self, sex: Sex, bp_type: BpType) -> Result<&ReferenceTable, StandardsError> {
        self.tables
            .get(&TableRole::from_key(sex, bp_type))
            .ok_or(StandardsError::MissingTable { sex, bp_type })
    }

    pub fn tables(&self) -> impl Iterator<Item = &ReferenceTable> {
        self.tables.values()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

fn load_manifest(path: &Path) -> Result<Manifest, StandardsError> {
    let contents = std::fs::read_to_string(path).map_err(|e| StandardsError::io(path, e))?;
    toml::from_str(&contents).map_err(|e| StandardsError::Toml {
        path: path.to_path_buf(),
        source: e,
    })
}

fn validate_manifest(manifest: &Manifest) -> Result<Vec<(TableRole, ManifestFile)>, StandardsError> {
    if manifest.manifest.schema != MANIFEST_SCHEMA {
        return Err(StandardsError::InvalidManifest {
            message: format!("unsupported schema: {}", manifest.manifest.schema),
        });
    }
    if manifest.manifest.schema_version != MANIFEST_SCHEMA_VERSION {
        return Err(StandardsError::InvalidManifest {
            message: format!(
                "unsupported schema_version: {}",
                manifest.manifest.schema_version
            ),
        });
    }

    let mut seen: BTreeSet<TableRole> = BTreeSet::new();
    let mut files = Vec::with_capacity(manifest.files.len());
    for file in &manifest.files {
        let role: TableRole =
            file.role
                .parse()
                .map_err(|message: String| StandardsError::InvalidManifest { message })?;
        if !seen.insert(role) {
            return Err(StandardsError::DuplicateRole {
                role: file.role.clone(),
            });
        }
        validate_sha(&file.sha256, &file.path)?;
        validate_path(&file.path)?;
        files.push((role, file.clone()));
    }

    for role in TableRole::ALL {
        if !seen.contains(&role) {
            return Err(StandardsError::MissingRole {
                role: role.to_string(),
            });
        }
    }
    files.sort_by_key(|(role, _)| *role);
    Ok(files)
}

fn verify_file(dir: &Path, file: &ManifestFile) -> Result<(), StandardsError> {
    let full_path = dir.join(&file.path);
    let bytes = std::fs::read(&full_path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            StandardsError::MissingFile {
                path: full_path.clone(),
            }
        } else {
            StandardsError::io(full_path.clone(), e)
        }
    })?;

    let actual = sha256_hex(&bytes);
    let expected = file.sha256.to_ascii_lowercase();
    if actual != expected {
        return Err(StandardsError::Sha256Mismatch {
            path: full_path,
            expected,
            actual,
        });
    }
    Ok(())
}

fn validate_sha(sha: &str, path: &str) -> Result<(), StandardsError> {
    if sha.len() != 64 || !sha.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(StandardsError::InvalidSha256 {
            path: PathBuf::from(path),
            message: "sha256 must be 64 hex characters".to_string(),
        });
    }
    Ok(())
}

fn validate_path(path: &str) -> Result<PathBuf, StandardsError> {
    if path.contains('\\') {
        return Err(StandardsError::InvalidPath {
            path: PathBuf::from(path),
            message: "manifest path must use '/' separators".to_string(),
        });
    }

    let p = PathBuf::from(path);
    if p.is_absolute() {
        return Err(StandardsError::InvalidPath {
            path: p,
            message: "manifest path must be relative".to_string(),
        });
    }

    if p.components().any(|c| matches!(c, Component::ParentDir)) {
        return Err(StandardsError::InvalidPath {
            path: p,
            message: "manifest path must not leave the tables directory".to_string(),
        });
    }

    Ok(p)
}
