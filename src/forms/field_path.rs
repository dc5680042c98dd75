// src/forms/field_path.rs
use std::collections::BTreeMap;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use crate::dtos::biodata::ServerFieldError;
use crate::models::biodata::wire_enum;

wire_enum! {
    /// The five repeated sub-record lists, named as on the wire.
    ListName {
        Education => "pendidikanTerakhir",
        Training => "riwayatPelatihan",
        WorkHistory => "riwayatPekerjaan",
        EmergencyContacts => "orangTerdekatDapatDihubungi",
        Skills => "skill",
    }
}

wire_enum! {
    /// Scalar inputs of the biodata form.
    ScalarField {
        FullName => "namaLengkap",
        BirthPlace => "tempatLahir",
        BirthDate => "tanggalLahir",
        Gender => "jenisKelamin",
        Religion => "agama",
        MaritalStatus => "statusPernikahan",
        IdCardAddress => "alamatKTP",
        DomicileAddress => "alamatDomisili",
        Phone => "noTelepon",
        Email => "email",
        PositionApplied => "posisiDilamar",
        ExpectedSalary => "gajiDiharapkan",
        WillingToRelocate => "bersediaDitempatkanLuarKota",
    }
}

/// Identifies one input for error reporting.
///
/// Renders as `namaLengkap` or `skill[2].level`. Comparison is structural, so
/// `skill[1].level` never matches `skill[10].level`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldPath {
    Field(String),
    Row {
        list: ListName,
        index: usize,
        field: String,
    },
}

impl FieldPath {
    pub fn scalar(field: ScalarField) -> Self {
        FieldPath::Field(field.as_str().to_string())
    }

    pub fn row(list: ListName, index: usize, field: &str) -> Self {
        FieldPath::Row {
            list,
            index,
            field: field.to_string(),
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldPath::Field(name) => f.write_str(name),
            FieldPath::Row { list, index, field } => write!(f, "{}[{}].{}", list, index, field),
        }
    }
}

fn parse_row(s: &str) -> Option<FieldPath> {
    let (list, rest) = s.split_once('[')?;
    let (index, field) = rest.split_once("].")?;
    if field.is_empty() {
        return None;
    }
    Some(FieldPath::Row {
        list: list.parse().ok()?,
        index: index.parse().ok()?,
        field: field.to_string(),
    })
}

impl FromStr for FieldPath {
    type Err = Infallible;

    /// Anything that is not a well-formed row path stays an opaque field name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Ok(parse_row(s).unwrap_or_else(|| FieldPath::Field(s.to_string())))
    }
}

/// Field errors keyed by [`FieldPath`], one message per path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    inner: BTreeMap<FieldPath, String>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: FieldPath, message: impl Into<String>) {
        self.inner.insert(path, message.into());
    }

    pub fn get(&self, path: &FieldPath) -> Option<&str> {
        self.inner.get(path).map(String::as_str)
    }

    /// Lookup by rendered path, for templates that only hold strings.
    pub fn message_for(&self, rendered: &str) -> Option<&str> {
        let Ok(path) = rendered.parse::<FieldPath>();
        self.get(&path)
    }

    pub fn contains(&self, path: &FieldPath) -> bool {
        self.inner.contains_key(path)
    }

    pub fn remove(&mut self, path: &FieldPath) -> Option<String> {
        self.inner.remove(path)
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FieldPath, &str)> {
        self.inner.iter().map(|(k, v)| (k, v.as_str()))
    }

    /// Folds in server validator output; a server message wins on the same path.
    pub fn merge_server(&mut self, errors: &[ServerFieldError]) {
        for err in errors {
            let Ok(path) = err.path.parse::<FieldPath>();
            self.inner.insert(path, err.msg.clone());
        }
    }

    /// `(rendered path, message)` pairs, e.g. for a CLI or JSON view.
    pub fn to_rendered(&self) -> Vec<(String, String)> {
        self.inner
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }
}
