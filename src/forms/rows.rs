// src/forms/rows.rs
//! Per-list rules: which fields count towards "row present", which become
//! mandatory once a row is present, and how text input lands in each field.

use std::str::FromStr;

use crate::forms::FormError;
use crate::forms::field_path::ListName;
use crate::models::biodata::{Education, EmergencyContact, Skill, Training, WorkHistory};

/// One row type of a repeated sub-record list.
pub trait SubRecord: Clone + Default {
    const LIST: ListName;

    /// Wire names of the editable fields, in form order.
    const FIELDS: &'static [&'static str];

    /// True when no text or select field holds a value. Checkboxes do not count.
    fn is_blank(&self) -> bool;

    /// `(field, message)` for each required field left empty.
    fn missing_required(&self) -> Vec<(&'static str, &'static str)>;

    fn set_field(&mut self, field: &str, value: &str) -> Result<(), FormError>;
}

fn filled(s: &str) -> bool {
    !s.trim().is_empty()
}

fn unknown(field: &str) -> FormError {
    FormError::UnknownField(field.to_string())
}

fn invalid(field: &str, value: &str) -> FormError {
    FormError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
    }
}

/// Select input: blank clears the choice.
pub(crate) fn parse_choice<T: FromStr>(field: &str, value: &str) -> Result<Option<T>, FormError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed.parse().map(Some).map_err(|_| invalid(field, value))
}

/// Checkbox input.
pub(crate) fn parse_flag(field: &str, value: &str) -> Result<bool, FormError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "on" | "yes" => Ok(true),
        "false" | "0" | "off" | "no" | "" => Ok(false),
        _ => Err(invalid(field, value)),
    }
}

fn require(missing: &mut Vec<(&'static str, &'static str)>, present: bool, field: &'static str, message: &'static str) {
    if !present {
        missing.push((field, message));
    }
}

impl SubRecord for Education {
    const LIST: ListName = ListName::Education;
    const FIELDS: &'static [&'static str] = &["jenjang", "institusi", "jurusan", "tahunLulus", "ipk"];

    fn is_blank(&self) -> bool {
        self.level.is_none()
            && !filled(&self.institution)
            && !filled(&self.major)
            && !filled(&self.graduation_year)
            && !filled(&self.gpa)
    }

    fn missing_required(&self) -> Vec<(&'static str, &'static str)> {
        let mut missing = Vec::new();
        require(&mut missing, self.level.is_some(), "jenjang", "Jenjang pendidikan harus diisi");
        require(&mut missing, filled(&self.institution), "institusi", "Institusi harus diisi");
        require(&mut missing, filled(&self.major), "jurusan", "Jurusan harus diisi");
        require(&mut missing, filled(&self.graduation_year), "tahunLulus", "Tahun lulus harus diisi");
        require(&mut missing, filled(&self.gpa), "ipk", "IPK harus diisi");
        missing
    }

    fn set_field(&mut self, field: &str, value: &str) -> Result<(), FormError> {
        match field {
            "jenjang" => self.level = parse_choice(field, value)?,
            "institusi" => self.institution = value.to_string(),
            "jurusan" => self.major = value.to_string(),
            "tahunLulus" => self.graduation_year = value.to_string(),
            "ipk" => self.gpa = value.to_string(),
            _ => return Err(unknown(field)),
        }
        Ok(())
    }
}

impl SubRecord for Training {
    const LIST: ListName = ListName::Training;
    const FIELDS: &'static [&'static str] = &["namaPelatihan", "penyelenggara", "tahun", "sertifikat"];

    fn is_blank(&self) -> bool {
        !filled(&self.name) && !filled(&self.organizer) && !filled(&self.year)
    }

    fn missing_required(&self) -> Vec<(&'static str, &'static str)> {
        let mut missing = Vec::new();
        require(&mut missing, filled(&self.name), "namaPelatihan", "Nama pelatihan harus diisi");
        require(&mut missing, filled(&self.organizer), "penyelenggara", "Penyelenggara harus diisi");
        require(&mut missing, filled(&self.year), "tahun", "Tahun pelatihan harus diisi");
        missing
    }

    fn set_field(&mut self, field: &str, value: &str) -> Result<(), FormError> {
        match field {
            "namaPelatihan" => self.name = value.to_string(),
            "penyelenggara" => self.organizer = value.to_string(),
            "tahun" => self.year = value.to_string(),
            "sertifikat" => self.has_certificate = parse_flag(field, value)?,
            _ => return Err(unknown(field)),
        }
        Ok(())
    }
}

impl SubRecord for WorkHistory {
    const LIST: ListName = ListName::WorkHistory;
    const FIELDS: &'static [&'static str] = &[
        "namaPerusahaan",
        "posisi",
        "tahunMulai",
        "tahunSelesai",
        "gajiTerakhir",
        "alasanKeluar",
    ];

    fn is_blank(&self) -> bool {
        !filled(&self.company)
            && !filled(&self.position)
            && !filled(&self.start_year)
            && !filled(&self.end_year)
            && !filled(&self.last_salary)
            && !filled(&self.reason_for_leaving)
    }

    // End year stays optional: blank means still employed.
    fn missing_required(&self) -> Vec<(&'static str, &'static str)> {
        let mut missing = Vec::new();
        require(&mut missing, filled(&self.company), "namaPerusahaan", "Nama perusahaan harus diisi");
        require(&mut missing, filled(&self.position), "posisi", "Posisi harus diisi");
        require(&mut missing, filled(&self.start_year), "tahunMulai", "Tahun mulai harus diisi");
        require(&mut missing, filled(&self.last_salary), "gajiTerakhir", "Gaji terakhir harus diisi");
        missing
    }

    fn set_field(&mut self, field: &str, value: &str) -> Result<(), FormError> {
        match field {
            "namaPerusahaan" => self.company = value.to_string(),
            "posisi" => self.position = value.to_string(),
            "tahunMulai" => self.start_year = value.to_string(),
            "tahunSelesai" => self.end_year = value.to_string(),
            "gajiTerakhir" => self.last_salary = value.to_string(),
            "alasanKeluar" => self.reason_for_leaving = value.to_string(),
            _ => return Err(unknown(field)),
        }
        Ok(())
    }
}

impl SubRecord for EmergencyContact {
    const LIST: ListName = ListName::EmergencyContacts;
    const FIELDS: &'static [&'static str] = &["nama", "hubungan", "noTelepon", "alamat"];

    fn is_blank(&self) -> bool {
        !filled(&self.name)
            && self.relationship.is_none()
            && !filled(&self.phone)
            && !filled(&self.address)
    }

    fn missing_required(&self) -> Vec<(&'static str, &'static str)> {
        let mut missing = Vec::new();
        require(&mut missing, filled(&self.name), "nama", "Nama harus diisi");
        require(&mut missing, self.relationship.is_some(), "hubungan", "Hubungan harus diisi");
        require(&mut missing, filled(&self.phone), "noTelepon", "No. telepon harus diisi");
        require(&mut missing, filled(&self.address), "alamat", "Alamat harus diisi");
        missing
    }

    fn set_field(&mut self, field: &str, value: &str) -> Result<(), FormError> {
        match field {
            "nama" => self.name = value.to_string(),
            "hubungan" => self.relationship = parse_choice(field, value)?,
            "noTelepon" => self.phone = value.to_string(),
            "alamat" => self.address = value.to_string(),
            _ => return Err(unknown(field)),
        }
        Ok(())
    }
}

impl SubRecord for Skill {
    const LIST: ListName = ListName::Skills;
    const FIELDS: &'static [&'static str] = &["namaSkill", "level"];

    fn is_blank(&self) -> bool {
        !filled(&self.name) && self.level.is_none()
    }

    fn missing_required(&self) -> Vec<(&'static str, &'static str)> {
        let mut missing = Vec::new();
        require(&mut missing, filled(&self.name), "namaSkill", "Nama skill harus diisi");
        require(&mut missing, self.level.is_some(), "level", "Level skill harus diisi");
        missing
    }

    fn set_field(&mut self, field: &str, value: &str) -> Result<(), FormError> {
        match field {
            "namaSkill" => self.name = value.to_string(),
            "level" => self.level = parse_choice(field, value)?,
            _ => return Err(unknown(field)),
        }
        Ok(())
    }
}
