// src/models/biodata.rs
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::serde_text;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} value `{value}`")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

/// Declares a closed set of values that travel over the wire as fixed strings.
macro_rules! wire_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $wire:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, ::serde::Serialize, ::serde::Deserialize)]
        pub enum $name {
            $(#[serde(rename = $wire)] $variant,)+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::models::biodata::UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim() {
                    $($wire => Ok($name::$variant),)+
                    other => Err($crate::models::biodata::UnknownVariant {
                        kind: stringify!($name),
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

pub(crate) use wire_enum;

wire_enum! {
    /// Education levels, declared lowest first so `Ord` follows seniority.
    EducationLevel {
        Sma => "SMA",
        Smk => "SMK",
        D3 => "D3",
        S1 => "S1",
        S2 => "S2",
        S3 => "S3",
    }
}

wire_enum! {
    Relationship {
        Father => "Ayah",
        Mother => "Ibu",
        Husband => "Suami",
        Wife => "Istri",
        Child => "Anak",
        Sibling => "Saudara",
        Friend => "Teman",
        Other => "Lainnya",
    }
}

wire_enum! {
    SkillLevel {
        Beginner => "Beginner",
        Intermediate => "Intermediate",
        Advanced => "Advanced",
        Expert => "Expert",
    }
}

// Choices offered by the personal-information selects.
pub const GENDERS: &[&str] = &["Laki-laki", "Perempuan"];
pub const RELIGIONS: &[&str] = &["Islam", "Kristen", "Katolik", "Hindu", "Buddha", "Konghucu"];
pub const MARITAL_STATUSES: &[&str] = &["Belum Menikah", "Menikah", "Cerai"];

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Education {
    #[serde(rename = "jenjang", default, with = "serde_text::opt_enum")]
    pub level: Option<EducationLevel>,
    #[serde(rename = "institusi", default, deserialize_with = "serde_text::text")]
    pub institution: String,
    #[serde(rename = "jurusan", default, deserialize_with = "serde_text::text")]
    pub major: String,
    #[serde(rename = "tahunLulus", default, deserialize_with = "serde_text::text")]
    pub graduation_year: String,
    #[serde(rename = "ipk", default, deserialize_with = "serde_text::text")]
    pub gpa: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Training {
    #[serde(rename = "namaPelatihan", default, deserialize_with = "serde_text::text")]
    pub name: String,
    #[serde(rename = "penyelenggara", default, deserialize_with = "serde_text::text")]
    pub organizer: String,
    #[serde(rename = "tahun", default, deserialize_with = "serde_text::text")]
    pub year: String,
    #[serde(
        rename = "sertifikat",
        default = "certificate_default",
        deserialize_with = "certificate_flag"
    )]
    pub has_certificate: bool,
}

fn certificate_default() -> bool {
    true
}

fn certificate_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(serde_text::opt_flag(deserializer)?.unwrap_or_else(certificate_default))
}

impl Default for Training {
    fn default() -> Self {
        Self {
            name: String::new(),
            organizer: String::new(),
            year: String::new(),
            has_certificate: certificate_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WorkHistory {
    #[serde(rename = "namaPerusahaan", default, deserialize_with = "serde_text::text")]
    pub company: String,
    #[serde(rename = "posisi", default, deserialize_with = "serde_text::text")]
    pub position: String,
    #[serde(rename = "tahunMulai", default, deserialize_with = "serde_text::text")]
    pub start_year: String,
    /// Blank while the employee still works there.
    #[serde(rename = "tahunSelesai", default, deserialize_with = "serde_text::text")]
    pub end_year: String,
    #[serde(rename = "gajiTerakhir", default, deserialize_with = "serde_text::text")]
    pub last_salary: String,
    #[serde(rename = "alasanKeluar", default, deserialize_with = "serde_text::text")]
    pub reason_for_leaving: String,
}

impl WorkHistory {
    pub fn is_current(&self) -> bool {
        self.end_year.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EmergencyContact {
    #[serde(rename = "nama", default, deserialize_with = "serde_text::text")]
    pub name: String,
    #[serde(rename = "hubungan", default, with = "serde_text::opt_enum")]
    pub relationship: Option<Relationship>,
    #[serde(rename = "noTelepon", default, deserialize_with = "serde_text::text")]
    pub phone: String,
    #[serde(rename = "alamat", default, deserialize_with = "serde_text::text")]
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Skill {
    #[serde(rename = "namaSkill", default, deserialize_with = "serde_text::text")]
    pub name: String,
    #[serde(rename = "level", default, with = "serde_text::opt_enum")]
    pub level: Option<SkillLevel>,
}

/// One employee's biodata, shaped exactly like the `/biodata` payloads.
///
/// Numeric inputs (years, GPA, salaries) are carried as the text the user
/// typed; the server accepts either form and answers with numbers, which
/// deserialize back into text.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BiodataRecord {
    #[serde(
        alias = "_id",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "serde_text::opt_text"
    )]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "serde_text::text")]
    pub email: String,

    #[serde(rename = "namaLengkap", default, deserialize_with = "serde_text::text")]
    pub full_name: String,
    #[serde(rename = "tempatLahir", default, deserialize_with = "serde_text::text")]
    pub birth_place: String,
    #[serde(rename = "tanggalLahir", default, deserialize_with = "serde_text::text")]
    pub birth_date: String,
    #[serde(rename = "jenisKelamin", default, deserialize_with = "serde_text::text")]
    pub gender: String,
    #[serde(rename = "agama", default, deserialize_with = "serde_text::text")]
    pub religion: String,
    #[serde(rename = "statusPernikahan", default, deserialize_with = "serde_text::text")]
    pub marital_status: String,
    #[serde(rename = "alamatKTP", default, deserialize_with = "serde_text::text")]
    pub id_card_address: String,
    #[serde(rename = "alamatDomisili", default, deserialize_with = "serde_text::text")]
    pub domicile_address: String,
    #[serde(rename = "noTelepon", default, deserialize_with = "serde_text::text")]
    pub phone: String,

    #[serde(rename = "posisiDilamar", default, deserialize_with = "serde_text::text")]
    pub position_applied: String,
    #[serde(rename = "gajiDiharapkan", default, deserialize_with = "serde_text::text")]
    pub expected_salary: String,
    #[serde(rename = "bersediaDitempatkanLuarKota", default, deserialize_with = "serde_text::flag")]
    pub willing_to_relocate: bool,

    #[serde(rename = "pendidikanTerakhir", default, deserialize_with = "serde_text::list")]
    pub education: Vec<Education>,
    #[serde(rename = "riwayatPelatihan", default, deserialize_with = "serde_text::list")]
    pub training: Vec<Training>,
    #[serde(rename = "riwayatPekerjaan", default, deserialize_with = "serde_text::list")]
    pub work_history: Vec<WorkHistory>,
    #[serde(
        rename = "orangTerdekatDapatDihubungi",
        default,
        deserialize_with = "serde_text::list"
    )]
    pub emergency_contacts: Vec<EmergencyContact>,
    #[serde(rename = "skill", default, deserialize_with = "serde_text::list")]
    pub skills: Vec<Skill>,

    // Server-derived, never edited locally.
    #[serde(
        rename = "tempatTanggalLahir",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "serde_text::opt_text"
    )]
    pub place_and_date_of_birth: Option<String>,
    #[serde(
        rename = "createdAt",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "serde_text::opt_text"
    )]
    pub created_at: Option<String>,
}

impl BiodataRecord {
    /// Expected salary as an amount, when the text holds a number.
    pub fn expected_salary_amount(&self) -> Option<f64> {
        parse_amount(&self.expected_salary)
    }
}

/// Parses a typed-in amount, tolerating surrounding whitespace.
pub fn parse_amount(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    f64::from_str(trimmed).ok().filter(|v| v.is_finite())
}

impl fmt::Display for BiodataRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.id {
            Some(id) => write!(f, "{} <{}> #{}", self.full_name, self.email, id),
            None => write!(f, "{} <{}>", self.full_name, self.email),
        }
    }
}
