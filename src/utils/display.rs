// src/utils/display.rs
//! Read-only formatting for the view and admin screens (Indonesian locale).

use chrono::{DateTime, NaiveDate};

use crate::models::biodata::{BiodataRecord, Education, WorkHistory, parse_amount};

pub const NOT_AVAILABLE: &str = "N/A";
pub const EMPTY_VALUE: &str = "-";
pub const CURRENT_JOB: &str = "Sekarang";

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

/// Rupiah with two decimals: `Rp 5.000.000,00`.
pub fn format_currency(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!(
        "{}Rp {},{:02}",
        sign,
        group_thousands(&(cents / 100).to_string()),
        cents % 100
    )
}

/// Salary as typed into the form: `Rp 5.000.000`, or `-` when blank.
pub fn format_salary(text: &str) -> String {
    let Some(amount) = parse_amount(text) else {
        return EMPTY_VALUE.to_string();
    };
    let sign = if amount < 0.0 { "-" } else { "" };
    let rounded = format!("{:.3}", amount.abs());
    let (whole, frac) = rounded.split_once('.').unwrap_or((rounded.as_str(), ""));
    let frac = frac.trim_end_matches('0');
    if frac.is_empty() {
        format!("Rp {}{}", sign, group_thousands(whole))
    } else {
        format!("Rp {}{},{}", sign, group_thousands(whole), frac)
    }
}

/// `d/m/yyyy` from an RFC 3339 timestamp or a `YYYY-MM-DD` date.
pub fn format_date(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return EMPTY_VALUE.to_string();
    }
    let date = DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.date_naive())
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%Y-%m-%d"));
    match date {
        Ok(d) => d.format("%-d/%-m/%Y").to_string(),
        Err(_) => trimmed.to_string(),
    }
}

/// The most senior entry; on equal levels the earliest one wins.
pub fn highest_education(entries: &[Education]) -> Option<&Education> {
    entries.iter().reduce(|best, current| {
        if current.level > best.level { current } else { best }
    })
}

/// `"S1 - Informatika"`, or `N/A` without education entries.
pub fn highest_education_label(entries: &[Education]) -> String {
    match highest_education(entries) {
        Some(edu) => format!(
            "{} - {}",
            edu.level.map(|l| l.as_str()).unwrap_or(EMPTY_VALUE),
            edu.major
        ),
        None => NOT_AVAILABLE.to_string(),
    }
}

pub fn end_year_label(job: &WorkHistory) -> &str {
    if job.is_current() { CURRENT_JOB } else { job.end_year.trim() }
}

fn or_dash(text: &str) -> &str {
    if text.trim().is_empty() { EMPTY_VALUE } else { text }
}

/// Plain-text rendering of a whole record for terminal output.
pub fn detail_lines(record: &BiodataRecord) -> Vec<String> {
    let birth = record.place_and_date_of_birth.clone().unwrap_or_else(|| {
        format!("{}, {}", or_dash(&record.birth_place), format_date(&record.birth_date))
    });
    let mut lines = vec![
        format!("Nama Lengkap        : {}", or_dash(&record.full_name)),
        format!("Email               : {}", or_dash(&record.email)),
        format!("Tempat/Tgl Lahir    : {}", birth),
        format!("Jenis Kelamin       : {}", or_dash(&record.gender)),
        format!("Agama               : {}", or_dash(&record.religion)),
        format!("Status Pernikahan   : {}", or_dash(&record.marital_status)),
        format!("Alamat KTP          : {}", or_dash(&record.id_card_address)),
        format!("Alamat Domisili     : {}", or_dash(&record.domicile_address)),
        format!("No. Telepon         : {}", or_dash(&record.phone)),
        format!("Posisi Dilamar      : {}", or_dash(&record.position_applied)),
        format!("Gaji Diharapkan     : {}", format_salary(&record.expected_salary)),
        format!(
            "Bersedia Luar Kota  : {}",
            if record.willing_to_relocate { "Ya" } else { "Tidak" }
        ),
        format!("Pendidikan Tertinggi: {}", highest_education_label(&record.education)),
    ];

    lines.push("Pendidikan:".to_string());
    for edu in &record.education {
        lines.push(format!(
            "  - {} {} ({}) lulus {} IPK {}",
            edu.level.map(|l| l.as_str()).unwrap_or(EMPTY_VALUE),
            edu.institution,
            edu.major,
            or_dash(&edu.graduation_year),
            or_dash(&edu.gpa)
        ));
    }
    lines.push("Pelatihan:".to_string());
    for t in &record.training {
        lines.push(format!(
            "  - {} oleh {} ({}){}",
            t.name,
            t.organizer,
            or_dash(&t.year),
            if t.has_certificate { " bersertifikat" } else { "" }
        ));
    }
    lines.push("Riwayat Pekerjaan:".to_string());
    for job in &record.work_history {
        lines.push(format!(
            "  - {} di {} {} - {}, gaji terakhir {}",
            job.position,
            job.company,
            or_dash(&job.start_year),
            end_year_label(job),
            format_salary(&job.last_salary)
        ));
    }
    lines.push("Kontak Darurat:".to_string());
    for c in &record.emergency_contacts {
        lines.push(format!(
            "  - {} ({}) {} {}",
            c.name,
            c.relationship.map(|r| r.as_str()).unwrap_or(EMPTY_VALUE),
            c.phone,
            c.address
        ));
    }
    lines.push("Skill:".to_string());
    for s in &record.skills {
        lines.push(format!(
            "  - {} ({})",
            s.name,
            s.level.map(|l| l.as_str()).unwrap_or(EMPTY_VALUE)
        ));
    }
    lines
}
