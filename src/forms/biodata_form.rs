// src/forms/biodata_form.rs
use crate::forms::FormError;
use crate::forms::field_path::{FieldErrors, FieldPath, ListName, ScalarField};
use crate::forms::rows::{SubRecord, parse_flag};
use crate::dtos::biodata::ServerFieldError;
use crate::models::biodata::{BiodataRecord, GENDERS, MARITAL_STATUSES, RELIGIONS};

/// Shown above the form when local validation fails.
pub const INCOMPLETE_FORM_MESSAGE: &str = "Mohon lengkapi semua field yang diperlukan";

/// In-progress edit of one biodata record plus its field errors.
///
/// Every sub-record list holds at least one row once loaded, so each section
/// always has something to type into. Edits stay local until submitted.
#[derive(Debug, Clone, PartialEq)]
pub struct BiodataForm {
    record: BiodataRecord,
    errors: FieldErrors,
}

impl Default for BiodataForm {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies `$body` to the row vector selected by a [`ListName`].
macro_rules! with_rows {
    ($record:expr, $list:expr, |$rows:ident| $body:expr) => {
        match $list {
            ListName::Education => {
                let $rows = &mut $record.education;
                $body
            }
            ListName::Training => {
                let $rows = &mut $record.training;
                $body
            }
            ListName::WorkHistory => {
                let $rows = &mut $record.work_history;
                $body
            }
            ListName::EmergencyContacts => {
                let $rows = &mut $record.emergency_contacts;
                $body
            }
            ListName::Skills => {
                let $rows = &mut $record.skills;
                $body
            }
        }
    };
}

fn pad<T: SubRecord>(rows: &mut Vec<T>) {
    if rows.is_empty() {
        rows.push(T::default());
    }
}

fn push_template<T: SubRecord>(rows: &mut Vec<T>) {
    rows.push(T::default());
}

fn remove_at<T: SubRecord>(rows: &mut Vec<T>, index: usize) -> Result<(), FormError> {
    if index >= rows.len() {
        return Err(FormError::RowOutOfRange {
            list: T::LIST,
            index,
            len: rows.len(),
        });
    }
    rows.remove(index);
    Ok(())
}

fn set_row_field<T: SubRecord>(rows: &mut [T], index: usize, field: &str, value: &str) -> Result<(), FormError> {
    let len = rows.len();
    let row = rows.get_mut(index).ok_or(FormError::RowOutOfRange {
        list: T::LIST,
        index,
        len,
    })?;
    row.set_field(field, value)
}

fn validate_rows<T: SubRecord>(rows: &[T], errors: &mut FieldErrors) {
    for (index, row) in rows.iter().enumerate() {
        if row.is_blank() {
            continue;
        }
        for (field, message) in row.missing_required() {
            errors.insert(FieldPath::row(T::LIST, index, field), message);
        }
    }
}

/// Fixed-choice select; blank leaves it unpicked.
fn pick_option(field: ScalarField, value: &str, options: &[&str]) -> Result<String, FormError> {
    let trimmed = value.trim();
    if trimmed.is_empty() || options.contains(&trimmed) {
        Ok(trimmed.to_string())
    } else {
        Err(FormError::InvalidValue {
            field: field.as_str().to_string(),
            value: value.to_string(),
        })
    }
}

fn present_rows<T: SubRecord>(rows: &[T]) -> Vec<T> {
    rows.iter().filter(|row| !row.is_blank()).cloned().collect()
}

impl BiodataForm {
    /// Empty form, one template row per list.
    pub fn new() -> Self {
        Self {
            record: Self::template(),
            errors: FieldErrors::new(),
        }
    }

    pub fn from_record(record: &BiodataRecord) -> Self {
        let mut form = Self::new();
        form.reset(Some(record));
        form
    }

    /// The all-empty record with exactly one blank row in each list.
    pub fn template() -> BiodataRecord {
        let mut record = BiodataRecord::default();
        for list in ListName::ALL {
            with_rows!(record, *list, |rows| pad(rows));
        }
        record
    }

    pub fn record(&self) -> &BiodataRecord {
        &self.record
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn error_for(&self, path: &FieldPath) -> Option<&str> {
        self.errors.get(path)
    }

    pub fn set_field(&mut self, field: ScalarField, value: &str) -> Result<(), FormError> {
        let r = &mut self.record;
        match field {
            ScalarField::FullName => r.full_name = value.to_string(),
            ScalarField::BirthPlace => r.birth_place = value.to_string(),
            ScalarField::BirthDate => r.birth_date = value.to_string(),
            ScalarField::Gender => r.gender = pick_option(field, value, GENDERS)?,
            ScalarField::Religion => r.religion = pick_option(field, value, RELIGIONS)?,
            ScalarField::MaritalStatus => {
                r.marital_status = pick_option(field, value, MARITAL_STATUSES)?
            }
            ScalarField::IdCardAddress => r.id_card_address = value.to_string(),
            ScalarField::DomicileAddress => r.domicile_address = value.to_string(),
            ScalarField::Phone => r.phone = value.to_string(),
            ScalarField::Email => r.email = value.to_string(),
            ScalarField::PositionApplied => r.position_applied = value.to_string(),
            ScalarField::ExpectedSalary => r.expected_salary = value.to_string(),
            ScalarField::WillingToRelocate => {
                r.willing_to_relocate = parse_flag(field.as_str(), value)?
            }
        }
        self.errors.remove(&FieldPath::scalar(field));
        Ok(())
    }

    pub fn set_array_field(
        &mut self,
        list: ListName,
        index: usize,
        field: &str,
        value: &str,
    ) -> Result<(), FormError> {
        with_rows!(self.record, list, |rows| set_row_field(rows, index, field, value))?;
        self.errors.remove(&FieldPath::row(list, index, field));
        Ok(())
    }

    pub fn add_row(&mut self, list: ListName) {
        with_rows!(self.record, list, |rows| push_template(rows));
    }

    /// Removes one row. Keeping the last row is the caller's job, see
    /// [`BiodataForm::can_remove_row`].
    pub fn remove_row(&mut self, list: ListName, index: usize) -> Result<(), FormError> {
        with_rows!(self.record, list, |rows| remove_at(rows, index))
    }

    pub fn row_count(&self, list: ListName) -> usize {
        match list {
            ListName::Education => self.record.education.len(),
            ListName::Training => self.record.training.len(),
            ListName::WorkHistory => self.record.work_history.len(),
            ListName::EmergencyContacts => self.record.emergency_contacts.len(),
            ListName::Skills => self.record.skills.len(),
        }
    }

    pub fn can_remove_row(&self, list: ListName) -> bool {
        self.row_count(list) > 1
    }

    /// Checks every present row for missing required fields.
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        let r = &self.record;
        validate_rows(&r.education, &mut errors);
        validate_rows(&r.training, &mut errors);
        validate_rows(&r.work_history, &mut errors);
        validate_rows(&r.emergency_contacts, &mut errors);
        validate_rows(&r.skills, &mut errors);
        errors
    }

    /// The record as it should be posted: blank rows dropped, scalars untouched.
    pub fn to_submission(&self) -> BiodataRecord {
        let r = &self.record;
        BiodataRecord {
            education: present_rows(&r.education),
            training: present_rows(&r.training),
            work_history: present_rows(&r.work_history),
            emergency_contacts: present_rows(&r.emergency_contacts),
            skills: present_rows(&r.skills),
            ..r.clone()
        }
    }

    /// Back to the saved record (or the empty template) with no errors.
    pub fn reset(&mut self, saved: Option<&BiodataRecord>) {
        self.record = match saved {
            Some(record) => {
                let mut record = record.clone();
                for list in ListName::ALL {
                    with_rows!(record, *list, |rows| pad(rows));
                }
                record
            }
            None => Self::template(),
        };
        self.errors.clear();
    }

    pub fn set_errors(&mut self, errors: FieldErrors) {
        self.errors = errors;
    }

    pub fn merge_server_errors(&mut self, errors: &[ServerFieldError]) {
        self.errors.merge_server(errors);
    }

    pub fn clear_errors(&mut self) {
        self.errors.clear();
    }
}
