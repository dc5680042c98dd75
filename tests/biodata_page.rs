mod support;

use serde_json::json;

use biodata_karyawan::forms::ScalarField;
use biodata_karyawan::forms::biodata_form::INCOMPLETE_FORM_MESSAGE;
use biodata_karyawan::forms::field_path::{FieldPath, ListName};
use biodata_karyawan::handlers::biodata_page::{
    BiodataPage, FETCH_FAILED_MESSAGE, PageState, SAVED_MESSAGE, SubmitOutcome,
};
use biodata_karyawan::handlers::notice::NoticeKind;
use biodata_karyawan::services::api_client::ApiError;

use support::{MockApi, USER_EMAIL, USER_TOKEN, harness};

fn fill_personal(page: &mut BiodataPage) {
    let form = page.form_mut();
    for (field, value) in [
        (ScalarField::FullName, "Budi Santoso"),
        (ScalarField::BirthPlace, "Denpasar"),
        (ScalarField::BirthDate, "1995-12-25"),
        (ScalarField::Gender, "Laki-laki"),
        (ScalarField::PositionApplied, "Backend Engineer"),
        (ScalarField::ExpectedSalary, "9000000"),
        (ScalarField::WillingToRelocate, "true"),
    ] {
        form.set_field(field, value).unwrap();
    }
}

#[actix_web::test]
async fn missing_record_opens_empty_form_in_create_mode() {
    let mock = MockApi::start().await;
    let h = harness(&mock, Some((USER_TOKEN, "USER")));
    let mut page = BiodataPage::new(h.api.clone());

    page.initialize().await.unwrap();

    assert_eq!(page.state(), PageState::Editing);
    assert!(page.is_create_mode());
    for list in ListName::ALL {
        assert_eq!(page.form().row_count(*list), 1);
    }
    let seen = mock.seen();
    assert_eq!(seen[0].path, "/api/biodata/me");
    assert_eq!(seen[0].bearer.as_deref(), Some(USER_TOKEN));
    mock.stop().await;
}

#[actix_web::test]
async fn blank_rows_are_dropped_on_submit() {
    let mock = MockApi::start().await;
    let h = harness(&mock, Some((USER_TOKEN, "USER")));
    let mut page = BiodataPage::new(h.api.clone());
    page.initialize().await.unwrap();

    fill_personal(&mut page);
    let form = page.form_mut();
    for (field, value) in [
        ("namaPerusahaan", "PT Maju Jaya"),
        ("posisi", "Staff IT"),
        ("tahunMulai", "2019"),
        ("gajiTerakhir", "6500000"),
    ] {
        form.set_array_field(ListName::WorkHistory, 0, field, value).unwrap();
    }

    let outcome = page.submit().await.unwrap();
    assert_eq!(outcome, SubmitOutcome::Saved);
    assert_eq!(page.state(), PageState::Viewing);
    assert!(!page.is_create_mode());

    let toast = page.toast().unwrap();
    assert_eq!(toast.kind, NoticeKind::Success);
    assert_eq!(toast.message, SAVED_MESSAGE);

    let saved = page.saved().unwrap();
    assert!(saved.id.is_some());
    assert_eq!(saved.email, USER_EMAIL);
    assert!(saved.education.is_empty());
    assert_eq!(saved.work_history.len(), 1);
    assert_eq!(saved.work_history[0].company, "PT Maju Jaya");
    assert!(saved.work_history[0].is_current());
    // numbers come back from the server and land as text
    assert_eq!(saved.expected_salary, "9000000");
    assert_eq!(saved.place_and_date_of_birth.as_deref(), Some("Denpasar, 1995-12-25"));

    // the form pads empty lists again so every section stays editable
    assert_eq!(page.form().row_count(ListName::Education), 1);

    let stored = mock.with_state(|st| st.records[0].clone());
    assert_eq!(stored["pendidikanTerakhir"], json!([]));
    assert_eq!(stored["riwayatPekerjaan"].as_array().map(Vec::len), Some(1));
    assert_eq!(stored["bersediaDitempatkanLuarKota"], json!(true));

    // save, then reload
    let methods: Vec<_> = mock.seen().iter().map(|s| s.method.clone()).collect();
    assert_eq!(methods, vec!["GET", "POST", "GET"]);
    mock.stop().await;
}

#[actix_web::test]
async fn incomplete_row_blocks_submit_without_a_request() {
    let mock = MockApi::start().await;
    let h = harness(&mock, Some((USER_TOKEN, "USER")));
    let mut page = BiodataPage::new(h.api.clone());
    page.initialize().await.unwrap();

    fill_personal(&mut page);
    page.form_mut()
        .set_array_field(ListName::Skills, 0, "namaSkill", "Rust")
        .unwrap();

    let outcome = page.submit().await.unwrap();
    assert_eq!(outcome, SubmitOutcome::Invalid);
    assert_eq!(page.state(), PageState::Editing);
    assert_eq!(page.banner().unwrap().message, INCOMPLETE_FORM_MESSAGE);
    assert!(
        page.form()
            .error_for(&FieldPath::row(ListName::Skills, 0, "level"))
            .is_some()
    );
    assert_eq!(page.form().errors().len(), 1);
    assert_eq!(page.form().record().full_name, "Budi Santoso");
    assert_eq!(mock.seen().len(), 1);
    mock.stop().await;
}

#[actix_web::test]
async fn server_field_errors_merge_into_the_form() {
    let mock = MockApi::start().await;
    mock.with_state(|st| {
        st.save_failure = Some((
            400,
            json!({
                "message": "Validation failed",
                "errors": [
                    { "path": "noTelepon", "msg": "Nomor telepon tidak valid" },
                    { "path": "skill[0].level", "msg": "Level tidak dikenal" }
                ]
            }),
        ))
    });
    let h = harness(&mock, Some((USER_TOKEN, "USER")));
    let mut page = BiodataPage::new(h.api.clone());
    page.initialize().await.unwrap();
    fill_personal(&mut page);
    page.form_mut().set_field(ScalarField::Phone, "12").unwrap();

    let err = page.submit().await.unwrap_err();
    assert!(matches!(err, ApiError::Rejected { status: 400, .. }));
    assert_eq!(page.state(), PageState::Editing);
    assert_eq!(page.banner().unwrap().message, "Validation failed");

    let errors = page.form().errors();
    assert_eq!(errors.message_for("noTelepon"), Some("Nomor telepon tidak valid"));
    assert_eq!(errors.message_for("skill[0].level"), Some("Level tidak dikenal"));
    // what the user typed survives the failure
    assert_eq!(page.form().record().phone, "12");
    assert!(page.is_create_mode());
    mock.stop().await;
}

#[actix_web::test]
async fn existing_record_opens_in_view_mode_and_cancel_restores_it() {
    let mock = MockApi::start().await;
    mock.seed(USER_EMAIL, support::employee("Budi Santoso", "Analis", "S1", "Statistika"));
    let h = harness(&mock, Some((USER_TOKEN, "USER")));
    let mut page = BiodataPage::new(h.api.clone());

    page.initialize().await.unwrap();
    assert_eq!(page.state(), PageState::Viewing);
    let saved = page.saved().unwrap();
    assert_eq!(saved.education[0].graduation_year, "2019");
    assert_eq!(saved.education[0].gpa, "3.5");

    page.edit();
    assert_eq!(page.state(), PageState::Editing);
    page.form_mut().set_field(ScalarField::FullName, "Orang Lain").unwrap();
    page.cancel();

    assert_eq!(page.state(), PageState::Viewing);
    assert_eq!(page.form().record().full_name, "Budi Santoso");
    assert_eq!(page.form().row_count(ListName::Training), 1);
    mock.stop().await;
}

#[actix_web::test]
async fn cancel_without_saved_record_stays_editing() {
    let mock = MockApi::start().await;
    let h = harness(&mock, Some((USER_TOKEN, "USER")));
    let mut page = BiodataPage::new(h.api.clone());
    page.initialize().await.unwrap();

    page.form_mut().set_field(ScalarField::FullName, "Sementara").unwrap();
    page.cancel();

    assert_eq!(page.state(), PageState::Editing);
    assert_eq!(page.form().record().full_name, "");
    mock.stop().await;
}

#[actix_web::test]
async fn signed_out_visitor_is_sent_to_login_without_a_request() {
    let mock = MockApi::start().await;
    let h = harness(&mock, None);
    let mut page = BiodataPage::new(h.api.clone());

    page.initialize().await.unwrap();

    assert_eq!(page.state(), PageState::Unavailable);
    assert_eq!(h.navigator.current().as_deref(), Some("/login"));
    assert!(mock.seen().is_empty());
    mock.stop().await;
}

#[actix_web::test]
async fn fetch_failure_leaves_page_unavailable_with_banner() {
    let mock = MockApi::start().await;
    let h = harness(&mock, Some((USER_TOKEN, "USER")));
    let api = biodata_karyawan::services::api_client::ApiClient::new(
        format!("{}/missing", mock.base_url),
        h.store.clone(),
        h.navigator.clone(),
    );
    let mut page = BiodataPage::new(api);

    // an unknown route is a 404, which reads as "no record yet"
    page.initialize().await.unwrap();
    assert_eq!(page.state(), PageState::Editing);

    let dead = biodata_karyawan::services::api_client::ApiClient::new(
        "http://127.0.0.1:1/api",
        h.store.clone(),
        h.navigator.clone(),
    );
    let mut page = BiodataPage::new(dead);
    let err = page.initialize().await.unwrap_err();
    assert!(matches!(err, ApiError::Http(_)));
    assert_eq!(page.state(), PageState::Unavailable);
    let banner = page.banner().unwrap();
    assert_eq!(banner.message, FETCH_FAILED_MESSAGE);
    assert!(!banner.is_timed());
    mock.stop().await;
}

#[actix_web::test]
async fn own_record_with_retired_options_still_opens() {
    let mock = MockApi::start().await;
    let mut record = support::employee("Budi Santoso", "Analis", "S1", "Statistika");
    record["bersediaDitempatkanLuarKota"] = serde_json::Value::Null;
    record["skill"] = json!([{ "namaSkill": "Excel", "level": "Master" }]);
    mock.seed(USER_EMAIL, record);
    let h = harness(&mock, Some((USER_TOKEN, "USER")));
    let mut page = BiodataPage::new(h.api.clone());

    page.initialize().await.unwrap();

    assert_eq!(page.state(), PageState::Viewing);
    assert!(page.banner().is_none());
    let saved = page.saved().unwrap();
    assert_eq!(saved.skills[0].name, "Excel");
    assert_eq!(saved.skills[0].level, None);
    mock.stop().await;
}
