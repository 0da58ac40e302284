use diagnosense_core::disease::DiseaseId;
use diagnosense_core::error::FormError;
use diagnosense_core::form::{CKD_FIELDS, CkdForm, DiagnosisForm, UploadForm, ckd_field};
use diagnosense_core::models::upload::UploadFile;
use diagnosense_core::request::RequestBody;

#[test]
fn ckd_form_starts_from_clinical_defaults() {
    let form = CkdForm::default();
    assert_eq!(form.sg, "1.020");
    assert_eq!(form.al, "0");
    assert_eq!(form.htn, "no");
    assert_eq!(form.pc, "normal");

    for field in CKD_FIELDS {
        assert_eq!(form.get(field.name), Some(field.default), "{}", field.name);
    }
}

#[test]
fn set_replaces_only_the_named_field() {
    let mut form = CkdForm::default();
    form.set("hemo", "11.2").unwrap();

    let mut expected = CkdForm::default();
    expected.hemo = "11.2".to_string();
    assert_eq!(form, expected);
}

#[test]
fn set_rejects_unknown_field() {
    let mut form = CkdForm::default();
    let err = form.set("potassium", "4.1").unwrap_err();
    assert_eq!(err, FormError::UnknownField("potassium".to_string()));
}

#[test]
fn set_rejects_value_outside_choice() {
    let mut form = CkdForm::default();
    assert!(matches!(
        form.set("htn", "maybe"),
        Err(FormError::InvalidOption { .. })
    ));
    assert!(matches!(
        form.set("al", "6"),
        Err(FormError::InvalidOption { .. })
    ));
    assert_eq!(form.htn, "no");
}

#[test]
fn numeric_text_is_not_validated_at_set_time() {
    let mut form = CkdForm::default();
    form.set("sc", "abc").unwrap();
    assert_eq!(form.sc, "abc");
}

#[test]
fn upload_form_without_file_is_rejected_locally() {
    let form = UploadForm::prostate_cancer();
    let err = form.build_request().unwrap_err();
    assert_eq!(err.to_string(), "Please upload a CSV file first.");

    let form = UploadForm::pneumonia();
    let err = form.build_request().unwrap_err();
    assert_eq!(err.to_string(), "Please upload an image.");
}

#[test]
fn upload_form_wraps_file_under_fixed_field_name() {
    let mut form = UploadForm::pneumonia();
    form.select_file(Some(UploadFile::new("chest.png", vec![1, 2, 3])));

    let request = form.build_request().unwrap();
    assert_eq!(request.endpoint, "/predict_pneumonia");
    match request.body {
        RequestBody::Multipart { field_name, file } => {
            assert_eq!(field_name, "image");
            assert_eq!(file.file_name, "chest.png");
            assert_eq!(file.content_type, "image/png");
        }
        other => panic!("expected multipart body, got {other:?}"),
    }

    let mut form = UploadForm::prostate_cancer();
    form.select_file(Some(UploadFile::new("genes.csv", b"a,b\n1,2\n".to_vec())));
    match form.build_request().unwrap().body {
        RequestBody::Multipart { field_name, .. } => assert_eq!(field_name, "file"),
        other => panic!("expected multipart body, got {other:?}"),
    }
}

#[test]
fn cancelled_picker_clears_file() {
    let mut form = UploadForm::prostate_cancer();
    form.select_file(Some(UploadFile::new("genes.csv", vec![])));
    form.select_file(None);
    assert!(form.file().is_none());
}

#[test]
fn upload_form_only_exists_for_upload_diseases() {
    assert!(UploadForm::for_disease(DiseaseId::ChronicKidney).is_none());
    assert!(UploadForm::for_disease(DiseaseId::Pneumonia).is_some());
    assert!(UploadForm::for_disease(DiseaseId::ProstateCancer).is_some());
}

#[test]
fn field_help_combines_label_kind_and_hint() {
    let sg = ckd_field("sg").unwrap();
    assert_eq!(sg.help(), "Specific Gravity (step 0.001). Range: 1.005–1.030");

    let htn = ckd_field("htn").unwrap();
    assert_eq!(htn.help(), "Hypertension (yes|no). Presence of hypertension");

    let al = ckd_field("al").unwrap();
    assert!(al.help().starts_with("Albumin Level (0|1|2|3|4|5)."));
}
