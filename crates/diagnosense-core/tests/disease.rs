use diagnosense_core::disease::{DiseaseId, all_diseases, get_disease};
use diagnosense_core::error::CoreError;

#[test]
fn catalog_order_matches_home_page() {
    let ids: Vec<DiseaseId> = all_diseases().iter().map(|d| d.id()).collect();
    assert_eq!(
        ids,
        [DiseaseId::Pneumonia, DiseaseId::ProstateCancer, DiseaseId::ChronicKidney]
    );
}

#[test]
fn aliases_resolve_to_the_same_profile() {
    for alias in ["ckd", "chronic-kidney", "chronic_kidney"] {
        assert_eq!(get_disease(alias).unwrap().id(), DiseaseId::ChronicKidney);
    }
    for alias in ["prostate", "prostate-cancer", "prostate_cancer"] {
        assert_eq!(get_disease(alias).unwrap().id(), DiseaseId::ProstateCancer);
    }
    assert_eq!(get_disease("pneumonia").unwrap().endpoint(), "/predict_pneumonia");
}

#[test]
fn unknown_disease_is_an_error() {
    let err = "diabetes".parse::<DiseaseId>().unwrap_err();
    assert!(matches!(err, CoreError::UnknownDisease(ref s) if s == "diabetes"));
    assert!(get_disease("diabetes").is_none());
}

#[test]
fn display_round_trips_through_from_str() {
    for disease in all_diseases() {
        let id = disease.id();
        assert_eq!(id.to_string().parse::<DiseaseId>().unwrap(), id);
    }
}

#[test]
fn only_file_pages_have_upload_specs() {
    assert!(DiseaseId::ChronicKidney.profile().upload().is_none());

    let image = DiseaseId::Pneumonia.profile().upload().unwrap();
    assert!(image.accepts("chest.jpeg", "image/jpeg"));
    assert!(!image.accepts("notes.txt", "text/plain"));

    let csv = DiseaseId::ProstateCancer.profile().upload().unwrap();
    assert!(csv.accepts("GENES.CSV", "application/octet-stream"));
    assert!(!csv.accepts("genes.xlsx", "application/octet-stream"));
}
