use rentguard::credential::{resolve_credential, CredentialStore};
use rentguard::error::{RentGuardError, DEFAULT_REMOTE_ERROR};
use rentguard::models::contract_file::{load_batch, MAX_FILES_PER_BATCH, MAX_FILE_SIZE};
use rentguard::models::{AnalysisResult, ContractFile, OutputLanguage, RiskLevel, RiskType};
use std::io::Write;

#[test]
fn remote_errors_are_not_local() {
    assert!(!RentGuardError::remote("rate limited").is_local());
    assert!(RentGuardError::MissingCredential.is_local());
    assert!(RentGuardError::NoValidFiles.is_local());
    assert!(RentGuardError::TooManyFiles { count: 6, limit: 5 }.is_local());
}

#[test]
fn blank_remote_message_is_replaced() {
    assert_eq!(RentGuardError::remote("").to_string(), DEFAULT_REMOTE_ERROR);
    assert_eq!(
        RentGuardError::Remote("\n".to_string()).with_default_message().to_string(),
        DEFAULT_REMOTE_ERROR
    );
    assert_eq!(
        RentGuardError::Remote("quota exceeded".to_string())
            .with_default_message()
            .to_string(),
        "quota exceeded"
    );
}

#[test]
fn local_errors_mention_the_user_action() {
    assert!(RentGuardError::MissingCredential.to_string().contains("API"));
    assert!(RentGuardError::NoValidFiles.to_string().contains("PDF"));
}

#[test]
fn too_many_files_rejected_before_reading() {
    let paths: Vec<String> = (0..=MAX_FILES_PER_BATCH)
        .map(|i| format!("/nonexistent/page{}.jpg", i))
        .collect();

    let err = load_batch(&paths).unwrap_err();
    assert!(matches!(err, RentGuardError::TooManyFiles { count: 6, limit: 5 }));
}

#[test]
fn oversized_file_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("huge.pdf");
    let file = std::fs::File::create(&path).unwrap();
    file.set_len(MAX_FILE_SIZE + 1).unwrap();

    let err = ContractFile::from_path(&path).unwrap_err();
    assert!(matches!(err, RentGuardError::FileTooLarge { ref name, .. } if name == "huge.pdf"));
}

#[test]
fn missing_file_is_unreadable() {
    let dir = tempfile::tempdir().unwrap();
    let err = ContractFile::from_path(&dir.path().join("gone.png")).unwrap_err();
    assert!(matches!(err, RentGuardError::UnreadableFile { .. }));
}

#[test]
fn batch_loads_with_inferred_mime_types() {
    let dir = tempfile::tempdir().unwrap();
    let jpg = dir.path().join("page.JPG");
    let pdf = dir.path().join("lease.pdf");
    std::fs::File::create(&jpg).unwrap().write_all(b"jpeg").unwrap();
    std::fs::File::create(&pdf).unwrap().write_all(b"%PDF-1.7").unwrap();

    let files = load_batch(&[jpg, pdf]).unwrap();

    assert_eq!(files[0].mime_type, "image/jpeg");
    assert_eq!(files[1].mime_type, "application/pdf");
    assert_eq!(files[1].size, 8);
    assert!(files.iter().all(ContractFile::is_analyzable));
}

#[test]
fn failure_result_carries_the_message() {
    let result = AnalysisResult::failure("network unreachable", 2);

    assert_eq!(result.risk_level, RiskLevel::High);
    assert_eq!(result.file_count, 2);
    assert_eq!(result.risk_items[0].risk_type, RiskType::High);
    assert_eq!(result.risk_items[0].suggestion, "network unreachable");
    assert!(result.has_high_risk_items());
}

#[test]
fn empty_credential_store_resolves_to_none() {
    let dir = tempfile::tempdir().unwrap();
    let store = CredentialStore::new(dir.path());

    if std::env::var("KIMI_API_KEY").is_err() {
        assert_eq!(resolve_credential(None, &store).unwrap(), None);
        assert_eq!(resolve_credential(Some("   "), &store).unwrap(), None);
    }
}

#[test]
fn unknown_output_language_is_invalid_argument() {
    let err = OutputLanguage::from_str("klingon").unwrap_err();
    assert!(matches!(err, RentGuardError::InvalidArguments(_)));
}
