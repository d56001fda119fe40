//! Integration checks for importing job descriptions from CSV exports on disk.

use std::fs;
use std::path::PathBuf;

use recruit_ai::workflows::jobs::{JobDescriptionImporter, JobImportError};

fn write_fixture(name: &str, contents: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("recruit-ai-import-{}", std::process::id()));
    fs::create_dir_all(&dir).expect("create fixture dir");
    let path = dir.join(name);
    fs::write(&path, contents).expect("write fixture");
    path
}

#[test]
fn imports_every_row_from_disk() {
    let path = write_fixture(
        "openings.csv",
        "job_title,company_name,jd_text,skills\n\
         Data Engineer,Acme,\"Build pipelines, own SLAs\",Rust; SQL\n\
         Analyst,Globex,Own dashboards,\n",
    );

    let jobs = JobDescriptionImporter::from_path(&path).expect("import succeeds");
    assert_eq!(jobs.len(), 2);
    assert_eq!(jobs[0].description, "Build pipelines, own SLAs");
    assert_eq!(jobs[0].skills, vec!["Rust".to_string(), "SQL".to_string()]);
    assert_eq!(jobs[1].company, "Globex");
}

#[test]
fn rejects_files_that_are_not_csv() {
    let path = write_fixture("openings.json", "[]");
    match JobDescriptionImporter::from_path(&path) {
        Err(JobImportError::NotCsv { file_name }) => assert!(file_name.ends_with("openings.json")),
        other => panic!("expected csv rejection, got {other:?}"),
    }
}

#[test]
fn missing_files_surface_io_errors() {
    let path = std::env::temp_dir().join("recruit-ai-missing-openings.csv");
    let err = JobDescriptionImporter::from_path(&path).expect_err("missing file");
    assert!(matches!(err, JobImportError::Io(_)));
}
