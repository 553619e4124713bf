mod common;

use anyhow::Result;
use common::{StandardStaff, test_service};
use staffbook::io::{DirectorySnapshot, Exporter, ImportOptions, Importer};

#[tokio::test]
async fn test_csv_export_lists_every_employee_with_header() -> Result<()> {
    let (service, _temp) = test_service().await?;
    StandardStaff::create(&service).await?;

    let mut out = Vec::new();
    let count = Exporter::new(&service)
        .export_employees_csv(&mut out)
        .await?;
    let csv = String::from_utf8(out)?;
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(count, 5);
    assert_eq!(lines.len(), 6);
    assert_eq!(lines[0], "id,first_name,last_name,email,department");
    assert_eq!(lines[1], "1,Ada,Lovelace,ada@example.com,Engineering");
    Ok(())
}

#[tokio::test]
async fn test_exported_csv_imports_into_fresh_directory() -> Result<()> {
    let (source, _source_temp) = test_service().await?;
    let staff = StandardStaff::create(&source).await?;
    let mut out = Vec::new();
    Exporter::new(&source).export_employees_csv(&mut out).await?;

    let (target, _target_temp) = test_service().await?;
    let result = Importer::new(&target)
        .import_employees_csv(out.as_slice(), ImportOptions::default())
        .await?;

    assert_eq!(result.imported, staff.len());
    assert!(result.errors.is_empty());
    assert_eq!(target.list_employees().await?, staff);

    // A second pass collides on every email.
    let again = Importer::new(&target)
        .import_employees_csv(
            out.as_slice(),
            ImportOptions {
                skip_duplicates: true,
                ..Default::default()
            },
        )
        .await?;
    assert_eq!(again.imported, 0);
    assert_eq!(again.skipped, staff.len());
    Ok(())
}

#[tokio::test]
async fn test_json_snapshot_contains_all_employees() -> Result<()> {
    let (service, _temp) = test_service().await?;
    let staff = StandardStaff::create(&service).await?;

    let mut out = Vec::new();
    Exporter::new(&service).export_json(&mut out).await?;
    let raw: serde_json::Value = serde_json::from_slice(&out)?;
    let snapshot: DirectorySnapshot = serde_json::from_slice(&out)?;

    assert!(raw.get("exportedAt").is_some());
    assert_eq!(raw["employees"][0]["firstName"], "Ada");
    assert_eq!(snapshot.version, env!("CARGO_PKG_VERSION"));
    assert_eq!(snapshot.employees, staff);
    Ok(())
}

#[tokio::test]
async fn test_exported_json_imports_into_fresh_directory() -> Result<()> {
    let (source, _source_temp) = test_service().await?;
    let staff = StandardStaff::create(&source).await?;
    let mut out = Vec::new();
    Exporter::new(&source).export_json(&mut out).await?;

    let (target, _target_temp) = test_service().await?;
    let result = Importer::new(&target)
        .import_json(out.as_slice(), ImportOptions::default())
        .await?;

    assert_eq!(result.imported, staff.len());
    assert!(result.errors.is_empty());
    assert_eq!(target.list_employees().await?, staff);
    Ok(())
}
