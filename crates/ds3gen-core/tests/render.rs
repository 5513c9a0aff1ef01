//! Rendering the fixture contract through the built-in template sets

mod common;

use common::{contract, fixture_path, units, workspace_templates};
use ds3gen_core::render::write_files;
use ds3gen_core::{generate, Config, Result, TargetLanguage, TemplateRenderer, UnitRenderer};

#[tokio::test]
async fn test_every_target_renders_the_fixture() -> Result<()> {
    let contract = contract();
    for target in TargetLanguage::all() {
        let units = units(&contract, target);
        let renderer = TemplateRenderer::new(target, Some(workspace_templates())).await?;
        let files = renderer.render_all(&units)?;
        let matchers = units
            .iter()
            .filter(|u| target.profile().matcher_path(u).is_some())
            .count();
        assert_eq!(files.len(), units.len() + matchers);

        let out = tempfile::tempdir()?;
        write_files(out.path(), &files).await?;
        for file in &files {
            assert!(out.path().join(&file.path).is_file(), "{}", file.path.display());
            assert!(!file.contents.is_empty());
        }
    }
    Ok(())
}

#[tokio::test]
async fn test_java_requests_build_their_paths() -> Result<()> {
    let contract = contract();
    let units = units(&contract, TargetLanguage::Java);
    let renderer = TemplateRenderer::new(TargetLanguage::Java, Some(workspace_templates())).await?;
    let files = renderer.render_all(&units)?;

    let get_bucket = files
        .iter()
        .find(|f| f.path.ends_with("spectrads3/GetBucketSpectraS3Request.java"))
        .unwrap();
    assert!(get_bucket
        .contents
        .contains("return \"/_rest_/bucket/\" + this.bucketName;"));
    assert!(get_bucket.contents.contains("HttpVerb.GET"));

    let bulk_get = files
        .iter()
        .find(|f| f.path.ends_with("CreateGetJobSpectraS3Request.java"))
        .unwrap();
    assert!(bulk_get
        .contents
        .contains("this.getQueryParams().put(\"operation\", \"start_bulk_get\");"));
    Ok(())
}

#[tokio::test]
async fn test_python_head_requests_use_their_own_template() -> Result<()> {
    let contract = contract();
    let units = units(&contract, TargetLanguage::Python);
    let renderer = TemplateRenderer::new(TargetLanguage::Python, Some(workspace_templates())).await?;
    let files = renderer.render_all(&units)?;

    let head = files
        .iter()
        .find(|f| f.path.ends_with("head_object_request.py"))
        .unwrap();
    assert!(head.contents.contains("no body is read"));
    assert!(head
        .contents
        .contains("self.path = '/' + self.bucket_name + '/' + self.object_name"));

    let delete = files
        .iter()
        .find(|f| f.path.ends_with("delete_bucket_request.py"))
        .unwrap();
    assert!(delete.contents.contains("def __init__(self, bucket_name, force=False):"));
    assert!(!delete.contents.contains("no body is read"));
    Ok(())
}

#[tokio::test]
async fn test_c_types_are_headers_with_matchers() -> Result<()> {
    let contract = contract();
    let units = units(&contract, TargetLanguage::C);
    let renderer = TemplateRenderer::new(TargetLanguage::C, Some(workspace_templates())).await?;
    let files = renderer.render_all(&units)?;
    assert_eq!(files.len(), units.len() + contract.types.len());

    let find = |suffix: &str| {
        files
            .iter()
            .find(|f| f.path.ends_with(suffix))
            .unwrap_or_else(|| panic!("no file {suffix}"))
    };
    let header = find("types/blob_store_task_priority.h");
    assert!(header.contents.contains("#ifndef DS3_BLOB_STORE_TASK_PRIORITY_H"));
    let matcher = find("types/blob_store_task_priority_matcher.c");
    assert!(matcher.contents.contains("_match_ds3_blob_store_task_priority"));
    let struct_matcher = find("types/bucket_matcher.c");
    assert!(struct_matcher.contents.contains("_parse_ds3_bucket_response"));
    Ok(())
}

#[tokio::test]
async fn test_generate_writes_the_configured_target() -> Result<()> {
    let out = tempfile::tempdir()?;
    let mut config = Config::new(
        fixture_path().to_string_lossy(),
        out.path().to_string_lossy(),
    );
    config.target = "go".into();
    config.template_dir = Some(workspace_templates().to_string_lossy().into_owned());
    config.include_operations = vec!["GetServiceRequestHandler".into()];

    let written = generate(&config).await?;
    assert!(written.contains(&"ds3/commands/get_service_request.go".into()));
    // Every type is still generated; only operations are filtered
    assert_eq!(written.len(), 1 + contract().types.len());
    for path in &written {
        assert!(out.path().join(path).is_file());
    }
    Ok(())
}
