use anyhow::Result;
use serde_json::json;
use small_fx::{FxConfig, FxEngine, FxError, LocalStorage};
use tempfile::TempDir;

fn write_input(temp_dir: &TempDir, value: &serde_json::Value) -> Result<String> {
    let path = temp_dir.path().join("users.json");
    std::fs::write(&path, serde_json::to_vec_pretty(value)?)?;
    Ok(path.to_string_lossy().replace('\\', "/"))
}

fn sample_users() -> serde_json::Value {
    json!({
        "users": [
            {"id": 1, "name": "Alice", "status": "active", "roles": ["admin", "dev", 7]},
            {"id": 2, "name": "Bob", "status": "inactive", "roles": ["dev"]},
            {"id": 3, "name": "Carol", "status": "active", "roles": []},
            "not-a-record",
            {"id": 4, "name": "Dan", "status": "active", "roles": ["ops"]}
        ]
    })
}

/// 過濾、展平、選欄位後輸出記錄陣列
#[test]
fn test_filter_flatten_select_records() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = write_input(&temp_dir, &sample_users())?;
    let output = format!("{}/out/roles.json", temp_dir.path().to_string_lossy().replace('\\', "/"));

    let config = FxConfig::from_toml_str(&format!(
        r#"
[pipeline]
name = "active-roles"
version = "1.0.0"

[input]
path = "{}"
records_field = "users"

[[steps]]
op = "filter"
when = {{ field = "status", equals = "active" }}

[[steps]]
op = "flatten"
field = "roles"
into = "role"
kind = "string"

[[steps]]
op = "select"
fields = ["name", "role"]
required = true

[output]
path = "{}"
"#,
        input, output
    ))?;

    let engine = FxEngine::new(LocalStorage::new(".".to_string()), config)?;
    let path = engine.run()?;
    assert_eq!(path, output);

    let written: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&output)?)?;
    assert_eq!(
        written,
        json!([
            {"name": "Alice", "role": "admin"},
            {"name": "Alice", "role": "dev"},
            {"name": "Dan", "role": "ops"}
        ])
    );

    Ok(())
}

#[test]
fn test_index_output_last_write_wins() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = write_input(&temp_dir, &sample_users())?;
    let output = format!("{}/by_status.json", temp_dir.path().to_string_lossy().replace('\\', "/"));

    let config = FxConfig::from_toml_str(&format!(
        r#"
[pipeline]
name = "by-status"
version = "1.0.0"

[input]
path = "{}"
records_field = "users"

[[steps]]
op = "select"
fields = ["id", "status"]

[output]
path = "{}"
mode = "index"
index_by = "status"
"#,
        input, output
    ))?;

    FxEngine::new(LocalStorage::new(".".to_string()), config)?.run()?;

    let written: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&output)?)?;
    assert_eq!(
        written,
        json!({
            "active": {"id": 4, "status": "active"},
            "inactive": {"id": 2, "status": "inactive"}
        })
    );

    Ok(())
}

#[test]
fn test_first_and_exists_outputs() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = write_input(&temp_dir, &sample_users())?;
    let base = temp_dir.path().to_string_lossy().replace('\\', "/");

    let run = |mode: &str, when: &str, out: &str| -> Result<serde_json::Value> {
        let output = format!("{}/{}", base, out);
        let config = FxConfig::from_toml_str(&format!(
            r#"
[pipeline]
name = "search"
version = "1.0.0"

[input]
path = "{}"
records_field = "users"

[output]
path = "{}"
mode = "{}"
when = {}
"#,
            input, output, mode, when
        ))?;
        FxEngine::new(LocalStorage::new(".".to_string()), config)?.run()?;
        Ok(serde_json::from_str(&std::fs::read_to_string(&output)?)?)
    };

    let first = run("first", r#"{ field = "name", matches = "^[BC]" }"#, "first.json")?;
    assert_eq!(first["id"], json!(2));

    let missing = run("first", r#"{ field = "name", equals = "Zoe" }"#, "missing.json")?;
    assert!(missing.is_null());

    let exists = run("exists", r#"{ field = "status", equals = "inactive" }"#, "exists.json")?;
    assert_eq!(exists, json!(true));

    Ok(())
}

#[test]
fn test_missing_required_field_aborts_without_output() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = write_input(&temp_dir, &sample_users())?;
    let output = format!("{}/never.json", temp_dir.path().to_string_lossy().replace('\\', "/"));

    let config = FxConfig::from_toml_str(&format!(
        r#"
[pipeline]
name = "strict"
version = "1.0.0"

[input]
path = "{}"
records_field = "users"

[[steps]]
op = "select"
fields = ["email"]
required = true

[output]
path = "{}"
"#,
        input, output
    ))?;

    let result = FxEngine::new(LocalStorage::new(".".to_string()), config)?.run();
    assert!(matches!(result, Err(FxError::ProcessingError { .. })));
    assert!(!std::path::Path::new(&output).exists());

    Ok(())
}
