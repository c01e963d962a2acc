//! Package descriptor patching

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::{Result, ScaffoldError};

/// File name of the package descriptor in templates and generated projects
pub const PACKAGE_DESCRIPTOR: &str = "package.json";

/// Read `template_dir/package.json`, set its `name`, write it into `target_root`
///
/// Key order and every other field are preserved. Output is pretty-printed
/// with two-space indentation.
///
/// # Errors
///
/// - [`ScaffoldError::Io`] if the descriptor cannot be read or written
/// - [`ScaffoldError::MalformedDescriptor`] if it is not valid JSON
/// - [`ScaffoldError::DescriptorNotObject`] if the top level is not an object
pub fn patch_descriptor(template_dir: &Path, target_root: &Path, name: &str) -> Result<PathBuf> {
    let source = template_dir.join(PACKAGE_DESCRIPTOR);
    let content = fs::read_to_string(&source)
        .map_err(|err| ScaffoldError::io("read", &source, err))?;

    let patched = set_name(&content, name, &source)?;

    let target = target_root.join(PACKAGE_DESCRIPTOR);
    fs::write(&target, patched).map_err(|err| ScaffoldError::io("write", &target, err))?;

    tracing::info!(name, path = %target.display(), "wrote package descriptor");
    Ok(target)
}

fn set_name(content: &str, name: &str, source: &Path) -> Result<String> {
    let mut descriptor: Value =
        serde_json::from_str(content).map_err(|err| ScaffoldError::MalformedDescriptor {
            path: source.to_path_buf(),
            source: err,
        })?;

    let object = descriptor
        .as_object_mut()
        .ok_or_else(|| ScaffoldError::DescriptorNotObject(source.to_path_buf()))?;
    object.insert("name".to_string(), Value::String(name.to_string()));

    let mut rendered =
        serde_json::to_string_pretty(&descriptor).map_err(|err| ScaffoldError::MalformedDescriptor {
            path: source.to_path_buf(),
            source: err,
        })?;
    rendered.push('\n');
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    const DESCRIPTOR: &str = r#"{
  "name": "template-react",
  "private": true,
  "version": "0.0.0",
  "scripts": {
    "dev": "vite",
    "build": "vite build"
  },
  "dependencies": {
    "react": "^18.2.0"
  }
}"#;

    fn setup(content: &str) -> (TempDir, PathBuf, PathBuf) {
        let tmp = TempDir::new().unwrap();
        let template = tmp.path().join("template");
        let target = tmp.path().join("target");
        fs::create_dir_all(&template).unwrap();
        fs::create_dir_all(&target).unwrap();
        fs::write(template.join(PACKAGE_DESCRIPTOR), content).unwrap();
        (tmp, template, target)
    }

    #[test]
    fn test_only_name_changes() {
        let (_tmp, template, target) = setup(DESCRIPTOR);

        let written = patch_descriptor(&template, &target, "my-app").unwrap();

        let original: Value = serde_json::from_str(DESCRIPTOR).unwrap();
        let patched: Value = serde_json::from_str(&fs::read_to_string(written).unwrap()).unwrap();

        assert_eq!(patched["name"], json!("my-app"));
        let mut expected = original;
        expected["name"] = json!("my-app");
        assert_eq!(patched, expected);
    }

    #[test]
    fn test_output_format() {
        let (_tmp, template, target) = setup(DESCRIPTOR);

        let written = patch_descriptor(&template, &target, "my-app").unwrap();
        let text = fs::read_to_string(written).unwrap();

        assert!(text.starts_with("{\n  \"name\": \"my-app\",\n  \"private\": true,"));
        assert!(text.contains("\n    \"dev\": \"vite\""));
        assert!(text.ends_with("}\n"));
    }

    #[test]
    fn test_name_added_when_missing() {
        let (_tmp, template, target) = setup(r#"{"private": true}"#);

        let written = patch_descriptor(&template, &target, "fresh").unwrap();
        let patched: Value = serde_json::from_str(&fs::read_to_string(written).unwrap()).unwrap();

        assert_eq!(patched, json!({"private": true, "name": "fresh"}));
    }

    #[test]
    fn test_malformed_descriptor() {
        let (_tmp, template, target) = setup("{ \"name\": ");

        let err = patch_descriptor(&template, &target, "x").unwrap_err();

        assert!(matches!(err, ScaffoldError::MalformedDescriptor { .. }));
        assert!(!target.join(PACKAGE_DESCRIPTOR).exists());
    }

    #[test]
    fn test_non_object_descriptor() {
        let (_tmp, template, target) = setup("[1, 2, 3]");

        let err = patch_descriptor(&template, &target, "x").unwrap_err();

        assert!(matches!(err, ScaffoldError::DescriptorNotObject(_)));
    }

    #[test]
    fn test_missing_descriptor() {
        let tmp = TempDir::new().unwrap();

        let err = patch_descriptor(tmp.path(), tmp.path(), "x").unwrap_err();

        assert!(matches!(err, ScaffoldError::Io { action: "read", .. }));
    }
}
