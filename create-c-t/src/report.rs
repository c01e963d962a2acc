//! Next-step instructions after a project is created

use std::path::{Component, Path, PathBuf};

use console::style;

/// Package manager that launched the scaffolder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageManager {
    /// Executable name, e.g. `npm`, `yarn`, `pnpm`
    pub name: String,
    /// Version if the hint carried one
    pub version: Option<String>,
}

impl PackageManager {
    /// Manager with no known version
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: None,
        }
    }

    /// Parse a user-agent hint such as `yarn/1.22.19 npm/? node/v18.0.0`
    ///
    /// Only the first space-separated token is looked at. Returns `None` when
    /// the hint is absent or has no name before the `/`.
    #[must_use]
    pub fn from_user_agent(user_agent: Option<&str>) -> Option<Self> {
        let token = user_agent?.split(' ').next()?;
        let mut parts = token.split('/');
        let name = parts.next()?.trim();
        if name.is_empty() {
            return None;
        }
        let version = parts.next().filter(|v| !v.is_empty()).map(str::to_string);

        Some(Self {
            name: name.to_string(),
            version,
        })
    }

    /// Manager from the hint, falling back to `default_name`
    #[must_use]
    pub fn detect(user_agent: Option<&str>, default_name: &str) -> Self {
        let manager =
            Self::from_user_agent(user_agent).unwrap_or_else(|| Self::named(default_name));
        tracing::debug!(manager = %manager.name, version = ?manager.version, "detected package manager");
        manager
    }

    /// Install and run commands for this manager
    #[must_use]
    pub fn commands(&self) -> [String; 2] {
        match self.name.as_str() {
            "yarn" => ["yarn".to_string(), "yarn dev".to_string()],
            name => [format!("{name} install"), format!("{name} run dev")],
        }
    }
}

/// Instruction lines for a project created at `root` from `cwd`
///
/// The `cd` line is present only when `root` differs from `cwd`, and always
/// names `root` relative to `cwd`.
#[must_use]
pub fn next_steps(cwd: &Path, root: &Path, manager: &PackageManager) -> Vec<String> {
    let mut lines = Vec::with_capacity(3);

    let relative = relative_path(cwd, root);
    if !relative.as_os_str().is_empty() {
        lines.push(format!("cd {}", relative.display()));
    }

    lines.extend(manager.commands());
    lines
}

/// Path of `to` as seen from `from`, walking up with `..` where needed
///
/// Both paths are compared lexically after dropping `.` components. Returns
/// `to` unchanged when the two have no common root (different drive
/// prefixes, or one absolute and one relative).
#[must_use]
pub fn relative_path(from: &Path, to: &Path) -> PathBuf {
    let from = normalized(from);
    let to = normalized(to);

    fn rooted<'a>(parts: &[Component<'a>]) -> Vec<Component<'a>> {
        parts
            .iter()
            .take_while(|c| matches!(c, Component::Prefix(_) | Component::RootDir))
            .copied()
            .collect::<Vec<_>>()
    }
    if rooted(&from) != rooted(&to) {
        return to.iter().collect();
    }

    let shared = from.iter().zip(&to).take_while(|(a, b)| a == b).count();

    let mut relative = PathBuf::new();
    for _ in &from[shared..] {
        relative.push(Component::ParentDir);
    }
    for part in &to[shared..] {
        relative.push(part);
    }
    relative
}

fn normalized(path: &Path) -> Vec<Component<'_>> {
    let mut parts: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir if matches!(parts.last(), Some(Component::Normal(_))) => {
                parts.pop();
            }
            other => parts.push(other),
        }
    }
    parts
}

/// Print the completion message
pub fn print_next_steps(lines: &[String]) {
    println!();
    println!("{}", style("Done. Now run:").green().bold());
    println!();
    for line in lines {
        println!("  {}", style(line).cyan());
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_yarn_hint() {
        let manager = PackageManager::from_user_agent(Some("yarn/1.22.19 npm/? node/v18.12.0")).unwrap();
        assert_eq!(manager.name, "yarn");
        assert_eq!(manager.version.as_deref(), Some("1.22.19"));
    }

    #[test]
    fn test_parse_without_version() {
        let manager = PackageManager::from_user_agent(Some("pnpm")).unwrap();
        assert_eq!(manager, PackageManager::named("pnpm"));
    }

    #[test]
    fn test_unparseable_hints() {
        assert_eq!(PackageManager::from_user_agent(None), None);
        assert_eq!(PackageManager::from_user_agent(Some("")), None);
        assert_eq!(PackageManager::from_user_agent(Some("/1.0.0 node/18")), None);
        assert_eq!(PackageManager::from_user_agent(Some(" yarn/1.0")), None);
    }

    #[test]
    fn test_detect_falls_back() {
        assert_eq!(PackageManager::detect(None, "npm").name, "npm");
        assert_eq!(PackageManager::detect(Some("bun/1.1.0"), "npm").name, "bun");
    }

    #[test]
    fn test_yarn_commands() {
        let manager = PackageManager::named("yarn");
        assert_eq!(manager.commands(), ["yarn".to_string(), "yarn dev".to_string()]);
    }

    #[test]
    fn test_generic_commands() {
        let manager = PackageManager::named("pnpm");
        assert_eq!(
            manager.commands(),
            ["pnpm install".to_string(), "pnpm run dev".to_string()]
        );
    }

    #[test]
    fn test_next_steps_with_cd() {
        let cwd = PathBuf::from("/work");
        let lines = next_steps(&cwd, &cwd.join("my-app"), &PackageManager::named("npm"));
        assert_eq!(lines, vec!["cd my-app", "npm install", "npm run dev"]);
    }

    #[test]
    fn test_next_steps_nested_target() {
        let cwd = PathBuf::from("/work");
        let lines = next_steps(&cwd, &cwd.join("apps/web"), &PackageManager::named("yarn"));
        assert_eq!(lines[0], format!("cd {}", Path::new("apps/web").display()));
        assert_eq!(lines[1..], ["yarn".to_string(), "yarn dev".to_string()]);
    }

    #[test]
    fn test_next_steps_same_directory() {
        let cwd = PathBuf::from("/work/my-app");
        let lines = next_steps(&cwd, &cwd.join("."), &PackageManager::named("npm"));
        assert_eq!(lines, vec!["npm install", "npm run dev"]);
    }

    #[test]
    fn test_next_steps_root_outside_cwd() {
        let lines = next_steps(
            Path::new("/work/a"),
            Path::new("/tmp/x"),
            &PackageManager::named("npm"),
        );
        assert_eq!(lines[0], format!("cd {}", Path::new("../../tmp/x").display()));
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_next_steps_sibling_via_parent_name() {
        let cwd = PathBuf::from("/work/a");
        let lines = next_steps(&cwd, &cwd.join("../b"), &PackageManager::named("npm"));
        assert_eq!(lines[0], format!("cd {}", Path::new("../b").display()));
    }

    #[test]
    fn test_relative_path() {
        assert_eq!(relative_path(Path::new("/work"), Path::new("/work")), PathBuf::new());
        assert_eq!(
            relative_path(Path::new("/work/a/b"), Path::new("/work/c")),
            PathBuf::from("../../c")
        );
        assert_eq!(
            relative_path(Path::new("/work"), Path::new("/work/./apps/web")),
            PathBuf::from("apps/web")
        );
        assert_eq!(relative_path(Path::new("/work"), Path::new("/")), PathBuf::from(".."));
        assert_eq!(
            relative_path(Path::new("work"), Path::new("/tmp/x")),
            PathBuf::from("/tmp/x")
        );
    }

    proptest! {
        #[test]
        fn prop_first_token_names_manager(
            name in "[a-z][a-z0-9-]{0,10}",
            version in "[0-9]{1,2}\\.[0-9]{1,2}\\.[0-9]{1,2}",
            rest in "( [a-z]+/[?0-9.v]+){0,3}",
        ) {
            let hint = format!("{name}/{version}{rest}");
            let manager = PackageManager::from_user_agent(Some(&hint)).unwrap();
            prop_assert_eq!(manager.name, name);
            prop_assert_eq!(manager.version, Some(version));
        }

        #[test]
        fn prop_non_yarn_managers_use_generic_commands(name in "[a-z]{1,8}") {
            prop_assume!(name != "yarn");
            let [install, run] = PackageManager::named(name.clone()).commands();
            prop_assert_eq!(install, format!("{name} install"));
            prop_assert_eq!(run, format!("{name} run dev"));
        }
    }
}
