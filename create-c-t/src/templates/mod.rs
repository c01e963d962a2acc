//! Template selection
//!
//! Maps the user's framework and language choices to a template key, and the
//! key to the directory shipped for it. The four keys and their directories:
//!
//! | Framework | Language   | Key        | Directory           |
//! |-----------|------------|------------|---------------------|
//! | React     | TypeScript | `react-ts` | `template-react-ts` |
//! | React     | JavaScript | `react`    | `template-react`    |
//! | Vue 3     | TypeScript | `-ts`      | `template-ts`       |
//! | Vue 3     | JavaScript | (empty)    | `template-default`  |
//!
//! The empty key names the bare default template: a minimal Vue 3 starter
//! written in plain JavaScript.

use std::fmt;

pub mod registry;

pub use registry::TemplateRegistry;

/// Prefix shared by every template directory name
const DIR_PREFIX: &str = "template";

/// Directory used for the empty key
pub const DEFAULT_TEMPLATE_DIR: &str = "template-default";

/// UI framework of the generated project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Framework {
    /// React
    React,
    /// Vue 3
    #[value(name = "vue3", alias = "vue")]
    Vue3,
}

impl Framework {
    /// Choices in prompt order
    pub const ALL: [Self; 2] = [Self::React, Self::Vue3];

    /// Label shown in the prompt
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::React => "React",
            Self::Vue3 => "Vue3",
        }
    }

    const fn segment(self) -> &'static str {
        match self {
            Self::React => "react",
            Self::Vue3 => "",
        }
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Source language of the generated project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Language {
    /// TypeScript
    #[value(name = "ts", alias = "typescript")]
    TypeScript,
    /// JavaScript
    #[value(name = "js", alias = "javascript")]
    JavaScript,
}

impl Language {
    /// Choices in prompt order
    pub const ALL: [Self; 2] = [Self::TypeScript, Self::JavaScript];

    /// Label shown in the prompt
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::TypeScript => "TypeScript",
            Self::JavaScript => "JavaScript",
        }
    }

    const fn segment(self) -> &'static str {
        match self {
            Self::TypeScript => "-ts",
            Self::JavaScript => "",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Key identifying one shipped template
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TemplateKey(String);

impl TemplateKey {
    /// Compute the key for a framework and language pair
    #[must_use]
    pub fn resolve(framework: Framework, language: Language) -> Self {
        Self(format!("{}{}", framework.segment(), language.segment()))
    }

    /// Every key reachable from the declared choices
    #[must_use]
    pub fn all() -> Vec<Self> {
        Framework::ALL
            .iter()
            .flat_map(|&framework| {
                Language::ALL
                    .iter()
                    .map(move |&language| Self::resolve(framework, language))
            })
            .collect()
    }

    /// Raw key text (may be empty)
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the bare default template
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.0.is_empty()
    }

    /// Name of the template directory for this key
    #[must_use]
    pub fn dir_name(&self) -> String {
        if self.is_default() {
            DEFAULT_TEMPLATE_DIR.to_string()
        } else if self.0.starts_with('-') {
            format!("{DIR_PREFIX}{}", self.0)
        } else {
            format!("{DIR_PREFIX}-{}", self.0)
        }
    }

    /// Recover the key from a template directory name
    #[must_use]
    pub fn from_dir_name(dir_name: &str) -> Option<Self> {
        if dir_name == DEFAULT_TEMPLATE_DIR {
            return Some(Self(String::new()));
        }
        let rest = dir_name.strip_prefix(DIR_PREFIX)?.strip_prefix('-')?;
        Self::all()
            .into_iter()
            .find(|key| !key.is_default() && key.0.trim_start_matches('-') == rest)
    }
}

impl fmt::Display for TemplateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_default() {
            f.write_str("(default)")
        } else {
            f.write_str(&self.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_resolve_table() {
        let cases = [
            (Framework::React, Language::TypeScript, "react-ts", "template-react-ts"),
            (Framework::React, Language::JavaScript, "react", "template-react"),
            (Framework::Vue3, Language::TypeScript, "-ts", "template-ts"),
            (Framework::Vue3, Language::JavaScript, "", "template-default"),
        ];

        for (framework, language, key, dir) in cases {
            let resolved = TemplateKey::resolve(framework, language);
            assert_eq!(resolved.as_str(), key, "{framework}/{language}");
            assert_eq!(resolved.dir_name(), dir, "{framework}/{language}");
        }
    }

    #[test]
    fn test_vue_javascript_is_default() {
        let key = TemplateKey::resolve(Framework::Vue3, Language::JavaScript);
        assert!(key.is_default());
        assert_eq!(key.to_string(), "(default)");
    }

    #[test]
    fn test_all_keys_are_distinct() {
        let keys = TemplateKey::all();
        assert_eq!(keys.len(), 4);

        let dirs: HashSet<String> = keys.iter().map(TemplateKey::dir_name).collect();
        assert_eq!(dirs.len(), 4);
    }

    #[test]
    fn test_dir_name_round_trips() {
        for key in TemplateKey::all() {
            assert_eq!(TemplateKey::from_dir_name(&key.dir_name()), Some(key));
        }
    }

    #[test]
    fn test_from_dir_name_rejects_unknown() {
        assert_eq!(TemplateKey::from_dir_name("template-svelte"), None);
        assert_eq!(TemplateKey::from_dir_name("react"), None);
        assert_eq!(TemplateKey::from_dir_name("template"), None);
    }
}
