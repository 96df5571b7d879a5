//! Configuration templates for `jar-guardian init`

use super::file::ConfigFile;

/// A named configuration preset
#[derive(Debug, Clone)]
pub struct Template {
    /// Template name, used on the command line
    pub name: &'static str,
    /// One-line description shown by init
    pub description: &'static str,
    /// The configuration this template expands to
    pub config: ConfigFile,
}

impl Template {
    /// Look up a template by name
    ///
    /// # Examples
    ///
    /// ```
    /// use jar_guardian::config::Template;
    ///
    /// let template = Template::get("strict").unwrap();
    /// assert!(template.config.obfuscation.watermark_check);
    /// assert!(Template::get("bogus").is_none());
    /// ```
    pub fn get(name: &str) -> Option<Self> {
        Self::all().into_iter().find(|t| t.name == name)
    }

    /// All available templates
    pub fn all() -> Vec<Self> {
        vec![Self::minimal(), Self::standard(), Self::strict()]
    }

    /// Names of all templates, for error messages
    pub fn names() -> Vec<String> {
        Self::all().iter().map(|t| t.name.to_string()).collect()
    }

    fn minimal() -> Self {
        let mut config = ConfigFile::default();
        config.obfuscation.string_encryption = false;
        config.obfuscation.control_flow_obfuscation = false;
        config.security.enabled = false;
        config.security.decompilation_protection = false;
        Self {
            name: "minimal",
            description: "Class-name renaming check only; fastest, fewest warnings",
            config,
        }
    }

    fn standard() -> Self {
        Self {
            name: "standard",
            description: "Renaming, string encryption, and control-flow checks plus decompilation resistance",
            config: ConfigFile::default(),
        }
    }

    fn strict() -> Self {
        let mut config = ConfigFile::default();
        config.obfuscation.watermark_check = true;
        config.security.anti_debug = true;
        Self {
            name: "strict",
            description: "Every check enabled, including watermark and anti-debug detection",
            config,
        }
    }
}
