//! The mapping parser

use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

/// A class rename record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassMapping {
    /// Fully-qualified original class name
    pub original: String,
    /// Obfuscated class name, trailing `:` stripped
    pub obfuscated: String,
}

/// A method rename record, attached to the most-recently-seen class line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodMapping {
    /// Original name of the owning class
    pub class_name: String,
    /// Original method text as written, e.g. `void run()`
    pub original: String,
    /// Obfuscated method name
    pub obfuscated: String,
}

/// A field rename record, attached to the most-recently-seen class line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldMapping {
    /// Original name of the owning class
    pub class_name: String,
    /// Original field text as written, e.g. `int count`
    pub original: String,
    /// Obfuscated field name
    pub obfuscated: String,
}

/// Parsed mapping file contents
#[derive(Debug, Clone, Default, Serialize)]
pub struct MappingSet {
    /// Class rename records in file order
    pub classes: Vec<ClassMapping>,
    /// Method rename records in file order
    pub methods: Vec<MethodMapping>,
    /// Field rename records in file order
    pub fields: Vec<FieldMapping>,
    /// Classes whose obfuscated name equals the original: the rename
    /// did not take effect
    pub unmapped_classes: Vec<String>,
    /// Lines that contained an arrow but could not be classified
    pub skipped_lines: u64,
}

fn member_line_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // 4-space indent, then "left -> right"
    RE.get_or_init(|| {
        Regex::new(r"^ {4}(\S.*?)\s*->\s*(\S+)\s*$").expect("member line regex is valid")
    })
}

fn class_line_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(\S.*?)\s*->\s*(\S+?):?\s*$").expect("class line regex is valid")
    })
}

impl MappingSet {
    /// Parse ProGuard-style mapping text.
    ///
    /// Blank lines and `#` comments are skipped. A line without 4-space
    /// indentation containing `->` starts a class mapping and becomes
    /// the current class context; a 4-space-indented `->` line is a
    /// member of the current class, classified as a method if its left
    /// side contains `(` and a field otherwise. Unclassifiable lines
    /// are counted and logged at debug level, never fatal.
    ///
    /// Note: the original tool advertised unmapped-class detection but
    /// always produced an empty list; here a class is unmapped when its
    /// obfuscated name equals its original name.
    ///
    /// # Examples
    ///
    /// ```
    /// use jar_guardian::mapping::MappingSet;
    ///
    /// let mapping = MappingSet::parse("com.Foo -> com.a:\n    bar() -> b");
    /// assert_eq!(mapping.classes.len(), 1);
    /// assert_eq!(mapping.methods.len(), 1);
    /// assert!(mapping.unmapped_classes.is_empty());
    /// ```
    pub fn parse(text: &str) -> Self {
        let mut set = Self::default();
        let mut current_class: Option<String> = None;

        for (line_no, line) in text.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            if !trimmed.contains("->") {
                log::debug!("mapping line {} has no arrow, skipping", line_no + 1);
                set.skipped_lines += 1;
                continue;
            }

            if line.starts_with("    ") {
                let Some(class_name) = current_class.clone() else {
                    log::debug!("mapping line {} is a member with no class context", line_no + 1);
                    set.skipped_lines += 1;
                    continue;
                };
                let Some(captures) = member_line_regex().captures(line) else {
                    log::debug!("mapping line {} is malformed, skipping", line_no + 1);
                    set.skipped_lines += 1;
                    continue;
                };
                let original = captures[1].to_string();
                let obfuscated = captures[2].to_string();

                if original.contains('(') {
                    set.methods.push(MethodMapping {
                        class_name,
                        original,
                        obfuscated,
                    });
                } else {
                    set.fields.push(FieldMapping {
                        class_name,
                        original,
                        obfuscated,
                    });
                }
            } else {
                let Some(captures) = class_line_regex().captures(line) else {
                    log::debug!("mapping line {} is malformed, skipping", line_no + 1);
                    set.skipped_lines += 1;
                    continue;
                };
                let original = captures[1].to_string();
                let obfuscated = captures[2].to_string();

                if original == obfuscated {
                    set.unmapped_classes.push(original.clone());
                }
                current_class = Some(original.clone());
                set.classes.push(ClassMapping {
                    original,
                    obfuscated,
                });
            }
        }

        set
    }

    /// True when the file yielded no records at all
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty() && self.methods.is_empty() && self.fields.is_empty()
    }

    /// Total rename records across classes, methods, and fields
    pub fn record_count(&self) -> u64 {
        (self.classes.len() + self.methods.len() + self.fields.len()) as u64
    }
}
