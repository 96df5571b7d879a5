//! JAR-to-JAR comparison
//!
//! Combines the fingerprint, class-count estimate, and sampled byte
//! distance into a summary, and folds ProGuard mapping records into
//! per-class difference details. The `differences` number is a scaled
//! estimate derived from the sampled distance, not a structural diff.

use serde::Serialize;

use super::checksum::fingerprint;
use super::classes::estimate_class_count;
use super::distance::sample_distance;
use crate::mapping::MappingSet;

/// What changed about a class between the two JARs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiffKind {
    /// Class was renamed per the mapping file
    ClassRenamed,
    /// A method on the class was renamed
    MethodRenamed,
    /// A field on the class was renamed
    FieldRenamed,
}

/// A single difference record
#[derive(Debug, Clone, Serialize)]
pub struct DiffDetail {
    /// Original class name the record belongs to
    pub class_name: String,
    /// Difference category
    pub kind: DiffKind,
    /// Original text, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original: Option<String>,
    /// Obfuscated text, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub obfuscated: Option<String>,
}

/// Aggregated comparison outcome
#[derive(Debug, Clone, Default, Serialize)]
pub struct ComparisonResult {
    /// Estimated count of changed classes
    pub differences: u64,
    /// Estimated count of unchanged classes
    pub matches: u64,
    /// Classes whose mapping rename did not take effect
    pub unmapped_classes: Vec<String>,
    /// Per-class rename details from the mapping file
    pub diff_details: Vec<DiffDetail>,
}

/// Comparison result plus the raw numbers it was derived from
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonSummary {
    /// Fingerprint of the original JAR
    pub original_fingerprint: u32,
    /// Fingerprint of the obfuscated JAR
    pub obfuscated_fingerprint: u32,
    /// Estimated class count in the original JAR
    pub original_classes: u64,
    /// Estimated class count in the obfuscated JAR
    pub obfuscated_classes: u64,
    /// Sampled byte distance, 0..=100
    pub distance: u8,
    /// Derived difference/match estimate and mapping details
    pub result: ComparisonResult,
}

/// Compare an original JAR against its obfuscated counterpart.
///
/// Deterministic for fixed inputs. With a mapping file the result also
/// carries rename details and unmapped classes; without one only the
/// byte-derived estimate is filled in.
///
/// # Examples
///
/// ```
/// use jar_guardian::analyzer::comparison::compare_jars;
///
/// let original = vec![0u8; 8192];
/// let summary = compare_jars(&original, &original, None);
///
/// assert_eq!(summary.distance, 0);
/// assert_eq!(summary.result.differences, 0);
/// assert!(summary.result.matches >= 1);
/// ```
pub fn compare_jars(
    original: &[u8],
    obfuscated: &[u8],
    mapping: Option<&MappingSet>,
) -> ComparisonSummary {
    let original_classes = estimate_class_count(original);
    let obfuscated_classes = estimate_class_count(obfuscated);
    let distance = sample_distance(original, obfuscated);

    let total = original_classes.max(obfuscated_classes);
    let differences = total * u64::from(distance) / 100;
    let matches = total - differences;

    let mut result = ComparisonResult {
        differences,
        matches,
        unmapped_classes: Vec::new(),
        diff_details: Vec::new(),
    };

    if let Some(mapping) = mapping {
        result.unmapped_classes = mapping.unmapped_classes.clone();
        result.diff_details = diff_details_from_mapping(mapping);
    }

    ComparisonSummary {
        original_fingerprint: fingerprint(original),
        obfuscated_fingerprint: fingerprint(obfuscated),
        original_classes,
        obfuscated_classes,
        distance,
        result,
    }
}

fn diff_details_from_mapping(mapping: &MappingSet) -> Vec<DiffDetail> {
    let mut details = Vec::with_capacity(mapping.record_count() as usize);

    for class in &mapping.classes {
        details.push(DiffDetail {
            class_name: class.original.clone(),
            kind: DiffKind::ClassRenamed,
            original: Some(class.original.clone()),
            obfuscated: Some(class.obfuscated.clone()),
        });
    }
    for method in &mapping.methods {
        details.push(DiffDetail {
            class_name: method.class_name.clone(),
            kind: DiffKind::MethodRenamed,
            original: Some(method.original.clone()),
            obfuscated: Some(method.obfuscated.clone()),
        });
    }
    for field in &mapping.fields {
        details.push(DiffDetail {
            class_name: field.class_name.clone(),
            kind: DiffKind::FieldRenamed,
            original: Some(field.original.clone()),
            obfuscated: Some(field.obfuscated.clone()),
        });
    }

    details
}
