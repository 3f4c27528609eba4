use serde::Serialize;

use crate::{FieldDifference, PixelDifferences, Region, Verdict};

/// Serializable view of a [`Verdict`] for the presentation layer.
///
/// The core never prints anything; the shell renders either this JSON form
/// or its own text from the verdict directly.
#[derive(Serialize)]
pub struct VerdictReport {
    pub verdict: &'static str,
    pub tampering_detected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata_differences: Option<Vec<FieldDifferenceSection>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash_comparison: Option<HashSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pixel_analysis: Option<PixelSection>,
}

#[derive(Serialize)]
pub struct FieldDifferenceSection {
    pub field: String,
    pub original: String,
    pub suspect: String,
}

#[derive(Serialize)]
pub struct HashSection {
    pub stored: String,
    pub computed: String,
}

#[derive(Serialize)]
pub struct PixelSection {
    pub bounding_region: Region,
    pub differing_count: usize,
    pub count_is_partial: bool,
    pub sample: Vec<(u32, u32)>,
}

impl From<&Verdict> for VerdictReport {
    fn from(verdict: &Verdict) -> Self {
        match verdict {
            Verdict::Match => Self {
                verdict: "match",
                tampering_detected: false,
                metadata_differences: None,
                hash_comparison: None,
                pixel_analysis: None,
            },
            Verdict::MetadataMismatch(differences) => Self {
                verdict: "metadata_mismatch",
                tampering_detected: true,
                metadata_differences: Some(
                    differences.iter().map(FieldDifferenceSection::from).collect(),
                ),
                hash_comparison: None,
                pixel_analysis: None,
            },
            Verdict::HashMismatch { stored, computed } => Self {
                verdict: "hash_mismatch",
                tampering_detected: true,
                metadata_differences: None,
                hash_comparison: Some(HashSection {
                    stored: stored.clone(),
                    computed: computed.clone(),
                }),
                pixel_analysis: None,
            },
            Verdict::ContentMismatch(differences) => Self {
                verdict: "content_mismatch",
                tampering_detected: true,
                metadata_differences: None,
                hash_comparison: None,
                pixel_analysis: Some(PixelSection::from(differences)),
            },
            Verdict::HashMismatchNoVisualDiff => Self {
                verdict: "hash_mismatch_no_visual_diff",
                tampering_detected: true,
                metadata_differences: None,
                hash_comparison: None,
                pixel_analysis: None,
            },
        }
    }
}

impl From<&FieldDifference> for FieldDifferenceSection {
    fn from(difference: &FieldDifference) -> Self {
        Self {
            field: difference.field.to_string(),
            original: difference.original.clone(),
            suspect: difference.suspect.clone(),
        }
    }
}

impl From<&PixelDifferences> for PixelSection {
    fn from(differences: &PixelDifferences) -> Self {
        Self {
            bounding_region: differences.bounding_region,
            differing_count: differences.differing_count,
            count_is_partial: differences.count_is_partial,
            sample: differences.sample.clone(),
        }
    }
}

impl VerdictReport {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
