use std::{collections::HashMap, fmt, path::Path};

use serde::Serialize;

use crate::{diff::PixelDiffer, error::Result, metadata::{compare, extract::MetadataExtractor}};

pub mod diff;
pub mod digest;
pub mod error;
pub mod metadata;
pub mod report;

#[derive(Debug, Clone)]
pub struct VerifierConfig {
    /// Upper bound on differing coordinates recorded during a pixel scan.
    pub max_scan: usize,
    /// Upper bound on coordinates kept for display.
    pub sample_limit: usize,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            max_scan: 100,
            sample_limit: 20,
        }
    }
}

/// Orchestrates the three verification modes: digest generation, comparison
/// against a stored digest, and two-image comparison with escalation from
/// metadata to whole-file hash to pixel diff.
///
/// Each operation is independent; no state is carried between calls.
pub struct IntegrityVerifier {
    config: VerifierConfig,
}

impl IntegrityVerifier {
    pub fn new() -> Self {
        Self {
            config: VerifierConfig::default(),
        }
    }

    pub fn with_config(mut self, config: VerifierConfig) -> Self {
        self.config = config;
        self
    }

    /// Compute the digest of an image for the operator to store.
    pub fn generate_digest<P: AsRef<Path>>(&self, image: P) -> Result<String> {
        digest::digest_file(image)
    }

    /// Compare an image against a previously stored digest string.
    ///
    /// The stored digest is compared case-sensitively against the lowercase
    /// hex produced by the digest engine. No metadata stage runs here; a
    /// stored digest carries nothing to compare metadata against.
    pub fn verify_stored_digest<P: AsRef<Path>>(&self, image: P, stored: &str) -> Result<Verdict> {
        let computed = digest::digest_file(image)?;

        if computed == stored {
            Ok(Verdict::Match)
        } else {
            Ok(Verdict::HashMismatch {
                stored: stored.to_string(),
                computed,
            })
        }
    }

    /// Compare an original image against a suspect with staged escalation.
    ///
    /// Metadata divergence is reported immediately without computing any
    /// digest; a dimension or format mismatch already proves container-level
    /// change and makes pixel comparison meaningless. Only when metadata is
    /// equivalent and the digests still differ does the pixel differencer
    /// run, to localize the content change or establish that the byte-level
    /// change left no visible trace.
    pub fn compare_images<P: AsRef<Path>>(&self, original: P, suspect: P) -> Result<Verdict> {
        let original = original.as_ref();
        let suspect = suspect.as_ref();

        let original_meta = MetadataExtractor::extract(original)?;
        let suspect_meta = MetadataExtractor::extract(suspect)?;

        if let MetadataEquivalence::Divergent(differences) =
            compare(&original_meta, &suspect_meta)
        {
            log::info!("metadata mismatch, skipping hash and pixel stages");
            return Ok(Verdict::MetadataMismatch(differences));
        }

        let original_digest = digest::digest_file(original)?;
        let suspect_digest = digest::digest_file(suspect)?;

        if original_digest == suspect_digest {
            return Ok(Verdict::Match);
        }

        log::info!("digest mismatch with equivalent metadata, escalating to pixel diff");

        // Normalize both sides to 8-bit RGB before any pixel access so an
        // alpha-only edit still counts as a content change.
        let original_rgb = image::open(original)?.to_rgb8();
        let suspect_rgb = image::open(suspect)?.to_rgb8();

        let differ = PixelDiffer::new(self.config.max_scan, self.config.sample_limit);

        match differ.diff(&original_rgb, &suspect_rgb) {
            DifferenceReport::Differing(differences) => Ok(Verdict::ContentMismatch(differences)),
            DifferenceReport::NoVisualDiff => Ok(Verdict::HashMismatchNoVisualDiff),
            // Equivalent metadata implies equal dimensions, so this arm only
            // fires if a file changed between the metadata and pixel stages.
            // Report it as the dimension divergence it is.
            DifferenceReport::Incomparable { original, suspect } => {
                Ok(Verdict::MetadataMismatch(vec![FieldDifference {
                    field: AuthoritativeField::Dimensions,
                    original: compare::format_dimensions(original),
                    suspect: compare::format_dimensions(suspect),
                }]))
            }
        }
    }
}

impl Default for IntegrityVerifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Metadata for one image: the fixed authoritative zone used for equivalence
/// decisions plus an open map of embedded tags kept for display only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataRecord {
    pub format: String,
    pub dimensions: (u32, u32),
    pub file_size: u64,
    pub tags: HashMap<String, String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AuthoritativeField {
    Format,
    Dimensions,
    FileSize,
}

impl fmt::Display for AuthoritativeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Format => write!(f, "Format"),
            Self::Dimensions => write!(f, "Dimensions"),
            Self::FileSize => write!(f, "File Size"),
        }
    }
}

/// One authoritative field holding different values in the two records,
/// with both display values attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDifference {
    pub field: AuthoritativeField,
    pub original: String,
    pub suspect: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataEquivalence {
    Equivalent,
    Divergent(Vec<FieldDifference>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Localized pixel differences between two equal-dimension images.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PixelDifferences {
    /// Smallest rectangle enclosing every differing pixel.
    pub bounding_region: Region,
    /// Differing coordinates found, capped at the configured scan limit.
    pub differing_count: usize,
    /// True when the scan stopped at the cap, so the count is a floor.
    pub count_is_partial: bool,
    /// First coordinates in scan order, truncated to the sample limit.
    pub sample: Vec<(u32, u32)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DifferenceReport {
    /// Dimensions differ; no pixel scan was performed.
    Incomparable {
        original: (u32, u32),
        suspect: (u32, u32),
    },
    /// Every channel delta is zero despite the digests differing.
    NoVisualDiff,
    Differing(PixelDifferences),
}

/// Terminal outcome of a verification call, rendered by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Match,
    MetadataMismatch(Vec<FieldDifference>),
    HashMismatch { stored: String, computed: String },
    ContentMismatch(PixelDifferences),
    HashMismatchNoVisualDiff,
}
