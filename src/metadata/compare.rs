use crate::{AuthoritativeField, FieldDifference, MetadataEquivalence, MetadataRecord};

/// Compare two metadata records over the authoritative field set.
///
/// Fields are checked in a fixed order (format, dimensions, file size) so the
/// resulting difference list is deterministic. Embedded tags are mutable
/// noise and never participate in the equivalence decision.
pub fn compare(original: &MetadataRecord, suspect: &MetadataRecord) -> MetadataEquivalence {
    let mut differences = Vec::new();

    if original.format != suspect.format {
        differences.push(FieldDifference {
            field: AuthoritativeField::Format,
            original: original.format.clone(),
            suspect: suspect.format.clone(),
        });
    }

    if original.dimensions != suspect.dimensions {
        differences.push(FieldDifference {
            field: AuthoritativeField::Dimensions,
            original: format_dimensions(original.dimensions),
            suspect: format_dimensions(suspect.dimensions),
        });
    }

    if original.file_size != suspect.file_size {
        differences.push(FieldDifference {
            field: AuthoritativeField::FileSize,
            original: original.file_size.to_string(),
            suspect: suspect.file_size.to_string(),
        });
    }

    if differences.is_empty() {
        MetadataEquivalence::Equivalent
    } else {
        log::debug!("metadata divergence on {} field(s)", differences.len());
        MetadataEquivalence::Divergent(differences)
    }
}

pub(crate) fn format_dimensions((width, height): (u32, u32)) -> String {
    format!("{width}x{height}")
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn record(format: &str, dimensions: (u32, u32), file_size: u64) -> MetadataRecord {
        MetadataRecord {
            format: format.into(),
            dimensions,
            file_size,
            tags: HashMap::new(),
        }
    }

    #[test]
    fn test_identical_records_are_equivalent() {
        let a = record("Png", (100, 80), 4321);
        let b = record("Png", (100, 80), 4321);

        assert!(matches!(compare(&a, &b), MetadataEquivalence::Equivalent));
    }

    #[test]
    fn test_file_size_divergence_only() {
        let a = record("Png", (100, 80), 4321);
        let b = record("Png", (100, 80), 5000);

        let MetadataEquivalence::Divergent(diffs) = compare(&a, &b) else {
            panic!("expected divergence");
        };
        assert_eq!(diffs.len(), 1);
        assert_eq!(diffs[0].field, AuthoritativeField::FileSize);
        assert_eq!(diffs[0].original, "4321");
        assert_eq!(diffs[0].suspect, "5000");
    }

    #[test]
    fn test_dimension_divergence() {
        let a = record("Png", (100, 80), 4321);
        let b = record("Png", (64, 64), 4321);

        let MetadataEquivalence::Divergent(diffs) = compare(&a, &b) else {
            panic!("expected divergence");
        };
        assert_eq!(diffs[0].field, AuthoritativeField::Dimensions);
        assert_eq!(diffs[0].original, "100x80");
        assert_eq!(diffs[0].suspect, "64x64");
    }

    #[test]
    fn test_differences_follow_fixed_field_order() {
        let a = record("Png", (100, 80), 4321);
        let b = record("Jpeg", (64, 64), 5000);

        let MetadataEquivalence::Divergent(diffs) = compare(&a, &b) else {
            panic!("expected divergence");
        };
        let fields: Vec<_> = diffs.iter().map(|d| d.field).collect();
        assert_eq!(
            fields,
            vec![
                AuthoritativeField::Format,
                AuthoritativeField::Dimensions,
                AuthoritativeField::FileSize
            ]
        );
    }

    #[test]
    fn test_divergence_is_symmetric() {
        let a = record("Png", (100, 80), 4321);
        let b = record("Jpeg", (100, 80), 5000);

        let MetadataEquivalence::Divergent(forward) = compare(&a, &b) else {
            panic!("expected divergence");
        };
        let MetadataEquivalence::Divergent(backward) = compare(&b, &a) else {
            panic!("expected divergence");
        };

        assert_eq!(forward.len(), backward.len());
        for (f, b) in forward.iter().zip(backward.iter()) {
            assert_eq!(f.field, b.field);
            assert_eq!(f.original, b.suspect);
            assert_eq!(f.suspect, b.original);
        }
    }

    #[test]
    fn test_embedded_tags_are_ignored() {
        let mut a = record("Png", (100, 80), 4321);
        let mut b = record("Png", (100, 80), 4321);
        a.tags.insert("Software".into(), "darktable".into());
        b.tags.insert("Software".into(), "Photoshop".into());

        assert!(matches!(compare(&a, &b), MetadataEquivalence::Equivalent));
    }
}
