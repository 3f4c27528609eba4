use std::{collections::HashMap, fs, fs::File, io::BufReader, path::Path};

use image::ImageReader;

use crate::{MetadataRecord, error::{IntegrityError, Result}};

pub struct MetadataExtractor;

impl MetadataExtractor {
    /// Extract the authoritative fields (format, dimensions, file size) plus
    /// any embedded EXIF tags from an image file.
    ///
    /// The authoritative fields are mandatory: a file that cannot be decoded
    /// as an image fails the whole extraction. The EXIF block is optional;
    /// its absence yields an empty tag map.
    pub fn extract<P: AsRef<Path>>(path: P) -> Result<MetadataRecord> {
        let path = path.as_ref();

        let reader = ImageReader::open(path)?
            .with_guessed_format()
            .map_err(|e| IntegrityError::Metadata(format!("cannot probe image format: {e}")))?;

        let format = reader
            .format()
            .map(|f| format!("{f:?}"))
            .ok_or_else(|| {
                IntegrityError::Metadata(format!("unrecognized image format: {}", path.display()))
            })?;

        let dimensions = reader
            .into_dimensions()
            .map_err(|e| IntegrityError::Metadata(format!("cannot decode header: {e}")))?;

        // File size comes from the filesystem, not the decoder.
        let file_size = fs::metadata(path)?.len();

        let tags = Self::read_exif_tags(path);

        log::debug!(
            "extracted metadata for {}: {} {}x{}, {} bytes, {} embedded tags",
            path.display(),
            format,
            dimensions.0,
            dimensions.1,
            file_size,
            tags.len()
        );

        Ok(MetadataRecord {
            format,
            dimensions,
            file_size,
            tags,
        })
    }

    fn read_exif_tags(path: &Path) -> HashMap<String, String> {
        let Ok(file) = File::open(path) else {
            return HashMap::new();
        };
        let mut reader = BufReader::new(file);

        match exif::Reader::new().read_from_container(&mut reader) {
            Ok(exif_data) => exif_data
                .fields()
                .map(|field| {
                    (
                        format!("{}", field.tag),
                        field.display_value().to_string(),
                    )
                })
                .collect(),
            Err(_) => HashMap::new(),
        }
    }
}
