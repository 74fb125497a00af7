use dicom_core::Tag;
use dicom_object::InMemDicomObject;

// Acquisition Tags
pub const IMAGE_TYPE: Tag = Tag(0x0008, 0x0008);
pub const MODALITY: Tag = Tag(0x0008, 0x0060);
pub const SCAN_OPTIONS: Tag = Tag(0x0018, 0x0022);

// Description Tags
pub const SERIES_DESCRIPTION: Tag = Tag(0x0008, 0x103E);

// Exposure Tags
pub const EXPOSURE_TIME: Tag = Tag(0x0018, 0x1150);
pub const XRAY_TUBE_CURRENT: Tag = Tag(0x0018, 0x1151);
pub const FILTER_TYPE: Tag = Tag(0x0018, 0x1160);

// Geometry Tags
pub const SLICE_LOCATION: Tag = Tag(0x0020, 0x1041);

// Pixel Data Tags
pub const PIXEL_DATA_GROUP_LENGTH: Tag = Tag(0x7FE0, 0x0000);
pub const PIXEL_DATA: Tag = Tag(0x7FE0, 0x0010);

/// Modality every image of an exam must have
pub const CT_MODALITY: &str = "CT";

/// Element identifiers the exam logic depends on
///
/// Defaults to the standard DICOM tags; override a field when a source
/// format revision uses different identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementTags {
    pub modality: Tag,
    pub image_type: Tag,
    pub series_description: Tag,
    pub scan_options: Tag,
    pub exposure_time: Tag,
    pub tube_current: Tag,
    pub filter_type: Tag,
    pub slice_location: Tag,
    pub pixel_data: Tag,
    pub pixel_data_group_length: Tag,
}

impl Default for ElementTags {
    fn default() -> Self {
        Self {
            modality: MODALITY,
            image_type: IMAGE_TYPE,
            series_description: SERIES_DESCRIPTION,
            scan_options: SCAN_OPTIONS,
            exposure_time: EXPOSURE_TIME,
            tube_current: XRAY_TUBE_CURRENT,
            filter_type: FILTER_TYPE,
            slice_location: SLICE_LOCATION,
            pixel_data: PIXEL_DATA,
            pixel_data_group_length: PIXEL_DATA_GROUP_LENGTH,
        }
    }
}

/// Helper to get string value from DICOM tag
///
/// Returns `None` if the tag is not present or cannot be converted to string
pub fn get_string_value(dcm: &InMemDicomObject, tag: Tag) -> Option<String> {
    dcm.element(tag)
        .ok()
        .and_then(|elem| elem.to_str().ok())
        .map(|s| trim_padding(&s).to_string())
}

/// Helper to get floating point value from DICOM tag
///
/// Returns `None` if the tag is not present or cannot be converted to f64
pub fn get_float_value(dcm: &InMemDicomObject, tag: Tag) -> Option<f64> {
    let elem = dcm.element(tag).ok()?;
    elem.to_float64().ok().or_else(|| {
        elem.to_str()
            .ok()
            .and_then(|s| trim_padding(&s).parse::<f64>().ok())
    })
}

/// Helper to get multi-string value from DICOM tag
///
/// Returns `None` if the tag is not present or cannot be converted to Vec<String>
pub fn get_multi_string_value(dcm: &InMemDicomObject, tag: Tag) -> Option<Vec<String>> {
    dcm.element(tag).ok().and_then(|elem| {
        if let Ok(strs) = elem.to_multi_str() {
            Some(strs.iter().map(|s| trim_padding(s).to_string()).collect())
        } else {
            // Fallback: try to get as single string and split by backslash
            elem.to_str()
                .ok()
                .map(|s| s.split('\\').map(|part| trim_padding(part).to_string()).collect())
        }
    })
}

/// Strips the space and NUL padding DICOM adds to even out value lengths
pub fn trim_padding(s: &str) -> &str {
    s.trim_matches(|c: char| c.is_whitespace() || c == '\0')
}

/// Formats a tag as `GGGG,EEEE`
pub fn format_tag(tag: Tag) -> String {
    format!("{:04X},{:04X}", tag.0, tag.1)
}
