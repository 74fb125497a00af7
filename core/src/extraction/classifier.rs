use crate::exam::Record;
use crate::extraction::tags::ElementTags;
use crate::types::Homogeneity;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

/// Offset of the DICOM magic string, after the 128-byte preamble
pub const DICM_MAGIC_OFFSET: u64 = 128;

/// DICOM magic string
pub const DICM_MAGIC: &[u8; 4] = b"DICM";

/// Returns true if the record is a scout (localizer) image
///
/// Records without an ImageType element are never scouts.
pub fn is_scout(record: &Record, tags: &ElementTags) -> bool {
    record
        .image_type(tags.image_type)
        .is_some_and(|image_type| image_type.is_localizer())
}

/// Checks if a path is a regular file with a DICOM header
///
/// DICOM files have a 128-byte preamble followed by the 4-byte "DICM"
/// magic string. Unreadable or short files are not candidates.
pub fn is_candidate_file(path: &Path) -> bool {
    if !path.is_file() {
        return false;
    }

    let mut file = match File::open(path) {
        Ok(f) => f,
        Err(_) => return false,
    };

    let mut magic = [0u8; 4];
    file.seek(SeekFrom::Start(DICM_MAGIC_OFFSET)).is_ok()
        && file.read_exact(&mut magic).is_ok()
        && &magic == DICM_MAGIC
}

/// Splits records into `(primary, scouts)`, keeping their relative order
pub fn partition_scouts(records: Vec<Record>, tags: &ElementTags) -> (Vec<Record>, Vec<Record>) {
    let (scouts, primary): (Vec<Record>, Vec<Record>) =
        records.into_iter().partition(|record| is_scout(record, tags));
    (primary, scouts)
}

/// Compares the structural signatures of consecutive records
///
/// Zero or one record is homogeneous by definition.
pub fn check_homogeneity<R: AsRef<Record>>(records: &[R]) -> Homogeneity {
    let signatures: Vec<String> = records
        .iter()
        .map(|r| r.as_ref().structural_signature())
        .collect();
    signatures.windows(2).all(|pair| pair[0] == pair[1]).into()
}
