use super::Record;
use crate::error::{RradarrError, Result};
use dicom_core::DataElement;
use dicom_object::open_file;
use std::path::Path;

/// Turns a candidate file into a decoded [`Record`]
///
/// Any failure to produce a complete record must be reported as
/// [`RradarrError::DecodeFailure`].
pub trait Decoder {
    fn decode(&self, path: &Path) -> Result<Record>;
}

/// Decoder reading DICOM files from disk with `dicom-object`
///
/// The file meta group (0002,xxxx) is kept in the record along with the
/// data set, so exports list the transfer syntax and media storage elements.
#[derive(Debug, Clone, Copy, Default)]
pub struct DicomFileDecoder;

impl Decoder for DicomFileDecoder {
    fn decode(&self, path: &Path) -> Result<Record> {
        let dcm = open_file(path).map_err(|e| RradarrError::decode_failure(path, e))?;
        let meta: Vec<_> = dcm.meta().to_element_iter().collect();
        let mut object = dcm.into_inner();
        for elem in meta {
            let header = *elem.header();
            if let Some(value) = elem.into_value().into_primitive() {
                object.put(DataElement::new(header.tag, header.vr, value));
            }
        }
        Ok(Record::new(path, object))
    }
}
