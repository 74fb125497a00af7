//! Test fixtures: in-memory CT objects and a decoder serving them

use crate::error::{RradarrError, Result};
use crate::exam::{Decoder, Record};
use crate::extraction::tags::{
    EXPOSURE_TIME, FILTER_TYPE, IMAGE_TYPE, MODALITY, PIXEL_DATA, PIXEL_DATA_GROUP_LENGTH,
    SCAN_OPTIONS, SERIES_DESCRIPTION, SLICE_LOCATION, XRAY_TUBE_CURRENT,
};
use dicom_core::{DataElement, PrimitiveValue, Tag, VR};
use dicom_object::{FileMetaTableBuilder, InMemDicomObject};
use std::collections::HashMap;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const SERIES_NAME: &str = "LAPIN2 PRO APC 100KV CTDIVOL8";

const INSTANCE_NUMBER: Tag = Tag(0x0020, 0x0013);
const SOP_INSTANCE_UID: Tag = Tag(0x0008, 0x0018);

fn put_str(obj: &mut InMemDicomObject, tag: Tag, vr: VR, value: &str) {
    obj.put(DataElement::new(tag, vr, PrimitiveValue::from(value)));
}

/// CT image of the exam itself
pub fn ct_object(description: &str, instance: u32, location: f64, current: f64) -> InMemDicomObject {
    let mut obj = InMemDicomObject::new_empty();
    obj.put(DataElement::new(
        IMAGE_TYPE,
        VR::CS,
        PrimitiveValue::Strs(
            ["ORIGINAL", "PRIMARY", "AXIAL"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        ),
    ));
    put_str(&mut obj, SOP_INSTANCE_UID, VR::UI, &format!("1.2.826.0.1.3680043.2.1125.{}", instance));
    put_str(&mut obj, MODALITY, VR::CS, "CT");
    put_str(&mut obj, SERIES_DESCRIPTION, VR::LO, description);
    put_str(&mut obj, EXPOSURE_TIME, VR::IS, "400");
    put_str(&mut obj, XRAY_TUBE_CURRENT, VR::IS, &format!("{}", current));
    put_str(&mut obj, INSTANCE_NUMBER, VR::IS, &instance.to_string());
    put_str(&mut obj, SLICE_LOCATION, VR::DS, &format!("{}", location));
    obj
}

/// Scout (localizer) image, without slice location
pub fn scout_object(description: &str) -> InMemDicomObject {
    let mut obj = InMemDicomObject::new_empty();
    obj.put(DataElement::new(
        IMAGE_TYPE,
        VR::CS,
        PrimitiveValue::Strs(
            ["ORIGINAL", "PRIMARY", "LOCALIZER"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        ),
    ));
    put_str(&mut obj, MODALITY, VR::CS, "CT");
    put_str(&mut obj, SERIES_DESCRIPTION, VR::LO, description);
    put_str(&mut obj, SCAN_OPTIONS, VR::CS, "SCOUT MODE");
    obj
}

/// Adds the pixel data group, as found in files straight from the scanner
pub fn with_pixel_data(mut obj: InMemDicomObject) -> InMemDicomObject {
    obj.put(DataElement::new(
        PIXEL_DATA_GROUP_LENGTH,
        VR::UL,
        PrimitiveValue::from(40u32),
    ));
    obj.put(DataElement::new(
        PIXEL_DATA,
        VR::OW,
        PrimitiveValue::U16(vec![0u16; 16].into()),
    ));
    obj
}

/// Writes a file that passes the DICOM header check
pub fn write_stub_file(path: &Path) {
    let mut file = File::create(path).unwrap();
    file.write_all(&[0u8; 128]).unwrap();
    file.write_all(b"DICM").unwrap();
}

/// Writes a real DICOM file
pub fn write_dicom_file(dir: &Path, name: &str, obj: InMemDicomObject) -> PathBuf {
    let path = dir.join(name);
    let file_obj = obj
        .with_meta(
            FileMetaTableBuilder::new()
                .transfer_syntax("1.2.840.10008.1.2.1")
                .media_storage_sop_class_uid("1.2.840.10008.5.1.4.1.1.2")
                .media_storage_sop_instance_uid("1.2.826.0.1.3680043.2.1125.1"),
        )
        .unwrap();
    file_obj.write_to_file(&path).unwrap();
    path
}

/// Decoder serving in-memory objects for stub files
///
/// Stub files without a registered object fail to decode.
#[derive(Default)]
pub struct FixtureDecoder {
    objects: HashMap<PathBuf, InMemDicomObject>,
}

impl FixtureDecoder {
    pub fn add(&mut self, dir: &Path, name: &str, obj: InMemDicomObject) -> PathBuf {
        let path = dir.join(name);
        write_stub_file(&path);
        self.objects.insert(path.clone(), obj);
        path
    }

    pub fn add_corrupt(&mut self, dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        write_stub_file(&path);
        path
    }

    pub fn merge(&mut self, other: FixtureDecoder) {
        self.objects.extend(other.objects);
    }
}

impl Decoder for FixtureDecoder {
    fn decode(&self, path: &Path) -> Result<Record> {
        self.objects
            .get(path)
            .map(|obj| Record::new(path, obj.clone()))
            .ok_or_else(|| RradarrError::decode_failure(path, "truncated data set"))
    }
}

/// `count` images with slice locations spread over [56.125, 68.0]
///
/// File names follow acquisition order while slice locations do not, so
/// discovery order is never sorted by location.
pub fn ct_series(dir: &Path, count: u32, current: f64) -> FixtureDecoder {
    let mut decoder = FixtureDecoder::default();
    let span = (count.max(2) - 1) as f64;
    for i in 0..count {
        let slot = (i * 7) % count;
        let location = 56.125 + (68.0 - 56.125) * slot as f64 / span;
        let obj = with_pixel_data(ct_object(SERIES_NAME, i + 1, location, current));
        decoder.add(dir, &format!("IM-0001-{:04}.dcm", i + 1), obj);
    }
    decoder
}

/// Six images from three series with different element sets
pub fn mixed_series(dir: &Path) -> FixtureDecoder {
    let mut decoder = FixtureDecoder::default();
    for i in 0..6u32 {
        let mut obj = ct_object("MIXED", i + 1, i as f64, 175.0);
        match i % 3 {
            1 => put_str(&mut obj, SCAN_OPTIONS, VR::CS, "HELICAL MODE"),
            2 => put_str(&mut obj, FILTER_TYPE, VR::SH, "BODY FILTER"),
            _ => {}
        }
        decoder.add(dir, &format!("IM-000{}-0001.dcm", i + 1), obj);
    }
    decoder
}
