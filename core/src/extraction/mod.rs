pub mod classifier;
pub mod dictionary;
pub mod tags;

pub use classifier::{
    check_homogeneity, is_candidate_file, is_scout, partition_scouts, DICM_MAGIC,
    DICM_MAGIC_OFFSET,
};
pub use dictionary::ElementDictionary;
pub use tags::*;
