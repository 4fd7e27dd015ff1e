pub mod district;
pub mod property;

pub use district::{District, DistrictSeed, NewDistrict, DISTRICT_SEEDS};
pub use property::{
    BuildingType, Coordinates, DeleteAck, Premises, Property, PropertyPatch, PropertyRecord,
};
