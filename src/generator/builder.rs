// src/generator/builder.rs
use crate::domain::district::locative_for;
use crate::domain::{BuildingType, Coordinates, District, Premises, Property};
use crate::errors::SeedError;
use rand::Rng;
use std::ops::RangeInclusive;

/// Bounding box of the target city (Kyiv).
pub const LATITUDE_RANGE: RangeInclusive<f64> = 50.38..=50.52;
pub const LONGITUDE_RANGE: RangeInclusive<f64> = 30.28..=30.71;

pub const FLOORS_RANGE: RangeInclusive<u32> = 5..=25;
pub const ECO_RATING_RANGE: RangeInclusive<u8> = 1..=5;
pub const PREMISES_COUNT_RANGE: RangeInclusive<usize> = 1..=5;
pub const AREA_RANGE: RangeInclusive<f64> = 50.0..=150.0;
pub const ROOMS_RANGE: RangeInclusive<u32> = 1..=4;

const BUILDING_NAMES: [&str; 10] = [
    "Сонячний",
    "Затишний",
    "Престижний",
    "Ексклюзивний",
    "Елітний",
    "Парковий",
    "Центральний",
    "Новий",
    "Сучасний",
    "Комфортний",
];

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Builds random but schema-valid properties. With a seeded `R` the output is
/// fully reproducible: every draw happens in a fixed order and the text fields
/// are derived from the drawn values only.
pub struct PropertyBuilder<'a, R: Rng> {
    districts: &'a [District],
    rng: R,
}

impl<'a, R: Rng> PropertyBuilder<'a, R> {
    pub fn new(districts: &'a [District], rng: R) -> Result<Self, SeedError> {
        if districts.is_empty() {
            return Err(SeedError::DistrictsUnavailable(
                "cannot build properties without districts".to_string(),
            ));
        }
        Ok(Self { districts, rng })
    }

    /// `index` is zero-based and only shows up in the title.
    pub fn build(&mut self, index: usize) -> Property {
        let districts = self.districts;
        let district = &districts[self.rng.gen_range(0..districts.len())];
        let building_type = BuildingType::ALL[self.rng.gen_range(0..BuildingType::ALL.len())];
        let floors = self.rng.gen_range(FLOORS_RANGE);
        let eco_rating = self.rng.gen_range(ECO_RATING_RANGE);
        let building_name = format!(
            "{} {}",
            BUILDING_NAMES[self.rng.gen_range(0..BUILDING_NAMES.len())],
            self.rng.gen_range(1..=100)
        );
        let coordinates = Coordinates::new(
            round_to(self.rng.gen_range(LATITUDE_RANGE), 6),
            round_to(self.rng.gen_range(LONGITUDE_RANGE), 6),
        );

        let premises_count = self.rng.gen_range(PREMISES_COUNT_RANGE);
        let premises = (0..premises_count).map(|_| self.premises()).collect();

        let title = format!("Будинок {building_name} ({})", index + 1);
        let content = format!(
            "Сучасний будинок {building_name} у {} районі. Тип: {}, поверхів: {floors}, \
             екологічний рейтинг: {eco_rating}. Розташування: {coordinates}.",
            locative_for(&district.slug),
            building_type.display_name(),
        );

        Property {
            id: None,
            title,
            content,
            district: district.slug.clone(),
            building_name,
            coordinates,
            floors,
            building_type,
            eco_rating,
            premises,
        }
    }

    fn premises(&mut self) -> Premises {
        Premises {
            area: round_to(self.rng.gen_range(AREA_RANGE), 1),
            rooms: self.rng.gen_range(ROOMS_RANGE),
            balcony: self.rng.gen_bool(0.5),
            bathroom: self.rng.gen_bool(0.5),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn districts() -> Vec<District> {
        crate::domain::DISTRICT_SEEDS
            .iter()
            .enumerate()
            .map(|(i, s)| District {
                id: i as u64 + 1,
                name: s.name.to_string(),
                slug: s.slug.to_string(),
                description: s.description(),
            })
            .collect()
    }

    #[test]
    fn same_seed_same_property() {
        let ds = districts();
        let mut a = PropertyBuilder::new(&ds, StdRng::seed_from_u64(42)).unwrap();
        let mut b = PropertyBuilder::new(&ds, StdRng::seed_from_u64(42)).unwrap();
        for i in 0..5 {
            assert_eq!(a.build(i), b.build(i));
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let ds = districts();
        let mut a = PropertyBuilder::new(&ds, StdRng::seed_from_u64(1)).unwrap();
        let mut b = PropertyBuilder::new(&ds, StdRng::seed_from_u64(2)).unwrap();
        let left: Vec<_> = (0..5).map(|i| a.build(i)).collect();
        let right: Vec<_> = (0..5).map(|i| b.build(i)).collect();
        assert_ne!(left, right);
    }

    #[test]
    fn text_is_derived_from_drawn_values() {
        let ds = districts();
        let mut builder = PropertyBuilder::new(&ds, StdRng::seed_from_u64(7)).unwrap();
        let p = builder.build(2);

        assert_eq!(p.title, format!("Будинок {} (3)", p.building_name));
        assert!(p.content.contains(locative_for(&p.district)));
        assert!(p.content.contains(p.building_type.display_name()));
        assert!(p.content.contains(&format!("поверхів: {}", p.floors)));
        assert!(p.content.contains(&format!("екологічний рейтинг: {}", p.eco_rating)));
        assert!(p.content.contains(&p.coordinates.to_string()));
    }

    #[test]
    fn empty_district_set_is_rejected() {
        let err = PropertyBuilder::new(&[], StdRng::seed_from_u64(0)).err();
        assert!(matches!(err, Some(SeedError::DistrictsUnavailable(_))));
    }

    #[test]
    fn rounding_keeps_requested_places() {
        assert_eq!(round_to(50.123456789, 6), 50.123457);
        assert_eq!(round_to(74.96, 1), 75.0);
    }

    proptest! {
        #[test]
        fn generated_properties_respect_ranges(seed in any::<u64>(), take in 1usize..4) {
            let ds = districts();
            let allowed: Vec<&str> = ds.iter().take(take).map(|d| d.slug.as_str()).collect();
            let subset: Vec<District> = ds.iter().take(take).cloned().collect();
            let mut builder = PropertyBuilder::new(&subset, StdRng::seed_from_u64(seed)).unwrap();
            let p = builder.build(0);

            prop_assert!(allowed.contains(&p.district.as_str()));
            prop_assert!(FLOORS_RANGE.contains(&p.floors));
            prop_assert!(ECO_RATING_RANGE.contains(&p.eco_rating));
            prop_assert!(PREMISES_COUNT_RANGE.contains(&p.premises.len()));
            prop_assert!(BuildingType::ALL.contains(&p.building_type));
            prop_assert!(LATITUDE_RANGE.contains(&p.coordinates.latitude));
            prop_assert!(LONGITUDE_RANGE.contains(&p.coordinates.longitude));
            for unit in &p.premises {
                prop_assert!(AREA_RANGE.contains(&unit.area));
                prop_assert!(ROOMS_RANGE.contains(&unit.rooms));
                prop_assert_eq!(round_to(unit.area, 1), unit.area);
            }
        }
    }
}
