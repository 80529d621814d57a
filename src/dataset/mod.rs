//! Bundled and generated datasets
//!
//! [`iris`] is the classic 150-row flower measurement table shipped inside
//! the crate. The generators draw from any [`rand::Rng`], so a seeded
//! [`rand::rngs::StdRng`] gives a reproducible table.

use rand::seq::IndexedRandom;
use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::error::{Error, Result};
use crate::io::{read_csv_from_reader, CsvOptions};
use crate::table::{Table, TableBuilder};

const IRIS_CSV: &str = include_str!("../../data/iris.csv");

/// Measurement columns shared by [`iris`] and [`synthetic_iris`]
pub const IRIS_FEATURES: [&str; 4] = ["sepal_length", "sepal_width", "petal_length", "petal_width"];

pub const CITIES: [&str; 4] = ["Sao Paulo", "Rio de Janeiro", "Belo Horizonte", "Salvador"];
pub const PROFESSIONS: [&str; 5] = ["Engineer", "Doctor", "Teacher", "Lawyer", "Designer"];

// (species, [(low, high); 4]) in IRIS_FEATURES order
const SPECIES_RANGES: [(&str, [(f64, f64); 4]); 3] = [
    ("setosa", [(4.5, 5.5), (3.0, 4.0), (1.0, 2.0), (0.1, 0.5)]),
    ("versicolor", [(5.5, 6.5), (2.5, 3.5), (3.0, 4.5), (1.0, 1.5)]),
    ("virginica", [(6.0, 7.0), (2.5, 3.5), (4.5, 6.0), (1.5, 2.5)]),
];

const ROWS_PER_SPECIES: usize = 50;

/// The bundled iris dataset, grouped by `species`
pub fn iris() -> Result<Table> {
    let options = CsvOptions::default().with_categorical(["species"]);
    read_csv_from_reader(IRIS_CSV.as_bytes(), &options)
}

/// Iris-shaped table with 50 uniformly drawn rows per species
pub fn synthetic_iris<R: Rng + ?Sized>(rng: &mut R) -> Result<Table> {
    let total = SPECIES_RANGES.len() * ROWS_PER_SPECIES;
    let mut features: Vec<Vec<f64>> = vec![Vec::with_capacity(total); IRIS_FEATURES.len()];
    let mut species = Vec::with_capacity(total);

    for (name, ranges) in SPECIES_RANGES {
        for _ in 0..ROWS_PER_SPECIES {
            for (column, &(low, high)) in features.iter_mut().zip(ranges.iter()) {
                column.push(round2(rng.random_range(low..=high)));
            }
            species.push(name);
        }
    }

    let mut builder = TableBuilder::new();
    for (name, values) in IRIS_FEATURES.iter().zip(features) {
        builder = builder.numeric(*name, values);
    }
    builder.categorical("species", species).build()
}

/// People table with a few gaps in `age`, `height` and `city`
///
/// Ages are whole years in `18..80`; heights and weights are normal draws
/// around 170 cm and 70 kg.
pub fn synthetic_people<R: Rng + ?Sized>(rng: &mut R, rows: usize) -> Result<Table> {
    if rows == 0 {
        return Err(Error::InvalidInput("row count must be at least 1".into()));
    }

    let height_dist = normal(170.0, 10.0)?;
    let weight_dist = normal(70.0, 15.0)?;

    let mut age: Vec<Option<f64>> = (0..rows)
        .map(|_| Some(rng.random_range(18..80) as f64))
        .collect();
    let mut height: Vec<Option<f64>> = (0..rows).map(|_| Some(height_dist.sample(rng))).collect();
    let weight: Vec<f64> = (0..rows).map(|_| weight_dist.sample(rng)).collect();
    let mut city: Vec<Option<&str>> = (0..rows).map(|_| CITIES.choose(rng).copied()).collect();
    let profession: Vec<&str> = (0..rows)
        .map(|_| PROFESSIONS.choose(rng).copied().unwrap_or(PROFESSIONS[0]))
        .collect();

    // Draws are with replacement, so a column can end up with fewer gaps
    blank_random(rng, &mut age, 10);
    blank_random(rng, &mut height, 15);
    blank_random(rng, &mut city, 8);

    TableBuilder::new()
        .numeric_opt("age", age)
        .numeric_opt("height", height)
        .numeric("weight", weight)
        .categorical_opt("city", city)
        .categorical("profession", profession)
        .build()
}

fn normal(mean: f64, std_dev: f64) -> Result<Normal<f64>> {
    Normal::new(mean, std_dev).map_err(|e| Error::InvalidInput(format!("normal distribution: {}", e)))
}

fn blank_random<R: Rng + ?Sized, T>(rng: &mut R, column: &mut [Option<T>], draws: usize) {
    let len = column.len();
    for _ in 0..draws {
        column[rng.random_range(0..len)] = None;
    }
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::na;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_iris_shape() {
        let table = iris().unwrap();
        assert_eq!(table.row_count(), 150);
        assert_eq!(table.numeric_columns(), IRIS_FEATURES.to_vec());
        assert_eq!(table.categorical_columns(), vec!["species"]);
    }

    #[test]
    fn test_synthetic_iris_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        let table = synthetic_iris(&mut rng).unwrap();
        assert_eq!(table.row_count(), 150);
        let petal = table.numeric_values_at("petal_length", &(0..50).collect::<Vec<_>>()).unwrap();
        assert!(petal.iter().all(|&v| (1.0..=2.0).contains(&v)));
    }

    #[test]
    fn test_synthetic_people_is_reproducible() {
        let a = synthetic_people(&mut StdRng::seed_from_u64(42), 100).unwrap();
        let b = synthetic_people(&mut StdRng::seed_from_u64(42), 100).unwrap();
        assert_eq!(a, b);

        let missing = na::missing_counts(&a);
        assert!((1..=10).contains(&missing[0].1));
        assert!((1..=15).contains(&missing[1].1));
        assert_eq!(missing[2].1, 0);
        assert!((1..=8).contains(&missing[3].1));
        assert_eq!(missing[4].1, 0);
    }

    #[test]
    fn test_synthetic_people_needs_rows() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            synthetic_people(&mut rng, 0),
            Err(Error::InvalidInput(_))
        ));
    }
}
