//! Seeded vehicle generator.

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use uuid::Builder;

use super::Vehicle;

const NAMES: &[&str] = &[
    "Ford Mustang",
    "Ford F-150",
    "Toyota Corolla",
    "Toyota Prius",
    "Honda Civic",
    "Honda Accord",
    "Tesla Model 3",
    "Tesla Model S",
    "Chevrolet Silverado",
    "Chevrolet Camaro",
    "BMW 3 Series",
    "Audi A4",
    "Volkswagen Golf",
    "Nissan Leaf",
    "Mazda CX-5",
    "Kia Soul",
    "Hyundai Ioniq",
    "Jeep Wrangler",
    "Volvo XC90",
    "Fiat 500",
    "Mini Cooper",
    "smart fortwo",
    "Polestar 2",
    "Bugatti Chiron",
];

const TYPES: &[&str] = &[
    "Cargo Van",
    "Convertible",
    "Coupe",
    "Crew Cab Pickup",
    "Extended Cab Pickup",
    "Hatchback",
    "Minivan",
    "Passenger Van",
    "SUV",
    "Sedan",
    "Wagon",
];

const FUELS: &[&str] = &["Diesel", "Electric", "Gasoline", "Hybrid"];

/// Generates `count` vehicles; the same seed always yields the same rows.
pub(super) fn generate(count: usize, seed: u64) -> Vec<Vehicle> {
    let mut rng = StdRng::seed_from_u64(seed);

    (0..count)
        .map(|_| {
            let id = Builder::from_random_bytes(rng.random()).into_uuid();
            Vehicle {
                id: id.to_string(),
                name: pick(&mut rng, NAMES),
                kind: pick(&mut rng, TYPES),
                fuel: pick(&mut rng, FUELS),
            }
        })
        .collect()
}

fn pick(rng: &mut StdRng, values: &[&str]) -> String {
    values[rng.random_range(0..values.len())].to_string()
}
