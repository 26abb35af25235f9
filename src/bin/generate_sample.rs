//! Writes a small demo dataset into the store directory so a fresh checkout
//! has something to explore. Deterministic, safe to re-run.
//!
//! Usage: `generate_sample [store_dir]` (defaults to `datasets/`).

use anyhow::{Context, Result};
use polars::prelude::*;
use std::fs;
use std::path::PathBuf;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

fn main() -> Result<()> {
    let store_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("datasets"));
    fs::create_dir_all(&store_dir).context("creating store directory")?;

    let mut rng = SimpleRng::new(7);

    // (species, petal length, petal width, stem height) means and spreads
    let species_specs: [(&str, [(f64, f64); 3]); 3] = [
        ("silvermist", [(1.4, 0.2), (0.25, 0.1), (5.0, 0.4)]),
        ("dawnpetal", [(4.3, 0.5), (1.3, 0.2), (5.9, 0.5)]),
        ("duskbloom", [(5.5, 0.6), (2.0, 0.3), (6.6, 0.6)]),
    ];
    let rows_per_species = 50;

    let mut species: Vec<String> = Vec::new();
    let mut petal_length: Vec<f64> = Vec::new();
    let mut petal_width: Vec<f64> = Vec::new();
    let mut stem_height: Vec<f64> = Vec::new();

    for (name, [pl, pw, sh]) in &species_specs {
        for _ in 0..rows_per_species {
            species.push(name.to_string());
            petal_length.push((rng.gauss(pl.0, pl.1).max(0.1) * 100.0).round() / 100.0);
            petal_width.push((rng.gauss(pw.0, pw.1).max(0.05) * 100.0).round() / 100.0);
            stem_height.push((rng.gauss(sh.0, sh.1).max(0.5) * 100.0).round() / 100.0);
        }
    }

    // Mixed-case headers on purpose; the explorer lower-cases them on load.
    let mut df = DataFrame::new(vec![
        Column::new("Species".into(), species),
        Column::new("Petal_Length".into(), petal_length),
        Column::new("Petal_Width".into(), petal_width),
        Column::new("Stem_Height".into(), stem_height),
    ])
    .context("assembling demo dataframe")?;

    let path = store_dir.join("blossoms.csv");
    let mut file = fs::File::create(&path).context("creating blossoms.csv")?;
    CsvWriter::new(&mut file)
        .finish(&mut df)
        .context("writing blossoms.csv")?;

    println!("Wrote {} rows to {}", df.height(), path.display());
    Ok(())
}
