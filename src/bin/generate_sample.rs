use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use cptu_sbt::data::model::SoundingRecord;
use parquet::arrow::ArrowWriter;

const WATER_TABLE: f64 = 1.0; // m
const UNIT_WEIGHT: f64 = 18.5; // kN/m³
const WATER_UNIT_WEIGHT: f64 = 9.81; // kN/m³
const STEP: f64 = 0.02; // m
const BOTTOM: f64 = 20.0; // m

/// Idealized layer: median cone resistance (kPa), friction ratio (%) and the
/// fraction of net cone resistance showing up as excess pore pressure.
struct Layer {
    top: f64,
    qt: f64,
    fr: f64,
    excess_u2: f64,
}

static LAYERS: [Layer; 4] = [
    Layer { top: 0.0, qt: 8000.0, fr: 0.6, excess_u2: 0.0 },
    Layer { top: 3.0, qt: 700.0, fr: 3.5, excess_u2: 0.35 },
    Layer { top: 9.0, qt: 2500.0, fr: 1.8, excess_u2: 0.1 },
    Layer { top: 14.0, qt: 15000.0, fr: 0.4, excess_u2: 0.0 },
];

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

fn layer_at(depth: f64) -> &'static Layer {
    LAYERS
        .iter()
        .rev()
        .find(|layer| depth >= layer.top)
        .unwrap_or(&LAYERS[0])
}

fn generate_sounding(rng: &mut SimpleRng) -> Vec<SoundingRecord> {
    let n = (BOTTOM / STEP).round() as usize;
    (1..=n)
        .map(|i| {
            let depth = i as f64 * STEP;
            let layer = layer_at(depth);

            let sigma_vo = UNIT_WEIGHT * depth;
            let u0 = WATER_UNIT_WEIGHT * (depth - WATER_TABLE).max(0.0);
            let sigma_vo_eff = sigma_vo - u0;

            // Log-normal scatter around the layer medians.
            let qt = layer.qt * rng.gauss(0.0, 0.15).exp() + sigma_vo;
            let fs = qt * layer.fr / 100.0 * rng.gauss(0.0, 0.1).exp();
            let u2 = u0 + layer.excess_u2 * (qt - sigma_vo);

            SoundingRecord {
                depth,
                qt,
                fs,
                u2,
                sigma_vo_eff,
            }
        })
        .collect()
}

fn write_csv(path: &str, records: &[SoundingRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
    for record in records {
        writer.serialize(record).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV file")?;
    Ok(())
}

fn write_parquet(path: &str, records: &[SoundingRecord]) -> Result<()> {
    let column = |f: fn(&SoundingRecord) -> f64| -> ArrayRef {
        Arc::new(Float64Array::from(records.iter().map(f).collect::<Vec<_>>()))
    };

    let schema = Arc::new(Schema::new(
        SoundingRecord::COLUMNS
            .iter()
            .map(|name| Field::new(*name, DataType::Float64, false))
            .collect::<Vec<_>>(),
    ));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            column(|r| r.depth),
            column(|r| r.qt),
            column(|r| r.fs),
            column(|r| r.u2),
            column(|r| r.sigma_vo_eff),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let records = generate_sounding(&mut rng);

    write_csv("sample_cptu.csv", &records)?;
    write_parquet("sample_cptu.parquet", &records)?;

    println!(
        "Wrote {} records ({:.2} – {:.2} m) to sample_cptu.csv and sample_cptu.parquet",
        records.len(),
        records.first().map_or(0.0, |r| r.depth),
        records.last().map_or(0.0, |r| r.depth),
    );
    Ok(())
}
