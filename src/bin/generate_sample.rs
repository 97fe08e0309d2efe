use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

/// Write a demo measurement file: Gaussian peaks on a baseline plus noise.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Output file.
    #[arg(short, long, default_value = "sample_data.csv")]
    output: PathBuf,

    /// Number of samples.
    #[arg(short = 'n', long, default_value_t = 1000)]
    samples: usize,

    /// Time step between samples, in seconds.
    #[arg(long, default_value_t = 0.1)]
    step: f64,

    /// Standard deviation of the added noise.
    #[arg(long, default_value_t = 0.25)]
    noise: f64,

    /// PRNG seed.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Damage every Nth row (bad value or missing field) to exercise the
    /// reader's error log. 0 writes a clean file.
    #[arg(long, default_value_t = 0)]
    corrupt_every: usize,
}

/// (centre, width, amplitude) of a peak, centre and width as fractions of the time span.
const PEAKS: [(f64, f64, f64); 3] = [(0.2, 0.03, 4.0), (0.45, 0.015, 2.5), (0.7, 0.06, 3.0)];
const BASELINE: f64 = 1.0;

fn gaussian(x: f64, mu: f64, sigma: f64, amplitude: f64) -> f64 {
    amplitude * (-(x - mu).powi(2) / (2.0 * sigma.powi(2))).exp()
}

/// xoshiro256** seeded through an LCG; enough for reproducible demo noise.
struct Rng([u64; 4]);

impl Rng {
    fn seeded(seed: u64) -> Self {
        let mut x = seed;
        Rng(std::array::from_fn(|_| {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            x
        }))
    }

    fn next_u64(&mut self) -> u64 {
        let s = &mut self.0;
        let out = s[1].wrapping_mul(5).rotate_left(7).wrapping_mul(9);
        let t = s[1] << 17;
        s[2] ^= s[0];
        s[3] ^= s[1];
        s[1] ^= s[2];
        s[0] ^= s[3];
        s[2] ^= t;
        s[3] = s[3].rotate_left(45);
        out
    }

    fn unit(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller.
    fn normal(&mut self, std_dev: f64) -> f64 {
        let u1 = self.unit().max(1e-15);
        let u2 = self.unit();
        std_dev * (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos()
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let span = args.samples as f64 * args.step;
    let mut rng = Rng::seeded(args.seed);
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_path(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;

    writer.write_record(["time", "signal"])?;
    let mut damaged = 0;
    for i in 0..args.samples {
        let t = i as f64 * args.step;
        let signal: f64 = PEAKS
            .iter()
            .map(|&(mu, sigma, amp)| gaussian(t, mu * span, sigma * span, amp))
            .sum::<f64>()
            + BASELINE
            + rng.normal(args.noise);

        let time = format!("{t:.3}");
        if args.corrupt_every > 0 && (i + 1) % args.corrupt_every == 0 {
            damaged += 1;
            if damaged % 2 == 0 {
                writer.write_record([time.as_str()])?;
            } else {
                writer.write_record([time.as_str(), "n/a"])?;
            }
        } else {
            writer.write_record([time, format!("{signal:.6}")])?;
        }
    }
    writer.flush().context("flushing CSV writer")?;

    log::info!("{damaged} damaged rows");
    println!(
        "Wrote {} samples to {}",
        args.samples,
        args.output.display()
    );
    Ok(())
}
