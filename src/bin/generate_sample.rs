use anyhow::{Context, Result};

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
    let mut rng = SimpleRng::new(42);

    let output_path = "sample_data.csv";
    let mut writer =
        csv::Writer::from_path(output_path).with_context(|| format!("creating {output_path}"))?;
    writer.write_record(["Year", "Revenue", "Costs", "Employees"])?;

    // Steady growth with a little noise, cost base around 80% of revenue.
    let mut revenue: f64 = 850.0;
    let mut employees: i64 = 40;
    let mut rows = 0;
    for year in 2010..=2025 {
        revenue *= 1.045 + rng.gauss(0.0, 0.015);
        let costs = revenue * (0.80 + rng.gauss(0.0, 0.03));
        employees += (rng.next_f64() * 4.0) as i64;

        writer.write_record([
            year.to_string(),
            format!("{revenue:.0}"),
            format!("{costs:.0}"),
            employees.to_string(),
        ])?;
        rows += 1;
    }

    writer.flush().context("flushing CSV")?;
    println!("Wrote {rows} rows to {output_path}");
    Ok(())
}
