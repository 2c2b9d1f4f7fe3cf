#![forbid(unsafe_code)]

//! Deterministic sample generator.
//!
//! Each series is a slow sine wave with a little xorshift noise, so runs are
//! reproducible and the demo needs no system metrics.

/// Per-series signal parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Wave {
    period: f64,
    phase: f64,
    amplitude: f64,
    base: f64,
    noise: u64,
}

#[derive(Debug, Clone)]
pub struct Feed {
    waves: Vec<Wave>,
    state: u64,
    tick: u64,
}

impl Feed {
    /// A feed producing `series` independent streams from `seed`.
    pub fn new(series: usize, seed: u64) -> Self {
        let waves = (0..series)
            .map(|i| {
                let i = i as f64;
                Wave {
                    period: 12.0 + i * 7.0,
                    phase: i * 1.3,
                    amplitude: 30.0 + (i * 11.0) % 25.0,
                    base: 45.0,
                    noise: 12,
                }
            })
            .collect();
        Self {
            waves,
            // xorshift must not start at zero
            state: seed | 1,
            tick: 0,
        }
    }

    pub fn series(&self) -> usize {
        self.waves.len()
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Advance one step and return the next value of every series.
    pub fn next_samples(&mut self) -> Vec<u64> {
        let t = self.tick as f64;
        self.tick += 1;
        let mut samples = Vec::with_capacity(self.waves.len());
        for i in 0..self.waves.len() {
            let wave = self.waves[i];
            let angle = t / wave.period * std::f64::consts::TAU + wave.phase;
            let smooth = wave.base + wave.amplitude * angle.sin();
            let jitter = self.next_random() % (wave.noise + 1);
            samples.push(smooth.max(0.0) as u64 + jitter);
        }
        samples
    }

    fn next_random(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }
}
