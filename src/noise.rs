//! Seeded improved Perlin noise with fractal octave summation.
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Factor by which coordinates grow, and amplitude shrinks, from one octave to the next.
const OCTAVE_BIAS: f64 = 2.0;

/// Perlin noise generator backed by a shuffled permutation table. Two generators with the same
/// permutation produce identical noise.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PerlinNoise {
    p: [u8; 512],
}

impl Default for PerlinNoise {
    fn default() -> PerlinNoise {
        PerlinNoise::new(0)
    }
}

impl PerlinNoise {
    pub fn new(seed: u64) -> PerlinNoise {
        let mut noise = PerlinNoise { p: [0; 512] };
        noise.reseed(seed);
        noise
    }

    /// Rebuilds the permutation table from `seed`.
    pub fn reseed(&mut self, seed: u64) {
        let mut permutation: [u8; 256] = std::array::from_fn(|i| i as u8);
        permutation.shuffle(&mut StdRng::seed_from_u64(seed));
        self.set_permutation(&permutation);
    }

    pub fn from_permutation(permutation: &[u8; 256]) -> PerlinNoise {
        let mut noise = PerlinNoise { p: [0; 512] };
        noise.set_permutation(permutation);
        noise
    }

    /// The 256-entry permutation table that fully determines this generator.
    pub fn permutation(&self) -> [u8; 256] {
        std::array::from_fn(|i| self.p[i])
    }

    pub fn set_permutation(&mut self, permutation: &[u8; 256]) {
        self.p[..256].copy_from_slice(permutation);
        self.p[256..].copy_from_slice(permutation);
    }

    fn fade(t: f64) -> f64 {
        t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
    }

    fn lerp(t: f64, a: f64, b: f64) -> f64 {
        a + t * (b - a)
    }

    fn grad(hash: u8, x: f64, y: f64, z: f64) -> f64 {
        let h = hash & 15;
        let u = if h < 8 { x } else { y };
        let v = if h < 4 {
            y
        } else if h == 12 || h == 14 {
            x
        } else {
            z
        };
        (if h & 1 == 0 { u } else { -u }) + (if h & 2 == 0 { v } else { -v })
    }

    /// Sum of the amplitudes of `octaves` octaves, used to normalise fractal noise.
    fn weight(octaves: u32) -> f64 {
        (0..octaves).map(|i| OCTAVE_BIAS.powi(-(i as i32))).sum()
    }

    /// Single-octave noise at a point; zero on every lattice point.
    pub fn raw_noise(&self, x: f64, y: f64, z: f64) -> f64 {
        let p = |i: usize| self.p[i] as usize;
        let cell = |v: f64| (v.floor() as i64 & 255) as usize;
        let (xi, yi, zi) = (cell(x), cell(y), cell(z));
        let (x, y, z) = (x - x.floor(), y - y.floor(), z - z.floor());
        let (u, v, w) = (Self::fade(x), Self::fade(y), Self::fade(z));

        let a = p(xi) + yi;
        let aa = p(a) + zi;
        let ab = p(a + 1) + zi;
        let b = p(xi + 1) + yi;
        let ba = p(b) + zi;
        let bb = p(b + 1) + zi;

        Self::lerp(
            w,
            Self::lerp(
                v,
                Self::lerp(
                    u,
                    Self::grad(self.p[aa], x, y, z),
                    Self::grad(self.p[ba], x - 1.0, y, z),
                ),
                Self::lerp(
                    u,
                    Self::grad(self.p[ab], x, y - 1.0, z),
                    Self::grad(self.p[bb], x - 1.0, y - 1.0, z),
                ),
            ),
            Self::lerp(
                v,
                Self::lerp(
                    u,
                    Self::grad(self.p[aa + 1], x, y, z - 1.0),
                    Self::grad(self.p[ba + 1], x - 1.0, y, z - 1.0),
                ),
                Self::lerp(
                    u,
                    Self::grad(self.p[ab + 1], x, y - 1.0, z - 1.0),
                    Self::grad(self.p[bb + 1], x - 1.0, y - 1.0, z - 1.0),
                ),
            ),
        )
    }

    /// Fractal noise: coordinates are divided by `frequency`, `octaves` layers are summed with
    /// halving weights, and the normalised sum is scaled by `amplitude`. Zero octaves give `0.0`.
    pub fn noise_3d(
        &self,
        x: f64,
        y: f64,
        z: f64,
        octaves: u32,
        frequency: f64,
        amplitude: f64,
    ) -> f64 {
        if octaves == 0 {
            return 0.0;
        }
        let (mut x, mut y, mut z) = (x / frequency, y / frequency, z / frequency);
        let mut result = 0.0;
        let mut amp = 1.0;
        for _ in 0..octaves {
            result += self.raw_noise(x, y, z) * amp;
            x *= OCTAVE_BIAS;
            y *= OCTAVE_BIAS;
            z *= OCTAVE_BIAS;
            amp /= OCTAVE_BIAS;
        }
        result / Self::weight(octaves) * amplitude
    }

    pub fn noise_2d(&self, x: f64, y: f64, octaves: u32, frequency: f64, amplitude: f64) -> f64 {
        self.noise_3d(x, y, 0.0, octaves, frequency, amplitude)
    }

    pub fn noise_1d(&self, x: f64, octaves: u32, frequency: f64, amplitude: f64) -> f64 {
        self.noise_3d(x, 0.0, 0.0, octaves, frequency, amplitude)
    }
}
