//! Hash-based value noise, its multi-octave sum, and the derived curl field.
//!
//! Everything here is a pure function of its arguments. The lattice hash is
//! the classic sine scramble, so it needs no seed and no permutation table;
//! the output is repeatable within a process for the same integer pair.

/// Frequency multiplier between consecutive octaves.
pub const LACUNARITY: f64 = 2.1;
/// Amplitude multiplier between consecutive octaves.
pub const PERSISTENCE: f64 = 0.5;
/// Octave count used by [`curl_noise`].
pub const CURL_OCTAVES: u32 = 3;
/// Finite-difference step used by [`curl_noise`].
pub const CURL_EPSILON: f64 = 1e-3;
/// How fast the lattice drifts in y relative to x as time advances.
const TIME_SKEW_Y: f64 = 0.7;

/// Pseudo-random value in [0, 1) for an integer lattice point.
pub fn hash2(ix: i64, iy: i64) -> f64 {
    let s = (ix as f64 * 127.1 + iy as f64 * 311.7).sin() * 43_758.545_312_3;
    let f = s - s.floor();
    // `s - floor(s)` rounds up to exactly 1.0 for tiny negative s.
    if f < 1.0 {
        f
    } else {
        0.0
    }
}

/// Hermite smoothstep weight `3u² - 2u³`.
fn smoothstep(u: f64) -> f64 {
    u * u * (3.0 - 2.0 * u)
}

/// Value noise at `(x + t, y + 0.7t)`, interpolated between the four
/// surrounding lattice hashes with smoothstep weights.
pub fn smooth_noise(x: f64, y: f64, t: f64) -> f64 {
    let sx = x + t;
    let sy = y + t * TIME_SKEW_Y;
    let fx = sx.floor();
    let fy = sy.floor();
    let (x0, y0) = (fx as i64, fy as i64);

    let u = smoothstep(sx - fx);
    let v = smoothstep(sy - fy);

    let n00 = hash2(x0, y0);
    let n10 = hash2(x0 + 1, y0);
    let n01 = hash2(x0, y0 + 1);
    let n11 = hash2(x0 + 1, y0 + 1);

    let nx0 = n00 * (1.0 - u) + n10 * u;
    let nx1 = n01 * (1.0 - u) + n11 * u;
    nx0 * (1.0 - v) + nx1 * v
}

/// Sum of `octaves` layers of [`smooth_noise`], normalized by total
/// amplitude. Time is scaled by the octave frequency along with space.
///
/// Returns 0 for zero octaves.
pub fn multi_octave_noise(x: f64, y: f64, t: f64, octaves: u32) -> f64 {
    let (total, max_value, _, _) = (0..octaves).fold(
        (0.0, 0.0, 1.0, 1.0),
        |(total, max_value, amplitude, frequency), _| {
            (
                total + smooth_noise(x * frequency, y * frequency, t * frequency) * amplitude,
                max_value + amplitude,
                amplitude * PERSISTENCE,
                frequency * LACUNARITY,
            )
        },
    );
    if max_value > 0.0 {
        total / max_value
    } else {
        0.0
    }
}

/// Curl of the three-octave noise: `(∂n/∂y, -∂n/∂x)` by central differences.
pub fn curl_noise(x: f64, y: f64, t: f64) -> (f64, f64) {
    let eps = CURL_EPSILON;
    let n = |px: f64, py: f64| multi_octave_noise(px, py, t, CURL_OCTAVES);
    let dn_dy = (n(x, y + eps) - n(x, y - eps)) / (2.0 * eps);
    let dn_dx = (n(x + eps, y) - n(x - eps, y)) / (2.0 * eps);
    (dn_dy, -dn_dx)
}
