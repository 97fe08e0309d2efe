use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Window kinds
// ---------------------------------------------------------------------------

/// Smoothing kernels. `Flat` is a plain moving average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowKind {
    Flat,
    Hanning,
    Hamming,
    Bartlett,
    Blackman,
}

impl WindowKind {
    pub const ALL: [WindowKind; 5] = [
        WindowKind::Flat,
        WindowKind::Hanning,
        WindowKind::Hamming,
        WindowKind::Bartlett,
        WindowKind::Blackman,
    ];

    pub fn name(self) -> &'static str {
        match self {
            WindowKind::Flat => "flat",
            WindowKind::Hanning => "hanning",
            WindowKind::Hamming => "hamming",
            WindowKind::Bartlett => "bartlett",
            WindowKind::Blackman => "blackman",
        }
    }

    /// Kernel coefficients of the given length, not normalised.
    pub fn coefficients(self, length: usize) -> Vec<f64> {
        if length == 1 {
            return vec![1.0];
        }
        let m = (length - 1) as f64;
        (0..length)
            .map(|k| {
                let k = k as f64;
                match self {
                    WindowKind::Flat => 1.0,
                    WindowKind::Hanning => 0.5 - 0.5 * (2.0 * PI * k / m).cos(),
                    WindowKind::Hamming => 0.54 - 0.46 * (2.0 * PI * k / m).cos(),
                    WindowKind::Bartlett => 1.0 - (2.0 * k / m - 1.0).abs(),
                    WindowKind::Blackman => {
                        0.42 - 0.5 * (2.0 * PI * k / m).cos() + 0.08 * (4.0 * PI * k / m).cos()
                    }
                }
            })
            .collect()
    }
}

impl fmt::Display for WindowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WindowKind {
    type Err = SmoothError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WindowKind::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                SmoothError::InvalidInput(format!(
                    "window type must be one of flat, hanning, hamming, bartlett, blackman, got '{s}'"
                ))
            })
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SmoothError {
    #[error("invalid smoothing input: {0}")]
    InvalidInput(String),
}

// ---------------------------------------------------------------------------
// Window specification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowSpec {
    pub kind: WindowKind,
    pub length: usize,
}

impl Default for WindowSpec {
    fn default() -> Self {
        Self {
            kind: WindowKind::Hanning,
            length: 11,
        }
    }
}

impl WindowSpec {
    pub fn new(kind: WindowKind, length: usize) -> Self {
        Self { kind, length }
    }

    pub fn apply(&self, series: &[f64]) -> Result<Vec<f64>, SmoothError> {
        smooth(series, self.kind, self.length)
    }
}

impl fmt::Display for WindowSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.kind, self.length)
    }
}

// ---------------------------------------------------------------------------
// Smoothing
// ---------------------------------------------------------------------------

/// Smooth `series` by convolving it with a normalised window.
///
/// The series is extended on both ends by `length - 1` samples mirrored
/// around the first and last sample, so the output has no start-up or
/// tail-off transients. Output sample `i` is centred on input sample `i` and
/// the output has the same length as the input.
///
/// Windows shorter than 3 leave the series unchanged. The series must be at
/// least `length` long and `length` must be odd.
pub fn smooth(series: &[f64], kind: WindowKind, length: usize) -> Result<Vec<f64>, SmoothError> {
    let n = series.len();
    if n < length {
        return Err(SmoothError::InvalidInput(format!(
            "series of {n} samples is shorter than the window ({length})"
        )));
    }
    if length < 3 {
        return Ok(series.to_vec());
    }
    if length % 2 == 0 {
        return Err(SmoothError::InvalidInput(format!(
            "window length must be odd, got {length}"
        )));
    }

    let window = kind.coefficients(length);
    let sum: f64 = window.iter().sum();
    let window: Vec<f64> = window.iter().map(|w| w / sum).collect();

    let extended = reflect(series, length - 1);

    // Centred "valid" convolution: the window is symmetric, so this is a
    // running dot product. Output `i` covers extended[i + half .. i + half + length].
    let half = (length - 1) / 2;
    let smoothed = (0..n)
        .map(|i| {
            let start = i + half;
            extended[start..start + length]
                .iter()
                .zip(&window)
                .map(|(x, w)| x * w)
                .sum()
        })
        .collect();

    Ok(smoothed)
}

/// `series` with `pad` samples mirrored (excluding the edge sample) on each end.
fn reflect(series: &[f64], pad: usize) -> Vec<f64> {
    let n = series.len();
    let mut extended = Vec::with_capacity(n + 2 * pad);
    extended.extend(series[1..=pad].iter().rev());
    extended.extend_from_slice(series);
    extended.extend(series[n - 1 - pad..n - 1].iter().rev());
    extended
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn reflection_layout() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(
            reflect(&x, 2),
            vec![3.0, 2.0, 1.0, 2.0, 3.0, 4.0, 5.0, 4.0, 3.0]
        );
    }

    #[test]
    fn flat_five_exact_values() {
        let x = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
        // extended: 4 3 2 1 | 0 1 2 3 4 5 | 4 3 2 1
        let y = smooth(&x, WindowKind::Flat, 5).unwrap();
        let expected = [
            (2.0 + 1.0 + 0.0 + 1.0 + 2.0) / 5.0,
            (1.0 + 0.0 + 1.0 + 2.0 + 3.0) / 5.0,
            2.0,
            3.0,
            (2.0 + 3.0 + 4.0 + 5.0 + 4.0) / 5.0,
            (3.0 + 4.0 + 5.0 + 4.0 + 3.0) / 5.0,
        ];
        assert_eq!(y.len(), x.len());
        for (a, b) in y.iter().zip(expected) {
            assert_abs_diff_eq!(*a, b, epsilon = 1e-12);
        }
    }

    #[test]
    fn kernels_match_reference_values() {
        let hann = WindowKind::Hanning.coefficients(5);
        for (a, b) in hann.iter().zip([0.0, 0.5, 1.0, 0.5, 0.0]) {
            assert_abs_diff_eq!(*a, b, epsilon = 1e-12);
        }
        let hamming = WindowKind::Hamming.coefficients(3);
        for (a, b) in hamming.iter().zip([0.08, 1.0, 0.08]) {
            assert_abs_diff_eq!(*a, b, epsilon = 1e-12);
        }
        let bartlett = WindowKind::Bartlett.coefficients(5);
        for (a, b) in bartlett.iter().zip([0.0, 0.5, 1.0, 0.5, 0.0]) {
            assert_abs_diff_eq!(*a, b, epsilon = 1e-12);
        }
        let blackman = WindowKind::Blackman.coefficients(5);
        for (a, b) in blackman.iter().zip([0.0, 0.34, 1.0, 0.34, 0.0]) {
            assert_abs_diff_eq!(*a, b, epsilon = 1e-12);
        }
    }

    #[test]
    fn constant_series_is_preserved() {
        let x = vec![3.25; 40];
        for kind in WindowKind::ALL {
            let y = smooth(&x, kind, 7).unwrap();
            for v in y {
                assert_abs_diff_eq!(v, 3.25, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn short_windows_are_identity() {
        let x = [1.0, -4.0, 9.5];
        assert_eq!(smooth(&x, WindowKind::Blackman, 2).unwrap(), x.to_vec());
        assert_eq!(smooth(&x, WindowKind::Flat, 1).unwrap(), x.to_vec());
    }

    #[test]
    fn invalid_inputs() {
        assert!(matches!(
            smooth(&[1.0, 2.0], WindowKind::Flat, 3),
            Err(SmoothError::InvalidInput(_))
        ));
        assert!(matches!(
            smooth(&[1.0; 10], WindowKind::Flat, 4),
            Err(SmoothError::InvalidInput(_))
        ));
        assert!("triangle".parse::<WindowKind>().is_err());
    }

    #[test]
    fn kind_parsing() {
        assert_eq!("Hanning".parse::<WindowKind>(), Ok(WindowKind::Hanning));
        assert_eq!(" flat ".parse::<WindowKind>(), Ok(WindowKind::Flat));
        for kind in WindowKind::ALL {
            assert_eq!(kind.name().parse::<WindowKind>(), Ok(kind));
        }
    }

    #[test]
    fn window_as_long_as_series() {
        let x = [1.0, 2.0, 3.0];
        let y = WindowSpec::new(WindowKind::Flat, 3).apply(&x).unwrap();
        assert_eq!(y.len(), 3);
        assert_abs_diff_eq!(y[1], 2.0, epsilon = 1e-12);
    }
}
