use approx::assert_abs_diff_eq;
use mda::data::loader::{CsvDataReader, ReaderConfig};
use mda::data::series::{default_axes, points, smoothed_points};
use mda::data::smooth::{smooth, SmoothError, WindowKind, WindowSpec};

/// Sum of squared second differences, a measure of local roughness.
fn roughness(x: &[f64]) -> f64 {
    x.windows(3)
        .map(|w| (w[2] - 2.0 * w[1] + w[0]).powi(2))
        .sum()
}

fn noisy_ramp(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| i as f64 + if i % 2 == 0 { 0.8 } else { -0.8 })
        .collect()
}

#[test]
fn test_flat_window_on_ramp() {
    let data = noisy_ramp(40);
    let smoothed = smooth(&data, WindowKind::Flat, 5).unwrap();

    assert_eq!(smoothed.len(), data.len());
    assert!(roughness(&smoothed) < roughness(&data));

    // Away from the edges a moving average of an alternating ±0.8 ramp
    // leaves the ramp plus a residual of ±0.16.
    for (i, &value) in smoothed.iter().enumerate().take(38).skip(2) {
        let residual = if i % 2 == 0 { 0.16 } else { -0.16 };
        assert_abs_diff_eq!(value, i as f64 + residual, epsilon = 1e-9);
    }
}

#[test]
fn test_every_kernel_reduces_roughness() {
    let data = noisy_ramp(60);
    for kind in WindowKind::ALL {
        let smoothed = smooth(&data, kind, 9).unwrap();
        assert_eq!(smoothed.len(), data.len());
        assert!(
            roughness(&smoothed) < roughness(&data),
            "{kind} did not smooth"
        );
    }
}

#[test]
fn test_linear_trend_preserved_in_interior() {
    let data: Vec<f64> = (0..30).map(|i| 3.0 * i as f64 - 7.0).collect();
    for kind in WindowKind::ALL {
        let smoothed = smooth(&data, kind, 7).unwrap();
        for i in 3..27 {
            assert_abs_diff_eq!(smoothed[i], data[i], epsilon = 1e-9);
        }
    }
}

#[test]
fn test_short_window_returns_input() {
    let data = noisy_ramp(10);
    for length in 0..3 {
        assert_eq!(smooth(&data, WindowKind::Hamming, length).unwrap(), data);
    }
}

#[test]
fn test_window_longer_than_series() {
    let data = noisy_ramp(6);
    assert!(matches!(
        smooth(&data, WindowKind::Hanning, 11),
        Err(SmoothError::InvalidInput(_))
    ));
}

#[test]
fn test_default_window_spec() {
    let spec = WindowSpec::default();
    assert_eq!(spec.kind, WindowKind::Hanning);
    assert_eq!(spec.length, 11);
    assert_eq!(spec.to_string(), "hanning (11)");
}

#[test]
fn test_smoothing_a_read_column() {
    let content: String = std::iter::once("time,signal\n".to_string())
        .chain((0..25).map(|i| {
            if i == 7 {
                format!("{i},bad\n")
            } else {
                format!("{i},{}\n", i as f64 * 0.5)
            }
        }))
        .collect();
    let report = CsvDataReader::new(ReaderConfig::default()).read_bytes("inline", content.as_bytes());
    let ds = report.dataset().unwrap();

    let raw = points(ds, default_axes(ds));
    assert_eq!(raw.len(), 24);

    let smoothed = smoothed_points(&raw, WindowSpec::new(WindowKind::Flat, 3)).unwrap();
    assert_eq!(smoothed.len(), raw.len());
    for (r, s) in raw.iter().zip(&smoothed) {
        assert_eq!(r[0], s[0]);
    }
}
