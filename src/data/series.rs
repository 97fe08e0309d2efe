use super::model::Dataset;
use super::smooth::{SmoothError, WindowSpec};

// ---------------------------------------------------------------------------
// Axis selection
// ---------------------------------------------------------------------------

/// Source of one plot axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// 1-based row number.
    RowNumber,
    /// 0-based dataset column.
    Column(usize),
}

/// x / y columns of a dataset to plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Axes {
    pub x: Axis,
    pub y: usize,
}

/// Column 0 against column 1, or row number against column 0 for a
/// single-column dataset.
pub fn default_axes(dataset: &Dataset) -> Axes {
    if dataset.column_count() >= 2 {
        Axes {
            x: Axis::Column(0),
            y: 1,
        }
    } else {
        Axes {
            x: Axis::RowNumber,
            y: 0,
        }
    }
}

// ---------------------------------------------------------------------------
// Point extraction
// ---------------------------------------------------------------------------

/// Indices of rows where every cell needed for `axes` is present.
///
/// A row passes when:
/// * the y cell parsed, and
/// * the x axis is the row number, or the x cell parsed as well.
pub fn valid_rows(dataset: &Dataset, axes: Axes) -> Vec<usize> {
    (0..dataset.row_count())
        .filter(|&r| {
            let y_ok = matches!(dataset.get(r, axes.y), Some(Some(_)));
            let x_ok = match axes.x {
                Axis::RowNumber => true,
                Axis::Column(c) => matches!(dataset.get(r, c), Some(Some(_))),
            };
            x_ok && y_ok
        })
        .collect()
}

/// `[x, y]` points for the rows returned by [`valid_rows`].
pub fn points(dataset: &Dataset, axes: Axes) -> Vec<[f64; 2]> {
    valid_rows(dataset, axes)
        .into_iter()
        .filter_map(|r| {
            let y = dataset.get(r, axes.y)??;
            let x = match axes.x {
                Axis::RowNumber => (r + 1) as f64,
                Axis::Column(c) => dataset.get(r, c)??,
            };
            Some([x, y])
        })
        .collect()
}

/// Smooth the y values of `points`, keeping their x values.
pub fn smoothed_points(points: &[[f64; 2]], window: WindowSpec) -> Result<Vec<[f64; 2]>, SmoothError> {
    let y: Vec<f64> = points.iter().map(|p| p[1]).collect();
    let smoothed = window.apply(&y)?;
    Ok(points
        .iter()
        .zip(smoothed)
        .map(|(p, y)| [p[0], y])
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::smooth::WindowKind;

    fn dataset() -> Dataset {
        let mut ds = Dataset::zeroed(4, 2);
        for r in 0..4 {
            ds.set(r, 0, Some(r as f64 * 0.5));
            ds.set(r, 1, Some(10.0 + r as f64));
        }
        ds.set(1, 1, None);
        ds.set(2, 0, None);
        ds
    }

    #[test]
    fn rows_with_missing_cells_are_skipped() {
        let ds = dataset();
        let axes = default_axes(&ds);
        assert_eq!(axes, Axes { x: Axis::Column(0), y: 1 });
        assert_eq!(valid_rows(&ds, axes), vec![0, 3]);
        assert_eq!(points(&ds, axes), vec![[0.0, 10.0], [1.5, 13.0]]);
    }

    #[test]
    fn row_number_axis_is_one_based() {
        let ds = dataset();
        let axes = Axes { x: Axis::RowNumber, y: 0 };
        assert_eq!(points(&ds, axes), vec![[1.0, 0.0], [2.0, 0.5], [4.0, 1.5]]);
    }

    #[test]
    fn single_column_defaults_to_row_number() {
        let ds = Dataset::zeroed(3, 1);
        assert_eq!(default_axes(&ds), Axes { x: Axis::RowNumber, y: 0 });
    }

    #[test]
    fn smoothing_keeps_x() {
        let pts: Vec<[f64; 2]> = (0..6).map(|i| [i as f64 * 2.0, i as f64]).collect();
        let out = smoothed_points(&pts, WindowSpec::new(WindowKind::Flat, 3)).unwrap();
        assert_eq!(out.len(), 6);
        assert_eq!(out[4][0], 8.0);
        assert!(smoothed_points(&pts[..2], WindowSpec::new(WindowKind::Flat, 3)).is_err());
    }
}
