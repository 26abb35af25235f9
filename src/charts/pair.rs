//! Pair-Grid Builder Module
//! Turns a loaded table and its numeric columns into an N x N grid of
//! histogram and scatter cells, optionally grouped by a categorical column.

use polars::prelude::*;
use rayon::prelude::*;
use thiserror::Error;

/// Bin-count cap so small cells stay readable.
const MAX_HIST_BINS: usize = 30;

#[derive(Error, Debug)]
pub enum PairGridError {
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
    #[error("Dataset has no numeric columns to plot")]
    NoNumericColumns,
    #[error("Color column '{0}' not found")]
    MissingColorColumn(String),
}

/// One histogram bin: bar center, bar width, and one count per series.
#[derive(Debug, Clone)]
pub struct HistBin {
    pub center: f64,
    pub width: f64,
    pub counts: Vec<usize>,
}

#[derive(Debug, Clone)]
pub enum PairCell {
    /// Diagonal cell: univariate distribution of one column.
    Histogram { column: String, bins: Vec<HistBin> },
    /// Off-diagonal cell: scatter of `x_column` against `y_column`, one
    /// point series per group.
    Scatter {
        x_column: String,
        y_column: String,
        series: Vec<Vec<[f64; 2]>>,
    },
}

/// The complete grid for one table and selection. Cells are row-major,
/// `columns.len() * columns.len()` of them; the cell at (i, i) is the
/// histogram of column i and the cell at (i, j) scatters column j (x)
/// against column i (y).
#[derive(Debug, Clone)]
pub struct PairGrid {
    pub columns: Vec<String>,
    pub color_by: Option<String>,
    /// Distinct values of the color column, sorted. Empty when no coloring
    /// is active; every cell then holds exactly one series.
    pub groups: Vec<String>,
    pub cells: Vec<PairCell>,
}

impl PairGrid {
    pub fn size(&self) -> usize {
        self.columns.len()
    }

    pub fn cell(&self, row: usize, col: usize) -> &PairCell {
        &self.cells[row * self.size() + col]
    }

    pub fn series_count(&self) -> usize {
        self.groups.len().max(1)
    }
}

/// Build the grid for exactly the given numeric columns; the set is taken
/// as-is, not re-derived. Rows whose color value is null are dropped from
/// every cell. A single numeric column yields a 1x1 grid holding one
/// histogram; an empty set is an error the caller turns into a message.
pub fn build_pair_grid(
    df: &DataFrame,
    numeric_cols: &[String],
    color_by: Option<&str>,
) -> Result<PairGrid, PairGridError> {
    if numeric_cols.is_empty() {
        return Err(PairGridError::NoNumericColumns);
    }

    let (groups, row_groups) = match color_by {
        Some(column) => group_rows(df, column)?,
        None => (Vec::new(), Vec::new()),
    };
    let series_count = groups.len().max(1);

    let values: Vec<Vec<f64>> = numeric_cols
        .iter()
        .map(|name| column_as_f64(df, name))
        .collect::<Result<_, _>>()?;

    let n = numeric_cols.len();
    let cells: Vec<PairCell> = (0..n * n)
        .into_par_iter()
        .map(|idx| {
            let (row, col) = (idx / n, idx % n);
            if row == col {
                histogram_cell(&numeric_cols[row], &values[row], &row_groups, series_count)
            } else {
                scatter_cell(
                    &numeric_cols[col],
                    &numeric_cols[row],
                    &values[col],
                    &values[row],
                    &row_groups,
                    series_count,
                )
            }
        })
        .collect();

    Ok(PairGrid {
        columns: numeric_cols.to_vec(),
        color_by: color_by.map(str::to_string),
        groups,
        cells,
    })
}

/// Distinct sorted labels of the color column plus a per-row group index.
/// Null color values map to `None` and are excluded from every cell.
fn group_rows(
    df: &DataFrame,
    color_col: &str,
) -> Result<(Vec<String>, Vec<Option<usize>>), PairGridError> {
    let column = df
        .column(color_col)
        .map_err(|_| PairGridError::MissingColorColumn(color_col.to_string()))?;
    let series = column.as_materialized_series();

    let mut row_labels: Vec<Option<String>> = Vec::with_capacity(series.len());
    for i in 0..series.len() {
        let value = series.get(i)?;
        row_labels.push(if value.is_null() {
            None
        } else {
            Some(value.to_string().trim_matches('"').to_string())
        });
    }

    let mut groups: Vec<String> = row_labels.iter().flatten().cloned().collect();
    groups.sort();
    groups.dedup();

    let row_groups = row_labels
        .into_iter()
        .map(|label| label.and_then(|l| groups.binary_search(&l).ok()))
        .collect();

    Ok((groups, row_groups))
}

/// Extract a column as f64 values, NaN for nulls.
fn column_as_f64(df: &DataFrame, name: &str) -> Result<Vec<f64>, PairGridError> {
    let cast = df.column(name)?.cast(&DataType::Float64)?;
    let ca = cast.f64()?;
    Ok((0..ca.len()).map(|i| ca.get(i).unwrap_or(f64::NAN)).collect())
}

/// Group index for a row: series 0 when no grouping is active, `None` when
/// the row's color value was null.
fn series_for_row(row_groups: &[Option<usize>], row: usize) -> Option<usize> {
    if row_groups.is_empty() {
        Some(0)
    } else {
        row_groups.get(row).copied().flatten()
    }
}

/// Sturges' rule, clamped.
fn bin_count(n: usize) -> usize {
    if n == 0 {
        return 1;
    }
    (((n as f64).log2().ceil() as usize) + 1).clamp(1, MAX_HIST_BINS)
}

fn histogram_cell(
    column: &str,
    values: &[f64],
    row_groups: &[Option<usize>],
    series_count: usize,
) -> PairCell {
    let finite: Vec<(usize, f64)> = values
        .iter()
        .enumerate()
        .filter(|(_, v)| v.is_finite())
        .filter_map(|(i, &v)| series_for_row(row_groups, i).map(|g| (g, v)))
        .collect();

    if finite.is_empty() {
        return PairCell::Histogram {
            column: column.to_string(),
            bins: Vec::new(),
        };
    }

    let min = finite.iter().map(|&(_, v)| v).fold(f64::INFINITY, f64::min);
    let max = finite
        .iter()
        .map(|&(_, v)| v)
        .fold(f64::NEG_INFINITY, f64::max);

    // Constant columns get a single full-count bar of unit width centered
    // on the value.
    let (bins_n, width, start) = if max > min {
        let n = bin_count(finite.len());
        (n, (max - min) / n as f64, min)
    } else {
        (1, 1.0, min - 0.5)
    };

    let mut bins: Vec<HistBin> = (0..bins_n)
        .map(|b| HistBin {
            center: start + width * (b as f64 + 0.5),
            width,
            counts: vec![0; series_count],
        })
        .collect();

    for (group, v) in finite {
        let b = if max > min {
            (((v - min) / width) as usize).min(bins_n - 1)
        } else {
            0
        };
        bins[b].counts[group] += 1;
    }

    PairCell::Histogram {
        column: column.to_string(),
        bins,
    }
}

fn scatter_cell(
    x_column: &str,
    y_column: &str,
    xs: &[f64],
    ys: &[f64],
    row_groups: &[Option<usize>],
    series_count: usize,
) -> PairCell {
    let mut series: Vec<Vec<[f64; 2]>> = vec![Vec::new(); series_count];
    for i in 0..xs.len().min(ys.len()) {
        let (x, y) = (xs[i], ys[i]);
        if !x.is_finite() || !y.is_finite() {
            continue;
        }
        if let Some(group) = series_for_row(row_groups, i) {
            series[group].push([x, y]);
        }
    }

    PairCell::Scatter {
        x_column: x_column.to_string(),
        y_column: y_column.to_string(),
        series,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_df() -> DataFrame {
        DataFrame::new(vec![
            Column::new("x".into(), vec![1.0, 2.0, 3.0, 4.0]),
            Column::new("y".into(), vec![10.0, 20.0, 30.0, 40.0]),
            Column::new("group".into(), vec!["a", "b", "a", "b"]),
        ])
        .unwrap()
    }

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn uncolored_grid_has_expected_shape() {
        let df = sample_df();
        let grid = build_pair_grid(&df, &cols(&["x", "y"]), None).unwrap();

        assert_eq!(grid.size(), 2);
        assert_eq!(grid.cells.len(), 4);
        assert!(grid.groups.is_empty());
        assert_eq!(grid.series_count(), 1);

        assert!(matches!(grid.cell(0, 0), PairCell::Histogram { .. }));
        assert!(matches!(grid.cell(1, 1), PairCell::Histogram { .. }));
        match grid.cell(0, 1) {
            PairCell::Scatter {
                x_column,
                y_column,
                series,
            } => {
                assert_eq!(x_column, "y");
                assert_eq!(y_column, "x");
                assert_eq!(series.len(), 1);
                assert_eq!(series[0].len(), 4);
            }
            other => panic!("expected scatter cell, got {other:?}"),
        }
        assert!(matches!(grid.cell(1, 0), PairCell::Scatter { .. }));
    }

    #[test]
    fn colored_grid_keeps_shape_and_splits_series() {
        let df = sample_df();
        let grid = build_pair_grid(&df, &cols(&["x", "y"]), Some("group")).unwrap();

        assert_eq!(grid.size(), 2);
        assert_eq!(grid.groups, vec!["a".to_string(), "b".to_string()]);

        match grid.cell(0, 1) {
            PairCell::Scatter { series, .. } => {
                assert_eq!(series.len(), 2);
                assert_eq!(series[0].len(), 2);
                assert_eq!(series[1].len(), 2);
            }
            other => panic!("expected scatter cell, got {other:?}"),
        }

        match grid.cell(0, 0) {
            PairCell::Histogram { bins, .. } => {
                let total: usize = bins.iter().map(|b| b.counts.iter().sum::<usize>()).sum();
                assert_eq!(total, 4);
                assert!(bins.iter().all(|b| b.counts.len() == 2));
            }
            other => panic!("expected histogram cell, got {other:?}"),
        }
    }

    #[test]
    fn null_color_rows_are_dropped() {
        let df = DataFrame::new(vec![
            Column::new("x".into(), vec![1.0, 2.0, 3.0]),
            Column::new("y".into(), vec![4.0, 5.0, 6.0]),
            Column::new("group".into(), vec![Some("a"), None, Some("b")]),
        ])
        .unwrap();

        let grid = build_pair_grid(&df, &cols(&["x", "y"]), Some("group")).unwrap();
        assert_eq!(grid.groups, vec!["a".to_string(), "b".to_string()]);

        match grid.cell(1, 0) {
            PairCell::Scatter { series, .. } => {
                let total: usize = series.iter().map(Vec::len).sum();
                assert_eq!(total, 2);
            }
            other => panic!("expected scatter cell, got {other:?}"),
        }
    }

    #[test]
    fn single_numeric_column_degenerates_to_one_histogram() {
        let df = sample_df();
        let grid = build_pair_grid(&df, &cols(&["x"]), None).unwrap();

        assert_eq!(grid.size(), 1);
        assert_eq!(grid.cells.len(), 1);
        assert!(matches!(grid.cell(0, 0), PairCell::Histogram { .. }));
    }

    #[test]
    fn no_numeric_columns_is_an_error() {
        let df = sample_df();
        assert!(matches!(
            build_pair_grid(&df, &[], None),
            Err(PairGridError::NoNumericColumns)
        ));
    }

    #[test]
    fn missing_color_column_is_an_error() {
        let df = sample_df();
        assert!(matches!(
            build_pair_grid(&df, &cols(&["x"]), Some("nope")),
            Err(PairGridError::MissingColorColumn(_))
        ));
    }

    #[test]
    fn histogram_bins_cover_all_finite_values() {
        let values: Vec<f64> = (0..100).map(|i| i as f64).collect();
        let df = DataFrame::new(vec![Column::new("v".into(), values)]).unwrap();

        let grid = build_pair_grid(&df, &cols(&["v"]), None).unwrap();
        match grid.cell(0, 0) {
            PairCell::Histogram { bins, .. } => {
                let total: usize = bins.iter().map(|b| b.counts.iter().sum::<usize>()).sum();
                assert_eq!(total, 100);
                assert_eq!(bins.len(), bin_count(100));
            }
            other => panic!("expected histogram cell, got {other:?}"),
        }
    }

    #[test]
    fn constant_column_gets_single_bin() {
        let df = DataFrame::new(vec![Column::new("v".into(), vec![5.0, 5.0, 5.0])]).unwrap();

        let grid = build_pair_grid(&df, &cols(&["v"]), None).unwrap();
        match grid.cell(0, 0) {
            PairCell::Histogram { bins, .. } => {
                assert_eq!(bins.len(), 1);
                assert_eq!(bins[0].counts[0], 3);
                assert_eq!(bins[0].center, 5.0);
            }
            other => panic!("expected histogram cell, got {other:?}"),
        }
    }

    #[test]
    fn sturges_bin_counts() {
        assert_eq!(bin_count(0), 1);
        assert_eq!(bin_count(1), 1);
        assert_eq!(bin_count(100), 8);
        assert!(bin_count(1_000_000) <= MAX_HIST_BINS);
    }
}
