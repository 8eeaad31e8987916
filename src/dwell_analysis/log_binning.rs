// Logarithmic rebinning of dwell-time samples. Dwell distributions span
// several decades, so fixed-width linear bins either starve the tail or
// smear the head; bins of equal width in log10 space keep the occupancy
// usable across the whole range.

// Density histogram over log-spaced bins. One (center, density) pair per
// bin; centers are the geometric mean of the bin's edges, and densities
// integrate to 1 over the binned range in linear units. Edges are retained
// so consumers can recover linear bin widths.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    edges: Vec<f64>,
    centers: Vec<f64>,
    densities: Vec<f64>,
}

impl Histogram {
    pub fn get_edges(&self) -> &[f64] {
        &self.edges
    }

    pub fn get_centers(&self) -> &[f64] {
        &self.centers
    }

    pub fn get_densities(&self) -> &[f64] {
        &self.densities
    }

    pub fn get_len(&self) -> usize {
        self.centers.len()
    }
}

// Rebin a positive-valued sample into bins spaced by `bin_width` decades.
//
// Edges run as 10^x for x from log10(min) up through log10(max) + bin_width,
// so the largest value lands strictly inside the last bin instead of on its
// boundary. Bins are half-open on the right except the last, which is
// closed. With `coalesce_empty` set, each maximal run of empty bins is
// re-assigned the run's summed density divided by (run length + 1) -- for a
// run of empty bins that sum is zero, so the pass is a numeric no-op kept
// for parity with downstream consumers that index into its output.
pub fn log_bin(
    data: &[f64],
    bin_width: f64,
    coalesce_empty: bool,
) -> Result<Histogram, LogBinError> {
    if data.is_empty() {
        return Err(LogBinError::EmptySample);
    }
    if !(bin_width > 0.0) {
        return Err(LogBinError::NonPositiveBinWidth { bin_width });
    }
    for (index, &value) in data.iter().enumerate() {
        if !(value > 0.0) {
            return Err(LogBinError::NonPositiveValue { index, value });
        }
    }

    let min = data.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = data.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

    let edges = log_spaced_edges(min, max, bin_width);
    if edges.len() < 2 {
        return Err(LogBinError::DegenerateBinEdges);
    }

    let mut densities = density_histogram(data, &edges);

    if coalesce_empty {
        coalesce_zero_runs(&mut densities);
    }

    let centers: Vec<f64> = edges
        .windows(2)
        .map(|pair| (pair[0] * pair[1]).sqrt())
        .collect();

    Ok(Histogram {
        edges,
        centers,
        densities,
    })
}

// 10^x for x = log10(min) + i * bin_width while x < log10(max) + bin_width.
fn log_spaced_edges(min: f64, max: f64, bin_width: f64) -> Vec<f64> {
    let start = min.log10();
    let stop = max.log10() + bin_width;

    let mut edges = Vec::new();
    let mut i = 0usize;
    loop {
        let exponent = start + i as f64 * bin_width;
        if exponent >= stop {
            break;
        }
        edges.push(10f64.powf(exponent));
        i += 1;
    }
    edges
}

// Counts normalized to a density: count / (total * linear bin width). The
// last bin is closed on the right so the maximum datum is always counted.
fn density_histogram(data: &[f64], edges: &[f64]) -> Vec<f64> {
    let bin_count = edges.len() - 1;
    let mut counts = vec![0usize; bin_count];

    for &value in data {
        for bin in 0..bin_count {
            let in_bin = if bin == bin_count - 1 {
                value >= edges[bin] && value <= edges[bin + 1]
            } else {
                value >= edges[bin] && value < edges[bin + 1]
            };
            if in_bin {
                counts[bin] += 1;
                break;
            }
        }
    }

    let total = data.len() as f64;
    counts
        .iter()
        .enumerate()
        .map(|(bin, &count)| count as f64 / (total * (edges[bin + 1] - edges[bin])))
        .collect()
}

fn coalesce_zero_runs(densities: &mut [f64]) {
    let mut i = 0;
    while i < densities.len() {
        if densities[i] != 0.0 {
            i += 1;
            continue;
        }

        // extend to the end of the zero run
        let mut j = i + 1;
        while j < densities.len() && densities[j] == 0.0 {
            j += 1;
        }

        let run_sum: f64 = densities[i..j].iter().sum();
        let averaged = run_sum / (j - i + 1) as f64;
        for value in densities[i..j].iter_mut() {
            *value = averaged;
        }

        i = j;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LogBinError {
    EmptySample,
    NonPositiveValue { index: usize, value: f64 },
    NonPositiveBinWidth { bin_width: f64 },
    DegenerateBinEdges,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_bin_example() {
        let data = vec![1.0, 1.0, 1.0, 10.0, 10.0, 100.0];
        let histogram = log_bin(&data, 0.5, true).unwrap();

        // Edges at 10^{0, 0.5, 1, 1.5, 2}: four bins
        assert_eq!(histogram.get_edges().len(), 5);
        assert_eq!(histogram.get_len(), 4);
        assert_eq!(histogram.get_densities().len(), histogram.get_centers().len());

        // Three samples in the first bin, none in the second, two in the
        // third, one in the last (closed on the right)
        let edges = histogram.get_edges();
        let densities = histogram.get_densities();
        assert!((densities[0] - 3.0 / (6.0 * (edges[1] - edges[0]))).abs() < 1e-12);
        assert_eq!(densities[1], 0.0);
        assert!((densities[2] - 2.0 / (6.0 * (edges[3] - edges[2]))).abs() < 1e-12);
        assert!((densities[3] - 1.0 / (6.0 * (edges[4] - edges[3]))).abs() < 1e-12);

        // Density-normalized: integrates to 1 over the binned range
        let integral: f64 = densities
            .iter()
            .enumerate()
            .map(|(bin, d)| d * (edges[bin + 1] - edges[bin]))
            .sum();
        assert!((integral - 1.0).abs() < 1e-12, "integral was {}", integral);
    }

    #[test]
    fn test_centers_are_geometric_means() {
        let data = vec![1.0, 5.0, 40.0, 900.0];
        let histogram = log_bin(&data, 0.2, true).unwrap();

        for (i, center) in histogram.get_centers().iter().enumerate() {
            let expected = (histogram.get_edges()[i] * histogram.get_edges()[i + 1]).sqrt();
            assert!((center - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn test_coalescing_is_a_numeric_noop() {
        let data = vec![0.3, 0.3, 7.0, 7.0, 7.0, 250.0];

        let coalesced = log_bin(&data, 0.25, true).unwrap();
        let raw = log_bin(&data, 0.25, false).unwrap();

        assert_eq!(coalesced, raw);
        // the wide gaps really did produce empty bins
        assert!(raw.get_densities().iter().any(|d| *d == 0.0));
    }

    #[test]
    fn test_empty_sample_is_rejected() {
        let result = log_bin(&[], 0.2, true);
        assert_eq!(result.err(), Some(LogBinError::EmptySample));
    }

    #[test]
    fn test_non_positive_values_are_rejected() {
        let result = log_bin(&[-1.0, 2.0, 3.0], 0.2, true);
        assert_eq!(
            result.err(),
            Some(LogBinError::NonPositiveValue { index: 0, value: -1.0 })
        );

        let result = log_bin(&[2.0, 0.0, 3.0], 0.2, true);
        assert_eq!(
            result.err(),
            Some(LogBinError::NonPositiveValue { index: 1, value: 0.0 })
        );
    }

    #[test]
    fn test_bad_bin_width_is_rejected() {
        let result = log_bin(&[1.0, 2.0], 0.0, true);
        assert_eq!(
            result.err(),
            Some(LogBinError::NonPositiveBinWidth { bin_width: 0.0 })
        );
    }

    #[test]
    fn test_single_valued_sample_is_degenerate() {
        let result = log_bin(&[3.0, 3.0, 3.0], 0.2, true);
        assert_eq!(result.err(), Some(LogBinError::DegenerateBinEdges));
    }

    #[test]
    fn test_every_sample_is_counted() {
        let data = vec![0.01, 0.5, 0.5, 2.0, 30.0, 30.0, 30.0, 999.0];
        let histogram = log_bin(&data, 0.2, false).unwrap();

        let edges = histogram.get_edges();
        let recovered: f64 = histogram
            .get_densities()
            .iter()
            .enumerate()
            .map(|(bin, d)| d * (edges[bin + 1] - edges[bin]) * data.len() as f64)
            .sum();
        assert!((recovered - data.len() as f64).abs() < 1e-9);
    }
}
