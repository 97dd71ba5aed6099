use {
    crate::utils::mean_and_stddev,
    argminmax::ArgMinMax,
    serde::{Deserialize, Serialize},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Equal-width histogram plus the moments an external plotter needs for a density overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Histogram {
    pub bins: Vec<HistogramBin>,
    pub mean: f64,
    pub stddev: f64,
    pub samples: usize,
}

/// Buckets the finite values of `data` into `bin_count` equal-width bins spanning
/// [min, max]. The maximum lands in the last bin.
pub fn histogram(data: &[f64], bin_count: usize) -> Histogram {
    let values: Vec<f64> = data.iter().copied().filter(|v| v.is_finite()).collect();
    if values.is_empty() || bin_count == 0 {
        return Histogram::default();
    }

    let (min_idx, max_idx) = values.argminmax();
    let (min, max) = (values[min_idx], values[max_idx]);
    let (mean, stddev) = mean_and_stddev(&values);

    // A single spike
    if max - min <= f64::EPSILON {
        return Histogram {
            bins: vec![HistogramBin {
                lower: min,
                upper: max,
                count: values.len(),
            }],
            mean,
            stddev,
            samples: values.len(),
        };
    }

    let width = (max - min) / bin_count as f64;
    let mut counts = vec![0usize; bin_count];
    for v in &values {
        let idx = (((v - min) / width).floor() as usize).min(bin_count - 1);
        counts[idx] += 1;
    }

    let bins = counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            lower: min + width * i as f64,
            upper: if i + 1 == bin_count {
                max
            } else {
                min + width * (i + 1) as f64
            },
            count,
        })
        .collect();

    Histogram {
        bins,
        mean,
        stddev,
        samples: values.len(),
    }
}
