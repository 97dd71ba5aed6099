use {
    crate::{
        error::{PipelineError, PipelineResult},
        models::JoinedRecord,
        utils::mean,
    },
    serde::{Deserialize, Serialize},
    statrs::distribution::{ContinuousCDF, StudentsT},
};

/// Pearson r with its two-sided p-value and sample size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Correlation {
    pub coefficient: f64,
    pub p_value: f64,
    pub observations: usize,
}

/// Correlation between daily average sentiment and daily return.
pub fn correlate_joined(records: &[JoinedRecord]) -> PipelineResult<Correlation> {
    let sentiment: Vec<f64> = records.iter().map(|r| r.avg_sentiment).collect();
    let returns: Vec<f64> = records.iter().map(|r| r.return_pct).collect();
    pearson_columns(("avg_sentiment", &sentiment), ("return_pct", &returns))
}

pub fn pearson(x: &[f64], y: &[f64]) -> PipelineResult<Correlation> {
    pearson_columns(("x", x), ("y", y))
}

fn pearson_columns(
    (x_name, x): (&'static str, &[f64]),
    (y_name, y): (&'static str, &[f64]),
) -> PipelineResult<Correlation> {
    if x.len() != y.len() {
        return Err(PipelineError::LengthMismatch {
            left: x.len(),
            right: y.len(),
        });
    }

    let n = x.len();
    if n < 2 {
        return Err(PipelineError::InsufficientData { observations: n });
    }

    for (name, column) in [(x_name, x), (y_name, y)] {
        if is_constant(column) {
            return Err(PipelineError::DegenerateInput {
                column: name,
                observations: n,
            });
        }
    }

    let mean_x = mean(x);
    let mean_y = mean(y);

    let (sxy, sxx, syy) = x.iter().zip(y).fold((0.0, 0.0, 0.0), |(sxy, sxx, syy), (xi, yi)| {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        (sxy + dx * dy, sxx + dx * dx, syy + dy * dy)
    });

    let denom = (sxx * syy).sqrt();
    if denom <= 0.0 || !denom.is_finite() {
        // Spread too small to survive rounding
        let column = if sxx <= syy { x_name } else { y_name };
        return Err(PipelineError::DegenerateInput {
            column,
            observations: n,
        });
    }

    let coefficient = (sxy / denom).clamp(-1.0, 1.0);
    let p_value = two_sided_p_value(coefficient, n)?;

    Ok(Correlation {
        coefficient,
        p_value,
        observations: n,
    })
}

fn is_constant(column: &[f64]) -> bool {
    match column.split_first() {
        Some((first, rest)) => rest.iter().all(|v| v == first),
        None => true,
    }
}

/// t = r * sqrt((n - 2) / (1 - r^2)) against Student's t with n - 2 degrees of freedom.
fn two_sided_p_value(r: f64, n: usize) -> PipelineResult<f64> {
    // With two points r is always +/-1 and carries no evidence
    if n <= 2 {
        return Ok(1.0);
    }

    let one_minus_r2 = 1.0 - r * r;
    if one_minus_r2 <= 0.0 {
        return Ok(0.0);
    }

    let df = (n - 2) as f64;
    let t = r * (df / one_minus_r2).sqrt();
    let dist =
        StudentsT::new(0.0, 1.0, df).map_err(|e| PipelineError::Statistics(e.to_string()))?;

    Ok((2.0 * dist.sf(t.abs())).clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfect_positive_relation() {
        let c = pearson(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]).unwrap();
        assert!((c.coefficient - 1.0).abs() < 1e-12);
        assert!(c.p_value < 1e-6);
        assert_eq!(c.observations, 3);
    }

    #[test]
    fn perfect_negative_relation() {
        let c = pearson(&[1.0, 2.0, 3.0, 4.0], &[8.0, 6.0, 4.0, 2.0]).unwrap();
        assert!((c.coefficient + 1.0).abs() < 1e-12);
        assert!(c.p_value < 1e-6);
    }

    #[test]
    fn matches_reference_values() {
        // r = 0.8 exactly, t(3) closed-form tail gives p = 0.104088038661827
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [2.0, 1.0, 4.0, 3.0, 5.0];
        let c = pearson(&x, &y).unwrap();
        assert!((c.coefficient - 0.8).abs() < 1e-12);
        assert!((c.p_value - 0.104_088_038_661_827_88).abs() < 1e-6);
    }

    #[test]
    fn two_points_give_p_of_one() {
        let c = pearson(&[1.0, 2.0], &[5.0, 3.0]).unwrap();
        assert!((c.coefficient + 1.0).abs() < 1e-12);
        assert_eq!(c.p_value, 1.0);
    }

    #[test]
    fn bounds_hold() {
        let x = [0.1, -0.4, 0.3, 0.0, 0.25, -0.1];
        let y = [1.2, -0.7, 0.4, 0.1, -0.2, 0.3];
        let c = pearson(&x, &y).unwrap();
        assert!((-1.0..=1.0).contains(&c.coefficient));
        assert!((0.0..=1.0).contains(&c.p_value));
    }

    #[test]
    fn too_few_observations() {
        assert!(matches!(
            pearson(&[1.0], &[2.0]),
            Err(PipelineError::InsufficientData { observations: 1 })
        ));
        assert!(matches!(
            pearson(&[], &[]),
            Err(PipelineError::InsufficientData { observations: 0 })
        ));
    }

    #[test]
    fn constant_sentiment_is_degenerate() {
        let records: Vec<JoinedRecord> = (1..=4)
            .map(|d| JoinedRecord {
                trading_day: chrono::NaiveDate::from_ymd_opt(2024, 1, d).unwrap(),
                avg_sentiment: 0.1,
                news_count: 1,
                return_pct: d as f64,
                close: 100.0,
            })
            .collect();
        match correlate_joined(&records) {
            Err(PipelineError::DegenerateInput { column, observations }) => {
                assert_eq!(column, "avg_sentiment");
                assert_eq!(observations, 4);
            }
            other => panic!("expected degenerate input, got {:?}", other),
        }
    }

    #[test]
    fn mismatched_lengths() {
        assert!(matches!(
            pearson(&[1.0, 2.0, 3.0], &[1.0, 2.0]),
            Err(PipelineError::LengthMismatch { left: 3, right: 2 })
        ));
    }
}
