//! Shapiro-Wilk normality test (Royston AS R94).
//!
//! The W statistic measures how well the ordered sample matches the
//! expected normal order statistics. Supported range is n = 3..=5000;
//! Royston's approximation degrades above that.
//!
//! References: Shapiro & Wilk (1965); Royston (1992, 1995).

use dc_core::{Error, Result, TestOutcome};
use statrs::distribution::{ContinuousCDF, Normal};

use crate::moments::require_finite;

// Royston polynomial coefficients (AS R94).
const C1: [f64; 6] = [0.0, 0.221157, -0.147981, -2.07119, 4.434685, -2.706056];
const C2: [f64; 6] = [0.0, 0.042981, -0.293762, -1.752461, 5.682633, -3.582633];
const C3: [f64; 4] = [0.544, -0.39978, 0.025054, -6.714e-4];
const C4: [f64; 4] = [1.3822, -0.77857, 0.062767, -0.0020322];
const C5: [f64; 4] = [-1.5861, -0.31082, -0.083751, 0.0038915];
const C6: [f64; 3] = [-0.4803, -0.082676, 0.0030302];
const G: [f64; 2] = [-2.273, 0.459];

// c[0] + c[1]*x + c[2]*x^2 + ... via Horner.
fn poly(c: &[f64], x: f64) -> f64 {
    let mut acc = c[c.len() - 1];
    for &coeff in c[..c.len() - 1].iter().rev() {
        acc = acc * x + coeff;
    }
    acc
}

fn std_normal() -> Normal {
    Normal::new(0.0, 1.0).expect("standard normal should be constructible")
}

/// Run the Shapiro-Wilk test, returning (W, p).
pub fn shapiro_wilk(data: &[f64]) -> Result<TestOutcome> {
    let n = data.len();
    if !(3..=5000).contains(&n) {
        return Err(Error::Computation(format!(
            "Shapiro-Wilk supports n in 3..=5000, got {}",
            n
        )));
    }
    require_finite(data, "shapiro")?;

    let mut x: Vec<f64> = data.to_vec();
    x.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    if x[n - 1] - x[0] < 1e-300 {
        return Err(Error::Computation(
            "Shapiro-Wilk undefined for a constant sample".to_string(),
        ));
    }

    if n == 3 {
        return shapiro_wilk_n3(&x);
    }

    let nn2 = n / 2;
    let a = coefficients(n, nn2)?;
    let w = statistic(&x, &a, n, nn2);

    if !(0.0..=1.0 + 1e-10).contains(&w) {
        return Err(Error::Computation(format!("Shapiro-Wilk W out of range: {}", w)));
    }
    let w = w.min(1.0);

    Ok(TestOutcome { statistic: w, p_value: p_value(w, n).clamp(0.0, 1.0) })
}

// n = 3 has an exact distribution: p = 1 - (6/pi) * arccos(sqrt(W)).
fn shapiro_wilk_n3(x: &[f64]) -> Result<TestOutcome> {
    let a1 = std::f64::consts::FRAC_1_SQRT_2;
    let mean = (x[0] + x[1] + x[2]) / 3.0;
    let ss: f64 = x.iter().map(|&v| (v - mean).powi(2)).sum();
    if ss < 1e-300 {
        return Err(Error::Computation(
            "Shapiro-Wilk undefined for a constant sample".to_string(),
        ));
    }
    let num = a1 * (x[2] - x[0]);
    let w = ((num * num) / ss).clamp(0.75, 1.0);
    let p = (1.0 - (6.0 / std::f64::consts::PI) * w.sqrt().acos()).clamp(0.0, 1.0);
    Ok(TestOutcome { statistic: w, p_value: p })
}

// Weights from Blom's normal order-statistic scores, with Royston's
// polynomial correction on the first one or two entries.
fn coefficients(n: usize, nn2: usize) -> Result<Vec<f64>> {
    let norm = std_normal();
    let mut m = vec![0.0; nn2];
    let mut summ2 = 0.0;
    for (i, mi) in m.iter_mut().enumerate() {
        let p = (i as f64 + 1.0 - 0.375) / (n as f64 + 0.25);
        *mi = norm.inverse_cdf(p);
        summ2 += *mi * *mi;
    }
    summ2 *= 2.0;
    let ssumm2 = summ2.sqrt();
    let rsn = 1.0 / (n as f64).sqrt();

    let a1 = poly(&C1, rsn) - m[0] / ssumm2;

    let mut a = vec![0.0; nn2];
    if n <= 5 {
        let fac_sq = summ2 - 2.0 * m[0] * m[0];
        let rest = 1.0 - 2.0 * a1 * a1;
        if fac_sq <= 0.0 || rest <= 0.0 {
            return Err(Error::Computation("Shapiro-Wilk weight normalization failed".to_string()));
        }
        let fac = (fac_sq / rest).sqrt();
        a[0] = a1;
        for i in 1..nn2 {
            a[i] = -m[i] / fac;
        }
    } else {
        let a2 = -m[1] / ssumm2 + poly(&C2, rsn);
        let fac_sq = summ2 - 2.0 * m[0] * m[0] - 2.0 * m[1] * m[1];
        let rest = 1.0 - 2.0 * a1 * a1 - 2.0 * a2 * a2;
        if fac_sq <= 0.0 || rest <= 0.0 {
            return Err(Error::Computation("Shapiro-Wilk weight normalization failed".to_string()));
        }
        let fac = (fac_sq / rest).sqrt();
        a[0] = a1;
        a[1] = a2;
        for i in 2..nn2 {
            a[i] = -m[i] / fac;
        }
    }
    Ok(a)
}

fn statistic(x: &[f64], a: &[f64], n: usize, nn2: usize) -> f64 {
    let mut sa = 0.0;
    for i in 0..nn2 {
        sa += a[i] * (x[n - 1 - i] - x[i]);
    }
    let mean = x.iter().sum::<f64>() / n as f64;
    let ss: f64 = x.iter().map(|&v| (v - mean).powi(2)).sum();
    if ss < 1e-300 {
        return 1.0;
    }
    (sa * sa) / ss
}

// Royston's normalizing transformation of W.
fn p_value(w: f64, n: usize) -> f64 {
    let nf = n as f64;
    let w1 = 1.0 - w;
    if w1 <= 0.0 {
        return 1.0;
    }
    let y = w1.ln();
    let norm = std_normal();

    if n <= 11 {
        let gamma = poly(&G, nf);
        if y >= gamma {
            return 0.0;
        }
        let y2 = -(gamma - y).ln();
        let mu = poly(&C3, nf);
        let sigma = poly(&C4, nf).exp();
        if sigma < 1e-300 {
            return 0.0;
        }
        1.0 - norm.cdf((y2 - mu) / sigma)
    } else {
        let lx = nf.ln();
        let mu = poly(&C5, lx);
        let sigma = poly(&C6, lx).exp();
        if sigma < 1e-300 {
            return 0.0;
        }
        1.0 - norm.cdf((y - mu) / sigma)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_near_normal_sample_accepted() {
        let data = [-1.5, -1.0, -0.5, 0.0, 0.5, 1.0, 1.5];
        let r = shapiro_wilk(&data).unwrap();
        assert!(r.statistic > 0.9);
        assert!(r.p_value > 0.05);
    }

    #[test]
    fn test_heavily_skewed_sample_rejected() {
        // Geometric growth, strongly right-skewed.
        let data: Vec<f64> = (0..20).map(|i| 1.5_f64.powi(i)).collect();
        let r = shapiro_wilk(&data).unwrap();
        assert!(r.p_value < 0.01);
    }

    #[test]
    fn test_w_in_unit_interval() {
        let data = [3.1, 2.7, 4.4, 1.9, 5.0, 2.2, 3.8, 4.1, 2.9, 3.3];
        let r = shapiro_wilk(&data).unwrap();
        assert!(r.statistic > 0.0 && r.statistic <= 1.0);
        assert!((0.0..=1.0).contains(&r.p_value));
    }

    #[test]
    fn test_n3_exact_branch() {
        let r = shapiro_wilk(&[1.0, 2.0, 3.0]).unwrap();
        // Perfectly spaced triple: W = 1, p = 1.
        assert!((r.statistic - 1.0).abs() < 1e-12);
        assert!(r.p_value > 0.99);
    }

    #[test]
    fn test_out_of_range_and_constant() {
        assert!(shapiro_wilk(&[1.0, 2.0]).is_err());
        assert!(shapiro_wilk(&[4.0; 12]).is_err());
    }
}
