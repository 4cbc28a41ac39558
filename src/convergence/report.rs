//! Convergence study results.

use std::fmt::Write;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::ConvergenceError;

// =============================================================================
// Non-finite values
// =============================================================================

// JSON has no NaN or infinity: non-finite values are written as `null` and
// read back as NaN.

fn to_nullable(v: f64) -> Option<f64> {
    v.is_finite().then_some(v)
}

fn from_nullable(v: Option<f64>) -> f64 {
    v.unwrap_or(f64::NAN)
}

mod nullable_f64 {
    use super::*;

    pub fn serialize<S: Serializer>(value: &f64, s: S) -> Result<S::Ok, S::Error> {
        to_nullable(*value).serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
        Option::<f64>::deserialize(d).map(from_nullable)
    }
}

mod nullable_vec {
    use super::*;

    pub fn serialize<S: Serializer>(values: &[f64], s: S) -> Result<S::Ok, S::Error> {
        s.collect_seq(values.iter().map(|&v| to_nullable(v)))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<f64>, D::Error> {
        let raw = Vec::<Option<f64>>::deserialize(d)?;
        Ok(raw.into_iter().map(from_nullable).collect())
    }
}

mod nullable_table {
    use super::*;

    pub fn serialize<S: Serializer>(rows: &[Vec<f64>], s: S) -> Result<S::Ok, S::Error> {
        s.collect_seq(
            rows.iter()
                .map(|row| row.iter().map(|&v| to_nullable(v)).collect::<Vec<_>>()),
        )
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<Vec<f64>>, D::Error> {
        let raw = Vec::<Vec<Option<f64>>>::deserialize(d)?;
        Ok(raw
            .into_iter()
            .map(|row| row.into_iter().map(from_nullable).collect())
            .collect())
    }
}

// =============================================================================
// Reports
// =============================================================================

/// Result of a convergence study over one or more test functions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConvergenceReport {
    /// Operator name
    pub operator: String,
    /// Test functions, as printed
    pub functions: Vec<String>,
    /// Grid spacing along axis 0 per resolution step
    pub spacings: Vec<f64>,
    /// Relative L2 error, `errors[function][step]`
    #[serde(with = "nullable_table")]
    pub errors: Vec<Vec<f64>>,
    /// Fitted log-log slope per function
    #[serde(with = "nullable_vec")]
    pub slopes: Vec<f64>,
    /// Order the operator declares
    pub declared_order: u32,
}

/// Result of a convergence study over a single test function.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SingleConvergenceReport {
    /// Grid spacing along axis 0 per resolution step
    pub spacings: Vec<f64>,
    /// Relative L2 error per step
    #[serde(with = "nullable_vec")]
    pub errors: Vec<f64>,
    /// Fitted log-log slope
    #[serde(with = "nullable_f64")]
    pub slope: f64,
    /// Order the operator declares
    pub declared_order: u32,
}

impl ConvergenceReport {
    #[inline]
    pub fn n_functions(&self) -> usize {
        self.errors.len()
    }

    /// Rate between consecutive resolution steps for function `j`.
    ///
    /// `ln(e_i / e_{i+1}) / ln(h_i / h_{i+1})`, which is `log2(e_i / e_{i+1})`
    /// when the resolution doubles.
    pub fn observed_orders(&self, j: usize) -> Vec<f64> {
        let Some(errors) = self.errors.get(j) else {
            return Vec::new();
        };
        errors
            .windows(2)
            .zip(self.spacings.windows(2))
            .map(|(e, h)| (e[0] / e[1]).ln() / (h[0] / h[1]).ln())
            .collect()
    }

    /// Fail on the first non-finite slope.
    pub fn check_fit(&self) -> Result<(), ConvergenceError> {
        for (j, &slope) in self.slopes.iter().enumerate() {
            if !slope.is_finite() {
                return Err(ConvergenceError::DegenerateFit {
                    function: self.function_name(j),
                    slope,
                });
            }
        }
        Ok(())
    }

    /// Whether every slope is within `tol` of the declared order.
    pub fn within_tolerance(&self, tol: f64) -> bool {
        let order = f64::from(self.declared_order);
        self.slopes.iter().all(|s| (s - order).abs() <= tol)
    }

    /// Keep only the first function.
    pub fn into_single(self) -> SingleConvergenceReport {
        SingleConvergenceReport {
            spacings: self.spacings,
            errors: self.errors.into_iter().next().unwrap_or_default(),
            slope: self.slopes.first().copied().unwrap_or(f64::NAN),
            declared_order: self.declared_order,
        }
    }

    fn function_name(&self, j: usize) -> String {
        self.functions
            .get(j)
            .cloned()
            .unwrap_or_else(|| format!("f{}", j))
    }

    /// Human-readable table of errors and rates.
    pub fn summary(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{}: declared order {}",
            self.operator, self.declared_order
        );
        for j in 0..self.n_functions() {
            let rates = self.observed_orders(j);
            let _ = writeln!(
                out,
                "  {} (slope {:.3})",
                self.function_name(j),
                self.slopes.get(j).copied().unwrap_or(f64::NAN)
            );
            let _ = writeln!(out, "    {:>12}  {:>12}  {:>7}", "h", "error", "rate");
            for (i, (h, e)) in self.spacings.iter().zip(&self.errors[j]).enumerate() {
                match i.checked_sub(1).and_then(|k| rates.get(k)) {
                    Some(rate) => {
                        let _ = writeln!(out, "    {:>12.4e}  {:>12.4e}  {:>7.3}", h, e, rate);
                    }
                    None => {
                        let _ = writeln!(out, "    {:>12.4e}  {:>12.4e}  {:>7}", h, e, "-");
                    }
                }
            }
        }
        out
    }

    /// Print [`ConvergenceReport::summary`] to stdout.
    pub fn print_summary(&self) {
        println!("=== Convergence Summary ===");
        print!("{}", self.summary());
    }

    /// Pretty JSON; non-finite errors and slopes are written as `null`.
    pub fn to_json(&self) -> Result<String, ConvergenceError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a report written by [`ConvergenceReport::to_json`].
    pub fn from_json(json: &str) -> Result<Self, ConvergenceError> {
        Ok(serde_json::from_str(json)?)
    }
}
