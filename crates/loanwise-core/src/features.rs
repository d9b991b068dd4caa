//! Feature encoding for the loan classifier.
//!
//! Maps a [`LoanApplication`] onto the fixed 14-column vector the model was
//! trained on:
//!
//! ```text
//! [credit, log(applicant_income), log(loan_amount), log(loan_term),
//!  log(total_income), male, married_yes, dependents_1, dependents_2,
//!  dependents_3+, not_graduate, self_employed_yes, semiurban, urban]
//! ```
//!
//! Monetary and term columns are natural logs. A non-positive input yields
//! `0.0` in place of the logarithm, so the vector never carries NaN or
//! negative infinity.

use serde::Serialize;

use crate::LoanApplication;

pub const FEATURE_COUNT: usize = 14;

/// Column names in encoding order.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "credit_history",
    "applicant_income_log",
    "loan_amount_log",
    "loan_term_log",
    "total_income_log",
    "male",
    "married_yes",
    "dependents_1",
    "dependents_2",
    "dependents_3_plus",
    "not_graduate",
    "self_employed_yes",
    "semiurban",
    "urban",
];

/// Encoded loan application, always [`FEATURE_COUNT`] columns long.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        FEATURE_NAMES
            .iter()
            .position(|n| *n == name)
            .map(|i| self.0[i])
    }

    pub fn len(&self) -> usize {
        FEATURE_COUNT
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// `(name, value)` pairs in encoding order.
    pub fn named(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        FEATURE_NAMES.iter().copied().zip(self.0.iter().copied())
    }
}

/// Encode an application into its feature vector. Pure and total.
pub fn encode(app: &LoanApplication) -> FeatureVector {
    let total_income = app.applicant_income + app.coapplicant_income;

    let mut out = [0.0; FEATURE_COUNT];
    let columns = [
        app.credit_history,
        log_or_zero(app.applicant_income),
        log_or_zero(app.loan_amount),
        log_or_zero(app.loan_term),
        log_or_zero(total_income),
    ]
    .into_iter()
    .chain(app.gender.flags())
    .chain(app.married.flags())
    .chain(app.dependents.flags())
    .chain(app.education.flags())
    .chain(app.self_employed.flags())
    .chain(app.property_area.flags());

    for (slot, value) in out.iter_mut().zip(columns) {
        *slot = value;
    }
    FeatureVector(out)
}

fn log_or_zero(x: f64) -> f64 {
    if x > 0.0 { x.ln() } else { 0.0 }
}
