//! Loan application record and the raw HTML form it is parsed from.
//!
//! Categorical fields are matched on the exact token the form submits; any
//! other token falls through to the variant that encodes as all-zero flags.
//! Numeric fields must be finite numbers.

use serde::{Deserialize, Serialize};

use crate::FormError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Other,
}

impl Gender {
    pub fn from_token(token: &str) -> Self {
        match token.trim() {
            "Male" => Self::Male,
            _ => Self::Other,
        }
    }

    pub fn flags(self) -> [f64; 1] {
        match self {
            Self::Male => [1.0],
            Self::Other => [0.0],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum YesNo {
    Yes,
    No,
}

impl YesNo {
    pub fn from_token(token: &str) -> Self {
        match token.trim() {
            "Yes" => Self::Yes,
            _ => Self::No,
        }
    }

    pub fn flags(self) -> [f64; 1] {
        match self {
            Self::Yes => [1.0],
            Self::No => [0.0],
        }
    }
}

/// Number of dependents as offered by the form: 0, 1, 2 or "3+".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Dependents {
    Zero,
    One,
    Two,
    ThreePlus,
}

impl Dependents {
    pub fn from_token(token: &str) -> Self {
        match token.trim() {
            "1" => Self::One,
            "2" => Self::Two,
            "3+" => Self::ThreePlus,
            _ => Self::Zero,
        }
    }

    /// One-hot over `[1, 2, 3+]`; zero dependents sets no flag.
    pub fn flags(self) -> [f64; 3] {
        match self {
            Self::Zero => [0.0, 0.0, 0.0],
            Self::One => [1.0, 0.0, 0.0],
            Self::Two => [0.0, 1.0, 0.0],
            Self::ThreePlus => [0.0, 0.0, 1.0],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Education {
    Graduate,
    NotGraduate,
}

impl Education {
    pub fn from_token(token: &str) -> Self {
        match token.trim() {
            "Not Graduate" => Self::NotGraduate,
            _ => Self::Graduate,
        }
    }

    pub fn flags(self) -> [f64; 1] {
        match self {
            Self::Graduate => [0.0],
            Self::NotGraduate => [1.0],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropertyArea {
    Urban,
    Semiurban,
    Rural,
}

impl PropertyArea {
    pub fn from_token(token: &str) -> Self {
        match token.trim() {
            "Urban" => Self::Urban,
            "Semiurban" => Self::Semiurban,
            _ => Self::Rural,
        }
    }

    /// One-hot over `[Semiurban, Urban]`; rural sets no flag.
    pub fn flags(self) -> [f64; 2] {
        match self {
            Self::Semiurban => [1.0, 0.0],
            Self::Urban => [0.0, 1.0],
            Self::Rural => [0.0, 0.0],
        }
    }
}

/// A single loan application, built per form submission and consumed once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanApplication {
    pub gender: Gender,
    pub married: YesNo,
    pub dependents: Dependents,
    pub education: Education,
    pub self_employed: YesNo,
    pub credit_history: f64,
    pub property_area: PropertyArea,
    pub applicant_income: f64,
    pub coapplicant_income: f64,
    pub loan_amount: f64,
    /// Loan term as submitted (the source dataset records it in days).
    pub loan_term: f64,
}

/// Raw form submission, keyed by the HTML input names.
///
/// Every field is optional so that a missing input surfaces as a
/// [`FormError::Missing`] rather than a framework rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoanForm {
    pub gender: Option<String>,
    pub married: Option<String>,
    pub dependents: Option<String>,
    pub education: Option<String>,
    pub employed: Option<String>,
    pub credit: Option<String>,
    pub area: Option<String>,
    #[serde(rename = "ApplicantIncome")]
    pub applicant_income: Option<String>,
    #[serde(rename = "CoapplicantIncome")]
    pub coapplicant_income: Option<String>,
    #[serde(rename = "LoanAmount")]
    pub loan_amount: Option<String>,
    #[serde(rename = "Loan_Amount_Term")]
    pub loan_amount_term: Option<String>,
}

impl LoanForm {
    pub fn parse(&self) -> Result<LoanApplication, FormError> {
        Ok(LoanApplication {
            gender: Gender::from_token(required("gender", &self.gender)?),
            married: YesNo::from_token(required("married", &self.married)?),
            dependents: Dependents::from_token(required("dependents", &self.dependents)?),
            education: Education::from_token(required("education", &self.education)?),
            self_employed: YesNo::from_token(required("employed", &self.employed)?),
            credit_history: number("credit", &self.credit)?,
            property_area: PropertyArea::from_token(required("area", &self.area)?),
            applicant_income: number("ApplicantIncome", &self.applicant_income)?,
            coapplicant_income: number("CoapplicantIncome", &self.coapplicant_income)?,
            loan_amount: number("LoanAmount", &self.loan_amount)?,
            loan_term: number("Loan_Amount_Term", &self.loan_amount_term)?,
        })
    }
}

fn required<'a>(field: &'static str, value: &'a Option<String>) -> Result<&'a str, FormError> {
    value.as_deref().ok_or(FormError::Missing(field))
}

fn number(field: &'static str, value: &Option<String>) -> Result<f64, FormError> {
    let raw = required(field, value)?.trim();
    if raw.is_empty() {
        return Err(FormError::Missing(field));
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(FormError::InvalidNumber {
            field,
            value: raw.to_string(),
        }),
    }
}

/// Loan decision shown to the applicant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PredictionResult {
    Approved,
    Rejected,
}

impl PredictionResult {
    /// Classifier label that means rejection. Every other label approves.
    pub const REJECTED_LABEL: &'static str = "N";

    pub fn from_label(label: &str) -> Self {
        if label == Self::REJECTED_LABEL {
            Self::Rejected
        } else {
            Self::Approved
        }
    }

    /// User-facing answer to "is the loan approved?".
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approved => "Yes",
            Self::Rejected => "No",
        }
    }
}
