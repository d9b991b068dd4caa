//! One-shot prediction from the command line.
//!
//! Field values use the same tokens as the web form, so the command goes
//! through the same parsing, encoding, and label mapping as `/predict`.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use loanwise_ai::{Classifier, ModelArtifact, predict};
use loanwise_core::{LoanForm, encode};

#[derive(Args)]
pub struct PredictArgs {
    #[arg(long, env = "LOANWISE_MODEL", default_value = "models/loan_model.json")]
    model: PathBuf,

    /// `Male` or anything else.
    #[arg(long)]
    gender: String,

    /// `Yes` or `No`.
    #[arg(long)]
    married: String,

    /// `0`, `1`, `2` or `3+`.
    #[arg(long)]
    dependents: String,

    /// `Graduate` or `Not Graduate`.
    #[arg(long)]
    education: String,

    /// Self employed: `Yes` or `No`.
    #[arg(long)]
    employed: String,

    /// Credit history, usually `1.0` or `0.0`.
    #[arg(long)]
    credit: String,

    /// `Urban`, `Semiurban` or `Rural`.
    #[arg(long)]
    area: String,

    #[arg(long)]
    applicant_income: String,

    #[arg(long, default_value = "0")]
    coapplicant_income: String,

    #[arg(long)]
    loan_amount: String,

    /// Loan term in days.
    #[arg(long, default_value = "360")]
    loan_term: String,

    /// Print the encoded feature vector.
    #[arg(long)]
    show_features: bool,
}

impl PredictArgs {
    fn to_form(&self) -> LoanForm {
        LoanForm {
            gender: Some(self.gender.clone()),
            married: Some(self.married.clone()),
            dependents: Some(self.dependents.clone()),
            education: Some(self.education.clone()),
            employed: Some(self.employed.clone()),
            credit: Some(self.credit.clone()),
            area: Some(self.area.clone()),
            applicant_income: Some(self.applicant_income.clone()),
            coapplicant_income: Some(self.coapplicant_income.clone()),
            loan_amount: Some(self.loan_amount.clone()),
            loan_amount_term: Some(self.loan_term.clone()),
        }
    }
}

pub fn run(args: PredictArgs) -> anyhow::Result<()> {
    let model = ModelArtifact::load(&args.model)
        .with_context(|| format!("loading model {}", args.model.display()))?;
    let application = args.to_form().parse().context("invalid application")?;
    let vector = encode(&application);

    if args.show_features {
        for (name, value) in vector.named() {
            println!("  {name:<20} {value:>12.6}");
        }
    }

    let result = predict(&vector, Some(&model as &dyn Classifier))?;
    println!("Loan Status is: {}", result.as_str());
    Ok(())
}
