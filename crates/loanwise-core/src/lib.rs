pub mod application;
pub mod chat;
pub mod error;
pub mod features;

pub use application::{
    Dependents, Education, Gender, LoanApplication, LoanForm, PredictionResult, PropertyArea,
    YesNo,
};
pub use chat::{ChatHistory, ChatRole, ChatTurn};
pub use error::FormError;
pub use features::{FEATURE_COUNT, FEATURE_NAMES, FeatureVector, encode};
