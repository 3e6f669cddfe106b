use error_common::ClinicError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BillingError {
    #[error("Invoice {0} is already paid")]
    AlreadyPaid(String),

    #[error("Invoice {invoice} cannot be paid while {status}")]
    NotPayable { invoice: String, status: String },

    #[error(transparent)]
    Records(#[from] ClinicError),
}

impl From<BillingError> for ClinicError {
    fn from(err: BillingError) -> Self {
        match err {
            BillingError::Records(inner) => inner,
            other => ClinicError::ValidationError(other.to_string()),
        }
    }
}

pub type BillingResult<T> = Result<T, BillingError>;
