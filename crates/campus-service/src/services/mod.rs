//! Entity services.

mod admission_detail;
mod auth_service;
mod branding;
mod ledger;
mod record_service;
mod user_service;

pub use admission_detail::{AdmissionDetail, AdmissionDetails};
pub use auth_service::{AuthService, LoginOutcome};
pub use branding::{BrandingService, BranchBranding};
pub use ledger::{LedgerEntry, PaymentLedger};
pub use record_service::{EntityWorkflow, RecordService};
pub use user_service::UserService;
