//! Domain records exchanged with the repository and callers.

pub mod eligibility;
pub mod matching;
pub mod organization;
pub mod program;

pub use eligibility::{EligibilityRequirement, EligibilityVerdict, first_violation};
pub use matching::Match;
pub use organization::{EmployeeCount, Organization, OrganizationType, RevenueRange};
pub use program::{FundingProgram, ProgramStatus, TrlConfidence};
