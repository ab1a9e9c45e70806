use crate::cache::ListScope;
use crate::CacheAside;
use campus_core::{Branch, CrmError, CrmResult, Institute};
use serde::{Deserialize, Serialize};

/// Header data shown by the front end for a branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchBranding {
    pub logo: Option<String>,
    pub institute_name: String,
    pub branch_name: String,
}

/// Combines the institute profile with one branch, read through both caches.
#[derive(Debug, Clone)]
pub struct BrandingService {
    institutes: CacheAside<Institute>,
    branches: CacheAside<Branch>,
}

impl BrandingService {
    pub fn new(institutes: CacheAside<Institute>, branches: CacheAside<Branch>) -> Self {
        Self {
            institutes,
            branches,
        }
    }

    /// The deployment's institute is the first live one on record.
    pub async fn for_branch(&self, branch_id: i64) -> CrmResult<BranchBranding> {
        let branch = self.branches.fetch_one(branch_id).await?;
        let institute = self
            .institutes
            .fetch_list(ListScope::All)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| CrmError::not_found("Institute", "any"))?;

        Ok(BranchBranding {
            logo: institute.logo,
            institute_name: institute.inst_name,
            branch_name: branch.branch_name,
        })
    }
}
