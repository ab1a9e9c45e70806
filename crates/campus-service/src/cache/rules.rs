//! Cache key rules per record type.
//!
//! Every record type declares once which keys hold it: its single-record key
//! `<prefix>_<id>` and one list key per scoping dimension. The accessor
//! derives every read key and every eviction from this table.

use campus_core::{
    Admission, AdmissionCourse, AdmissionService, Batch, Branch, Course, CrmError, CrmResult,
    Document, Enquiry, Entity, Institute, Payment, PaymentCourse, PaymentService, Section,
    ServiceOffering, User,
};
use campus_repository::Filter;

/// Column a list is scoped by, and how to read it off a record.
pub struct Dimension<E> {
    pub column: &'static str,
    pub value: fn(&E) -> Option<i64>,
}

impl<E> Clone for Dimension<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for Dimension<E> {}

impl<E> std::fmt::Debug for Dimension<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dimension").field("column", &self.column).finish()
    }
}

/// One cached list of a record type.
///
/// A global list (no dimension) is cached under the bare stem. A scoped
/// list is cached under `<stem>_<value>`.
pub struct ListRule<E> {
    pub stem: &'static str,
    pub dimension: Option<Dimension<E>>,
}

impl<E> Clone for ListRule<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for ListRule<E> {}

impl<E> std::fmt::Debug for ListRule<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListRule")
            .field("stem", &self.stem)
            .field("dimension", &self.dimension)
            .finish()
    }
}

/// Which list a caller wants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListScope {
    /// The unscoped list.
    All,
    /// Records whose `field` equals `value`.
    By { field: &'static str, value: i64 },
}

impl ListScope {
    #[must_use]
    pub const fn by(field: &'static str, value: i64) -> Self {
        Self::By { field, value }
    }
}

/// Key table for one record type.
pub struct CacheRules<E> {
    prefix: &'static str,
    lists: Vec<ListRule<E>>,
}

impl<E> Clone for CacheRules<E> {
    fn clone(&self) -> Self {
        Self {
            prefix: self.prefix,
            lists: self.lists.clone(),
        }
    }
}

impl<E> std::fmt::Debug for CacheRules<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheRules")
            .field("prefix", &self.prefix)
            .field("lists", &self.lists)
            .finish()
    }
}

impl<E: Entity> CacheRules<E> {
    #[must_use]
    pub const fn new(prefix: &'static str) -> Self {
        Self {
            prefix,
            lists: Vec::new(),
        }
    }

    /// Adds an unscoped list cached under `stem`.
    #[must_use]
    pub fn global(mut self, stem: &'static str) -> Self {
        self.lists.push(ListRule {
            stem,
            dimension: None,
        });
        self
    }

    /// Adds a list scoped by `column`, cached under `<stem>_<value>`.
    #[must_use]
    pub fn scoped(
        mut self,
        stem: &'static str,
        column: &'static str,
        value: fn(&E) -> Option<i64>,
    ) -> Self {
        self.lists.push(ListRule {
            stem,
            dimension: Some(Dimension { column, value }),
        });
        self
    }

    #[must_use]
    pub const fn prefix(&self) -> &'static str {
        self.prefix
    }

    #[must_use]
    pub fn single_key(&self, id: i64) -> String {
        format!("{}_{}", self.prefix, id)
    }

    /// Resolves a scope to its cache key and repository filter.
    ///
    /// Soft-deleted records never match the filter.
    pub fn list_target(&self, scope: ListScope) -> CrmResult<(String, Filter)> {
        let rule = self.lists.iter().find(|rule| match (scope, &rule.dimension) {
            (ListScope::All, None) => true,
            (ListScope::By { field, .. }, Some(dimension)) => dimension.column == field,
            _ => false,
        });

        match (scope, rule) {
            (ListScope::All, Some(rule)) => Ok((rule.stem.to_string(), Filter::new().live())),
            (ListScope::By { field, value }, Some(rule)) => Ok((
                format!("{}_{}", rule.stem, value),
                Filter::new().eq(field, value).live(),
            )),
            (ListScope::All, None) => Err(CrmError::validation(format!(
                "{} records are only listed by a scoping field",
                E::NAME
            ))),
            (ListScope::By { field, .. }, None) => Err(CrmError::validation(format!(
                "{} records cannot be listed by {field}",
                E::NAME
            ))),
        }
    }

    /// Every list key that contains `record`.
    ///
    /// A null scoping value puts the record in no list of that dimension.
    #[must_use]
    pub fn list_keys_of(&self, record: &E) -> Vec<String> {
        self.lists
            .iter()
            .filter_map(|rule| match &rule.dimension {
                None => Some(rule.stem.to_string()),
                Some(dimension) => {
                    (dimension.value)(record).map(|value| format!("{}_{}", rule.stem, value))
                }
            })
            .collect()
    }
}

/// Record types that can be served through the cache.
pub trait CachePolicy: Entity {
    fn cache_rules() -> CacheRules<Self>;
}

impl CachePolicy for User {
    fn cache_rules() -> CacheRules<Self> {
        CacheRules::<Self>::new("user").scoped("user_list", "branch_id", |r| r.branch_id)
    }
}

impl CachePolicy for Institute {
    fn cache_rules() -> CacheRules<Self> {
        CacheRules::<Self>::new("institute").global("institute_list")
    }
}

impl CachePolicy for Branch {
    fn cache_rules() -> CacheRules<Self> {
        CacheRules::<Self>::new("branch").global("branch_list")
    }
}

impl CachePolicy for Section {
    fn cache_rules() -> CacheRules<Self> {
        CacheRules::<Self>::new("section").global("section_list")
    }
}

impl CachePolicy for Course {
    fn cache_rules() -> CacheRules<Self> {
        CacheRules::<Self>::new("course").scoped("course_list", "branch_id", |r| Some(r.branch_id))
    }
}

impl CachePolicy for Batch {
    fn cache_rules() -> CacheRules<Self> {
        CacheRules::<Self>::new("batch")
            .scoped("batch_list", "branch_id", |r| Some(r.branch_id))
            .scoped("batch_course", "course_id", |r| Some(r.course_id))
    }
}

impl CachePolicy for ServiceOffering {
    fn cache_rules() -> CacheRules<Self> {
        CacheRules::<Self>::new("service")
            .scoped("service_list", "branch_id", |r| Some(r.branch_id))
    }
}

impl CachePolicy for Enquiry {
    fn cache_rules() -> CacheRules<Self> {
        CacheRules::<Self>::new("enquiry")
            .scoped("enquiry_list", "branch_id", |r| Some(r.branch_id))
    }
}

impl CachePolicy for Admission {
    fn cache_rules() -> CacheRules<Self> {
        CacheRules::<Self>::new("admission")
            .scoped("admission_list", "branch_id", |r| Some(r.branch_id))
    }
}

impl CachePolicy for AdmissionCourse {
    fn cache_rules() -> CacheRules<Self> {
        CacheRules::<Self>::new("admissionCourse")
            .scoped("admissionCourse_list", "branch_id", |r| Some(r.branch_id))
            .scoped("admissionCourse_admission", "admission_id", |r| Some(r.admission_id))
    }
}

impl CachePolicy for AdmissionService {
    fn cache_rules() -> CacheRules<Self> {
        CacheRules::<Self>::new("admissionService")
            .scoped("admissionService_list", "branch_id", |r| Some(r.branch_id))
            .scoped("admissionService_admission", "admission_id", |r| Some(r.admission_id))
    }
}

impl CachePolicy for Document {
    fn cache_rules() -> CacheRules<Self> {
        CacheRules::<Self>::new("document")
            .scoped("document_list", "branch_id", |r| Some(r.branch_id))
            .scoped("document_admission", "admission_id", |r| Some(r.admission_id))
    }
}

impl CachePolicy for Payment {
    fn cache_rules() -> CacheRules<Self> {
        CacheRules::<Self>::new("payment")
            .scoped("payment_list", "branch_id", |r| r.branch_id)
            .scoped("payment_admission", "admission_id", |r| r.admission_id)
    }
}

impl CachePolicy for PaymentCourse {
    fn cache_rules() -> CacheRules<Self> {
        CacheRules::<Self>::new("paymentCourse")
            .scoped("paymentCourse_list", "branch_id", |r| Some(r.branch_id))
            .scoped("paymentCourse_admission", "admission_id", |r| Some(r.admission_id))
    }
}

impl CachePolicy for PaymentService {
    fn cache_rules() -> CacheRules<Self> {
        CacheRules::<Self>::new("paymentService")
            .scoped("paymentService_list", "branch_id", |r| Some(r.branch_id))
            .scoped("paymentService_admission", "admission_id", |r| Some(r.admission_id))
    }
}
