//! List scope query parameters.

use campus_service::ListScope;
use serde::Deserialize;

/// `?branch_id=` / `?admission_id=` / `?course_id=` on list endpoints.
///
/// At most one is honoured, the narrowest first. No parameter selects the
/// global list; record types without one reject that as a validation error.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ListQuery {
    pub branch_id: Option<i64>,
    pub admission_id: Option<i64>,
    pub course_id: Option<i64>,
}

impl ListQuery {
    #[must_use]
    pub fn scope(self) -> ListScope {
        if let Some(id) = self.admission_id {
            ListScope::by("admission_id", id)
        } else if let Some(id) = self.course_id {
            ListScope::by("course_id", id)
        } else if let Some(id) = self.branch_id {
            ListScope::by("branch_id", id)
        } else {
            ListScope::All
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_narrowest_parameter_wins() {
        let query = ListQuery {
            branch_id: Some(10),
            admission_id: Some(5),
            course_id: None,
        };
        assert!(matches!(
            query.scope(),
            ListScope::By { field: "admission_id", value: 5 }
        ));
        assert!(matches!(ListQuery::default().scope(), ListScope::All));
    }
}
