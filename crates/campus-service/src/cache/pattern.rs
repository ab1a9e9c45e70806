use campus_core::{CrmError, CrmResult};
use regex::Regex;

/// Compiles a `*` glob into an anchored regex.
///
/// `*` matches any run of characters (including none); every other
/// character matches itself.
pub fn glob_to_regex(pattern: &str) -> CrmResult<Regex> {
    let mut source = String::with_capacity(pattern.len() + 8);
    source.push('^');
    for (i, literal) in pattern.split('*').enumerate() {
        if i > 0 {
            source.push_str(".*");
        }
        source.push_str(&regex::escape(literal));
    }
    source.push('$');

    Regex::new(&source).map_err(|e| CrmError::cache(format!("bad key pattern '{pattern}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_star_matches_any_suffix() {
        let re = glob_to_regex("course_list_*").unwrap();
        assert!(re.is_match("course_list_1"));
        assert!(re.is_match("course_list_"));
        assert!(!re.is_match("course_5"));
        assert!(!re.is_match("xcourse_list_1"));
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        let re = glob_to_regex("a.b+c").unwrap();
        assert!(re.is_match("a.b+c"));
        assert!(!re.is_match("axbbc"));
    }

    #[test]
    fn test_multiple_stars() {
        let re = glob_to_regex("*_list_*").unwrap();
        assert!(re.is_match("payment_list_10"));
        assert!(!re.is_match("payment_admission_5"));
    }
}
