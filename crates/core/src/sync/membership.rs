//! Membership filter
//!
//! A customer is a member when at least one of its tags (trimmed,
//! lowercased) is among the configured required tags. An empty requirement
//! set admits nobody.

use std::collections::BTreeSet;

use shopbridge_domain::{Config, TagSet};

/// Decides whether a tag string qualifies a customer for mirroring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MembershipFilter {
    required: BTreeSet<String>,
}

impl MembershipFilter {
    /// Build a filter from required tags; entries may themselves be
    /// comma-separated.
    pub fn new<I, S>(required: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let required = required
            .into_iter()
            .flat_map(|entry| {
                entry
                    .as_ref()
                    .split(',')
                    .map(|tag| tag.trim().to_lowercase())
                    .collect::<Vec<_>>()
            })
            .filter(|tag| !tag.is_empty())
            .collect();
        Self { required }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.required_tags())
    }

    /// `true` iff the tag string shares at least one tag with the required set.
    pub fn is_member(&self, tags: Option<&str>) -> bool {
        if self.required.is_empty() {
            return false;
        }
        TagSet::from_optional(tags).lowercased().iter().any(|tag| self.required.contains(tag))
    }

    pub fn required_tags(&self) -> impl Iterator<Item = &str> {
        self.required.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter() -> MembershipFilter {
        MembershipFilter::new(["member"])
    }

    #[test]
    fn matches_required_tag_case_insensitively() {
        assert!(filter().is_member(Some("Member")));
        assert!(filter().is_member(Some("vip, MEMBER ")));
    }

    #[test]
    fn empty_or_absent_tags_are_not_members() {
        assert!(!filter().is_member(Some("")));
        assert!(!filter().is_member(None));
        assert!(!filter().is_member(Some(" , ,")));
    }

    #[test]
    fn substring_is_not_a_match() {
        assert!(!filter().is_member(Some("members-only,former-member")));
    }

    #[test]
    fn any_of_several_required_tags_qualifies() {
        let filter = MembershipFilter::new(["member, Gold"]);
        assert!(filter.is_member(Some("gold")));
        assert!(filter.is_member(Some("member")));
        assert!(!filter.is_member(Some("silver")));
        assert_eq!(filter.required_tags().collect::<Vec<_>>(), vec!["gold", "member"]);
    }

    #[test]
    fn no_required_tags_admits_nobody() {
        let filter = MembershipFilter::new(Vec::<String>::new());
        assert!(!filter.is_member(Some("member")));

        let blank = MembershipFilter::new([" , "]);
        assert!(!blank.is_member(Some("member")));
    }

    #[test]
    fn built_from_config_member_tags() {
        let config = Config { member_tags: vec!["VIP".into()], ..Config::default() };
        assert!(MembershipFilter::from_config(&config).is_member(Some("vip")));
    }
}
