//! Record reconciler
//!
//! Decision table for one primary customer against one secondary store:
//!
//! | existing | member | action |
//! |----------|--------|--------|
//! | no       | no     | skip   |
//! | no       | yes    | create (with invite) |
//! | yes      | no     | skip, existing record untouched |
//! | yes      | yes    | update names, tags = existing ∪ primary |
//!
//! Disabling is separate and unconditional: the resolved secondary record is
//! set to `disabled` and gains the provenance tag, keeping its other tags.
//! Every action issues at most one write call.

use shopbridge_domain::constants::DISABLED_PROVENANCE_TAG;
use shopbridge_domain::{
    Customer, CustomerState, CustomerUpdate, NewCustomer, Result, ShopBridgeError,
};
use tracing::{info, warn};

use super::membership::MembershipFilter;
use super::outcome::{SkipReason, StoreSyncOutcome};
use crate::store::registry::StoreHandle;

/// Write (if any) that reconciliation will perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcilePlan {
    Skip(SkipReason),
    Create(NewCustomer),
    Update(CustomerUpdate),
}

/// Applies the create/update/skip and disable rules to secondary stores.
#[derive(Debug, Clone)]
pub struct Reconciler {
    membership: MembershipFilter,
    provenance_tag: String,
}

impl Reconciler {
    pub fn new(membership: MembershipFilter) -> Self {
        Self { membership, provenance_tag: DISABLED_PROVENANCE_TAG.to_string() }
    }

    /// Override the tag appended on disable.
    #[must_use]
    pub fn with_provenance_tag(mut self, tag: impl Into<String>) -> Self {
        self.provenance_tag = tag.into();
        self
    }

    pub const fn membership(&self) -> &MembershipFilter {
        &self.membership
    }

    pub fn provenance_tag(&self) -> &str {
        &self.provenance_tag
    }

    /// Decide what to write without touching the store.
    pub fn plan(&self, primary: &Customer, existing: Option<&Customer>) -> ReconcilePlan {
        if !self.membership.is_member(primary.tags.as_deref()) {
            return ReconcilePlan::Skip(SkipReason::NotMember);
        }

        match existing {
            Some(existing) => {
                let tags = existing.tag_set().union(&primary.tag_set());
                ReconcilePlan::Update(
                    CustomerUpdate::new(existing.id)
                        .with_names(primary.first_name.clone(), primary.last_name.clone())
                        .with_tags(&tags),
                )
            }
            None => match primary.email.as_deref().map(str::trim).filter(|e| !e.is_empty()) {
                Some(email) => ReconcilePlan::Create(NewCustomer {
                    email: email.to_string(),
                    first_name: primary.first_name.clone(),
                    last_name: primary.last_name.clone(),
                    tags: primary.tag_set().to_string(),
                    send_email_invite: true,
                }),
                None => ReconcilePlan::Skip(SkipReason::MissingEmail),
            },
        }
    }

    /// Reconcile `primary` into `store`, given the record already there (if
    /// any).
    ///
    /// # Errors
    /// Returns the store's error when the write call fails.
    pub async fn reconcile(
        &self,
        store: &StoreHandle,
        primary: &Customer,
        existing: Option<&Customer>,
    ) -> Result<StoreSyncOutcome> {
        let email = primary.email.as_deref().unwrap_or_default();

        match self.plan(primary, existing) {
            ReconcilePlan::Skip(reason) => {
                info!(store = %store.key(), email, ?reason, "skipping customer");
                Ok(StoreSyncOutcome::Skipped(reason))
            }
            ReconcilePlan::Create(new_customer) => {
                store.client().create_customer(&new_customer).await?;
                info!(
                    store = %store.key(),
                    email,
                    tags = %new_customer.tags,
                    "created and invited customer"
                );
                Ok(StoreSyncOutcome::Created)
            }
            ReconcilePlan::Update(update) => {
                store.client().update_customer(&update).await?;
                info!(
                    store = %store.key(),
                    email,
                    secondary_id = %update.id,
                    tags = update.tags.as_deref().unwrap_or_default(),
                    "updated customer"
                );
                Ok(StoreSyncOutcome::Updated)
            }
        }
    }

    /// Update that disables `existing` and appends the provenance tag.
    pub fn disable_update(&self, existing: &Customer) -> CustomerUpdate {
        let mut tags = existing.tag_set();
        tags.insert(&self.provenance_tag);
        CustomerUpdate::new(existing.id).with_state(CustomerState::Disabled).with_tags(&tags)
    }

    /// Disable a resolved secondary record. No membership check is applied.
    ///
    /// # Errors
    /// Returns the store's error when the write call fails, or
    /// `ShopBridgeError::InvalidInput` if the record has no usable id.
    pub async fn disable(
        &self,
        store: &StoreHandle,
        existing: &Customer,
        original_email: &str,
    ) -> Result<Customer> {
        if existing.id.is_unset() {
            return Err(ShopBridgeError::InvalidInput(format!(
                "secondary record for {original_email} has no id"
            )));
        }
        if existing.is_disabled() {
            warn!(
                store = %store.key(),
                email = original_email,
                "customer already disabled; reapplying"
            );
        }

        let update = self.disable_update(existing);
        let updated = store.client().update_customer(&update).await?;
        info!(
            store = %store.key(),
            email = original_email,
            secondary_id = %existing.id,
            "disabled customer"
        );
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use shopbridge_domain::{CustomerId, TagSet};

    use super::*;

    fn reconciler() -> Reconciler {
        Reconciler::new(MembershipFilter::new(["member"]))
    }

    #[test]
    fn non_member_without_match_is_skipped() {
        let primary = Customer::new(3, "c@x.com").with_tags("");
        assert_eq!(reconciler().plan(&primary, None), ReconcilePlan::Skip(SkipReason::NotMember));
    }

    #[test]
    fn non_member_with_match_leaves_existing_untouched() {
        let primary = Customer::new(3, "c@x.com").with_tags("vip");
        let existing = Customer::new(99, "c@x.com").with_tags("member");
        assert_eq!(
            reconciler().plan(&primary, Some(&existing)),
            ReconcilePlan::Skip(SkipReason::NotMember)
        );
    }

    #[test]
    fn member_without_match_is_created_with_invite() {
        let primary =
            Customer::new(1, "a@x.com").with_tags("member,vip").with_names("Ada", "Lovelace");

        match reconciler().plan(&primary, None) {
            ReconcilePlan::Create(new_customer) => {
                assert_eq!(new_customer.email, "a@x.com");
                assert_eq!(new_customer.tags, "member,vip");
                assert_eq!(new_customer.first_name.as_deref(), Some("Ada"));
                assert_eq!(new_customer.last_name.as_deref(), Some("Lovelace"));
                assert!(new_customer.send_email_invite);
            }
            other => panic!("expected create, got {other:?}"),
        }
    }

    #[test]
    fn member_with_match_merges_tags() {
        let primary = Customer::new(2, "b@x.com").with_tags("member");
        let existing = Customer::new(99, "b@x.com").with_tags("vip");

        match reconciler().plan(&primary, Some(&existing)) {
            ReconcilePlan::Update(update) => {
                assert_eq!(update.id, CustomerId::new(99));
                assert_eq!(
                    TagSet::parse(update.tags.as_deref().unwrap()),
                    TagSet::parse("member,vip")
                );
                assert_eq!(update.state, None);
            }
            other => panic!("expected update, got {other:?}"),
        }
    }

    #[test]
    fn merge_does_not_duplicate_shared_tags() {
        let primary = Customer::new(2, "b@x.com").with_tags("member, vip");
        let existing = Customer::new(99, "b@x.com").with_tags("vip,member,wholesale");

        let ReconcilePlan::Update(update) = reconciler().plan(&primary, Some(&existing)) else {
            panic!("expected update");
        };
        assert_eq!(update.tags.as_deref(), Some("vip,member,wholesale"));
    }

    #[test]
    fn disable_update_appends_provenance_tag() {
        let existing = Customer::new(77, "d@x.com").with_tags("member");
        let update = reconciler().disable_update(&existing);

        assert_eq!(update.state, Some(CustomerState::Disabled));
        let tags = TagSet::parse(update.tags.as_deref().unwrap());
        assert!(tags.contains("member"));
        assert!(tags.contains(DISABLED_PROVENANCE_TAG));
    }

    #[test]
    fn disable_update_is_stable_when_tag_already_present() {
        let existing = Customer::new(77, "d@x.com").with_tags("member,deleted-from-primary");
        let update = reconciler().disable_update(&existing);
        assert_eq!(update.tags.as_deref(), Some("member,deleted-from-primary"));
    }

    #[test]
    fn custom_provenance_tag() {
        let reconciler = reconciler().with_provenance_tag("removed-upstream");
        let update = reconciler.disable_update(&Customer::new(5, "e@x.com"));
        assert_eq!(update.tags.as_deref(), Some("removed-upstream"));
    }
}
