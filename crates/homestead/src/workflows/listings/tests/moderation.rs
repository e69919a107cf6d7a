use crate::workflows::listings::domain::{ListingStatus, MarketStatus};
use crate::workflows::listings::moderation::{
    approve, delete, reject, restore, set_market_status, MarketChange, StatusChange,
};

#[test]
fn approve_moves_pending_to_approved() {
    assert_eq!(
        approve(ListingStatus::Pending),
        Ok(StatusChange::Applied(ListingStatus::Approved))
    );
}

#[test]
fn approve_is_a_no_op_when_already_approved() {
    assert_eq!(
        approve(ListingStatus::Approved),
        Ok(StatusChange::AlreadyInEffect)
    );
}

#[test]
fn approve_from_rejected_is_invalid() {
    let err = approve(ListingStatus::Rejected).expect_err("rejected cannot be approved");
    assert_eq!(err.action, "approve");
    assert_eq!(err.from, ListingStatus::Rejected);
    assert_eq!(err.to_string(), "cannot approve a rejected listing");
}

#[test]
fn reject_moves_pending_to_rejected() {
    assert_eq!(
        reject(ListingStatus::Pending),
        Ok(StatusChange::Applied(ListingStatus::Rejected))
    );
}

#[test]
fn reject_is_a_no_op_when_already_rejected() {
    assert_eq!(
        reject(ListingStatus::Rejected),
        Ok(StatusChange::AlreadyInEffect)
    );
}

#[test]
fn reject_from_approved_is_invalid() {
    assert!(reject(ListingStatus::Approved).is_err());
}

#[test]
fn restore_returns_rejected_to_pending() {
    assert_eq!(
        restore(ListingStatus::Rejected),
        Ok(StatusChange::Applied(ListingStatus::Pending))
    );
}

#[test]
fn restore_is_invalid_outside_rejected() {
    assert!(restore(ListingStatus::Pending).is_err());
    assert!(restore(ListingStatus::Approved).is_err());
}

#[test]
fn delete_is_permitted_from_approved_and_rejected_only() {
    assert!(delete(ListingStatus::Approved).is_ok());
    assert!(delete(ListingStatus::Rejected).is_ok());

    let err = delete(ListingStatus::Pending).expect_err("pending cannot be deleted");
    assert_eq!(err.action, "delete");
}

#[test]
fn market_status_requires_an_approved_listing() {
    for status in [ListingStatus::Pending, ListingStatus::Rejected] {
        let err = set_market_status(status, MarketStatus::Available, MarketStatus::Sold)
            .expect_err("non-approved listings have no market status");
        assert_eq!(err.from, status);
    }
}

#[test]
fn market_status_applies_a_change() {
    assert_eq!(
        set_market_status(
            ListingStatus::Approved,
            MarketStatus::Available,
            MarketStatus::OnHold
        ),
        Ok(MarketChange::Applied(MarketStatus::OnHold))
    );
}

#[test]
fn market_status_is_a_no_op_when_unchanged() {
    assert_eq!(
        set_market_status(
            ListingStatus::Approved,
            MarketStatus::Sold,
            MarketStatus::Sold
        ),
        Ok(MarketChange::AlreadyInEffect)
    );
}
