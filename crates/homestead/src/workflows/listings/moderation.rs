//! The listing status machine.
//!
//! Pure transition logic over [`ListingStatus`] and [`MarketStatus`]; the
//! service layer owns persistence and notifications. Approve and reject are
//! idempotent when the record already carries the target status, and deletion
//! is only reachable from the approved and rejected states.

use super::domain::{ListingStatus, MarketStatus};

/// Result of applying a moderation action to the stored status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusChange {
    Applied(ListingStatus),
    AlreadyInEffect,
}

/// Result of a market-status request against an approved listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarketChange {
    Applied(MarketStatus),
    AlreadyInEffect,
}

/// Raised when an action is attempted from a state that does not permit it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("cannot {action} a {status} listing", status = .from.label())]
pub struct InvalidTransition {
    pub action: &'static str,
    pub from: ListingStatus,
}

pub fn approve(current: ListingStatus) -> Result<StatusChange, InvalidTransition> {
    match current {
        ListingStatus::Pending => Ok(StatusChange::Applied(ListingStatus::Approved)),
        ListingStatus::Approved => Ok(StatusChange::AlreadyInEffect),
        ListingStatus::Rejected => Err(InvalidTransition {
            action: "approve",
            from: current,
        }),
    }
}

pub fn reject(current: ListingStatus) -> Result<StatusChange, InvalidTransition> {
    match current {
        ListingStatus::Pending => Ok(StatusChange::Applied(ListingStatus::Rejected)),
        ListingStatus::Rejected => Ok(StatusChange::AlreadyInEffect),
        ListingStatus::Approved => Err(InvalidTransition {
            action: "reject",
            from: current,
        }),
    }
}

/// Return a rejected listing to the moderation queue.
pub fn restore(current: ListingStatus) -> Result<StatusChange, InvalidTransition> {
    match current {
        ListingStatus::Rejected => Ok(StatusChange::Applied(ListingStatus::Pending)),
        ListingStatus::Pending | ListingStatus::Approved => Err(InvalidTransition {
            action: "restore",
            from: current,
        }),
    }
}

/// Deletion removes the record entirely; it is terminal and irreversible.
pub fn delete(current: ListingStatus) -> Result<(), InvalidTransition> {
    match current {
        ListingStatus::Approved | ListingStatus::Rejected => Ok(()),
        ListingStatus::Pending => Err(InvalidTransition {
            action: "delete",
            from: current,
        }),
    }
}

/// Market-status changes are only valid on approved listings; requesting the
/// current value is a success no-op.
pub fn set_market_status(
    status: ListingStatus,
    current: MarketStatus,
    requested: MarketStatus,
) -> Result<MarketChange, InvalidTransition> {
    if status != ListingStatus::Approved {
        return Err(InvalidTransition {
            action: "change market status of",
            from: status,
        });
    }

    if current == requested {
        Ok(MarketChange::AlreadyInEffect)
    } else {
        Ok(MarketChange::Applied(requested))
    }
}
