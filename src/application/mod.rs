//! Application layer containing the purchase-flow orchestration.
//!
//! This module defines the `PurchaseCoordinator`, which sequences one
//! purchase attempt from submit through on-chain confirmation to the
//! backend notification, driving user feedback along the way.

pub mod coordinator;
