//! Per-slot submission status for a bundle raced across future blocks.

use crate::BundledTx;
use alloy::primitives::B256;
use core::fmt;
use serde::{Deserialize, Serialize};

/// What the relay handed back for one broadcast.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleHandle {
    /// Bundle hash reported by the relay, if any.
    pub bundle_hash: Option<B256>,
    /// Members of the broadcast bundle.
    pub members: Vec<BundledTx>,
}

/// One broadcast of a bundle into a specific future slot.
///
/// Created at broadcast time and never mutated; later slot statuses carry it
/// along.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRecord {
    /// Block height the bundle targets.
    pub target_slot: u64,
    /// Relay handle for the broadcast.
    pub handle: BundleHandle,
}

impl SubmissionRecord {
    /// Create a new record.
    pub const fn new(target_slot: u64, handle: BundleHandle) -> Self {
        Self { target_slot, handle }
    }
}

/// How the relay resolved one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    /// Every bundle member landed in the target block.
    Included,
    /// The target block was produced without the bundle.
    BlockPassedWithoutInclusion,
    /// The signer's nonce moved past the bundle's nonces.
    AccountNonceTooHigh,
}

/// Discriminant of [`SlotStatus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotState {
    /// Broadcast not done yet.
    Submitting,
    /// Broadcast accepted by the relay, awaiting a result.
    Submitted,
    /// The bundle landed in this slot.
    Included,
    /// The slot passed without the bundle.
    PassedWithoutInclusion,
    /// The nonces were consumed elsewhere.
    NonceTooHigh,
    /// An earlier slot already landed, this one was never awaited.
    Skipped,
}

impl SlotState {
    /// Lowercase name of the state.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Submitting => "submitting",
            Self::Submitted => "submitted",
            Self::Included => "included",
            Self::PassedWithoutInclusion => "passed_without_inclusion",
            Self::NonceTooHigh => "nonce_too_high",
            Self::Skipped => "skipped",
        }
    }
}

impl fmt::Display for SlotState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status of one slot of a round.
///
/// Every slot starts [`SlotStatus::Submitting`], becomes
/// [`SlotStatus::Submitted`] once its broadcast succeeds, and then resolves to
/// exactly one terminal state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "submission", rename_all = "snake_case")]
pub enum SlotStatus {
    /// Broadcast not done yet.
    #[default]
    Submitting,
    /// Awaiting a result.
    Submitted(SubmissionRecord),
    /// Landed.
    Included(SubmissionRecord),
    /// Slot passed without inclusion.
    PassedWithoutInclusion(SubmissionRecord),
    /// Nonce already consumed.
    NonceTooHigh(SubmissionRecord),
    /// Not awaited because an earlier slot landed.
    Skipped(SubmissionRecord),
}

impl SlotStatus {
    /// The status discriminant.
    pub const fn state(&self) -> SlotState {
        match self {
            Self::Submitting => SlotState::Submitting,
            Self::Submitted(_) => SlotState::Submitted,
            Self::Included(_) => SlotState::Included,
            Self::PassedWithoutInclusion(_) => SlotState::PassedWithoutInclusion,
            Self::NonceTooHigh(_) => SlotState::NonceTooHigh,
            Self::Skipped(_) => SlotState::Skipped,
        }
    }

    /// The submission record, absent while still submitting.
    pub const fn record(&self) -> Option<&SubmissionRecord> {
        match self {
            Self::Submitting => None,
            Self::Submitted(record)
            | Self::Included(record)
            | Self::PassedWithoutInclusion(record)
            | Self::NonceTooHigh(record)
            | Self::Skipped(record) => Some(record),
        }
    }

    /// Target block height, absent while still submitting.
    pub fn target_slot(&self) -> Option<u64> {
        self.record().map(|record| record.target_slot)
    }

    /// True while the slot has no final outcome.
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Submitting | Self::Submitted(_))
    }

    /// Apply a relay resolution to a submitted slot.
    ///
    /// Returns `None` if the slot is not [`SlotStatus::Submitted`].
    pub fn resolve(&self, resolution: Resolution) -> Option<Self> {
        let Self::Submitted(record) = self else { return None };
        let record = record.clone();
        Some(match resolution {
            Resolution::Included => Self::Included(record),
            Resolution::BlockPassedWithoutInclusion => Self::PassedWithoutInclusion(record),
            Resolution::AccountNonceTooHigh => Self::NonceTooHigh(record),
        })
    }

    /// Mark a pending slot skipped.
    ///
    /// Returns `None` if the slot already resolved, or never got a record.
    pub fn skip(&self) -> Option<Self> {
        match self {
            Self::Submitted(record) => Some(Self::Skipped(record.clone())),
            _ => None,
        }
    }
}

impl fmt::Display for SlotStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.target_slot() {
            Some(slot) => write!(f, "{slot} - {}", self.state()),
            None => write!(f, "{}", self.state()),
        }
    }
}

/// Immutable snapshot of a round, published after every transition.
///
/// `version` increases by one with each published change so observers can
/// tell snapshots apart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundState {
    /// Publication counter.
    pub version: u64,
    /// Per-slot status, index `i` targets `current_height + i`.
    pub slots: Vec<SlotStatus>,
    /// True once a submission started and until it is cleared.
    pub submitting: bool,
    /// True once no slot is pending any more.
    pub completed: bool,
    /// Human readable description of the error that ended the round.
    pub error: Option<String>,
}

impl RoundState {
    /// True if any slot landed.
    pub fn included(&self) -> bool {
        self.slots.iter().any(|slot| slot.state() == SlotState::Included)
    }

    /// The slot the bundle landed in, if any.
    pub fn included_slot(&self) -> Option<u64> {
        self.slots
            .iter()
            .find(|slot| slot.state() == SlotState::Included)
            .and_then(SlotStatus::target_slot)
    }

    /// True if any slot is still pending.
    pub fn has_pending(&self) -> bool {
        self.slots.iter().any(SlotStatus::is_pending)
    }

    /// Slot states, in slot order.
    pub fn states(&self) -> Vec<SlotState> {
        self.slots.iter().map(SlotStatus::state).collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn record(slot: u64) -> SubmissionRecord {
        SubmissionRecord::new(slot, BundleHandle::default())
    }

    #[test]
    fn resolves_only_submitted_slots() {
        let submitted = SlotStatus::Submitted(record(10));
        assert_eq!(
            submitted.resolve(Resolution::Included),
            Some(SlotStatus::Included(record(10)))
        );
        assert_eq!(
            submitted.resolve(Resolution::BlockPassedWithoutInclusion),
            Some(SlotStatus::PassedWithoutInclusion(record(10)))
        );
        assert_eq!(
            submitted.resolve(Resolution::AccountNonceTooHigh),
            Some(SlotStatus::NonceTooHigh(record(10)))
        );

        assert!(SlotStatus::Submitting.resolve(Resolution::Included).is_none());
        assert!(SlotStatus::Included(record(10)).resolve(Resolution::Included).is_none());
    }

    #[test]
    fn skip_leaves_resolved_slots_alone() {
        assert_eq!(SlotStatus::Submitted(record(3)).skip(), Some(SlotStatus::Skipped(record(3))));
        assert!(SlotStatus::NonceTooHigh(record(3)).skip().is_none());
        assert!(SlotStatus::Submitting.skip().is_none());
    }

    #[test]
    fn displays_like_status_lines() {
        assert_eq!(SlotStatus::Submitting.to_string(), "submitting");
        assert_eq!(
            SlotStatus::PassedWithoutInclusion(record(42)).to_string(),
            "42 - passed_without_inclusion"
        );
    }

    #[test]
    fn round_state_queries() {
        let state = RoundState {
            slots: vec![
                SlotStatus::PassedWithoutInclusion(record(1)),
                SlotStatus::Included(record(2)),
                SlotStatus::Skipped(record(3)),
            ],
            ..Default::default()
        };
        assert!(state.included());
        assert_eq!(state.included_slot(), Some(2));
        assert!(!state.has_pending());
        assert_eq!(
            state.states(),
            vec![SlotState::PassedWithoutInclusion, SlotState::Included, SlotState::Skipped]
        );
    }
}
