//! The sixteen-stage tailoring pipeline
//!
//! Every order moves through the same fixed sequence of stages, from the
//! first intake of a name card to completion. Forward progress is always a
//! single step to the immediate successor. The only backward edge is the
//! failed-fitting path, which sends an order from `Final Fitting` or
//! `Fit Check` back to `Final Cutting`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::core::error::ValidationError;

/// A stage of the tailoring pipeline
///
/// The declaration order is the pipeline order; `ALL[i]` and
/// [`OrderStatus::position`] agree for every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OrderStatus {
    IntakeIdCard,
    OcrCaptured,
    CustomerVerified,
    OrderInfoCollected,
    FabricCalculated,
    PrintedForTailor,
    CuttingFabric,
    TailorProcessing,
    FittingProcess,
    FinalCutting,
    FinalFitting,
    FitCheck,
    TailorFinalPaperSent,
    FinalPaperScanned,
    DeliverAndBilling,
    Completed,
}

impl OrderStatus {
    /// All stages in pipeline order
    pub const ALL: [OrderStatus; 16] = [
        OrderStatus::IntakeIdCard,
        OrderStatus::OcrCaptured,
        OrderStatus::CustomerVerified,
        OrderStatus::OrderInfoCollected,
        OrderStatus::FabricCalculated,
        OrderStatus::PrintedForTailor,
        OrderStatus::CuttingFabric,
        OrderStatus::TailorProcessing,
        OrderStatus::FittingProcess,
        OrderStatus::FinalCutting,
        OrderStatus::FinalFitting,
        OrderStatus::FitCheck,
        OrderStatus::TailorFinalPaperSent,
        OrderStatus::FinalPaperScanned,
        OrderStatus::DeliverAndBilling,
        OrderStatus::Completed,
    ];

    /// The stage every new order starts in
    pub const INITIAL: OrderStatus = OrderStatus::IntakeIdCard;

    /// Where a failed fitting sends the order back to
    pub const REFIT_TARGET: OrderStatus = OrderStatus::FinalCutting;

    /// Human-readable label, also used as the wire representation
    pub fn label(self) -> &'static str {
        match self {
            OrderStatus::IntakeIdCard => "Intake: ID / Name Card",
            OrderStatus::OcrCaptured => "OCR Captured",
            OrderStatus::CustomerVerified => "Customer Verified",
            OrderStatus::OrderInfoCollected => "Order Info Collected",
            OrderStatus::FabricCalculated => "Fabric Calculated",
            OrderStatus::PrintedForTailor => "Printed For Tailor",
            OrderStatus::CuttingFabric => "Cutting Fabric",
            OrderStatus::TailorProcessing => "Tailor Processing",
            OrderStatus::FittingProcess => "Fitting Process",
            OrderStatus::FinalCutting => "Final Cutting",
            OrderStatus::FinalFitting => "Final Fitting",
            OrderStatus::FitCheck => "Fit Check",
            OrderStatus::TailorFinalPaperSent => "Tailor Final Paper Sent",
            OrderStatus::FinalPaperScanned => "Final Paper Scanned",
            OrderStatus::DeliverAndBilling => "Deliver & Billing",
            OrderStatus::Completed => "Completed",
        }
    }

    /// Zero-based position in the pipeline
    pub fn position(self) -> usize {
        // Variants are declared in pipeline order without explicit discriminants.
        self as usize
    }

    /// Look up a stage by its position
    pub fn from_position(position: usize) -> Option<OrderStatus> {
        Self::ALL.get(position).copied()
    }

    /// The immediate successor, or `None` for the terminal stage
    pub fn next(self) -> Option<OrderStatus> {
        Self::from_position(self.position() + 1)
    }

    /// Whether this is the last stage of the pipeline
    pub fn is_terminal(self) -> bool {
        self.next().is_none()
    }

    /// Whether a failed fitting may be recorded from this stage
    pub fn can_regress(self) -> bool {
        matches!(self, OrderStatus::FinalFitting | OrderStatus::FitCheck)
    }

    /// The regression target, when regression is offered from this stage
    pub fn regression(self) -> Option<OrderStatus> {
        self.can_regress().then_some(Self::REFIT_TARGET)
    }

    /// Transitions a board view may offer for an order in this stage
    pub fn offered_transitions(self) -> Vec<Transition> {
        let mut offered = Vec::with_capacity(2);
        if let Some(to) = self.next() {
            offered.push(Transition {
                kind: TransitionKind::Advance,
                from: self,
                to,
            });
        }
        if let Some(to) = self.regression() {
            offered.push(Transition {
                kind: TransitionKind::Regress,
                from: self,
                to,
            });
        }
        offered
    }

    /// Resolve the transition from `self` to `to`, if the pipeline allows it
    pub fn transition_to(self, to: OrderStatus) -> Option<Transition> {
        self.offered_transitions().into_iter().find(|t| t.to == to)
    }

    /// Badge tone used when rendering the stage
    pub fn tone(self) -> StatusTone {
        match self {
            OrderStatus::IntakeIdCard | OrderStatus::OcrCaptured | OrderStatus::FitCheck => {
                StatusTone::Warning
            }
            OrderStatus::CustomerVerified
            | OrderStatus::OrderInfoCollected
            | OrderStatus::TailorFinalPaperSent
            | OrderStatus::FinalPaperScanned => StatusTone::Primary,
            OrderStatus::FabricCalculated
            | OrderStatus::PrintedForTailor
            | OrderStatus::CuttingFabric
            | OrderStatus::TailorProcessing => StatusTone::Secondary,
            OrderStatus::FittingProcess | OrderStatus::FinalCutting | OrderStatus::FinalFitting => {
                StatusTone::Info
            }
            OrderStatus::DeliverAndBilling | OrderStatus::Completed => StatusTone::Success,
        }
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        Self::INITIAL
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for OrderStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|status| status.label() == s)
            .ok_or_else(|| ValidationError::UnknownStatus {
                value: s.to_string(),
            })
    }
}

impl Serialize for OrderStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for OrderStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        label.parse().map_err(serde::de::Error::custom)
    }
}

/// Direction of a pipeline transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionKind {
    /// One step forward to the immediate successor
    Advance,
    /// Failed fitting, back to `Final Cutting`
    Regress,
}

/// A legal move between two stages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub kind: TransitionKind,
    pub from: OrderStatus,
    pub to: OrderStatus,
}

impl Transition {
    /// Label a board view shows on the action chip
    pub fn action_label(&self) -> String {
        match self.kind {
            TransitionKind::Advance => format!("Next: {}", self.to),
            TransitionKind::Regress => format!("Not fit → back to {}", self.to),
        }
    }
}

/// Badge tone of a stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusTone {
    Warning,
    Primary,
    Secondary,
    Info,
    Success,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_is_positional_successor() {
        for p in 0..OrderStatus::ALL.len() - 1 {
            assert_eq!(OrderStatus::ALL[p].next(), Some(OrderStatus::ALL[p + 1]));
        }
        assert_eq!(OrderStatus::Completed.next(), None);
        assert!(OrderStatus::Completed.is_terminal());
    }

    #[test]
    fn test_position_matches_all() {
        for (i, status) in OrderStatus::ALL.iter().enumerate() {
            assert_eq!(status.position(), i);
            assert_eq!(OrderStatus::from_position(i), Some(*status));
        }
        assert_eq!(OrderStatus::from_position(16), None);
    }

    #[test]
    fn test_regression_only_from_fitting_stages() {
        for status in OrderStatus::ALL {
            let expected = matches!(status, OrderStatus::FinalFitting | OrderStatus::FitCheck);
            assert_eq!(status.can_regress(), expected, "{}", status);
        }
        assert_eq!(
            OrderStatus::FitCheck.regression(),
            Some(OrderStatus::FinalCutting)
        );
        assert_eq!(OrderStatus::FinalCutting.regression(), None);
    }

    #[test]
    fn test_offered_transitions() {
        let offered = OrderStatus::FinalFitting.offered_transitions();
        assert_eq!(offered.len(), 2);
        assert_eq!(offered[0].kind, TransitionKind::Advance);
        assert_eq!(offered[0].to, OrderStatus::FitCheck);
        assert_eq!(offered[1].kind, TransitionKind::Regress);
        assert_eq!(offered[1].to, OrderStatus::FinalCutting);

        assert!(OrderStatus::Completed.offered_transitions().is_empty());
        assert_eq!(OrderStatus::IntakeIdCard.offered_transitions().len(), 1);
    }

    #[test]
    fn test_transition_to_rejects_skips() {
        assert!(
            OrderStatus::IntakeIdCard
                .transition_to(OrderStatus::OcrCaptured)
                .is_some()
        );
        assert!(
            OrderStatus::IntakeIdCard
                .transition_to(OrderStatus::Completed)
                .is_none()
        );
        assert!(
            OrderStatus::FittingProcess
                .transition_to(OrderStatus::FinalCutting)
                .is_some()
        );
        assert!(
            OrderStatus::Completed
                .transition_to(OrderStatus::FinalCutting)
                .is_none()
        );
    }

    #[test]
    fn test_label_round_trip_and_unknown() {
        let status: OrderStatus = "Deliver & Billing".parse().unwrap();
        assert_eq!(status, OrderStatus::DeliverAndBilling);
        assert!("Shipped".parse::<OrderStatus>().is_err());

        let json = serde_json::to_string(&OrderStatus::IntakeIdCard).unwrap();
        assert_eq!(json, "\"Intake: ID / Name Card\"");
        assert!(serde_json::from_str::<OrderStatus>("\"nope\"").is_err());
    }

    #[test]
    fn test_tones() {
        assert_eq!(OrderStatus::FitCheck.tone(), StatusTone::Warning);
        assert_eq!(OrderStatus::Completed.tone(), StatusTone::Success);
        assert_eq!(OrderStatus::TailorProcessing.tone(), StatusTone::Secondary);
    }

    #[test]
    fn test_action_labels() {
        let offered = OrderStatus::FitCheck.offered_transitions();
        assert_eq!(offered[0].action_label(), "Next: Tailor Final Paper Sent");
        assert_eq!(offered[1].action_label(), "Not fit → back to Final Cutting");
    }
}
