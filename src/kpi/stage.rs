//! Stage and status classification. The tests are deliberately independent
//! substring checks: a stage such as "Closed Lost" is both closed and lost,
//! and an unrecognized stage is neither closed nor open. Keeping the flags
//! independent preserves how the boards are actually labeled.

/// Independent classification flags for one deal stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StageFlags {
    pub closed: bool,
    pub open: bool,
    pub lost: bool,
}

/// Classify a raw stage label. Input is trimmed and lower-cased first, so
/// "CLOSED WON" and "closed won" classify identically.
pub fn classify_stage(stage: &str) -> StageFlags {
    let stage = stage.trim().to_lowercase();
    StageFlags {
        closed: stage.contains("closed") || stage.contains("won"),
        open: stage.contains("open") || stage.contains("hold"),
        lost: stage.contains("lost") || stage.contains("cancelled"),
    }
}

/// Whether an execution status means the work order is finished or delivered.
/// Used for delay detection, where a cancelled order can still be delayed.
pub fn indicates_completion(status: &str) -> bool {
    let status = status.to_lowercase();
    ["done", "complete", "delivered"].iter().any(|word| status.contains(word))
}

/// Whether an execution status counts toward active load. Cancelled orders
/// are excluded here but not in `indicates_completion`.
pub fn is_active_status(status: &str) -> bool {
    let status = status.to_lowercase();
    !["done", "complete", "delivered", "cancelled"].iter().any(|word| status.contains(word))
}
