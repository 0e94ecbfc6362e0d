use crate::errors::domain::{DomainError, ValidationKind};

/// Points paid out from a declared side bet.
///
/// The declared bonus only counts when the bid was hit exactly; otherwise it
/// is recorded but contributes nothing.
pub fn apply_bonus(bid: i32, tricks_taken: i32, declared_bonus: i32) -> Result<i32, DomainError> {
    if declared_bonus < 0 {
        return Err(DomainError::validation(
            ValidationKind::InvalidBonus,
            format!("declared bonus must be >= 0, got {declared_bonus}"),
        ));
    }
    if bid_met(bid, tricks_taken) {
        Ok(declared_bonus)
    } else {
        Ok(0)
    }
}

/// True when the bid was matched exactly.
pub fn bid_met(bid: i32, tricks_taken: i32) -> bool {
    bid == tricks_taken
}
