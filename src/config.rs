/// Tunable constants of the variant rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RulesConfig {
    /// Maximum squares a Rook may travel along one direction.
    pub rook_range: usize,
    /// Lets a Bishop step one square orthogonally onto an empty square.
    pub bishop_orthogonal_step: bool,
    /// Rooks keep sliding past opponent pieces instead of stopping on the first
    /// one; everything jumped over is cleared when the move is committed.
    pub rook_passes_through_opponents: bool,
    /// Column of the pawn replaced by a SuperPawn in the starting position.
    pub super_pawn_column: usize,
}

impl RulesConfig {
    pub fn new() -> Self {
        Self {
            rook_range: 3,
            bishop_orthogonal_step: true,
            rook_passes_through_opponents: false,
            super_pawn_column: 3,
        }
    }
}

impl Default for RulesConfig {
    fn default() -> Self {
        RulesConfig::new()
    }
}
