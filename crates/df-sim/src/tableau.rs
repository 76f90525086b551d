//! Dormand-Prince 5(4) coefficients.
//!
//! Canonical 7-stage tableau from Dormand & Prince (1980), "A family of
//! embedded Runge-Kutta formulae", J. Comp. Appl. Math. 6(1). Only the
//! 5th-order weights are kept; the stepper runs at a fixed step and never
//! forms the embedded 4th-order solution.

/// Number of stages.
pub const STAGES: usize = 7;

/// Order of the propagated solution.
pub const ORDER: u8 = 5;

/// Nodes c_i. The dynamics are autonomous so these never enter a stage
/// evaluation; they document the tableau and check its consistency.
pub const C: [f64; STAGES] = [0.0, 1.0 / 5.0, 3.0 / 10.0, 4.0 / 5.0, 8.0 / 9.0, 1.0, 1.0];

/// Runge-Kutta matrix a_ij, lower triangular, stored as A[i][j] for j < i.
pub const A: [[f64; STAGES - 1]; STAGES] = [
    [0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    [1.0 / 5.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    [3.0 / 40.0, 9.0 / 40.0, 0.0, 0.0, 0.0, 0.0],
    [44.0 / 45.0, -56.0 / 15.0, 32.0 / 9.0, 0.0, 0.0, 0.0],
    [
        19372.0 / 6561.0,
        -25360.0 / 2187.0,
        64448.0 / 6561.0,
        -212.0 / 729.0,
        0.0,
        0.0,
    ],
    [
        9017.0 / 3168.0,
        -355.0 / 33.0,
        46732.0 / 5247.0,
        49.0 / 176.0,
        -5103.0 / 18656.0,
        0.0,
    ],
    // FSAL row: identical to B
    [
        35.0 / 384.0,
        0.0,
        500.0 / 1113.0,
        125.0 / 192.0,
        -2187.0 / 6784.0,
        11.0 / 84.0,
    ],
];

/// 5th-order weights b_i.
pub const B: [f64; STAGES] = [
    35.0 / 384.0,
    0.0,
    500.0 / 1113.0,
    125.0 / 192.0,
    -2187.0 / 6784.0,
    11.0 / 84.0,
    0.0,
];
