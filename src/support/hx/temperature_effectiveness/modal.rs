//! Exact multi-pass shell solutions.
//!
//! Along a shell with `n` tube passes the shell temperature and the `n` tube
//! temperatures satisfy a linear system of ordinary differential equations.
//! Its solution is a sum of exponential modes; the mode amplitudes follow from
//! the inlet, turnaround, and mixing conditions, which form a small dense
//! linear system.
//!
//! Temperatures are made dimensionless so the shell (stream 1) enters at one
//! and the tubes (stream 2) enter at zero. Every exponential is referenced to
//! the end of its domain where it is bounded by one.

use nalgebra::{DMatrix, DVector, Matrix3, Vector3};

/// Direction of a tube pass relative to the shell flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Pass {
    /// Tube fluid flows in the shell flow direction.
    With,
    /// Tube fluid flows against the shell flow direction.
    Against,
}

impl Pass {
    /// Passes that alternate direction, starting with `first`.
    pub(crate) fn alternating(first: Self, count: usize) -> Vec<Self> {
        (0..count)
            .map(|i| if i % 2 == 0 { first } else { first.reversed() })
            .collect()
    }

    fn reversed(self) -> Self {
        match self {
            Self::With => Self::Against,
            Self::Against => Self::With,
        }
    }
}

/// Temperature effectiveness of a TEMA E shell with the given pass sequence.
///
/// The shell fluid flows along `x` from 0 to 1. Returns `None` when the mode
/// amplitudes cannot be determined, which happens only for pass sequences
/// with more passes against the shell flow than with it at one isolated
/// capacity ratio.
pub(crate) fn e_shell(ntu: f64, r: f64, passes: &[Pass]) -> Option<f64> {
    let count = passes.len() as f64;
    let with = passes.iter().filter(|&&pass| pass == Pass::With).count() as f64;
    let against = count - with;

    // Per-pass shell and tube NTU.
    let a = ntu / count;
    let b = ntu * r / count;
    let decay = (-b).exp();

    let disc = (ntu * ntu / 4. + a * b * (with - against) + b * b).sqrt();
    let z1 = -ntu / 2. + disc;
    let z2 = -ntu / 2. - disc;

    let modes = |x: f64| Vector3::new(1., (z1 * (x - 1.)).exp(), (z2 * x).exp());
    let with_coef = Vector3::new(1., b / (z1 + b), b / (z2 + b));
    let against_coef = Vector3::new(1., b / (b - z1), b / (b - z2));

    let (at_inlet, at_outlet) = (modes(0.), modes(1.));
    let with_in = with_coef.component_mul(&at_inlet);
    let with_out = with_coef.component_mul(&at_outlet);
    let against_in = against_coef.component_mul(&at_inlet);
    let against_out = against_coef.component_mul(&at_outlet);

    // Tube fluid entering each pass, and its sum over each direction group.
    let mut entering = Vector3::zeros();
    let mut with_sum = Vector3::zeros();
    let mut against_sum = Vector3::zeros();
    for pass in passes {
        match pass {
            Pass::With => {
                with_sum += entering;
                entering = with_out + (entering - with_in) * decay;
            }
            Pass::Against => {
                against_sum += entering;
                entering = against_in + (entering - against_out) * decay;
            }
        }
    }

    let system = Matrix3::from_rows(&[
        at_inlet.transpose(),
        (with_sum - with_in * with).transpose(),
        (against_sum - against_out * against).transpose(),
    ]);
    let amplitudes = system.lu().solve(&Vector3::new(1., 0., 0.))?;

    Some(1. - amplitudes.dot(&at_outlet))
}

/// One exponential mode on half of a divided-flow shell.
struct Mode {
    rate: f64,
    reference: f64,
    shell: f64,
    tubes: Vec<f64>,
}

impl Mode {
    fn new(rate: f64, (lower, upper): (f64, f64), shell: f64, tubes: Vec<f64>) -> Self {
        let reference = if rate > 0. { upper } else { lower };
        Self {
            rate,
            reference,
            shell,
            tubes,
        }
    }

    fn value(&self, x: f64) -> f64 {
        (self.rate * (x - self.reference)).exp()
    }
}

/// Temperature effectiveness of a TEMA J shell with an even number of passes.
///
/// The shell fluid enters at the middle, splits, and leaves at both ends. The
/// tube passes alternate direction starting in the direction of the shell
/// flow on the upper half. Returns `None` when the mode amplitudes cannot be
/// determined.
pub(crate) fn j_shell(ntu: f64, r: f64, tube_passes: usize) -> Option<f64> {
    let passes = Pass::alternating(Pass::With, tube_passes);
    let count = tube_passes as f64;
    let b = ntu * r / count;
    let root = ntu.hypot(b);

    let tube_coef = |rate: f64| -> Vec<f64> {
        passes
            .iter()
            .map(|pass| match pass {
                Pass::With => b / (rate + b),
                Pass::Against => b / (b - rate),
            })
            .collect()
    };

    // Lower half [0, 1/2] with shell flow towards 0, upper half [1/2, 1] towards 1.
    let halves: Vec<Vec<Mode>> = [((0., 0.5), ntu), ((0.5, 1.), -ntu)]
        .into_iter()
        .map(|(bounds, shift)| {
            let mut modes = vec![Mode::new(0., bounds, 1., vec![1.; tube_passes])];
            for rate in [shift + root, shift - root] {
                modes.push(Mode::new(rate, bounds, 1., tube_coef(rate)));
            }
            for (direction, rate) in [(Pass::With, -b), (Pass::Against, b)] {
                let group: Vec<usize> = (0..tube_passes)
                    .filter(|&i| passes[i] == direction)
                    .collect();
                for &other in group.iter().skip(1) {
                    let mut amplitude = vec![0.; tube_passes];
                    amplitude[group[0]] = 1.;
                    amplitude[other] = -1.;
                    modes.push(Mode::new(rate, bounds, 0., amplitude));
                }
            }
            modes
        })
        .collect();

    let offsets = [0, halves[0].len()];
    let unknowns = halves[0].len() + halves[1].len();

    let shell = |half: usize, x: f64| {
        let mut row = DVector::zeros(unknowns);
        for (j, mode) in halves[half].iter().enumerate() {
            row[offsets[half] + j] = mode.shell * mode.value(x);
        }
        row
    };
    let tube = |half: usize, pass: usize, x: f64| {
        let mut row = DVector::zeros(unknowns);
        for (j, mode) in halves[half].iter().enumerate() {
            row[offsets[half] + j] = mode.tubes[pass] * mode.value(x);
        }
        row
    };

    let mut rows: Vec<(DVector<f64>, f64)> = vec![(shell(0, 0.5), 1.), (shell(1, 0.5), 1.)];
    for pass in 0..tube_passes {
        rows.push((tube(0, pass, 0.5) - tube(1, pass, 0.5), 0.));
    }
    rows.push((tube(0, 0, 0.), 0.));
    for pass in 1..tube_passes {
        let turnaround = match passes[pass - 1] {
            Pass::With => tube(1, pass, 1.) - tube(1, pass - 1, 1.),
            Pass::Against => tube(0, pass, 0.) - tube(0, pass - 1, 0.),
        };
        rows.push((turnaround, 0.));
    }

    let mut system = DMatrix::zeros(unknowns, unknowns);
    let mut rhs = DVector::zeros(unknowns);
    for (i, (row, value)) in rows.into_iter().enumerate() {
        system.set_row(i, &row.transpose());
        rhs[i] = value;
    }
    let amplitudes = system.lu().solve(&rhs)?;

    let outlet = (shell(0, 0.).dot(&amplitudes) + shell(1, 1.).dot(&amplitudes)) / 2.;
    Some(1. - outlet)
}
