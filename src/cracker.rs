use num_bigint::BigUint;

use crate::bits::WIDTH;
use crate::mt19937::{Mt19937, N};
use crate::predictor::Predictor;
use crate::{untemper, CrackError};

/// Bits of output needed before the state can be recovered.
pub const REQUIRED_BITS: usize = N * WIDTH;

/// How submitted observations are being turned into state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Every submission so far was a whole number of 32-bit outputs, so each
    /// word is untempered directly.
    Direct,
    /// At least one submission had a partial width. Recovering state from
    /// those needs the matrix solver.
    Matrix,
}

/// One observation, exactly as it was submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub value: BigUint,
    pub width: usize,
}

/// Recovers MT19937 state from observed outputs and predicts the outputs
/// around them.
///
/// ```
/// use randcracker::{Mt19937, RandCracker};
///
/// let mut target = Mt19937::new(1234);
/// let mut cracker = RandCracker::new();
/// for _ in 0..624 {
///     cracker.submit(target.generate());
/// }
/// cracker.check(false).unwrap();
///
/// assert_eq!(cracker.predict_next().unwrap(), target.generate());
/// ```
#[derive(Debug, Clone)]
pub struct RandCracker {
    submitted_bits: usize,
    submissions: Vec<Submission>,
    mode: Mode,
    // Untempered words in submission order.
    observed: Vec<u32>,
    predictor: Option<Predictor>,
}

impl Default for RandCracker {
    fn default() -> Self {
        Self::new()
    }
}

impl RandCracker {
    pub fn new() -> Self {
        Self {
            submitted_bits: 0,
            submissions: Vec::new(),
            mode: Mode::Direct,
            observed: Vec::with_capacity(N),
            predictor: None,
        }
    }

    /// Submit one 32-bit output.
    pub fn submit(&mut self, value: u32) {
        self.submit_bits(&BigUint::from(value), WIDTH);
    }

    /// Submit an output `width` bits wide.
    ///
    /// Values wider than 32 bits are read as consecutive outputs, least
    /// significant word first. A width that is not a multiple of 32 switches
    /// the cracker to [`Mode::Matrix`] for good. Submitting after `check`
    /// clears readiness; the next `check` rebuilds from the latest outputs.
    pub fn submit_bits(&mut self, value: &BigUint, width: usize) {
        if width % WIDTH == 0 && self.mode == Mode::Direct {
            let mut words = value.iter_u32_digits();
            for _ in 0..(width / WIDTH) {
                let word = words.next().unwrap_or(0);
                self.observed.push(untemper(word));
            }
            // Only the latest window is ever used.
            let excess = self.observed.len().saturating_sub(N);
            self.observed.drain(..excess);
        } else {
            self.mode = Mode::Matrix;
        }
        self.submitted_bits += width;
        self.submissions.push(Submission {
            value: value.clone(),
            width,
        });
        self.predictor = None;
    }

    /// Recover the generator state from the last 624 submitted outputs.
    ///
    /// Calling this again without new submissions leaves the prediction
    /// position untouched.
    pub fn check(&mut self, force_matrix: bool) -> Result<(), CrackError> {
        self.require_bits()?;
        if force_matrix || self.mode == Mode::Matrix {
            return Err(CrackError::MatrixSolverUnavailable {
                submitted: self.submitted_bits,
            });
        }
        if self.predictor.is_some() {
            return Ok(());
        }
        let len = self.observed.len();
        let start = len.checked_sub(N).ok_or_else(|| {
            CrackError::InvariantViolation(format!(
                "{} bits submitted but only {} of {} state words buffered",
                self.submitted_bits, len, N
            ))
        })?;
        self.observed.drain(..start);
        let window: [u32; N] = self
            .observed
            .as_slice()
            .try_into()
            .map_err(|_| {
                CrackError::InvariantViolation(format!("state window is not {} words", N))
            })?;
        self.predictor = Some(Predictor::new(window));
        Ok(())
    }

    /// Predict the next output.
    pub fn predict_next(&mut self) -> Result<u32, CrackError> {
        Ok(self.predictor_mut()?.next())
    }

    /// Predict the next `count` outputs.
    pub fn predict_range(&mut self, count: usize) -> Result<Vec<u32>, CrackError> {
        let predictor = self.predictor_mut()?;
        Ok((0..count).map(|_| predictor.next()).collect())
    }

    /// Predict a `width`-bit value built from consecutive outputs, least
    /// significant word first.
    pub fn predict_bits(&mut self, width: usize) -> Result<BigUint, CrackError> {
        if width == 0 || width % WIDTH != 0 {
            return Err(CrackError::InvalidWidth { width });
        }
        let words = self.predict_range(width / WIDTH)?;
        Ok(BigUint::from_slice(&words))
    }

    /// Move the prediction position `n` outputs forward, or backward when
    /// `n` is negative. The next prediction is the output `n` places away
    /// from the one that would otherwise have come next.
    pub fn offset(&mut self, n: i64) -> Result<(), CrackError> {
        self.predictor_mut()?.offset(n);
        Ok(())
    }

    /// Index of the next predicted output, counted from the first output of
    /// the observed window.
    pub fn position(&self) -> Result<i64, CrackError> {
        Ok(self.predictor()?.position())
    }

    /// A standalone generator that produces the same outputs as
    /// `predict_next` would from here on.
    pub fn to_generator(&self) -> Result<Mt19937, CrackError> {
        Ok(self.predictor()?.to_generator())
    }

    /// Whether `check` has succeeded since the last submission.
    pub fn is_ready(&self) -> bool {
        self.predictor.is_some()
    }

    /// The current [`Mode`].
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Total width of everything submitted so far.
    pub fn submitted_bits(&self) -> usize {
        self.submitted_bits
    }

    /// Every submission, in the order it was made.
    pub fn submissions(&self) -> &[Submission] {
        &self.submissions
    }

    fn require_bits(&self) -> Result<(), CrackError> {
        if self.submitted_bits < REQUIRED_BITS {
            return Err(CrackError::InsufficientData {
                submitted: self.submitted_bits,
                required: REQUIRED_BITS,
            });
        }
        Ok(())
    }

    fn predictor(&self) -> Result<&Predictor, CrackError> {
        self.require_bits()?;
        self.predictor.as_ref().ok_or(CrackError::NotReady)
    }

    fn predictor_mut(&mut self) -> Result<&mut Predictor, CrackError> {
        self.require_bits()?;
        self.predictor.as_mut().ok_or(CrackError::NotReady)
    }
}
