//! Explicit rounding direction for arithmetic operations.

/// Specifies the rounding direction for division and power operations.
///
/// All division and fractional-power math in the curve library requires an
/// explicit `Rounding` parameter to prevent silent precision loss. The
/// load-bearing convention: amounts paid **out** of the curve always round
/// [`Down`](Rounding::Down), amounts paid **in** always round
/// [`Up`](Rounding::Up) — the curve is favoured, never the caller.
///
/// # Examples
///
/// ```
/// use ember_curve::domain::Rounding;
///
/// let r = Rounding::Up;
/// assert!(r.is_up());
/// assert!(!r.is_down());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rounding {
    /// Round towards positive infinity (ceiling).
    Up,
    /// Round towards zero (floor).
    Down,
}

impl Rounding {
    /// Returns `true` if this is [`Rounding::Up`].
    #[must_use]
    pub const fn is_up(&self) -> bool {
        matches!(self, Self::Up)
    }

    /// Returns `true` if this is [`Rounding::Down`].
    #[must_use]
    pub const fn is_down(&self) -> bool {
        matches!(self, Self::Down)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn up_is_up() {
        assert!(Rounding::Up.is_up());
        assert!(!Rounding::Up.is_down());
    }

    #[test]
    fn down_is_down() {
        assert!(Rounding::Down.is_down());
        assert!(!Rounding::Down.is_up());
    }

    #[test]
    fn equality() {
        assert_eq!(Rounding::Up, Rounding::Up);
        assert_ne!(Rounding::Up, Rounding::Down);
    }
}
