//! Translation between the judgments entered by users, their stored form and
//! the ratios used in the computations.

use crate::config::*;

/// Reads a judgment as typed in a spreadsheet cell.
///
/// The symbols are `E` (or `e`) for equal, `>` and `>>` for moderately and
/// strongly better, `<` and `<<` for moderately and strongly worse.
/// Numbers are read with [`ratio`], so `"-1"` is the same as `>` and `"7"`
/// or `"0.5"` are direct ratios.
/// Returns `None` for text that is neither a symbol nor a finite number.
///
/// ```
/// use ahp_priorities::codec::parse_symbol;
/// use ahp_priorities::Judgment;
///
/// assert_eq!(parse_symbol(">>"), Some(Judgment::MuchBetter));
/// assert_eq!(parse_symbol(" 7 "), Some(Judgment::Ratio(7.0)));
/// assert_eq!(parse_symbol("-1"), Some(Judgment::Better));
/// assert_eq!(parse_symbol("maybe"), None);
/// ```
pub fn parse_symbol(symbol: &str) -> Option<Judgment> {
    match symbol.trim() {
        "E" | "e" => Some(Judgment::Equal),
        ">" => Some(Judgment::Better),
        ">>" => Some(Judgment::MuchBetter),
        "<" => Some(Judgment::Worse),
        "<<" => Some(Judgment::MuchWorse),
        s => s.parse::<f64>().ok().and_then(ratio),
    }
}

/// A numeric judgment.
///
/// The signed codes (0 and -1 to -4) and 1 are read as the symbols they
/// stand for, any other value is a direct ratio. Returns `None` for
/// infinite and NaN values.
pub fn ratio(value: f64) -> Option<Judgment> {
    if !value.is_finite() {
        return None;
    }
    Some(Judgment::from_code(value))
}

/// The judgment seen from the other alternative of the pair.
pub fn inverse(judgment: Judgment) -> Judgment {
    match judgment {
        Judgment::Missing => Judgment::Missing,
        Judgment::Equal => Judgment::Equal,
        Judgment::Better => Judgment::Worse,
        Judgment::Worse => Judgment::Better,
        Judgment::MuchBetter => Judgment::MuchWorse,
        Judgment::MuchWorse => Judgment::MuchBetter,
        Judgment::Ratio(r) if r == 0.0 => Judgment::Missing,
        Judgment::Ratio(r) => Judgment::Ratio(1.0 / r),
    }
}

impl ScaleRules {
    /// The ratio for a stored judgment.
    ///
    /// Missing judgments resolve to 0 and ratios are passed through unchanged.
    pub fn resolve(&self, judgment: Judgment) -> f64 {
        match judgment {
            Judgment::Missing => 0.0,
            Judgment::Equal => 1.0,
            Judgment::Better => self.moderate,
            Judgment::MuchBetter => self.strong,
            Judgment::Worse => 1.0 / self.moderate,
            Judgment::MuchWorse => 1.0 / self.strong,
            Judgment::Ratio(r) => r,
        }
    }
}
