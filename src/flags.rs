//! Memo directives: `#flag [amount]` tokens embedded in transaction memos.
//!
//! A directive is a `#`-prefixed flag token, optionally followed by an amount
//! specifier. The specifier is either an absolute amount in major units
//! (`#rebate 12.50`) or a fraction of the transaction amount (`#churn half`,
//! `#churn 2/3`). Without a specifier the whole transaction amount counts.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::{Result, YnabError};
use crate::fmt::MILLIUNITS;

const FRACTION_WORDS: &[(&str, i64, i64)] = &[
    ("full", 1, 1),
    ("all", 1, 1),
    ("half", 1, 2),
    ("third", 1, 3),
    ("fourth", 1, 4),
    ("quarter", 1, 4),
    ("fifth", 1, 5),
    ("sixth", 1, 6),
    ("seventh", 1, 7),
    ("eighth", 1, 8),
];

fn fraction_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^(\d+)/(\d+)$").expect("static fraction pattern"))
}

/// A normalized flag token: lower-case and `#`-prefixed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flag(String);

impl Flag {
    pub fn new(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.split_whitespace().count() > 1 {
            return Err(YnabError::InvalidFlag(raw.to_string()));
        }
        let name = trimmed.trim_start_matches('#');
        if name.is_empty() {
            return Err(YnabError::InvalidFlag(raw.to_string()));
        }
        Ok(Self(format!("#{}", name.to_lowercase())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountSpecifier {
    /// Already sign-flipped and scaled to milliunits.
    Absolute(i64),
    Fraction { numerator: i64, denominator: i64 },
}

impl AmountSpecifier {
    pub fn parse(token: &str) -> Option<Self> {
        let token = token.to_lowercase();

        if let Ok(value) = token.parse::<f64>() {
            if value.is_finite() {
                let milli = (-value * MILLIUNITS as f64).round();
                if milli.abs() < i64::MAX as f64 {
                    return Some(Self::Absolute(milli as i64));
                }
            }
        }

        if let Some(&(_, numerator, denominator)) =
            FRACTION_WORDS.iter().find(|(word, _, _)| *word == token)
        {
            return Some(Self::Fraction {
                numerator,
                denominator,
            });
        }

        let caps = fraction_pattern().captures(&token)?;
        let numerator: i64 = caps[1].parse().ok()?;
        let denominator: i64 = caps[2].parse().ok()?;
        if numerator == 0 || denominator == 0 {
            return None;
        }
        Some(Self::Fraction {
            numerator,
            denominator,
        })
    }

    pub fn apply(&self, amount: i64) -> i64 {
        match *self {
            Self::Absolute(milli) => milli,
            Self::Fraction {
                numerator,
                denominator,
            } => div_round(i128::from(amount) * i128::from(numerator), i128::from(denominator)),
        }
    }
}

/// Integer division rounding half away from zero.
fn div_round(value: i128, divisor: i128) -> i64 {
    let quotient = value / divisor;
    let remainder = value % divisor;
    let rounded = if remainder.abs() * 2 >= divisor.abs() {
        if (value < 0) != (divisor < 0) {
            quotient - 1
        } else {
            quotient + 1
        }
    } else {
        quotient
    };
    rounded.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlagError {
    UnresolvableAmount(String),
}

impl fmt::Display for FlagError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnresolvableAmount(token) => write!(f, "cannot read amount {token:?}"),
        }
    }
}

/// A flag occurrence located in a memo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    /// Position of the flag among the memo's whitespace-separated tokens.
    pub index: usize,
    /// The token right after the flag, lower-cased.
    pub specifier: Option<String>,
}

impl Directive {
    pub fn amount_specifier(&self) -> Option<AmountSpecifier> {
        self.specifier.as_deref().and_then(AmountSpecifier::parse)
    }

    /// The amount this directive contributes for a transaction of `amount`
    /// milliunits. The transaction itself is left untouched.
    pub fn resolve(&self, amount: i64) -> std::result::Result<i64, FlagError> {
        match &self.specifier {
            None => Ok(amount),
            Some(token) => AmountSpecifier::parse(token)
                .map(|spec| spec.apply(amount))
                .ok_or_else(|| FlagError::UnresolvableAmount(token.clone())),
        }
    }
}

pub fn find_directive(memo: Option<&str>, flag: &Flag) -> Option<Directive> {
    let memo = memo?.to_lowercase();
    let words: Vec<&str> = memo.split_whitespace().collect();
    let index = words.iter().position(|w| *w == flag.as_str())?;
    Some(Directive {
        index,
        specifier: words.get(index + 1).map(|w| (*w).to_string()),
    })
}

/// Drop the directive's flag token, plus its amount token when that token
/// is a readable specifier.
pub fn remove_directive(memo: &str, directive: &Directive) -> String {
    let consumed = if directive.amount_specifier().is_some() { 2 } else { 1 };
    memo.split_whitespace()
        .enumerate()
        .filter(|(i, _)| *i < directive.index || *i >= directive.index + consumed)
        .map(|(_, w)| w)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Remove every directive for `flag`. Returns `None` when the memo had none.
pub fn strip_flag(memo: Option<&str>, flag: &Flag) -> Option<String> {
    let mut current = memo?.to_string();
    let mut directive = find_directive(Some(&current), flag)?;
    loop {
        current = remove_directive(&current, &directive);
        match find_directive(Some(&current), flag) {
            Some(next) => directive = next,
            None => return Some(current),
        }
    }
}

/// Append the flag to a memo. Returns `None` when it is already there.
pub fn add_flag(memo: Option<&str>, flag: &Flag) -> Option<String> {
    if find_directive(memo, flag).is_some() {
        return None;
    }
    match memo.map(str::trim).filter(|m| !m.is_empty()) {
        Some(existing) => Some(format!("{existing} {flag}")),
        None => Some(flag.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn churn() -> Flag {
        Flag::new("churn").unwrap()
    }

    fn resolve(memo: &str, flag: &Flag, amount: i64) -> std::result::Result<i64, FlagError> {
        find_directive(Some(memo), flag).unwrap().resolve(amount)
    }

    #[test]
    fn test_flag_normalization() {
        assert_eq!(Flag::new("Churn").unwrap().as_str(), "#churn");
        assert_eq!(Flag::new("#REBATE").unwrap().as_str(), "#rebate");
        assert_eq!(Flag::new("  trip ").unwrap().as_str(), "#trip");
        assert!(Flag::new("").is_err());
        assert!(Flag::new("#").is_err());
        assert!(Flag::new("two words").is_err());
    }

    #[test]
    fn test_flag_as_last_token_uses_full_amount() {
        let rebate = Flag::new("rebate").unwrap();
        assert_eq!(resolve("#rebate", &rebate, 500), Ok(500));
        assert_eq!(resolve("groceries #churn", &churn(), -42_310), Ok(-42_310));
        assert_eq!(resolve("groceries   #churn   ", &churn(), -7), Ok(-7));
    }

    #[test]
    fn test_number_specifier_is_sign_flipped_and_scaled() {
        let rebate = Flag::new("rebate").unwrap();
        assert_eq!(resolve("#rebate 12.50", &rebate, -99_000), Ok(-12_500));
        assert_eq!(resolve("#rebate -3", &rebate, 0), Ok(3_000));
        assert_eq!(resolve("#rebate .5 extra", &rebate, 0), Ok(-500));
        assert_eq!(resolve("#rebate 0.0015", &rebate, 0), Ok(-2));
    }

    #[test]
    fn test_fraction_words() {
        assert_eq!(resolve("dinner #churn half", &churn(), -6000), Ok(-3000));
        assert_eq!(resolve("#churn QUARTER", &churn(), -6000), Ok(-1500));
        assert_eq!(resolve("#churn all", &churn(), -6000), Ok(-6000));
        assert_eq!(resolve("#churn full", &churn(), 6000), Ok(6000));
        assert_eq!(resolve("#churn eighth", &churn(), -8000), Ok(-1000));
        for (word, numerator, denominator) in FRACTION_WORDS {
            let memo = format!("#churn {word}");
            assert_eq!(
                resolve(&memo, &churn(), -840_000),
                Ok(-840_000 * numerator / denominator)
            );
        }
    }

    #[test]
    fn test_literal_fraction() {
        assert_eq!(resolve("#churn 2/3", &churn(), -9000), Ok(-6000));
        assert_eq!(resolve("#churn 1/3", &churn(), -1000), Ok(-333));
        assert_eq!(resolve("#churn 2/3", &churn(), -1000), Ok(-667));
        assert_eq!(resolve("#churn 3/2", &churn(), 1000), Ok(1500));
    }

    #[test]
    fn test_unresolvable_specifier() {
        let err = resolve("#churn at dinner", &churn(), -6000).unwrap_err();
        assert_eq!(err, FlagError::UnresolvableAmount("at".to_string()));
        assert!(resolve("#churn 1/0", &churn(), -6000).is_err());
        assert!(resolve("#churn 0/4", &churn(), -6000).is_err());
        assert!(resolve("#churn 1/2/3", &churn(), -6000).is_err());
        assert!(resolve("#churn 1+1", &churn(), -6000).is_err());
        assert!(resolve("#churn inf", &churn(), -6000).is_err());
        assert!(resolve("#churn nan", &churn(), -6000).is_err());
    }

    #[test]
    fn test_flag_must_be_whole_token() {
        assert!(find_directive(Some("#churner half"), &churn()).is_none());
        assert!(find_directive(Some("x#churn"), &churn()).is_none());
        assert!(find_directive(None, &churn()).is_none());
        assert!(find_directive(Some(""), &churn()).is_none());
        let d = find_directive(Some("Lunch #CHURN Half"), &churn()).unwrap();
        assert_eq!(d.index, 1);
        assert_eq!(d.specifier.as_deref(), Some("half"));
    }

    #[test]
    fn test_remove_directive_with_amount() {
        let memo = "Dinner #churn half with Sam";
        let d = find_directive(Some(memo), &churn()).unwrap();
        assert_eq!(remove_directive(memo, &d), "Dinner with Sam");
    }

    #[test]
    fn test_remove_directive_keeps_unread_word() {
        let memo = "Dinner #churn with Sam";
        let d = find_directive(Some(memo), &churn()).unwrap();
        assert_eq!(remove_directive(memo, &d), "Dinner with Sam");
    }

    #[test]
    fn test_remove_directive_at_end() {
        let memo = "Dinner  #Churn";
        let d = find_directive(Some(memo), &churn()).unwrap();
        assert_eq!(remove_directive(memo, &d), "Dinner");
        let d = find_directive(Some("#churn"), &churn()).unwrap();
        assert_eq!(remove_directive("#churn", &d), "");
    }

    #[test]
    fn test_strip_flag_leaves_no_match() {
        let memos = [
            "#churn",
            "a #churn 12",
            "#churn half #churn",
            "keep #other 3 and #churn 1/2 end",
        ];
        for memo in memos {
            let stripped = strip_flag(Some(memo), &churn()).unwrap();
            assert!(find_directive(Some(&stripped), &churn()).is_none(), "{memo}");
        }
        assert_eq!(
            strip_flag(Some("keep #other 3 and #churn 1/2 end"), &churn()).unwrap(),
            "keep #other 3 and end"
        );
        assert!(strip_flag(Some("nothing here"), &churn()).is_none());
        assert!(strip_flag(None, &churn()).is_none());
    }

    #[test]
    fn test_add_flag() {
        assert_eq!(add_flag(None, &churn()).as_deref(), Some("#churn"));
        assert_eq!(add_flag(Some("  "), &churn()).as_deref(), Some("#churn"));
        assert_eq!(add_flag(Some("Gas"), &churn()).as_deref(), Some("Gas #churn"));
        assert!(add_flag(Some("Gas #CHURN"), &churn()).is_none());
    }

    #[test]
    fn test_resolve_never_changes_input_amount() {
        let amount = -6000;
        let d = find_directive(Some("#churn half"), &churn()).unwrap();
        let _ = d.resolve(amount);
        assert_eq!(amount, -6000);
    }
}
