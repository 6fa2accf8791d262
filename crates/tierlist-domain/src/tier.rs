//! Tier module - the fixed ranked categories

use std::cmp::Ordering;
use std::fmt;

/// RGB color triple
pub type Rgb = [u8; 3];

/// Ranked category a member can be placed in
///
/// The set is closed. Ordering (best first) comes from [`Tier::ALL`] and
/// [`Tier::rank`], never from declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    /// Top tier
    S,
    /// Second tier
    A,
    /// Third tier
    B,
    /// Fourth tier
    C,
    /// Fifth tier
    D,
    /// Bottom tier
    F,
}

impl Tier {
    /// Number of tiers
    pub const COUNT: usize = 6;

    /// Every tier, best first. Rendering and iteration follow this table.
    pub const ALL: [Tier; Tier::COUNT] = [Tier::S, Tier::A, Tier::B, Tier::C, Tier::D, Tier::F];

    /// Position in [`Tier::ALL`] (0 = S)
    pub fn rank(self) -> usize {
        match self {
            Tier::S => 0,
            Tier::A => 1,
            Tier::B => 2,
            Tier::C => 3,
            Tier::D => 4,
            Tier::F => 5,
        }
    }

    /// Look up a tier by rank
    pub fn from_rank(rank: usize) -> Option<Self> {
        Self::ALL.get(rank).copied()
    }

    /// Short label drawn in the tier's band
    pub fn label(self) -> &'static str {
        match self {
            Tier::S => "S",
            Tier::A => "A",
            Tier::B => "B",
            Tier::C => "C",
            Tier::D => "D",
            Tier::F => "F",
        }
    }

    /// Band color of the tier's label column
    pub fn color(self) -> Rgb {
        match self {
            Tier::S => [255, 127, 127],
            Tier::A => [255, 191, 127],
            Tier::B => [255, 255, 127],
            Tier::C => [127, 255, 127],
            Tier::D => [127, 127, 255],
            Tier::F => [255, 127, 255],
        }
    }

    /// Parse a tier label, case-insensitive. Accepts "S" and "S Tier" forms.
    pub fn parse(s: &str) -> Option<Self> {
        let upper = s.trim().to_ascii_uppercase();
        let s = upper.strip_suffix(" TIER").unwrap_or(&upper);
        match s.trim_end() {
            "S" => Some(Tier::S),
            "A" => Some(Tier::A),
            "B" => Some(Tier::B),
            "C" => Some(Tier::C),
            "D" => Some(Tier::D),
            "F" => Some(Tier::F),
            _ => None,
        }
    }
}

impl PartialOrd for Tier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Tier {
    /// S < A < ... < F, i.e. better tiers sort first
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Tier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid tier: {}", s))
    }
}

/// Raw tier input coming from a command layer
///
/// Anything that can name a tier: the enum itself, a label, a char, or a
/// rank. Conversion happens inside [`crate::Tierlist::add_member`] so an
/// unrecognized value is reported as an invalid tier instead of being
/// rejected earlier.
pub trait IntoTier {
    /// Resolve to a tier, or `None` if the input names no tier
    fn into_tier(self) -> Option<Tier>;
}

impl IntoTier for Tier {
    fn into_tier(self) -> Option<Tier> {
        Some(self)
    }
}

impl IntoTier for Option<Tier> {
    fn into_tier(self) -> Option<Tier> {
        self
    }
}

impl IntoTier for &str {
    fn into_tier(self) -> Option<Tier> {
        Tier::parse(self)
    }
}

impl IntoTier for String {
    fn into_tier(self) -> Option<Tier> {
        Tier::parse(&self)
    }
}

impl IntoTier for char {
    fn into_tier(self) -> Option<Tier> {
        let mut buf = [0u8; 4];
        Tier::parse(self.encode_utf8(&mut buf))
    }
}

impl IntoTier for u8 {
    fn into_tier(self) -> Option<Tier> {
        Tier::from_rank(self as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_table() {
        for (i, tier) in Tier::ALL.iter().enumerate() {
            assert_eq!(tier.rank(), i);
            assert_eq!(Tier::from_rank(i), Some(*tier));
        }
        assert_eq!(Tier::from_rank(Tier::COUNT), None);

        let mut shuffled = vec![Tier::D, Tier::S, Tier::F, Tier::B, Tier::A, Tier::C];
        shuffled.sort();
        assert_eq!(shuffled, Tier::ALL.to_vec());
    }

    #[test]
    fn test_tier_parsing() {
        assert_eq!(Tier::parse("s"), Some(Tier::S));
        assert_eq!(Tier::parse("F"), Some(Tier::F));
        assert_eq!(Tier::parse("B Tier"), Some(Tier::B));
        assert_eq!(Tier::parse(" c "), Some(Tier::C));
        assert_eq!(Tier::parse("E"), None);
        assert_eq!(Tier::parse(""), None);
        assert!("Z".parse::<Tier>().is_err());
    }

    #[test]
    fn test_tier_suffix_any_case() {
        assert_eq!(Tier::parse("s TIER"), Some(Tier::S));
        assert_eq!(Tier::parse("a tIeR"), Some(Tier::A));
        assert_eq!(Tier::parse("D tier "), Some(Tier::D));
        assert_eq!(Tier::parse("TIER"), None);
        assert_eq!(Tier::parse("STIER"), None);
    }

    #[test]
    fn test_into_tier() {
        assert_eq!(Tier::A.into_tier(), Some(Tier::A));
        assert_eq!("d".into_tier(), Some(Tier::D));
        assert_eq!('f'.into_tier(), Some(Tier::F));
        assert_eq!(0u8.into_tier(), Some(Tier::S));
        assert_eq!(6u8.into_tier(), None);
        assert_eq!("X".to_string().into_tier(), None);
        assert_eq!(None::<Tier>.into_tier(), None);
    }

    #[test]
    fn test_colors_are_distinct() {
        for a in Tier::ALL {
            for b in Tier::ALL {
                if a != b {
                    assert_ne!(a.color(), b.color());
                }
            }
        }
    }
}
