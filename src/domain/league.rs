//! Sports, genders, season phases and conferences

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InvalidArgument;

/// Gender of a league, as used in the site's sport codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Men,
    Women,
}

impl Gender {
    /// Single-letter code used as the sport code prefix
    pub const fn code(self) -> &'static str {
        match self {
            Self::Men => "m",
            Self::Women => "w",
        }
    }
}

impl FromStr for Gender {
    type Err = InvalidArgument;

    /// Accepts `m`, `men`, `w` and `women` in any case
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "m" | "men" => Ok(Self::Men),
            "w" | "women" => Ok(Self::Women),
            _ => Err(InvalidArgument::Gender {
                value: value.to_string(),
            }),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Portion of a season a query targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeasonPhase {
    Regular,
    Playoffs,
    Championship,
}

impl SeasonPhase {
    pub const ALL: [Self; 3] = [Self::Regular, Self::Playoffs, Self::Championship];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Regular => "regular",
            Self::Playoffs => "playoffs",
            Self::Championship => "championship",
        }
    }

    /// Season path segment for this phase, e.g. `2024-25p` for playoffs
    pub fn url_fragment(self, season_id: &str) -> String {
        match self {
            Self::Regular => season_id.to_string(),
            Self::Playoffs => format!("{season_id}p"),
            Self::Championship => format!("{season_id}c"),
        }
    }

    /// Standings are only published for the regular season
    pub const fn has_standings(self) -> bool {
        matches!(self, Self::Regular)
    }

    fn allowed() -> String {
        Self::ALL
            .iter()
            .map(|phase| phase.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl FromStr for SeasonPhase {
    type Err = InvalidArgument;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let lowered = value.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|phase| phase.as_str() == lowered)
            .ok_or_else(|| InvalidArgument::Season {
                value: value.to_string(),
                allowed: Self::allowed(),
            })
    }
}

impl fmt::Display for SeasonPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sports published on the statistics site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sport {
    Basketball,
    Football,
    IceHockey,
    Soccer,
    Volleyball,
}

impl Sport {
    pub const ALL: [Self; 5] = [
        Self::Basketball,
        Self::Football,
        Self::IceHockey,
        Self::Soccer,
        Self::Volleyball,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Basketball => "basketball",
            Self::Football => "football",
            Self::IceHockey => "ice_hockey",
            Self::Soccer => "soccer",
            Self::Volleyball => "volleyball",
        }
    }

    /// Football is a single men's league and takes no gender
    pub const fn requires_gender(self) -> bool {
        !matches!(self, Self::Football)
    }

    /// Site code for the league, e.g. `mbkb` or `wice`
    ///
    /// Football rejects a gender rather than ignoring it.
    pub fn code(self, gender: Option<Gender>) -> Result<String, InvalidArgument> {
        let suffix = match self {
            Self::Basketball => "bkb",
            Self::Football if gender.is_some() => {
                return Err(InvalidArgument::UnexpectedGender {
                    sport: self.as_str().to_string(),
                });
            }
            Self::Football => return Ok("fball".to_string()),
            Self::IceHockey => "ice",
            Self::Soccer => "soc",
            Self::Volleyball => "vball",
        };
        let gender = gender.ok_or_else(|| InvalidArgument::MissingGender {
            sport: self.as_str().to_string(),
        })?;
        Ok(format!("{}{suffix}", gender.code()))
    }
}

impl FromStr for Sport {
    type Err = InvalidArgument;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().replace('-', "_").as_str() {
            "basketball" => Ok(Self::Basketball),
            "football" => Ok(Self::Football),
            "ice_hockey" | "hockey" => Ok(Self::IceHockey),
            "soccer" => Ok(Self::Soccer),
            "volleyball" => Ok(Self::Volleyball),
            _ => Err(InvalidArgument::UnknownSport {
                value: value.to_string(),
                allowed: Self::ALL
                    .iter()
                    .map(|sport| sport.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            }),
        }
    }
}

impl fmt::Display for Sport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Regional conferences of the league
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Conference {
    #[serde(rename = "OUA")]
    Oua,
    #[serde(rename = "RSEQ")]
    Rseq,
    #[serde(rename = "CW")]
    Cw,
    #[serde(rename = "AUS")]
    Aus,
}

impl Conference {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Oua => "OUA",
            Self::Rseq => "RSEQ",
            Self::Cw => "CW",
            Self::Aus => "AUS",
        }
    }
}

impl fmt::Display for Conference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("m", Gender::Men)]
    #[case("MEN", Gender::Men)]
    #[case("w", Gender::Women)]
    #[case(" Women ", Gender::Women)]
    fn test_gender_parsing(#[case] input: &str, #[case] expected: Gender) {
        assert_eq!(input.parse::<Gender>(), Ok(expected));
    }

    #[test]
    fn test_invalid_gender_is_rejected() {
        let error = "x".parse::<Gender>().unwrap_err();
        assert_eq!(
            error,
            InvalidArgument::Gender {
                value: "x".to_string()
            }
        );
    }

    #[test]
    fn test_season_phase_is_case_insensitive() {
        assert_eq!("Playoffs".parse::<SeasonPhase>(), Ok(SeasonPhase::Playoffs));
        let error = "postseason".parse::<SeasonPhase>().unwrap_err();
        assert!(error.to_string().contains("regular, playoffs, championship"));
    }

    #[test]
    fn test_season_url_fragments() {
        assert_eq!(SeasonPhase::Regular.url_fragment("2024-25"), "2024-25");
        assert_eq!(SeasonPhase::Playoffs.url_fragment("2024-25"), "2024-25p");
        assert_eq!(SeasonPhase::Championship.url_fragment("2024-25"), "2024-25c");
    }

    #[test]
    fn test_sport_codes() {
        assert_eq!(Sport::Basketball.code(Some(Gender::Men)).unwrap(), "mbkb");
        assert_eq!(Sport::IceHockey.code(Some(Gender::Women)).unwrap(), "wice");
        assert_eq!(Sport::Soccer.code(Some(Gender::Women)).unwrap(), "wsoc");
        assert_eq!(Sport::Volleyball.code(Some(Gender::Men)).unwrap(), "mvball");
        assert_eq!(Sport::Football.code(None).unwrap(), "fball");
        assert!(matches!(
            Sport::Basketball.code(None),
            Err(InvalidArgument::MissingGender { .. })
        ));
        assert_eq!(
            Sport::Football.code(Some(Gender::Women)),
            Err(InvalidArgument::UnexpectedGender {
                sport: "football".to_string()
            })
        );
    }

    #[test]
    fn test_sport_names_parse() {
        assert_eq!("ice-hockey".parse::<Sport>(), Ok(Sport::IceHockey));
        assert_eq!("Hockey".parse::<Sport>(), Ok(Sport::IceHockey));
        assert!("curling".parse::<Sport>().is_err());
    }
}
