use std::{fmt::Display, str::FromStr};

/// https://giscience.github.io/openrouteservice/api-reference/endpoints/directions/
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum OrsProfile {
    #[default]
    FootWalking,
    FootHiking,
    CyclingRegular,
    DrivingCar,
    Wheelchair,
}

impl OrsProfile {
    pub const ALL: [OrsProfile; 5] = [
        OrsProfile::FootWalking,
        OrsProfile::FootHiking,
        OrsProfile::CyclingRegular,
        OrsProfile::DrivingCar,
        OrsProfile::Wheelchair,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrsProfile::FootWalking => "foot-walking",
            OrsProfile::FootHiking => "foot-hiking",
            OrsProfile::CyclingRegular => "cycling-regular",
            OrsProfile::DrivingCar => "driving-car",
            OrsProfile::Wheelchair => "wheelchair",
        }
    }
}

impl Display for OrsProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OrsProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrsProfile::ALL
            .into_iter()
            .find(|profile| profile.as_str() == s)
            .ok_or_else(|| format!("unknown routing profile {:?}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_walking() {
        assert_eq!(OrsProfile::default().to_string(), "foot-walking");
    }

    #[test]
    fn test_from_str() {
        for profile in OrsProfile::ALL {
            assert_eq!(profile.as_str().parse::<OrsProfile>().unwrap(), profile);
        }
        assert!("walking".parse::<OrsProfile>().is_err());
    }
}
