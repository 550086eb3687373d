use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Rating {
    Pass,
    Warn,
    Fail,
    Na,
}

impl Rating {
    /// Lenient token parse. Anything that is not PASS/WARN/FAIL is NA.
    pub fn parse_lenient(token: &str) -> Rating {
        Self::parse_strict(token).unwrap_or(Rating::Na)
    }

    /// Returns `None` for tokens outside the four known ratings.
    pub fn parse_strict(token: &str) -> Option<Rating> {
        let t = token.trim();
        if t.eq_ignore_ascii_case("pass") {
            Some(Rating::Pass)
        } else if t.eq_ignore_ascii_case("warn") {
            Some(Rating::Warn)
        } else if t.eq_ignore_ascii_case("fail") {
            Some(Rating::Fail)
        } else if t.eq_ignore_ascii_case("na") || t.eq_ignore_ascii_case("n/a") {
            Some(Rating::Na)
        } else {
            None
        }
    }

    pub fn is_applicable(self) -> bool {
        !matches!(self, Rating::Na)
    }

    /// PASS=1.0, WARN=0.5, FAIL=0.0; NA has no weight.
    pub fn quality_weight(self) -> Option<f64> {
        match self {
            Rating::Pass => Some(1.0),
            Rating::Warn => Some(0.5),
            Rating::Fail => Some(0.0),
            Rating::Na => None,
        }
    }
}
