use std::fmt::{Display, Error, Formatter};

/// Counters of one enumeration.
#[derive(Clone, Default, Debug)]
pub struct SearchStats {
    /// Decisions taken by the agent, including the final stop.
    pub n_decisions: u64,
    pub n_fills: u64,
    pub n_empties: u64,
    pub n_jumps: u64,
    /// Complete programs yielded so far.
    pub n_programs: u64,
    /// Configurations registered in the search space.
    pub n_configurations: u64,
}

impl SearchStats {
    pub fn new() -> SearchStats {
        SearchStats::default()
    }
}

impl Display for SearchStats {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        fn label(f: &mut Formatter<'_>, label: &str) -> Result<(), Error> {
            write!(f, "{label:<20}: ")
        }

        label(f, "programs")?;
        writeln!(f, "{:<12}", self.n_programs)?;

        label(f, "decisions")?;
        writeln!(f, "{:<12}", self.n_decisions)?;

        label(f, "fills")?;
        writeln!(f, "{:<12}", self.n_fills)?;

        label(f, "empties")?;
        writeln!(f, "{:<12}", self.n_empties)?;

        label(f, "jumps")?;
        writeln!(f, "{:<12}", self.n_jumps)?;

        label(f, "configurations")?;
        writeln!(f, "{:<12}", self.n_configurations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formatting_is_line_per_counter() {
        let stats = SearchStats {
            n_decisions: 12,
            n_fills: 5,
            n_empties: 3,
            n_jumps: 3,
            n_programs: 4,
            n_configurations: 9,
        };
        let printed = format!("{stats}");
        assert_eq!(printed.lines().count(), 6);
        assert!(printed.contains("programs"));
        assert!(printed.contains("12"));
    }
}
